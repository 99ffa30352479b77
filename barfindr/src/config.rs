//! Runtime configuration for the CLI.
//!
//! The data directory is resolved in priority order:
//! 1. `--data-dir` on the command line
//! 2. the `BARFINDR_DATA_DIR` environment variable
//! 3. the compiled default, `data/bars`

use std::path::{Path, PathBuf};

use crate::{Error, Result};

pub const DATA_DIR_ENV: &str = "BARFINDR_DATA_DIR";
pub const DEFAULT_DATA_DIR: &str = "data/bars";
pub const DEFAULT_LOG_FILTER: &str = "warn,barfindr=info";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub data_dir: PathBuf,
}

impl Config {
    pub fn resolve(cli_data_dir: Option<&Path>) -> Result<Self> {
        let env_value = std::env::var(DATA_DIR_ENV).ok();
        Self::resolve_with(cli_data_dir, env_value.as_deref())
    }

    /// Same as [`Config::resolve`] with the environment lookup passed in.
    pub fn resolve_with(cli_data_dir: Option<&Path>, env_value: Option<&str>) -> Result<Self> {
        let data_dir = match (cli_data_dir, env_value) {
            (Some(path), _) => path.to_path_buf(),
            (None, Some(value)) if !value.trim().is_empty() => PathBuf::from(value.trim()),
            (None, Some(_)) => {
                return Err(Error::Config(format!("{DATA_DIR_ENV} is set but empty")));
            }
            (None, None) => PathBuf::from(DEFAULT_DATA_DIR),
        };

        tracing::debug!(data_dir = %data_dir.display(), "resolved data directory");
        Ok(Self { data_dir })
    }
}

/// Load `.env` from the parent directory first, then the current one.
pub fn load_dotenv() {
    dotenvy::from_filename("../.env")
        .or_else(|_| dotenvy::dotenv())
        .ok();
}
