pub mod catalog;
pub mod category;
pub mod config;
pub mod days;
pub mod error;
pub mod filter;
pub mod geo;
pub mod happy_hour;
pub mod hours;
pub mod query;
pub mod slug;
pub mod validate;

#[cfg(test)]
mod test_support;

pub use catalog::{load_dir, Catalog};
pub use config::Config;
pub use error::{Error, Result};
pub use filter::{FilterCriteria, SortKey};
pub use shared_types::{Bar, Location, Ratings};
pub use validate::{ValidationIssue, ValidationReport};
