//! The set of bars the directory serves, loaded once from a directory of
//! JSON files (one record per file) and never mutated afterwards.

use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use shared_types::Bar;

use crate::slug::{ensure_unique_slug, generate_slug};
use crate::validate::{validate_bar, ValidationReport};
use crate::{Error, Result};

/// Files in the data directory that are not bar records.
fn is_record_file(path: &Path) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    path.extension().is_some_and(|ext| ext == "json")
        && !name.starts_with('_')
        && name != "schema.json"
}

pub fn read_bar(path: &Path) -> Result<Bar> {
    let contents = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    serde_json::from_str(&contents).map_err(|source| Error::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Loads every record in `dir`. Template files (leading `_`) and
/// `schema.json` are skipped.
pub fn load_dir(dir: impl AsRef<Path>) -> Result<Catalog> {
    let dir = dir.as_ref();
    let entries = fs::read_dir(dir).map_err(|e| Error::io(dir, e))?;

    let mut paths: Vec<PathBuf> = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| Error::io(dir, e))?.path();
        if is_record_file(&path) {
            paths.push(path);
        } else {
            tracing::debug!(path = %path.display(), "skipping non-record file");
        }
    }
    paths.sort();

    let bars = paths
        .iter()
        .map(|path| read_bar(path))
        .collect::<Result<Vec<_>>>()?;

    let catalog = Catalog::new(bars);
    tracing::info!(dir = %dir.display(), bars = catalog.len(), "loaded bar catalog");
    Ok(catalog)
}

fn by_id(a: &Bar, b: &Bar) -> Ordering {
    match (a.numeric_id(), b.numeric_id()) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.id.cmp(&b.id),
    }
}

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    bars: Vec<Bar>,
}

impl Catalog {
    /// Orders `bars` by id and gives every bar without a slug a unique one
    /// derived from its name.
    pub fn new(mut bars: Vec<Bar>) -> Self {
        bars.sort_by(by_id);

        let mut taken: Vec<String> = bars.iter().filter_map(|b| b.slug.clone()).collect();
        for bar in bars.iter_mut().filter(|b| b.slug.is_none()) {
            let mut base = generate_slug(&bar.name);
            if base.is_empty() {
                base = generate_slug(&format!("bar {}", bar.id));
            }
            let slug = ensure_unique_slug(&base, &taken);
            if slug != base {
                tracing::warn!(id = %bar.id, %base, %slug, "slug already taken, suffixed");
            }
            taken.push(slug.clone());
            bar.slug = Some(slug);
        }

        Self { bars }
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Bar> {
        self.bars.iter().find(|b| b.id == id)
    }

    pub fn by_slug(&self, slug: &str) -> Option<&Bar> {
        self.bars.iter().find(|b| b.slug.as_deref() == Some(slug))
    }

    /// Looks a bar up by id, then by slug, the way detail URLs accept either.
    pub fn find(&self, id_or_slug: &str) -> Result<&Bar> {
        let key = id_or_slug.trim();
        self.get(key)
            .or_else(|| self.by_slug(key))
            .ok_or_else(|| Error::NotFound(format!("no bar with id or slug {key:?}")))
    }

    /// Every tag used by any bar, sorted and without duplicates.
    pub fn all_tags(&self) -> Vec<String> {
        self.bars
            .iter()
            .flat_map(|b| b.tags.iter().cloned())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn neighborhoods(&self) -> Vec<String> {
        self.bars
            .iter()
            .filter_map(|b| b.neighborhood.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// The id a newly added record should use.
    pub fn next_id(&self) -> String {
        let highest = self.bars.iter().filter_map(Bar::numeric_id).max().unwrap_or(0);
        (highest + 1).to_string()
    }

    pub fn validate(&self) -> ValidationReport {
        let mut report = ValidationReport {
            checked: self.bars.len(),
            issues: self.bars.iter().flat_map(validate_bar).collect(),
        };

        let mut ids: HashMap<&str, usize> = HashMap::new();
        let mut slugs: HashMap<&str, usize> = HashMap::new();
        for bar in &self.bars {
            *ids.entry(bar.id.as_str()).or_default() += 1;
            if let Some(slug) = bar.slug.as_deref() {
                *slugs.entry(slug).or_default() += 1;
            }
        }

        let mut duplicate_ids: Vec<_> = ids.into_iter().filter(|(_, n)| *n > 1).collect();
        duplicate_ids.sort();
        for (id, count) in duplicate_ids {
            report.push_catalog_issue("id", format!("id {id:?} is used by {count} bars"));
        }

        let mut duplicate_slugs: Vec<_> = slugs.into_iter().filter(|(_, n)| *n > 1).collect();
        duplicate_slugs.sort();
        for (slug, count) in duplicate_slugs {
            report.push_catalog_issue("slug", format!("slug {slug:?} is used by {count} bars"));
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::bar;

    #[test]
    fn orders_by_numeric_id() {
        let catalog = Catalog::new(vec![bar("10", "Ten"), bar("2", "Two"), bar("x", "Odd"), bar("1", "One")]);
        let ids: Vec<_> = catalog.bars().iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "10", "x"]);
    }

    #[test]
    fn fills_missing_slugs_uniquely() {
        let mut explicit = bar("1", "Anything");
        explicit.slug = Some("white-horse".into());
        let catalog = Catalog::new(vec![explicit, bar("2", "White Horse"), bar("3", "White Horse!")]);

        let slugs: Vec<_> = catalog.bars().iter().map(|b| b.slug.clone().unwrap()).collect();
        assert_eq!(slugs, vec!["white-horse", "white-horse-2", "white-horse-3"]);
    }

    #[test]
    fn find_accepts_slug_or_id() {
        let catalog = Catalog::new(vec![bar("1", "Midnight Cowboy")]);
        assert_eq!(catalog.find("midnight-cowboy").unwrap().id, "1");
        assert_eq!(catalog.find("1").unwrap().name, "Midnight Cowboy");
        assert!(matches!(catalog.find("nope"), Err(Error::NotFound(_))));
    }

    #[test]
    fn names_without_slug_characters_fall_back_to_id() {
        let catalog = Catalog::new(vec![bar("1", "酒場"), bar("2", "!!!"), bar("x_y", "")]);
        let slugs: Vec<_> = catalog.bars().iter().map(|b| b.slug.clone().unwrap()).collect();
        assert_eq!(slugs, vec!["bar-1", "bar-2", "bar-x-y"]);
        assert!(catalog.by_slug("").is_none());
        assert!(catalog.validate().issues.iter().all(|i| i.field != "slug"));
    }

    #[test]
    fn find_prefers_id_over_slug() {
        let mut first = bar("1", "First");
        first.slug = Some("2".into());
        let catalog = Catalog::new(vec![first, bar("2", "Second")]);
        assert_eq!(catalog.find("2").unwrap().name, "Second");
        assert!(matches!(catalog.find("first"), Err(Error::NotFound(_))));
    }

    #[test]
    fn tags_and_neighborhoods_are_sorted_and_unique() {
        let mut a = bar("1", "A");
        a.tags = vec!["Patio".into(), "Dive".into()];
        a.neighborhood = Some("East Austin".into());
        let mut b = bar("2", "B");
        b.tags = vec!["Dive".into(), "Cocktails".into()];
        b.neighborhood = Some("Downtown".into());

        let catalog = Catalog::new(vec![a, b]);
        assert_eq!(catalog.all_tags(), vec!["Cocktails", "Dive", "Patio"]);
        assert_eq!(catalog.neighborhoods(), vec!["Downtown", "East Austin"]);
    }

    #[test]
    fn next_id_follows_highest() {
        assert_eq!(Catalog::default().next_id(), "1");
        let catalog = Catalog::new(vec![bar("3", "C"), bar("12", "L")]);
        assert_eq!(catalog.next_id(), "13");
    }

    #[test]
    fn validate_reports_duplicates() {
        let mut a = bar("4", "Same");
        a.slug = Some("same".into());
        let mut b = bar("4", "Other");
        b.slug = Some("same".into());

        let report = Catalog::new(vec![a, b]).validate();
        assert_eq!(report.checked, 2);
        assert!(!report.is_valid());
        let fields: Vec<_> = report.issues.iter().map(|i| i.field).collect();
        assert_eq!(fields, vec!["id", "slug"]);
        assert!(report.issues.iter().all(|i| i.bar_id.is_none()));
    }
}
