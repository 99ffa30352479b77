//! The listing page's search, filters and sort.
//!
//! [`apply`] keeps every bar that satisfies all active predicates and then
//! sorts with a stable sort, so bars that compare equal stay in catalog order.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use shared_types::Bar;

use crate::Error;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    #[default]
    Default,
    RatingHigh,
    RatingLow,
    NameAsc,
    NameDesc,
}

impl SortKey {
    pub const ALL: [SortKey; 5] = [
        SortKey::Default,
        SortKey::RatingHigh,
        SortKey::RatingLow,
        SortKey::NameAsc,
        SortKey::NameDesc,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Default => "default",
            SortKey::RatingHigh => "rating-high",
            SortKey::RatingLow => "rating-low",
            SortKey::NameAsc => "name-asc",
            SortKey::NameDesc => "name-desc",
        }
    }

    fn compare(&self, a: &Bar, b: &Bar) -> Ordering {
        match self {
            SortKey::Default => Ordering::Equal,
            SortKey::RatingHigh => b.rating.total_cmp(&a.rating),
            SortKey::RatingLow => a.rating.total_cmp(&b.rating),
            SortKey::NameAsc => compare_names(&a.name, &b.name),
            SortKey::NameDesc => compare_names(&b.name, &a.name),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|key| key.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| Error::InvalidInput(format!("unknown sort option {s:?}")))
    }
}

fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// Free-text search over name, description, address and tags.
    pub query: String,
    /// A bar matches when it carries any of these tags.
    pub tags: Vec<String>,
    pub happy_hour_only: bool,
    /// Accepted price tiers (1-4). A bar without a tier never matches a
    /// non-empty set.
    pub prices: Vec<u8>,
    pub min_rating: Option<f64>,
    pub sort: SortKey,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    pub fn with_price(mut self, tier: u8) -> Self {
        self.prices.push(tier);
        self
    }

    pub fn with_min_rating(mut self, floor: f64) -> Self {
        self.min_rating = Some(floor);
        self
    }

    pub fn happy_hour_only(mut self) -> Self {
        self.happy_hour_only = true;
        self
    }

    pub fn sorted_by(mut self, sort: SortKey) -> Self {
        self.sort = sort;
        self
    }

    /// Selects `tag` if it is not selected, deselects it otherwise.
    pub fn toggle_tag(&mut self, tag: &str) {
        if let Some(pos) = self.tags.iter().position(|t| t.eq_ignore_ascii_case(tag)) {
            self.tags.remove(pos);
        } else {
            self.tags.push(tag.to_string());
        }
    }

    pub fn toggle_price(&mut self, tier: u8) {
        if let Some(pos) = self.prices.iter().position(|p| *p == tier) {
            self.prices.remove(pos);
        } else {
            self.prices.push(tier);
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Number of narrowing filters in effect. Sorting doesn't count.
    pub fn active_count(&self) -> usize {
        [
            !self.query.trim().is_empty(),
            !self.tags.is_empty(),
            self.happy_hour_only,
            !self.prices.is_empty(),
            self.min_rating.is_some(),
        ]
        .into_iter()
        .filter(|active| *active)
        .count()
    }

    pub fn is_active(&self) -> bool {
        self.active_count() > 0
    }

    pub fn matches(&self, bar: &Bar) -> bool {
        self.matches_query(bar)
            && self.matches_tags(bar)
            && (!self.happy_hour_only || bar.has_happy_hour)
            && self.matches_price(bar)
            && self.min_rating.map_or(true, |floor| bar.rating >= floor)
    }

    fn matches_query(&self, bar: &Bar) -> bool {
        let needle = self.query.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }

        let contains = |haystack: &str| haystack.to_lowercase().contains(&needle);
        contains(&bar.name)
            || contains(&bar.description)
            || contains(&bar.address)
            || bar.tags.iter().any(|tag| contains(tag))
    }

    fn matches_tags(&self, bar: &Bar) -> bool {
        self.tags.is_empty() || self.tags.iter().any(|tag| bar.has_tag(tag))
    }

    fn matches_price(&self, bar: &Bar) -> bool {
        self.prices.is_empty()
            || bar
                .price_range
                .is_some_and(|tier| self.prices.contains(&tier))
    }
}

/// Bars matching `criteria`, ordered by its sort key.
pub fn apply<'a>(bars: &'a [Bar], criteria: &FilterCriteria) -> Vec<&'a Bar> {
    let mut matched: Vec<&Bar> = bars.iter().filter(|bar| criteria.matches(bar)).collect();
    matched.sort_by(|a, b| criteria.sort.compare(a, b));

    tracing::debug!(
        total = bars.len(),
        matched = matched.len(),
        sort = %criteria.sort,
        "applied bar filters"
    );
    matched
}
