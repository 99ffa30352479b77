//! Browse pages keyed by `attribute/value`, e.g. `feature/patio` or
//! `neighborhood/east-austin`. Each entry decides membership from a bar's
//! structured fields first and falls back to its tags or address.

use once_cell::sync::Lazy;
use serde::Serialize;
use shared_types::Bar;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Matcher {
    /// `features` contains `feature`, or a tag contains any of `tag_terms`.
    Feature {
        feature: &'static str,
        tag_terms: &'static [&'static str],
    },
    /// `neighborhood` equals `name`, or the address contains `address_term`.
    Neighborhood {
        name: &'static str,
        address_term: &'static str,
    },
    /// Price tier within `min..=max`.
    Price { min: u8, max: u8 },
    /// `type` equals `name`, or a tag contains `tag_term`.
    BarType {
        name: &'static str,
        tag_term: &'static str,
    },
    /// A tag contains any of the terms.
    TagTerms { terms: &'static [&'static str] },
    HappyHour,
    /// Used for unknown attribute/value pairs.
    Any,
}

fn tag_contains(bar: &Bar, term: &str) -> bool {
    bar.tags.iter().any(|tag| tag.to_lowercase().contains(term))
}

impl Matcher {
    pub fn matches(&self, bar: &Bar) -> bool {
        match self {
            Matcher::Feature { feature, tag_terms } => {
                bar.has_feature(feature) || tag_terms.iter().any(|term| tag_contains(bar, term))
            }
            Matcher::Neighborhood { name, address_term } => {
                bar.neighborhood
                    .as_deref()
                    .is_some_and(|n| n.trim().eq_ignore_ascii_case(name))
                    || bar.address.to_lowercase().contains(address_term)
            }
            Matcher::Price { min, max } => bar
                .price_range
                .is_some_and(|tier| (*min..=*max).contains(&tier)),
            Matcher::BarType { name, tag_term } => {
                bar.bar_type
                    .as_deref()
                    .is_some_and(|t| t.trim().eq_ignore_ascii_case(name))
                    || tag_contains(bar, tag_term)
            }
            Matcher::TagTerms { terms } => terms.iter().any(|term| tag_contains(bar, term)),
            Matcher::HappyHour => bar.has_happy_hour,
            Matcher::Any => true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Category {
    pub attribute: String,
    pub value: String,
    pub title: String,
    pub matcher: Matcher,
    /// Other values of interest, used for "see also" links.
    pub related: Vec<String>,
}

impl Category {
    pub fn matches(&self, bar: &Bar) -> bool {
        self.matcher.matches(bar)
    }

    pub fn select<'a>(&self, bars: &'a [Bar]) -> Vec<&'a Bar> {
        bars.iter().filter(|bar| self.matches(bar)).collect()
    }

    pub fn path(&self) -> String {
        format!("{}/{}", self.attribute, self.value)
    }

    pub fn is_builtin(&self) -> bool {
        self.matcher != Matcher::Any
    }

    fn fallback(attribute: &str, value: &str) -> Self {
        Self {
            attribute: attribute.to_string(),
            value: value.to_string(),
            title: format!("{} Bars in Austin", title_case(value)),
            matcher: Matcher::Any,
            related: Vec::new(),
        }
    }
}

/// "east-austin" -> "East Austin"
fn title_case(value: &str) -> String {
    value
        .split('-')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

struct Entry {
    attribute: &'static str,
    value: &'static str,
    title: &'static str,
    matcher: Matcher,
    related: &'static [&'static str],
}

fn entry(
    attribute: &'static str,
    value: &'static str,
    title: &'static str,
    matcher: Matcher,
    related: &'static [&'static str],
) -> Entry {
    Entry {
        attribute,
        value,
        title,
        matcher,
        related,
    }
}

static CATEGORIES: Lazy<Vec<Entry>> = Lazy::new(|| {
    use Matcher::*;
    vec![
        entry(
            "feature",
            "patio",
            "Bars with Patios in Austin",
            Feature { feature: "patio", tag_terms: &["patio"] },
            &["rooftop", "dog-friendly", "live-music"],
        ),
        entry(
            "feature",
            "rooftop",
            "Rooftop Bars in Austin",
            Feature { feature: "rooftop", tag_terms: &["rooftop"] },
            &["patio", "views", "cocktails"],
        ),
        entry(
            "feature",
            "live-music",
            "Live Music Bars in Austin",
            Feature { feature: "live music", tag_terms: &["music"] },
            &["patio", "downtown", "local-bands"],
        ),
        entry(
            "feature",
            "dog-friendly",
            "Dog-Friendly Bars in Austin",
            Feature { feature: "dog friendly", tag_terms: &["dog"] },
            &["patio", "outdoor", "casual"],
        ),
        entry(
            "feature",
            "craft-beer",
            "Craft Beer Bars in Austin",
            Feature { feature: "craft beer", tag_terms: &["craft", "beer"] },
            &["brewery", "local", "pub"],
        ),
        entry(
            "feature",
            "sports-bar",
            "Sports Bars in Austin",
            Feature { feature: "sports", tag_terms: &["sports"] },
            &["tvs", "beer", "wings"],
        ),
        entry(
            "feature",
            "cocktail-bar",
            "Cocktail Bars in Austin",
            Feature { feature: "cocktails", tag_terms: &["cocktail"] },
            &["speakeasy", "upscale", "mixology"],
        ),
        entry(
            "neighborhood",
            "downtown",
            "Downtown Austin Bars",
            Neighborhood { name: "downtown", address_term: "downtown" },
            &["sixth-street", "warehouse-district", "rainey-street"],
        ),
        entry(
            "neighborhood",
            "east-austin",
            "East Austin Bars",
            Neighborhood { name: "east austin", address_term: "east" },
            &["hipster", "craft-beer", "cocktail-bar"],
        ),
        entry(
            "neighborhood",
            "south-congress",
            "South Congress Bars in Austin",
            Neighborhood { name: "south congress", address_term: "south congress" },
            &["south-austin", "food", "shopping"],
        ),
        entry(
            "neighborhood",
            "rainey-street",
            "Rainey Street Bars in Austin",
            Neighborhood { name: "rainey street", address_term: "rainey" },
            &["downtown", "patio", "food-trucks"],
        ),
        entry(
            "price",
            "cheap",
            "Cheap Bars in Austin",
            Price { min: 1, max: 1 },
            &["happy-hour", "dive-bar", "student"],
        ),
        entry(
            "price",
            "moderate",
            "Moderately Priced Bars in Austin",
            Price { min: 2, max: 2 },
            &["casual", "popular", "local"],
        ),
        entry(
            "price",
            "upscale",
            "Upscale Bars in Austin",
            Price { min: 3, max: 4 },
            &["cocktail-bar", "wine-bar", "downtown"],
        ),
        entry(
            "type",
            "dive-bar",
            "Dive Bars in Austin",
            BarType { name: "dive bar", tag_term: "dive" },
            &["cheap", "pool-table", "jukebox"],
        ),
        entry(
            "type",
            "wine-bar",
            "Wine Bars in Austin",
            BarType { name: "wine bar", tag_term: "wine" },
            &["upscale", "date-spot", "tasting"],
        ),
        entry(
            "type",
            "pub",
            "Pubs in Austin",
            BarType { name: "pub", tag_term: "pub" },
            &["beer", "food", "casual"],
        ),
        entry(
            "type",
            "lounge",
            "Lounges in Austin",
            BarType { name: "lounge", tag_term: "lounge" },
            &["cocktails", "upscale", "date-spot"],
        ),
        entry(
            "occasion",
            "date-night",
            "Best Date Night Bars in Austin",
            TagTerms { terms: &["romantic", "date"] },
            &["cocktail-bar", "wine-bar", "upscale"],
        ),
        entry(
            "occasion",
            "group-outings",
            "Best Bars for Groups in Austin",
            TagTerms { terms: &["group"] },
            &["games", "large-space", "private-room"],
        ),
        entry(
            "occasion",
            "happy-hour",
            "Best Happy Hour Bars in Austin",
            HappyHour,
            &["cheap", "after-work", "specials"],
        ),
    ]
});

impl From<&Entry> for Category {
    fn from(entry: &Entry) -> Self {
        Self {
            attribute: entry.attribute.to_string(),
            value: entry.value.to_string(),
            title: entry.title.to_string(),
            matcher: entry.matcher.clone(),
            related: entry.related.iter().map(|r| r.to_string()).collect(),
        }
    }
}

/// The category for `attribute/value`. Unknown pairs get a generic title
/// and match every bar.
pub fn resolve(attribute: &str, value: &str) -> Category {
    let attribute = attribute.trim().to_ascii_lowercase();
    let value = value.trim().to_ascii_lowercase();

    CATEGORIES
        .iter()
        .find(|e| e.attribute == attribute && e.value == value)
        .map(Category::from)
        .unwrap_or_else(|| {
            tracing::debug!(%attribute, %value, "no built-in category, using fallback");
            Category::fallback(&attribute, &value)
        })
}

pub fn categories() -> impl Iterator<Item = Category> {
    CATEGORIES.iter().map(Category::from)
}

/// Attribute names in table order, without repeats.
pub fn attributes() -> Vec<&'static str> {
    let mut seen: Vec<&'static str> = Vec::new();
    for e in CATEGORIES.iter() {
        if !seen.contains(&e.attribute) {
            seen.push(e.attribute);
        }
    }
    seen
}
