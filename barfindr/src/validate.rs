use std::fmt;

use serde::Serialize;
use shared_types::Bar;

use crate::days::parse_day;
use crate::hours::DailyHours;
use crate::slug::is_valid_slug;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationIssue {
    /// Id of the offending bar, if the problem belongs to one bar.
    pub bar_id: Option<String>,
    pub field: &'static str,
    pub message: String,
}

impl ValidationIssue {
    fn new(bar: &Bar, field: &'static str, message: impl Into<String>) -> Self {
        Self {
            bar_id: Some(bar.id.clone()),
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.bar_id {
            Some(id) => write!(f, "bar {id}: {}: {}", self.field, self.message),
            None => write!(f, "{}: {}", self.field, self.message),
        }
    }
}

fn in_rating_range(value: f64) -> bool {
    value.is_finite() && (0.0..=5.0).contains(&value)
}

/// Every problem with a single record. An empty list means it is valid.
pub fn validate_bar(bar: &Bar) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    let mut issue = |field, message: String| issues.push(ValidationIssue::new(bar, field, message));

    if bar.numeric_id().is_none() {
        issue("id", format!("id {:?} is not numeric", bar.id));
    }
    if let Some(slug) = &bar.slug {
        if !is_valid_slug(slug) {
            issue("slug", format!("{slug:?} is not a valid slug"));
        }
    }

    for (field, value) in [
        ("name", &bar.name),
        ("address", &bar.address),
        ("description", &bar.description),
        ("imageUrl", &bar.image_url),
    ] {
        if value.trim().is_empty() {
            issue(field, format!("{field} is required"));
        }
    }

    if !in_rating_range(bar.rating) {
        issue("rating", format!("rating {} must be between 0 and 5", bar.rating));
    }
    if let Some(ratings) = &bar.ratings {
        for (source, value) in ratings.sources() {
            if !in_rating_range(value) {
                issue("ratings", format!("{source} rating {value} must be between 0 and 5"));
            }
        }
    }

    let has_details = bar
        .happy_hour_details
        .as_deref()
        .is_some_and(|d| !d.trim().is_empty());
    if bar.has_happy_hour && !has_details {
        issue(
            "happyHourDetails",
            "happy hour details are required when hasHappyHour is true".to_string(),
        );
    }

    if bar.opening_hours.is_empty() {
        issue("openingHours", "opening hours are required".to_string());
    }
    for (day, hours) in &bar.opening_hours {
        if parse_day(day).is_none() {
            issue("openingHours", format!("{day:?} is not a day of the week"));
        }
        if let Err(err) = DailyHours::parse(hours) {
            issue("openingHours", format!("{day}: {err}"));
        }
    }

    if !bar.tags.iter().any(|tag| !tag.trim().is_empty()) {
        issue("tags", "at least one tag is required".to_string());
    }

    let loc = bar.location;
    if !(loc.lat.is_finite() && (-90.0..=90.0).contains(&loc.lat)) {
        issue("location", format!("latitude {} is out of range", loc.lat));
    }
    if !(loc.lng.is_finite() && (-180.0..=180.0).contains(&loc.lng)) {
        issue("location", format!("longitude {} is out of range", loc.lng));
    }

    if let Some(tier) = bar.price_range {
        if !(1..=4).contains(&tier) {
            issue("priceRange", format!("price range {tier} must be between 1 and 4"));
        }
    }

    issues
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationReport {
    pub checked: usize,
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }

    pub(crate) fn push_catalog_issue(&mut self, field: &'static str, message: String) {
        self.issues.push(ValidationIssue {
            bar_id: None,
            field,
            message,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{bar, with_happy_hour, with_hours};

    fn fields(issues: &[ValidationIssue]) -> Vec<&'static str> {
        issues.iter().map(|i| i.field).collect()
    }

    #[test]
    fn well_formed_record_has_no_issues() {
        let b = with_happy_hour(bar("7", "Midnight Cowboy"), "Daily 5-7pm");
        assert!(validate_bar(&b).is_empty(), "{:?}", validate_bar(&b));
    }

    #[test]
    fn missing_text_fields_are_reported() {
        let mut b = bar("1", " ");
        b.image_url.clear();
        assert_eq!(fields(&validate_bar(&b)), vec!["name", "imageUrl"]);
    }

    #[test]
    fn rating_bounds() {
        let mut b = bar("1", "Bar");
        b.rating = 5.5;
        b.ratings = Some(shared_types::Ratings {
            google: Some(-1.0),
            yelp: Some(4.0),
            internal: None,
        });
        let issues = validate_bar(&b);
        assert_eq!(fields(&issues), vec!["rating", "ratings"]);
        assert!(issues[1].message.contains("google"));
    }

    #[test]
    fn happy_hour_flag_requires_details() {
        let mut b = bar("1", "Bar");
        b.has_happy_hour = true;
        b.happy_hour_details = Some("  ".into());
        assert_eq!(fields(&validate_bar(&b)), vec!["happyHourDetails"]);
    }

    #[test]
    fn hours_tags_location_price_and_id() {
        let mut b = with_hours(bar("abc", "Bar"), &[("Funday", "5pm-2am"), ("Friday", "late")]);
        b.tags = vec!["".into()];
        b.location.lat = 91.0;
        b.price_range = Some(5);
        b.slug = Some("Not A Slug".into());

        assert_eq!(
            fields(&validate_bar(&b)),
            vec!["id", "slug", "openingHours", "openingHours", "tags", "location", "priceRange"]
        );
    }

    #[test]
    fn issue_display_names_the_bar() {
        let issue = ValidationIssue::new(&bar("3", "Bar"), "tags", "at least one tag is required");
        assert_eq!(issue.to_string(), "bar 3: tags: at least one tag is required");
    }
}
