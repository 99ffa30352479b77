use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A single venue in the directory, as stored in `data/bars/*.json`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Bar {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    pub name: String,
    pub address: String,
    pub description: String,
    pub rating: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ratings: Option<Ratings>,
    pub image_url: String,
    pub has_happy_hour: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub happy_hour_details: Option<String>,
    /// Day name ("Monday") to free-text hours ("5pm-2am", "Closed").
    #[serde(default)]
    pub opening_hours: BTreeMap<String, String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub location: Location,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub bar_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_range: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub neighborhood: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub features: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zip_code: Option<String>,
}

impl Bar {
    /// The slug if one has been assigned, otherwise the id.
    pub fn handle(&self) -> &str {
        self.slug.as_deref().unwrap_or(&self.id)
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t.eq_ignore_ascii_case(tag))
    }

    pub fn has_feature(&self, feature: &str) -> bool {
        self.features
            .as_deref()
            .unwrap_or_default()
            .iter()
            .any(|f| f.eq_ignore_ascii_case(feature))
    }

    pub fn numeric_id(&self) -> Option<u64> {
        self.id.trim().parse().ok()
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct Location {
    pub lat: f64,
    pub lng: f64,
}

impl Location {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Per-source ratings shown on a bar's detail page.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, Default, PartialEq)]
pub struct Ratings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub google: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yelp: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub internal: Option<f64>,
}

impl Ratings {
    pub fn sources(&self) -> impl Iterator<Item = (&'static str, f64)> {
        [
            ("google", self.google),
            ("yelp", self.yelp),
            ("internal", self.internal),
        ]
        .into_iter()
        .filter_map(|(source, value)| value.map(|v| (source, v)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RECORD: &str = r#"{
        "id": "1",
        "name": "The Roosevelt Room",
        "address": "307 W 5th St, Austin, TX 78701",
        "description": "Cocktail bar with an encyclopedic menu.",
        "rating": 4.8,
        "ratings": { "google": 4.7, "internal": 4.9 },
        "imageUrl": "/images/bars/roosevelt-room.jpg",
        "hasHappyHour": true,
        "happyHourDetails": "Mon-Fri 5pm-7pm",
        "openingHours": { "Monday": "5pm-2am", "Sunday": "Closed" },
        "tags": ["Cocktails", "Upscale"],
        "location": { "lat": 30.2682, "lng": -97.7468 },
        "type": "Cocktail Bar",
        "priceRange": 3,
        "features": ["live music"],
        "someFutureField": true
    }"#;

    #[test]
    fn deserializes_camel_case_record() {
        let bar: Bar = serde_json::from_str(RECORD).unwrap();
        assert_eq!(bar.image_url, "/images/bars/roosevelt-room.jpg");
        assert_eq!(bar.bar_type.as_deref(), Some("Cocktail Bar"));
        assert_eq!(bar.price_range, Some(3));
        assert_eq!(bar.slug, None);
        assert_eq!(bar.numeric_id(), Some(1));
        assert_eq!(bar.opening_hours.get("Sunday").map(String::as_str), Some("Closed"));
    }

    #[test]
    fn tag_and_feature_lookups_ignore_case() {
        let bar: Bar = serde_json::from_str(RECORD).unwrap();
        assert!(bar.has_tag("cocktails"));
        assert!(!bar.has_tag("dive"));
        assert!(bar.has_feature("Live Music"));
    }

    #[test]
    fn ratings_sources_skip_missing() {
        let bar: Bar = serde_json::from_str(RECORD).unwrap();
        let sources: Vec<_> = bar.ratings.unwrap().sources().collect();
        assert_eq!(sources, vec![("google", 4.7), ("internal", 4.9)]);
    }

    #[test]
    fn serializes_type_key_and_omits_empty_options() {
        let bar: Bar = serde_json::from_str(RECORD).unwrap();
        let value = serde_json::to_value(&bar).unwrap();
        assert_eq!(value["type"], "Cocktail Bar");
        assert!(value.get("zipCode").is_none());
        assert_eq!(value["hasHappyHour"], true);
    }
}
