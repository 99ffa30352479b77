use std::collections::BTreeMap;

use shared_types::{Bar, Location};

pub(crate) fn bar(id: &str, name: &str) -> Bar {
    Bar {
        id: id.to_string(),
        slug: None,
        name: name.to_string(),
        address: format!("{id} Congress Ave, Austin, TX 78701"),
        description: format!("{name} is a bar."),
        rating: 4.0,
        ratings: None,
        image_url: format!("/images/bars/{id}.jpg"),
        has_happy_hour: false,
        happy_hour_details: None,
        opening_hours: BTreeMap::from([("Monday".to_string(), "5pm-2am".to_string())]),
        tags: vec!["Casual".to_string()],
        location: Location::new(30.2672, -97.7431),
        bar_type: None,
        price_range: None,
        neighborhood: None,
        features: None,
        zip_code: None,
    }
}

pub(crate) fn with_hours(mut bar: Bar, entries: &[(&str, &str)]) -> Bar {
    bar.opening_hours = entries
        .iter()
        .map(|(day, hours)| (day.to_string(), hours.to_string()))
        .collect();
    bar
}

pub(crate) fn with_happy_hour(mut bar: Bar, details: &str) -> Bar {
    bar.has_happy_hour = true;
    bar.happy_hour_details = Some(details.to_string());
    bar
}
