//! Filter state as a URL query string, so a listing can be bookmarked and
//! shared: `?search=patio&tags=Dive,Patio&price=1,2&rating=4&happyHour=true&sort=name-asc`.

use url::form_urlencoded;

use crate::filter::{FilterCriteria, SortKey};

const SEARCH: &str = "search";
const TAGS: &str = "tags";
const PRICE: &str = "price";
const RATING: &str = "rating";
const HAPPY_HOUR: &str = "happyHour";
const SORT: &str = "sort";

fn comma_list(value: &str) -> impl Iterator<Item = &str> {
    value.split(',').map(str::trim).filter(|item| !item.is_empty())
}

/// Builds criteria from a query string. Unknown keys and values that don't
/// parse are skipped.
pub fn parse(query_string: &str) -> FilterCriteria {
    let query_string = query_string.trim().trim_start_matches('?');
    let mut criteria = FilterCriteria::default();

    for (key, value) in form_urlencoded::parse(query_string.as_bytes()) {
        match key.as_ref() {
            SEARCH => criteria.query = value.trim().to_string(),
            TAGS => {
                for tag in comma_list(&value) {
                    if !criteria.tags.iter().any(|t| t.eq_ignore_ascii_case(tag)) {
                        criteria.tags.push(tag.to_string());
                    }
                }
            }
            PRICE => {
                for item in comma_list(&value) {
                    match item.parse::<u8>() {
                        Ok(tier @ 1..=4) if !criteria.prices.contains(&tier) => {
                            criteria.prices.push(tier)
                        }
                        Ok(1..=4) => {}
                        _ => tracing::debug!(value = item, "ignoring price tier"),
                    }
                }
            }
            RATING => {
                // several rating chips may be selected; the loosest one wins
                let floor = comma_list(&value)
                    .filter_map(|item| item.parse::<f64>().ok())
                    .filter(|r| r.is_finite())
                    .min_by(f64::total_cmp);
                match floor {
                    Some(floor) => {
                        criteria.min_rating = Some(
                            criteria
                                .min_rating
                                .map_or(floor, |current| current.min(floor)),
                        )
                    }
                    None => tracing::debug!(value = %value, "ignoring rating floor"),
                }
            }
            HAPPY_HOUR => criteria.happy_hour_only = value.eq_ignore_ascii_case("true"),
            SORT => match value.parse::<SortKey>() {
                Ok(sort) => criteria.sort = sort,
                Err(err) => tracing::debug!(%err, "ignoring sort option"),
            },
            other => tracing::debug!(key = other, "ignoring unknown query parameter"),
        }
    }

    criteria
}

/// The query string for `criteria`, without a leading `?`. Inactive fields
/// and the default sort are left out, so empty criteria give "".
pub fn to_query_string(criteria: &FilterCriteria) -> String {
    let mut out = form_urlencoded::Serializer::new(String::new());

    let query = criteria.query.trim();
    if !query.is_empty() {
        out.append_pair(SEARCH, query);
    }
    if !criteria.tags.is_empty() {
        out.append_pair(TAGS, &criteria.tags.join(","));
    }
    let prices: Vec<String> = criteria
        .prices
        .iter()
        .filter(|tier| (1..=4).contains(*tier))
        .map(u8::to_string)
        .collect();
    if !prices.is_empty() {
        out.append_pair(PRICE, &prices.join(","));
    }
    if let Some(floor) = criteria.min_rating.filter(|r| r.is_finite()) {
        out.append_pair(RATING, &floor.to_string());
    }
    if criteria.happy_hour_only {
        out.append_pair(HAPPY_HOUR, "true");
    }
    if criteria.sort != SortKey::Default {
        out.append_pair(SORT, criteria.sort.as_str());
    }

    out.finish()
}
