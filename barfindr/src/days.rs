//! Day-of-week names as they appear in bar records and happy-hour text.

use chrono::Weekday;

pub const WEEK: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

pub fn full_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Accepts full names and any prefix of at least three letters
/// ("mon", "tues", "thurs", "Wednesday"), ignoring case and a trailing dot.
pub fn parse_day(token: &str) -> Option<Weekday> {
    let token = token.trim().trim_end_matches('.').to_ascii_lowercase();
    if token.len() < 3 {
        return None;
    }

    WEEK.into_iter()
        .find(|day| full_name(*day).to_ascii_lowercase().starts_with(&token))
}

/// Days from `start` to `end` inclusive, wrapping past Sunday.
pub fn span(start: Weekday, end: Weekday) -> Vec<Weekday> {
    let mut days = vec![start];
    let mut day = start;
    while day != end {
        day = day.succ();
        days.push(day);
    }
    days
}
