//! Which days a bar's free-text happy-hour details cover.
//!
//! The details are written by hand ("Mon-Fri 4-7pm", "Daily 3pm-6pm",
//! "Thursday through Saturday, 5-7"), so matching works on whole words:
//! day names and abbreviations, inclusive day ranges, and a few
//! catch-all phrases.

use chrono::Weekday;
use once_cell::sync::Lazy;
use regex::Regex;
use shared_types::Bar;

use crate::days::{parse_day, span, WEEK};

static TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[a-z]+|\d+|[-–—]").expect("token pattern compiles"));

const EVERY_DAY_PHRASES: [&str; 4] = ["every day", "7 days", "seven days", "all week"];

#[derive(Debug, Clone, Copy, PartialEq)]
enum Token {
    Day(Weekday),
    Through,
    Other,
}

fn classify(word: &str) -> Token {
    match word {
        "-" | "–" | "—" | "to" | "through" | "thru" => Token::Through,
        _ => parse_day(word)
            .or_else(|| word.strip_suffix('s').and_then(parse_day))
            .map_or(Token::Other, Token::Day),
    }
}

/// Days covered by `details`, in week order starting Monday.
pub fn days_mentioned(details: &str) -> Vec<Weekday> {
    let text = details.to_lowercase();
    let mut covered = [false; 7];
    let mut mark = |day: Weekday| covered[day.num_days_from_monday() as usize] = true;

    if EVERY_DAY_PHRASES.iter().any(|phrase| text.contains(phrase)) {
        WEEK.into_iter().for_each(&mut mark);
    }

    let words: Vec<&str> = TOKEN.find_iter(&text).map(|m| m.as_str()).collect();
    for word in &words {
        match *word {
            "daily" | "everyday" => WEEK.into_iter().for_each(&mut mark),
            "weekday" | "weekdays" => span(Weekday::Mon, Weekday::Fri).into_iter().for_each(&mut mark),
            "weekend" | "weekends" => [Weekday::Sat, Weekday::Sun].into_iter().for_each(&mut mark),
            _ => {}
        }
    }

    let tokens: Vec<Token> = words.iter().map(|w| classify(w)).collect();
    let mut i = 0;
    while i < tokens.len() {
        match tokens[i..] {
            [Token::Day(start), Token::Through, Token::Day(end), ..] => {
                span(start, end).into_iter().for_each(&mut mark);
                i += 3;
            }
            [Token::Day(day), ..] => {
                mark(day);
                i += 1;
            }
            _ => i += 1,
        }
    }

    WEEK.into_iter()
        .filter(|day| covered[day.num_days_from_monday() as usize])
        .collect()
}

pub fn has_happy_hour_on(bar: &Bar, day: Weekday) -> bool {
    if !bar.has_happy_hour {
        return false;
    }
    bar.happy_hour_details
        .as_deref()
        .is_some_and(|details| days_mentioned(details).contains(&day))
}

pub fn bars_with_happy_hour_on(bars: &[Bar], day: Weekday) -> Vec<&Bar> {
    bars.iter().filter(|bar| has_happy_hour_on(bar, day)).collect()
}

pub fn happy_hour_bars(bars: &[Bar]) -> Vec<&Bar> {
    bars.iter().filter(|bar| bar.has_happy_hour).collect()
}

/// Happy-hour bars grouped under each day of the week, Monday first.
pub fn weekly_schedule(bars: &[Bar]) -> Vec<(Weekday, Vec<&Bar>)> {
    WEEK.into_iter()
        .map(|day| (day, bars_with_happy_hour_on(bars, day)))
        .collect()
}
