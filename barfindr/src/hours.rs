//! Opening hours: parsing the free-text strings stored per day and
//! answering "is this bar open at ...".

use chrono::{NaiveTime, Timelike, Weekday};
use once_cell::sync::Lazy;
use regex::Regex;
use shared_types::Bar;

use crate::days::full_name;
use crate::{Error, Result};

static CLOCK_TIME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{1,2})(?::(\d{2}))?\s*([ap])\.?\s*m?\.?$|^(\d{1,2}):(\d{2})$")
        .expect("clock time pattern compiles")
});

static RANGE_SEPARATOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s*(?:-|–|—|\bto\b)\s*").expect("range separator compiles"));

/// Minutes since midnight for "5pm", "5:30 PM", "17:00", "noon" or "midnight".
pub fn parse_time(input: &str) -> Result<u16> {
    let normalized = input.trim().to_ascii_lowercase();
    match normalized.as_str() {
        "noon" => return Ok(12 * 60),
        "midnight" => return Ok(0),
        _ => {}
    }

    let invalid = || Error::InvalidInput(format!("unrecognized time {input:?}"));
    let caps = CLOCK_TIME.captures(&normalized).ok_or_else(invalid)?;

    let (hour, minute, meridiem) = if let Some(h) = caps.get(1) {
        let minute = caps.get(2).map_or("0", |m| m.as_str());
        (h.as_str(), minute, caps.get(3).map(|m| m.as_str()))
    } else {
        let h = caps.get(4).ok_or_else(invalid)?;
        let m = caps.get(5).ok_or_else(invalid)?;
        (h.as_str(), m.as_str(), None)
    };

    let mut hour: u16 = hour.parse().map_err(|_| invalid())?;
    let minute: u16 = minute.parse().map_err(|_| invalid())?;
    if minute >= 60 {
        return Err(invalid());
    }

    match meridiem {
        Some(_) if hour == 0 || hour > 12 => return Err(invalid()),
        Some("p") if hour < 12 => hour += 12,
        Some("a") if hour == 12 => hour = 0,
        None if hour > 23 => return Err(invalid()),
        _ => {}
    }

    Ok(hour * 60 + minute)
}

pub fn minutes_of(time: NaiveTime) -> u16 {
    (time.hour() * 60 + time.minute()) as u16
}

/// One day's entry from a bar's `openingHours`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DailyHours {
    Closed,
    /// "Varies by bar" and similar; never treated as open.
    Varies,
    AllDay,
    /// Minutes since midnight. `close <= open` means the range runs past midnight.
    Range { open: u16, close: u16 },
}

impl DailyHours {
    pub fn parse(input: &str) -> Result<Self> {
        let normalized = input.trim().to_ascii_lowercase();
        if normalized == "closed" {
            return Ok(Self::Closed);
        }
        if normalized.starts_with("varies") {
            return Ok(Self::Varies);
        }
        if matches!(
            normalized.as_str(),
            "24 hours" | "open 24 hours" | "24/7" | "all day"
        ) {
            return Ok(Self::AllDay);
        }

        let parts: Vec<&str> = RANGE_SEPARATOR.splitn(&normalized, 2).collect();
        let [open, close] = parts.as_slice() else {
            return Err(Error::InvalidInput(format!("unrecognized hours {input:?}")));
        };

        Ok(Self::Range {
            open: parse_time(open)?,
            close: parse_time(close)?,
        })
    }

    pub fn crosses_midnight(&self) -> bool {
        matches!(self, Self::Range { open, close } if close <= open)
    }

    /// Whether `minute` falls inside the part of this range that belongs to
    /// the day it is listed under.
    fn contains_same_day(&self, minute: u16) -> bool {
        match *self {
            Self::AllDay => true,
            Self::Range { open, close } if close > open => minute >= open && minute < close,
            Self::Range { open, .. } => minute >= open,
            Self::Closed | Self::Varies => false,
        }
    }

    /// Whether `minute` falls in the early-morning spill-over of a range that
    /// started the previous day.
    fn contains_spillover(&self, minute: u16) -> bool {
        match *self {
            Self::Range { close, .. } if self.crosses_midnight() => minute < close,
            _ => false,
        }
    }
}

/// The raw hours string for `day`, looked up by full name then by
/// three-letter abbreviation, ignoring case.
pub fn hours_on(bar: &Bar, day: Weekday) -> Option<&str> {
    let full = full_name(day);
    let short = &full[..3];
    bar.opening_hours
        .iter()
        .find(|(key, _)| key.trim().eq_ignore_ascii_case(full))
        .or_else(|| {
            bar.opening_hours
                .iter()
                .find(|(key, _)| key.trim().eq_ignore_ascii_case(short))
        })
        .map(|(_, hours)| hours.as_str())
}

fn parsed_hours_on(bar: &Bar, day: Weekday) -> Option<DailyHours> {
    let raw = hours_on(bar, day)?;
    match DailyHours::parse(raw) {
        Ok(hours) => Some(hours),
        Err(err) => {
            tracing::debug!(bar = %bar.name, day = full_name(day), %err, "unparseable opening hours");
            None
        }
    }
}

pub fn is_open_at(bar: &Bar, day: Weekday, time: NaiveTime) -> bool {
    let minute = minutes_of(time);

    let today = parsed_hours_on(bar, day).is_some_and(|h| h.contains_same_day(minute));
    today || parsed_hours_on(bar, day.pred()).is_some_and(|h| h.contains_spillover(minute))
}

pub fn open_bars_at<'a>(bars: &'a [Bar], day: Weekday, time: NaiveTime) -> Vec<&'a Bar> {
    bars.iter().filter(|bar| is_open_at(bar, day, time)).collect()
}

/// Whether a clock time such as "5:30pm" falls within a range such as "5pm-7pm".
pub fn is_time_in_range(time: &str, range: &str) -> Result<bool> {
    let minute = parse_time(time)?;
    let hours = DailyHours::parse(range)?;
    Ok(hours.contains_same_day(minute) || hours.contains_spillover(minute))
}
