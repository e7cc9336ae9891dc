//! Date/time normalization for the canonical `{date, time}` pair.
//!
//! Every provider ships kickoff times differently; all of them reduce here
//! to an ISO `YYYY-MM-DD` date plus a 24-hour `HH:MM` time (or `"TBC"`).
//! The date is always the *local* wall-clock date of the source: an
//! offset-carrying timestamp is read through its own offset, never
//! reformatted from the UTC instant, which would roll a midnight tip-off
//! onto the wrong calendar day.

use chrono::{DateTime, Datelike, Local, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

/// Sentinel used when a provider omits the tip-off time.
pub const TBC: &str = "TBC";

/// Shape (b): RFC 3339 / ISO-8601 with a timezone offset
/// (`2025-10-03T20:05:00+02:00`). Returns `(date, time)` in the source's
/// own offset.
pub fn from_rfc3339(raw: &str) -> Option<(String, String)> {
    let dt = DateTime::parse_from_rfc3339(raw.trim()).ok()?;
    let local = dt.naive_local();
    Some((format_date(local.date()), format_time(local.time())))
}

/// Shape (a): free-text month-day, optionally with a year
/// (`"Oct 3"`, `"October 3, 2025"`). A missing year is filled with
/// `fallback_year`, the season's reporting year.
pub fn from_month_day(raw: &str, fallback_year: i32) -> Option<String> {
    let cleaned = raw.replace(',', " ");
    let mut tokens = cleaned.split_whitespace();
    let month = month_number(tokens.next()?)?;
    let day: u32 = tokens.next()?.parse().ok()?;
    let year: i32 = match tokens.next() {
        Some(t) => t.parse().ok()?,
        None => fallback_year,
    };
    NaiveDate::from_ymd_opt(year, month, day).map(format_date)
}

/// Shape (c): slash-delimited day/month/year (`"28/09/2025"`).
pub fn from_day_month_year(raw: &str) -> Option<String> {
    let mut parts = raw.trim().split('/');
    let day: u32 = parts.next()?.trim().parse().ok()?;
    let month: u32 = parts.next()?.trim().parse().ok()?;
    let year: i32 = parts.next()?.trim().parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day).map(format_date)
}

/// Shape (d): combined free-text date and 12-hour clock time
/// (`"Sep 28 2025 - 7:30 PM"`). The year and the whole time part are both
/// optional; an absent time yields [`TBC`].
pub fn from_long_form(raw: &str, fallback_year: i32) -> Option<(String, String)> {
    let cleaned = raw.replace(',', " ");
    let tokens: Vec<&str> = cleaned
        .split_whitespace()
        .filter(|t| *t != "-" && *t != "|" && *t != "@" && *t != "at")
        .collect();
    let mut iter = tokens.iter();

    let month = month_number(iter.next()?)?;
    let day: u32 = iter.next()?.parse().ok()?;

    let mut year = fallback_year;
    let mut clock: Option<(u32, u32)> = None;
    let mut meridiem: Option<bool> = None; // true = PM
    for token in iter {
        if let Some((h, m)) = parse_clock(token) {
            clock = Some((h, m));
        } else if token.eq_ignore_ascii_case("pm") {
            meridiem = Some(true);
        } else if token.eq_ignore_ascii_case("am") {
            meridiem = Some(false);
        } else if let Ok(y) = token.parse::<i32>() {
            year = y;
        }
    }

    let date = NaiveDate::from_ymd_opt(year, month, day).map(format_date)?;
    let time = match clock {
        Some((h, m)) => {
            let h24 = match meridiem {
                Some(true) if h < 12 => h + 12,
                Some(false) if h == 12 => 0,
                _ => h,
            };
            NaiveTime::from_hms_opt(h24, m, 0).map(format_time)?
        }
        None => TBC.to_owned(),
    };
    Some((date, time))
}

/// An already-24-hour clock string (`"20:05"`, `"9:05"`), re-emitted
/// zero-padded. Anything else is unknown time.
pub fn from_24h_clock(raw: &str) -> Option<String> {
    let (h, m) = parse_clock(raw.trim())?;
    Some(format!("{h:02}:{m:02}"))
}

/// Whether a canonical `{date, time}` pair lies before the local clock now.
/// A `"TBC"` time compares on the date alone (end of day), so a game is not
/// called past until its whole day is over.
pub fn is_past(date: &str, time: &str) -> bool {
    let Ok(d) = NaiveDate::parse_from_str(date, "%Y-%m-%d") else {
        return false;
    };
    let t = NaiveTime::parse_from_str(time, "%H:%M")
        .unwrap_or_else(|_| NaiveTime::from_hms_opt(23, 59, 59).unwrap_or_default());
    NaiveDateTime::new(d, t) < Local::now().naive_local()
}

/// The season's reporting year, used when a provider drops the year from a
/// free-text date.
pub fn current_year() -> i32 {
    Local::now().year()
}

fn parse_clock(token: &str) -> Option<(u32, u32)> {
    let (h, m) = token.split_once(':')?;
    let h: u32 = h.parse().ok()?;
    let m: u32 = m.parse().ok()?;
    if h <= 23 && m <= 59 { Some((h, m)) } else { None }
}

fn month_number(token: &str) -> Option<u32> {
    const MONTHS: [&str; 12] = [
        "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
    ];
    let lower = token.to_lowercase();
    MONTHS
        .iter()
        .position(|m| lower.starts_with(m))
        .map(|i| i as u32 + 1)
}

fn format_date(d: NaiveDate) -> String {
    format!("{:04}-{:02}-{:02}", d.year(), d.month(), d.day())
}

fn format_time(t: NaiveTime) -> String {
    format!("{:02}:{:02}", t.hour(), t.minute())
}
