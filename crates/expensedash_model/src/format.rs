//! Chart label formatting for period buckets.
//!
//! Labels are rendered inside chart callbacks, so formatting never fails:
//! any key that cannot be understood is returned as-is.

use crate::expense::parse_calendar_day;
use crate::period::{BucketKey, Period};
use chrono::{DateTime, Datelike, Days, NaiveDate};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

const DAY_LABEL: &str = "%b %-d";
const MONTH_LABEL: &str = "%b %Y";

/// Where a label is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LabelMode {
    /// Axis tick.
    #[default]
    Tick,
    /// Tooltip heading.
    Label,
}

impl FromStr for LabelMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tick" => Ok(LabelMode::Tick),
            "label" => Ok(LabelMode::Label),
            other => Err(format!("unknown label mode: {other:?}")),
        }
    }
}

impl fmt::Display for LabelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LabelMode::Tick => "tick",
            LabelMode::Label => "label",
        })
    }
}

#[derive(Debug, Error)]
enum FormatError {
    #[error("week {week} of {year} is outside the supported calendar")]
    WeekOutOfRange { year: i32, week: u32 },
    #[error("month key {0:?} is not a calendar month")]
    InvalidMonth(String),
}

/// Formats a bucket key given as text.
///
/// - daily: `"Mar 5"`
/// - weekly (`2024-W09`): `"Feb 26 - Mar 3"`
/// - monthly (`2024-03`): `"Mar 2024"`
///
/// Tick and label modes currently render the same text.
pub fn format_bucket_label(key: &str, period: Period, mode: LabelMode) -> String {
    format_bucket_key(&BucketKey::Text(key.to_string()), period, mode)
}

/// Formats a bucket key; see [`format_bucket_label`].
pub fn format_bucket_key(key: &BucketKey, period: Period, mode: LabelMode) -> String {
    if matches!(key, BucketKey::Text(s) if s.is_empty()) {
        return String::new();
    }
    match try_format(key, period) {
        Ok(Some(label)) => label,
        Ok(None) => key.to_string(),
        Err(e) => {
            tracing::error!(%key, %period, %mode, error = %e, "failed to format chart date");
            key.to_string()
        }
    }
}

/// `Ok(None)` means the key is not in the expected shape and should be shown raw.
fn try_format(key: &BucketKey, period: Period) -> Result<Option<String>, FormatError> {
    match period {
        Period::Daily => Ok(parse_day_key(key).map(|day| day.format(DAY_LABEL).to_string())),
        Period::Weekly => {
            let Some((year, week)) = parse_week_key(&key.to_string()) else {
                return Ok(None);
            };
            let (start, end) =
                week_bounds(year, week).ok_or(FormatError::WeekOutOfRange { year, week })?;
            Ok(Some(format!(
                "{} - {}",
                start.format(DAY_LABEL),
                end.format(DAY_LABEL)
            )))
        }
        Period::Monthly => {
            let text = key.to_string();
            if !is_month_key(&text) {
                return Ok(None);
            }
            let first = NaiveDate::parse_from_str(&format!("{text}-01"), crate::DATE_FORMAT)
                .map_err(|_| FormatError::InvalidMonth(text))?;
            Ok(Some(first.format(MONTH_LABEL).to_string()))
        }
    }
}

fn parse_day_key(key: &BucketKey) -> Option<NaiveDate> {
    match key {
        BucketKey::Epoch(ms) => DateTime::from_timestamp_millis(*ms).map(|t| t.date_naive()),
        BucketKey::Text(s) => parse_calendar_day(s).or_else(|| {
            DateTime::parse_from_rfc3339(s.trim())
                .ok()
                .map(|t| t.date_naive())
        }),
    }
}

/// Splits `<year>-W<week>` into two positive integers.
fn parse_week_key(key: &str) -> Option<(i32, u32)> {
    let (year, week) = key.split_once("-W")?;
    let year: i32 = parse_digits(year)?;
    let week: u32 = parse_digits(week)?;
    (year > 0 && week > 0).then_some((year, week))
}

fn parse_digits<T: FromStr>(s: &str) -> Option<T> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

/// Matches `^\d{4}-\d{2}$`.
fn is_month_key(key: &str) -> bool {
    let b = key.as_bytes();
    b.len() == 7
        && b[4] == b'-'
        && b[..4].iter().all(u8::is_ascii_digit)
        && b[5..].iter().all(u8::is_ascii_digit)
}

/// Monday and Sunday of week `week` of `year`.
///
/// The week is found by advancing `(week - 1) * 7` days from January 1st
/// and stepping back to the Monday on or before that day, so week 1 can
/// start in December of the previous year.
pub fn week_bounds(year: i32, week: u32) -> Option<(NaiveDate, NaiveDate)> {
    let anchor = NaiveDate::from_ymd_opt(year, 1, 1)?
        .checked_add_days(Days::new(u64::from(week.checked_sub(1)?) * 7))?;
    let start = anchor.checked_sub_days(Days::new(u64::from(
        anchor.weekday().num_days_from_monday(),
    )))?;
    let end = start.checked_add_days(Days::new(6))?;
    Some((start, end))
}
