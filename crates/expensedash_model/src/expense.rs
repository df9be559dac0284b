//! Expense records as returned by the backend.

use crate::tag::ExpenseTag;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// A recorded expense.
///
/// The backend assigns `id` on creation; it never changes afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    /// Opaque server-assigned identifier.
    #[serde(rename = "_id")]
    pub id: String,
    /// Positive amount, currency agnostic.
    pub amount: f64,
    /// Ordered tag set. Tag names this client does not know are dropped on
    /// decode, so a newer backend cannot make a whole page unreadable.
    #[serde(deserialize_with = "known_tags")]
    pub tags: Vec<ExpenseTag>,
    /// Calendar day the expense happened on.
    #[serde(with = "calendar_day")]
    pub date: NaiveDate,
    /// Optional free text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Owning user id.
    pub user: String,
    /// Creation timestamp, when the backend reports it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Last modification timestamp, when the backend reports it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Expense {
    /// Returns true if the expense carries `tag`.
    pub fn has_tag(&self, tag: ExpenseTag) -> bool {
        self.tags.contains(&tag)
    }
}

/// Parses a calendar day from `YYYY-MM-DD` or from an ISO date-time whose
/// first ten characters are the day (`2024-03-05T00:00:00.000Z`).
pub fn parse_calendar_day(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if let Ok(day) = NaiveDate::parse_from_str(value, crate::DATE_FORMAT) {
        return Some(day);
    }
    let (head, tail) = (value.get(..10)?, value.get(10..)?);
    if !(tail.starts_with('T') || tail.starts_with(' ')) {
        return None;
    }
    NaiveDate::parse_from_str(head, crate::DATE_FORMAT).ok()
}

fn known_tags<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<ExpenseTag>, D::Error> {
    let names = Vec::<String>::deserialize(deserializer)?;
    let mut tags = Vec::with_capacity(names.len());
    for name in names {
        match name.parse::<ExpenseTag>() {
            Ok(tag) => tags.push(tag),
            Err(e) => tracing::warn!(error = %e, "dropping unknown expense tag"),
        }
    }
    Ok(tags)
}

/// Serde adapter: writes `YYYY-MM-DD`, reads anything `parse_calendar_day` accepts.
pub(crate) mod calendar_day {
    use super::parse_calendar_day;
    use chrono::NaiveDate;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(day: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&day.format(crate::DATE_FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse_calendar_day(&raw)
            .ok_or_else(|| de::Error::custom(format!("invalid calendar day: {raw:?}")))
    }
}
