//! Aggregation periods and chart series buckets.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Bucket width of a chart series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    /// One bucket per calendar day.
    Daily,
    /// One bucket per Monday-start week.
    Weekly,
    /// One bucket per calendar month.
    Monthly,
}

impl Period {
    /// All periods, narrowest first.
    pub const ALL: [Period; 3] = [Period::Daily, Period::Weekly, Period::Monthly];

    /// Returns the path segment used by the backend.
    pub fn as_str(&self) -> &'static str {
        match self {
            Period::Daily => "daily",
            Period::Weekly => "weekly",
            Period::Monthly => "monthly",
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Period {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "daily" => Ok(Period::Daily),
            "weekly" => Ok(Period::Weekly),
            "monthly" => Ok(Period::Monthly),
            other => Err(format!("unknown period: {other:?}")),
        }
    }
}

/// Identifier of a calendar bucket.
///
/// Daily buckets arrive either as ISO date strings or as epoch
/// milliseconds; weekly and monthly buckets are always strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BucketKey {
    /// Epoch milliseconds.
    Epoch(i64),
    /// `YYYY-MM-DD`, `YYYY-Www` or `YYYY-MM`.
    Text(String),
}

impl fmt::Display for BucketKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BucketKey::Epoch(ms) => write!(f, "{ms}"),
            BucketKey::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for BucketKey {
    fn from(s: &str) -> Self {
        BucketKey::Text(s.to_string())
    }
}

/// The grouping key object of a series entry (`_id` on the wire).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketId {
    /// Set for daily series.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day: Option<BucketKey>,
    /// Set for weekly series.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub week: Option<BucketKey>,
    /// Set for monthly series.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub month: Option<BucketKey>,
}

/// One point of a chart series: a calendar bucket and the amount spent in it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodBucket {
    /// Bucket identifier.
    #[serde(rename = "_id")]
    pub id: BucketId,
    /// Sum of expense amounts in the bucket.
    pub total_amount: f64,
}

impl PeriodBucket {
    /// Creates a bucket for `period`.
    pub fn new(period: Period, key: impl Into<BucketKey>, total_amount: f64) -> Self {
        let key = Some(key.into());
        let id = match period {
            Period::Daily => BucketId {
                day: key,
                ..Default::default()
            },
            Period::Weekly => BucketId {
                week: key,
                ..Default::default()
            },
            Period::Monthly => BucketId {
                month: key,
                ..Default::default()
            },
        };
        Self { id, total_amount }
    }

    /// Returns the key the chart uses for `period`.
    pub fn key(&self, period: Period) -> Option<&BucketKey> {
        match period {
            Period::Daily => self.id.day.as_ref(),
            Period::Weekly => self.id.week.as_ref(),
            Period::Monthly => self.id.month.as_ref(),
        }
    }
}
