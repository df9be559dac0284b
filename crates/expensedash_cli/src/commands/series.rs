//! Series command implementation.

use super::{money, Context};
use expensedash_model::{format_bucket_key, LabelMode, Period, PeriodBucket};
use serde::Serialize;

/// One chart point with its rendered label.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesPoint {
    /// Raw bucket key.
    pub key: String,
    /// Formatted label.
    pub label: String,
    /// Summed amount.
    pub total_amount: f64,
}

/// Runs the series command.
///
/// An empty series is printed as such; the backend failure, if any, is in
/// the log.
pub fn run(
    ctx: &Context,
    user_id: &str,
    period: Period,
    mode: LabelMode,
) -> Result<(), Box<dyn std::error::Error>> {
    let store = ctx.session.expenses();
    store.fetch_by_period(user_id, period);
    let points = points(&store.period_series(), period, mode);
    ctx.emit(&points, |points| render(points, period))
}

fn points(series: &[PeriodBucket], period: Period, mode: LabelMode) -> Vec<SeriesPoint> {
    series
        .iter()
        .filter_map(|bucket| {
            let key = bucket.key(period)?;
            Some(SeriesPoint {
                key: key.to_string(),
                label: format_bucket_key(key, period, mode),
                total_amount: bucket.total_amount,
            })
        })
        .collect()
}

fn render(points: &[SeriesPoint], period: Period) -> String {
    if points.is_empty() {
        return format!("No {period} data");
    }
    points
        .iter()
        .map(|p| format!("{:<16} {:>10}", p.label, money(p.total_amount)))
        .collect::<Vec<_>>()
        .join("\n")
}
