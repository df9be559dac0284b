//! Rollup summary of a user's spending.

use serde::{Deserialize, Serialize};

/// Spending over one period compared with the previous equivalent period.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TimePeriodExpense {
    /// Amount spent in the current period.
    pub amount: f64,
    /// Signed change against the previous period.
    pub difference: f64,
    /// Percentage change as computed by the backend (e.g. `"12.50"`).
    pub percentage: String,
}

/// Direction of a period-over-period change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    /// Spending went up.
    Up,
    /// Spending went down or stayed flat.
    Down,
}

impl TimePeriodExpense {
    /// Returns the trend direction. Flat counts as down.
    pub fn trend(&self) -> Trend {
        if self.difference > 0.0 {
            Trend::Up
        } else {
            Trend::Down
        }
    }

    /// Renders the percentage for display: whole numbers as `"12%"`,
    /// anything else with one decimal (`"12.5%"`). Unparseable values
    /// render as `"0%"`.
    pub fn display_percentage(&self) -> String {
        let value = self
            .percentage
            .trim()
            .trim_end_matches('%')
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .unwrap_or(0.0);
        if value.fract() == 0.0 {
            format!("{value:.0}%")
        } else {
            format!("{value:.1}%")
        }
    }

    /// Returns `"more"` or `"less"` for comparison sentences.
    pub fn comparison_word(&self) -> &'static str {
        if self.difference < 0.0 {
            "less"
        } else {
            "more"
        }
    }
}

/// Server-computed rollup: total plus monthly, weekly and daily deltas.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseSummary {
    /// Lifetime total.
    pub total_expenses: f64,
    /// Current month against the previous month.
    pub monthly_expenses: TimePeriodExpense,
    /// Current week against the previous week.
    pub weekly_expenses: TimePeriodExpense,
    /// Today against yesterday.
    pub daily_expenses: TimePeriodExpense,
}
