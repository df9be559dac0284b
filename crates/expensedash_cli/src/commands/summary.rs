//! Summary command implementation.

use super::{money, CommandError, Context};
use expensedash_model::{ExpenseSummary, TimePeriodExpense, Trend};

/// Runs the summary command.
pub fn run(ctx: &Context, user_id: &str) -> Result<(), Box<dyn std::error::Error>> {
    let store = ctx.session.expenses();
    store.fetch_summary(user_id);
    let summary = store.summary().ok_or(CommandError::Unavailable("summary"))?;
    ctx.emit(&summary, render)
}

fn render(summary: &ExpenseSummary) -> String {
    let mut out = format!("Total: {}\n", money(summary.total_expenses));
    for (name, period) in [
        ("This month", &summary.monthly_expenses),
        ("This week", &summary.weekly_expenses),
        ("Today", &summary.daily_expenses),
    ] {
        out.push_str(&format!("{name}: {}\n", line(period)));
    }
    out.trim_end().to_string()
}

fn line(period: &TimePeriodExpense) -> String {
    let arrow = match period.trend() {
        Trend::Up => '↑',
        Trend::Down => '↓',
    };
    format!(
        "{} ({arrow} {} {} than before)",
        money(period.amount),
        period.display_percentage(),
        period.comparison_word()
    )
}
