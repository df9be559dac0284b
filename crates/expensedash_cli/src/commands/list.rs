//! List command implementation.

use super::{money, CommandError, Context};
use expensedash_model::{PageCursor, PaginatedExpenseView, DATE_FORMAT};

/// Runs the list command.
pub fn run(
    ctx: &Context,
    user_id: &str,
    page: u32,
    limit: Option<u32>,
) -> Result<(), Box<dyn std::error::Error>> {
    let store = ctx.session.expenses();
    let per_page = limit.unwrap_or(store.config().default_per_page);
    let cursor = PageCursor::new(page, per_page);

    store.fetch_paginated(user_id, cursor.page(), cursor.per_page());
    let view = store.paginated().ok_or(CommandError::Unavailable("expenses"))?;
    ctx.emit(&view, render)
}

fn render(view: &PaginatedExpenseView) -> String {
    if view.expenses.is_empty() {
        return format!("No expenses (page {} of {})", view.current_page, view.total_pages);
    }

    let mut out = String::new();
    for expense in &view.expenses {
        let tags: Vec<String> = expense.tags.iter().map(|t| t.label()).collect();
        out.push_str(&format!(
            "{}  {:>10}  {:<24}  {}  {}\n",
            expense.date.format(DATE_FORMAT),
            money(expense.amount),
            tags.join(", "),
            expense.id,
            expense.description.as_deref().unwrap_or("")
        ));
    }

    let cursor = PageCursor::from_view(view);
    out.push_str(&format!(
        "Page {} of {} ({} expenses)",
        view.current_page, view.total_pages, view.total_count
    ));
    if cursor.can_next(view.total_pages) {
        out.push_str(&format!(", next: --page {}", cursor.next(view.total_pages).page()));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use expensedash_model::{Expense, ExpenseTag};

    fn view(count: usize, total_count: u64, current_page: u32) -> PaginatedExpenseView {
        let expense: Expense = serde_json::from_str(
            r#"{"_id":"e1","amount":7.5,"tags":["food","health"],"date":"2024-03-05T00:00:00.000Z","user":"u1","description":"Lunch"}"#,
        )
        .unwrap();
        assert!(expense.has_tag(ExpenseTag::Health));
        PaginatedExpenseView {
            expenses: vec![expense; count],
            total_count,
            total_pages: expensedash_model::total_pages_for(total_count, 2),
            current_page,
            per_page: 2,
        }
    }

    #[test]
    fn renders_rows_and_footer() {
        let text = render(&view(2, 5, 1));
        assert!(text.contains("2024-03-05"));
        assert!(text.contains("7.50"));
        assert!(text.contains("Food, Health"));
        assert!(text.ends_with("Page 1 of 3 (5 expenses), next: --page 2"));
    }

    #[test]
    fn last_page_has_no_next_hint() {
        let text = render(&view(1, 5, 3));
        assert!(text.ends_with("Page 3 of 3 (5 expenses)"));
    }

    #[test]
    fn empty_page() {
        assert_eq!(render(&view(0, 0, 1)), "No expenses (page 1 of 1)");
    }
}
