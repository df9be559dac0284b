//! Write command implementations.

use super::{money, CommandError, Context, ExpenseArgs};
use expensedash_client::ClientError;
use expensedash_model::{Expense, DATE_FORMAT};

fn describe(expense: &Expense) -> String {
    format!(
        "{} {} on {}",
        expense.id,
        money(expense.amount),
        expense.date.format(DATE_FORMAT)
    )
}

/// Runs the add command.
pub fn add(ctx: &Context, args: &ExpenseArgs) -> Result<(), Box<dyn std::error::Error>> {
    let input = args.to_input().map_err(ClientError::from)?;
    let expense = ctx
        .session
        .expenses()
        .add(&input)?
        .ok_or(CommandError::NotApplied("add"))?;
    ctx.emit(&expense, |e| format!("Added {}", describe(e)))
}

/// Runs the edit command.
pub fn edit(
    ctx: &Context,
    expense_id: &str,
    args: &ExpenseArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let input = args.to_input().map_err(ClientError::from)?;
    let expense = ctx
        .session
        .expenses()
        .edit(&input, expense_id)?
        .ok_or(CommandError::NotApplied("edit"))?;
    ctx.emit(&expense, |e| format!("Updated {}", describe(e)))
}

/// Runs the remove command.
pub fn remove(ctx: &Context, expense_id: &str) -> Result<(), Box<dyn std::error::Error>> {
    if !ctx.session.expenses().remove(expense_id)? {
        return Err(CommandError::NotApplied("remove").into());
    }
    println!("Removed {expense_id}");
    Ok(())
}
