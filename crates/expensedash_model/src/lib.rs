//! # expensedash model
//!
//! Data model and pure client-side logic for the expense dashboard.
//!
//! This crate provides:
//! - `Expense`, `ExpenseTag` and the `User` profile
//! - `ExpenseForm` validation into a request-ready `ExpenseInput`
//! - `PaginatedExpenseView` with its optimistic patch operations
//! - `PeriodBucket` chart series and the `ExpenseSummary` rollup
//! - `format_bucket_label` for chart axis and tooltip labels
//!
//! This is a pure model crate with no I/O operations.

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod error;
mod expense;
pub mod format;
mod input;
mod pagination;
mod period;
mod summary;
mod tag;
mod user;

pub use error::{ValidationError, ValidationErrors};
pub use expense::{parse_calendar_day, Expense};
pub use format::{format_bucket_key, format_bucket_label, LabelMode};
pub use input::{ExpenseForm, ExpenseInput, FormField};
pub use pagination::{total_pages_for, PageCursor, PaginatedExpenseView};
pub use period::{BucketId, BucketKey, Period, PeriodBucket};
pub use summary::{ExpenseSummary, TimePeriodExpense, Trend};
pub use tag::{ExpenseTag, UnknownTag};
pub use user::{AuthProvider, User};

/// Calendar day wire format used for expense dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Page size used when the store has to invent pagination metadata.
pub const DEFAULT_PER_PAGE: u32 = 10;
