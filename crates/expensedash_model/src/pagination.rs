//! Paginated expense views and the optimistic patches applied to them.

use crate::expense::Expense;
use serde::{Deserialize, Serialize};

/// Number of pages needed for `total_count` entries, never less than one.
pub fn total_pages_for(total_count: u64, per_page: u32) -> u64 {
    let per_page = u64::from(per_page.max(1));
    total_count.div_ceil(per_page).max(1)
}

/// One page of a user's expenses plus metadata about the whole collection.
///
/// Invariants (as produced by the backend and preserved by the patches
/// below, except where noted on `apply_removed`):
/// - `total_pages == max(1, ceil(total_count / per_page))`
/// - `expenses.len() <= per_page`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedExpenseView {
    /// Entries on this page, newest first.
    pub expenses: Vec<Expense>,
    /// Number of expenses across all pages.
    pub total_count: u64,
    /// Number of pages.
    pub total_pages: u64,
    /// 1-indexed page number.
    pub current_page: u32,
    /// Page size.
    pub per_page: u32,
}

impl PaginatedExpenseView {
    /// Creates a view holding a single freshly created expense.
    pub fn first_entry(expense: Expense, per_page: u32) -> Self {
        Self {
            expenses: vec![expense],
            total_count: 1,
            total_pages: 1,
            current_page: 1,
            per_page: per_page.max(1),
        }
    }

    /// Returns true if an entry with `id` is on this page.
    pub fn contains(&self, id: &str) -> bool {
        self.expenses.iter().any(|e| e.id == id)
    }

    /// Prepends a newly created expense.
    ///
    /// The oldest entry on this page falls off when the page is full; it is
    /// picked up again on the next page fetch.
    pub fn apply_added(&mut self, expense: Expense) {
        self.expenses.insert(0, expense);
        self.expenses.truncate(self.per_page.max(1) as usize);
        self.total_count += 1;
        self.total_pages = total_pages_for(self.total_count, self.per_page);
    }

    /// Replaces the entry with the same id in place.
    ///
    /// Returns false if no entry on this page matched.
    pub fn apply_replaced(&mut self, expense: Expense) -> bool {
        match self.expenses.iter_mut().find(|e| e.id == expense.id) {
            Some(slot) => {
                *slot = expense;
                true
            }
            None => false,
        }
    }

    /// Drops the entry with `id` and counts it out of the collection.
    ///
    /// The server already deleted the expense, so `total_count` shrinks even
    /// when it was not on this page. `total_pages` is left alone and the page
    /// is not backfilled, so it can be one entry short until the next fetch.
    /// Returns true if an entry on this page was dropped.
    pub fn apply_removed(&mut self, id: &str) -> bool {
        let before = self.expenses.len();
        self.expenses.retain(|e| e.id != id);
        self.total_count = self.total_count.saturating_sub(1);
        self.expenses.len() != before
    }
}

/// Page navigation state for a paginated listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageCursor {
    page: u32,
    per_page: u32,
}

impl PageCursor {
    /// Creates a cursor; both values are clamped to at least 1.
    pub fn new(page: u32, per_page: u32) -> Self {
        Self {
            page: page.max(1),
            per_page: per_page.max(1),
        }
    }

    /// Creates a cursor pointing at the page a view was fetched for.
    pub fn from_view(view: &PaginatedExpenseView) -> Self {
        Self::new(view.current_page, view.per_page)
    }

    /// 1-indexed page.
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Page size.
    pub fn per_page(&self) -> u32 {
        self.per_page
    }

    /// Returns true if a page exists after this one.
    pub fn can_next(&self, total_pages: u64) -> bool {
        u64::from(self.page) < total_pages
    }

    /// Returns true if a page exists before this one.
    pub fn can_prev(&self) -> bool {
        self.page > 1
    }

    /// Moves one page forward, staying on the last page.
    pub fn next(self, total_pages: u64) -> Self {
        if self.can_next(total_pages) {
            Self::new(self.page + 1, self.per_page)
        } else {
            self
        }
    }

    /// Moves one page back, staying on the first page.
    pub fn prev(self) -> Self {
        Self::new(self.page.saturating_sub(1), self.per_page)
    }

    /// Jumps to the first page.
    pub fn first(self) -> Self {
        Self::new(1, self.per_page)
    }

    /// Jumps to the last page.
    pub fn last(self, total_pages: u64) -> Self {
        let last = u32::try_from(total_pages.max(1)).unwrap_or(u32::MAX);
        Self::new(last, self.per_page)
    }

    /// Changes the page size and returns to the first page.
    pub fn with_page_size(self, per_page: u32) -> Self {
        Self::new(1, per_page)
    }
}

impl Default for PageCursor {
    fn default() -> Self {
        Self::new(1, crate::DEFAULT_PER_PAGE)
    }
}
