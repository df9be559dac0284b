//! Expense state store.

use crate::config::{ClientConfig, WriteFailureMode};
use crate::error::{ClientError, ClientResult};
use crate::generation::Generation;
use crate::transport::ExpenseTransport;
use expensedash_model::{
    Expense, ExpenseInput, ExpenseSummary, PaginatedExpenseView, Period, PeriodBucket,
};
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::{debug, warn};

/// Snapshot of everything the dashboard renders from.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseState {
    /// True while a summary fetch is outstanding, and before the first one.
    pub is_loading: bool,
    /// Current page of expenses. `None` means "no data available", which is
    /// not the same as an empty page.
    pub paginated: Option<PaginatedExpenseView>,
    /// Chart series for the last requested period.
    pub period_series: Vec<PeriodBucket>,
    /// Rollup summary.
    pub summary: Option<ExpenseSummary>,
}

impl Default for ExpenseState {
    fn default() -> Self {
        Self {
            is_loading: true,
            paginated: None,
            period_series: Vec::new(),
            summary: None,
        }
    }
}

/// Client-side state for one signed-in session.
///
/// Reads replace a whole slot (`summary`, `period_series`, `paginated`)
/// and never return errors; a failed read leaves the slot empty. Writes
/// call the backend first and patch `paginated` only after the backend
/// accepted them.
///
/// Every slot has its own generation. A response is dropped if a newer
/// request for the same slot was issued while it was in flight, so a quick
/// period or page switch always ends on the newest selection. Tokens are
/// only taken and checked under the state write lock, together with the
/// slot writes that belong to them.
pub struct ExpenseStore<T: ExpenseTransport> {
    config: ClientConfig,
    transport: Arc<T>,
    state: RwLock<ExpenseState>,
    summary_generation: Generation,
    series_generation: Generation,
    page_generation: Generation,
    /// Advanced on reset so that writes in flight across a reset do not
    /// patch the fresh state.
    epoch: Generation,
}

impl<T: ExpenseTransport> ExpenseStore<T> {
    /// Creates a new store.
    pub fn new(config: ClientConfig, transport: T) -> Self {
        Self::with_shared_transport(config, Arc::new(transport))
    }

    /// Creates a store on a transport shared with other stores.
    pub fn with_shared_transport(config: ClientConfig, transport: Arc<T>) -> Self {
        let epoch = Generation::new();
        epoch.advance();
        Self {
            config,
            transport,
            state: RwLock::new(ExpenseState::default()),
            summary_generation: Generation::new(),
            series_generation: Generation::new(),
            page_generation: Generation::new(),
            epoch,
        }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Returns the transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Returns a snapshot of the whole state.
    pub fn state(&self) -> ExpenseState {
        self.state.read().clone()
    }

    /// Returns true while the summary is loading.
    pub fn is_loading(&self) -> bool {
        self.state.read().is_loading
    }

    /// Returns the current page of expenses.
    pub fn paginated(&self) -> Option<PaginatedExpenseView> {
        self.state.read().paginated.clone()
    }

    /// Returns the chart series.
    pub fn period_series(&self) -> Vec<PeriodBucket> {
        self.state.read().period_series.clone()
    }

    /// Returns the rollup summary.
    pub fn summary(&self) -> Option<ExpenseSummary> {
        self.state.read().summary.clone()
    }

    /// Returns to the freshly constructed state and drops every response
    /// still in flight.
    pub fn reset(&self) {
        let mut state = self.state.write();
        self.summary_generation.advance();
        self.series_generation.advance();
        self.page_generation.advance();
        self.epoch.advance();
        *state = ExpenseState::default();
        debug!("expense store reset");
    }

    /// Loads the rollup summary for `user_id`.
    pub fn fetch_summary(&self, user_id: &str) {
        let token = {
            let mut state = self.state.write();
            state.is_loading = true;
            self.summary_generation.advance()
        };

        let result = self.transport.expense_summary(user_id);

        let mut state = self.state.write();
        if !self.summary_generation.is_current(token) {
            debug!(user_id, "dropping stale summary response");
            return;
        }
        state.summary = match result {
            Ok(summary) => Some(summary),
            Err(e) => {
                warn!(user_id, error = %e, "failed to fetch expense summary");
                None
            }
        };
        state.is_loading = false;
    }

    /// Loads the chart series for `user_id` and `period`.
    ///
    /// The old series is cleared before the request is sent, so buckets of
    /// a previous period are never shown under the new period's labels.
    pub fn fetch_by_period(&self, user_id: &str, period: Period) {
        let token = {
            let mut state = self.state.write();
            state.period_series = Vec::new();
            self.series_generation.advance()
        };

        let result = self.transport.expenses_by_period(user_id, period);

        let mut state = self.state.write();
        if !self.series_generation.is_current(token) {
            debug!(user_id, %period, "dropping stale series response");
            return;
        }
        state.period_series = match result {
            Ok(series) => series,
            Err(e) => {
                warn!(user_id, %period, error = %e, "failed to fetch expenses by period");
                Vec::new()
            }
        };
    }

    /// Loads page `page` of size `per_page` for `user_id`.
    pub fn fetch_paginated(&self, user_id: &str, page: u32, per_page: u32) {
        let token = {
            let _state = self.state.write();
            self.page_generation.advance()
        };

        let result = self.transport.paginated_expenses(user_id, page, per_page);

        let mut state = self.state.write();
        if !self.page_generation.is_current(token) {
            debug!(user_id, page, per_page, "dropping stale page response");
            return;
        }
        state.paginated = match result {
            Ok(view) => Some(view),
            Err(e) => {
                warn!(user_id, page, per_page, error = %e, "failed to fetch user expenses");
                None
            }
        };
    }

    /// Creates an expense and prepends it to the current page.
    ///
    /// Returns the created expense, or `Ok(None)` if the backend call failed
    /// and the store is configured with `WriteFailureMode::Silent`.
    pub fn add(&self, input: &ExpenseInput) -> ClientResult<Option<Expense>> {
        let epoch = self.epoch.current();
        let expense = match self.transport.create_expense(input) {
            Ok(expense) => expense,
            Err(e) => return self.write_failed("add", e).map(|()| None),
        };

        let mut state = self.state.write();
        if self.epoch.is_current(epoch) {
            match state.paginated.as_mut() {
                Some(view) => view.apply_added(expense.clone()),
                None => {
                    state.paginated = Some(PaginatedExpenseView::first_entry(
                        expense.clone(),
                        self.config.default_per_page,
                    ))
                }
            }
        }
        Ok(Some(expense))
    }

    /// Replaces an expense and updates it in place on the current page.
    ///
    /// Returns the updated expense, or `Ok(None)` on a silent failure.
    pub fn edit(&self, input: &ExpenseInput, expense_id: &str) -> ClientResult<Option<Expense>> {
        let epoch = self.epoch.current();
        let expense = match self.transport.update_expense(expense_id, input) {
            Ok(expense) => expense,
            Err(e) => return self.write_failed("edit", e).map(|()| None),
        };

        let mut state = self.state.write();
        if self.epoch.is_current(epoch) {
            if let Some(view) = state.paginated.as_mut() {
                if !view.apply_replaced(expense.clone()) {
                    debug!(expense_id = %expense.id, "edited expense is not on the current page");
                }
            }
        }
        Ok(Some(expense))
    }

    /// Deletes an expense and drops it from the current page.
    ///
    /// Returns `Ok(true)` once the backend deleted it, or `Ok(false)` on a
    /// silent failure.
    pub fn remove(&self, expense_id: &str) -> ClientResult<bool> {
        let epoch = self.epoch.current();
        if let Err(e) = self.transport.delete_expense(expense_id) {
            return self.write_failed("remove", e).map(|()| false);
        }

        let mut state = self.state.write();
        if self.epoch.is_current(epoch) {
            if let Some(view) = state.paginated.as_mut() {
                view.apply_removed(expense_id);
            }
        }
        Ok(true)
    }

    fn write_failed(&self, operation: &'static str, error: ClientError) -> ClientResult<()> {
        match self.config.write_failure_mode {
            WriteFailureMode::Silent => {
                warn!(operation, error = %error, "expense write failed");
                Ok(())
            }
            WriteFailureMode::Surface => Err(error),
        }
    }
}
