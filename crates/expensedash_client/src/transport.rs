//! Transport layer abstraction for backend calls.

use crate::error::{ClientError, ClientResult};
use expensedash_model::{
    Expense, ExpenseInput, ExpenseSummary, PaginatedExpenseView, Period, PeriodBucket, User,
};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// A transport carries store operations to the backend.
///
/// This trait abstracts the network layer, allowing for different
/// implementations (HTTP, in-memory, mock for testing, etc.).
pub trait ExpenseTransport: Send + Sync {
    /// Fetches the signed-in user.
    fn current_user(&self) -> ClientResult<User>;

    /// Ends the server-side session.
    fn logout(&self) -> ClientResult<()>;

    /// Fetches the rollup summary for a user.
    fn expense_summary(&self, user_id: &str) -> ClientResult<ExpenseSummary>;

    /// Fetches the bucketed chart series for a user.
    fn expenses_by_period(&self, user_id: &str, period: Period) -> ClientResult<Vec<PeriodBucket>>;

    /// Fetches one page of a user's expenses.
    fn paginated_expenses(
        &self,
        user_id: &str,
        page: u32,
        per_page: u32,
    ) -> ClientResult<PaginatedExpenseView>;

    /// Creates an expense; the backend assigns its id.
    fn create_expense(&self, input: &ExpenseInput) -> ClientResult<Expense>;

    /// Replaces an expense.
    fn update_expense(&self, expense_id: &str, input: &ExpenseInput) -> ClientResult<Expense>;

    /// Deletes an expense.
    fn delete_expense(&self, expense_id: &str) -> ClientResult<()>;
}

impl<T: ExpenseTransport + ?Sized> ExpenseTransport for Arc<T> {
    fn current_user(&self) -> ClientResult<User> {
        (**self).current_user()
    }

    fn logout(&self) -> ClientResult<()> {
        (**self).logout()
    }

    fn expense_summary(&self, user_id: &str) -> ClientResult<ExpenseSummary> {
        (**self).expense_summary(user_id)
    }

    fn expenses_by_period(&self, user_id: &str, period: Period) -> ClientResult<Vec<PeriodBucket>> {
        (**self).expenses_by_period(user_id, period)
    }

    fn paginated_expenses(
        &self,
        user_id: &str,
        page: u32,
        per_page: u32,
    ) -> ClientResult<PaginatedExpenseView> {
        (**self).paginated_expenses(user_id, page, per_page)
    }

    fn create_expense(&self, input: &ExpenseInput) -> ClientResult<Expense> {
        (**self).create_expense(input)
    }

    fn update_expense(&self, expense_id: &str, input: &ExpenseInput) -> ClientResult<Expense> {
        (**self).update_expense(expense_id, input)
    }

    fn delete_expense(&self, expense_id: &str) -> ClientResult<()> {
        (**self).delete_expense(expense_id)
    }
}

/// A call recorded by `MockTransport`.
#[derive(Debug, Clone, PartialEq)]
pub enum MockCall {
    /// `current_user`.
    CurrentUser,
    /// `logout`.
    Logout,
    /// `expense_summary(user_id)`.
    Summary(String),
    /// `expenses_by_period(user_id, period)`.
    ByPeriod(String, Period),
    /// `paginated_expenses(user_id, page, per_page)`.
    Paginated(String, u32, u32),
    /// `create_expense(input)`.
    Create(ExpenseInput),
    /// `update_expense(id, input)`.
    Update(String, ExpenseInput),
    /// `delete_expense(id)`.
    Delete(String),
}

/// A mock transport for testing.
///
/// Each operation answers with the response set for it, or a fatal
/// transport error if none was set.
#[derive(Debug)]
pub struct MockTransport {
    offline: AtomicBool,
    calls: Mutex<Vec<MockCall>>,
    user: Mutex<Option<ClientResult<User>>>,
    logout: Mutex<Option<ClientResult<()>>>,
    summary: Mutex<Option<ClientResult<ExpenseSummary>>>,
    series: Mutex<Option<ClientResult<Vec<PeriodBucket>>>>,
    page: Mutex<Option<ClientResult<PaginatedExpenseView>>>,
    create: Mutex<Option<ClientResult<Expense>>>,
    update: Mutex<Option<ClientResult<Expense>>>,
    delete: Mutex<Option<ClientResult<()>>>,
}

impl MockTransport {
    /// Creates a new mock transport with no responses set.
    pub fn new() -> Self {
        Self {
            offline: AtomicBool::new(false),
            calls: Mutex::new(Vec::new()),
            user: Mutex::new(None),
            logout: Mutex::new(None),
            summary: Mutex::new(None),
            series: Mutex::new(None),
            page: Mutex::new(None),
            create: Mutex::new(None),
            update: Mutex::new(None),
            delete: Mutex::new(None),
        }
    }

    /// Makes every call fail with a retryable transport error.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Sets the `current_user` response.
    pub fn set_user_response(&self, response: ClientResult<User>) {
        *self.user.lock() = Some(response);
    }

    /// Sets the `logout` response.
    pub fn set_logout_response(&self, response: ClientResult<()>) {
        *self.logout.lock() = Some(response);
    }

    /// Sets the `expense_summary` response.
    pub fn set_summary_response(&self, response: ClientResult<ExpenseSummary>) {
        *self.summary.lock() = Some(response);
    }

    /// Sets the `expenses_by_period` response.
    pub fn set_series_response(&self, response: ClientResult<Vec<PeriodBucket>>) {
        *self.series.lock() = Some(response);
    }

    /// Sets the `paginated_expenses` response.
    pub fn set_page_response(&self, response: ClientResult<PaginatedExpenseView>) {
        *self.page.lock() = Some(response);
    }

    /// Sets the `create_expense` response.
    pub fn set_create_response(&self, response: ClientResult<Expense>) {
        *self.create.lock() = Some(response);
    }

    /// Sets the `update_expense` response.
    pub fn set_update_response(&self, response: ClientResult<Expense>) {
        *self.update.lock() = Some(response);
    }

    /// Sets the `delete_expense` response.
    pub fn set_delete_response(&self, response: ClientResult<()>) {
        *self.delete.lock() = Some(response);
    }

    /// Returns every call made so far, oldest first.
    pub fn calls(&self) -> Vec<MockCall> {
        self.calls.lock().clone()
    }

    fn answer<T: Clone>(
        &self,
        call: MockCall,
        slot: &Mutex<Option<ClientResult<T>>>,
        name: &str,
    ) -> ClientResult<T> {
        self.calls.lock().push(call);
        if self.offline.load(Ordering::SeqCst) {
            return Err(ClientError::transport_retryable("mock transport is offline"));
        }
        slot.lock()
            .clone()
            .unwrap_or_else(|| Err(ClientError::transport_fatal(format!("no mock {name} response set"))))
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl ExpenseTransport for MockTransport {
    fn current_user(&self) -> ClientResult<User> {
        self.answer(MockCall::CurrentUser, &self.user, "user")
    }

    fn logout(&self) -> ClientResult<()> {
        self.answer(MockCall::Logout, &self.logout, "logout")
    }

    fn expense_summary(&self, user_id: &str) -> ClientResult<ExpenseSummary> {
        self.answer(MockCall::Summary(user_id.into()), &self.summary, "summary")
    }

    fn expenses_by_period(&self, user_id: &str, period: Period) -> ClientResult<Vec<PeriodBucket>> {
        self.answer(MockCall::ByPeriod(user_id.into(), period), &self.series, "series")
    }

    fn paginated_expenses(
        &self,
        user_id: &str,
        page: u32,
        per_page: u32,
    ) -> ClientResult<PaginatedExpenseView> {
        self.answer(
            MockCall::Paginated(user_id.into(), page, per_page),
            &self.page,
            "page",
        )
    }

    fn create_expense(&self, input: &ExpenseInput) -> ClientResult<Expense> {
        self.answer(MockCall::Create(input.clone()), &self.create, "create")
    }

    fn update_expense(&self, expense_id: &str, input: &ExpenseInput) -> ClientResult<Expense> {
        self.answer(
            MockCall::Update(expense_id.into(), input.clone()),
            &self.update,
            "update",
        )
    }

    fn delete_expense(&self, expense_id: &str) -> ClientResult<()> {
        self.answer(MockCall::Delete(expense_id.into()), &self.delete, "delete")
    }
}
