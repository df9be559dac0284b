//! Integration tests for the expense and session stores against an in-memory backend.

use chrono::NaiveDate;
use expensedash_client::model::{
    format_bucket_key, total_pages_for, Expense, ExpenseForm, ExpenseInput, ExpenseSummary,
    LabelMode, PaginatedExpenseView, Period, PeriodBucket, User,
};
use expensedash_client::{
    ClientConfig, ClientError, ClientResult, ExpenseStore, ExpenseTransport, SessionStore,
};
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;
use std::thread;

/// A backend that keeps one user's expenses in memory, newest first.
struct MemoryBackend {
    user: User,
    expenses: Mutex<Vec<Expense>>,
}

impl MemoryBackend {
    fn new() -> Self {
        Self {
            user: serde_json::from_str(
                r#"{"_id":"u1","firstName":"Ada","lastName":"Lovelace","email":"ada@example.com","provider":"google"}"#,
            )
            .unwrap(),
            expenses: Mutex::new(Vec::new()),
        }
    }

    fn seeded(count: usize) -> Self {
        let backend = Self::new();
        for i in 0..count {
            backend
                .create_expense(&input(&format!("{}", i + 1), "2024-03-05"))
                .unwrap();
        }
        backend
    }

    fn len(&self) -> usize {
        self.expenses.lock().len()
    }

    fn not_found(id: &str) -> ClientError {
        ClientError::Status {
            status: 404,
            path: format!("/api/expenses/{id}"),
        }
    }
}

impl ExpenseTransport for MemoryBackend {
    fn current_user(&self) -> ClientResult<User> {
        Ok(self.user.clone())
    }

    fn logout(&self) -> ClientResult<()> {
        Ok(())
    }

    fn expense_summary(&self, _user_id: &str) -> ClientResult<ExpenseSummary> {
        let total = self.expenses.lock().iter().map(|e| e.amount).sum();
        Ok(ExpenseSummary {
            total_expenses: total,
            ..Default::default()
        })
    }

    fn expenses_by_period(&self, _user_id: &str, period: Period) -> ClientResult<Vec<PeriodBucket>> {
        let pattern = match period {
            Period::Daily => "%Y-%m-%d",
            Period::Weekly => "%G-W%V",
            Period::Monthly => "%Y-%m",
        };
        let mut totals: BTreeMap<String, f64> = BTreeMap::new();
        for expense in self.expenses.lock().iter() {
            *totals
                .entry(expense.date.format(pattern).to_string())
                .or_default() += expense.amount;
        }
        Ok(totals
            .into_iter()
            .map(|(key, amount)| PeriodBucket::new(period, key.as_str(), amount))
            .collect())
    }

    fn paginated_expenses(
        &self,
        _user_id: &str,
        page: u32,
        per_page: u32,
    ) -> ClientResult<PaginatedExpenseView> {
        let expenses = self.expenses.lock();
        let start = (page.saturating_sub(1) * per_page) as usize;
        Ok(PaginatedExpenseView {
            expenses: expenses
                .iter()
                .skip(start)
                .take(per_page as usize)
                .cloned()
                .collect(),
            total_count: expenses.len() as u64,
            total_pages: total_pages_for(expenses.len() as u64, per_page),
            current_page: page,
            per_page,
        })
    }

    fn create_expense(&self, input: &ExpenseInput) -> ClientResult<Expense> {
        let expense = Expense {
            id: uuid::Uuid::new_v4().to_string(),
            amount: input.amount(),
            tags: input.tags().to_vec(),
            date: input.date(),
            description: input.description().map(str::to_string),
            user: self.user.id.clone(),
            created_at: None,
            updated_at: None,
        };
        self.expenses.lock().insert(0, expense.clone());
        Ok(expense)
    }

    fn update_expense(&self, expense_id: &str, input: &ExpenseInput) -> ClientResult<Expense> {
        let mut expenses = self.expenses.lock();
        let expense = expenses
            .iter_mut()
            .find(|e| e.id == expense_id)
            .ok_or_else(|| Self::not_found(expense_id))?;
        expense.amount = input.amount();
        expense.tags = input.tags().to_vec();
        expense.date = input.date();
        expense.description = input.description().map(str::to_string);
        Ok(expense.clone())
    }

    fn delete_expense(&self, expense_id: &str) -> ClientResult<()> {
        let mut expenses = self.expenses.lock();
        let before = expenses.len();
        expenses.retain(|e| e.id != expense_id);
        if expenses.len() == before {
            return Err(Self::not_found(expense_id));
        }
        Ok(())
    }
}

/// The backend call a `GatedBackend` holds.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Gate {
    User,
    Summary,
    Period(Period),
    Page(u32),
}

/// Holds the first call matching its gate until the test releases it.
///
/// The held call computes its response before blocking, so the response
/// reflects the backend as it was when the request was sent.
struct GatedBackend {
    inner: MemoryBackend,
    gate: Gate,
    armed: AtomicBool,
    entered: Mutex<mpsc::Sender<()>>,
    release: Mutex<mpsc::Receiver<()>>,
}

impl GatedBackend {
    fn new(inner: MemoryBackend, gate: Gate) -> (Self, mpsc::Receiver<()>, mpsc::Sender<()>) {
        let (entered_tx, entered_rx) = mpsc::channel();
        let (release_tx, release_rx) = mpsc::channel();
        let backend = Self {
            inner,
            gate,
            armed: AtomicBool::new(true),
            entered: Mutex::new(entered_tx),
            release: Mutex::new(release_rx),
        };
        (backend, entered_rx, release_tx)
    }

    fn hold<R>(&self, call: Gate, response: R) -> R {
        if call == self.gate && self.armed.swap(false, Ordering::SeqCst) {
            self.entered.lock().send(()).unwrap();
            self.release.lock().recv().unwrap();
        }
        response
    }
}

impl ExpenseTransport for GatedBackend {
    fn current_user(&self) -> ClientResult<User> {
        self.hold(Gate::User, self.inner.current_user())
    }

    fn logout(&self) -> ClientResult<()> {
        self.inner.logout()
    }

    fn expense_summary(&self, user_id: &str) -> ClientResult<ExpenseSummary> {
        self.hold(Gate::Summary, self.inner.expense_summary(user_id))
    }

    fn expenses_by_period(&self, user_id: &str, period: Period) -> ClientResult<Vec<PeriodBucket>> {
        self.hold(
            Gate::Period(period),
            self.inner.expenses_by_period(user_id, period),
        )
    }

    fn paginated_expenses(
        &self,
        user_id: &str,
        page: u32,
        per_page: u32,
    ) -> ClientResult<PaginatedExpenseView> {
        self.hold(
            Gate::Page(page),
            self.inner.paginated_expenses(user_id, page, per_page),
        )
    }

    fn create_expense(&self, input: &ExpenseInput) -> ClientResult<Expense> {
        self.inner.create_expense(input)
    }

    fn update_expense(&self, expense_id: &str, input: &ExpenseInput) -> ClientResult<Expense> {
        self.inner.update_expense(expense_id, input)
    }

    fn delete_expense(&self, expense_id: &str) -> ClientResult<()> {
        self.inner.delete_expense(expense_id)
    }
}

fn input(amount: &str, date: &str) -> ExpenseInput {
    ExpenseForm::new()
        .with_amount(amount)
        .with_tag("food")
        .with_date(date)
        .validate()
        .unwrap()
}

fn page_ids(view: &PaginatedExpenseView) -> Vec<String> {
    view.expenses.iter().map(|e| e.id.clone()).collect()
}

#[test]
fn test_fetch_paginated_is_idempotent() {
    let store = ExpenseStore::new(ClientConfig::default(), MemoryBackend::seeded(7));

    store.fetch_paginated("u1", 2, 3);
    let first = store.state();
    store.fetch_paginated("u1", 2, 3);

    assert_eq!(store.state(), first);
    let view = first.paginated.unwrap();
    assert_eq!(view.expenses.len(), 3);
    assert_eq!(view.total_pages, 3);
}

#[test]
fn test_add_matches_fresh_first_page() {
    let store = ExpenseStore::new(ClientConfig::default(), MemoryBackend::seeded(4));
    store.fetch_paginated("u1", 1, 3);

    for amount in ["10", "20", "30"] {
        let created = store.add(&input(amount, "2024-04-01")).unwrap().unwrap();
        let local = store.paginated().unwrap();
        assert_eq!(local.expenses[0], created);

        let fresh = store.transport().paginated_expenses("u1", 1, 3).unwrap();
        assert_eq!(page_ids(&local), page_ids(&fresh));
        assert_eq!(local.total_count, fresh.total_count);
        assert_eq!(local.total_pages, fresh.total_pages);
    }
}

#[test]
fn test_add_to_full_page_drops_oldest() {
    let store = ExpenseStore::new(ClientConfig::default(), MemoryBackend::seeded(5));
    store.fetch_paginated("u1", 1, 2);
    let before = page_ids(&store.paginated().unwrap());

    let created = store.add(&input("3", "2024-03-06")).unwrap().unwrap();

    let view = store.paginated().unwrap();
    assert_eq!(page_ids(&view), vec![created.id, before[0].clone()]);
    assert_eq!(view.total_count, 6);
    assert_eq!(view.total_pages, 3);
}

#[test]
fn test_remove_updates_page_and_count() {
    let store = ExpenseStore::new(ClientConfig::default(), MemoryBackend::seeded(3));
    store.fetch_paginated("u1", 1, 10);
    let victim = store.paginated().unwrap().expenses[1].id.clone();

    assert!(store.remove(&victim).unwrap());

    let view = store.paginated().unwrap();
    assert!(!view.contains(&victim));
    assert_eq!(view.total_count, 2);
    assert_eq!(store.transport().len(), 2);
}

#[test]
fn test_remove_unknown_id_is_a_silent_failure() {
    let store = ExpenseStore::new(ClientConfig::default(), MemoryBackend::seeded(2));
    store.fetch_paginated("u1", 1, 10);
    let before = store.state();

    assert!(!store.remove("missing").unwrap());
    assert_eq!(store.state(), before);
}

#[test]
fn test_edit_round_trips_through_backend() {
    let store = ExpenseStore::new(ClientConfig::default(), MemoryBackend::seeded(2));
    store.fetch_paginated("u1", 1, 10);
    let target = store.paginated().unwrap().expenses[0].clone();

    let form = ExpenseForm::from(&target)
        .with_amount("99.5")
        .with_description("Dinner");
    let updated = store
        .edit(&form.validate().unwrap(), &target.id)
        .unwrap()
        .unwrap();

    assert_eq!(updated.amount, 99.5);
    let local = store.paginated().unwrap();
    let fresh = store.transport().paginated_expenses("u1", 1, 10).unwrap();
    assert_eq!(local.expenses, fresh.expenses);
}

#[test]
fn test_period_series_labels() {
    let backend = MemoryBackend::new();
    backend.create_expense(&input("5", "2024-03-05")).unwrap();
    backend.create_expense(&input("7", "2024-03-20")).unwrap();
    backend.create_expense(&input("1", "2024-04-02")).unwrap();
    let store = ExpenseStore::new(ClientConfig::default(), backend);

    store.fetch_by_period("u1", Period::Monthly);

    let labels: Vec<(String, f64)> = store
        .period_series()
        .iter()
        .map(|bucket| {
            let key = bucket.key(Period::Monthly).unwrap();
            (
                format_bucket_key(key, Period::Monthly, LabelMode::Tick),
                bucket.total_amount,
            )
        })
        .collect();
    assert_eq!(
        labels,
        vec![("Mar 2024".to_string(), 12.0), ("Apr 2024".to_string(), 1.0)]
    );
}

#[test]
fn test_stale_page_response_is_dropped() {
    let (backend, entered, release) = GatedBackend::new(MemoryBackend::seeded(5), Gate::Page(1));
    let store = ExpenseStore::new(ClientConfig::default(), backend);

    thread::scope(|scope| {
        let slow = scope.spawn(|| store.fetch_paginated("u1", 1, 2));
        entered.recv().unwrap();

        store.fetch_paginated("u1", 2, 2);
        assert_eq!(store.paginated().unwrap().current_page, 2);

        release.send(()).unwrap();
        slow.join().unwrap();
    });

    assert_eq!(store.paginated().unwrap().current_page, 2);
}

#[test]
fn test_stale_series_response_is_dropped() {
    let backend = MemoryBackend::new();
    backend.create_expense(&input("5", "2024-03-05")).unwrap();
    backend.create_expense(&input("7", "2024-04-20")).unwrap();
    let (backend, entered, release) = GatedBackend::new(backend, Gate::Period(Period::Weekly));
    let store = ExpenseStore::new(ClientConfig::default(), backend);

    thread::scope(|scope| {
        let slow = scope.spawn(|| store.fetch_by_period("u1", Period::Weekly));
        entered.recv().unwrap();

        store.fetch_by_period("u1", Period::Monthly);
        assert_eq!(store.period_series().len(), 2);

        release.send(()).unwrap();
        slow.join().unwrap();
    });

    let series = store.period_series();
    assert_eq!(series.len(), 2);
    assert!(series.iter().all(|b| b.key(Period::Monthly).is_some()));
    assert!(series.iter().all(|b| b.key(Period::Weekly).is_none()));
}

#[test]
fn test_stale_summary_response_is_dropped() {
    let (backend, entered, release) = GatedBackend::new(MemoryBackend::seeded(2), Gate::Summary);
    let store = ExpenseStore::new(ClientConfig::default(), backend);

    thread::scope(|scope| {
        // Computed while the backend total is 3.
        let slow = scope.spawn(|| store.fetch_summary("u1"));
        entered.recv().unwrap();
        assert!(store.is_loading());

        store.add(&input("4", "2024-03-07")).unwrap();
        store.fetch_summary("u1");
        assert!(!store.is_loading());

        release.send(()).unwrap();
        slow.join().unwrap();
    });

    assert_eq!(store.summary().unwrap().total_expenses, 7.0);
    assert!(!store.is_loading());
}

#[test]
fn test_logout_discards_in_flight_user_fetch() {
    let (backend, entered, release) = GatedBackend::new(MemoryBackend::new(), Gate::User);
    let session = SessionStore::new(ClientConfig::default(), backend);

    thread::scope(|scope| {
        let slow = scope.spawn(|| session.fetch_user());
        entered.recv().unwrap();

        session.logout().unwrap();

        release.send(()).unwrap();
        assert_eq!(slow.join().unwrap(), None);
    });

    assert!(session.user().is_none());
    assert!(!session.is_loading());
}

#[test]
fn test_newer_user_fetch_wins() {
    let (backend, entered, release) = GatedBackend::new(MemoryBackend::new(), Gate::User);
    let session = SessionStore::new(ClientConfig::default(), backend);

    thread::scope(|scope| {
        let slow = scope.spawn(|| session.fetch_user());
        entered.recv().unwrap();

        assert!(session.fetch_user().is_some());
        session.logout().unwrap();
        assert!(session.fetch_user().is_some());

        release.send(()).unwrap();
        slow.join().unwrap();
    });

    assert_eq!(session.user_id().as_deref(), Some("u1"));
    assert!(!session.is_loading());
}

#[test]
fn test_reset_discards_in_flight_fetch() {
    let (backend, entered, release) = GatedBackend::new(MemoryBackend::seeded(3), Gate::Page(1));
    let store = ExpenseStore::new(ClientConfig::default(), backend);

    thread::scope(|scope| {
        let slow = scope.spawn(|| store.fetch_paginated("u1", 1, 10));
        entered.recv().unwrap();

        store.reset();

        release.send(()).unwrap();
        slow.join().unwrap();
    });

    assert!(store.paginated().is_none());
    assert!(store.is_loading());
}

#[test]
fn test_write_after_in_flight_page_keeps_newer_page() {
    let (backend, entered, release) = GatedBackend::new(MemoryBackend::seeded(2), Gate::Page(1));
    let store = ExpenseStore::new(ClientConfig::default(), backend);

    thread::scope(|scope| {
        // The slow response was computed before the add below.
        let slow = scope.spawn(|| store.fetch_paginated("u1", 1, 10));
        entered.recv().unwrap();

        store.fetch_paginated("u1", 2, 10);
        store.add(&input("4", "2024-03-07")).unwrap();

        release.send(()).unwrap();
        slow.join().unwrap();
    });

    let view = store.paginated().unwrap();
    assert_eq!(view.current_page, 2);
    assert_eq!(view.total_count, 3);
}

#[test]
fn test_session_lifecycle() {
    let session = SessionStore::new(ClientConfig::default(), MemoryBackend::seeded(2));
    assert!(session.is_loading());

    let user = session.fetch_user().unwrap();
    assert_eq!(user.display_name(), "Ada Lovelace");

    let expenses = session.expenses();
    expenses.fetch_summary(&user.id);
    expenses.fetch_paginated(&user.id, 1, 10);
    expenses.fetch_by_period(&user.id, Period::Daily);
    assert_eq!(expenses.summary().unwrap().total_expenses, 3.0);
    assert_eq!(expenses.period_series().len(), 1);
    assert!(!expenses.is_loading());

    session.logout().unwrap();

    assert!(session.user().is_none());
    let state = session.expenses().state();
    assert!(state.is_loading);
    assert!(state.paginated.is_none());
    assert!(state.period_series.is_empty());
    assert!(state.summary.is_none());
}

#[test]
fn test_calendar_day_survives_the_backend() {
    let store = ExpenseStore::new(ClientConfig::default(), MemoryBackend::new());
    let created = store.add(&input("1", "2024-12-31")).unwrap().unwrap();
    assert_eq!(created.date, NaiveDate::from_ymd_opt(2024, 12, 31).unwrap());
}
