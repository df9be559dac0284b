//! Signed-in user state.

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::generation::Generation;
use crate::store::ExpenseStore;
use crate::transport::ExpenseTransport;
use expensedash_model::User;
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// The signed-in user, if any.
#[derive(Debug, Clone, PartialEq)]
pub struct UserState {
    /// `None` until `fetch_user` succeeds, and after logout.
    pub user: Option<User>,
    /// True while `fetch_user` is outstanding, and before the first one.
    pub is_loading: bool,
}

impl Default for UserState {
    fn default() -> Self {
        Self {
            user: None,
            is_loading: true,
        }
    }
}

/// Owns the session lifecycle and the expense store bound to it.
///
/// `fetch_user` responses that arrive after a newer `fetch_user` or after
/// `logout` are dropped, so a late answer never signs the session back in.
pub struct SessionStore<T: ExpenseTransport> {
    transport: Arc<T>,
    state: RwLock<UserState>,
    user_generation: Generation,
    expenses: ExpenseStore<T>,
}

impl<T: ExpenseTransport> SessionStore<T> {
    /// Creates a session store and its expense store on one transport.
    pub fn new(config: ClientConfig, transport: T) -> Self {
        let transport = Arc::new(transport);
        Self {
            expenses: ExpenseStore::with_shared_transport(config, Arc::clone(&transport)),
            transport,
            state: RwLock::new(UserState::default()),
            user_generation: Generation::new(),
        }
    }

    /// Returns a snapshot of the user state.
    pub fn state(&self) -> UserState {
        self.state.read().clone()
    }

    /// Returns the signed-in user.
    pub fn user(&self) -> Option<User> {
        self.state.read().user.clone()
    }

    /// Returns the signed-in user's id.
    pub fn user_id(&self) -> Option<String> {
        self.state.read().user.as_ref().map(|u| u.id.clone())
    }

    /// Returns true while `fetch_user` is outstanding, and before the first one.
    pub fn is_loading(&self) -> bool {
        self.state.read().is_loading
    }

    /// Returns the expense store of this session.
    pub fn expenses(&self) -> &ExpenseStore<T> {
        &self.expenses
    }

    /// Asks the backend who is signed in.
    ///
    /// A rejected or failed request leaves the session signed out. A
    /// response overtaken by a newer `fetch_user` or by `logout` is dropped
    /// and the current user is returned instead.
    pub fn fetch_user(&self) -> Option<User> {
        let token = {
            let mut state = self.state.write();
            state.is_loading = true;
            self.user_generation.advance()
        };

        let result = self.transport.current_user();

        let mut state = self.state.write();
        if !self.user_generation.is_current(token) {
            debug!("dropping stale session user response");
            return state.user.clone();
        }
        state.user = match result {
            Ok(user) => {
                debug!(user_id = %user.id, "session user loaded");
                Some(user)
            }
            Err(e @ ClientError::Status { .. }) => {
                debug!(error = %e, "no signed-in user");
                None
            }
            Err(e) => {
                warn!(error = %e, "failed to fetch current user");
                None
            }
        };
        state.is_loading = false;
        state.user.clone()
    }

    /// Ends the session.
    ///
    /// Local state is torn down whether or not the backend call succeeds;
    /// the backend's result is returned so the caller can report it.
    pub fn logout(&self) -> ClientResult<()> {
        let result = self.transport.logout();
        if let Err(e) = &result {
            warn!(error = %e, "backend logout failed");
        }

        {
            let mut state = self.state.write();
            self.user_generation.advance();
            state.user = None;
            state.is_loading = false;
        }
        self.expenses.reset();
        info!("logged out");
        result
    }
}
