//! # expensedash client
//!
//! REST transport and client-side state for the expense dashboard.
//!
//! This crate provides:
//! - `ExpenseStore`: paginated expenses, chart series and rollup summary,
//!   patched optimistically after successful writes
//! - `SessionStore`: the signed-in user and the lifecycle of its store
//! - `ExpenseTransport` abstraction with an HTTP implementation
//! - `MockTransport` for tests
//!
//! ## Architecture
//!
//! Every write is **write-through**:
//! 1. Send the write to the backend
//! 2. Only if the backend accepted it, patch the local projection
//!
//! Reads replace a whole state slot. Each slot carries a generation token
//! so that a response to an older request never overwrites the response to
//! a newer one.
//!
//! ## Key Invariants
//!
//! - The backend is authoritative
//! - A failed write never changes local state
//! - Readers never observe a half-applied update
//! - Read failures degrade to empty state, they are not returned

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod generation;
mod http;
#[cfg(feature = "reqwest-client")]
mod reqwest_client;
mod session;
mod store;
mod transport;

pub use config::{ClientConfig, WriteFailureMode, BACKEND_URL_ENV, PER_PAGE_ENV};
pub use error::{ClientError, ClientResult};
pub use http::{HttpClient, HttpMethod, HttpRequest, HttpResponse, HttpTransport};
#[cfg(feature = "reqwest-client")]
pub use reqwest_client::ReqwestClient;
pub use session::{SessionStore, UserState};
pub use store::{ExpenseState, ExpenseStore};
pub use transport::{ExpenseTransport, MockCall, MockTransport};

pub use expensedash_model as model;
