//! HTTP transport implementation.
//!
//! This module maps store operations onto the backend's REST routes. The
//! actual HTTP client is abstracted via a trait to allow different
//! implementations (reqwest, a browser fetch bridge, a test double).

use crate::error::{ClientError, ClientResult};
use crate::transport::ExpenseTransport;
use expensedash_model::{
    Expense, ExpenseInput, ExpenseSummary, PaginatedExpenseView, Period, PeriodBucket, User,
};
use parking_lot::RwLock;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;

/// Characters left unescaped in a path segment.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// HTTP request method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    /// GET.
    Get,
    /// POST.
    Post,
    /// PUT.
    Put,
    /// DELETE.
    Delete,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        })
    }
}

/// A request handed to the HTTP client.
///
/// Clients must send credentials (the session cookie) with every request.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    /// Method.
    pub method: HttpMethod,
    /// Absolute or base-relative URL.
    pub url: String,
    /// Extra headers.
    pub headers: Vec<(String, String)>,
    /// JSON body, if any.
    pub body: Option<Vec<u8>>,
}

/// A response returned by the HTTP client.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    /// Status code.
    pub status: u16,
    /// Raw body.
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Returns true for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// HTTP client abstraction.
///
/// Implement this trait to provide the actual HTTP transport. An `Err`
/// means the request never produced a response (DNS, connect, timeout).
pub trait HttpClient: Send + Sync {
    /// Sends a request and returns the response.
    fn send(&self, request: HttpRequest) -> Result<HttpResponse, String>;
}

/// REST transport over an `HttpClient`, with JSON bodies.
pub struct HttpTransport<C: HttpClient> {
    /// Base URL of the backend (e.g., "https://api.example.com").
    base_url: String,
    /// HTTP client implementation.
    client: C,
    /// Headers sent with every request.
    headers: Vec<(String, String)>,
    /// Last transport failure message.
    last_error: RwLock<Option<String>>,
}

impl<C: HttpClient> HttpTransport<C> {
    /// Creates a new HTTP transport.
    pub fn new(base_url: impl Into<String>, client: C) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
            headers: Vec::new(),
            last_error: RwLock::new(None),
        }
    }

    /// Adds a header sent with every request, e.g. a session `Cookie`.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Returns the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the HTTP client.
    pub fn client(&self) -> &C {
        &self.client
    }

    /// Returns the message of the last failed request, cleared by the next
    /// request that gets a response.
    pub fn last_error(&self) -> Option<String> {
        self.last_error.read().clone()
    }

    fn send(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<Vec<u8>>,
    ) -> ClientResult<HttpResponse> {
        let mut headers = self.headers.clone();
        if body.is_some() {
            headers.push(("Content-Type".to_string(), "application/json".to_string()));
        }
        let request = HttpRequest {
            method,
            url: format!("{}{}", self.base_url, path),
            headers,
            body,
        };

        tracing::debug!(%method, path, "sending request");
        let response = self.client.send(request).map_err(|e| {
            *self.last_error.write() = Some(e.clone());
            ClientError::transport_retryable(e)
        })?;
        *self.last_error.write() = None;

        if !response.is_success() {
            return Err(ClientError::Status {
                status: response.status,
                path: path.to_string(),
            });
        }
        Ok(response)
    }

    fn get_json<Res: DeserializeOwned>(&self, path: &str) -> ClientResult<Res> {
        let response = self.send(HttpMethod::Get, path, None)?;
        decode(path, &response.body)
    }

    fn send_json<Req: Serialize, Res: DeserializeOwned>(
        &self,
        method: HttpMethod,
        path: &str,
        body: &Req,
    ) -> ClientResult<Res> {
        let body = serde_json::to_vec(body).map_err(|e| ClientError::Encode(e.to_string()))?;
        let response = self.send(method, path, Some(body))?;
        decode(path, &response.body)
    }
}

fn decode<Res: DeserializeOwned>(path: &str, body: &[u8]) -> ClientResult<Res> {
    serde_json::from_slice(body).map_err(|e| ClientError::Decode {
        path: path.to_string(),
        message: e.to_string(),
    })
}

fn segment(value: &str) -> String {
    utf8_percent_encode(value, PATH_SEGMENT).to_string()
}

impl<C: HttpClient> ExpenseTransport for HttpTransport<C> {
    fn current_user(&self) -> ClientResult<User> {
        self.get_json("/api/auth/me")
    }

    fn logout(&self) -> ClientResult<()> {
        self.send(HttpMethod::Post, "/api/auth/logout", None)
            .map(|_| ())
    }

    fn expense_summary(&self, user_id: &str) -> ClientResult<ExpenseSummary> {
        self.get_json(&format!("/api/expenses/summary/user/{}", segment(user_id)))
    }

    fn expenses_by_period(&self, user_id: &str, period: Period) -> ClientResult<Vec<PeriodBucket>> {
        self.get_json(&format!(
            "/api/expenses/user/{}/{}",
            segment(user_id),
            period.as_str()
        ))
    }

    fn paginated_expenses(
        &self,
        user_id: &str,
        page: u32,
        per_page: u32,
    ) -> ClientResult<PaginatedExpenseView> {
        self.get_json(&format!(
            "/api/expenses/user/{}?page={}&limit={}",
            segment(user_id),
            page,
            per_page
        ))
    }

    fn create_expense(&self, input: &ExpenseInput) -> ClientResult<Expense> {
        self.send_json(HttpMethod::Post, "/api/expenses", input)
    }

    fn update_expense(&self, expense_id: &str, input: &ExpenseInput) -> ClientResult<Expense> {
        self.send_json(
            HttpMethod::Put,
            &format!("/api/expenses/{}", segment(expense_id)),
            input,
        )
    }

    fn delete_expense(&self, expense_id: &str) -> ClientResult<()> {
        self.send(
            HttpMethod::Delete,
            &format!("/api/expenses/{}", segment(expense_id)),
            None,
        )
        .map(|_| ())
    }
}
