//! Configuration for the expense client.

use expensedash_model::DEFAULT_PER_PAGE;
use std::time::Duration;

/// Environment variable holding the backend base URL.
pub const BACKEND_URL_ENV: &str = "EXPENSEDASH_BACKEND_URL";

/// Environment variable overriding the default page size.
pub const PER_PAGE_ENV: &str = "EXPENSEDASH_PER_PAGE";

/// What a write operation does when the backend call fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WriteFailureMode {
    /// Log the failure and report "not applied" without an error.
    #[default]
    Silent,
    /// Return the error to the caller.
    Surface,
}

/// Configuration for the client and its stores.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend base URL, without a trailing slash.
    pub base_url: String,
    /// Page size used when a write creates the first paginated view.
    pub default_per_page: u32,
    /// Request timeout.
    pub timeout: Duration,
    /// Write failure reporting.
    pub write_failure_mode: WriteFailureMode,
}

impl ClientConfig {
    /// Creates a new configuration.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            default_per_page: DEFAULT_PER_PAGE,
            timeout: Duration::from_secs(30),
            write_failure_mode: WriteFailureMode::default(),
        }
    }

    /// Reads the base URL and page size from the environment.
    ///
    /// A missing URL yields an empty base, so requests go to relative paths.
    pub fn from_env() -> Self {
        let base_url = std::env::var(BACKEND_URL_ENV).unwrap_or_default();
        let mut config = Self::new(base_url);
        if let Some(per_page) = std::env::var(PER_PAGE_ENV)
            .ok()
            .and_then(|v| v.trim().parse::<u32>().ok())
        {
            config = config.with_default_per_page(per_page);
        }
        config
    }

    /// Sets the default page size (at least 1).
    pub fn with_default_per_page(mut self, per_page: u32) -> Self {
        self.default_per_page = per_page.max(1);
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the write failure mode.
    pub fn with_write_failure_mode(mut self, mode: WriteFailureMode) -> Self {
        self.write_failure_mode = mode;
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new("")
    }
}
