//! Blocking reqwest implementation of `HttpClient`.

use crate::config::ClientConfig;
use crate::http::{HttpClient, HttpMethod, HttpRequest, HttpResponse};
use reqwest::blocking::Client;
use reqwest::Method;

/// Production HTTP client.
///
/// Keeps a cookie store so the session cookie set at login is sent with
/// every later request.
#[derive(Debug, Clone)]
pub struct ReqwestClient {
    inner: Client,
}

impl ReqwestClient {
    /// Builds a client with the configured timeout.
    pub fn new(config: &ClientConfig) -> Result<Self, String> {
        let inner = Client::builder()
            .cookie_store(true)
            .timeout(config.timeout)
            .user_agent(concat!("expensedash/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| e.to_string())?;
        Ok(Self { inner })
    }
}

impl HttpClient for ReqwestClient {
    fn send(&self, request: HttpRequest) -> Result<HttpResponse, String> {
        let method = match request.method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Delete => Method::DELETE,
        };

        let mut builder = self.inner.request(method, &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().map_err(|e| e.to_string())?;
        let status = response.status().as_u16();
        let body = response.bytes().map_err(|e| e.to_string())?.to_vec();
        Ok(HttpResponse { status, body })
    }
}
