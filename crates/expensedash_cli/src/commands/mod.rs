//! CLI command implementations.

pub mod label;
pub mod list;
pub mod series;
pub mod session;
pub mod summary;
pub mod write;

use clap::{Args, ValueEnum};
use expensedash_client::{ClientConfig, HttpTransport, ReqwestClient, SessionStore};
use expensedash_model::{ExpenseForm, ExpenseInput};
use serde::Serialize;
use thiserror::Error;

/// Transport used by every command.
pub type Backend = HttpTransport<ReqwestClient>;

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text.
    Text,
    /// Pretty-printed JSON.
    Json,
}

/// Errors reported by commands on top of client errors.
#[derive(Debug, Error)]
pub enum CommandError {
    /// The backend did not return data for a read.
    #[error("no {0} available (run with --verbose for details)")]
    Unavailable(&'static str),
    /// A write was rejected by the backend and not applied.
    #[error("{0} was not applied by the backend")]
    NotApplied(&'static str),
    /// No session cookie or the cookie was rejected.
    #[error("not signed in")]
    NotSignedIn,
}

/// Shared command state.
pub struct Context {
    /// Session and expense stores.
    pub session: SessionStore<Backend>,
    /// Output format.
    pub format: OutputFormat,
}

impl Context {
    /// Builds the HTTP stack and the stores.
    pub fn connect(
        config: ClientConfig,
        cookie: Option<&str>,
        format: OutputFormat,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let client = ReqwestClient::new(&config)?;
        let mut transport = HttpTransport::new(config.base_url.clone(), client);
        if let Some(cookie) = cookie {
            transport = transport.with_header("Cookie", cookie);
        }
        Ok(Self {
            session: SessionStore::new(config, transport),
            format,
        })
    }

    /// Prints `value` as JSON, or the text rendering.
    pub fn emit<T: Serialize>(
        &self,
        value: &T,
        text: impl FnOnce(&T) -> String,
    ) -> Result<(), Box<dyn std::error::Error>> {
        match self.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(value)?),
            OutputFormat::Text => println!("{}", text(value)),
        }
        Ok(())
    }
}

/// Expense fields shared by `add` and `edit`.
#[derive(Debug, Clone, Args)]
pub struct ExpenseArgs {
    /// Amount, greater than zero
    #[arg(short, long)]
    pub amount: String,

    /// Tag (repeatable), e.g. food, housing
    #[arg(short, long = "tag", required = true)]
    pub tags: Vec<String>,

    /// Calendar day (YYYY-MM-DD)
    #[arg(short, long)]
    pub date: String,

    /// Optional description
    #[arg(long)]
    pub description: Option<String>,
}

impl ExpenseArgs {
    /// Validates the arguments into a request body.
    pub fn to_input(&self) -> Result<ExpenseInput, expensedash_model::ValidationErrors> {
        let mut form = ExpenseForm::new()
            .with_amount(self.amount.as_str())
            .with_date(self.date.as_str());
        for tag in &self.tags {
            form = form.with_tag(tag.as_str());
        }
        if let Some(description) = &self.description {
            form = form.with_description(description.as_str());
        }
        form.validate()
    }
}

/// Formats an amount with two decimals.
pub fn money(amount: f64) -> String {
    format!("{amount:.2}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use expensedash_model::{ExpenseTag, FormField};

    fn args(amount: &str, tags: &[&str]) -> ExpenseArgs {
        ExpenseArgs {
            amount: amount.into(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            date: "2024-03-05".into(),
            description: Some("Lunch".into()),
        }
    }

    #[test]
    fn args_validate_into_input() {
        let input = args("12.5", &["food", "health"]).to_input().unwrap();
        assert_eq!(input.amount(), 12.5);
        assert_eq!(input.tags(), &[ExpenseTag::Food, ExpenseTag::Health]);
        assert_eq!(input.description(), Some("Lunch"));
    }

    #[test]
    fn invalid_args_report_fields() {
        let errors = args("0", &["snacks"]).to_input().unwrap_err();
        assert!(errors.message_for(FormField::Amount).is_some());
        assert!(errors.message_for(FormField::Tags).is_some());
    }

    #[test]
    fn money_has_two_decimals() {
        assert_eq!(money(3.0), "3.00");
        assert_eq!(money(12.346), "12.35");
    }
}
