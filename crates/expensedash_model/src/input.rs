//! Expense form validation.
//!
//! Every write goes through `ExpenseInput`, and the only way to build one
//! is through the rules in this module. A form that fails validation never
//! reaches the network.

use crate::error::ValidationErrors;
use crate::expense::{calendar_day, parse_calendar_day, Expense};
use crate::tag::ExpenseTag;
use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;

const AMOUNT_REQUIRED: &str = "Required.";
const AMOUNT_INVALID: &str = "Must be a valid number > than 0.";
const TAGS_REQUIRED: &str = "Tags must contain at least one tag.";
const DATE_REQUIRED: &str = "Date is required.";
const DATE_INVALID: &str = "Date must be a calendar day (YYYY-MM-DD).";

/// Fields of the expense form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    /// Amount text box.
    Amount,
    /// Tag multi-select.
    Tags,
    /// Date picker.
    Date,
}

impl FormField {
    /// Returns the field name.
    pub fn as_str(&self) -> &'static str {
        match self {
            FormField::Amount => "amount",
            FormField::Tags => "tags",
            FormField::Date => "date",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw, unvalidated form contents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpenseForm {
    /// Amount as typed.
    pub amount: String,
    /// Selected tag names.
    pub tags: Vec<String>,
    /// Date as picked.
    pub date: String,
    /// Optional description.
    pub description: Option<String>,
}

impl ExpenseForm {
    /// Creates an empty form.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the amount text.
    pub fn with_amount(mut self, amount: impl Into<String>) -> Self {
        self.amount = amount.into();
        self
    }

    /// Adds a tag name.
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Sets the date text.
    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = date.into();
        self
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Checks every field and returns either a request-ready input or all
    /// failed rules.
    pub fn validate(&self) -> Result<ExpenseInput, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let amount = validate_amount(&self.amount, &mut errors);

        let mut tags = Vec::with_capacity(self.tags.len());
        for name in &self.tags {
            match name.trim().parse::<ExpenseTag>() {
                Ok(tag) => tags.push(tag),
                Err(_) => errors.push(FormField::Tags, format!("Invalid tag {:?}.", name)),
            }
        }
        if self.tags.is_empty() {
            errors.push(FormField::Tags, TAGS_REQUIRED);
        }

        let date = validate_date(&self.date, &mut errors);

        match (amount, date) {
            (Some(amount), Some(date)) if errors.is_empty() => Ok(ExpenseInput {
                amount,
                tags: dedup_tags(tags),
                date,
                description: self.description.clone(),
            }),
            _ => Err(errors),
        }
    }
}

impl From<&Expense> for ExpenseForm {
    /// Prefills an edit form from an existing expense.
    fn from(expense: &Expense) -> Self {
        Self {
            amount: expense.amount.to_string(),
            tags: expense.tags.iter().map(|t| t.as_str().to_string()).collect(),
            date: expense.date.format(crate::DATE_FORMAT).to_string(),
            description: expense.description.clone(),
        }
    }
}

fn validate_amount(raw: &str, errors: &mut ValidationErrors) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        errors.push(FormField::Amount, AMOUNT_REQUIRED);
        return None;
    }
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() && value > 0.0 => Some(value),
        _ => {
            errors.push(FormField::Amount, AMOUNT_INVALID);
            None
        }
    }
}

fn validate_date(raw: &str, errors: &mut ValidationErrors) -> Option<NaiveDate> {
    if raw.trim().is_empty() {
        errors.push(FormField::Date, DATE_REQUIRED);
        return None;
    }
    let day = parse_calendar_day(raw);
    if day.is_none() {
        errors.push(FormField::Date, DATE_INVALID);
    }
    day
}

fn dedup_tags(tags: Vec<ExpenseTag>) -> Vec<ExpenseTag> {
    let mut seen = Vec::with_capacity(tags.len());
    for tag in tags {
        if !seen.contains(&tag) {
            seen.push(tag);
        }
    }
    seen
}

/// A validated expense, ready to be sent as a POST or PUT body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpenseInput {
    amount: f64,
    tags: Vec<ExpenseTag>,
    #[serde(with = "calendar_day")]
    date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
}

impl ExpenseInput {
    /// Builds an input from already typed values, applying the same rules
    /// as the form.
    pub fn new(
        amount: f64,
        tags: impl IntoIterator<Item = ExpenseTag>,
        date: NaiveDate,
        description: Option<String>,
    ) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if !(amount.is_finite() && amount > 0.0) {
            errors.push(FormField::Amount, AMOUNT_INVALID);
        }
        let tags = dedup_tags(tags.into_iter().collect());
        if tags.is_empty() {
            errors.push(FormField::Tags, TAGS_REQUIRED);
        }
        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(Self {
            amount,
            tags,
            date,
            description,
        })
    }

    /// Returns the amount.
    pub fn amount(&self) -> f64 {
        self.amount
    }

    /// Returns the tags.
    pub fn tags(&self) -> &[ExpenseTag] {
        &self.tags
    }

    /// Returns the date.
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Returns the description.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}
