//! Expense tags.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A category tag attached to an expense.
///
/// The set of tags is closed; the backend rejects anything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpenseTag {
    /// Groceries, restaurants.
    Food,
    /// Fuel, fares, parking.
    Transportation,
    /// Movies, games, events.
    Entertainment,
    /// Medicine, insurance, fitness.
    Health,
    /// Rent, mortgage, repairs.
    Housing,
    /// Power, water, internet.
    Utilities,
    /// Tuition, books, courses.
    Education,
    /// Clothes and general purchases.
    Shopping,
    /// Money moved to savings.
    Savings,
    /// Money moved to investments.
    Investment,
    /// Anything else.
    Other,
}

impl ExpenseTag {
    /// All tags in display order.
    pub const ALL: [ExpenseTag; 11] = [
        ExpenseTag::Food,
        ExpenseTag::Transportation,
        ExpenseTag::Entertainment,
        ExpenseTag::Health,
        ExpenseTag::Housing,
        ExpenseTag::Utilities,
        ExpenseTag::Education,
        ExpenseTag::Shopping,
        ExpenseTag::Savings,
        ExpenseTag::Investment,
        ExpenseTag::Other,
    ];

    /// Returns the wire name of the tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            ExpenseTag::Food => "food",
            ExpenseTag::Transportation => "transportation",
            ExpenseTag::Entertainment => "entertainment",
            ExpenseTag::Health => "health",
            ExpenseTag::Housing => "housing",
            ExpenseTag::Utilities => "utilities",
            ExpenseTag::Education => "education",
            ExpenseTag::Shopping => "shopping",
            ExpenseTag::Savings => "savings",
            ExpenseTag::Investment => "investment",
            ExpenseTag::Other => "other",
        }
    }

    /// Returns the human-readable label ("Food", "Transportation", ...).
    pub fn label(&self) -> String {
        let name = self.as_str();
        let mut chars = name.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

impl fmt::Display for ExpenseTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing a tag name outside the enumeration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown expense tag: {0:?}")]
pub struct UnknownTag(pub String);

impl FromStr for ExpenseTag {
    type Err = UnknownTag;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ExpenseTag::ALL
            .iter()
            .copied()
            .find(|tag| tag.as_str() == s)
            .ok_or_else(|| UnknownTag(s.to_string()))
    }
}
