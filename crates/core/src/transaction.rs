use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::category::CategoryId;
use super::message::ChatId;
use super::money::Money;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Front,
    Back,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecimalMark {
    Dot,
    Comma,
}

/// Where the amount token sat in the message and which decimal mark it used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AmountPosition {
    FrontDot,
    FrontComma,
    BackDot,
    BackComma,
}

impl AmountPosition {
    /// Candidates in the order they are tried.
    pub const PRIORITY: [AmountPosition; 4] = [
        AmountPosition::FrontDot,
        AmountPosition::FrontComma,
        AmountPosition::BackDot,
        AmountPosition::BackComma,
    ];

    pub fn side(self) -> Side {
        match self {
            AmountPosition::FrontDot | AmountPosition::FrontComma => Side::Front,
            AmountPosition::BackDot | AmountPosition::BackComma => Side::Back,
        }
    }

    pub fn mark(self) -> DecimalMark {
        match self {
            AmountPosition::FrontDot | AmountPosition::BackDot => DecimalMark::Dot,
            AmountPosition::FrontComma | AmountPosition::BackComma => DecimalMark::Comma,
        }
    }
}

impl fmt::Display for AmountPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AmountPosition::FrontDot => write!(f, "front_dot"),
            AmountPosition::FrontComma => write!(f, "front_comma"),
            AmountPosition::BackDot => write!(f, "back_dot"),
            AmountPosition::BackComma => write!(f, "back_comma"),
        }
    }
}

/// A message turned into a transaction, ready to be persisted by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedTransaction {
    pub chat: ChatId,
    pub amount: Money,
    pub description: String,
    /// `None` means uncategorized.
    pub category: Option<CategoryId>,
    pub position: AmountPosition,
    pub date: DateTime<Utc>,
}

impl ResolvedTransaction {
    pub fn is_categorized(&self) -> bool {
        self.category.is_some()
    }
}
