//! Shared data model for the budget tracker.
//!
//! These types travel between the storage layer and the presentation layer:
//! income and expense entries, the drafts that become entries, the fixed
//! expense category set, and the derived totals the summary views render.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fixed set of expense categories. Stored by name, so the serde
/// representation is the plain variant string (e.g. `"Housing"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    Housing,
    Food,
    Transport,
    Utilities,
    Health,
    Entertainment,
    Other,
}

impl Category {
    /// Every category, in display order.
    pub const ALL: [Category; 7] = [
        Category::Housing,
        Category::Food,
        Category::Transport,
        Category::Utilities,
        Category::Health,
        Category::Entertainment,
        Category::Other,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Category::Housing => "Housing",
            Category::Food => "Food",
            Category::Transport => "Transport",
            Category::Utilities => "Utilities",
            Category::Health => "Health",
            Category::Entertainment => "Entertainment",
            Category::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .iter()
            .copied()
            .find(|c| c.name() == s)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

/// A category name outside the fixed set.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("unknown category: {0}")]
pub struct UnknownCategory(pub String);

/// Opaque entry identifier. Income ids and expense ids are independent
/// namespaces; two entries of different kinds may carry the same id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntryId(String);

impl EntryId {
    pub fn new(id: impl Into<String>) -> Self {
        EntryId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Which of the two entry collections a command targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Income,
    Expense,
}

impl EntryKind {
    pub fn label(&self) -> &'static str {
        match self {
            EntryKind::Income => "income",
            EntryKind::Expense => "expense",
        }
    }
}

/// A recorded income entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomeEntry {
    pub id: EntryId,
    /// Where the money came from (non-empty).
    pub source: String,
    /// Always strictly positive.
    pub amount: Decimal,
    /// Calendar date, no time component.
    pub date: NaiveDate,
}

/// A recorded expense entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseEntry {
    pub id: EntryId,
    /// What the money was spent on (non-empty).
    pub name: String,
    /// Always strictly positive.
    pub amount: Decimal,
    /// Calendar date, no time component.
    pub date: NaiveDate,
    pub category: Category,
}

/// Draft of an income entry, before the store assigns an id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewIncome {
    pub source: String,
    pub amount: Decimal,
    pub date: NaiveDate,
}

/// Draft of an expense entry, before the store assigns an id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewExpense {
    pub name: String,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub category: Category,
}

/// A draft of either kind, for the `add_item` command surface.
#[derive(Debug, Clone, PartialEq)]
pub enum EntryDraft {
    Income(NewIncome),
    Expense(NewExpense),
}

impl EntryDraft {
    pub fn kind(&self) -> EntryKind {
        match self {
            EntryDraft::Income(_) => EntryKind::Income,
            EntryDraft::Expense(_) => EntryKind::Expense,
        }
    }
}

/// Why a draft was rejected before reaching the store.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("income source must not be empty")]
    EmptySource,
    #[error("expense name must not be empty")]
    EmptyName,
    #[error("amount must be a number: {0:?}")]
    InvalidAmount(String),
    #[error("amount must be greater than zero")]
    AmountNotPositive,
    #[error("date must be a valid calendar date (YYYY-MM-DD): {0:?}")]
    InvalidDate(String),
    #[error(transparent)]
    UnknownCategory(#[from] UnknownCategory),
}

/// Parse a raw amount field into a positive currency amount (2 decimal
/// places).
pub fn parse_amount(input: &str) -> Result<Decimal, ValidationError> {
    let trimmed = input.trim();
    let amount = Decimal::from_str(trimmed)
        .map_err(|_| ValidationError::InvalidAmount(trimmed.to_string()))?;
    if amount <= Decimal::ZERO {
        return Err(ValidationError::AmountNotPositive);
    }
    Ok(amount.round_dp(2))
}

/// Parse a raw date field (ISO 8601, date only).
pub fn parse_date(input: &str) -> Result<NaiveDate, ValidationError> {
    let trimmed = input.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map_err(|_| ValidationError::InvalidDate(trimmed.to_string()))
}

impl NewIncome {
    /// Build a validated draft from raw form fields.
    pub fn parse(source: &str, amount: &str, date: &str) -> Result<Self, ValidationError> {
        let source = source.trim();
        if source.is_empty() {
            return Err(ValidationError::EmptySource);
        }
        Ok(NewIncome {
            source: source.to_string(),
            amount: parse_amount(amount)?,
            date: parse_date(date)?,
        })
    }

    /// Re-check the invariants on an already-built draft.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.source.trim().is_empty() {
            return Err(ValidationError::EmptySource);
        }
        if self.amount <= Decimal::ZERO {
            return Err(ValidationError::AmountNotPositive);
        }
        Ok(())
    }
}

impl NewExpense {
    /// Build a validated draft from raw form fields.
    pub fn parse(
        name: &str,
        amount: &str,
        date: &str,
        category: &str,
    ) -> Result<Self, ValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        Ok(NewExpense {
            name: name.to_string(),
            amount: parse_amount(amount)?,
            date: parse_date(date)?,
            category: category.parse()?,
        })
    }

    /// Re-check the invariants on an already-built draft.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName);
        }
        if self.amount <= Decimal::ZERO {
            return Err(ValidationError::AmountNotPositive);
        }
        Ok(())
    }
}

/// Opaque reference to an authenticated user.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        UserId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An authenticated user's identity for the lifetime of a sign-in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub user_id: UserId,
    pub email: String,
}

/// Aggregate values derived from the current entry collections. Never
/// persisted; recomputed from scratch on every change.
#[derive(Debug, Clone, PartialEq)]
pub struct Totals {
    pub total_income: Decimal,
    pub total_expenses: Decimal,
    /// `total_income - total_expenses`, exact.
    pub balance: Decimal,
    /// Every category from the fixed set is present, zero when unused.
    pub category_totals: BTreeMap<Category, Decimal>,
}

impl Default for Totals {
    fn default() -> Self {
        let category_totals = Category::ALL
            .iter()
            .map(|c| (*c, Decimal::ZERO))
            .collect();
        Totals {
            total_income: Decimal::ZERO,
            total_expenses: Decimal::ZERO,
            balance: Decimal::ZERO,
            category_totals,
        }
    }
}

impl Totals {
    pub fn category_total(&self, category: Category) -> Decimal {
        self.category_totals
            .get(&category)
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    /// Share of total expenses for a category, in percent. Zero when there
    /// are no expenses, so bar segments collapse instead of dividing by zero.
    pub fn category_percentage(&self, category: Category) -> f32 {
        if self.total_expenses.is_zero() {
            return 0.0;
        }
        let ratio = self.category_total(category) / self.total_expenses;
        ratio.to_f32().unwrap_or(0.0) * 100.0
    }
}
