//! Financial movement domain model and period arithmetic.
//!
//! # Responsibility
//! - Define income/expense records and the balance summary.
//! - Compute half-open date ranges for month/year reports.
//!
//! # Invariants
//! - `amount` is finite and non-negative; the sign comes from `kind`.
//! - A period range is `[start, end)` with `start` on the first of a month.
//! - A month without a year resolves to year 1900.

use crate::model::{new_record_id, RecordId};
use crate::validation::{validate_amount, ValidationError};
use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Year used when a period names a month but no year.
pub const DEFAULT_PERIOD_YEAR: i32 = 1900;

/// Direction of a financial movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovementKind {
    Income,
    Expense,
}

impl MovementKind {
    pub const ALL: [MovementKind; 2] = [Self::Income, Self::Expense];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "income" => Some(Self::Income),
            "expense" => Some(Self::Expense),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Income => "Income",
            Self::Expense => "Expense",
        }
    }
}

impl Display for MovementKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Income or expense entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialMovement {
    pub id: RecordId,
    #[serde(rename = "type")]
    pub kind: MovementKind,
    pub description: String,
    pub amount: f64,
    pub date: NaiveDate,
    /// Optional client name cached at creation.
    pub client_name: Option<String>,
}

/// Form input for creating or replacing a movement.
#[derive(Debug, Clone, PartialEq)]
pub struct MovementDraft {
    pub kind: MovementKind,
    pub description: String,
    pub amount: f64,
    pub date: NaiveDate,
}

impl FinancialMovement {
    pub fn from_draft(draft: MovementDraft, client_name: Option<String>) -> Self {
        Self {
            id: new_record_id(),
            kind: draft.kind,
            description: draft.description,
            amount: draft.amount,
            date: draft.date,
            client_name,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_amount(self.amount)
    }

    /// Replaces type, description, amount and date. The cached client is kept.
    pub fn replace(&mut self, draft: MovementDraft) {
        self.kind = draft.kind;
        self.description = draft.description;
        self.amount = draft.amount;
        self.date = draft.date;
    }
}

/// Half-open calendar range `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Resolves a report period.
    ///
    /// - month + year: that month.
    /// - year only: the whole year.
    /// - month only: that month of [`DEFAULT_PERIOD_YEAR`].
    /// - neither: `None` (no date restriction).
    pub fn for_period(
        year: Option<i32>,
        month: Option<u32>,
    ) -> Result<Option<DateRange>, ValidationError> {
        if year.is_none() && month.is_none() {
            return Ok(None);
        }

        let resolved_year = year.unwrap_or(DEFAULT_PERIOD_YEAR);
        let start = NaiveDate::from_ymd_opt(resolved_year, month.unwrap_or(1), 1).ok_or_else(
            || match month {
                Some(value) if !(1..=12).contains(&value) => {
                    ValidationError::InvalidMonth(value.to_string())
                }
                _ => ValidationError::InvalidYear(resolved_year.to_string()),
            },
        )?;
        let span = if month.is_some() {
            Months::new(1)
        } else {
            Months::new(12)
        };
        let end = start
            .checked_add_months(span)
            .ok_or_else(|| ValidationError::InvalidYear(resolved_year.to_string()))?;

        Ok(Some(DateRange { start, end }))
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date < self.end
    }
}

/// Income/expense totals over a set of movements.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Balance {
    pub income: f64,
    pub expense: f64,
    /// `income - expense`.
    pub balance: f64,
}

impl Balance {
    pub fn from_movements<'a>(movements: impl IntoIterator<Item = &'a FinancialMovement>) -> Self {
        let (income, expense) =
            movements
                .into_iter()
                .fold((0.0, 0.0), |(income, expense), movement| match movement.kind {
                    MovementKind::Income => (income + movement.amount, expense),
                    MovementKind::Expense => (income, expense + movement.amount),
                });
        Self {
            income,
            expense,
            balance: income - expense,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn movement(kind: MovementKind, amount: f64) -> FinancialMovement {
        FinancialMovement::from_draft(
            MovementDraft {
                kind,
                description: "entry".to_string(),
                amount,
                date: ymd(2025, 1, 1),
            },
            None,
        )
    }

    #[test]
    fn month_and_year_span_one_month() {
        let range = DateRange::for_period(Some(2025), Some(3)).unwrap().unwrap();
        assert_eq!(range.start, ymd(2025, 3, 1));
        assert_eq!(range.end, ymd(2025, 4, 1));
        assert!(range.contains(ymd(2025, 3, 31)));
        assert!(!range.contains(ymd(2025, 4, 1)));
    }

    #[test]
    fn december_rolls_into_next_year() {
        let range = DateRange::for_period(Some(2024), Some(12)).unwrap().unwrap();
        assert_eq!(range.end, ymd(2025, 1, 1));
    }

    #[test]
    fn year_only_spans_whole_year() {
        let range = DateRange::for_period(Some(2025), None).unwrap().unwrap();
        assert_eq!(range.start, ymd(2025, 1, 1));
        assert_eq!(range.end, ymd(2026, 1, 1));
    }

    #[test]
    fn month_only_defaults_to_1900() {
        let range = DateRange::for_period(None, Some(5)).unwrap().unwrap();
        assert_eq!(range.start, ymd(1900, 5, 1));
        assert_eq!(range.end, ymd(1900, 6, 1));
    }

    #[test]
    fn no_period_means_no_range() {
        assert_eq!(DateRange::for_period(None, None).unwrap(), None);
    }

    #[test]
    fn out_of_range_month_is_rejected() {
        assert!(matches!(
            DateRange::for_period(Some(2025), Some(13)),
            Err(ValidationError::InvalidMonth(_))
        ));
    }

    #[test]
    fn balance_subtracts_expenses_from_income() {
        let entries = vec![
            movement(MovementKind::Income, 1000.0),
            movement(MovementKind::Income, 250.5),
            movement(MovementKind::Expense, 300.0),
        ];
        let balance = Balance::from_movements(&entries);
        assert_eq!(balance.income, 1250.5);
        assert_eq!(balance.expense, 300.0);
        assert_eq!(balance.balance, 950.5);
        let empty: Vec<FinancialMovement> = Vec::new();
        assert_eq!(Balance::from_movements(&empty), Balance::default());
    }
}
