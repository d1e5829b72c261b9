//! # Lending
//!
//! The item state machine: eligibility, checkout, check-in and fine math.
//!
//! ## State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │        ┌─────────────┐      checkout       ┌─────────────┐             │
//! │        │  Available  │ ──────────────────► │  Borrowed   │             │
//! │        │  loan: None │ ◄────────────────── │  loan: Some │             │
//! │        └─────────────┘      check_in       └─────────────┘             │
//! │                                                                         │
//! │  checkout on Borrowed  → NotEligible { ItemUnavailable }               │
//! │  check_in on Available → NotBorrowed                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Atomicity
//! Checkout and check-in take the item and the patron by `&mut` and update
//! both before returning. Every precondition is verified before the first
//! write, so an error leaves both untouched.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult, Ineligibility, ValidationError};
use crate::money::Money;
use crate::policy;
use crate::types::{Item, Loan, Patron};

// =============================================================================
// Outcomes
// =============================================================================

/// Result of a successful checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutReceipt {
    pub item_id: String,
    pub patron_id: String,
    #[ts(as = "String")]
    pub borrowed_on: DateTime<Utc>,
    #[ts(as = "String")]
    pub due_on: DateTime<Utc>,
}

/// Result of a successful check-in.
///
/// The fine is informational; nothing in the core collects it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ReturnOutcome {
    pub item_id: String,
    pub patron_id: String,
    #[ts(as = "String")]
    pub returned_on: DateTime<Utc>,
    /// `true` when the item came back after its due date.
    pub overdue: bool,
    /// Charged days, zero when on time.
    pub overdue_days: u32,
    /// Fine owed, zero when on time.
    pub fine: Money,
}

// =============================================================================
// Fine Math
// =============================================================================

/// Number of charged overdue days.
///
/// Zero when `as_of` is not after `due_on`. Otherwise the whole days elapsed
/// since the due date, with a minimum of one: an item that is late by an hour
/// is charged a full day.
pub fn overdue_days(due_on: DateTime<Utc>, as_of: DateTime<Utc>) -> u32 {
    if as_of <= due_on {
        return 0;
    }
    let whole_days = (as_of - due_on).num_days().max(1);
    u32::try_from(whole_days).unwrap_or(u32::MAX)
}

/// Computes the due date for a loan starting at `borrowed_on`.
fn due_date(borrowed_on: DateTime<Utc>, days: u32) -> CoreResult<DateTime<Utc>> {
    borrowed_on
        .checked_add_signed(Duration::days(i64::from(days)))
        .ok_or_else(|| {
            ValidationError::InvalidFormat {
                field: "borrowed_on".to_string(),
                reason: "due date is out of range".to_string(),
            }
            .into()
        })
}

// =============================================================================
// Item Lending Operations
// =============================================================================

impl Item {
    /// Checks whether `patron` may borrow this item right now.
    ///
    /// ## Rules (first failure wins)
    /// 1. The item must be available
    /// 2. Students may not borrow reference items
    /// 3. The patron must be under the role's borrow limit
    pub fn check_eligibility(&self, patron: &Patron) -> Result<(), Ineligibility> {
        if !self.is_available() {
            return Err(Ineligibility::ItemUnavailable);
        }

        if !policy::role_may_borrow(self.category, patron.role()) {
            return Err(Ineligibility::RoleRestricted {
                category: self.category,
                role: patron.role(),
            });
        }

        if patron.has_reached_borrow_limit() {
            return Err(Ineligibility::BorrowLimitReached {
                limit: patron.max_borrow_limit(),
            });
        }

        Ok(())
    }

    /// `true` when `patron` may borrow this item right now.
    #[inline]
    pub fn can_borrow(&self, patron: &Patron) -> bool {
        self.check_eligibility(patron).is_ok()
    }

    /// Lends this item to `patron`.
    ///
    /// Re-runs the full eligibility check, including the patron's capacity,
    /// then records the loan on the item and increments the patron's count.
    ///
    /// ## Errors
    /// - `CoreError::NotEligible` with the first failing [`Ineligibility`]
    /// - `CoreError::Validation` if the due date overflows the calendar
    pub fn checkout(
        &mut self,
        patron: &mut Patron,
        borrowed_on: DateTime<Utc>,
    ) -> CoreResult<CheckoutReceipt> {
        self.check_eligibility(patron)
            .map_err(|reason| CoreError::NotEligible {
                item_id: self.id().to_string(),
                patron_id: patron.id().to_string(),
                reason,
            })?;

        let days = policy::loan_days(self.category, patron.role());
        let due_on = due_date(borrowed_on, days)?;

        self.start_loan(Loan {
            borrower_id: patron.id().to_string(),
            borrowed_on,
            due_on,
        });
        patron.record_loan();

        Ok(CheckoutReceipt {
            item_id: self.id().to_string(),
            patron_id: patron.id().to_string(),
            borrowed_on,
            due_on,
        })
    }

    /// Takes this item back from `patron`.
    ///
    /// Computes whether the return is late and the fine owed, clears the
    /// loan and decrements the patron's count (never below zero).
    ///
    /// ## Errors
    /// - `CoreError::NotBorrowed` if the item is available
    /// - `CoreError::BorrowerMismatch` if `patron` is not the borrower
    pub fn check_in(
        &mut self,
        patron: &mut Patron,
        returned_on: DateTime<Utc>,
    ) -> CoreResult<ReturnOutcome> {
        let loan = match self.loan() {
            Some(loan) => loan,
            None => {
                return Err(CoreError::NotBorrowed {
                    item_id: self.id().to_string(),
                })
            }
        };

        if loan.borrower_id != patron.id() {
            return Err(CoreError::BorrowerMismatch {
                item_id: self.id().to_string(),
                borrower_id: loan.borrower_id.clone(),
                patron_id: patron.id().to_string(),
            });
        }

        let days = overdue_days(loan.due_on, returned_on);
        let fine = policy::daily_fine_rate(self.category).fine_for(days);

        self.end_loan();
        patron.record_return();

        Ok(ReturnOutcome {
            item_id: self.id().to_string(),
            patron_id: patron.id().to_string(),
            returned_on,
            overdue: days > 0,
            overdue_days: days,
            fine,
        })
    }

    /// `true` when the item is on loan and `as_of` is after its due date.
    pub fn is_overdue(&self, as_of: DateTime<Utc>) -> bool {
        self.due_on().is_some_and(|due_on| as_of > due_on)
    }

    /// Charged overdue days if the item were returned at `as_of`.
    pub fn overdue_days(&self, as_of: DateTime<Utc>) -> u32 {
        self.due_on()
            .map(|due_on| overdue_days(due_on, as_of))
            .unwrap_or(0)
    }

    /// Fine accrued so far, without returning the item.
    ///
    /// Zero for available items and loans that are not yet late.
    pub fn accrued_fine(&self, as_of: DateTime<Utc>) -> Money {
        policy::daily_fine_rate(self.category).fine_for(self.overdue_days(as_of))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
