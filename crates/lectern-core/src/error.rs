//! # Error Types
//!
//! Domain-specific error types for lectern-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  lectern-core errors (this file)                                       │
//! │  ├── CoreError        - Lending rule violations                        │
//! │  ├── Ineligibility    - Why a borrow was refused                       │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  lectern-store errors (separate crate)                                 │
//! │  └── StoreError       - Lookup, uniqueness, capacity, config           │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → StoreError → front-end message    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Error Kinds and Codes
//! Every error maps onto a small, stable [`ErrorKind`] and a `LIB_xxxx`
//! code so the front-end can pick a message without matching on variants.

use std::fmt;

use thiserror::Error;

use crate::types::{ItemCategory, PatronRole};

// =============================================================================
// Error Kind
// =============================================================================

/// Coarse classification shared by every error in the workspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// An item or patron id is absent.
    NotFound,
    /// Insertion collided with an existing id.
    DuplicateId,
    /// Borrow preconditions are unmet.
    NotEligible,
    /// Check-in of an item that is not on loan.
    NotBorrowed,
    /// A repository insertion ceiling was reached.
    CapacityExceeded,
    /// Caller supplied malformed input.
    InvalidInput,
    /// The operation conflicts with existing loans.
    Conflict,
    /// Configuration or synchronization failure.
    Internal,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::NotFound => "not_found",
            ErrorKind::DuplicateId => "duplicate_id",
            ErrorKind::NotEligible => "not_eligible",
            ErrorKind::NotBorrowed => "not_borrowed",
            ErrorKind::CapacityExceeded => "capacity_exceeded",
            ErrorKind::InvalidInput => "invalid_input",
            ErrorKind::Conflict => "conflict",
            ErrorKind::Internal => "internal",
        };
        f.write_str(name)
    }
}

// =============================================================================
// Ineligibility
// =============================================================================

/// The reason a patron may not borrow an item.
///
/// Reasons are evaluated in declaration order; the first failing one is
/// reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Ineligibility {
    /// The item is already on loan.
    #[error("item is already on loan")]
    ItemUnavailable,

    /// The item's category is closed to the patron's role.
    ///
    /// ## When This Occurs
    /// - A student asks for a reference item
    #[error("{category} items cannot be borrowed by a {role}")]
    RoleRestricted {
        category: ItemCategory,
        role: PatronRole,
    },

    /// The patron already holds as many items as the role allows.
    #[error("borrow limit of {limit} reached")]
    BorrowLimitReached { limit: u32 },
}

impl Ineligibility {
    /// Stable error code for this refusal.
    pub fn code(&self) -> &'static str {
        match self {
            Ineligibility::ItemUnavailable => "LIB_2001",
            Ineligibility::BorrowLimitReached { .. } => "LIB_2002",
            Ineligibility::RoleRestricted { .. } => "LIB_2003",
        }
    }
}

// =============================================================================
// Core Error
// =============================================================================

/// Lending rule errors.
///
/// These errors represent business rule violations in the item state
/// machine. None of them leaves the item or the patron partially updated.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Borrow preconditions are unmet.
    ///
    /// ## User Workflow
    /// ```text
    /// Borrow "B004" as student "S001"
    ///      │
    ///      ▼
    /// Eligibility: B004 is a Reference item
    ///      │
    ///      ▼
    /// NotEligible { reason: RoleRestricted { Reference, Student } }
    ///      │
    ///      ▼
    /// UI shows: "reference items cannot be borrowed by a student"
    /// ```
    #[error("Item {item_id} cannot be borrowed by {patron_id}: {reason}")]
    NotEligible {
        item_id: String,
        patron_id: String,
        reason: Ineligibility,
    },

    /// Check-in was requested for an item that is not on loan.
    #[error("Item {item_id} is not currently borrowed")]
    NotBorrowed { item_id: String },

    /// Check-in was requested on behalf of someone other than the borrower.
    #[error("Item {item_id} is on loan to {borrower_id}, not {patron_id}")]
    BorrowerMismatch {
        item_id: String,
        borrower_id: String,
        patron_id: String,
    },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl CoreError {
    /// Returns the coarse error kind.
    pub fn kind(&self) -> ErrorKind {
        match self {
            CoreError::NotEligible { .. } => ErrorKind::NotEligible,
            CoreError::NotBorrowed { .. } => ErrorKind::NotBorrowed,
            CoreError::BorrowerMismatch { .. } => ErrorKind::Conflict,
            CoreError::Validation(_) => ErrorKind::InvalidInput,
        }
    }

    /// Returns the stable `LIB_xxxx` code.
    pub fn code(&self) -> &'static str {
        match self {
            CoreError::NotEligible { reason, .. } => reason.code(),
            CoreError::NotBorrowed { .. } => "LIB_2004",
            CoreError::BorrowerMismatch { .. } => "LIB_2005",
            CoreError::Validation(_) => "LIB_3001",
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised before an item or patron enters a repository.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Invalid format (e.g., id with spaces, malformed ISBN).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
