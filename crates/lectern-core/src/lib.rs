//! # lectern-core: Pure Circulation Logic for Lectern
//!
//! This crate is the **heart** of Lectern. It contains the item lifecycle,
//! the loan and fine policies and the validation rules as pure code with
//! zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Lectern Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                Front-end (menu / CLI, external)                 │   │
//! │  │    Find Item ──► Find Patron ──► Borrow ──► Return ──► Report   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 lectern-store (Library, repositories)           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ lectern-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │  policy   │  │  lending  │  │ validation│  │   │
//! │  │   │   Item    │  │ loan days │  │ checkout  │  │   rules   │  │   │
//! │  │   │  Patron   │  │fine rates │  │ check_in  │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO STORAGE • NO LOGGING • PURE FUNCTIONS             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Item, Patron, Loan, ItemCategory, PatronRole)
//! - [`policy`] - Loan duration, daily fine rate and borrow limit tables
//! - [`lending`] - The item state machine: eligibility, checkout, check-in
//! - [`money`] - Fine amounts in integer minor units
//! - [`error`] - Domain error types and error kinds
//! - [`validation`] - Input validation
//!
//! ## Example Usage
//!
//! ```rust
//! use chrono::{Duration, TimeZone, Utc};
//! use lectern_core::{Item, ItemCategory, Patron, PatronRole};
//!
//! let mut item = Item::new("B006", "The Three-Body Problem", ItemCategory::Fiction);
//! let mut patron = Patron::new("S001", "Wang Xiaoming", PatronRole::Student);
//!
//! let day0 = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();
//! let receipt = item.checkout(&mut patron, day0).unwrap();
//! assert_eq!(receipt.due_on, day0 + Duration::days(30));
//!
//! // Three days late: 3 × 0.50 = 1.50
//! let outcome = item.check_in(&mut patron, receipt.due_on + Duration::days(3)).unwrap();
//! assert!(outcome.overdue);
//! assert_eq!(outcome.fine.cents(), 150);
//! assert!(item.is_available());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod lending;
pub mod money;
pub mod policy;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use lectern_core::Item` instead of
// `use lectern_core::types::Item`

pub use error::{CoreError, CoreResult, ErrorKind, Ineligibility, ValidationError};
pub use lending::{CheckoutReceipt, ReturnOutcome};
pub use money::{FineRate, Money};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Default ceiling on the number of items a repository holds.
///
/// Overridden per deployment through `LibraryConfig` in lectern-store.
pub const DEFAULT_ITEM_CAPACITY: usize = 100;

/// Default ceiling on the number of registered patrons.
pub const DEFAULT_PATRON_CAPACITY: usize = 100;

/// Borrow limit that stands in for "unlimited" (librarians).
pub const UNLIMITED_BORROW_LIMIT: u32 = 999;
