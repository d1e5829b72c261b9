//! # Domain Types
//!
//! Core domain types used throughout Lectern.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      Item       │   │      Loan       │   │     Patron      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  borrower_id ───┼──►│  id             │       │
//! │  │  title          │   │  borrowed_on    │   │  name           │       │
//! │  │  category       │   │  due_on         │   │  role           │       │
//! │  │  loan ──────────┼──►│                 │   │  borrowed_count │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                             │
//! │  │  ItemCategory   │   │   PatronRole    │                             │
//! │  │  Textbook       │   │   Student  (5)  │                             │
//! │  │  Reference      │   │   Teacher  (20) │                             │
//! │  │  Fiction        │   │   Librarian(999)│                             │
//! │  │  Periodical     │   └─────────────────┘                             │
//! │  │  General        │                                                   │
//! │  └─────────────────┘                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Availability Invariant
//! An item is available exactly when it has no [`Loan`]. Borrower, borrow
//! date and due date live together inside the loan, so an item can never
//! carry a borrower without a due date or vice versa.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use ts_rs::TS;

use crate::error::ValidationError;
use crate::policy;

// =============================================================================
// Item Category
// =============================================================================

/// Category of a lendable item. Drives loan length and fine rate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum ItemCategory {
    /// Course textbooks.
    Textbook,
    /// Reference works, closed to students.
    Reference,
    /// Novels and other fiction.
    Fiction,
    /// Journals and magazines.
    Periodical,
    /// Anything uncategorised.
    #[default]
    General,
}

impl ItemCategory {
    /// All categories, in table order.
    pub const ALL: [ItemCategory; 5] = [
        ItemCategory::Textbook,
        ItemCategory::Reference,
        ItemCategory::Fiction,
        ItemCategory::Periodical,
        ItemCategory::General,
    ];

    /// Returns the lowercase name used in messages and config.
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemCategory::Textbook => "textbook",
            ItemCategory::Reference => "reference",
            ItemCategory::Fiction => "fiction",
            ItemCategory::Periodical => "periodical",
            ItemCategory::General => "general",
        }
    }
}

impl fmt::Display for ItemCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemCategory {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "textbook" => Ok(ItemCategory::Textbook),
            "reference" | "reference_book" => Ok(ItemCategory::Reference),
            "fiction" => Ok(ItemCategory::Fiction),
            "periodical" => Ok(ItemCategory::Periodical),
            "general" | "" => Ok(ItemCategory::General),
            other => Err(ValidationError::InvalidFormat {
                field: "category".to_string(),
                reason: format!("unknown category '{}'", other),
            }),
        }
    }
}

// =============================================================================
// Patron Role
// =============================================================================

/// Role of a patron. Drives the borrow limit and some loan lengths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PatronRole {
    Student,
    Teacher,
    Librarian,
}

impl PatronRole {
    /// All roles.
    pub const ALL: [PatronRole; 3] = [
        PatronRole::Student,
        PatronRole::Teacher,
        PatronRole::Librarian,
    ];

    /// Returns the lowercase name used in messages and config.
    pub fn as_str(&self) -> &'static str {
        match self {
            PatronRole::Student => "student",
            PatronRole::Teacher => "teacher",
            PatronRole::Librarian => "librarian",
        }
    }

    /// Maximum number of concurrent loans for this role.
    #[inline]
    pub fn borrow_limit(&self) -> u32 {
        policy::borrow_limit(*self)
    }
}

impl fmt::Display for PatronRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PatronRole {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "student" => Ok(PatronRole::Student),
            "teacher" => Ok(PatronRole::Teacher),
            "librarian" => Ok(PatronRole::Librarian),
            other => Err(ValidationError::InvalidFormat {
                field: "role".to_string(),
                reason: format!("unknown role '{}'", other),
            }),
        }
    }
}

// =============================================================================
// Loan
// =============================================================================

/// An active loan attached to a borrowed item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Loan {
    /// Id of the patron holding the item.
    pub borrower_id: String,

    /// When the item was checked out.
    #[ts(as = "String")]
    pub borrowed_on: DateTime<Utc>,

    /// When the item is due back.
    #[ts(as = "String")]
    pub due_on: DateTime<Utc>,
}

// =============================================================================
// Item
// =============================================================================

/// A lendable library resource.
///
/// The loan state is private: it changes only through
/// [`Item::checkout`](crate::lending) and [`Item::check_in`](crate::lending).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Unique identifier (catalogue code such as "B001").
    id: String,

    /// Display title.
    pub title: String,

    /// Author or issuing body.
    pub author: Option<String>,

    /// ISBN or ISSN.
    pub isbn: Option<String>,

    /// Category, which selects the lending policy.
    pub category: ItemCategory,

    /// Shelf position.
    pub location: Option<String>,

    /// Active loan, if any.
    loan: Option<Loan>,
}

impl Item {
    /// Creates an available item.
    pub fn new(id: impl Into<String>, title: impl Into<String>, category: ItemCategory) -> Self {
        Item {
            id: id.into(),
            title: title.into(),
            author: None,
            isbn: None,
            category,
            location: None,
            loan: None,
        }
    }

    /// Sets the author.
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    /// Sets the ISBN / ISSN.
    pub fn with_isbn(mut self, isbn: impl Into<String>) -> Self {
        self.isbn = Some(isbn.into());
        self
    }

    /// Sets the shelf position.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Returns the item id.
    #[inline]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// `true` when the item has no active loan.
    #[inline]
    pub fn is_available(&self) -> bool {
        self.loan.is_none()
    }

    /// Returns the active loan.
    #[inline]
    pub fn loan(&self) -> Option<&Loan> {
        self.loan.as_ref()
    }

    /// Returns the current borrower's id.
    pub fn borrower_id(&self) -> Option<&str> {
        self.loan.as_ref().map(|loan| loan.borrower_id.as_str())
    }

    /// Returns when the item was borrowed.
    pub fn borrowed_on(&self) -> Option<DateTime<Utc>> {
        self.loan.as_ref().map(|loan| loan.borrowed_on)
    }

    /// Returns when the item is due back.
    pub fn due_on(&self) -> Option<DateTime<Utc>> {
        self.loan.as_ref().map(|loan| loan.due_on)
    }

    /// `true` when the item is on loan to `patron_id`.
    pub fn is_borrowed_by(&self, patron_id: &str) -> bool {
        self.borrower_id() == Some(patron_id)
    }

    pub(crate) fn start_loan(&mut self, loan: Loan) {
        self.loan = Some(loan);
    }

    pub(crate) fn end_loan(&mut self) -> Option<Loan> {
        self.loan.take()
    }
}

// =============================================================================
// Patron
// =============================================================================

/// A library user able to borrow items.
///
/// ## Invariants
/// - `max_borrow_limit` is fixed from the role at construction
/// - `borrowed_count` moves only through checkout and check-in
/// - `borrowed_count <= max_borrow_limit` after every checkout
///
/// Deserializing ignores any `maxBorrowLimit` in the input and derives it
/// from `role`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Patron {
    /// Unique identifier (e.g., "S001").
    id: String,

    /// Display name.
    pub name: String,

    /// Role, which selects the borrow limit.
    role: PatronRole,

    /// Student number or staff number.
    pub card_number: Option<String>,

    /// Items currently on loan.
    borrowed_count: u32,

    /// Maximum concurrent loans.
    max_borrow_limit: u32,
}

impl Patron {
    /// Creates a patron with no loans and the role's borrow limit.
    pub fn new(id: impl Into<String>, name: impl Into<String>, role: PatronRole) -> Self {
        Patron {
            id: id.into(),
            name: name.into(),
            role,
            card_number: None,
            borrowed_count: 0,
            max_borrow_limit: role.borrow_limit(),
        }
    }

    /// Sets the institution card number.
    pub fn with_card_number(mut self, card_number: impl Into<String>) -> Self {
        self.card_number = Some(card_number.into());
        self
    }

    /// Returns the patron id.
    #[inline]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the role.
    #[inline]
    pub fn role(&self) -> PatronRole {
        self.role
    }

    /// Returns the number of items currently on loan.
    #[inline]
    pub fn borrowed_count(&self) -> u32 {
        self.borrowed_count
    }

    /// Returns the maximum number of concurrent loans.
    #[inline]
    pub fn max_borrow_limit(&self) -> u32 {
        self.max_borrow_limit
    }

    /// `true` once the patron holds as many items as allowed.
    #[inline]
    pub fn has_reached_borrow_limit(&self) -> bool {
        self.borrowed_count >= self.max_borrow_limit
    }

    /// How many more items the patron may borrow.
    pub fn remaining_capacity(&self) -> u32 {
        self.max_borrow_limit.saturating_sub(self.borrowed_count)
    }

    pub(crate) fn record_loan(&mut self) {
        self.borrowed_count += 1;
    }

    pub(crate) fn record_return(&mut self) {
        self.borrowed_count = self.borrowed_count.saturating_sub(1);
    }
}

/// Wire form of a patron. The borrow limit is not read back.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PatronRecord {
    id: String,
    name: String,
    role: PatronRole,
    #[serde(default)]
    card_number: Option<String>,
    #[serde(default)]
    borrowed_count: u32,
}

impl<'de> Deserialize<'de> for Patron {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let record = PatronRecord::deserialize(deserializer)?;
        let mut patron = Patron::new(record.id, record.name, record.role);
        patron.card_number = record.card_number;
        patron.borrowed_count = record.borrowed_count;
        Ok(patron)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
