//! # Library Coordinator
//!
//! Owns both repositories and runs lending by id.
//!
//! ## Checkout Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    library.checkout("B001", "S001", now)                │
//! │                                                                         │
//! │  1. items.find_by_id_mut("B001")      ──► NotFound (LIB_1001)          │
//! │  2. patrons.find_by_id_mut("S001")    ──► NotFound (LIB_1002)          │
//! │  3. item.checkout(&mut patron, now)   ──► Lending(NotEligible)         │
//! │       │                                                                 │
//! │       ├── item.loan = Some(Loan { S001, now, due })                    │
//! │       └── patron.borrowed_count += 1                                   │
//! │                                                                         │
//! │  Both entities change together or not at all.                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Check-in looks up the borrower recorded on the item, so callers only
//! need the item id.

use chrono::{DateTime, Utc};
use lectern_core::{CheckoutReceipt, CoreError, Item, Money, Patron, ReturnOutcome};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::LibraryConfig;
use crate::error::{StoreError, StoreResult};
use crate::repository::item::ItemRepository;
use crate::repository::patron::PatronRepository;

/// An inconsistency between loans recorded on items and patron counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Discrepancy {
    /// A patron's count differs from the number of items recorded against them.
    CountMismatch {
        patron_id: String,
        recorded: u32,
        actual: usize,
    },

    /// An item is on loan to a patron who is not registered.
    MissingBorrower { item_id: String, borrower_id: String },
}

/// The circulation desk: items, patrons and the loans between them.
#[derive(Debug, Clone)]
pub struct Library {
    items: ItemRepository,
    patrons: PatronRepository,
}

impl Default for Library {
    fn default() -> Self {
        Self::new(&LibraryConfig::default())
    }
}

impl Library {
    /// Creates an empty library with the configured ceilings.
    pub fn new(config: &LibraryConfig) -> Self {
        Library {
            items: ItemRepository::with_capacity(config.items.capacity),
            patrons: PatronRepository::with_capacity(config.patrons.capacity),
        }
    }

    /// Read access to the item repository.
    pub fn items(&self) -> &ItemRepository {
        &self.items
    }

    /// Read access to the patron repository.
    pub fn patrons(&self) -> &PatronRepository {
        &self.patrons
    }

    // =========================================================================
    // Catalogue
    // =========================================================================

    pub fn add_item(&mut self, item: Item) -> StoreResult<()> {
        self.items.add(item)
    }

    /// Removes an item even if it is on loan.
    ///
    /// The borrower's count is left as is; [`Library::audit`] reports it.
    pub fn remove_item(&mut self, item_id: &str) -> StoreResult<Item> {
        self.items.remove(item_id)
    }

    pub fn add_patron(&mut self, patron: Patron) -> StoreResult<()> {
        self.patrons.add(patron)
    }

    /// Unregisters a patron with no items on loan.
    ///
    /// ## Returns
    /// * `Err(StoreError::NotFound)` - Unknown patron
    /// * `Err(StoreError::PatronHasLoans)` - Items are still recorded against the patron
    pub fn remove_patron(&mut self, patron_id: &str) -> StoreResult<Patron> {
        if !self.patrons.contains(patron_id) {
            return Err(StoreError::not_found("Patron", patron_id));
        }

        let count = self.items.list_borrowed_by(patron_id).len();
        if count > 0 {
            warn!(patron_id = %patron_id, count, "Refusing to remove patron with loans");
            return Err(StoreError::PatronHasLoans {
                id: patron_id.to_string(),
                count,
            });
        }

        self.patrons.remove(patron_id)
    }

    // =========================================================================
    // Lending
    // =========================================================================

    /// `true` when the patron may borrow the item right now.
    pub fn can_borrow(&self, item_id: &str, patron_id: &str) -> StoreResult<bool> {
        let item = self
            .items
            .find_by_id(item_id)
            .ok_or_else(|| StoreError::not_found("Item", item_id))?;
        let patron = self
            .patrons
            .find_by_id(patron_id)
            .ok_or_else(|| StoreError::not_found("Patron", patron_id))?;

        Ok(item.can_borrow(patron))
    }

    /// Lends an item to a patron.
    pub fn checkout(
        &mut self,
        item_id: &str,
        patron_id: &str,
        at: DateTime<Utc>,
    ) -> StoreResult<CheckoutReceipt> {
        let item = self
            .items
            .find_by_id_mut(item_id)
            .ok_or_else(|| StoreError::not_found("Item", item_id))?;
        let patron = self
            .patrons
            .find_by_id_mut(patron_id)
            .ok_or_else(|| StoreError::not_found("Patron", patron_id))?;

        let receipt = item.checkout(patron, at)?;

        info!(
            item_id = %receipt.item_id,
            patron_id = %receipt.patron_id,
            due_on = %receipt.due_on,
            "Item checked out"
        );

        Ok(receipt)
    }

    /// Takes an item back from whoever borrowed it.
    ///
    /// ## Returns
    /// * `Err(StoreError::NotFound)` - Unknown item, or the borrower is no longer registered
    /// * `Err(StoreError::Lending(NotBorrowed))` - The item is on the shelf
    pub fn check_in(&mut self, item_id: &str, at: DateTime<Utc>) -> StoreResult<ReturnOutcome> {
        let item = self
            .items
            .find_by_id_mut(item_id)
            .ok_or_else(|| StoreError::not_found("Item", item_id))?;

        let borrower_id = item
            .borrower_id()
            .map(str::to_string)
            .ok_or_else(|| CoreError::NotBorrowed {
                item_id: item_id.to_string(),
            })?;

        let patron = self
            .patrons
            .find_by_id_mut(&borrower_id)
            .ok_or_else(|| StoreError::not_found("Patron", &borrower_id))?;

        let outcome = item.check_in(patron, at)?;

        if outcome.overdue {
            info!(
                item_id = %outcome.item_id,
                patron_id = %outcome.patron_id,
                overdue_days = outcome.overdue_days,
                fine = %outcome.fine,
                "Item returned late"
            );
        } else {
            info!(item_id = %outcome.item_id, patron_id = %outcome.patron_id, "Item returned");
        }

        Ok(outcome)
    }

    /// Fine owed so far on an item, without returning it.
    pub fn accrued_fine(&self, item_id: &str, as_of: DateTime<Utc>) -> StoreResult<Money> {
        self.items
            .find_by_id(item_id)
            .map(|item| item.accrued_fine(as_of))
            .ok_or_else(|| StoreError::not_found("Item", item_id))
    }

    /// Total fine accrued so far across every item on loan to a patron.
    pub fn accrued_fines_for(&self, patron_id: &str, as_of: DateTime<Utc>) -> StoreResult<Money> {
        if !self.patrons.contains(patron_id) {
            return Err(StoreError::not_found("Patron", patron_id));
        }

        Ok(self
            .items
            .list_borrowed_by(patron_id)
            .into_iter()
            .map(|item| item.accrued_fine(as_of))
            .sum())
    }

    // =========================================================================
    // Consistency
    // =========================================================================

    /// Cross-checks loans recorded on items against patron counts.
    ///
    /// An empty result means every patron's count matches the items on loan
    /// to them and every borrower is registered.
    pub fn audit(&self) -> Vec<Discrepancy> {
        let mut found = Vec::new();

        for patron in self.patrons.iter() {
            let actual = self.items.list_borrowed_by(patron.id()).len();
            if usize::try_from(patron.borrowed_count()).ok() != Some(actual) {
                found.push(Discrepancy::CountMismatch {
                    patron_id: patron.id().to_string(),
                    recorded: patron.borrowed_count(),
                    actual,
                });
            }
        }

        for item in self.items.iter() {
            if let Some(borrower_id) = item.borrower_id() {
                if !self.patrons.contains(borrower_id) {
                    found.push(Discrepancy::MissingBorrower {
                        item_id: item.id().to_string(),
                        borrower_id: borrower_id.to_string(),
                    });
                }
            }
        }

        if !found.is_empty() {
            warn!(count = found.len(), "Audit found discrepancies");
        }

        found
    }
}
