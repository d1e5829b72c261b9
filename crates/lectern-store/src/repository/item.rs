//! # Item Repository
//!
//! Storage for lendable items.
//!
//! ## Key Operations
//! - Unique-id insertion with a capacity ceiling
//! - O(1) lookup by id
//! - Loan listings (available, borrowed, borrowed by a patron, overdue)
//! - Title and author search
//!
//! ## Index Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    How Items Are Stored                                 │
//! │                                                                         │
//! │  order: Vec<String>           items: HashMap<String, Item>             │
//! │  ┌──────┐                     ┌──────┬─────────────────────────────┐   │
//! │  │ B001 │ ──────────────────► │ B001 │ Thinking in Java (Borrowed) │   │
//! │  │ R001 │ ──────────────────► │ R001 │ Oxford Dictionary           │   │
//! │  │ F001 │ ──────────────────► │ F001 │ Three-Body (Available)      │   │
//! │  └──────┘                     └──────┴─────────────────────────────┘   │
//! │                                                                         │
//! │  Listings walk `order`, lookups hit `items` directly.                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use lectern_core::validation::validate_item;
use lectern_core::{Item, DEFAULT_ITEM_CAPACITY};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

use super::matches_query;
use crate::error::{StoreError, StoreResult};

const ENTITY: &str = "Item";

/// Counts of items by availability.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryStats {
    pub total: usize,
    pub available: usize,
    pub borrowed: usize,
}

/// Repository for lendable items.
///
/// ## Usage
/// ```rust
/// use lectern_core::{Item, ItemCategory};
/// use lectern_store::ItemRepository;
///
/// let mut repo = ItemRepository::new();
/// repo.add(Item::new("B001", "Thinking in Java", ItemCategory::Textbook)).unwrap();
///
/// assert!(repo.find_by_id("B001").is_some());
/// assert_eq!(repo.list_available().len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct ItemRepository {
    items: HashMap<String, Item>,
    order: Vec<String>,
    capacity: usize,
}

impl Default for ItemRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl ItemRepository {
    /// Creates an empty repository with the default ceiling of 100 items.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_ITEM_CAPACITY)
    }

    /// Creates an empty repository holding at most `capacity` items.
    pub fn with_capacity(capacity: usize) -> Self {
        ItemRepository {
            items: HashMap::new(),
            order: Vec::new(),
            capacity,
        }
    }

    // =========================================================================
    // Mutation
    // =========================================================================

    /// Inserts a new item.
    ///
    /// ## Returns
    /// * `Ok(())` - Item stored
    /// * `Err(StoreError::Validation)` - Bad id, title or ISBN, or the item is already on loan
    /// * `Err(StoreError::DuplicateId)` - Id already stored, existing item untouched
    /// * `Err(StoreError::CapacityExceeded)` - Repository is full
    pub fn add(&mut self, item: Item) -> StoreResult<()> {
        validate_item(&item)?;

        if self.items.contains_key(item.id()) {
            return Err(StoreError::duplicate(ENTITY, item.id()));
        }

        if self.items.len() >= self.capacity {
            return Err(StoreError::CapacityExceeded {
                entity: ENTITY.to_string(),
                max: self.capacity,
            });
        }

        debug!(id = %item.id(), title = %item.title, category = %item.category, "Adding item");

        let id = item.id().to_string();
        self.order.push(id.clone());
        self.items.insert(id, item);

        Ok(())
    }

    /// Removes an item and hands it back.
    ///
    /// Removing an item that is on loan does not touch the borrower's count.
    pub fn remove(&mut self, id: &str) -> StoreResult<Item> {
        let item = self
            .items
            .remove(id)
            .ok_or_else(|| StoreError::not_found(ENTITY, id))?;

        self.order.retain(|stored| stored != id);

        match item.borrower_id() {
            Some(borrower) => {
                warn!(id = %id, borrower = %borrower, "Removed an item that is still on loan")
            }
            None => debug!(id = %id, "Removed item"),
        }

        Ok(item)
    }

    // =========================================================================
    // Lookup
    // =========================================================================

    /// Finds an item by id.
    pub fn find_by_id(&self, id: &str) -> Option<&Item> {
        self.items.get(id)
    }

    /// Finds an item by id for lending operations.
    pub fn find_by_id_mut(&mut self, id: &str) -> Option<&mut Item> {
        self.items.get_mut(id)
    }

    /// `true` if an item with this id is stored.
    pub fn contains(&self, id: &str) -> bool {
        self.items.contains_key(id)
    }

    /// Iterates all items in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Item> + '_ {
        self.order.iter().filter_map(move |id| self.items.get(id))
    }

    // =========================================================================
    // Listings
    // =========================================================================

    /// Items on the shelf.
    pub fn list_available(&self) -> Vec<&Item> {
        self.iter().filter(|item| item.is_available()).collect()
    }

    /// Items currently on loan.
    pub fn list_borrowed(&self) -> Vec<&Item> {
        self.iter().filter(|item| !item.is_available()).collect()
    }

    /// Items on loan to one patron.
    pub fn list_borrowed_by(&self, patron_id: &str) -> Vec<&Item> {
        self.iter()
            .filter(|item| item.is_borrowed_by(patron_id))
            .collect()
    }

    /// Items on loan to one patron, soonest due first.
    pub fn list_borrowed_by_due_date(&self, patron_id: &str) -> Vec<&Item> {
        let mut items = self.list_borrowed_by(patron_id);
        items.sort_by_key(|item| item.due_on());
        items
    }

    /// Items whose due date has passed as of `as_of`.
    pub fn list_overdue(&self, as_of: DateTime<Utc>) -> Vec<&Item> {
        self.iter().filter(|item| item.is_overdue(as_of)).collect()
    }

    // =========================================================================
    // Search
    // =========================================================================

    /// Case-insensitive substring search over titles.
    pub fn search_by_title(&self, query: &str) -> Vec<&Item> {
        debug!(query = %query, "Searching items by title");
        self.iter()
            .filter(|item| matches_query(&item.title, query))
            .collect()
    }

    /// Case-insensitive substring search over authors.
    ///
    /// Items without an author never match.
    pub fn search_by_author(&self, query: &str) -> Vec<&Item> {
        debug!(query = %query, "Searching items by author");
        self.iter()
            .filter(|item| {
                item.author
                    .as_deref()
                    .is_some_and(|author| matches_query(author, query))
            })
            .collect()
    }

    // =========================================================================
    // Counts
    // =========================================================================

    /// Availability counts.
    pub fn stats(&self) -> InventoryStats {
        let borrowed = self.items.values().filter(|i| !i.is_available()).count();
        InventoryStats {
            total: self.items.len(),
            available: self.items.len() - borrowed,
            borrowed,
        }
    }

    /// Number of stored items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Maximum number of items this repository accepts.
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

/// Generates a new item id.
pub fn generate_item_id() -> String {
    Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use lectern_core::{ItemCategory, Patron, PatronRole};

    fn day(n: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap() + Duration::days(n)
    }

    fn sample_repo() -> ItemRepository {
        let mut repo = ItemRepository::new();
        repo.add(
            Item::new("B001", "Thinking in Java", ItemCategory::Textbook)
                .with_author("Bruce Eckel"),
        )
        .unwrap();
        repo.add(Item::new("R001", "Oxford Dictionary", ItemCategory::Reference))
            .unwrap();
        repo.add(
            Item::new("F001", "The Three-Body Problem", ItemCategory::Fiction)
                .with_author("Liu Cixin"),
        )
        .unwrap();
        repo
    }

    fn lend(repo: &mut ItemRepository, item_id: &str, patron: &mut Patron, at: DateTime<Utc>) {
        repo.find_by_id_mut(item_id)
            .unwrap()
            .checkout(patron, at)
            .unwrap();
    }

    #[test]
    fn test_add_and_find() {
        let repo = sample_repo();

        assert_eq!(repo.len(), 3);
        assert!(repo.contains("R001"));
        assert_eq!(repo.find_by_id("F001").unwrap().title, "The Three-Body Problem");
        assert!(repo.find_by_id("X999").is_none());
    }

    #[test]
    fn test_duplicate_add_keeps_original() {
        let mut repo = sample_repo();

        let err = repo
            .add(Item::new("B001", "Impostor", ItemCategory::General))
            .unwrap_err();

        assert!(matches!(err, StoreError::DuplicateId { .. }));
        assert_eq!(repo.len(), 3);
        assert_eq!(repo.find_by_id("B001").unwrap().title, "Thinking in Java");
    }

    #[test]
    fn test_invalid_item_rejected() {
        let mut repo = ItemRepository::new();
        let err = repo
            .add(Item::new("", "No Id", ItemCategory::General))
            .unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));
        assert!(repo.is_empty());
    }

    #[test]
    fn test_item_already_on_loan_is_rejected() {
        let mut item = Item::new("B009", "Refactoring", ItemCategory::Textbook);
        let mut patron = Patron::new("S001", "Wang", PatronRole::Student);
        item.checkout(&mut patron, day(0)).unwrap();

        let mut repo = ItemRepository::new();
        let err = repo.add(item).unwrap_err();

        assert!(matches!(err, StoreError::Validation(_)));
        assert_eq!(err.code(), "LIB_3001");
        assert!(repo.is_empty());
    }

    #[test]
    fn test_capacity_ceiling() {
        let mut repo = ItemRepository::with_capacity(2);
        repo.add(Item::new("A1", "One", ItemCategory::General)).unwrap();
        repo.add(Item::new("A2", "Two", ItemCategory::General)).unwrap();

        let err = repo
            .add(Item::new("A3", "Three", ItemCategory::General))
            .unwrap_err();

        assert!(matches!(err, StoreError::CapacityExceeded { max: 2, .. }));
        assert_eq!(repo.len(), 2);
    }

    #[test]
    fn test_remove_then_find_is_absent() {
        let mut repo = sample_repo();

        let removed = repo.remove("R001").unwrap();
        assert_eq!(removed.id(), "R001");
        assert!(repo.find_by_id("R001").is_none());
        assert_eq!(repo.len(), 2);

        assert!(matches!(
            repo.remove("R001"),
            Err(StoreError::NotFound { .. })
        ));
    }

    #[test]
    fn test_remove_borrowed_item_leaves_patron_count() {
        let mut repo = sample_repo();
        let mut patron = Patron::new("S001", "Wang", PatronRole::Student);
        lend(&mut repo, "F001", &mut patron, day(0));

        let removed = repo.remove("F001").unwrap();

        assert!(!removed.is_available());
        assert_eq!(patron.borrowed_count(), 1);
    }

    #[test]
    fn test_listings_keep_insertion_order() {
        let mut repo = sample_repo();
        let mut patron = Patron::new("T001", "Li", PatronRole::Teacher);
        lend(&mut repo, "F001", &mut patron, day(0));
        lend(&mut repo, "B001", &mut patron, day(1));

        let available: Vec<&str> = repo.list_available().iter().map(|i| i.id()).collect();
        let borrowed: Vec<&str> = repo.list_borrowed().iter().map(|i| i.id()).collect();
        let by_patron: Vec<&str> = repo.list_borrowed_by("T001").iter().map(|i| i.id()).collect();

        assert_eq!(available, vec!["R001"]);
        assert_eq!(borrowed, vec!["B001", "F001"]);
        assert_eq!(by_patron, vec!["B001", "F001"]);
        assert!(repo.list_borrowed_by("S999").is_empty());
    }

    #[test]
    fn test_borrowed_by_due_date() {
        let mut repo = sample_repo();
        let mut patron = Patron::new("T001", "Li", PatronRole::Teacher);
        // Textbook for a teacher is due after 90 days, fiction after 30.
        lend(&mut repo, "B001", &mut patron, day(0));
        lend(&mut repo, "F001", &mut patron, day(0));

        let ids: Vec<&str> = repo
            .list_borrowed_by_due_date("T001")
            .iter()
            .map(|i| i.id())
            .collect();

        assert_eq!(ids, vec!["F001", "B001"]);
    }

    #[test]
    fn test_list_overdue() {
        let mut repo = sample_repo();
        let mut patron = Patron::new("S001", "Wang", PatronRole::Student);
        lend(&mut repo, "F001", &mut patron, day(0));
        lend(&mut repo, "B001", &mut patron, day(0));

        // Fiction is due after 30 days, a student's textbook after 60.
        assert!(repo.list_overdue(day(30)).is_empty());

        let overdue: Vec<&str> = repo.list_overdue(day(31)).iter().map(|i| i.id()).collect();
        assert_eq!(overdue, vec!["F001"]);
    }

    #[test]
    fn test_search() {
        let repo = sample_repo();

        let by_title: Vec<&str> = repo.search_by_title("JAVA").iter().map(|i| i.id()).collect();
        assert_eq!(by_title, vec!["B001"]);

        let by_author: Vec<&str> = repo.search_by_author("cixin").iter().map(|i| i.id()).collect();
        assert_eq!(by_author, vec!["F001"]);

        assert!(repo.search_by_title("").is_empty());
        assert!(repo.search_by_author("Oxford").is_empty());
    }

    #[test]
    fn test_stats() {
        let mut repo = sample_repo();
        let mut patron = Patron::new("S001", "Wang", PatronRole::Student);
        lend(&mut repo, "B001", &mut patron, day(0));

        assert_eq!(
            repo.stats(),
            InventoryStats {
                total: 3,
                available: 2,
                borrowed: 1
            }
        );
    }

    #[test]
    fn test_generate_item_id() {
        let a = generate_item_id();
        let b = generate_item_id();
        assert_ne!(a, b);
        assert!(lectern_core::validation::validate_id("item id", &a).is_ok());
    }
}
