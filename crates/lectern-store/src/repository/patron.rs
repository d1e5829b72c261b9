//! # Patron Repository
//!
//! Storage for registered patrons.
//!
//! ## Key Operations
//! - Unique-id registration with a capacity ceiling
//! - O(1) lookup by id
//! - Head counts by role, recomputed on every call
//! - Name search

use std::collections::HashMap;

use lectern_core::validation::validate_patron;
use lectern_core::{Patron, PatronRole, DEFAULT_PATRON_CAPACITY};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use super::matches_query;
use crate::error::{StoreError, StoreResult};

const ENTITY: &str = "Patron";

/// Head counts by role.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatronStats {
    pub total: usize,
    pub students: usize,
    pub teachers: usize,
    pub librarians: usize,
    /// Patrons holding at least one item.
    pub with_loans: usize,
}

/// Repository for library patrons.
#[derive(Debug, Clone)]
pub struct PatronRepository {
    patrons: HashMap<String, Patron>,
    order: Vec<String>,
    capacity: usize,
}

impl Default for PatronRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl PatronRepository {
    /// Creates an empty repository with the default ceiling of 100 patrons.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_PATRON_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        PatronRepository {
            patrons: HashMap::new(),
            order: Vec::new(),
            capacity,
        }
    }

    /// Registers a new patron.
    ///
    /// The patron's borrow limit is left exactly as constructed.
    ///
    /// ## Returns
    /// * `Err(StoreError::Validation)` - Bad id, empty name, loans already held,
    ///   or a borrow limit that differs from the role's
    /// * `Err(StoreError::DuplicateId)` - Id already registered
    /// * `Err(StoreError::CapacityExceeded)` - Repository is full
    pub fn add(&mut self, patron: Patron) -> StoreResult<()> {
        validate_patron(&patron)?;

        if self.patrons.contains_key(patron.id()) {
            return Err(StoreError::duplicate(ENTITY, patron.id()));
        }

        if self.patrons.len() >= self.capacity {
            return Err(StoreError::CapacityExceeded {
                entity: ENTITY.to_string(),
                max: self.capacity,
            });
        }

        debug!(id = %patron.id(), name = %patron.name, role = %patron.role(), "Registering patron");

        let id = patron.id().to_string();
        self.order.push(id.clone());
        self.patrons.insert(id, patron);

        Ok(())
    }

    /// Unregisters a patron and hands it back.
    pub fn remove(&mut self, id: &str) -> StoreResult<Patron> {
        let patron = self
            .patrons
            .remove(id)
            .ok_or_else(|| StoreError::not_found(ENTITY, id))?;

        self.order.retain(|stored| stored != id);
        debug!(id = %id, "Removed patron");

        Ok(patron)
    }

    pub fn find_by_id(&self, id: &str) -> Option<&Patron> {
        self.patrons.get(id)
    }

    pub fn find_by_id_mut(&mut self, id: &str) -> Option<&mut Patron> {
        self.patrons.get_mut(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.patrons.contains_key(id)
    }

    /// Iterates all patrons in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Patron> + '_ {
        self.order.iter().filter_map(move |id| self.patrons.get(id))
    }

    /// Number of patrons with `role`.
    pub fn count_by_role(&self, role: PatronRole) -> usize {
        self.patrons.values().filter(|p| p.role() == role).count()
    }

    /// Case-insensitive substring search over names.
    pub fn search_by_name(&self, query: &str) -> Vec<&Patron> {
        debug!(query = %query, "Searching patrons by name");
        self.iter()
            .filter(|patron| matches_query(&patron.name, query))
            .collect()
    }

    pub fn stats(&self) -> PatronStats {
        PatronStats {
            total: self.patrons.len(),
            students: self.count_by_role(PatronRole::Student),
            teachers: self.count_by_role(PatronRole::Teacher),
            librarians: self.count_by_role(PatronRole::Librarian),
            with_loans: self
                .patrons
                .values()
                .filter(|p| p.borrowed_count() > 0)
                .count(),
        }
    }

    pub fn len(&self) -> usize {
        self.patrons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patrons.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

/// Generates a new patron id.
pub fn generate_patron_id() -> String {
    Uuid::new_v4().to_string()
}
