//! # Repository Module
//!
//! In-memory repositories for Lectern.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Layout                                    │
//! │                                                                         │
//! │  Library (library.rs)                                                  │
//! │       │                                                                 │
//! │       │  library.items().find_by_id("B001")                            │
//! │       ▼                                                                 │
//! │  ItemRepository / PatronRepository                                     │
//! │  ├── add(&mut self, entity)      validate, unique id, capacity         │
//! │  ├── remove(&mut self, id)                                             │
//! │  ├── find_by_id(&self, id)       O(1) through the HashMap index        │
//! │  └── list_* / search_* / stats   insertion order                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  HashMap<id, entity>  +  Vec<id> (insertion order)                     │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`ItemRepository`](item::ItemRepository) - Item storage, loan listings and search
//! - [`PatronRepository`](patron::PatronRepository) - Patron storage and role counts

pub mod item;
pub mod patron;

/// Case-insensitive substring match used by the `search_*` methods.
///
/// An empty or whitespace-only needle matches nothing.
pub(crate) fn matches_query(haystack: &str, needle: &str) -> bool {
    let needle = needle.trim();
    !needle.is_empty() && haystack.to_lowercase().contains(&needle.to_lowercase())
}
