//! # lectern-store: Storage Layer for Lectern
//!
//! This crate holds the item and patron collections and coordinates lending
//! between them. All state lives in process memory for the duration of a run.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Lectern Data Flow                                │
//! │                                                                         │
//! │  Front-end: "borrow B001 for S001"                                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   lectern-store (THIS CRATE)                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌────────────────┐    ┌──────────────┐  │   │
//! │  │   │    Library    │    │  Repositories  │    │    Config    │  │   │
//! │  │   │ (library.rs)  │    │ item.rs        │    │ (config.rs)  │  │   │
//! │  │   │               │───►│ patron.rs      │    │              │  │   │
//! │  │   │ checkout      │    │                │    │ lectern.toml │  │   │
//! │  │   │ check_in      │    │ HashMap index  │    │ LECTERN_*    │  │   │
//! │  │   └───────┬───────┘    └────────────────┘    └──────────────┘  │   │
//! │  │           │                                                     │   │
//! │  └───────────┼─────────────────────────────────────────────────────┘   │
//! │              ▼                                                          │
//! │  lectern-core: Item::checkout / Item::check_in                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`repository`] - Item and patron repositories
//! - [`library`] - The coordinator that keeps items and patron counts in step
//! - [`shared`] - `Arc<Mutex<Library>>` handle for multi-threaded hosts
//! - [`config`] - Capacity ceilings from file and environment
//! - [`error`] - Store error types
//!
//! ## Usage
//!
//! ```rust
//! use chrono::Utc;
//! use lectern_core::{Item, ItemCategory, Patron, PatronRole};
//! use lectern_store::Library;
//!
//! let mut library = Library::default();
//! library.add_item(Item::new("B001", "Thinking in Java", ItemCategory::Textbook)).unwrap();
//! library.add_patron(Patron::new("S001", "Wang", PatronRole::Student)).unwrap();
//!
//! let receipt = library.checkout("B001", "S001", Utc::now()).unwrap();
//! assert_eq!(library.patrons().find_by_id("S001").unwrap().borrowed_count(), 1);
//!
//! let outcome = library.check_in("B001", receipt.borrowed_on).unwrap();
//! assert!(!outcome.overdue);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod error;
pub mod library;
pub mod repository;
pub mod shared;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::LibraryConfig;
pub use error::{StoreError, StoreResult};
pub use library::{Discrepancy, Library};
pub use shared::SharedLibrary;

// Repository re-exports for convenience
pub use repository::item::{InventoryStats, ItemRepository};
pub use repository::patron::{PatronRepository, PatronStats};
