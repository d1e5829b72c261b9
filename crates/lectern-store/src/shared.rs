//! # Shared Library Handle
//!
//! Thread-safe access to one [`Library`] from many threads.
//!
//! ## Why Mutex?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Concurrent Checkouts                                 │
//! │                                                                         │
//! │  Desk 1: checkout("F001", "S001")      Desk 2: checkout("F001", "T001") │
//! │       │                                      │                          │
//! │       └──────────────┐        ┌──────────────┘                          │
//! │                      ▼        ▼                                         │
//! │               Arc<Mutex<Library>>                                       │
//! │                      │                                                  │
//! │                      ▼                                                  │
//! │  One closure at a time: eligibility check, item update and patron      │
//! │  count update all happen under the same lock. Desk 2 sees the item     │
//! │  as unavailable.                                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex};

use tracing::error;

use crate::config::LibraryConfig;
use crate::error::{StoreError, StoreResult};
use crate::library::Library;

/// Cloneable handle to a library shared between threads.
#[derive(Debug, Clone, Default)]
pub struct SharedLibrary {
    library: Arc<Mutex<Library>>,
}

impl SharedLibrary {
    /// Creates an empty shared library with the configured ceilings.
    pub fn new(config: &LibraryConfig) -> Self {
        Self::from_library(Library::new(config))
    }

    /// Wraps an existing library.
    pub fn from_library(library: Library) -> Self {
        SharedLibrary {
            library: Arc::new(Mutex::new(library)),
        }
    }

    /// Executes a function with read access to the library.
    ///
    /// ## Usage
    /// ```rust
    /// use lectern_store::SharedLibrary;
    ///
    /// let shared = SharedLibrary::default();
    /// let count = shared.with_library(|library| library.items().len()).unwrap();
    /// assert_eq!(count, 0);
    /// ```
    pub fn with_library<F, R>(&self, f: F) -> StoreResult<R>
    where
        F: FnOnce(&Library) -> R,
    {
        let library = self.library.lock().map_err(|_| {
            error!("Library mutex poisoned");
            StoreError::LockPoisoned
        })?;
        Ok(f(&library))
    }

    /// Executes a function with write access to the library.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// shared.with_library_mut(|library| library.checkout("F001", "S001", Utc::now()))??;
    /// ```
    pub fn with_library_mut<F, R>(&self, f: F) -> StoreResult<R>
    where
        F: FnOnce(&mut Library) -> R,
    {
        let mut library = self.library.lock().map_err(|_| {
            error!("Library mutex poisoned");
            StoreError::LockPoisoned
        })?;
        Ok(f(&mut library))
    }
}
