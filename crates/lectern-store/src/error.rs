//! # Store Error Types
//!
//! Error types for repository and library operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  ValidationError / CoreError (lectern-core)                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ← Adds lookup, uniqueness, capacity           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Front-end shows kind()/code() specific message, actor retries         │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use lectern_core::{CoreError, ErrorKind, ValidationError};
use thiserror::Error;

/// Repository and library errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Entity not found.
    ///
    /// ## When This Occurs
    /// - Lookup of an item or patron id that was never added
    /// - Lookup after removal
    /// - Check-in of an item whose recorded borrower is gone
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Insertion collided with an existing id.
    #[error("Duplicate {entity} id: '{id}' already exists")]
    DuplicateId { entity: String, id: String },

    /// Repository ceiling reached.
    #[error("{entity} storage is full (capacity {max})")]
    CapacityExceeded { entity: String, max: usize },

    /// A patron cannot be removed while items are on loan to them.
    #[error("Patron {id} still has {count} item(s) on loan")]
    PatronHasLoans { id: String, count: usize },

    /// Lending rule violation from lectern-core.
    #[error(transparent)]
    Lending(#[from] CoreError),

    /// Invalid item or patron fields.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Failed to read or parse the config file.
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    /// Config values are out of range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A thread panicked while holding the shared library lock.
    #[error("Library lock poisoned")]
    LockPoisoned,
}

impl StoreError {
    /// Creates a NotFound error for a given entity type and id.
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        StoreError::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// Creates a DuplicateId error.
    pub fn duplicate(entity: impl Into<String>, id: impl Into<String>) -> Self {
        StoreError::DuplicateId {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// Returns the coarse error kind.
    pub fn kind(&self) -> ErrorKind {
        match self {
            StoreError::NotFound { .. } => ErrorKind::NotFound,
            StoreError::DuplicateId { .. } => ErrorKind::DuplicateId,
            StoreError::CapacityExceeded { .. } => ErrorKind::CapacityExceeded,
            StoreError::PatronHasLoans { .. } => ErrorKind::Conflict,
            StoreError::Lending(err) => err.kind(),
            StoreError::Validation(_) => ErrorKind::InvalidInput,
            StoreError::ConfigLoadFailed(_)
            | StoreError::InvalidConfig(_)
            | StoreError::LockPoisoned => ErrorKind::Internal,
        }
    }

    /// Returns the stable `LIB_xxxx` code.
    pub fn code(&self) -> &'static str {
        match self {
            StoreError::NotFound { entity, .. } if entity == "Patron" => "LIB_1002",
            StoreError::NotFound { .. } => "LIB_1001",
            StoreError::DuplicateId { .. } => "LIB_1003",
            StoreError::CapacityExceeded { .. } => "LIB_4001",
            StoreError::PatronHasLoans { .. } => "LIB_4002",
            StoreError::Lending(err) => err.code(),
            StoreError::Validation(_) => "LIB_3001",
            StoreError::ConfigLoadFailed(_) | StoreError::InvalidConfig(_) => "LIB_5001",
            StoreError::LockPoisoned => "LIB_5002",
        }
    }
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        StoreError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::de::Error> for StoreError {
    fn from(err: toml::de::Error) -> Self {
        StoreError::ConfigLoadFailed(err.to_string())
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
