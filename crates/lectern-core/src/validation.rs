//! # Validation Module
//!
//! Input validation for items and patrons before they enter a repository.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Front-end (external)                                         │
//! │  └── Prompts, parsing menu input                                       │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Id format, required fields, length limits                         │
//! │  └── New entities start without loans                                  │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Repositories (lectern-store)                                 │
//! │  ├── Unique ids                                                        │
//! │  └── Capacity ceilings                                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use lectern_core::validation::validate_id;
//!
//! assert!(validate_id("item id", "B001").is_ok());
//! assert!(validate_id("item id", "").is_err());
//! ```

use crate::error::ValidationError;
use crate::types::{Item, Patron};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

const MAX_ID_LEN: usize = 50;
const MAX_TITLE_LEN: usize = 200;
const MAX_NAME_LEN: usize = 100;

// =============================================================================
// Field Validators
// =============================================================================

/// Validates an item or patron id.
///
/// ## Rules
/// - Must not be empty
/// - At most 50 characters
/// - Letters, digits, hyphens and underscores only
pub fn validate_id(field: &str, id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if id.chars().count() > MAX_ID_LEN {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_ID_LEN,
        });
    }

    if !id
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: "must contain only letters, numbers, hyphens, and underscores".to_string(),
        });
    }

    Ok(())
}

/// Validates a required free-text field with a length ceiling.
fn validate_text(field: &str, value: &str, max: usize) -> ValidationResult<()> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.chars().count() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }

    Ok(())
}

/// Validates an ISBN-10/13 or ISSN.
///
/// ## Rules
/// - Digits and hyphens, with an optional trailing `X` check digit
/// - 8 (ISSN), 10 or 13 significant characters
pub fn validate_isbn(isbn: &str) -> ValidationResult<()> {
    let significant: Vec<char> = isbn.chars().filter(|c| *c != '-').collect();

    let well_formed = significant.iter().enumerate().all(|(i, c)| {
        c.is_ascii_digit() || (i + 1 == significant.len() && (*c == 'X' || *c == 'x'))
    });

    if !well_formed || !matches!(significant.len(), 8 | 10 | 13) {
        return Err(ValidationError::InvalidFormat {
            field: "isbn".to_string(),
            reason: "expected an ISBN-10, ISBN-13 or ISSN".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Entity Validators
// =============================================================================

/// Validates an item about to be added to the catalogue.
///
/// A loan can only start through checkout, so an item that arrives already
/// on loan is rejected.
pub fn validate_item(item: &Item) -> ValidationResult<()> {
    validate_id("item id", item.id())?;
    validate_text("title", &item.title, MAX_TITLE_LEN)?;

    if let Some(isbn) = &item.isbn {
        validate_isbn(isbn)?;
    }

    if !item.is_available() {
        return Err(ValidationError::InvalidFormat {
            field: "loan".to_string(),
            reason: "a new item must be available".to_string(),
        });
    }

    Ok(())
}

/// Validates a patron about to be registered.
///
/// ## Rules
/// - Id and name as for items
/// - No items on loan yet
/// - Borrow limit equal to the role's limit
pub fn validate_patron(patron: &Patron) -> ValidationResult<()> {
    validate_id("patron id", patron.id())?;
    validate_text("name", &patron.name, MAX_NAME_LEN)?;

    if patron.borrowed_count() > 0 {
        return Err(ValidationError::InvalidFormat {
            field: "borrowed_count".to_string(),
            reason: "a new patron cannot hold loans".to_string(),
        });
    }

    if patron.max_borrow_limit() != patron.role().borrow_limit() {
        return Err(ValidationError::InvalidFormat {
            field: "max_borrow_limit".to_string(),
            reason: format!("must be {} for a {}", patron.role().borrow_limit(), patron.role()),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ItemCategory, PatronRole};

    #[test]
    fn test_validate_id() {
        assert!(validate_id("item id", "B001").is_ok());
        assert!(validate_id("item id", "shelf_3-07").is_ok());

        assert!(validate_id("item id", "").is_err());
        assert!(validate_id("item id", "   ").is_err());
        assert!(validate_id("item id", "has space").is_err());
        assert!(validate_id("item id", &"A".repeat(51)).is_err());
    }

    #[test]
    fn test_validate_isbn() {
        assert!(validate_isbn("978-7-111-21382-6").is_ok());
        assert!(validate_isbn("0-306-40615-2").is_ok());
        assert!(validate_isbn("1002-137X").is_ok());

        assert!(validate_isbn("").is_err());
        assert!(validate_isbn("12X4-5678").is_err());
        assert!(validate_isbn("978-7-111").is_err());
    }

    #[test]
    fn test_validate_item() {
        let item = Item::new("B001", "Thinking in Java", ItemCategory::Textbook)
            .with_isbn("978-7-111-21382-6");
        assert!(validate_item(&item).is_ok());

        let untitled = Item::new("B002", "  ", ItemCategory::General);
        assert_eq!(
            validate_item(&untitled),
            Err(ValidationError::Required {
                field: "title".to_string()
            })
        );

        let bad_isbn = Item::new("B003", "Code Complete", ItemCategory::Textbook).with_isbn("n/a");
        assert!(validate_item(&bad_isbn).is_err());
    }

    #[test]
    fn test_validate_patron() {
        assert!(validate_patron(&Patron::new("S001", "Wang", PatronRole::Student)).is_ok());
        assert!(validate_patron(&Patron::new("S 001", "Wang", PatronRole::Student)).is_err());
        assert!(validate_patron(&Patron::new("S002", "", PatronRole::Student)).is_err());
    }

    #[test]
    fn test_item_on_loan_is_not_new() {
        let mut item = Item::new("B001", "Thinking in Java", ItemCategory::Textbook);
        let mut patron = Patron::new("S001", "Wang", PatronRole::Student);
        item.checkout(&mut patron, chrono::Utc::now()).unwrap();

        assert!(matches!(
            validate_item(&item),
            Err(ValidationError::InvalidFormat { field, .. }) if field == "loan"
        ));
    }

    #[test]
    fn test_patron_holding_loans_is_not_new() {
        let mut item = Item::new("F001", "To Live", ItemCategory::Fiction);
        let mut patron = Patron::new("S001", "Wang", PatronRole::Student);
        item.checkout(&mut patron, chrono::Utc::now()).unwrap();

        assert!(matches!(
            validate_patron(&patron),
            Err(ValidationError::InvalidFormat { field, .. }) if field == "borrowed_count"
        ));
    }
}
