//! # Lending Policy
//!
//! Lookup tables keyed by [`ItemCategory`] and [`PatronRole`].
//!
//! ## Loan Days
//! ```text
//! ┌──────────────┬─────────┬─────────┬───────────┐
//! │ category     │ Teacher │ Student │ Librarian │
//! ├──────────────┼─────────┼─────────┼───────────┤
//! │ Textbook     │   90    │   60    │    60     │
//! │ Reference    │   30    │    0 *  │     0     │
//! │ Fiction      │   30    │   30    │    30     │
//! │ Periodical   │   14    │   14    │    14     │
//! │ General      │   60    │   30    │    30     │
//! └──────────────┴─────────┴─────────┴───────────┘
//!   * students are never eligible for reference items. A librarian may
//!     borrow one, but it is due back the same instant.
//! ```
//!
//! ## Daily Fine Rates
//! Textbook 0.30, Reference 1.00, Fiction 0.50, Periodical 0.80, General 0.50.

use crate::money::FineRate;
use crate::types::{ItemCategory, PatronRole};
use crate::UNLIMITED_BORROW_LIMIT;

/// Number of days an item of `category` may be kept by a patron with `role`.
pub fn loan_days(category: ItemCategory, role: PatronRole) -> u32 {
    match (category, role) {
        (ItemCategory::Textbook, PatronRole::Teacher) => 90,
        (ItemCategory::Textbook, _) => 60,
        (ItemCategory::Reference, PatronRole::Teacher) => 30,
        (ItemCategory::Reference, _) => 0,
        (ItemCategory::Fiction, _) => 30,
        (ItemCategory::Periodical, _) => 14,
        (ItemCategory::General, PatronRole::Teacher) => 60,
        (ItemCategory::General, _) => 30,
    }
}

/// Overdue charge per day for `category`.
pub fn daily_fine_rate(category: ItemCategory) -> FineRate {
    let cents = match category {
        ItemCategory::Textbook => 30,
        ItemCategory::Reference => 100,
        ItemCategory::Fiction => 50,
        ItemCategory::Periodical => 80,
        ItemCategory::General => 50,
    };
    FineRate::from_cents_per_day(cents)
}

/// Maximum concurrent loans for `role`.
pub fn borrow_limit(role: PatronRole) -> u32 {
    match role {
        PatronRole::Student => 5,
        PatronRole::Teacher => 20,
        PatronRole::Librarian => UNLIMITED_BORROW_LIMIT,
    }
}

/// `true` when `role` may borrow items of `category` at all.
pub fn role_may_borrow(category: ItemCategory, role: PatronRole) -> bool {
    !matches!((category, role), (ItemCategory::Reference, PatronRole::Student))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_textbook_loan_days() {
        assert_eq!(loan_days(ItemCategory::Textbook, PatronRole::Teacher), 90);
        assert_eq!(loan_days(ItemCategory::Textbook, PatronRole::Student), 60);
        assert_eq!(loan_days(ItemCategory::Textbook, PatronRole::Librarian), 60);
    }

    #[test]
    fn test_uniform_categories() {
        for role in PatronRole::ALL {
            assert_eq!(loan_days(ItemCategory::Fiction, role), 30);
            assert_eq!(loan_days(ItemCategory::Periodical, role), 14);
        }
    }

    #[test]
    fn test_reference_and_general_days() {
        assert_eq!(loan_days(ItemCategory::Reference, PatronRole::Teacher), 30);
        assert_eq!(loan_days(ItemCategory::Reference, PatronRole::Librarian), 0);
        assert_eq!(loan_days(ItemCategory::Reference, PatronRole::Student), 0);
        assert_eq!(loan_days(ItemCategory::General, PatronRole::Teacher), 60);
        assert_eq!(loan_days(ItemCategory::General, PatronRole::Student), 30);
    }

    #[test]
    fn test_daily_fine_rates() {
        let cents: Vec<i64> = ItemCategory::ALL
            .iter()
            .map(|c| daily_fine_rate(*c).cents_per_day())
            .collect();
        assert_eq!(cents, vec![30, 100, 50, 80, 50]);
    }

    #[test]
    fn test_borrow_limits() {
        assert_eq!(borrow_limit(PatronRole::Student), 5);
        assert_eq!(borrow_limit(PatronRole::Teacher), 20);
        assert_eq!(borrow_limit(PatronRole::Librarian), 999);
    }

    #[test]
    fn test_reference_closed_to_students_only() {
        assert!(!role_may_borrow(ItemCategory::Reference, PatronRole::Student));
        assert!(role_may_borrow(ItemCategory::Reference, PatronRole::Teacher));
        assert!(role_may_borrow(ItemCategory::Reference, PatronRole::Librarian));
        assert!(role_may_borrow(ItemCategory::Textbook, PatronRole::Student));
    }
}
