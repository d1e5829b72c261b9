//! End-to-end circulation scenarios against the in-memory library.

use chrono::{DateTime, Duration, TimeZone, Utc};
use lectern_core::{ErrorKind, Item, ItemCategory, Patron, PatronRole};
use lectern_store::{Library, LibraryConfig, StoreError};

fn day(n: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 9, 1, 8, 30, 0).unwrap() + Duration::days(n)
}

fn campus_library() -> Library {
    let mut library = Library::new(&LibraryConfig::default());

    let items = [
        Item::new("B001", "Thinking in Java", ItemCategory::Textbook).with_author("Bruce Eckel"),
        Item::new("B002", "Data Structures in C", ItemCategory::Textbook),
        Item::new("R001", "Modern Chinese Dictionary", ItemCategory::Reference),
        Item::new("F001", "The Three-Body Problem", ItemCategory::Fiction).with_author("Liu Cixin"),
        Item::new("F002", "To Live", ItemCategory::Fiction).with_author("Yu Hua"),
        Item::new("F003", "Fortress Besieged", ItemCategory::Fiction),
        Item::new("F004", "Border Town", ItemCategory::Fiction),
        Item::new("P001", "Reader's Digest", ItemCategory::Periodical),
    ];
    for item in items {
        library.add_item(item).unwrap();
    }

    library
        .add_patron(
            Patron::new("S001", "Wang Xiaoming", PatronRole::Student).with_card_number("2024001"),
        )
        .unwrap();
    library
        .add_patron(Patron::new("T001", "Zhang Wei", PatronRole::Teacher))
        .unwrap();
    library
        .add_patron(Patron::new("L001", "Chen Jing", PatronRole::Librarian))
        .unwrap();

    library
}

fn assert_consistent(library: &Library) {
    assert!(library.audit().is_empty(), "audit: {:?}", library.audit());

    for item in library.items().iter() {
        assert_eq!(item.is_available(), item.borrower_id().is_none());
        assert_eq!(item.is_available(), item.due_on().is_none());
    }
    for patron in library.patrons().iter() {
        assert!(patron.borrowed_count() <= patron.max_borrow_limit());
    }
}

#[test]
fn test_student_textbook_returned_five_days_late() {
    let mut library = campus_library();

    let receipt = library.checkout("B001", "S001", day(0)).unwrap();
    assert_eq!(receipt.due_on, day(60));
    assert_consistent(&library);

    let outcome = library.check_in("B001", day(65)).unwrap();

    assert!(outcome.overdue);
    assert_eq!(outcome.overdue_days, 5);
    assert_eq!(outcome.fine.cents(), 150);
    assert_eq!(outcome.fine.to_string(), "1.50");
    assert_consistent(&library);
}

#[test]
fn test_teacher_gets_longer_textbook_loan() {
    let mut library = campus_library();

    let teacher = library.checkout("B001", "T001", day(0)).unwrap();
    let student = library.checkout("B002", "S001", day(0)).unwrap();

    assert_eq!(teacher.due_on, day(90));
    assert_eq!(student.due_on, day(60));
}

#[test]
fn test_fiction_three_days_late() {
    let mut library = campus_library();
    library.checkout("F001", "T001", day(0)).unwrap();

    let outcome = library.check_in("F001", day(33)).unwrap();

    assert_eq!(outcome.fine.to_string(), "1.50");
}

#[test]
fn test_on_time_return_has_no_fine() {
    let mut library = campus_library();
    library.checkout("P001", "S001", day(0)).unwrap();

    let outcome = library.check_in("P001", day(14)).unwrap();

    assert!(!outcome.overdue);
    assert!(outcome.fine.is_zero());
}

#[test]
fn test_student_never_borrows_reference() {
    let mut library = campus_library();

    let err = library.checkout("R001", "S001", day(0)).unwrap_err();
    assert_eq!(err.code(), "LIB_2003");
    assert!(library.items().find_by_id("R001").unwrap().is_available());

    let receipt = library.checkout("R001", "L001", day(0)).unwrap();
    assert_eq!(receipt.due_on, day(0));
    assert_consistent(&library);
}

#[test]
fn test_student_limit_of_five() {
    let mut library = campus_library();

    for id in ["B001", "B002", "F001", "F002", "F003"] {
        library.checkout(id, "S001", day(0)).unwrap();
    }

    assert!(!library.can_borrow("F004", "S001").unwrap());
    let err = library.checkout("F004", "S001", day(1)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotEligible);
    assert_eq!(err.code(), "LIB_2002");

    let patron = library.patrons().find_by_id("S001").unwrap();
    assert_eq!(patron.borrowed_count(), 5);
    assert_eq!(patron.remaining_capacity(), 0);
    assert_consistent(&library);

    library.check_in("F002", day(2)).unwrap();
    assert!(library.can_borrow("F004", "S001").unwrap());
}

#[test]
fn test_loan_round_trip_restores_state() {
    let mut library = campus_library();
    let before = library.items().find_by_id("F002").unwrap().clone();

    library.checkout("F002", "T001", day(0)).unwrap();
    library.check_in("F002", day(3)).unwrap();

    assert_eq!(library.items().find_by_id("F002").unwrap(), &before);
    assert_eq!(library.patrons().find_by_id("T001").unwrap().borrowed_count(), 0);
    assert_consistent(&library);
}

#[test]
fn test_loans_listed_by_patron() {
    let mut library = campus_library();
    library.checkout("B001", "T001", day(0)).unwrap();
    library.checkout("P001", "T001", day(0)).unwrap();
    library.checkout("F001", "S001", day(0)).unwrap();

    let by_due: Vec<&str> = library
        .items()
        .list_borrowed_by_due_date("T001")
        .iter()
        .map(|item| item.id())
        .collect();
    assert_eq!(by_due, vec!["P001", "B001"]);

    let overdue: Vec<&str> = library
        .items()
        .list_overdue(day(31))
        .iter()
        .map(|item| item.id())
        .collect();
    assert_eq!(overdue, vec!["F001", "P001"]);

    let stats = library.items().stats();
    assert_eq!((stats.total, stats.available, stats.borrowed), (8, 5, 3));
}

#[test]
fn test_duplicate_registration_is_rejected() {
    let mut library = campus_library();

    let err = library
        .add_item(Item::new("F001", "Duplicate", ItemCategory::General))
        .unwrap_err();
    assert!(matches!(err, StoreError::DuplicateId { .. }));
    assert_eq!(
        library.items().find_by_id("F001").unwrap().title,
        "The Three-Body Problem"
    );

    let err = library
        .add_patron(Patron::new("S001", "Impostor", PatronRole::Librarian))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DuplicateId);
    assert_eq!(library.patrons().count_by_role(PatronRole::Librarian), 1);
}

#[test]
fn test_removed_item_is_gone() {
    let mut library = campus_library();

    library.remove_item("F004").unwrap();

    assert!(library.items().find_by_id("F004").is_none());
    assert_eq!(library.checkout("F004", "S001", day(0)).unwrap_err().code(), "LIB_1001");
}

#[test]
fn test_item_lent_outside_the_library_cannot_be_added() {
    let mut library = campus_library();
    let mut item = Item::new("B010", "Clean Code", ItemCategory::Textbook);
    let mut outsider = Patron::new("S001", "Wang Xiaoming", PatronRole::Student);
    item.checkout(&mut outsider, day(0)).unwrap();

    let err = library.add_item(item).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::InvalidInput);
    assert!(library.items().find_by_id("B010").is_none());
    assert_consistent(&library);
}

#[test]
fn test_student_limit_holds_for_restored_patron() {
    let mut library = Library::default();
    for i in 0..8 {
        let id = format!("F{:03}", i);
        library
            .add_item(Item::new(id, "Short Stories", ItemCategory::Fiction))
            .unwrap();
    }

    let restored: Patron = serde_json::from_str(
        r#"{"id":"S020","name":"Zhou","role":"student","borrowedCount":0,"maxBorrowLimit":50}"#,
    )
    .unwrap();
    library.add_patron(restored).unwrap();

    let lent = (0..8)
        .filter(|i| library.checkout(&format!("F{:03}", i), "S020", day(0)).is_ok())
        .count();

    assert_eq!(lent, 5);
    assert_consistent(&library);
}
