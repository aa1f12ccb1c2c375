//! Edge case tests for the marina ledger library.
//!
//! Exercises the public API end to end: loading, querying, billing and
//! saving a roster.

use marina_ledger::billing::{self, rate};
use marina_ledger::{
    decode, encode, Boat, LocationDetail, MarinaError, Money, PlacementCategory, Registry,
};
use std::fs;
use std::io::Cursor;
use std::str::FromStr;
use tempfile::TempDir;

const SCENARIO: &str = "Alice,20,slip,5,100.00\nBob,30,land,B,0.00\nCarl,15,trailer,TAG1,50.00";

fn load(csv: &str) -> Registry {
    Registry::load(Cursor::new(csv)).unwrap()
}

fn money(s: &str) -> Money {
    Money::from_str(s).unwrap()
}

fn save_to_string(registry: &Registry) -> String {
    let mut output = Vec::new();
    registry.save(&mut output).unwrap();
    String::from_utf8(output).unwrap()
}

// ==================== LOADING ====================

#[test]
fn test_scenario_three_line_file() {
    let registry = load(SCENARIO);
    assert_eq!(registry.len(), 3);

    let bob = registry.find_by_name("bob").unwrap();
    assert_eq!(bob.location(), &LocationDetail::Land('B'));

    let alice = registry.find_by_name("Alice").unwrap();
    assert_eq!(billing::monthly_charge(alice), money("250.0"));
}

#[test]
fn test_load_empty_input() {
    let registry = load("");
    assert!(registry.is_empty());
}

#[test]
fn test_load_handles_crlf_and_trailing_newline() {
    let registry = load("Alice,20,slip,5,100.00\r\nBob,30,land,B,0.00\r\n");
    assert_eq!(registry.len(), 2);
    assert_eq!(registry.find_by_name("bob").unwrap().amount_owed(), Money::ZERO);
}

#[test]
fn test_load_every_line_bad() {
    let registry = load("X,10,boat,1,0.00\nY,ten,slip,1,0.00\nZ\n");
    assert!(registry.is_empty());
}

#[test]
fn test_load_stops_adding_at_capacity() {
    let csv: String = (0..Registry::DEFAULT_CAPACITY + 5)
        .map(|i| format!("Boat{},10,slip,{},0.00\n", i, i))
        .collect();

    let registry = load(&csv);
    assert_eq!(registry.len(), Registry::DEFAULT_CAPACITY);
}

#[test]
fn test_load_path_missing_file_is_io_error() {
    let dir = TempDir::new().unwrap();
    let result = Registry::load_path(dir.path().join("absent.csv"));
    assert!(matches!(result, Err(MarinaError::Io(_))));
}

// ==================== CODEC ====================

#[test]
fn test_decode_unknown_category() {
    assert!(matches!(
        decode("X,10,boat,1,0.00"),
        Err(MarinaError::InvalidPlacement { .. })
    ));
}

#[test]
fn test_round_trip_constructed_boats() {
    let boats = [
        Boat::new("Slippy", 1, LocationDetail::Slip(0), money("0")).unwrap(),
        Boat::new("Lander", 99, LocationDetail::Land('z'), money("12.34")).unwrap(),
        Boat::new(
            "Tow Me",
            18,
            LocationDetail::trailer("ABCDEFGHIJKLMNOPQRS").unwrap(),
            money("0.01"),
        )
        .unwrap(),
        Boat::new("Stowed", 60, LocationDetail::Storage(4_000_000), money("99999.99")).unwrap(),
    ];

    for boat in &boats {
        assert_eq!(&decode(&encode(boat)).unwrap(), boat);
    }
}

#[test]
fn test_unstorable_locations_are_rejected_at_construction() {
    let long_tag = LocationDetail::Trailer("T".repeat(30));
    assert!(Boat::new("Long", 10, long_tag, Money::ZERO).is_err());

    let blank_bay = LocationDetail::Land(' ');
    assert!(Boat::new("Blank", 10, blank_bay, Money::ZERO).is_err());

    let comma_bay = LocationDetail::Land(',');
    assert!(Boat::new("Comma", 10, comma_bay, Money::ZERO).is_err());
}

#[test]
fn test_comma_in_name_corrupts_record() {
    let boat = Boat::new("Smith, Jr", 20, LocationDetail::Slip(1), Money::ZERO).unwrap();
    assert!(matches!(
        decode(&encode(&boat)),
        Err(MarinaError::MalformedRecord { .. })
    ));
}

// ==================== BILLING ====================

#[test]
fn test_monthly_charge_matches_rate_times_length() {
    for line in [
        "A,20,slip,1,0",
        "B,31,land,C,0",
        "C,7,trailor,T,0",
        "D,44,storage,2,0",
    ] {
        let boat = decode(line).unwrap();
        let expected = Money::per_foot(rate(boat.placement()), boat.length_feet());
        assert_eq!(billing::monthly_charge(&boat), expected);
    }
    assert!(rate(PlacementCategory::None).is_zero());
}

#[test]
fn test_payment_exceeding_balance_leaves_it_unchanged() {
    let mut registry = load(SCENARIO);
    let result = registry.accept_payment("Carl", money("50.01"));
    assert!(matches!(
        result,
        Err(MarinaError::PaymentExceedsBalance { .. })
    ));
    assert_eq!(registry.find_by_name("carl").unwrap().amount_owed(), money("50.00"));
}

#[test]
fn test_paying_full_balance_reaches_zero() {
    let mut registry = load(SCENARIO);
    let owed = registry.find_by_name("Alice").unwrap().amount_owed();
    let balance = registry.accept_payment("alice", owed).unwrap();
    assert!(balance.is_zero());
}

#[test]
fn test_advance_month_twice_double_bills() {
    let mut registry = load("Alice,20,slip,5,0.00");
    registry.advance_month().unwrap();
    registry.advance_month().unwrap();
    assert_eq!(registry.find_by_name("Alice").unwrap().amount_owed(), money("500.00"));
}

#[test]
fn test_huge_balance_cannot_crash_month_end() {
    let mut registry = load(SCENARIO);
    registry
        .add_from_record("Big,10,slip,1,79228162514264337593543950335")
        .unwrap();

    let result = registry.advance_month();
    assert!(matches!(result, Err(MarinaError::BalanceOverflow { .. })));
    assert_eq!(registry.find_by_name("Alice").unwrap().amount_owed(), money("100.00"));
}

#[test]
fn test_storage_rate_has_no_float_drift() {
    let mut registry = load("Drift,3,storage,1,0.00");
    for _ in 0..10 {
        registry.advance_month().unwrap();
    }
    assert_eq!(registry.find_by_name("Drift").unwrap().amount_owed(), money("336.00"));
}

// ==================== REGISTRY ====================

#[test]
fn test_remove_then_find_is_not_found() {
    let mut registry = load(SCENARIO);
    registry.remove_by_name("carl").unwrap();
    assert!(matches!(
        registry.find_by_name("Carl"),
        Err(MarinaError::NotFound { .. })
    ));
}

#[test]
fn test_add_at_capacity_keeps_size() {
    let mut registry = Registry::with_capacity(3);
    registry.load_into(Cursor::new(SCENARIO)).unwrap();
    assert_eq!(registry.len(), 3);

    let result = registry.add_from_record("Dora,40,storage,12,7.25");
    assert!(matches!(result, Err(MarinaError::RegistryFull { capacity: 3 })));
    assert_eq!(registry.len(), 3);
}

#[test]
fn test_sorted_listing_is_stable_and_case_insensitive() {
    let mut registry = Registry::new();
    registry.add_from_record("beta,10,slip,1,0").unwrap();
    registry.add_from_record("Alpha,11,slip,2,0").unwrap();
    registry.add_from_record("alphabet,12,slip,3,0").unwrap();
    registry.add_from_record("BETAMAX,13,slip,4,0").unwrap();

    let sorted: Vec<&str> = registry
        .list_sorted_by_name()
        .into_iter()
        .map(|b| b.name())
        .collect();
    assert_eq!(sorted, vec!["Alpha", "alphabet", "beta", "BETAMAX"]);
}

#[test]
fn test_listing_does_not_change_save_order() {
    let registry = load("Zulu,10,slip,1,0.00\nalpha,10,slip,2,0.00\nMike,10,slip,3,0.00\n");
    let before = save_to_string(&registry);
    let _ = registry.list_sorted_by_name();
    assert_eq!(save_to_string(&registry), before);
    assert!(before.starts_with("Zulu,"));
}

#[test]
fn test_save_path_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("roster.csv");

    let mut registry = load(SCENARIO);
    registry.accept_payment("Alice", money("0.01")).unwrap();
    registry.save_path(&path).unwrap();

    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "Alice,20,slip,5,99.99\nBob,30,land,B,0.00\nCarl,15,trailor,TAG1,50.00\n"
    );

    let reloaded = Registry::load_path(&path).unwrap();
    assert_eq!(
        reloaded.iter().collect::<Vec<_>>(),
        registry.iter().collect::<Vec<_>>()
    );
}

#[test]
fn test_save_overwrites_previous_contents() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("roster.csv");
    fs::write(&path, "Old,1,slip,1,0.00\nOlder,2,slip,2,0.00\n").unwrap();

    load("New,3,land,N,0.00").save_path(&path).unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "New,3,land,N,0.00\n");
}

#[test]
fn test_save_failure_leaves_registry_unchanged() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("no-such-dir").join("roster.csv");

    let registry = load(SCENARIO);
    let before = save_to_string(&registry);

    assert!(matches!(registry.save_path(&path), Err(MarinaError::Io(_))));
    assert_eq!(registry.len(), 3);
    assert_eq!(save_to_string(&registry), before);
}
