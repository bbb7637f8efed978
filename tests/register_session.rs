//! Scripted register sessions against the bundled store.

use std::io::Cursor;

use jiff::{Timestamp, Zoned, tz::TimeZone};
use tempfile::TempDir;
use testresult::TestResult;

use spaza_till::prelude::*;

fn fixed_clock() -> Zoned {
    Timestamp::constant(1_791_983_045, 123_000_000).to_zoned(TimeZone::UTC)
}

#[test]
fn full_sale_from_login_to_saved_receipt() -> TestResult {
    let store = Fixture::bundled_store()?;
    let temp_dir = TempDir::new()?;

    let script = "\
\n\
Thandi\n\
categories\n\
products snacks\n\
add 1\n\
add 1\n\
add 5\n\
qty 2 0\n\
cart\n\
checkout\n\
quit\n";

    let mut register = Register::new(&store, Cursor::new(script), Vec::new())
        .with_clock(fixed_clock)
        .with_receipts_dir(temp_dir.path());

    let receipts = register.run(None)?;
    let output = String::from_utf8(register.into_output())?;

    assert_eq!(receipts, 1);
    assert!(output.contains("Please enter your name"));
    assert!(output.contains("Snacks"));
    assert!(output.contains("Simba Chips"));
    assert!(output.contains("Please enter a valid quantity"));
    assert!(output.contains("Cashier: Thandi\n"));
    assert!(output.contains("SUBTOTAL: R   27.97\n"));
    assert!(output.contains("VAT (15%): R    4.20\n"));
    assert!(output.contains("TOTAL: R   32.17\n"));

    let saved = std::fs::read_to_string(
        temp_dir
            .path()
            .join("receipt-2026-10-14T13-04-05-123Z.txt"),
    )?;

    assert!(saved.starts_with("=== GEDLEHLEKISA SPAZA ===\n"));
    assert!(saved.ends_with("========================\n"));

    Ok(())
}

#[test]
fn checkout_with_empty_cart_is_refused() -> TestResult {
    let store = Fixture::bundled_store()?;

    let mut register = Register::new(&store, Cursor::new("checkout\nquit\n"), Vec::new())
        .with_clock(fixed_clock);

    assert_eq!(register.run(Some("Thandi"))?, 0);

    let output = String::from_utf8(register.into_output())?;

    assert!(output.contains("Your cart is empty!"));
    assert!(!output.contains("THANK YOU"));

    Ok(())
}
