//! Integration tests for the cart store, driven through the public API the way a front end
//! would: dispatch intents, read snapshots, render badges and checkout summaries.
//!
//! The walkthrough below starts from an empty cart:
//!
//! 1. Add product 1 at $199.99 -> one line, quantity 1, total $199.99
//! 2. Add product 1 again -> still one line, quantity 2, total $399.98
//! 3. Add product 2 at $49.99 -> total $449.97
//! 4. Remove product 1 -> only product 2 remains, total $49.99
//! 5. Clear -> no lines, total $0.00

use std::{cell::RefCell, rc::Rc};

use rusty_money::{Money, iso::USD};
use testresult::TestResult;

use storefront::prelude::*;

fn product(id: &str, minor: i64) -> Product<'static> {
    Product::new(id, format!("Product {id}"), Money::from_minor(minor, USD))
}

fn lines(state: &CartState<'_>) -> Vec<(String, u32)> {
    state
        .iter()
        .map(|line| (line.id().to_string(), line.quantity()))
        .collect()
}

#[test]
fn cart_walkthrough() {
    let mut store = CartStore::new(USD);

    store.add_to_cart(product("1", 19999));
    assert_eq!(lines(store.state()), vec![("1".to_string(), 1)]);
    assert_eq!(store.state().total(), Money::from_minor(19999, USD));

    store.add_to_cart(product("1", 19999));
    assert_eq!(lines(store.state()), vec![("1".to_string(), 2)]);
    assert_eq!(store.state().total(), Money::from_minor(39998, USD));

    store.add_to_cart(product("2", 4999));
    assert_eq!(store.state().total(), Money::from_minor(44997, USD));

    store.remove_from_cart("1");
    assert_eq!(lines(store.state()), vec![("2".to_string(), 1)]);
    assert_eq!(store.state().total(), Money::from_minor(4999, USD));

    store.clear_cart();
    assert!(store.state().is_empty());
    assert_eq!(store.state().total(), Money::from_minor(0, USD));
}

#[test]
fn observers_receive_snapshots_in_step() {
    let totals = Rc::new(RefCell::new(Vec::new()));
    let mut store = CartStore::new(USD);

    let recorded = Rc::clone(&totals);
    store.subscribe(move |state: &CartState<'_>| {
        recorded.borrow_mut().push(state.total().to_minor_units());
    });

    store.add_to_cart(product("1", 19999));
    store.add_to_cart(product("1", 19999));
    store.add_to_cart(product("2", 4999));
    store.remove_from_cart("1");
    store.clear_cart();

    assert_eq!(*totals.borrow(), vec![19999, 39998, 44997, 4999, 0]);
}

#[test]
fn clear_from_any_state_empties_cart() {
    let mut state = CartState::new(USD);

    for id in ["1", "2", "2", "3"] {
        state = reduce(state, CartAction::Add(product(id, 1000)));

        let cleared = reduce(state.clone(), CartAction::Clear);

        assert!(cleared.is_empty());
        assert_eq!(cleared.total(), Money::from_minor(0, USD));
    }
}

#[test]
fn shopping_session_reaches_checkout() -> TestResult {
    let mut session = Session::new(Catalog::storefront()?);

    // Headphones are 25% off: $399.99 -> $299.99
    session.add_to_cart("4")?;
    session.add_to_cart("4")?;
    // Mouse has no discount
    session.add_to_cart("6")?;
    session.remove_from_cart("missing");

    let summary = session.checkout()?;

    assert_eq!(summary.item_count(), 3);
    assert_eq!(summary.subtotal(), Money::from_minor(69997, USD));
    assert_eq!(summary.total(), session.cart().total());

    let mut printed = Vec::new();
    summary.write_to(&mut printed)?;

    let printed = String::from_utf8(printed)?;

    assert!(printed.contains("Sony WH-1000XM5"));
    assert!(printed.contains("Subtotal (3 items): $699.97"));

    session.clear_cart();

    assert!(session.checkout()?.is_empty());

    Ok(())
}

#[test]
fn session_rejects_unknown_products() -> TestResult {
    let mut session = Session::new(Catalog::storefront()?);

    assert!(matches!(
        session.add_to_cart("0"),
        Err(SessionError::ProductNotFound(_))
    ));
    assert!(session.cart().is_empty());

    Ok(())
}
