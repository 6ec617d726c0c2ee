//! Scenario: draft order aggregation.
//!
//! # Invariants under test
//! - `order_total == Σ line_total` after any sequence of edits.
//! - Adding a product already in the draft bumps its quantity.
//! - A quantity reduced to zero removes the line.
//!
//! All tests are pure; no IO, no network.

use rom_money::Money;
use rom_orders::{line_total, order_total, DraftOrder};
use rom_schemas::{Product, ProductId};

fn product(id: i64, name: &str, price: &str) -> Product {
    Product {
        id: ProductId::Num(id),
        name: name.to_string(),
        price: Money::parse_decimal(price).unwrap(),
        created_at: None,
        updated_at: None,
    }
}

fn assert_totals_consistent(draft: &DraftOrder) {
    for line in draft.lines() {
        assert!(line.quantity >= 1);
        assert_eq!(Some(line.total), line_total(line.quantity, line.unit_price));
    }
    let expected: Money = draft.lines().iter().map(|l| l.total).sum();
    assert_eq!(draft.total(), expected);
    assert_eq!(order_total(draft.lines()), Some(expected));
}

#[test]
fn burger_and_soda_total() {
    let burger = product(1, "Burger", "25.90");
    let soda = product(2, "Soda", "8.00");

    let mut draft = DraftOrder::new();
    draft.add_product(&burger).unwrap();
    draft.add_product(&soda).unwrap();
    draft.add_product(&burger).unwrap();

    assert_eq!(draft.lines().len(), 2);
    assert_eq!(draft.total(), Money::from_cents(5_980));
    assert_eq!(draft.total().to_string(), "59.80");
    assert_totals_consistent(&draft);
}

#[test]
fn adding_x_twice_yields_one_line_of_two() {
    let x = product(9, "X", "3.50");
    let mut draft = DraftOrder::new();
    draft.add_product(&x).unwrap();
    draft.add_product(&x).unwrap();

    assert_eq!(draft.lines().len(), 1);
    assert_eq!(draft.lines()[0].quantity, 2);
    assert_totals_consistent(&draft);
}

#[test]
fn reducing_to_zero_removes_line() {
    let mut draft = DraftOrder::new();
    let fries = draft.add_product(&product(3, "Batata Frita", "12.50")).unwrap();
    draft.add_product(&product(5, "Salada Caesar", "18.90")).unwrap();

    draft.adjust_quantity(&fries, -1).unwrap();

    assert_eq!(draft.lines().len(), 1);
    assert_eq!(draft.lines()[0].product_name, "Salada Caesar");
    assert_totals_consistent(&draft);
}

#[test]
fn totals_stay_consistent_through_edits() {
    let menu = [
        product(1, "Hambúrguer Clássico", "25.90"),
        product(2, "Pizza Margherita", "35.00"),
        product(3, "Batata Frita", "12.50"),
        product(4, "Refrigerante", "8.00"),
    ];
    let mut draft = DraftOrder::new();
    let mut ids = Vec::new();
    for p in &menu {
        ids.push(draft.add_product(p).unwrap());
        assert_totals_consistent(&draft);
    }

    draft.set_quantity(&ids[1], 3).unwrap();
    assert_totals_consistent(&draft);
    draft.set_quantity(&ids[2], 0).unwrap();
    assert_totals_consistent(&draft);
    draft.adjust_quantity(&ids[0], 4).unwrap();
    assert_totals_consistent(&draft);

    // 5 × 25.90 + 3 × 35.00 + 1 × 8.00
    assert_eq!(draft.total(), Money::from_cents(12_950 + 10_500 + 800));
}
