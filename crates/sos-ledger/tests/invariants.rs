//! Property tests for the ledger invariants: the row count never drops below
//! one, totals always equal the rounded product of their factors, and the
//! grand total tracks exactly the confirmed rows.

use proptest::prelude::*;

use sos_ledger::{ItemEdit, Ledger};
use sos_model::round2;

#[derive(Debug, Clone)]
enum Op {
    Add,
    EditQuantity(usize, f64),
    EditUnitPrice(usize, f64),
    EditDescription(usize, String),
    Confirm(usize),
    Remove(usize),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        Just(Op::Add),
        (any::<usize>(), 0.0f64..1000.0).prop_map(|(i, q)| Op::EditQuantity(i, q)),
        (any::<usize>(), 0.0f64..1000.0).prop_map(|(i, p)| Op::EditUnitPrice(i, p)),
        (any::<usize>(), "[a-z ]{0,12}").prop_map(|(i, d)| Op::EditDescription(i, d)),
        any::<usize>().prop_map(Op::Confirm),
        any::<usize>().prop_map(Op::Remove),
    ]
}

/// Map an arbitrary index onto a live row id.
fn pick_id(ledger: &Ledger, index: usize) -> sos_model::ItemId {
    let items = ledger.items();
    items[index % items.len()].id
}

fn apply(ledger: &mut Ledger, op: Op) {
    match op {
        Op::Add => {
            ledger.add_row();
        }
        Op::EditQuantity(index, quantity) => {
            let id = pick_id(ledger, index);
            ledger.update_field(id, ItemEdit::Quantity(quantity)).unwrap();
        }
        Op::EditUnitPrice(index, price) => {
            let id = pick_id(ledger, index);
            ledger.update_field(id, ItemEdit::UnitPrice(price)).unwrap();
        }
        Op::EditDescription(index, description) => {
            let id = pick_id(ledger, index);
            ledger
                .update_field(id, ItemEdit::Description(description))
                .unwrap();
        }
        Op::Confirm(index) => {
            let id = pick_id(ledger, index);
            // Confirmation may legitimately fail validation; state must hold
            // either way.
            let _ = ledger.confirm_row(id);
        }
        Op::Remove(index) => {
            let id = pick_id(ledger, index);
            let _ = ledger.remove_row(id);
        }
    }
}

fn check_invariants(ledger: &Ledger) {
    assert!(!ledger.is_empty(), "ledger dropped below one row");
    for item in ledger.items() {
        assert_eq!(
            item.total,
            round2(item.quantity * item.unit_price),
            "stale total on row {}",
            item.id
        );
    }
    let expected: f64 = ledger
        .items()
        .iter()
        .filter(|item| item.confirmed)
        .map(|item| item.total)
        .sum();
    assert_eq!(ledger.grand_total(), round2(expected));
}

proptest! {
    #[test]
    fn invariants_hold_under_arbitrary_op_sequences(
        ops in proptest::collection::vec(op_strategy(), 0..64)
    ) {
        let mut ledger = Ledger::new();
        for op in ops {
            apply(&mut ledger, op);
            check_invariants(&ledger);
        }
    }

    #[test]
    fn grand_total_is_invariant_under_unconfirmed_edits(
        price in 0.01f64..500.0,
        noise in 0.0f64..500.0,
    ) {
        let mut ledger = Ledger::new();
        let first = ledger.items()[0].id;
        ledger.update_field(first, ItemEdit::Description("brake pads".to_string())).unwrap();
        ledger.update_field(first, ItemEdit::UnitPrice(price)).unwrap();
        ledger.confirm_row(first).unwrap();
        let confirmed_total = ledger.grand_total();

        let second = ledger.add_row();
        ledger.update_field(second, ItemEdit::UnitPrice(noise)).unwrap();
        ledger.update_field(second, ItemEdit::Quantity(7.0)).unwrap();
        prop_assert_eq!(ledger.grand_total(), confirmed_total);
    }
}
