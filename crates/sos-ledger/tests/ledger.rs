//! Unit tests for ledger operations and guards.

use sos_ledger::{ConfirmError, ItemEdit, Ledger, LedgerError};
use sos_model::OrderHeader;

fn first_id(ledger: &Ledger) -> sos_model::ItemId {
    ledger.items()[0].id
}

fn priced_row(ledger: &mut Ledger, id: sos_model::ItemId, quantity: f64, unit_price: f64) {
    ledger
        .update_field(id, ItemEdit::Quantity(quantity))
        .unwrap();
    ledger
        .update_field(id, ItemEdit::Description("oil change".to_string()))
        .unwrap();
    ledger
        .update_field(id, ItemEdit::UnitPrice(unit_price))
        .unwrap();
}

#[test]
fn new_ledger_has_one_unconfirmed_default_row() {
    let ledger = Ledger::new();
    assert_eq!(ledger.len(), 1);
    let row = &ledger.items()[0];
    assert_eq!(row.quantity, 1.0);
    assert_eq!(row.unit_price, 0.0);
    assert_eq!(row.total, 0.0);
    assert!(!row.confirmed);
}

#[test]
fn total_follows_quantity_and_unit_price() {
    let mut ledger = Ledger::new();
    let id = first_id(&ledger);
    priced_row(&mut ledger, id, 2.0, 10.0);
    assert_eq!(ledger.get(id).unwrap().total, 20.0);

    ledger.update_field(id, ItemEdit::Quantity(3.0)).unwrap();
    assert_eq!(ledger.get(id).unwrap().total, 30.0);
}

#[test]
fn confirm_then_grand_total() {
    let mut ledger = Ledger::new();
    let id = first_id(&ledger);
    priced_row(&mut ledger, id, 2.0, 10.0);
    ledger.confirm_row(id).unwrap();
    assert_eq!(ledger.grand_total(), 20.0);
}

#[test]
fn grand_total_ignores_unconfirmed_rows() {
    let mut ledger = Ledger::new();
    let first = first_id(&ledger);
    priced_row(&mut ledger, first, 1.0, 15.0);
    ledger.confirm_row(first).unwrap();

    let second = ledger.add_row();
    priced_row(&mut ledger, second, 1.0, 999.0);
    // second row stays unconfirmed
    assert_eq!(ledger.grand_total(), 15.0);

    let snapshot = ledger.snapshot(OrderHeader::default()).unwrap();
    assert_eq!(snapshot.items.len(), 1);
    assert_eq!(snapshot.grand_total, 15.0);
}

#[test]
fn editing_priced_field_reverts_confirmation() {
    let mut ledger = Ledger::new();
    let id = first_id(&ledger);
    priced_row(&mut ledger, id, 2.0, 10.0);
    ledger.confirm_row(id).unwrap();
    assert!(ledger.get(id).unwrap().confirmed);

    ledger
        .update_field(id, ItemEdit::Code("BR-123".to_string()))
        .unwrap();
    assert!(!ledger.get(id).unwrap().confirmed);
    assert_eq!(ledger.grand_total(), 0.0);
}

#[test]
fn confirm_rejects_invalid_rows_and_leaves_state() {
    let mut ledger = Ledger::new();
    let id = first_id(&ledger);
    // description too short, unit price below a cent
    ledger
        .update_field(id, ItemEdit::Description("ok".to_string()))
        .unwrap();
    let before = ledger.get(id).unwrap().clone();
    let error = ledger.confirm_row(id).unwrap_err();
    match error {
        ConfirmError::Invalid { issues } => {
            let fields: Vec<&str> = issues.iter().map(|issue| issue.field.as_str()).collect();
            assert!(fields.contains(&"description"));
            assert!(fields.contains(&"unit_price"));
            assert!(fields.contains(&"total"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(ledger.get(id).unwrap(), &before);
}

#[test]
fn confirm_rejects_quantity_below_one() {
    let mut ledger = Ledger::new();
    let id = first_id(&ledger);
    priced_row(&mut ledger, id, 0.5, 10.0);
    let error = ledger.confirm_row(id).unwrap_err();
    match error {
        ConfirmError::Invalid { issues } => {
            assert!(issues.iter().any(|issue| issue.field == "quantity"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn last_row_cannot_be_removed() {
    let mut ledger = Ledger::new();
    let id = first_id(&ledger);
    assert_eq!(ledger.remove_row(id), Err(LedgerError::MinimumRows));
    assert_eq!(ledger.len(), 1);
}

#[test]
fn non_last_rows_are_removable() {
    let mut ledger = Ledger::new();
    let first = first_id(&ledger);
    let second = ledger.add_row();
    ledger.remove_row(first).unwrap();
    assert_eq!(ledger.len(), 1);
    assert_eq!(ledger.items()[0].id, second);
}

#[test]
fn unknown_ids_are_surfaced() {
    let mut ledger = Ledger::new();
    let ghost = sos_model::ItemId::new(999);
    assert_eq!(
        ledger.update_field(ghost, ItemEdit::Quantity(2.0)),
        Err(LedgerError::UnknownItem(ghost))
    );
    assert_eq!(
        ledger.confirm_row(ghost),
        Err(ConfirmError::UnknownItem(ghost))
    );
    ledger.add_row();
    assert_eq!(
        ledger.remove_row(ghost),
        Err(LedgerError::UnknownItem(ghost))
    );
}

#[test]
fn snapshot_requires_a_confirmed_row() {
    let ledger = Ledger::new();
    assert_eq!(
        ledger.snapshot(OrderHeader::default()).unwrap_err(),
        LedgerError::NothingConfirmed
    );
}

#[test]
fn non_finite_numbers_cannot_be_confirmed() {
    let mut ledger = Ledger::new();
    let id = first_id(&ledger);
    priced_row(&mut ledger, id, 2.0, 10.0);

    ledger
        .update_field(id, ItemEdit::Quantity(f64::NAN))
        .unwrap();
    let error = ledger.confirm_row(id).unwrap_err();
    match error {
        ConfirmError::Invalid { issues } => {
            assert!(issues.iter().any(|issue| issue.field == "quantity"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(ledger.grand_total().is_finite());

    ledger.update_field(id, ItemEdit::Quantity(2.0)).unwrap();
    ledger
        .update_field(id, ItemEdit::UnitPrice(f64::INFINITY))
        .unwrap();
    let error = ledger.confirm_row(id).unwrap_err();
    match error {
        ConfirmError::Invalid { issues } => {
            assert!(issues.iter().any(|issue| issue.field == "unit_price"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(ledger.grand_total().is_finite());
}

#[test]
fn fractional_prices_round_to_cents() {
    let mut ledger = Ledger::new();
    let id = first_id(&ledger);
    priced_row(&mut ledger, id, 3.0, 1.15);
    assert_eq!(ledger.get(id).unwrap().total, 3.45);
}
