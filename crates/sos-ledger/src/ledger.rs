use tracing::debug;

use sos_model::{ExportSnapshot, FieldIssue, ItemId, LineItem, MIN_AMOUNT, OrderHeader, round2};

use crate::error::{ConfirmError, LedgerError};

/// One field edit applied to a line item.
///
/// Edits are the only way row fields change, which keeps the two row
/// invariants in one place: the derived total is recomputed whenever a factor
/// changes, and editing a confirmed row always drops it back to editing state.
#[derive(Debug, Clone, PartialEq)]
pub enum ItemEdit {
    Quantity(f64),
    Code(String),
    Description(String),
    UnitPrice(f64),
}

impl ItemEdit {
    fn touches_total(&self) -> bool {
        matches!(self, ItemEdit::Quantity(_) | ItemEdit::UnitPrice(_))
    }
}

/// The ordered collection of part/service rows for one form session.
///
/// Exactly one ledger exists per session. It never drops below one row, and
/// every mutation goes through an explicit operation so the row state machine
/// (`Editing ⇄ Confirmed`) stays observable.
#[derive(Debug, Clone)]
pub struct Ledger {
    items: Vec<LineItem>,
    next_id: u64,
}

impl Ledger {
    /// A new ledger starts with a single default row, mirroring the form's
    /// initial state. The default row is not confirmed.
    pub fn new() -> Self {
        let mut ledger = Self {
            items: Vec::new(),
            next_id: 0,
        };
        let id = ledger.allocate_id();
        ledger.items.push(LineItem::with_defaults(id));
        ledger
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: ItemId) -> Option<&LineItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Append a default row and return its id. Always succeeds.
    pub fn add_row(&mut self) -> ItemId {
        let id = self.allocate_id();
        self.items.push(LineItem::with_defaults(id));
        debug!(item = %id, rows = self.items.len(), "line item added");
        id
    }

    /// Apply one field edit to the addressed row.
    ///
    /// Recomputes the derived total when `quantity` or `unit_price` changed,
    /// and reverts a confirmed row to editing state on any edit.
    pub fn update_field(&mut self, id: ItemId, edit: ItemEdit) -> Result<(), LedgerError> {
        let item = self
            .items
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or(LedgerError::UnknownItem(id))?;
        let recompute = edit.touches_total();
        match edit {
            ItemEdit::Quantity(quantity) => item.quantity = quantity,
            ItemEdit::Code(code) => item.code = code,
            ItemEdit::Description(description) => item.description = description,
            ItemEdit::UnitPrice(unit_price) => item.unit_price = unit_price,
        }
        if recompute {
            item.recompute_total();
        }
        if item.confirmed {
            item.confirmed = false;
            debug!(item = %id, "edit reverted confirmation");
        }
        Ok(())
    }

    /// Validate the addressed row and mark it confirmed.
    ///
    /// Every failing field is reported; the row keeps its previous state on
    /// failure.
    pub fn confirm_row(&mut self, id: ItemId) -> Result<(), ConfirmError> {
        let item = self
            .items
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or(ConfirmError::UnknownItem(id))?;
        let issues = row_issues(item);
        if !issues.is_empty() {
            return Err(ConfirmError::Invalid { issues });
        }
        item.confirmed = true;
        debug!(item = %id, total = item.total, "line item confirmed");
        Ok(())
    }

    /// Remove the addressed row, refusing to drop the last one.
    pub fn remove_row(&mut self, id: ItemId) -> Result<(), LedgerError> {
        if self.items.len() == 1 {
            return Err(LedgerError::MinimumRows);
        }
        let index = self
            .items
            .iter()
            .position(|item| item.id == id)
            .ok_or(LedgerError::UnknownItem(id))?;
        self.items.remove(index);
        debug!(item = %id, rows = self.items.len(), "line item removed");
        Ok(())
    }

    /// Sum of totals over confirmed rows, derived from current state.
    pub fn grand_total(&self) -> f64 {
        let sum: f64 = self
            .items
            .iter()
            .filter(|item| item.confirmed)
            .map(|item| item.total)
            .sum();
        round2(sum)
    }

    pub fn has_confirmed(&self) -> bool {
        self.items.iter().any(|item| item.confirmed)
    }

    /// Build the export snapshot: confirmed rows in ledger order plus the
    /// grand total. Fails when nothing is confirmed (export precondition).
    pub fn snapshot(&self, header: OrderHeader) -> Result<ExportSnapshot, LedgerError> {
        if !self.has_confirmed() {
            return Err(LedgerError::NothingConfirmed);
        }
        let items: Vec<LineItem> = self
            .items
            .iter()
            .filter(|item| item.confirmed)
            .cloned()
            .collect();
        Ok(ExportSnapshot {
            header,
            grand_total: self.grand_total(),
            items,
        })
    }

    fn allocate_id(&mut self) -> ItemId {
        let id = ItemId::new(self.next_id);
        self.next_id += 1;
        id
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

const DESCRIPTION_MIN: usize = 3;

/// Confirmation-time validation of one row, mirroring the form schema:
/// quantity at least 1, description at least 3 characters, unit price and
/// total at least one cent. Non-finite numbers fail the same checks; a `<`
/// comparison alone would let NaN through.
fn row_issues(item: &LineItem) -> Vec<FieldIssue> {
    let mut issues = Vec::new();
    if !item.quantity.is_finite() || item.quantity < 1.0 {
        issues.push(FieldIssue::new("quantity", "quantity must be at least 1"));
    }
    if item.description.trim().chars().count() < DESCRIPTION_MIN {
        issues.push(FieldIssue::new(
            "description",
            format!("description must have at least {DESCRIPTION_MIN} characters"),
        ));
    }
    if !item.unit_price.is_finite() || item.unit_price < MIN_AMOUNT {
        issues.push(FieldIssue::new(
            "unit_price",
            "unit price must be at least 0.01",
        ));
    }
    if !item.total.is_finite() || item.total < MIN_AMOUNT {
        issues.push(FieldIssue::new("total", "total must be at least 0.01"));
    }
    issues
}
