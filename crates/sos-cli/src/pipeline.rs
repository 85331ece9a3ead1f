//! The export pipeline: replay order-file items through the ledger, validate
//! the header, build the snapshot, and compose the document blocks.

use anyhow::{Result, anyhow, bail};
use tracing::debug;

use sos_compose::{ContentBlock, Letterhead, compose, export_file_stem};
use sos_ledger::{ItemEdit, Ledger};
use sos_model::{ExportSnapshot, validate_header};

use crate::order_file::{ItemEntry, OrderDocument};

/// Everything the export command needs after validation and composition:
/// the finalized snapshot, the composed blocks, and the document file name.
#[derive(Debug, Clone)]
pub struct PreparedExport {
    pub snapshot: ExportSnapshot,
    pub blocks: Vec<ContentBlock>,
    pub file_name: String,
}

/// Replay order-file items through a fresh ledger.
///
/// Field edits go through `update_field` so totals are always derived, and
/// rows flagged as confirmed pass the same validation the form applies. The
/// first invalid item aborts with its field messages.
pub fn build_ledger(items: &[ItemEntry]) -> Result<Ledger> {
    if items.is_empty() {
        bail!("add at least one item to the order");
    }
    let mut ledger = Ledger::new();
    for (index, entry) in items.iter().enumerate() {
        let id = if index == 0 {
            ledger.items()[0].id
        } else {
            ledger.add_row()
        };
        ledger.update_field(id, ItemEdit::Quantity(entry.quantity))?;
        if !entry.code.is_empty() {
            ledger.update_field(id, ItemEdit::Code(entry.code.clone()))?;
        }
        ledger.update_field(id, ItemEdit::Description(entry.description.clone()))?;
        ledger.update_field(id, ItemEdit::UnitPrice(entry.unit_price))?;
        if entry.confirmed {
            ledger
                .confirm_row(id)
                .map_err(|error| anyhow!("item {}: {error}", index + 1))?;
        }
    }
    debug!(rows = ledger.len(), "ledger replayed from order file");
    Ok(ledger)
}

/// Validate, snapshot, and compose one order. Fails with the first header
/// issue, an invalid item, or the nothing-confirmed guard; on success the
/// caller only has to render and write.
pub fn prepare_export(order: OrderDocument, letterhead: &Letterhead) -> Result<PreparedExport> {
    let issues = validate_header(&order.header);
    if let Some(first) = issues.first() {
        for issue in &issues[1..] {
            debug!(%issue, "additional header issue");
        }
        bail!("{first}");
    }

    let ledger = build_ledger(&order.items)?;
    let snapshot = ledger.snapshot(order.header)?;
    let blocks = compose(letterhead, &snapshot);
    let file_name = format!(
        "{}.docx",
        export_file_stem(&snapshot.header.customer_name)
    );
    Ok(PreparedExport {
        snapshot,
        blocks,
        file_name,
    })
}
