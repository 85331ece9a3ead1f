use serde::{Deserialize, Serialize};

use crate::header::OrderHeader;
use crate::item::LineItem;

/// Ephemeral view handed to the document composer: header fields, the
/// confirmed line items in ledger order, and their summed total.
///
/// Built once per export action and dropped afterwards; never kept as live
/// state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportSnapshot {
    pub header: OrderHeader,
    pub items: Vec<LineItem>,
    pub grand_total: f64,
}
