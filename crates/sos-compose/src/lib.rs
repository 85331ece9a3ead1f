//! Document composer for service orders.
//!
//! Turns the finalized export snapshot into an ordered, renderer-agnostic
//! sequence of content blocks. Rendering to an actual file format lives in a
//! separate crate; nothing here performs I/O.

pub mod blocks;
pub mod compose;
pub mod format;

pub use blocks::{CellAlign, ContentBlock, TableBlock, TableColumn};
pub use compose::{Letterhead, compose};
pub use format::{export_file_stem, format_currency, format_date};
