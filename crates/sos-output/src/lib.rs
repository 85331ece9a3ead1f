//! Document rendering for service orders.
//!
//! Consumes the composer's content blocks and produces the downloadable
//! artifact. The composer never sees the byte format; callers only hand over
//! blocks and receive bytes or a written file.

pub mod docx;

pub use docx::{render_docx, write_docx};
