//! CLI library components for Service Order Studio.

pub mod logging;
pub mod order_file;
pub mod pipeline;
