//! Fabric cutting layouts for curtains.
//!
//! Given the finished curtain size and the rolls in stock, [`Optimizer`] finds
//! the panel count and roll width that leave the least fabric over.

pub mod format;
mod optimizer;
mod types;

pub use format::{format_solution, DisplayUnit};
pub use optimizer::{enumerate_candidates, find_optimal_solution, Optimizer};
pub use types::*;
