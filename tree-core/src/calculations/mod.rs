//! Pricing calculations for tree removal quotes.
//!
//! Everything here is a pure function of its arguments: no I/O and no shared
//! state. Configuration is always passed in explicitly.

pub mod common;
pub mod pricing;

pub use common::round_half_up;
pub use pricing::{VOLUME_DIVISOR, compute_breakdown, total_volume, tree_volume};
