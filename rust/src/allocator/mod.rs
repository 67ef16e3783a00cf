//! Allocator for placing a roster into category groups.
//!
//! Runs three greedy passes over a fixed group layout: ranked preferences,
//! capacity backfill, then per-person overflow placement.

mod core;
mod overflow;
mod state;

pub use core::{allocate, compute_target, AllocationError, Allocator};
pub use overflow::OverflowPolicy;
pub use state::AllocationState;
