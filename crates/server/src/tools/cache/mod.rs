//! Cache housekeeping tools.
//!
//! This module provides tools for inspecting and purging the SQLite store.

pub mod purge;
pub mod stats;

pub use purge::{CachePurgeParams, purge_impl};
pub use stats::stats_impl;
