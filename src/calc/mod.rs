//! Calculation modules.
//!
//! This module contains the pure aggregation core that turns an entry
//! table into a per-category summary.

pub mod aggregator;

pub use aggregator::*;
