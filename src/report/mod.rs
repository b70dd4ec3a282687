//! Report modules.
//!
//! This module renders a computed summary as an aligned text table,
//! Markdown, or JSON.

pub mod generator;

pub use generator::*;
