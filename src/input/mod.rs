//! Input modules.
//!
//! This module turns delimited text (files, stdin, or single lines from
//! the interactive session) into entry tables.

pub mod reader;

pub use reader::*;
