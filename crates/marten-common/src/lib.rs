//! Common utilities for the Marten parser.
//!
//! This crate provides shared infrastructure used by all parser components:
//! - **Warning System** - colored, deduplicated terminal output for parse issues
//! - **Source Positions** - byte offset / line / column bookkeeping

pub mod position;
pub mod warning;

pub use position::SourcePosition;
