//! Stream rewriting for env-replace.
//!
//! This module handles:
//! - Literal, byte-level substitution of values with `$NAME` references
//! - The line-by-line read/rewrite/write loop
//! - Tracking which rules fired and printing the trailing summary

pub mod line;
pub mod stream;
pub mod summary;

pub use line::{Rewriter, replace_all};
pub use stream::{RewriteReport, rewrite_stream};
pub use summary::{ConsumedRules, write_summary};
