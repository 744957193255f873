//! env-replace - un-expand environment variables for more compact output.
//!
//! This library provides the core functionality for env-replace, including:
//! - Snapshotting the environment and building an ordered replacement table
//! - Rewriting a byte stream line by line with `$NAME` references
//! - Reporting which variables were substituted as `export` hints
//!
//! # Example
//!
//! ```
//! use env_replace::rewrite::rewrite_stream;
//! use env_replace::table::{EnvSnapshot, build_rule_set};
//!
//! let env = EnvSnapshot::from_pairs([("HOME", "/home/alice")]);
//! let rules = build_rule_set(&env);
//!
//! let mut out = Vec::new();
//! rewrite_stream(&rules, &b"cd /home/alice/src\n"[..], &mut out).unwrap();
//!
//! assert!(out.starts_with(b"cd $HOME/src\n"));
//! ```

pub mod error;
pub mod rewrite;
pub mod table;

pub use error::{EnvReplaceError, Result};
