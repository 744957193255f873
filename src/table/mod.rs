//! Replacement table construction for env-replace.
//!
//! This module handles:
//! - Snapshotting the environment once at startup
//! - Building the ordered substitution rules and their assignment guards

pub mod builder;
pub mod snapshot;

pub use builder::{Rule, RuleSet, build_rule_set};
pub use snapshot::EnvSnapshot;
