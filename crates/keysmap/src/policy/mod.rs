//! The keys map trust policy.
//!
//! This module provides:
//! - Logical line reading with comments, escapes and continuations
//! - Rule compilation (`pattern = keys`)
//! - The [`TrustPolicy`] rule table and its queries
//! - Resource loaders for locating keys map sources

pub mod loader;
pub mod reader;
pub mod rule;
pub mod trust_policy;

pub use loader::{FileLoader, MemoryLoader, ResourceLoader};
pub use reader::LogicalLines;
pub use rule::PolicyRule;
pub use trust_policy::{TrustPolicy, EMPTY_POLICY_WARNING};
