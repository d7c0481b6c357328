//! SQL rewrite and parameter distribution engine for sharded databases.
//!
//! Given an already-parsed, already-routed statement and its bound
//! parameters, this crate produces, per physical target, the literal SQL
//! text edits to apply to the original statement and the ordered parameter
//! list to bind against that target. Parsing, routing, value encryption
//! and result merging happen upstream and downstream of this crate.

pub mod config;
pub mod error;
pub mod pagination;
pub mod rewrite;
pub mod route;
pub mod statement;
pub mod value;

pub use error::Error;
