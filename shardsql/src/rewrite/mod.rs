//! Statement rewriting: positional text edits and parameter distribution.

pub mod parameters;
pub mod splice;
pub mod token;

pub use parameters::{InsertParameterUnit, ParameterBuilder, ParameterPlan};
pub use splice::splice;
pub use token::{EncryptValueToken, Expression, PaginationToken, SqlToken};
