//! Path expressions and their resolution against a record namespace.

pub mod expr;
mod resolve;

pub use expr::{PathExpr, Step};
