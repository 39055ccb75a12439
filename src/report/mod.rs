//! Summary reports over a sweep.
//!
//! - `raw`: values of selected path expressions for every state
//! - `text`: the same values as a fixed-width text table

pub mod raw;
pub mod text;

pub use raw::build_table;
pub use text::{format_scientific, render_table};

use crate::error::{PathSyntaxError, ReportError};
use crate::path::PathExpr;
use crate::record::Cell;
use serde::Serialize;
use std::ops::Index;

/// Label of the state-index column.
pub const STEP_LABEL: &str = "step";

/// One row per state, all rows sharing `columns`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl ReportTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl Index<usize> for ReportTable {
    type Output = [Cell];

    fn index(&self, row: usize) -> &[Cell] {
        &self.rows[row]
    }
}

/// Parse every expression up front so a bad one fails before any state is
/// visited.
pub(crate) fn parse_exprs<S: AsRef<str>>(exprs: &[S]) -> Result<Vec<PathExpr>, ReportError> {
    exprs
        .iter()
        .map(|e| PathExpr::parse(e.as_ref()))
        .collect::<Result<Vec<_>, PathSyntaxError>>()
        .map_err(ReportError::from)
}
