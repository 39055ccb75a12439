use crate::error::ReportError;
use crate::path::PathExpr;
use crate::record::Cell;
use crate::report::{ReportTable, STEP_LABEL, parse_exprs};
use crate::sweep::Sweep;

/// Resolve every expression against every state, in sweep order.
///
/// With `include_index` each row starts with the state's position and the
/// first column is labelled `step`. The first failure aborts the whole
/// table.
pub fn build_table<S: AsRef<str>>(
    sweep: &Sweep,
    exprs: &[S],
    include_index: bool,
) -> Result<ReportTable, ReportError> {
    let exprs = parse_exprs(exprs)?;
    extract(sweep, &exprs, include_index)
}

pub(crate) fn extract(
    sweep: &Sweep,
    exprs: &[PathExpr],
    include_index: bool,
) -> Result<ReportTable, ReportError> {
    let mut columns = Vec::with_capacity(exprs.len() + 1);
    if include_index {
        columns.push(STEP_LABEL.to_string());
    }
    columns.extend(exprs.iter().map(|e| e.as_str().to_string()));

    let mut rows = Vec::with_capacity(sweep.len());
    for (record, state) in sweep.iter().enumerate() {
        let mut row = Vec::with_capacity(columns.len());
        if include_index {
            row.push(Cell::Int(record as i64));
        }

        for expr in exprs {
            let value = state
                .resolve(expr)
                .map_err(|source| ReportError::Address { record, source })?;
            let cell = value.to_cell().ok_or_else(|| ReportError::NotScalar {
                record,
                expr: expr.as_str().to_string(),
                kind: value.kind(),
            })?;
            row.push(cell);
        }

        rows.push(row);
    }

    Ok(ReportTable { columns, rows })
}
