//! Fixed-width text rendering of a summary report.
//!
//! ```text
//!  step      chi[0][1]     fHelmholtz
//!     0  1.2000000e+01  1.9256750e+00
//!     1  1.3000000e+01  2.1102042e+00
//! ```

use crate::error::ReportError;
use crate::path::PathExpr;
use crate::record::Cell;
use crate::report::{STEP_LABEL, parse_exprs, raw};
use crate::sweep::Sweep;

/// Minimum width of a column holding floats: `d.ddddddde+XX`.
pub const FLOAT_WIDTH: usize = 13;

const SEPARATOR: &str = "  ";

/// Render the values of `exprs` for every state as a text table with a
/// leading `step` column. Labels are the final dot segment of each
/// expression.
pub fn render_table<S: AsRef<str>>(sweep: &Sweep, exprs: &[S]) -> Result<String, ReportError> {
    let exprs = parse_exprs(exprs)?;
    let table = raw::extract(sweep, &exprs, true)?;

    let mut labels = vec![STEP_LABEL];
    labels.extend(exprs.iter().map(PathExpr::label));
    let widths = column_widths(&labels, &table.rows);

    let mut out = String::new();
    push_line(
        &mut out,
        labels
            .iter()
            .zip(&widths)
            .map(|(label, &width)| format!("{label:>width$}")),
    );
    for row in &table.rows {
        push_line(
            &mut out,
            row.iter().zip(&widths).map(|(cell, &width)| format_cell(cell, width)),
        );
    }

    Ok(out)
}

/// Widths start at the label length. Text and integer cells widen a column
/// to their printed length; any float cell floors it at [`FLOAT_WIDTH`].
pub fn column_widths(labels: &[&str], rows: &[Vec<Cell>]) -> Vec<usize> {
    let mut widths: Vec<usize> = labels.iter().map(|l| l.chars().count()).collect();

    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            let needed = match cell {
                Cell::Float(_) => FLOAT_WIDTH,
                Cell::Int(i) => i.to_string().len(),
                Cell::Text(s) => s.chars().count(),
            };
            *width = (*width).max(needed);
        }
    }

    widths
}

/// Floats are always printed in full scientific form, whatever the width.
fn format_cell(cell: &Cell, width: usize) -> String {
    match cell {
        Cell::Int(i) => format!("{i:>width$}"),
        Cell::Float(v) => format_scientific(*v),
        Cell::Text(s) => format!("{s:>width$}"),
    }
}

/// Seven fractional digits and a signed exponent of at least two digits,
/// e.g. `1.2345678e+01`.
pub fn format_scientific(v: f64) -> String {
    if v.is_nan() {
        return "nan".to_string();
    }
    if v.is_infinite() {
        return if v > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    let formatted = format!("{v:.7e}");
    let Some((mantissa, exponent)) = formatted.split_once('e') else {
        return formatted;
    };
    let (sign, digits) = match exponent.strip_prefix('-') {
        Some(digits) => ('-', digits),
        None => ('+', exponent),
    };
    format!("{mantissa}e{sign}{digits:0>2}")
}

fn push_line(out: &mut String, cells: impl Iterator<Item = String>) {
    out.push(' ');
    out.push_str(&cells.collect::<Vec<_>>().join(SEPARATOR));
    out.push('\n');
}
