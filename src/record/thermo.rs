//! Parser for the thermodynamic results section of a state file.
//!
//! ```text
//! fHelmholtz    1.92567500e+00
//! pressure      3.24415250e+01
//!
//! polymers:
//!      species       phi               mu
//!          0    5.000000000000e-01   3.243167325478e+01
//!          1    5.000000000000e-01   3.243167325478e+01
//!
//! cellParams:
//!        0    1.709718290223e+00
//! ```

use crate::error::ParseError;
use crate::record::value::{Block, Value};

pub fn parse_thermo(text: &str) -> Result<Block, ParseError> {
    let lines: Vec<&str> = text.lines().collect();
    parse_thermo_lines(&lines, 1)
}

/// `first_line` is the file line number of `lines[0]`, used in errors.
pub fn parse_thermo_lines(lines: &[&str], first_line: usize) -> Result<Block, ParseError> {
    let mut thermo = Block::new("thermo");
    let mut i = 0;

    while i < lines.len() {
        let lno = first_line + i;
        let line = lines[i].trim();
        i += 1;

        if line.is_empty() {
            continue;
        }

        let tokens: Vec<&str> = line.split_whitespace().collect();
        if let [name] = tokens.as_slice()
            && let Some(name) = name.strip_suffix(':')
        {
            let (table, next) = read_table(lines, i, first_line, name)?;
            i = next;
            thermo.insert(name, table);
            continue;
        }

        if tokens.len() < 2 {
            return Err(ParseError::new(
                lno,
                format!("expected 'name value' or 'name:', found {:?}", line),
            ));
        }
        thermo.insert(tokens[0], Value::from_tokens(&tokens[1..]));
    }

    Ok(thermo)
}

/// Rows until a blank line or end of input. Each row starts with its
/// integer index; an optional leading header line names the columns.
fn read_table(
    lines: &[&str],
    start: usize,
    first_line: usize,
    name: &str,
) -> Result<(Value, usize), ParseError> {
    let mut header: Option<Vec<&str>> = None;
    let mut rows = Vec::new();
    let mut i = start;

    while i < lines.len() {
        let lno = first_line + i;
        let line = lines[i].trim();
        if line.is_empty() {
            break;
        }
        i += 1;

        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens[0].parse::<usize>().is_err() {
            if header.is_none() && rows.is_empty() {
                header = Some(tokens);
                continue;
            }
            return Err(ParseError::new(
                lno,
                format!("table '{}': expected an indexed row, found {:?}", name, line),
            ));
        }

        let values = &tokens[1..];
        let row = match &header {
            Some(columns) => {
                let columns = &columns[1..];
                if columns.len() != values.len() {
                    return Err(ParseError::new(
                        lno,
                        format!(
                            "table '{}': row has {} values but the header names {}",
                            name,
                            values.len(),
                            columns.len()
                        ),
                    ));
                }
                let mut entry = Block::new(name);
                for (column, value) in columns.iter().zip(values) {
                    entry.insert(*column, Value::from_token(value));
                }
                Value::Block(entry)
            }
            None if values.is_empty() => {
                return Err(ParseError::new(lno, format!("table '{name}': row has no values")));
            }
            None => Value::from_tokens(values),
        };
        rows.push(row);
    }

    Ok((Value::List(rows), i))
}
