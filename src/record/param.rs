//! Parser for the block-structured parameter format.
//!
//! ```text
//! System{
//!   Mixture{
//!     nMonomer  2
//!     monomers[
//!       1.0
//!       1.0
//!     ]
//!     Polymer{
//!       blocks[
//!         0  0.5
//!         1  0.5
//!       ]
//!       phi  0.5
//!     }
//!   }
//!   Interaction{
//!     chi(
//!       1  0  12.0
//!     )
//!   }
//!   Sweep{
//!     baseFileName  out/
//!   }
//! }
//! ```

use crate::error::ParseError;
use crate::record::value::{Block, Value};
use regex::Regex;

// Label followed by the opener of a block, array or matrix.
const OPENER_RE: &str = r"^([A-Za-z_][A-Za-z0-9_]*)\s*([{\[(])$";

// Largest accepted matrix dimension. Interaction matrices are indexed by
// monomer type, so anything near this is a corrupt file.
const MAX_MATRIX_SIZE: usize = 1024;

/// Parse a stand-alone parameter file. Anything after the root block is an
/// error.
pub fn parse_param(text: &str) -> Result<Block, ParseError> {
    let lines: Vec<&str> = text.lines().collect();
    let (root, consumed) = parse_block_lines(&lines)?;

    if let Some(offset) = lines[consumed..].iter().position(|l| !l.trim().is_empty()) {
        return Err(ParseError::new(
            consumed + offset + 1,
            format!("unexpected content after root block '{}'", root.label),
        ));
    }
    Ok(root)
}

/// Parse the root block at the start of `lines`, returning it together with
/// the number of lines consumed (through the closing `}`).
pub fn parse_block_lines(lines: &[&str]) -> Result<(Block, usize), ParseError> {
    let opener = Regex::new(OPENER_RE).map_err(|e| ParseError::new(0, e.to_string()))?;

    // Open blocks with the line each one started on.
    let mut stack: Vec<(Block, usize)> = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        let lno = i + 1;
        let line = lines[i].trim();
        i += 1;

        if line.is_empty() {
            continue;
        }

        if line == "}" {
            let Some((done, _)) = stack.pop() else {
                return Err(ParseError::new(lno, "unmatched '}'"));
            };
            match stack.last_mut() {
                Some((parent, _)) => parent.insert(done.label.clone(), Value::Block(done)),
                None => return Ok((done, i)),
            }
            continue;
        }

        if let Some(caps) = opener.captures(line) {
            let label = caps[1].to_string();
            let value = match &caps[2] {
                "{" => {
                    stack.push((Block::new(label), lno));
                    continue;
                }
                "[" => {
                    let (value, next) = read_array(lines, i, &label)?;
                    i = next;
                    value
                }
                _ => {
                    let (value, next) = read_matrix(lines, i, &label)?;
                    i = next;
                    value
                }
            };
            current(&mut stack, lno, &label)?.insert(label, value);
            continue;
        }

        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() < 2 {
            return Err(ParseError::new(
                lno,
                format!("expected 'label value' or 'Label{{', found {:?}", line),
            ));
        }
        current(&mut stack, lno, tokens[0])?.insert(tokens[0], Value::from_tokens(&tokens[1..]));
    }

    match stack.last() {
        None => Err(ParseError::new(lines.len().max(1), "no parameter block found")),
        Some((open, start)) => Err(ParseError::new(
            *start,
            format!("block '{}' is never closed", open.label),
        )),
    }
}

fn current<'a>(
    stack: &'a mut [(Block, usize)],
    lno: usize,
    label: &str,
) -> Result<&'a mut Block, ParseError> {
    stack
        .last_mut()
        .map(|(b, _)| b)
        .ok_or_else(|| ParseError::new(lno, format!("'{label}' appears outside of any block")))
}

/// Elements one per line until `]`.
fn read_array(lines: &[&str], start: usize, label: &str) -> Result<(Value, usize), ParseError> {
    let mut items = Vec::new();
    for (i, raw) in lines.iter().enumerate().skip(start) {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        if line == "]" {
            return Ok((Value::List(items), i + 1));
        }
        let tokens: Vec<&str> = line.split_whitespace().collect();
        items.push(Value::from_tokens(&tokens));
    }
    Err(ParseError::new(
        start,
        format!("array '{}' is missing its closing ']'", label),
    ))
}

/// `i j value` rows until `)`, stored as a full symmetric matrix.
fn read_matrix(lines: &[&str], start: usize, label: &str) -> Result<(Value, usize), ParseError> {
    let mut cells: Vec<(usize, usize, Value)> = Vec::new();

    for (i, raw) in lines.iter().enumerate().skip(start) {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        if line == ")" {
            return Ok((Value::List(fill_symmetric(cells)), i + 1));
        }

        let bad_row = || {
            ParseError::new(
                i + 1,
                format!("matrix '{}' row must be 'i j value', found {:?}", label, line),
            )
        };
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let [row, col, value] = tokens.as_slice() else {
            return Err(bad_row());
        };
        let row: usize = row.parse().map_err(|_| bad_row())?;
        let col: usize = col.parse().map_err(|_| bad_row())?;
        // Checked before `fill_symmetric` sizes the matrix from the indices.
        if row.max(col) >= MAX_MATRIX_SIZE {
            return Err(ParseError::new(
                i + 1,
                format!(
                    "matrix '{}' index in {:?} exceeds the limit of {} rows",
                    label, line, MAX_MATRIX_SIZE
                ),
            ));
        }
        cells.push((row, col, Value::from_token(value)));
    }

    Err(ParseError::new(
        start,
        format!("matrix '{}' is missing its closing ')'", label),
    ))
}

fn fill_symmetric(cells: Vec<(usize, usize, Value)>) -> Vec<Value> {
    let size = cells
        .iter()
        .map(|(r, c, _)| r.max(c) + 1)
        .max()
        .unwrap_or(0);

    let mut rows = vec![vec![Value::Int(0); size]; size];
    for (r, c, v) in cells {
        rows[c][r] = v.clone();
        rows[r][c] = v;
    }
    rows.into_iter().map(Value::List).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const PARAM: &str = "\
System{
  Mixture{
    nMonomer  2
    monomers[
      1.0
      1.0
    ]
    nPolymer  2
    Polymer{
      type    linear
      blocks[
        0  0.5
        1  0.5
      ]
      phi     0.5
    }
    Polymer{
      type    linear
      phi     0.5
    }
    ds   0.01
  }
  Interaction{
    chi(
      1   0    12.0
    )
  }
  Sweep{
    ns            10
    baseFileName  out/
  }
}
";

    #[test]
    fn parses_nested_blocks_in_declaration_order() {
        let root = parse_param(PARAM).unwrap();
        assert_eq!(root.label, "System");
        let names: Vec<&str> = root.entries().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["Mixture", "Interaction", "Sweep"]);

        let sweep = root.get("Sweep").and_then(Value::as_block).unwrap();
        assert_eq!(sweep.get("ns"), Some(&Value::Int(10)));
        assert_eq!(sweep.get("baseFileName"), Some(&Value::Text("out/".into())));
    }

    #[test]
    fn arrays_and_repeated_blocks() {
        let root = parse_param(PARAM).unwrap();
        let mixture = root.get("Mixture").and_then(Value::as_block).unwrap();

        assert_eq!(
            mixture.get("monomers"),
            Some(&Value::List(vec![Value::Float(1.0), Value::Float(1.0)]))
        );

        let polymers = mixture.get("Polymer").and_then(Value::as_list).unwrap();
        assert_eq!(polymers.len(), 2);

        let first = polymers[0].as_block().unwrap();
        assert_eq!(first.get("type"), Some(&Value::Text("linear".into())));
        let blocks = first.get("blocks").and_then(Value::as_list).unwrap();
        assert_eq!(blocks[1], Value::List(vec![Value::Int(1), Value::Float(0.5)]));
    }

    #[test]
    fn matrix_is_symmetric_with_zero_fill() {
        let root = parse_param(PARAM).unwrap();
        let chi = root
            .get("Interaction")
            .and_then(Value::as_block)
            .and_then(|b| b.get("chi"))
            .unwrap();

        assert_eq!(
            chi,
            &Value::List(vec![
                Value::List(vec![Value::Int(0), Value::Float(12.0)]),
                Value::List(vec![Value::Float(12.0), Value::Int(0)]),
            ])
        );
    }

    #[test]
    fn repeated_parameters_collect_into_one_list() {
        let root = parse_param("A{\n  x 1\n  x 2\n  x 3\n}\n").unwrap();
        assert_eq!(
            root.get("x"),
            Some(&Value::List(vec![Value::Int(1), Value::Int(2), Value::Int(3)]))
        );

        let path = crate::path::PathExpr::parse("a.x[2]").unwrap();
        let mut wrapper = Block::new("root");
        wrapper.insert("a", Value::Block(root));
        assert_eq!(path.resolve(&Value::Block(wrapper)), Ok(&Value::Int(3)));
    }

    #[test]
    fn prefix_parse_reports_consumed_lines() {
        let text = "A{\n  x 1\n}\n\nfHelmholtz 1.0\n";
        let lines: Vec<&str> = text.lines().collect();
        let (root, consumed) = parse_block_lines(&lines).unwrap();
        assert_eq!(root.get("x"), Some(&Value::Int(1)));
        assert_eq!(consumed, 3);
    }

    #[test]
    fn rejects_trailing_content() {
        let err = parse_param("A{\n  x 1\n}\nB{\n}\n").unwrap_err();
        assert_eq!(err.line, 4);
    }

    #[test]
    fn rejects_unclosed_block() {
        let err = parse_param("A{\n  B{\n    x 1\n").unwrap_err();
        assert_eq!(err.line, 2);
        assert!(err.message.contains("'B'"), "{}", err.message);
    }

    #[test]
    fn rejects_unclosed_array_and_bad_matrix_row() {
        let err = parse_param("A{\n  v[\n    1\n").unwrap_err();
        assert!(err.message.contains("']'"), "{}", err.message);

        let err = parse_param("A{\n  chi(\n    0 x 1.0\n  )\n}\n").unwrap_err();
        assert_eq!(err.line, 3);
    }

    #[test]
    fn rejects_matrix_index_past_the_size_limit() {
        let err = parse_param("A{\n  chi(\n    18446744073709551615 0 1.0\n  )\n}\n").unwrap_err();
        assert_eq!(err.line, 3);
        assert!(err.message.contains("chi"), "{}", err.message);

        let err = parse_param("A{\n  chi(\n    0 1 1.0\n    100000 0 1.0\n  )\n}\n").unwrap_err();
        assert_eq!(err.line, 4);

        let text = format!("A{{\n  chi(\n    {} 0 1.0\n  )\n}}\n", MAX_MATRIX_SIZE - 1);
        let root = parse_param(&text).unwrap();
        let chi = root.get("chi").and_then(Value::as_list).unwrap();
        assert_eq!(chi.len(), MAX_MATRIX_SIZE);
    }

    #[test]
    fn corrupt_matrix_fails_record_parse_without_panicking() {
        let text = "S{\n  chi(\n    99999999999 0 1.0\n  )\n}\npressure 1.0\n";
        let err = crate::record::Record::parse(text).unwrap_err();
        assert_eq!(err.line, 3);
    }

    #[test]
    fn rejects_stray_close_and_empty_input() {
        assert_eq!(parse_param("}\n").unwrap_err().line, 1);
        assert!(parse_param("\n\n").is_err());
        assert!(parse_param("x 1\n").is_err());
    }
}
