//! Path expressions: `param.Mixture.Polymer[0].phi`, `param.Interaction.chi[0][1]`.
//!
//! Parsed once into a list of steps, each a field name plus the indices
//! applied right after it:
//!
//! `param.Interaction.chi[0][1]`  =>  [param], [Interaction], [chi, 0, 1]

use crate::error::PathSyntaxError;
use regex::Regex;
use std::fmt;

const SEGMENT_RE: &str = r"^([A-Za-z_][A-Za-z0-9_]*)((?:\[[^\]]*\])*)$";
const INDEX_RE: &str = r"\[([^\]]*)\]";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub field: String,
    pub indices: Vec<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathExpr {
    text: String,
    steps: Vec<Step>,
}

impl PathExpr {
    pub fn parse(text: &str) -> Result<Self, PathSyntaxError> {
        let text = text.trim();
        let fail = |reason: String| PathSyntaxError {
            expr: text.to_string(),
            reason,
        };

        if text.is_empty() {
            return Err(fail("expression is empty".to_string()));
        }

        let segment_re = Regex::new(SEGMENT_RE).map_err(|e| fail(e.to_string()))?;
        let index_re = Regex::new(INDEX_RE).map_err(|e| fail(e.to_string()))?;

        let mut steps = Vec::new();
        for (pos, segment) in text.split('.').enumerate() {
            if segment.is_empty() {
                return Err(fail(format!("segment {} is empty", pos + 1)));
            }

            let caps = segment_re.captures(segment).ok_or_else(|| {
                fail(format!(
                    "segment '{}' is not of the form name or name[i]",
                    segment
                ))
            })?;

            let mut indices = Vec::new();
            for idx in index_re.captures_iter(&caps[2]) {
                let raw = &idx[1];
                if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(fail(format!(
                        "index '{}' in segment '{}' is not a non-negative integer",
                        raw, segment
                    )));
                }
                let index = raw.parse::<usize>().map_err(|_| {
                    fail(format!("index '{}' in segment '{}' is too large", raw, segment))
                })?;
                indices.push(index);
            }

            steps.push(Step {
                field: caps[1].to_string(),
                indices,
            });
        }

        Ok(Self {
            text: text.to_string(),
            steps,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Column label: everything after the last dot.
    pub fn label(&self) -> &str {
        match self.text.rfind('.') {
            Some(pos) => &self.text[pos + 1..],
            None => &self.text,
        }
    }
}

impl fmt::Display for PathExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl std::str::FromStr for PathExpr {
    type Err = PathSyntaxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
