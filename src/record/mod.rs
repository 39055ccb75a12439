//! Parsed state files.
//!
//! A state file is a parameter block (`System{ ... }`) followed by the
//! thermodynamic results section. Paths start at one of the two sections,
//! `param` or `thermo`, each a [`Value`] tree.

pub mod param;
pub mod thermo;
pub mod value;

pub use param::parse_param;
pub use thermo::parse_thermo;
pub use value::{Block, Cell, Value};

use crate::error::{AddressError, ParseError, PathSyntaxError, SweepError};
use crate::path::PathExpr;
use log::debug;
use std::fs;
use std::path::Path;

const SECTIONS: [&str; 2] = ["param", "thermo"];

#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    param: Value,
    thermo: Value,
}

impl Record {
    pub fn new(param: Block, thermo: Block) -> Self {
        Self {
            param: Value::Block(param),
            thermo: Value::Block(thermo),
        }
    }

    pub fn parse(text: &str) -> Result<Self, ParseError> {
        let lines: Vec<&str> = text.lines().collect();
        let (param, consumed) = param::parse_block_lines(&lines)?;
        let thermo = thermo::parse_thermo_lines(&lines[consumed..], consumed + 1)?;
        Ok(Self::new(param, thermo))
    }

    pub fn from_file(path: &Path) -> crate::Result<Self> {
        debug!("parsing state file {}", path.display());
        let text = fs::read_to_string(path).map_err(|source| SweepError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text).map_err(|source| SweepError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// The parameter block (`System{...}`).
    pub fn param(&self) -> &Value {
        &self.param
    }

    pub fn thermo(&self) -> &Value {
        &self.thermo
    }

    /// Top-level section by name, `param` or `thermo`.
    pub fn section(&self, name: &str) -> Option<&Value> {
        match name {
            "param" => Some(&self.param),
            "thermo" => Some(&self.thermo),
            _ => None,
        }
    }

    /// Section names with their trees, in file order.
    pub fn sections(&self) -> impl Iterator<Item = (&'static str, &Value)> {
        SECTIONS.into_iter().zip([&self.param, &self.thermo])
    }

    /// Resolve an already parsed path expression against this record.
    pub fn resolve<'a>(&'a self, expr: &PathExpr) -> Result<&'a Value, AddressError> {
        expr.resolve_in(|name| self.section(name))
    }

    /// Parse and resolve a path expression in one step.
    pub fn lookup(&self, expr: &str) -> Result<&Value, LookupError> {
        let expr = PathExpr::parse(expr)?;
        Ok(self.resolve(&expr)?)
    }
}

/// Either half of [`Record::lookup`] can fail.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    #[error(transparent)]
    Syntax(#[from] PathSyntaxError),
    #[error(transparent)]
    Address(#[from] AddressError),
}
