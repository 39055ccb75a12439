//! The ordered collection of state files produced by one sweep.

pub mod loader;

pub use loader::{STATE_FILE_SUFFIX, list_state_files, load_records, resolve_source};

use crate::error::SweepError;
use crate::record::Record;
use crate::report::{self, ReportTable};
use crate::Result;
use log::info;
use std::ops::Index;
use std::path::{Path, PathBuf};

/// States of a sweep, ordered by state file name. Fixed after construction.
#[derive(Debug, Clone)]
pub struct Sweep {
    directory: PathBuf,
    states: Vec<Record>,
}

impl Sweep {
    /// Load from a state directory or the sweep's parameter file, with
    /// relative paths taken against the current working directory.
    pub fn open(source: impl AsRef<Path>) -> Result<Self> {
        let cwd = std::env::current_dir().map_err(|source| SweepError::Io {
            path: PathBuf::from("."),
            source,
        })?;
        Self::open_in(source, &cwd)
    }

    /// Like [`Sweep::open`], with relative paths taken against `base`.
    pub fn open_in(source: impl AsRef<Path>, base: &Path) -> Result<Self> {
        let directory = resolve_source(source.as_ref(), base)?;
        let states = load_records(&directory)?;
        info!("loaded {} states from {}", states.len(), directory.display());
        Ok(Self::from_records(directory, states))
    }

    pub fn from_records(directory: impl Into<PathBuf>, states: Vec<Record>) -> Self {
        Self {
            directory: directory.into(),
            states,
        }
    }

    /// Directory the state files were read from.
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn get(&self, index: usize) -> Result<&Record> {
        self.states.get(index).ok_or(SweepError::Index {
            index,
            len: self.states.len(),
        })
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.states.iter()
    }

    /// Values of `exprs` for every state, optionally prefixed by the state
    /// index.
    pub fn summary<S: AsRef<str>>(&self, exprs: &[S], index: bool) -> Result<ReportTable> {
        Ok(report::build_table(self, exprs, index)?)
    }

    /// Fixed-width text table of `exprs`, with a leading `step` column.
    pub fn summary_string<S: AsRef<str>>(&self, exprs: &[S]) -> Result<String> {
        Ok(report::render_table(self, exprs)?)
    }
}

impl Index<usize> for Sweep {
    type Output = Record;

    fn index(&self, index: usize) -> &Record {
        &self.states[index]
    }
}

impl<'a> IntoIterator for &'a Sweep {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.states.iter()
    }
}
