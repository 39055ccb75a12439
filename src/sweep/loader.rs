//! Locating and loading the state files of a sweep.
//!
//! The source argument is either the directory holding the state files or
//! the parameter file used to run the sweep. In the latter case the output
//! directory is the `baseFileName` of the first child block whose label
//! contains `Sweep` (`Sweep{`, `LinearSweep{`, ...), taken relative to the
//! caller's working directory.

use crate::error::SweepError;
use crate::record::{Record, Value, parse_param};
use crate::Result;
use log::{debug, warn};
use std::fs;
use std::path::{Path, PathBuf};

pub const STATE_FILE_SUFFIX: &str = ".dat";

const SWEEP_LABEL: &str = "Sweep";
const OUTPUT_DIR_FIELD: &str = "baseFileName";

/// Turn the source argument into the directory holding the state files.
///
/// `base` is the working directory relative paths are taken against. It is
/// only read; the process working directory is never changed.
pub fn resolve_source(arg: &Path, base: &Path) -> Result<PathBuf> {
    let target = base.join(arg);

    if target.is_dir() {
        debug!("sweep source {} is a directory", target.display());
        return Ok(target);
    }
    if !target.is_file() {
        return Err(SweepError::Argument(arg.to_path_buf()));
    }

    let config_error = |reason: String| SweepError::Configuration {
        path: target.clone(),
        reason,
    };

    let text = fs::read_to_string(&target).map_err(|source| SweepError::Io {
        path: target.clone(),
        source,
    })?;
    let root = parse_param(&text).map_err(|source| SweepError::Parse {
        path: target.clone(),
        source,
    })?;

    let Some((label, sweep)) = root.entries().find(|(name, _)| name.contains(SWEEP_LABEL)) else {
        return Err(config_error("no Sweep block".to_string()));
    };
    debug!("using block '{}' of {}", label, target.display());

    let output = match sweep {
        Value::Block(block) => block.get(OUTPUT_DIR_FIELD),
        _ => None,
    };
    let output = match output {
        Some(Value::Text(s)) => s.clone(),
        Some(Value::Int(i)) => i.to_string(),
        Some(Value::Float(f)) => f.to_string(),
        _ => {
            return Err(config_error(format!("block '{label}' has no {OUTPUT_DIR_FIELD} entry")));
        }
    };

    let dir = base.join(&output);
    if !dir.is_dir() {
        return Err(config_error(format!(
            "sweep output directory {} does not exist",
            dir.display()
        )));
    }
    debug!("sweep output directory resolved to {}", dir.display());
    Ok(dir)
}

/// State files in `dir`, sorted by file name.
pub fn list_state_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let io_error = |source| SweepError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut names: Vec<String> = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_error)? {
        let entry = entry.map_err(io_error)?;
        let Some(name) = entry.file_name().to_str().map(str::to_string) else {
            warn!("skipping non UTF-8 file name {:?}", entry.file_name());
            continue;
        };
        if !name.ends_with(STATE_FILE_SUFFIX) {
            continue;
        }
        if !entry.path().is_file() {
            debug!("skipping {}: not a regular file", name);
            continue;
        }
        names.push(name);
    }
    names.sort();

    Ok(names.into_iter().map(|n| dir.join(n)).collect())
}

/// Parse every state file in `dir`, in file-name order. The first failure
/// aborts the load.
pub fn load_records(dir: &Path) -> Result<Vec<Record>> {
    list_state_files(dir)?
        .iter()
        .map(|path| Record::from_file(path))
        .collect()
}
