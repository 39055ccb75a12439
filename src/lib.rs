//! Summaries of parameter-sweep output.
//!
//! A sweep writes one state file per step into an output directory. [`Sweep`]
//! loads them in file-name order, and summary reports pull selected values
//! out of every state with dotted path expressions such as
//! `param.Mixture.Polymer[0].phi` or `thermo.fHelmholtz`.
//!
//! ```no_run
//! use sweep_report::Sweep;
//!
//! let sweep = Sweep::open("param")?;
//! let table = sweep.summary(&["param.Interaction.chi[0][1]", "thermo.pressure"], true)?;
//! print!("{}", sweep.summary_string(&["param.Interaction.chi[0][1]", "thermo.fHelmholtz"])?);
//! # Ok::<(), sweep_report::SweepError>(())
//! ```

pub mod error;
pub mod path;
pub mod record;
pub mod report;
pub mod sweep;

pub use error::{AddressError, ParseError, PathSyntaxError, ReportError, SweepError};
pub use path::PathExpr;
pub use record::{Block, Cell, Record, Value};
pub use report::ReportTable;
pub use sweep::Sweep;

pub type Result<T> = std::result::Result<T, SweepError>;
