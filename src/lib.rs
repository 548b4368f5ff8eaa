//! Check plugin for HPE MSA 2050 and Dell ME5 series storage arrays
//! (the two share a compatible management interface).
//!
//! One invocation runs exactly one check: authenticate against the
//! array's XML API, issue the `show` query for the selected subcommand,
//! classify every returned object via the static tables in [`catalog`],
//! and print the result in the Nagios plugin format.
//!
//! ```text
//! OK - A is OK. | 'disk_01.01 temperature'=31;40;50;0
//! OK - B is OK.
//! ```

pub mod catalog;
pub mod cli;
pub mod client;
pub mod error;
pub mod eval;
pub mod icinga;
pub mod perfdata;
pub mod report;
pub mod response;
pub mod runner;
pub mod severity;

pub use crate::error::CheckError;
pub use crate::perfdata::{PerfMetric, Unit};
pub use crate::report::{EntityStatus, Report};
pub use crate::runner::{Runner, RunnerResult};
pub use crate::severity::Severity;
