use std::process;

use crate::error::CheckError;
use crate::report::Report;
use crate::severity::Severity;

/// Runs a check closure and folds every failure into the plugin contract:
/// a single `UNKNOWN - <message>` line and exit code 3. There is no local
/// recovery; the supervisor owns the retry cadence.
#[derive(Default)]
pub struct Runner {
    verbose: bool,
}

impl Runner {
    pub fn new() -> Self {
        Runner { verbose: false }
    }

    /// Emit the per-entity field tables after the summary on success.
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn safe_run(self, f: impl FnOnce() -> Result<Report, CheckError>) -> RunnerResult {
        match f() {
            Ok(report) => RunnerResult::Ok {
                report,
                verbose: self.verbose,
            },
            Err(err) => RunnerResult::Err(err),
        }
    }
}

pub enum RunnerResult {
    Ok { report: Report, verbose: bool },
    Err(CheckError),
}

impl RunnerResult {
    pub fn print_and_exit(self) -> ! {
        match self {
            RunnerResult::Ok { report, verbose } => report.print_and_exit(verbose),
            RunnerResult::Err(err) => {
                println!("{} - {}", Severity::Unknown, err);
                process::exit(Severity::Unknown.exit_code());
            }
        }
    }
}
