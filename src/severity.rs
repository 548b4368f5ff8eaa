use std::fmt;

/// Service state as understood by Nagios/Icinga.
///
/// Totally ordered by urgency: `Ok < Warning < Critical < Unknown`.
/// `Unknown` ranks highest so that a check which could not be evaluated
/// never aggregates down to a clean result. When a definitive CRITICAL
/// finding sits next to an UNKNOWN one, the report caps the aggregate at
/// CRITICAL (see [`crate::report`]); the ordering here governs everything
/// else.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Ok,
    Warning,
    Critical,
    Unknown,
}

impl Severity {
    /// The exit code the monitoring supervisor expects for this state.
    pub fn exit_code(&self) -> i32 {
        match self {
            Severity::Ok => 0,
            Severity::Warning => 1,
            Severity::Critical => 2,
            Severity::Unknown => 3,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Severity::Ok => "OK",
            Severity::Warning => "WARNING",
            Severity::Critical => "CRITICAL",
            Severity::Unknown => "UNKNOWN",
        };
        f.write_str(s)
    }
}
