/// Everything that can terminate a probe run early.
///
/// All variants surface to the supervisor the same way: a single
/// `UNKNOWN - ...` line and exit code 3. Partial results are never
/// reported as OK.
#[derive(Debug, thiserror::Error)]
pub enum CheckError {
    /// Credentials rejected or the session key expired mid-run.
    #[error("authentication failed: {0}")]
    Authentication(String),

    /// The array was unreachable, timed out or answered with an HTTP error.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response body was not recognizable as an MSA API response.
    #[error("unexpected response: {0}")]
    Parse(String),

    /// Malformed thresholds or otherwise unusable invocation.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}
