//! Blocking HTTP client for the array's management API.
//!
//! Exactly two requests are issued per probe run (three for `disks`,
//! which merges a companion statistics query): one login, then the
//! `show` query for the selected subcommand. The session key is an
//! explicit value handed to the query step, never ambient state.

use std::time::Duration;

use sha2::{Digest, Sha256};
use tracing::debug;

use crate::error::CheckError;
use crate::response;

/// Opaque session token returned by the array's login endpoint.
pub struct Session(String);

pub struct MsaClient {
    http: reqwest::blocking::Client,
    base: String,
}

impl MsaClient {
    /// Builds a client for one array. `insecure` disables certificate
    /// verification; the arrays ship with self-signed certificates.
    pub fn new(hostname: &str, timeout: Duration, insecure: bool) -> Result<Self, CheckError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .danger_accept_invalid_certs(insecure)
            .build()?;

        Ok(MsaClient {
            http,
            base: format!("https://{hostname}"),
        })
    }

    /// Exchanges the credentials for a session key. The array expects the
    /// SHA-256 hex digest of `<username>_<password>` in the login URL.
    pub fn login(&self, username: &str, password: &str) -> Result<Session, CheckError> {
        let digest = Sha256::digest(format!("{username}_{password}").as_bytes());
        let url = format!("{}/api/login/{:x}", self.base, digest);

        debug!(host = %self.base, "requesting session key");
        let body = self.get(&url, None)?;
        response::parse_session_key(&body).map(Session)
    }

    /// Runs one `show` query and returns the raw XML body.
    pub fn show(&self, session: &Session, endpoint: &str) -> Result<String, CheckError> {
        let url = format!("{}/api/show/{}", self.base, endpoint);

        debug!(endpoint, "querying array");
        self.get(&url, Some(session))
    }

    fn get(&self, url: &str, session: Option<&Session>) -> Result<String, CheckError> {
        let mut request = self.http.get(url);
        if let Some(session) = session {
            request = request
                .header("sessionKey", &session.0)
                .header("dataType", "api");
        }

        let resp = request.send()?.error_for_status()?;
        Ok(resp.text()?)
    }
}
