//! Spec download.
//!
//! Only two HTTP statuses mean anything: 200 is a spec, 404 is "no such pod".
//! Every other status and every transport failure collapses into
//! [`FetchOutcome::TransferError`]. One GET, no retries; redirects and
//! timeouts are whatever the transport does by default.

use std::io::Read;

/// Result of a single spec download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Success(Vec<u8>),
    NotFound,
    /// Human-readable reason (status line or transport error).
    TransferError(String),
}

/// Fetch raw bytes by URL.
pub trait SpecFetcher {
    fn fetch(&self, url: &str) -> FetchOutcome;
}

/// How a response status is handled, before any body is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StatusClass {
    Success,
    NotFound,
    Failure,
}

pub(crate) fn classify_status(status: u16) -> StatusClass {
    match status {
        200 => StatusClass::Success,
        404 => StatusClass::NotFound,
        _ => StatusClass::Failure,
    }
}

// ---------------------------------------------------------------------------
// HTTP implementation
// ---------------------------------------------------------------------------

/// Blocking HTTPS fetcher backed by `ureq`.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    agent: ureq::Agent,
}

impl HttpFetcher {
    pub fn new() -> Self {
        let agent = ureq::AgentBuilder::new()
            .user_agent(concat!("minipod/", env!("CARGO_PKG_VERSION")))
            .build();
        Self { agent }
    }

    fn read_response(response: ureq::Response) -> FetchOutcome {
        let status = response.status();
        match classify_status(status) {
            StatusClass::NotFound => return FetchOutcome::NotFound,
            StatusClass::Failure => {
                return FetchOutcome::TransferError(format!(
                    "HTTP {status} {}",
                    response.status_text()
                ))
            }
            StatusClass::Success => {}
        }
        let mut body = Vec::new();
        match response.into_reader().read_to_end(&mut body) {
            Ok(_) => FetchOutcome::Success(body),
            Err(e) => FetchOutcome::TransferError(format!("failed to read response body: {e}")),
        }
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl SpecFetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> FetchOutcome {
        tracing::debug!("GET {url}");
        match self.agent.get(url).call() {
            Ok(response) => Self::read_response(response),
            // ureq reports 4xx/5xx as errors; the response is still there.
            Err(ureq::Error::Status(_, response)) => Self::read_response(response),
            Err(ureq::Error::Transport(t)) => FetchOutcome::TransferError(t.to_string()),
        }
    }
}
