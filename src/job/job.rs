//! Job state and its transitions.

use crate::error::{Error, Result};

use reqwest::{StatusCode, Url};
use std::fmt;

/// Status of a server-side extraction job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobStatus {
    /// The extraction request was sent, no answer observed yet.
    Submitted,
    /// The server accepted the job and is still processing it.
    Pending,
    /// The server returned the terminal result.
    Completed,
    /// The server answered with a status code other than 200 or 202.
    Failed,
}

impl JobStatus {
    /// Whether no further transition is possible.
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Completed | JobStatus::Failed)
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            JobStatus::Submitted => "submitted",
            JobStatus::Pending => "pending",
            JobStatus::Completed => "completed",
            JobStatus::Failed => "failed",
        };
        f.write_str(s)
    }
}

/// A status answer from the server, reduced to what the state machine reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollResponse {
    /// HTTP status code.
    pub status: StatusCode,
    /// Raw `Location` header value, if any.
    pub location: Option<String>,
    /// Response body.
    pub body: String,
}

impl PollResponse {
    pub fn new(status: StatusCode, location: Option<&str>, body: impl Into<String>) -> Self {
        Self {
            status,
            location: location.map(String::from),
            body: body.into(),
        }
    }
}

/// A server-side extraction job.
///
/// Only the [`JobPoller`](super::JobPoller) drives transitions; once the job
/// is completed or failed it no longer changes.
#[derive(Debug, Clone)]
pub struct Job {
    id: Option<String>,
    status: JobStatus,
    location: Option<Url>,
    checks: u32,
    result: Option<String>,
}

impl Job {
    pub(crate) fn submitted() -> Self {
        Self {
            id: None,
            status: JobStatus::Submitted,
            location: None,
            checks: 0,
            result: None,
        }
    }

    /// Job identifier, known once the terminal result names it.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Current status.
    pub fn status(&self) -> JobStatus {
        self.status
    }

    /// Next poll target while pending.
    pub fn location(&self) -> Option<&Url> {
        self.location.as_ref()
    }

    /// Number of status requests issued after submission.
    pub fn checks(&self) -> u32 {
        self.checks
    }

    /// Terminal result body of a completed job.
    pub fn result(&self) -> Option<&str> {
        self.result.as_deref()
    }

    /// Consumes the job, returning the terminal result body.
    pub fn into_result(self) -> Option<String> {
        self.result
    }

    pub(crate) fn record_check(&mut self) {
        self.checks += 1;
    }

    /// Applies a server answer. `request_url` is the URL that produced it and
    /// is used to resolve a relative `Location`.
    ///
    /// The job moves to [`JobStatus::Failed`] before any error is returned.
    pub(crate) fn observe(&mut self, response: PollResponse, request_url: &Url) -> Result<()> {
        if self.status.is_terminal() {
            return Err(Error::Internal(format!(
                "job is already {} and cannot change",
                self.status
            )));
        }

        match response.status {
            StatusCode::ACCEPTED => {
                let raw = match response.location.as_deref() {
                    Some(raw) => raw,
                    None => {
                        self.status = JobStatus::Failed;
                        return Err(Error::InvalidUrl(
                            "202 response without a Location header".into(),
                        ));
                    }
                };
                match resolve_location(raw, request_url) {
                    Ok(url) => {
                        self.location = Some(url);
                        self.status = JobStatus::Pending;
                        Ok(())
                    }
                    Err(e) => {
                        self.status = JobStatus::Failed;
                        Err(e)
                    }
                }
            }
            StatusCode::OK => {
                self.id = job_id_from_body(&response.body);
                self.result = Some(response.body);
                self.location = None;
                self.status = JobStatus::Completed;
                Ok(())
            }
            status => {
                self.location = None;
                self.status = JobStatus::Failed;
                Err(Error::Protocol {
                    status,
                    body: response.body,
                })
            }
        }
    }
}

/// Rewrites a leading `http:` scheme to `https:`. Other schemes and relative
/// references are returned as-is.
pub fn upgrade_scheme(location: &str) -> String {
    match location.get(..5) {
        Some(scheme) if scheme.eq_ignore_ascii_case("http:") => {
            format!("https:{}", &location[5..])
        }
        _ => location.to_string(),
    }
}

/// Upgrades the scheme of `raw`, then resolves it against `base` if relative.
pub fn resolve_location(raw: &str, base: &Url) -> Result<Url> {
    let upgraded = upgrade_scheme(raw.trim());
    match Url::parse(&upgraded) {
        Ok(url) => Ok(url),
        Err(url::ParseError::RelativeUrlWithoutBase) => base.join(&upgraded).map_err(|e| {
            Error::InvalidUrl(format!("The location \"{}\" cannot be resolved: {}", raw, e))
        }),
        Err(e) => Err(Error::InvalidUrl(format!(
            "The location \"{}\" cannot be parsed: {}",
            raw, e
        ))),
    }
}

fn job_id_from_body(body: &str) -> Option<String> {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()?
        .get("JobId")?
        .as_str()
        .map(String::from)
}
