//! The job completion state machine.
//!
//! [`JobPoller::poll`] starts from the answer to the submission request and
//! issues status checks against the server-provided `Location` until the job
//! completes or fails:
//!
//! - `202 Accepted`: pending, the `Location` header is the next poll target
//!   (an `http:` scheme is upgraded to `https:`)
//! - `200 OK`: completed, the body is the extraction result
//! - anything else: failed, the body is returned in [`Error::Protocol`]
//!
//! # Example
//!
//! ```rust,no_run
//! use extractdl::job::{JobPoller, PollPolicy};
//! # use extractdl::api::ApiClient;
//! # use reqwest::Url;
//!
//! # async fn example(api: ApiClient, origin: Url) -> extractdl::Result<()> {
//! let initial = api.submit_extraction(&serde_json::json!({})).await?;
//! let job = JobPoller::new(api.clone(), PollPolicy::default())
//!     .on_transition(|job| println!("job is {}", job.status()))
//!     .poll(initial, &origin)
//!     .await?;
//! println!("{:?}", job.result());
//! # Ok(())
//! # }
//! ```

use super::job::{Job, JobStatus, PollResponse};
use super::policy::PollPolicy;
use crate::error::{Error, Result};

use async_trait::async_trait;
use reqwest::Url;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Something that can be asked for the status of a job.
#[async_trait]
pub trait StatusSource: Send + Sync {
    /// Issue one status request against `url`.
    async fn check_status(&self, url: &Url) -> Result<PollResponse>;
}

#[async_trait]
impl<S: StatusSource + ?Sized> StatusSource for Arc<S> {
    async fn check_status(&self, url: &Url) -> Result<PollResponse> {
        (**self).check_status(url).await
    }
}

/// Callback invoked after every job transition.
pub type TransitionCallback = Box<dyn Fn(&Job) + Send + Sync>;

/// Drives a [`Job`] to a terminal state.
pub struct JobPoller<S> {
    source: S,
    policy: PollPolicy,
    on_transition: Option<Arc<TransitionCallback>>,
}

impl<S: StatusSource> JobPoller<S> {
    pub fn new(source: S, policy: PollPolicy) -> Self {
        Self {
            source,
            policy,
            on_transition: None,
        }
    }

    /// Set a callback observing every transition, failures included.
    pub fn on_transition<F>(mut self, callback: F) -> Self
    where
        F: Fn(&Job) + Send + Sync + 'static,
    {
        self.on_transition = Some(Arc::new(Box::new(callback)));
        self
    }

    /// The poll policy.
    pub fn policy(&self) -> &PollPolicy {
        &self.policy
    }

    /// Polls until the job completes.
    ///
    /// `initial` is the answer to the submission request sent to `origin`.
    /// Returns the completed job, or the error that failed it.
    pub async fn poll(&self, initial: PollResponse, origin: &Url) -> Result<Job> {
        let mut job = Job::submitted();
        let mut response = initial;
        let mut request_url = origin.clone();

        loop {
            let code = response.status;
            let outcome = job.observe(response, &request_url);
            self.notify(&job);
            if let Err(e) = outcome {
                warn!(status = %code, checks = job.checks(), "Extraction job failed");
                return Err(e);
            }

            match job.status() {
                JobStatus::Completed => {
                    info!(
                        job_id = job.id().unwrap_or("<unknown>"),
                        checks = job.checks(),
                        "Extraction job completed"
                    );
                    return Ok(job);
                }
                JobStatus::Pending => {}
                status => {
                    return Err(Error::Internal(format!(
                        "unexpected job status {} while polling",
                        status
                    )))
                }
            }

            let attempt = job.checks() + 1;
            if !self.policy.allows(attempt) {
                warn!(checks = job.checks(), "Poll budget exhausted");
                return Err(Error::PollBudgetExhausted {
                    attempts: job.checks(),
                });
            }

            let url = job
                .location()
                .cloned()
                .ok_or_else(|| Error::Internal("pending job without a location".into()))?;

            tokio::time::sleep(self.policy.delay_for(attempt)).await;

            info!(check = attempt, "Checking Status of Extraction");
            debug!(url = %url, "Polling job status");
            response = self.source.check_status(&url).await?;
            job.record_check();
            request_url = url;
        }
    }

    fn notify(&self, job: &Job) {
        debug!(status = %job.status(), checks = job.checks(), "Job transition");
        if let Some(ref callback) = self.on_transition {
            callback(job);
        }
    }
}
