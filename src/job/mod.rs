//! Asynchronous extraction jobs and the polling loop that waits for them.
//!
//! - [`job`] - [`Job`] state, [`JobStatus`] and the transition rules
//! - [`policy`] - [`PollPolicy`], delay and attempt budget between checks
//! - [`poller`] - [`JobPoller`], the loop driving a job to a terminal state

pub mod job;
pub mod policy;
pub mod poller;

pub use job::{resolve_location, upgrade_scheme, Job, JobStatus, PollResponse};
pub use policy::PollPolicy;
pub use poller::{JobPoller, StatusSource, TransitionCallback};
