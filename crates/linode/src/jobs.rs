//! Asynchronous job polling.
//!
//! Most disk and power operations on a Linode return a job id and finish in
//! the background. The wait functions here poll `linode.job.list` at a fixed
//! interval until the job completes, the deadline passes, or the caller
//! cancels. Every poll fetches a fresh snapshot; nothing is cached between
//! ticks.

use std::time::Duration;

use linode_common::http_client::HttpClient;
use linode_common::{ApiArgs, ClientError, Result};
use linode_derive::Record;
use tokio::time::{Instant, sleep_until};
use tokio_util::sync::CancellationToken;

use crate::client::LinodeClient;

/// Shortest interval the poller will use.
pub const MIN_POLL_INTERVAL: Duration = Duration::from_millis(1);

/// One entry of `linode.job.list`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Record)]
pub struct Job {
    /// Job id
    #[record("JOBID")]
    pub id: i64,
    /// Owning Linode
    #[record("LINODEID")]
    pub linode_id: i64,
    /// Internal action name, e.g. `fs.create`
    #[record("ACTION")]
    pub action: String,
    /// Human readable description
    #[record("LABEL")]
    pub label: String,
    #[record("ENTERED_DT")]
    pub entered_dt: String,
    #[record("HOST_START_DT")]
    pub host_start_dt: String,
    /// Empty until the job has finished
    #[record("HOST_FINISH_DT")]
    pub host_finish_dt: String,
    /// Seconds; zero while running
    #[record("DURATION")]
    pub duration: i64,
    #[record("HOST_MESSAGE")]
    pub host_message: String,
    #[record("HOST_SUCCESS")]
    pub host_success: bool,
}

impl Job {
    /// The job has finished, successfully or not.
    pub fn is_done(&self) -> bool {
        !self.host_finish_dt.is_empty()
    }

    /// The job finished successfully.
    pub fn is_success(&self) -> bool {
        self.host_success
    }
}

/// Terminal state of a job that was waited on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobOutcome {
    /// Finished with the success flag set
    Succeeded,
    /// Finished without it
    Failed,
}

impl JobOutcome {
    /// `true` for [`JobOutcome::Succeeded`].
    pub fn is_success(self) -> bool {
        matches!(self, Self::Succeeded)
    }
}

fn waiting_for(job_id: &Option<i64>) -> String {
    match job_id {
        Some(id) => format!("job ID {id}"),
        None => "all jobs to complete".to_owned(),
    }
}

/// Ways a wait can end without reaching a terminal state.
///
/// [`WaitError::Query`] and [`WaitError::JobNotFound`] both mean the job
/// state could not be read; the latter keeps the number of entries returned.
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum WaitError {
    /// The deadline passed first
    #[error("timed out waiting for {}", waiting_for(.job_id))]
    #[diagnostic(code(linode::jobs::timed_out))]
    TimedOut {
        /// Job waited on, or `None` for all pending jobs
        job_id: Option<i64>,
    },

    /// A poll failed
    #[error("job query failed: {0}")]
    Query(
        #[from]
        #[diagnostic_source]
        ClientError,
    ),

    /// The job list did not hold exactly one entry for the job
    #[error("job id {job_id} not found")]
    #[diagnostic(
        code(linode::jobs::not_found),
        help("linode.job.list returned {matches} entries for this id")
    )]
    JobNotFound {
        /// Job waited on
        job_id: i64,
        /// Entries returned
        matches: usize,
    },

    /// The cancellation token fired first
    #[error("cancelled while waiting for {}", waiting_for(.job_id))]
    #[diagnostic(code(linode::jobs::cancelled))]
    Cancelled {
        /// Job waited on, or `None` for all pending jobs
        job_id: Option<i64>,
    },
}

enum Stop {
    Deadline,
    Cancelled,
}

impl Stop {
    fn into_error(self, job_id: Option<i64>) -> WaitError {
        match self {
            Stop::Deadline => WaitError::TimedOut { job_id },
            Stop::Cancelled => WaitError::Cancelled { job_id },
        }
    }
}

/// Stand-in for an unbounded wait, about thirty years.
const FAR_FUTURE: Duration = Duration::from_secs(86_400 * 365 * 30);

fn after(start: Instant, wait: Duration) -> Instant {
    start
        .checked_add(wait)
        .unwrap_or_else(|| start + FAR_FUTURE)
}

/// Fixed-interval poll slots bounded by a deadline.
struct Schedule {
    interval: Duration,
    deadline: Instant,
    next: Instant,
}

impl Schedule {
    fn new(interval: Duration, timeout: Duration) -> Self {
        let interval = interval.max(MIN_POLL_INTERVAL);
        let start = Instant::now();
        Self {
            interval,
            deadline: after(start, timeout),
            next: after(start, interval),
        }
    }

    /// Wait for the next poll slot. The deadline wins a tie.
    async fn tick(&mut self, cancel: &CancellationToken) -> std::result::Result<(), Stop> {
        if self.next >= self.deadline {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(Stop::Cancelled),
                _ = sleep_until(self.deadline) => return Err(Stop::Deadline),
            }
        }
        tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(Stop::Cancelled),
            _ = sleep_until(self.next) => {}
        }
        // missed slots are dropped rather than replayed
        self.next = after(self.next, self.interval).max(Instant::now());
        Ok(())
    }
}

impl<C: HttpClient> LinodeClient<C> {
    /// Maps to `linode.job.list`.
    ///
    /// `pending_only` is sent int-encoded.
    pub async fn linode_job_list(
        &self,
        linode_id: i64,
        job_id: Option<i64>,
        pending_only: Option<bool>,
    ) -> Result<Vec<Job>> {
        let mut args = ApiArgs::new()
            .with("LinodeID", linode_id)
            .with("JobID", job_id);
        args.set_int_bool("pendingOnly", pending_only);

        Ok(self.call("linode.job.list", &args).await?.records()?)
    }

    /// Wait for `job_id` on `linode_id` to finish, polling every `interval`.
    ///
    /// The first poll happens one interval after the call.
    pub async fn wait_for_job(
        &self,
        linode_id: i64,
        job_id: i64,
        interval: Duration,
        timeout: Duration,
    ) -> std::result::Result<JobOutcome, WaitError> {
        self.wait_for_job_with_cancel(linode_id, job_id, interval, timeout, &CancellationToken::new())
            .await
    }

    /// [`wait_for_job`](Self::wait_for_job) that also stops when `cancel` fires.
    #[cfg_attr(feature = "tracing", tracing::instrument(level = "debug", skip(self, cancel)))]
    pub async fn wait_for_job_with_cancel(
        &self,
        linode_id: i64,
        job_id: i64,
        interval: Duration,
        timeout: Duration,
        cancel: &CancellationToken,
    ) -> std::result::Result<JobOutcome, WaitError> {
        let mut schedule = Schedule::new(interval, timeout);
        loop {
            schedule
                .tick(cancel)
                .await
                .map_err(|stop| stop.into_error(Some(job_id)))?;

            let jobs = tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(WaitError::Cancelled { job_id: Some(job_id) }),
                jobs = self.linode_job_list(linode_id, Some(job_id), None) => jobs?,
            };
            let [job] = jobs.as_slice() else {
                return Err(WaitError::JobNotFound {
                    job_id,
                    matches: jobs.len(),
                });
            };

            #[cfg(feature = "tracing")]
            tracing::trace!(job_id, done = job.is_done(), "polled job");

            if job.is_done() {
                return Ok(if job.is_success() {
                    JobOutcome::Succeeded
                } else {
                    JobOutcome::Failed
                });
            }
        }
    }

    /// Wait until `linode_id` has no pending jobs, polling every `interval`.
    pub async fn wait_for_all_jobs(
        &self,
        linode_id: i64,
        interval: Duration,
        timeout: Duration,
    ) -> std::result::Result<(), WaitError> {
        self.wait_for_all_jobs_with_cancel(linode_id, interval, timeout, &CancellationToken::new())
            .await
    }

    /// [`wait_for_all_jobs`](Self::wait_for_all_jobs) that also stops when
    /// `cancel` fires.
    #[cfg_attr(feature = "tracing", tracing::instrument(level = "debug", skip(self, cancel)))]
    pub async fn wait_for_all_jobs_with_cancel(
        &self,
        linode_id: i64,
        interval: Duration,
        timeout: Duration,
        cancel: &CancellationToken,
    ) -> std::result::Result<(), WaitError> {
        let mut schedule = Schedule::new(interval, timeout);
        loop {
            schedule
                .tick(cancel)
                .await
                .map_err(|stop| stop.into_error(None))?;

            let pending = tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(WaitError::Cancelled { job_id: None }),
                jobs = self.linode_job_list(linode_id, None, Some(true)) => jobs?,
            };

            #[cfg(feature = "tracing")]
            tracing::trace!(pending = pending.len(), "polled pending jobs");

            if pending.is_empty() {
                return Ok(());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use linode_common::decode::decode_records;
    use serde_json::json;

    #[test]
    fn job_states() {
        let data = json!([
            {"HOST_START_DT":"","HOST_MESSAGE":"","ENTERED_DT":"2015-07-03 23:24:12.0","HOST_FINISH_DT":"","LABEL":"Create Filesystem - test-swap","JOBID":25087627,"HOST_SUCCESS":"","ACTION":"fs.create","LINODEID":1139016,"DURATION":""},
            {"HOST_START_DT":"2015-07-03 23:51:51.0","HOST_MESSAGE":"foo","ENTERED_DT":"2015-07-03 23:51:41.0","HOST_FINISH_DT":"2015-07-03 23:51:51.0","LABEL":"Create Filesystem - test-swap","JOBID":25088076,"HOST_SUCCESS":1,"ACTION":"fs.create","LINODEID":1139016,"DURATION":5},
            {"HOST_FINISH_DT":"2015-07-03 23:51:51.0","JOBID":3,"HOST_SUCCESS":0}
        ]);
        let jobs: Vec<Job> = decode_records(&data).unwrap();

        assert!(!jobs[0].is_done());
        assert!(!jobs[0].is_success());
        assert_eq!(jobs[0].duration, 0);

        assert!(jobs[1].is_done());
        assert!(jobs[1].is_success());
        assert_eq!(jobs[1].duration, 5);
        assert_eq!(jobs[1].host_message, "foo");

        assert!(jobs[2].is_done());
        assert!(!jobs[2].is_success());
    }

    #[test]
    fn wait_error_messages() {
        assert_eq!(
            WaitError::TimedOut { job_id: Some(42) }.to_string(),
            "timed out waiting for job ID 42"
        );
        assert_eq!(
            WaitError::TimedOut { job_id: None }.to_string(),
            "timed out waiting for all jobs to complete"
        );
        assert_eq!(
            WaitError::JobNotFound {
                job_id: 7,
                matches: 0
            }
            .to_string(),
            "job id 7 not found"
        );
    }

    #[tokio::test(start_paused = true)]
    async fn zero_interval_is_clamped() {
        let mut schedule = Schedule::new(Duration::ZERO, Duration::from_secs(1));
        let start = Instant::now();
        assert!(schedule.tick(&CancellationToken::new()).await.is_ok());
        assert_eq!(Instant::now() - start, MIN_POLL_INTERVAL);
    }

    #[tokio::test(start_paused = true)]
    async fn unbounded_durations_do_not_overflow() {
        let mut schedule = Schedule::new(Duration::MAX, Duration::MAX);
        assert!(schedule.deadline > Instant::now());

        let mut schedule = Schedule::new(Duration::from_secs(1), Duration::MAX);
        schedule.interval = Duration::MAX;
        assert!(schedule.tick(&CancellationToken::new()).await.is_ok());
        assert!(schedule.next > Instant::now());
    }

    #[tokio::test(start_paused = true)]
    async fn deadline_wins_tie() {
        let mut schedule = Schedule::new(Duration::from_secs(2), Duration::from_secs(2));
        assert!(matches!(
            schedule.tick(&CancellationToken::new()).await,
            Err(Stop::Deadline)
        ));
    }
}
