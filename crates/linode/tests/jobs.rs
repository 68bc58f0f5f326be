mod common;

use std::time::Duration;

use common::{MockClient, assert_form, client};
use linode::{CancellationToken, ClientError, JobOutcome, WaitError};
use tokio::time::Instant;

const PENDING: &str = r#"{"ERRORARRAY":[],"DATA":[{"HOST_START_DT":"","HOST_MESSAGE":"","ENTERED_DT":"2015-07-03 23:24:12.0","HOST_FINISH_DT":"","LABEL":"Create Filesystem - test-swap","JOBID":25088076,"HOST_SUCCESS":"","ACTION":"fs.create","LINODEID":1139016,"DURATION":""}],"ACTION":"linode.job.list"}"#;
const SUCCEEDED: &str = r#"{"ERRORARRAY":[],"DATA":[{"HOST_START_DT":"2015-07-03 23:51:51.0","HOST_MESSAGE":"foo","ENTERED_DT":"2015-07-03 23:51:41.0","HOST_FINISH_DT":"2015-07-03 23:51:51.0","LABEL":"Create Filesystem - test-swap","JOBID":25088076,"HOST_SUCCESS":1,"ACTION":"fs.create","LINODEID":1139016,"DURATION":5}],"ACTION":"linode.job.list"}"#;
const FAILED: &str = r#"{"ERRORARRAY":[],"DATA":[{"HOST_START_DT":"2015-07-03 23:51:51.0","HOST_MESSAGE":"disk full","ENTERED_DT":"2015-07-03 23:51:41.0","HOST_FINISH_DT":"2015-07-03 23:51:51.0","LABEL":"Create Filesystem - test-swap","JOBID":25088076,"HOST_SUCCESS":0,"ACTION":"fs.create","LINODEID":1139016,"DURATION":5}],"ACTION":"linode.job.list"}"#;
const EMPTY: &str = r#"{"ERRORARRAY":[],"DATA":[],"ACTION":"linode.job.list"}"#;

const SECOND: Duration = Duration::from_secs(1);

#[tokio::test]
async fn job_list_pending_only() {
    let mock = MockClient::default();
    mock.push_json(PENDING).await;
    mock.push_json(SUCCEEDED).await;

    let c = client(&mock);
    let pending = c
        .linode_job_list(1139016, Some(25088076), Some(true))
        .await
        .unwrap();
    assert!(!pending[0].is_done());
    assert_eq!(pending[0].duration, 0);

    let done = c
        .linode_job_list(1139016, Some(25088076), Some(false))
        .await
        .unwrap();
    assert!(done[0].is_done());
    assert!(done[0].is_success());
    assert_eq!(done[0].duration, 5);

    let forms = mock.forms().await;
    assert_form(
        &forms[0],
        "linode.job.list",
        &[("LinodeID", "1139016"), ("JobID", "25088076"), ("pendingOnly", "1")],
    );
    assert_form(
        &forms[1],
        "linode.job.list",
        &[("LinodeID", "1139016"), ("JobID", "25088076"), ("pendingOnly", "0")],
    );
}

#[tokio::test(start_paused = true)]
async fn wait_for_job_polls_until_done() {
    let mock = MockClient::default();
    mock.push_json(PENDING).await;
    mock.push_json(SUCCEEDED).await;

    let start = Instant::now();
    let outcome = client(&mock)
        .wait_for_job(1139016, 25088076, 3 * SECOND, 60 * SECOND)
        .await
        .unwrap();
    assert_eq!(outcome, JobOutcome::Succeeded);
    assert_eq!(Instant::now() - start, 6 * SECOND);

    let forms = mock.forms().await;
    assert_eq!(forms.len(), 2);
    assert_form(
        &forms[1],
        "linode.job.list",
        &[("LinodeID", "1139016"), ("JobID", "25088076")],
    );
}

#[tokio::test(start_paused = true)]
async fn wait_for_job_reports_failure() {
    let mock = MockClient::default();
    mock.push_json(FAILED).await;

    let outcome = client(&mock)
        .wait_for_job(1139016, 25088076, SECOND, 60 * SECOND)
        .await
        .unwrap();
    assert_eq!(outcome, JobOutcome::Failed);
    assert!(!outcome.is_success());
}

#[tokio::test(start_paused = true)]
async fn wait_for_job_times_out_before_first_poll() {
    let mock = MockClient::default();

    let err = client(&mock)
        .wait_for_job(0, 0, SECOND, Duration::from_nanos(1))
        .await
        .unwrap_err();
    assert!(matches!(err, WaitError::TimedOut { job_id: Some(0) }));
    assert_eq!(err.to_string(), "timed out waiting for job ID 0");
    assert_eq!(mock.request_count().await, 0);
}

#[tokio::test(start_paused = true)]
async fn wait_for_job_times_out_while_pending() {
    let mock = MockClient::default();
    mock.push_json(PENDING).await;
    mock.push_json(PENDING).await;

    let start = Instant::now();
    let err = client(&mock)
        .wait_for_job(1139016, 25088076, 2 * SECOND, 5 * SECOND)
        .await
        .unwrap_err();
    assert!(matches!(err, WaitError::TimedOut { .. }));
    assert_eq!(Instant::now() - start, 5 * SECOND);
    assert_eq!(mock.request_count().await, 2);
}

#[tokio::test(start_paused = true)]
async fn wait_for_job_rejects_ambiguous_list() {
    let two = r#"{"ERRORARRAY":[],"DATA":[{"JOBID":25088076,"HOST_FINISH_DT":"2015-07-03 23:51:51.0","HOST_SUCCESS":1},{"JOBID":25088076,"HOST_FINISH_DT":"2015-07-03 23:51:51.0","HOST_SUCCESS":1}],"ACTION":"linode.job.list"}"#;
    let mock = MockClient::default();
    mock.push_json(two).await;

    let err = client(&mock)
        .wait_for_job(1139016, 25088076, Duration::from_nanos(1), SECOND)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        WaitError::JobNotFound {
            job_id: 25088076,
            matches: 2
        }
    ));
    assert_eq!(err.to_string(), "job id 25088076 not found");
}

#[tokio::test(start_paused = true)]
async fn wait_for_job_surfaces_query_errors() {
    let mock = MockClient::default();
    mock.push_json(
        r#"{"ERRORARRAY":[{"ERRORCODE":5,"ERRORMESSAGE":"Object not found"}],"DATA":{},"ACTION":"linode.job.list"}"#,
    )
    .await;

    let err = client(&mock)
        .wait_for_job(1139016, 25088076, SECOND, 60 * SECOND)
        .await
        .unwrap_err();
    match err {
        WaitError::Query(ClientError::Remote(remote)) => assert_eq!(remote.code, 5),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test(start_paused = true)]
async fn wait_for_job_cancelled_between_polls() {
    let mock = MockClient::default();
    mock.push_json(PENDING).await;

    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(5 * SECOND).await;
        trigger.cancel();
    });

    let start = Instant::now();
    let err = client(&mock)
        .wait_for_job_with_cancel(1139016, 25088076, 3 * SECOND, 60 * SECOND, &cancel)
        .await
        .unwrap_err();
    assert!(matches!(err, WaitError::Cancelled { job_id: Some(25088076) }));
    assert_eq!(Instant::now() - start, 5 * SECOND);
    assert_eq!(mock.request_count().await, 1);
}

#[tokio::test(start_paused = true)]
async fn wait_for_all_jobs_until_none_pending() {
    let mock = MockClient::default();
    mock.push_json(PENDING).await;
    mock.push_json(EMPTY).await;

    client(&mock)
        .wait_for_all_jobs(1139016, SECOND, 60 * SECOND)
        .await
        .unwrap();

    let forms = mock.forms().await;
    assert_eq!(forms.len(), 2);
    for form in &forms {
        assert_form(
            form,
            "linode.job.list",
            &[("LinodeID", "1139016"), ("pendingOnly", "1")],
        );
    }
}

#[tokio::test(start_paused = true)]
async fn wait_for_all_jobs_times_out() {
    let mock = MockClient::default();

    let err = client(&mock)
        .wait_for_all_jobs(0, SECOND, Duration::from_nanos(1))
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "timed out waiting for all jobs to complete");
    assert_eq!(mock.request_count().await, 0);
}

#[tokio::test(start_paused = true)]
async fn wait_for_all_jobs_already_cancelled() {
    let mock = MockClient::default();
    let cancel = CancellationToken::new();
    cancel.cancel();

    let err = client(&mock)
        .wait_for_all_jobs_with_cancel(0, SECOND, 60 * SECOND, &cancel)
        .await
        .unwrap_err();
    assert!(matches!(err, WaitError::Cancelled { job_id: None }));
    assert_eq!(mock.request_count().await, 0);
}

#[tokio::test(start_paused = true)]
async fn wait_for_job_without_a_practical_deadline() {
    let mock = MockClient::default();
    mock.push_json(PENDING).await;
    mock.push_json(SUCCEEDED).await;

    let outcome = client(&mock)
        .wait_for_job(1139016, 25088076, SECOND, Duration::MAX)
        .await
        .unwrap();
    assert_eq!(outcome, JobOutcome::Succeeded);
    assert_eq!(mock.request_count().await, 2);
}

#[tokio::test(start_paused = true)]
async fn wait_for_all_jobs_with_huge_interval_times_out() {
    let mock = MockClient::default();

    let start = Instant::now();
    let err = client(&mock)
        .wait_for_all_jobs(1139016, Duration::MAX, SECOND)
        .await
        .unwrap_err();
    assert!(matches!(err, WaitError::TimedOut { job_id: None }));
    assert_eq!(Instant::now() - start, SECOND);
    assert_eq!(mock.request_count().await, 0);
}
