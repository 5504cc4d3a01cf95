//! End-to-end flow against a local-only context.

use bmrq_core::record::{ITEM_COUNT, SubmissionRecord};
use bmrq_instrument::error::ScoringError;
use bmrq_instrument::scoring::Sensitivity;
use bmrq_notify::email::NotifyOutcome;
use bmrq_session::{SessionConfig, SessionContext};
use bmrq_storage::gateway::WriteTarget;
use tempfile::TempDir;

fn all(value: u8) -> [Option<u8>; ITEM_COUNT] {
    [Some(value); ITEM_COUNT]
}

async fn local_context(dir: &TempDir) -> SessionContext {
    let csv_path = dir.path().join("results").join("bmrq_results.csv");
    SessionContext::initialize(SessionConfig::local_only(csv_path)).await
}

fn read_rows(dir: &TempDir) -> Vec<SubmissionRecord> {
    let path = dir.path().join("results").join("bmrq_results.csv");
    let mut reader = csv::Reader::from_path(path).unwrap();
    reader
        .records()
        .map(|r| {
            let cells: Vec<String> = r.unwrap().iter().map(String::from).collect();
            SubmissionRecord::from_row(&cells).unwrap()
        })
        .collect()
}

#[tokio::test]
async fn first_render_assigns_subject_one() {
    let dir = TempDir::new().unwrap();
    let ctx = local_context(&dir).await;

    let session = ctx.render().await;
    assert_eq!(session.sid, 1);
    assert_eq!(session.subject_code, "S001");
    assert_eq!(session.collected, 0);
}

#[tokio::test]
async fn neutral_submission_scores_low_and_lands_in_the_csv() {
    let dir = TempDir::new().unwrap();
    let ctx = local_context(&dir).await;

    let session = ctx.render().await;
    let outcome = ctx.submit(&session, "Ana", &all(3)).await.unwrap();

    assert_eq!(outcome.record.total, 60);
    assert_eq!(outcome.sensitivity, Sensitivity::Low);
    assert_eq!(outcome.write.written_to, Some(WriteTarget::Local));
    assert!(outcome.write.error.is_none());
    assert_eq!(outcome.notification, NotifyOutcome::Skipped);

    let rows = read_rows(&dir);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0], outcome.record);
}

#[tokio::test]
async fn incomplete_submission_blocks_before_any_write() {
    let dir = TempDir::new().unwrap();
    let ctx = local_context(&dir).await;

    let session = ctx.render().await;
    let mut raw = all(3);
    raw[12] = None;

    let err = ctx.submit(&session, "Ana", &raw).await.unwrap_err();
    assert_eq!(err, ScoringError::Incomplete { position: 13 });
    assert!(
        !dir.path().join("results").join("bmrq_results.csv").exists(),
        "a rejected submission must not create the fallback file"
    );
}

#[tokio::test]
async fn sequence_advances_across_submissions() {
    let dir = TempDir::new().unwrap();
    let ctx = local_context(&dir).await;

    let first = ctx.render().await;
    ctx.submit(&first, "", &all(3)).await.unwrap();

    let second = ctx.render().await;
    assert_eq!(second.sid, 2);
    assert_eq!(second.subject_code, "S002");
    assert_eq!(second.collected, 1);
}

#[tokio::test]
async fn render_time_sid_is_written_even_if_rows_arrive_later() {
    let dir = TempDir::new().unwrap();
    let ctx = local_context(&dir).await;

    // Two sessions rendered in the same window both see sid 1.
    let session_a = ctx.render().await;
    let session_b = ctx.render().await;
    assert_eq!(session_a.sid, session_b.sid);

    ctx.submit(&session_a, "first", &all(3)).await.unwrap();
    let outcome_b = ctx.submit(&session_b, "second", &all(4)).await.unwrap();

    // The accepted weak guarantee: the stale render-time sid is persisted.
    assert_eq!(outcome_b.record.sid, session_b.sid);
    let rows = read_rows(&dir);
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].sid, rows[1].sid);
}

#[tokio::test]
async fn duplicate_submissions_yield_two_rows() {
    let dir = TempDir::new().unwrap();
    let ctx = local_context(&dir).await;

    let session = ctx.render().await;
    ctx.submit(&session, "Ana", &all(4)).await.unwrap();
    ctx.submit(&session, "Ana", &all(4)).await.unwrap();

    assert_eq!(read_rows(&dir).len(), 2);
}

#[tokio::test]
async fn blank_name_falls_back_to_the_subject_code() {
    let dir = TempDir::new().unwrap();
    let ctx = local_context(&dir).await;

    let session = ctx.render().await;
    let outcome = ctx.submit(&session, "   ", &all(5)).await.unwrap();
    assert_eq!(outcome.record.name, "S001");
    assert_eq!(outcome.record.total, 92);
    assert_eq!(outcome.sensitivity, Sensitivity::Normal);
}
