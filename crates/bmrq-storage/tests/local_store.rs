//! Local CSV store: header-on-create, appends, sequence hints.

use bmrq_core::record::{ITEM_COUNT, SubmissionRecord};
use bmrq_core::row;
use bmrq_storage::local::CsvStore;
use bmrq_storage::store::{SequenceHint, SubmissionStore};
use tempfile::TempDir;

fn record(sid: u32) -> SubmissionRecord {
    let scores = [3u8; ITEM_COUNT];
    SubmissionRecord::new(sid, "", scores, 60)
}

#[tokio::test]
async fn append_writes_header_exactly_once() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("results").join("bmrq_results.csv");
    let store = CsvStore::new(&path);

    store.append(&record(1)).await.unwrap();
    store.append(&record(2)).await.unwrap();

    let mut reader = csv::Reader::from_path(&path).unwrap();
    let headers: Vec<String> = reader.headers().unwrap().iter().map(String::from).collect();
    assert_eq!(headers, row::header());

    let rows: Vec<_> = reader.records().collect::<Result<_, _>>().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].get(1), Some("1"));
    assert_eq!(rows[1].get(1), Some("2"));
}

#[tokio::test]
async fn appended_rows_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("out.csv");
    let store = CsvStore::new(&path);

    let written = record(5);
    store.append(&written).await.unwrap();

    let mut reader = csv::Reader::from_path(&path).unwrap();
    let row: Vec<String> = reader
        .records()
        .next()
        .unwrap()
        .unwrap()
        .iter()
        .map(String::from)
        .collect();
    let read_back = SubmissionRecord::from_row(&row).unwrap();
    assert_eq!(read_back, written);
}

#[tokio::test]
async fn missing_file_reads_as_empty() {
    let dir = TempDir::new().unwrap();
    let store = CsvStore::new(dir.path().join("absent.csv"));
    let hint = store.sequence_hint().await.unwrap();
    assert_eq!(hint, SequenceHint::MaxSid(None));
    assert_eq!(hint.next_sid(), 1);
}

#[tokio::test]
async fn numeric_sid_column_yields_the_maximum() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("out.csv");
    let store = CsvStore::new(&path);

    store.append(&record(1)).await.unwrap();
    store.append(&record(5)).await.unwrap();
    store.append(&record(3)).await.unwrap();

    let hint = store.sequence_hint().await.unwrap();
    assert_eq!(hint, SequenceHint::MaxSid(Some(5)));
    assert_eq!(hint.next_sid(), 6);
}

#[tokio::test]
async fn non_numeric_sid_column_falls_back_to_row_count() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("out.csv");
    std::fs::write(&path, "timestamp,sid,name\n2026-01-01T00:00:00Z,abc,Ana\n2026-01-02T00:00:00Z,def,Ben\n").unwrap();

    let store = CsvStore::new(&path);
    let hint = store.sequence_hint().await.unwrap();
    assert_eq!(hint, SequenceHint::RecordCount(2));
    assert_eq!(hint.next_sid(), 3);
}

#[tokio::test]
async fn file_without_sid_column_is_counted() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("out.csv");
    std::fs::write(&path, "timestamp,name\n2026-01-01T00:00:00Z,Ana\n").unwrap();

    let store = CsvStore::new(&path);
    let hint = store.sequence_hint().await.unwrap();
    assert_eq!(hint, SequenceHint::RecordCount(1));
}

#[tokio::test]
async fn header_only_file_reads_as_empty() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("out.csv");
    std::fs::write(&path, "timestamp,sid,subject_code,name,total\n").unwrap();

    let store = CsvStore::new(&path);
    let hint = store.sequence_hint().await.unwrap();
    assert_eq!(hint.next_sid(), 1);
}
