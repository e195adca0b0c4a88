//! Session behaviour tests
//!
//! End-to-end checks of handlers, memoization and projections.

use duel_core::prelude::*;
use duel_core::{RegistryError, UploadFailurePolicy};
use duel_test_utils::*;
use pretty_assertions::assert_eq;
use std::io::Write;

#[test]
fn seed_selection_yields_two_records_duckdb_faster() {
    let session = setup_test_session();
    let perf = session.performance();

    assert_eq!(perf.len(), 2);
    assert_eq!(perf[0].backend_name, "DuckDB");
    assert_eq!(perf[1].backend_name, "Postgres");
    assert!(perf.iter().all(|r| r.rows_inserted == 10_000));
    assert!(perf[0].total_time < perf[1].total_time);
}

#[test]
fn repeated_reads_simulate_once_per_backend() {
    let (session, sim) = setup_counted_session();

    let first = session.performance();
    let _ = session.summary();
    let _ = session.chart();
    let _ = session.performance_rows();
    let last = session.performance();

    assert_eq!(first, last);
    assert!(first.same_computation(&last));
    assert_eq!(sim.calls_for("DuckDB"), 1);
    assert_eq!(sim.calls_for("Postgres"), 1);
    assert_eq!(session.aggregator_stats().passes, 1);
}

#[test]
fn invalidate_forces_a_fresh_pass() {
    let (session, sim) = setup_counted_session();
    let before = session.performance();
    sim.reset();
    assert_eq!(sim.calls(), 0);

    let _ = session.performance();
    assert_eq!(sim.calls(), 0);

    session.invalidate();
    let after = session.performance();
    assert_eq!(before, after);
    assert!(!before.same_computation(&after));
    assert_eq!(sim.calls_for("DuckDB"), 1);
    assert_eq!(sim.calls_for("Postgres"), 1);
}

#[tokio::test]
async fn upload_invalidates_even_when_values_match() {
    let (mut session, sim) = setup_counted_session();
    let before = session.performance();

    // Fixed latencies do not depend on the data, so values coincide
    session.on_upload(Some(sample_csv_upload())).await;
    let after = session.performance();

    assert_eq!(before.len(), after.len());
    assert!(!before.same_computation(&after));
    assert_eq!(sim.calls(), 4);
    assert_eq!(after[0].rows_inserted, 3);
}

#[test]
fn selection_change_invalidates() {
    let (mut session, sim) = setup_counted_session();
    let before = session.performance();

    assert!(session.select(["Postgres", "DuckDB"]));
    let after = session.performance();

    assert!(!before.same_computation(&after));
    assert_eq!(after[0].backend_name, "Postgres");
    assert_eq!(sim.calls(), 4);
}

#[test]
fn identical_selection_keeps_cache() {
    let (mut session, sim) = setup_counted_session();
    let before = session.performance();

    assert!(!session.select(["DuckDB", "Postgres"]));
    assert!(session.performance().same_computation(&before));
    assert_eq!(sim.calls(), 2);
}

#[test]
fn unresolved_names_are_skipped_silently() {
    let mut session = setup_test_session();
    session.select(["Ghost", "Postgres", "Phantom"]);

    let perf = session.performance();
    assert_eq!(perf.len(), 1);
    assert_eq!(perf[0].backend_name, "Postgres");
    assert!(session.notifications().is_empty());
}

#[test]
fn adding_a_selected_name_makes_it_appear() {
    let mut session = setup_test_session();
    session.select(["DuckDB", "Later"]);
    assert_eq!(session.performance().len(), 1);

    session.on_add_backend("Later");
    let perf = session.performance();
    let names: Vec<_> = perf.iter().map(|r| r.backend_name.as_str()).collect();
    assert_eq!(names, vec!["DuckDB", "Later"]);
}

#[test]
fn duplicate_add_leaves_registry_unchanged() {
    let mut session = setup_test_session();
    let err = session.try_add_backend("DuckDB").unwrap_err();

    assert!(matches!(
        err,
        DashboardError::Registry(RegistryError::AlreadyExists { ref name }) if name == "DuckDB"
    ));
    assert!(err.is_validation_warning());
    assert_eq!(session.registry().len(), 2);
}

#[test]
fn added_backend_gets_default_kind() {
    let config = DashboardConfig::default().with_default_kind(BackendKind::MongoDb);
    let mut session = DashboardSession::new(config).unwrap();
    session.on_add_backend("Docs");

    let docs = session.registry().lookup("Docs").unwrap();
    assert_eq!(docs.kind, BackendKind::MongoDb);
    assert!(docs.host.is_none() && docs.port.is_none());
}

#[tokio::test]
async fn unsupported_upload_resets_dataset_and_notifies() {
    let mut session = setup_test_session();
    session.on_upload(Some(sample_csv_upload())).await;
    assert_eq!(session.dataset().row_count(), 3);

    let n = session.on_upload(Some(unsupported_upload())).await.unwrap();

    assert_eq!(n.severity, Severity::Error);
    assert_eq!(n.text, "Error reading TXT file: unsupported file type: 'txt'");
    assert!(session.dataset().is_empty());
    assert_eq!(session.performance().len(), 2);
}

#[tokio::test]
async fn malformed_upload_reports_parse_error() {
    let mut session = setup_test_session();
    let n = session.on_upload(Some(malformed_json_upload())).await.unwrap();

    assert_eq!(n.severity, Severity::Error);
    assert!(n.text.starts_with("Error reading JSON file: JSON parse error:"));
    assert!(session.dataset().is_empty());
}

#[tokio::test]
async fn retain_policy_keeps_previous_dataset() {
    let config = DashboardConfig::default().with_upload_failure(UploadFailurePolicy::Retain);
    let mut session = DashboardSession::new(config).unwrap();

    session.on_upload(Some(sample_json_upload())).await;
    session.on_upload(Some(unsupported_upload())).await;

    assert_eq!(session.dataset().row_count(), 2);
}

#[tokio::test]
async fn successful_upload_notifies_with_extension() {
    let mut session = setup_test_session();
    let n = session.on_upload(Some(sample_json_upload())).await.unwrap();

    assert_eq!(n.severity, Severity::Message);
    assert_eq!(n.text, "JSON file uploaded successfully.");
    assert_eq!(session.dataset().column_names(), vec!["id", "name"]);
}

#[tokio::test]
async fn clearing_upload_resets_without_notification() {
    let mut session = setup_test_session();
    session.on_upload(Some(sample_csv_upload())).await;

    assert!(session.on_upload(None).await.is_none());
    assert!(session.dataset().is_empty());
    assert_eq!(session.notifications().len(), 1);
}

#[tokio::test]
async fn upload_from_disk_uses_declared_name() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(SAMPLE_CSV.as_bytes()).unwrap();

    let mut session = setup_test_session();
    let upload = UploadedFile::with_name(file.path(), "scores.CSV");
    let n = session.on_upload(Some(upload)).await.unwrap();

    assert_eq!(n.text, "CSV file uploaded successfully.");
    assert_eq!(session.performance()[0].rows_inserted, 3);
}

#[test]
fn empty_selection_projections() {
    let mut session = setup_test_session();
    session.select(Vec::<String>::new());

    let summary = session.summary();
    assert_eq!(summary.average_execution_time, 0.0);
    assert_eq!(summary.difference, PerformanceDifference::NotApplicable);
    assert_eq!(session.chart().title, "No Data to Display");
    assert_eq!(session.title(), "DatabaseDuel ⚔️ - Comparing: ");
}

#[test]
fn default_summary_text() {
    let session = setup_test_session();
    let text = session.summary().display();

    assert_eq!(text.average_execution_time, "0.075 seconds");
    assert_eq!(text.total_queries, "4");
    assert_eq!(text.performance_difference, "100.00%");
}

#[test]
fn snapshot_serializes_without_secrets() {
    let config = DashboardConfig::default().with_seed(vec![
        BackendConfig::new("Secure", BackendKind::Postgres)
            .with_credentials("admin", duel_model::Secret::new("hunter2")),
    ]);
    let mut session = DashboardSession::new(config).unwrap();
    session.select(["Secure"]);

    let json = serde_json::to_value(session.snapshot()).unwrap();
    assert_eq!(json["title"], "DatabaseDuel ⚔️ - Comparing: Secure");
    assert_eq!(json["performance"][0]["db_name"], "Secure");
    assert_eq!(json["connections"]["rows"][0]["password"], "**********");
    assert!(!json.to_string().contains("hunter2"));
}

#[test]
fn sessions_are_isolated() {
    let mut a = setup_test_session();
    let b = setup_test_session();
    a.on_add_backend("Only A");

    assert_ne!(a.id(), b.id());
    assert!(b.registry().lookup("Only A").is_none());
}
