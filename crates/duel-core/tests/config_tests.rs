use duel_core::{ConfigError, DashboardConfig, DashboardSession, UploadFailurePolicy};
use duel_model::BackendKind;
use std::fs;

#[test]
fn toml_file_configures_session() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dbduel.toml");
    fs::write(
        &path,
        r#"
default_kind = "SQLite"
default_selection = ["Lake", "Primary"]
upload_failure = "retain"

[[seed]]
name = "Primary"
db_type = "Postgres"
host = "db.internal"
port = 5433

[[seed]]
name = "Lake"
kind = "DuckDB"
"#,
    )
    .unwrap();

    let config = DashboardConfig::from_path(&path).unwrap();
    assert_eq!(config.default_kind, BackendKind::Sqlite);
    assert_eq!(config.upload_failure, UploadFailurePolicy::Retain);

    let mut session = DashboardSession::new(config).unwrap();
    assert_eq!(session.choices(), ["Primary", "Lake"]);

    let perf = session.performance();
    assert_eq!(perf[0].backend_name, "Lake");
    assert!(perf[0].total_time < perf[1].total_time);

    session.on_add_backend("Scratch");
    assert_eq!(session.registry().lookup("Scratch").unwrap().kind, BackendKind::Sqlite);
}

#[test]
fn yaml_file_is_accepted() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dbduel.yml");
    fs::write(&path, "max_upload_bytes: 1024\nparse_cache_capacity: 4\n").unwrap();

    let config = DashboardConfig::from_path(&path).unwrap();
    assert_eq!(config.max_upload_bytes, 1024);
    assert_eq!(config.parse_cache_capacity, 4);
    assert_eq!(config.seed.len(), 2);
}

#[test]
fn missing_file_is_io_error() {
    let err = DashboardConfig::from_path("/no/such/dbduel.toml").unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
}

#[test]
fn syntax_error_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.toml");
    fs::write(&path, "default_kind = [").unwrap();

    assert!(matches!(
        DashboardConfig::from_path(&path),
        Err(ConfigError::Toml(_))
    ));
}

#[test]
fn unknown_kind_is_rejected() {
    let err = DashboardConfig::from_toml("default_kind = \"Oracle\"").unwrap_err();
    assert!(matches!(err, ConfigError::Toml(_)));
}
