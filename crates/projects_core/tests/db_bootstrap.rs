use projects_core::db::migrations::latest_version;
use projects_core::db::open_db;
use projects_core::{
    ConnectionProvider, DbConfig, DbError, ProjectRepository, RepoError, SqliteConnectionProvider,
    SqliteProjectRepository,
};
use rusqlite::Connection;
use std::error::Error;

#[test]
fn connect_creates_schema_on_new_file() {
    let dir = tempfile::tempdir().unwrap();
    let provider = SqliteConnectionProvider::new(DbConfig::new(dir.path().join("projects.db")));

    let conn = provider.connect().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    for table in ["project", "category", "project_category", "step", "material"] {
        assert_table_exists(&conn, table);
    }
}

#[test]
fn connecting_to_same_database_twice_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let config = DbConfig::new(dir.path().join("projects.db"));

    let first = open_db(&config).unwrap();
    first
        .execute("INSERT INTO project (project_name) VALUES ('kept');", [])
        .unwrap();
    drop(first);

    let second = open_db(&config).unwrap();
    assert_eq!(schema_version(&second), latest_version());
    let count: i64 = second
        .query_row("SELECT COUNT(*) FROM project;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 1);
}

#[test]
fn connections_enforce_foreign_keys() {
    let dir = tempfile::tempdir().unwrap();
    let conn = open_db(&DbConfig::new(dir.path().join("projects.db"))).unwrap();

    let enabled: i64 = conn
        .query_row("PRAGMA foreign_keys;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(enabled, 1);

    let err = conn
        .execute(
            "INSERT INTO step (project_id, step_text, step_order) VALUES (42, 'orphan', 1);",
            [],
        )
        .unwrap_err();
    assert!(err.to_string().contains("FOREIGN KEY"), "unexpected error: {err}");
}

#[test]
fn database_with_newer_schema_version_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    let err = open_db(&DbConfig::new(&path)).unwrap_err();
    match err {
        DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn unreachable_path_is_a_connection_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing-dir").join("projects.db");
    let provider = SqliteConnectionProvider::new(DbConfig::new(&path));

    let err = provider.connect().unwrap_err();
    match &err {
        DbError::Connection { path: failed, .. } => assert_eq!(failed, &path),
        other => panic!("unexpected error: {other}"),
    }
    assert!(err.source().is_some());
    assert!(err.to_string().starts_with("connection failed"));
}

#[test]
fn file_that_is_not_a_database_is_a_connection_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("projects.db");
    std::fs::write(&path, vec![b'x'; 4096]).unwrap();
    let provider = SqliteConnectionProvider::new(DbConfig::new(&path));

    let err = provider.connect().unwrap_err();
    match &err {
        DbError::Connection {
            path: failed,
            source,
        } => {
            assert_eq!(failed, &path);
            assert_eq!(
                source.sqlite_error_code(),
                Some(rusqlite::ErrorCode::NotADatabase)
            );
        }
        other => panic!("unexpected error: {other:?}"),
    }

    let repo = SqliteProjectRepository::new(provider);
    let err = repo.fetch_all_projects().unwrap_err();
    assert!(
        matches!(err, RepoError::Db(DbError::Connection { .. })),
        "unexpected error: {err}"
    );
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "table {table_name} does not exist");
}
