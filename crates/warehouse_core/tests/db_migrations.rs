use rusqlite::Connection;
use warehouse_core::db::migrations::latest_version;
use warehouse_core::db::{open_db, open_db_in_memory, DbError, DbTarget, SessionFactory};

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    assert_table_exists(&conn, "products");
    assert_table_exists(&conn, "orders");
    assert_table_exists(&conn, "order_products");
}

#[test]
fn opened_connections_enforce_foreign_keys_and_autocommit() {
    let conn = open_db_in_memory().unwrap();

    let foreign_keys: i64 = conn
        .query_row("PRAGMA foreign_keys;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(foreign_keys, 1);
    assert!(conn.is_autocommit());
}

#[test]
fn opening_same_database_twice_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("warehouse.db");

    let conn_first = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_first), latest_version());
    drop(conn_first);

    let conn_second = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_second), latest_version());
    assert_table_exists(&conn_second, "products");
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    let err = open_db(&path).unwrap_err();
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
fn session_factory_file_sessions_share_committed_data() {
    let dir = tempfile::tempdir().unwrap();
    let factory = SessionFactory::new(DbTarget::File(dir.path().join("shared.db")));

    let writer = factory.open_session().unwrap();
    writer
        .execute(
            "INSERT INTO products (name, quantity, price) VALUES ('bolt', 3, 0.5);",
            [],
        )
        .unwrap();

    let reader = factory.open_session().unwrap();
    let count: i64 = reader
        .query_row("SELECT COUNT(*) FROM products;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 1);
}

#[test]
fn session_factory_memory_sessions_are_isolated() {
    let factory = SessionFactory::new(DbTarget::Memory);
    assert_eq!(factory.target(), &DbTarget::Memory);

    let first = factory.open_session().unwrap();
    first
        .execute(
            "INSERT INTO products (name, quantity, price) VALUES ('nut', 1, 0.1);",
            [],
        )
        .unwrap();

    let second = factory.open_session().unwrap();
    let count: i64 = second
        .query_row("SELECT COUNT(*) FROM products;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 0);
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
