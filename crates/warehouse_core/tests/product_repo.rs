use warehouse_core::db::open_db_in_memory;
use warehouse_core::{
    Product, ProductRepository, RepoError, SqliteProductRepository, UnitOfWork, ValidationError,
};

#[test]
fn add_assigns_id_and_get_returns_equal_product() {
    let conn = open_db_in_memory().unwrap();
    let mut uow = UnitOfWork::begin(&conn).unwrap();
    let repo = SqliteProductRepository::new(uow.connection());

    let added = repo.add(Product::new("widget", 5, 9.99).unwrap()).unwrap();
    assert_ne!(added.id, 0);
    uow.commit().unwrap();

    let loaded = SqliteProductRepository::new(&conn).get(added.id).unwrap();
    assert_eq!(
        loaded,
        Product {
            id: added.id,
            name: "widget".to_string(),
            quantity: 5,
            price: 9.99,
        }
    );
}

#[test]
fn id_is_readable_before_commit_within_same_scope() {
    let conn = open_db_in_memory().unwrap();
    let _uow = UnitOfWork::begin(&conn).unwrap();
    let repo = SqliteProductRepository::new(&conn);

    let first = repo.add(Product::new("a", 1, 1.0).unwrap()).unwrap();
    let second = repo.add(Product::new("b", 2, 2.0).unwrap()).unwrap();

    assert_ne!(first.id, second.id);
    assert_eq!(repo.get(second.id).unwrap().name, "b");
}

#[test]
fn get_unknown_id_returns_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteProductRepository::new(&conn);

    let err = repo.get(999).unwrap_err();
    assert!(matches!(
        err,
        RepoError::NotFound {
            entity: "product",
            id: 999
        }
    ));
    assert!(err.is_not_found());
}

#[test]
fn get_negative_id_is_rejected() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteProductRepository::new(&conn);

    let err = repo.get(-1).unwrap_err();
    assert!(matches!(err, RepoError::InvalidId { id: -1, .. }));
}

#[test]
fn add_rejects_already_persisted_product() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteProductRepository::new(&conn);

    let mut product = Product::new("widget", 1, 1.0).unwrap();
    product.id = 42;

    let err = repo.add(product).unwrap_err();
    assert!(matches!(err, RepoError::AlreadyPersisted { id: 42, .. }));
}

#[test]
fn add_validates_before_writing() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteProductRepository::new(&conn);

    let mut product = Product::new("widget", 1, 1.0).unwrap();
    product.quantity = -3;

    let err = repo.add(product).unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(ValidationError::NegativeQuantity(-3))
    ));
    assert_eq!(product_count(&conn), 0);
}

#[test]
fn get_rejects_rows_violating_invariants() {
    let conn = open_db_in_memory().unwrap();
    conn.execute_batch(
        "PRAGMA ignore_check_constraints = ON;
         INSERT INTO products (id, name, quantity, price) VALUES (7, 'broken', -1, 1.0);
         PRAGMA ignore_check_constraints = OFF;",
    )
    .unwrap();

    let err = SqliteProductRepository::new(&conn).get(7).unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(_)));
}

fn product_count(conn: &rusqlite::Connection) -> i64 {
    conn.query_row("SELECT COUNT(*) FROM products;", [], |row| row.get(0))
        .unwrap()
}
