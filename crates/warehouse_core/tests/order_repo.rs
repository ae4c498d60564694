use rusqlite::Connection;
use warehouse_core::db::open_db_in_memory;
use warehouse_core::{
    Order, OrderRepository, Product, ProductRepository, RepoError, SqliteOrderRepository,
    SqliteProductRepository, UnitOfWork, ValidationError,
};

fn persist_products(conn: &Connection, names: &[&str]) -> Vec<Product> {
    let mut uow = UnitOfWork::begin(conn).unwrap();
    let repo = SqliteProductRepository::new(uow.connection());
    let products = names
        .iter()
        .map(|name| repo.add(Product::new(*name, 1, 2.5).unwrap()).unwrap())
        .collect();
    uow.commit().unwrap();
    products
}

#[test]
fn order_with_two_products_round_trips_in_supplied_order() {
    let conn = open_db_in_memory().unwrap();
    let products = persist_products(&conn, &["first", "second"]);
    let supplied = vec![products[1].clone(), products[0].clone()];

    let mut uow = UnitOfWork::begin(&conn).unwrap();
    let repo = SqliteOrderRepository::new(uow.connection());
    let added = repo.add(Order::new(supplied.clone())).unwrap();
    assert_ne!(added.id, 0);
    uow.commit().unwrap();

    let loaded = SqliteOrderRepository::new(&conn).get(added.id).unwrap();
    assert_eq!(loaded.id, added.id);
    assert_eq!(loaded.products, supplied);
}

#[test]
fn same_product_may_appear_twice() {
    let conn = open_db_in_memory().unwrap();
    let products = persist_products(&conn, &["repeat"]);

    let mut uow = UnitOfWork::begin(&conn).unwrap();
    let repo = SqliteOrderRepository::new(uow.connection());
    let added = repo
        .add(Order::new(vec![products[0].clone(), products[0].clone()]))
        .unwrap();
    uow.commit().unwrap();

    let loaded = repo.get(added.id).unwrap();
    assert_eq!(loaded.products.len(), 2);
}

#[test]
fn empty_order_is_stored_and_loaded_empty() {
    let conn = open_db_in_memory().unwrap();

    let mut uow = UnitOfWork::begin(&conn).unwrap();
    let repo = SqliteOrderRepository::new(uow.connection());
    let added = repo.add(Order::new(Vec::new())).unwrap();
    uow.commit().unwrap();

    let loaded = repo.get(added.id).unwrap();
    assert!(loaded.is_empty());
}

#[test]
fn unpersisted_product_is_rejected_without_writing() {
    let conn = open_db_in_memory().unwrap();
    let products = persist_products(&conn, &["stored"]);
    let draft = Product::new("draft", 1, 1.0).unwrap();

    let repo = SqliteOrderRepository::new(&conn);
    let err = repo
        .add(Order::new(vec![products[0].clone(), draft]))
        .unwrap_err();

    assert!(matches!(
        err,
        RepoError::Validation(ValidationError::UnpersistedProduct { position: 1 })
    ));
    let orders: i64 = conn
        .query_row("SELECT COUNT(*) FROM orders;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(orders, 0);
}

#[test]
fn add_rejects_already_persisted_order() {
    let conn = open_db_in_memory().unwrap();
    let mut order = Order::new(Vec::new());
    order.id = 3;

    let err = SqliteOrderRepository::new(&conn).add(order).unwrap_err();
    assert!(matches!(
        err,
        RepoError::AlreadyPersisted {
            entity: "order",
            id: 3
        }
    ));
}

#[test]
fn get_unknown_order_returns_not_found() {
    let conn = open_db_in_memory().unwrap();

    let err = SqliteOrderRepository::new(&conn).get(999).unwrap_err();
    assert!(matches!(
        err,
        RepoError::NotFound {
            entity: "order",
            id: 999
        }
    ));
}

#[test]
fn dangling_product_link_is_reported_not_skipped() {
    let conn = open_db_in_memory().unwrap();
    let mut ghost = Product::new("ghost", 1, 1.0).unwrap();
    ghost.id = 404;

    let _uow = UnitOfWork::begin(&conn).unwrap();
    let repo = SqliteOrderRepository::new(&conn);
    let added = repo.add(Order::new(vec![ghost])).unwrap();

    let err = repo.get(added.id).unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(message) if message.contains("404")));
}
