//! Warehouse CLI entry point.
//!
//! Creates one product and one order referencing it, each inside its own
//! unit of work, and prints the results as JSON.

use log::error;
use std::error::Error;
use std::process::ExitCode;
use warehouse_core::{
    init_logging, SessionFactory, SqliteOrderRepository, SqliteProductRepository, UnitOfWork,
    WarehouseConfig, WarehouseService,
};

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=cli_run module=cli status=error error={err}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let config = WarehouseConfig::from_env()?;
    let log_dir = match config.log_dir.as_deref() {
        Some(dir) => Some(dir.to_str().ok_or("log directory must be valid UTF-8")?),
        None => None,
    };
    init_logging(&config.log_level, log_dir)?;

    let factory = SessionFactory::new(config.database);
    let conn = factory.open_session()?;

    let product = {
        let mut uow = UnitOfWork::begin(&conn)?;
        let service = WarehouseService::new(
            SqliteProductRepository::new(uow.connection()),
            SqliteOrderRepository::new(uow.connection()),
        );
        let product = service.create_product("test1", 1, 100.0)?;
        uow.commit()?;
        product
    };
    println!("create product: {}", serde_json::to_string(&product)?);

    let order = {
        let mut uow = UnitOfWork::begin(&conn)?;
        let service = WarehouseService::new(
            SqliteProductRepository::new(uow.connection()),
            SqliteOrderRepository::new(uow.connection()),
        );
        let order = service.create_order(vec![product])?;
        uow.commit()?;
        order
    };
    println!("create order: {}", serde_json::to_string(&order)?);

    Ok(())
}
