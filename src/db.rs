use std::{path::PathBuf, sync::Arc};

use anyhow::Result;
use mongodb::{Client, Database, options::ClientOptions};
use sea_orm::{ConnectionTrait, Database as OrmDatabase, DatabaseConnection, Statement};
use tokio::fs;

use crate::{
    catalogue::demo_products,
    config::{AppConfig, StoreBackend},
    store::{InMemoryProductStore, MongoProductStore, PgProductStore, ProductStore},
};

/// Create a SeaORM connection.
pub async fn create_orm_conn(database_url: &str) -> Result<DatabaseConnection> {
    let conn = OrmDatabase::connect(database_url).await?;
    Ok(conn)
}

/// Connect to MongoDB and select `database_name`.
pub async fn create_mongo_db(database_url: &str, database_name: &str) -> Result<Database> {
    let mut options = ClientOptions::parse(database_url).await?;
    options.app_name = Some(env!("CARGO_PKG_NAME").to_string());
    let client = Client::with_options(options)?;
    Ok(client.database(database_name))
}

/// Minimal migration runner that executes SQL files in `migrations/` in filename order.
pub async fn run_migrations(conn: &DatabaseConnection) -> Result<()> {
    let mut entries = fs::read_dir("migrations").await?;
    let mut files: Vec<PathBuf> = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort();

    let backend = conn.get_database_backend();
    for file in files {
        let sql = fs::read_to_string(&file).await?;
        // Postgres prepared statements cannot contain multiple commands,
        // so split the migration file and run each statement individually.
        for stmt in sql.split(';') {
            let stmt = stmt.trim();
            if stmt.is_empty() {
                continue;
            }
            let statement = format!("{stmt};");
            conn.execute(Statement::from_string(backend, statement))
                .await?;
        }
        tracing::debug!(file = %file.display(), "migration applied");
    }

    Ok(())
}

/// Open the product store that `DATABASE_URL` points at.
pub async fn connect_store(config: &AppConfig) -> Result<Arc<dyn ProductStore>> {
    let store: Arc<dyn ProductStore> = match config.backend()? {
        StoreBackend::Mongo => {
            let db = create_mongo_db(&config.database_url, &config.database_name).await?;
            tracing::info!(
                database = %config.database_name,
                collection = %config.products_collection,
                "using mongodb product store"
            );
            Arc::new(MongoProductStore::new(db, &config.products_collection))
        }
        StoreBackend::Postgres => {
            let orm = create_orm_conn(&config.database_url).await?;
            tracing::info!("using postgres product store");
            Arc::new(PgProductStore::new(orm))
        }
        StoreBackend::Memory => {
            tracing::warn!("using in-memory demo catalogue");
            Arc::new(InMemoryProductStore::new(demo_products()))
        }
    };
    Ok(store)
}
