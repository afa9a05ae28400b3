use anyhow::bail;
use catalog_query_api::{
    config::{AppConfig, StoreBackend},
    db::{create_orm_conn, run_migrations},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;
    if config.backend()? != StoreBackend::Postgres {
        bail!("migrations only apply to a postgres DATABASE_URL");
    }
    let orm = create_orm_conn(&config.database_url).await?;
    run_migrations(&orm).await?;
    println!("Migrations applied");
    Ok(())
}
