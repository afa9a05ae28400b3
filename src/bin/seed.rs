use catalog_query_api::{
    catalogue::demo_products,
    config::{AppConfig, StoreBackend},
    db::{create_mongo_db, create_orm_conn, run_migrations},
    entity::products::{ActiveModel as ProductActive, Entity as Products},
    models::Product,
};
use chrono::Utc;
use mongodb::bson::{self, Document, doc};
use sea_orm::{ActiveModelTrait, EntityTrait, PaginatorTrait, Set};
use uuid::Uuid;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    match config.backend()? {
        StoreBackend::Mongo => seed_mongo(&config).await?,
        StoreBackend::Postgres => seed_postgres(&config.database_url).await?,
        StoreBackend::Memory => {
            println!("memory:// stores are seeded on startup, nothing to do");
        }
    }

    Ok(())
}

fn product_document(product: &Product) -> Document {
    let created_at = product.created_at.unwrap_or_else(Utc::now);
    doc! {
        "productName": product.product_name.as_str(),
        "brandName": product.brand_name.as_str(),
        "categoryName": product.category_name.as_str(),
        "price": product.price,
        "createdAt": bson::DateTime::from_millis(created_at.timestamp_millis()),
    }
}

async fn seed_mongo(config: &AppConfig) -> anyhow::Result<()> {
    let db = create_mongo_db(&config.database_url, &config.database_name).await?;
    let collection = db.collection::<Document>(&config.products_collection);

    let existing = collection.count_documents(doc! {}).await?;
    if existing > 0 {
        println!("Collection already holds {existing} products, skipping seed");
        return Ok(());
    }

    let documents: Vec<Document> = demo_products().iter().map(product_document).collect();
    let result = collection.insert_many(documents).await?;
    println!("Seeded {} products", result.inserted_ids.len());
    Ok(())
}

async fn seed_postgres(database_url: &str) -> anyhow::Result<()> {
    let orm = create_orm_conn(database_url).await?;
    run_migrations(&orm).await?;

    let existing = Products::find().count(&orm).await?;
    if existing > 0 {
        println!("Table already holds {existing} products, skipping seed");
        return Ok(());
    }

    let products = demo_products();
    for product in &products {
        let created_at = product.created_at.unwrap_or_else(Utc::now);
        ProductActive {
            id: Set(Uuid::new_v4()),
            product_name: Set(product.product_name.clone()),
            brand_name: Set(product.brand_name.clone()),
            category_name: Set(product.category_name.clone()),
            price: Set(product.price),
            created_at: Set(created_at.fixed_offset()),
        }
        .insert(&orm)
        .await?;
    }

    println!("Seeded {} products", products.len());
    Ok(())
}
