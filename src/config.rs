use std::env;

use anyhow::bail;

const DEFAULT_CORS_ORIGINS: &str = "http://localhost:5173,https://shopeasy-e-commerce.web.app,https://shopeasy-e-commerce.firebaseapp.com";

/// Which product store `DATABASE_URL` points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Mongo,
    Postgres,
    Memory,
}

impl StoreBackend {
    pub fn from_url(url: &str) -> anyhow::Result<Self> {
        let scheme = url.split_once("://").map(|(scheme, _)| scheme).unwrap_or("");
        match scheme {
            "mongodb" | "mongodb+srv" => Ok(Self::Mongo),
            "postgres" | "postgresql" => Ok(Self::Postgres),
            "memory" => Ok(Self::Memory),
            _ => bail!("unsupported DATABASE_URL scheme: {scheme:?}"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub database_name: String,
    pub products_collection: String,
    pub host: String,
    pub port: u16,
    pub cors_origins: Vec<String>,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_vars(|key| env::var(key).ok())
    }

    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let Some(database_url) = var("DATABASE_URL").or_else(|| var("MONGODB_URI")) else {
            bail!("DATABASE_URL (or MONGODB_URI) must be set");
        };
        let database_name = var("DATABASE_NAME").unwrap_or_else(|| "shopeasy".to_string());
        let products_collection =
            var("PRODUCTS_COLLECTION").unwrap_or_else(|| "allproducts".to_string());
        let host = var("APP_HOST").unwrap_or_else(|| "127.0.0.1".to_string());
        let port = var("APP_PORT")
            .or_else(|| var("PORT"))
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(5000);
        let cors_origins = var("CORS_ORIGINS")
            .unwrap_or_else(|| DEFAULT_CORS_ORIGINS.to_string())
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_string)
            .collect();

        Ok(Self {
            database_url,
            database_name,
            products_collection,
            host,
            port,
            cors_origins,
        })
    }

    pub fn backend(&self) -> anyhow::Result<StoreBackend> {
        StoreBackend::from_url(&self.database_url)
    }
}
