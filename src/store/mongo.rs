//! MongoDB implementation of [`ProductStore`].

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures_util::TryStreamExt;
use mongodb::{
    Collection, Database,
    bson::{Bson, Document, doc},
};
use serde_json::Map;
use tracing::instrument;

use crate::{
    error::{StoreError, StoreResult},
    models::Product,
    store::{DistinctField, Predicate, ProductStore, QuerySpec, SortDirection, SortSpec},
};

pub struct MongoProductStore {
    collection: Collection<Document>,
}

impl MongoProductStore {
    pub fn new(db: Database, collection_name: &str) -> Self {
        let collection = db.collection::<Document>(collection_name);
        Self { collection }
    }

    /// Build a MongoDB filter document; an empty predicate list matches all.
    pub(crate) fn build_filter(predicates: &[Predicate]) -> Document {
        let mut filter = Document::new();

        for predicate in predicates {
            match predicate {
                Predicate::Equals { field, value } => {
                    filter.insert(field.document_key(), value.as_str());
                }
                Predicate::ContainsIgnoreCase { field, needle } => {
                    filter.insert(
                        field.document_key(),
                        doc! { "$regex": regex::escape(needle), "$options": "i" },
                    );
                }
                Predicate::Range { field, min, max } => {
                    let mut range = Document::new();
                    if let Some(min) = min {
                        range.insert("$gte", *min);
                    }
                    if let Some(max) = max {
                        range.insert("$lte", *max);
                    }
                    filter.insert(field.document_key(), range);
                }
            }
        }

        filter
    }

    pub(crate) fn build_sort(sort: &SortSpec) -> Document {
        let direction = match sort.direction {
            SortDirection::Asc => 1,
            SortDirection::Desc => -1,
        };
        let mut order = Document::new();
        order.insert(sort.field.document_key(), direction);
        order.insert("_id", 1);
        order
    }
}

#[async_trait]
impl ProductStore for MongoProductStore {
    #[instrument(skip(self))]
    async fn count(&self, predicates: &[Predicate]) -> StoreResult<u64> {
        let count = self
            .collection
            .count_documents(Self::build_filter(predicates))
            .await?;
        Ok(count)
    }

    #[instrument(skip(self))]
    async fn find(&self, query: &QuerySpec) -> StoreResult<Vec<Product>> {
        let mut find = self
            .collection
            .find(Self::build_filter(&query.predicates))
            .skip(query.window.skip)
            .limit(query.window.limit as i64);
        if let Some(sort) = &query.sort {
            find = find.sort(Self::build_sort(sort));
        }

        let documents: Vec<Document> = find.await?.try_collect().await?;
        Ok(products_from_documents(documents))
    }

    #[instrument(skip(self))]
    async fn distinct(&self, field: DistinctField) -> StoreResult<Vec<String>> {
        let values = self
            .collection
            .distinct(field.field().document_key(), doc! {})
            .await?;

        Ok(values
            .into_iter()
            .filter_map(|value| match value {
                Bson::String(value) => Some(value),
                _ => None,
            })
            .collect())
    }
}

fn take_string(document: &mut Document, key: &str) -> String {
    match document.remove(key) {
        Some(Bson::String(value)) => value,
        Some(Bson::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

fn take_price(document: &mut Document) -> StoreResult<f64> {
    match document.remove("price") {
        Some(Bson::Double(value)) => Ok(value),
        Some(Bson::Int32(value)) => Ok(f64::from(value)),
        Some(Bson::Int64(value)) => Ok(value as f64),
        Some(Bson::String(value)) => value
            .trim()
            .parse()
            .map_err(|_| StoreError::Decode(format!("price {value:?} is not a number"))),
        Some(other) => Err(StoreError::Decode(format!("unexpected price value {other}"))),
        None => Err(StoreError::Decode("missing price".to_string())),
    }
}

fn take_created_at(document: &mut Document) -> Option<DateTime<Utc>> {
    match document.remove("createdAt")? {
        Bson::DateTime(value) => DateTime::from_timestamp_millis(value.timestamp_millis()),
        Bson::String(value) => DateTime::parse_from_rfc3339(&value)
            .ok()
            .map(|value| value.with_timezone(&Utc)),
        _ => None,
    }
}

/// Decode a page of documents. A document that is not a product is logged
/// and left out; it does not fail the page.
fn products_from_documents(documents: Vec<Document>) -> Vec<Product> {
    documents
        .into_iter()
        .filter_map(|document| {
            let id = document.get("_id").map(ToString::to_string);
            match product_from_document(document) {
                Ok(product) => Some(product),
                Err(err) => {
                    tracing::warn!(?id, error = %err, "skipping undecodable product document");
                    None
                }
            }
        })
        .collect()
}

pub(crate) fn product_from_document(mut document: Document) -> StoreResult<Product> {
    let id = match document.remove("_id") {
        Some(Bson::ObjectId(oid)) => oid.to_hex(),
        Some(Bson::String(id)) => id,
        Some(other) => other.to_string(),
        None => return Err(StoreError::Decode("missing _id".to_string())),
    };
    let product_name = take_string(&mut document, "productName");
    let brand_name = take_string(&mut document, "brandName");
    let category_name = take_string(&mut document, "categoryName");
    let price = take_price(&mut document)?;
    let created_at = take_created_at(&mut document);

    let extra: Map<_, _> = document
        .into_iter()
        .map(|(key, value)| (key, value.into_relaxed_extjson()))
        .collect();

    Ok(Product {
        id,
        product_name,
        brand_name,
        category_name,
        price,
        created_at,
        extra,
    })
}
