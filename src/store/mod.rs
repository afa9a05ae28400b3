//! Data access for the product collection.
//!
//! Queries reach a backend as a [`QuerySpec`]: a conjunction of field
//! predicates, an optional sort and a page window. Each backend translates
//! that into its own query language.

use async_trait::async_trait;

use crate::{error::StoreResult, models::Product};

pub mod memory;
pub mod mongo;
pub mod postgres;

pub use memory::InMemoryProductStore;
pub use mongo::MongoProductStore;
pub use postgres::PgProductStore;

/// Product attributes that queries can reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductField {
    ProductName,
    BrandName,
    CategoryName,
    Price,
    CreatedAt,
}

impl ProductField {
    /// Key of the field inside a stored product document.
    pub fn document_key(&self) -> &'static str {
        match self {
            ProductField::ProductName => "productName",
            ProductField::BrandName => "brandName",
            ProductField::CategoryName => "categoryName",
            ProductField::Price => "price",
            ProductField::CreatedAt => "createdAt",
        }
    }
}

/// Fields whose distinct values can be listed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DistinctField {
    BrandName,
    CategoryName,
}

impl DistinctField {
    pub fn field(&self) -> ProductField {
        match self {
            DistinctField::BrandName => ProductField::BrandName,
            DistinctField::CategoryName => ProductField::CategoryName,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    Equals { field: ProductField, value: String },
    /// Literal substring match, ignoring case.
    ContainsIgnoreCase { field: ProductField, needle: String },
    /// Inclusive bounds; at least one side is set.
    Range {
        field: ProductField,
        min: Option<f64>,
        max: Option<f64>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub field: ProductField,
    pub direction: SortDirection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub skip: u64,
    pub limit: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct QuerySpec {
    pub predicates: Vec<Predicate>,
    pub sort: Option<SortSpec>,
    pub window: PageWindow,
}

/// Read-only access to the product collection.
///
/// When `find` is given a sort, implementations break ties on the product id
/// so that consecutive pages never overlap.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Number of products matching every predicate.
    async fn count(&self, predicates: &[Predicate]) -> StoreResult<u64>;

    /// One page of matching products.
    async fn find(&self, query: &QuerySpec) -> StoreResult<Vec<Product>>;

    /// Distinct string values of `field` across the whole collection.
    async fn distinct(&self, field: DistinctField) -> StoreResult<Vec<String>>;
}
