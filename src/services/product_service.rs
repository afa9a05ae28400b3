use std::{collections::HashSet, sync::Arc};

use tracing::instrument;

use crate::{
    dto::products::ProductPage,
    error::AppResult,
    routes::params::{ProductQuery, ProductSort},
    store::{
        DistinctField, PageWindow, Predicate, ProductField, ProductStore, QuerySpec,
        SortDirection, SortSpec,
    },
};

/// Products returned per page.
pub const PAGE_SIZE: u64 = 9;

/// Largest offset every backend accepts (Postgres OFFSET and Mongo skip are i64).
const MAX_SKIP: u64 = i64::MAX as u64;

/// Answers catalogue queries against an injected [`ProductStore`].
#[derive(Clone)]
pub struct ProductQueryService {
    store: Arc<dyn ProductStore>,
}

impl ProductQueryService {
    pub fn new(store: Arc<dyn ProductStore>) -> Self {
        Self { store }
    }

    #[instrument(skip(self))]
    pub async fn list_products(&self, query: ProductQuery) -> AppResult<ProductPage> {
        let spec = build_query_spec(&query);

        // Count and page use the same predicates but are not isolated from writes.
        let total_count = self.store.count(&spec.predicates).await?;
        let items = self.store.find(&spec).await?;

        tracing::debug!(total_count, returned = items.len(), "products queried");
        Ok(ProductPage { total_count, items })
    }

    #[instrument(skip(self))]
    pub async fn list_distinct_values(&self, field: DistinctField) -> AppResult<Vec<String>> {
        let values = self.store.distinct(field).await?;

        let mut seen = HashSet::with_capacity(values.len());
        Ok(values
            .into_iter()
            .filter(|value| seen.insert(value.clone()))
            .collect())
    }
}

/// Translate a parsed request into a store query. Fields absent from the
/// request contribute no predicate.
pub fn build_query_spec(query: &ProductQuery) -> QuerySpec {
    let mut predicates = Vec::new();

    if let Some(search) = &query.search {
        predicates.push(Predicate::ContainsIgnoreCase {
            field: ProductField::ProductName,
            needle: search.clone(),
        });
    }
    if let Some(brand) = &query.brand {
        predicates.push(Predicate::Equals {
            field: ProductField::BrandName,
            value: brand.clone(),
        });
    }
    if let Some(category) = &query.category {
        predicates.push(Predicate::Equals {
            field: ProductField::CategoryName,
            value: category.clone(),
        });
    }
    if query.min_price.is_some() || query.max_price.is_some() {
        predicates.push(Predicate::Range {
            field: ProductField::Price,
            min: query.min_price,
            max: query.max_price,
        });
    }

    let sort = query.sort.map(|sort| match sort {
        ProductSort::PriceAsc => SortSpec {
            field: ProductField::Price,
            direction: SortDirection::Asc,
        },
        ProductSort::PriceDesc => SortSpec {
            field: ProductField::Price,
            direction: SortDirection::Desc,
        },
        ProductSort::DateAdded => SortSpec {
            field: ProductField::CreatedAt,
            direction: SortDirection::Desc,
        },
    });

    let window = PageWindow {
        skip: query
            .page
            .max(1)
            .saturating_sub(1)
            .saturating_mul(PAGE_SIZE)
            .min(MAX_SKIP),
        limit: PAGE_SIZE,
    };

    QuerySpec {
        predicates,
        sort,
        window,
    }
}
