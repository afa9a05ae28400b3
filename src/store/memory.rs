use std::cmp::Ordering;

use async_trait::async_trait;

use crate::{
    error::StoreResult,
    models::Product,
    store::{
        DistinctField, Predicate, ProductField, ProductStore, QuerySpec, SortDirection, SortSpec,
    },
};

/// Product store over an in-process list, kept in insertion order.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProductStore {
    products: Vec<Product>,
}

impl InMemoryProductStore {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    fn matching<'a>(&'a self, predicates: &'a [Predicate]) -> impl Iterator<Item = &'a Product> {
        self.products
            .iter()
            .filter(move |product| predicates.iter().all(|p| matches(p, product)))
    }
}

fn text_field(product: &Product, field: ProductField) -> Option<&str> {
    match field {
        ProductField::ProductName => Some(&product.product_name),
        ProductField::BrandName => Some(&product.brand_name),
        ProductField::CategoryName => Some(&product.category_name),
        ProductField::Price | ProductField::CreatedAt => None,
    }
}

fn matches(predicate: &Predicate, product: &Product) -> bool {
    match predicate {
        Predicate::Equals { field, value } => text_field(product, *field) == Some(value.as_str()),
        Predicate::ContainsIgnoreCase { field, needle } => text_field(product, *field)
            .is_some_and(|text| text.to_lowercase().contains(&needle.to_lowercase())),
        Predicate::Range { field, min, max } => {
            let value = match field {
                ProductField::Price => product.price,
                _ => return false,
            };
            min.is_none_or(|min| value >= min) && max.is_none_or(|max| value <= max)
        }
    }
}

fn compare(a: &Product, b: &Product, sort: &SortSpec) -> Ordering {
    let ordering = match sort.field {
        ProductField::Price => a.price.total_cmp(&b.price),
        ProductField::CreatedAt => a.created_at.cmp(&b.created_at),
        field => text_field(a, field).cmp(&text_field(b, field)),
    };
    let ordering = match sort.direction {
        SortDirection::Asc => ordering,
        SortDirection::Desc => ordering.reverse(),
    };
    ordering.then_with(|| a.id.cmp(&b.id))
}

#[async_trait]
impl ProductStore for InMemoryProductStore {
    async fn count(&self, predicates: &[Predicate]) -> StoreResult<u64> {
        Ok(self.matching(predicates).count() as u64)
    }

    async fn find(&self, query: &QuerySpec) -> StoreResult<Vec<Product>> {
        let mut items: Vec<&Product> = self.matching(&query.predicates).collect();
        if let Some(sort) = &query.sort {
            items.sort_by(|a, b| compare(a, b, sort));
        }

        Ok(items
            .into_iter()
            .skip(query.window.skip as usize)
            .take(query.window.limit as usize)
            .cloned()
            .collect())
    }

    async fn distinct(&self, field: DistinctField) -> StoreResult<Vec<String>> {
        let mut values: Vec<String> = Vec::new();
        for product in &self.products {
            let Some(value) = text_field(product, field.field()) else {
                continue;
            };
            if !values.iter().any(|seen| seen == value) {
                values.push(value.to_string());
            }
        }
        Ok(values)
    }
}
