//! PostgreSQL implementation of [`ProductStore`] on top of SeaORM.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Select,
};
use serde_json::Map;
use tracing::instrument;

use crate::{
    entity::products::{Column, Entity as Products, Model as ProductModel},
    error::StoreResult,
    models::Product,
    store::{DistinctField, Predicate, ProductField, ProductStore, QuerySpec, SortDirection},
};

#[derive(Clone)]
pub struct PgProductStore {
    orm: DatabaseConnection,
}

impl PgProductStore {
    pub fn new(orm: DatabaseConnection) -> Self {
        Self { orm }
    }

    pub(crate) fn build_condition(predicates: &[Predicate]) -> Condition {
        let mut condition = Condition::all();

        for predicate in predicates {
            match predicate {
                Predicate::Equals { field, value } => {
                    condition = condition.add(column(*field).eq(value.clone()));
                }
                Predicate::ContainsIgnoreCase { field, needle } => {
                    let pattern = format!("%{}%", escape_like(needle));
                    condition = condition.add(Expr::col(column(*field)).ilike(pattern));
                }
                Predicate::Range { field, min, max } => {
                    if let Some(min) = min {
                        condition = condition.add(column(*field).gte(*min));
                    }
                    if let Some(max) = max {
                        condition = condition.add(column(*field).lte(*max));
                    }
                }
            }
        }

        condition
    }

    /// `Products::find()` narrowed by the predicates; no WHERE clause when there are none.
    fn filtered(predicates: &[Predicate]) -> Select<Products> {
        let finder = Products::find();
        if predicates.is_empty() {
            finder
        } else {
            finder.filter(Self::build_condition(predicates))
        }
    }

    pub(crate) fn build_select(query: &QuerySpec) -> Select<Products> {
        let mut finder = Self::filtered(&query.predicates);
        if let Some(sort) = &query.sort {
            let sort_col = column(sort.field);
            finder = match sort.direction {
                SortDirection::Asc => finder.order_by_asc(sort_col),
                SortDirection::Desc => finder.order_by_desc(sort_col),
            };
            finder = finder.order_by_asc(Column::Id);
        }

        finder
            .offset(query.window.skip)
            .limit(query.window.limit)
    }
}

fn column(field: ProductField) -> Column {
    match field {
        ProductField::ProductName => Column::ProductName,
        ProductField::BrandName => Column::BrandName,
        ProductField::CategoryName => Column::CategoryName,
        ProductField::Price => Column::Price,
        ProductField::CreatedAt => Column::CreatedAt,
    }
}

/// Escape LIKE wildcards so the search text matches literally.
fn escape_like(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[async_trait]
impl ProductStore for PgProductStore {
    #[instrument(skip(self))]
    async fn count(&self, predicates: &[Predicate]) -> StoreResult<u64> {
        let total = Self::filtered(predicates).count(&self.orm).await?;
        Ok(total)
    }

    #[instrument(skip(self))]
    async fn find(&self, query: &QuerySpec) -> StoreResult<Vec<Product>> {
        let items = Self::build_select(query)
            .all(&self.orm)
            .await?
            .into_iter()
            .map(product_from_entity)
            .collect();
        Ok(items)
    }

    #[instrument(skip(self))]
    async fn distinct(&self, field: DistinctField) -> StoreResult<Vec<String>> {
        let col = column(field.field());
        let values = Products::find()
            .select_only()
            .column(col)
            .distinct()
            .order_by_asc(col)
            .into_tuple::<String>()
            .all(&self.orm)
            .await?;
        Ok(values)
    }
}

fn product_from_entity(model: ProductModel) -> Product {
    Product {
        id: model.id.to_string(),
        product_name: model.product_name,
        brand_name: model.brand_name,
        category_name: model.category_name,
        price: model.price,
        created_at: Some(model.created_at.with_timezone(&Utc)),
        extra: Map::new(),
    }
}
