use serde::Serialize;
use utoipa::ToSchema;

use crate::models::Product;

/// One page of matching products plus the total across all pages.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductPage {
    pub total_count: u64,
    pub items: Vec<Product>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct NameList {
    pub items: Vec<String>,
}
