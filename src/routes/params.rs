use serde::Deserialize;
use serde_json::Value;
use utoipa::ToSchema;

/// Body of `POST /products-query` exactly as the storefront sends it.
///
/// Every field is optional and loosely typed; [`ProductQuery`] is the parsed
/// form the service works with.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct ProductsQueryRequest {
    #[schema(value_type = Option<i64>, example = 1)]
    pub active_page: Value,
    #[schema(value_type = Option<String>, example = "air")]
    pub search_product: Value,
    /// One of `priceAsc`, `priceDesc` or `dateAdded`.
    #[schema(value_type = Option<String>, example = "priceAsc")]
    pub sorted_by: Value,
    #[schema(value_type = Option<ProductFilterRequest>)]
    pub filter: Value,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct ProductFilterRequest {
    #[schema(value_type = Option<String>, example = "Nike")]
    pub brand: Value,
    #[schema(value_type = Option<String>, example = "Shoes")]
    pub category: Value,
    #[schema(value_type = Option<String>, example = "50")]
    pub min_price: Value,
    #[schema(value_type = Option<String>, example = "100")]
    pub max_price: Value,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductSort {
    PriceAsc,
    PriceDesc,
    /// Newest first.
    DateAdded,
}

impl ProductSort {
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "priceAsc" => Some(ProductSort::PriceAsc),
            "priceDesc" => Some(ProductSort::PriceDesc),
            "dateAdded" => Some(ProductSort::DateAdded),
            _ => None,
        }
    }
}

/// A products request after coercion: absent fields are `None`, never
/// empty strings or zeroes.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductQuery {
    /// 1-based, never below 1.
    pub page: u64,
    pub search: Option<String>,
    pub sort: Option<ProductSort>,
    pub brand: Option<String>,
    pub category: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
}

impl Default for ProductQuery {
    fn default() -> Self {
        Self {
            page: 1,
            search: None,
            sort: None,
            brand: None,
            category: None,
            min_price: None,
            max_price: None,
        }
    }
}

impl From<ProductsQueryRequest> for ProductQuery {
    fn from(request: ProductsQueryRequest) -> Self {
        let filter: ProductFilterRequest = match request.filter {
            Value::Object(_) => serde_json::from_value(request.filter).unwrap_or_default(),
            _ => ProductFilterRequest::default(),
        };

        Self {
            page: page_number(&request.active_page),
            search: non_empty_text(&request.search_product),
            sort: request.sorted_by.as_str().and_then(ProductSort::from_token),
            brand: non_empty_text(&filter.brand),
            category: non_empty_text(&filter.category),
            min_price: price_bound(&filter.min_price),
            max_price: price_bound(&filter.max_price),
        }
    }
}

fn number(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) if !s.trim().is_empty() => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    number.filter(|n| n.is_finite())
}

fn page_number(value: &Value) -> u64 {
    match number(value) {
        Some(page) if page >= 1.0 => page.trunc() as u64,
        _ => 1,
    }
}

fn non_empty_text(value: &Value) -> Option<String> {
    value
        .as_str()
        .filter(|text| !text.is_empty())
        .map(str::to_string)
}

/// Only truthy bounds count: a JSON `0` is absent, the string `"0"` is not.
fn price_bound(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        _ => number(value),
    }
}
