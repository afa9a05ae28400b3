use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    routing::{get, post},
};

use crate::{
    dto::products::{NameList, ProductPage},
    error::{AppError, AppResult},
    response::{ApiResponse, ErrorResponse},
    routes::params::{ProductQuery, ProductsQueryRequest},
    state::AppState,
    store::DistinctField,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/products-query", post(list_products))
        .route("/distinct-brand-names", get(distinct_brand_names))
        .route("/distinct-category-names", get(distinct_category_names))
}

/// Paths the storefront used before the endpoints were renamed; mounted under `/api`.
pub fn legacy_router() -> Router<AppState> {
    Router::new()
        .route("/products", post(list_products))
        .route("/all-brand", get(distinct_brand_names))
        .route("/all-category", get(distinct_category_names))
}

#[utoipa::path(
    post,
    path = "/products-query",
    request_body = ProductsQueryRequest,
    responses(
        (status = 200, description = "One page of matching products", body = ApiResponse<ProductPage>),
        (status = 413, description = "Payload Too Large", body = ErrorResponse),
        (status = 500, description = "Internal Server Error", body = ErrorResponse),
    ),
    tag = "Products"
)]
pub async fn list_products(
    State(state): State<AppState>,
    payload: Result<Json<ProductsQueryRequest>, JsonRejection>,
) -> AppResult<Json<ApiResponse<ProductPage>>> {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE => {
            tracing::debug!(error = %rejection, "products query body over the limit");
            return Err(AppError::PayloadTooLarge);
        }
        Err(rejection) => {
            tracing::debug!(error = %rejection, "unreadable products query, using defaults");
            ProductsQueryRequest::default()
        }
    };

    let page = state.products.list_products(ProductQuery::from(request)).await?;
    Ok(Json(ApiResponse::success("All products found.", page)))
}

#[utoipa::path(
    get,
    path = "/distinct-brand-names",
    responses(
        (status = 200, description = "Every brand in the catalogue", body = ApiResponse<NameList>),
        (status = 500, description = "Internal Server Error", body = ErrorResponse),
    ),
    tag = "Products"
)]
pub async fn distinct_brand_names(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<NameList>>> {
    let items = state
        .products
        .list_distinct_values(DistinctField::BrandName)
        .await?;
    Ok(Json(ApiResponse::success(
        "All brand names found.",
        NameList { items },
    )))
}

#[utoipa::path(
    get,
    path = "/distinct-category-names",
    responses(
        (status = 200, description = "Every category in the catalogue", body = ApiResponse<NameList>),
        (status = 500, description = "Internal Server Error", body = ErrorResponse),
    ),
    tag = "Products"
)]
pub async fn distinct_category_names(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<NameList>>> {
    let items = state
        .products
        .list_distinct_values(DistinctField::CategoryName)
        .await?;
    Ok(Json(ApiResponse::success(
        "All category names found.",
        NameList { items },
    )))
}
