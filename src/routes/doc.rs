use utoipa::{OpenApi, openapi::OpenApi as OpenApiSpec};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::products::{NameList, ProductPage},
    models::Product,
    response::{ApiResponse, ErrorResponse},
    routes::{health, params, products},
};

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        products::list_products,
        products::distinct_brand_names,
        products::distinct_category_names
    ),
    components(
        schemas(
            Product,
            ProductPage,
            NameList,
            params::ProductsQueryRequest,
            params::ProductFilterRequest,
            ErrorResponse,
            ApiResponse<ProductPage>,
            ApiResponse<NameList>
        )
    ),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Products", description = "Catalogue query endpoints"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
