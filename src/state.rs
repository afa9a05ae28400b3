use std::sync::Arc;

use crate::{services::product_service::ProductQueryService, store::ProductStore};

#[derive(Clone)]
pub struct AppState {
    pub products: ProductQueryService,
}

impl AppState {
    pub fn new(store: Arc<dyn ProductStore>) -> Self {
        Self {
            products: ProductQueryService::new(store),
        }
    }
}
