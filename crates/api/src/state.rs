use cacheside_application::use_cases::GetProductsUseCase;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub get_products: Arc<GetProductsUseCase>,
}

impl AppState {
    pub fn new(get_products: Arc<GetProductsUseCase>) -> Self {
        Self { get_products }
    }
}
