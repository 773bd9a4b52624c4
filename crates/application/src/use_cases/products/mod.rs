mod get_products;

pub use get_products::{CacheStatus, GetProductsUseCase, ProductPage};
