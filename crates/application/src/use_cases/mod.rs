pub mod products;

pub use products::{CacheStatus, GetProductsUseCase, ProductPage};
