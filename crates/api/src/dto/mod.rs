pub mod health;
pub mod products;

pub use health::{HealthConfig, HealthResponse};
pub use products::{ErrorResponse, ProductsQuery, ProductsResponse};
