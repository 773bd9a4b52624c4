pub mod health;
pub mod products;

pub use health::health_check;
pub use products::get_products;
