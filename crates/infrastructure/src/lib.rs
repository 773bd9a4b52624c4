pub mod cache;
pub mod database;
pub mod repositories;

pub use cache::{InMemoryCacheStore, RedisCacheStore};
pub use repositories::SqliteProductRepository;
