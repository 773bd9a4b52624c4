mod cache_store;
mod product_source;

pub use cache_store::CacheStore;
pub use product_source::ProductSource;
