use async_trait::async_trait;
use cacheside_application::ports::ProductSource;
use cacheside_domain::{DomainError, ProductSummary};
use sqlx::SqlitePool;
use tracing::{error, instrument};

type ProductRow = (i64, String, Option<String>, i64, f64, i64);

/// Per-product order count, average rating and stock, ordered by id.
/// Joins fan out across order items and reviews, so `total_orders` counts
/// joined rows rather than distinct orders.
const PRODUCT_PAGE_QUERY: &str = "
    SELECT
        p.id,
        p.name,
        c.name AS category,
        COUNT(oi.id) AS total_orders,
        CAST(COALESCE(AVG(r.rating), 0) AS REAL) AS avg_rating,
        COALESCE(i.stock, 0) AS stock
    FROM products p
    LEFT JOIN categories c ON p.category_id = c.id
    LEFT JOIN order_items oi ON oi.product_id = p.id
    LEFT JOIN reviews r ON r.product_id = p.id
    LEFT JOIN inventory i ON i.product_id = p.id
    GROUP BY p.id, c.name, i.stock
    ORDER BY p.id
    LIMIT ? OFFSET ?";

pub struct SqliteProductRepository {
    pool: SqlitePool,
}

impl SqliteProductRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn row_to_product(row: ProductRow) -> ProductSummary {
        let (id, name, category, total_orders, avg_rating, stock) = row;

        ProductSummary {
            id,
            name,
            category,
            total_orders,
            avg_rating,
            stock,
        }
    }
}

#[async_trait]
impl ProductSource for SqliteProductRepository {
    #[instrument(skip(self))]
    async fn fetch_page(&self, limit: u32, offset: u64) -> Result<Vec<ProductSummary>, DomainError> {
        let offset = i64::try_from(offset)
            .map_err(|_| DomainError::InvalidQuery(format!("offset {} out of range", offset)))?;

        let rows = sqlx::query_as::<_, ProductRow>(PRODUCT_PAGE_QUERY)
            .bind(i64::from(limit))
            .bind(offset)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to query product page");
                DomainError::SourceUnavailable(e.to_string())
            })?;

        Ok(rows.into_iter().map(Self::row_to_product).collect())
    }
}
