//! Sample data inserted at startup.

use crate::domain::model::Product;
use crate::storage::{EntityQuery, Repository};

pub const SAMPLE_PRODUCT_COUNT: i64 = 9;

/// Saves `Product 1`..`Product 9` (inventory = index) through `repository`.
///
/// Skipped when the table already holds rows, so a file-backed store is seeded once.
/// Returns the number of rows inserted.
pub async fn seed_sample_products<R>(repository: &R) -> anyhow::Result<u64>
where
    R: Repository<Product>,
{
    let existing = repository.get_all().count().await?;
    if existing > 0 {
        tracing::info!(existing, "catalog already populated, skipping sample data");
        return Ok(0);
    }

    for i in 1..=SAMPLE_PRODUCT_COUNT {
        repository
            .save(Product::new(format!("Product {}", i), i))
            .await?;
    }
    Ok(SAMPLE_PRODUCT_COUNT as u64)
}
