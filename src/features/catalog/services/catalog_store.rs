use std::sync::Arc;

use async_trait::async_trait;

use crate::core::error::Result;
use crate::features::categories::models::Category;
use crate::features::categories::CategoryService;
use crate::features::products::models::ProductWithCategory;
use crate::features::products::ProductService;

/// Read side of the catalog used by the aggregator.
///
/// Implementations must return:
/// - categories: active only, name ascending
/// - products: active only, joined to an *active* category, newest first
#[async_trait]
pub trait CatalogStore: Send + Sync {
    async fn list_active_categories(&self) -> Result<Vec<Category>>;
    async fn list_active_products(&self) -> Result<Vec<ProductWithCategory>>;
}

/// Postgres-backed store delegating to the category and product services
pub struct PgCatalogStore {
    categories: Arc<CategoryService>,
    products: Arc<ProductService>,
}

impl PgCatalogStore {
    pub fn new(categories: Arc<CategoryService>, products: Arc<ProductService>) -> Self {
        Self {
            categories,
            products,
        }
    }
}

#[async_trait]
impl CatalogStore for PgCatalogStore {
    async fn list_active_categories(&self) -> Result<Vec<Category>> {
        self.categories.list_active().await
    }

    async fn list_active_products(&self) -> Result<Vec<ProductWithCategory>> {
        self.products.list_active_with_category().await
    }
}
