use std::collections::HashMap;
use std::sync::Arc;

use uuid::Uuid;

use crate::core::error::Result;
use crate::features::catalog::services::CatalogStore;
use crate::features::categories::models::Category;
use crate::features::products::models::ProductWithCategory;
use crate::shared::constants::MAX_PRODUCTS_PER_CATEGORY;

/// A category paired with its newest products (never empty, at most the cap)
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryGroup {
    pub category: Category,
    pub products: Vec<ProductWithCategory>,
}

/// Per-category buckets that stop accepting products once full
#[derive(Debug)]
pub struct GroupAccumulator {
    cap: usize,
    buckets: HashMap<Uuid, Vec<ProductWithCategory>>,
}

impl GroupAccumulator {
    pub fn new(cap: usize) -> Self {
        Self {
            cap,
            buckets: HashMap::new(),
        }
    }

    /// Append to the product's category bucket. Returns false when the bucket is full.
    pub fn offer(&mut self, product: ProductWithCategory) -> bool {
        let bucket = self
            .buckets
            .entry(product.product.category_id)
            .or_default();

        if bucket.len() >= self.cap {
            return false;
        }
        bucket.push(product);
        true
    }

    /// Remove and return the bucket for a category (empty if nothing was accepted)
    pub fn take(&mut self, category_id: Uuid) -> Vec<ProductWithCategory> {
        self.buckets.remove(&category_id).unwrap_or_default()
    }
}

pub struct CatalogAggregator {
    store: Arc<dyn CatalogStore>,
    cap: usize,
}

impl CatalogAggregator {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self::with_cap(store, MAX_PRODUCTS_PER_CATEGORY)
    }

    pub fn with_cap(store: Arc<dyn CatalogStore>, cap: usize) -> Self {
        Self { store, cap }
    }

    /// Group the catalog, failing if either read fails.
    ///
    /// Both reads run concurrently; there is no partial result.
    pub async fn try_aggregate(&self) -> Result<Vec<CategoryGroup>> {
        let (categories, products) = futures::try_join!(
            self.store.list_active_categories(),
            self.store.list_active_products()
        )?;

        let mut accumulator = GroupAccumulator::new(self.cap);
        for product in products {
            accumulator.offer(product);
        }

        let groups = categories
            .into_iter()
            .filter_map(|category| {
                let products = accumulator.take(category.id);
                (!products.is_empty()).then_some(CategoryGroup { category, products })
            })
            .collect();

        Ok(groups)
    }

    /// Group the catalog; a failed read is logged and yields an empty list.
    pub async fn aggregate(&self) -> Vec<CategoryGroup> {
        match self.try_aggregate().await {
            Ok(groups) => groups,
            Err(e) => {
                tracing::error!("Catalog aggregation failed: {}", e);
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::{category_fixture, product_fixture, FakeCatalogStore};

    fn aggregator(store: FakeCatalogStore) -> CatalogAggregator {
        CatalogAggregator::new(Arc::new(store))
    }

    #[test]
    fn test_accumulator_rejects_past_cap() {
        let category = category_fixture("Shoes", true);
        let mut acc = GroupAccumulator::new(2);

        assert!(acc.offer(product_fixture(&category, 1)));
        assert!(acc.offer(product_fixture(&category, 2)));
        assert!(!acc.offer(product_fixture(&category, 3)));

        assert_eq!(acc.take(category.id).len(), 2);
        assert!(acc.take(category.id).is_empty());
    }

    #[tokio::test]
    async fn test_caps_group_at_four_newest_and_drops_empty_categories() {
        let a = category_fixture("A", true);
        let b = category_fixture("B", true);
        // minutes ago: 1 is the newest
        let products: Vec<_> = (1..=5).map(|m| product_fixture(&a, m)).collect();
        let expected: Vec<Uuid> = products.iter().take(4).map(|p| p.product.id).collect();

        let store = FakeCatalogStore::new(vec![a.clone(), b], products);
        let groups = aggregator(store).aggregate().await;

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].category.id, a.id);
        let ids: Vec<Uuid> = groups[0].products.iter().map(|p| p.product.id).collect();
        assert_eq!(ids, expected);
    }

    #[tokio::test]
    async fn test_inactive_category_excluded_with_its_products() {
        let active = category_fixture("Bags", true);
        let inactive = category_fixture("Archive", false);
        let store = FakeCatalogStore::new(
            vec![active.clone(), inactive.clone()],
            vec![product_fixture(&inactive, 1), product_fixture(&active, 2)],
        );

        let groups = aggregator(store).aggregate().await;

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].category.id, active.id);
        assert!(groups
            .iter()
            .flat_map(|g| &g.products)
            .all(|p| p.product.category_id != inactive.id));
    }

    #[tokio::test]
    async fn test_inactive_product_excluded() {
        let category = category_fixture("Hats", true);
        let mut hidden = product_fixture(&category, 1);
        hidden.product.is_active = false;
        let visible = product_fixture(&category, 2);
        let visible_id = visible.product.id;

        let store = FakeCatalogStore::new(vec![category], vec![hidden, visible]);
        let groups = aggregator(store).aggregate().await;

        assert_eq!(groups[0].products.len(), 1);
        assert_eq!(groups[0].products[0].product.id, visible_id);
    }

    #[tokio::test]
    async fn test_groups_follow_category_name_order_and_fetch_order() {
        let zed = category_fixture("Zed", true);
        let alpha = category_fixture("Alpha", true);
        let store = FakeCatalogStore::new(
            vec![zed.clone(), alpha.clone()],
            vec![
                product_fixture(&zed, 4),
                product_fixture(&alpha, 3),
                product_fixture(&zed, 2),
                product_fixture(&alpha, 1),
            ],
        );

        let groups = aggregator(store).aggregate().await;

        let names: Vec<&str> = groups.iter().map(|g| g.category.name.as_str()).collect();
        assert_eq!(names, ["Alpha", "Zed"]);
        for group in &groups {
            assert!(group
                .products
                .windows(2)
                .all(|w| w[0].product.created_at >= w[1].product.created_at));
        }
    }

    #[tokio::test]
    async fn test_equal_timestamps_cut_by_id() {
        let category = category_fixture("Socks", true);
        let created_at = chrono::Utc::now();
        let products: Vec<_> = (0..6)
            .map(|_| {
                let mut p = product_fixture(&category, 0);
                p.product.created_at = created_at;
                p
            })
            .collect();
        let mut expected: Vec<Uuid> = products.iter().map(|p| p.product.id).collect();
        expected.sort();
        expected.truncate(MAX_PRODUCTS_PER_CATEGORY);

        let aggregator = aggregator(FakeCatalogStore::new(vec![category], products));
        for _ in 0..3 {
            let groups = aggregator.aggregate().await;
            let ids: Vec<Uuid> = groups[0].products.iter().map(|p| p.product.id).collect();
            assert_eq!(ids, expected);
        }
    }

    #[tokio::test]
    async fn test_bounds_hold_across_many_categories() {
        let categories: Vec<_> = (0..6)
            .map(|i| category_fixture(&format!("Category {}", i), i % 3 != 0))
            .collect();
        let products: Vec<_> = (0..60)
            .map(|m| product_fixture(&categories[m as usize % 6], m))
            .collect();

        let groups = aggregator(FakeCatalogStore::new(categories, products))
            .aggregate()
            .await;

        assert_eq!(groups.len(), 4);
        for group in &groups {
            assert!(group.category.is_active);
            assert!(!group.products.is_empty());
            assert!(group.products.len() <= MAX_PRODUCTS_PER_CATEGORY);
        }
    }

    #[tokio::test]
    async fn test_empty_store_yields_empty_result() {
        let groups = aggregator(FakeCatalogStore::default()).aggregate().await;
        assert!(groups.is_empty());
    }

    #[tokio::test]
    async fn test_failed_fetch_yields_empty_result() {
        let category = category_fixture("Shoes", true);
        let mut store = FakeCatalogStore::new(
            vec![category.clone()],
            vec![product_fixture(&category, 1)],
        );
        store.fail_products = true;
        let aggregator = aggregator(store);

        assert!(aggregator.aggregate().await.is_empty());
        tokio_test::assert_err!(aggregator.try_aggregate().await);
    }

    #[tokio::test]
    async fn test_try_aggregate_on_empty_store_is_ok() {
        let aggregator = aggregator(FakeCatalogStore::default());
        let groups = tokio_test::assert_ok!(aggregator.try_aggregate().await);
        assert!(groups.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_both_fetches_issued_concurrently() {
        let delay = std::time::Duration::from_millis(50);
        let store = Arc::new(FakeCatalogStore::default().with_delay(delay));
        let aggregator = CatalogAggregator::new(store.clone());

        let started = tokio::time::Instant::now();
        aggregator.aggregate().await;

        assert_eq!(store.calls(), 2);
        assert!(started.elapsed() < delay * 2);
    }
}
