#[cfg(test)]
use crate::features::auth::model::AuthenticatedUser;

#[cfg(test)]
use axum::{extract::Request, middleware::Next, response::Response, Router};

#[cfg(test)]
pub use catalog::{category_fixture, product_fixture, FakeCatalogStore};

#[cfg(test)]
pub const TEST_ADMIN_SUB: &str = "test-admin-sub";

#[cfg(test)]
pub fn create_admin_user() -> AuthenticatedUser {
    AuthenticatedUser {
        sub: TEST_ADMIN_SUB.to_string(),
        email: Some("admin@shop.test".to_string()),
        roles: vec!["admin".to_string()],
    }
}

#[cfg(test)]
async fn inject_admin_middleware(mut request: Request, next: Next) -> Response {
    request.extensions_mut().insert(create_admin_user());
    next.run(request).await
}

/// Wrap a router so every request carries an authenticated admin
#[cfg(test)]
pub fn with_admin_auth(router: Router) -> Router {
    router.layer(axum::middleware::from_fn(inject_admin_middleware))
}

#[cfg(test)]
pub const OPTIMIZER_IMAGE_URL: &str =
    "https://media.shop.test/storefront-media/public/images/p/a b.jpg";

/// Optimizer allowing widths 320/640/1280 for images in `storefront-media/public`
#[cfg(test)]
pub fn optimizer_fixture() -> crate::features::images::ImageOptimizer {
    use crate::core::config::ImageConfig;
    use crate::modules::storage::StorageUrls;

    crate::features::images::ImageOptimizer::new(
        ImageConfig {
            optimizer_url: "https://img.shop.test".to_string(),
            allowed_widths: vec![320, 640, 1280],
            default_quality: 75,
        },
        StorageUrls::new(
            "http://minio:9000",
            "https://media.shop.test",
            "storefront-media",
            "public",
        ),
    )
}

#[cfg(test)]
mod catalog {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use async_trait::async_trait;
    use chrono::Utc;
    use fake::faker::lorem::en::{Sentence, Word};
    use fake::{Fake, Faker};
    use rust_decimal::Decimal;
    use uuid::Uuid;

    use crate::core::error::{AppError, Result};
    use crate::features::catalog::CatalogStore;
    use crate::features::categories::models::Category;
    use crate::features::products::models::{Product, ProductWithCategory};
    use crate::shared::validation::slugify;

    pub fn category_fixture(name: &str, is_active: bool) -> Category {
        let now = Utc::now();
        Category {
            id: Faker.fake::<Uuid>(),
            name: name.to_string(),
            slug: slugify(name),
            description: Some(Sentence(3..8).fake()),
            image_url: None,
            banner_url: None,
            is_active,
            created_at: now,
            updated_at: now,
        }
    }

    /// Active product in `category`, created `minutes_ago` minutes in the past
    pub fn product_fixture(category: &Category, minutes_ago: i64) -> ProductWithCategory {
        let created_at = Utc::now() - chrono::Duration::minutes(minutes_ago);
        let word: String = Word().fake();
        ProductWithCategory {
            product: Product {
                id: Faker.fake::<Uuid>(),
                name: format!("{} {}", word, minutes_ago),
                description: Some(Sentence(4..10).fake()),
                price: Decimal::new((1_000..500_000i64).fake::<i64>(), 2),
                sale_price: None,
                images: vec![format!("https://cdn.shop.test/{}.jpg", word)],
                stock: (0..50).fake::<i32>(),
                sku: format!("SKU-{}", Uuid::new_v4().simple()),
                category_id: category.id,
                is_active: true,
                created_at,
                updated_at: created_at,
            },
            category_name: category.name.clone(),
            category_slug: category.slug.clone(),
        }
    }

    /// In-memory store mirroring the filtering and ordering of the Postgres one
    #[derive(Default)]
    pub struct FakeCatalogStore {
        pub categories: Vec<Category>,
        pub products: Vec<ProductWithCategory>,
        pub fail_categories: bool,
        pub fail_products: bool,
        delay: Option<Duration>,
        calls: AtomicUsize,
    }

    impl FakeCatalogStore {
        pub fn new(categories: Vec<Category>, products: Vec<ProductWithCategory>) -> Self {
            Self {
                categories,
                products,
                ..Default::default()
            }
        }

        pub fn with_delay(mut self, delay: Duration) -> Self {
            self.delay = Some(delay);
            self
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        async fn enter(&self) {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
        }

        fn category_is_active(&self, id: Uuid) -> bool {
            self.categories.iter().any(|c| c.id == id && c.is_active)
        }
    }

    #[async_trait]
    impl CatalogStore for FakeCatalogStore {
        async fn list_active_categories(&self) -> Result<Vec<Category>> {
            self.enter().await;
            if self.fail_categories {
                return Err(AppError::Internal("category store unavailable".into()));
            }

            let mut categories: Vec<Category> = self
                .categories
                .iter()
                .filter(|c| c.is_active)
                .cloned()
                .collect();
            categories.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
            Ok(categories)
        }

        async fn list_active_products(&self) -> Result<Vec<ProductWithCategory>> {
            self.enter().await;
            if self.fail_products {
                return Err(AppError::Internal("product store unavailable".into()));
            }

            let mut products: Vec<ProductWithCategory> = self
                .products
                .iter()
                .filter(|p| p.product.is_active && self.category_is_active(p.product.category_id))
                .cloned()
                .collect();
            products.sort_by(|a, b| {
                b.product
                    .created_at
                    .cmp(&a.product.created_at)
                    .then(a.product.id.cmp(&b.product.id))
            });
            Ok(products)
        }
    }
}
