use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};
use tokio::sync::RwLock;

use crate::error::{ProductError, ProductResult};
use crate::models::Product;

/// Repository trait for Product persistence
///
/// Implementations: [`InMemoryProductRepository`] for development and tests,
/// [`crate::postgres::PgProductRepository`] for PostgreSQL.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Persist a new product; the incoming `id` is ignored and a fresh one assigned
    async fn insert(&self, product: Product) -> ProductResult<Product>;

    /// Get a product by ID
    async fn find_by_id(&self, id: i64) -> ProductResult<Option<Product>>;

    /// Check whether a product exists
    async fn exists_by_id(&self, id: i64) -> ProductResult<bool>;

    /// Overwrite an existing product; `NotFound` if its id is unknown
    async fn save(&self, product: Product) -> ProductResult<Product>;

    /// Delete a product by ID; unknown ids are a no-op
    async fn delete_by_id(&self, id: i64) -> ProductResult<()>;
}

/// In-memory implementation of ProductRepository (for development/testing)
#[derive(Debug, Clone)]
pub struct InMemoryProductRepository {
    products: Arc<RwLock<BTreeMap<i64, Product>>>,
    next_id: Arc<AtomicI64>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self {
            products: Arc::new(RwLock::new(BTreeMap::new())),
            next_id: Arc::new(AtomicI64::new(1)),
        }
    }
}

impl Default for InMemoryProductRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn insert(&self, mut product: Product) -> ProductResult<Product> {
        product.id = self.next_id.fetch_add(1, Ordering::SeqCst);

        let mut products = self.products.write().await;
        products.insert(product.id, product.clone());

        tracing::debug!(product_id = product.id, "Inserted product");
        Ok(product)
    }

    async fn find_by_id(&self, id: i64) -> ProductResult<Option<Product>> {
        let products = self.products.read().await;
        Ok(products.get(&id).cloned())
    }

    async fn exists_by_id(&self, id: i64) -> ProductResult<bool> {
        let products = self.products.read().await;
        Ok(products.contains_key(&id))
    }

    async fn save(&self, product: Product) -> ProductResult<Product> {
        let mut products = self.products.write().await;

        let slot = products
            .get_mut(&product.id)
            .ok_or(ProductError::NotFound(product.id))?;
        *slot = product.clone();

        tracing::debug!(product_id = product.id, "Saved product");
        Ok(product)
    }

    async fn delete_by_id(&self, id: i64) -> ProductResult<()> {
        let mut products = self.products.write().await;

        if products.remove(&id).is_some() {
            tracing::debug!(product_id = id, "Deleted product");
        }
        Ok(())
    }
}
