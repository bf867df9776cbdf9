//! Product Service - Business logic layer

use std::sync::Arc;
use tracing::instrument;

use crate::error::{ProductError, ProductResult};
use crate::models::{Product, ProductInput};
use crate::pricing::Adjustment;
use crate::repository::ProductRepository;

/// Product service providing business logic operations
///
/// Every write goes through [`ProductInput::reset_defaults`]. Failures other
/// than `NotFound` come back as `ServiceFailure` prefixed with the operation,
/// e.g. `"Failed to create product: <cause>"`.
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> ProductService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Create a new product; `InvalidInput` when no input is given
    #[instrument(skip(self, input))]
    pub async fn create(&self, input: Option<ProductInput>) -> ProductResult<Product> {
        let input = input.ok_or_else(|| {
            ProductError::InvalidInput("Product input cannot be null or empty".to_string())
        })?;

        let product = self
            .repository
            .insert(Product::new(input))
            .await
            .map_err(|e| e.with_context("Failed to create product"))?;

        tracing::info!(product_id = product.id, "Created product");
        Ok(product)
    }

    #[instrument(skip(self))]
    pub async fn get_by_id(&self, id: i64) -> ProductResult<Product> {
        self.find_existing(id, "Failed to fetch product").await
    }

    /// Overwrite name, description, price and quantity of an existing product
    #[instrument(skip(self, input))]
    pub async fn update(&self, id: i64, input: ProductInput) -> ProductResult<Product> {
        const CONTEXT: &str = "Failed to update product";

        let mut product = self.find_existing(id, CONTEXT).await?;
        product.overwrite(input);

        let saved = self
            .repository
            .save(product)
            .await
            .map_err(|e| e.with_context(CONTEXT))?;

        tracing::info!(product_id = id, "Updated product");
        Ok(saved)
    }

    /// Returns `false` when there was nothing to delete
    #[instrument(skip(self))]
    pub async fn delete_by_id(&self, id: i64) -> ProductResult<bool> {
        const CONTEXT: &str = "Failed to delete product";

        let exists = self
            .repository
            .exists_by_id(id)
            .await
            .map_err(|e| e.with_context(CONTEXT))?;

        if !exists {
            tracing::debug!(product_id = id, "Nothing to delete");
            return Ok(false);
        }

        self.repository
            .delete_by_id(id)
            .await
            .map_err(|e| e.with_context(CONTEXT))?;

        tracing::info!(product_id = id, "Deleted product");
        Ok(true)
    }

    /// Overwrite like [`update`](Self::update), then apply a positive discount,
    /// or failing that a positive tax rate, to the new price.
    ///
    /// A result that overflows `f64` is a `ServiceFailure` and nothing is saved.
    #[instrument(skip(self, input))]
    pub async fn apply_discount_or_tax(
        &self,
        id: i64,
        input: ProductInput,
    ) -> ProductResult<Product> {
        const CONTEXT: &str = "Failed to update product";

        let input = input.reset_defaults();
        let adjustment = Adjustment::select(
            input.discount_percentage.unwrap_or_default(),
            input.tax_rate.unwrap_or_default(),
        );

        let mut product = self.find_existing(id, CONTEXT).await?;
        product.overwrite(input);

        let price = adjustment.apply(product.price);
        if !price.is_finite() {
            return Err(ProductError::failure(
                CONTEXT,
                format!("adjusted price of {adjustment:?} on {} is out of range", product.price),
            ));
        }
        product.price = price;

        match adjustment {
            Adjustment::Discount(pct) => product.discount_percentage = Some(pct),
            Adjustment::Tax(rate) => product.tax_rate = Some(rate),
            Adjustment::None => {}
        }

        let saved = self
            .repository
            .save(product)
            .await
            .map_err(|e| e.with_context(CONTEXT))?;

        tracing::info!(product_id = id, adjustment = ?adjustment, price = saved.price, "Applied pricing adjustment");
        Ok(saved)
    }

    async fn find_existing(&self, id: i64, context: &str) -> ProductResult<Product> {
        self.repository
            .find_by_id(id)
            .await
            .map_err(|e| e.with_context(context))?
            .ok_or(ProductError::NotFound(id))
    }
}

impl<R: ProductRepository> Clone for ProductService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockProductRepository;
    use mockall::predicate::*;

    fn stored(id: i64, price: f64) -> Product {
        Product {
            id,
            name: "Widget".to_string(),
            description: "A small widget".to_string(),
            price,
            quantity_available: 4,
            discount_percentage: None,
            tax_rate: None,
        }
    }

    fn input(price: f64) -> ProductInput {
        ProductInput {
            name: Some("Widget".into()),
            description: Some("A small widget".into()),
            price: Some(price),
            quantity_available: Some(4),
            ..Default::default()
        }
    }

    fn with_existing(id: i64) -> MockProductRepository {
        let mut repo = MockProductRepository::new();
        repo.expect_find_by_id()
            .with(eq(id))
            .returning(move |id| Ok(Some(stored(id, 1.0))));
        repo.expect_save().returning(|p| Ok(p));
        repo
    }

    #[tokio::test]
    async fn test_create_without_input_is_invalid() {
        let service = ProductService::new(MockProductRepository::new());

        let result = service.create(None).await;
        assert!(matches!(result, Err(ProductError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_create_normalizes_before_insert() {
        let mut repo = MockProductRepository::new();
        repo.expect_insert()
            .withf(|p| p.name == " " && p.price == 0.0 && p.quantity_available == 0)
            .returning(|mut p| {
                p.id = 1;
                Ok(p)
            });

        let service = ProductService::new(repo);
        let created = service.create(Some(ProductInput::default())).await.unwrap();
        assert_eq!(created.id, 1);
        assert_eq!(created.description, " ");
    }

    #[tokio::test]
    async fn test_create_wraps_store_failure() {
        let mut repo = MockProductRepository::new();
        repo.expect_insert()
            .returning(|_| Err(ProductError::failure("Database error", "disk full")));

        let service = ProductService::new(repo);
        let err = service.create(Some(input(5.0))).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Failed to create product: Database error: disk full"
        );
    }

    #[tokio::test]
    async fn test_get_by_id_missing_is_not_found() {
        let mut repo = MockProductRepository::new();
        repo.expect_find_by_id().with(eq(9)).returning(|_| Ok(None));

        let service = ProductService::new(repo);
        let err = service.get_by_id(9).await.unwrap_err();
        assert!(matches!(err, ProductError::NotFound(9)));
        assert_eq!(err.to_string(), "Product not found with ID: 9");
    }

    #[tokio::test]
    async fn test_get_by_id_store_failure_is_wrapped() {
        let mut repo = MockProductRepository::new();
        repo.expect_find_by_id()
            .returning(|_| Err(ProductError::ServiceFailure("timeout".into())));

        let service = ProductService::new(repo);
        let err = service.get_by_id(1).await.unwrap_err();
        assert_eq!(err.to_string(), "Failed to fetch product: timeout");
    }

    #[tokio::test]
    async fn test_update_overwrites_fields_but_keeps_adjustments() {
        let mut repo = MockProductRepository::new();
        repo.expect_find_by_id().with(eq(2)).returning(|id| {
            let mut product = stored(id, 50.0);
            product.tax_rate = Some(5.0);
            Ok(Some(product))
        });
        repo.expect_save()
            .withf(|p| p.id == 2 && p.name == "Gadget" && p.tax_rate == Some(5.0))
            .returning(|p| Ok(p));

        let service = ProductService::new(repo);
        let updated = service
            .update(
                2,
                ProductInput {
                    name: Some("Gadget".into()),
                    discount_percentage: Some(30.0),
                    ..input(60.0)
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.price, 60.0);
        assert_eq!(updated.discount_percentage, None);
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let mut repo = MockProductRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(None));
        repo.expect_save().never();

        let service = ProductService::new(repo);
        let result = service.update(3, input(1.0)).await;
        assert!(matches!(result, Err(ProductError::NotFound(3))));
    }

    #[tokio::test]
    async fn test_delete_missing_returns_false() {
        let mut repo = MockProductRepository::new();
        repo.expect_exists_by_id().with(eq(4)).returning(|_| Ok(false));
        repo.expect_delete_by_id().never();

        let service = ProductService::new(repo);
        assert!(!service.delete_by_id(4).await.unwrap());
    }

    #[tokio::test]
    async fn test_delete_existing_returns_true() {
        let mut repo = MockProductRepository::new();
        repo.expect_exists_by_id().returning(|_| Ok(true));
        repo.expect_delete_by_id().with(eq(4)).times(1).returning(|_| Ok(()));

        let service = ProductService::new(repo);
        assert!(service.delete_by_id(4).await.unwrap());
    }

    #[tokio::test]
    async fn test_discount_applies_to_new_price() {
        let service = ProductService::new(with_existing(1));

        let product = service
            .apply_discount_or_tax(
                1,
                ProductInput {
                    discount_percentage: Some(10.0),
                    ..input(100.0)
                },
            )
            .await
            .unwrap();

        assert!((product.price - 90.0).abs() < 1e-9);
        assert_eq!(product.discount_percentage, Some(10.0));
        assert_eq!(product.tax_rate, None);
    }

    #[tokio::test]
    async fn test_tax_applies_without_discount() {
        let service = ProductService::new(with_existing(1));

        let product = service
            .apply_discount_or_tax(
                1,
                ProductInput {
                    tax_rate: Some(10.0),
                    ..input(100.0)
                },
            )
            .await
            .unwrap();

        assert!((product.price - 110.0).abs() < 1e-9);
        assert_eq!(product.tax_rate, Some(10.0));
        assert_eq!(product.discount_percentage, None);
    }

    #[tokio::test]
    async fn test_discount_wins_over_tax() {
        let service = ProductService::new(with_existing(1));

        let product = service
            .apply_discount_or_tax(
                1,
                ProductInput {
                    discount_percentage: Some(10.0),
                    tax_rate: Some(10.0),
                    ..input(100.0)
                },
            )
            .await
            .unwrap();

        assert!((product.price - 90.0).abs() < 1e-9);
        assert_eq!(product.tax_rate, None);
    }

    #[tokio::test]
    async fn test_no_adjustment_keeps_overwritten_price() {
        let service = ProductService::new(with_existing(1));

        let product = service.apply_discount_or_tax(1, input(75.0)).await.unwrap();
        assert_eq!(product.price, 75.0);
        assert_eq!(product.discount_percentage, None);
        assert_eq!(product.tax_rate, None);
    }

    #[tokio::test]
    async fn test_large_discount_never_goes_negative() {
        let service = ProductService::new(with_existing(1));

        let product = service
            .apply_discount_or_tax(
                1,
                ProductInput {
                    discount_percentage: Some(250.0),
                    ..input(40.0)
                },
            )
            .await
            .unwrap();
        assert_eq!(product.price, 0.0);
    }

    #[tokio::test]
    async fn test_overflowing_tax_is_rejected_without_saving() {
        let mut repo = MockProductRepository::new();
        repo.expect_find_by_id()
            .returning(|id| Ok(Some(stored(id, 1.0))));
        repo.expect_save().never();

        let service = ProductService::new(repo);
        let err = service
            .apply_discount_or_tax(
                1,
                ProductInput {
                    tax_rate: Some(1e300),
                    ..input(1e300)
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, ProductError::ServiceFailure(_)));
        assert!(err.to_string().starts_with("Failed to update product: adjusted price"));
    }

    #[tokio::test]
    async fn test_apply_on_missing_is_not_found() {
        let mut repo = MockProductRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(None));

        let service = ProductService::new(repo);
        let result = service.apply_discount_or_tax(8, input(1.0)).await;
        assert!(matches!(result, Err(ProductError::NotFound(8))));
    }
}
