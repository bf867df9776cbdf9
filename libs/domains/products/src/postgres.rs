use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait};

use crate::{
    entity,
    error::{ProductError, ProductResult},
    models::Product,
    repository::ProductRepository,
};

fn db_failure(err: DbErr) -> ProductError {
    ProductError::failure("Database error", err)
}

/// PostgreSQL implementation of ProductRepository
#[derive(Clone)]
pub struct PgProductRepository {
    db: DatabaseConnection,
}

impl PgProductRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn insert(&self, product: Product) -> ProductResult<Product> {
        let model = entity::ActiveModel::for_insert(product)
            .insert(&self.db)
            .await
            .map_err(db_failure)?;

        tracing::debug!(product_id = model.id, "Inserted product");
        Ok(model.into())
    }

    async fn find_by_id(&self, id: i64) -> ProductResult<Option<Product>> {
        let model = entity::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_failure)?;

        Ok(model.map(Product::from))
    }

    async fn exists_by_id(&self, id: i64) -> ProductResult<bool> {
        Ok(self.find_by_id(id).await?.is_some())
    }

    async fn save(&self, product: Product) -> ProductResult<Product> {
        let id = product.id;
        let active_model: entity::ActiveModel = product.into();

        let model = active_model.update(&self.db).await.map_err(|e| match e {
            DbErr::RecordNotUpdated => ProductError::NotFound(id),
            other => db_failure(other),
        })?;

        tracing::debug!(product_id = id, "Saved product");
        Ok(model.into())
    }

    async fn delete_by_id(&self, id: i64) -> ProductResult<()> {
        let result = entity::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_failure)?;

        tracing::debug!(product_id = id, rows_affected = result.rows_affected, "Deleted product");
        Ok(())
    }
}
