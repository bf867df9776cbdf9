use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::entity::prelude::*;

use crate::models::Product;

/// Sea-ORM Entity for the `products` table
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_type = "Text")]
    pub name: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub price: f64,
    pub quantity_available: i32,
    pub discount_percentage: Option<f64>,
    pub tax_rate: Option<f64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Product {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            description: model.description,
            price: model.price,
            quantity_available: model.quantity_available,
            discount_percentage: model.discount_percentage,
            tax_rate: model.tax_rate,
        }
    }
}

/// Every column set; used to overwrite an existing row.
impl From<Product> for ActiveModel {
    fn from(product: Product) -> Self {
        ActiveModel {
            id: Set(product.id),
            name: Set(product.name),
            description: Set(product.description),
            price: Set(product.price),
            quantity_available: Set(product.quantity_available),
            discount_percentage: Set(product.discount_percentage),
            tax_rate: Set(product.tax_rate),
        }
    }
}

impl ActiveModel {
    /// Like the `From<Product>` conversion but leaves `id` to the sequence.
    pub fn for_insert(product: Product) -> Self {
        ActiveModel {
            id: NotSet,
            ..ActiveModel::from(product)
        }
    }
}
