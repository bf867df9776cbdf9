use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

/// Placeholder stored for absent or blank text fields.
pub const BLANK_TEXT: &str = " ";

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// A persisted product.
///
/// `discount_percentage` and `tax_rate` hold the last adjustment applied and
/// are never serialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    /// Assigned by the store on insert
    pub id: i64,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub quantity_available: i32,
    #[serde(default, skip_serializing)]
    pub discount_percentage: Option<f64>,
    #[serde(default, skip_serializing)]
    pub tax_rate: Option<f64>,
}

/// Request body for create, update and discount-or-tax.
///
/// Every field is optional on the wire. The validation rules only run for
/// create and only check presence; negative numbers pass and are zeroed by
/// [`ProductInput::reset_defaults`] like on every other route.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct ProductInput {
    #[validate(
        required(message = "Product name is required"),
        custom(function = "not_blank", message = "Product name is required")
    )]
    pub name: Option<String>,

    #[validate(
        required(message = "Product description is required"),
        custom(function = "not_blank", message = "Product description is required")
    )]
    pub description: Option<String>,

    #[validate(required(message = "Product price is required"))]
    pub price: Option<f64>,

    #[validate(required(message = "Quantity available is required"))]
    pub quantity_available: Option<i32>,

    pub discount_percentage: Option<f64>,

    pub tax_rate: Option<f64>,
}

fn text_or_blank(value: Option<String>) -> String {
    match value {
        Some(text) if !text.trim().is_empty() => text,
        _ => BLANK_TEXT.to_string(),
    }
}

fn positive_or_zero(value: Option<f64>) -> f64 {
    value.filter(|v| *v > 0.0).unwrap_or(0.0)
}

impl ProductInput {
    /// Replaces absent or blank text with `" "` and absent or non-positive
    /// numbers with 0. Non-blank text is kept as sent.
    pub fn reset_defaults(self) -> Self {
        Self {
            name: Some(text_or_blank(self.name)),
            description: Some(text_or_blank(self.description)),
            price: Some(positive_or_zero(self.price)),
            quantity_available: Some(self.quantity_available.filter(|q| *q > 0).unwrap_or(0)),
            discount_percentage: Some(positive_or_zero(self.discount_percentage)),
            tax_rate: Some(positive_or_zero(self.tax_rate)),
        }
    }
}

impl Product {
    /// Builds an unsaved product; the store assigns the real id on insert.
    pub fn new(input: ProductInput) -> Self {
        let mut product = Self {
            id: 0,
            name: BLANK_TEXT.to_string(),
            description: BLANK_TEXT.to_string(),
            price: 0.0,
            quantity_available: 0,
            discount_percentage: None,
            tax_rate: None,
        };
        product.overwrite(input);
        product
    }

    /// Overwrites name, description, price and quantity from a normalized
    /// copy of `input`. The stored discount and tax are left untouched.
    pub fn overwrite(&mut self, input: ProductInput) {
        let input = input.reset_defaults();
        self.name = text_or_blank(input.name);
        self.description = text_or_blank(input.description);
        self.price = input.price.unwrap_or_default();
        self.quantity_available = input.quantity_available.unwrap_or_default();
    }
}
