//! Discount and tax arithmetic.

/// The single adjustment a discount-or-tax request resolves to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Adjustment {
    Discount(f64),
    Tax(f64),
    None,
}

impl Adjustment {
    /// A positive discount wins; otherwise a positive tax; otherwise nothing.
    pub fn select(discount_percentage: f64, tax_rate: f64) -> Self {
        if discount_percentage > 0.0 {
            Adjustment::Discount(discount_percentage)
        } else if tax_rate > 0.0 {
            Adjustment::Tax(tax_rate)
        } else {
            Adjustment::None
        }
    }

    pub fn apply(self, price: f64) -> f64 {
        match self {
            Adjustment::Discount(pct) => discounted_price(price, pct),
            Adjustment::Tax(rate) => taxed_price(price, rate),
            Adjustment::None => price,
        }
    }
}

/// `price * (1 - pct/100)`, never below zero.
pub fn discounted_price(price: f64, discount_percentage: f64) -> f64 {
    (price * (1.0 - discount_percentage / 100.0)).max(0.0)
}

/// `price * (1 + rate/100)`. May overflow to infinity for extreme inputs;
/// callers check the result with `f64::is_finite`.
pub fn taxed_price(price: f64, tax_rate: f64) -> f64 {
    price * (1.0 + tax_rate / 100.0)
}
