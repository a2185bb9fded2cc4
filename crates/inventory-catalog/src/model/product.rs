use crate::loader::RecordError;
use rust_decimal::Decimal;
use serde::Serialize;

/// A validated entry of the product catalog.
///
/// A `ProductRecord` can only be built through [`ProductRecord::new`], which rejects an empty
/// name and a negative price. Quantity is unsigned, so it cannot be negative to begin with.
/// Records are immutable once built: the catalog is replaced on refresh, never edited.
///
/// Serialises as `{"name": string, "price": number, "quantity": integer}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductRecord {
    name: String,
    #[serde(with = "rust_decimal::serde::float")]
    price: Decimal,
    quantity: u32,
}

impl ProductRecord {
    /// Creates a new ProductRecord.
    ///
    /// # Arguments
    /// * `name` - Display name, must contain a non-whitespace character
    /// * `price` - Unit price, zero or more; its scale is kept as given
    /// * `quantity` - Units in stock
    pub fn new(name: impl Into<String>, price: Decimal, quantity: u32) -> Result<Self, RecordError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(RecordError::EmptyName);
        }
        if price.is_sign_negative() && !price.is_zero() {
            return Err(RecordError::NegativePrice(price));
        }
        Ok(Self {
            name,
            price,
            quantity,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> Decimal {
        self.price
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }
}
