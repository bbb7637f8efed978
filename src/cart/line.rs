//! Cart Lines

use rusty_money::{Money, iso::Currency};

use crate::{
    cart::Quantity,
    pricing::{PricingError, line_total},
    products::ProductId,
};

/// One distinct product in the cart with its aggregated quantity.
///
/// The name and unit price are copied when the line is created, so later catalog
/// changes never alter a cart in progress.
#[derive(Clone, Debug, PartialEq)]
pub struct CartLine<'a> {
    product_id: ProductId,
    name: String,
    unit_price: Money<'a, Currency>,
    quantity: Quantity,
}

impl<'a> CartLine<'a> {
    /// Creates a new line with a quantity of one.
    pub fn new(
        product_id: ProductId,
        name: impl Into<String>,
        unit_price: Money<'a, Currency>,
    ) -> Self {
        Self::with_quantity(product_id, name, unit_price, Quantity::ONE)
    }

    /// Creates a new line with the given quantity.
    pub fn with_quantity(
        product_id: ProductId,
        name: impl Into<String>,
        unit_price: Money<'a, Currency>,
        quantity: Quantity,
    ) -> Self {
        Self {
            product_id,
            name: name.into(),
            unit_price,
            quantity,
        }
    }

    /// Returns the product id of the line
    pub fn product_id(&self) -> ProductId {
        self.product_id
    }

    /// Returns the product name copied at add-time
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the unit price copied at add-time
    pub fn unit_price(&self) -> &Money<'a, Currency> {
        &self.unit_price
    }

    /// Returns the quantity
    pub fn quantity(&self) -> Quantity {
        self.quantity
    }

    /// Unit price times quantity.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::Overflow`] if the total does not fit in minor units.
    pub fn line_total(&self) -> Result<Money<'a, Currency>, PricingError> {
        line_total(self.unit_price, self.quantity)
    }

    pub(crate) fn set_quantity(&mut self, quantity: Quantity) {
        self.quantity = quantity;
    }
}
