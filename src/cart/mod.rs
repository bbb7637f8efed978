//! Cart

use rusty_money::{Money, iso::Currency};
use thiserror::Error;
use tracing::debug;

use crate::{
    pricing::{self, PricingError},
    products::{Product, ProductId},
};

pub use self::{line::CartLine, quantity::Quantity};

mod line;
mod quantity;

/// Errors related to cart mutations.
///
/// Every failing operation leaves the cart exactly as it was.
#[derive(Debug, Error, PartialEq)]
pub enum CartError {
    /// The quantity was zero, negative, too large or not a whole number.
    #[error("invalid quantity: {0:?}")]
    InvalidQuantity(String),

    /// The referenced line does not exist.
    #[error("line {index} is out of range for a cart with {len} lines")]
    IndexOutOfRange {
        /// Requested line index
        index: usize,
        /// Number of lines in the cart
        len: usize,
    },

    /// The product is priced in a different currency to the cart (product currency, cart currency).
    #[error("product {0} has currency {1}, but cart has currency {2}")]
    CurrencyMismatch(ProductId, &'static str, &'static str),

    /// Adding another unit would overflow the line quantity.
    #[error("quantity for product {0} cannot be increased any further")]
    QuantityOverflow(ProductId),
}

/// Cart
///
/// Lines are kept in insertion order with at most one line per product id.
#[derive(Debug, Clone, PartialEq)]
pub struct Cart<'a> {
    lines: Vec<CartLine<'a>>,
    currency: &'static Currency,
}

impl<'a> Cart<'a> {
    /// Create a new empty cart.
    pub fn new(currency: &'static Currency) -> Self {
        Cart {
            lines: Vec::new(),
            currency,
        }
    }

    /// Add one unit of a product.
    ///
    /// Increments the quantity of the existing line for `product_id`, or appends a new line
    /// with a quantity of one. The name and price are only read for new lines.
    ///
    /// # Errors
    ///
    /// - [`CartError::CurrencyMismatch`]: the product is priced in another currency.
    /// - [`CartError::QuantityOverflow`]: the existing line is already at the maximum quantity.
    pub fn add_item(
        &mut self,
        product_id: ProductId,
        name: impl Into<String>,
        unit_price: Money<'a, Currency>,
    ) -> Result<(), CartError> {
        let price_currency = unit_price.currency();

        if price_currency != self.currency {
            return Err(CartError::CurrencyMismatch(
                product_id,
                price_currency.iso_alpha_code,
                self.currency.iso_alpha_code,
            ));
        }

        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|line| line.product_id() == product_id)
        {
            let quantity = line
                .quantity()
                .checked_increment()
                .ok_or(CartError::QuantityOverflow(product_id))?;

            line.set_quantity(quantity);

            debug!(%product_id, %quantity, "incremented cart line");
        } else {
            self.lines.push(CartLine::new(product_id, name, unit_price));

            debug!(%product_id, lines = self.lines.len(), "appended cart line");
        }

        Ok(())
    }

    /// Add one unit of a catalog product, copying its name and price.
    ///
    /// # Errors
    ///
    /// See [`Cart::add_item`].
    pub fn add_product(&mut self, product: &Product<'a>) -> Result<(), CartError> {
        self.add_item(product.id, product.name.clone(), product.price)
    }

    /// Replace the quantity of the line at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::IndexOutOfRange`] if there is no line at `index`.
    pub fn set_quantity(&mut self, index: usize, quantity: Quantity) -> Result<(), CartError> {
        let len = self.lines.len();

        let line = self
            .lines
            .get_mut(index)
            .ok_or(CartError::IndexOutOfRange { index, len })?;

        line.set_quantity(quantity);

        debug!(index, %quantity, "set cart line quantity");

        Ok(())
    }

    /// Replace the quantity of the line at `index` from raw cashier input.
    ///
    /// The input is validated before the index is looked up.
    ///
    /// # Errors
    ///
    /// - [`CartError::InvalidQuantity`]: `input` is not a positive whole number.
    /// - [`CartError::IndexOutOfRange`]: there is no line at `index`.
    pub fn set_quantity_input(&mut self, index: usize, input: &str) -> Result<(), CartError> {
        let quantity = input.parse::<Quantity>()?;

        self.set_quantity(index, quantity)
    }

    /// Remove and return the line at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::IndexOutOfRange`] if there is no line at `index`.
    pub fn remove_line(&mut self, index: usize) -> Result<CartLine<'a>, CartError> {
        if index >= self.lines.len() {
            return Err(CartError::IndexOutOfRange {
                index,
                len: self.lines.len(),
            });
        }

        let line = self.lines.remove(index);

        debug!(index, product_id = %line.product_id(), "removed cart line");

        Ok(line)
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.lines.clear();

        debug!("cleared cart");
    }

    /// Take all lines out of the cart, leaving it empty.
    pub(crate) fn take_lines(&mut self) -> Vec<CartLine<'a>> {
        std::mem::take(&mut self.lines)
    }

    /// Calculate the subtotal of the cart.
    ///
    /// # Errors
    ///
    /// Returns a [`PricingError`] if a line total overflows.
    pub fn subtotal(&self) -> Result<Money<'a, Currency>, PricingError> {
        pricing::subtotal(&self.lines, self.currency)
    }

    /// Get a line from the cart.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::IndexOutOfRange`] if there is no line at `index`.
    pub fn get_line(&self, index: usize) -> Result<&CartLine<'a>, CartError> {
        self.lines.get(index).ok_or(CartError::IndexOutOfRange {
            index,
            len: self.lines.len(),
        })
    }

    /// Lines in insertion order.
    pub fn lines(&self) -> &[CartLine<'a>] {
        &self.lines
    }

    /// Iterate over the lines in the cart.
    pub fn iter(&self) -> impl Iterator<Item = &CartLine<'a>> {
        self.lines.iter()
    }

    /// Get the number of lines in the cart.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Get the currency of the cart.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }
}
