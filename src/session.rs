//! Register Sessions
//!
//! A session is created when a cashier logs in and owns the cart until the register shuts down.
//! Checkout snapshots the cart into a [`Receipt`] and starts the next sale with an empty cart.

use std::fmt;

use decimal_percentage::Percentage;
use jiff::Zoned;
use rusty_money::{Money, iso::Currency};
use thiserror::Error;
use tracing::info;

use crate::{
    cart::{Cart, CartError, Quantity},
    catalog::Catalog,
    pricing::{PricingError, Totals},
    products::ProductId,
    receipt::Receipt,
    store::Store,
};

/// Errors related to register sessions.
#[derive(Debug, Error, PartialEq)]
pub enum SessionError {
    /// Checkout was attempted with no lines in the cart.
    #[error("cart is empty")]
    EmptyCart,

    /// The cashier name was empty after trimming.
    #[error("cashier name must not be empty")]
    EmptyCashierName,

    /// The product id is not in the catalog.
    #[error("product not found: {0}")]
    ProductNotFound(ProductId),

    /// Wrapped cart error.
    #[error(transparent)]
    Cart(#[from] CartError),

    /// Wrapped pricing error.
    #[error(transparent)]
    Pricing(#[from] PricingError),
}

/// Name of the logged-in cashier, trimmed and never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CashierName(String);

impl CashierName {
    /// Validate a cashier name.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::EmptyCashierName`] if `name` is blank.
    pub fn new(name: &str) -> Result<Self, SessionError> {
        let trimmed = name.trim();

        if trimmed.is_empty() {
            return Err(SessionError::EmptyCashierName);
        }

        Ok(Self(trimmed.to_string()))
    }

    /// The name as entered, without surrounding whitespace.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CashierName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A logged-in cashier and their cart.
#[derive(Debug, Clone)]
pub struct Session<'a> {
    cashier: CashierName,
    cart: Cart<'a>,
}

impl<'a> Session<'a> {
    /// Log in with a free-text cashier name and start with an empty cart.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::EmptyCashierName`] if `name` is blank.
    pub fn login(name: &str, currency: &'static Currency) -> Result<Self, SessionError> {
        let cashier = CashierName::new(name)?;

        info!(cashier = %cashier, "cashier logged in");

        Ok(Self {
            cashier,
            cart: Cart::new(currency),
        })
    }

    /// Logged-in cashier
    pub fn cashier(&self) -> &CashierName {
        &self.cashier
    }

    /// Current cart
    pub fn cart(&self) -> &Cart<'a> {
        &self.cart
    }

    /// Add one unit of a product, trusting the caller's name and price.
    ///
    /// # Errors
    ///
    /// See [`Cart::add_item`].
    pub fn add_item(
        &mut self,
        product_id: ProductId,
        name: impl Into<String>,
        unit_price: Money<'a, Currency>,
    ) -> Result<(), SessionError> {
        Ok(self.cart.add_item(product_id, name, unit_price)?)
    }

    /// Look up `product_id` in `catalog` and add one unit of it.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::ProductNotFound`] if the id is not in the catalog, or a wrapped
    /// [`CartError`] if the cart rejects the product.
    pub fn add_from_catalog(
        &mut self,
        catalog: &Catalog<'a>,
        product_id: ProductId,
    ) -> Result<(), SessionError> {
        let product = catalog
            .lookup(product_id)
            .ok_or(SessionError::ProductNotFound(product_id))?;

        Ok(self.cart.add_product(product)?)
    }

    /// Replace the quantity of a line.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::IndexOutOfRange`] if there is no line at `index`.
    pub fn set_quantity(&mut self, index: usize, quantity: Quantity) -> Result<(), SessionError> {
        Ok(self.cart.set_quantity(index, quantity)?)
    }

    /// Replace the quantity of a line from raw cashier input.
    ///
    /// # Errors
    ///
    /// See [`Cart::set_quantity_input`].
    pub fn set_quantity_input(&mut self, index: usize, input: &str) -> Result<(), SessionError> {
        Ok(self.cart.set_quantity_input(index, input)?)
    }

    /// Remove a line.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::IndexOutOfRange`] if there is no line at `index`.
    pub fn remove_line(&mut self, index: usize) -> Result<(), SessionError> {
        self.cart.remove_line(index)?;

        Ok(())
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.cart.clear();
    }

    /// Totals for the current cart.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Pricing`] if an amount overflows.
    pub fn totals(&self, vat_rate: Percentage) -> Result<Totals<'a>, SessionError> {
        Ok(Totals::from_subtotal(self.cart.subtotal()?, vat_rate)?)
    }

    /// Check out at the current local time.
    ///
    /// # Errors
    ///
    /// See [`Session::checkout_at`].
    pub fn checkout(&mut self, store: &Store<'_>) -> Result<Receipt<'a>, SessionError> {
        self.checkout_at(store, Zoned::now())
    }

    /// Snapshot the cart into a receipt issued at `issued_at` and empty the cart.
    ///
    /// Nothing changes unless a receipt is produced.
    ///
    /// # Errors
    ///
    /// - [`SessionError::EmptyCart`]: the cart has no lines.
    /// - [`SessionError::Pricing`]: an amount overflows.
    pub fn checkout_at(
        &mut self,
        store: &Store<'_>,
        issued_at: Zoned,
    ) -> Result<Receipt<'a>, SessionError> {
        if self.cart.is_empty() {
            return Err(SessionError::EmptyCart);
        }

        let totals = self.totals(store.vat_rate())?;
        let lines = self.cart.take_lines();

        info!(
            cashier = %self.cashier,
            lines = lines.len(),
            total = %totals.total(),
            "checked out"
        );

        Ok(Receipt::new(
            store.details().clone(),
            self.cashier.clone(),
            issued_at,
            lines,
            totals,
        ))
    }
}

#[cfg(test)]
mod tests {
    use jiff::{Timestamp, tz::TimeZone};
    use rusty_money::iso::{USD, ZAR};
    use testresult::TestResult;

    use crate::fixtures::Fixture;

    use super::*;

    fn issued_at() -> Result<Zoned, jiff::Error> {
        Ok("2026-10-14T13:04:05.123Z"
            .parse::<Timestamp>()?
            .to_zoned(TimeZone::UTC))
    }

    #[test]
    fn login_trims_name() -> TestResult {
        let session = Session::login("  Thandi  ", ZAR)?;

        assert_eq!(session.cashier().as_str(), "Thandi");
        assert!(session.cart().is_empty());

        Ok(())
    }

    #[test]
    fn login_rejects_blank_names() {
        for name in ["", "   ", "\t\n"] {
            assert!(
                matches!(Session::login(name, ZAR), Err(SessionError::EmptyCashierName)),
                "{name:?} should be rejected"
            );
        }
    }

    #[test]
    fn add_from_catalog_copies_catalog_details() -> TestResult {
        let store = Fixture::bundled_store()?;
        let mut session = Session::login("Thandi", store.currency())?;

        session.add_from_catalog(store.catalog(), ProductId::new(1))?;
        session.add_from_catalog(store.catalog(), ProductId::new(1))?;

        let line = session.cart().get_line(0)?;

        assert_eq!(line.name(), "Marie Biscuits");
        assert_eq!(line.quantity().get(), 2);

        Ok(())
    }

    #[test]
    fn add_from_catalog_rejects_unknown_products() -> TestResult {
        let store = Fixture::bundled_store()?;
        let mut session = Session::login("Thandi", store.currency())?;

        assert_eq!(
            session.add_from_catalog(store.catalog(), ProductId::new(999)),
            Err(SessionError::ProductNotFound(ProductId::new(999)))
        );
        assert!(session.cart().is_empty());

        Ok(())
    }

    #[test]
    fn add_item_rejects_foreign_currency() -> TestResult {
        let mut session = Session::login("Thandi", ZAR)?;

        let result = session.add_item(ProductId::new(1), "Tea", Money::from_minor(100, USD));

        assert!(matches!(
            result,
            Err(SessionError::Cart(CartError::CurrencyMismatch(_, "USD", "ZAR")))
        ));

        Ok(())
    }

    #[test]
    fn checkout_on_empty_cart_produces_no_receipt() -> TestResult {
        let store = Fixture::bundled_store()?;
        let mut session = Session::login("Thandi", store.currency())?;

        assert!(matches!(
            session.checkout_at(&store, issued_at()?),
            Err(SessionError::EmptyCart)
        ));
        assert!(session.cart().is_empty());

        Ok(())
    }

    #[test]
    fn checkout_snapshots_and_clears_cart() -> TestResult {
        let store = Fixture::bundled_store()?;
        let mut session = Session::login("Thandi", store.currency())?;

        session.add_from_catalog(store.catalog(), ProductId::new(1))?;
        session.add_from_catalog(store.catalog(), ProductId::new(5))?;
        session.add_from_catalog(store.catalog(), ProductId::new(1))?;

        let receipt = session.checkout_at(&store, issued_at()?)?;

        assert!(session.cart().is_empty());
        assert_eq!(receipt.lines().len(), 2);
        assert_eq!(receipt.cashier().as_str(), "Thandi");
        assert_eq!(receipt.totals().subtotal(), Money::from_minor(2797, ZAR));
        assert_eq!(receipt.totals().tax(), Money::from_minor(420, ZAR));
        assert_eq!(receipt.totals().total(), Money::from_minor(3217, ZAR));

        Ok(())
    }

    #[test]
    fn receipt_is_unaffected_by_later_cart_changes() -> TestResult {
        let store = Fixture::bundled_store()?;
        let mut session = Session::login("Thandi", store.currency())?;

        session.add_from_catalog(store.catalog(), ProductId::new(9))?;

        let receipt = session.checkout_at(&store, issued_at()?)?;
        let rendered = receipt.render();

        session.add_from_catalog(store.catalog(), ProductId::new(10))?;
        session.set_quantity_input(0, "5")?;

        assert_eq!(receipt.render(), rendered);
        assert_eq!(receipt.lines().len(), 1);

        Ok(())
    }

    #[test]
    fn failed_mutations_leave_cart_unchanged() -> TestResult {
        let store = Fixture::bundled_store()?;
        let mut session = Session::login("Thandi", store.currency())?;

        session.add_from_catalog(store.catalog(), ProductId::new(1))?;

        let before = session.cart().clone();

        assert!(session.set_quantity_input(0, "0").is_err());
        assert!(session.set_quantity_input(0, "abc").is_err());
        assert!(session.set_quantity_input(3, "2").is_err());
        assert!(session.remove_line(3).is_err());

        assert_eq!(session.cart(), &before);

        Ok(())
    }

    #[test]
    fn totals_track_the_cart() -> TestResult {
        let store = Fixture::bundled_store()?;
        let mut session = Session::login("Thandi", store.currency())?;

        session.add_from_catalog(store.catalog(), ProductId::new(5))?;
        session.set_quantity(0, Quantity::new(4).ok_or("quantity")?)?;

        assert_eq!(
            session.totals(store.vat_rate())?.subtotal(),
            Money::from_minor(2396, ZAR)
        );

        session.clear();

        assert_eq!(
            session.totals(store.vat_rate())?.total(),
            Money::from_minor(0, ZAR)
        );

        Ok(())
    }
}
