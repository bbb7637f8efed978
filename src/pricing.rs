//! Pricing
//!
//! Cart amounts are held in minor units, so line totals and the subtotal are exact. VAT is kept
//! unrounded and rounded once, half away from zero, to produce the displayed tax. The displayed
//! total is the subtotal plus the displayed tax, so the three printed amounts always reconcile.

use decimal_percentage::Percentage;
use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use rusty_money::{Money, MoneyError, iso::Currency};
use thiserror::Error;

use crate::cart::{Cart, CartLine, Quantity};

/// Number of decimal places represented by one minor unit.
pub const MINOR_UNIT_SCALE: u32 = 2;

/// Errors that can occur while pricing a cart.
#[derive(Debug, Error, PartialEq)]
pub enum PricingError {
    /// An intermediate amount does not fit in minor units.
    #[error("amount overflowed while calculating {0}")]
    Overflow(&'static str),

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// Price of `quantity` units at `unit_price`.
///
/// # Errors
///
/// Returns [`PricingError::Overflow`] if the product does not fit in minor units.
pub fn line_total<'a>(
    unit_price: Money<'a, Currency>,
    quantity: Quantity,
) -> Result<Money<'a, Currency>, PricingError> {
    let minor = unit_price
        .to_minor_units()
        .checked_mul(i64::from(quantity.get()))
        .ok_or(PricingError::Overflow("line total"))?;

    Ok(Money::from_minor(minor, unit_price.currency()))
}

/// Sum of the line totals of `lines`, zero in `currency` when there are none.
///
/// # Errors
///
/// - [`PricingError::Overflow`]: a line total does not fit in minor units.
/// - [`PricingError::Money`]: a line is priced in a different currency.
pub fn subtotal<'a>(
    lines: &[CartLine<'a>],
    currency: &'a Currency,
) -> Result<Money<'a, Currency>, PricingError> {
    lines
        .iter()
        .try_fold(Money::from_minor(0, currency), |acc, line| {
            Ok(acc.add(line.line_total()?)?)
        })
}

/// Subtotal, VAT and total for a cart.
///
/// # Errors
///
/// Returns a [`PricingError`] if any amount overflows or currencies are mixed.
pub fn compute_totals<'a>(
    cart: &Cart<'a>,
    vat_rate: Percentage,
) -> Result<Totals<'a>, PricingError> {
    Totals::from_subtotal(cart.subtotal()?, vat_rate)
}

/// Converts a minor unit amount into a decimal in major units (e.g. 2198 -> 21.98).
pub fn to_major_units(money: &Money<'_, Currency>) -> Decimal {
    Decimal::new(money.to_minor_units(), MINOR_UNIT_SCALE)
}

/// Formats an amount with two decimals after a currency symbol (e.g. `R21.98`).
pub fn display_amount(symbol: &str, money: &Money<'_, Currency>) -> String {
    format!("{symbol}{:.2}", to_major_units(money))
}

/// Converts a fractional rate into percent points without trailing zeros (0.15 -> 15).
///
/// # Errors
///
/// Returns [`PricingError::Overflow`] if the rate is too large to express in points.
pub fn percent_points(rate: Percentage) -> Result<Decimal, PricingError> {
    (rate * Decimal::ONE)
        .checked_mul(Decimal::ONE_HUNDRED)
        .map(|points| points.normalize())
        .ok_or(PricingError::Overflow("VAT rate"))
}

/// Totals for a cart at a given VAT rate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Totals<'a> {
    subtotal: Money<'a, Currency>,
    tax_exact: Decimal,
    tax: Money<'a, Currency>,
    total: Money<'a, Currency>,
    vat_rate: Percentage,
    vat_points: Decimal,
}

impl<'a> Totals<'a> {
    /// Derive VAT and total from a subtotal.
    ///
    /// # Errors
    ///
    /// Returns a [`PricingError`] if the tax does not fit in minor units or the rate cannot be
    /// expressed in percent points.
    pub fn from_subtotal(
        subtotal: Money<'a, Currency>,
        vat_rate: Percentage,
    ) -> Result<Self, PricingError> {
        let tax_minor_exact = (vat_rate * Decimal::ONE)
            .checked_mul(Decimal::from(subtotal.to_minor_units()))
            .ok_or(PricingError::Overflow("tax"))?;

        let tax_minor = tax_minor_exact
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .to_i64()
            .ok_or(PricingError::Overflow("tax"))?;

        let tax_exact = tax_minor_exact
            .checked_div(Decimal::ONE_HUNDRED)
            .ok_or(PricingError::Overflow("tax"))?;

        let tax = Money::from_minor(tax_minor, subtotal.currency());
        let total = subtotal.add(tax)?;

        Ok(Self {
            subtotal,
            tax_exact,
            tax,
            total,
            vat_rate,
            vat_points: percent_points(vat_rate)?,
        })
    }

    /// Sum of all line totals.
    pub fn subtotal(&self) -> Money<'a, Currency> {
        self.subtotal
    }

    /// VAT rounded to minor units.
    pub fn tax(&self) -> Money<'a, Currency> {
        self.tax
    }

    /// Subtotal plus rounded VAT.
    pub fn total(&self) -> Money<'a, Currency> {
        self.total
    }

    /// Unrounded VAT in major units.
    pub fn tax_exact(&self) -> Decimal {
        self.tax_exact
    }

    /// Unrounded total in major units.
    pub fn total_exact(&self) -> Decimal {
        to_major_units(&self.subtotal) + self.tax_exact
    }

    /// VAT rate these totals were computed with.
    pub fn vat_rate(&self) -> Percentage {
        self.vat_rate
    }

    /// VAT rate in percent points, as printed in labels.
    pub fn vat_points(&self) -> Decimal {
        self.vat_points
    }
}
