//! Store

use decimal_percentage::Percentage;
use rusty_money::iso::Currency;

use crate::catalog::Catalog;

/// Default receipt timestamp layout, e.g. `10/14/2026, 1:04:05 PM`.
pub const DEFAULT_DATE_FORMAT: &str = "%-m/%-d/%Y, %-I:%M:%S %p";

/// Header details printed at the top of every receipt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreDetails {
    /// Trading name
    pub name: String,

    /// Single address line
    pub address: String,

    /// Telephone number
    pub phone: String,

    /// VAT registration number
    pub vat_number: String,

    /// Symbol printed before every amount
    pub currency_symbol: String,

    /// `strftime`-style layout for the receipt timestamp
    pub date_format: String,
}

impl StoreDetails {
    /// Create store details with the `R` currency symbol and the default date format.
    pub fn new(
        name: impl Into<String>,
        address: impl Into<String>,
        phone: impl Into<String>,
        vat_number: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
            phone: phone.into(),
            vat_number: vat_number.into(),
            currency_symbol: "R".to_string(),
            date_format: DEFAULT_DATE_FORMAT.to_string(),
        }
    }
}

/// A store: its receipt header, VAT rate and catalog.
#[derive(Debug, Clone)]
pub struct Store<'a> {
    details: StoreDetails,
    vat_rate: Percentage,
    catalog: Catalog<'a>,
}

impl<'a> Store<'a> {
    /// Create a new store.
    pub fn new(details: StoreDetails, vat_rate: Percentage, catalog: Catalog<'a>) -> Self {
        Self {
            details,
            vat_rate,
            catalog,
        }
    }

    /// Receipt header details
    pub fn details(&self) -> &StoreDetails {
        &self.details
    }

    /// VAT rate applied at checkout
    pub fn vat_rate(&self) -> Percentage {
        self.vat_rate
    }

    /// Product catalog
    pub fn catalog(&self) -> &Catalog<'a> {
        &self.catalog
    }

    /// Currency of the catalog
    pub fn currency(&self) -> &'static Currency {
        self.catalog.currency()
    }
}
