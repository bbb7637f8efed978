//! Store Fixtures

use decimal_percentage::Percentage;
use jiff::{Timestamp, fmt::strtime, tz::TimeZone};
use rust_decimal::{Decimal, prelude::ToPrimitive};
use rusty_money::{
    Money,
    iso::{Currency, EUR, GBP, USD, ZAR},
};
use serde::Deserialize;

use crate::{
    catalog::Catalog,
    fixtures::FixtureError,
    products::Product,
    store::{DEFAULT_DATE_FORMAT, Store, StoreDetails},
};

/// Store fixture file
#[derive(Debug, Deserialize)]
pub struct StoreFixture {
    /// Receipt header
    pub store: StoreDetailsFixture,

    /// VAT rate (e.g., "15%" or "0.15")
    pub vat_rate: String,

    /// Symbol printed before amounts
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,

    /// Receipt timestamp layout
    #[serde(default)]
    pub date_format: Option<String>,

    /// Categories in display order
    pub categories: Vec<CategoryFixture>,
}

/// Receipt header fixture
#[derive(Debug, Deserialize)]
pub struct StoreDetailsFixture {
    /// Store name
    pub name: String,

    /// Address line
    pub address: String,

    /// Telephone number
    pub phone: String,

    /// VAT registration number
    pub vat_number: String,
}

/// Category fixture
#[derive(Debug, Deserialize)]
pub struct CategoryFixture {
    /// Category key
    pub name: String,

    /// Products in display order
    #[serde(default)]
    pub products: Vec<ProductFixture>,
}

/// Product Fixture
#[derive(Debug, Deserialize)]
pub struct ProductFixture {
    /// Catalog-wide product id
    pub id: u32,

    /// Product name
    pub name: String,

    /// Product price (e.g., "10.99 ZAR")
    pub price: String,
}

fn default_currency_symbol() -> String {
    "R".to_string()
}

impl TryFrom<ProductFixture> for Product<'_> {
    type Error = FixtureError;

    fn try_from(fixture: ProductFixture) -> Result<Self, Self::Error> {
        let (minor_units, currency) = parse_price(&fixture.price)?;

        Ok(Product::new(
            fixture.id,
            fixture.name,
            Money::from_minor(minor_units, currency),
        ))
    }
}

impl TryFrom<StoreFixture> for Store<'_> {
    type Error = FixtureError;

    fn try_from(fixture: StoreFixture) -> Result<Self, Self::Error> {
        let vat_rate = parse_percentage(&fixture.vat_rate)?;

        let date_format = fixture
            .date_format
            .unwrap_or_else(|| DEFAULT_DATE_FORMAT.to_string());

        validate_date_format(&date_format)?;

        let mut categories = Vec::with_capacity(fixture.categories.len());
        let mut currency = None;

        for category in fixture.categories {
            let products = category
                .products
                .into_iter()
                .map(Product::try_from)
                .collect::<Result<Vec<_>, _>>()?;

            if currency.is_none() {
                currency = products.first().map(|product| product.price.currency());
            }

            categories.push((category.name, products));
        }

        let mut catalog = Catalog::new(currency.ok_or(FixtureError::NoCurrency)?);

        for (name, products) in categories {
            catalog.add_category(name, products)?;
        }

        let details = StoreDetails {
            name: fixture.store.name,
            address: fixture.store.address,
            phone: fixture.store.phone,
            vat_number: fixture.store.vat_number,
            currency_symbol: fixture.currency_symbol,
            date_format,
        };

        Ok(Store::new(details, vat_rate, catalog))
    }
}

/// Parse a store fixture from YAML.
///
/// # Errors
///
/// Returns an error if the YAML is malformed, a price or rate cannot be parsed, the date format
/// is invalid or the catalog is inconsistent.
pub fn parse_store(contents: &str) -> Result<Store<'static>, FixtureError> {
    let fixture: StoreFixture = serde_norway::from_str(contents)?;

    fixture.try_into()
}

/// Parse price string (e.g., "10.99 ZAR") into minor units and currency
///
/// # Errors
///
/// Returns an error if the string is not in the format "AMOUNT CURRENCY", if the amount is not a
/// decimal number, or if the currency code is not recognised.
pub fn parse_price(s: &str) -> Result<(i64, &'static Currency), FixtureError> {
    let parts: Vec<&str> = s.split_whitespace().collect();

    let [amount, currency_code] = parts.as_slice() else {
        return Err(FixtureError::InvalidPrice(format!(
            "Expected format 'AMOUNT CURRENCY', got: {s}"
        )));
    };

    let minor_units = amount
        .parse::<Decimal>()
        .ok()
        .and_then(|value| value.checked_mul(Decimal::ONE_HUNDRED))
        .filter(Decimal::is_integer)
        .as_ref()
        .and_then(ToPrimitive::to_i64)
        .ok_or_else(|| FixtureError::InvalidPrice(s.to_string()))?;

    let currency = match *currency_code {
        "ZAR" => ZAR,
        "GBP" => GBP,
        "USD" => USD,
        "EUR" => EUR,
        other => return Err(FixtureError::UnknownCurrency(other.to_string())),
    };

    Ok((minor_units, currency))
}

/// Parse percentage string (e.g., "15%" or "0.15") into a `Percentage`
///
/// # Errors
///
/// Returns an error if the string is not a decimal number, optionally followed by `%`.
pub fn parse_percentage(s: &str) -> Result<Percentage, FixtureError> {
    let trimmed = s.trim();

    let value = match trimmed.strip_suffix('%') {
        Some(points) => points
            .trim()
            .parse::<Decimal>()
            .ok()
            .and_then(|value| value.checked_div(Decimal::ONE_HUNDRED)),
        None => trimmed.parse::<Decimal>().ok(),
    };

    value
        .filter(|value| !value.is_sign_negative())
        .map(Percentage::from)
        .ok_or_else(|| FixtureError::InvalidPercentage(s.to_string()))
}

fn validate_date_format(format: &str) -> Result<(), FixtureError> {
    let sample = Timestamp::UNIX_EPOCH.to_zoned(TimeZone::UTC);

    strtime::format(format, &sample)
        .map_err(|err| FixtureError::InvalidDateFormat(format.to_string(), err.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{catalog::CatalogError, pricing::percent_points, products::ProductId};

    use super::*;

    const MINIMAL: &str = r#"
store:
  name: CORNER SHOP
  address: 1 Main Road
  phone: "011 000 0000"
  vat_number: "4000000001"
vat_rate: "15%"
categories:
  - name: fruits
    products:
      - { id: 5, name: Banana, price: "5.99 ZAR" }
"#;

    #[test]
    fn parse_price_reads_minor_units() -> TestResult {
        let (minor, currency) = parse_price("10.99 ZAR")?;

        assert_eq!(minor, 1099);
        assert_eq!(currency, ZAR);

        Ok(())
    }

    #[test]
    fn parse_price_rejects_invalid_format() {
        assert!(matches!(parse_price("10.99ZAR"), Err(FixtureError::InvalidPrice(_))));
        assert!(matches!(parse_price("abc ZAR"), Err(FixtureError::InvalidPrice(_))));
        assert!(matches!(parse_price("1.999 ZAR"), Err(FixtureError::InvalidPrice(_))));
    }

    #[test]
    fn parse_price_rejects_unknown_currency() {
        let result = parse_price("2.99 ABC");

        assert!(matches!(result, Err(FixtureError::UnknownCurrency(code)) if code == "ABC"));
    }

    #[test]
    fn parse_percentage_accepts_both_forms() -> TestResult {
        assert_eq!(percent_points(parse_percentage("15%")?)?.to_string(), "15");
        assert_eq!(percent_points(parse_percentage("0.15")?)?.to_string(), "15");
        assert_eq!(percent_points(parse_percentage(" 12.5 % ")?)?.to_string(), "12.5");

        Ok(())
    }

    #[test]
    fn parse_percentage_rejects_garbage_and_negatives() {
        for input in ["fifteen", "%", "-15%", ""] {
            assert!(
                matches!(parse_percentage(input), Err(FixtureError::InvalidPercentage(_))),
                "{input:?} should be rejected"
            );
        }
    }

    #[test]
    fn parse_store_builds_catalog_and_details() -> TestResult {
        let store = parse_store(MINIMAL)?;

        assert_eq!(store.details().name, "CORNER SHOP");
        assert_eq!(store.details().currency_symbol, "R");
        assert_eq!(store.details().date_format, DEFAULT_DATE_FORMAT);
        assert_eq!(store.currency(), ZAR);

        let banana = store.catalog().lookup(ProductId::new(5)).ok_or("banana")?;

        assert_eq!(banana.price.to_minor_units(), 599);

        Ok(())
    }

    #[test]
    fn parse_store_rejects_invalid_date_format() {
        let yaml = MINIMAL.replace("vat_rate:", "date_format: \"%Y %\"\nvat_rate:");

        assert!(matches!(
            parse_store(&yaml),
            Err(FixtureError::InvalidDateFormat(format, _)) if format == "%Y %"
        ));
    }

    #[test]
    fn parse_store_requires_a_product() {
        let yaml = MINIMAL.replace(
            "    products:\n      - { id: 5, name: Banana, price: \"5.99 ZAR\" }\n",
            "    products: []\n",
        );

        assert!(matches!(parse_store(&yaml), Err(FixtureError::NoCurrency)));
    }

    #[test]
    fn parse_store_reports_catalog_errors() {
        let yaml = format!("{MINIMAL}      - {{ id: 5, name: Apple, price: \"6.99 ZAR\" }}\n");

        assert!(matches!(
            parse_store(&yaml),
            Err(FixtureError::Catalog(CatalogError::DuplicateProductId(_)))
        ));
    }

    #[test]
    fn parse_store_rejects_mixed_currencies() {
        let yaml = format!("{MINIMAL}      - {{ id: 6, name: Apple, price: \"6.99 GBP\" }}\n");

        assert!(matches!(
            parse_store(&yaml),
            Err(FixtureError::Catalog(CatalogError::CurrencyMismatch(_, "GBP", "ZAR")))
        ));
    }
}
