//! Products

use std::{fmt, num::ParseIntError, str::FromStr};

use rusty_money::{Money, iso::Currency};

/// Catalog-wide product identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProductId(u32);

impl ProductId {
    /// Wrap a raw product id.
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// The raw product id.
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl From<u32> for ProductId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl FromStr for ProductId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Product
#[derive(Debug, Clone, PartialEq)]
pub struct Product<'a> {
    /// Product id
    pub id: ProductId,

    /// Product name
    pub name: String,

    /// Unit price
    pub price: Money<'a, Currency>,
}

impl<'a> Product<'a> {
    /// Create a new product.
    pub fn new(
        id: impl Into<ProductId>,
        name: impl Into<String>,
        price: Money<'a, Currency>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
        }
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::ZAR;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn product_id_parses_with_surrounding_whitespace() -> TestResult {
        let id: ProductId = " 12 ".parse()?;

        assert_eq!(id, ProductId::new(12));
        assert_eq!(id.to_string(), "12");

        Ok(())
    }

    #[test]
    fn product_id_rejects_non_numeric_input() {
        assert!("twelve".parse::<ProductId>().is_err());
        assert!("-1".parse::<ProductId>().is_err());
    }

    #[test]
    fn new_product_keeps_fields() {
        let product = Product::new(5, "Banana", Money::from_minor(599, ZAR));

        assert_eq!(product.id.get(), 5);
        assert_eq!(product.name, "Banana");
        assert_eq!(product.price.to_minor_units(), 599);
    }
}
