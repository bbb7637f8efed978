//! Quantities

use std::{fmt, num::NonZeroU32, str::FromStr};

use crate::cart::CartError;

/// A positive number of units on a cart line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Quantity(NonZeroU32);

impl Quantity {
    /// A single unit.
    pub const ONE: Self = Self(NonZeroU32::MIN);

    /// Create a quantity; `None` for zero.
    pub fn new(value: u32) -> Option<Self> {
        NonZeroU32::new(value).map(Self)
    }

    /// Number of units.
    pub fn get(self) -> u32 {
        self.0.get()
    }

    /// The next quantity up, if it fits.
    pub fn checked_increment(self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Self::ONE
    }
}

impl TryFrom<i64> for Quantity {
    type Error = CartError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u32::try_from(value)
            .ok()
            .and_then(Self::new)
            .ok_or_else(|| CartError::InvalidQuantity(value.to_string()))
    }
}

impl FromStr for Quantity {
    type Err = CartError;

    /// Parses cashier input. Anything other than a positive whole number is rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();

        trimmed
            .parse::<i64>()
            .map_err(|_err| CartError::InvalidQuantity(trimmed.to_string()))
            .and_then(Self::try_from)
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}
