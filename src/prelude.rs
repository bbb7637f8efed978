//! Spaza Till prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{Cart, CartError, CartLine, Quantity},
    catalog::{Catalog, CatalogError, Category},
    fixtures::{Fixture, FixtureError},
    pricing::{PricingError, Totals, compute_totals},
    products::{Product, ProductId},
    receipt::{Receipt, ReceiptError},
    register::{Command, CommandError, Register, RegisterError},
    session::{CashierName, Session, SessionError},
    store::{Store, StoreDetails},
};
