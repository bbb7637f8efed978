//! Spaza Till
//!
//! Cart, pricing and receipt engine for a small point-of-sale register, with a line-oriented
//! terminal front end.

pub mod cart;
pub mod catalog;
pub mod fixtures;
pub mod prelude;
pub mod pricing;
pub mod products;
pub mod receipt;
pub mod register;
pub mod session;
pub mod store;
