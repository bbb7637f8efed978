//! Receipt

use std::{
    fmt, fs, io,
    path::{Path, PathBuf},
};

use jiff::{Zoned, fmt::strtime};
use rusty_money::{Money, iso::Currency};
use thiserror::Error;
use tracing::info;

use crate::{
    cart::CartLine,
    pricing::{Totals, display_amount, to_major_units},
    session::CashierName,
    store::StoreDetails,
};

const SHORT_RULE: &str = "------------------------";
const LONG_RULE: &str = "----------------------------------------";
const DOUBLE_RULE: &str = "========================";
const ITEM_HEADER: &str = "ITEM                QTY   PRICE    TOTAL";

/// Errors that can occur when exporting a receipt.
#[derive(Debug, Error)]
pub enum ReceiptError {
    /// IO error
    #[error("IO error: {0}")]
    IO(#[from] io::Error),
}

/// Immutable snapshot of a completed checkout.
#[derive(Debug, Clone)]
pub struct Receipt<'a> {
    store: StoreDetails,
    cashier: CashierName,
    issued_at: Zoned,
    lines: Vec<CartLine<'a>>,
    totals: Totals<'a>,
}

impl<'a> Receipt<'a> {
    /// Create a new receipt with the given details.
    #[must_use]
    pub fn new(
        store: StoreDetails,
        cashier: CashierName,
        issued_at: Zoned,
        lines: Vec<CartLine<'a>>,
        totals: Totals<'a>,
    ) -> Self {
        Self {
            store,
            cashier,
            issued_at,
            lines,
            totals,
        }
    }

    /// Store header details
    pub fn store(&self) -> &StoreDetails {
        &self.store
    }

    /// Cashier who completed the checkout
    pub fn cashier(&self) -> &CashierName {
        &self.cashier
    }

    /// Checkout time
    pub fn issued_at(&self) -> &Zoned {
        &self.issued_at
    }

    /// Purchased lines in cart order
    pub fn lines(&self) -> &[CartLine<'a>] {
        &self.lines
    }

    /// Subtotal, VAT and total
    pub fn totals(&self) -> &Totals<'a> {
        &self.totals
    }

    /// Render the receipt as plain text.
    pub fn render(&self) -> String {
        self.to_string()
    }

    /// Write the rendered receipt to the given writer.
    ///
    /// # Errors
    ///
    /// Returns [`ReceiptError::IO`] if the writer fails.
    pub fn write_to(&self, mut out: impl io::Write) -> Result<(), ReceiptError> {
        out.write_all(self.render().as_bytes())?;
        out.flush()?;

        Ok(())
    }

    /// Export file name derived from the checkout time, e.g.
    /// `receipt-2026-10-14T13-04-05-123Z.txt`.
    pub fn file_name(&self) -> String {
        let timestamp = format!("{:.3}", self.issued_at.timestamp()).replace([':', '.'], "-");

        format!("receipt-{timestamp}.txt")
    }

    /// Save the rendered receipt into `dir`, returning the path written.
    ///
    /// # Errors
    ///
    /// Returns [`ReceiptError::IO`] if the directory cannot be created or the file written.
    pub fn save_to(&self, dir: impl AsRef<Path>) -> Result<PathBuf, ReceiptError> {
        let dir = dir.as_ref();

        fs::create_dir_all(dir)?;

        let path = dir.join(self.file_name());

        fs::write(&path, self.render())?;

        info!(path = %path.display(), "saved receipt");

        Ok(path)
    }

    fn issued_at_display(&self) -> String {
        // The layout is checked when the store is loaded; fall back to RFC 3339 otherwise.
        strtime::format(&self.store.date_format, &self.issued_at)
            .unwrap_or_else(|_err| self.issued_at.timestamp().to_string())
    }

    fn amount(&self, money: Money<'a, Currency>) -> String {
        display_amount(&self.store.currency_symbol, &money)
    }

    fn summary_value(money: Money<'a, Currency>) -> String {
        let value = format!("{:.2}", to_major_units(&money));

        format!("{value:>8}")
    }

    fn write_line(&self, f: &mut fmt::Formatter<'_>, line: &CartLine<'a>) -> fmt::Result {
        // Line totals were checked when the receipt was built.
        let line_total = line
            .line_total()
            .map_or_else(|_err| String::from("-"), |total| self.amount(total));

        writeln!(
            f,
            "{name:<20.20} {qty:>3} {price:>8} {total:>9}",
            name = line.name(),
            qty = line.quantity(),
            price = self.amount(*line.unit_price()),
            total = line_total,
        )
    }
}

impl fmt::Display for Receipt<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = &self.store.currency_symbol;

        writeln!(f, "=== {} ===", self.store.name)?;
        writeln!(f, "{}", self.store.address)?;
        writeln!(f, "Tel: {}", self.store.phone)?;
        writeln!(f, "VAT: {}", self.store.vat_number)?;
        writeln!(f, "{SHORT_RULE}")?;
        writeln!(f, "Cashier: {}", self.cashier)?;
        writeln!(f, "Date: {}", self.issued_at_display())?;
        writeln!(f, "{SHORT_RULE}")?;
        writeln!(f)?;

        writeln!(f, "{ITEM_HEADER}")?;
        writeln!(f, "{LONG_RULE}")?;

        for line in &self.lines {
            self.write_line(f, line)?;
        }

        writeln!(f)?;
        writeln!(
            f,
            "SUBTOTAL: {symbol}{}",
            Self::summary_value(self.totals.subtotal())
        )?;
        writeln!(
            f,
            "VAT ({}%): {symbol}{}",
            self.totals.vat_points(),
            Self::summary_value(self.totals.tax())
        )?;
        writeln!(f, "{SHORT_RULE}")?;
        writeln!(
            f,
            "TOTAL: {symbol}{}",
            Self::summary_value(self.totals.total())
        )?;
        writeln!(f, "{DOUBLE_RULE}")?;
        writeln!(f, "   THANK YOU FOR SHOPPING WITH US!")?;
        writeln!(f, "     PLEASE COME AGAIN SOON!")?;
        writeln!(f, "{DOUBLE_RULE}")
    }
}
