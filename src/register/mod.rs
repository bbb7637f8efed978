//! Register
//!
//! Line-oriented terminal front end over the order engine. The cashier logs in, then issues one
//! [`Command`] per line until they quit or input ends.

use std::{
    io::{self, BufRead, Write},
    path::PathBuf,
};

use jiff::Zoned;
use thiserror::Error;
use tracing::{info, warn};

use crate::{
    cart::CartError,
    session::{Session, SessionError},
    store::Store,
};

pub use self::{
    command::{Command, CommandError, HELP},
    tables::{cart_table, categories_table, products_table},
};

mod command;
mod tables;

/// Errors that end a register run.
#[derive(Debug, Error)]
pub enum RegisterError {
    /// Reading input or writing output failed.
    #[error("terminal IO error: {0}")]
    Io(#[from] io::Error),
}

/// What the loop should do after a command.
enum Flow {
    Continue,
    Issued,
    Quit,
}

/// Interactive register bound to a store.
#[derive(Debug)]
pub struct Register<'s, R, W> {
    store: &'s Store<'s>,
    input: R,
    output: W,
    receipts_dir: Option<PathBuf>,
    clock: fn() -> Zoned,
}

impl<'s, R: BufRead, W: Write> Register<'s, R, W> {
    /// Create a register reading commands from `input` and writing to `output`.
    pub fn new(store: &'s Store<'s>, input: R, output: W) -> Self {
        Self {
            store,
            input,
            output,
            receipts_dir: None,
            clock: Zoned::now,
        }
    }

    /// Save every receipt into `dir` after printing it.
    #[must_use]
    pub fn with_receipts_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.receipts_dir = Some(dir.into());
        self
    }

    /// Use `clock` for receipt timestamps.
    #[must_use]
    pub fn with_clock(mut self, clock: fn() -> Zoned) -> Self {
        self.clock = clock;
        self
    }

    /// Consume the register, returning the output writer.
    pub fn into_output(self) -> W {
        self.output
    }

    /// Run until the cashier quits or input ends, returning the number of receipts issued.
    ///
    /// When `cashier` is given and valid the login prompt is skipped.
    ///
    /// # Errors
    ///
    /// Returns [`RegisterError::Io`] if the terminal cannot be read or written.
    pub fn run(&mut self, cashier: Option<&str>) -> Result<usize, RegisterError> {
        let Some(mut session) = self.login(cashier)? else {
            return Ok(0);
        };

        writeln!(
            self.output,
            "Welcome, {}! Type `help` for commands.",
            session.cashier()
        )?;

        let mut receipts = 0;

        loop {
            write!(self.output, "> ")?;
            self.output.flush()?;

            let Some(line) = self.read_line()? else {
                break;
            };

            if line.trim().is_empty() {
                continue;
            }

            let command = match line.parse::<Command>() {
                Ok(command) => command,
                Err(err) => {
                    warn!(input = %line, error = %err, "rejected command");
                    writeln!(self.output, "{err}. Type `help` for commands.")?;
                    continue;
                }
            };

            match self.dispatch(&mut session, command)? {
                Flow::Continue => {}
                Flow::Issued => receipts += 1,
                Flow::Quit => break,
            }
        }

        info!(cashier = %session.cashier(), receipts, "register closed");

        Ok(receipts)
    }

    fn login(&mut self, cashier: Option<&str>) -> Result<Option<Session<'s>>, RegisterError> {
        let currency = self.store.currency();

        if let Some(name) = cashier {
            match Session::login(name, currency) {
                Ok(session) => return Ok(Some(session)),
                Err(_err) => writeln!(self.output, "Please enter your name")?,
            }
        }

        loop {
            write!(self.output, "Cashier name: ")?;
            self.output.flush()?;

            let Some(name) = self.read_line()? else {
                return Ok(None);
            };

            match Session::login(&name, currency) {
                Ok(session) => return Ok(Some(session)),
                Err(_err) => writeln!(self.output, "Please enter your name")?,
            }
        }
    }

    fn dispatch(
        &mut self,
        session: &mut Session<'s>,
        command: Command,
    ) -> Result<Flow, RegisterError> {
        match command {
            Command::Categories => self.show_categories()?,
            Command::Products(category) => self.show_products(&category)?,
            Command::Add(product_id) => {
                match session.add_from_catalog(self.store.catalog(), product_id) {
                    Ok(()) => {
                        if let Some(line) = session
                            .cart()
                            .iter()
                            .find(|line| line.product_id() == product_id)
                        {
                            writeln!(
                                self.output,
                                "Added {} (qty {}).",
                                line.name(),
                                line.quantity()
                            )?;
                        }
                    }
                    Err(err) => self.report(&err)?,
                }
            }
            Command::Quantity { index, quantity } => {
                match session.set_quantity_input(index, &quantity) {
                    Ok(()) => self.show_cart(session)?,
                    Err(err) => self.report(&err)?,
                }
            }
            Command::Remove(index) => match session.remove_line(index) {
                Ok(()) => self.show_cart(session)?,
                Err(err) => self.report(&err)?,
            },
            Command::Clear => {
                if self.confirm("Are you sure you want to clear the cart? [y/N] ")? {
                    session.clear();
                    writeln!(self.output, "Cart cleared.")?;
                } else {
                    writeln!(self.output, "Cart not cleared.")?;
                }
            }
            Command::Cart => self.show_cart(session)?,
            Command::Checkout => {
                if self.checkout(session)? {
                    return Ok(Flow::Issued);
                }
            }
            Command::Help => write!(self.output, "{HELP}")?,
            Command::Quit => return Ok(Flow::Quit),
        }

        Ok(Flow::Continue)
    }

    /// Prints the receipt and saves it if a receipts directory is set. Returns whether a receipt
    /// was issued.
    fn checkout(&mut self, session: &mut Session<'s>) -> Result<bool, RegisterError> {
        let receipt = match session.checkout_at(self.store, (self.clock)()) {
            Ok(receipt) => receipt,
            Err(err) => {
                self.report(&err)?;
                return Ok(false);
            }
        };

        writeln!(self.output)?;
        write!(self.output, "{receipt}")?;
        writeln!(self.output)?;

        if let Some(dir) = &self.receipts_dir {
            match receipt.save_to(dir) {
                Ok(path) => writeln!(self.output, "Receipt saved to {}", path.display())?,
                Err(err) => {
                    warn!(error = %err, "failed to save receipt");
                    writeln!(self.output, "Could not save receipt: {err}")?;
                }
            }
        }

        Ok(true)
    }

    fn show_categories(&mut self) -> io::Result<()> {
        writeln!(self.output, "{}", categories_table(self.store.catalog()))
    }

    fn show_products(&mut self, category: &str) -> io::Result<()> {
        let products = self.store.catalog().search_category(category);

        if products.is_empty() {
            return writeln!(self.output, "No products found in this category.");
        }

        let table = products_table(&self.store.details().currency_symbol, products);

        writeln!(self.output, "{table}")
    }

    fn show_cart(&mut self, session: &Session<'s>) -> io::Result<()> {
        if session.cart().is_empty() {
            return writeln!(self.output, "The cart is empty.");
        }

        let symbol = &self.store.details().currency_symbol;

        let table = session
            .totals(self.store.vat_rate())
            .and_then(|totals| {
                cart_table(symbol, session.cart(), &totals).map_err(SessionError::from)
            });

        match table {
            Ok(table) => writeln!(self.output, "{table}"),
            Err(err) => writeln!(self.output, "Could not price the cart: {err}"),
        }
    }

    fn confirm(&mut self, prompt: &str) -> Result<bool, RegisterError> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let answer = self.read_line()?.unwrap_or_default();

        Ok(matches!(
            answer.trim().to_ascii_lowercase().as_str(),
            "y" | "yes"
        ))
    }

    fn report(&mut self, err: &SessionError) -> io::Result<()> {
        warn!(error = %err, "rejected register action");

        match err {
            SessionError::EmptyCart => writeln!(self.output, "Your cart is empty!"),
            SessionError::ProductNotFound(id) => {
                writeln!(self.output, "Product {id} not found.")
            }
            SessionError::Cart(CartError::InvalidQuantity(_)) => {
                writeln!(self.output, "Please enter a valid quantity")
            }
            SessionError::Cart(CartError::IndexOutOfRange { index, .. }) => {
                writeln!(self.output, "There is no line {} in the cart.", index + 1)
            }
            SessionError::EmptyCashierName => writeln!(self.output, "Please enter your name"),
            SessionError::Cart(_) | SessionError::Pricing(_) => writeln!(self.output, "{err}"),
        }
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut buf = String::new();

        if self.input.read_line(&mut buf)? == 0 {
            return Ok(None);
        }

        Ok(Some(buf.trim_end_matches(['\r', '\n']).to_string()))
    }
}
