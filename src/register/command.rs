//! Register commands

use std::str::FromStr;

use thiserror::Error;

use crate::products::ProductId;

/// Errors parsing a register command line.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    /// The line was blank.
    #[error("no command entered")]
    Empty,

    /// The command word is not recognised.
    #[error("unknown command: {0}")]
    Unknown(String),

    /// A required argument is missing (command, argument name).
    #[error("usage: {0} <{1}>")]
    MissingArgument(&'static str, &'static str),

    /// A line number is not a positive whole number.
    #[error("invalid line number: {0}")]
    InvalidLine(String),

    /// A product id is not a whole number.
    #[error("invalid product id: {0}")]
    InvalidProductId(String),

    /// More words followed a complete command (command, first extra word).
    #[error("unexpected argument to {0}: {1}")]
    UnexpectedArgument(String, String),
}

/// A parsed register command.
///
/// Line numbers are 1-based as typed by the cashier and are held here as 0-based indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List categories.
    Categories,

    /// List the products in a category.
    Products(String),

    /// Add one unit of a product.
    Add(ProductId),

    /// Change the quantity of a line. The quantity is kept raw so the cart validates it.
    Quantity {
        /// Line index
        index: usize,
        /// Quantity as typed
        quantity: String,
    },

    /// Remove a line.
    Remove(usize),

    /// Empty the cart after confirmation.
    Clear,

    /// Show the cart and totals.
    Cart,

    /// Check out and print the receipt.
    Checkout,

    /// Show available commands.
    Help,

    /// Leave the register.
    Quit,
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut words = s.split_whitespace();

        let Some(word) = words.next() else {
            return Err(CommandError::Empty);
        };

        let command = match word.to_ascii_lowercase().as_str() {
            "categories" | "cats" => Command::Categories,
            "products" | "list" => {
                let category = words.by_ref().collect::<Vec<_>>().join(" ");

                if category.is_empty() {
                    return Err(CommandError::MissingArgument("products", "category"));
                }

                Command::Products(category)
            }
            "add" => {
                let raw = words
                    .next()
                    .ok_or(CommandError::MissingArgument("add", "product id"))?;

                let id = raw
                    .parse::<ProductId>()
                    .map_err(|_err| CommandError::InvalidProductId(raw.to_string()))?;

                Command::Add(id)
            }
            "qty" | "quantity" => {
                let index = parse_line(
                    words
                        .next()
                        .ok_or(CommandError::MissingArgument("qty", "line"))?,
                )?;

                let quantity = words
                    .next()
                    .ok_or(CommandError::MissingArgument("qty", "quantity"))?;

                Command::Quantity {
                    index,
                    quantity: quantity.to_string(),
                }
            }
            "remove" | "rm" => {
                let line = words
                    .next()
                    .ok_or(CommandError::MissingArgument("remove", "line"))?;

                Command::Remove(parse_line(line)?)
            }
            "clear" => Command::Clear,
            "cart" => Command::Cart,
            "checkout" | "pay" => Command::Checkout,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => return Err(CommandError::Unknown(other.to_string())),
        };

        if let Some(extra) = words.next() {
            return Err(CommandError::UnexpectedArgument(
                word.to_string(),
                extra.to_string(),
            ));
        }

        Ok(command)
    }
}

/// Convert a 1-based line number into a 0-based index.
fn parse_line(s: &str) -> Result<usize, CommandError> {
    s.parse::<usize>()
        .ok()
        .and_then(|line| line.checked_sub(1))
        .ok_or_else(|| CommandError::InvalidLine(s.to_string()))
}

/// Help text listing every command.
pub const HELP: &str = "\
Commands:
  categories              list product categories
  products <category>     list products in a category
  add <product id>        add one unit of a product to the cart
  qty <line> <quantity>   change the quantity of a cart line
  remove <line>           remove a cart line
  clear                   empty the cart
  cart                    show the cart and totals
  checkout                print and save the receipt
  help                    show this help
  quit                    leave the register
";
