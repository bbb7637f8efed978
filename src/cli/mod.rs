//! Command line configuration

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use self::logging::LoggingConfig;

pub(crate) mod logging;

/// Spaza Till point-of-sale register
#[derive(Debug, Parser)]
#[command(name = "spaza-till", about = "Spaza Till point-of-sale register", long_about = None)]
pub struct Cli {
    /// Store fixture settings.
    #[command(flatten)]
    pub store: StoreArgs,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Command to run.
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }
}

/// Which store to load.
#[derive(Debug, Args)]
pub struct StoreArgs {
    /// Directory containing `stores/<name>.yml`; the bundled store is used when omitted
    #[arg(long, env = "SPAZA_FIXTURES_DIR", global = true)]
    pub fixtures_dir: Option<PathBuf>,

    /// Store fixture name
    #[arg(long, env = "SPAZA_STORE", default_value = "spaza", global = true)]
    pub store: String,
}

/// Subcommands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List product categories
    Categories,

    /// List the products in a category
    Products {
        /// Category name, e.g. `snacks`
        category: String,
    },

    /// Run an interactive register on the terminal
    Register {
        /// Cashier name; prompted for when omitted
        #[arg(long, env = "SPAZA_CASHIER")]
        cashier: Option<String>,

        /// Directory receipts are saved into
        #[arg(long, env = "SPAZA_RECEIPTS_DIR", default_value = "receipts")]
        receipts_dir: PathBuf,
    },

    /// Check out a list of products in one go and print the receipt
    Checkout {
        /// Cashier name
        #[arg(long, env = "SPAZA_CASHIER")]
        cashier: String,

        /// Product id to add; repeat for more units
        #[arg(long = "item", required = true, num_args = 1..)]
        items: Vec<u32>,

        /// Directory the receipt is saved into; not saved when omitted
        #[arg(long, env = "SPAZA_RECEIPTS_DIR")]
        receipts_dir: Option<PathBuf>,
    },
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;
    use crate::cli::logging::LogFormat;

    #[test]
    fn parses_checkout_with_repeated_items() -> TestResult {
        let cli = Cli::try_parse_from([
            "spaza-till",
            "--log-format",
            "json",
            "checkout",
            "--cashier",
            "Thandi",
            "--item",
            "1",
            "--item",
            "5",
            "1",
        ])?;

        assert_eq!(cli.logging.log_format, LogFormat::Json);
        assert_eq!(cli.store.store, "spaza");
        assert!(matches!(
            cli.command,
            Commands::Checkout { ref cashier, ref items, receipts_dir: None }
                if cashier == "Thandi" && items == &[1, 5, 1]
        ));

        Ok(())
    }

    #[test]
    fn checkout_requires_items() {
        let result = Cli::try_parse_from(["spaza-till", "checkout", "--cashier", "Thandi"]);

        assert!(result.is_err());
    }

    #[test]
    fn parses_products_with_fixtures_dir() -> TestResult {
        let cli = Cli::try_parse_from([
            "spaza-till",
            "--fixtures-dir",
            "fixtures",
            "products",
            "fruits",
        ])?;

        assert_eq!(cli.store.fixtures_dir, Some(PathBuf::from("fixtures")));
        assert!(matches!(cli.command, Commands::Products { ref category } if category == "fruits"));

        Ok(())
    }
}
