//! Spaza Till CLI

use std::io::{self, Write};

use anyhow::{Context, Result};
use spaza_till::{
    fixtures::Fixture,
    products::ProductId,
    register::{Register, categories_table, products_table},
    session::Session,
    store::Store,
};
use tracing::info;

use crate::cli::{Cli, Commands, StoreArgs, logging};

mod cli;

fn main() -> Result<()> {
    let cli = Cli::load().unwrap_or_else(|err| err.exit());

    logging::init_subscriber(&cli.logging)?;

    let store = load_store(&cli.store)?;

    match cli.command {
        Commands::Categories => list_categories(&store),
        Commands::Products { category } => list_products(&store, &category),
        Commands::Register {
            cashier,
            receipts_dir,
        } => {
            let mut register = Register::new(&store, io::stdin().lock(), io::stdout().lock())
                .with_receipts_dir(receipts_dir);

            register.run(cashier.as_deref())?;

            Ok(())
        }
        Commands::Checkout {
            cashier,
            items,
            receipts_dir,
        } => {
            let mut session = Session::login(&cashier, store.currency())?;

            for id in items {
                session
                    .add_from_catalog(store.catalog(), ProductId::new(id))
                    .with_context(|| format!("failed to add product {id}"))?;
            }

            let receipt = session.checkout(&store)?;

            receipt.write_to(io::stdout().lock())?;

            if let Some(dir) = receipts_dir {
                let path = receipt.save_to(&dir)?;

                info!(path = %path.display(), "receipt exported");
            }

            Ok(())
        }
    }
}

fn load_store(args: &StoreArgs) -> Result<Store<'static>> {
    match &args.fixtures_dir {
        Some(dir) => Fixture::with_base_path(dir)
            .load_store(&args.store)
            .with_context(|| {
                format!("failed to load store {:?} from {}", args.store, dir.display())
            }),
        None => Fixture::bundled_store().context("failed to load bundled store"),
    }
}

fn list_categories(store: &Store<'_>) -> Result<()> {
    writeln!(io::stdout().lock(), "{}", categories_table(store.catalog()))?;

    Ok(())
}

fn list_products(store: &Store<'_>, category: &str) -> Result<()> {
    let products = store.catalog().category(category)?;
    let table = products_table(&store.details().currency_symbol, products);

    writeln!(io::stdout().lock(), "{table}")?;

    Ok(())
}
