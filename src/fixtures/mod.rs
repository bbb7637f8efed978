//! Fixtures

use std::{fs, path::PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::{catalog::CatalogError, store::Store};

pub mod stores;

/// Reference store bundled into the crate.
const BUNDLED_STORE: &str = include_str!("../../fixtures/stores/spaza.yml");

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Invalid percentage format
    #[error("Invalid percentage format: {0}")]
    InvalidPercentage(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Receipt date format cannot be rendered (format, reason)
    #[error("Invalid date format {0:?}: {1}")]
    InvalidDateFormat(String, String),

    /// No products in the store; currency unknown
    #[error("No products in store; currency unknown")]
    NoCurrency,

    /// Catalog validation error
    #[error("Invalid catalog: {0}")]
    Catalog(#[from] CatalogError),
}

/// Fixture
#[derive(Debug, Clone)]
pub struct Fixture {
    /// Base path for fixture files
    base_path: PathBuf,
}

impl Fixture {
    /// Create a fixture loader with a custom base path
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    /// Load a store from `<base>/stores/<name>.yml`
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or the store it describes is invalid.
    pub fn load_store(&self, name: &str) -> Result<Store<'static>, FixtureError> {
        let file_path = self.base_path.join("stores").join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;

        debug!(path = %file_path.display(), "loading store fixture");

        stores::parse_store(&contents)
    }

    /// Load the reference store compiled into the crate
    ///
    /// # Errors
    ///
    /// Returns an error if the bundled fixture is invalid.
    pub fn bundled_store() -> Result<Store<'static>, FixtureError> {
        stores::parse_store(BUNDLED_STORE)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use rusty_money::iso::ZAR;
    use tempfile::TempDir;
    use testresult::TestResult;

    use crate::{catalog::Category, pricing::percent_points, products::ProductId};

    use super::*;

    #[test]
    fn bundled_store_has_reference_catalog() -> TestResult {
        let store = Fixture::bundled_store()?;
        let catalog = store.catalog();

        assert_eq!(store.details().name, "GEDLEHLEKISA SPAZA");
        assert_eq!(store.details().vat_number, "aa1");
        assert_eq!(percent_points(store.vat_rate())?.to_string(), "15");
        assert_eq!(store.currency(), ZAR);

        let categories: Vec<&str> = catalog.categories().iter().map(Category::name).collect();

        assert_eq!(categories, vec!["snacks", "fruits", "beverages", "bread"]);
        assert_eq!(catalog.len(), 16);

        let biscuits = catalog.lookup(ProductId::new(1)).ok_or("product 1")?;

        assert_eq!(biscuits.name, "Marie Biscuits");
        assert_eq!(biscuits.price.to_minor_units(), 1099);

        Ok(())
    }

    #[test]
    fn load_store_reads_from_base_path() -> TestResult {
        let temp_dir = TempDir::new()?;
        let stores_dir = temp_dir.path().join("stores");

        fs::create_dir_all(&stores_dir)?;
        fs::write(stores_dir.join("bundled.yml"), BUNDLED_STORE)?;

        let store = Fixture::with_base_path(temp_dir.path()).load_store("bundled")?;

        assert_eq!(store.catalog().len(), 16);

        Ok(())
    }

    #[test]
    fn load_store_reports_missing_file() -> TestResult {
        let temp_dir = TempDir::new()?;

        let result = Fixture::with_base_path(temp_dir.path()).load_store("missing");

        assert!(matches!(result, Err(FixtureError::Io(_))));

        Ok(())
    }

    #[test]
    fn load_store_reports_malformed_yaml() -> TestResult {
        let temp_dir = TempDir::new()?;
        let stores_dir = temp_dir.path().join("stores");

        fs::create_dir_all(&stores_dir)?;
        fs::write(stores_dir.join("broken.yml"), "store: [unterminated")?;

        let result = Fixture::with_base_path(temp_dir.path()).load_store("broken");

        assert!(matches!(result, Err(FixtureError::Yaml(_))));

        Ok(())
    }
}
