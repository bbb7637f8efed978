//! Catalog
//!
//! Static, read-only product reference data grouped into ordered categories.

use rustc_hash::FxHashMap;
use rusty_money::iso::Currency;
use thiserror::Error;

use crate::products::{Product, ProductId};

/// Catalog construction and lookup errors.
#[derive(Debug, Error, PartialEq)]
pub enum CatalogError {
    /// No category with this name exists.
    #[error("category not found: {0}")]
    CategoryNotFound(String),

    /// A category with this name was added twice.
    #[error("duplicate category: {0}")]
    DuplicateCategory(String),

    /// A product id appears more than once across the catalog.
    #[error("duplicate product id: {0}")]
    DuplicateProductId(ProductId),

    /// A product has a negative price.
    #[error("product {0} has a negative price")]
    NegativePrice(ProductId),

    /// A product is priced in a different currency to the catalog (product, product currency,
    /// catalog currency).
    #[error("product {0} has currency {1}, but catalog has currency {2}")]
    CurrencyMismatch(ProductId, &'static str, &'static str),
}

/// A named, ordered group of products.
#[derive(Debug, Clone, PartialEq)]
pub struct Category<'a> {
    name: String,
    products: Vec<Product<'a>>,
}

impl<'a> Category<'a> {
    /// Category key
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Category name with the first character upper-cased, for menus.
    pub fn display_name(&self) -> String {
        display_name(&self.name)
    }

    /// Products in catalog order
    pub fn products(&self) -> &[Product<'a>] {
        &self.products
    }
}

/// Catalog
#[derive(Debug, Clone)]
pub struct Catalog<'a> {
    categories: Vec<Category<'a>>,

    /// Product id -> (category index, product index)
    index: FxHashMap<ProductId, (usize, usize)>,

    currency: &'static Currency,
}

impl<'a> Catalog<'a> {
    /// Create an empty catalog priced in `currency`.
    pub fn new(currency: &'static Currency) -> Self {
        Self {
            categories: Vec::new(),
            index: FxHashMap::default(),
            currency,
        }
    }

    /// Append a category of products.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if the category already exists, or a product has a duplicate
    /// id, a negative price or a different currency. The catalog is unchanged on error.
    pub fn add_category(
        &mut self,
        name: impl Into<String>,
        products: impl Into<Vec<Product<'a>>>,
    ) -> Result<&mut Self, CatalogError> {
        let name = name.into();
        let products = products.into();

        if self.categories.iter().any(|category| category.name == name) {
            return Err(CatalogError::DuplicateCategory(name));
        }

        let category_idx = self.categories.len();
        let mut additions = FxHashMap::default();

        for (product_idx, product) in products.iter().enumerate() {
            self.validate(product)?;

            if additions
                .insert(product.id, (category_idx, product_idx))
                .is_some()
            {
                return Err(CatalogError::DuplicateProductId(product.id));
            }
        }

        self.index.extend(additions);
        self.categories.push(Category { name, products });

        Ok(self)
    }

    fn validate(&self, product: &Product<'a>) -> Result<(), CatalogError> {
        if self.index.contains_key(&product.id) {
            return Err(CatalogError::DuplicateProductId(product.id));
        }

        if product.price.to_minor_units() < 0 {
            return Err(CatalogError::NegativePrice(product.id));
        }

        let product_currency = product.price.currency();

        if product_currency != self.currency {
            return Err(CatalogError::CurrencyMismatch(
                product.id,
                product_currency.iso_alpha_code,
                self.currency.iso_alpha_code,
            ));
        }

        Ok(())
    }

    /// Find a product by id.
    pub fn lookup(&self, id: ProductId) -> Option<&Product<'a>> {
        let &(category_idx, product_idx) = self.index.get(&id)?;

        self.categories
            .get(category_idx)?
            .products
            .get(product_idx)
    }

    /// Products in a category, or an empty slice if the category is unknown.
    pub fn list_by_category(&self, category: &str) -> &[Product<'a>] {
        self.category(category).unwrap_or_default()
    }

    /// Products in a category.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::CategoryNotFound`] if the category is unknown.
    pub fn category(&self, category: &str) -> Result<&[Product<'a>], CatalogError> {
        self.categories
            .iter()
            .find(|c| c.name == category)
            .map(Category::products)
            .ok_or_else(|| CatalogError::CategoryNotFound(category.to_string()))
    }

    /// Products in the category named by `query`, ignoring case and runs of whitespace.
    ///
    /// An exact key match wins over a loose one. Empty if nothing matches.
    pub fn search_category(&self, query: &str) -> &[Product<'a>] {
        if let Ok(products) = self.category(query) {
            return products;
        }

        let wanted = loose_key(query);

        self.categories
            .iter()
            .find(|c| loose_key(&c.name) == wanted)
            .map(Category::products)
            .unwrap_or_default()
    }

    /// Categories in catalog order.
    pub fn categories(&self) -> &[Category<'a>] {
        &self.categories
    }

    /// Iterate over every product in catalog order.
    pub fn products(&self) -> impl Iterator<Item = &Product<'a>> {
        self.categories
            .iter()
            .flat_map(|category| category.products.iter())
    }

    /// Number of products across all categories.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Check if the catalog has no products.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Currency every product is priced in.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }
}

fn loose_key(key: &str) -> String {
    key.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Upper-cases the first character of a category key ("snacks" -> "Snacks").
pub fn display_name(category: &str) -> String {
    let mut chars = category.chars();

    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
