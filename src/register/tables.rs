//! Terminal tables

use tabled::{
    builder::Builder,
    settings::{Alignment, Style, object::Columns},
};

use crate::{
    cart::Cart,
    catalog::Catalog,
    pricing::{PricingError, Totals, display_amount},
    products::Product,
};

/// Category names with their product counts.
pub fn categories_table(catalog: &Catalog<'_>) -> String {
    let mut builder = Builder::default();

    builder.push_record(["Category", "Key", "Products"]);

    for category in catalog.categories() {
        builder.push_record([
            category.display_name(),
            category.name().to_string(),
            category.products().len().to_string(),
        ]);
    }

    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Columns::new(2..3), Alignment::right());

    table.to_string()
}

/// Product ids, names and prices.
pub fn products_table(symbol: &str, products: &[Product<'_>]) -> String {
    let mut builder = Builder::default();

    builder.push_record(["ID", "Product", "Price"]);

    for product in products {
        builder.push_record([
            product.id.to_string(),
            product.name.clone(),
            display_amount(symbol, &product.price),
        ]);
    }

    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Columns::new(0..1), Alignment::right());
    table.modify(Columns::new(2..3), Alignment::right());

    table.to_string()
}

/// Numbered cart lines followed by the subtotal, VAT and total.
///
/// # Errors
///
/// Returns [`PricingError::Overflow`] if a line total does not fit in minor units.
pub fn cart_table(
    symbol: &str,
    cart: &Cart<'_>,
    totals: &Totals<'_>,
) -> Result<String, PricingError> {
    let mut builder = Builder::default();

    builder.push_record(["#", "Item", "Qty", "Price", "Total"]);

    for (number, line) in (1..).zip(cart.iter()) {
        let line_total = line.line_total()?;

        builder.push_record([
            number.to_string(),
            line.name().to_string(),
            line.quantity().to_string(),
            display_amount(symbol, line.unit_price()),
            display_amount(symbol, &line_total),
        ]);
    }

    let vat_label = format!("VAT ({}%)", totals.vat_points());

    for (label, amount) in [
        ("Subtotal", totals.subtotal()),
        (vat_label.as_str(), totals.tax()),
        ("Total", totals.total()),
    ] {
        builder.push_record([
            String::new(),
            label.to_string(),
            String::new(),
            String::new(),
            display_amount(symbol, &amount),
        ]);
    }

    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Columns::new(2..5), Alignment::right());

    Ok(table.to_string())
}
