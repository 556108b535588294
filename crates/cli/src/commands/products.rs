//! Product listing.

use std::io::Write;

use m5_core::{Category, CategoryFilter};
use m5_showcase::services::Showcase;
use m5_showcase::view::{CatalogListing, CatalogQuery, render_catalog};

use super::CliError;

/// Print matching products, one tab-separated line each.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn list(
    showcase: &Showcase,
    category: Option<Category>,
    search: Option<&str>,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let query = CatalogQuery {
        filter: category.map_or(CategoryFilter::All, CategoryFilter::Only),
        ..CatalogQuery::from_params(None, search)
    };

    match render_catalog(showcase.catalog(), &query) {
        CatalogListing::Products(cards) => {
            for card in cards {
                writeln!(
                    out,
                    "{}\t{}\t{}\t{}\t{}",
                    card.id, card.name, card.price, card.category, card.byline
                )?;
            }
        }
        CatalogListing::Empty(placeholder) => {
            writeln!(out, "{}. {}", placeholder.headline, placeholder.hint)?;
        }
    }
    Ok(())
}
