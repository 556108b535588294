//! Pure rendering of showcase state into display models.
//!
//! Everything here is a function of its inputs: the same catalog and query
//! always produce equal output. Templates only format what these types hold.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use base64::{Engine, engine::general_purpose::STANDARD};
use chrono::{DateTime, Utc};
use m5_core::{Category, CategoryFilter, Product, SearchTerm, Submission};

use crate::services::Catalog;

const PLACEHOLDER_SVG: &str = concat!(
    r##"<svg width="300" height="200" xmlns="http://www.w3.org/2000/svg">"##,
    r##"<rect width="100%" height="100%" fill="#333"/>"##,
    r##"<text x="50%" y="50%" font-family="Arial" font-size="14" fill="#999" "##,
    r##"text-anchor="middle" dy=".3em">Image not found</text></svg>"##,
);

/// Inline image shown when a product image fails to load.
pub static PLACEHOLDER_IMAGE_URI: LazyLock<String> = LazyLock::new(|| {
    format!(
        "data:image/svg+xml;base64,{}",
        STANDARD.encode(PLACEHOLDER_SVG)
    )
});

const NOT_PROVIDED: &str = "Not provided";

/// Category filter plus free-text search, as entered on the catalog page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogQuery {
    pub filter: CategoryFilter,
    pub search: SearchTerm,
}

impl CatalogQuery {
    /// Build a query from raw parameters.
    ///
    /// An unknown or missing filter reads as `all`.
    #[must_use]
    pub fn from_params(filter: Option<&str>, search: Option<&str>) -> Self {
        Self {
            filter: filter
                .and_then(|f| f.parse().ok())
                .unwrap_or_default(),
            search: SearchTerm::new(search.unwrap_or_default()),
        }
    }
}

/// The "no results" message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placeholder {
    pub headline: &'static str,
    pub hint: &'static str,
}

pub const NO_PRODUCTS_FOUND: Placeholder = Placeholder {
    headline: "No products found",
    hint: "Try adjusting your search or filter criteria.",
};

/// A product as displayed in the catalog grid and on the detail page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductCard {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: String,
    pub category: &'static str,
    pub byline: String,
    pub image: String,
    pub fallback_image: &'static str,
}

impl From<&Product> for ProductCard {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.to_string(),
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price.to_string(),
            category: product.category.label(),
            byline: format!("by {}", product.creator),
            image: product.image.to_string(),
            fallback_image: PLACEHOLDER_IMAGE_URI.as_str(),
        }
    }
}

/// Result of rendering the catalog for a query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogListing {
    Products(Vec<ProductCard>),
    Empty(Placeholder),
}

impl CatalogListing {
    /// Cards to show; empty when the placeholder is shown instead.
    #[must_use]
    pub fn cards(&self) -> &[ProductCard] {
        match self {
            Self::Products(cards) => cards,
            Self::Empty(_) => &[],
        }
    }

    #[must_use]
    pub const fn placeholder(&self) -> Option<&Placeholder> {
        match self {
            Self::Products(_) => None,
            Self::Empty(placeholder) => Some(placeholder),
        }
    }
}

/// Render the products matching `query`, in catalog order.
#[must_use]
pub fn render_catalog(catalog: &Catalog, query: &CatalogQuery) -> CatalogListing {
    let cards: Vec<_> = catalog
        .read(query.filter, &query.search)
        .map(ProductCard::from)
        .collect();
    if cards.is_empty() {
        CatalogListing::Empty(NO_PRODUCTS_FOUND)
    } else {
        CatalogListing::Products(cards)
    }
}

/// Headline numbers for the hero section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogStats {
    pub products: usize,
    pub creators: usize,
    pub innovations: usize,
}

#[must_use]
pub fn render_stats(catalog: &Catalog) -> CatalogStats {
    let products = catalog.all();
    CatalogStats {
        products: products.len(),
        creators: products
            .iter()
            .map(|p| p.creator.as_str())
            .collect::<BTreeSet<_>>()
            .len(),
        innovations: products
            .iter()
            .filter(|p| p.category == Category::Innovation)
            .count(),
    }
}

/// One line in the admin product list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminProductRow {
    pub id: String,
    pub name: String,
    /// `by <creator> • $<price> • <Category>`
    pub summary: String,
}

#[must_use]
pub fn render_admin_products(catalog: &Catalog) -> Vec<AdminProductRow> {
    catalog
        .all()
        .iter()
        .map(|p| AdminProductRow {
            id: p.id.to_string(),
            name: p.name.clone(),
            summary: format!("by {} • {} • {}", p.creator, p.price, p.category.label()),
        })
        .collect()
}

/// One pending submission in the admin review list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionRow {
    pub id: String,
    pub name: String,
    pub creator: String,
    pub email: String,
    pub phone: String,
    pub website: String,
    pub price: String,
    pub category: &'static str,
    pub description: String,
    pub image: String,
    pub submitted: String,
}

#[must_use]
pub fn render_submissions(submissions: &[Submission]) -> Vec<SubmissionRow> {
    submissions
        .iter()
        .map(|s| SubmissionRow {
            id: s.id.to_string(),
            name: s.name.clone(),
            creator: s.creator.clone(),
            email: s.email.to_string(),
            phone: s.phone.clone().unwrap_or_else(|| NOT_PROVIDED.to_owned()),
            website: s.website.clone().unwrap_or_else(|| NOT_PROVIDED.to_owned()),
            price: s.price.to_string(),
            category: s.category.label(),
            description: s.description.clone(),
            image: s.image.to_string(),
            submitted: format_date(s.date_submitted),
        })
        .collect()
}

/// Calendar date as `M/D/YYYY`.
#[must_use]
pub fn format_date(at: DateTime<Utc>) -> String {
    at.format("%-m/%-d/%Y").to_string()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::services::SubmissionQueue;
    use crate::services::catalog::tests::draft;
    use crate::services::submissions::tests::draft as submission_draft;

    fn sample() -> Catalog {
        Catalog::sample(Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap())
    }

    #[test]
    fn test_placeholder_uri_decodes_to_svg() {
        let encoded = PLACEHOLDER_IMAGE_URI
            .strip_prefix("data:image/svg+xml;base64,")
            .unwrap();
        let svg = String::from_utf8(STANDARD.decode(encoded).unwrap()).unwrap();
        assert!(svg.contains("Image not found"));
    }

    #[test]
    fn test_render_sample_catalog() {
        let listing = render_catalog(&sample(), &CatalogQuery::default());
        let cards = listing.cards();
        assert_eq!(cards.len(), 3);
        assert_eq!(cards[0].name, "Quantum Display Pro");
        assert_eq!(cards[0].price, "$2999.99");
        assert_eq!(cards[0].category, "Tech");
        assert!(cards[0].byline.starts_with("by "));
        assert!(listing.placeholder().is_none());
    }

    #[test]
    fn test_render_no_match_shows_placeholder() {
        let query = CatalogQuery::from_params(Some("design"), Some("neural"));
        let listing = render_catalog(&sample(), &query);
        assert!(listing.cards().is_empty());
        assert_eq!(listing.placeholder(), Some(&NO_PRODUCTS_FOUND));
    }

    #[test]
    fn test_render_is_deterministic() {
        let catalog = sample();
        let query = CatalogQuery::from_params(Some("all"), Some("  THE "));
        assert_eq!(
            render_catalog(&catalog, &query),
            render_catalog(&catalog, &query)
        );
    }

    #[test]
    fn test_unknown_filter_reads_as_all() {
        let query = CatalogQuery::from_params(Some("gadgets"), None);
        assert_eq!(query.filter, CategoryFilter::All);
        assert!(query.search.is_empty());
    }

    #[test]
    fn test_stats_count_distinct_creators() {
        let mut catalog = sample();
        let now = Utc::now();
        catalog.create(draft("A", "innovation", "Zed"), now);
        catalog.create(draft("B", "tech", "Zed"), now);

        assert_eq!(
            render_stats(&catalog),
            CatalogStats {
                products: 5,
                creators: 4,
                innovations: 2,
            }
        );
    }

    #[test]
    fn test_admin_rows_summarize_products() {
        let rows = render_admin_products(&sample());
        assert_eq!(rows[2].summary, "by FutureFurniture Co. • $2499.99 • Design");
    }

    #[test]
    fn test_submission_rows_fill_missing_contact() {
        let mut queue = SubmissionQueue::default();
        let at = Utc.with_ymd_and_hms(2025, 3, 9, 12, 0, 0).unwrap();
        queue.create(submission_draft("Idea"), at);

        let rows = render_submissions(queue.list());
        assert_eq!(rows[0].phone, "Not provided");
        assert_eq!(rows[0].website, "https://ada.dev");
        assert_eq!(rows[0].submitted, "3/9/2025");
        assert_eq!(rows[0].price, "$49.50");
    }
}
