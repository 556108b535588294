//! Public catalog route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Path, Query, State};
use m5_core::{Category, CategoryFilter, ProductId};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use super::{Chrome, ChoiceView};
use crate::error::{AppError, Result};
use crate::state::AppState;
use crate::view::{
    CatalogListing, CatalogQuery, CatalogStats, ProductCard, render_catalog, render_stats,
};

/// Catalog query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct CatalogParams {
    pub filter: Option<String>,
    pub q: Option<String>,
}

impl CatalogParams {
    fn query(&self) -> CatalogQuery {
        CatalogQuery::from_params(self.filter.as_deref(), self.q.as_deref())
    }
}

// =============================================================================
// Templates
// =============================================================================

/// Catalog page template.
#[derive(Template, WebTemplate)]
#[template(path = "catalog/index.html")]
pub struct CatalogTemplate {
    pub chrome: Chrome,
    pub stats: CatalogStats,
    pub filters: Vec<ChoiceView>,
    pub filter: &'static str,
    pub search: String,
    pub listing: CatalogListing,
}

/// Catalog grid fragment, swapped in by HTMX on every search keystroke.
#[derive(Template, WebTemplate)]
#[template(path = "catalog/_grid.html")]
pub struct GridTemplate {
    pub listing: CatalogListing,
}

/// Product detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "catalog/show.html")]
pub struct ProductTemplate {
    pub chrome: Chrome,
    pub product: ProductCard,
    pub creator: String,
}

/// Filter buttons, `all` first.
fn filter_choices(active: CategoryFilter) -> Vec<ChoiceView> {
    let all = ChoiceView {
        value: CategoryFilter::ALL_SENTINEL,
        label: "All",
        selected: active == CategoryFilter::All,
    };
    std::iter::once(all)
        .chain(Category::ALL.iter().map(|&c| ChoiceView {
            value: c.as_str(),
            label: c.label(),
            selected: active == CategoryFilter::Only(c),
        }))
        .collect()
}

// =============================================================================
// Handlers
// =============================================================================

/// Catalog page with hero statistics, filters and search.
#[instrument(skip(state, session))]
pub async fn index(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<CatalogParams>,
) -> Result<CatalogTemplate> {
    let query = params.query();
    let (listing, stats) =
        state.with_showcase(|s| (render_catalog(s.catalog(), &query), render_stats(s.catalog())))?;

    Ok(CatalogTemplate {
        chrome: Chrome::load(&state, &session).await?,
        stats,
        filters: filter_choices(query.filter),
        filter: query.filter.as_str(),
        search: params.q.unwrap_or_default(),
        listing,
    })
}

/// Catalog grid fragment.
#[instrument(skip(state))]
pub async fn grid(
    State(state): State<AppState>,
    Query(params): Query<CatalogParams>,
) -> Result<GridTemplate> {
    let query = params.query();
    let listing = state.with_showcase(|s| render_catalog(s.catalog(), &query))?;
    Ok(GridTemplate { listing })
}

/// Product detail page.
#[instrument(skip(state, session))]
pub async fn show(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
) -> Result<ProductTemplate> {
    let id = ProductId::new(id);
    let product = state
        .with_showcase(|s| s.catalog().get(&id).cloned())?
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;

    Ok(ProductTemplate {
        chrome: Chrome::load(&state, &session).await?,
        product: ProductCard::from(&product),
        creator: product.creator,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_choices() {
        let choices = filter_choices(CategoryFilter::Only(Category::Tech));
        let values: Vec<_> = choices.iter().map(|c| c.value).collect();
        assert_eq!(values, ["all", "tech", "innovation", "design"]);
        assert!(choices[1].selected);
        assert!(!choices[0].selected);
    }
}
