//! Published catalog product.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::validation::{required, required_text};
use super::{Category, ImageUrl, Price, ProductId, SearchTerm, ValidationError};

/// A product in the public catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    #[serde(deserialize_with = "required_text")]
    pub name: String,
    #[serde(deserialize_with = "required_text")]
    pub description: String,
    pub price: Price,
    pub category: Category,
    pub image: ImageUrl,
    #[serde(deserialize_with = "required_text")]
    pub creator: String,
    pub date_added: DateTime<Utc>,
}

impl Product {
    /// Replace every editable field with the draft's values.
    ///
    /// `id` and `date_added` are kept.
    pub fn apply(&mut self, draft: ProductDraft) {
        self.name = draft.name;
        self.description = draft.description;
        self.price = draft.price;
        self.category = draft.category;
        self.image = draft.image;
        self.creator = draft.creator;
    }

    /// Editable fields as a draft, e.g. to prefill an edit form.
    #[must_use]
    pub fn to_draft(&self) -> ProductDraft {
        ProductDraft {
            name: self.name.clone(),
            description: self.description.clone(),
            price: self.price,
            category: self.category,
            image: self.image.clone(),
            creator: self.creator.clone(),
        }
    }

    /// Whether the search term occurs in the name, description or creator.
    #[must_use]
    pub fn matches_search(&self, term: &SearchTerm) -> bool {
        term.matches_any(&[&self.name, &self.description, &self.creator])
    }
}

/// Raw product fields as captured by a form.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductInput {
    pub name: String,
    pub description: String,
    pub price: String,
    pub category: String,
    pub image: String,
    pub creator: String,
}

/// Validated product fields, ready to become a [`Product`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductDraft {
    pub name: String,
    pub description: String,
    pub price: Price,
    pub category: Category,
    pub image: ImageUrl,
    pub creator: String,
}

impl ProductDraft {
    /// Validate raw product input.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] for the first field that is blank or
    /// malformed, checked in form order.
    pub fn parse(input: &ProductInput) -> Result<Self, ValidationError> {
        Ok(Self {
            name: required("name", &input.name)?,
            description: required("description", &input.description)?,
            price: Price::parse(&input.price)?,
            category: input.category.parse::<Category>()?,
            image: ImageUrl::parse(&input.image)?,
            creator: required("creator", &input.creator)?,
        })
    }

    /// Build the product with its identity and creation time.
    #[must_use]
    pub fn into_product(self, id: ProductId, date_added: DateTime<Utc>) -> Product {
        Product {
            id,
            name: self.name,
            description: self.description,
            price: self.price,
            category: self.category,
            image: self.image,
            creator: self.creator,
            date_added,
        }
    }
}

impl ProductInput {
    /// Form values for an existing draft (edit forms).
    #[must_use]
    pub fn from_draft(draft: &ProductDraft) -> Self {
        Self {
            name: draft.name.clone(),
            description: draft.description.clone(),
            price: draft.price.amount().to_string(),
            category: draft.category.as_str().to_owned(),
            image: draft.image.to_string(),
            creator: draft.creator.clone(),
        }
    }
}
