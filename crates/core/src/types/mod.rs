//! Core types for M5.
//!
//! This module provides type-safe wrappers for the showcase's domain
//! concepts and the records built from them.

pub mod category;
pub mod credential;
pub mod email;
pub mod id;
pub mod image;
pub mod price;
pub mod product;
pub mod search;
pub mod settings;
pub mod status;
pub mod submission;
pub mod validation;

pub use category::{Category, CategoryError, CategoryFilter};
pub use credential::{AdminPassword, CredentialError, DEFAULT_ADMIN_PASSWORD};
pub use email::{Email, EmailError};
pub use id::*;
pub use image::{ImageUrl, ImageUrlError};
pub use price::{Price, PriceError};
pub use product::{Product, ProductDraft, ProductInput};
pub use search::SearchTerm;
pub use settings::{SettingsInput, SiteSettings};
pub use status::SubmissionStatus;
pub use submission::{Submission, SubmissionDraft, SubmissionInput};
pub use validation::ValidationError;
