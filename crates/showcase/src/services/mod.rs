//! Business logic for the showcase.
//!
//! # Services
//!
//! - `catalog` - Published products: create, filtered read, update, delete
//! - `submissions` - Visitor submissions: create, approve, reject, list
//! - `app` - [`Showcase`], the application state owning both collections,
//!   the settings, the admin credential and the store they persist to
//! - `export` - JSON bundle export and import

pub mod app;
pub mod catalog;
pub mod export;
pub mod submissions;

pub use app::{PersistError, Showcase};
pub use catalog::Catalog;
pub use export::{ExportBundle, ImportError};
pub use submissions::SubmissionQueue;
