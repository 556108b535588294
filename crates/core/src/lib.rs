//! M5 Core - Shared types library.
//!
//! This crate provides the record and value types used across all M5
//! components:
//! - `showcase` - Public catalog, submission form and admin panel
//! - `cli` - Command-line tools for store management
//!
//! # Architecture
//!
//! The core crate contains only types and validation - no I/O, no storage,
//! no HTTP. Raw input (form fields, CLI arguments) is turned into typed
//! drafts here, so everything downstream can assume well-formed records.
//!
//! # Modules
//!
//! - [`types`] - Ids, prices, categories, emails, credentials and the
//!   product, submission and settings records

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
