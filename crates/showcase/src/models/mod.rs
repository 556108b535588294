//! Session-scoped models for the showcase.

pub mod notice;
pub mod session;

pub use notice::{Notice, NoticeLevel};
pub use session::{AdminSession, AuthError, keys as session_keys};
