//! Application state shared across handlers.

use std::sync::{Arc, Mutex};

use crate::config::ShowcaseConfig;
use crate::error::AppError;
use crate::services::Showcase;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. The [`Showcase`] sits behind
/// a synchronous mutex; handlers reach it through [`AppState::with_showcase`]
/// so the guard never lives across an `.await`.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ShowcaseConfig,
    showcase: Mutex<Showcase>,
}

impl AppState {
    #[must_use]
    pub fn new(config: ShowcaseConfig, showcase: Showcase) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                showcase: Mutex::new(showcase),
            }),
        }
    }

    /// Get a reference to the showcase configuration.
    #[must_use]
    pub fn config(&self) -> &ShowcaseConfig {
        &self.inner.config
    }

    /// Run `f` with exclusive access to the showcase.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if a previous holder panicked.
    pub fn with_showcase<R>(&self, f: impl FnOnce(&mut Showcase) -> R) -> Result<R, AppError> {
        let mut showcase = self
            .inner
            .showcase
            .lock()
            .map_err(|_| AppError::Internal("showcase state lock poisoned".to_string()))?;
        Ok(f(&mut showcase))
    }
}
