//! Integration tests for the M5 showcase.
//!
//! Each test spawns the showcase router on an ephemeral port, backed by a
//! fresh temporary data directory, and talks to it over HTTP with a
//! cookie-keeping client.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p m5-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `catalog` - Public catalog, filters, search and detail pages
//! - `submissions` - Visitor submission form
//! - `admin` - Login gate, product management, review, settings and data

use std::net::SocketAddr;
use std::path::Path;

use m5_core::DEFAULT_ADMIN_PASSWORD;
use m5_showcase::config::ShowcaseConfig;
use reqwest::{Client, Response, redirect};
use tempfile::TempDir;

/// A running showcase plus clients to talk to it.
pub struct TestApp {
    pub addr: SocketAddr,
    /// Follows redirects and keeps the session cookie.
    pub client: Client,
    /// Keeps the session cookie but returns redirects as-is.
    pub manual: Client,
    data_dir: TempDir,
}

impl TestApp {
    /// Start a showcase on a fresh data directory.
    ///
    /// # Panics
    ///
    /// Panics if the server cannot be started.
    #[allow(clippy::unwrap_used)]
    pub async fn spawn() -> Self {
        let data_dir = tempfile::tempdir().unwrap();
        let addr = serve(data_dir.path()).await;
        let jar = std::sync::Arc::new(reqwest::cookie::Jar::default());

        let client = Client::builder()
            .cookie_provider(jar.clone())
            .build()
            .unwrap();
        let manual = Client::builder()
            .cookie_provider(jar)
            .redirect(redirect::Policy::none())
            .build()
            .unwrap();

        Self {
            addr,
            client,
            manual,
            data_dir,
        }
    }

    /// Start a second showcase on the same data directory, as after a
    /// restart.
    pub async fn restart(&self) -> SocketAddr {
        serve(self.data_dir.path()).await
    }

    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }

    #[must_use]
    pub fn data_dir(&self) -> &Path {
        self.data_dir.path()
    }

    /// GET `path`, following redirects.
    ///
    /// # Panics
    ///
    /// Panics if the request fails.
    #[allow(clippy::unwrap_used)]
    pub async fn get(&self, path: &str) -> Response {
        self.client.get(self.url(path)).send().await.unwrap()
    }

    /// GET `path` and return the body text.
    ///
    /// # Panics
    ///
    /// Panics if the request fails.
    #[allow(clippy::unwrap_used)]
    pub async fn page(&self, path: &str) -> String {
        self.get(path).await.text().await.unwrap()
    }

    /// POST a form to `path`, following redirects.
    ///
    /// # Panics
    ///
    /// Panics if the request fails.
    #[allow(clippy::unwrap_used)]
    pub async fn post_form(&self, path: &str, fields: &[(&str, &str)]) -> Response {
        self.client
            .post(self.url(path))
            .form(fields)
            .send()
            .await
            .unwrap()
    }

    /// Log in with the default admin password.
    ///
    /// # Panics
    ///
    /// Panics if the login is not accepted.
    pub async fn login(&self) {
        self.login_with(DEFAULT_ADMIN_PASSWORD).await;
    }

    /// Log in with `password`.
    ///
    /// # Panics
    ///
    /// Panics if the login is not accepted.
    #[allow(clippy::unwrap_used)]
    pub async fn login_with(&self, password: &str) {
        let body = self
            .post_form("/admin/login", &[("password", password)])
            .await
            .text()
            .await
            .unwrap();
        assert!(body.contains("Admin access granted!"), "login failed: {body}");
    }

    /// Submit a valid product through the public form and return its id.
    ///
    /// # Panics
    ///
    /// Panics if the submission is not queued.
    #[allow(clippy::unwrap_used)]
    pub async fn submit_product(&self, name: &str) -> String {
        let resp = self
            .post_form(
                "/submit",
                &[
                    ("name", name),
                    ("description", "Glows in the dark"),
                    ("price", "49.5"),
                    ("category", "design"),
                    ("image", "https://example.com/orb.png"),
                    ("creator", "Zed Labs"),
                    ("email", "zed@example.com"),
                    ("phone", ""),
                    ("website", ""),
                ],
            )
            .await;
        let body = resp.text().await.unwrap();
        assert!(body.contains("Product submitted for review!"), "{body}");

        let raw = std::fs::read_to_string(self.data_dir().join("m5-submissions")).unwrap();
        let queue: serde_json::Value = serde_json::from_str(&raw).unwrap();
        queue
            .as_array()
            .unwrap()
            .iter()
            .find(|s| s["name"] == name)
            .and_then(|s| s["id"].as_str())
            .unwrap()
            .to_string()
    }
}

#[allow(clippy::unwrap_used)]
async fn serve(data_dir: &Path) -> SocketAddr {
    let mut config = ShowcaseConfig::from_lookup(|_| None).unwrap();
    config.data_dir = data_dir.to_path_buf();
    let state = m5_showcase::open_state(config).unwrap();

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, m5_showcase::app(state)).await.unwrap();
    });
    addr
}
