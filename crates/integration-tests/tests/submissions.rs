//! Integration tests for the visitor submission form.

#![allow(clippy::unwrap_used)]

use m5_integration_tests::TestApp;
use reqwest::StatusCode;

#[tokio::test]
async fn test_submission_is_queued_not_published() {
    let app = TestApp::spawn().await;
    app.submit_product("Lumen Orb").await;

    assert!(!app.page("/").await.contains("Lumen Orb"));

    app.login().await;
    let body = app.page("/admin?tab=submissions").await;
    assert!(body.contains("Lumen Orb"));
    assert!(body.contains("zed@example.com"));
    assert!(body.contains("$49.50"));
    assert!(body.contains("Not provided"));
}

#[tokio::test]
async fn test_invalid_submission_keeps_input() {
    let app = TestApp::spawn().await;
    let resp = app
        .post_form(
            "/submit",
            &[
                ("name", "Lumen Orb"),
                ("description", "Glows"),
                ("price", "-3"),
                ("category", "design"),
                ("image", "https://example.com/orb.png"),
                ("creator", "Zed Labs"),
                ("email", "zed@example.com"),
            ],
        )
        .await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body = resp.text().await.unwrap();
    assert!(body.contains("notice-error"));
    assert!(body.contains(r#"value="Lumen Orb""#));
    assert!(!app.data_dir().join("m5-submissions").exists());
}

#[tokio::test]
async fn test_submission_survives_restart() {
    let app = TestApp::spawn().await;
    app.submit_product("Lumen Orb").await;

    let addr = app.restart().await;
    let body = app
        .client
        .post(format!("http://{addr}/admin/login"))
        .form(&[("password", "admin123")])
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(body.contains("Lumen Orb"));
}
