//! Tests whether the health check routes return an appropriate status code

use anyhow::Result;
use reqwest::StatusCode;

use crate::helpers::{TestApp, SUBSCRIBE_PATH};

#[tokio::test]
async fn healthcheck_ok() -> Result<()> {
    let app = TestApp::spawn().await?;

    let res = app.http_client.get(app.url("/health-check")).send().await?;

    assert!(res.status() == StatusCode::OK, "Healthcheck FAILED!");

    Ok(())
}

#[tokio::test]
async fn subscribe_get_returns_ok() -> Result<()> {
    let app = TestApp::spawn().await?;

    let res = app.http_client.get(app.url(SUBSCRIBE_PATH)).send().await?;

    assert_eq!(StatusCode::OK, res.status());
    assert_eq!("Ok", res.text().await?);

    Ok(())
}

#[tokio::test]
async fn responses_carry_a_request_id() -> Result<()> {
    let app = TestApp::spawn().await?;

    let res = app.http_client.get(app.url("/health-check")).send().await?;

    assert!(res.headers().contains_key("x-request-id"));

    Ok(())
}

#[tokio::test]
async fn invalid_path_404() -> Result<()> {
    let app = TestApp::spawn().await?;

    let res = app.http_client.get(app.url("/invalidpath")).send().await?;

    assert!(
        res.status() == StatusCode::NOT_FOUND,
        "Invalid Path check FAILED!, expected: {}, got: {}",
        404,
        res.status().as_u16()
    );

    Ok(())
}
