use anyhow::Result;
use wiremock::{
    matchers::{any, method},
    Mock, ResponseTemplate,
};

use crate::helpers::TestApp;

#[tokio::test]
async fn home_renders_the_subscription_form() -> Result<()> {
    let app = TestApp::spawn().await?;

    let res = app.http_client.get(app.url("/")).send().await?;
    assert_eq!(200, res.status().as_u16());

    let page = res.text().await?;
    assert!(page.contains(r#"id="subscribe-form""#));
    assert!(page.contains(r#"type="email""#));
    assert!(page.contains(r#"type="checkbox" checked required"#));
    assert!(page.contains("/api/subscribe.json"));
    assert!(page.contains(r#"role="status" hidden"#));

    Ok(())
}

#[tokio::test]
async fn form_invalid_email_renders_only_the_error() -> Result<()> {
    let app = TestApp::spawn().await?;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.provider_server)
        .await;

    let res = app.post_form("not an email").await?;
    assert_eq!(400, res.status().as_u16());

    let page = res.text().await?;
    assert!(page.contains(r#"class="status status-error" role="status">Invalid email format</p>"#));
    assert!(!page.contains("status-success\""));

    Ok(())
}

#[tokio::test]
async fn form_new_email_renders_only_the_success() -> Result<()> {
    let app = TestApp::spawn().await?;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&app.provider_server)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&app.provider_server)
        .await;

    let res = app.post_form("ursula@domain.com").await?;
    assert_eq!(200, res.status().as_u16());

    let page = res.text().await?;
    assert!(page.contains("🎉 ¡Te has suscrito exitosamente!"));
    assert!(!page.contains("status-error\""));

    Ok(())
}

#[tokio::test]
async fn form_without_api_key_renders_the_error() -> Result<()> {
    let app = TestApp::spawn_with_api_key(None).await?;

    let res = app.post_form("ursula@domain.com").await?;
    assert_eq!(400, res.status().as_u16());

    let page = res.text().await?;
    assert!(page.contains(">API key not found</p>"));

    Ok(())
}

#[tokio::test]
async fn form_unreadable_body_renders_the_error() -> Result<()> {
    let app = TestApp::spawn().await?;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.provider_server)
        .await;

    let res = app
        .post_form_raw("text/plain", "email=ursula@domain.com")
        .await?;
    assert_eq!(415, res.status().as_u16());
    assert!(res
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("text/html")));

    let page = res.text().await?;
    assert!(page.contains(
        r#"class="status status-error" role="status">Request body could not be read</p>"#
    ));
    assert!(!page.contains("status-success\""));

    Ok(())
}
