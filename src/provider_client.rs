use reqwest::{header, Client, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;

use crate::web::types::ValidEmail;

/// A thin client for the MailerLite subscribers API.
///
/// Only two endpoints are used:
/// - `GET  {url}subscribers/{email}` checks whether a subscriber exists
/// - `POST {url}subscribers` creates a subscriber inside of `group_id`
#[derive(Debug)]
pub struct ProviderClient {
    pub http_client: Client,
    pub url: reqwest::Url,
    pub group_id: String,
    api_key: Option<SecretString>,
}

impl ProviderClient {
    pub fn new<S: AsRef<str>>(
        url: S,
        group_id: String,
        api_key: Option<SecretString>,
        timeout: std::time::Duration,
    ) -> Result<Self> {
        let mut url =
            reqwest::Url::parse(url.as_ref()).map_err(|e| Error::UrlParsing(e.to_string()))?;
        // Without the trailing slash `join` would replace the last path segment.
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }

        let http_client = Client::builder().timeout(timeout).build()?;

        Ok(ProviderClient {
            http_client,
            url,
            group_id,
            api_key,
        })
    }

    pub fn api_key(&self) -> Result<&SecretString> {
        self.api_key.as_ref().ok_or(Error::MissingApiKey)
    }

    /// Returns `true` if the provider already knows the subscriber.
    /// Any non-2xx response means the subscriber is not known.
    pub async fn lookup_subscriber(&self, email: &ValidEmail) -> Result<bool> {
        let api_key = self.api_key()?;
        let mut url = self.subscribers_url()?;
        url.path_segments_mut()
            .map_err(|_| Error::UrlParsing("provider url cannot be a base".to_string()))?
            .push(email.as_ref());

        let resp = self
            .http_client
            .get(url)
            .header(header::ACCEPT, "application/json")
            .header(header::CONTENT_TYPE, "application/json")
            .bearer_auth(api_key.expose_secret())
            .send()
            .await?;

        tracing::debug!(status = %resp.status(), "subscriber lookup");

        Ok(resp.status().is_success())
    }

    /// Creates a subscriber in the configured group.
    /// Returns `Error::Rejected` containing the provider's response body on a non-2xx response.
    pub async fn create_subscriber(&self, email: &ValidEmail) -> Result<()> {
        let api_key = self.api_key()?;
        let url = self.subscribers_url()?;

        let new_subscriber = NewSubscriber {
            email: email.as_ref(),
            groups: [self.group_id.as_str()],
        };

        let resp = self
            .http_client
            .post(url)
            .header(header::ACCEPT, "application/json")
            .bearer_auth(api_key.expose_secret())
            .json(&new_subscriber)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp
                .text()
                .await
                .unwrap_or_else(|e| format!("<unreadable body: {e}>"));
            return Err(Error::Rejected { status, body });
        }

        Ok(())
    }

    fn subscribers_url(&self) -> Result<reqwest::Url> {
        self.url
            .join("subscribers")
            .map_err(|e| Error::UrlParsing(e.to_string()))
    }
}

#[derive(Serialize)]
pub struct NewSubscriber<'a> {
    pub email: &'a str,
    pub groups: [&'a str; 1],
}

// ###################################
// ->   ERROR & RESULT
// ###################################
pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("no provider api key configured")]
    MissingApiKey,
    #[error("provider rejected the request with status {status}: {body}")]
    Rejected { status: StatusCode, body: String },

    #[error("url parsing error: {0}")]
    UrlParsing(String),
    #[error("reqwest error: {0}")]
    Reqwest(#[from] reqwest::Error),
}
