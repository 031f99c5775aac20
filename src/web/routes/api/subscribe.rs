use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::{header, HeaderMap, StatusCode},
    Json,
};
use tracing::{error, info};

use crate::{
    provider_client,
    web::{
        self,
        types::{ApiMessage, DataParsingError, SubscribeOutcome, SubscribeRequest, ValidEmail},
        WebResult,
    },
    AppState,
};

// ###################################
// ->   ERROR
// ###################################
#[derive(Debug, thiserror::Error)]
pub enum SubscribeError {
    #[error("data parsing error: {0}")]
    DataParsing(#[from] DataParsingError),
    #[error("provider error: {0}")]
    Provider(#[from] provider_client::Error),
}

// ###################################
// ->   API
// ###################################
pub async fn subscribe_health() -> &'static str {
    "Ok"
}

#[tracing::instrument(name = "Subscribing a new email", skip_all)]
pub async fn subscribe(
    State(app_state): State<AppState>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> WebResult<(StatusCode, Json<ApiMessage>)> {
    check_json_content_type(&headers)?;
    let body = body?;

    let subscribe_request = SubscribeRequest::from_slice(&body)?;
    let outcome = subscribe_email(&app_state, subscribe_request.valid_email()?).await?;

    Ok((StatusCode::OK, Json(outcome.into())))
}

/// Validates the raw email before subscribing it. Used by the subscription form.
pub async fn subscribe_raw_email(
    app_state: &AppState,
    email: &str,
) -> Result<SubscribeOutcome, SubscribeError> {
    let email = ValidEmail::parse(email)?;
    subscribe_email(app_state, email).await
}

/// Lookup first, create only if the lookup was not a success.
#[tracing::instrument(
    name = "Forwarding subscriber to the provider",
    skip_all,
    fields(subscriber_email = %email)
)]
async fn subscribe_email(
    app_state: &AppState,
    email: ValidEmail,
) -> Result<SubscribeOutcome, SubscribeError> {
    let provider = &app_state.provider_client;

    if let Err(er) = provider.api_key() {
        error!("no provider api key defined");
        return Err(er.into());
    }

    let outcome = match provider.lookup_subscriber(&email).await {
        Ok(true) => SubscribeOutcome::AlreadySubscribed,
        Ok(false) => match provider.create_subscriber(&email).await {
            Ok(()) => {
                info!("contact added successfully");
                SubscribeOutcome::Subscribed
            }
            Err(er) => {
                if let provider_client::Error::Rejected { status, body } = &er {
                    error!(%status, provider_response = %body, "failed to add contact");
                } else {
                    error!(error = %er, "an unexpected error occurred");
                }
                return Err(er.into());
            }
        },
        Err(er) => {
            error!(error = %er, "an unexpected error occurred");
            return Err(er.into());
        }
    };

    info!(?outcome, "subscription handled");
    Ok(outcome)
}

// ###################################
// ->   HELPERS
// ###################################
/// Only `application/json` bodies are accepted. Media type parameters (`; charset=utf-8`) are ignored.
fn check_json_content_type(headers: &HeaderMap) -> Result<(), web::Error> {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok());

    let is_json = content_type
        .and_then(|value| value.split(';').next())
        .is_some_and(|mime| mime.trim().eq_ignore_ascii_case("application/json"));

    if is_json {
        Ok(())
    } else {
        Err(web::Error::ContentTypeInvalid(
            content_type.map(ToString::to_string),
        ))
    }
}
