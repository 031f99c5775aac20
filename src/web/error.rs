use axum::{
    extract::rejection::{BytesRejection, FormRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use strum_macros::AsRefStr;

use crate::provider_client;

use super::{routes::SubscribeError, types::DataParsingError};

pub type WebResult<T> = core::result::Result<T, Error>;

#[derive(Debug, AsRefStr, thiserror::Error)]
pub enum Error {
    #[error("content-type must be 'application/json', received: {0:?}")]
    ContentTypeInvalid(Option<String>),
    #[error("request body rejected with status {status}: {detail}")]
    BodyRejected { status: StatusCode, detail: String },

    #[error("data parsing error: {0}")]
    DataParsing(#[from] DataParsingError),
    #[error("subscribe error: {0}")]
    Subscribe(#[from] SubscribeError),

    #[error("templating error: {0}")]
    Tera(#[from] tera::Error),
}

impl Error {
    pub fn status_code_and_client_error(&self) -> (StatusCode, ClientError) {
        use ClientError::*;

        match self {
            Error::ContentTypeInvalid(_) => (StatusCode::BAD_REQUEST, ContentTypeInvalid),
            Error::BodyRejected { status, .. } => (*status, BodyUnreadable),
            Error::DataParsing(_) => (StatusCode::BAD_REQUEST, EmailFormatInvalid),
            Error::Subscribe(SubscribeError::DataParsing(_)) => {
                (StatusCode::BAD_REQUEST, EmailFormatInvalid)
            }
            Error::Subscribe(SubscribeError::Provider(provider_er)) => match provider_er {
                // 400 even though the server itself is misconfigured
                provider_client::Error::MissingApiKey => (StatusCode::BAD_REQUEST, ApiKeyNotFound),
                provider_client::Error::Rejected { .. } => {
                    (StatusCode::BAD_REQUEST, AddContactFailed)
                }
                _ => (StatusCode::INTERNAL_SERVER_ERROR, ServiceError),
            },
            _ => (StatusCode::INTERNAL_SERVER_ERROR, ServiceError),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        tracing::debug!("{:<12} - into_response(Error: {self:?})", "INTO_RESP");

        // Construct a response
        let mut res = StatusCode::INTERNAL_SERVER_ERROR.into_response();

        // Insert the Error into response so that it can be retrieved later.
        res.extensions_mut().insert(Arc::new(self));

        res
    }
}

impl From<BytesRejection> for Error {
    fn from(rejection: BytesRejection) -> Self {
        Error::BodyRejected {
            status: rejection.status(),
            detail: rejection.body_text(),
        }
    }
}

impl From<FormRejection> for Error {
    fn from(rejection: FormRejection) -> Self {
        Error::BodyRejected {
            status: rejection.status(),
            detail: rejection.body_text(),
        }
    }
}

/// The messages a client is allowed to see.
#[derive(Debug, AsRefStr, derive_more::Display)]
pub enum ClientError {
    #[display("Content-Type must be application/json")]
    ContentTypeInvalid,
    #[display("Request body could not be read")]
    BodyUnreadable,
    #[display("Invalid email format")]
    EmailFormatInvalid,
    #[display("API key not found")]
    ApiKeyNotFound,
    #[display("Failed to add contact")]
    AddContactFailed,
    #[display("An unexpected error occurred")]
    ServiceError,
}
