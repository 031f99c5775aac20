//! Most of the structs in `web` module and their implementations live here.
//! Includes structs that need to be validated, their parsing implementations and tests for those

use lazy_regex::regex_is_match;
use serde::{Deserialize, Serialize};

// ###################################
// ->   STRUCTS
// ###################################
/// Deserializable subscription request body.
/// The email is kept as a raw `Value` so that a missing or non-string field
/// fails email validation instead of deserialization.
#[derive(Debug, Deserialize)]
pub struct SubscribeRequest {
    #[serde(default)]
    pub email: serde_json::Value,
}

impl SubscribeRequest {
    /// Parses a request body. Malformed JSON counts as an invalid email.
    pub fn from_slice(body: &[u8]) -> Result<Self, DataParsingError> {
        serde_json::from_slice(body).map_err(|_| DataParsingError::EmailInvalid)
    }

    pub fn valid_email(&self) -> Result<ValidEmail, DataParsingError> {
        match &self.email {
            serde_json::Value::String(email) => ValidEmail::parse(email),
            _ => Err(DataParsingError::EmailInvalid),
        }
    }
}

/// Urlencoded body posted by the subscription form when scripts are disabled.
/// The consent checkbox is enforced by the browser and not read here.
#[derive(Debug, Deserialize)]
pub struct FormSubscriber {
    #[serde(default)]
    pub email: String,
}

/// Email with a non-whitespace local part, an `@` and a domain containing a dot.
#[derive(Debug, Clone)]
pub struct ValidEmail(String);

impl AsRef<str> for ValidEmail {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ValidEmail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl ValidEmail {
    pub fn parse<S>(value: S) -> Result<Self, DataParsingError>
    where
        S: AsRef<str>,
    {
        let value = value.as_ref();

        if regex_is_match!(r"^[^\s@]+@[^\s@]+\.[^\s@]+$", value) {
            Ok(ValidEmail(value.to_owned()))
        } else {
            Err(DataParsingError::EmailInvalid)
        }
    }
}

/// The two successful ways a subscription can end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubscribeOutcome {
    AlreadySubscribed,
    Subscribed,
}

impl SubscribeOutcome {
    pub fn message(&self) -> &'static str {
        match self {
            SubscribeOutcome::AlreadySubscribed => "Ya estabas suscrito al Newsletter",
            SubscribeOutcome::Subscribed => "¡Te has suscrito exitosamente!",
        }
    }
}

/// JSON body of every `/api/subscribe.json` response.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiMessage {
    pub message: String,
}

impl ApiMessage {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<SubscribeOutcome> for ApiMessage {
    fn from(outcome: SubscribeOutcome) -> Self {
        ApiMessage::new(outcome.message())
    }
}

/// What the subscription form currently displays.
/// Being a single enum the form can never show an error and a success at the same time.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "kind", content = "message", rename_all = "snake_case")]
pub enum FormStatus {
    Idle,
    Error(String),
    Success(String),
}

// ###################################
// ->   ERROR
// ###################################
#[derive(Debug, thiserror::Error)]
pub enum DataParsingError {
    #[error("email invalid")]
    EmailInvalid,
}
