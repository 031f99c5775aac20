use std::sync::Arc;

use axum::{
    http::{HeaderMap, Method, Uri},
    response::{IntoResponse, Response},
    Json,
};
use uuid::Uuid;

use crate::web::{log, types::ApiMessage, Error, REQUEST_ID_HEADER};

/// Maps every `web::Error` stored in the response extensions to a client facing
/// `{ "message": ... }` body and logs a single line per request.
/// The mapped response keeps the error in its extensions for the trace layer.
pub async fn response_mapper(
    req_method: Method,
    uri: Uri,
    req_headers: HeaderMap,
    resp: Response,
) -> Response {
    let uuid = req_headers
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| Uuid::parse_str(v).ok())
        .unwrap_or_else(Uuid::new_v4);

    let web_error = resp.extensions().get::<Arc<Error>>().cloned();
    let client_status_and_error = web_error
        .as_deref()
        .map(Error::status_code_and_client_error);

    let err_resp = web_error
        .as_ref()
        .zip(client_status_and_error.as_ref())
        .map(|(web_error, (status, cl_err))| {
            let client_error_body = ApiMessage::new(cl_err.to_string());
            let mut err_resp = (*status, Json(client_error_body)).into_response();
            err_resp.extensions_mut().insert(Arc::clone(web_error));
            err_resp
        });

    log::log_request(
        uuid,
        req_method,
        uri,
        resp.status(),
        web_error.as_deref(),
        client_status_and_error,
    );

    err_resp.unwrap_or(resp)
}
