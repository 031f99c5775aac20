use std::{sync::Arc, time::Duration};

use axum::{
    body::Body,
    extract::MatchedPath,
    http::{HeaderName, Request, Response},
    middleware, Router,
};
use tower::ServiceBuilder;
use tower_http::{
    classify::{ServerErrorsAsFailures, SharedClassifier},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::{MakeSpan, OnRequest, OnResponse, TraceLayer},
};
use tracing::Span;

use crate::{App, AppState};

use super::{midware, routes::routes, Error, REQUEST_ID_HEADER};

/// The core async function returning a future that will serve this application.
///
/// Accepts an `App` (bound `TcpListener` + `AppState`) and sets up a TraceLayer that provides console logging.
///
/// Might return an IO error from `axum::serve`
pub async fn serve(app: App) -> std::io::Result<()> {
    let App {
        app_state,
        listener,
    } = app;

    axum::serve(listener, router(app_state)).await?;

    Ok(())
}

/// All the routes wrapped in the request id, tracing and response mapping layers.
pub fn router(app_state: AppState) -> Router {
    let x_request_id: HeaderName = HeaderName::from_static(REQUEST_ID_HEADER);

    let trace_layer = build_trace_layer();

    routes(app_state).layer(
        ServiceBuilder::new()
            // Every request gets a UUID before it reaches the trace span
            .layer(SetRequestIdLayer::new(
                x_request_id.clone(),
                MakeRequestUuid,
            ))
            .layer(trace_layer)
            // Responses travel the stack bottom-up, so the trace layer logs the mapped status code.
            .layer(middleware::map_response(midware::response_mapper))
            // Copies the request UUID onto the response
            .layer(PropagateRequestIdLayer::new(x_request_id)),
    )
}

/// Sets up the `tower_http::TraceLayer`.
///
/// Every request span carries the request id and the matched route. The kind of a
/// `web::Error` left in the response extensions by `response_mapper` is recorded as
/// `error_kind` once the response is known.
fn build_trace_layer() -> TraceLayer<
    SharedClassifier<ServerErrorsAsFailures>,
    impl MakeSpan<Body> + Clone,
    impl OnRequest<Body> + Clone,
    impl OnResponse<Body> + Clone,
> {
    TraceLayer::new_for_http()
        .make_span_with(|req: &Request<Body>| {
            let uuid = req
                .headers()
                .get(REQUEST_ID_HEADER)
                .and_then(|uuid| uuid.to_str().ok());
            // Unmatched requests have no route, only a path.
            let route = req.extensions().get::<MatchedPath>().map(MatchedPath::as_str);

            tracing::error_span!(
                "request",
                id = uuid,
                method = %req.method(),
                route,
                path = req.uri().path(),
                error_kind = tracing::field::Empty
            )
        })
        .on_request(|req: &Request<Body>, _s: &Span| {
            tracing::debug!("{:<12} - {} {}", "REQUEST", req.method(), req.uri())
        })
        .on_response(|res: &Response<Body>, latency: Duration, span: &Span| {
            let status = res.status();
            if let Some(error) = res.extensions().get::<Arc<Error>>() {
                let kind: &str = (**error).as_ref();
                span.record("error_kind", kind);
            }

            if status.is_server_error() {
                tracing::error!(%status, ?latency, "{:<12} - request failed", "RESPONSE")
            } else if status.is_client_error() {
                tracing::warn!(%status, ?latency, "{:<12} - request rejected", "RESPONSE")
            } else {
                tracing::info!(%status, ?latency, "{:<12} - request served", "RESPONSE")
            }
        })
}
