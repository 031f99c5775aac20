use axum::{
    extract::{rejection::FormRejection, State},
    http::StatusCode,
    response::Html,
    Form,
};

use crate::{
    web::{
        self,
        types::{FormStatus, FormSubscriber},
        WebResult,
    },
    AppState,
};

use super::api::subscribe::subscribe_raw_email;

pub async fn home(State(app_state): State<AppState>) -> WebResult<Html<String>> {
    let body = render_home(&app_state, &FormStatus::Idle)?;

    Ok(Html(body))
}

/// Fallback for the subscription form when scripts are disabled in the browser.
/// Runs the same flow as the JSON api and renders the outcome into the page.
#[tracing::instrument(name = "Subscribing from the form", skip_all)]
pub async fn home_subscribe(
    State(app_state): State<AppState>,
    form: Result<Form<FormSubscriber>, FormRejection>,
) -> WebResult<(StatusCode, Html<String>)> {
    let outcome = match form {
        Ok(Form(subscriber)) => subscribe_raw_email(&app_state, &subscriber.email)
            .await
            .map_err(web::Error::from),
        Err(rejection) => Err(web::Error::from(rejection)),
    };

    let (status_code, form_status) = match outcome {
        Ok(outcome) => (
            StatusCode::OK,
            FormStatus::Success(outcome.message().to_string()),
        ),
        Err(er) => {
            let (status_code, client_error) = er.status_code_and_client_error();
            (status_code, FormStatus::Error(client_error.to_string()))
        }
    };

    let body = render_home(&app_state, &form_status)?;

    Ok((status_code, Html(body)))
}

fn render_home(app_state: &AppState, form_status: &FormStatus) -> WebResult<String> {
    let mut ctx = tera::Context::new();
    ctx.insert("status", form_status);

    let body = app_state
        .templ_mgr
        .render_html_to_string(&ctx, "home.html")?;

    Ok(body)
}
