//! Contact form submission

use askama::Template;
use axum::extract::{Form, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{Html, IntoResponse, Redirect, Response};
use serde::Deserialize;
use tracing::info;

use packstring_db::NewInquiry;

use super::SiteResult;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ContactForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub trip_type: String,
    #[serde(default)]
    pub dates: String,
    #[serde(default)]
    pub party_size: String,
    #[serde(default)]
    pub experience: String,
    #[serde(default)]
    pub message: String,
}

#[derive(Template)]
#[template(path = "fragments/contact_success.html")]
struct ContactSuccessTemplate {
    name: String,
}

#[derive(Template)]
#[template(path = "fragments/contact_error.html")]
struct ContactErrorTemplate {
    error: &'static str,
}

fn validate(form: &ContactForm) -> Option<&'static str> {
    if form.name.trim().is_empty() {
        return Some("Please tell us your name.");
    }
    let email = form.email.trim();
    if email.is_empty() || !email.contains('@') {
        return Some("Please enter a valid email address.");
    }
    None
}

fn is_htmx(headers: &HeaderMap) -> bool {
    headers.contains_key("hx-request")
}

pub async fn submit(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<ContactForm>,
) -> SiteResult<Response> {
    if let Some(error) = validate(&form) {
        // htmx swaps the error into the result slot; a plain form post
        // just gets the status code.
        if is_htmx(&headers) {
            let body = ContactErrorTemplate { error }.render().unwrap();
            return Ok(Html(body).into_response());
        }
        return Ok((StatusCode::UNPROCESSABLE_ENTITY, error).into_response());
    }

    let inquiry = NewInquiry {
        name: form.name.trim().to_string(),
        email: form.email.trim().to_string(),
        phone: form.phone.trim().to_string(),
        trip_slug: form.trip_type.clone(),
        trip_name: packstring_core::display_name(&form.trip_type).to_string(),
        dates: form.dates.trim().to_string(),
        party_size: form.party_size.trim().to_string(),
        experience: form.experience.trim().to_string(),
        message: form.message.trim().to_string(),
    };

    let id = state.store.create_inquiry(&inquiry).await?;
    info!(inquiry_id = id, trip = %inquiry.trip_slug, "contact inquiry received");

    if is_htmx(&headers) {
        let body = ContactSuccessTemplate {
            name: inquiry.name,
        }
        .render()
        .unwrap();
        Ok(Html(body).into_response())
    } else {
        Ok(Redirect::to("/contact/?sent=1").into_response())
    }
}
