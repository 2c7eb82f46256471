//! Deposit payment pages and the Stripe webhook

use askama::Template;
use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use serde::Deserialize;
use tracing::{info, warn};

use packstring_core::{Error, PageMeta};
use packstring_payments::construct_event;

use super::SiteResult;
use crate::format::format_cents;
use crate::AppState;

#[derive(Template)]
#[template(path = "payment_result.html")]
struct PaymentResultTemplate {
    meta: PageMeta,
    succeeded: bool,
    /// Formatted amount, empty when the session is unknown.
    amount: String,
}

#[derive(Deserialize, Default)]
pub struct SuccessQuery {
    #[serde(default)]
    pub session_id: Option<String>,
}

pub async fn success(
    State(state): State<AppState>,
    Query(query): Query<SuccessQuery>,
) -> SiteResult<Html<String>> {
    // Best effort: show the deposit amount when the session is ours. The
    // authoritative status change comes from the webhook, not this page.
    let mut amount = String::new();
    if let Some(session_id) = &query.session_id {
        if let Some(payment) = state.store.get_payment_by_session(session_id).await? {
            amount = format_cents(payment.amount_cents);
        }
    }

    let template = PaymentResultTemplate {
        meta: PageMeta::new("Deposit Received | MT Hunt & Fish Outfitters")
            .with_canonical("/payments/success"),
        succeeded: true,
        amount,
    };
    Ok(Html(template.render().unwrap()))
}

pub async fn cancel(State(_state): State<AppState>) -> Html<String> {
    let template = PaymentResultTemplate {
        meta: PageMeta::new("Payment Cancelled | MT Hunt & Fish Outfitters")
            .with_canonical("/payments/cancel"),
        succeeded: false,
        amount: String::new(),
    };
    Html(template.render().unwrap())
}

/// Stripe webhook endpoint. Consumes `checkout.session.completed` and
/// `checkout.session.expired`; everything else is acknowledged and
/// ignored so Stripe does not retry.
pub async fn webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> SiteResult<Response> {
    let signature = headers
        .get("stripe-signature")
        .and_then(|v| v.to_str().ok());
    let secret = state.stripe.as_ref().and_then(|s| s.webhook_secret());

    let event = match construct_event(&body, signature, secret) {
        Ok(event) => event,
        Err(Error::WebhookVerification(reason)) => {
            warn!(%reason, "rejected webhook delivery");
            return Ok((StatusCode::BAD_REQUEST, "invalid signature").into_response());
        }
        Err(err) => return Err(err.into()),
    };

    let session = &event.data.object;
    match event.event_type.as_str() {
        "checkout.session.completed" => {
            let intent = session.payment_intent.as_deref().unwrap_or_default();
            state
                .store
                .update_payment_status(&session.id, "paid", intent)
                .await?;
            if let Some(payment) = state.store.get_payment_by_session(&session.id).await? {
                state
                    .store
                    .update_inquiry_status(payment.inquiry_id, "booked")
                    .await?;
                info!(
                    inquiry_id = payment.inquiry_id,
                    session_id = %session.id,
                    amount_cents = payment.amount_cents,
                    "deposit paid"
                );
            }
        }
        "checkout.session.expired" => {
            state
                .store
                .update_payment_status(&session.id, "failed", "")
                .await?;
            info!(session_id = %session.id, "checkout session expired");
        }
        other => {
            info!(event_type = %other, "ignoring webhook event");
        }
    }

    Ok((StatusCode::OK, "ok").into_response())
}
