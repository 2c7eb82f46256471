//! Admin back office
//!
//! Full pages for the dashboard, inquiry list, inquiry detail, deposit
//! settings, and the availability editor; htmx fragment responses for the
//! in-place forms. Fragment POSTs set an `HX-Trigger` header so the shared
//! app.js can pop a toast.

use std::collections::HashMap;

use askama::Template;
use axum::extract::{Form, Path, Query, RawForm, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{Html, IntoResponse, Redirect, Response};
use serde::Deserialize;
use tracing::{info, warn};

use packstring_availability::{DateSlot, Trips};
use packstring_core::{trip_catalog, Error};
use packstring_db::{DepositConfig, Inquiry, NewPayment, Payment, INQUIRY_STATUSES};
use packstring_payments::DepositCheckout;

use super::SiteResult;
use crate::auth::{self, SESSION_COOKIE};
use crate::format::{format_cents, status_label, time_ago};
use crate::AppState;

fn toast(message: &str) -> (&'static str, String) {
    (
        "HX-Trigger",
        serde_json::json!({ "showToast": message }).to_string(),
    )
}

#[derive(Template)]
#[template(path = "fragments/form_error.html")]
struct FormErrorTemplate {
    error: String,
}

fn form_error(error: String) -> Response {
    let body = FormErrorTemplate { error }.render().unwrap();
    (StatusCode::UNPROCESSABLE_ENTITY, Html(body)).into_response()
}

// ---------------------------------------------------------------------------
// Login / logout

#[derive(Deserialize, Default)]
pub struct LoginQuery {
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Template)]
#[template(path = "admin/login.html")]
struct LoginTemplate {
    error: bool,
}

pub async fn login_page(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<LoginQuery>,
) -> Response {
    // Already signed in: straight to the dashboard.
    let token = headers
        .get(header::COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(|cookies| auth::cookie_value(cookies, SESSION_COOKIE));
    if let Some(token) = token {
        if state.sessions.validate(token) {
            return Redirect::to("/admin/").into_response();
        }
    }

    let template = LoginTemplate {
        error: query.error.is_some(),
    };
    Html(template.render().unwrap()).into_response()
}

#[derive(Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub password: String,
}

pub async fn login_submit(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Response {
    let expected = state.config.admin_password.as_deref().unwrap_or_default();
    if expected.is_empty() || !auth::password_matches(&form.password, expected) {
        warn!("failed admin login attempt");
        return Redirect::to("/admin/login?error=1").into_response();
    }

    let token = state.sessions.create();
    info!("admin signed in");
    (
        [(header::SET_COOKIE, auth::session_cookie(&token))],
        Redirect::to("/admin/"),
    )
        .into_response()
}

pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if let Some(token) = headers
        .get(header::COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(|cookies| auth::cookie_value(cookies, SESSION_COOKIE))
    {
        state.sessions.revoke(token);
    }
    (
        [(header::SET_COOKIE, auth::clear_session_cookie())],
        Redirect::to("/admin/login"),
    )
        .into_response()
}

// ---------------------------------------------------------------------------
// Dashboard

/// One line in an inquiry table.
struct InquiryRow {
    id: i64,
    name: String,
    trip_name: String,
    status: String,
    when: String,
}

impl InquiryRow {
    fn from_inquiry(inq: &Inquiry) -> Self {
        Self {
            id: inq.id,
            name: inq.name.clone(),
            trip_name: inq.trip_name.clone(),
            status: inq.status.clone(),
            when: time_ago(inq.created_at),
        }
    }
}

#[derive(Template)]
#[template(path = "admin/dashboard.html")]
struct DashboardTemplate {
    total_inquiries: i64,
    new_inquiries: i64,
    booked_inquiries: i64,
    total_paid: String,
    trip_count: usize,
    slot_count: usize,
    recent: Vec<InquiryRow>,
}

pub async fn dashboard(State(state): State<AppState>) -> SiteResult<Html<String>> {
    let availability = state.availability.get_all();
    let slot_count = availability.values().map(Vec::len).sum();

    let template = DashboardTemplate {
        total_inquiries: state.store.count_inquiries(None).await?,
        new_inquiries: state.store.count_inquiries(Some("new")).await?,
        booked_inquiries: state.store.count_inquiries(Some("booked")).await?,
        total_paid: format_cents(state.store.total_paid_cents().await?),
        trip_count: availability.len(),
        slot_count,
        recent: state
            .store
            .recent_inquiries(5)
            .await?
            .iter()
            .map(InquiryRow::from_inquiry)
            .collect(),
    };
    Ok(Html(template.render().unwrap()))
}

// ---------------------------------------------------------------------------
// Inquiries

struct StatusTab {
    slug: &'static str,
    label: &'static str,
    count: i64,
    active: bool,
}

#[derive(Deserialize, Default)]
pub struct InquiriesQuery {
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Template)]
#[template(path = "admin/inquiries.html")]
struct InquiriesTemplate {
    tabs: Vec<StatusTab>,
    rows: Vec<InquiryRow>,
}

pub async fn inquiries_list(
    State(state): State<AppState>,
    Query(query): Query<InquiriesQuery>,
) -> SiteResult<Html<String>> {
    // Unknown filter values fall back to showing everything.
    let filter = query
        .status
        .as_deref()
        .filter(|s| INQUIRY_STATUSES.contains(s));

    let mut tabs = vec![StatusTab {
        slug: "",
        label: "All",
        count: state.store.count_inquiries(None).await?,
        active: filter.is_none(),
    }];
    for status in INQUIRY_STATUSES {
        tabs.push(StatusTab {
            slug: status,
            label: status_label(status),
            count: state.store.count_inquiries(Some(status)).await?,
            active: filter == Some(status),
        });
    }

    let rows = state
        .store
        .list_inquiries(filter)
        .await?
        .iter()
        .map(InquiryRow::from_inquiry)
        .collect();

    Ok(Html(InquiriesTemplate { tabs, rows }.render().unwrap()))
}

struct PaymentRow {
    amount: String,
    status: String,
    created: String,
    session_id: String,
}

impl PaymentRow {
    fn from_payment(p: &Payment) -> Self {
        Self {
            amount: format_cents(p.amount_cents),
            status: p.status.clone(),
            created: time_ago(p.created_at),
            session_id: p.stripe_session_id.clone(),
        }
    }
}

#[derive(Template)]
#[template(path = "admin/inquiry_detail.html")]
struct InquiryDetailTemplate {
    inquiry: Inquiry,
    created: String,
    statuses: Vec<String>,
    payments: Vec<PaymentRow>,
    deposit_amount: String,
    can_generate_deposit: bool,
}

pub async fn inquiry_detail(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> SiteResult<Response> {
    let Some(inquiry) = state.store.get_inquiry(id).await? else {
        return Ok((StatusCode::NOT_FOUND, "no such inquiry").into_response());
    };

    let payments = state
        .store
        .payments_for_inquiry(id)
        .await?
        .iter()
        .map(PaymentRow::from_payment)
        .collect();

    let deposit = state.store.get_deposit_config(&inquiry.trip_slug).await?;
    let enabled_amount = deposit
        .filter(|d| d.enabled && d.amount_cents > 0)
        .map(|d| d.amount_cents);

    let template = InquiryDetailTemplate {
        created: time_ago(inquiry.created_at),
        statuses: INQUIRY_STATUSES.iter().map(|s| s.to_string()).collect(),
        payments,
        deposit_amount: enabled_amount.map(format_cents).unwrap_or_default(),
        can_generate_deposit: state.stripe.is_some() && enabled_amount.is_some(),
        inquiry,
    };
    Ok(Html(template.render().unwrap()).into_response())
}

#[derive(Deserialize)]
pub struct StatusForm {
    #[serde(default)]
    pub status: String,
}

#[derive(Template)]
#[template(path = "fragments/inquiry_status.html")]
struct InquiryStatusTemplate {
    id: i64,
    status: String,
    statuses: Vec<String>,
}

pub async fn update_inquiry_status(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Form(form): Form<StatusForm>,
) -> SiteResult<Response> {
    match state.store.update_inquiry_status(id, &form.status).await {
        Ok(()) => {}
        Err(err @ Error::InvalidInquiryStatus(_)) => {
            return Ok(form_error(err.to_string()));
        }
        Err(err) => return Err(err.into()),
    }

    info!(inquiry_id = id, status = %form.status, "inquiry status updated");
    let body = InquiryStatusTemplate {
        id,
        status: form.status,
        statuses: INQUIRY_STATUSES.iter().map(|s| s.to_string()).collect(),
    }
    .render()
    .unwrap();
    Ok(([toast("Status updated")], Html(body)).into_response())
}

#[derive(Deserialize)]
pub struct NotesForm {
    #[serde(default)]
    pub notes: String,
}

pub async fn update_inquiry_notes(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Form(form): Form<NotesForm>,
) -> SiteResult<Response> {
    state.store.update_inquiry_notes(id, &form.notes).await?;
    Ok(([toast("Notes saved")], StatusCode::OK).into_response())
}

// ---------------------------------------------------------------------------
// Deposit links

#[derive(Template)]
#[template(path = "fragments/deposit_link.html")]
struct DepositLinkTemplate {
    url: String,
    amount: String,
}

pub async fn generate_deposit_link(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> SiteResult<Response> {
    let Some(stripe) = state.stripe.as_ref() else {
        return Ok(form_error("Stripe is not configured.".to_string()));
    };
    let Some(inquiry) = state.store.get_inquiry(id).await? else {
        return Ok((StatusCode::NOT_FOUND, "no such inquiry").into_response());
    };
    let Some(config) = state
        .store
        .get_deposit_config(&inquiry.trip_slug)
        .await?
        .filter(|d| d.enabled && d.amount_cents > 0)
    else {
        return Ok(form_error(format!(
            "No deposit amount configured for {}.",
            inquiry.trip_name
        )));
    };

    let checkout = DepositCheckout {
        customer_email: inquiry.email.clone(),
        amount_cents: config.amount_cents,
        trip_name: inquiry.trip_name.clone(),
        success_url: format!("{}/payments/success", state.config.site_url),
        cancel_url: format!("{}/payments/cancel", state.config.site_url),
        inquiry_id: inquiry.id,
    };

    let session = match stripe.create_checkout_session(&checkout).await {
        Ok(session) => session,
        Err(err @ Error::Payment(_)) => {
            return Ok(form_error(err.to_string()));
        }
        Err(err) => return Err(err.into()),
    };

    state
        .store
        .create_payment(&NewPayment {
            inquiry_id: inquiry.id,
            stripe_session_id: session.id.clone(),
            amount_cents: config.amount_cents,
            currency: "usd".to_string(),
            customer_email: inquiry.email.clone(),
        })
        .await?;

    info!(
        inquiry_id = inquiry.id,
        session_id = %session.id,
        amount_cents = config.amount_cents,
        "deposit link generated"
    );

    let body = DepositLinkTemplate {
        url: session.url,
        amount: format_cents(config.amount_cents),
    }
    .render()
    .unwrap();
    Ok(([toast("Deposit link created")], Html(body)).into_response())
}

// ---------------------------------------------------------------------------
// Deposit settings

struct DepositRow {
    slug: String,
    name: String,
    /// Dollar amount as typed into the form, e.g. "250" or "250.50".
    amount: String,
    enabled: bool,
}

fn deposit_rows(configs: Vec<DepositConfig>) -> Vec<DepositRow> {
    let by_slug: HashMap<&str, &DepositConfig> = configs
        .iter()
        .map(|c| (c.trip_slug.as_str(), c))
        .collect();

    trip_catalog()
        .iter()
        .map(|trip| match by_slug.get(trip.slug) {
            Some(config) => DepositRow {
                slug: trip.slug.to_string(),
                name: trip.name.to_string(),
                amount: if config.amount_cents % 100 == 0 {
                    (config.amount_cents / 100).to_string()
                } else {
                    format!("{:.2}", config.amount_cents as f64 / 100.0)
                },
                enabled: config.enabled,
            },
            None => DepositRow {
                slug: trip.slug.to_string(),
                name: trip.name.to_string(),
                amount: String::new(),
                enabled: false,
            },
        })
        .collect()
}

#[derive(Template)]
#[template(path = "admin/deposits.html")]
struct DepositsTemplate {
    rows: Vec<DepositRow>,
    error: String,
}

#[derive(Template)]
#[template(path = "fragments/deposits_form.html")]
struct DepositsFormTemplate {
    rows: Vec<DepositRow>,
    error: String,
}

pub async fn deposits_page(State(state): State<AppState>) -> SiteResult<Html<String>> {
    let rows = deposit_rows(state.store.list_deposit_configs().await?);
    Ok(Html(
        DepositsTemplate {
            rows,
            error: String::new(),
        }
        .render()
        .unwrap(),
    ))
}

fn parse_dollars(input: &str) -> Option<i64> {
    let input = input.trim().trim_start_matches('$');
    if input.is_empty() {
        return None;
    }
    let value: f64 = input.parse().ok()?;
    if !(0.0..=1_000_000.0).contains(&value) {
        return None;
    }
    Some((value * 100.0).round() as i64)
}

pub async fn save_deposits(
    State(state): State<AppState>,
    RawForm(body): RawForm,
) -> SiteResult<Response> {
    let pairs: Vec<(String, String)> =
        serde_urlencoded::from_bytes(&body).unwrap_or_default();
    let fields: HashMap<String, String> = pairs.into_iter().collect();

    // Validate every row before writing anything.
    let mut updates = Vec::new();
    for trip in trip_catalog() {
        let amount = fields
            .get(&format!("deposit[{}][amount]", trip.slug))
            .map(String::as_str)
            .unwrap_or_default();
        let enabled = fields.contains_key(&format!("deposit[{}][enabled]", trip.slug));

        let amount_cents = match parse_dollars(amount) {
            Some(cents) => cents,
            None if amount.trim().is_empty() => 0,
            None => {
                warn!(trip = trip.slug, amount, "rejected deposit settings save");
                let rows = deposit_rows(state.store.list_deposit_configs().await?);
                let body = DepositsFormTemplate {
                    rows,
                    error: format!("Invalid deposit amount for {}: {:?}", trip.name, amount),
                }
                .render()
                .unwrap();
                return Ok(Html(body).into_response());
            }
        };

        updates.push(DepositConfig {
            trip_slug: trip.slug.to_string(),
            trip_name: trip.name.to_string(),
            amount_cents,
            enabled: enabled && amount_cents > 0,
        });
    }

    for config in &updates {
        state.store.save_deposit_config(config).await?;
    }

    info!("deposit settings saved");
    let rows = deposit_rows(state.store.list_deposit_configs().await?);
    let body = DepositsFormTemplate {
        rows,
        error: String::new(),
    }
    .render()
    .unwrap();
    Ok(([toast("Deposit settings saved")], Html(body)).into_response())
}

// ---------------------------------------------------------------------------
// Availability editor

struct TripSlots {
    slug: String,
    name: String,
    slots: Vec<DateSlot>,
}

fn rows_from_trips(trips: &Trips) -> Vec<TripSlots> {
    trip_catalog()
        .iter()
        .map(|trip| TripSlots {
            slug: trip.slug.to_string(),
            name: trip.name.to_string(),
            slots: trips.get(trip.slug).cloned().unwrap_or_default(),
        })
        .collect()
}

fn valid_statuses() -> Vec<String> {
    packstring_availability::VALID_STATUSES
        .iter()
        .map(|s| s.to_string())
        .collect()
}

#[derive(Template)]
#[template(path = "admin/availability.html")]
struct AvailabilityTemplate {
    trips: Vec<TripSlots>,
    statuses: Vec<String>,
    error: String,
}

#[derive(Template)]
#[template(path = "fragments/availability_form.html")]
struct AvailabilityFormTemplate {
    trips: Vec<TripSlots>,
    statuses: Vec<String>,
    error: String,
}

pub async fn availability_editor(State(state): State<AppState>) -> Html<String> {
    let template = AvailabilityTemplate {
        trips: rows_from_trips(&state.availability.get_all()),
        statuses: valid_statuses(),
        error: String::new(),
    };
    Html(template.render().unwrap())
}

/// Rebuilds the full trips map from the editor's indexed field names:
/// `slots[<slug>][<i>][dates|status|note]`. Row indexes stop at the first
/// gap; rows with an empty dates field are dropped.
fn slots_from_form(fields: &HashMap<String, String>) -> Trips {
    let mut trips = Trips::new();

    for trip in trip_catalog() {
        let mut slots = Vec::new();
        for i in 0.. {
            let dates = fields.get(&format!("slots[{}][{}][dates]", trip.slug, i));
            let status = fields.get(&format!("slots[{}][{}][status]", trip.slug, i));
            if dates.is_none() && status.is_none() {
                break;
            }

            let dates = dates.map(String::as_str).unwrap_or_default().trim();
            if dates.is_empty() {
                continue;
            }
            let status = status.map(String::as_str).unwrap_or_default().trim();
            let note = fields
                .get(&format!("slots[{}][{}][note]", trip.slug, i))
                .map(String::as_str)
                .unwrap_or_default()
                .trim();

            slots.push(DateSlot {
                dates: dates.to_string(),
                status: if status.is_empty() {
                    "open".to_string()
                } else {
                    status.to_string()
                },
                note: note.to_string(),
            });
        }
        if !slots.is_empty() {
            trips.insert(trip.slug.to_string(), slots);
        }
    }

    trips
}

pub async fn save_availability(
    State(state): State<AppState>,
    RawForm(body): RawForm,
) -> SiteResult<Response> {
    let pairs: Vec<(String, String)> =
        serde_urlencoded::from_bytes(&body).unwrap_or_default();
    let fields: HashMap<String, String> = pairs.into_iter().collect();

    let trips = slots_from_form(&fields);
    match state.availability.save(trips.clone()) {
        Ok(()) => {}
        Err(err) => {
            // Re-render with the submitted rows so nothing typed is lost.
            warn!(error = %err, "rejected availability save");
            let body = AvailabilityFormTemplate {
                trips: rows_from_trips(&trips),
                statuses: valid_statuses(),
                error: err.to_string(),
            }
            .render()
            .unwrap();
            return Ok(Html(body).into_response());
        }
    }

    info!("availability saved");
    let body = AvailabilityFormTemplate {
        trips: rows_from_trips(&state.availability.get_all()),
        statuses: valid_statuses(),
        error: String::new(),
    }
    .render()
    .unwrap();
    Ok(([toast("Availability saved")], Html(body)).into_response())
}
