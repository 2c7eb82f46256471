//! Packstring Web UI
//!
//! All routes for the public marketing site and the admin back office.
//! HTML templates and custom CSS/JS are compiled into the binary; htmx is
//! loaded from CDN.

pub mod auth;
pub mod content;
pub mod format;
pub mod handlers;

use std::sync::Arc;

use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use packstring_availability::AvailabilityStore;
use packstring_db::Store;
use packstring_payments::StripeClient;

use auth::AdminSessions;

/// Site-level settings the handlers need.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    /// Public base URL, used to build payment redirect URLs.
    pub site_url: String,
    /// Admin password; `None` disables all /admin routes.
    pub admin_password: Option<String>,
}

/// Shared application state, constructed once at bootstrap and injected
/// into every handler. No ambient globals.
#[derive(Clone)]
pub struct AppState {
    pub store: Store,
    pub availability: Arc<AvailabilityStore>,
    pub stripe: Option<Arc<StripeClient>>,
    pub sessions: AdminSessions,
    pub config: Arc<SiteConfig>,
}

impl AppState {
    pub fn new(
        store: Store,
        availability: Arc<AvailabilityStore>,
        stripe: Option<Arc<StripeClient>>,
        config: SiteConfig,
    ) -> Self {
        Self {
            store,
            availability,
            stripe,
            sessions: AdminSessions::default(),
            config: Arc::new(config),
        }
    }
}

/// Builds the full site router. Admin routes are mounted only when an
/// admin password is configured.
pub fn router(state: AppState) -> Router {
    let mut app = Router::new()
        // Public pages
        .route("/", get(handlers::pages::home))
        .route("/trips/", get(handlers::pages::trips_hub))
        .route("/trips/fishing/", get(handlers::pages::fishing))
        .route("/trips/hunting/", get(handlers::pages::hunting))
        .route("/trips/packages/", get(handlers::pages::packages))
        .route("/gallery/", get(handlers::pages::gallery))
        .route("/contact/", get(handlers::pages::contact))
        .route("/contact", post(handlers::contact::submit))
        // Payment outcome pages + webhook
        .route("/payments/success", get(handlers::payments::success))
        .route("/payments/cancel", get(handlers::payments::cancel))
        .route("/stripe/webhook", post(handlers::payments::webhook))
        // Static assets (embedded in binary)
        .route("/static/css/style.css", get(handlers::static_files::serve_css))
        .route("/static/js/app.js", get(handlers::static_files::serve_app_js))
        .route("/robots.txt", get(handlers::static_files::serve_robots));

    if state.config.admin_password.is_some() {
        let protected = Router::new()
            .route("/admin/", get(handlers::admin::dashboard))
            .route("/admin/availability/", get(handlers::admin::availability_editor))
            .route("/admin/availability", post(handlers::admin::save_availability))
            .route("/admin/inquiries/", get(handlers::admin::inquiries_list))
            .route("/admin/inquiries/{id}", get(handlers::admin::inquiry_detail))
            .route("/admin/inquiries/{id}/status", post(handlers::admin::update_inquiry_status))
            .route("/admin/inquiries/{id}/notes", post(handlers::admin::update_inquiry_notes))
            .route("/admin/inquiries/{id}/deposit", post(handlers::admin::generate_deposit_link))
            .route("/admin/deposits/", get(handlers::admin::deposits_page))
            .route("/admin/deposits", post(handlers::admin::save_deposits))
            .route_layer(middleware::from_fn_with_state(
                state.clone(),
                auth::require_admin,
            ));

        app = app
            .merge(protected)
            .route(
                "/admin/login",
                get(handlers::admin::login_page).post(handlers::admin::login_submit),
            )
            .route("/admin/logout", post(handlers::admin::logout));
    }

    app.layer(TraceLayer::new_for_http()).with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use packstring_payments::{signature_header, StripeConfig};

    const PASSWORD: &str = "trout-unlimited";

    async fn test_state(
        admin_password: Option<&str>,
        stripe: Option<StripeClient>,
    ) -> (AppState, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open_in_memory().await.unwrap();
        let availability =
            Arc::new(AvailabilityStore::new(dir.path().join("availability.yaml"), false));
        let state = AppState::new(
            store,
            availability,
            stripe.map(Arc::new),
            SiteConfig {
                site_url: "https://mthuntfish.com".to_string(),
                admin_password: admin_password.map(str::to_string),
            },
        );
        (state, dir)
    }

    async fn get(app: Router, uri: &str) -> (StatusCode, String) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8_lossy(&body).to_string())
    }

    fn form_request(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn login(app: &Router) -> String {
        let response = app
            .clone()
            .oneshot(form_request("/admin/login", &format!("password={}", PASSWORD)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        let cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .unwrap()
            .to_str()
            .unwrap();
        cookie.split(';').next().unwrap().to_string()
    }

    #[tokio::test]
    async fn public_pages_render() {
        let (state, _dir) = test_state(None, None).await;
        let app = router(state);

        for uri in [
            "/",
            "/trips/",
            "/trips/fishing/",
            "/trips/hunting/",
            "/trips/packages/",
            "/gallery/",
            "/contact/",
            "/robots.txt",
        ] {
            let (status, _) = get(app.clone(), uri).await;
            assert_eq!(status, StatusCode::OK, "GET {}", uri);
        }

        let (_, body) = get(app, "/trips/fishing/").await;
        assert!(body.contains("Jet Boat Trips"));
        assert!(body.contains("Missouri River"));
    }

    #[tokio::test]
    async fn fishing_page_shows_availability() {
        let (state, _dir) = test_state(None, None).await;
        let mut trips = packstring_availability::Trips::new();
        trips.insert(
            "jet-boat".to_string(),
            vec![packstring_availability::DateSlot {
                dates: "June 10-14".to_string(),
                status: "limited".to_string(),
                note: "2 seats left".to_string(),
            }],
        );
        state.availability.save(trips).unwrap();

        let (status, body) = get(router(state), "/trips/fishing/").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("June 10-14"));
        assert!(body.contains("2 seats left"));
        assert!(body.contains("status-limited"));
    }

    #[tokio::test]
    async fn contact_form_creates_inquiry() {
        let (state, _dir) = test_state(None, None).await;
        let store = state.store.clone();
        let app = router(state);

        let response = app
            .oneshot(form_request(
                "/contact",
                "name=Mike&email=mike%40example.com&trip_type=elk-hunting&party_size=2",
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);

        let inquiries = store.list_inquiries(None).await.unwrap();
        assert_eq!(inquiries.len(), 1);
        assert_eq!(inquiries[0].name, "Mike");
        assert_eq!(inquiries[0].trip_name, "Elk Hunts");
        assert_eq!(inquiries[0].status, "new");
    }

    #[tokio::test]
    async fn contact_form_rejects_missing_email() {
        let (state, _dir) = test_state(None, None).await;
        let store = state.store.clone();
        let app = router(state);

        let response = app
            .oneshot(form_request("/contact", "name=Mike&email=not-an-email"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(store.count_inquiries(None).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn admin_routes_absent_without_password() {
        let (state, _dir) = test_state(None, None).await;
        let (status, _) = get(router(state), "/admin/").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn admin_requires_session() {
        let (state, _dir) = test_state(Some(PASSWORD), None).await;
        let app = router(state);

        let response = app
            .oneshot(Request::builder().uri("/admin/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()["location"], "/admin/login");
    }

    #[tokio::test]
    async fn login_grants_access_and_logout_revokes_it() {
        let (state, _dir) = test_state(Some(PASSWORD), None).await;
        let app = router(state);

        let cookie = login(&app).await;
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/admin/")
                    .header(header::COOKIE, &cookie)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let mut logout = form_request("/admin/logout", "");
        logout
            .headers_mut()
            .insert(header::COOKIE, cookie.parse().unwrap());
        let response = app.clone().oneshot(logout).await.unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/admin/")
                    .header(header::COOKIE, &cookie)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
    }

    #[tokio::test]
    async fn wrong_password_bounces_back_to_login() {
        let (state, _dir) = test_state(Some(PASSWORD), None).await;
        let response = router(state)
            .oneshot(form_request("/admin/login", "password=wrong"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()["location"], "/admin/login?error=1");
    }

    #[tokio::test]
    async fn availability_saved_through_admin_form() {
        let (state, _dir) = test_state(Some(PASSWORD), None).await;
        let availability = state.availability.clone();
        let app = router(state);
        let cookie = login(&app).await;

        let body = "slots%5Bjet-boat%5D%5B0%5D%5Bdates%5D=June+10-14\
                    &slots%5Bjet-boat%5D%5B0%5D%5Bstatus%5D=limited\
                    &slots%5Bjet-boat%5D%5B0%5D%5Bnote%5D=2+seats";
        let mut request = form_request("/admin/availability", body);
        request
            .headers_mut()
            .insert(header::COOKIE, cookie.parse().unwrap());

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key("HX-Trigger"));

        let slots = availability.get("jet-boat");
        assert_eq!(slots.len(), 1);
        assert_eq!(slots[0].dates, "June 10-14");
        assert_eq!(slots[0].status, "limited");
    }

    #[tokio::test]
    async fn availability_save_with_bad_status_is_rejected() {
        let (state, _dir) = test_state(Some(PASSWORD), None).await;
        let availability = state.availability.clone();
        let app = router(state);
        let cookie = login(&app).await;

        let body = "slots%5Bjet-boat%5D%5B0%5D%5Bdates%5D=June+10-14\
                    &slots%5Bjet-boat%5D%5B0%5D%5Bstatus%5D=sold-out";
        let mut request = form_request("/admin/availability", body);
        request
            .headers_mut()
            .insert(header::COOKIE, cookie.parse().unwrap());

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let body = String::from_utf8_lossy(&body);
        assert!(body.contains("sold-out"));
        assert!(availability.get("jet-boat").is_empty());
    }

    #[tokio::test]
    async fn webhook_marks_payment_paid_and_inquiry_booked() {
        let stripe = StripeClient::new(
            StripeConfig::new("sk_test_123").with_webhook_secret("whsec_test"),
        );
        let (state, _dir) = test_state(None, Some(stripe)).await;
        let store = state.store.clone();

        let inquiry_id = store
            .create_inquiry(&packstring_db::NewInquiry {
                name: "Dan".to_string(),
                email: "dan@example.com".to_string(),
                trip_slug: "elk-hunting".to_string(),
                trip_name: "Elk Hunts".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();
        store
            .create_payment(&packstring_db::NewPayment {
                inquiry_id,
                stripe_session_id: "cs_test_abc".to_string(),
                amount_cents: 50_000,
                currency: "usd".to_string(),
                customer_email: "dan@example.com".to_string(),
            })
            .await
            .unwrap();

        let payload = serde_json::json!({
            "type": "checkout.session.completed",
            "data": { "object": { "id": "cs_test_abc", "payment_intent": "pi_9" } }
        })
        .to_string();
        let signature =
            signature_header(payload.as_bytes(), "whsec_test", chrono::Utc::now().timestamp());

        let response = router(state)
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/stripe/webhook")
                    .header("stripe-signature", signature)
                    .body(Body::from(payload))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let payment = store
            .get_payment_by_session("cs_test_abc")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(payment.status, "paid");
        assert_eq!(payment.stripe_payment_intent, "pi_9");
        assert!(payment.paid_at.is_some());

        let inquiry = store.get_inquiry(inquiry_id).await.unwrap().unwrap();
        assert_eq!(inquiry.status, "booked");
    }

    #[tokio::test]
    async fn webhook_rejects_bad_signature() {
        let stripe = StripeClient::new(
            StripeConfig::new("sk_test_123").with_webhook_secret("whsec_test"),
        );
        let (state, _dir) = test_state(None, Some(stripe)).await;

        let payload = serde_json::json!({
            "type": "checkout.session.completed",
            "data": { "object": { "id": "cs_test_abc" } }
        })
        .to_string();

        let response = router(state)
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/stripe/webhook")
                    .header("stripe-signature", "t=1,v1=deadbeef")
                    .body(Body::from(payload))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
