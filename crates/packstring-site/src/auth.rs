//! Admin session tokens and the auth guard
//!
//! Sessions are an in-process map of random tokens to expiry times; the
//! single-operator admin does not need durable sessions. The cookie is
//! HttpOnly and scoped to /admin.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::extract::{Request, State};
use axum::http::header;
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use chrono::{DateTime, Duration, Utc};
use rand::RngCore;
use sha2::{Digest, Sha256};

use crate::AppState;

pub const SESSION_COOKIE: &str = "admin_session";
const SESSION_TTL_HOURS: i64 = 24;

/// Token to expiry map shared across handlers.
#[derive(Clone, Default)]
pub struct AdminSessions {
    inner: Arc<Mutex<HashMap<String, DateTime<Utc>>>>,
}

impl AdminSessions {
    /// Mints a new session token with a 24h expiry.
    pub fn create(&self) -> String {
        let mut bytes = [0u8; 32];
        rand::thread_rng().fill_bytes(&mut bytes);
        let token = hex::encode(bytes);
        let expiry = Utc::now() + Duration::hours(SESSION_TTL_HOURS);
        self.inner
            .lock()
            .expect("session lock poisoned")
            .insert(token.clone(), expiry);
        token
    }

    /// Returns true when the token exists and has not expired; expired
    /// tokens are dropped on the way out.
    pub fn validate(&self, token: &str) -> bool {
        let mut sessions = self.inner.lock().expect("session lock poisoned");
        match sessions.get(token) {
            Some(expiry) if *expiry > Utc::now() => true,
            Some(_) => {
                sessions.remove(token);
                false
            }
            None => false,
        }
    }

    pub fn revoke(&self, token: &str) {
        self.inner
            .lock()
            .expect("session lock poisoned")
            .remove(token);
    }
}

/// Compares the submitted password without an early length exit: both
/// sides are hashed to fixed-length digests first.
pub fn password_matches(submitted: &str, expected: &str) -> bool {
    Sha256::digest(submitted.as_bytes()) == Sha256::digest(expected.as_bytes())
}

/// Extracts a cookie value from a raw `Cookie` header.
pub fn cookie_value<'a>(cookie_header: &'a str, name: &str) -> Option<&'a str> {
    cookie_header.split(';').find_map(|pair| {
        let (k, v) = pair.trim().split_once('=')?;
        (k == name).then_some(v)
    })
}

/// `Set-Cookie` value establishing an admin session.
pub fn session_cookie(token: &str) -> String {
    format!(
        "{}={}; Path=/admin; HttpOnly; SameSite=Lax; Max-Age={}",
        SESSION_COOKIE,
        token,
        SESSION_TTL_HOURS * 3600
    )
}

/// `Set-Cookie` value clearing the admin session.
pub fn clear_session_cookie() -> String {
    format!(
        "{}=; Path=/admin; HttpOnly; SameSite=Lax; Max-Age=0",
        SESSION_COOKIE
    )
}

/// Middleware guarding the admin routes: a missing or expired session
/// redirects to the login page.
pub async fn require_admin(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let token = request
        .headers()
        .get(header::COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(|cookies| cookie_value(cookies, SESSION_COOKIE));

    match token {
        Some(token) if state.sessions.validate(token) => next.run(request).await,
        _ => Redirect::to("/admin/login").into_response(),
    }
}
