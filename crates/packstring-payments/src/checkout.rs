//! Stripe Checkout Session creation

use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, error};

use packstring_core::{Error, Result};

/// Stripe connector configuration
#[derive(Debug, Clone)]
pub struct StripeConfig {
    /// Secret API key (`sk_live_...` / `sk_test_...`)
    pub secret_key: String,

    /// Webhook endpoint secret (`whsec_...`); None skips signature
    /// verification, which is only acceptable in local development.
    pub webhook_secret: Option<String>,

    /// Base URL for the Stripe API (default: https://api.stripe.com)
    pub base_url: String,
}

impl StripeConfig {
    pub fn new(secret_key: impl Into<String>) -> Self {
        Self {
            secret_key: secret_key.into(),
            webhook_secret: None,
            base_url: "https://api.stripe.com".to_string(),
        }
    }

    pub fn with_webhook_secret(mut self, secret: impl Into<String>) -> Self {
        self.webhook_secret = Some(secret.into());
        self
    }

    /// Set the base URL (for tests against a mock server)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

/// Everything needed to build a deposit Checkout Session.
#[derive(Debug, Clone)]
pub struct DepositCheckout {
    pub customer_email: String,
    pub amount_cents: i64,
    pub trip_name: String,
    pub success_url: String,
    pub cancel_url: String,
    pub inquiry_id: i64,
}

/// The fields of the created session the site cares about.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutSession {
    pub id: String,
    pub url: String,
}

#[derive(Debug, Deserialize)]
struct StripeErrorBody {
    error: StripeErrorDetail,
}

#[derive(Debug, Deserialize)]
struct StripeErrorDetail {
    message: String,
}

/// Stripe API client
pub struct StripeClient {
    config: StripeConfig,
    client: Client,
}

impl StripeClient {
    pub fn new(config: StripeConfig) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    pub fn webhook_secret(&self) -> Option<&str> {
        self.config.webhook_secret.as_deref()
    }

    /// Creates a payment-mode Checkout Session for a trip deposit and
    /// returns its id and hosted payment URL.
    pub async fn create_checkout_session(
        &self,
        deposit: &DepositCheckout,
    ) -> Result<CheckoutSession> {
        let amount = deposit.amount_cents.to_string();
        let inquiry_id = deposit.inquiry_id.to_string();
        let product_name = format!("Deposit - {}", deposit.trip_name);
        let success_url = format!(
            "{}?session_id={{CHECKOUT_SESSION_ID}}",
            deposit.success_url
        );

        let form: Vec<(&str, &str)> = vec![
            ("mode", "payment"),
            ("customer_email", &deposit.customer_email),
            ("payment_method_types[0]", "card"),
            ("line_items[0][price_data][currency]", "usd"),
            ("line_items[0][price_data][unit_amount]", &amount),
            ("line_items[0][price_data][product_data][name]", &product_name),
            (
                "line_items[0][price_data][product_data][description]",
                "Trip deposit for MT Hunt & Fish Outfitters",
            ),
            ("line_items[0][quantity]", "1"),
            ("success_url", &success_url),
            ("cancel_url", &deposit.cancel_url),
            ("metadata[inquiry_id]", &inquiry_id),
        ];

        debug!(inquiry_id = deposit.inquiry_id, amount_cents = deposit.amount_cents, "creating checkout session");

        let response = self
            .client
            .post(format!("{}/v1/checkout/sessions", self.config.base_url))
            .bearer_auth(&self.config.secret_key)
            .form(&form)
            .send()
            .await
            .map_err(|e| Error::Payment(format!("checkout session request: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<StripeErrorBody>(&body)
                .map(|b| b.error.message)
                .unwrap_or(body);
            error!(status = %status, message = %message, "checkout session creation failed");
            return Err(Error::Payment(format!(
                "stripe returned {}: {}",
                status, message
            )));
        }

        response
            .json::<CheckoutSession>()
            .await
            .map_err(|e| Error::Payment(format!("decode checkout session: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_string_contains, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn deposit() -> DepositCheckout {
        DepositCheckout {
            customer_email: "alice@example.com".to_string(),
            amount_cents: 25_000,
            trip_name: "Elk Hunts".to_string(),
            success_url: "https://mthuntfish.com/payments/success".to_string(),
            cancel_url: "https://mthuntfish.com/payments/cancel".to_string(),
            inquiry_id: 42,
        }
    }

    #[tokio::test]
    async fn creates_session_with_deposit_fields() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/checkout/sessions"))
            .and(header("authorization", "Bearer sk_test_123"))
            .and(body_string_contains("mode=payment"))
            .and(body_string_contains("unit_amount%5D=25000"))
            .and(body_string_contains("inquiry_id%5D=42"))
            .and(body_string_contains("session_id%3D%7BCHECKOUT_SESSION_ID%7D"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "cs_test_abc",
                "url": "https://checkout.stripe.com/c/pay/cs_test_abc"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = StripeClient::new(
            StripeConfig::new("sk_test_123").with_base_url(server.uri()),
        );
        let session = client.create_checkout_session(&deposit()).await.unwrap();
        assert_eq!(session.id, "cs_test_abc");
        assert!(session.url.contains("checkout.stripe.com"));
    }

    #[tokio::test]
    async fn surfaces_stripe_error_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/checkout/sessions"))
            .respond_with(ResponseTemplate::new(402).set_body_json(serde_json::json!({
                "error": { "message": "Your card was declined." }
            })))
            .mount(&server)
            .await;

        let client = StripeClient::new(
            StripeConfig::new("sk_test_123").with_base_url(server.uri()),
        );
        let err = client.create_checkout_session(&deposit()).await.unwrap_err();
        assert!(err.to_string().contains("Your card was declined."));
    }
}
