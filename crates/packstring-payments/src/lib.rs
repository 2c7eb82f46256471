//! Stripe integration
//!
//! Two concerns: creating Checkout Sessions for deposit links (outbound,
//! admin-triggered) and consuming the webhook callbacks that report a
//! session's outcome (inbound, signature-verified).

pub mod checkout;
pub mod webhook;

pub use checkout::{CheckoutSession, DepositCheckout, StripeClient, StripeConfig};
pub use webhook::{construct_event, signature_header, verify_signature, WebhookEvent};
