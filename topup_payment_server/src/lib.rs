//! # Top-up payment server
//! This module hosts the server code for the storefront payment gateway. It is responsible for:
//! Listening for incoming webhook calls from the UPI payment providers (PhonePe and Razorpay).
//! Verifying the HMAC signature over the raw request body.
//! Decoding the provider payload into a normalized payment event and handing it to the reconciliation engine.
//! Dispatching best-effort side effects (push notification, cache invalidation, gaming-id promotion) after commit.
//!
//! ## Configuration
//! The server is configured via environment variables. See [config](config/index.html) for more information.
//!
//! ## Routes
//! The server exposes the following routes:
//! * `/health`: A health check route that returns a 200 OK response.
//! * `/webhooks/phonepe`: PhonePe payment callback.
//! * `/webhooks/razorpay`: Razorpay `payment.captured` webhook.
//! * `/checkout/phonepe`: Initiates a PhonePe pay-page order and returns the redirect URL.

pub mod checkout;
pub mod config;
pub mod data_objects;
pub mod errors;
pub mod integrations;
pub mod routes;
pub mod server;
pub mod side_effects;
pub mod webhooks;

#[cfg(test)]
mod endpoint_tests;
