use actix_web::{http::StatusCode, web, web::ServiceConfig};
use topup_payment_engine::{events::EventProducers, traits::PaymentGatewayError, ReconciliationApi};

use super::{
    helpers::{post_request, reconciled_order, test_config, PHONEPE_SECRET, RAZORPAY_SECRET},
    mocks::MockPaymentGateway,
};
use crate::{
    config::ServerConfig,
    routes::{PhonepeWebhookRoute, RazorpayWebhookRoute},
    webhooks::{sign_phonepe, sign_plain_hex},
};

fn phonepe_success_body() -> Vec<u8> {
    let inner = serde_json::json!({
        "code": "PAYMENT_SUCCESS",
        "data": { "merchantTransactionId": "1700000000000-GID123-60f1abc", "amount": 49_900 }
    });
    serde_json::json!({ "response": base64::encode(inner.to_string()) }).to_string().into_bytes()
}

fn razorpay_captured_body() -> Vec<u8> {
    serde_json::json!({
        "event": "payment.captured",
        "payload": { "payment": { "entity": {
            "id": "pay_29QQoUBi66xm2f",
            "order_id": "order_9A33XWu170gUtm",
            "notes": { "productId": "60f1abc", "gamingId": "GID123" }
        }}}
    })
    .to_string()
    .into_bytes()
}

fn register(cfg: &mut ServiceConfig, db: MockPaymentGateway, config: ServerConfig) {
    let api = ReconciliationApi::new(db, EventProducers::default());
    cfg.app_data(web::Data::new(api))
        .app_data(web::Data::new(config))
        .service(PhonepeWebhookRoute::<MockPaymentGateway>::new())
        .service(RazorpayWebhookRoute::<MockPaymentGateway>::new());
}

// The database must never be touched when the request is rejected before reconciliation. A mock without
// expectations panics on any call.
fn configure_untouched_db(cfg: &mut ServiceConfig) {
    register(cfg, MockPaymentGateway::new(), test_config());
}

fn configure_missing_secrets(cfg: &mut ServiceConfig) {
    register(cfg, MockPaymentGateway::new(), ServerConfig::default());
}

fn configure_reconciles(cfg: &mut ServiceConfig) {
    let mut db = MockPaymentGateway::new();
    db.expect_order_id_for_dedup_key().returning(|_| Ok(None));
    db.expect_reconcile_payment().times(1).returning(|_| Ok(reconciled_order(7)));
    register(cfg, db, test_config());
}

fn configure_permissive(cfg: &mut ServiceConfig) {
    let mut db = MockPaymentGateway::new();
    db.expect_order_id_for_dedup_key().returning(|_| Ok(None));
    db.expect_reconcile_payment().times(1).returning(|_| Ok(reconciled_order(8)));
    let mut config = test_config();
    config.phonepe.permissive_signatures = true;
    register(cfg, db, config);
}

fn configure_duplicate(cfg: &mut ServiceConfig) {
    let mut db = MockPaymentGateway::new();
    db.expect_order_id_for_dedup_key().returning(|_| Ok(Some(42)));
    db.expect_reconcile_payment().never();
    register(cfg, db, test_config());
}

fn configure_product_missing(cfg: &mut ServiceConfig) {
    let mut db = MockPaymentGateway::new();
    db.expect_order_id_for_dedup_key().returning(|_| Ok(None));
    db.expect_reconcile_payment()
        .returning(|_| Err(PaymentGatewayError::ProductNotFound("60f1abc".to_string())));
    register(cfg, db, test_config());
}

#[actix_web::test]
async fn missing_secret_fails_closed() {
    let _ = env_logger::try_init().ok();
    let body = razorpay_captured_body();
    let sig = sign_plain_hex(RAZORPAY_SECRET, &body);
    let (status, response) = post_request(
        "/webhooks/razorpay",
        body,
        &[("X-Razorpay-Signature", sig.as_str())],
        configure_missing_secrets,
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(response.contains("Webhook secret not configured."));
}

#[actix_web::test]
async fn razorpay_bad_signature_is_rejected() {
    let _ = env_logger::try_init().ok();
    let body = razorpay_captured_body();
    let (status, response) = post_request(
        "/webhooks/razorpay",
        body,
        &[("X-Razorpay-Signature", "deadbeef")],
        configure_untouched_db,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(response.contains("Signature does not match"));
}

#[actix_web::test]
async fn phonepe_bad_signature_is_rejected() {
    let _ = env_logger::try_init().ok();
    let body = phonepe_success_body();
    let (status, response) =
        post_request("/webhooks/phonepe", body, &[("X-VERIFY", "deadbeef###1")], configure_untouched_db).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(response.contains("Signature does not match"));
}

#[actix_web::test]
async fn missing_signature_header_is_rejected() {
    let _ = env_logger::try_init().ok();
    let (status, response) =
        post_request("/webhooks/razorpay", razorpay_captured_body(), &[], configure_untouched_db).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(response.contains("No signature header found"));
}

#[actix_web::test]
async fn tampered_body_is_rejected() {
    let _ = env_logger::try_init().ok();
    let body = razorpay_captured_body();
    let sig = sign_plain_hex(RAZORPAY_SECRET, &body);
    let mut tampered = body.clone();
    tampered.extend_from_slice(b" ");
    let (status, _) = post_request(
        "/webhooks/razorpay",
        tampered,
        &[("X-Razorpay-Signature", sig.as_str())],
        configure_untouched_db,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn valid_phonepe_callback_creates_order() {
    let _ = env_logger::try_init().ok();
    let body = phonepe_success_body();
    let sig = sign_phonepe(PHONEPE_SECRET, &body);
    let (status, response) =
        post_request("/webhooks/phonepe", body, &[("X-VERIFY", sig.as_str())], configure_reconciles).await;
    assert_eq!(status, StatusCode::OK);
    assert!(response.contains("Order processed successfully."));
}

#[actix_web::test]
async fn valid_razorpay_webhook_creates_order() {
    let _ = env_logger::try_init().ok();
    let body = razorpay_captured_body();
    let sig = sign_plain_hex(RAZORPAY_SECRET, &body);
    let (status, response) = post_request(
        "/webhooks/razorpay",
        body,
        &[("X-Razorpay-Signature", sig.as_str())],
        configure_reconciles,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(response.contains("Order processed successfully."));
}

#[actix_web::test]
async fn permissive_mode_accepts_unsigned_phonepe_callback() {
    let _ = env_logger::try_init().ok();
    let body = phonepe_success_body();
    let (status, response) =
        post_request("/webhooks/phonepe", body, &[("X-VERIFY", "bogus###1")], configure_permissive).await;
    assert_eq!(status, StatusCode::OK);
    assert!(response.contains("Order processed successfully."));
}

#[actix_web::test]
async fn duplicate_delivery_is_acknowledged() {
    let _ = env_logger::try_init().ok();
    let body = razorpay_captured_body();
    let sig = sign_plain_hex(RAZORPAY_SECRET, &body);
    let (status, response) = post_request(
        "/webhooks/razorpay",
        body,
        &[("X-Razorpay-Signature", sig.as_str())],
        configure_duplicate,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(response.contains("Order already processed."));
}

#[actix_web::test]
async fn unknown_product_returns_not_found() {
    let _ = env_logger::try_init().ok();
    let body = razorpay_captured_body();
    let sig = sign_plain_hex(RAZORPAY_SECRET, &body);
    let (status, response) = post_request(
        "/webhooks/razorpay",
        body,
        &[("X-Razorpay-Signature", sig.as_str())],
        configure_product_missing,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(response.contains("Product 60f1abc does not exist"));
}

#[actix_web::test]
async fn non_actionable_event_is_acknowledged() {
    let _ = env_logger::try_init().ok();
    let body = br#"{"event":"payment.failed"}"#.to_vec();
    let sig = sign_plain_hex(RAZORPAY_SECRET, &body);
    let (status, response) = post_request(
        "/webhooks/razorpay",
        body,
        &[("X-Razorpay-Signature", sig.as_str())],
        configure_untouched_db,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(response.contains("Webhook received."));
}

#[actix_web::test]
async fn malformed_signed_body_is_rejected() {
    let _ = env_logger::try_init().ok();
    let body = b"not json at all".to_vec();
    let sig = sign_plain_hex(RAZORPAY_SECRET, &body);
    let (status, _) = post_request(
        "/webhooks/razorpay",
        body,
        &[("X-Razorpay-Signature", sig.as_str())],
        configure_untouched_db,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
