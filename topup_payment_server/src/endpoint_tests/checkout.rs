use actix_web::{http::StatusCode, web, web::ServiceConfig};
use gts_common::Rupees;
use topup_payment_engine::{
    db_types::{Product, User},
    events::EventProducers,
    ReconciliationApi,
};

use super::{helpers::post_request, mocks::MockPaymentGateway};
use crate::{checkout::CheckoutPhonepeRoute, config::PhonePeConfig, integrations::PhonePeApi};

fn checkout_body() -> Vec<u8> {
    serde_json::json!({ "amount": 499, "gaming_id": "GID123", "product_id": "60f1abc" }).to_string().into_bytes()
}

fn diamond_pack(is_available: bool) -> Product {
    Product {
        id: "60f1abc".to_string(),
        name: "1000 Diamonds".to_string(),
        price: Rupees::from_rupees(499),
        image_url: None,
        coins_applicable: Some(50),
        is_coin_product: false,
        quantity: 0,
        purchase_price: None,
        is_available,
    }
}

fn buyer() -> User {
    User {
        id: 1,
        gaming_id: "GID123".to_string(),
        coins: 0,
        referred_by_code: None,
        fcm_token: None,
        is_redeem_disabled: false,
    }
}

fn register(cfg: &mut ServiceConfig, db: MockPaymentGateway) {
    let api = ReconciliationApi::new(db, EventProducers::default());
    // Default credentials are empty, so the pay call reports "not configured" before any request leaves.
    let phonepe = PhonePeApi::new(PhonePeConfig::default()).expect("Error creating PhonePe client");
    cfg.app_data(web::Data::new(api))
        .app_data(web::Data::new(phonepe))
        .service(CheckoutPhonepeRoute::<MockPaymentGateway>::new());
}

fn configure_product_missing(cfg: &mut ServiceConfig) {
    let mut db = MockPaymentGateway::new();
    db.expect_fetch_product().returning(|_| Ok(None));
    register(cfg, db);
}

fn configure_product_unavailable(cfg: &mut ServiceConfig) {
    let mut db = MockPaymentGateway::new();
    db.expect_fetch_product().returning(|_| Ok(Some(diamond_pack(false))));
    register(cfg, db);
}

fn configure_user_missing(cfg: &mut ServiceConfig) {
    let mut db = MockPaymentGateway::new();
    db.expect_fetch_product().returning(|_| Ok(Some(diamond_pack(true))));
    db.expect_fetch_user_by_gaming_id().returning(|_| Ok(None));
    register(cfg, db);
}

fn configure_gateway_unconfigured(cfg: &mut ServiceConfig) {
    let mut db = MockPaymentGateway::new();
    db.expect_fetch_product().returning(|_| Ok(Some(diamond_pack(true))));
    db.expect_fetch_user_by_gaming_id().returning(|_| Ok(Some(buyer())));
    register(cfg, db);
}

async fn post_checkout(configure: fn(&mut ServiceConfig)) -> (StatusCode, String) {
    post_request(
        "/checkout/phonepe",
        checkout_body(),
        &[("Content-Type", "application/json")],
        configure,
    )
    .await
}

#[actix_web::test]
async fn unknown_product_is_rejected() {
    let _ = env_logger::try_init().ok();
    let (status, response) = post_checkout(configure_product_missing).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(response.contains("Product 60f1abc does not exist"));
}

#[actix_web::test]
async fn unavailable_product_is_rejected() {
    let _ = env_logger::try_init().ok();
    let (status, response) = post_checkout(configure_product_unavailable).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(response.contains("Product 60f1abc is not available"));
}

#[actix_web::test]
async fn unknown_user_is_rejected() {
    let _ = env_logger::try_init().ok();
    let (status, response) = post_checkout(configure_user_missing).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(response.contains("No user found with gaming id GID123"));
}

#[actix_web::test]
async fn missing_gateway_credentials_fail_closed() {
    let _ = env_logger::try_init().ok();
    let (status, response) = post_checkout(configure_gateway_unconfigured).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(response.contains("Payment gateway not configured."));
}
