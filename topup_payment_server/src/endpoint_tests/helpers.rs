use actix_web::{body::MessageBody, http::StatusCode, test, test::TestRequest, web::ServiceConfig, App};
use chrono::Utc;
use gts_common::{Rupees, Secret};
use log::debug;
use topup_payment_engine::db_types::{Order, OrderStatusType, PaymentMethod, ReconciledOrder};

use crate::config::ServerConfig;

/// A `ServerConfig` with webhook secrets set, as tests need it. Never reuse these values anywhere.
pub fn test_config() -> ServerConfig {
    let mut config = ServerConfig::default();
    config.phonepe.client_secret = Secret::new("phonepe-test-secret".to_string());
    config.razorpay.webhook_secret = Secret::new("razorpay-test-secret".to_string());
    config
}

pub const PHONEPE_SECRET: &str = "phonepe-test-secret";
pub const RAZORPAY_SECRET: &str = "razorpay-test-secret";

pub async fn post_request(
    path: &str,
    body: Vec<u8>,
    headers: &[(&str, &str)],
    configure: fn(&mut ServiceConfig),
) -> (StatusCode, String) {
    let mut req = TestRequest::post().uri(path).set_payload(body);
    for (name, value) in headers {
        req = req.insert_header((*name, *value));
    }
    let req = req.to_request();
    let app = App::new().configure(configure);
    let service = test::init_service(app).await;
    debug!("Making request to {path}");
    let res = test::call_service(&service, req).await;
    let (_, res) = res.into_parts();
    let status = res.status();
    let body = String::from_utf8_lossy(&res.into_body().try_into_bytes().unwrap()).into_owned();
    (status, body)
}

pub fn reconciled_order(id: i64) -> ReconciledOrder {
    let order = Order {
        id,
        user_id: 1,
        gaming_id: "GID123".to_string(),
        product_id: "60f1abc".to_string(),
        product_name: "1000 Diamonds".to_string(),
        product_price: Rupees::from_rupees(499),
        product_image_url: None,
        payment_method: PaymentMethod::Upi,
        status: OrderStatusType::Processing,
        transaction_id: Some("1700000000000-GID123-60f1abc".to_string()),
        utr: None,
        referral_code: None,
        coins_used: 5,
        final_price: Rupees::from_rupees(499),
        is_coin_product: false,
        coins_at_time_of_purchase: 5,
        created_at: Utc::now(),
    };
    ReconciledOrder { order, fcm_token: None }
}
