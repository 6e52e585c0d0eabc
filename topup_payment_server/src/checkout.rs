//----------------------------------------------   Checkout  ----------------------------------------------------

use actix_web::{web, HttpResponse};
use log::*;
use topup_payment_engine::{db_types::TxnRef, PaymentGatewayDatabase, ReconciliationApi};

use crate::{
    data_objects::{CheckoutRequest, CheckoutResponse},
    errors::ServerError,
    integrations::{PhonePeApi, PhonePeApiError},
    route,
};

route!(checkout_phonepe => Post "/checkout/phonepe" impl PaymentGatewayDatabase);
/// Initiates a PhonePe pay-page order.
///
/// Validates that the product and user exist, mints the merchant transaction reference
/// (`{millis}-{gamingId}-{productId}`) that the webhook decoder will later parse, and asks PhonePe for a pay-page
/// redirect URL. No order is created here; the order only exists once the payment callback settles it.
pub async fn checkout_phonepe<B: PaymentGatewayDatabase>(
    body: web::Json<CheckoutRequest>,
    api: web::Data<ReconciliationApi<B>>,
    phonepe: web::Data<PhonePeApi>,
) -> Result<HttpResponse, ServerError> {
    let request = body.into_inner();
    trace!("🛒️ Received checkout request for product {} by {}", request.product_id, request.gaming_id);
    let product = api
        .db()
        .fetch_product(&request.product_id)
        .await?
        .ok_or_else(|| ServerError::NoRecordFound(format!("Product {} does not exist", request.product_id)))?;
    if !product.is_available {
        return Err(ServerError::InvalidRequestBody(format!("Product {} is not available", product.id)));
    }
    let user = api
        .db()
        .fetch_user_by_gaming_id(&request.gaming_id)
        .await?
        .ok_or_else(|| ServerError::NoRecordFound(format!("No user found with gaming id {}", request.gaming_id)))?;
    let txn_ref = TxnRef::new(&user.gaming_id, &product.id);
    let redirect_url = match phonepe.create_pay_page_order(&txn_ref, user.id, request.amount()).await {
        Ok(url) => url,
        Err(e @ PhonePeApiError::NotConfigured) => {
            error!("🛒️ PhonePe checkout is not configured. {e}");
            return Err(ServerError::ConfigurationError("Payment gateway not configured.".to_string()));
        },
        Err(e) => {
            warn!("🛒️ Could not create PhonePe order for {txn_ref}. {e}");
            return Err(ServerError::PaymentGatewayError(e.to_string()));
        },
    };
    info!("🛒️ Pay page created for {txn_ref}");
    Ok(HttpResponse::Ok().json(CheckoutResponse { success: true, redirect_url }))
}
