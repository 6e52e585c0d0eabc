//! Request handler definitions
//!
//! Define each route and it handler here.
//! Handlers that are more than a line or two MUST go into a separate module. Keep this module neat and tidy 🙏
//!
//! Webhook handlers take the raw body as `web::Bytes` because provider signatures are computed over the exact bytes
//! on the wire; deserializing first would make verification impossible.
use actix_web::{get, web, HttpRequest, HttpResponse, Responder};
use log::*;
use topup_payment_engine::{
    db_types::PaymentEvent,
    PaymentGatewayDatabase,
    PaymentGatewayError,
    ReconciliationApi,
};

use crate::{
    config::ServerConfig,
    data_objects::JsonResponse,
    errors::ServerError,
    webhooks::{decode_phonepe_callback, decode_razorpay_webhook, verify_signature, SignatureScheme},
};

// Web-actix cannot handle generics in handlers, so it's implemented manually using the `route!` macro
#[macro_export]
macro_rules! route {
    ($name:ident => $method:ident $path:literal impl $($bounds:ty),+) => {
        paste::paste! { pub struct [<$name:camel Route>]< $( [< T $bounds:camel> ],)+ >( $( core::marker::PhantomData<fn() -> [< T $bounds:camel> ] >,)+ );}
        paste::paste! { impl< $( [< T $bounds:camel> ],)+ > [<$name:camel Route>]< $( [< T $bounds:camel> ],)+ > {
            #[allow(clippy::new_without_default)]
            pub fn new() -> Self {
                Self($( core::marker::PhantomData::<fn() -> [< T $bounds:camel> ] >,)+)
            }
        }}
        paste::paste! { impl<$( [< T $bounds:camel >] , )+> actix_web::dev::HttpServiceFactory for [<$name:camel Route>]<$([<T $bounds:camel>],)+>
        where
            $([<T $bounds:camel>]: $bounds + 'static,)+
        {
            fn register(self, config: &mut actix_web::dev::AppService) {
                let res = actix_web::Resource::new($path)
                    .name(stringify!($name))
                    .guard(actix_web::guard::$method())
                    .to($name::< $( [< T $bounds:camel >], )+>);
                actix_web::dev::HttpServiceFactory::register(res, config);
            }
        }}
    };
}

// ----------------------------------------------   Health  ----------------------------------------------------
#[get("/health")]
pub async fn health() -> impl Responder {
    trace!("💻️ Received health check request");
    HttpResponse::Ok().body("👍️\n")
}

// --------------------------------------------   PhonePe webhook  ----------------------------------------------

route!(phonepe_webhook => Post "/webhooks/phonepe" impl PaymentGatewayDatabase);
/// Route handler for PhonePe payment callbacks.
///
/// The callback body is an envelope holding a base64-encoded status document, signed with the merchant client
/// secret in the `X-VERIFY` header. Only `PAYMENT_SUCCESS` callbacks create orders; any other status is
/// acknowledged so PhonePe stops redelivering it.
pub async fn phonepe_webhook<B: PaymentGatewayDatabase>(
    req: HttpRequest,
    body: web::Bytes,
    api: web::Data<ReconciliationApi<B>>,
    config: web::Data<ServerConfig>,
) -> Result<HttpResponse, ServerError> {
    trace!("📱️ Received PhonePe webhook request");
    let secret = config.phonepe.client_secret.reveal();
    if secret.is_empty() {
        return Err(ServerError::ConfigurationError("Webhook secret not configured.".to_string()));
    }
    let header = req.headers().get("X-VERIFY").and_then(|v| v.to_str().ok());
    if let Err(e) = verify_signature(SignatureScheme::PhonePe, secret, body.as_ref(), header) {
        if config.phonepe.permissive_signatures {
            warn!("🚨️ PhonePe webhook signature check failed ({e}), but permissive mode is enabled. Processing anyway.");
        } else {
            warn!("📱️ Rejecting PhonePe webhook. {e}");
            return Err(e.into());
        }
    }
    let event = match decode_phonepe_callback(body.as_ref())? {
        Some(event) => event,
        None => return Ok(HttpResponse::Ok().json(JsonResponse::success("Webhook received."))),
    };
    process_payment_event(event, api.as_ref()).await
}

// --------------------------------------------   Razorpay webhook  ---------------------------------------------

route!(razorpay_webhook => Post "/webhooks/razorpay" impl PaymentGatewayDatabase);
/// Route handler for Razorpay webhooks.
///
/// The body is flat JSON signed with the webhook secret in the `X-Razorpay-Signature` header. Only
/// `payment.captured` events create orders.
pub async fn razorpay_webhook<B: PaymentGatewayDatabase>(
    req: HttpRequest,
    body: web::Bytes,
    api: web::Data<ReconciliationApi<B>>,
    config: web::Data<ServerConfig>,
) -> Result<HttpResponse, ServerError> {
    trace!("💳️ Received Razorpay webhook request");
    let secret = config.razorpay.webhook_secret.reveal();
    if secret.is_empty() {
        return Err(ServerError::ConfigurationError("Webhook secret not configured.".to_string()));
    }
    let header = req.headers().get("X-Razorpay-Signature").and_then(|v| v.to_str().ok());
    if let Err(e) = verify_signature(SignatureScheme::Razorpay, secret, body.as_ref(), header) {
        warn!("💳️ Rejecting Razorpay webhook. {e}");
        return Err(e.into());
    }
    let event = match decode_razorpay_webhook(body.as_ref())? {
        Some(event) => event,
        None => return Ok(HttpResponse::Ok().json(JsonResponse::success("Webhook received."))),
    };
    process_payment_event(event, api.as_ref()).await
}

/// Hands a verified, decoded event to the reconciliation engine and shapes the webhook response.
///
/// Duplicate deliveries are acknowledged with 200; a non-2xx response would make the provider retry an event that
/// has already been fully processed.
async fn process_payment_event<B: PaymentGatewayDatabase>(
    event: PaymentEvent,
    api: &ReconciliationApi<B>,
) -> Result<HttpResponse, ServerError> {
    match api.process_event(&event).await {
        Ok(reconciled) => {
            info!("💻️ {} event [{}] reconciled as order #{}", event.provider(), event.dedup, reconciled.order.id);
            Ok(HttpResponse::Ok().json(JsonResponse::success("Order processed successfully.")))
        },
        Err(PaymentGatewayError::OrderAlreadyExists(key)) => {
            info!("💻️ Payment event [{key}] was already processed.");
            Ok(HttpResponse::Ok().json(JsonResponse::success("Order already processed.")))
        },
        Err(e @ PaymentGatewayError::ProductNotFound(_)) | Err(e @ PaymentGatewayError::UserNotFound(_)) => {
            warn!("💻️ Could not reconcile payment event [{}]. {e}", event.dedup);
            Err(e.into())
        },
        Err(PaymentGatewayError::DatabaseError(e)) => {
            warn!("💻️ Database error while reconciling payment event [{}]. {e}", event.dedup);
            Err(ServerError::BackendError(format!("Database transaction failed. {e}")))
        },
    }
}
