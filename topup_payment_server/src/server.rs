use std::time::Duration;

use actix_web::{dev::Server, http::KeepAlive, middleware::Logger, web, App, HttpServer};
use topup_payment_engine::{
    events::{EventHandlers, EventProducers},
    ReconciliationApi,
    SqliteDatabase,
};

use crate::{
    checkout::CheckoutPhonepeRoute,
    config::ServerConfig,
    errors::ServerError,
    integrations::{CacheInvalidator, PhonePeApi, PushSender},
    routes::{health, PhonepeWebhookRoute, RazorpayWebhookRoute},
    side_effects::reconciliation_hooks,
};

pub async fn run_server(config: ServerConfig) -> Result<(), ServerError> {
    let db = SqliteDatabase::new_with_url(&config.database_url, 25)
        .await
        .map_err(|e| ServerError::InitializeError(e.to_string()))?;
    let push = PushSender::new(config.push.clone()).map_err(|e| ServerError::InitializeError(e.to_string()))?;
    let invalidator =
        CacheInvalidator::new(config.revalidate.clone()).map_err(|e| ServerError::InitializeError(e.to_string()))?;
    let hooks = reconciliation_hooks(db.clone(), push, invalidator);
    let handlers = EventHandlers::new(50, hooks);
    let producers = handlers.producers();
    handlers.start_handlers().await;
    let srv = create_server_instance(config, db, producers)?;
    srv.await.map_err(|e| ServerError::Unspecified(e.to_string()))
}

pub fn create_server_instance(
    config: ServerConfig,
    db: SqliteDatabase,
    producers: EventProducers,
) -> Result<Server, ServerError> {
    let phonepe_api =
        PhonePeApi::new(config.phonepe.clone()).map_err(|e| ServerError::InitializeError(e.to_string()))?;
    // The closure captures the whole config; the bind address must be taken out first.
    let (host, port) = (config.host.clone(), config.port);
    let srv = HttpServer::new(move || {
        let api = ReconciliationApi::new(db.clone(), producers.clone());
        App::new()
            .wrap(Logger::new("%t (%D ms) %s %a %{Host}i %U").log_target("gts::access_log"))
            .app_data(web::Data::new(api))
            .app_data(web::Data::new(config.clone()))
            .app_data(web::Data::new(phonepe_api.clone()))
            .service(health)
            .service(PhonepeWebhookRoute::<SqliteDatabase>::new())
            .service(RazorpayWebhookRoute::<SqliteDatabase>::new())
            .service(CheckoutPhonepeRoute::<SqliteDatabase>::new())
    })
    .keep_alive(KeepAlive::Timeout(Duration::from_secs(600)))
    .bind((host.as_str(), port))?
    .run();
    Ok(srv)
}
