use std::env;

use gts_common::{helpers::parse_boolean_flag, Secret};
use log::*;

const DEFAULT_GTS_HOST: &str = "127.0.0.1";
const DEFAULT_GTS_PORT: u16 = 8480;
const DEFAULT_PHONEPE_HOST_URL: &str = "https://api-preprod.phonepe.com/apis/pg-sandbox";
const DEFAULT_FCM_ENDPOINT: &str = "https://fcm.googleapis.com/fcm/send";
const DEFAULT_REVALIDATE_PATHS: &[&str] = &["/", "/order", "/admin"];

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub phonepe: PhonePeConfig,
    pub razorpay: RazorpayConfig,
    pub push: PushConfig,
    pub revalidate: RevalidateConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_GTS_HOST.to_string(),
            port: DEFAULT_GTS_PORT,
            database_url: String::default(),
            phonepe: PhonePeConfig::default(),
            razorpay: RazorpayConfig::default(),
            push: PushConfig::default(),
            revalidate: RevalidateConfig::default(),
        }
    }
}

impl ServerConfig {
    pub fn new(host: &str, port: u16) -> Self {
        Self { host: host.to_string(), port, ..Default::default() }
    }

    pub fn from_env_or_default() -> Self {
        let host = env::var("GTS_HOST").ok().unwrap_or_else(|| DEFAULT_GTS_HOST.into());
        let port = env::var("GTS_PORT")
            .map(|s| {
                s.parse::<u16>().unwrap_or_else(|e| {
                    error!(
                        "🪛️ {s} is not a valid port for GTS_PORT. {e} Using the default, {DEFAULT_GTS_PORT}, instead."
                    );
                    DEFAULT_GTS_PORT
                })
            })
            .ok()
            .unwrap_or(DEFAULT_GTS_PORT);
        let database_url = env::var("GTS_DATABASE_URL").ok().unwrap_or_else(|| {
            error!("🪛️ GTS_DATABASE_URL is not set. Please set it to the URL for the storefront database.");
            String::default()
        });
        let phonepe = PhonePeConfig::from_env_or_default();
        let razorpay = RazorpayConfig::from_env_or_default();
        let push = PushConfig::from_env_or_default();
        let revalidate = RevalidateConfig::from_env_or_default();
        Self { host, port, database_url, phonepe, razorpay, push, revalidate }
    }
}

#[derive(Clone, Debug, Default)]
pub struct PhonePeConfig {
    pub merchant_id: String,
    pub client_id: String,
    /// Signs outgoing pay requests and verifies incoming webhook signatures.
    pub client_secret: Secret<String>,
    /// The PhonePe API host. Defaults to the sandbox; use "https://api.phonepe.com/apis/hermes" in production.
    pub host_url: String,
    /// Public base URL of the storefront, used for the redirect and callback URLs on pay requests.
    pub base_url: String,
    /// When true, webhook signature mismatches are logged and the request is processed anyway. Sandbox callbacks
    /// are not always signed with the merchant secret. NEVER enable this in production.
    pub permissive_signatures: bool,
}

impl PhonePeConfig {
    pub fn from_env_or_default() -> Self {
        let merchant_id = env::var("GTS_PHONEPE_MERCHANT_ID").ok().unwrap_or_else(|| {
            warn!("🪛️ GTS_PHONEPE_MERCHANT_ID is not set. PhonePe checkout will be unavailable.");
            String::default()
        });
        let client_id = env::var("GTS_PHONEPE_CLIENT_ID").ok().unwrap_or_default();
        let client_secret = env::var("GTS_PHONEPE_CLIENT_SECRET").map(Secret::new).unwrap_or_else(|_| {
            warn!("🪛️ GTS_PHONEPE_CLIENT_SECRET is not set. PhonePe webhooks will be rejected.");
            Secret::default()
        });
        let host_url = env::var("GTS_PHONEPE_HOST_URL").ok().unwrap_or_else(|| DEFAULT_PHONEPE_HOST_URL.into());
        let base_url = env::var("GTS_BASE_URL").ok().unwrap_or_else(|| {
            warn!("🪛️ GTS_BASE_URL is not set. PhonePe redirect and callback URLs will be relative.");
            String::default()
        });
        let permissive_signatures =
            parse_boolean_flag(env::var("GTS_PHONEPE_PERMISSIVE_SIGNATURES").ok(), false);
        if permissive_signatures {
            warn!(
                "🚨️ GTS_PHONEPE_PERMISSIVE_SIGNATURES is enabled. PhonePe webhooks with invalid signatures WILL BE \
                 PROCESSED. This must never be enabled in production."
            );
        }
        Self { merchant_id, client_id, client_secret, host_url, base_url, permissive_signatures }
    }
}

#[derive(Clone, Debug, Default)]
pub struct RazorpayConfig {
    pub webhook_secret: Secret<String>,
}

impl RazorpayConfig {
    pub fn from_env_or_default() -> Self {
        let webhook_secret = env::var("GTS_RAZORPAY_WEBHOOK_SECRET").map(Secret::new).unwrap_or_else(|_| {
            warn!("🪛️ GTS_RAZORPAY_WEBHOOK_SECRET is not set. Razorpay webhooks will be rejected.");
            Secret::default()
        });
        Self { webhook_secret }
    }
}

#[derive(Clone, Debug, Default)]
pub struct PushConfig {
    pub server_key: Secret<String>,
    pub endpoint: String,
}

impl PushConfig {
    pub fn from_env_or_default() -> Self {
        let server_key = env::var("GTS_FCM_SERVER_KEY").map(Secret::new).unwrap_or_else(|_| {
            info!("🪛️ GTS_FCM_SERVER_KEY is not set. Push notifications are disabled.");
            Secret::default()
        });
        let endpoint = env::var("GTS_FCM_ENDPOINT").ok().unwrap_or_else(|| DEFAULT_FCM_ENDPOINT.into());
        Self { server_key, endpoint }
    }

    pub fn is_enabled(&self) -> bool {
        !self.server_key.reveal().is_empty()
    }
}

#[derive(Clone, Debug, Default)]
pub struct RevalidateConfig {
    /// Storefront endpoint that receives cache-invalidation signals after a successful reconciliation. When unset,
    /// no signal is sent.
    pub endpoint: Option<String>,
    pub paths: Vec<String>,
}

impl RevalidateConfig {
    pub fn from_env_or_default() -> Self {
        let endpoint = env::var("GTS_REVALIDATE_ENDPOINT").ok();
        if endpoint.is_none() {
            info!("🪛️ GTS_REVALIDATE_ENDPOINT is not set. Cache invalidation signals are disabled.");
        }
        let paths = env::var("GTS_REVALIDATE_PATHS")
            .map(|s| s.split(',').map(|p| p.trim().to_string()).filter(|p| !p.is_empty()).collect())
            .unwrap_or_else(|_| DEFAULT_REVALIDATE_PATHS.iter().map(|s| s.to_string()).collect());
        Self { endpoint, paths }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let config = ServerConfig::default();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8480);
        assert!(!config.phonepe.permissive_signatures);
        assert!(!config.push.is_enabled());
        assert!(config.revalidate.endpoint.is_none());
    }
}
