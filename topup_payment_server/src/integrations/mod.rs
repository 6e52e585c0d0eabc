//! Thin HTTP collaborators: the PhonePe pay API, the FCM-style push sender, and the storefront cache-invalidation
//! signal. All best-effort; none of them participate in the reconciliation transaction.
mod phonepe_api;
mod push;
mod revalidate;

pub use phonepe_api::{PhonePeApi, PhonePeApiError};
pub use push::{PushSender, PushSenderError};
pub use revalidate::{CacheInvalidator, CacheInvalidatorError};
