//! Pure helper functions for the reconciliation flow. Everything here is side-effect free and is called from
//! inside the atomic section with values read in that same transaction.
mod economics;
mod templates;

pub use economics::{coins_used, final_price, referral_reward, terminal_status};
pub use templates::notification_message;
