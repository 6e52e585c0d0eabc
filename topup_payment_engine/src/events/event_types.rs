use crate::db_types::{Order, ReconciledOrder};

/// Published once per successfully committed reconciliation. Carries everything the best-effort side effects need,
/// so handlers never have to touch the database for the common case.
#[derive(Debug, Clone)]
pub struct OrderReconciledEvent {
    pub order: Order,
    pub fcm_token: Option<String>,
}

impl From<ReconciledOrder> for OrderReconciledEvent {
    fn from(rec: ReconciledOrder) -> Self {
        Self { order: rec.order, fcm_token: rec.fcm_token }
    }
}
