use std::fmt::Display;

use gts_common::Rupees;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonResponse {
    pub success: bool,
    pub message: String,
}

impl JsonResponse {
    pub fn success<S: Display>(message: S) -> Self {
        Self { success: true, message: message.to_string() }
    }

    pub fn failure<S: Display>(message: S) -> Self {
        Self { success: false, message: message.to_string() }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutRequest {
    /// Amount payable, in rupees.
    pub amount: i64,
    pub gaming_id: String,
    pub product_id: String,
}

impl CheckoutRequest {
    pub fn amount(&self) -> Rupees {
        Rupees::from_rupees(self.amount)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutResponse {
    pub success: bool,
    pub redirect_url: String,
}
