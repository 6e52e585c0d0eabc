use actix_web::{
    error::ResponseError,
    http::{header::ContentType, StatusCode},
    HttpResponse,
};
use log::error;
use thiserror::Error;
use topup_payment_engine::PaymentGatewayError;

use crate::webhooks::{DecodeError, SignatureError};

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Could not initialize server. {0}")]
    InitializeError(String),
    #[error("An error occurred on the backend of the server. {0}")]
    BackendError(String),
    #[error("Invalid server configuration. {0}")]
    ConfigurationError(String),
    #[error("Webhook signature invalid or not provided. {0}")]
    InvalidSignature(#[from] SignatureError),
    #[error("Could not decode webhook payload. {0}")]
    DecodeError(#[from] DecodeError),
    #[error("Could not read request body: {0}")]
    InvalidRequestBody(String),
    #[error("The data was not found. {0}")]
    NoRecordFound(String),
    #[error("The payment gateway rejected the request. {0}")]
    PaymentGatewayError(String),
    #[error("An I/O error happened in the server. {0}")]
    IOError(#[from] std::io::Error),
    #[error("UnspecifiedError. {0}")]
    Unspecified(String),
}

impl ResponseError for ServerError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidSignature(_) => StatusCode::BAD_REQUEST,
            Self::DecodeError(_) => StatusCode::BAD_REQUEST,
            Self::InvalidRequestBody(_) => StatusCode::BAD_REQUEST,
            Self::NoRecordFound(_) => StatusCode::NOT_FOUND,
            Self::PaymentGatewayError(_) => StatusCode::BAD_GATEWAY,
            Self::InitializeError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::BackendError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::ConfigurationError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::IOError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Unspecified(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .insert_header(ContentType::json())
            .body(serde_json::json!({ "success": false, "message": self.to_string() }).to_string())
    }
}

impl From<PaymentGatewayError> for ServerError {
    fn from(e: PaymentGatewayError) -> Self {
        match e {
            PaymentGatewayError::ProductNotFound(_) | PaymentGatewayError::UserNotFound(_) => {
                Self::NoRecordFound(e.to_string())
            },
            PaymentGatewayError::DatabaseError(e) => Self::BackendError(format!("Database error: {e}")),
            PaymentGatewayError::OrderAlreadyExists(key) => {
                // Duplicates are acknowledged with 200 at the handler level. Reaching this branch means a handler
                // forgot to do so.
                Self::Unspecified(format!("Duplicate payment event [{key}] was not acknowledged"))
            },
        }
    }
}
