use hmac::{Hmac, Mac};
use sha2::Sha256;
use thiserror::Error;

type HmacSha256 = Hmac<Sha256>;

/// PhonePe suffixes the hex digest with `"###"` and the key index; the storefront always uses key index 1.
const PHONEPE_KEY_SUFFIX: &str = "###1";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignatureScheme {
    /// hex(HMAC-SHA256(secret, body)) + "###1", carried in `X-VERIFY`.
    PhonePe,
    /// hex(HMAC-SHA256(secret, body)), carried in `X-Razorpay-Signature`.
    Razorpay,
}

#[derive(Debug, Clone, Error)]
pub enum SignatureError {
    #[error("No signature header found in request")]
    MissingHeader,
    #[error("Signature does not match request body")]
    Mismatch,
}

#[derive(Debug, Clone, Error)]
pub enum DecodeError {
    #[error("Payload is not valid JSON: {0}")]
    InvalidJson(String),
    #[error("Payload is not valid base64: {0}")]
    InvalidBase64(String),
    #[error("Missing required field: {0}")]
    MissingField(String),
    #[error("Invalid transaction reference: {0}")]
    InvalidTransactionReference(String),
}

pub fn sign_plain_hex(secret: &str, data: &[u8]) -> String {
    let mac = hmac_over(secret, data);
    hex::encode(mac.finalize().into_bytes())
}

pub fn sign_phonepe(secret: &str, data: &[u8]) -> String {
    format!("{}{PHONEPE_KEY_SUFFIX}", sign_plain_hex(secret, data))
}

/// Verifies the provider signature over the exact raw body bytes.
///
/// The hex digest is decoded and handed to [`Mac::verify_slice`], which compares in constant time. A header that is
/// not valid hex (or, for PhonePe, lacks the key-index suffix) can never match and is reported as a mismatch.
pub fn verify_signature(
    scheme: SignatureScheme,
    secret: &str,
    body: &[u8],
    header: Option<&str>,
) -> Result<(), SignatureError> {
    let provided = header.ok_or(SignatureError::MissingHeader)?;
    let digest_hex = match scheme {
        SignatureScheme::PhonePe => provided.strip_suffix(PHONEPE_KEY_SUFFIX).ok_or(SignatureError::Mismatch)?,
        SignatureScheme::Razorpay => provided,
    };
    let digest = hex::decode(digest_hex).map_err(|_| SignatureError::Mismatch)?;
    hmac_over(secret, body).verify_slice(&digest).map_err(|_| SignatureError::Mismatch)
}

fn hmac_over(secret: &str, data: &[u8]) -> HmacSha256 {
    // new_from_slice only fails on empty-key digests, which HMAC does not have.
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC can take key of any size");
    mac.update(data);
    mac
}
