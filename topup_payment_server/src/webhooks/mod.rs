//! Provider webhook plumbing: signature verification over the raw body, and per-provider payload decoding into the
//! engine's normalized [`PaymentEvent`](topup_payment_engine::db_types::PaymentEvent).
mod phonepe;
mod razorpay;
mod verify;

pub use phonepe::decode_phonepe_callback;
pub use razorpay::decode_razorpay_webhook;
pub use verify::{sign_phonepe, sign_plain_hex, verify_signature, DecodeError, SignatureError, SignatureScheme};
