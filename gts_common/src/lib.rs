mod rupees;

pub mod helpers;
pub mod op;
mod secret;

pub use rupees::{Rupees, RupeesConversionError};
pub use secret::Secret;
