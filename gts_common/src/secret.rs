use std::fmt;

const MASK: &str = "****";

/// Holds an HMAC secret or API key and keeps it out of log output.
///
/// Both `Debug` and `Display` print a fixed mask, so a secret can sit inside a config struct that gets logged
/// wholesale. The value is only reachable through an explicit [`Secret::reveal`] at the point of use.
#[derive(Clone, Default)]
pub struct Secret<T>(T);

impl<T> Secret<T> {
    pub fn new(value: T) -> Self {
        Self(value)
    }

    pub fn reveal(&self) -> &T {
        &self.0
    }
}

impl<T> fmt::Debug for Secret<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(MASK)
    }
}

impl<T> fmt::Display for Secret<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(MASK)
    }
}
