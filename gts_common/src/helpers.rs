/// Interprets an environment-variable value as a boolean switch.
///
/// The usual spellings are accepted in any case; anything unrecognised, including an unset variable, falls back to
/// `default`, so a typo can never silently flip a flag.
pub fn parse_boolean_flag(value: Option<String>, default: bool) -> bool {
    let normalized = value.map(|v| v.trim().to_ascii_lowercase());
    match normalized.as_deref() {
        Some("1" | "true" | "yes" | "on") => true,
        Some("0" | "false" | "no" | "off") => false,
        _ => default,
    }
}
