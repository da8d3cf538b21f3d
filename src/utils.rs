use tracing_subscriber::{EnvFilter, fmt};

use crate::error::{Error, Result};

/// Parses a stored template identifier.
///
/// Only plain base-10 digits are accepted: no sign, no whitespace, no zero.
pub fn parse_template_id(value: &str) -> Result<i64> {
    if value.is_empty() {
        return Err(Error::identifier(value, "identifier is empty"));
    }

    if !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::identifier(value, "identifier must contain only digits"));
    }

    let id = value
        .parse::<i64>()
        .map_err(|e| Error::identifier(value, e.to_string()))?;

    if id == 0 {
        return Err(Error::identifier(value, "identifier must be non-zero"));
    }

    Ok(id)
}

pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt().json().with_env_filter(filter).with_target(false).init();
}
