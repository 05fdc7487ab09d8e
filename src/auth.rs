//! Bearer credential handling for outbound document fetches.
//!
//! The export endpoint requires an `Authorization: Bearer <token>` header.
//! Tokens are supplied by an injected [`TokenProvider`] so hosts can plug in
//! whatever credential source they have (static config value, refreshing
//! OAuth flow, test fixture).
//!
//! # Security Note - Logging
//!
//! Header values are built through the [`RedactedHeader`] wrapper, which
//! implements `Display` and `Debug` as `[REDACTED]` so the token cannot leak
//! through request logging even if debug logging is accidentally enabled.

use std::fmt;

use reqwest::header;
use secrecy::{ExposeSecret, SecretString};

use crate::error::{CardstockError, Result};

/// Source of short-lived bearer credentials for outbound fetches.
pub trait TokenProvider: Send + Sync {
    /// Return the current bearer token.
    fn bearer_token(&self) -> Result<SecretString>;
}

/// Token provider backed by a single fixed token.
pub struct StaticTokenProvider {
    token: SecretString,
}

impl StaticTokenProvider {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: SecretString::from(token.into()),
        }
    }
}

impl TokenProvider for StaticTokenProvider {
    fn bearer_token(&self) -> Result<SecretString> {
        Ok(SecretString::from(self.token.expose_secret().to_owned()))
    }
}

/// Wrapper for sensitive header values that redacts the value when formatted.
pub struct RedactedHeader {
    value: String,
}

impl RedactedHeader {
    /// Build an `Authorization: Bearer` header value from a token.
    pub fn bearer(token: &SecretString) -> Self {
        Self {
            value: format!("Bearer {}", token.expose_secret()),
        }
    }

    /// Convert to a header value, marked sensitive so reqwest will not
    /// include it in its own debug output.
    pub fn as_header_value(&self) -> Result<header::HeaderValue> {
        let mut value = header::HeaderValue::from_str(&self.value)
            .map_err(|_| CardstockError::Auth("token is not a valid header value".to_string()))?;
        value.set_sensitive(true);
        Ok(value)
    }
}

impl fmt::Display for RedactedHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[REDACTED]")
    }
}

impl fmt::Debug for RedactedHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedactedHeader")
            .field("value", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_provider_returns_token() {
        let provider = StaticTokenProvider::new("tok_123");
        let token = provider.bearer_token().unwrap();
        assert_eq!(token.expose_secret(), "tok_123");
    }

    #[test]
    fn test_bearer_header_value() {
        let token = SecretString::from("tok_123".to_string());
        let header = RedactedHeader::bearer(&token);
        let value = header.as_header_value().unwrap();
        assert!(value.is_sensitive());
        assert_eq!(value.to_str().unwrap(), "Bearer tok_123");
    }

    #[test]
    fn test_redacted_in_debug_and_display() {
        let token = SecretString::from("tok_secret".to_string());
        let header = RedactedHeader::bearer(&token);
        assert_eq!(header.to_string(), "[REDACTED]");
        assert!(!format!("{header:?}").contains("tok_secret"));
    }

    #[test]
    fn test_invalid_header_value_is_auth_error() {
        let token = SecretString::from("tok\nnewline".to_string());
        let header = RedactedHeader::bearer(&token);
        assert!(matches!(
            header.as_header_value(),
            Err(CardstockError::Auth(_))
        ));
    }
}
