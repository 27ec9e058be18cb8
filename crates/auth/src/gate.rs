//! Request-boundary authentication: `Authorization: Bearer <token>`.

use std::sync::Arc;

use thiserror::Error;

use crate::token::{TokenCodec, TokenError};
use crate::{TokenPayload, TokenType};

pub const BEARER: &str = "bearer";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GateError {
    #[error("authorization header is not provided")]
    MissingAuthorization,

    #[error("invalid authorization header format")]
    MalformedHeader,

    #[error("unsupported authorization type {0}")]
    UnsupportedScheme(String),

    #[error(transparent)]
    Token(#[from] TokenError),
}

/// Verifies the bearer token of a request and yields its access payload.
#[derive(Debug, Clone)]
pub struct AuthGate {
    codec: Arc<TokenCodec>,
}

impl AuthGate {
    pub fn new(codec: Arc<TokenCodec>) -> Self {
        Self { codec }
    }

    /// Authenticates a raw `Authorization` header value (`None` if absent).
    pub fn authenticate(&self, header: Option<&str>) -> Result<TokenPayload, GateError> {
        let token = extract_bearer(header)?;
        Ok(self.codec.verify(token, TokenType::Access)?)
    }
}

/// Splits a header into scheme and credentials and checks the scheme.
pub fn extract_bearer(header: Option<&str>) -> Result<&str, GateError> {
    let header = match header {
        Some(h) if !h.is_empty() => h,
        _ => return Err(GateError::MissingAuthorization),
    };

    let mut fields = header.split_whitespace();
    let (Some(scheme), Some(token), None) = (fields.next(), fields.next(), fields.next()) else {
        return Err(GateError::MalformedHeader);
    };

    let scheme = scheme.to_lowercase();
    if scheme != BEARER {
        return Err(GateError::UnsupportedScheme(scheme));
    }

    Ok(token)
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;
    use crate::Role;

    fn gate() -> (AuthGate, Arc<TokenCodec>) {
        let codec = Arc::new(TokenCodec::new("12345678901234567890123456789012").unwrap());
        (AuthGate::new(codec.clone()), codec)
    }

    #[test]
    fn missing_or_empty_header() {
        let (gate, _) = gate();
        assert_eq!(gate.authenticate(None), Err(GateError::MissingAuthorization));
        assert_eq!(gate.authenticate(Some("")), Err(GateError::MissingAuthorization));
    }

    #[test]
    fn wrong_field_count_is_malformed() {
        assert_eq!(extract_bearer(Some("InvalidFormat")), Err(GateError::MalformedHeader));
        assert_eq!(extract_bearer(Some("   ")), Err(GateError::MalformedHeader));
        assert_eq!(extract_bearer(Some("Bearer a b")), Err(GateError::MalformedHeader));
    }

    #[test]
    fn unsupported_scheme_names_the_scheme() {
        let err = extract_bearer(Some("Basic dGVzdDp0ZXN0")).unwrap_err();
        assert_eq!(err, GateError::UnsupportedScheme("basic".to_string()));
        assert_eq!(err.to_string(), "unsupported authorization type basic");
    }

    #[test]
    fn scheme_is_case_insensitive() {
        assert_eq!(extract_bearer(Some("BEARER abc")), Ok("abc"));
        assert_eq!(extract_bearer(Some("bearer  abc")), Ok("abc"));
    }

    #[test]
    fn codec_errors_surface_unchanged() {
        let (gate, codec) = gate();
        assert_eq!(
            gate.authenticate(Some("Bearer invalid.token.here")),
            Err(GateError::Token(TokenError::InvalidToken))
        );

        let expired = codec
            .mint("testuser", &Role::ADMIN, Duration::hours(-1), TokenType::Access)
            .unwrap();
        let err = gate.authenticate(Some(&format!("Bearer {expired}"))).unwrap_err();
        assert_eq!(err, GateError::Token(TokenError::ExpiredToken));
        assert_eq!(err.to_string(), "token has expired");
    }

    #[test]
    fn refresh_tokens_do_not_authenticate_requests() {
        let (gate, codec) = gate();
        let refresh = codec
            .mint("testuser", &Role::ADMIN, Duration::hours(1), TokenType::Refresh)
            .unwrap();
        assert_eq!(
            gate.authenticate(Some(&format!("Bearer {refresh}"))),
            Err(GateError::Token(TokenError::InvalidToken))
        );
    }

    #[test]
    fn valid_access_token_yields_payload() {
        let (gate, codec) = gate();
        let token = codec
            .mint("testuser", &Role::ADMIN, Duration::hours(1), TokenType::Access)
            .unwrap();
        let payload = gate.authenticate(Some(&format!("Bearer {token}"))).unwrap();
        assert_eq!(payload.subject, "testuser");
        assert_eq!(payload.role, Role::ADMIN);
    }
}
