//! Closed error taxonomy for the gateway.
//!
//! Every failure is classified at the point of detection and travels to the
//! caller as a value. The messages are short and distinct enough for a UI to
//! render without reinterpretation; status codes are kept in the message where
//! one was available.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    /// Network-level failure: refused connection, DNS, timeout. Retrying later
    /// may succeed; the gateway itself never retries.
    #[error("connection failed: {0}; check your connection to the server")]
    Transport(String),

    /// The transport succeeded but the server reported a failure, either via a
    /// 5xx-class status or an in-band sentinel in the decrypted body.
    #[error("server error: {0}; try again later")]
    Server(String),

    /// The server rejected the credential (401).
    #[error("{0}")]
    Auth(String),

    /// The referenced resource does not exist (404).
    #[error("{0} not found (status 404)")]
    NotFound(&'static str),

    /// The server saw no credential at all (400). Distinct from `Auth`: the
    /// server distinguishes "no token" from "bad token".
    #[error("no credential supplied (status 400)")]
    MissingToken,

    /// The input is not a well-formed encrypted envelope. Local, no network
    /// round trip was attempted.
    #[error("envelope format error: {0}")]
    Format(String),

    /// Cipher initialization or the decrypt operation itself failed. Local.
    #[error("cipher error: {0}")]
    Cipher(String),

    /// Decrypted text is not valid JSON or does not match the expected shape.
    #[error("parse error: {0}")]
    Parse(String),

    /// A local precondition failed (typically: no active session). No network
    /// call was made.
    #[error("no active session: {0}")]
    InvalidSession(&'static str),
}

impl GatewayError {
    /// Classify an unsuccessful HTTP status. `resource` names what the call
    /// was after, so 404s read as "event not found" rather than a bare code.
    pub fn from_status(status: u16, resource: &'static str) -> Self {
        match status {
            400 => GatewayError::MissingToken,
            401 => GatewayError::Auth("invalid or expired session (status 401)".to_string()),
            404 => GatewayError::NotFound(resource),
            s => GatewayError::Server(format!("status {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_classification_is_distinguishable_by_kind() {
        assert_eq!(GatewayError::from_status(400, "event"), GatewayError::MissingToken);
        assert!(matches!(GatewayError::from_status(401, "event"), GatewayError::Auth(_)));
        assert_eq!(GatewayError::from_status(404, "event"), GatewayError::NotFound("event"));
        assert!(matches!(GatewayError::from_status(500, "event"), GatewayError::Server(_)));
        assert!(matches!(GatewayError::from_status(503, "event"), GatewayError::Server(_)));
    }

    #[test]
    fn messages_carry_the_status_code() {
        let err = GatewayError::from_status(500, "event");
        assert!(err.to_string().contains("status 500"));
        let err = GatewayError::from_status(401, "event");
        assert!(err.to_string().contains("401"));
    }
}
