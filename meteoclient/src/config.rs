//! Gateway configuration, owned by the caller and injected at construction.

use std::time::Duration;

// The original client could hang forever on a dead server; every transport
// call now carries a deadline.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// How the encrypted token is carried in the `Authorization` header.
///
/// Both conventions exist across revisions of the server protocol: some
/// endpoint families expect the raw envelope after `Bearer `, others expect
/// the envelope's UTF-8 bytes base64-encoded once more. The current server
/// contract uses the raw envelope everywhere, which is the default policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialEncoding {
    /// `Bearer ENC_...`
    Envelope,
    /// `Bearer base64(ENC_... bytes)`
    Base64Envelope,
}

/// Endpoint families that may disagree on the credential encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndpointFamily {
    /// Login and logout.
    Session,
    /// List, get-by-id and weather reads.
    Query,
    /// Create, update, delete and associations.
    Mutation,
}

/// Per-family credential encoding selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialPolicy {
    pub session: CredentialEncoding,
    pub query: CredentialEncoding,
    pub mutation: CredentialEncoding,
}

impl CredentialPolicy {
    pub fn encoding_for(&self, family: EndpointFamily) -> CredentialEncoding {
        match family {
            EndpointFamily::Session => self.session,
            EndpointFamily::Query => self.query,
            EndpointFamily::Mutation => self.mutation,
        }
    }
}

impl Default for CredentialPolicy {
    fn default() -> Self {
        CredentialPolicy {
            session: CredentialEncoding::Envelope,
            query: CredentialEncoding::Envelope,
            mutation: CredentialEncoding::Envelope,
        }
    }
}

#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Server base URL, e.g. `http://localhost:8080`.
    pub base_url: String,
    /// Deadline applied to every transport call.
    pub timeout: Duration,
    pub credentials: CredentialPolicy,
}

impl GatewayConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        GatewayConfig {
            base_url: base_url.into(),
            timeout: DEFAULT_TIMEOUT,
            credentials: CredentialPolicy::default(),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_credentials(mut self, credentials: CredentialPolicy) -> Self {
        self.credentials = credentials;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_policy_uses_the_raw_envelope_everywhere() {
        let config = GatewayConfig::new("http://localhost:8080");
        for family in [
            EndpointFamily::Session,
            EndpointFamily::Query,
            EndpointFamily::Mutation,
        ] {
            assert_eq!(
                config.credentials.encoding_for(family),
                CredentialEncoding::Envelope
            );
        }
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
    }
}
