//! The gateway itself: session holder plus the request pipeline every
//! operation runs through.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::Mutex;

use meteo::cipher;
use meteo::error::GatewayError;

use crate::config::{CredentialEncoding, EndpointFamily, GatewayConfig};
use crate::session::Session;
use crate::transport::{Transport, Verb, WireRequest, WireResponse};

/// Secure session gateway. Holds the one active session; every operation is a
/// method on this type. Read-only operations are safe to run concurrently;
/// the mutex serializes the session mutations login and logout perform.
pub struct Gateway<T: Transport> {
    config: GatewayConfig,
    transport: T,
    session: Mutex<Option<Session>>,
}

impl<T: Transport> Gateway<T> {
    pub fn new(config: GatewayConfig, transport: T) -> Self {
        Gateway {
            config,
            transport,
            session: Mutex::new(None),
        }
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Snapshot of the current session, if any.
    pub async fn current_session(&self) -> Option<Session> {
        self.session.lock().await.clone()
    }

    pub(crate) async fn store_session(&self, session: Session) {
        *self.session.lock().await = Some(session);
    }

    /// Token and role are cleared together; there is no partial clear.
    pub(crate) async fn clear_session(&self) {
        *self.session.lock().await = None;
    }

    /// Build the `Authorization` header value for an authenticated call.
    /// Missing session short-circuits locally; no network call is made.
    pub(crate) async fn bearer(
        &self,
        family: EndpointFamily,
        operation: &'static str,
    ) -> Result<String, GatewayError> {
        let token = {
            let session = self.session.lock().await;
            match session.as_ref() {
                Some(s) => s.token.clone(),
                None => return Err(GatewayError::InvalidSession(operation)),
            }
        };
        let envelope = cipher::encrypt(&token)?;
        Ok(match self.config.credentials.encoding_for(family) {
            CredentialEncoding::Envelope => format!("Bearer {}", envelope),
            CredentialEncoding::Base64Envelope => {
                format!("Bearer {}", BASE64.encode(envelope.as_bytes()))
            }
        })
    }

    /// Raw transport call, for the operations that need to inspect the status
    /// themselves (login distinguishes its own 401).
    pub(crate) async fn transport_execute(
        &self,
        request: WireRequest,
    ) -> Result<WireResponse, GatewayError> {
        self.transport.execute(request).await
    }

    /// Send a request and classify a non-success status without touching the
    /// body. The transport's own failures arrive already classified.
    pub(crate) async fn send(
        &self,
        request: WireRequest,
        resource: &'static str,
    ) -> Result<WireResponse, GatewayError> {
        let response = self.transport.execute(request).await?;
        if !response.is_success() {
            return Err(GatewayError::from_status(response.status, resource));
        }
        Ok(response)
    }

    /// Authenticated call returning the decrypted response text.
    pub(crate) async fn fetch_decrypted(
        &self,
        verb: Verb,
        path: String,
        family: EndpointFamily,
        resource: &'static str,
    ) -> Result<String, GatewayError> {
        let bearer = self.bearer(family, resource).await?;
        let mut request = WireRequest::new(verb, path);
        request.bearer = Some(bearer);
        let response = self.send(request, resource).await?;
        cipher::decrypt(&response.body)
    }

    /// Authenticated call parsed straight into `D` (lists included; an empty
    /// JSON array is a valid empty sequence).
    pub(crate) async fn fetch_json<D: DeserializeOwned>(
        &self,
        verb: Verb,
        path: String,
        family: EndpointFamily,
        resource: &'static str,
    ) -> Result<D, GatewayError> {
        let decrypted = self.fetch_decrypted(verb, path, family, resource).await?;
        serde_json::from_str(&decrypted)
            .map_err(|e| GatewayError::Parse(format!("{}: {}", resource, e)))
    }

    /// Like [`fetch_json`], for endpoints that nest the real payload one level
    /// under a `"body"` key.
    pub(crate) async fn fetch_json_body<D: DeserializeOwned>(
        &self,
        verb: Verb,
        path: String,
        family: EndpointFamily,
        resource: &'static str,
    ) -> Result<D, GatewayError> {
        let decrypted = self.fetch_decrypted(verb, path, family, resource).await?;
        let wrapper: serde_json::Value = serde_json::from_str(&decrypted)
            .map_err(|e| GatewayError::Parse(format!("{}: {}", resource, e)))?;
        let body = wrapper
            .get("body")
            .cloned()
            .ok_or_else(|| GatewayError::Parse(format!("{}: missing \"body\" key", resource)))?;
        serde_json::from_value(body)
            .map_err(|e| GatewayError::Parse(format!("{}: {}", resource, e)))
    }

    /// Authenticated call with an encrypted JSON body; success returns unit.
    pub(crate) async fn send_encrypted<B: Serialize>(
        &self,
        verb: Verb,
        path: String,
        body: &B,
        family: EndpointFamily,
        resource: &'static str,
    ) -> Result<(), GatewayError> {
        let bearer = self.bearer(family, resource).await?;
        let json = serde_json::to_string(body)
            .map_err(|e| GatewayError::Parse(format!("{}: {}", resource, e)))?;
        let mut request = WireRequest::new(verb, path);
        request.bearer = Some(bearer);
        request.body = Some(cipher::encrypt(&json)?);
        self.send(request, resource).await?;
        Ok(())
    }

    /// Authenticated body-less call whose response the server sends as plain
    /// text (the association endpoints do this).
    pub(crate) async fn send_plain(
        &self,
        verb: Verb,
        path: String,
        family: EndpointFamily,
        resource: &'static str,
    ) -> Result<String, GatewayError> {
        let bearer = self.bearer(family, resource).await?;
        let mut request = WireRequest::new(verb, path);
        request.bearer = Some(bearer);
        let response = self.send(request, resource).await?;
        Ok(response.body)
    }
}
