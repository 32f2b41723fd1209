//! Login and logout: the only operations that mutate the session.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use chrono::{SecondsFormat, Utc};

use meteo::cipher;
use meteo::error::GatewayError;
use meteo::models::{LoginResponse, Role};

use crate::config::EndpointFamily;
use crate::gateway::Gateway;
use crate::session::Session;
use crate::transport::{Transport, Verb, WireRequest};

impl<T: Transport> Gateway<T> {
    /// Authenticate against the server and establish a session.
    ///
    /// The password is salted with the current timestamp before encryption to
    /// defeat naive replay; both credentials are then encrypted and the
    /// resulting envelopes base64-encoded once more — the double encoding the
    /// login endpoint expects. The session is only stored after the response
    /// has been decrypted and parsed; any failure leaves a previous session
    /// untouched. Logging in again before logout replaces the session.
    pub async fn login(&self, username: &str, password: &str) -> Result<Session, GatewayError> {
        let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true);
        let salted_password = format!("{}|{}", password, timestamp);

        let username_envelope = cipher::encrypt(username)?;
        let password_envelope = cipher::encrypt(&salted_password)?;

        let mut request = WireRequest::new(Verb::Post, "api/usuaris/login");
        request.form = Some(vec![
            ("nomUsuari", BASE64.encode(username_envelope.as_bytes())),
            ("contrasenya", BASE64.encode(password_envelope.as_bytes())),
        ]);

        let response = self.transport_execute(request).await?;
        if response.status == 401 {
            return Err(GatewayError::Auth(
                "invalid username or password (status 401)".to_string(),
            ));
        }
        if !response.is_success() {
            return Err(GatewayError::from_status(response.status, "login"));
        }

        let decrypted = cipher::decrypt(&response.body)?;
        let login: LoginResponse = serde_json::from_str(&decrypted)
            .map_err(|e| GatewayError::Parse(format!("login response: {}", e)))?;
        let role = Role::from_functional_id(&login.functional_id)?;

        let session = Session {
            token: login.token,
            role,
            username: username.to_string(),
        };
        self.store_session(session.clone()).await;
        tracing::info!(username, role = ?role, "session established");
        Ok(session)
    }

    /// Close the current session on the server and forget it locally.
    ///
    /// Requires an active session; without one this fails locally with
    /// `InvalidSession` and no network call. Token, role and username are
    /// cleared together, and only after the server acknowledged the logout.
    pub async fn logout(&self) -> Result<(), GatewayError> {
        let bearer = self.bearer(EndpointFamily::Session, "logout").await?;
        let mut request = WireRequest::new(Verb::Post, "api/usuaris/logout");
        request.bearer = Some(bearer);

        let response = self.transport_execute(request).await?;
        if !response.is_success() {
            return Err(GatewayError::from_status(response.status, "session"));
        }

        self.clear_session().await;
        tracing::info!("session closed");
        Ok(())
    }
}
