//! User operations.

use meteo::cipher;
use meteo::error::GatewayError;
use meteo::models::User;

use crate::config::EndpointFamily;
use crate::gateway::Gateway;
use crate::transport::{Transport, Verb};

/// Field-level encrypt the password before the body itself is encrypted; the
/// server stores the password envelope, not the plaintext.
fn with_encrypted_password(user: &User) -> Result<User, GatewayError> {
    let mut user = user.clone();
    if let Some(password) = user.password.as_deref().filter(|p| !p.is_empty()) {
        user.password = Some(cipher::encrypt(password)?);
    }
    Ok(user)
}

impl<T: Transport> Gateway<T> {
    pub async fn list_users(&self) -> Result<Vec<User>, GatewayError> {
        self.fetch_json(
            Verb::Get,
            "api/usuaris".to_string(),
            EndpointFamily::Query,
            "user list",
        )
        .await
    }

    pub async fn create_user(&self, user: &User) -> Result<(), GatewayError> {
        let user = with_encrypted_password(user)?;
        self.send_encrypted(
            Verb::Post,
            "api/usuaris".to_string(),
            &user,
            EndpointFamily::Mutation,
            "user",
        )
        .await
    }

    pub async fn update_user(&self, user: &User) -> Result<(), GatewayError> {
        let path = format!("api/usuaris/{}", user.id);
        let user = with_encrypted_password(user)?;
        self.send_encrypted(Verb::Put, path, &user, EndpointFamily::Mutation, "user")
            .await
    }

    pub async fn delete_user(&self, user_id: &str) -> Result<(), GatewayError> {
        let path = format!("api/usuaris/{}", user_id);
        self.send_plain(Verb::Delete, path, EndpointFamily::Mutation, "user")
            .await
            .map(|_| ())
    }
}
