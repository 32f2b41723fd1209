//! Wire entities carried through the request pipeline.
//!
//! Field names on the wire are the server's (Catalan) names; the structs keep
//! them behind serde renames. The gateway serializes and deserializes these,
//! it never validates them as business objects.

use serde::{Deserialize, Serialize};

use crate::error::GatewayError;

/// Permission class of the authenticated user, derived from the functional id
/// the login response carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Admin,
    Standard,
}

impl Role {
    /// Map the server's functional id to a role. Only `"ADM"` and `"USR"` are
    /// known to exist; anything else is a parse failure rather than a guess.
    pub fn from_functional_id(id: &str) -> Result<Role, GatewayError> {
        match id {
            "ADM" => Ok(Role::Admin),
            "USR" => Ok(Role::Standard),
            other => Err(GatewayError::Parse(format!(
                "unknown functional id {:?} in login response",
                other
            ))),
        }
    }
}

/// Decrypted body of a successful login.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    #[serde(rename = "userType", default)]
    pub user_type: Option<String>,
    pub token: String,
    #[serde(rename = "funcionalId")]
    pub functional_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "nomC")]
    pub full_name: String,
    #[serde(rename = "nomUsuari")]
    pub username: String,
    /// Cleared by the server on reads; field-level encrypted by the gateway
    /// before a create or update body is serialized.
    #[serde(rename = "contrasenya", default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(rename = "dataNaixement", default, skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<String>,
    #[serde(rename = "sexe", default, skip_serializing_if = "Option::is_none")]
    pub sex: Option<String>,
    #[serde(rename = "poblacio", default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    pub email: String,
    #[serde(rename = "telefon", default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(rename = "descripcio", default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(rename = "funcionalId")]
    pub role_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(rename = "nom")]
    pub name: String,
    #[serde(rename = "descripcio")]
    pub description: String,
    #[serde(rename = "organitzador")]
    pub organizer: String,
    #[serde(rename = "direccio")]
    pub address: String,
    #[serde(rename = "codiPostal")]
    pub postal_code: String,
    #[serde(rename = "poblacio")]
    pub city: String,
    // The server sends capacity as a string ("100").
    #[serde(rename = "aforament")]
    pub capacity: String,
    #[serde(rename = "hora_inici")]
    pub start_time: String,
    #[serde(rename = "hora_fi")]
    pub end_time: String,
    #[serde(rename = "data_esde")]
    pub date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measure {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(rename = "condicio")]
    pub condition: String,
    #[serde(rename = "valor")]
    pub value: f64,
    #[serde(rename = "valorUm")]
    pub unit: String,
    #[serde(rename = "accio")]
    pub action: String,
    #[serde(rename = "nivell_mesura")]
    pub severity_level: i32,
}
