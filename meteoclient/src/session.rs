//! In-memory record of the authenticated identity.

use meteo::models::Role;

/// Created by a successful login, cleared as a whole by logout. Never
/// persisted; a process restart always starts logged out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Opaque bearer token issued by the server.
    pub token: String,
    pub role: Role,
    pub username: String,
}
