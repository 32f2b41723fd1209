//! Event operations, including the event↔user association.

use meteo::error::GatewayError;
use meteo::models::{Event, User};

use crate::config::EndpointFamily;
use crate::gateway::Gateway;
use crate::transport::{Transport, Verb};

impl<T: Transport> Gateway<T> {
    pub async fn list_events(&self) -> Result<Vec<Event>, GatewayError> {
        self.fetch_json(
            Verb::Get,
            "api/esdeveniments".to_string(),
            EndpointFamily::Query,
            "event list",
        )
        .await
    }

    /// Get-by-id responses arrive nested one level under a `"body"` key.
    pub async fn event(&self, event_id: i64) -> Result<Event, GatewayError> {
        self.fetch_json_body(
            Verb::Get,
            format!("api/esdeveniments/{}", event_id),
            EndpointFamily::Query,
            "event",
        )
        .await
    }

    pub async fn create_event(&self, event: &Event) -> Result<(), GatewayError> {
        self.send_encrypted(
            Verb::Post,
            "api/esdeveniments".to_string(),
            event,
            EndpointFamily::Mutation,
            "event",
        )
        .await
    }

    pub async fn update_event(&self, event_id: i64, event: &Event) -> Result<(), GatewayError> {
        self.send_encrypted(
            Verb::Put,
            format!("api/esdeveniments/{}", event_id),
            event,
            EndpointFamily::Mutation,
            "event",
        )
        .await
    }

    pub async fn delete_event(&self, event_id: i64) -> Result<(), GatewayError> {
        self.send_plain(
            Verb::Delete,
            format!("api/esdeveniments/{}", event_id),
            EndpointFamily::Mutation,
            "event",
        )
        .await
        .map(|_| ())
    }

    /// Users assigned to an event.
    pub async fn event_users(&self, event_id: i64) -> Result<Vec<User>, GatewayError> {
        self.fetch_json(
            Verb::Get,
            format!("api/esdeveniments/{}/usuaris", event_id),
            EndpointFamily::Query,
            "event user list",
        )
        .await
    }

    /// Returns the server's confirmation message, which this endpoint sends as
    /// plain text rather than an envelope.
    pub async fn add_user_to_event(
        &self,
        event_id: i64,
        user_id: i64,
    ) -> Result<String, GatewayError> {
        self.send_plain(
            Verb::Post,
            format!("api/esdeveniments/{}/usuaris/{}", event_id, user_id),
            EndpointFamily::Mutation,
            "event or user",
        )
        .await
    }

    pub async fn remove_user_from_event(
        &self,
        event_id: i64,
        user_id: i64,
    ) -> Result<String, GatewayError> {
        self.send_plain(
            Verb::Delete,
            format!("api/esdeveniments/{}/usuaris/{}", event_id, user_id),
            EndpointFamily::Mutation,
            "event or user",
        )
        .await
    }
}
