//! Security measure operations, including the event↔measure association.

use meteo::error::GatewayError;
use meteo::models::Measure;

use crate::config::EndpointFamily;
use crate::gateway::Gateway;
use crate::transport::{Transport, Verb};

impl<T: Transport> Gateway<T> {
    pub async fn list_measures(&self) -> Result<Vec<Measure>, GatewayError> {
        self.fetch_json(
            Verb::Get,
            "api/mesures".to_string(),
            EndpointFamily::Query,
            "measure list",
        )
        .await
    }

    /// Get-by-id responses arrive nested one level under a `"body"` key.
    pub async fn measure(&self, measure_id: i64) -> Result<Measure, GatewayError> {
        self.fetch_json_body(
            Verb::Get,
            format!("api/mesures/{}", measure_id),
            EndpointFamily::Query,
            "measure",
        )
        .await
    }

    pub async fn create_measure(&self, measure: &Measure) -> Result<(), GatewayError> {
        self.send_encrypted(
            Verb::Post,
            "api/mesures".to_string(),
            measure,
            EndpointFamily::Mutation,
            "measure",
        )
        .await
    }

    pub async fn update_measure(
        &self,
        measure_id: i64,
        measure: &Measure,
    ) -> Result<(), GatewayError> {
        self.send_encrypted(
            Verb::Put,
            format!("api/mesures/{}", measure_id),
            measure,
            EndpointFamily::Mutation,
            "measure",
        )
        .await
    }

    pub async fn delete_measure(&self, measure_id: i64) -> Result<(), GatewayError> {
        self.send_plain(
            Verb::Delete,
            format!("api/mesures/{}", measure_id),
            EndpointFamily::Mutation,
            "measure",
        )
        .await
        .map(|_| ())
    }

    /// Measures assigned to an event.
    pub async fn event_measures(&self, event_id: i64) -> Result<Vec<Measure>, GatewayError> {
        self.fetch_json(
            Verb::Get,
            format!("api/esdeveniments/{}/mesures", event_id),
            EndpointFamily::Query,
            "event measure list",
        )
        .await
    }

    pub async fn add_measure_to_event(
        &self,
        event_id: i64,
        measure_id: i64,
    ) -> Result<String, GatewayError> {
        self.send_plain(
            Verb::Post,
            format!("api/esdeveniments/{}/mesures/{}", event_id, measure_id),
            EndpointFamily::Mutation,
            "event or measure",
        )
        .await
    }

    pub async fn remove_measure_from_event(
        &self,
        event_id: i64,
        measure_id: i64,
    ) -> Result<String, GatewayError> {
        self.send_plain(
            Verb::Delete,
            format!("api/esdeveniments/{}/mesures/{}", event_id, measure_id),
            EndpointFamily::Mutation,
            "event or measure",
        )
        .await
    }
}
