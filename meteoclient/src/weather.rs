//! Per-event weather risk.

use meteo::error::GatewayError;
use meteo::weather::{self, RiskAssessment};

use crate::config::EndpointFamily;
use crate::gateway::Gateway;
use crate::transport::{Transport, Verb};

impl<T: Transport> Gateway<T> {
    /// Fetch the weather payload for an event and aggregate it into a single
    /// risk assessment. Fetched fresh on every call, never cached.
    pub async fn event_weather(&self, event_id: i64) -> Result<RiskAssessment, GatewayError> {
        let decrypted = self
            .fetch_decrypted(
                Verb::Get,
                format!("api/esdeveniments/{}/meteo", event_id),
                EndpointFamily::Query,
                "event weather",
            )
            .await?;
        let risk = weather::aggregate(&decrypted)?;
        tracing::debug!(
            event_id,
            severity = risk.severity.label(),
            actions = risk.actions.len(),
            "weather risk aggregated"
        );
        Ok(risk)
    }
}
