//! Weather risk aggregation.
//!
//! The per-event weather endpoint returns a semi-structured object: hazard
//! categories keyed by name (wind, rain, snow, temperature), each holding
//! magnitudes, per-hazard alert levels and free-form recommended-action
//! sub-objects, plus a sibling list of participating users. The server's shape
//! is not contractually fixed across hazard categories, so extraction here is
//! deliberately forgiving: any nested map is an action source, and the first
//! nested map supplies the detail record. Aggregation is pure; identical input
//! always yields identical severity, label, color and action order
//! (`serde_json` is built with `preserve_order` for exactly that reason).

use serde::Deserialize;
use serde_json::Value;

use crate::error::GatewayError;

/// In-band marker the server puts in an otherwise successful response when its
/// own JSON generation failed.
pub const JSON_FAILURE_SENTINEL: &str = "No s'ha pogut generar el JSON";

/// Top-level key carrying the participating user list.
pub const PARTICIPANTS_KEY: &str = "Usuaris participants";

/// Per-hazard detail record. Every field is optional; an absent magnitude or
/// alert level stays `None` and is never defaulted to zero.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct WeatherDetails {
    #[serde(rename = "velocitatMitjaVent")]
    pub wind_average_speed: Option<f64>,
    #[serde(rename = "alertaVentMitja")]
    pub wind_average_alert: Option<i64>,
    #[serde(rename = "ratxaMaximaVent")]
    pub wind_gust_speed: Option<f64>,
    #[serde(rename = "alertaRatxaMaxima")]
    pub wind_gust_alert: Option<i64>,
    #[serde(rename = "probabilitatPluja")]
    pub rain_probability: Option<f64>,
    #[serde(rename = "precipitacio")]
    pub precipitation: Option<f64>,
    #[serde(rename = "alertaPluja")]
    pub rain_alert: Option<i64>,
    #[serde(rename = "probabilitatTempesta")]
    pub storm_probability: Option<f64>,
    #[serde(rename = "neu")]
    pub snow: Option<f64>,
    #[serde(rename = "alertaNeu")]
    pub snow_alert: Option<i64>,
    #[serde(rename = "probabilitatNevada")]
    pub snowfall_probability: Option<f64>,
    #[serde(rename = "temperatura")]
    pub temperature: Option<f64>,
    #[serde(rename = "alertaAltaTemperatura")]
    pub high_temperature_alert: Option<i64>,
    #[serde(rename = "alertaBaixaTemperatura")]
    pub low_temperature_alert: Option<i64>,
    #[serde(rename = "humitatRelativa")]
    pub relative_humidity: Option<f64>,
}

impl WeatherDetails {
    fn alert_levels(&self) -> impl Iterator<Item = i64> + '_ {
        [
            self.wind_average_alert,
            self.wind_gust_alert,
            self.rain_alert,
            self.snow_alert,
            self.high_temperature_alert,
            self.low_temperature_alert,
        ]
        .into_iter()
        .flatten()
    }
}

/// Discrete overall severity, the worst alert level across all hazards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    NoAlert,
    Safe,
    Caution,
    Watch,
    Alert,
    Cancelled,
}

/// Display color paired with each severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeverityColor {
    Black,
    Green,
    Yellow,
    Blue,
    Red,
    Purple,
}

impl Severity {
    /// Map a raw alert level to a severity. Levels outside 1..=5 (including
    /// none at all) fall back to `NoAlert`, the way the original client's
    /// catch-all branch did.
    pub fn from_level(level: i64) -> Severity {
        match level {
            1 => Severity::Safe,
            2 => Severity::Caution,
            3 => Severity::Watch,
            4 => Severity::Alert,
            5 => Severity::Cancelled,
            _ => Severity::NoAlert,
        }
    }

    pub fn level(self) -> u8 {
        match self {
            Severity::NoAlert => 0,
            Severity::Safe => 1,
            Severity::Caution => 2,
            Severity::Watch => 3,
            Severity::Alert => 4,
            Severity::Cancelled => 5,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Severity::NoAlert => "No alert",
            Severity::Safe => "Safe",
            Severity::Caution => "Caution",
            Severity::Watch => "Watch",
            Severity::Alert => "Alert",
            Severity::Cancelled => "Cancelled",
        }
    }

    pub fn color(self) -> SeverityColor {
        match self {
            Severity::NoAlert => SeverityColor::Black,
            Severity::Safe => SeverityColor::Green,
            Severity::Caution => SeverityColor::Yellow,
            Severity::Watch => SeverityColor::Blue,
            Severity::Alert => SeverityColor::Red,
            Severity::Cancelled => SeverityColor::Purple,
        }
    }
}

/// Result of aggregating one decrypted weather payload.
#[derive(Debug, Clone, PartialEq)]
pub struct RiskAssessment {
    /// Identifiers of the participating users, empty if the server sent none.
    pub participants: Vec<String>,
    /// Detail record from the first nested hazard entry.
    pub details: WeatherDetails,
    /// Unique recommended actions, first-seen order.
    pub actions: Vec<String>,
    pub severity: Severity,
}

/// Aggregate a decrypted weather payload into a single risk assessment.
///
/// Fails with `Server` when the body carries the server's JSON-generation
/// sentinel, and with `Parse` when no nested hazard mapping exists at all;
/// partial success is never returned.
pub fn aggregate(decrypted: &str) -> Result<RiskAssessment, GatewayError> {
    if decrypted.contains(JSON_FAILURE_SENTINEL) {
        return Err(GatewayError::Server(
            "the server could not generate the weather report".to_string(),
        ));
    }

    let root: Value = serde_json::from_str(decrypted)
        .map_err(|e| GatewayError::Parse(format!("weather payload: {}", e)))?;
    let map = root.as_object().ok_or_else(|| {
        GatewayError::Parse("weather payload is not a JSON object".to_string())
    })?;

    let participants = match map.get(PARTICIPANTS_KEY) {
        Some(Value::Array(items)) => items.iter().map(render_scalar).collect(),
        _ => Vec::new(),
    };

    let mut actions: Vec<String> = Vec::new();
    let mut details: Option<WeatherDetails> = None;
    for (key, value) in map {
        if key == PARTICIPANTS_KEY {
            continue;
        }
        let Some(hazard) = value.as_object() else {
            continue;
        };
        for sub in hazard.values() {
            if sub.is_object() {
                let action = project_action(sub);
                if !actions.contains(&action) {
                    actions.push(action);
                }
            }
        }
        if details.is_none() {
            details = Some(
                serde_json::from_value(value.clone())
                    .map_err(|e| GatewayError::Parse(format!("weather details: {}", e)))?,
            );
        }
    }

    let details = details
        .ok_or_else(|| GatewayError::Parse("no valid weather data found".to_string()))?;
    let severity = Severity::from_level(details.alert_levels().max().unwrap_or(0));

    Ok(RiskAssessment {
        participants,
        details,
        actions,
        severity,
    })
}

/// Project a nested action map to a display string: the map is rendered the
/// way the original client saw Gson render it (`{clau=valor, ...}`), the
/// braces are trimmed and everything after the first `=` is kept. Forgiving by
/// design; inputs without an `=` pass through whole.
fn project_action(value: &Value) -> String {
    let rendered = render_value(value);
    let trimmed = rendered.trim_matches(|c| c == '{' || c == '}');
    match trimmed.split_once('=') {
        Some((_, rest)) => rest.to_string(),
        None => trimmed.to_string(),
    }
}

fn render_scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => render_value(other),
    }
}

// Gson-style rendering: strings bare, maps as {k=v, ...}, lists as [a, b].
fn render_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Array(items) => {
            let inner: Vec<String> = items.iter().map(render_value).collect();
            format!("[{}]", inner.join(", "))
        }
        Value::Object(map) => {
            let inner: Vec<String> = map
                .iter()
                .map(|(k, v)| format!("{}={}", k, render_value(v)))
                .collect();
            format!("{{{}}}", inner.join(", "))
        }
    }
}
