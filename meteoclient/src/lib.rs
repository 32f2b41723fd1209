//! Secure session gateway for the MeteoEvents server.
//!
//! The [`Gateway`] owns the authenticated session and runs every call through
//! the same pipeline: encrypt the bearer token (and body, when there is one),
//! invoke the transport, classify unsuccessful statuses, decrypt the response
//! and parse it into a typed result. All failures come back as
//! [`GatewayError`] values; nothing panics and nothing is retried.
//!
//! The UI layer of the application is an external collaborator: it constructs
//! a `Gateway` with a [`GatewayConfig`] and a transport, calls the operations
//! and renders the results.

pub mod config;
pub mod gateway;
pub mod session;
pub mod transport;

mod auth;
mod events;
mod measures;
mod users;
mod weather;

pub use config::{CredentialEncoding, CredentialPolicy, EndpointFamily, GatewayConfig};
pub use gateway::Gateway;
pub use meteo::error::GatewayError;
pub use meteo::models::{Event, LoginResponse, Measure, Role, User};
pub use meteo::weather::{RiskAssessment, Severity, SeverityColor, WeatherDetails};
pub use session::Session;
pub use transport::{HttpTransport, Transport, Verb, WireRequest, WireResponse};
