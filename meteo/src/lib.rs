//! Protocol core for the MeteoEvents secure session gateway.
//!
//! Everything in this crate is pure: the AES envelope transform, the closed
//! error taxonomy, the wire models and the weather risk aggregation. Network
//! plumbing lives in `meteoclient`.

pub mod cipher;
pub mod error;
pub mod models;
pub mod weather;

pub use error::GatewayError;
