//! Core library for the `travel` CLI.
//!
//! This crate defines:
//! - The destination catalog and the read-only query service over it
//! - Abstraction over air-quality and pollen forecast providers
//! - Forecast labels and health recommendations
//! - Trip planning against a destination's sustainable options
//! - Configuration handling
//!
//! It is used by `travel-cli`, but can also be reused by other binaries or services.

pub mod advice;
pub mod catalog;
pub mod config;
pub mod error;
pub mod model;
pub mod provider;
pub mod query;
pub mod tips;
pub mod trip;

pub use advice::{HealthAdvice, forecast_status};
pub use catalog::Catalog;
pub use config::{Config, ProviderConfig};
pub use error::{CatalogError, OptionKind, TripError};
pub use model::{
    AirQuality, AirQualityDay, AirQualityStatus, Coordinates, Destination, HealthReport, Pollen,
    PollenDay, PollenLevel, SearchFilters, SustainableOptions, TripPlan,
};
pub use provider::{FORECAST_DAYS, ForecastProvider, ProviderId, health_report};
pub use query::{QueryService, Ranking};
pub use tips::{ECO_TIPS, EcoTip};
pub use trip::TripDraft;
