use crate::{
    Config,
    model::{AirQualityDay, Coordinates, HealthReport, PollenDay},
    provider::{open_meteo::OpenMeteoProvider, simulated::SimulatedProvider},
};
use async_trait::async_trait;
use std::{convert::TryFrom, fmt::Debug, time::Duration};
use tracing::debug;

pub mod open_meteo;
pub mod simulated;

/// Number of daily entries every forecast carries.
pub const FORECAST_DAYS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderId {
    Simulated,
    OpenMeteo,
}

impl ProviderId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderId::Simulated => "simulated",
            ProviderId::OpenMeteo => "open-meteo",
        }
    }

    pub const fn all() -> &'static [ProviderId] {
        &[ProviderId::Simulated, ProviderId::OpenMeteo]
    }
}

impl std::fmt::Display for ProviderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ProviderId {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.to_lowercase();

        match lower.as_str() {
            "simulated" => Ok(ProviderId::Simulated),
            "open-meteo" | "openmeteo" => Ok(ProviderId::OpenMeteo),
            _ => Err(anyhow::anyhow!(
                "Unknown provider '{value}'. Supported providers: simulated, open-meteo."
            )),
        }
    }
}

/// Source of short-term air-quality and pollen forecasts for a location.
///
/// Results are never cached; two calls for the same coordinates may differ.
#[async_trait]
pub trait ForecastProvider: Send + Sync + Debug {
    async fn air_quality(&self, at: Coordinates) -> anyhow::Result<Vec<AirQualityDay>>;

    async fn pollen(&self, at: Coordinates) -> anyhow::Result<Vec<PollenDay>>;
}

/// Fetch both forecasts concurrently and wait for both.
pub async fn health_report(
    provider: &dyn ForecastProvider,
    at: Coordinates,
) -> anyhow::Result<HealthReport> {
    debug!(%at, ?provider, "requesting health report");

    let (air_quality, pollen) = tokio::try_join!(provider.air_quality(at), provider.pollen(at))?;

    Ok(HealthReport { air_quality, pollen })
}

/// Construct a provider from config and explicit ProviderId.
pub fn provider_from_config(
    id: ProviderId,
    config: &Config,
) -> anyhow::Result<Box<dyn ForecastProvider>> {
    let settings = config.provider_config(id).cloned().unwrap_or_default();
    let latency = Duration::from_millis(settings.latency_ms);

    let boxed: Box<dyn ForecastProvider> = match id {
        ProviderId::Simulated => Box::new(SimulatedProvider::new().with_latency(latency)),
        ProviderId::OpenMeteo => {
            let base_url = settings
                .base_url
                .unwrap_or_else(|| open_meteo::DEFAULT_BASE_URL.to_string());
            Box::new(OpenMeteoProvider::new(base_url)?)
        }
    };

    Ok(boxed)
}

/// Construct the default provider from config, using `default_provider` field.
pub fn default_provider_from_config(config: &Config) -> anyhow::Result<Box<dyn ForecastProvider>> {
    let id = config.default_provider_id()?;
    provider_from_config(id, config)
}
