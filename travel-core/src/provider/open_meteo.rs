use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use reqwest::{Client, Url};
use serde::Deserialize;
use std::collections::BTreeMap;
use tracing::{debug, warn};

use crate::{
    model::{AirQualityDay, Coordinates, PollenDay, PollenLevel},
    provider::FORECAST_DAYS,
};

use super::ForecastProvider;

pub const DEFAULT_BASE_URL: &str = "https://air-quality-api.open-meteo.com";

const POLLEN_SPECIES: &str =
    "alder_pollen,birch_pollen,grass_pollen,mugwort_pollen,olive_pollen,ragweed_pollen";

/// Daily peak below this many grains/m³ is `Low`.
const POLLEN_MEDIUM_FROM: f64 = 10.0;
/// Daily peak from this many grains/m³ is `High`.
const POLLEN_HIGH_FROM: f64 = 50.0;

/// Forecasts from the Open-Meteo air-quality API. No API key is required.
#[derive(Debug, Clone)]
pub struct OpenMeteoProvider {
    base_url: String,
    http: Client,
}

impl OpenMeteoProvider {
    pub fn new(base_url: String) -> Result<Self> {
        Url::parse(&base_url).with_context(|| format!("Invalid Open-Meteo base URL: {base_url}"))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: Client::new(),
        })
    }

    async fn fetch_hourly(&self, at: Coordinates, variables: &str) -> Result<String> {
        let url = format!("{}/v1/air-quality", self.base_url);

        let res = self
            .http
            .get(&url)
            .query(&[
                ("latitude", at.lat.to_string()),
                ("longitude", at.lon.to_string()),
                ("hourly", variables.to_string()),
                ("forecast_days", FORECAST_DAYS.to_string()),
                ("timezone", "GMT".to_string()),
            ])
            .send()
            .await
            .with_context(|| format!("Failed to send request to Open-Meteo ({variables})"))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .context("Failed to read Open-Meteo response body")?;

        if !status.is_success() {
            return Err(anyhow!(
                "Open-Meteo request failed with status {}: {}",
                status,
                truncate_body(&body),
            ));
        }

        debug!(%at, variables, bytes = body.len(), "open-meteo response");
        Ok(body)
    }
}

#[derive(Debug, Deserialize)]
struct OmResponse {
    hourly: OmHourly,
}

#[derive(Debug, Deserialize)]
struct OmHourly {
    time: Vec<String>,
    #[serde(default)]
    us_aqi: Vec<Option<f64>>,
    #[serde(default)]
    alder_pollen: Vec<Option<f64>>,
    #[serde(default)]
    birch_pollen: Vec<Option<f64>>,
    #[serde(default)]
    grass_pollen: Vec<Option<f64>>,
    #[serde(default)]
    mugwort_pollen: Vec<Option<f64>>,
    #[serde(default)]
    olive_pollen: Vec<Option<f64>>,
    #[serde(default)]
    ragweed_pollen: Vec<Option<f64>>,
}

impl OmHourly {
    /// Per-hour maximum across all pollen species that reported a value.
    fn pollen_peak(&self) -> Vec<Option<f64>> {
        let species = [
            &self.alder_pollen,
            &self.birch_pollen,
            &self.grass_pollen,
            &self.mugwort_pollen,
            &self.olive_pollen,
            &self.ragweed_pollen,
        ];

        (0..self.time.len())
            .map(|hour| {
                species
                    .iter()
                    .filter_map(|values| values.get(hour).copied().flatten())
                    .reduce(f64::max)
            })
            .collect()
    }
}

/// Largest value per calendar day. Days whose hours are all null map to `None`.
fn daily_max(times: &[String], values: &[Option<f64>]) -> Result<BTreeMap<NaiveDate, Option<f64>>> {
    let mut days: BTreeMap<NaiveDate, Option<f64>> = BTreeMap::new();

    for (idx, time) in times.iter().enumerate() {
        let date = NaiveDateTime::parse_from_str(time, "%Y-%m-%dT%H:%M")
            .with_context(|| format!("Unexpected Open-Meteo timestamp '{time}'"))?
            .date();

        let slot = days.entry(date).or_insert(None);
        if let Some(v) = values.get(idx).copied().flatten() {
            *slot = Some(slot.map_or(v, |cur| cur.max(v)));
        }
    }

    Ok(days)
}

fn parse_hourly(body: &str) -> Result<OmHourly> {
    let parsed: OmResponse =
        serde_json::from_str(body).context("Failed to parse Open-Meteo air-quality JSON")?;
    Ok(parsed.hourly)
}

fn parse_air_quality(body: &str) -> Result<Vec<AirQualityDay>> {
    let hourly = parse_hourly(body)?;
    let days = daily_max(&hourly.time, &hourly.us_aqi)?;

    let forecast: Vec<_> = days
        .into_iter()
        .filter_map(|(date, peak)| peak.map(|v| AirQualityDay { date, aqi: v.max(0.0).round() as u32 }))
        .take(FORECAST_DAYS)
        .collect();

    if forecast.is_empty() {
        return Err(anyhow!("Open-Meteo response contained no AQI data"));
    }
    if forecast.len() < FORECAST_DAYS {
        warn!(days = forecast.len(), "open-meteo returned a short AQI forecast");
    }

    Ok(forecast)
}

fn pollen_level(grains_per_m3: f64) -> PollenLevel {
    if grains_per_m3 < POLLEN_MEDIUM_FROM {
        PollenLevel::Low
    } else if grains_per_m3 < POLLEN_HIGH_FROM {
        PollenLevel::Medium
    } else {
        PollenLevel::High
    }
}

fn parse_pollen(body: &str) -> Result<Vec<PollenDay>> {
    let hourly = parse_hourly(body)?;
    let days = daily_max(&hourly.time, &hourly.pollen_peak())?;

    if days.values().all(Option::is_none) {
        // Pollen is only modelled for Europe; elsewhere every value is null.
        debug!("open-meteo returned no pollen values, reporting Low");
    }

    let forecast: Vec<_> = days
        .into_iter()
        .map(|(date, peak)| PollenDay { date, level: peak.map_or(PollenLevel::Low, pollen_level) })
        .take(FORECAST_DAYS)
        .collect();

    if forecast.is_empty() {
        return Err(anyhow!("Open-Meteo response contained no pollen data"));
    }

    Ok(forecast)
}

#[async_trait]
impl ForecastProvider for OpenMeteoProvider {
    async fn air_quality(&self, at: Coordinates) -> Result<Vec<AirQualityDay>> {
        let body = self.fetch_hourly(at, "us_aqi").await?;
        parse_air_quality(&body)
    }

    async fn pollen(&self, at: Coordinates) -> Result<Vec<PollenDay>> {
        let body = self.fetch_hourly(at, POLLEN_SPECIES).await?;
        parse_pollen(&body)
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((cut, _)) => format!("{}...", &body[..cut]),
        None => body.to_string(),
    }
}
