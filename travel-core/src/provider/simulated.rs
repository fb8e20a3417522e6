use anyhow::Result;
use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use rand::Rng;
use std::{ops::RangeInclusive, time::Duration};

use crate::{
    model::{AirQualityDay, Coordinates, PollenDay, PollenLevel},
    provider::FORECAST_DAYS,
};

use super::ForecastProvider;

/// Range every simulated AQI value is drawn from.
pub const SIMULATED_AQI: RangeInclusive<u32> = 10..=59;

/// Stand-in for a real forecast feed: random values, no relation to the
/// coordinates or to a destination's stored snapshot.
#[derive(Debug, Clone, Default)]
pub struct SimulatedProvider {
    start: Option<NaiveDate>,
    latency: Duration,
}

impl SimulatedProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// First forecast date; defaults to today (UTC) at call time.
    pub fn with_start_date(mut self, start: NaiveDate) -> Self {
        self.start = Some(start);
        self
    }

    /// Cosmetic delay before each answer.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    fn dates(&self) -> impl Iterator<Item = NaiveDate> {
        let start = self.start.unwrap_or_else(|| Utc::now().date_naive());
        start.iter_days().take(FORECAST_DAYS)
    }

    async fn pause(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}

fn random_air_quality(dates: impl Iterator<Item = NaiveDate>) -> Vec<AirQualityDay> {
    let mut rng = rand::rng();
    dates
        .map(|date| AirQualityDay { date, aqi: rng.random_range(SIMULATED_AQI) })
        .collect()
}

fn random_pollen(dates: impl Iterator<Item = NaiveDate>) -> Vec<PollenDay> {
    let levels = PollenLevel::all();
    let mut rng = rand::rng();
    dates
        .map(|date| PollenDay { date, level: levels[rng.random_range(0..levels.len())] })
        .collect()
}

#[async_trait]
impl ForecastProvider for SimulatedProvider {
    async fn air_quality(&self, _at: Coordinates) -> Result<Vec<AirQualityDay>> {
        self.pause().await;
        Ok(random_air_quality(self.dates()))
    }

    async fn pollen(&self, _at: Coordinates) -> Result<Vec<PollenDay>> {
        self.pause().await;
        Ok(random_pollen(self.dates()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COPENHAGEN: Coordinates = Coordinates::new(55.6761, 12.5683);

    #[tokio::test]
    async fn air_quality_has_five_entries_in_range() {
        let provider = SimulatedProvider::new();

        for _ in 0..50 {
            let forecast = provider.air_quality(COPENHAGEN).await.unwrap();
            assert_eq!(forecast.len(), FORECAST_DAYS);
            assert!(forecast.iter().all(|d| SIMULATED_AQI.contains(&d.aqi)));
        }
    }

    #[tokio::test]
    async fn pollen_has_five_entries_with_known_levels() {
        let provider = SimulatedProvider::new();

        let forecast = provider.pollen(COPENHAGEN).await.unwrap();
        assert_eq!(forecast.len(), FORECAST_DAYS);
        assert!(forecast.iter().all(|d| PollenLevel::all().contains(&d.level)));
    }

    #[tokio::test]
    async fn dates_are_consecutive_from_start() {
        let start = NaiveDate::from_ymd_opt(2023, 10, 1).unwrap();
        let provider = SimulatedProvider::new().with_start_date(start);

        let dates: Vec<_> = provider
            .air_quality(COPENHAGEN)
            .await
            .unwrap()
            .into_iter()
            .map(|d| d.date.to_string())
            .collect();

        assert_eq!(
            dates,
            ["2023-10-01", "2023-10-02", "2023-10-03", "2023-10-04", "2023-10-05"]
        );
    }

    #[tokio::test]
    async fn pollen_dates_match_air_quality_dates() {
        let start = NaiveDate::from_ymd_opt(2024, 2, 27).unwrap();
        let provider = SimulatedProvider::new().with_start_date(start);

        let air: Vec<_> = provider.air_quality(COPENHAGEN).await.unwrap();
        let pollen: Vec<_> = provider.pollen(COPENHAGEN).await.unwrap();

        let air_dates: Vec<_> = air.iter().map(|d| d.date).collect();
        let pollen_dates: Vec<_> = pollen.iter().map(|d| d.date).collect();
        assert_eq!(air_dates, pollen_dates);
        assert_eq!(air_dates[3], NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
    }

    #[tokio::test(start_paused = true)]
    async fn latency_is_applied() {
        let provider = SimulatedProvider::new().with_latency(Duration::from_millis(800));
        let started = tokio::time::Instant::now();

        provider.pollen(COPENHAGEN).await.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(800));
    }
}
