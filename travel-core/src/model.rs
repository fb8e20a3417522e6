use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Latitude/longitude pair, serialized as `[lat, lon]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinates {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

impl From<[f64; 2]> for Coordinates {
    fn from([lat, lon]: [f64; 2]) -> Self {
        Self { lat, lon }
    }
}

impl From<Coordinates> for [f64; 2] {
    fn from(c: Coordinates) -> Self {
        [c.lat, c.lon]
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}, {:.4}", self.lat, self.lon)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AirQualityStatus {
    Good,
    Moderate,
    Unhealthy,
    #[serde(rename = "Very Unhealthy")]
    VeryUnhealthy,
    Hazardous,
}

impl AirQualityStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AirQualityStatus::Good => "Good",
            AirQualityStatus::Moderate => "Moderate",
            AirQualityStatus::Unhealthy => "Unhealthy",
            AirQualityStatus::VeryUnhealthy => "Very Unhealthy",
            AirQualityStatus::Hazardous => "Hazardous",
        }
    }
}

impl fmt::Display for AirQualityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PollenLevel {
    Low,
    Medium,
    High,
}

impl PollenLevel {
    pub const fn all() -> &'static [PollenLevel] {
        &[PollenLevel::Low, PollenLevel::Medium, PollenLevel::High]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PollenLevel::Low => "Low",
            PollenLevel::Medium => "Medium",
            PollenLevel::High => "High",
        }
    }

    /// Ranking score: lower pollen ranks higher.
    pub fn score(&self) -> u32 {
        match self {
            PollenLevel::Low => 3,
            PollenLevel::Medium => 2,
            PollenLevel::High => 1,
        }
    }
}

impl fmt::Display for PollenLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Stored air-quality snapshot. `aqi` and `status` are kept as given and never
/// checked against each other.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirQuality {
    pub aqi: u32,
    pub status: AirQualityStatus,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pollen {
    pub level: PollenLevel,
    pub forecast: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SustainableOptions {
    pub transportation: Vec<String>,
    pub accommodation: Vec<String>,
    pub activities: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Destination {
    pub id: String,
    pub name: String,
    pub country: String,
    pub description: String,
    pub image: String,
    pub coordinates: Coordinates,
    pub eco_score: u32,
    pub air_quality: AirQuality,
    pub pollen: Pollen,
    pub sustainable_options: SustainableOptions,
}

/// Search input. Dates and travelers are carried for the caller but do not
/// influence filtering or ordering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchFilters {
    pub destination: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub travelers: u32,
    /// 0..=10; 0 disables the air-quality pass.
    pub air_quality_importance: u8,
    /// 0..=10; 0 disables the pollen pass.
    pub pollen_sensitivity: u8,
    /// 0..=10; 0 disables the eco pass.
    pub eco_friendly_priority: u8,
}

impl Default for SearchFilters {
    fn default() -> Self {
        Self {
            destination: String::new(),
            start_date: None,
            end_date: None,
            travelers: 2,
            air_quality_importance: 0,
            pollen_sensitivity: 0,
            eco_friendly_priority: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AirQualityDay {
    pub date: NaiveDate,
    pub aqi: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollenDay {
    pub date: NaiveDate,
    pub level: PollenLevel,
}

/// Both forecasts for one location, as shown on a destination's health tab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthReport {
    pub air_quality: Vec<AirQualityDay>,
    pub pollen: Vec<PollenDay>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripPlan {
    pub id: Uuid,
    pub destination_id: String,
    pub destination_name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub travelers: u32,
    pub transportation: String,
    pub accommodation: String,
    pub activities: Vec<String>,
}
