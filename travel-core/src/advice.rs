use serde::Serialize;

use crate::model::{AirQualityStatus, Destination, PollenLevel};

/// Label for a single forecast day. Coarser than the stored snapshot status:
/// anything at or above 100 is `Unhealthy`.
pub fn forecast_status(aqi: u32) -> AirQualityStatus {
    match aqi {
        0..50 => AirQualityStatus::Good,
        50..100 => AirQualityStatus::Moderate,
        _ => AirQualityStatus::Unhealthy,
    }
}

/// Health recommendations derived from a destination's stored pollen level
/// and air-quality status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthAdvice {
    pub best_time_to_visit: String,
    pub allergy_sufferers: String,
    pub respiratory_conditions: String,
}

impl HealthAdvice {
    pub fn for_destination(d: &Destination) -> Self {
        let name = &d.name;

        let season = match d.pollen.level {
            PollenLevel::Low => "year-round, as pollen levels remain consistently low",
            PollenLevel::Medium => "during fall and winter when pollen levels are lower",
            PollenLevel::High => "during winter months when pollen counts are at their lowest",
        };

        let allergy_sufferers = match d.pollen.level {
            PollenLevel::Low => format!(
                "{name} is an excellent choice for travelers with allergies due to its consistently low pollen levels."
            ),
            PollenLevel::Medium => format!(
                "If you have allergies, consider bringing appropriate medication when visiting {name}, especially during spring."
            ),
            PollenLevel::High => format!(
                "Travelers with severe allergies should exercise caution when visiting {name}, particularly during peak pollen seasons."
            ),
        };

        let respiratory_conditions = match d.air_quality.status {
            AirQualityStatus::Good => format!(
                "The excellent air quality in {name} makes it suitable for travelers with respiratory conditions."
            ),
            AirQualityStatus::Moderate => format!(
                "The moderate air quality in {name} is generally acceptable, but sensitive individuals should monitor conditions."
            ),
            _ => format!(
                "Those with respiratory conditions should check daily air quality reports when in {name} and limit outdoor activities on poor air quality days."
            ),
        };

        Self {
            best_time_to_visit: format!(
                "Based on air quality and pollen data, the best time to visit {name} is {season}."
            ),
            allergy_sufferers,
            respiratory_conditions,
        }
    }
}
