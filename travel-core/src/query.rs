use serde::{Deserialize, Serialize};
use std::{str::FromStr, sync::Arc};
use tracing::debug;

use crate::{
    catalog::Catalog,
    model::{Destination, SearchFilters},
};

/// How `search` turns the three preference weights into an ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ranking {
    /// Independent stable sorts for air, pollen, then eco. The last enabled
    /// pass decides the order; earlier passes only break its ties.
    #[default]
    Cascade,
    /// One stable sort by a weighted sum of normalized air, pollen and eco keys.
    Composite,
}

impl Ranking {
    pub fn as_str(&self) -> &'static str {
        match self {
            Ranking::Cascade => "cascade",
            Ranking::Composite => "composite",
        }
    }
}

impl std::fmt::Display for Ranking {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Ranking {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "cascade" => Ok(Ranking::Cascade),
            "composite" => Ok(Ranking::Composite),
            _ => Err(anyhow::anyhow!(
                "Unknown ranking '{s}'. Supported rankings: cascade, composite."
            )),
        }
    }
}

/// Read-only queries over a shared catalog.
#[derive(Debug, Clone)]
pub struct QueryService {
    catalog: Arc<Catalog>,
    ranking: Ranking,
}

impl QueryService {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog, ranking: Ranking::default() }
    }

    pub fn with_ranking(mut self, ranking: Ranking) -> Self {
        self.ranking = ranking;
        self
    }

    pub fn ranking(&self) -> Ranking {
        self.ranking
    }

    pub fn list(&self) -> &[Destination] {
        self.catalog.destinations()
    }

    /// `None` is the normal answer for an id that is not in the catalog.
    pub fn get_by_id(&self, id: &str) -> Option<&Destination> {
        self.catalog.find(id)
    }

    /// Filter by name/country substring, then order by the enabled weights.
    ///
    /// Dates and traveler count are ignored. The catalog itself is never
    /// reordered; the result borrows from it.
    pub fn search(&self, filters: &SearchFilters) -> Vec<&Destination> {
        let mut results: Vec<&Destination> = self.catalog.destinations().iter().collect();

        if !filters.destination.is_empty() {
            let term = filters.destination.to_lowercase();
            results.retain(|d| {
                d.name.to_lowercase().contains(&term) || d.country.to_lowercase().contains(&term)
            });
        }

        match self.ranking {
            Ranking::Cascade => cascade(&mut results, filters),
            Ranking::Composite => composite(&mut results, filters),
        }

        debug!(
            term = %filters.destination,
            ranking = %self.ranking,
            matched = results.len(),
            "search finished"
        );

        results
    }
}

fn weight(importance: u8) -> f64 {
    f64::from(importance) / 10.0
}

fn sort_desc_by(results: &mut [&Destination], key: impl Fn(&Destination) -> f64) {
    results.sort_by(|a, b| key(b).total_cmp(&key(a)));
}

fn cascade(results: &mut [&Destination], filters: &SearchFilters) {
    if filters.air_quality_importance > 0 {
        let w = weight(filters.air_quality_importance);
        sort_desc_by(results, |d| f64::from(d.air_quality.aqi) * w);
    }

    if filters.pollen_sensitivity > 0 {
        let w = weight(filters.pollen_sensitivity);
        sort_desc_by(results, |d| f64::from(d.pollen.level.score()) * w);
    }

    if filters.eco_friendly_priority > 0 {
        let w = weight(filters.eco_friendly_priority);
        sort_desc_by(results, |d| f64::from(d.eco_score) * w);
    }
}

fn composite(results: &mut [&Destination], filters: &SearchFilters) {
    if filters.air_quality_importance == 0
        && filters.pollen_sensitivity == 0
        && filters.eco_friendly_priority == 0
    {
        return;
    }

    let (w_air, w_pollen, w_eco) = (
        weight(filters.air_quality_importance),
        weight(filters.pollen_sensitivity),
        weight(filters.eco_friendly_priority),
    );

    let max_aqi = results.iter().map(|d| d.air_quality.aqi).max().unwrap_or(0);
    let max_eco = results.iter().map(|d| d.eco_score).max().unwrap_or(0);

    let normalized = |value: u32, max: u32| {
        if max == 0 { 0.0 } else { f64::from(value) / f64::from(max) }
    };

    sort_desc_by(results, |d| {
        w_air * normalized(d.air_quality.aqi, max_aqi)
            + w_pollen * f64::from(d.pollen.level.score()) / 3.0
            + w_eco * normalized(d.eco_score, max_eco)
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> QueryService {
        QueryService::new(Catalog::builtin())
    }

    fn names<'a>(dests: impl IntoIterator<Item = &'a Destination>) -> Vec<&'a str> {
        dests.into_iter().map(|d| d.name.as_str()).collect()
    }

    const DECLARED: [&str; 6] =
        ["Copenhagen", "Costa Rica", "Kyoto", "Vancouver", "Ljubljana", "Reykjavik"];

    #[test]
    fn list_is_declaration_order_and_idempotent() {
        let svc = service();
        assert_eq!(names(svc.list()), DECLARED);
        assert_eq!(names(svc.list()), DECLARED);
    }

    #[test]
    fn get_by_id_finds_kyoto() {
        let svc = service();
        assert_eq!(svc.get_by_id("3").map(|d| d.name.as_str()), Some("Kyoto"));
    }

    #[test]
    fn get_by_id_missing_is_none() {
        assert!(service().get_by_id("does-not-exist").is_none());
    }

    #[test]
    fn search_by_country_is_case_insensitive() {
        let filters = SearchFilters { destination: "denmark".into(), ..Default::default() };
        assert_eq!(names(service().search(&filters)), ["Copenhagen"]);
    }

    #[test]
    fn search_matches_name_substring() {
        let filters = SearchFilters { destination: "KY".into(), ..Default::default() };
        assert_eq!(names(service().search(&filters)), ["Kyoto"]);
    }

    #[test]
    fn whitespace_filter_is_not_trimmed() {
        let filters = SearchFilters { destination: " ".into(), ..Default::default() };
        assert_eq!(names(service().search(&filters)), ["Costa Rica"]);
    }

    #[test]
    fn search_with_no_match_is_empty() {
        let filters = SearchFilters { destination: "atlantis".into(), ..Default::default() };
        assert!(service().search(&filters).is_empty());
    }

    #[test]
    fn search_without_weights_keeps_declaration_order() {
        assert_eq!(names(service().search(&SearchFilters::default())), DECLARED);
    }

    #[test]
    fn air_only_sorts_by_aqi_descending() {
        let filters = SearchFilters { air_quality_importance: 10, ..Default::default() };
        let svc = service();
        let results = svc.search(&filters);

        assert_eq!(
            names(results.iter().copied()),
            ["Kyoto", "Ljubljana", "Vancouver", "Copenhagen", "Costa Rica", "Reykjavik"]
        );
        let aqis: Vec<_> = results.iter().map(|d| d.air_quality.aqi).collect();
        assert!(aqis.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn weight_magnitude_does_not_change_order() {
        let svc = service();
        let low = SearchFilters { air_quality_importance: 1, ..Default::default() };
        let high = SearchFilters { air_quality_importance: 10, ..Default::default() };
        assert_eq!(names(svc.search(&low)), names(svc.search(&high)));
    }

    #[test]
    fn eco_only_ranks_reykjavik_first_and_kyoto_last() {
        let filters = SearchFilters { eco_friendly_priority: 10, ..Default::default() };
        let svc = service();
        let results = names(svc.search(&filters));

        assert_eq!(results.first(), Some(&"Reykjavik"));
        assert_eq!(results.last(), Some(&"Kyoto"));
    }

    #[test]
    fn pollen_only_is_stable_within_levels() {
        let filters = SearchFilters { pollen_sensitivity: 5, ..Default::default() };
        assert_eq!(
            names(service().search(&filters)),
            ["Copenhagen", "Ljubljana", "Reykjavik", "Costa Rica", "Vancouver", "Kyoto"]
        );
    }

    #[test]
    fn last_enabled_pass_wins_in_cascade() {
        let filters = SearchFilters {
            air_quality_importance: 10,
            eco_friendly_priority: 1,
            ..Default::default()
        };
        let svc = service();
        let results = names(svc.search(&filters));
        assert_eq!(
            results,
            ["Reykjavik", "Copenhagen", "Ljubljana", "Costa Rica", "Vancouver", "Kyoto"]
        );
    }

    #[test]
    fn earlier_pass_breaks_ties_of_later_pass() {
        // Low pollen: Copenhagen (22), Ljubljana (28), Reykjavik (15).
        let filters = SearchFilters {
            air_quality_importance: 10,
            pollen_sensitivity: 10,
            ..Default::default()
        };
        let svc = service();
        let results = names(svc.search(&filters));
        assert_eq!(&results[..3], ["Ljubljana", "Copenhagen", "Reykjavik"]);
        assert_eq!(&results[3..], ["Vancouver", "Costa Rica", "Kyoto"]);
    }

    #[test]
    fn dates_and_travelers_do_not_affect_results() {
        let svc = service();
        let plain = SearchFilters { eco_friendly_priority: 3, ..Default::default() };
        let dated = SearchFilters {
            start_date: chrono::NaiveDate::from_ymd_opt(2024, 6, 1),
            end_date: chrono::NaiveDate::from_ymd_opt(2024, 6, 8),
            travelers: 9,
            ..plain.clone()
        };
        assert_eq!(names(svc.search(&plain)), names(svc.search(&dated)));
    }

    #[test]
    fn search_never_reorders_catalog() {
        let svc = service();
        let filters = SearchFilters {
            air_quality_importance: 10,
            pollen_sensitivity: 10,
            eco_friendly_priority: 10,
            ..Default::default()
        };
        let _ = svc.search(&filters);
        assert_eq!(names(svc.list()), DECLARED);
        assert_eq!(names(Catalog::builtin().destinations()), DECLARED);
    }

    #[test]
    fn composite_blends_all_weights() {
        let svc = service().with_ranking(Ranking::Composite);
        let filters = SearchFilters {
            air_quality_importance: 10,
            eco_friendly_priority: 10,
            ..Default::default()
        };
        // Kyoto has the top aqi but the lowest eco score; the blend still
        // favors it over the low-aqi entries.
        let results = names(svc.search(&filters));
        assert_eq!(
            results,
            ["Kyoto", "Ljubljana", "Vancouver", "Copenhagen", "Costa Rica", "Reykjavik"]
        );
    }

    #[test]
    fn composite_with_zero_weights_keeps_order() {
        let svc = service().with_ranking(Ranking::Composite);
        assert_eq!(names(svc.search(&SearchFilters::default())), DECLARED);
    }

    #[test]
    fn composite_single_weight_matches_cascade() {
        let filters = SearchFilters { eco_friendly_priority: 7, ..Default::default() };
        let cascade = service();
        let composite = service().with_ranking(Ranking::Composite);
        assert_eq!(names(cascade.search(&filters)), names(composite.search(&filters)));
    }

    #[test]
    fn ranking_parses_case_insensitively() {
        assert_eq!("Composite".parse::<Ranking>().unwrap(), Ranking::Composite);
        assert_eq!(Ranking::Cascade.to_string(), "cascade");
        let err = "best".parse::<Ranking>().unwrap_err();
        assert!(err.to_string().contains("Unknown ranking"));
    }
}
