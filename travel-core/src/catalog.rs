use anyhow::{Context, Result};
use std::{
    collections::HashSet,
    fs,
    path::Path,
    sync::{Arc, LazyLock},
};
use tracing::info;

use crate::{error::CatalogError, model::Destination};

mod builtin;

static BUILTIN: LazyLock<Arc<Catalog>> =
    LazyLock::new(|| Arc::new(Catalog { destinations: builtin::destinations() }));

/// Read-only, fixed-order set of destinations.
///
/// A catalog is built once and then only handed out behind shared references,
/// so concurrent readers never need a lock.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    destinations: Vec<Destination>,
}

impl Catalog {
    /// Validate ids and wrap the given destinations, keeping their order.
    pub fn new(destinations: Vec<Destination>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(destinations.len());

        for (idx, dest) in destinations.iter().enumerate() {
            if dest.id.is_empty() {
                return Err(CatalogError::EmptyId(idx));
            }
            if !seen.insert(dest.id.as_str()) {
                return Err(CatalogError::DuplicateId(dest.id.clone()));
            }
        }

        Ok(Self { destinations })
    }

    /// The six bundled destinations, shared for the whole process.
    pub fn builtin() -> Arc<Catalog> {
        Arc::clone(&BUILTIN)
    }

    /// Parse a JSON array of destinations.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let destinations: Vec<Destination> =
            serde_json::from_str(json).context("Failed to parse destination catalog JSON")?;

        Ok(Self::new(destinations)?)
    }

    /// Load a JSON catalog from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalog file: {}", path.display()))?;

        let catalog = Self::from_json_str(&contents)
            .with_context(|| format!("Invalid catalog file: {}", path.display()))?;

        info!(path = %path.display(), destinations = catalog.len(), "loaded catalog");
        Ok(catalog)
    }

    pub fn destinations(&self) -> &[Destination] {
        &self.destinations
    }

    pub fn find(&self, id: &str) -> Option<&Destination> {
        self.destinations.iter().find(|d| d.id == id)
    }

    pub fn len(&self) -> usize {
        self.destinations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.destinations.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn names(catalog: &Catalog) -> Vec<&str> {
        catalog.destinations().iter().map(|d| d.name.as_str()).collect()
    }

    #[test]
    fn builtin_has_six_destinations_in_order() {
        let catalog = Catalog::builtin();
        assert_eq!(
            names(&catalog),
            ["Copenhagen", "Costa Rica", "Kyoto", "Vancouver", "Ljubljana", "Reykjavik"]
        );
        let ids: Vec<_> = catalog.destinations().iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, ["1", "2", "3", "4", "5", "6"]);
    }

    #[test]
    fn builtin_is_shared() {
        let a = Catalog::builtin();
        let b = Catalog::builtin();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn find_returns_none_for_unknown_id() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.find("3").map(|d| d.name.as_str()), Some("Kyoto"));
        assert!(catalog.find("does-not-exist").is_none());
    }

    #[test]
    fn new_rejects_duplicate_ids() {
        let mut dests = Catalog::builtin().destinations().to_vec();
        dests[1].id = "1".into();

        let err = Catalog::new(dests).unwrap_err();
        assert_eq!(err, CatalogError::DuplicateId("1".into()));
    }

    #[test]
    fn new_rejects_empty_id() {
        let mut dests = Catalog::builtin().destinations().to_vec();
        dests[4].id.clear();

        assert_eq!(Catalog::new(dests).unwrap_err(), CatalogError::EmptyId(4));
    }

    #[test]
    fn json_roundtrip_keeps_camel_case_shape() {
        let json = serde_json::to_string(Catalog::builtin().destinations()).unwrap();
        assert!(json.contains("\"ecoScore\":92"));
        assert!(json.contains("\"sustainableOptions\""));
        assert!(json.contains("\"coordinates\":[55.6761,12.5683]"));

        let parsed = Catalog::from_json_str(&json).unwrap();
        assert_eq!(&parsed, Catalog::builtin().as_ref());
    }

    #[test]
    fn load_reads_catalog_from_file() {
        let builtin = Catalog::builtin();
        let single = &builtin.destinations()[5..];
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(serde_json::to_string(single).unwrap().as_bytes())
            .unwrap();

        let catalog = Catalog::load(file.path()).unwrap();
        assert_eq!(names(&catalog), ["Reykjavik"]);
    }

    #[test]
    fn load_reports_path_on_bad_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"{ not json").unwrap();

        let err = Catalog::load(file.path()).unwrap_err();
        assert!(err.to_string().contains("Invalid catalog file"));
    }
}
