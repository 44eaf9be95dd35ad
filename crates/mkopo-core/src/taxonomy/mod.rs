//! Geographic taxonomy: region -> district -> wards.
//!
//! The taxonomy is read once from a JSON resource whose top-level keys are
//! region names, whose values are objects keyed by district name, and whose
//! leaves are arrays of ward names. Declared order is kept exactly as written
//! in the resource, since location resolution walks it first-hit.

use std::collections::HashSet;
use std::path::Path;

use serde_json::{Map, Value};
use tracing::debug;

use crate::error::ConfigError;

/// Taxonomy shipped with the library (Tanzania).
pub static EMBEDDED_TAXONOMY: &str = include_str!("../../data/tanzania_locations.json");

/// Result type for taxonomy loading.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// A named place with its pre-lowered lookup key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Place {
    name: String,
    key: String,
}

impl Place {
    fn new(name: &str) -> Self {
        let name = name.trim().to_string();
        let key = name.to_lowercase();
        Self { name, key }
    }

    /// Name as declared in the resource.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the name occurs in `lowered_text` (already lowercased).
    pub fn occurs_in(&self, lowered_text: &str) -> bool {
        lowered_text.contains(&self.key)
    }
}

/// A district and its wards in declared order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct District {
    place: Place,
    wards: Vec<Place>,
}

impl District {
    pub fn name(&self) -> &str {
        self.place.name()
    }

    pub fn place(&self) -> &Place {
        &self.place
    }

    pub fn wards(&self) -> &[Place] {
        &self.wards
    }
}

/// A region and its districts in declared order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    place: Place,
    districts: Vec<District>,
}

impl Region {
    pub fn name(&self) -> &str {
        self.place.name()
    }

    pub fn place(&self) -> &Place {
        &self.place
    }

    pub fn districts(&self) -> &[District] {
        &self.districts
    }

    /// Look up a district by name, ignoring case.
    pub fn district(&self, name: &str) -> Option<&District> {
        let key = name.trim().to_lowercase();
        self.districts.iter().find(|d| d.place.key == key)
    }
}

/// Immutable three-level location lookup table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeoTaxonomy {
    regions: Vec<Region>,
}

impl GeoTaxonomy {
    /// Load the taxonomy compiled into the library.
    pub fn embedded() -> Result<Self> {
        Self::from_json_str(EMBEDDED_TAXONOMY)
    }

    /// Load from `path` if given, otherwise use the embedded taxonomy.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Self::embedded(),
        }
    }

    /// Load a taxonomy from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let taxonomy = Self::from_json_str(&content)?;
        debug!("Loaded location taxonomy from {}", path.display());
        Ok(taxonomy)
    }

    /// Parse a taxonomy from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(&value)
    }

    /// Build a taxonomy from an already parsed JSON value.
    pub fn from_value(value: &Value) -> Result<Self> {
        let root = value
            .as_object()
            .ok_or_else(|| ConfigError::Taxonomy("top level must be an object of regions".into()))?;

        if root.is_empty() {
            return Err(ConfigError::Taxonomy("no regions declared".into()));
        }

        let mut seen = HashSet::new();
        let mut regions = Vec::with_capacity(root.len());

        for (region_name, districts) in root {
            let place = named_place(region_name, "region")?;
            if !seen.insert(place.key.clone()) {
                return Err(ConfigError::Taxonomy(format!(
                    "duplicate region '{}'",
                    place.name
                )));
            }

            let districts = districts.as_object().ok_or_else(|| {
                ConfigError::Taxonomy(format!(
                    "region '{}' must map to an object of districts",
                    place.name
                ))
            })?;

            regions.push(Region {
                districts: parse_districts(&place, districts)?,
                place,
            });
        }

        let taxonomy = Self { regions };
        debug!(
            "Location taxonomy: {} regions, {} districts, {} wards",
            taxonomy.regions.len(),
            taxonomy.district_count(),
            taxonomy.ward_count()
        );
        Ok(taxonomy)
    }

    /// Regions in declared order.
    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// Look up a region by name, ignoring case.
    pub fn region(&self, name: &str) -> Option<&Region> {
        let key = name.trim().to_lowercase();
        self.regions.iter().find(|r| r.place.key == key)
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn district_count(&self) -> usize {
        self.regions.iter().map(|r| r.districts.len()).sum()
    }

    pub fn ward_count(&self) -> usize {
        self.regions
            .iter()
            .flat_map(|r| &r.districts)
            .map(|d| d.wards.len())
            .sum()
    }
}

fn named_place(name: &str, level: &str) -> Result<Place> {
    let place = Place::new(name);
    if place.name.is_empty() {
        return Err(ConfigError::Taxonomy(format!("empty {} name", level)));
    }
    Ok(place)
}

fn parse_districts(region: &Place, districts: &Map<String, Value>) -> Result<Vec<District>> {
    let mut seen = HashSet::new();
    let mut parsed = Vec::with_capacity(districts.len());

    for (district_name, wards) in districts {
        let place = named_place(district_name, "district")?;
        if !seen.insert(place.key.clone()) {
            return Err(ConfigError::Taxonomy(format!(
                "duplicate district '{}' in region '{}'",
                place.name, region.name
            )));
        }

        let wards = wards.as_array().ok_or_else(|| {
            ConfigError::Taxonomy(format!(
                "district '{}' in region '{}' must map to an array of wards",
                place.name, region.name
            ))
        })?;

        let wards = wards
            .iter()
            .map(|ward| {
                let name = ward.as_str().ok_or_else(|| {
                    ConfigError::Taxonomy(format!(
                        "ward names in district '{}' must be strings",
                        place.name
                    ))
                })?;
                named_place(name, "ward")
            })
            .collect::<Result<Vec<_>>>()?;

        parsed.push(District { place, wards });
    }

    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_embedded_taxonomy_loads() {
        let taxonomy = GeoTaxonomy::embedded().unwrap();

        assert!(!taxonomy.is_empty());
        assert_eq!(taxonomy.regions()[0].name(), "Dar es Salaam");

        let dar = taxonomy.region("dar es salaam").unwrap();
        let kinondoni = dar.district("KINONDONI").unwrap();
        assert!(kinondoni.wards().iter().any(|w| w.name() == "Mikocheni"));
    }

    #[test]
    fn test_declared_order_preserved() {
        let json = r#"{
            "Zeta": {"Z1": ["a", "b"]},
            "Alpha": {"A2": [], "A1": ["c"]}
        }"#;
        let taxonomy = GeoTaxonomy::from_json_str(json).unwrap();

        let names: Vec<&str> = taxonomy.regions().iter().map(|r| r.name()).collect();
        assert_eq!(names, vec!["Zeta", "Alpha"]);

        let districts: Vec<&str> = taxonomy.regions()[1]
            .districts()
            .iter()
            .map(|d| d.name())
            .collect();
        assert_eq!(districts, vec!["A2", "A1"]);
        assert_eq!(taxonomy.ward_count(), 3);
    }

    #[test]
    fn test_rejects_non_object_root() {
        let err = GeoTaxonomy::from_json_str(r#"["Arusha"]"#).unwrap_err();
        assert!(matches!(err, ConfigError::Taxonomy(_)));
    }

    #[test]
    fn test_rejects_empty_taxonomy() {
        assert!(GeoTaxonomy::from_json_str("{}").is_err());
    }

    #[test]
    fn test_rejects_bad_ward_list() {
        let err = GeoTaxonomy::from_json_str(r#"{"Arusha": {"Meru": "Usa River"}}"#).unwrap_err();
        assert!(err.to_string().contains("array of wards"));

        let err = GeoTaxonomy::from_json_str(r#"{"Arusha": {"Meru": [1, 2]}}"#).unwrap_err();
        assert!(err.to_string().contains("must be strings"));
    }

    #[test]
    fn test_rejects_duplicate_names_ignoring_case() {
        let err = GeoTaxonomy::from_json_str(r#"{"Arusha": {}, "ARUSHA": {}}"#).unwrap_err();
        assert!(err.to_string().contains("duplicate region"));

        let err =
            GeoTaxonomy::from_json_str(r#"{"Arusha": {"Meru": [], "meru": []}}"#).unwrap_err();
        assert!(err.to_string().contains("duplicate district"));
    }

    #[test]
    fn test_wards_may_repeat() {
        let json = r#"{"R": {"D1": ["Majengo"], "D2": ["Majengo"]}}"#;
        assert!(GeoTaxonomy::from_json_str(json).is_ok());
    }

    #[test]
    fn test_invalid_json() {
        let err = GeoTaxonomy::from_json_str("{not json").unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = GeoTaxonomy::from_file(Path::new("/nonexistent/locations.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("locations.json");
        std::fs::write(&path, r#"{"Mwanza": {"Ilemela": ["Buswelu"]}}"#).unwrap();

        let taxonomy = GeoTaxonomy::load(Some(&path)).unwrap();
        assert_eq!(taxonomy.len(), 1);
        assert_eq!(taxonomy.district_count(), 1);
    }
}
