//! Location resolution against the geographic taxonomy.

use tracing::debug;

use crate::models::LocationMatch;
use crate::taxonomy::GeoTaxonomy;

/// Resolves region, district and ward mentions in free text.
///
/// The walk is first-hit and never backtracks: the first region (in
/// taxonomy order) whose name occurs in the text is chosen, then only its
/// districts are searched, then only the chosen district's wards. A miss
/// at any level ends the walk with whatever was found so far.
#[derive(Debug, Clone, Copy)]
pub struct LocationResolver<'a> {
    taxonomy: &'a GeoTaxonomy,
}

impl<'a> LocationResolver<'a> {
    pub fn new(taxonomy: &'a GeoTaxonomy) -> Self {
        Self { taxonomy }
    }

    /// Resolve the location mentioned in `text`.
    pub fn resolve(&self, text: &str) -> LocationMatch {
        let lowered = text.to_lowercase();

        let Some(region) = self
            .taxonomy
            .regions()
            .iter()
            .find(|r| r.place().occurs_in(&lowered))
        else {
            debug!("No region found");
            return LocationMatch::default();
        };
        debug!("Region: {}", region.name());
        let location = LocationMatch::in_region(region.name());

        let Some(district) = region
            .districts()
            .iter()
            .find(|d| d.place().occurs_in(&lowered))
        else {
            return location;
        };
        debug!("District: {}", district.name());
        let location = location.with_district(district.name());

        match district.wards().iter().find(|w| w.occurs_in(&lowered)) {
            Some(ward) => {
                debug!("Ward: {}", ward.name());
                location.with_ward(ward.name())
            }
            None => location,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn custom() -> GeoTaxonomy {
        GeoTaxonomy::from_json_str(
            r#"{
                "Arusha": {"Arusha City": ["Kaloleni", "Sekei"], "Meru": ["Usa River"]},
                "Mwanza": {"Ilemela": ["Buswelu"], "Nyamagana": ["Igogo"]}
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_full_hierarchy_from_embedded_data() {
        let taxonomy = GeoTaxonomy::embedded().unwrap();
        let location =
            LocationResolver::new(&taxonomy).resolve("Lives in Dar es Salaam, Kinondoni, Mikocheni");
        assert_eq!(location.region(), Some("Dar es Salaam"));
        assert_eq!(location.district(), Some("Kinondoni"));
        assert_eq!(location.ward(), Some("Mikocheni"));
    }

    #[test]
    fn test_case_insensitive() {
        let taxonomy = custom();
        let location = LocationResolver::new(&taxonomy)
            .resolve("ARUSHA region, MERU district, usa river ward");
        assert_eq!(location.format(), "Usa River, Meru, Arusha");
    }

    #[test]
    fn test_taxonomy_order_wins() {
        let taxonomy = custom();
        let location =
            LocationResolver::new(&taxonomy).resolve("Moved from Mwanza to Arusha last year");
        assert_eq!(location.region(), Some("Arusha"));
        assert_eq!(location.district(), None);
    }

    #[test]
    fn test_no_backtracking() {
        let taxonomy = custom();
        // Arusha is chosen, so Ilemela/Buswelu under Mwanza are never considered.
        let location = LocationResolver::new(&taxonomy)
            .resolve("Arusha office; home in Mwanza, Ilemela, Buswelu");
        assert_eq!(location, LocationMatch::in_region("Arusha"));
    }

    #[test]
    fn test_ward_only_searched_in_chosen_district() {
        let taxonomy = custom();
        let location = LocationResolver::new(&taxonomy).resolve("Meru, Kaloleni");
        assert_eq!(location.region(), None);

        let location = LocationResolver::new(&taxonomy).resolve("Arusha: Meru, Kaloleni");
        assert_eq!(location.district(), Some("Meru"));
        assert_eq!(location.ward(), None);
    }

    #[test]
    fn test_no_location() {
        let taxonomy = custom();
        assert!(LocationResolver::new(&taxonomy).resolve("no places here").is_empty());
        assert!(LocationResolver::new(&taxonomy).resolve("").is_empty());
    }
}
