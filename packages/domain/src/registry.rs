//! Compile-time registry of resilience domain definitions.
//!
//! Each entry is a `(name, toml_content)` pair embedded via `include_str!`.
//! Changing a domain's metrics or brand color only requires editing its TOML
//! file in `domains/`.

use std::sync::LazyLock;

use wri_color::Rgb;
use wri_domain_models::{DomainDefinition, DomainId};

use crate::DomainError;

/// Embedded TOML domain definitions, in display order.
const DOMAIN_TOMLS: &[(&str, &str)] = &[
    (
        "infrastructure",
        include_str!("../domains/infrastructure.toml"),
    ),
    ("communities", include_str!("../domains/communities.toml")),
    ("livelihoods", include_str!("../domains/livelihoods.toml")),
    (
        "sense_of_place",
        include_str!("../domains/sense_of_place.toml"),
    ),
    ("species", include_str!("../domains/species.toml")),
    ("habitats", include_str!("../domains/habitats.toml")),
    ("water", include_str!("../domains/water.toml")),
    ("air_quality", include_str!("../domains/air_quality.toml")),
];

static BUILTIN: LazyLock<DomainRegistry> = LazyLock::new(|| {
    DomainRegistry::from_tomls(DOMAIN_TOMLS)
        .unwrap_or_else(|e| panic!("Failed to load embedded domain definitions: {e}"))
});

/// The static set of domain definitions.
#[derive(Debug, Clone)]
pub struct DomainRegistry {
    domains: Vec<DomainDefinition>,
}

impl DomainRegistry {
    /// Returns the registry built from the embedded definitions.
    ///
    /// # Panics
    ///
    /// Panics on first use if any embedded TOML file fails to parse. Since
    /// these are compile-time constants, a failure is a development error
    /// and is caught by the tests below.
    #[must_use]
    pub fn builtin() -> &'static Self {
        &BUILTIN
    }

    /// Parses a registry from `(name, toml)` pairs.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::Definition`] if a definition does not parse and
    /// [`DomainError::DuplicateDomain`] if two definitions share an id.
    pub fn from_tomls(sources: &[(&str, &str)]) -> Result<Self, DomainError> {
        let mut domains: Vec<DomainDefinition> = Vec::with_capacity(sources.len());

        for (name, toml_str) in sources {
            let definition: DomainDefinition =
                toml::de::from_str(toml_str).map_err(|source| DomainError::Definition {
                    name: (*name).to_owned(),
                    source,
                })?;

            if domains.iter().any(|d| d.id == definition.id) {
                return Err(DomainError::DuplicateDomain(definition.id.to_string()));
            }

            log::trace!(
                "Loaded domain '{}' with {} metrics",
                definition.id,
                definition.metrics().count()
            );
            domains.push(definition);
        }

        Ok(Self { domains })
    }

    /// All definitions, in display order.
    #[must_use]
    pub fn domains(&self) -> &[DomainDefinition] {
        &self.domains
    }

    /// Returns the definition for `id`.
    #[must_use]
    pub fn get(&self, id: DomainId) -> Option<&DomainDefinition> {
        self.domains.iter().find(|d| d.id == id)
    }

    /// Resolves a domain by its string identifier.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::UnknownDomain`] if the id does not name a
    /// registered domain.
    pub fn lookup(&self, id: &str) -> Result<&DomainDefinition, DomainError> {
        id.trim()
            .parse::<DomainId>()
            .ok()
            .and_then(|id| self.get(id))
            .ok_or_else(|| DomainError::UnknownDomain(id.to_owned()))
    }

    /// The domain's brand color.
    #[must_use]
    pub fn brand_color(&self, id: DomainId) -> Option<Rgb> {
        self.get(id).map(|d| d.color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn loads_every_domain() {
        let registry = DomainRegistry::builtin();
        assert_eq!(registry.domains().len(), DomainId::all().len());
        for id in DomainId::all() {
            assert!(registry.get(*id).is_some(), "missing definition for {id}");
        }
    }

    #[test]
    fn registry_order_matches_display_order() {
        let ids: Vec<DomainId> = DomainRegistry::builtin()
            .domains()
            .iter()
            .map(|d| d.id)
            .collect();
        assert_eq!(ids, DomainId::all());
    }

    #[test]
    fn every_domain_has_metrics_and_distinct_color() {
        let mut colors = BTreeSet::new();
        for domain in DomainRegistry::builtin().domains() {
            assert!(!domain.label.is_empty(), "{} has empty label", domain.id);
            assert!(
                domain.metrics().next().is_some(),
                "{} has no metrics",
                domain.id
            );
            assert!(
                colors.insert(domain.color),
                "{} reuses brand color {}",
                domain.id,
                domain.color
            );
        }
    }

    #[test]
    fn metric_ids_unique_within_domain() {
        for domain in DomainRegistry::builtin().domains() {
            let mut seen = BTreeSet::new();
            for metric in domain.metrics() {
                assert!(
                    seen.insert(&metric.id),
                    "Duplicate metric {} in {}",
                    metric.id,
                    domain.id
                );
            }
        }
    }

    #[test]
    fn lookup_by_string() {
        let registry = DomainRegistry::builtin();
        assert_eq!(registry.lookup("water").unwrap().label, "Water");
        assert_eq!(
            registry.lookup("air_quality").unwrap().color,
            Rgb::new(0x7f, 0x8c, 0x8d)
        );
        assert!(matches!(
            registry.lookup("volcanoes"),
            Err(DomainError::UnknownDomain(_))
        ));
    }

    #[test]
    fn duplicate_definitions_are_rejected() {
        let water = DOMAIN_TOMLS[6];
        assert_eq!(water.0, "water");
        let result = DomainRegistry::from_tomls(&[water, water]);
        assert!(matches!(result, Err(DomainError::DuplicateDomain(id)) if id == "water"));
    }

    #[test]
    fn malformed_definition_is_reported() {
        let result = DomainRegistry::from_tomls(&[("broken", "id = 3")]);
        assert!(matches!(
            result,
            Err(DomainError::Definition { name, .. }) if name == "broken"
        ));
    }
}
