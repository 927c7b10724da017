#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Resilience domain identifiers, indicator hierarchy types, and gradient
//! configuration types.
//!
//! The eight resilience domains are fixed; the aggregate "Overall
//! Resilience" score is not a domain but has its own gradient, so gradient
//! configuration is keyed by [`GradientKey`] rather than [`DomainId`].

pub mod gradient;
pub mod hierarchy;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use strum_macros::{AsRefStr, Display, EnumString};

pub use gradient::{GradientConfig, GradientConfigDocument, GradientEntry};
pub use hierarchy::{
    BreadcrumbSegment, DomainDefinition, IndicatorEntry, IndicatorNodeKind, IndicatorSections,
    Metric, MetricGroup, Resilience, Subdomain,
};

/// One of the eight resilience domains.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum DomainId {
    /// Roads, power, water systems and other built assets
    Infrastructure,
    /// Social fabric and demographic capacity
    Communities,
    /// Employment and economic base
    Livelihoods,
    /// Cultural and iconic places and species
    SenseOfPlace,
    /// Native species populations
    Species,
    /// Ecosystem and habitat condition
    Habitats,
    /// Water supply and watershed condition
    Water,
    /// Smoke exposure and air quality
    AirQuality,
}

impl DomainId {
    /// Returns all domains in display order (the flower chart's clockwise
    /// petal order).
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Infrastructure,
            Self::Communities,
            Self::Livelihoods,
            Self::SenseOfPlace,
            Self::Species,
            Self::Habitats,
            Self::Water,
            Self::AirQuality,
        ]
    }
}

/// Key of a gradient configuration entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum GradientKey {
    /// The aggregate "Overall Resilience" score.
    Overall,
    /// A single domain.
    Domain(DomainId),
}

impl GradientKey {
    /// String form of [`Self::Overall`].
    pub const OVERALL: &'static str = "overall";

    /// Returns every key: the aggregate first, then each domain.
    #[must_use]
    pub fn all() -> Vec<Self> {
        std::iter::once(Self::Overall)
            .chain(DomainId::all().iter().copied().map(Self::Domain))
            .collect()
    }

    /// Returns the domain, if this key names one.
    #[must_use]
    pub const fn domain(self) -> Option<DomainId> {
        match self {
            Self::Overall => None,
            Self::Domain(domain) => Some(domain),
        }
    }
}

impl From<DomainId> for GradientKey {
    fn from(domain: DomainId) -> Self {
        Self::Domain(domain)
    }
}

impl fmt::Display for GradientKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Overall => f.pad(Self::OVERALL),
            Self::Domain(domain) => f.pad(domain.as_ref()),
        }
    }
}

/// Error returned when a string names neither a domain nor the aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownKeyError {
    /// The unrecognized key.
    pub key: String,
}

impl fmt::Display for UnknownKeyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown domain key '{}'", self.key)
    }
}

impl std::error::Error for UnknownKeyError {}

impl FromStr for GradientKey {
    type Err = UnknownKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case(Self::OVERALL) || s.eq_ignore_ascii_case("overall_resilience") {
            return Ok(Self::Overall);
        }
        s.parse::<DomainId>()
            .map(Self::Domain)
            .map_err(|_| UnknownKeyError { key: s.to_owned() })
    }
}

impl Serialize for GradientKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for GradientKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_ids_roundtrip_through_strings() {
        for domain in DomainId::all() {
            let s = domain.to_string();
            assert_eq!(s.parse::<DomainId>().unwrap(), *domain);
            assert_eq!(s.parse::<GradientKey>().unwrap(), GradientKey::Domain(*domain));
        }
        assert_eq!(DomainId::SenseOfPlace.to_string(), "sense_of_place");
        assert_eq!(DomainId::AirQuality.as_ref(), "air_quality");
    }

    #[test]
    fn overall_key_aliases() {
        assert_eq!("overall".parse::<GradientKey>().unwrap(), GradientKey::Overall);
        assert_eq!(
            "Overall_Resilience".parse::<GradientKey>().unwrap(),
            GradientKey::Overall
        );
        assert_eq!(GradientKey::Overall.to_string(), "overall");
    }

    #[test]
    fn unknown_key_is_an_error() {
        let err = "fire".parse::<GradientKey>().unwrap_err();
        assert_eq!(err.key, "fire");
    }

    #[test]
    fn all_keys_are_unique() {
        let keys = GradientKey::all();
        assert_eq!(keys.len(), DomainId::all().len() + 1);
        let unique: std::collections::BTreeSet<_> = keys.iter().collect();
        assert_eq!(unique.len(), keys.len());
    }
}
