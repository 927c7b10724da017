//! Indicator hierarchy types.
//!
//! A domain breaks down into an optional Status section and an optional
//! Resilience section; Resilience in turn holds optional Resistance and
//! Recovery groups. Richer domains repeat the same shape in subdomains.
//! Presence is encoded with `Option` so traversal code matches on it
//! instead of probing for fields.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, IntoStaticStr};
use wri_color::Rgb;

use crate::DomainId;

/// A single leaf indicator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metric {
    /// Metric identifier, also the column name in metric CSV tables.
    pub id: String,
    /// Display label.
    pub label: String,
    /// Longer explanation shown in the indicator panel.
    #[serde(default)]
    pub description: String,
}

/// An ordered list of metrics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricGroup {
    /// Metrics in display order.
    #[serde(default)]
    pub metrics: Vec<Metric>,
}

/// The Resilience section: ability to withstand a fire and to rebound.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resilience {
    /// Resistance metrics.
    #[serde(default)]
    pub resistance: Option<MetricGroup>,
    /// Recovery metrics.
    #[serde(default)]
    pub recovery: Option<MetricGroup>,
}

/// Shared shape of domains and subdomains.
pub trait IndicatorSections {
    /// The Status section, if present.
    fn status(&self) -> Option<&MetricGroup>;
    /// The Resilience section, if present.
    fn resilience(&self) -> Option<&Resilience>;
}

/// A nested grouping inside a domain (e.g. "Iconic Places" inside
/// "Sense of Place").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subdomain {
    /// Subdomain identifier, unique within its domain.
    pub id: String,
    /// Display label.
    pub label: String,
    /// Status metrics.
    #[serde(default)]
    pub status: Option<MetricGroup>,
    /// Resilience metrics.
    #[serde(default)]
    pub resilience: Option<Resilience>,
}

impl IndicatorSections for Subdomain {
    fn status(&self) -> Option<&MetricGroup> {
        self.status.as_ref()
    }

    fn resilience(&self) -> Option<&Resilience> {
        self.resilience.as_ref()
    }
}

/// A resilience domain and its full indicator breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainDefinition {
    /// Stable identifier.
    pub id: DomainId,
    /// Display label (e.g. "Air Quality").
    pub label: String,
    /// Brand color, the top of the domain's default gradient.
    pub color: Rgb,
    /// Short description of the domain.
    #[serde(default)]
    pub description: String,
    /// Status metrics.
    #[serde(default)]
    pub status: Option<MetricGroup>,
    /// Resilience metrics.
    #[serde(default)]
    pub resilience: Option<Resilience>,
    /// Nested subdomains, each with the same section shape.
    #[serde(default)]
    pub subdomains: Vec<Subdomain>,
}

impl IndicatorSections for DomainDefinition {
    fn status(&self) -> Option<&MetricGroup> {
        self.status.as_ref()
    }

    fn resilience(&self) -> Option<&Resilience> {
        self.resilience.as_ref()
    }
}

impl DomainDefinition {
    /// Iterates over every metric in the domain, subdomains included.
    pub fn metrics(&self) -> impl Iterator<Item = &Metric> {
        let nested = self
            .subdomains
            .iter()
            .flat_map(|s| section_metrics(s.status.as_ref(), s.resilience.as_ref()));
        section_metrics(self.status.as_ref(), self.resilience.as_ref()).chain(nested)
    }
}

fn section_metrics<'a>(
    status: Option<&'a MetricGroup>,
    resilience: Option<&'a Resilience>,
) -> impl Iterator<Item = &'a Metric> {
    let groups = resilience.into_iter().flat_map(|r| {
        r.resistance
            .as_ref()
            .into_iter()
            .chain(r.recovery.as_ref())
    });
    status
        .into_iter()
        .chain(groups)
        .flat_map(|group| group.metrics.iter())
}

/// The kind of node an [`IndicatorEntry`] points at.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, AsRefStr, IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum IndicatorNodeKind {
    /// A top-level domain.
    Domain,
    /// A subdomain.
    Subdomain,
    /// The Status section.
    Status,
    /// The Resilience section.
    Resilience,
    /// The Resistance group.
    Resistance,
    /// The Recovery group.
    Recovery,
    /// A leaf metric.
    Metric,
}

impl IndicatorNodeKind {
    /// Breadcrumb label for section nodes. Domains, subdomains and metrics
    /// carry their own labels and return `None`.
    #[must_use]
    pub const fn section_label(self) -> Option<&'static str> {
        match self {
            Self::Status => Some("Status"),
            Self::Resilience => Some("Resilience"),
            Self::Resistance => Some("Resistance"),
            Self::Recovery => Some("Recovery"),
            Self::Domain | Self::Subdomain | Self::Metric => None,
        }
    }
}

/// One flattened, searchable node of the hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorEntry {
    /// What this node is.
    pub kind: IndicatorNodeKind,
    /// Owning domain.
    pub domain: DomainId,
    /// Owning subdomain, when nested.
    pub subdomain: Option<String>,
    /// Node identifier: the metric or subdomain id, the domain id, or the
    /// section name for section nodes.
    pub id: String,
    /// Display label of this node.
    pub label: String,
    /// Full breadcrumb path (e.g. "Water > Resilience > Recovery").
    pub path: String,
}

/// One segment of a breadcrumb trail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BreadcrumbSegment {
    /// Segment label.
    pub label: String,
    /// Whether this is the node being viewed (always the last segment).
    pub is_current: bool,
}
