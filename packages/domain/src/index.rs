//! Flattened, searchable view of the indicator hierarchy.

use wri_domain_models::{
    DomainId, IndicatorEntry, IndicatorNodeKind, IndicatorSections, MetricGroup,
};

use crate::DomainRegistry;

/// Separator between breadcrumb path segments.
pub const PATH_SEPARATOR: &str = " > ";

/// Every node of every domain, paired with its breadcrumb path string.
#[derive(Debug, Clone)]
pub struct IndicatorIndex {
    entries: Vec<IndicatorEntry>,
    /// Lowercased paths, parallel to `entries`.
    haystacks: Vec<String>,
}

impl IndicatorIndex {
    /// Flattens `registry` depth-first: each domain, then its status
    /// metrics, resistance metrics, recovery metrics, then each subdomain
    /// with the same shape.
    #[must_use]
    pub fn build(registry: &DomainRegistry) -> Self {
        let mut builder = Builder::default();

        for domain in registry.domains() {
            let path = vec![domain.label.as_str()];
            builder.push(
                IndicatorNodeKind::Domain,
                domain.id,
                None,
                domain.id.as_ref(),
                &domain.label,
                &path,
            );
            builder.push_sections(domain.id, None, &path, domain);

            for subdomain in &domain.subdomains {
                let mut path = path.clone();
                path.push(&subdomain.label);
                builder.push(
                    IndicatorNodeKind::Subdomain,
                    domain.id,
                    Some(subdomain.id.as_str()),
                    &subdomain.id,
                    &subdomain.label,
                    &path,
                );
                builder.push_sections(domain.id, Some(subdomain.id.as_str()), &path, subdomain);
            }
        }

        let haystacks = builder
            .entries
            .iter()
            .map(|e| e.path.to_lowercase())
            .collect();

        Self {
            entries: builder.entries,
            haystacks,
        }
    }

    /// All entries, in traversal order.
    #[must_use]
    pub fn entries(&self) -> &[IndicatorEntry] {
        &self.entries
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the index is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns entries whose path contains every whitespace-separated word
    /// of `query`, case-insensitively and in any order. An empty query
    /// matches nothing.
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<&IndicatorEntry> {
        let words: Vec<String> = query.split_whitespace().map(str::to_lowercase).collect();
        if words.is_empty() {
            return Vec::new();
        }

        self.entries
            .iter()
            .zip(&self.haystacks)
            .filter(|(_, haystack)| words.iter().all(|w| haystack.contains(w.as_str())))
            .map(|(entry, _)| entry)
            .collect()
    }
}

#[derive(Default)]
struct Builder {
    entries: Vec<IndicatorEntry>,
}

impl Builder {
    fn push(
        &mut self,
        kind: IndicatorNodeKind,
        domain: DomainId,
        subdomain: Option<&str>,
        id: &str,
        label: &str,
        path: &[&str],
    ) {
        self.entries.push(IndicatorEntry {
            kind,
            domain,
            subdomain: subdomain.map(ToOwned::to_owned),
            id: id.to_owned(),
            label: label.to_owned(),
            path: path.join(PATH_SEPARATOR),
        });
    }

    fn push_sections<S: IndicatorSections + ?Sized>(
        &mut self,
        domain: DomainId,
        subdomain: Option<&str>,
        prefix: &[&str],
        sections: &S,
    ) {
        if let Some(status) = sections.status() {
            self.push_group(IndicatorNodeKind::Status, domain, subdomain, prefix, status);
        }

        if let Some(resilience) = sections.resilience() {
            let kind = IndicatorNodeKind::Resilience;
            let label = section_label(kind);
            let mut path = prefix.to_vec();
            path.push(label);
            self.push(kind, domain, subdomain, kind.as_ref(), label, &path);

            if let Some(resistance) = &resilience.resistance {
                self.push_group(
                    IndicatorNodeKind::Resistance,
                    domain,
                    subdomain,
                    &path,
                    resistance,
                );
            }
            if let Some(recovery) = &resilience.recovery {
                self.push_group(IndicatorNodeKind::Recovery, domain, subdomain, &path, recovery);
            }
        }
    }

    fn push_group(
        &mut self,
        kind: IndicatorNodeKind,
        domain: DomainId,
        subdomain: Option<&str>,
        prefix: &[&str],
        group: &MetricGroup,
    ) {
        let label = section_label(kind);
        let mut path = prefix.to_vec();
        path.push(label);
        self.push(kind, domain, subdomain, kind.as_ref(), label, &path);

        for metric in &group.metrics {
            let mut metric_path = path.clone();
            metric_path.push(&metric.label);
            self.push(
                IndicatorNodeKind::Metric,
                domain,
                subdomain,
                &metric.id,
                &metric.label,
                &metric_path,
            );
        }
    }
}

fn section_label(kind: IndicatorNodeKind) -> &'static str {
    kind.section_label().unwrap_or_else(|| kind.into())
}
