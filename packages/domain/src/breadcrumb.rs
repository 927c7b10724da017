//! Resolves a metric identifier back to its place in the hierarchy.

use wri_domain_models::{BreadcrumbSegment, IndicatorNodeKind, IndicatorSections, MetricGroup};

use crate::DomainRegistry;

/// Builds the breadcrumb trail for `metric_id` within `domain_id`, e.g.
/// `Water > Resilience > Recovery > Recovery Metric 3`.
///
/// Only the final segment is marked current. Identifiers that cannot be
/// resolved degrade to a single segment showing the raw metric id.
#[must_use]
pub fn breadcrumb(
    registry: &DomainRegistry,
    metric_id: &str,
    domain_id: &str,
) -> Vec<BreadcrumbSegment> {
    let labels = registry.lookup(domain_id).ok().and_then(|domain| {
        let mut trail = vec![domain.label.as_str()];

        if let Some(rest) = find_in_sections(domain, metric_id) {
            trail.extend(rest);
            return Some(trail);
        }

        domain.subdomains.iter().find_map(|subdomain| {
            find_in_sections(subdomain, metric_id).map(|rest| {
                let mut trail = trail.clone();
                trail.push(&subdomain.label);
                trail.extend(rest);
                trail
            })
        })
    });

    let Some(labels) = labels else {
        log::debug!("No breadcrumb for metric '{metric_id}' in domain '{domain_id}'");
        return vec![BreadcrumbSegment {
            label: metric_id.to_owned(),
            is_current: true,
        }];
    };

    let last = labels.len() - 1;
    labels
        .into_iter()
        .enumerate()
        .map(|(i, label)| BreadcrumbSegment {
            label: label.to_owned(),
            is_current: i == last,
        })
        .collect()
}

/// Renders a trail as a single `A > B > C` string.
#[must_use]
pub fn breadcrumb_path(segments: &[BreadcrumbSegment]) -> String {
    segments
        .iter()
        .map(|s| s.label.as_str())
        .collect::<Vec<_>>()
        .join(crate::index::PATH_SEPARATOR)
}

fn find_in_sections<'a, S: IndicatorSections + ?Sized>(
    sections: &'a S,
    metric_id: &str,
) -> Option<Vec<&'a str>> {
    let find = |group: Option<&'a MetricGroup>| {
        group?
            .metrics
            .iter()
            .find(|m| m.id == metric_id)
            .map(|m| m.label.as_str())
    };

    let (kinds, label): (&[IndicatorNodeKind], &'a str) =
        if let Some(label) = find(sections.status()) {
            (&[IndicatorNodeKind::Status], label)
        } else {
            let resilience = sections.resilience()?;
            if let Some(label) = find(resilience.resistance.as_ref()) {
                (
                    &[IndicatorNodeKind::Resilience, IndicatorNodeKind::Resistance],
                    label,
                )
            } else {
                (
                    &[IndicatorNodeKind::Resilience, IndicatorNodeKind::Recovery],
                    find(resilience.recovery.as_ref())?,
                )
            }
        };

    let mut trail: Vec<&'a str> = kinds.iter().filter_map(|k| k.section_label()).collect();
    trail.push(label);
    Some(trail)
}
