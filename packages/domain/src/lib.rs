#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Domain color registry, gradient configuration, and indicator hierarchy.
//!
//! The static domain definitions live in `domains/*.toml` and are embedded
//! at compile time ([`registry`]). On top of them this crate provides:
//!
//! - [`colors::ColorScheme`], the single entry point every rendering surface
//!   uses to turn a `(domain, score)` pair into a color,
//! - [`gradient_io`], JSON export/import of user-edited gradients,
//! - [`index::IndicatorIndex`] and [`breadcrumb`], the flattened search view
//!   of the hierarchy and metric path resolution.

pub mod breadcrumb;
pub mod colors;
pub mod gradient_io;
pub mod index;
pub mod registry;

pub use breadcrumb::breadcrumb;
pub use colors::{ColorScheme, Legend, LegendStop};
pub use index::IndicatorIndex;
pub use registry::DomainRegistry;

/// Errors that can occur while loading domains or gradient documents.
#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    /// A domain definition failed to parse.
    #[error("Failed to parse domain definition '{name}': {source}")]
    Definition {
        /// Name of the embedded definition.
        name: String,
        /// Underlying TOML error.
        source: toml::de::Error,
    },

    /// Two definitions share an identifier.
    #[error("Duplicate domain definition: {0}")]
    DuplicateDomain(String),

    /// A domain identifier is not known to the registry.
    #[error("Unknown domain: {0}")]
    UnknownDomain(String),

    /// A gradient document is not valid JSON or has the wrong shape.
    #[error("Invalid gradient configuration: {0}")]
    Json(#[from] serde_json::Error),
}
