//! JSON export/import of gradient configurations.
//!
//! Configurations are only ever persisted by the user copying an exported
//! document; importing it back must reproduce the same numbers and colors.
//! Colors quantize to integer RGB in both directions, so the round trip is
//! exact.

use chrono::{DateTime, Utc};
use wri_domain_models::{GradientConfig, GradientConfigDocument, GradientKey};

use crate::DomainError;

/// A parsed gradient document.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportedConfig {
    /// The document's configuration name.
    pub name: String,
    /// When the document was exported.
    pub timestamp: DateTime<Utc>,
    /// The entries that named known keys.
    pub config: GradientConfig,
    /// Keys that were present but not recognized.
    pub skipped_keys: Vec<String>,
}

/// Builds the exportable document for `config`.
#[must_use]
pub fn export_document(
    config: &GradientConfig,
    name: &str,
    timestamp: DateTime<Utc>,
) -> GradientConfigDocument {
    GradientConfigDocument {
        config_name: name.to_owned(),
        timestamp,
        gradients: config
            .iter()
            .map(|(key, entry)| (key.to_string(), *entry))
            .collect(),
    }
}

/// Serializes `config` as a pretty-printed JSON document.
///
/// # Errors
///
/// Returns [`DomainError::Json`] if serialization fails.
pub fn export_json(
    config: &GradientConfig,
    name: &str,
    timestamp: DateTime<Utc>,
) -> Result<String, DomainError> {
    Ok(serde_json::to_string_pretty(&export_document(
        config, name, timestamp,
    ))?)
}

/// Converts a document into a configuration, skipping unknown keys.
#[must_use]
pub fn import_document(document: GradientConfigDocument) -> ImportedConfig {
    let mut config = GradientConfig::new();
    let mut skipped_keys = Vec::new();

    for (key, entry) in document.gradients {
        match key.parse::<GradientKey>() {
            Ok(parsed) => {
                config.set(parsed, entry);
            }
            Err(e) => {
                log::warn!("Skipping gradient entry: {e}");
                skipped_keys.push(key);
            }
        }
    }

    ImportedConfig {
        name: document.config_name,
        timestamp: document.timestamp,
        config,
        skipped_keys,
    }
}

/// Parses a JSON document.
///
/// Malformed colors inside an otherwise valid document become the default
/// gray rather than failing the import.
///
/// # Errors
///
/// Returns [`DomainError::Json`] if the text is not a gradient document.
pub fn import_json(json: &str) -> Result<ImportedConfig, DomainError> {
    let document: GradientConfigDocument = serde_json::from_str(json)?;
    Ok(import_document(document))
}
