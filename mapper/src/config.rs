//! Mapper configuration.

use case_sp_ontology::namespaces::{is_standard_prefix, is_valid_prefix, wikidata};
use case_sp_ontology::{Iri, Namespace};

use crate::allocator::IdentifierPolicy;
use crate::error::ConfigError;

/// Default knowledge-base prefix label.
pub const DEFAULT_KB_PREFIX: &str = "kb";
/// Default knowledge-base namespace IRI.
pub const DEFAULT_KB_PREFIX_IRI: &str = "http://example.org/kb/";

/// Construction parameters for a [`SystemProfileMapper`](crate::SystemProfileMapper).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapperConfig {
    /// Prefix label for knowledge-base individuals, e.g. `kb`.
    pub kb_prefix: String,
    /// IRI the knowledge-base prefix expands to.
    pub kb_prefix_iri: String,
    /// IRI of the profiled device when it is defined in an external graph.
    /// When `None`, a typed `AppleDevice` node is minted.
    pub device: Option<Iri>,
    /// Organization linked as the device manufacturer; `None` skips the link.
    pub manufacturer: Option<Iri>,
    /// Addressing policy for new facets.
    pub policy: IdentifierPolicy,
}

impl Default for MapperConfig {
    fn default() -> Self {
        Self {
            kb_prefix: DEFAULT_KB_PREFIX.to_owned(),
            kb_prefix_iri: DEFAULT_KB_PREFIX_IRI.to_owned(),
            device: None,
            manufacturer: Some(Iri::new(wikidata::APPLE)),
            policy: IdentifierPolicy::Random,
        }
    }
}

impl MapperConfig {
    /// Checks that the knowledge-base binding can sit beside the vocabulary
    /// bindings in every output document.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::InvalidPrefix`] if `kb_prefix` is not a valid prefix name.
    /// - [`ConfigError::ReservedPrefix`] if `kb_prefix` is a vocabulary prefix.
    /// - [`ConfigError::InvalidNamespace`] if `kb_prefix_iri` is not a
    ///   writable absolute IRI.
    /// - [`ConfigError::InvalidDevice`] if `device` is not a writable
    ///   absolute IRI.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !is_valid_prefix(&self.kb_prefix) {
            return Err(ConfigError::InvalidPrefix(self.kb_prefix.clone()));
        }
        if is_standard_prefix(&self.kb_prefix) {
            return Err(ConfigError::ReservedPrefix(self.kb_prefix.clone()));
        }
        Iri::parse(self.kb_prefix_iri.as_str()).map_err(ConfigError::InvalidNamespace)?;
        if let Some(device) = &self.device {
            Iri::parse(device.as_str()).map_err(ConfigError::InvalidDevice)?;
        }
        Ok(())
    }

    /// The knowledge-base namespace binding.
    #[must_use]
    pub fn kb_namespace(&self) -> Namespace {
        Namespace::new(self.kb_prefix.clone(), self.kb_prefix_iri.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_kb(prefix: &str, iri: &str) -> MapperConfig {
        MapperConfig {
            kb_prefix: prefix.to_owned(),
            kb_prefix_iri: iri.to_owned(),
            ..MapperConfig::default()
        }
    }

    #[test]
    fn default_is_valid() {
        assert!(MapperConfig::default().validate().is_ok());
        assert!(with_kb("case", "urn:example:case:").validate().is_ok());
    }

    #[test]
    fn vocabulary_prefixes_are_reserved() {
        for prefix in ["rdf", "rdfs", "xsd", "wd", "uco-core", "uco-identity", "uco-observable"] {
            let err = with_kb(prefix, DEFAULT_KB_PREFIX_IRI).validate().unwrap_err();
            assert!(matches!(err, ConfigError::ReservedPrefix(ref p) if p == prefix), "{err}");
        }
    }

    #[test]
    fn malformed_prefix_is_rejected() {
        let err = with_kb("k b", DEFAULT_KB_PREFIX_IRI).validate().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPrefix(_)));
    }

    #[test]
    fn unwritable_namespace_is_rejected() {
        for iri in ["", "kb/", "http://example.org/my kb/"] {
            let err = with_kb("kb", iri).validate().unwrap_err();
            assert!(matches!(err, ConfigError::InvalidNamespace(_)), "{iri:?}: {err}");
        }
    }

    #[test]
    fn unwritable_device_is_rejected() {
        let config = MapperConfig {
            device: Some(Iri::new("http://example.org/kb/my\"mac")),
            ..MapperConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::InvalidDevice(_))));
    }
}
