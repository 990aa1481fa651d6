//! `uco-identity/` namespace: people and organizations.

use crate::model::Namespace;

/// Namespace IRI.
pub const NS: &str = "https://ontology.unifiedcyberontology.org/uco/identity/";

/// `uco-identity:` binding.
pub const NAMESPACE: Namespace = Namespace::from_static("uco-identity", NS);

/// `uco-identity:Organization`.
pub const ORGANIZATION: &str = "https://ontology.unifiedcyberontology.org/uco/identity/Organization";
