//! `uco-core/` namespace: the UCO object and facet backbone.

use crate::model::Namespace;

/// Namespace IRI.
pub const NS: &str = "https://ontology.unifiedcyberontology.org/uco/core/";

/// `uco-core:` binding.
pub const NAMESPACE: Namespace = Namespace::from_static("uco-core", NS);

/// `uco-core:hasFacet`: links a UCO object to one of its facets.
pub const HAS_FACET: &str = "https://ontology.unifiedcyberontology.org/uco/core/hasFacet";
