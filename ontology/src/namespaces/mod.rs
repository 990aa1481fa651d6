//! Vocabulary namespaces used by the profiler mapping.
//!
//! Each sub-module encodes the handful of terms the mapper emits from one
//! vocabulary, plus its prefix binding. [`standard_bindings`] lists every
//! binding a self-describing output document carries besides the
//! knowledge-base prefix.

pub mod uco_core;
pub mod uco_identity;
pub mod uco_observable;
pub mod wikidata;

use crate::model::{iris, Namespace};

/// `rdf:` binding.
pub const RDF: Namespace = Namespace::from_static("rdf", iris::RDF);
/// `rdfs:` binding.
pub const RDFS: Namespace = Namespace::from_static("rdfs", iris::RDFS);
/// `xsd:` binding.
pub const XSD: Namespace = Namespace::from_static("xsd", iris::XSD);

/// Returns the fixed bindings in the order they are written to output.
#[must_use]
pub fn standard_bindings() -> Vec<Namespace> {
    vec![
        RDF,
        RDFS,
        uco_core::NAMESPACE,
        uco_identity::NAMESPACE,
        uco_observable::NAMESPACE,
        wikidata::NAMESPACE,
        XSD,
    ]
}

/// Returns `true` if one of [`standard_bindings`] already uses `prefix`.
#[must_use]
pub fn is_standard_prefix(prefix: &str) -> bool {
    standard_bindings().iter().any(|ns| ns.prefix == prefix)
}

/// Returns `true` if `prefix` can be declared in every supported output
/// format.
///
/// This is the ASCII subset shared by Turtle's `PN_PREFIX` and XML's
/// `NCName`: a letter, then letters, digits, `_`, `-` or `.`, not ending in
/// `.`. Names starting with `xml` in any case are reserved by XML.
///
/// ```
/// use case_sp_ontology::namespaces::is_valid_prefix;
///
/// assert!(is_valid_prefix("kb"));
/// assert!(is_valid_prefix("uco-observable"));
/// assert!(!is_valid_prefix("1kb"));
/// assert!(!is_valid_prefix("kb:x"));
/// ```
#[must_use]
pub fn is_valid_prefix(prefix: &str) -> bool {
    prefix.starts_with(|c: char| c.is_ascii_alphabetic())
        && !prefix.ends_with('.')
        && !prefix
            .get(..3)
            .is_some_and(|head| head.eq_ignore_ascii_case("xml"))
        && prefix
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
}
