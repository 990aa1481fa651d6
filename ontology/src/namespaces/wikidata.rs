//! `wd:` namespace: Wikidata entities used as external identifiers.

use crate::model::Namespace;

/// Namespace IRI.
pub const NS: &str = "http://www.wikidata.org/entity/";

/// `wd:` binding.
pub const NAMESPACE: Namespace = Namespace::from_static("wd", NS);

/// `wd:Q312`: Apple Inc.
pub const APPLE: &str = "http://www.wikidata.org/entity/Q312";
