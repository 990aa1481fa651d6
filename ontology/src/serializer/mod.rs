//! Serializers for mapped graphs.
//!
//! Supported formats:
//! - **Turtle** ([`turtle`]): human-readable, prefix-compacted. Also written
//!   for N3, of which it is a subset.
//! - **N-Triples** ([`ntriples`]): one absolute triple per line, diff-friendly
//! - **JSON-LD** ([`jsonld`]): `@context` plus flat `@graph`
//! - **RDF/XML** ([`rdfxml`]): one `rdf:Description` per subject
//!
//! Every format renders the whole document into memory; nothing is written
//! to disk here.

pub mod jsonld;
pub mod ntriples;
pub mod rdfxml;
pub mod turtle;

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use thiserror::Error;

use crate::graph::Graph;

/// Errors raised while choosing or applying an output format.
#[derive(Debug, Error)]
pub enum SerializeError {
    /// The requested format name is not supported.
    #[error("unsupported output format `{0}` (expected turtle, n3, nt, xml, or json-ld)")]
    UnknownFormat(String),

    /// The output path's extension does not identify a supported format.
    #[error("cannot guess output format from `{0}`; pass an explicit format")]
    UnguessableFormat(String),

    /// A predicate cannot be written as an RDF/XML element name.
    #[error("predicate <{0}> has no suffix usable as an XML local name")]
    UnsplittablePredicate(String),

    /// A literal holds a control character that XML 1.0 cannot carry.
    #[error("literal {0:?} contains a character not allowed in XML")]
    XmlChar(String),

    /// JSON-LD rendering failed.
    #[error("JSON-LD encoding failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// An RDF serialization format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Turtle 1.1.
    Turtle,
    /// Notation3, written as Turtle.
    N3,
    /// N-Triples.
    NTriples,
    /// JSON-LD 1.1.
    JsonLd,
    /// RDF 1.1 XML syntax.
    RdfXml,
}

impl OutputFormat {
    /// Guesses the format from a file extension, the way RDF tooling usually does.
    ///
    /// # Errors
    ///
    /// Returns [`SerializeError::UnguessableFormat`] if the extension is
    /// missing or not recognized.
    pub fn guess(path: &Path) -> Result<Self, SerializeError> {
        let unguessable = || SerializeError::UnguessableFormat(path.display().to_string());
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(unguessable)?;
        match ext.to_ascii_lowercase().as_str() {
            "ttl" | "turtle" => Ok(Self::Turtle),
            "n3" => Ok(Self::N3),
            "nt" => Ok(Self::NTriples),
            "json" | "jsonld" | "json-ld" => Ok(Self::JsonLd),
            "rdf" | "xml" | "owl" => Ok(Self::RdfXml),
            _ => Err(unguessable()),
        }
    }

    /// Canonical format name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Turtle => "turtle",
            Self::N3 => "n3",
            Self::NTriples => "nt",
            Self::JsonLd => "json-ld",
            Self::RdfXml => "xml",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = SerializeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "turtle" | "ttl" => Ok(Self::Turtle),
            "n3" => Ok(Self::N3),
            "nt" | "ntriples" | "n-triples" => Ok(Self::NTriples),
            "json-ld" | "jsonld" => Ok(Self::JsonLd),
            "xml" | "rdf/xml" | "rdfxml" | "pretty-xml" => Ok(Self::RdfXml),
            _ => Err(SerializeError::UnknownFormat(s.to_owned())),
        }
    }
}

/// Renders `graph` in `format`.
///
/// # Errors
///
/// Returns [`SerializeError::Json`] if JSON-LD pretty-printing fails, or an
/// RDF/XML error from [`rdfxml::to_rdf_xml`].
pub fn serialize(graph: &Graph, format: OutputFormat) -> Result<String, SerializeError> {
    match format {
        OutputFormat::Turtle | OutputFormat::N3 => Ok(turtle::to_turtle(graph)),
        OutputFormat::NTriples => Ok(ntriples::to_ntriples(graph)),
        OutputFormat::JsonLd => {
            let mut out = serde_json::to_string_pretty(&jsonld::to_json_ld(graph))?;
            out.push('\n');
            Ok(out)
        }
        OutputFormat::RdfXml => rdfxml::to_rdf_xml(graph),
    }
}
