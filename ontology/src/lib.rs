//! CASE/UCO vocabulary, statement graph, and RDF serializers.
//!
//! The `case-sp-ontology` crate holds everything about the output side of the
//! system-profiler mapping that is independent of `system_profiler` itself:
//! the IRI and literal model, the UCO and W3C vocabulary terms the mapper
//! emits, the append-only [`Graph`] store, and serializers producing Turtle
//! (also used for N3), N-Triples, RDF/XML and JSON-LD.
//!
//! # Entry Point
//!
//! ```
//! use case_sp_ontology::namespaces::{standard_bindings, uco_observable};
//! use case_sp_ontology::{iris, Graph, Iri};
//!
//! let mut graph = Graph::new();
//! for ns in standard_bindings() {
//!     graph.bind(ns);
//! }
//! let device = Iri::new("http://example.org/kb/AppleDevice-1");
//! graph.add(&device, iris::RDF_TYPE, Iri::new(uco_observable::APPLE_DEVICE));
//! assert_eq!(graph.len(), 1);
//! ```
//!
//! # Serialization
//!
//! ```
//! use case_sp_ontology::serializer::{self, OutputFormat};
//! use case_sp_ontology::Graph;
//!
//! let graph = Graph::new();
//! let turtle = serializer::serialize(&graph, OutputFormat::Turtle).unwrap();
//! assert!(turtle.is_empty());
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

pub mod graph;
pub mod model;
pub mod namespaces;
pub mod serializer;

pub use graph::Graph;
pub use model::{iris, InvalidIri, Iri, Literal, Namespace, Term, Triple};
pub use serializer::{OutputFormat, SerializeError};
