//! JSON-LD 1.1 serializer.
//!
//! Produces a single flattened document: an `@context` mapping every bound
//! prefix to its IRI, and an `@graph` array with one node object per subject.

use serde_json::{json, Map, Value};

use crate::graph::Graph;
use crate::model::{iris::RDF_TYPE, Literal, Term, Triple};

/// Serializes `graph` to a JSON-LD `Value`.
///
/// The returned value can be pretty-printed with [`serde_json::to_string_pretty`].
#[must_use]
pub fn to_json_ld(graph: &Graph) -> Value {
    json!({
        "@context": build_context(graph),
        "@graph": build_graph(graph)
    })
}

fn build_context(graph: &Graph) -> Value {
    let mut ctx = Map::new();
    for ns in graph.namespaces() {
        ctx.insert(ns.prefix.to_string(), json!(ns.iri));
    }
    Value::Object(ctx)
}

fn build_graph(graph: &Graph) -> Value {
    let triples: Vec<&Triple> = graph.triples().collect();
    let nodes: Vec<Value> = triples
        .chunk_by(|a, b| a.subject == b.subject)
        .map(|block| node_to_json(graph, block))
        .collect();
    Value::Array(nodes)
}

fn node_to_json(graph: &Graph, block: &[&Triple]) -> Value {
    let mut node = Map::new();
    if let Some(first) = block.first() {
        node.insert("@id".to_owned(), json!(name(graph, first.subject.as_str())));
    }

    let types: Vec<Value> = block
        .iter()
        .filter(|t| t.predicate.as_str() == RDF_TYPE)
        .filter_map(|t| t.object.as_iri())
        .map(|iri| json!(name(graph, iri.as_str())))
        .collect();
    if let Some(value) = one_or_many(types) {
        node.insert("@type".to_owned(), value);
    }

    let rest: Vec<&Triple> = block
        .iter()
        .copied()
        .filter(|t| t.predicate.as_str() != RDF_TYPE)
        .collect();
    for group in rest.chunk_by(|a, b| a.predicate == b.predicate) {
        let values: Vec<Value> = group.iter().map(|t| object_to_json(graph, &t.object)).collect();
        if let Some(value) = one_or_many(values) {
            node.insert(name(graph, group[0].predicate.as_str()), value);
        }
    }

    Value::Object(node)
}

fn object_to_json(graph: &Graph, term: &Term) -> Value {
    match term {
        Term::Iri(iri) => json!({ "@id": name(graph, iri.as_str()) }),
        Term::Literal(Literal::Plain(value)) => json!(value),
        Term::Literal(Literal::LangTagged { value, lang }) => {
            json!({ "@value": value, "@language": lang })
        }
        Term::Literal(Literal::Typed { value, datatype }) => {
            json!({ "@value": value, "@type": name(graph, datatype.as_str()) })
        }
    }
}

/// A single value stays scalar; repeated values become a JSON array.
fn one_or_many(mut values: Vec<Value>) -> Option<Value> {
    match values.len() {
        0 => None,
        1 => values.pop(),
        _ => Some(Value::Array(values)),
    }
}

fn name(graph: &Graph, iri: &str) -> String {
    graph.compact(iri).unwrap_or_else(|| iri.to_owned())
}
