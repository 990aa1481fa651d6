//! Turtle 1.1 serializer.
//!
//! Produces one `@prefix` line per graph binding followed by one block per
//! subject. Type statements are written first using `a`; remaining
//! predicates follow in IRI order, with repeated objects joined by ` , `.

use crate::graph::Graph;
use crate::model::{iris::RDF_TYPE, Literal, Term, Triple};

/// Serializes `graph` to a Turtle string.
#[must_use]
pub fn to_turtle(graph: &Graph) -> String {
    let mut out = String::with_capacity(4 * 1024);

    let width = graph
        .namespaces()
        .iter()
        .map(|ns| ns.prefix.len() + 1)
        .max()
        .unwrap_or(0);
    for ns in graph.namespaces() {
        let label = format!("{}:", ns.prefix);
        out.push_str(&format!("@prefix {label:width$} <{}> .\n", ns.iri));
    }

    let triples: Vec<&Triple> = graph.triples().collect();
    for block in triples.chunk_by(|a, b| a.subject == b.subject) {
        out.push('\n');
        write_subject(&mut out, graph, block);
    }

    out
}

fn write_subject(out: &mut String, graph: &Graph, block: &[&Triple]) {
    let Some(first) = block.first() else {
        return;
    };

    let mut lines: Vec<String> = Vec::new();

    let types: Vec<String> = block
        .iter()
        .filter(|t| t.predicate.as_str() == RDF_TYPE)
        .map(|t| object(graph, &t.object))
        .collect();
    if !types.is_empty() {
        lines.push(format!("a {}", types.join(" , ")));
    }

    let rest: Vec<&Triple> = block
        .iter()
        .copied()
        .filter(|t| t.predicate.as_str() != RDF_TYPE)
        .collect();
    for group in rest.chunk_by(|a, b| a.predicate == b.predicate) {
        let objects: Vec<String> = group.iter().map(|t| object(graph, &t.object)).collect();
        lines.push(format!(
            "{} {}",
            name(graph, group[0].predicate.as_str()),
            objects.join(" , ")
        ));
    }

    out.push_str(&name(graph, first.subject.as_str()));
    out.push_str("\n  ");
    out.push_str(&lines.join(" ;\n  "));
    out.push_str(" .\n");
}

fn name(graph: &Graph, iri: &str) -> String {
    graph.compact(iri).unwrap_or_else(|| format!("<{iri}>"))
}

fn object(graph: &Graph, term: &Term) -> String {
    match term {
        Term::Iri(iri) => name(graph, iri.as_str()),
        Term::Literal(Literal::Plain(value)) => turtle_string(value),
        Term::Literal(Literal::LangTagged { value, lang }) => {
            format!("{}@{}", turtle_string(value), lang)
        }
        Term::Literal(Literal::Typed { value, datatype }) => {
            format!("{}^^{}", turtle_string(value), name(graph, datatype.as_str()))
        }
    }
}

fn turtle_string(s: &str) -> String {
    let escaped = s
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t");
    format!("\"{escaped}\"")
}
