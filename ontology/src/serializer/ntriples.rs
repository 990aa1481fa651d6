//! N-Triples serializer.
//!
//! Produces one triple per line with absolute IRIs. Prefix bindings are not
//! representable in N-Triples and are dropped. Line order follows the
//! graph's sorted statement order, so equal graphs yield identical files.

use crate::graph::Graph;
use crate::model::{Literal, Term};

/// Serializes `graph` to an N-Triples string.
#[must_use]
pub fn to_ntriples(graph: &Graph) -> String {
    let mut out = String::with_capacity(128 * graph.len());
    for t in graph.triples() {
        triple(&mut out, t.subject.as_str(), t.predicate.as_str(), &object(&t.object));
    }
    out
}

fn triple(out: &mut String, subj: &str, pred: &str, obj: &str) {
    out.push('<');
    out.push_str(subj);
    out.push_str("> <");
    out.push_str(pred);
    out.push_str("> ");
    out.push_str(obj);
    out.push_str(" .\n");
}

fn object(term: &Term) -> String {
    match term {
        Term::Iri(iri) => format!("<{iri}>"),
        Term::Literal(Literal::Plain(value)) => quoted(value),
        Term::Literal(Literal::LangTagged { value, lang }) => format!("{}@{}", quoted(value), lang),
        Term::Literal(Literal::Typed { value, datatype }) => {
            format!("{}^^<{}>", quoted(value), datatype)
        }
    }
}

fn quoted(s: &str) -> String {
    let escaped = s
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
        .replace('\r', "\\r");
    format!("\"{escaped}\"")
}
