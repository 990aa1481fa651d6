//! RDF/XML serializer.
//!
//! Produces a flat document: one `rdf:Description` per subject, one property
//! element per statement. Every predicate must be written as an XML
//! qualified name, so predicates outside the graph's bindings get generated
//! `ns1`, `ns2`, ... declarations.

use crate::graph::Graph;
use crate::model::{iris, Literal, Term, Triple};
use crate::namespaces::is_valid_prefix;

use super::SerializeError;

/// Serializes `graph` to an RDF/XML string.
///
/// # Errors
///
/// - [`SerializeError::UnsplittablePredicate`] if a predicate IRI has no
///   suffix usable as an XML local name.
/// - [`SerializeError::XmlChar`] if a literal holds a character XML 1.0
///   cannot carry.
pub fn to_rdf_xml(graph: &Graph) -> Result<String, SerializeError> {
    let mut prefixes = Prefixes::new(graph);
    let triples: Vec<&Triple> = graph.triples().collect();

    let mut body = String::with_capacity(256 * triples.len());
    for block in triples.chunk_by(|a, b| a.subject == b.subject) {
        write_description(&mut body, &mut prefixes, block)?;
    }

    let mut out = String::with_capacity(body.len() + 1024);
    out.push_str("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<rdf:RDF");
    for (prefix, iri) in &prefixes.declared {
        out.push_str(&format!("\n   xmlns:{prefix}=\"{}\"", attr(iri)));
    }
    out.push_str("\n>\n");
    out.push_str(&body);
    out.push_str("</rdf:RDF>\n");
    Ok(out)
}

fn write_description(
    out: &mut String,
    prefixes: &mut Prefixes,
    block: &[&Triple],
) -> Result<(), SerializeError> {
    let Some(first) = block.first() else {
        return Ok(());
    };
    out.push_str(&format!(
        "  <rdf:Description rdf:about=\"{}\">\n",
        attr(first.subject.as_str())
    ));
    for t in block {
        let qname = prefixes.qname(t.predicate.as_str())?;
        match &t.object {
            Term::Iri(iri) => {
                out.push_str(&format!(
                    "    <{qname} rdf:resource=\"{}\"/>\n",
                    attr(iri.as_str())
                ));
            }
            Term::Literal(Literal::Plain(value)) => {
                out.push_str(&format!("    <{qname}>{}</{qname}>\n", text(value)?));
            }
            Term::Literal(Literal::LangTagged { value, lang }) => {
                out.push_str(&format!(
                    "    <{qname} xml:lang=\"{}\">{}</{qname}>\n",
                    attr(lang),
                    text(value)?
                ));
            }
            Term::Literal(Literal::Typed { value, datatype }) => {
                out.push_str(&format!(
                    "    <{qname} rdf:datatype=\"{}\">{}</{qname}>\n",
                    attr(datatype.as_str()),
                    text(value)?
                ));
            }
        }
    }
    out.push_str("  </rdf:Description>\n");
    Ok(())
}

/// Namespace declarations for the root element, in declaration order.
struct Prefixes {
    declared: Vec<(String, String)>,
    generated: usize,
}

impl Prefixes {
    /// `rdf` first, then every graph binding whose prefix XML accepts.
    fn new(graph: &Graph) -> Self {
        let mut declared = vec![("rdf".to_owned(), iris::RDF.to_owned())];
        for ns in graph.namespaces() {
            if ns.prefix != "rdf" && is_valid_prefix(&ns.prefix) {
                declared.push((ns.prefix.to_string(), ns.iri.to_string()));
            }
        }
        Self {
            declared,
            generated: 0,
        }
    }

    /// Returns `prefix:local` for `iri`, declaring a new prefix if needed.
    fn qname(&mut self, iri: &str) -> Result<String, SerializeError> {
        let bound = self
            .declared
            .iter()
            .filter_map(|(prefix, ns)| iri.strip_prefix(ns.as_str()).map(|local| (prefix, ns, local)))
            .filter(|(_, _, local)| is_ncname(local))
            .max_by_key(|(_, ns, _)| ns.len());
        if let Some((prefix, _, local)) = bound {
            return Ok(format!("{prefix}:{local}"));
        }

        let split = ncname_suffix_start(iri)
            .ok_or_else(|| SerializeError::UnsplittablePredicate(iri.to_owned()))?;
        let (ns, local) = iri.split_at(split);
        let prefix = self.fresh_prefix();
        self.declared.push((prefix.clone(), ns.to_owned()));
        Ok(format!("{prefix}:{local}"))
    }

    fn fresh_prefix(&mut self) -> String {
        loop {
            self.generated += 1;
            let candidate = format!("ns{}", self.generated);
            if !self.declared.iter().any(|(p, _)| *p == candidate) {
                return candidate;
            }
        }
    }
}

fn is_ncname_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.')
}

fn is_ncname(s: &str) -> bool {
    s.starts_with(|c: char| c.is_ascii_alphabetic() || c == '_') && s.chars().all(is_ncname_char)
}

/// Byte offset of the longest suffix of `iri` that is an XML local name,
/// leaving a non-empty namespace part.
fn ncname_suffix_start(iri: &str) -> Option<usize> {
    let tail_start = iri
        .char_indices()
        .rev()
        .take_while(|&(_, c)| is_ncname_char(c))
        .last()
        .map(|(i, _)| i)?;
    let start = iri[tail_start..]
        .char_indices()
        .find(|&(_, c)| c.is_ascii_alphabetic() || c == '_')
        .map(|(i, _)| tail_start + i)?;
    (start > 0).then_some(start)
}

/// Escapes element text. `\r` is written as a character reference so XML
/// line-ending normalization keeps it.
fn text(s: &str) -> Result<String, SerializeError> {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\r' => out.push_str("&#13;"),
            '\t' | '\n' => out.push(c),
            c if (c as u32) < 0x20 => {
                return Err(SerializeError::XmlChar(s.to_owned()));
            }
            c => out.push(c),
        }
    }
    Ok(out)
}

/// Escapes an attribute value. IRIs and language tags never hold control
/// characters once validated, so only markup is escaped.
fn attr(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
