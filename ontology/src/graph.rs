//! In-memory statement store.
//!
//! A [`Graph`] is an append-only set of [`Triple`]s plus the prefix bindings
//! used when it is serialized. Adding a statement that already exists is a
//! no-op; there is no removal.

use std::collections::BTreeSet;

use crate::model::{Iri, Namespace, Term, Triple};

/// A set of statements with its namespace bindings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Graph {
    triples: BTreeSet<Triple>,
    namespaces: Vec<Namespace>,
}

impl Graph {
    /// Creates an empty graph with no bindings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds a prefix. Rebinding an existing prefix replaces its IRI.
    pub fn bind(&mut self, namespace: Namespace) {
        if let Some(existing) = self
            .namespaces
            .iter_mut()
            .find(|ns| ns.prefix == namespace.prefix)
        {
            *existing = namespace;
        } else {
            self.namespaces.push(namespace);
        }
    }

    /// Returns the prefix bindings in binding order.
    #[must_use]
    pub fn namespaces(&self) -> &[Namespace] {
        &self.namespaces
    }

    /// Adds a statement. Returns `false` if it was already present.
    pub fn add(
        &mut self,
        subject: impl Into<Iri>,
        predicate: impl Into<Iri>,
        object: impl Into<Term>,
    ) -> bool {
        self.insert(Triple {
            subject: subject.into(),
            predicate: predicate.into(),
            object: object.into(),
        })
    }

    /// Adds an already-built statement. Returns `false` if it was already present.
    pub fn insert(&mut self, triple: Triple) -> bool {
        self.triples.insert(triple)
    }

    /// Returns whether the exact statement `(subject, predicate, object)` exists.
    #[must_use]
    pub fn contains(&self, subject: &str, predicate: &str, object: &Term) -> bool {
        self.triples.iter().any(|t| {
            t.subject.as_str() == subject && t.predicate.as_str() == predicate && &t.object == object
        })
    }

    /// Returns every object of statements matching `(subject, predicate, _)`.
    ///
    /// Callers must not rely on the iteration order.
    pub fn objects<'a>(
        &'a self,
        subject: &'a str,
        predicate: &'a str,
    ) -> impl Iterator<Item = &'a Term> + 'a {
        self.triples
            .iter()
            .filter(move |t| t.subject.as_str() == subject && t.predicate.as_str() == predicate)
            .map(|t| &t.object)
    }

    /// Returns every subject of statements matching `(_, predicate, object)`.
    pub fn subjects<'a>(
        &'a self,
        predicate: &'a str,
        object: &'a Term,
    ) -> impl Iterator<Item = &'a Iri> + 'a {
        self.triples
            .iter()
            .filter(move |t| t.predicate.as_str() == predicate && &t.object == object)
            .map(|t| &t.subject)
    }

    /// Iterates over all statements, sorted by subject, predicate, object.
    pub fn triples(&self) -> impl Iterator<Item = &Triple> {
        self.triples.iter()
    }

    /// Number of statements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.triples.len()
    }

    /// Returns `true` if the graph holds no statements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }

    /// Compacts `iri` to `prefix:local` using the longest matching binding.
    ///
    /// Returns `None` when no binding matches or the local part is not safe
    /// to write as a Turtle prefixed name.
    #[must_use]
    pub fn compact(&self, iri: &str) -> Option<String> {
        self.namespaces
            .iter()
            .filter_map(|ns| ns.strip(iri).map(|local| (ns, local)))
            .filter(|(_, local)| is_safe_local(local))
            .max_by_key(|(ns, _)| ns.iri.len())
            .map(|(ns, local)| format!("{}:{}", ns.prefix, local))
    }
}

/// Conservative subset of Turtle's `PN_LOCAL`: ASCII alphanumerics, `_`,
/// and `-`, non-empty and not starting with `-`.
fn is_safe_local(local: &str) -> bool {
    !local.is_empty()
        && !local.starts_with('-')
        && local
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}
