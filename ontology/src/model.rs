//! Core RDF term model.
//!
//! Nodes are IRIs; objects are either IRIs or literals. All types are owned
//! and totally ordered so a [`Graph`](crate::Graph) can keep its statements in
//! a sorted set and serialize them in a stable order.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// A string that cannot be written as an absolute IRI.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidIri {
    /// The string is empty.
    #[error("IRI is empty")]
    Empty,
    /// The string has no `scheme:` part.
    #[error("`{0}` is not an absolute IRI (no scheme)")]
    Relative(String),
    /// The string contains a character that may not appear in `<...>`.
    #[error("`{iri}` contains the forbidden character {found:?}")]
    ForbiddenChar {
        /// The rejected string.
        iri: String,
        /// First offending character.
        found: char,
    },
}

/// An absolute IRI naming a node, predicate, class, or datatype.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Iri(String);

impl Iri {
    /// Wraps an IRI string. No syntax validation is performed.
    #[must_use]
    pub fn new(iri: impl Into<String>) -> Self {
        Self(iri.into())
    }

    /// Checks that `iri` can be written between `<` and `>` in Turtle and
    /// N-Triples, then wraps it.
    ///
    /// Only the absolute-IRI shape and the `IRIREF` character exclusions are
    /// checked. Whitespace, control characters, the backtick and the
    /// characters `<`, `>`, `"`, `{`, `}`, `|`, `^` and `\` are refused.
    ///
    /// # Errors
    ///
    /// Returns an [`InvalidIri`] describing the first problem found.
    ///
    /// ```
    /// use case_sp_ontology::Iri;
    ///
    /// assert!(Iri::parse("http://example.org/kb/my-mac").is_ok());
    /// assert!(Iri::parse("http://example.org/kb/my mac").is_err());
    /// assert!(Iri::parse("my-mac").is_err());
    /// ```
    pub fn parse(iri: impl Into<String>) -> Result<Self, InvalidIri> {
        let iri = iri.into();
        if iri.is_empty() {
            return Err(InvalidIri::Empty);
        }
        if let Some(found) = iri.chars().find(|&c| is_forbidden_in_iriref(c)) {
            return Err(InvalidIri::ForbiddenChar { iri, found });
        }
        let has_scheme = iri.split_once(':').is_some_and(|(scheme, _)| {
            scheme.starts_with(|c: char| c.is_ascii_alphabetic())
                && scheme
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        });
        if !has_scheme {
            return Err(InvalidIri::Relative(iri));
        }
        Ok(Self(iri))
    }

    /// Returns the IRI as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the local name of the IRI: the fragment after `#` if there is
    /// a non-empty one, otherwise the last `/`-separated path segment.
    ///
    /// ```
    /// use case_sp_ontology::Iri;
    ///
    /// let class = Iri::new("https://ontology.unifiedcyberontology.org/uco/observable/DeviceFacet");
    /// assert_eq!(class.local_name(), "DeviceFacet");
    /// assert_eq!(Iri::new("http://www.w3.org/2000/01/rdf-schema#label").local_name(), "label");
    /// ```
    #[must_use]
    pub fn local_name(&self) -> &str {
        if let Some((_, fragment)) = self.0.rsplit_once('#') {
            if !fragment.is_empty() {
                return fragment;
            }
        }
        self.0.rsplit('/').next().unwrap_or(&self.0)
    }
}

fn is_forbidden_in_iriref(c: char) -> bool {
    c.is_whitespace()
        || c.is_control()
        || matches!(c, '<' | '>' | '"' | '{' | '}' | '|' | '^' | '`' | '\\')
}

impl FromStr for Iri {
    type Err = InvalidIri;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Iri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Iri {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Iri {
    fn from(iri: &str) -> Self {
        Self::new(iri)
    }
}

impl From<String> for Iri {
    fn from(iri: String) -> Self {
        Self(iri)
    }
}

impl From<&Iri> for Iri {
    fn from(iri: &Iri) -> Self {
        iri.clone()
    }
}

/// A literal value.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Literal {
    /// A plain string literal (implicitly `xsd:string`).
    Plain(String),
    /// A language-tagged string, e.g. `"Apple Computer, Inc."@en`.
    LangTagged {
        /// Lexical value.
        value: String,
        /// BCP 47 language tag.
        lang: String,
    },
    /// A literal with an explicit datatype IRI.
    Typed {
        /// Lexical value.
        value: String,
        /// Datatype IRI, e.g. `xsd:integer`.
        datatype: Iri,
    },
}

impl Literal {
    /// Creates a plain string literal.
    #[must_use]
    pub fn plain(value: impl Into<String>) -> Self {
        Self::Plain(value.into())
    }

    /// Creates a language-tagged string literal.
    #[must_use]
    pub fn lang(value: impl Into<String>, lang: impl Into<String>) -> Self {
        Self::LangTagged {
            value: value.into(),
            lang: lang.into(),
        }
    }

    /// Creates a datatyped literal.
    #[must_use]
    pub fn typed(value: impl Into<String>, datatype: impl Into<Iri>) -> Self {
        Self::Typed {
            value: value.into(),
            datatype: datatype.into(),
        }
    }

    /// Returns the lexical value regardless of tag or datatype.
    #[must_use]
    pub fn value(&self) -> &str {
        match self {
            Self::Plain(value) | Self::LangTagged { value, .. } | Self::Typed { value, .. } => {
                value
            }
        }
    }
}

/// The object position of a statement.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Term {
    /// A reference to another node.
    Iri(Iri),
    /// A literal value.
    Literal(Literal),
}

impl Term {
    /// Returns the IRI if this term is a node reference.
    #[must_use]
    pub fn as_iri(&self) -> Option<&Iri> {
        match self {
            Self::Iri(iri) => Some(iri),
            Self::Literal(_) => None,
        }
    }
}

impl From<Iri> for Term {
    fn from(iri: Iri) -> Self {
        Self::Iri(iri)
    }
}

impl From<&Iri> for Term {
    fn from(iri: &Iri) -> Self {
        Self::Iri(iri.clone())
    }
}

impl From<Literal> for Term {
    fn from(literal: Literal) -> Self {
        Self::Literal(literal)
    }
}

/// A single subject-predicate-object statement.
///
/// Field order matters: the derived ordering sorts by subject, then
/// predicate, then object, which is the grouping the serializers rely on.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Triple {
    /// Subject node.
    pub subject: Iri,
    /// Predicate IRI.
    pub predicate: Iri,
    /// Object node or literal.
    pub object: Term,
}

/// A prefix binding, e.g. `uco-core` → `https://ontology.unifiedcyberontology.org/uco/core/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Namespace {
    /// The prefix label used in Turtle `@prefix` lines and the JSON-LD `@context`.
    pub prefix: Cow<'static, str>,
    /// The namespace IRI that the prefix expands to.
    pub iri: Cow<'static, str>,
}

impl Namespace {
    /// Creates a binding from static strings; usable in `const` items.
    #[must_use]
    pub const fn from_static(prefix: &'static str, iri: &'static str) -> Self {
        Self {
            prefix: Cow::Borrowed(prefix),
            iri: Cow::Borrowed(iri),
        }
    }

    /// Creates a binding from owned strings (e.g. a user-supplied `kb` prefix).
    #[must_use]
    pub fn new(prefix: impl Into<String>, iri: impl Into<String>) -> Self {
        Self {
            prefix: Cow::Owned(prefix.into()),
            iri: Cow::Owned(iri.into()),
        }
    }

    /// Returns the IRI for `local` inside this namespace.
    #[must_use]
    pub fn term(&self, local: &str) -> Iri {
        Iri::new(format!("{}{}", self.iri, local))
    }

    /// Returns the local part of `iri` if it lies inside this namespace.
    #[must_use]
    pub fn strip<'a>(&self, iri: &'a str) -> Option<&'a str> {
        iri.strip_prefix(self.iri.as_ref())
    }
}

/// Standard W3C IRI constants.
pub mod iris {
    /// RDF namespace.
    pub const RDF: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
    /// RDFS namespace.
    pub const RDFS: &str = "http://www.w3.org/2000/01/rdf-schema#";
    /// XSD namespace.
    pub const XSD: &str = "http://www.w3.org/2001/XMLSchema#";

    /// `rdf:type`.
    pub const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
    /// `rdfs:label`.
    pub const RDFS_LABEL: &str = "http://www.w3.org/2000/01/rdf-schema#label";
    /// `rdfs:seeAlso`.
    pub const RDFS_SEE_ALSO: &str = "http://www.w3.org/2000/01/rdf-schema#seeAlso";
    /// `xsd:integer`.
    pub const XSD_INTEGER: &str = "http://www.w3.org/2001/XMLSchema#integer";
}
