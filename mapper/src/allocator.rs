//! Node identifier allocation.
//!
//! New nodes are minted in the knowledge-base namespace under one of two
//! policies. [`IdentifierPolicy::Random`] appends a fresh UUIDv4 to a
//! class-derived label. [`IdentifierPolicy::Deterministic`] derives facet
//! identifiers with UUIDv5 from the owning node and the facet class, so
//! re-running a mapping on the same input reproduces the same IRIs.

use std::collections::HashSet;

use case_sp_ontology::{Iri, Namespace};
use uuid::Uuid;

/// Addressing policy for newly minted facet nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IdentifierPolicy {
    /// Facet IRIs carry a random UUIDv4 suffix.
    #[default]
    Random,
    /// Facet IRIs carry a UUIDv5 derived from (owner, facet class).
    Deterministic,
}

/// Mints node IRIs in a knowledge-base namespace.
///
/// Each mapper owns one allocator; there is no process-global state.
#[derive(Debug, Clone)]
pub struct IdAllocator {
    namespace: Namespace,
    policy: IdentifierPolicy,
    issued: HashSet<Uuid>,
}

impl IdAllocator {
    /// Creates an allocator minting into `namespace` under `policy`.
    #[must_use]
    pub fn new(namespace: Namespace, policy: IdentifierPolicy) -> Self {
        Self {
            namespace,
            policy,
            issued: HashSet::new(),
        }
    }

    /// The addressing policy chosen at construction.
    #[must_use]
    pub fn policy(&self) -> IdentifierPolicy {
        self.policy
    }

    /// Returns a UUIDv4 never before returned by this allocator.
    pub fn fresh_uuid(&mut self) -> Uuid {
        loop {
            let candidate = Uuid::new_v4();
            if self.issued.insert(candidate) {
                return candidate;
            }
        }
    }

    /// Mints `<namespace><label>-<uuid4>`, unique within this allocator.
    pub fn allocate_random(&mut self, label: &str) -> Iri {
        let uuid = self.fresh_uuid();
        self.namespace.term(&format!("{label}-{uuid}"))
    }

    /// Derives the facet IRI for `(owner, facet_class)`.
    ///
    /// Pure: the result depends only on the inputs and the namespace, never
    /// on earlier calls, so it is stable across runs and processes.
    #[must_use]
    pub fn allocate_deterministic(&self, owner: &Iri, facet_class: &Iri) -> Iri {
        let facet_uuid = inherent_facet_uuid(&owner_uuid_namespace(owner), facet_class);
        self.namespace
            .term(&format!("{}-{}", facet_class.local_name(), facet_uuid))
    }
}

/// Returns the UUID namespace an object's facets are derived under.
///
/// If the owner IRI ends in a hyphenated UUID (as minted IRIs do), that UUID
/// is used directly; otherwise the namespace is UUIDv5 of the whole IRI in
/// the standard URL namespace.
#[must_use]
pub fn owner_uuid_namespace(owner: &Iri) -> Uuid {
    let iri = owner.as_str();
    iri.len()
        .checked_sub(36)
        .filter(|&start| iri.is_char_boundary(start))
        .and_then(|start| Uuid::parse_str(&iri[start..]).ok())
        .unwrap_or_else(|| Uuid::new_v5(&Uuid::NAMESPACE_URL, iri.as_bytes()))
}

/// UUIDv5 of the facet class IRI under the owner's UUID namespace.
#[must_use]
pub fn inherent_facet_uuid(owner_namespace: &Uuid, facet_class: &Iri) -> Uuid {
    Uuid::new_v5(owner_namespace, facet_class.as_str().as_bytes())
}
