//! Find-or-create bookkeeping for UCO facets.
//!
//! A UCO object has at most one facet of each facet class. [`FacetCache`]
//! enforces that: it remembers the facet issued for each (owner, class)
//! pair, and on a miss it first looks for a matching facet already in the
//! graph before minting a new one. That scan covers facets that came from a
//! pre-seeded graph or from another cache instance.

use std::collections::HashMap;

use case_sp_ontology::namespaces::uco_core::HAS_FACET;
use case_sp_ontology::{iris::RDF_TYPE, Graph, Iri, Term};
use tracing::debug;

use crate::allocator::{IdAllocator, IdentifierPolicy};

/// Index from owner node to facet class to facet node.
#[derive(Debug, Clone, Default)]
pub struct FacetCache {
    by_owner: HashMap<Iri, HashMap<Iri, Iri>>,
}

impl FacetCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached facet for `(owner, facet_class)` without touching the graph.
    #[must_use]
    pub fn get(&self, owner: &Iri, facet_class: &Iri) -> Option<&Iri> {
        self.by_owner.get(owner)?.get(facet_class)
    }

    /// Number of cached (owner, class) pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_owner.values().map(HashMap::len).sum()
    }

    /// Returns `true` if nothing has been cached yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the facet of class `facet_class` for `owner`, creating it if needed.
    ///
    /// Repeated calls with the same pair return the same node and add no
    /// statements after the first call. A new facet is typed with
    /// `facet_class` and linked from `owner` via `uco-core:hasFacet`.
    pub fn get_or_create_facet(
        &mut self,
        graph: &mut Graph,
        allocator: &mut IdAllocator,
        owner: &Iri,
        facet_class: &Iri,
    ) -> Iri {
        if let Some(facet) = self.get(owner, facet_class) {
            return facet.clone();
        }

        let facet = match find_in_graph(graph, owner, facet_class) {
            Some(existing) => {
                debug!(owner = %owner, facet = %existing, "adopted existing {}", facet_class.local_name());
                existing
            }
            None => {
                let facet = match allocator.policy() {
                    IdentifierPolicy::Deterministic => {
                        allocator.allocate_deterministic(owner, facet_class)
                    }
                    IdentifierPolicy::Random => allocator.allocate_random(facet_class.local_name()),
                };
                graph.add(&facet, RDF_TYPE, facet_class);
                graph.add(owner, HAS_FACET, &facet);
                debug!(owner = %owner, facet = %facet, "created {}", facet_class.local_name());
                facet
            }
        };

        self.by_owner
            .entry(owner.clone())
            .or_default()
            .insert(facet_class.clone(), facet.clone());
        facet
    }
}

/// Scans `owner`'s `hasFacet` targets and returns the first one typed
/// `facet_class`. Literal targets and untyped targets are skipped.
fn find_in_graph(graph: &Graph, owner: &Iri, facet_class: &Iri) -> Option<Iri> {
    let class_term = Term::from(facet_class);
    graph
        .objects(owner.as_str(), HAS_FACET)
        .filter_map(Term::as_iri)
        .find(|candidate| graph.contains(candidate.as_str(), RDF_TYPE, &class_term))
        .cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use case_sp_ontology::namespaces::uco_observable::DEVICE_FACET;
    use case_sp_ontology::{Literal, Namespace};

    const OS_FACET: &str =
        "https://ontology.unifiedcyberontology.org/uco/observable/OperatingSystemFacet";

    fn setup(policy: IdentifierPolicy) -> (Graph, IdAllocator, FacetCache, Iri) {
        let kb = Namespace::new("kb", "http://example.org/kb/");
        (
            Graph::new(),
            IdAllocator::new(kb, policy),
            FacetCache::new(),
            Iri::new("http://example.org/kb/AppleDevice-1"),
        )
    }

    #[test]
    fn second_call_is_a_no_op() {
        let (mut graph, mut allocator, mut cache, owner) = setup(IdentifierPolicy::Random);
        let class = Iri::new(DEVICE_FACET);

        let first = cache.get_or_create_facet(&mut graph, &mut allocator, &owner, &class);
        let after_first = graph.clone();
        let second = cache.get_or_create_facet(&mut graph, &mut allocator, &owner, &class);

        assert_eq!(first, second);
        assert_eq!(graph, after_first);
        assert_eq!(graph.len(), 2);
    }

    #[test]
    fn created_facet_is_typed_and_linked() {
        let (mut graph, mut allocator, mut cache, owner) = setup(IdentifierPolicy::Random);
        let class = Iri::new(DEVICE_FACET);

        let facet = cache.get_or_create_facet(&mut graph, &mut allocator, &owner, &class);

        assert!(graph.contains(facet.as_str(), RDF_TYPE, &Term::from(&class)));
        assert!(graph.contains(owner.as_str(), HAS_FACET, &Term::from(&facet)));
        assert!(facet.as_str().starts_with("http://example.org/kb/DeviceFacet-"));
    }

    #[test]
    fn distinct_classes_get_distinct_facets() {
        let (mut graph, mut allocator, mut cache, owner) = setup(IdentifierPolicy::Random);
        let device = cache.get_or_create_facet(&mut graph, &mut allocator, &owner, &Iri::new(DEVICE_FACET));
        let os = cache.get_or_create_facet(&mut graph, &mut allocator, &owner, &Iri::new(OS_FACET));
        assert_ne!(device, os);
        assert_eq!(cache.len(), 2);
        assert_eq!(graph.objects(owner.as_str(), HAS_FACET).count(), 2);
    }

    #[test]
    fn adopts_facet_from_pre_seeded_graph() {
        let (mut graph, mut allocator, mut cache, owner) = setup(IdentifierPolicy::Random);
        let class = Iri::new(DEVICE_FACET);
        let existing = Iri::new("http://example.org/kb/authored-facet");
        graph.add(&owner, HAS_FACET, &existing);
        graph.add(&existing, RDF_TYPE, &class);
        let before = graph.clone();

        let facet = cache.get_or_create_facet(&mut graph, &mut allocator, &owner, &class);

        assert_eq!(facet, existing);
        assert_eq!(graph, before);
        assert_eq!(cache.get(&owner, &class), Some(&existing));
    }

    #[test]
    fn skips_untyped_and_literal_targets() {
        let (mut graph, mut allocator, mut cache, owner) = setup(IdentifierPolicy::Random);
        let class = Iri::new(DEVICE_FACET);
        let untyped = Iri::new("http://example.org/kb/untyped");
        let other = Iri::new("http://example.org/kb/os-facet");
        graph.add(&owner, HAS_FACET, &untyped);
        graph.add(&owner, HAS_FACET, Literal::plain("not a node"));
        graph.add(&owner, HAS_FACET, &other);
        graph.add(&other, RDF_TYPE, Iri::new(OS_FACET));

        let facet = cache.get_or_create_facet(&mut graph, &mut allocator, &owner, &class);

        assert_ne!(facet, untyped);
        assert_ne!(facet, other);
        assert_eq!(graph.objects(owner.as_str(), HAS_FACET).count(), 4);
    }

    #[test]
    fn deterministic_policy_matches_allocator() {
        let (mut graph, mut allocator, mut cache, owner) = setup(IdentifierPolicy::Deterministic);
        let class = Iri::new(DEVICE_FACET);

        let facet = cache.get_or_create_facet(&mut graph, &mut allocator, &owner, &class);

        assert_eq!(facet, allocator.allocate_deterministic(&owner, &class));
    }

    #[test]
    fn separate_caches_share_one_facet_through_the_graph() {
        let (mut graph, mut allocator, mut first_cache, owner) = setup(IdentifierPolicy::Random);
        let class = Iri::new(DEVICE_FACET);
        let mut second_cache = FacetCache::new();

        let a = first_cache.get_or_create_facet(&mut graph, &mut allocator, &owner, &class);
        let b = second_cache.get_or_create_facet(&mut graph, &mut allocator, &owner, &class);

        assert_eq!(a, b);
        assert_eq!(graph.len(), 2);
    }
}
