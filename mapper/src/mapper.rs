//! Maps `system_profiler` records onto the profiled device's UCO facets.

use std::path::Path;

use case_sp_ontology::namespaces::{standard_bindings, uco_identity, uco_observable};
use case_sp_ontology::{iris, Graph, Iri, Literal};
use tracing::debug;

use crate::allocator::IdAllocator;
use crate::config::MapperConfig;
use crate::error::{ConfigError, MapError};
use crate::facet::FacetCache;
use crate::record::{DataTypeDocument, HardwareRecord, SP_HARDWARE_DATA_TYPE};
use crate::retriever::SystemProfiler;

/// Apple support page listing the values seen in `machine_model`.
pub const MODEL_IDENTIFIERS_PAGE: &str = "https://support.apple.com/en-us/HT201300";

/// Label given to the default manufacturer.
pub const APPLE_LABEL: &str = "Apple Computer, Inc.";

/// Builds a CASE graph describing one host from its `system_profiler` output.
///
/// The device node is fixed at construction: either supplied by the caller
/// (and assumed to be typed in some external graph) or minted here and typed
/// as `uco-observable:AppleDevice` and `uco-observable:Computer`.
#[derive(Debug)]
pub struct SystemProfileMapper {
    graph: Graph,
    facets: FacetCache,
    allocator: IdAllocator,
    device: Iri,
}

impl SystemProfileMapper {
    /// Creates a mapper over an empty graph.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if `config` fails [`MapperConfig::validate`].
    pub fn new(config: MapperConfig) -> Result<Self, ConfigError> {
        Self::with_graph(config, Graph::new())
    }

    /// Creates a mapper that extends `graph`.
    ///
    /// Facets already linked from the device in `graph` are reused rather
    /// than duplicated.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if `config` fails [`MapperConfig::validate`].
    /// `graph` is dropped unchanged in that case.
    pub fn with_graph(config: MapperConfig, mut graph: Graph) -> Result<Self, ConfigError> {
        config.validate()?;
        let kb = config.kb_namespace();
        graph.bind(kb.clone());
        for ns in standard_bindings() {
            graph.bind(ns);
        }

        let mut allocator = IdAllocator::new(kb, config.policy);
        let device = match config.device {
            Some(device) => device,
            None => {
                let device = allocator.allocate_random("AppleDevice");
                graph.add(&device, iris::RDF_TYPE, Iri::new(uco_observable::APPLE_DEVICE));
                graph.add(&device, iris::RDF_TYPE, Iri::new(uco_observable::COMPUTER));
                debug!(device = %device, "minted device node");
                device
            }
        };

        let mut mapper = Self {
            graph,
            facets: FacetCache::new(),
            allocator,
            device,
        };
        if let Some(manufacturer) = config.manufacturer {
            mapper.link_manufacturer(&manufacturer);
        }
        Ok(mapper)
    }

    /// The graph built so far.
    #[must_use]
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Consumes the mapper, handing the graph off for serialization.
    #[must_use]
    pub fn into_graph(self) -> Graph {
        self.graph
    }

    /// The profiled device node.
    #[must_use]
    pub fn device(&self) -> &Iri {
        &self.device
    }

    /// Returns `owner`'s facet of class `facet_class`, creating it if needed.
    pub fn get_or_create_facet(&mut self, owner: &Iri, facet_class: &Iri) -> Iri {
        self.facets
            .get_or_create_facet(&mut self.graph, &mut self.allocator, owner, facet_class)
    }

    /// Returns the device's `uco-observable:DeviceFacet`.
    pub fn device_facet(&mut self) -> Iri {
        let device = self.device.clone();
        self.get_or_create_facet(&device, &Iri::new(uco_observable::DEVICE_FACET))
    }

    /// Retrieves `SPHardwareDataType` (live, or from `snapshot`) and maps it.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::Retrieval`] if retrieval fails, in which case the
    /// graph is untouched, or any error of [`Self::map_hardware_record`].
    pub fn map_sp_hardware_data_type(
        &mut self,
        retriever: &mut SystemProfiler,
        snapshot: Option<&Path>,
    ) -> Result<(), MapError> {
        let document = retriever.retrieve(SP_HARDWARE_DATA_TYPE, snapshot)?;
        self.map_hardware_record(&document)
    }

    /// Maps the first entry of an `SPHardwareDataType` document onto the
    /// device's `DeviceFacet`.
    ///
    /// All required fields are validated before anything is emitted, so on
    /// error the graph is exactly as it was before the call.
    ///
    /// # Errors
    ///
    /// - [`MapError::WrongDataType`] if `document` is for another data type.
    /// - [`MapError::MissingField`] / [`MapError::InvalidField`] if a
    ///   required field is absent or not a string.
    pub fn map_hardware_record(&mut self, document: &DataTypeDocument) -> Result<(), MapError> {
        if document.data_type() != SP_HARDWARE_DATA_TYPE {
            return Err(MapError::WrongDataType {
                expected: SP_HARDWARE_DATA_TYPE,
                found: document.data_type().to_owned(),
            });
        }
        let record = HardwareRecord::from_entry(document.primary())?;
        if document.additional_entries() > 0 {
            debug!(
                count = document.additional_entries(),
                "{SP_HARDWARE_DATA_TYPE} entries after the first are not mapped"
            );
        }
        self.map_hardware(&record);
        Ok(())
    }

    /// Emits the statements for an already-validated hardware record.
    pub fn map_hardware(&mut self, record: &HardwareRecord) {
        let facet = self.device_facet();

        self.graph.add(
            &facet,
            iris::RDFS_SEE_ALSO,
            Iri::new(MODEL_IDENTIFIERS_PAGE),
        );
        for (predicate, value) in [
            (uco_observable::DEVICE_TYPE, &record.machine_name),
            (uco_observable::MODEL, &record.machine_model),
            (uco_observable::SERIAL_NUMBER, &record.serial_number),
        ] {
            debug!(facet = %facet, "{} = {value:?}", Iri::new(predicate).local_name());
            self.graph.add(&facet, predicate, Literal::plain(value.as_str()));
        }

        if !record.unmapped_keys.is_empty() {
            debug!(
                keys = ?record.unmapped_keys,
                physical_memory_bytes = ?record.physical_memory_bytes(),
                "{SP_HARDWARE_DATA_TYPE} keys observed but not yet mapped"
            );
        }
    }

    fn link_manufacturer(&mut self, manufacturer: &Iri) {
        self.graph.add(
            manufacturer,
            iris::RDF_TYPE,
            Iri::new(uco_identity::ORGANIZATION),
        );
        self.graph
            .add(manufacturer, iris::RDFS_LABEL, Literal::lang(APPLE_LABEL, "en"));
        let facet = self.device_facet();
        self.graph
            .add(&facet, uco_observable::MANUFACTURER, manufacturer);
    }
}
