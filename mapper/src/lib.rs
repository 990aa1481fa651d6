//! Mapping of macOS `system_profiler` output onto CASE/UCO graphs.
//!
//! The crate turns one `SPHardwareDataType` record into statements about
//! the profiled device and its `DeviceFacet`, with the facet identity rules
//! CASE requires: a UCO object carries at most one facet per facet class,
//! and facet IRIs are either random or derived deterministically from the
//! owning object.
//!
//! # Entry Point
//!
//! ```
//! use case_sp_mapper::record::{DataTypeDocument, SP_HARDWARE_DATA_TYPE};
//! use case_sp_mapper::{MapperConfig, SystemProfileMapper};
//!
//! let document = DataTypeDocument::from_json(
//!     SP_HARDWARE_DATA_TYPE,
//!     r#"{"SPHardwareDataType": [{
//!         "machine_name": "MacBook Pro",
//!         "machine_model": "MacBookPro18,3",
//!         "serial_number": "TESTSERIAL123"
//!     }]}"#,
//! )
//! .unwrap();
//!
//! let mut mapper = SystemProfileMapper::new(MapperConfig::default()).unwrap();
//! mapper.map_hardware_record(&document).unwrap();
//! assert!(!mapper.graph().is_empty());
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

pub mod allocator;
pub mod config;
pub mod error;
pub mod facet;
pub mod mapper;
pub mod record;
pub mod retriever;

pub use allocator::{IdAllocator, IdentifierPolicy};
pub use config::MapperConfig;
pub use error::{ConfigError, MapError, RetrievalError};
pub use facet::FacetCache;
pub use mapper::SystemProfileMapper;
pub use record::{DataTypeDocument, HardwareRecord};
pub use retriever::SystemProfiler;
