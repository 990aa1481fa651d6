//! `uco-observable/` namespace: observable objects and their facets.
//!
//! Only the device classes and the `DeviceFacet` properties populated from
//! `SPHardwareDataType` are encoded here.

use crate::model::Namespace;

/// Namespace IRI.
pub const NS: &str = "https://ontology.unifiedcyberontology.org/uco/observable/";

/// `uco-observable:` binding.
pub const NAMESPACE: Namespace = Namespace::from_static("uco-observable", NS);

/// `uco-observable:AppleDevice`.
pub const APPLE_DEVICE: &str = "https://ontology.unifiedcyberontology.org/uco/observable/AppleDevice";
/// `uco-observable:Computer`.
pub const COMPUTER: &str = "https://ontology.unifiedcyberontology.org/uco/observable/Computer";
/// `uco-observable:DeviceFacet`: hardware description of a device.
pub const DEVICE_FACET: &str = "https://ontology.unifiedcyberontology.org/uco/observable/DeviceFacet";

/// `uco-observable:deviceType`.
pub const DEVICE_TYPE: &str = "https://ontology.unifiedcyberontology.org/uco/observable/deviceType";
/// `uco-observable:manufacturer`.
pub const MANUFACTURER: &str = "https://ontology.unifiedcyberontology.org/uco/observable/manufacturer";
/// `uco-observable:model`.
pub const MODEL: &str = "https://ontology.unifiedcyberontology.org/uco/observable/model";
/// `uco-observable:serialNumber`.
pub const SERIAL_NUMBER: &str = "https://ontology.unifiedcyberontology.org/uco/observable/serialNumber";
