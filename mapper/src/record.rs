//! Validated `system_profiler -json` documents and typed per-device records.
//!
//! Raw JSON is checked once, at the retrieval boundary, into a
//! [`DataTypeDocument`]. Mapping routines then lift the entry they need into
//! a typed record such as [`HardwareRecord`], so required-field handling
//! happens in one place and before any statement is emitted.

use serde_json::{Map, Value};

use crate::error::{json_type_name, MapError, RetrievalError};

/// The hardware overview data type.
pub const SP_HARDWARE_DATA_TYPE: &str = "SPHardwareDataType";

/// One data type's entries from a `system_profiler -json` document.
///
/// Invariant: holds at least one entry, and every entry is a JSON object.
#[derive(Debug, Clone, PartialEq)]
pub struct DataTypeDocument {
    data_type: String,
    primary: Map<String, Value>,
    additional: usize,
}

impl DataTypeDocument {
    /// Validates a parsed document and extracts `data_type`'s entries.
    ///
    /// # Errors
    ///
    /// - [`RetrievalError::NotAnObject`] if `value` is not a JSON object.
    /// - [`RetrievalError::MissingDataType`] if `data_type` is not a top-level key.
    /// - [`RetrievalError::MalformedDataType`] if its value is not a non-empty
    ///   array of objects.
    pub fn from_value(data_type: &str, value: Value) -> Result<Self, RetrievalError> {
        let mut top = match value {
            Value::Object(top) => top,
            other => return Err(RetrievalError::NotAnObject(json_type_name(&other))),
        };
        let entries = top
            .remove(data_type)
            .ok_or_else(|| RetrievalError::MissingDataType(data_type.to_owned()))?;

        let malformed = |reason: String| RetrievalError::MalformedDataType {
            data_type: data_type.to_owned(),
            reason,
        };

        let entries = match entries {
            Value::Array(entries) => entries,
            other => {
                return Err(malformed(format!(
                    "expected an array, found {}",
                    json_type_name(&other)
                )))
            }
        };

        let mut items = Vec::with_capacity(entries.len());
        for (i, entry) in entries.into_iter().enumerate() {
            match entry {
                Value::Object(map) => items.push(map),
                other => {
                    return Err(malformed(format!(
                        "entry {i} is {}, expected an object",
                        json_type_name(&other)
                    )))
                }
            }
        }

        let additional = items.len().saturating_sub(1);
        let primary = items
            .into_iter()
            .next()
            .ok_or_else(|| malformed("array is empty".to_owned()))?;

        Ok(Self {
            data_type: data_type.to_owned(),
            primary,
            additional,
        })
    }

    /// Parses JSON text and validates it as in [`DataTypeDocument::from_value`].
    ///
    /// # Errors
    ///
    /// Returns [`RetrievalError::Json`] for malformed JSON, or any error of
    /// [`DataTypeDocument::from_value`].
    pub fn from_json(data_type: &str, text: &str) -> Result<Self, RetrievalError> {
        Self::from_value(data_type, serde_json::from_str(text)?)
    }

    /// The data type this document was validated for.
    #[must_use]
    pub fn data_type(&self) -> &str {
        &self.data_type
    }

    /// The first entry, which describes the profiled host.
    #[must_use]
    pub fn primary(&self) -> &Map<String, Value> {
        &self.primary
    }

    /// Number of entries after the first. They pass validation but are not
    /// mapped.
    #[must_use]
    pub fn additional_entries(&self) -> usize {
        self.additional
    }
}

/// The mapped fields of one `SPHardwareDataType` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HardwareRecord {
    /// `machine_name`, e.g. `"MacBook Pro"`.
    pub machine_name: String,
    /// `machine_model`, e.g. `"MacBookPro18,3"`.
    pub machine_model: String,
    /// `serial_number`.
    pub serial_number: String,
    /// `physical_memory`, e.g. `"16 GB"`, when reported.
    pub physical_memory: Option<String>,
    /// Keys present in the entry that are not mapped, sorted.
    pub unmapped_keys: Vec<String>,
}

impl HardwareRecord {
    /// Key of the device-type label.
    pub const MACHINE_NAME: &'static str = "machine_name";
    /// Key of the model label.
    pub const MACHINE_MODEL: &'static str = "machine_model";
    /// Key of the serial number.
    pub const SERIAL_NUMBER: &'static str = "serial_number";
    /// Key of the installed memory size.
    pub const PHYSICAL_MEMORY: &'static str = "physical_memory";

    const MAPPED: [&'static str; 3] = [Self::MACHINE_NAME, Self::MACHINE_MODEL, Self::SERIAL_NUMBER];

    /// Lifts one `SPHardwareDataType` entry into a typed record.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::MissingField`] if a required key is absent, or
    /// [`MapError::InvalidField`] if a required value is not a string.
    pub fn from_entry(entry: &Map<String, Value>) -> Result<Self, MapError> {
        let mut unmapped_keys: Vec<String> = entry
            .keys()
            .filter(|k| !Self::MAPPED.contains(&k.as_str()))
            .cloned()
            .collect();
        unmapped_keys.sort_unstable();

        Ok(Self {
            machine_name: required(entry, Self::MACHINE_NAME)?,
            machine_model: required(entry, Self::MACHINE_MODEL)?,
            serial_number: required(entry, Self::SERIAL_NUMBER)?,
            physical_memory: entry
                .get(Self::PHYSICAL_MEMORY)
                .and_then(Value::as_str)
                .map(str::to_owned),
            unmapped_keys,
        })
    }

    /// Installed memory in bytes, if reported in a recognized form.
    #[must_use]
    pub fn physical_memory_bytes(&self) -> Option<u64> {
        self.physical_memory.as_deref().and_then(parse_suffixed_bytes)
    }
}

fn required(entry: &Map<String, Value>, key: &'static str) -> Result<String, MapError> {
    match entry.get(key) {
        None => Err(MapError::MissingField {
            data_type: SP_HARDWARE_DATA_TYPE,
            key,
        }),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(other) => Err(MapError::InvalidField {
            data_type: SP_HARDWARE_DATA_TYPE,
            key,
            found: json_type_name(other),
        }),
    }
}

/// Converts a `system_profiler` size such as `"16 GB"` to bytes.
///
/// Units are binary multiples: KB = 2^10 … TB = 2^40. Returns `None` for
/// anything that is not `<integer> <unit>` or that overflows.
///
/// ```
/// use case_sp_mapper::record::parse_suffixed_bytes;
///
/// assert_eq!(parse_suffixed_bytes("1 KB"), Some(1024));
/// assert_eq!(parse_suffixed_bytes("16 GB"), Some(17_179_869_184));
/// assert_eq!(parse_suffixed_bytes("16GB"), None);
/// ```
#[must_use]
pub fn parse_suffixed_bytes(text: &str) -> Option<u64> {
    let (number, unit) = text.split_once(' ')?;
    let shift = match unit {
        "KB" => 10,
        "MB" => 20,
        "GB" => 30,
        "TB" => 40,
        _ => return None,
    };
    number.parse::<u64>().ok()?.checked_mul(1u64 << shift)
}
