//! Error types for record retrieval and mapping.

use std::path::PathBuf;
use std::process::ExitStatus;

use case_sp_ontology::InvalidIri;
use thiserror::Error;

/// Errors raised while validating a [`MapperConfig`](crate::MapperConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The knowledge-base prefix is already bound to a vocabulary namespace.
    #[error("knowledge-base prefix `{0}` collides with a vocabulary prefix")]
    ReservedPrefix(String),

    /// The knowledge-base prefix cannot be declared in every output format.
    #[error("knowledge-base prefix `{0}` is not a valid prefix name")]
    InvalidPrefix(String),

    /// The knowledge-base namespace is not a writable absolute IRI.
    #[error("invalid knowledge-base namespace: {0}")]
    InvalidNamespace(#[source] InvalidIri),

    /// The supplied device IRI is not a writable absolute IRI.
    #[error("invalid device IRI: {0}")]
    InvalidDevice(#[source] InvalidIri),
}

/// Errors raised while obtaining a `system_profiler` document.
///
/// Every variant is fatal and is raised before any statement is added to
/// the graph.
#[derive(Debug, Error)]
pub enum RetrievalError {
    /// The `system_profiler` command could not be started.
    #[error("failed to run `{program}`: {source}")]
    Spawn {
        /// Program that was invoked.
        program: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The command ran but exited unsuccessfully.
    #[error("`{program}` exited with {status}: {stderr}")]
    CommandFailed {
        /// Program that was invoked.
        program: String,
        /// Exit status reported by the OS.
        status: ExitStatus,
        /// Captured standard error, trimmed.
        stderr: String,
    },

    /// The command's standard output is not valid UTF-8.
    #[error("`{program}` printed output that is not valid UTF-8: {source}")]
    NotUtf8 {
        /// Program that was invoked.
        program: String,
        /// Decoding error, locating the first invalid byte.
        #[source]
        source: std::string::FromUtf8Error,
    },

    /// A captured snapshot file could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        /// Snapshot path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The output or snapshot is not valid JSON.
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The top-level JSON value is not an object.
    #[error("expected a JSON object at the top level, found {0}")]
    NotAnObject(&'static str),

    /// The requested data type is not a top-level key.
    #[error("data type `{0}` not present in document")]
    MissingDataType(String),

    /// The data type key does not hold a non-empty array of objects.
    #[error("data type `{data_type}` is malformed: {reason}")]
    MalformedDataType {
        /// Requested data type.
        data_type: String,
        /// What was wrong with its value.
        reason: String,
    },
}

/// Errors raised while mapping a record into the graph.
#[derive(Debug, Error)]
pub enum MapError {
    /// A required field is absent from the per-device record.
    #[error("required field `{key}` missing from {data_type} record")]
    MissingField {
        /// Data type of the record.
        data_type: &'static str,
        /// Key that was absent.
        key: &'static str,
    },

    /// A required field is present but not a JSON string.
    #[error("field `{key}` of {data_type} record must be a string, found {found}")]
    InvalidField {
        /// Data type of the record.
        data_type: &'static str,
        /// Offending key.
        key: &'static str,
        /// JSON type actually found.
        found: &'static str,
    },

    /// The document handed to a mapping routine is for another data type.
    #[error("expected a {expected} document, got {found}")]
    WrongDataType {
        /// Data type the routine maps.
        expected: &'static str,
        /// Data type of the supplied document.
        found: String,
    },

    /// Retrieving the record failed.
    #[error(transparent)]
    Retrieval(#[from] RetrievalError),
}

/// Returns a short JSON type name for error messages.
pub(crate) fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
