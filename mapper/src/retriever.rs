//! Obtains `system_profiler` documents, live or from captured snapshots.

use std::collections::BTreeSet;
use std::ffi::OsString;
use std::path::Path;
use std::process::Command;

use tracing::{debug, info};

use crate::error::RetrievalError;
use crate::record::DataTypeDocument;

/// Default command used for live retrieval.
pub const SYSTEM_PROFILER: &str = "system_profiler";

/// Runs `system_profiler` or loads snapshot files, and remembers which data
/// types were requested.
#[derive(Debug, Clone)]
pub struct SystemProfiler {
    program: OsString,
    reviewed: BTreeSet<String>,
}

impl Default for SystemProfiler {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemProfiler {
    /// Creates a retriever that invokes `system_profiler` from `PATH`.
    #[must_use]
    pub fn new() -> Self {
        Self::with_program(SYSTEM_PROFILER)
    }

    /// Creates a retriever that invokes `program` in place of `system_profiler`.
    #[must_use]
    pub fn with_program(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
            reviewed: BTreeSet::new(),
        }
    }

    /// Data types requested so far, in sorted order.
    pub fn reviewed_data_types(&self) -> impl Iterator<Item = &str> {
        self.reviewed.iter().map(String::as_str)
    }

    /// Returns the validated document for `data_type`.
    ///
    /// If `snapshot` is given it is assumed to be the recorded output of the
    /// command that would otherwise be run, and is loaded instead.
    ///
    /// # Errors
    ///
    /// Returns a [`RetrievalError`] if the command cannot be run, exits
    /// unsuccessfully or prints anything but UTF-8, if the snapshot cannot be
    /// read, or if the JSON fails validation (see
    /// [`DataTypeDocument::from_value`]).
    pub fn retrieve(
        &mut self,
        data_type: &str,
        snapshot: Option<&Path>,
    ) -> Result<DataTypeDocument, RetrievalError> {
        self.reviewed.insert(data_type.to_owned());
        let text = match snapshot {
            Some(path) => {
                info!(path = %path.display(), "loading {data_type} snapshot");
                std::fs::read_to_string(path).map_err(|source| RetrievalError::Read {
                    path: path.to_path_buf(),
                    source,
                })?
            }
            None => self.run(data_type)?,
        };
        DataTypeDocument::from_json(data_type, &text)
    }

    fn run(&self, data_type: &str) -> Result<String, RetrievalError> {
        let program = self.program.to_string_lossy().into_owned();
        info!(%program, "running live {data_type} query");
        let output = Command::new(&self.program)
            .args(["-json", "-detailLevel", "full", data_type])
            .output()
            .map_err(|source| RetrievalError::Spawn {
                program: program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(RetrievalError::CommandFailed {
                program,
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_owned(),
            });
        }
        debug!(bytes = output.stdout.len(), "captured {program} output");
        String::from_utf8(output.stdout).map_err(|source| RetrievalError::NotUtf8 { program, source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::SP_HARDWARE_DATA_TYPE;
    use std::io::Write;

    #[test]
    fn loads_snapshot_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(
            file,
            r#"{{"SPHardwareDataType": [{{"machine_name": "MacBook Pro", "machine_model": "MacBookPro18,3", "serial_number": "X"}}]}}"#
        )
        .expect("write snapshot");

        let mut retriever = SystemProfiler::new();
        let doc = retriever
            .retrieve(SP_HARDWARE_DATA_TYPE, Some(file.path()))
            .expect("snapshot is valid");
        assert_eq!(doc.data_type(), SP_HARDWARE_DATA_TYPE);
        assert_eq!(doc.primary()["serial_number"], "X");
    }

    #[test]
    fn missing_snapshot_is_read_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let mut retriever = SystemProfiler::new();
        let err = retriever
            .retrieve(SP_HARDWARE_DATA_TYPE, Some(&dir.path().join("absent.json")))
            .unwrap_err();
        assert!(matches!(err, RetrievalError::Read { .. }));
    }

    #[test]
    fn records_reviewed_data_types() {
        let dir = tempfile::tempdir().expect("temp dir");
        let absent = dir.path().join("absent.json");
        let mut retriever = SystemProfiler::new();
        let _ = retriever.retrieve("SPSoftwareDataType", Some(&absent));
        let _ = retriever.retrieve(SP_HARDWARE_DATA_TYPE, Some(&absent));
        let _ = retriever.retrieve(SP_HARDWARE_DATA_TYPE, Some(&absent));
        let reviewed: Vec<&str> = retriever.reviewed_data_types().collect();
        assert_eq!(reviewed, ["SPHardwareDataType", "SPSoftwareDataType"]);
    }

    #[test]
    fn unknown_program_is_spawn_error() {
        let mut retriever = SystemProfiler::with_program("case-sp-no-such-program");
        let err = retriever.retrieve(SP_HARDWARE_DATA_TYPE, None).unwrap_err();
        assert!(matches!(err, RetrievalError::Spawn { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn non_zero_exit_is_command_failure() {
        let mut retriever = SystemProfiler::with_program("false");
        let err = retriever.retrieve(SP_HARDWARE_DATA_TYPE, None).unwrap_err();
        assert!(matches!(err, RetrievalError::CommandFailed { .. }));
    }

    /// Writes an executable shell script standing in for `system_profiler`.
    #[cfg(unix)]
    fn fake_profiler(dir: &Path, body: &str) -> std::path::PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let path = dir.join("system_profiler");
        std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).expect("write script");
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).expect("chmod");
        path
    }

    #[cfg(unix)]
    #[test]
    fn invalid_utf8_output_is_rejected() {
        let dir = tempfile::tempdir().expect("temp dir");
        let script = fake_profiler(
            dir.path(),
            r#"printf '{"SPHardwareDataType":[{"machine_name":"MacBook Pro","machine_model":"MacBookPro18,3","serial_number":"AB\377CD"}]}'"#,
        );
        let mut retriever = SystemProfiler::with_program(script.as_os_str());
        let err = retriever.retrieve(SP_HARDWARE_DATA_TYPE, None).unwrap_err();
        assert!(matches!(err, RetrievalError::NotUtf8 { .. }), "{err}");
    }

    #[cfg(unix)]
    #[test]
    fn live_output_is_parsed() {
        let dir = tempfile::tempdir().expect("temp dir");
        let script = fake_profiler(
            dir.path(),
            r#"printf '{"SPHardwareDataType":[{"machine_name":"MacBook Pro","machine_model":"MacBookPro18,3","serial_number":"C02X"}]}'"#,
        );
        let mut retriever = SystemProfiler::with_program(script.as_os_str());
        let doc = retriever
            .retrieve(SP_HARDWARE_DATA_TYPE, None)
            .expect("valid live output");
        assert_eq!(doc.primary()["serial_number"], "C02X");
    }

    #[cfg(unix)]
    #[test]
    fn non_json_output_is_json_error() {
        // `echo` prints its arguments, which is not JSON.
        let mut retriever = SystemProfiler::with_program("echo");
        let err = retriever.retrieve(SP_HARDWARE_DATA_TYPE, None).unwrap_err();
        assert!(matches!(err, RetrievalError::Json(_)));
    }
}
