//! `case_macos_system_profiler`: describes the host's hardware as a CASE graph.
//!
//! Queries `system_profiler` (or loads a captured `-json` snapshot), maps the
//! hardware overview onto the device's `uco-observable:DeviceFacet`, and
//! writes the graph in the format implied by the output path.
//!
//! **Usage:**
//! ```text
//! case_macos_system_profiler [--debug] [--SPHardwareDataType-json <file>]
//!     [--device-iri <iri>] [--kb-prefix <prefix>] [--kb-prefix-iri <iri>]
//!     [--output-format <format>] [--use-deterministic-uuids] <out_graph>
//! ```
//!
//! Nothing is written unless mapping and serialization both succeed.

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use case_sp_mapper::config::{DEFAULT_KB_PREFIX, DEFAULT_KB_PREFIX_IRI};
use case_sp_mapper::record::SP_HARDWARE_DATA_TYPE;
use case_sp_mapper::{IdentifierPolicy, MapperConfig, SystemProfileMapper, SystemProfiler};
use case_sp_ontology::serializer::{self, OutputFormat};
use case_sp_ontology::Iri;
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Map macOS `system_profiler` output to a CASE graph.
#[derive(Parser)]
#[command(
    name = "case_macos_system_profiler",
    about = "Map macOS system_profiler output to a CASE graph"
)]
struct Args {
    /// Log at DEBUG level (overridden by `RUST_LOG`).
    #[arg(long)]
    debug: bool,

    /// Load `SPHardwareDataType` from this `system_profiler -json` capture
    /// instead of running the command.
    #[arg(long = "SPHardwareDataType-json", value_name = "FILE")]
    sp_hardware_data_type_json: Option<PathBuf>,

    /// IRI of the profiled device, when it is defined in another graph.
    #[arg(long, value_name = "IRI")]
    device_iri: Option<Iri>,

    /// Prefix label for minted individuals.
    #[arg(long, default_value = DEFAULT_KB_PREFIX)]
    kb_prefix: String,

    /// IRI the knowledge-base prefix expands to.
    #[arg(long, default_value = DEFAULT_KB_PREFIX_IRI)]
    kb_prefix_iri: String,

    /// Output format: turtle, n3, nt, xml, or json-ld. Guessed from the
    /// output path's extension when omitted.
    #[arg(long, value_name = "FORMAT")]
    output_format: Option<OutputFormat>,

    /// Derive facet IRIs from their owner and class rather than randomly.
    #[arg(long)]
    use_deterministic_uuids: bool,

    /// Path the graph is written to.
    out_graph: PathBuf,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.debug);

    let format = match args.output_format {
        Some(format) => format,
        None => OutputFormat::guess(&args.out_graph)
            .context("Failed to determine the output format")?,
    };

    let config = MapperConfig {
        kb_prefix: args.kb_prefix,
        kb_prefix_iri: args.kb_prefix_iri,
        device: args.device_iri,
        policy: if args.use_deterministic_uuids {
            IdentifierPolicy::Deterministic
        } else {
            IdentifierPolicy::Random
        },
        ..MapperConfig::default()
    };

    let mut mapper =
        SystemProfileMapper::new(config).context("Invalid knowledge-base configuration")?;

    let mut retriever = SystemProfiler::new();
    let document = retriever
        .retrieve(SP_HARDWARE_DATA_TYPE, args.sp_hardware_data_type_json.as_deref())
        .context("Failed to retrieve SPHardwareDataType")?;

    mapper
        .map_hardware_record(&document)
        .context("Failed to map SPHardwareDataType")?;
    for data_type in retriever.reviewed_data_types() {
        debug!("reviewed data type: {data_type}");
    }

    let graph = mapper.into_graph();
    let text = serializer::serialize(&graph, format)
        .with_context(|| format!("Failed to serialize graph as {format}"))?;
    fs::write(&args.out_graph, text)
        .with_context(|| format!("Failed to write {}", args.out_graph.display()))?;

    info!(
        triples = graph.len(),
        %format,
        "Written: {}",
        args.out_graph.display()
    );
    Ok(())
}

/// Logs go to stderr; `RUST_LOG` takes precedence over `--debug`.
fn init_tracing(debug: bool) {
    let level = if debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
