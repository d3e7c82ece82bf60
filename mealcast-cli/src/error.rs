//! Error types emitted by the Mealcast CLI.
//!
//! Keep this error type reasonably small, as many CLI helpers return
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use mealcast_core::RecommendError;
use mealcast_data::ProviderBuildError;
use thiserror::Error;

/// Errors emitted by the Mealcast CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument { field: &'static str, env: String },
    /// A coordinate lies outside its valid range.
    #[error("{field} {value} is out of range ({min} to {max})")]
    InvalidCoordinate {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
    /// The time zone is not a known IANA name.
    #[error("unknown time zone {name:?}")]
    InvalidTimezone { name: String },
    /// The bind address cannot be parsed.
    #[error("invalid bind address {value:?}: {source}")]
    InvalidBind {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
    /// A referenced input path does not exist on disk.
    #[error("{field} path {path:?} does not exist")]
    MissingSourceFile {
        field: &'static str,
        path: Utf8PathBuf,
    },
    /// A referenced input path exists but is not a file.
    #[error("{field} path {path:?} exists but is not a file")]
    SourcePathNotFile {
        field: &'static str,
        path: Utf8PathBuf,
    },
    /// A referenced input path could not be inspected due to an IO error.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        field: &'static str,
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Constructing an HTTP adapter failed.
    #[error("failed to build {service} client for {base_url:?}: {source}")]
    BuildClient {
        service: &'static str,
        base_url: String,
        #[source]
        source: ProviderBuildError,
    },
    /// The recommendation pass failed.
    #[error("recommendation failed: {0}")]
    Recommend(#[from] RecommendError),
    /// Serializing the recommendation failed.
    #[error("failed to serialize recommendation: {0}")]
    SerializeResponse(#[source] serde_json::Error),
    /// Writing the recommendation output failed.
    #[error("failed to write recommendation output: {0}")]
    WriteOutput(#[source] std::io::Error),
    /// Building the server runtime failed.
    #[error("failed to start server runtime: {0}")]
    Runtime(#[source] std::io::Error),
    /// Binding or running the HTTP server failed.
    #[error("server on {addr} failed: {source}")]
    Serve {
        addr: std::net::SocketAddr,
        #[source]
        source: std::io::Error,
    },
}
