//! Error types emitted by the matchmaker CLI.
//!
//! Keep this error type reasonably small, as many CLI helpers return
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use matchmaker_core::{SearchCriteriaError, SearchError};
use matchmaker_data::{OverpassBuildError, SqliteStoreError};
use thiserror::Error;

/// Errors emitted by the matchmaker CLI.
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
    MissingArgument {
        /// Name of the offending option.
        field: &'static str,
        /// Environment variable that supplies the option.
        env: &'static str,
    },
    /// A referenced input path does not exist on disk.
    #[error("{field} path {path:?} does not exist")]
    MissingSourceFile {
        /// Name of the offending option.
        field: &'static str,
        /// Path involved in the failure.
        path: Utf8PathBuf,
    },
    /// A referenced input path exists but is not a file.
    #[error("{field} path {path:?} exists but is not a file")]
    SourcePathNotFile {
        /// Name of the offending option.
        field: &'static str,
        /// Path involved in the failure.
        path: Utf8PathBuf,
    },
    /// A referenced input path could not be inspected due to an IO error.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        /// Name of the offending option.
        field: &'static str,
        /// Path involved in the failure.
        path: Utf8PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
    /// Opening the search request file failed.
    #[error("failed to open search request at {path:?}: {source}")]
    OpenSearchRequest {
        /// Path involved in the failure.
        path: Utf8PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
    /// Search request JSON could not be decoded.
    #[error("failed to parse search request JSON at {path:?}: {source}")]
    ParseSearchRequest {
        /// Path involved in the failure.
        path: Utf8PathBuf,
        /// Underlying error.
        #[source]
        source: serde_json::Error,
    },
    /// The search request payload failed validation.
    #[error("search request in {path:?} failed validation: {source}")]
    InvalidSearchRequest {
        /// Path involved in the failure.
        path: Utf8PathBuf,
        /// Underlying error.
        #[source]
        source: SearchCriteriaError,
    },
    /// Opening or querying the neighborhood database failed.
    #[error("neighborhood database {path:?} failed: {source}")]
    Database {
        /// Path involved in the failure.
        path: Utf8PathBuf,
        /// Underlying error.
        #[source]
        source: Box<SqliteStoreError>,
    },
    /// Constructing the Overpass client failed.
    #[error("failed to build amenity lookup for {base_url:?}: {source}")]
    BuildAmenityLookup {
        /// Overpass base URL that was configured.
        base_url: String,
        /// Underlying error.
        #[source]
        source: OverpassBuildError,
    },
    /// The ranker rejected the request.
    #[error("search failed: {0}")]
    Search(#[source] SearchError),
    /// The async runtime could not start.
    #[error("failed to start async runtime: {0}")]
    Runtime(#[source] std::io::Error),
    /// A global log subscriber was already installed.
    #[error("failed to initialise logging: {0}")]
    Logging(#[from] tracing_subscriber::util::TryInitError),
    /// Serializing command output failed.
    #[error("failed to serialize output: {0}")]
    SerializeOutput(#[source] serde_json::Error),
    /// Writing command output failed.
    #[error("failed to write output: {0}")]
    WriteOutput(#[source] std::io::Error),
}
