//! Search command implementation for the matchmaker CLI.

use std::io::{BufReader, Write};
use std::time::Duration;

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use matchmaker_core::{RankedSearchResult, Ranker, SearchCriteria};
use matchmaker_data::{OverpassAmenityLookup, OverpassConfig, SqliteNeighborhoodStore};
use matchmaker_ranking::{RankingConfig, RankingEngine};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::fs::{open_utf8_file, require_existing};
use crate::{
    ARG_BATCH_SIZE, ARG_DATABASE, ARG_OVERPASS_URL, ARG_PACING_MS, ARG_RESULT_LIMIT,
    ARG_SEARCH_REQUEST, CliError, ENV_SEARCH_DATABASE, ENV_SEARCH_REQUEST,
};

/// CLI arguments for the `search` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Rank the neighborhoods of a city for a JSON-encoded search \
                 request. Neighborhoods come from the SQLite database; missing \
                 amenity counts are fetched from an Overpass instance and \
                 cached back into the database.",
    about = "Rank neighborhoods for a search request"
)]
#[ortho_config(prefix = "MATCHMAKER")]
pub(crate) struct SearchArgs {
    /// Path to a JSON file containing the search criteria.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) request_path: Option<Utf8PathBuf>,
    /// Path to the SQLite neighborhood database.
    #[arg(long = ARG_DATABASE, value_name = "path")]
    #[serde(default)]
    pub(crate) database: Option<Utf8PathBuf>,
    /// Base URL of the Overpass instance (e.g. "https://overpass-api.de").
    #[arg(long = ARG_OVERPASS_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) overpass_url: Option<String>,
    /// Neighborhoods evaluated concurrently per batch.
    #[arg(long = ARG_BATCH_SIZE, value_name = "count")]
    #[serde(default)]
    pub(crate) batch_size: Option<usize>,
    /// Pause between batches, in milliseconds.
    #[arg(long = ARG_PACING_MS, value_name = "ms")]
    #[serde(default)]
    pub(crate) pacing_ms: Option<u64>,
    /// Maximum number of neighborhoods reported.
    #[arg(long = ARG_RESULT_LIMIT, value_name = "count")]
    #[serde(default)]
    pub(crate) result_limit: Option<usize>,
}

impl SearchArgs {
    pub(crate) fn into_config(self) -> Result<SearchConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        SearchConfig::try_from(merged)
    }
}

/// Resolved `search` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SearchConfig {
    /// Path to the JSON request file.
    pub(crate) request_path: Utf8PathBuf,
    /// Path to the SQLite database.
    pub(crate) database: Utf8PathBuf,
    /// Base URL of the Overpass instance.
    pub(crate) overpass_url: String,
    /// Batching, pacing and truncation settings.
    pub(crate) ranking: RankingConfig,
}

impl SearchConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        require_existing(&self.request_path, ARG_SEARCH_REQUEST)?;
        require_existing(&self.database, ARG_DATABASE)?;
        Ok(())
    }
}

impl TryFrom<SearchArgs> for SearchConfig {
    type Error = CliError;

    fn try_from(args: SearchArgs) -> Result<Self, Self::Error> {
        let request_path = args.request_path.ok_or(CliError::MissingArgument {
            field: ARG_SEARCH_REQUEST,
            env: ENV_SEARCH_REQUEST,
        })?;
        let database = args.database.ok_or(CliError::MissingArgument {
            field: ARG_DATABASE,
            env: ENV_SEARCH_DATABASE,
        })?;
        let overpass_url = args
            .overpass_url
            .unwrap_or_else(|| OverpassConfig::default().base_url);

        let defaults = RankingConfig::default();
        let default_batch_size = defaults.batch_size.get();
        let ranking = defaults
            .with_batch_size(args.batch_size.unwrap_or(default_batch_size))
            .with_pacing(args.pacing_ms.map_or(defaults.pacing, Duration::from_millis))
            .with_result_limit(args.result_limit.unwrap_or(defaults.result_limit));

        Ok(Self {
            request_path,
            database,
            overpass_url,
            ranking,
        })
    }
}

/// Builds a ranker for the current search invocation.
pub(crate) trait SearchRankerBuilder {
    fn build(&self, config: &SearchConfig) -> Result<Box<dyn Ranker>, CliError>;
}

pub(crate) struct DefaultSearchRankerBuilder;

impl SearchRankerBuilder for DefaultSearchRankerBuilder {
    fn build(&self, config: &SearchConfig) -> Result<Box<dyn Ranker>, CliError> {
        let store = open_store(&config.database)?;
        let lookup = OverpassAmenityLookup::new(config.overpass_url.clone()).map_err(|source| {
            CliError::BuildAmenityLookup {
                base_url: config.overpass_url.clone(),
                source,
            }
        })?;
        let engine =
            RankingEngine::new(store.clone(), lookup, store).with_config(config.ranking);
        Ok(Box::new(engine))
    }
}

/// Open the SQLite store at `path`.
pub(crate) fn open_store(path: &Utf8Path) -> Result<SqliteNeighborhoodStore, CliError> {
    SqliteNeighborhoodStore::open(path.as_std_path()).map_err(|source| CliError::Database {
        path: path.to_path_buf(),
        source: Box::new(source),
    })
}

pub(crate) async fn run_search(args: SearchArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    run_search_with(args, &DefaultSearchRankerBuilder, writer).await
}

pub(crate) async fn run_search_with(
    args: SearchArgs,
    builder: &dyn SearchRankerBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let result = execute_search(args, builder).await?;
    write_json(writer, &result)
}

async fn execute_search(
    args: SearchArgs,
    builder: &dyn SearchRankerBuilder,
) -> Result<RankedSearchResult, CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    let criteria = load_search_request(&config.request_path)?;
    criteria
        .validate()
        .map_err(|source| CliError::InvalidSearchRequest {
            path: config.request_path.clone(),
            source,
        })?;
    let ranker = builder.build(&config)?;
    ranker.rank(&criteria).await.map_err(CliError::Search)
}

/// Loads JSON-encoded [`SearchCriteria`] from disk.
pub(crate) fn load_search_request(path: &Utf8Path) -> Result<SearchCriteria, CliError> {
    let file = open_utf8_file(path).map_err(|source| CliError::OpenSearchRequest {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);
    serde_json::from_reader(reader).map_err(|source| CliError::ParseSearchRequest {
        path: path.to_path_buf(),
        source,
    })
}

/// Write `value` as pretty JSON followed by a newline.
pub(crate) fn write_json<T: Serialize + ?Sized>(
    writer: &mut dyn Write,
    value: &T,
) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(value).map_err(CliError::SerializeOutput)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}
