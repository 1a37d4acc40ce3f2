//! Command-line interface for the neighborhood matchmaker.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod catalogue;
mod error;
mod fs;
mod logging;
mod search;

pub use error::CliError;
pub use logging::{LOG_ENV_VAR, init_logging};

use catalogue::{NeighborhoodsArgs, run_amenities, run_neighborhoods, run_rent_types};
use search::{SearchArgs, run_search};

pub(crate) const ARG_SEARCH_REQUEST: &str = "request";
pub(crate) const ARG_DATABASE: &str = "database";
pub(crate) const ARG_OVERPASS_URL: &str = "overpass-url";
pub(crate) const ARG_BATCH_SIZE: &str = "batch-size";
pub(crate) const ARG_PACING_MS: &str = "pacing-ms";
pub(crate) const ARG_RESULT_LIMIT: &str = "result-limit";
pub(crate) const ENV_SEARCH_REQUEST: &str = "MATCHMAKER_CMDS_SEARCH_REQUEST_PATH";
pub(crate) const ENV_SEARCH_DATABASE: &str = "MATCHMAKER_CMDS_SEARCH_DATABASE";
pub(crate) const ENV_NEIGHBORHOODS_DATABASE: &str = "MATCHMAKER_CMDS_NEIGHBORHOODS_DATABASE";

/// Run the matchmaker CLI with the current process arguments and environment.
///
/// # Errors
///
/// Returns [`CliError`] when arguments, configuration or any command step
/// fails.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    let mut stdout = std::io::stdout().lock();
    match cli.command {
        Command::Search(args) => {
            let runtime = build_runtime()?;
            runtime.block_on(run_search(args, &mut stdout))
        }
        Command::Amenities => run_amenities(&mut stdout),
        Command::RentTypes => run_rent_types(&mut stdout),
        Command::Neighborhoods(args) => {
            let runtime = build_runtime()?;
            runtime.block_on(run_neighborhoods(args, &mut stdout))
        }
    }
}

fn build_runtime() -> Result<tokio::runtime::Runtime, CliError> {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(CliError::Runtime)
}

#[derive(Debug, Parser)]
#[command(
    name = "matchmaker",
    about = "Rank neighborhoods of a city against a search request",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Rank the neighborhoods of a city for a JSON search request.
    Search(SearchArgs),
    /// List the amenity kinds a search can request.
    Amenities,
    /// List the rent types a search can carry.
    RentTypes,
    /// List the neighborhoods stored in the database.
    Neighborhoods(NeighborhoodsArgs),
}

#[cfg(test)]
mod tests;
