//! Listing commands: the amenity and rent type catalogues and stored
//! neighborhoods.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use matchmaker_core::{AmenityKind, RentType};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::fs::require_existing;
use crate::search::{open_store, write_json};
use crate::{ARG_DATABASE, CliError, ENV_NEIGHBORHOODS_DATABASE};

/// CLI arguments for the `neighborhoods` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(about = "List neighborhood names stored in the database")]
#[ortho_config(prefix = "MATCHMAKER")]
pub(crate) struct NeighborhoodsArgs {
    /// Path to the SQLite neighborhood database.
    #[arg(long = ARG_DATABASE, value_name = "path")]
    #[serde(default)]
    pub(crate) database: Option<Utf8PathBuf>,
}

impl NeighborhoodsArgs {
    fn into_database(self) -> Result<Utf8PathBuf, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        merged.database.ok_or(CliError::MissingArgument {
            field: ARG_DATABASE,
            env: ENV_NEIGHBORHOODS_DATABASE,
        })
    }
}

/// Print every amenity kind name as a JSON array.
pub(crate) fn run_amenities(writer: &mut dyn Write) -> Result<(), CliError> {
    let names: Vec<&str> = AmenityKind::ALL.iter().map(|kind| kind.as_str()).collect();
    write_json(writer, &names)
}

/// Print every rent type name as a JSON array.
pub(crate) fn run_rent_types(writer: &mut dyn Write) -> Result<(), CliError> {
    let names: Vec<&str> = RentType::ALL.iter().map(|rent| rent.as_str()).collect();
    write_json(writer, &names)
}

/// Print stored neighborhood names as a JSON array.
pub(crate) async fn run_neighborhoods(
    args: NeighborhoodsArgs,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let database = args.into_database()?;
    require_existing(&database, ARG_DATABASE)?;
    let store = open_store(&database)?;
    let names = store
        .neighborhood_names()
        .await
        .map_err(|source| CliError::Database {
            path: database.clone(),
            source: Box::new(source),
        })?;
    write_json(writer, &names)
}
