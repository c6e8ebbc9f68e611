//! Report subcommands.
//!
//! Each command loads a fixture into a fresh store and writes one JSON
//! document to stdout.

pub mod catalog;
pub mod dashboard;

use std::io::Write;
use std::path::Path;

use serde::Serialize;

use storekeep_admin::{CatalogStore, StoreConfig};

use crate::fixture::Fixture;

/// Build a store from the environment configuration and seed it.
async fn seeded_store(fixture: &Path) -> Result<CatalogStore, Box<dyn std::error::Error>> {
    let config = StoreConfig::from_env()?;
    let store = CatalogStore::new(config);
    Fixture::load(fixture).await?.apply(&store)?;
    Ok(store)
}

/// Write `value` to stdout as pretty JSON.
fn emit<T: Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    let mut out = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut out, value)?;
    writeln!(out)?;
    Ok(())
}
