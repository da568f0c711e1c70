#![doc = include_str!("../README.md")]

mod client;

use anyhow::Context;
use clap::Parser;
use client::config::{CliArgs, CliConfig};
use client::telemetry::init_telemetry;
use client::{LogTable, execute};
use gridid_tonic_core::TonicConnection;
use gridid_tonic_core::gridid::GridClient;

fn main() -> anyhow::Result<()> {
    // Load from .env
    let _ = dotenvy::dotenv();
    let args = CliArgs::parse();
    let config = CliConfig::try_from(args)?;

    init_telemetry()?;

    if cfg!(debug_assertions) {
        tracing::debug!("Running with full config: {:#?}", config);
    }

    let mut conn = TonicConnection::connect(&config.connection).with_context(|| {
        format!(
            "could not reach directory service at {}",
            config.connection.endpoint
        )
    })?;
    let client = GridClient::with_sink(config.client, LogTable);

    let output = execute(&client, &mut conn, &config.command)?;
    println!("{output}");
    Ok(())
}
