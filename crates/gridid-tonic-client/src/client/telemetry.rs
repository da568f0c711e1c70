//! Log output for the `gridid` binary.
//!
//! Events are written to stderr so stdout carries only command results. The
//! filter is taken from `RUST_LOG` and defaults to `info`; diagnostic events
//! from the directory calls use the `gridid::diag` target, so
//! `RUST_LOG=gridid::diag=info,warn` isolates them.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

pub fn init_telemetry() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_thread_ids(true)
                .with_line_number(true)
                .with_target(true)
                .with_timer(tracing_subscriber::fmt::time::ChronoLocal::rfc_3339())
                .with_file(true),
        )
        .try_init()?;
    Ok(())
}
