use anyhow::bail;
use clap::{Parser, Subcommand};
use core::time::Duration;
use gridid_tonic_core::ConnectionConfig;
use gridid_tonic_core::gridid::{ClientConfig, Diagnostics, PROTOCOL_VERSION};

/// Command-line arguments for the `gridid` binary.
///
/// Every option can also be supplied through the environment (or a `.env`
/// file in the working directory).
#[derive(Parser, Debug, Clone)]
#[command(
    name = "gridid",
    version,
    about = "Allocate and resolve cross-cluster job ids against a directory service"
)]
pub struct CliArgs {
    /// gRPC endpoint of the directory service.
    ///
    /// Environment variable: `GRIDID_ENDPOINT`
    #[arg(long, env = "GRIDID_ENDPOINT", default_value_t = String::from("http://127.0.0.1:50061"))]
    pub endpoint: String,

    /// Per-request deadline in milliseconds. `0` disables it.
    ///
    /// Environment variable: `GRIDID_TIMEOUT_MS`
    #[arg(long, env = "GRIDID_TIMEOUT_MS", default_value_t = 10_000)]
    pub timeout_ms: u64,

    /// Deadline for establishing the connection, in milliseconds. `0`
    /// disables it.
    ///
    /// Environment variable: `GRIDID_CONNECT_TIMEOUT_MS`
    #[arg(long, env = "GRIDID_CONNECT_TIMEOUT_MS", default_value_t = 5_000)]
    pub connect_timeout_ms: u64,

    /// Protocol version stamped on each request.
    ///
    /// Environment variable: `GRIDID_PROTOCOL_VERSION`
    #[arg(long, env = "GRIDID_PROTOCOL_VERSION", default_value_t = PROTOCOL_VERSION)]
    pub protocol_version: u16,

    /// Log the outcome of every exchange with the directory.
    ///
    /// Environment variable: `GRIDID_DIAGNOSTICS`
    #[arg(short, long, env = "GRIDID_DIAGNOSTICS", default_value_t = false)]
    pub diagnostics: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Ask the directory to resend the full cluster table.
    Refresh,
    /// Allocate one cross-cluster job id and print it.
    Allocate,
    /// Print the index of the cluster that owns JOB_ID.
    Resolve {
        /// A previously allocated cross-cluster job id.
        job_id: u32,
    },
}

#[derive(Debug, Clone)]
pub struct CliConfig {
    pub connection: ConnectionConfig,
    pub client: ClientConfig,
    pub command: Command,
}

impl TryFrom<CliArgs> for CliConfig {
    type Error = anyhow::Error;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        if !(args.endpoint.starts_with("http://") || args.endpoint.starts_with("https://")) {
            bail!(
                "GRIDID_ENDPOINT ({}) must start with http:// or https://",
                args.endpoint
            );
        }

        if args.protocol_version == 0 {
            bail!("GRIDID_PROTOCOL_VERSION must be greater than 0");
        }

        let mut connection = ConnectionConfig::new(args.endpoint);
        if args.timeout_ms > 0 {
            connection = connection.with_timeout(Duration::from_millis(args.timeout_ms));
        }
        if args.connect_timeout_ms > 0 {
            connection =
                connection.with_connect_timeout(Duration::from_millis(args.connect_timeout_ms));
        }

        let client = ClientConfig::default()
            .with_protocol_version(args.protocol_version)
            .with_diagnostics(Diagnostics::from(args.diagnostics));

        Ok(Self {
            connection,
            client,
            command: args.command,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> anyhow::Result<CliConfig> {
        let args = CliArgs::try_parse_from(core::iter::once("gridid").chain(args.iter().copied()))?;
        CliConfig::try_from(args)
    }

    #[test]
    fn parses_subcommands() {
        assert_eq!(parse(&["refresh"]).unwrap().command, Command::Refresh);
        assert_eq!(parse(&["allocate"]).unwrap().command, Command::Allocate);
        assert_eq!(
            parse(&["resolve", "42"]).unwrap().command,
            Command::Resolve { job_id: 42 }
        );
        assert!(parse(&["resolve"]).is_err());
        assert!(parse(&["resolve", "-1"]).is_err());
    }

    #[test]
    fn builds_connection_and_client_config() {
        let config = parse(&[
            "--endpoint",
            "http://directory:9000",
            "--timeout-ms",
            "250",
            "--connect-timeout-ms",
            "0",
            "--protocol-version",
            "3",
            "--diagnostics",
            "allocate",
        ])
        .unwrap();
        assert_eq!(config.connection.endpoint, "http://directory:9000");
        assert_eq!(config.connection.timeout, Some(Duration::from_millis(250)));
        assert_eq!(config.connection.connect_timeout, None);
        assert_eq!(config.client.protocol_version, 3);
        assert!(config.client.diagnostics.is_enabled());
    }

    #[test]
    fn rejects_endpoint_without_scheme() {
        let err = parse(&["--endpoint", "directory:9000", "allocate"]).unwrap_err();
        assert!(err.to_string().contains("http://"));
    }

    #[test]
    fn rejects_zero_protocol_version() {
        assert!(parse(&["--protocol-version", "0", "refresh"]).is_err());
    }
}
