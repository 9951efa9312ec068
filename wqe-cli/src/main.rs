//! WQE CLI - Command line client for the water quality evaluation service.

use clap::Parser;
use log::debug;
use std::time::Duration;
use wqe_core::client::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};

#[derive(Parser)]
#[command(
    name = "wqe",
    version,
    about = "Water quality evaluation client"
)]
struct Cli {
    /// Base URL of the evaluation service
    #[arg(long, env = "WQE_URL", default_value = DEFAULT_BASE_URL, global = true)]
    url: String,

    /// Request timeout in seconds
    #[arg(long, env = "WQE_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS, global = true)]
    timeout_secs: u64,

    #[command(subcommand)]
    command: wqe_cmd::Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let config = ClientConfig {
        base_url: cli.url,
        timeout: Duration::from_secs(cli.timeout_secs),
    };
    debug!("Using {:?}", config);
    wqe_cmd::run(cli.command, config).await
}

#[cfg(test)]
mod tests {
    use super::Cli;
    use clap::{CommandFactory, Parser};

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_evaluate() {
        let cli = Cli::try_parse_from([
            "wqe",
            "evaluate",
            "--set",
            "pH=7.2",
            "-s",
            "Iron=0.1",
            "--url",
            "http://10.0.0.5:8000",
        ])
        .unwrap();
        assert_eq!(cli.url, "http://10.0.0.5:8000");
        match cli.command {
            wqe_cmd::Command::Evaluate { set, graph, .. } => {
                assert_eq!(set, vec!["pH=7.2", "Iron=0.1"]);
                assert_eq!(graph, "evaluation.png");
            }
            wqe_cmd::Command::Parameters => panic!("expected evaluate"),
        }
    }
}
