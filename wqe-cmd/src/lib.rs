//! Command implementations for the water quality evaluator CLI.
//!
//! Provides subcommands for submitting measurements to the evaluation
//! service and for listing the parameters it understands.

use clap::Subcommand;
use wqe_core::ClientConfig;

pub mod error;
pub mod evaluate;
pub mod input;
pub mod parameters;
pub mod present;

#[derive(Subcommand)]
pub enum Command {
    /// Submit measurements and show the score, report and chart
    Evaluate {
        /// Measurement as KEY=VALUE, e.g. `--set pH=7.2` (repeatable)
        #[arg(short = 's', long = "set", value_name = "KEY=VALUE")]
        set: Vec<String>,

        /// CSV file of `parameter,value` rows
        #[arg(short = 'i', long)]
        input: Option<String>,

        /// Prompt for each parameter before submitting
        #[arg(long)]
        interactive: bool,

        /// Output path for the chart image
        #[arg(short = 'g', long, default_value = "evaluation.png")]
        graph: String,

        /// Print the raw result as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the measurement parameters and their wire keys
    Parameters,
}

pub async fn run(command: Command, config: ClientConfig) -> anyhow::Result<()> {
    match command {
        Command::Evaluate {
            set,
            input,
            interactive,
            graph,
            json,
        } => {
            let options = evaluate::EvaluateOptions {
                set,
                input,
                interactive,
                graph,
                json,
            };
            evaluate::run_evaluate(config, options).await
        }
        Command::Parameters => parameters::run_parameters(),
    }
}
