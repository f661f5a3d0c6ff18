mod commands;
mod error;
mod transport;
mod var_spec;

use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use cloudlab::identity::StaticIdentity;
use cloudlab::workflow::VariableDraft;
use cloudlab::{ApiConfig, ExperimentClient, Goal, Session};
use tracing_subscriber::EnvFilter;

use crate::commands::CreateArgs;
use crate::error::CliError;
use crate::transport::ReqwestTransport;
use crate::var_spec::parse_var_spec;

#[derive(Parser, Debug)]
#[command(name = "cloudlab-cli", about = "CloudLab experiment API CLI")]
struct Cli {
    /// Experiment API base URL; the deployed API when unset.
    #[arg(long, env = "CLOUDLAB_API_URL")]
    api_url: Option<String>,

    /// User the experiments belong to. Required by `create` and `list`.
    #[arg(long, env = "CLOUDLAB_USER_ID")]
    user_id: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Save a new experiment.
    Create(CreateCommand),
    /// List the user's experiments.
    List,
    /// Print one experiment with its current population.
    Show { experiment_id: String },
    /// Delete an experiment.
    Delete {
        experiment_id: String,
        /// Skip the confirmation prompt.
        #[arg(long, default_value_t = false)]
        yes: bool,
    },
    /// Submit fitness scores for the current generation and print the next one.
    Advance {
        experiment_id: String,
        /// One score per population row, in row order. Omit for an empty
        /// population.
        #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
        scores: Vec<String>,
    },
}

#[derive(Args, Debug)]
struct CreateCommand {
    #[arg(long)]
    name: String,

    #[arg(long, default_value = "minimize")]
    goal: Goal,

    #[arg(long)]
    population_size: String,

    /// `name:continuous:min:max[:interval]` or `name:discrete:v1|v2|v3`.
    #[arg(long = "var", value_parser = parse_var_spec, allow_hyphen_values = true)]
    variables: Vec<VariableDraft>,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error: {error}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let config = ApiConfig::from_override(cli.api_url.as_deref())?;
    tracing::debug!(base_url = config.base_url(), "using experiment API");
    let client = ExperimentClient::new(ReqwestTransport::new(config));

    match cli.command {
        Command::Create(args) => {
            let session = resolve_session(cli.user_id).await;
            let args = CreateArgs {
                name: args.name,
                goal: args.goal,
                population_size: args.population_size,
                variables: args.variables,
            };
            commands::run_create(&client, &session, args).await
        }
        Command::List => {
            let session = resolve_session(cli.user_id).await;
            commands::run_list(&client, &session).await
        }
        Command::Show { experiment_id } => commands::run_show(&client, &experiment_id).await,
        Command::Delete { experiment_id, yes } => commands::run_delete(&client, &experiment_id, yes).await,
        Command::Advance { experiment_id, scores } => commands::run_advance(&client, &experiment_id, &scores).await,
    }
}

async fn resolve_session(user_id: Option<String>) -> Session {
    let mut session = Session::default();
    session.resolve(&StaticIdentity::new(user_id)).await;
    session
}
