use clap::error::ErrorKind;
use clap::{CommandFactory, Parser, Subcommand};
use std::io;
use std::process::ExitCode;
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

use gatop::commands::CommandHandler;
use gatop::config::{with_trailing_separator, Config};
use gatop::error::CommandError;
use gatop::logging;
use gatop::output::{ConsoleOutput, Output};
use gatop::reporting::GoogleConnector;
use gatop::store::FileSettingsStore;

#[derive(Parser)]
#[command(name = "gatop")]
#[command(about = "Show the most viewed pages from Google Analytics over the last seven days")]
#[command(version)]
#[command(arg_required_else_help = true)]
struct Cli {
    /// Configure the service account JSON file path (same as `gatop configure`)
    #[arg(long)]
    configure: bool,

    /// Root directory that the configured key path is relative to
    #[arg(long, global = true, value_name = "DIR")]
    base_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Configure the service account JSON file path
    Configure,
    /// Fetch the top 5 pages by views from Google Analytics
    Fetch {
        /// The Google Analytics View ID
        #[arg(long = "view-id", value_name = "VIEW_ID", num_args = 0..=1, default_missing_value = "")]
        view_id: Option<String>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let output = ConsoleOutput;

    let command = match (cli.configure, cli.command) {
        (true, _) => Commands::Configure,
        (false, Some(command)) => command,
        (false, None) => Cli::command()
            .error(
                ErrorKind::MissingSubcommand,
                "an operation is required: `configure` (or `--configure`) or `fetch`",
            )
            .exit(),
    };

    let mut config = match Config::load() {
        Ok(config) => config,
        Err(e) => return handle_error(&output, &format!("{:#}", e)),
    };
    if let Some(base_path) = &cli.base_path {
        config.paths.base_path = with_trailing_separator(base_path);
    }

    let _guard = logging::init_logging(&config);
    if let Some(source) = &config.source {
        info!(config_file = %source.display(), "Loaded configuration from file");
    }

    let span = info_span!("gatop", invocation_id = %Uuid::new_v4());
    match run(command, &config, &output).instrument(span).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => handle_error(&output, &e.to_string()),
    }
}

async fn run(command: Commands, config: &Config, output: &ConsoleOutput) -> Result<(), CommandError> {
    let store = FileSettingsStore::new(&config.paths.settings_file);
    let connector = GoogleConnector::new(&config.reporting);
    let handler = CommandHandler::new(&store, &connector, output, config.paths.base_path.clone());

    info!(settings = %store.path().display(), base_path = %handler.base_path(), "Dispatching command");

    match command {
        Commands::Configure => {
            let stdin = io::stdin();
            handler.configure(stdin.lock(), io::stdout())
        }
        Commands::Fetch { view_id } => handler.fetch(view_id.as_deref()).await,
    }
}

fn handle_error(output: &dyn Output, message: &str) -> ExitCode {
    output.error(message);
    ExitCode::FAILURE
}
