use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use fundscope::core::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl From<Commands> for fundscope::AppCommand {
    fn from(cmd: Commands) -> fundscope::AppCommand {
        match cmd {
            Commands::List { search } => fundscope::AppCommand::List { search },
            Commands::Detail { id, window } => fundscope::AppCommand::Detail { id, window },
            Commands::Simulate {
                id,
                strategy,
                amount,
                window,
            } => fundscope::AppCommand::Simulate {
                id,
                strategy,
                amount,
                window,
            },
            Commands::Chart { id, metric, window } => {
                fundscope::AppCommand::Chart { id, metric, window }
            }
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// List funds with their risk level
    List {
        /// Only show funds whose name contains this text
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Show metrics, risk score and history for a fund
    Detail {
        id: u64,
        /// History window: 1m, 3m, 1y, 3y or 5y
        #[arg(short, long)]
        window: Option<String>,
    },
    /// Simulate a lumpsum or SIP investment over the fund's history
    Simulate {
        id: u64,
        /// lumpsum or sip
        #[arg(short, long)]
        strategy: Option<String>,
        /// Amount invested once (lumpsum) or every month (sip)
        #[arg(short, long)]
        amount: Option<f64>,
        #[arg(short, long)]
        window: Option<String>,
    },
    /// Show a single metric of the fund's history
    Chart {
        id: u64,
        /// nav, aum or std_deviation
        #[arg(short, long, default_value = "nav")]
        metric: String,
        #[arg(short, long)]
        window: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => match cli.config_path.as_deref() {
            Some(path) => fundscope::cli::setup::setup_at_path(path),
            None => fundscope::cli::setup::setup(),
        },
        Some(cmd) => fundscope::run_command(cmd.into(), cli.config_path.as_deref()).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
