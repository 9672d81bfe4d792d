mod cli_messages;
mod commands;
mod config;
mod consts;
mod environment;
mod error_classifier;
mod events;
mod ledger;
mod logging;
mod model;
mod selector;
mod session;
mod store;
mod submission;
mod ui;
mod view;
mod workers;

use crate::config::{Config, get_config_path};
use crate::environment::Environment;
use crate::ledger::LedgerClient;
use crate::session::{run_headless_mode, run_tui_mode, setup_session};
use crate::view::RESET_PROMPT;
use clap::{ArgGroup, Parser, Subcommand};
use std::error::Error;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
/// Command-line arguments
struct Args {
    /// Base URL of the ledger service, or `local` for http://127.0.0.1:5000
    #[arg(long, global = true, env = "VOTECHAIN_LEDGER_URL", value_name = "URL")]
    ledger_url: Option<String>,

    /// Path to the config file. Defaults to ~/.votechain/config.json
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Command to execute
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Start the live dashboard
    Start {
        /// Print events to the console instead of drawing the dashboard
        #[arg(long, action = clap::ArgAction::SetTrue)]
        headless: bool,

        /// Paint a dark background behind the dashboard
        #[arg(long, action = clap::ArgAction::SetTrue)]
        with_background: bool,
    },
    /// Cast a single vote and exit
    #[command(group(ArgGroup::new("choice").required(true).args(["yes", "no"])))]
    Vote {
        /// Vote YES
        #[arg(long)]
        yes: bool,

        /// Vote NO
        #[arg(long)]
        no: bool,

        /// Account to vote from. Defaults to the first account that has not voted.
        #[arg(long, value_name = "ADDRESS")]
        account: Option<String>,
    },
    /// Reset the voting session
    Reset {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Print the current results, accounts and voters
    Status,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let config_path = match &args.config {
        Some(path) => path.clone(),
        None => get_config_path()?,
    };
    let config = Config::load_or_default(&config_path)
        .map_err(|e| format!("Failed to load config {}: {}", config_path.display(), e))?;
    config.validate()?;

    let environment = match &args.ledger_url {
        Some(url) => url.parse::<Environment>()?,
        None => config.environment()?,
    };

    match args.command {
        Command::Start {
            headless,
            with_background,
        } => {
            let session = setup_session(&config, environment)?;
            if headless {
                run_headless_mode(session).await
            } else {
                run_tui_mode(session, with_background).await
            }
        }
        Command::Vote { yes, account, .. } => {
            logging::init_stderr_logger();
            let ledger = LedgerClient::new(environment.clone())?;
            commands::cast_vote(&ledger, environment, yes, account.as_deref()).await?;
            Ok(())
        }
        Command::Reset { yes } => {
            logging::init_stderr_logger();
            let confirmed = yes || confirm_on_stdin(RESET_PROMPT)?;
            let ledger = LedgerClient::new(environment.clone())?;
            commands::reset_votes(&ledger, environment, confirmed).await?;
            Ok(())
        }
        Command::Status => {
            logging::init_stderr_logger();
            let ledger = LedgerClient::new(environment.clone())?;
            commands::print_status(&ledger, environment).await;
            Ok(())
        }
    }
}

/// Asks a yes/no question on stdin. Anything but `y` or `yes` is a no.
fn confirm_on_stdin(question: &str) -> io::Result<bool> {
    print!("{} [y/N] ", question);
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(
        answer.trim().to_ascii_lowercase().as_str(),
        "y" | "yes"
    ))
}
