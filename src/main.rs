use activity_board::api::HttpActivityApi;
use activity_board::board::{Board, Outcome, SignupForm};
use activity_board::config::Config;
use activity_board::error::Result as BoardResult;
use activity_board::feedback::BannerKind;
use activity_board::{interactive, logging, render};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::{self, Write};
use std::process;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "activity-board")]
#[command(about = "Browse, join and leave school activities", long_about = None)]
#[command(version = concat!(env!("CARGO_PKG_VERSION"), " (built ", env!("BUILD_DATE"), ")"))]
struct Cli {
    /// Base URL of the activities API (overrides ACTIVITY_BOARD_URL and the config file)
    #[arg(short = 'u', long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print every activity with its participants
    List,
    /// Sign a student up for an activity
    Signup {
        /// Student email
        #[arg(short, long)]
        email: String,

        /// Activity name
        #[arg(short, long)]
        activity: String,
    },
    /// Remove a student from an activity
    Unregister {
        /// Student email
        #[arg(short, long)]
        email: String,

        /// Activity name
        #[arg(short, long)]
        activity: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
    /// Store the API base URL in the config file
    Config {
        /// Base URL to save, e.g. http://localhost:8000
        url: String,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        None => {
            // stdout belongs to the terminal UI
            if let Err(e) = logging::init_with_file("activity-board.log") {
                eprintln!("Warning: file logging unavailable: {}", e);
            }
            let config =
                Config::resolve(cli.base_url).context("Failed to resolve the API base URL")?;
            tracing::info!(base_url = %config.base_url, "starting interactive board");
            interactive::run_interactive(&config)
                .await
                .context("Interactive session failed")
        }
        Some(command) => {
            logging::init();
            let config =
                Config::resolve(cli.base_url).context("Failed to resolve the API base URL")?;
            let api = HttpActivityApi::new(config.base_url.clone())?;
            let mut board = Board::new(Arc::new(api));
            run_command(&mut board, command)
                .await
                .context("Command failed")
        }
    }
}

async fn run_command(board: &mut Board, command: Commands) -> BoardResult<()> {
    match command {
        Commands::List => {
            board.load_catalog().await;
            print!("{}", render::to_text(board.view()));
        }
        Commands::Signup { email, activity } => {
            let mut form = SignupForm::new(email, activity);
            board.sign_up(&mut form).await;
            print_banner(board);
        }
        Commands::Unregister {
            email,
            activity,
            yes,
        } => {
            let outcome = if yes {
                board.unregister(&activity, &email, &mut |_: &str| true).await
            } else {
                board.unregister(&activity, &email, &mut prompt_yes_no).await
            };
            match outcome {
                Outcome::Cancelled => println!("Cancelled."),
                Outcome::Ignored => println!("Both --email and --activity must be non-empty."),
                _ => print_banner(board),
            }
        }
        Commands::Config { url } => {
            let config = Config::new(url)?;
            let path = config.save()?;
            println!("Saved base URL {} to {}", config.base_url, path.display());
        }
    }
    Ok(())
}

fn print_banner(board: &Board) {
    if let (Some(kind), Some(text)) = (board.banner().kind(), board.banner().text()) {
        match kind {
            BannerKind::Success => println!("✅ {}", text),
            BannerKind::Error => println!("❌ {}", text),
        }
    }
}

/// Ask on stdin; anything but "y" declines
fn prompt_yes_no(prompt: &str) -> bool {
    print!("{} (y/N) ", prompt);
    if io::stdout().flush().is_err() {
        return false;
    }

    let mut answer = String::new();
    match io::stdin().read_line(&mut answer) {
        Ok(_) => answer.trim().eq_ignore_ascii_case("y"),
        Err(e) => {
            tracing::warn!(error = %e, "could not read confirmation");
            false
        }
    }
}
