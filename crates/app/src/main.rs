mod terminal;

use std::io;

use clap::Parser;
use drill_core::DrillConfig;
use drill_core::model::{Difficulty, Operation};
use services::{AppState, AuthUser, Clock};
use tracing_subscriber::EnvFilter;

use crate::terminal::TerminalHost;

/// Arithmetic drill for the terminal: ten problems per set.
#[derive(Debug, Parser)]
#[command(name = "drill", version, about)]
struct Cli {
    /// Difficulty tier: easy (1-3), medium (sum <= 9), hard (1-9)
    #[arg(short, long, env = "DRILL_DIFFICULTY")]
    difficulty: Option<Difficulty>,

    /// addition or subtraction (defaults to addition when a difficulty is given)
    #[arg(short, long, env = "DRILL_OPERATION")]
    operation: Option<Operation>,

    /// Seed for reproducible problem sets
    #[arg(long, env = "DRILL_SEED")]
    seed: Option<u64>,

    /// Signed-in email shown in the header; omit to play as a guest
    #[arg(long, env = "DRILL_EMAIL")]
    email: Option<String>,
}

impl Cli {
    fn preset(&self) -> Option<DrillConfig> {
        match (self.difficulty, self.operation) {
            (None, None) => None,
            (difficulty, operation) => Some(DrillConfig::new(
                difficulty.unwrap_or(Difficulty::Easy),
                operation.unwrap_or(Operation::Addition),
            )),
        }
    }

    fn user(&self) -> AuthUser {
        match self.email.as_deref().map(str::trim) {
            Some(email) if !email.is_empty() => AuthUser::SignedIn {
                email: email.to_string(),
            },
            _ => AuthUser::Guest,
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let mut app = AppState::new();
    let user = cli.user();
    tracing::info!(user = user.display_name(), seed = ?cli.seed, "starting drill");
    app.sign_in(user);

    let stdin = io::stdin();
    let mut host = TerminalHost::new(stdin.lock(), io::stdout(), app, Clock::System, cli.seed);
    host.run(cli.preset())?;

    tracing::info!(solved = host.app().problems_solved(), "drill finished");
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    if let Err(err) = run(&cli) {
        eprintln!("{err:#}");
        std::process::exit(2);
    }
}
