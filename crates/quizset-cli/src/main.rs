//! quizset CLI: draw balanced question sets and keep a score ledger.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "quizset", version, about = "Difficulty-balanced quiz drawing and score ledger")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Draw question sets from a bank
    Draw {
        /// Path to a .toml question bank or a directory of banks
        #[arg(long)]
        bank: PathBuf,

        /// Only draw this category (behavioral, theoretical, coding)
        #[arg(long)]
        category: Option<String>,

        /// Seed for a reproducible draw
        #[arg(long)]
        seed: Option<u64>,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Play a session: deal games and record points read from stdin
    Play {
        /// User identifier
        #[arg(long)]
        user: String,

        /// Path to a .toml question bank or a directory of banks
        #[arg(long)]
        bank: PathBuf,

        /// Seed for reproducible deals
        #[arg(long)]
        seed: Option<u64>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Record points for a user's answer to a question
    Score {
        /// User identifier
        #[arg(long)]
        user: String,

        /// Question identifier
        #[arg(long)]
        question: u64,

        /// Points between 0 and 5
        #[arg(long, allow_negative_numbers = true)]
        points: i64,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Show the points history for a user and question
    History {
        /// User identifier
        #[arg(long)]
        user: String,

        /// Question identifier
        #[arg(long)]
        question: u64,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Summarize every score recorded for a user
    Summary {
        /// User identifier
        #[arg(long)]
        user: String,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Validate question bank TOML files
    Validate {
        /// Path to bank file or directory
        #[arg(long)]
        bank: PathBuf,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Create starter config and example question bank
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("quizset=info".parse().unwrap()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Draw {
            bank,
            category,
            seed,
            format,
            config,
        } => commands::draw::execute(bank, category, seed, format, config),
        Commands::Play {
            user,
            bank,
            seed,
            config,
        } => commands::play::execute(user, bank, seed, config),
        Commands::Score {
            user,
            question,
            points,
            config,
        } => commands::score::execute(user, question, points, config),
        Commands::History {
            user,
            question,
            config,
        } => commands::history::execute(user, question, config),
        Commands::Summary {
            user,
            format,
            config,
        } => commands::summary::execute(user, format, config),
        Commands::Validate { bank, config } => commands::validate::execute(bank, config),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
