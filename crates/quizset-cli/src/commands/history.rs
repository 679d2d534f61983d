//! The `quizset history` command.

use std::path::PathBuf;

use anyhow::Result;

use quizset_core::model::QuestionId;
use quizset_core::statistics::EntryStats;

use super::score::format_history;

pub fn execute(user: String, question: u64, config_path: Option<PathBuf>) -> Result<()> {
    let ledger = super::open_ledger(config_path.as_deref())?;
    let history = ledger.history(&user, QuestionId(question))?;

    println!("History: {}", format_history(&history));
    match EntryStats::from_history(&history) {
        Some(stats) => println!(
            "{} attempt(s), latest {}, best {}, mean {:.2}",
            stats.attempts, stats.latest, stats.best, stats.mean
        ),
        None => println!("No scores recorded yet."),
    }
    Ok(())
}
