//! The `quizset validate` command.

use std::path::PathBuf;

use anyhow::Result;

use quizset_core::config::load_config_from;
use quizset_core::parser::{load_bank, validate_bank};

pub fn execute(bank_path: PathBuf, config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let bank = load_bank(&bank_path)?;

    println!("Question bank: {} ({} questions)", bank_path.display(), bank.len());

    let warnings = validate_bank(&bank, &config.rules);
    for w in &warnings {
        let prefix = w
            .question_id
            .map(|id| format!("  [{id}]"))
            .unwrap_or_else(|| "  ".to_string());
        println!("{prefix} WARNING: {}", w.message);
    }

    if warnings.is_empty() {
        println!("Question bank valid.");
    } else {
        println!("\n{} warning(s) found.", warnings.len());
    }

    Ok(())
}
