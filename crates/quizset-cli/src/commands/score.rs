//! The `quizset score` command.

use std::path::PathBuf;

use anyhow::Result;

use quizset_core::model::QuestionId;

pub fn execute(user: String, question: u64, points: i64, config_path: Option<PathBuf>) -> Result<()> {
    let ledger = super::open_ledger(config_path.as_deref())?;
    let entry = ledger.append_points(&user, QuestionId(question), points)?;

    println!(
        "Recorded {points} point(s) for {} (attempt {})",
        entry.key,
        entry.attempts()
    );
    println!("History: {}", format_history(&entry.points));
    Ok(())
}

pub(crate) fn format_history(points: &[u8]) -> String {
    let values: Vec<String> = points.iter().map(|p| p.to_string()).collect();
    format!("[{}]", values.join(", "))
}
