//! The `quizset summary` command.

use std::path::PathBuf;

use anyhow::Result;

pub fn execute(user: String, format: String, config_path: Option<PathBuf>) -> Result<()> {
    let ledger = super::open_ledger(config_path.as_deref())?;
    let summary = ledger.summary(&user)?;

    match format.as_str() {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        _ => {
            if summary.attempts == 0 {
                println!("No scores recorded for {}.", summary.user_id);
                return Ok(());
            }

            use comfy_table::{Cell, Table};

            let mut table = Table::new();
            table.set_header(vec!["Question", "Attempts", "Latest", "Best", "Mean"]);
            for (id, stats) in &summary.per_question {
                table.add_row(vec![
                    Cell::new(id),
                    Cell::new(stats.attempts),
                    Cell::new(stats.latest),
                    Cell::new(stats.best),
                    Cell::new(format!("{:.2}", stats.mean)),
                ]);
            }

            println!("{table}");
            println!(
                "{}: {} question(s), {} attempt(s), {} point(s), mean {:.2}",
                summary.user_id,
                summary.questions_attempted,
                summary.attempts,
                summary.total_points,
                summary.mean_points
            );
        }
    }
    Ok(())
}
