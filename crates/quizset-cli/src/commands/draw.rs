//! The `quizset draw` command.

use std::path::PathBuf;

use anyhow::Result;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;

use quizset_core::config::load_config_from;
use quizset_core::model::{Category, CategoryRule, Question, QuestionSet};
use quizset_core::parser::load_bank;
use quizset_core::selection::select_with_rng;
use quizset_core::session::Game;

/// JSON view of one drawn set.
#[derive(Serialize)]
struct DrawnSet<'a> {
    category: Category,
    rule: CategoryRule,
    weight: u32,
    questions: Vec<&'a Question>,
}

pub fn execute(
    bank_path: PathBuf,
    category: Option<String>,
    seed: Option<u64>,
    format: String,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let bank = load_bank(&bank_path)?;

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let sets: Vec<QuestionSet> = match category {
        Some(name) => {
            let category: Category = name.parse().map_err(|e: String| anyhow::anyhow!("{}", e))?;
            vec![select_with_rng(
                category,
                &config.rule_for(category),
                &bank,
                &mut rng,
            )]
        }
        None => Game::deal(1, &config.rules, &bank, &mut rng).sets().to_vec(),
    };

    match format.as_str() {
        "json" => {
            let view: Vec<DrawnSet> = sets
                .iter()
                .map(|set| DrawnSet {
                    category: set.category,
                    rule: set.rule,
                    weight: set.total_weight(),
                    questions: set.iter().map(|q| q.as_ref()).collect(),
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&view)?);
        }
        _ => {
            for set in &sets {
                print_set(set);
            }
        }
    }

    Ok(())
}

fn print_set(set: &QuestionSet) {
    use comfy_table::{Cell, Table};

    println!(
        "{}: rule {}, {} question(s), weight {}",
        set.category,
        set.rule,
        set.len(),
        set.total_weight()
    );
    if set.is_empty() {
        println!();
        return;
    }

    let mut questions: Vec<&Question> = set.iter().map(|q| q.as_ref()).collect();
    questions.sort_by_key(|q| (q.difficulty, q.id));

    let mut table = Table::new();
    table.set_header(vec!["ID", "Difficulty", "Question"]);
    for q in questions {
        table.add_row(vec![
            Cell::new(q.id),
            Cell::new(q.difficulty),
            Cell::new(&q.text),
        ]);
    }
    println!("{table}\n");
}
