//! TOML question bank parser.
//!
//! Loads question banks from TOML files and directories, and validates them
//! against the configured category rules.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::bank::QuestionBank;
use crate::config::RuleSet;
use crate::model::{Category, Difficulty, Question, QuestionId};

/// Intermediate TOML structure for parsing bank files.
#[derive(Debug, Deserialize)]
struct TomlBankFile {
    #[serde(default)]
    questions: Vec<TomlQuestion>,
}

#[derive(Debug, Deserialize)]
struct TomlQuestion {
    id: u64,
    category: String,
    difficulty: TomlDifficulty,
    text: String,
    #[serde(default)]
    answer: Option<String>,
    #[serde(default)]
    time_limits: Vec<u32>,
}

/// Difficulty may be written as its ordinal or its name.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TomlDifficulty {
    Ordinal(i64),
    Name(String),
}

impl TomlDifficulty {
    fn resolve(&self) -> Result<Difficulty> {
        match self {
            TomlDifficulty::Ordinal(n) => u8::try_from(*n)
                .ok()
                .and_then(Difficulty::from_ordinal)
                .ok_or_else(|| anyhow::anyhow!("difficulty must be 1, 2 or 3, got {n}")),
            TomlDifficulty::Name(s) => s.parse().map_err(|e: String| anyhow::anyhow!("{}", e)),
        }
    }
}

/// Parse a single TOML file into a `QuestionBank`.
pub fn parse_bank(path: &Path) -> Result<QuestionBank> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read question bank: {}", path.display()))?;

    parse_bank_str(&content, path)
}

/// Parse a TOML string into a `QuestionBank` (useful for testing).
pub fn parse_bank_str(content: &str, source_path: &Path) -> Result<QuestionBank> {
    let parsed: TomlBankFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let questions = parsed
        .questions
        .into_iter()
        .map(|q| {
            anyhow::ensure!(q.id != 0, "question ids start at 1 ({})", source_path.display());
            let category: Category = q
                .category
                .parse()
                .map_err(|e: String| anyhow::anyhow!("question {}: {}", q.id, e))?;
            let difficulty = q
                .difficulty
                .resolve()
                .with_context(|| format!("question {}", q.id))?;

            Ok(Question {
                id: QuestionId(q.id),
                category,
                difficulty,
                text: q.text,
                answer: q.answer,
                time_limits: q.time_limits,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let bank = QuestionBank::from_questions(questions)
        .with_context(|| format!("in question bank {}", source_path.display()))?;
    Ok(bank)
}

/// Load a bank from a file, or merge every `.toml` bank under a directory.
///
/// Unparseable files in a directory are skipped with a warning; an id that
/// appears in two files is an error.
pub fn load_bank(path: &Path) -> Result<QuestionBank> {
    if !path.is_dir() {
        return parse_bank(path);
    }

    let mut merged = QuestionBank::new();
    for file in collect_bank_files(path)? {
        match parse_bank(&file) {
            Ok(bank) => {
                for q in bank.iter() {
                    merged
                        .insert(Question::clone(q))
                        .with_context(|| format!("merging {}", file.display()))?;
                }
            }
            Err(e) => {
                tracing::warn!("skipping {}: {:#}", file.display(), e);
            }
        }
    }
    Ok(merged)
}

fn collect_bank_files(dir: &Path) -> Result<Vec<std::path::PathBuf>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
    {
        let path = entry?.path();
        if path.is_dir() {
            files.extend(collect_bank_files(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// A warning from bank validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The question ID (if applicable).
    pub question_id: Option<QuestionId>,
    /// Warning message.
    pub message: String,
}

/// Validate a bank for common issues.
pub fn validate_bank(bank: &QuestionBank, rules: &RuleSet) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    for q in bank.iter() {
        if q.text.trim().is_empty() {
            warnings.push(ValidationWarning {
                question_id: Some(q.id),
                message: "question text is empty".into(),
            });
        }
        if q.time_limits.iter().any(|&t| t == 0) {
            warnings.push(ValidationWarning {
                question_id: Some(q.id),
                message: "time limit of 0 seconds".into(),
            });
        }
    }

    // Selection degrades gracefully, but a short tier is usually a bank mistake.
    for (&category, rule) in rules {
        for difficulty in Difficulty::ALL {
            let wanted = rule.min_for(difficulty) as usize;
            let available = bank.count(category, difficulty);
            if available < wanted {
                warnings.push(ValidationWarning {
                    question_id: None,
                    message: format!(
                        "{category}/{difficulty}: rule wants {wanted} but the bank has {available}"
                    ),
                });
            }
        }
    }

    warnings
}
