//! quizset configuration: per-category rules and ledger location.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::model::{Category, CategoryRule, RawRule};

/// Rules for every configured category.
pub type RuleSet = BTreeMap<Category, CategoryRule>;

/// Environment variable overriding `ledger_path`.
pub const LEDGER_ENV: &str = "QUIZSET_LEDGER";

/// Top-level quizset configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct QuizConfig {
    /// Quota rule per category.
    pub rules: RuleSet,
    /// Where the score ledger is persisted.
    pub ledger_path: PathBuf,
    /// Games a session plays before it ends on its own.
    pub games_per_session: u32,
}

impl QuizConfig {
    /// Rule for `category`; unconfigured categories select nothing.
    pub fn rule_for(&self, category: Category) -> CategoryRule {
        self.rules
            .get(&category)
            .copied()
            .unwrap_or_else(CategoryRule::zero)
    }
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            rules: default_rules(),
            ledger_path: default_ledger_path(),
            games_per_session: default_games_per_session(),
        }
    }
}

/// Built-in rules: `(budget, min_easy, min_medium, min_hard)` per category.
const DEFAULT_RULES: [(Category, CategoryRule); 3] = [
    (Category::Behavioral, builtin(6, 1, 1, 0)),
    (Category::Theoretical, builtin(9, 1, 1, 0)),
    (Category::Coding, builtin(9, 2, 2, 0)),
];

// Evaluated at compile time: an unsatisfiable built-in rule fails the build.
const fn builtin(budget: u32, min_easy: u32, min_medium: u32, min_hard: u32) -> CategoryRule {
    match CategoryRule::checked(budget, min_easy, min_medium, min_hard) {
        Some(rule) => rule,
        None => panic!("built-in rule minimums exceed the budget"),
    }
}

pub fn default_rules() -> RuleSet {
    DEFAULT_RULES.into_iter().collect()
}

fn default_ledger_path() -> PathBuf {
    PathBuf::from("./quizset-ledger.json")
}

fn default_games_per_session() -> u32 {
    1
}

/// On-disk shape of the config file.
#[derive(Debug, Deserialize)]
struct TomlConfig {
    #[serde(default)]
    rules: BTreeMap<String, RawRule>,
    #[serde(default)]
    ledger_path: Option<PathBuf>,
    #[serde(default)]
    games_per_session: Option<u32>,
}

/// Parse a TOML string into a `QuizConfig`.
///
/// Categories missing from `[rules]` keep their built-in rule. Any rule whose
/// minimums do not fit its budget fails the whole load.
pub fn parse_config_str(content: &str, source_path: &Path) -> Result<QuizConfig> {
    let parsed: TomlConfig = toml::from_str(content)
        .with_context(|| format!("failed to parse config: {}", source_path.display()))?;

    let mut config = QuizConfig::default();
    for (name, raw) in parsed.rules {
        let category: Category = name.parse().map_err(|e: String| anyhow::anyhow!("{}", e))?;
        let rule = CategoryRule::try_from(raw)
            .map_err(|e| e.for_category(category))
            .with_context(|| format!("in config {}", source_path.display()))?;
        config.rules.insert(category, rule);
    }
    if let Some(path) = parsed.ledger_path {
        config.ledger_path = path;
    }
    if let Some(games) = parsed.games_per_session {
        anyhow::ensure!(games >= 1, "games_per_session must be at least 1");
        config.games_per_session = games;
    }
    Ok(config)
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `quizset.toml` in the current directory
/// 2. `~/.config/quizset/config.toml`
///
/// `QUIZSET_LEDGER` overrides the ledger location.
pub fn load_config() -> Result<QuizConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<QuizConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("quizset.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            tracing::debug!("loaded config from {}", path.display());
            parse_config_str(&content, &path)?
        }
        None => QuizConfig::default(),
    };

    apply_env_overrides(&mut config, std::env::var(LEDGER_ENV).ok());
    Ok(config)
}

fn apply_env_overrides(config: &mut QuizConfig, ledger: Option<String>) {
    if let Some(ledger) = ledger.filter(|l| !l.trim().is_empty()) {
        config.ledger_path = PathBuf::from(ledger);
    }
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("quizset"))
}
