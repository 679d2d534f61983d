pub mod draw;
pub mod history;
pub mod init;
pub mod play;
pub mod score;
pub mod summary;
pub mod validate;

use std::path::Path;

use quizset_core::config::load_config_from;
use quizset_core::ledger::ScoreLedger;
use quizset_core::store::JsonFileScoreStore;

/// The file-backed ledger named by the active config.
pub(crate) fn open_ledger(config_path: Option<&Path>) -> anyhow::Result<ScoreLedger<JsonFileScoreStore>> {
    let config = load_config_from(config_path)?;
    tracing::debug!("using ledger at {}", config.ledger_path.display());
    Ok(ScoreLedger::new(JsonFileScoreStore::new(config.ledger_path)))
}
