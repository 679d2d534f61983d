//! The `quizset play` command.
//!
//! Deals `games_per_session` games for one player and reads the points for
//! each asked question from stdin, one value per line. `q` or end of input
//! ends the session early.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Result;
use rand::rngs::StdRng;
use rand::SeedableRng;

use quizset_core::config::{load_config_from, QuizConfig};
use quizset_core::ledger::ScoreLedger;
use quizset_core::model::Question;
use quizset_core::parser::load_bank;
use quizset_core::session::SessionContext;
use quizset_core::store::JsonFileScoreStore;
use quizset_core::traits::{QuestionRepository, ScoreStore};

use super::score::format_history;

pub fn execute(
    user: String,
    bank_path: PathBuf,
    seed: Option<u64>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let bank = load_bank(&bank_path)?;
    let ledger = ScoreLedger::new(JsonFileScoreStore::new(config.ledger_path.clone()));
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut session = SessionContext::new(&user)?;
    run_session(
        &mut session,
        &config,
        &bank,
        &ledger,
        &mut rng,
        &mut stdin.lock(),
        &mut stdout.lock(),
    )
}

/// What the player typed for one question.
enum Answer {
    Points(i64),
    Quit,
}

fn run_session<R, S>(
    session: &mut SessionContext,
    config: &QuizConfig,
    bank: &R,
    ledger: &ScoreLedger<S>,
    rng: &mut StdRng,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> Result<()>
where
    R: QuestionRepository,
    S: ScoreStore,
{
    'games: while session.wants_more(config.games_per_session) {
        let mut game = session.deal_game(&config.rules, bank, rng);
        writeln!(out, "Game {} ({} question(s))", game.number, game.remaining())?;

        while let Some((category, question)) = game.next_question(rng) {
            writeln!(out, "[{category}] #{}: {}", question.id, question.text)?;
            loop {
                let points = match read_answer(input, out)? {
                    Answer::Quit => {
                        session.quit();
                        break 'games;
                    }
                    Answer::Points(points) => points,
                };
                match session.record(ledger, question.id, points) {
                    Ok(entry) => {
                        writeln!(out, "History: {}", format_history(&entry.points))?;
                        show_answer(&question, out)?;
                        break;
                    }
                    Err(e) if e.is_input_error() => writeln!(out, "{e}")?,
                    Err(e) => return Err(e.into()),
                }
            }
        }
        session.finish_game();
    }

    writeln!(
        out,
        "Session over: {} game(s) played.",
        session.games_played
    )?;
    Ok(())
}

fn read_answer(input: &mut impl BufRead, out: &mut impl Write) -> Result<Answer> {
    loop {
        write!(out, "Points (0-5, q to quit): ")?;
        out.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            writeln!(out)?;
            return Ok(Answer::Quit);
        }
        let line = line.trim();
        if line.eq_ignore_ascii_case("q") {
            return Ok(Answer::Quit);
        }
        match line.parse::<i64>() {
            Ok(points) => return Ok(Answer::Points(points)),
            Err(_) => writeln!(out, "Not a number: {line:?}")?,
        }
    }
}

fn show_answer(question: &Question, out: &mut impl Write) -> io::Result<()> {
    match &question.answer {
        Some(answer) => writeln!(out, "Answer: {answer}"),
        None => Ok(()),
    }
}
