//! Terminal flashcards runner: wires the embedded dictionary, the JSON
//! progress store, and stdin answers into a study session.

mod dictionary;
mod store;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Context;
use chrono::Utc;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use vocab_core::{DictionaryProvider, ProgressStore, QuestionLanguage, StudySession};

use crate::dictionary::EmbeddedDictionary;
use crate::store::JsonProgressStore;

#[derive(Parser)]
#[command(
    name = "vocab-trainer",
    about = "English-Hebrew flashcards with spaced repetition",
    version
)]
struct Cli {
    /// Data directory for progress and settings (default: per-user data dir)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Number of answer choices per round (2-6)
    #[arg(long)]
    choices: Option<u8>,

    /// Which side of the word pair is shown as the question
    #[arg(long, value_enum)]
    lang: Option<LangArg>,

    /// Reset all saved progress before starting
    #[arg(long)]
    reset: bool,

    /// Stop after this many rounds (default: run until `q`)
    #[arg(long)]
    rounds: Option<usize>,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
enum LangArg {
    /// Ask in English, answer in Hebrew
    Primary,
    /// Ask in Hebrew, answer in English
    Secondary,
}

impl From<LangArg> for QuestionLanguage {
    fn from(value: LangArg) -> Self {
        match value {
            LangArg::Primary => Self::Primary,
            LangArg::Secondary => Self::Secondary,
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let data_dir = cli.data_dir.unwrap_or_else(|| {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("vocab-trainer")
    });
    std::fs::create_dir_all(&data_dir)
        .with_context(|| format!("create data directory {}", data_dir.display()))?;

    let settings_path = data_dir.join("settings.json");
    let mut settings = store::load_settings(&settings_path);
    if let Some(choices) = cli.choices {
        settings.choice_count = choices;
    }
    if let Some(lang) = cli.lang {
        settings.question_language = lang.into();
    }
    let settings = settings.validated()?;
    if let Err(err) = store::save_settings(&settings_path, &settings) {
        tracing::warn!(error = %err, "could not save settings");
    }

    let entries = EmbeddedDictionary
        .load_entries()
        .context("load embedded dictionary")?;
    tracing::info!(entries = entries.len(), data_dir = %data_dir.display(), "starting session");

    let progress = JsonProgressStore::open(data_dir.join("progress.json"));
    let mut session = StudySession::new(entries, progress, settings)?;
    if cli.reset {
        session.reset_progress().context("reset progress")?;
        tracing::info!("progress reset");
    }

    run_loop(&mut session, cli.rounds)
}

fn run_loop<S: ProgressStore>(
    session: &mut StudySession<S>,
    rounds: Option<usize>,
) -> anyhow::Result<()> {
    let mut rng = rand::rng();
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let answer_side = session.settings().question_language.answer_side();
    let mut played = 0usize;

    println!(
        "Mastery: {}%. Answer with a number, or q to quit.",
        session.mastery_percent()
    );

    'game: while rounds.map_or(true, |limit| played < limit) {
        let round = session.next_round(&mut rng, Utc::now())?;

        println!();
        println!("{}", round.prompt);
        for (i, choice) in round.choices.choices().iter().enumerate() {
            println!("  {}) {}", i + 1, choice.text(answer_side));
        }

        let chosen_id = loop {
            print!("> ");
            io::stdout().flush()?;
            let Some(line) = lines.next() else {
                break 'game;
            };
            let line = line?;
            let trimmed = line.trim();
            if trimmed.eq_ignore_ascii_case("q") {
                break 'game;
            }
            match trimmed.parse::<usize>() {
                Ok(n) if (1..=round.choices.len()).contains(&n) => {
                    break round.choices.choices()[n - 1].id.clone();
                }
                _ => println!("Enter a number between 1 and {}.", round.choices.len()),
            }
        };

        let outcome = session.answer(&chosen_id, Utc::now())?;
        if outcome.was_correct {
            println!("Correct! {} = {}", round.prompt, round.answer);
        } else {
            println!("Not quite. {} = {}", round.prompt, round.answer);
        }
        if let Some(transcription) = &outcome.correct_entry.transcription {
            println!("   ({transcription})");
        }
        if let Some(err) = outcome.save_failed {
            tracing::warn!(error = %err, "progress not saved");
        }
        played += 1;
    }

    println!();
    println!(
        "Done after {} round(s). Mastery: {}%.",
        played,
        session.mastery_percent()
    );
    Ok(())
}
