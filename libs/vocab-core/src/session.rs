//! Study session orchestration: scheduler + choice sets + progress store.
//!
//! Drives the review loop one round at a time. All time and randomness come
//! in as parameters, so the session is deterministic under a seeded RNG and a
//! fixed clock.

use chrono::{DateTime, Utc};
use rand::Rng;

use crate::choices::ChoiceSet;
use crate::error::{CoreError, Result};
use crate::leitner;
use crate::scheduler;
use crate::store::{load_state_or_default, ProgressStore, StoreError};
use crate::types::{mastery_percent, LearningState, Settings, TrackedEntry, VocabularyEntry};

/// One question round presented to the player.
#[derive(Debug, Clone)]
pub struct Round {
    /// Id of the entry being quizzed.
    pub entry_id: String,
    /// Question text, on the configured question side.
    pub prompt: String,
    /// Correct answer text, on the opposite side.
    pub answer: String,
    pub transcription: Option<String>,
    pub choices: ChoiceSet,
}

/// Feedback after an answer has been applied and persisted.
#[derive(Debug)]
pub struct AnswerOutcome {
    pub was_correct: bool,
    pub correct_entry: VocabularyEntry,
    pub new_state: LearningState,
    /// Set when persisting the update failed. The in-memory state has still
    /// advanced and the session continues; callers should report the error.
    pub save_failed: Option<StoreError>,
}

/// A running study session over a fixed entry pool.
pub struct StudySession<S: ProgressStore> {
    cards: Vec<TrackedEntry>,
    settings: Settings,
    store: S,
    current: Option<Round>,
    last_answered: Option<String>,
}

impl<S: ProgressStore> StudySession<S> {
    /// Hydrate a session: every entry gets its persisted state, falling back
    /// to the default (box 1, never reviewed) when the record is absent or
    /// unreadable. Fails fast on an empty dictionary or invalid settings.
    pub fn new(entries: Vec<VocabularyEntry>, store: S, settings: Settings) -> Result<Self> {
        let settings = settings.validated()?;
        if entries.is_empty() {
            return Err(CoreError::EmptyPool);
        }

        let cards = entries
            .into_iter()
            .map(|entry| {
                let (state, _) = load_state_or_default(&store, &entry.id);
                TrackedEntry { entry, state }
            })
            .collect();

        Ok(Self {
            cards,
            settings,
            store,
            current: None,
            last_answered: None,
        })
    }

    /// Pick the next card and assemble its choice set.
    ///
    /// The previously answered entry is excluded to avoid immediate
    /// repetition, except when the pool holds a single entry.
    pub fn next_round<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        now: DateTime<Utc>,
    ) -> Result<Round> {
        let exclude = if self.cards.len() > 1 {
            self.last_answered.as_deref()
        } else {
            None
        };

        let selected = scheduler::select_next(&self.cards, exclude, now)?.entry.clone();

        let question_side = self.settings.question_language;
        let choices = ChoiceSet::build(
            &selected,
            self.cards.iter().map(|c| &c.entry),
            self.settings.choice_count,
            rng,
        );

        let round = Round {
            entry_id: selected.id.clone(),
            prompt: selected.text(question_side).to_string(),
            answer: selected.text(question_side.answer_side()).to_string(),
            transcription: selected.transcription.clone(),
            choices,
        };
        self.current = Some(round.clone());
        Ok(round)
    }

    /// Apply the player's answer for the active round: run the box
    /// transition, persist the new state, and return feedback.
    pub fn answer(&mut self, chosen_id: &str, now: DateTime<Utc>) -> Result<AnswerOutcome> {
        let round = self.current.as_ref().ok_or(CoreError::NoActiveRound)?;
        if !round.choices.contains(chosen_id) {
            return Err(CoreError::UnknownChoice {
                id: chosen_id.to_string(),
            });
        }

        let was_correct = round.choices.is_correct(chosen_id);
        let entry_id = round.entry_id.clone();
        self.current = None;

        let card = self
            .cards
            .iter_mut()
            .find(|c| c.entry.id == entry_id)
            .ok_or(CoreError::UnknownChoice { id: entry_id.clone() })?;

        let new_state = leitner::apply_answer(&card.state, was_correct, now);
        card.state = new_state;
        let correct_entry = card.entry.clone();

        let save_failed = self.store.save_state(&entry_id, &new_state).err();
        self.last_answered = Some(entry_id);

        Ok(AnswerOutcome {
            was_correct,
            correct_entry,
            new_state,
            save_failed,
        })
    }

    /// Send every entry back to box 1, never reviewed, and persist.
    ///
    /// Memory is always reset; the first persistence failure (if any) is
    /// returned after the loop completes.
    pub fn reset_progress(&mut self) -> std::result::Result<(), StoreError> {
        self.current = None;
        self.last_answered = None;

        let mut first_err = None;
        for card in &mut self.cards {
            card.state = LearningState::default();
            if let Err(err) = self.store.save_state(&card.entry.id, &card.state) {
                first_err.get_or_insert(err);
            }
        }
        match first_err {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    pub fn mastery_percent(&self) -> u8 {
        mastery_percent(&self.cards)
    }

    pub fn cards(&self) -> &[TrackedEntry] {
        &self.cards
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }
}
