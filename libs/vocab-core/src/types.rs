//! Core types for the vocabulary trainer.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};
use crate::leitner::{MASTERY_BOX, MAX_BOX, MIN_BOX};

/// Smallest allowed number of answer choices per round.
pub const MIN_CHOICES: u8 = 2;
/// Largest allowed number of answer choices per round.
pub const MAX_CHOICES: u8 = 6;

/// Category tag for a vocabulary entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Animals,
    Food,
    Nature,
    Household,
    Objects,
    Other,
}

/// A single vocabulary item (word pair) with stable identity.
///
/// Loaded once from the dictionary provider and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VocabularyEntry {
    pub id: String,
    pub primary_text: String,
    pub secondary_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transcription: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
}

impl VocabularyEntry {
    /// Text shown for this entry on the given language side.
    pub fn text(&self, language: QuestionLanguage) -> &str {
        match language {
            QuestionLanguage::Primary => &self.primary_text,
            QuestionLanguage::Secondary => &self.secondary_text,
        }
    }
}

/// Per-entry spaced repetition state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearningState {
    /// Box level, 1 (unlearned) through 5 (mastered).
    #[serde(rename = "box")]
    pub box_level: u8,
    /// Epoch milliseconds of the last review; 0 means never reviewed.
    pub last_reviewed: i64,
}

impl Default for LearningState {
    fn default() -> Self {
        Self {
            box_level: MIN_BOX,
            last_reviewed: 0,
        }
    }
}

impl LearningState {
    /// Force the box level back into the valid range. Applied to states read
    /// from the store, which may carry values written by older versions.
    pub fn clamped(self) -> Self {
        Self {
            box_level: self.box_level.clamp(MIN_BOX, MAX_BOX),
            last_reviewed: self.last_reviewed.max(0),
        }
    }

    /// Whether this entry has never been reviewed.
    pub fn is_new(&self) -> bool {
        self.last_reviewed == 0
    }

    /// Whether this entry counts toward the mastery percentage.
    pub fn is_mastered(&self) -> bool {
        self.box_level >= MASTERY_BOX
    }
}

/// A vocabulary entry paired with its learning state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackedEntry {
    pub entry: VocabularyEntry,
    pub state: LearningState,
}

/// Which side of the word pair is shown as the question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionLanguage {
    Primary,
    Secondary,
}

impl QuestionLanguage {
    /// The side answers are drawn from.
    pub fn answer_side(self) -> Self {
        match self {
            Self::Primary => Self::Secondary,
            Self::Secondary => Self::Primary,
        }
    }
}

impl Default for QuestionLanguage {
    fn default() -> Self {
        Self::Secondary
    }
}

/// Session settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub choice_count: u8,
    pub question_language: QuestionLanguage,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            choice_count: 4,
            question_language: QuestionLanguage::default(),
        }
    }
}

impl Settings {
    /// Check the choice count against the allowed range.
    pub fn validated(self) -> Result<Self> {
        if !(MIN_CHOICES..=MAX_CHOICES).contains(&self.choice_count) {
            return Err(CoreError::InvalidChoiceCount {
                value: self.choice_count,
            });
        }
        Ok(self)
    }
}

/// Share of entries at or above the mastery box, as a rounded percentage.
pub fn mastery_percent(cards: &[TrackedEntry]) -> u8 {
    if cards.is_empty() {
        return 0;
    }
    let mastered = cards.iter().filter(|c| c.state.is_mastered()).count();
    ((mastered as f64 / cards.len() as f64) * 100.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str) -> VocabularyEntry {
        VocabularyEntry {
            id: id.to_string(),
            primary_text: format!("word-{id}"),
            secondary_text: format!("translation-{id}"),
            transcription: None,
            category: None,
        }
    }

    fn tracked(id: &str, box_level: u8) -> TrackedEntry {
        TrackedEntry {
            entry: entry(id),
            state: LearningState {
                box_level,
                last_reviewed: 0,
            },
        }
    }

    #[test]
    fn default_state_is_new_box_one() {
        let state = LearningState::default();
        assert_eq!(state.box_level, 1);
        assert!(state.is_new());
        assert!(!state.is_mastered());
    }

    #[test]
    fn clamp_repairs_out_of_range_boxes() {
        let low = LearningState {
            box_level: 0,
            last_reviewed: 0,
        };
        assert_eq!(low.clamped().box_level, 1);

        let high = LearningState {
            box_level: 9,
            last_reviewed: -5,
        };
        let clamped = high.clamped();
        assert_eq!(clamped.box_level, 5);
        assert_eq!(clamped.last_reviewed, 0);
    }

    #[test]
    fn settings_validation_bounds() {
        assert!(Settings::default().validated().is_ok());
        for count in [2, 3, 4, 5, 6] {
            let settings = Settings {
                choice_count: count,
                ..Settings::default()
            };
            assert!(settings.validated().is_ok());
        }
        for count in [0, 1, 7] {
            let settings = Settings {
                choice_count: count,
                ..Settings::default()
            };
            assert!(matches!(
                settings.validated(),
                Err(CoreError::InvalidChoiceCount { value }) if value == count
            ));
        }
    }

    #[test]
    fn state_serde_uses_box_field_name() {
        let state = LearningState {
            box_level: 3,
            last_reviewed: 1234,
        };
        let json = serde_json::to_string(&state).unwrap();
        assert_eq!(json, r#"{"box":3,"last_reviewed":1234}"#);

        let back: LearningState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, state);
    }

    #[test]
    fn mastery_percent_rounds() {
        let cards = vec![tracked("1", 5), tracked("2", 4), tracked("3", 1)];
        // 2 of 3 mastered -> 66.67 -> 67
        assert_eq!(mastery_percent(&cards), 67);
        assert_eq!(mastery_percent(&[]), 0);
    }

    #[test]
    fn answer_side_is_the_opposite() {
        assert_eq!(
            QuestionLanguage::Secondary.answer_side(),
            QuestionLanguage::Primary
        );
        assert_eq!(
            QuestionLanguage::Primary.answer_side(),
            QuestionLanguage::Secondary
        );
    }
}
