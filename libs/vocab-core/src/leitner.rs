//! Box transition rules for the 5-box spaced repetition heuristic.

use chrono::{DateTime, Utc};

use crate::types::LearningState;

/// Lowest box level (unlearned).
pub const MIN_BOX: u8 = 1;
/// Highest box level (fully mastered).
pub const MAX_BOX: u8 = 5;
/// Box level at or above which an entry counts as mastered.
pub const MASTERY_BOX: u8 = 4;

/// Review interval for a box level: 1h at box 1, doubling up to 16h at box 5.
pub fn interval_hours(box_level: u8) -> f64 {
    f64::from(1u32 << u32::from(box_level.saturating_sub(1)))
}

/// Compute the next state after an answer.
///
/// A correct answer promotes one box, saturating at [`MAX_BOX`]. A wrong
/// answer demotes all the way back to [`MIN_BOX`] regardless of prior level.
/// `last_reviewed` is set to `now` unconditionally.
pub fn apply_answer(state: &LearningState, was_correct: bool, now: DateTime<Utc>) -> LearningState {
    let box_level = if was_correct {
        state.box_level.saturating_add(1).min(MAX_BOX)
    } else {
        MIN_BOX
    };
    LearningState {
        box_level,
        last_reviewed: now.timestamp_millis(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at_millis(ms: i64) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(ms).unwrap()
    }

    #[test]
    fn intervals_double_per_box() {
        assert_eq!(interval_hours(1), 1.0);
        assert_eq!(interval_hours(2), 2.0);
        assert_eq!(interval_hours(3), 4.0);
        assert_eq!(interval_hours(4), 8.0);
        assert_eq!(interval_hours(5), 16.0);
    }

    #[test]
    fn correct_answer_promotes_one_box() {
        let state = LearningState {
            box_level: 2,
            last_reviewed: 0,
        };
        let next = apply_answer(&state, true, at_millis(1000));
        assert_eq!(next.box_level, 3);
        assert_eq!(next.last_reviewed, 1000);
    }

    #[test]
    fn correct_answer_saturates_at_top_box() {
        let state = LearningState {
            box_level: 5,
            last_reviewed: 100,
        };
        let next = apply_answer(&state, true, at_millis(2000));
        assert_eq!(next.box_level, 5);
    }

    #[test]
    fn wrong_answer_resets_to_box_one() {
        let state = LearningState {
            box_level: 4,
            last_reviewed: 500,
        };
        let next = apply_answer(&state, false, at_millis(1500));
        assert_eq!(next.box_level, 1);
        assert_eq!(next.last_reviewed, 1500);
    }

    #[test]
    fn wrong_answer_resets_even_from_box_one() {
        let state = LearningState {
            box_level: 1,
            last_reviewed: 0,
        };
        let next = apply_answer(&state, false, at_millis(42));
        assert_eq!(next.box_level, 1);
    }

    #[test]
    fn box_stays_in_range_over_any_sequence() {
        let mut state = LearningState::default();
        let answers = [
            true, true, true, true, true, true, true, false, true, false, false, true,
        ];
        for (i, &correct) in answers.iter().enumerate() {
            state = apply_answer(&state, correct, at_millis((i as i64 + 1) * 1000));
            assert!((MIN_BOX..=MAX_BOX).contains(&state.box_level));
        }
    }
}
