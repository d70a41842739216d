//! Card scheduler: picks the most overdue entry from the tracked pool.

use chrono::{DateTime, Utc};

use crate::error::{CoreError, Result};
use crate::leitner::interval_hours;
use crate::types::{LearningState, TrackedEntry};

const MS_PER_HOUR: f64 = 3_600_000.0;

/// How overdue a state is, as a multiple of its box interval.
///
/// A never-reviewed state (`last_reviewed == 0`) measures its age from the
/// epoch, so new entries dominate everything that has been seen recently.
pub fn urgency(state: &LearningState, now: DateTime<Utc>) -> f64 {
    let age_hours = (now.timestamp_millis() - state.last_reviewed) as f64 / MS_PER_HOUR;
    age_hours / interval_hours(state.box_level)
}

/// Review priority score: box level minus urgency. Lower means more due.
pub fn score(state: &LearningState, now: DateTime<Utc>) -> f64 {
    f64::from(state.box_level) - urgency(state, now)
}

/// Select the most due entry, optionally excluding one id (typically the
/// entry just answered, to avoid immediate repetition).
///
/// Ties on the score are broken by the lowest entry id, so selection is
/// deterministic for a fixed input. Returns [`CoreError::EmptyPool`] when no
/// candidate remains after exclusion.
pub fn select_next<'a>(
    pool: &'a [TrackedEntry],
    exclude: Option<&str>,
    now: DateTime<Utc>,
) -> Result<&'a TrackedEntry> {
    let mut best: Option<(&TrackedEntry, f64)> = None;

    for card in pool {
        if exclude == Some(card.entry.id.as_str()) {
            continue;
        }
        let card_score = score(&card.state, now);
        let better = match best {
            None => true,
            Some((best_card, best_score)) => {
                card_score < best_score
                    || (card_score == best_score && card.entry.id < best_card.entry.id)
            }
        };
        if better {
            best = Some((card, card_score));
        }
    }

    best.map(|(card, _)| card).ok_or(CoreError::EmptyPool)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::VocabularyEntry;

    const HOUR_MS: i64 = 3_600_000;

    fn entry(id: &str) -> VocabularyEntry {
        VocabularyEntry {
            id: id.to_string(),
            primary_text: format!("word-{id}"),
            secondary_text: format!("translation-{id}"),
            transcription: None,
            category: None,
        }
    }

    fn tracked(id: &str, box_level: u8, last_reviewed: i64) -> TrackedEntry {
        TrackedEntry {
            entry: entry(id),
            state: LearningState {
                box_level,
                last_reviewed,
            },
        }
    }

    fn at_millis(ms: i64) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(ms).unwrap()
    }

    #[test]
    fn empty_pool_is_an_error() {
        let result = select_next(&[], None, at_millis(0));
        assert!(matches!(result, Err(CoreError::EmptyPool)));
    }

    #[test]
    fn exclusion_can_empty_the_pool() {
        let pool = vec![tracked("a", 1, 0)];
        let result = select_next(&pool, Some("a"), at_millis(HOUR_MS));
        assert!(matches!(result, Err(CoreError::EmptyPool)));
    }

    #[test]
    fn excluded_entry_is_never_returned() {
        let pool = vec![tracked("a", 1, 0), tracked("b", 1, 0)];
        for _ in 0..3 {
            let picked = select_next(&pool, Some("a"), at_millis(HOUR_MS)).unwrap();
            assert_eq!(picked.entry.id, "b");
        }
    }

    #[test]
    fn uniform_fresh_pool_returns_some_entry() {
        let now = at_millis(10 * HOUR_MS);
        let pool = vec![tracked("a", 1, 0), tracked("b", 1, 0), tracked("c", 1, 0)];
        let picked = select_next(&pool, None, now).unwrap();
        assert!(pool.iter().any(|c| c.entry.id == picked.entry.id));
    }

    #[test]
    fn overdue_low_box_beats_recent_high_box() {
        let now = at_millis(100 * HOUR_MS);
        // a: box 1, reviewed 10h ago -> urgency 10, score -9
        // b: box 3, reviewed 1h ago  -> urgency 0.25, score 2.75
        let pool = vec![
            tracked("a", 1, now.timestamp_millis() - 10 * HOUR_MS),
            tracked("b", 3, now.timestamp_millis() - HOUR_MS),
        ];
        let picked = select_next(&pool, None, now).unwrap();
        assert_eq!(picked.entry.id, "a");
    }

    #[test]
    fn never_reviewed_entries_are_preferred() {
        let now = at_millis(1_000 * HOUR_MS);
        let pool = vec![
            tracked("seen", 1, now.timestamp_millis() - HOUR_MS),
            tracked("fresh", 1, 0),
        ];
        let picked = select_next(&pool, None, now).unwrap();
        assert_eq!(picked.entry.id, "fresh");
    }

    #[test]
    fn ties_break_toward_lowest_id() {
        let now = at_millis(5 * HOUR_MS);
        let pool = vec![tracked("c", 2, 0), tracked("a", 2, 0), tracked("b", 2, 0)];
        let picked = select_next(&pool, None, now).unwrap();
        assert_eq!(picked.entry.id, "a");
    }

    #[test]
    fn score_matches_formula() {
        let now = at_millis(10 * HOUR_MS);
        let state = LearningState {
            box_level: 1,
            last_reviewed: 0,
        };
        // age 10h, interval 1h -> urgency 10, score 1 - 10 = -9
        assert_eq!(urgency(&state, now), 10.0);
        assert_eq!(score(&state, now), -9.0);
    }
}
