//! Distractor selection and choice-set assembly for multiple-choice rounds.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::types::VocabularyEntry;

/// Pick up to `count` distractors from the pool, excluding the correct entry.
///
/// Sampling is a Fisher-Yates partial shuffle over `pool - {correct}`, so the
/// result is unbiased and free of duplicates. When the pool is smaller than
/// requested, as many entries as are available are returned.
pub fn select_distractors<'a, R, I>(
    correct: &VocabularyEntry,
    count: usize,
    pool: I,
    rng: &mut R,
) -> Vec<VocabularyEntry>
where
    R: Rng + ?Sized,
    I: IntoIterator<Item = &'a VocabularyEntry>,
{
    let mut others: Vec<&VocabularyEntry> =
        pool.into_iter().filter(|e| e.id != correct.id).collect();
    let take = count.min(others.len());
    let (picked, _) = others.partial_shuffle(rng, take);
    picked.iter().map(|e| (*e).clone()).collect()
}

/// Unbiased sample of up to `count` distinct entries from the pool.
///
/// Used by game modes that need a random word subset rather than a
/// correct-plus-distractors set.
pub fn sample_entries<'a, R, I>(pool: I, count: usize, rng: &mut R) -> Vec<VocabularyEntry>
where
    R: Rng + ?Sized,
    I: IntoIterator<Item = &'a VocabularyEntry>,
{
    let mut refs: Vec<&VocabularyEntry> = pool.into_iter().collect();
    let take = count.min(refs.len());
    let (picked, _) = refs.partial_shuffle(rng, take);
    picked.iter().map(|e| (*e).clone()).collect()
}

/// The shuffled multiple-choice options for one round.
#[derive(Debug, Clone)]
pub struct ChoiceSet {
    choices: Vec<VocabularyEntry>,
    correct_id: String,
}

impl ChoiceSet {
    /// Build a set of up to `choice_count` options containing the correct
    /// entry. The combined set is shuffled again so the correct answer's
    /// position is uniformly random.
    pub fn build<'a, R, I>(
        correct: &VocabularyEntry,
        pool: I,
        choice_count: u8,
        rng: &mut R,
    ) -> Self
    where
        R: Rng + ?Sized,
        I: IntoIterator<Item = &'a VocabularyEntry>,
    {
        let distractor_count = usize::from(choice_count).saturating_sub(1);
        let mut choices = select_distractors(correct, distractor_count, pool, rng);
        choices.push(correct.clone());
        choices.shuffle(rng);
        Self {
            choices,
            correct_id: correct.id.clone(),
        }
    }

    pub fn choices(&self) -> &[VocabularyEntry] {
        &self.choices
    }

    pub fn correct_id(&self) -> &str {
        &self.correct_id
    }

    pub fn is_correct(&self, id: &str) -> bool {
        self.correct_id == id
    }

    pub fn contains(&self, id: &str) -> bool {
        self.choices.iter().any(|e| e.id == id)
    }

    pub fn len(&self) -> usize {
        self.choices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.choices.is_empty()
    }
}
