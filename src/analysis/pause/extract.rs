/*!
 * Inter-word silence extraction.
 */

use serde::{Deserialize, Serialize};

use crate::transcript::Word;

/// A silence between two adjacent words
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pause {
    /// Position of the word before the silence
    pub index: usize,
    /// Silence start (end of the preceding word)
    pub start: f64,
    /// Silence end (start of the following word)
    pub end: f64,
    /// Length in seconds, always positive
    pub duration: f64,
    /// Word spoken before the silence
    pub before_word: String,
    /// Word spoken after the silence
    pub after_word: String,
}

/// Extract every positive gap between adjacent words, in word order.
///
/// Touching or overlapping words produce no record, so `n` words yield at
/// most `n - 1` pauses.
pub fn extract_pauses(words: &[Word]) -> Vec<Pause> {
    words
        .windows(2)
        .enumerate()
        .filter_map(|(index, pair)| {
            let (before, after) = (&pair[0], &pair[1]);
            let duration = after.start - before.end;
            (duration > 0.0).then(|| Pause {
                index,
                start: before.end,
                end: after.start,
                duration,
                before_word: before.word.clone(),
                after_word: after.word.clone(),
            })
        })
        .collect()
}
