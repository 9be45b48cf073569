/*!
 * Word-level transcript records and tolerant ingestion.
 *
 * Transcripts arrive as loosely-shaped JSON produced by a speech-to-text
 * service. Nothing about their shape is trusted: entries without timings are
 * dropped, unparsable fields degrade to defaults, and degenerate word
 * durations are repaired on demand.
 */

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Duration given to words whose `end` does not come after `start`
pub const MIN_WORD_DURATION: f64 = 0.01;

/// A single recognised word with its timing in seconds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Word {
    /// The word as recognised
    pub word: String,
    /// Start time in seconds
    pub start: f64,
    /// End time in seconds
    pub end: f64,
}

impl Word {
    /// Create a new word
    pub fn new(word: impl Into<String>, start: f64, end: f64) -> Self {
        Self {
            word: word.into(),
            start,
            end,
        }
    }

    /// Copy of this word with `end > start` enforced
    pub fn repaired(&self) -> Self {
        let end = if self.end <= self.start {
            self.start + MIN_WORD_DURATION
        } else {
            self.end
        };
        Self {
            word: self.word.clone(),
            start: self.start,
            end,
        }
    }

    /// Spoken duration in seconds
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    /// Whether this word overlaps the half-open interval `[start, end)`
    pub fn overlaps(&self, start: f64, end: f64) -> bool {
        self.start < end && self.end > start
    }
}

/// A finished transcript: plain text plus ordered word timings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Transcript {
    /// Full transcript text
    #[serde(default)]
    pub text: String,
    /// Words in spoken order
    #[serde(default)]
    pub words: Vec<Word>,
}

impl Transcript {
    /// Create a transcript from text and words
    pub fn new(text: impl Into<String>, words: Vec<Word>) -> Self {
        Self {
            text: text.into(),
            words,
        }
    }

    /// Create a transcript whose text is the space-joined words
    pub fn from_words(words: Vec<Word>) -> Self {
        let text = words
            .iter()
            .map(|w| w.word.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        Self { text, words }
    }

    /// Build a transcript from arbitrary JSON without failing.
    ///
    /// Accepts either a bare `{text, words}` object or one wrapped as
    /// `{"words_timestamp": {...}}`. Word entries missing a numeric `start`
    /// or `end` are skipped.
    pub fn from_value(value: &Value) -> Self {
        let root = match value.get("words_timestamp") {
            Some(inner) if !inner.is_null() => inner,
            _ => value,
        };

        let words: Vec<Word> = root
            .get("words")
            .and_then(Value::as_array)
            .map(|entries| entries.iter().filter_map(word_from_value).collect())
            .unwrap_or_default();

        match root.get("text").and_then(Value::as_str) {
            Some(text) => Self::new(text, words),
            None => Self::from_words(words),
        }
    }

    /// Parse JSON text and ingest it tolerantly
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        let value: Value = serde_json::from_str(json)?;
        Ok(Self::from_value(&value))
    }

    /// Whether the transcript has no timed words
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Number of timed words
    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    /// Words with degenerate durations repaired
    pub fn repaired_words(&self) -> Vec<Word> {
        self.words.iter().map(Word::repaired).collect()
    }

    /// Words joined with single spaces, in transcript order
    pub fn joined_words(&self) -> String {
        self.words
            .iter()
            .map(|w| w.word.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

fn word_from_value(entry: &Value) -> Option<Word> {
    let start = seconds_from_value(entry.get("start")?)?;
    let end = seconds_from_value(entry.get("end")?)?;

    let word = match entry.get("word") {
        Some(Value::String(s)) => s.trim().to_string(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    };

    Some(Word::new(word, start, end))
}

fn seconds_from_value(value: &Value) -> Option<f64> {
    let seconds = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    seconds.is_finite().then_some(seconds)
}
