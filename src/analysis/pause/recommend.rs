/*!
 * LLM-assisted pause recommendation.
 *
 * The model re-emits the transcript with `[PAUSE]` markers; the markers are
 * mapped back onto word indices by a tolerant two-cursor alignment. Every
 * failure collapses to an empty recommendation list.
 */

use log::debug;

use crate::analysis::pause::prompts::{pause_suggestion_prompt, pause_suggestion_schema, PAUSE_MARKER};
use crate::errors::ProviderError;
use crate::generation::{GenerationRequest, TextGenerator};
use crate::transcript::Word;

/// Recover the indices of original tokens that a `[PAUSE]` marker precedes.
///
/// Walks both sequences in parallel. A marker followed by the current
/// original token records that token's index (never index 0). Tokens the
/// model inserted or substituted are skipped on the annotated side only.
/// A marker at the very end is ignored. Indices are deduplicated, first
/// occurrence wins.
pub fn align(original: &[&str], annotated: &[&str]) -> Vec<usize> {
    let mut indices: Vec<usize> = Vec::new();
    let (mut orig, mut resp) = (0, 0);

    while orig < original.len() && resp < annotated.len() {
        let token = annotated[resp];

        if token == PAUSE_MARKER {
            resp += 1;
            let Some(next) = annotated.get(resp) else {
                break;
            };
            if *next == original[orig] && orig > 0 && !indices.contains(&orig) {
                indices.push(orig);
            }
            continue;
        }

        if token == original[orig] {
            orig += 1;
        }
        resp += 1;
    }

    indices
}

/// Locate the recommended pause positions in a model's annotated transcript
pub fn find_pause_indices(words: &[Word], annotated: &str) -> Vec<usize> {
    let original: Vec<&str> = words.iter().map(|w| w.word.as_str()).collect();
    let annotated: Vec<&str> = annotated.trim().trim_matches('"').split_whitespace().collect();
    align(&original, &annotated)
}

/// Ask the generator where pauses would help.
///
/// Returns the raw error so the caller can log it; callers treat any error
/// as an empty recommendation set.
pub async fn request_pause_indices(
    generator: &dyn TextGenerator,
    words: &[Word],
    temperature: f32,
) -> Result<Vec<usize>, ProviderError> {
    if words.is_empty() {
        return Ok(Vec::new());
    }

    let transcript = words
        .iter()
        .map(|w| w.word.as_str())
        .collect::<Vec<_>>()
        .join(" ");

    let request = GenerationRequest::new(
        pause_suggestion_prompt(&transcript),
        "",
        pause_suggestion_schema(),
    )
    .temperature(temperature);

    let response = generator.generate(&request).await?;
    let annotated = response
        .get("modified_transcript")
        .and_then(|v| v.as_str())
        .ok_or_else(|| ProviderError::SchemaViolation("modified_transcript missing".to_string()))?;

    let indices = find_pause_indices(words, annotated);
    debug!("Recommended pauses before word indices {:?}", indices);
    Ok(indices)
}
