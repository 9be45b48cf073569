/*!
 * Prompt builders for the two text-generation calls of the pause pipeline.
 */

use std::collections::BTreeMap;

use crate::analysis::pause::classify::PauseLabel;
use crate::generation::{FieldKind, ResponseSchema};

/// Marker the model inserts where a pause is advised
pub const PAUSE_MARKER: &str = "[PAUSE]";

const EXAMPLE_INPUT: &str = "My name is bond James Bond";
const EXAMPLE_OUTPUT: &str = "My name is bond [PAUSE] James Bond";

/// Schema of the pause-marker insertion response
pub fn pause_suggestion_schema() -> ResponseSchema {
    ResponseSchema::new("pause_suggestion").field("modified_transcript", FieldKind::String)
}

/// Schema of the coaching response
pub fn coaching_schema() -> ResponseSchema {
    ResponseSchema::new("pause_coaching")
        .field("actionable_feedback", FieldKind::String)
        .field("score", FieldKind::Integer)
}

/// Instructions for re-emitting `transcript` with pause markers
pub fn pause_suggestion_prompt(transcript: &str) -> String {
    format!(
        "You are an expert in spoken communication. Analyze this transcript \
         and insert \"{marker}\" tokens where brief pauses would improve \
         clarity, emphasis, or natural flow. Follow these rules:\n\n\
         1. PRESERVE all original words exactly as given\n\
         2. ONLY insert \"{marker}\" tokens, no other changes\n\
         3. Insert pauses only at natural break points:\n   \
            - Before important words for emphasis\n   \
            - Between logical thought groups\n   \
            - After conjunctions or transitional phrases\n   \
            - Before appositives or clarifying information\n\
         4. Never add punctuation or modify words\n\
         5. Never insert a pause before the first word\n\n\
         Example Input: \"{example_input}\"\n\
         Example Output: \"{example_output}\"\n\n\
         Now process this transcript:\n\
         \"{transcript}\"\n\n\
         Put ONLY the modified transcript with \"{marker}\" tokens in the \
         \"modified_transcript\" field. Do not include any other text or explanations.",
        marker = PAUSE_MARKER,
        example_input = EXAMPLE_INPUT,
        example_output = EXAMPLE_OUTPUT,
        transcript = transcript,
    )
}

/// Scoring rubric shown to the coaching model
pub const COACHING_RUBRIC: &str = "### Pause Management Scoring Rubric (1-5)\n\
5 - Excellent: strategic pauses >=20 % **and** rushed <=10 % **and** long <=10 %.\n\
4 - Good: strategic 10-<20 % with rushed <=20 % and long <=15 %.\n\
3 - Fair: strategic 5-<10 % **or** (rushed 20-35 % / long 15-20 %).\n\
2 - Poor: strategic <5 % **or** >20 % long **or** >35 % rushed.\n\
1 - Very poor: long pauses >30 % **or** rushed pauses >50 %.\n";

/// Instructions for the coaching call, built from the synthesized report
pub fn coaching_prompt(distribution: &BTreeMap<PauseLabel, String>, details: &[String]) -> String {
    let share = |label: PauseLabel| {
        distribution
            .get(&label)
            .map(String::as_str)
            .unwrap_or("0%")
            .to_string()
    };

    let statistics = format!(
        "Long pauses : {}\nRushed pauses: {}\nStrategic    : {}\n",
        share(PauseLabel::Long),
        share(PauseLabel::Rushed),
        share(PauseLabel::Strategic),
    );

    format!(
        "You are an interview communication coach. Use **simple, everyday language** \
         (aim for a grade-6 reading level). Your task:\n\
         1. Evaluate the speaker's pauses based on the stats below.\n\
         2. Give **actionable** advice. Cite the exact word(s) and the timestamp you are \
         referring to in parentheses so users know where to improve (e.g., after 'model' 01:22).\n\
         3. Assign a holistic score from 1-5 following the rubric.\n\n\
         {rubric}\n\
         ---\n\
         STATISTICS\n\
         {statistics}\n\
         EXAMPLE ISSUES\n\
         {issues}\n\
         ---\n\
         Return a JSON object with exactly these keys: 'actionable_feedback' (string) and 'score' (integer).",
        rubric = COACHING_RUBRIC,
        statistics = statistics,
        issues = details.join("\n"),
    )
}
