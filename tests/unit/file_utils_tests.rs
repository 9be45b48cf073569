/*!
 * Tests for file utility functions
 */

use anyhow::Result;
use std::path::{Path, PathBuf};

use pausewise::file_utils::FileManager;

use crate::common;

/// Test report path generation next to the input
#[test]
fn test_reportPathFor_withNestedInput_shouldStaySiblingOfInput() {
    let path = FileManager::report_path_for(Path::new("/data/session1/answer.json"));
    assert_eq!(path, PathBuf::from("/data/session1/answer.analysis.json"));

    let bare = FileManager::report_path_for(Path::new("answer.json"));
    assert_eq!(bare, PathBuf::from("answer.analysis.json"));
}

/// Test recursive transcript discovery skips reports and other files
#[test]
fn test_findTranscripts_withMixedFiles_shouldReturnOnlyTranscripts() -> Result<()> {
    let dir = common::create_temp_dir()?;
    let transcript = common::steady_transcript();
    common::create_transcript_file(dir.path(), "a.json", &transcript)?;
    common::create_transcript_file(dir.path(), "nested/b.JSON", &transcript)?;
    common::create_test_file(dir.path(), "a.analysis.json", "{}")?;
    common::create_test_file(dir.path(), "notes.txt", "hello")?;

    let found = FileManager::find_transcripts(dir.path())?;
    let names: Vec<String> = found
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
        .collect();

    assert_eq!(names.len(), 2);
    assert!(names.contains(&"a.json".to_string()));
    assert!(names.contains(&"b.JSON".to_string()));
    Ok(())
}

/// Test reading a transcript from disk
#[test]
fn test_readTranscript_withEnvelopeFile_shouldParseWords() -> Result<()> {
    let dir = common::create_temp_dir()?;
    let path = common::create_transcript_file(dir.path(), "answer.json", &common::interview_answer())?;

    let transcript = FileManager::read_transcript(&path)?;
    assert_eq!(transcript.word_count(), 12);
    assert_eq!(transcript.words[0].word, "So");
    Ok(())
}

/// Test that a missing file surfaces a contextual error
#[test]
fn test_readTranscript_withMissingFile_shouldFailWithPath() {
    let err = FileManager::read_transcript("does/not/exist.json").unwrap_err();
    assert!(format!("{:#}", err).contains("exist.json"));
}

/// Test JSON writing creates parent directories
#[test]
fn test_writeJson_withMissingParent_shouldCreateDirectories() -> Result<()> {
    let dir = common::create_temp_dir()?;
    let path = dir.path().join("out/deeper/report.json");

    FileManager::write_json(&path, &serde_json::json!({"score": 3}))?;
    let content = FileManager::read_to_string(&path)?;
    assert!(content.contains("\"score\": 3"));
    assert!(FileManager::file_exists(&path));
    assert!(FileManager::dir_exists(dir.path().join("out")));
    Ok(())
}

/// Test appending timestamped lines to a log file
#[test]
fn test_appendToLogFile_calledTwice_shouldKeepBothLines() -> Result<()> {
    let dir = common::create_temp_dir()?;
    let path = dir.path().join("pausewise.issues.log");

    FileManager::append_to_log_file(&path, "first")?;
    FileManager::append_to_log_file(&path, "second")?;

    let content = FileManager::read_to_string(&path)?;
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with('[') && lines[0].ends_with("] first"));
    assert!(lines[1].ends_with("second"));
    Ok(())
}
