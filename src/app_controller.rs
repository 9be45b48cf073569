use anyhow::{anyhow, Context, Result};
use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info, warn};
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::analysis::SpeechAnalyzer;
use crate::app_config::Config;
use crate::file_utils::FileManager;
use crate::transcript::Transcript;

// @module: Application controller for transcript analysis

/// Transcripts analysed at once in folder mode
pub const MAX_CONCURRENT_FILES: usize = 4;

/// Which pipelines to run for each transcript
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisMode {
    /// Pace and pauses, as one combined report
    Full,
    /// Pace only
    Pace,
    /// Pauses only
    Pauses,
}

/// What happened to one input file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    /// Report written to the given path
    Written(PathBuf),
    /// A report already existed and overwrite was not forced
    Skipped(PathBuf),
}

/// Counts from a folder run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FolderSummary {
    pub processed: usize,
    pub skipped: usize,
    pub errors: usize,
}

/// Main application controller for transcript analysis
pub struct Controller {
    // @field: App configuration
    config: Config,
    // @field: Analysis engine shared by every file
    analyzer: SpeechAnalyzer,
    // @field: Pipelines to run
    mode: AnalysisMode,
}

impl Controller {
    // @method: Create a controller whose analyzer is built from the configuration
    pub fn with_config(config: Config) -> Result<Self> {
        let analyzer = SpeechAnalyzer::from_config(&config)
            .context("Failed to create the speech analyzer")?;
        Ok(Self::with_analyzer(config, analyzer))
    }

    // @method: Create a controller around an existing analyzer
    pub fn with_analyzer(config: Config, analyzer: SpeechAnalyzer) -> Self {
        Self {
            config,
            analyzer,
            mode: AnalysisMode::Full,
        }
    }

    /// Select the pipelines to run
    pub fn mode(mut self, mode: AnalysisMode) -> Self {
        self.mode = mode;
        self
    }

    /// Configuration in use
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run the selected pipelines over a transcript and return the report as JSON
    pub async fn analyze_transcript(&self, transcript: &Transcript) -> Result<Value> {
        let value = match self.mode {
            AnalysisMode::Full => serde_json::to_value(self.analyzer.analyze(transcript).await)?,
            AnalysisMode::Pace => serde_json::to_value(self.analyzer.analyze_pace(transcript))?,
            AnalysisMode::Pauses => {
                serde_json::to_value(self.analyzer.analyze_pauses(transcript).await)?
            }
        };
        Ok(value)
    }

    /// Analyse one transcript file and return the report without writing it
    pub async fn analyze_file(&self, input_file: &Path) -> Result<Value> {
        let transcript = FileManager::read_transcript(input_file)?;
        if transcript.is_empty() {
            warn!("{:?} has no usable word timestamps", input_file);
        }
        self.analyze_transcript(&transcript).await
    }

    /// Analyse one transcript file and write `<stem>.analysis.json` next to it
    pub async fn run(&self, input_file: PathBuf, force_overwrite: bool) -> Result<FileOutcome> {
        if !FileManager::file_exists(&input_file) {
            return Err(anyhow!("Input file does not exist: {:?}", input_file));
        }

        let output_path = FileManager::report_path_for(&input_file);
        if output_path.exists() && !force_overwrite {
            warn!(
                "Skipping {:?}, report already exists (use -f to force overwrite)",
                input_file
            );
            return Ok(FileOutcome::Skipped(output_path));
        }

        let start_time = Instant::now();
        let report = self.analyze_file(&input_file).await?;
        FileManager::write_json(&output_path, &report)?;

        info!(
            "Analysed {:?} in {}",
            input_file,
            Self::format_duration(start_time.elapsed())
        );
        Ok(FileOutcome::Written(output_path))
    }

    /// Analyse every transcript under a directory
    pub async fn run_folder(&self, input_dir: PathBuf, force_overwrite: bool) -> Result<FolderSummary> {
        let start_time = Instant::now();

        if !FileManager::dir_exists(&input_dir) {
            return Err(anyhow!("Input directory does not exist: {:?}", input_dir));
        }

        let transcripts = FileManager::find_transcripts(&input_dir)?;
        if transcripts.is_empty() {
            return Err(anyhow!("No transcript files found in directory: {:?}", input_dir));
        }

        let folder_pb = ProgressBar::new(transcripts.len() as u64);
        let template_result = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files ({percent}%) {msg} {eta}")
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        folder_pb.set_style(template_result.progress_chars("#>-"));
        folder_pb.set_message("Analysing transcripts");

        let outcomes: Vec<(PathBuf, Result<FileOutcome>)> = stream::iter(transcripts)
            .map(|path| {
                let folder_pb = folder_pb.clone();
                async move {
                    let outcome = self.run(path.clone(), force_overwrite).await;
                    folder_pb.inc(1);
                    (path, outcome)
                }
            })
            .buffer_unordered(MAX_CONCURRENT_FILES)
            .collect()
            .await;

        folder_pb.finish_with_message("Folder analysis complete");

        let mut summary = FolderSummary::default();
        for (path, outcome) in outcomes {
            match outcome {
                Ok(FileOutcome::Written(_)) => summary.processed += 1,
                Ok(FileOutcome::Skipped(_)) => summary.skipped += 1,
                Err(e) => {
                    error!("Error processing file {:?}: {:#}", path, e);
                    summary.errors += 1;
                }
            }
        }

        let summary_message = format!(
            "Folder analysis completed: {} processed, {} skipped, {} errors",
            summary.processed, summary.skipped, summary.errors
        );
        info!("{}", summary_message);

        let log_file_path = input_dir.join("pausewise.issues.log");
        let log_line = format!(
            "{} - {} - Duration: {}",
            input_dir.display(),
            summary_message,
            Self::format_duration(start_time.elapsed())
        );
        if let Err(e) = FileManager::append_to_log_file(&log_file_path, &log_line) {
            warn!("Failed to write folder summary to log file: {}", e);
        }

        Ok(summary)
    }

    fn format_duration(duration: Duration) -> String {
        let total_secs = duration.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        let millis = duration.subsec_millis();

        if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else if seconds > 0 {
            format!("{}.{:03}s", seconds, millis)
        } else {
            format!("{}ms", millis)
        }
    }
}
