//! Per-direction aggregation across rotated recording files
//!
//! The recorder rotates `sent_*.bin` / `recv_*.bin` every 10 minutes. Each
//! file is analyzed on its own with a fresh [`GapAnalyzer`], so the pair of
//! records straddling a rotation boundary is never compared. Files are taken
//! in lexicographic name order, which equals chronological order only while
//! the names carry zero-padded timestamps; a warning is logged otherwise.

use super::gaps::{Gap, GapAnalyzer};
use super::verdict::{classify, Verdict};
use crate::config::VerifyConfig;
use crate::error::{Result, VerifyError};
use crate::record::{parse_file_timestamp, reader::RecordReader, Record};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

/// One of the two independently recorded streams
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Counter values written by the output callback
    Sent,
    /// Counter values decoded by the input callback
    Received,
}

impl Direction {
    /// File name prefix for this direction under the given config
    pub fn prefix<'a>(&self, config: &'a VerifyConfig) -> &'a str {
        match self {
            Direction::Sent => &config.sent_prefix,
            Direction::Received => &config.recv_prefix,
        }
    }

    /// Upper-case label used in report headings and totals
    pub fn label(&self) -> &'static str {
        match self {
            Direction::Sent => "SENT",
            Direction::Received => "RECEIVED",
        }
    }

    /// Audio callback that produced this stream
    pub fn callback(&self) -> &'static str {
        match self {
            Direction::Sent => "output callback",
            Direction::Received => "input callback",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Gap rollup for a single recording file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileReport {
    /// File name without directory
    pub filename: String,
    /// Complete records decoded
    pub record_count: u64,
    /// Forward gaps detected
    pub gap_count: u64,
    /// Sum of gap sizes
    pub samples_lost: u64,
    /// First gaps in encounter order, bounded by `max_examples`
    pub example_gaps: Vec<Gap>,
    /// Capture start parsed from a recorder-style file name
    pub captured_at: Option<NaiveDateTime>,
}

impl FileReport {
    fn empty(filename: String) -> Self {
        Self {
            filename,
            record_count: 0,
            gap_count: 0,
            samples_lost: 0,
            example_gaps: Vec::new(),
            captured_at: None,
        }
    }

    /// Gaps counted but not kept as examples
    pub fn elided_gaps(&self) -> u64 {
        self.gap_count - self.example_gaps.len() as u64
    }
}

/// Totals for one direction summed over all of its files
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectionReport {
    pub direction: Direction,
    /// Per-file reports in analysis order
    pub files: Vec<FileReport>,
    pub total_records: u64,
    pub total_gaps: u64,
    pub total_lost: u64,
}

impl DirectionReport {
    pub fn new(direction: Direction) -> Self {
        Self {
            direction,
            files: Vec::new(),
            total_records: 0,
            total_gaps: 0,
            total_lost: 0,
        }
    }

    /// Add a file's counts to the totals and keep its report
    pub fn absorb(&mut self, file: FileReport) {
        self.total_records += file.record_count;
        self.total_gaps += file.gap_count;
        self.total_lost += file.samples_lost;
        self.files.push(file);
    }

    /// True when no recording matched this direction's prefix
    pub fn no_files_found(&self) -> bool {
        self.files.is_empty()
    }
}

/// Run gap detection over one file's record stream
///
/// Decoding errors abort the file; state starts fresh for every call.
pub fn analyze_records<I>(
    filename: impl Into<String>,
    records: I,
    max_examples: usize,
) -> io::Result<FileReport>
where
    I: IntoIterator<Item = io::Result<Record>>,
{
    let mut analyzer = GapAnalyzer::new();
    let mut report = FileReport::empty(filename.into());

    for record in records {
        let record = record?;
        report.record_count += 1;
        if let Some(gap) = analyzer.observe(&record) {
            report.gap_count += 1;
            report.samples_lost += u64::from(gap.size);
            if report.example_gaps.len() < max_examples {
                report.example_gaps.push(gap);
            }
        }
    }

    Ok(report)
}

/// Discovers and analyzes the recordings of one directory
pub struct DirectionAnalyzer<'a> {
    dir: &'a Path,
    config: &'a VerifyConfig,
}

impl<'a> DirectionAnalyzer<'a> {
    pub fn new(dir: &'a Path, config: &'a VerifyConfig) -> Self {
        Self { dir, config }
    }

    /// List `<prefix>_*.<ext>` files for a direction, sorted by name
    pub fn find_files(&self, direction: Direction) -> Result<Vec<PathBuf>> {
        let head = format!("{}_", direction.prefix(self.config));
        let tail = format!(".{}", self.config.extension);

        let entries = std::fs::read_dir(self.dir).map_err(|e| VerifyError::io(self.dir, e))?;

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| VerifyError::io(self.dir, e))?;
            let name = entry.file_name();
            let name = name.to_string_lossy();
            let matches = name.len() >= head.len() + tail.len()
                && name.starts_with(&head)
                && name.ends_with(&tail);
            if !matches {
                continue;
            }
            let path = entry.path();
            if path.is_file() {
                files.push(path);
            } else {
                tracing::debug!(path = %path.display(), "Skipping non-file match");
            }
        }

        files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
        Ok(files)
    }

    /// Decode and analyze a single recording file
    pub fn analyze_file(&self, direction: Direction, path: &Path) -> Result<FileReport> {
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let reader = RecordReader::open(path).map_err(|e| VerifyError::io(path, e))?;
        let mut report = analyze_records(filename, reader, self.config.max_examples)
            .map_err(|e| VerifyError::io(path, e))?;
        report.captured_at = parse_file_timestamp(&report.filename, direction.prefix(self.config));

        tracing::debug!(
            file = %report.filename,
            records = report.record_count,
            gaps = report.gap_count,
            lost = report.samples_lost,
            "Analyzed recording file"
        );
        Ok(report)
    }

    /// Analyze every file of a direction and sum the results
    pub fn analyze(&self, direction: Direction) -> Result<DirectionReport> {
        let files = self.find_files(direction)?;
        let mut report = DirectionReport::new(direction);

        if files.is_empty() {
            tracing::info!(direction = %direction, "No recording files found");
            return Ok(report);
        }

        tracing::info!(direction = %direction, files = files.len(), "Analyzing recordings");

        for path in &files {
            report.absorb(self.analyze_file(direction, path)?);
        }

        check_chronology(&report.files);

        tracing::info!(
            direction = %direction,
            records = report.total_records,
            gaps = report.total_gaps,
            lost = report.total_lost,
            "Direction analyzed"
        );
        Ok(report)
    }
}

/// Warn when name order may not match capture order
fn check_chronology(files: &[FileReport]) {
    let mut previous: Option<(&str, NaiveDateTime)> = None;
    let mut warned_untimed = false;
    for file in files {
        let Some(captured_at) = file.captured_at else {
            if !warned_untimed {
                warned_untimed = true;
                tracing::debug!(
                    file = %file.filename,
                    "File name carries no capture timestamp, assuming name order is chronological"
                );
            }
            previous = None;
            continue;
        };
        if let Some((prev_name, prev_at)) = previous {
            if captured_at < prev_at {
                tracing::warn!(
                    file = %file.filename,
                    previous = prev_name,
                    "Capture timestamps go backwards in name order"
                );
            }
        }
        previous = Some((file.filename.as_str(), captured_at));
    }
}

/// Both directions plus the resulting verdict
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationSummary {
    pub directory: PathBuf,
    pub sent: DirectionReport,
    pub received: DirectionReport,
    pub verdict: Verdict,
}

/// Analyze sent then received recordings in `dir` and classify the result
pub fn verify_directory(dir: &Path, config: &VerifyConfig) -> Result<VerificationSummary> {
    if !dir.is_dir() {
        return Err(VerifyError::NotADirectory(dir.to_path_buf()));
    }

    let analyzer = DirectionAnalyzer::new(dir, config);
    let sent = analyzer.analyze(Direction::Sent)?;
    let received = analyzer.analyze(Direction::Received)?;
    let verdict = classify(sent.total_gaps, received.total_gaps);

    tracing::info!(%verdict, "Verification complete");

    Ok(VerificationSummary {
        directory: dir.to_path_buf(),
        sent,
        received,
        verdict,
    })
}
