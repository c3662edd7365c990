//! Text and JSON rendering of a verification run

use crate::analysis::direction::{DirectionReport, FileReport, VerificationSummary};
use crate::config::VerifyConfig;
use std::io::{self, Write};

/// Write one file's line plus its example gaps
pub fn write_file_report(out: &mut impl Write, file: &FileReport) -> io::Result<()> {
    if file.gap_count == 0 {
        return writeln!(out, "  {}: {} records, no gaps", file.filename, file.record_count);
    }

    writeln!(
        out,
        "  {}: {} records, {} gaps, {} lost",
        file.filename, file.record_count, file.gap_count, file.samples_lost
    )?;
    for gap in &file.example_gaps {
        writeln!(
            out,
            "    frame {}: expected {}, got {} (gap={})",
            gap.frame_index, gap.expected, gap.observed, gap.size
        )?;
    }
    let elided = file.elided_gaps();
    if elided > 0 {
        writeln!(out, "    ... and {} more gaps", elided)?;
    }
    Ok(())
}

/// Write a direction section: heading, per-file lines, and total
pub fn write_direction(
    out: &mut impl Write,
    report: &DirectionReport,
    config: &VerifyConfig,
) -> io::Result<()> {
    let direction = report.direction;
    writeln!(
        out,
        "=== {} ({}) ===",
        direction.label(),
        direction.callback()
    )?;

    if report.no_files_found() {
        writeln!(
            out,
            "  No {}_*.{} files found",
            direction.prefix(config),
            config.extension
        )?;
        return writeln!(out);
    }

    for file in &report.files {
        write_file_report(out, file)?;
    }
    writeln!(out)?;
    writeln!(
        out,
        "  {} TOTAL: {} records, {} gaps, {} samples lost",
        direction.label(),
        report.total_records,
        report.total_gaps,
        report.total_lost
    )?;
    writeln!(out)
}

/// Write the full human-readable report
pub fn write_text(
    out: &mut impl Write,
    summary: &VerificationSummary,
    config: &VerifyConfig,
) -> io::Result<()> {
    writeln!(
        out,
        "Analyzing recordings in: {}",
        summary.directory.display()
    )?;
    writeln!(out)?;

    write_direction(out, &summary.sent, config)?;
    write_direction(out, &summary.received, config)?;

    writeln!(out, "=== SUMMARY ===")?;
    writeln!(
        out,
        "  Sent gaps:     {} ({} samples)",
        summary.sent.total_gaps, summary.sent.total_lost
    )?;
    writeln!(
        out,
        "  Received gaps: {} ({} samples)",
        summary.received.total_gaps, summary.received.total_lost
    )?;
    writeln!(out)?;
    writeln!(out, "  {}", summary.verdict.headline())?;
    if let Some(detail) = summary.verdict.detail() {
        writeln!(out, "  {}", detail)?;
    }
    Ok(())
}

/// Write the summary as pretty-printed JSON
pub fn write_json(out: &mut impl Write, summary: &VerificationSummary) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, summary)?;
    writeln!(out)
}
