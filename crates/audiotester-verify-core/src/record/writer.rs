//! Buffered record encoder
//!
//! Produces the same byte stream as the audiotester sample recorder, so
//! fixtures and external capture tools can emit files the verifier reads.

use super::Record;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Writes records to a byte sink through an 8 KiB buffer
pub struct RecordWriter<W: Write> {
    writer: BufWriter<W>,
}

impl RecordWriter<File> {
    /// Create (or truncate) a recording file
    pub fn create(path: &Path) -> io::Result<Self> {
        let file = File::create(path)?;
        tracing::debug!(path = %path.display(), "Opened recording file");
        Ok(Self::new(file))
    }
}

impl<W: Write> RecordWriter<W> {
    pub fn new(inner: W) -> Self {
        Self {
            writer: BufWriter::with_capacity(8192, inner),
        }
    }

    /// Append one record
    pub fn write_record(&mut self, record: &Record) -> io::Result<()> {
        self.writer.write_all(&record.to_bytes())
    }

    /// Append every record from an iterator
    pub fn write_records<'a, I>(&mut self, records: I) -> io::Result<()>
    where
        I: IntoIterator<Item = &'a Record>,
    {
        for record in records {
            self.write_record(record)?;
        }
        Ok(())
    }

    /// Flush buffered records to the underlying sink
    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}
