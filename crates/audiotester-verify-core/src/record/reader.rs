//! Streaming record decoder
//!
//! [`RecordReader`] decodes one 10-byte record at a time from any `Read`
//! source, so large capture files are never held in memory. A trailing
//! chunk shorter than a full record is dropped without error.

use super::Record;
use crate::RECORD_SIZE;
use std::fs::File;
use std::io::{self, BufReader, ErrorKind, Read};
use std::path::Path;

/// Reads records from a byte stream
///
/// Generic over `R: Read` so tests can use `&[u8]` and production code
/// can use `BufReader<File>`. Re-opening the same file restarts the sequence.
pub struct RecordReader<R: Read> {
    reader: R,
    done: bool,
}

impl RecordReader<BufReader<File>> {
    /// Open a recording file for streaming
    pub fn open(path: &Path) -> io::Result<Self> {
        let file = File::open(path)?;
        Ok(Self::new(BufReader::with_capacity(8192, file)))
    }
}

impl<R: Read> RecordReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            done: false,
        }
    }

    /// Read the next record, or `None` once fewer than 10 bytes remain
    pub fn next_record(&mut self) -> io::Result<Option<Record>> {
        let mut buf = [0u8; RECORD_SIZE];
        let mut filled = 0;

        while filled < RECORD_SIZE {
            match self.reader.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }

        if filled < RECORD_SIZE {
            return Ok(None);
        }

        Ok(Some(Record::from_bytes(&buf)))
    }

}

impl<R: Read> Iterator for RecordReader<R> {
    type Item = io::Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.next_record() {
            Ok(Some(record)) => Some(Ok(record)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(records: &[Record]) -> Vec<u8> {
        records.iter().flat_map(|r| r.to_bytes()).collect()
    }

    /// Yields at most `chunk` bytes per read call
    struct Trickle<'a> {
        data: &'a [u8],
        chunk: usize,
    }

    impl Read for Trickle<'_> {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            let n = self.chunk.min(buf.len()).min(self.data.len());
            buf[..n].copy_from_slice(&self.data[..n]);
            self.data = &self.data[n..];
            Ok(n)
        }
    }

    #[test]
    fn test_reads_all_records_in_order() {
        let records: Vec<Record> = (0..5).map(|i| Record::new(i as u16, 1000 + i)).collect();
        let bytes = encode(&records);

        let decoded: Vec<Record> = RecordReader::new(bytes.as_slice())
            .collect::<io::Result<_>>()
            .unwrap();
        assert_eq!(decoded, records);
    }

    #[test]
    fn test_empty_source() {
        let mut reader = RecordReader::new(&[0u8; 0][..]);
        assert!(reader.next().is_none());
    }

    #[test]
    fn test_truncated_tail_is_dropped() {
        let records: Vec<Record> = (0..3).map(|i| Record::new(i as u16, i)).collect();
        let mut bytes = encode(&records);
        bytes.extend_from_slice(&[0xAB; 7]);
        assert_eq!(bytes.len(), 37);

        let mut reader = RecordReader::new(bytes.as_slice());
        let decoded: Vec<Record> = reader.by_ref().collect::<io::Result<_>>().unwrap();
        assert_eq!(decoded.len(), 37 / RECORD_SIZE);
        assert_eq!(decoded, records);
        assert!(reader.next().is_none());
    }

    #[test]
    fn test_short_reads_are_reassembled() {
        let records: Vec<Record> = (0..4)
            .map(|i| Record::new(65534u16.wrapping_add(i as u16), i))
            .collect();
        let bytes = encode(&records);

        let source = Trickle {
            data: &bytes,
            chunk: 3,
        };
        let decoded: Vec<Record> = RecordReader::new(source)
            .collect::<io::Result<_>>()
            .unwrap();
        assert_eq!(decoded, records);
    }

    #[test]
    fn test_read_error_ends_iteration() {
        struct Broken;
        impl Read for Broken {
            fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
                Err(io::Error::new(ErrorKind::Other, "disk gone"))
            }
        }

        let mut reader = RecordReader::new(Broken);
        assert!(matches!(reader.next(), Some(Err(_))));
        assert!(reader.next().is_none());
    }

    #[test]
    fn test_reopen_restarts_sequence() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sent_001.bin");
        let records: Vec<Record> = (0..10).map(|i| Record::new(i as u16, i)).collect();
        std::fs::write(&path, encode(&records)).unwrap();

        let first: Vec<Record> = RecordReader::open(&path)
            .unwrap()
            .collect::<io::Result<_>>()
            .unwrap();
        let second: Vec<Record> = RecordReader::open(&path)
            .unwrap()
            .collect::<io::Result<_>>()
            .unwrap();
        assert_eq!(first, second);
        assert_eq!(first, records);
    }
}
