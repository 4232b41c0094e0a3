use crate::error;
use crate::lang::Error;
use std::collections::HashMap;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use tracing::warn;

type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Read,
    Write,
    Append,
}

impl Mode {
    pub fn parse(s: &str) -> Result<Mode> {
        match s.trim().to_ascii_uppercase().as_str() {
            "" | "R" | "READ" | "INPUT" => Ok(Mode::Read),
            "W" | "WRITE" | "OUTPUT" => Ok(Mode::Write),
            "A" | "APPEND" => Ok(Mode::Append),
            _ => Err(error!(BadFileMode; s)),
        }
    }
}

#[derive(Debug)]
enum Handle {
    Reader(BufReader<File>),
    Writer(BufWriter<File>),
}

/// ## Open file handles
///
/// Handles are numbered by the program. Dropping the table closes and
/// flushes everything still open.

#[derive(Debug, Default)]
pub struct Files {
    handles: HashMap<i64, Handle>,
}

impl Files {
    pub fn new() -> Files {
        Files::default()
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Opening a number that is already open closes the old file first.
    pub fn open<P: AsRef<Path>>(&mut self, number: i64, path: P, mode: Mode) -> Result<()> {
        if self.handles.contains_key(&number) {
            self.close(number)?;
        }
        let handle = match mode {
            Mode::Read => Handle::Reader(BufReader::new(File::open(path)?)),
            Mode::Write => Handle::Writer(BufWriter::new(File::create(path)?)),
            Mode::Append => Handle::Writer(BufWriter::new(
                OpenOptions::new().append(true).create(true).open(path)?,
            )),
        };
        self.handles.insert(number, handle);
        Ok(())
    }

    pub fn close(&mut self, number: i64) -> Result<()> {
        match self.handles.remove(&number) {
            Some(Handle::Writer(mut w)) => Ok(w.flush()?),
            Some(Handle::Reader(_)) => Ok(()),
            None => Err(error!(BadFileNumber; number.to_string())),
        }
    }

    /// Close every handle. Returns how many writers failed to flush.
    pub fn close_all(&mut self) -> usize {
        let mut failed = 0;
        for (number, handle) in self.handles.drain() {
            if let Handle::Writer(mut w) = handle {
                if let Err(error) = w.flush() {
                    warn!(number, %error, "flush failed on close");
                    failed += 1;
                }
            }
        }
        failed
    }

    /// Next line without its terminator, or `None` at end of file.
    pub fn read_line(&mut self, number: i64) -> Result<Option<String>> {
        let reader = match self.handles.get_mut(&number) {
            Some(Handle::Reader(r)) => r,
            Some(Handle::Writer(_)) => return Err(error!(BadFileMode; number.to_string())),
            None => return Err(error!(BadFileNumber; number.to_string())),
        };
        let mut s = String::new();
        if reader.read_line(&mut s)? == 0 {
            return Ok(None);
        }
        let len = s.trim_end_matches(&['\r', '\n'][..]).len();
        s.truncate(len);
        Ok(Some(s))
    }

    pub fn write_line(&mut self, number: i64, text: &str) -> Result<()> {
        match self.handles.get_mut(&number) {
            Some(Handle::Writer(w)) => Ok(writeln!(w, "{}", text)?),
            Some(Handle::Reader(_)) => Err(error!(BadFileMode; number.to_string())),
            None => Err(error!(BadFileNumber; number.to_string())),
        }
    }

    pub fn eof(&mut self, number: i64) -> Result<bool> {
        match self.handles.get_mut(&number) {
            Some(Handle::Reader(r)) => Ok(r.fill_buf()?.is_empty()),
            Some(Handle::Writer(_)) => Ok(true),
            None => Err(error!(BadFileNumber; number.to_string())),
        }
    }
}

impl Drop for Files {
    fn drop(&mut self) {
        self.close_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lang::ErrorCode;

    #[test]
    fn test_write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.txt");
        let mut files = Files::new();
        files.open(1, &path, Mode::Write).unwrap();
        files.write_line(1, "alpha").unwrap();
        files.write_line(1, "beta").unwrap();
        files.close(1).unwrap();
        files.open(2, &path, Mode::Read).unwrap();
        assert!(!files.eof(2).unwrap());
        assert_eq!(files.read_line(2).unwrap().as_deref(), Some("alpha"));
        assert_eq!(files.read_line(2).unwrap().as_deref(), Some("beta"));
        assert!(files.eof(2).unwrap());
        assert_eq!(files.read_line(2).unwrap(), None);
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_close_all_counts_failed_flushes() {
        let dir = tempfile::tempdir().unwrap();
        let mut files = Files::new();
        files.open(1, "/dev/full", Mode::Write).unwrap();
        files.write_line(1, "lost").unwrap();
        files.open(2, dir.path().join("kept.txt"), Mode::Write).unwrap();
        files.write_line(2, "kept").unwrap();
        assert_eq!(files.close_all(), 1);
        assert_eq!(files.close(1).unwrap_err().code(), ErrorCode::BadFileNumber);
    }

    #[test]
    fn test_bad_handles() {
        let mut files = Files::new();
        assert_eq!(files.close(9).unwrap_err().code(), ErrorCode::BadFileNumber);
        assert_eq!(
            files
                .open(1, "/nonexistent/unibasic/x", Mode::Read)
                .unwrap_err()
                .code(),
            ErrorCode::FileNotFound
        );
        assert_eq!(Mode::parse("Q").unwrap_err().code(), ErrorCode::BadFileMode);
    }
}
