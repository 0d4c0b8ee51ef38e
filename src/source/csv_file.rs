//! CSV file source
//!
//! Reads every record as a row. The header is not treated specially here;
//! it is simply row 0. Records may have differing widths. Every empty line
//! becomes an empty row, so row numbers follow line numbers.

use std::fs;
use std::path::PathBuf;

use csv::{ReaderBuilder, StringRecord};

use super::errors::{SourceError, SourceResult};
use super::RowSource;
use crate::observability::{log_event_with_fields, Event};
use crate::schema::Row;

/// CSV file read with the `csv` crate
#[derive(Debug, Clone)]
pub struct CsvFileSource {
    path: PathBuf,
    delimiter: u8,
}

impl CsvFileSource {
    /// Create a source for the file at `path` with a comma delimiter
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            delimiter: b',',
        }
    }

    /// Set custom delimiter
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    fn display_path(&self) -> String {
        self.path.display().to_string()
    }
}

/// Converts a record to a row. Empty fields become nil.
fn to_row(record: &StringRecord) -> Row {
    record
        .iter()
        .map(|field| {
            if field.is_empty() {
                None
            } else {
                Some(field.to_string())
            }
        })
        .collect()
}

fn byte_offset(position: u64, len: usize) -> usize {
    usize::try_from(position).map_or(len, |p| p.min(len))
}

/// Counts the empty lines at the start of `input`. `after_cr` is set when
/// the previous record ended on `\r`, so a leading `\n` still belongs to it.
fn leading_empty_lines(input: &[u8], after_cr: bool) -> usize {
    let mut rest = match input {
        [b'\n', tail @ ..] if after_cr => tail,
        _ => input,
    };
    let mut count = 0;
    loop {
        rest = match rest {
            [b'\r', b'\n', tail @ ..] => tail,
            [b'\r' | b'\n', tail @ ..] => tail,
            _ => return count,
        };
        count += 1;
    }
}

impl RowSource for CsvFileSource {
    fn name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.display_path())
    }

    fn exists(&self) -> bool {
        self.path.is_file()
    }

    fn read_all(&self) -> SourceResult<Vec<Row>> {
        if !self.exists() {
            return Err(SourceError::NotFound(self.display_path()));
        }

        let data = fs::read(&self.path).map_err(|e| SourceError::read(self.display_path(), e))?;
        let mut reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(false)
            .flexible(true)
            .from_reader(data.as_slice());

        let mut rows = Vec::new();
        let mut record = StringRecord::new();
        loop {
            let offset = byte_offset(reader.position().byte(), data.len());
            let more = reader
                .read_record(&mut record)
                .map_err(|e| SourceError::read(self.display_path(), e))?;

            // The reader skips empty lines; keep them as empty rows so row
            // numbers match line numbers and the blank-row check sees them.
            let after_cr = offset > 0 && data[offset - 1] == b'\r';
            for _ in 0..leading_empty_lines(&data[offset..], after_cr) {
                rows.push(Row::new());
            }
            if !more {
                break;
            }
            rows.push(to_row(&record));
        }

        let path = self.display_path();
        let count = rows.len().to_string();
        log_event_with_fields(
            Event::SourceRead,
            &[("path", path.as_str()), ("rows", count.as_str())],
        );

        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_csv(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_reads_all_rows_including_header() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(&dir, "people.csv", "id,name\n1,x\n2,y\n");

        let rows = CsvFileSource::new(&path).read_all().unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0], vec![Some("id".to_string()), Some("name".to_string())]);
    }

    #[test]
    fn test_empty_fields_are_nil() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(&dir, "people.csv", "id,name\n1,\n");

        let rows = CsvFileSource::new(&path).read_all().unwrap();
        assert_eq!(rows[1], vec![Some("1".to_string()), None]);
    }

    #[test]
    fn test_ragged_rows_allowed() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(&dir, "ragged.csv", "a,b\n1\n");

        let rows = CsvFileSource::new(&path).read_all().unwrap();
        assert_eq!(rows[1].len(), 1);
    }

    #[test]
    fn test_empty_lines_kept_as_empty_rows() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(&dir, "gaps.csv", "id,name\n1,x\n\n\n2,y\n");

        let rows = CsvFileSource::new(&path).read_all().unwrap();
        assert_eq!(rows.len(), 5);
        assert!(rows[2].is_empty());
        assert!(rows[3].is_empty());
        assert_eq!(rows[4], vec![Some("2".to_string()), Some("y".to_string())]);
    }

    #[test]
    fn test_crlf_empty_lines() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(&dir, "crlf.csv", "id\r\n1\r\n\r\n2\r\n");

        let rows = CsvFileSource::new(&path).read_all().unwrap();
        assert_eq!(rows.len(), 4);
        assert!(rows[2].is_empty());
        assert_eq!(rows[3], vec![Some("2".to_string())]);
    }

    #[test]
    fn test_trailing_newline_adds_no_row() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(&dir, "tail.csv", "id\n1\n");
        assert_eq!(CsvFileSource::new(&path).read_all().unwrap().len(), 2);

        let path = write_csv(&dir, "tail2.csv", "id\n1\n\n");
        let rows = CsvFileSource::new(&path).read_all().unwrap();
        assert_eq!(rows.len(), 3);
        assert!(rows[2].is_empty());
    }

    #[test]
    fn test_leading_empty_lines() {
        assert_eq!(leading_empty_lines(b"\n\r\n\rx", false), 3);
        assert_eq!(leading_empty_lines(b"\nx", true), 0);
        assert_eq!(leading_empty_lines(b"\n\nx", true), 1);
        assert_eq!(leading_empty_lines(b"x\n", false), 0);
        assert_eq!(leading_empty_lines(b"", false), 0);
    }

    #[test]
    fn test_quoted_newline_is_not_a_gap() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(&dir, "quoted.csv", "id,note\n1,\"two\nlines\"\n2,z\n");

        let rows = CsvFileSource::new(&path).read_all().unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1][1].as_deref(), Some("two\nlines"));
    }

    #[test]
    fn test_invalid_utf8_is_read_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.csv");
        fs::write(&path, b"id\n\xff\xfe\n").unwrap();

        let err = CsvFileSource::new(&path).read_all().unwrap_err();
        assert!(matches!(err, SourceError::Read { .. }));
    }

    #[test]
    fn test_custom_delimiter() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(&dir, "semi.csv", "a;b\n1;2\n");

        let rows = CsvFileSource::new(&path)
            .with_delimiter(b';')
            .read_all()
            .unwrap();
        assert_eq!(rows[1], vec![Some("1".to_string()), Some("2".to_string())]);
    }

    #[test]
    fn test_missing_file() {
        let dir = TempDir::new().unwrap();
        let source = CsvFileSource::new(dir.path().join("nope.csv"));

        assert!(!source.exists());
        let err = source.read_all().unwrap_err();
        assert!(matches!(err, SourceError::NotFound(_)));
    }

    #[test]
    fn test_name_is_basename() {
        let source = CsvFileSource::new("/data/in/people.csv");
        assert_eq!(source.name(), "people.csv");
    }
}
