//! CSV draw log files.

use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use log::debug;
use serde::Deserialize;

use varlab_risk::{DrawKey, DrawLog, DrawRecord};

use crate::error::{FileError, FileResult};

/// Column names, in file order.
pub const HEADER: [&str; 3] = ["sequence", "key", "value"];

// =============================================================================
// CSV DRAW LOG
// =============================================================================

/// CSV record for one draw.
#[derive(Debug, Deserialize)]
struct DrawRow {
    sequence: usize,
    key: String,
    value: f64,
}

/// Writes `log` as CSV with a `sequence,key,value` header.
///
/// Values use the shortest representation that parses back to the same
/// `f64`, so a written log reloads bit for bit.
pub fn write_draw_log<W: Write>(writer: W, log: &DrawLog) -> FileResult<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(HEADER)?;
    for record in log {
        csv.write_record(&[
            record.sequence.to_string(),
            record.key.to_string(),
            record.value.to_string(),
        ])?;
    }
    csv.flush()?;
    Ok(())
}

/// Reads a CSV draw log written by [`write_draw_log`].
///
/// # Errors
///
/// - `Format` for a wrong header or a malformed key
/// - `Csv` for unparseable rows
/// - `Risk` if sequence numbers are not contiguous from zero
pub fn read_draw_log<R: Read>(reader: R) -> FileResult<DrawLog> {
    let mut csv = csv::Reader::from_reader(reader);
    let headers = csv.headers()?;
    if headers.iter().ne(HEADER) {
        let found = headers.iter().collect::<Vec<_>>().join(",");
        return Err(FileError::format(
            1,
            format!("expected header {}, got {found}", HEADER.join(",")),
        ));
    }

    let mut records = Vec::new();
    for (index, row) in csv.deserialize::<DrawRow>().enumerate() {
        let row = row?;
        let line = index + 2;
        let key: DrawKey = row
            .key
            .parse()
            .map_err(|e: varlab_risk::RiskError| FileError::format(line, e.to_string()))?;
        records.push(DrawRecord {
            sequence: row.sequence,
            key,
            value: row.value,
        });
    }

    Ok(DrawLog::from_records(records)?)
}

/// A draw log stored at a fixed path.
///
/// # Example
///
/// ```rust,no_run
/// use varlab_ext_file::DrawLogFile;
/// use varlab_risk::{DrawKey, DrawProvider};
///
/// let mut recorder = DrawProvider::recording(1);
/// recorder.next_uniform(DrawKey::new(0, 0, 0)).unwrap();
///
/// let file = DrawLogFile::new("draws.csv");
/// file.write(recorder.log().unwrap()).unwrap();
/// let replay = DrawProvider::replaying(file.read().unwrap()).unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct DrawLogFile {
    file_path: PathBuf,
}

impl DrawLogFile {
    /// Creates a handle for `file_path`; nothing is touched until read or write.
    pub fn new(file_path: impl AsRef<Path>) -> Self {
        Self {
            file_path: file_path.as_ref().to_path_buf(),
        }
    }

    /// The file location.
    pub fn path(&self) -> &Path {
        &self.file_path
    }

    /// Returns true if the file exists.
    pub fn exists(&self) -> bool {
        self.file_path.exists()
    }

    /// Writes `log`, replacing any existing file.
    pub fn write(&self, log: &DrawLog) -> FileResult<()> {
        let file = std::fs::File::create(&self.file_path)?;
        write_draw_log(std::io::BufWriter::new(file), log)?;
        debug!("wrote {} draws to {}", log.len(), self.file_path.display());
        Ok(())
    }

    /// Reads the log back.
    pub fn read(&self) -> FileResult<DrawLog> {
        let file = std::fs::File::open(&self.file_path)?;
        let log = read_draw_log(std::io::BufReader::new(file))?;
        debug!("read {} draws from {}", log.len(), self.file_path.display());
        Ok(log)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use varlab_risk::DrawProvider;

    fn recorded(n: usize) -> DrawLog {
        let mut provider = DrawProvider::recording(17);
        for i in 0..n {
            provider
                .next_uniform(DrawKey::new(i / 4, 0, (i % 4) as u32))
                .unwrap();
        }
        provider.take_log().unwrap()
    }

    #[test]
    fn test_round_trip_in_memory() {
        let log = recorded(64);
        let mut buf = Vec::new();
        write_draw_log(&mut buf, &log).unwrap();

        let text = String::from_utf8(buf.clone()).unwrap();
        assert!(text.starts_with("sequence,key,value\n0,0:0:0,"));

        let back = read_draw_log(buf.as_slice()).unwrap();
        assert_eq!(back, log);
        for (a, b) in back.iter().zip(&log) {
            assert_eq!(a.value.to_bits(), b.value.to_bits());
        }
    }

    #[test]
    fn test_rejects_bad_header() {
        let text = "seq,key,value\n0,0:0:0,0.5\n";
        assert!(matches!(
            read_draw_log(text.as_bytes()),
            Err(FileError::Format { line: 1, .. })
        ));
    }

    #[test]
    fn test_rejects_bad_key() {
        let text = "sequence,key,value\n0,0-0-0,0.5\n";
        assert!(matches!(
            read_draw_log(text.as_bytes()),
            Err(FileError::Format { line: 2, .. })
        ));
    }

    #[test]
    fn test_rejects_sequence_gap() {
        let text = "sequence,key,value\n0,0:0:0,0.5\n2,0:0:1,0.25\n";
        assert!(matches!(
            read_draw_log(text.as_bytes()),
            Err(FileError::Risk(_))
        ));
    }

    #[test]
    fn test_rejects_unparseable_value() {
        let text = "sequence,key,value\n0,0:0:0,half\n";
        assert!(matches!(read_draw_log(text.as_bytes()), Err(FileError::Csv(_))));
    }

    #[test]
    fn test_empty_log() {
        let mut buf = Vec::new();
        write_draw_log(&mut buf, &DrawLog::new()).unwrap();
        assert!(read_draw_log(buf.as_slice()).unwrap().is_empty());
    }
}
