use crate::{Error, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

/// Default per-line cap. Raw-protocol payloads can carry whole tool results
/// on one line, so this is well above typical line sizes.
pub const DEFAULT_MAX_LINE_BYTES: usize = 1024 * 1024;

/// Per-scan counters for lines that were recovered from rather than parsed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScanStats {
    /// Non-blank lines read
    pub lines: usize,
    /// Lines skipped because they did not decode
    pub malformed_lines: usize,
    /// Lines processed without contributing to the time range
    pub bad_timestamps: usize,
}

/// Stream `path` as JSONL, decoding each non-blank line as `T`.
///
/// Lines that fail to decode are logged and skipped. A read failure or a
/// line longer than `max_line_bytes` aborts the scan. The file handle is
/// dropped on every return path.
pub(crate) fn scan_json_lines<T, F>(
    path: &Path,
    max_line_bytes: usize,
    mut on_record: F,
) -> Result<ScanStats>
where
    T: DeserializeOwned,
    F: FnMut(&mut ScanStats, usize, T),
{
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut stats = ScanStats::default();
    let mut buf: Vec<u8> = Vec::new();
    let mut line_no = 0usize;

    loop {
        buf.clear();
        // Room for the content plus a CRLF terminator
        let read = reader
            .by_ref()
            .take(max_line_bytes as u64 + 2)
            .read_until(b'\n', &mut buf)?;
        if read == 0 {
            break;
        }
        line_no += 1;

        if buf.last() == Some(&b'\n') {
            buf.pop();
            if buf.last() == Some(&b'\r') {
                buf.pop();
            }
        }
        if buf.len() > max_line_bytes {
            return Err(Error::LineTooLong {
                path: path.to_path_buf(),
                line: line_no,
                limit: max_line_bytes,
            });
        }

        if buf.iter().all(|b| b.is_ascii_whitespace()) {
            continue;
        }
        stats.lines += 1;

        match serde_json::from_slice::<T>(&buf) {
            Ok(record) => on_record(&mut stats, line_no, record),
            Err(err) => {
                stats.malformed_lines += 1;
                tracing::warn!(
                    path = %path.display(),
                    line = line_no,
                    error = %err,
                    "skipping malformed log line"
                );
            }
        }
    }

    if stats.malformed_lines > 0 {
        tracing::warn!(
            path = %path.display(),
            skipped = stats.malformed_lines,
            parsed = stats.lines - stats.malformed_lines,
            "log parsed with malformed lines skipped"
        );
    }

    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_temp(content: &[u8]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content).unwrap();
        file
    }

    fn collect(path: &Path, limit: usize) -> Result<(Vec<(usize, Value)>, ScanStats)> {
        let mut records = Vec::new();
        let stats = scan_json_lines::<Value, _>(path, limit, |_, line, value| {
            records.push((line, value));
        })?;
        Ok((records, stats))
    }

    #[test]
    fn test_skips_blank_and_malformed_lines() {
        let file = write_temp(b"{\"a\":1}\n\n   \nnot json\r\n{\"a\":2}");
        let (records, stats) = collect(file.path(), 1024).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].0, 1);
        assert_eq!(records[1].0, 5);
        assert_eq!(records[1].1["a"], 2);
        assert_eq!(stats.lines, 3);
        assert_eq!(stats.malformed_lines, 1);
    }

    #[test]
    fn test_line_exactly_at_limit_is_accepted() {
        let line = b"{\"k\":\"xxxx\"}";
        let mut content = line.to_vec();
        content.push(b'\n');
        let file = write_temp(&content);

        let (records, _) = collect(file.path(), line.len()).unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_limit_ignores_line_terminator() {
        let line = b"{\"k\":\"xxxx\"}";
        for terminator in [&b"\n"[..], &b"\r\n"[..], &b""[..]] {
            let mut content = line.to_vec();
            content.extend_from_slice(terminator);
            let file = write_temp(&content);

            let (records, _) = collect(file.path(), line.len()).unwrap();
            assert_eq!(records.len(), 1, "terminator {terminator:?}");
        }
    }

    #[test]
    fn test_one_byte_over_limit_is_fatal_with_crlf() {
        let file = write_temp(b"{\"k\":\"xxxxx\"}\r\n");
        let err = collect(file.path(), 12).unwrap_err();
        assert!(matches!(err, Error::LineTooLong { line: 1, .. }));
    }

    #[test]
    fn test_line_over_limit_is_fatal() {
        let file = write_temp(b"{\"a\":1}\n{\"k\":\"xxxxxxxxxxxxxxxxxxxx\"}\n{\"a\":3}\n");
        let err = collect(file.path(), 16).unwrap_err();

        match err {
            Error::LineTooLong { line, limit, .. } => {
                assert_eq!(line, 2);
                assert_eq!(limit, 16);
            }
            other => panic!("expected LineTooLong, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let temp = tempfile::TempDir::new().unwrap();
        let err = collect(&temp.path().join("absent.jsonl"), 1024).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
