//! vfs.file.size - file size in bytes or newline count

use std::fs::{self, File};
use std::io::{self, Read};
use std::path::Path;
use std::str::FromStr;

use tracing::debug;

use crate::vfs::error::SizeError;

/// Read chunk size for line counting (64 KB)
pub const CHUNK_SIZE: usize = 64 * 1024;

const NEWLINE: u8 = b'\n';

/// What to measure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SizeMode {
    #[default]
    Bytes,
    Lines,
}

impl SizeMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SizeMode::Bytes => "bytes",
            SizeMode::Lines => "lines",
        }
    }
}

impl FromStr for SizeMode {
    type Err = SizeError;

    /// Empty selects the default; anything else must match exactly.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" | "bytes" => Ok(SizeMode::Bytes),
            "lines" => Ok(SizeMode::Lines),
            _ => Err(SizeError::InvalidMode),
        }
    }
}

/// Export handler for `vfs.file.size[file,<mode>]`
pub fn export_size<S: AsRef<str>>(params: &[S]) -> Result<u64, SizeError> {
    if params.is_empty() || params.len() > 2 {
        return Err(SizeError::InvalidParameterCount);
    }

    let path = params[0].as_ref();
    if path.is_empty() {
        return Err(SizeError::InvalidPath);
    }

    let mode: SizeMode = match params.get(1) {
        Some(mode) => mode.as_ref().parse()?,
        None => SizeMode::default(),
    };

    debug!(path, mode = mode.as_str(), "exporting file size");

    match mode {
        SizeMode::Bytes => file_bytes(Path::new(path)),
        SizeMode::Lines => count_lines(Path::new(path)),
    }
}

/// Byte length as reported by filesystem metadata
pub fn file_bytes(path: &Path) -> Result<u64, SizeError> {
    let metadata = fs::metadata(path).map_err(SizeError::Stat)?;
    Ok(metadata.len())
}

/// Count newline bytes in a file
pub fn count_lines(path: &Path) -> Result<u64, SizeError> {
    let file = File::open(path).map_err(SizeError::Open)?;
    count_newlines(file).map_err(SizeError::Read)
}

/// Count newline bytes in a reader, one chunk at a time.
///
/// A final line without a terminator is not counted.
pub fn count_newlines<R: Read>(mut reader: R) -> io::Result<u64> {
    let mut buf = vec![0u8; CHUNK_SIZE];
    let mut count: u64 = 0;

    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => return Ok(count),
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        count += buf[..n].iter().filter(|&&b| b == NEWLINE).count() as u64;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn params(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    /// Yields its data once, then fails
    struct FailingReader {
        data: Option<Vec<u8>>,
    }

    impl Read for FailingReader {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            match self.data.take() {
                Some(data) => {
                    let n = data.len().min(buf.len());
                    buf[..n].copy_from_slice(&data[..n]);
                    Ok(n)
                }
                None => Err(io::Error::other("device went away")),
            }
        }
    }

    /// Interrupts every other read
    struct InterruptingReader<R> {
        inner: R,
        interrupt: bool,
    }

    impl<R: Read> Read for InterruptingReader<R> {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            self.interrupt = !self.interrupt;
            if self.interrupt {
                return Err(io::Error::from(io::ErrorKind::Interrupted));
            }
            self.inner.read(buf)
        }
    }

    #[test]
    fn test_parameter_count() {
        let empty: Vec<String> = Vec::new();
        assert!(matches!(
            export_size(&empty),
            Err(SizeError::InvalidParameterCount)
        ));
        assert!(matches!(
            export_size(&params(&["/tmp", "bytes", "extra"])),
            Err(SizeError::InvalidParameterCount)
        ));
    }

    #[test]
    fn test_empty_path() {
        assert!(matches!(
            export_size(&params(&[""])),
            Err(SizeError::InvalidPath)
        ));
        // path is checked before mode
        assert!(matches!(
            export_size(&params(&["", "frobnicate"])),
            Err(SizeError::InvalidPath)
        ));
    }

    #[test]
    fn test_bytes_mode() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("ten.txt");
        fs::write(&path, "0123456789").unwrap();
        let path = path.to_str().unwrap();

        assert_eq!(export_size(&params(&[path])).unwrap(), 10);
        assert_eq!(export_size(&params(&[path, "bytes"])).unwrap(), 10);
        assert_eq!(export_size(&params(&[path, ""])).unwrap(), 10);
    }

    #[test]
    fn test_lines_mode() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("three.txt");
        fs::write(&path, "one\ntwo\nthree\nno newline here").unwrap();
        let path = path.to_str().unwrap();

        assert_eq!(export_size(&params(&[path, "lines"])).unwrap(), 3);
    }

    #[test]
    fn test_lines_empty_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("empty.txt");
        fs::write(&path, "").unwrap();
        let path = path.to_str().unwrap();

        assert_eq!(export_size(&params(&[path, "lines"])).unwrap(), 0);
        assert_eq!(export_size(&params(&[path])).unwrap(), 0);
    }

    #[test]
    fn test_nonexistent_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing.txt");
        let path = path.to_str().unwrap();

        let err = export_size(&params(&[path])).unwrap_err();
        assert!(matches!(err, SizeError::Stat(_)));
        assert!(err.to_string().starts_with("Cannot obtain file information: "));

        let err = export_size(&params(&[path, "lines"])).unwrap_err();
        assert!(matches!(err, SizeError::Open(_)));
        assert!(err.to_string().starts_with("Invalid first parameter: "));
    }

    #[test]
    fn test_invalid_mode() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a.txt");
        fs::write(&path, "a\n").unwrap();
        let path = path.to_str().unwrap();

        assert!(matches!(
            export_size(&params(&[path, "frobnicate"])),
            Err(SizeError::InvalidMode)
        ));
        // modes are case-sensitive
        assert!(matches!(
            export_size(&params(&[path, "LINES"])),
            Err(SizeError::InvalidMode)
        ));
    }

    // Opening a directory succeeds on unix, reading it does not
    #[cfg(unix)]
    #[test]
    fn test_lines_on_directory_is_read_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().to_str().unwrap();

        assert!(matches!(
            export_size(&params(&[path, "lines"])),
            Err(SizeError::Read(_))
        ));
    }

    #[test]
    fn test_chunk_boundaries() {
        let dir = TempDir::new().unwrap();

        let exact = dir.path().join("exact.txt");
        fs::write(&exact, vec![b'\n'; CHUNK_SIZE]).unwrap();
        assert_eq!(count_lines(&exact).unwrap(), CHUNK_SIZE as u64);

        let mut data = vec![b'x'; 2 * CHUNK_SIZE + 1];
        data[CHUNK_SIZE - 1] = b'\n';
        data[CHUNK_SIZE] = b'\n';
        data[2 * CHUNK_SIZE] = b'\n';
        let spanning = dir.path().join("spanning.txt");
        fs::write(&spanning, &data).unwrap();
        assert_eq!(count_lines(&spanning).unwrap(), 3);
    }

    #[test]
    fn test_only_bytes_read_are_counted() {
        // A short second read must not see stale newlines from the first one
        let mut data = vec![b'\n'; CHUNK_SIZE];
        data.extend_from_slice(b"ab");
        assert_eq!(count_newlines(data.as_slice()).unwrap(), CHUNK_SIZE as u64);
    }

    #[test]
    fn test_read_error_discards_count() {
        let reader = FailingReader {
            data: Some(b"a\nb\nc\n".to_vec()),
        };
        let err = count_newlines(reader).unwrap_err();
        assert_eq!(err.to_string(), "device went away");
    }

    #[test]
    fn test_interrupted_reads_are_retried() {
        let reader = InterruptingReader {
            inner: &b"1\n2\n"[..],
            interrupt: false,
        };
        assert_eq!(count_newlines(reader).unwrap(), 2);
    }

    #[test]
    fn test_size_mode_parse() {
        assert_eq!("".parse::<SizeMode>().unwrap(), SizeMode::Bytes);
        assert_eq!("bytes".parse::<SizeMode>().unwrap(), SizeMode::Bytes);
        assert_eq!("lines".parse::<SizeMode>().unwrap(), SizeMode::Lines);
        assert!("words".parse::<SizeMode>().is_err());
    }
}
