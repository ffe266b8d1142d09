use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

use anyhow::{Context, Result};

/// The whole input stream, loaded once and read-only afterwards.
#[derive(Debug, Default)]
pub struct ByteSource {
    data: Vec<u8>,
    is_pipe: bool,
}

impl ByteSource {
    /// Reads `input_path` to the end. Use "-" for stdin.
    pub fn open<P: AsRef<Path>>(input_path: P) -> Result<Self> {
        let input_path = input_path.as_ref();
        let is_pipe = input_path.to_string_lossy() == "-";

        let mut reader: Box<dyn Read> = if is_pipe {
            Box::new(io::stdin().lock())
        } else {
            let file = File::open(input_path)
                .with_context(|| format!("cannot open {}", input_path.display()))?;
            Box::new(BufReader::new(file))
        };

        let mut data = Vec::new();
        reader
            .read_to_end(&mut data)
            .with_context(|| format!("cannot read {}", input_path.display()))?;

        log::debug!("Loaded {} bytes from {}", data.len(), input_path.display());

        Ok(Self { data, is_pipe })
    }

    pub fn from_bytes(data: impl Into<Vec<u8>>) -> Self {
        Self {
            data: data.into(),
            is_pipe: false,
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn is_pipe(&self) -> bool {
        self.is_pipe
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// `None` when `offset + len` runs past the end of the stream.
    pub fn read(&self, offset: usize, len: usize) -> Option<&[u8]> {
        self.data.get(offset..offset.checked_add(len)?)
    }
}

impl AsRef<[u8]> for ByteSource {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn random_access_reads() {
        let source = ByteSource::from_bytes(vec![1, 2, 3, 4, 5]);
        assert_eq!(source.len(), 5);
        assert_eq!(source.read(1, 3), Some(&[2, 3, 4][..]));
        assert_eq!(source.read(3, 2), Some(&[4, 5][..]));
        assert_eq!(source.read(3, 3), None);
        assert_eq!(source.read(usize::MAX, 2), None);
    }

    #[test]
    fn open_reads_whole_file() -> Result<()> {
        let mut file = tempfile::NamedTempFile::new()?;
        file.write_all(&[0xFF, 0xF1, 0x00])?;

        let source = ByteSource::open(file.path())?;
        assert_eq!(source.as_slice(), &[0xFF, 0xF1, 0x00]);
        assert!(!source.is_pipe());
        Ok(())
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = ByteSource::open(dir.path().join("missing.aac")).unwrap_err();
        assert!(err.to_string().starts_with("cannot open"));
    }
}
