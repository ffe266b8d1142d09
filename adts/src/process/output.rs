//! On-disk dump artifacts.
//!
//! Every path is a pure function of the run directory and the frame index:
//!
//! - `frame_NNNN_adts.bin`: 16-byte header record, see [`HeaderArtifact`]
//! - `frame_NNNN_pcm.bin`: raw interleaved little-endian samples
//! - `info.json`: the [`RunSummary`]

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::process::engine::PcmBuffer;
use crate::process::summary::RunSummary;
use crate::structs::artifact::HeaderArtifact;
use crate::structs::header::AdtsHeader;

pub const SUMMARY_FILE_NAME: &str = "info.json";

pub fn header_artifact_name(frame_index: u64) -> String {
    format!("frame_{frame_index:04}_adts.bin")
}

pub fn samples_artifact_name(frame_index: u64) -> String {
    format!("frame_{frame_index:04}_pcm.bin")
}

#[derive(Debug)]
pub struct ArtifactWriter {
    run_dir: PathBuf,
}

impl ArtifactWriter {
    /// Creates `run_dir` (and parents) if needed.
    pub fn create<P: AsRef<Path>>(run_dir: P) -> Result<Self> {
        let run_dir = run_dir.as_ref().to_path_buf();
        fs::create_dir_all(&run_dir)
            .with_context(|| format!("cannot create {}", run_dir.display()))?;
        Ok(Self { run_dir })
    }

    pub fn run_dir(&self) -> &Path {
        &self.run_dir
    }

    pub fn write_header_artifact(&self, frame_index: u64, header: &AdtsHeader) -> Result<()> {
        let bytes = HeaderArtifact::from(header).to_bytes();
        self.dump(&header_artifact_name(frame_index), &bytes)
    }

    /// Writes `samples_per_channel * channels` samples; byte width follows
    /// the buffer's sample type.
    pub fn write_samples_artifact(
        &self,
        frame_index: u64,
        samples: &PcmBuffer,
        samples_per_channel: usize,
        channels: u8,
    ) -> Result<()> {
        let bytes = samples.le_bytes(samples_per_channel * channels as usize);
        self.dump(&samples_artifact_name(frame_index), &bytes)
    }

    pub fn write_summary_artifact(&self, summary: &RunSummary) -> Result<()> {
        let json = summary.to_json()?;
        self.dump(SUMMARY_FILE_NAME, json.as_bytes())
    }

    fn dump(&self, name: &str, data: &[u8]) -> Result<()> {
        let path = self.run_dir.join(name);
        let file = File::create(&path).with_context(|| format!("cannot create {}", path.display()))?;

        let mut writer = BufWriter::new(file);
        writer.write_all(data)?;
        writer.flush()?;

        log::trace!("Wrote {} bytes to {}", data.len(), path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::engine::{SampleFormat, StreamConfig};

    #[test]
    fn artifact_names_are_zero_padded() {
        assert_eq!(header_artifact_name(0), "frame_0000_adts.bin");
        assert_eq!(samples_artifact_name(42), "frame_0042_pcm.bin");
        assert_eq!(header_artifact_name(12345), "frame_12345_adts.bin");
    }

    #[test]
    fn writes_are_deterministic() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let writer = ArtifactWriter::create(dir.path().join("nested/run"))?;

        let header = AdtsHeader {
            protection_absent: true,
            profile: 1,
            sampling_frequency_index: 4,
            channel_configuration: 2,
            frame_length: 100,
            buffer_fullness: 0x7FF,
            ..Default::default()
        };

        writer.write_header_artifact(3, &header)?;
        let first = fs::read(writer.run_dir().join("frame_0003_adts.bin"))?;
        writer.write_header_artifact(3, &header)?;
        let second = fs::read(writer.run_dir().join("frame_0003_adts.bin"))?;

        assert_eq!(first, second);
        assert_eq!(
            first,
            [0x0F, 0xFF, 0, 0, 1, 1, 4, 0, 2, 0, 0, 0x00, 0x64, 0x07, 0xFF, 0]
        );
        Ok(())
    }

    #[test]
    fn sample_artifact_length_follows_format_width() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let writer = ArtifactWriter::create(dir.path())?;

        let cases = [
            (PcmBuffer::Int16(vec![0; 8]), 2),
            (PcmBuffer::Int32(vec![0; 8]), 4),
            (PcmBuffer::Float(vec![0.0; 8]), 4),
            (PcmBuffer::Double(vec![0.0; 8]), 8),
        ];

        for (i, (samples, width)) in cases.iter().enumerate() {
            writer.write_samples_artifact(i as u64, samples, 3, 2)?;
            let written = fs::read(dir.path().join(samples_artifact_name(i as u64)))?;
            assert_eq!(written.len(), 3 * 2 * width);
        }
        Ok(())
    }

    #[test]
    fn summary_round_trips() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let writer = ArtifactWriter::create(dir.path())?;

        let summary = RunSummary::new(
            StreamConfig {
                sample_rate: 48000,
                channels: 1,
            },
            SampleFormat::Float,
        );
        writer.write_summary_artifact(&summary)?;

        let json = fs::read_to_string(dir.path().join(SUMMARY_FILE_NAME))?;
        assert_eq!(RunSummary::from_json(&json)?, summary);
        assert!(json.contains("\"format\": \"float32\""));
        Ok(())
    }
}
