use serde::{Deserialize, Serialize};

use crate::process::engine::{SampleFormat, StreamConfig};

/// End-of-run totals, written as `info.json`.
///
/// Field order is the key order of the JSON record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub sample_rate: u32,
    pub channels: u8,
    /// Every frame whose header was accepted, decoded or not.
    pub total_frames: u64,
    /// Per-channel samples summed over successfully decoded frames.
    pub total_samples: u64,
    pub format: String,
}

impl RunSummary {
    pub fn new(config: StreamConfig, format: SampleFormat) -> Self {
        Self {
            sample_rate: config.sample_rate,
            channels: config.channels,
            total_frames: 0,
            total_samples: 0,
            format: format.label().to_string(),
        }
    }

    pub fn record_frame(&mut self) {
        self.total_frames += 1;
    }

    pub fn record_samples(&mut self, samples_per_channel: usize) {
        self.total_samples += samples_per_channel as u64;
    }

    /// Pretty JSON with two-space indent and a trailing newline.
    pub fn to_json(&self) -> serde_json::Result<String> {
        let mut json = serde_json::to_string_pretty(self)?;
        json.push('\n');
        Ok(json)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_layout_is_stable() {
        let mut summary = RunSummary::new(
            StreamConfig {
                sample_rate: 44100,
                channels: 2,
            },
            SampleFormat::Int16,
        );
        summary.record_frame();
        summary.record_frame();
        summary.record_samples(1024);

        assert_eq!(
            summary.to_json().unwrap(),
            "{\n  \"sample_rate\": 44100,\n  \"channels\": 2,\n  \"total_frames\": 2,\n  \"total_samples\": 1024,\n  \"format\": \"int16\"\n}\n"
        );
        assert_eq!(
            RunSummary::from_json(&summary.to_json().unwrap()).unwrap(),
            summary
        );
    }
}
