use std::path::Path;

use anyhow::{Result, anyhow, bail};
use log::{debug, info, trace, warn};

use crate::log_or_err;
use crate::process::engine::{DecodeEngine, EngineSession, StreamConfig};
use crate::process::extract::find_sync;
use crate::process::output::ArtifactWriter;
use crate::process::source::ByteSource;
use crate::process::summary::RunSummary;
use crate::structs::header::{parse_header, validate_frame};
use crate::utils::errors::{FrameError, RunError};

/// Run limits and error policy.
#[derive(Debug, Clone, Copy)]
pub struct DriverOptions {
    /// Upper bound on accepted headers. `u64::MAX` means unbounded.
    pub max_frames: u64,
    /// Recoverable conditions at or above this level abort the run.
    ///
    /// - `log::Level::Error`: only fatal conditions fail (default)
    /// - `log::Level::Warn`: invalid headers and decode errors fail too (strict mode)
    pub fail_level: log::Level,
}

impl Default for DriverOptions {
    fn default() -> Self {
        Self {
            max_frames: u64::MAX,
            fail_level: log::Level::Error,
        }
    }
}

impl DriverOptions {
    /// Maps an optional signed frame limit to `max_frames`.
    ///
    /// Absent means unbounded; zero or negative means no frames at all.
    pub fn frame_limit(limit: Option<i64>) -> u64 {
        match limit {
            None => u64::MAX,
            Some(n) if n <= 0 => 0,
            Some(n) => n as u64,
        }
    }
}

/// What one [`Driver::step`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// The engine decoded the frame. `samples_per_channel` is zero when it
    /// produced no output.
    Decoded {
        frame: u64,
        offset: usize,
        samples_per_channel: usize,
    },
    /// The header was accepted but the engine failed on the frame.
    DecodeFailed { frame: u64, offset: usize },
    /// The candidate at `offset` was rejected; scanning resumes one byte later.
    Resync { offset: usize },
}

/// Walks an ADTS stream frame by frame, dumping per-frame artifacts.
///
/// Construction finds the first sync word, initialises the engine and
/// creates the output directory, in that order. Nothing is written to disk
/// when any of these fail. The engine is closed exactly once when the
/// driver is dropped, whatever the outcome.
pub struct Driver<E: DecodeEngine> {
    source: ByteSource,
    session: EngineSession<E>,
    writer: ArtifactWriter,
    config: StreamConfig,
    summary: RunSummary,
    options: DriverOptions,
    cursor: usize,
    frame_index: u64,
}

impl<E: DecodeEngine> Driver<E> {
    pub fn new<P: AsRef<Path>>(
        source: ByteSource,
        engine: E,
        output_dir: P,
        options: DriverOptions,
    ) -> Result<Self> {
        let mut session = EngineSession::new(engine);
        let data = source.as_slice();

        let Some(start) = find_sync(data, 0, data.len()) else {
            bail!(RunError::NoSyncWord(data.len()));
        };
        if start > 0 {
            warn!("skipped {start} bytes to find ADTS sync");
        }

        let config = session
            .init(&data[start..])
            .map_err(|e| RunError::EngineInit(e.to_string()))?;
        info!(
            "Initialized: {} Hz, {} channels",
            config.sample_rate, config.channels
        );

        let writer = ArtifactWriter::create(output_dir)?;
        let summary = RunSummary::new(config, session.sample_format());

        Ok(Self {
            source,
            session,
            writer,
            config,
            summary,
            options,
            cursor: start,
            frame_index: 0,
        })
    }

    pub fn config(&self) -> StreamConfig {
        self.config
    }

    pub fn summary(&self) -> &RunSummary {
        &self.summary
    }

    /// Byte offset where the next scan starts.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn stream_len(&self) -> usize {
        self.source.len()
    }

    /// Number of headers accepted so far; also the index of the next frame.
    pub fn frame_index(&self) -> u64 {
        self.frame_index
    }

    pub fn output_dir(&self) -> &Path {
        self.writer.run_dir()
    }

    /// Processes the next sync candidate. `Ok(None)` once the stream is
    /// exhausted or the frame limit is reached.
    pub fn step(&mut self) -> Result<Option<FrameOutcome>> {
        let data = self.source.as_slice();

        if self.frame_index >= self.options.max_frames || self.cursor >= data.len() {
            return Ok(None);
        }

        let Some(offset) = find_sync(data, self.cursor, data.len()) else {
            self.cursor = data.len();
            return Ok(None);
        };
        if offset > self.cursor {
            debug!("skipped {} bytes to find ADTS sync", offset - self.cursor);
        }

        let header = match parse_header(data, offset) {
            Ok(header) => header,
            Err(source) => {
                log_or_err!(
                    self.options,
                    log::Level::Warn,
                    anyhow!(RunError::InvalidHeader {
                        frame: self.frame_index,
                        source,
                    })
                );
                self.cursor = offset + 1;
                return Ok(Some(FrameOutcome::Resync { offset }));
            }
        };

        if let Err(source) = validate_frame(&header, offset, data.len()) {
            log_or_err!(
                self.options,
                log::Level::Warn,
                anyhow!(RunError::InvalidFrame {
                    frame: self.frame_index,
                    source,
                })
            );
            self.cursor = offset + 1;
            return Ok(Some(FrameOutcome::Resync { offset }));
        }

        let frame = self.frame_index;
        let frame_length = header.frame_length as usize;
        let Some(frame_bytes) = self.source.read(offset, frame_length) else {
            bail!(RunError::InvalidFrame {
                frame,
                source: FrameError::Overrun {
                    offset,
                    frame_length: header.frame_length,
                    stream_len: data.len(),
                },
            });
        };

        self.writer.write_header_artifact(frame, &header)?;

        // The cursor follows the declared length even if the engine consumed
        // a different amount.
        self.cursor = offset + frame_length;
        self.frame_index += 1;
        self.summary.record_frame();

        let decoded = match self.session.decode(frame_bytes) {
            Ok(decoded) => decoded,
            Err(failure) => {
                log_or_err!(
                    self.options,
                    log::Level::Warn,
                    anyhow!(RunError::Decode {
                        frame,
                        code: failure.code,
                        message: failure.message,
                    })
                );
                return Ok(Some(FrameOutcome::DecodeFailed { frame, offset }));
            }
        };

        let mut samples_per_channel = 0;
        if !decoded.samples.is_empty() {
            if decoded.channels == 0 {
                log_or_err!(
                    self.options,
                    log::Level::Warn,
                    anyhow!(RunError::NoChannels {
                        frame,
                        samples: decoded.sample_count(),
                    })
                );
            } else {
                samples_per_channel = decoded.samples_per_channel();
                self.writer.write_samples_artifact(
                    frame,
                    &decoded.samples,
                    samples_per_channel,
                    decoded.channels,
                )?;
                self.summary.record_samples(samples_per_channel);
            }
        }

        debug!(
            "Frame {frame}: {samples_per_channel} samples, {} channels",
            decoded.channels
        );
        trace!("Frame {frame} at offset {offset}: {header}");

        Ok(Some(FrameOutcome::Decoded {
            frame,
            offset,
            samples_per_channel,
        }))
    }

    /// Writes `info.json` and releases the engine.
    pub fn finish(self) -> Result<RunSummary> {
        self.writer.write_summary_artifact(&self.summary)?;
        info!(
            "Decoded {} frames, {} total samples",
            self.summary.total_frames, self.summary.total_samples
        );
        Ok(self.summary)
    }

    pub fn run(mut self) -> Result<RunSummary> {
        while self.step()?.is_some() {}
        self.finish()
    }
}
