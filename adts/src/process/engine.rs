//! The capability a decode engine has to offer the driver.
//!
//! The driver only ever calls `init` once, then `decode` once per valid
//! frame, then `close` exactly once through [`EngineSession`].

use std::fmt::{Display, Formatter};
use std::ops::{Deref, DerefMut};

use crate::utils::byteorder::WriteBytesLe;

/// Output sample encoding of an engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SampleFormat {
    #[default]
    Int16,
    /// 24-bit values in a 32-bit container.
    Int24,
    Int32,
    Float,
    Double,
}

impl SampleFormat {
    pub fn byte_width(self) -> usize {
        match self {
            Self::Int16 => 2,
            Self::Int24 | Self::Int32 | Self::Float => 4,
            Self::Double => 8,
        }
    }

    /// Label used in the run summary.
    pub fn label(self) -> &'static str {
        match self {
            Self::Int16 => "int16",
            Self::Int24 => "int24",
            Self::Int32 => "int32",
            Self::Float => "float32",
            Self::Double => "float64",
        }
    }
}

impl Display for SampleFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Interleaved decoded samples.
#[derive(Debug, Clone, PartialEq)]
pub enum PcmBuffer {
    Int16(Vec<i16>),
    Int32(Vec<i32>),
    Float(Vec<f32>),
    Double(Vec<f64>),
}

impl PcmBuffer {
    /// Total samples across all channels.
    pub fn len(&self) -> usize {
        match self {
            Self::Int16(s) => s.len(),
            Self::Int32(s) => s.len(),
            Self::Float(s) => s.len(),
            Self::Double(s) => s.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn byte_width(&self) -> usize {
        match self {
            Self::Int16(_) => 2,
            Self::Int32(_) | Self::Float(_) => 4,
            Self::Double(_) => 8,
        }
    }

    /// Little-endian bytes of the first `count` samples.
    pub fn le_bytes(&self, count: usize) -> Vec<u8> {
        let mut out = Vec::with_capacity(count * self.byte_width());
        match self {
            Self::Int16(s) => s[..count.min(s.len())].write_le(&mut out),
            Self::Int32(s) => s[..count.min(s.len())].write_le(&mut out),
            Self::Float(s) => s[..count.min(s.len())].write_le(&mut out),
            Self::Double(s) => s[..count.min(s.len())].write_le(&mut out),
        }
        out
    }
}

/// Stream configuration reported by `init`; fixed for the whole run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamConfig {
    pub sample_rate: u32,
    pub channels: u8,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DecodedFrame {
    pub samples: PcmBuffer,
    pub channels: u8,
}

impl DecodedFrame {
    /// Total interleaved samples in the frame.
    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }

    /// Samples per channel; zero when no channels are reported.
    pub fn samples_per_channel(&self) -> usize {
        match self.channels {
            0 => 0,
            ch => self.samples.len() / ch as usize,
        }
    }
}

/// A per-frame decode failure: engine-specific code plus message.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct DecodeFailure {
    pub code: u32,
    pub message: String,
}

impl DecodeFailure {
    pub fn new(code: u32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

/// Initialisation was rejected; fatal for the run.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct EngineError(pub String);

pub trait DecodeEngine {
    fn sample_format(&self) -> SampleFormat;

    /// Configures the engine from the stream bytes at the first sync word.
    fn init(&mut self, data: &[u8]) -> Result<StreamConfig, EngineError>;

    /// Decodes one complete ADTS frame, header included.
    fn decode(&mut self, frame: &[u8]) -> Result<DecodedFrame, DecodeFailure>;

    fn close(&mut self);
}

impl<E: DecodeEngine + ?Sized> DecodeEngine for Box<E> {
    fn sample_format(&self) -> SampleFormat {
        (**self).sample_format()
    }

    fn init(&mut self, data: &[u8]) -> Result<StreamConfig, EngineError> {
        (**self).init(data)
    }

    fn decode(&mut self, frame: &[u8]) -> Result<DecodedFrame, DecodeFailure> {
        (**self).decode(frame)
    }

    fn close(&mut self) {
        (**self).close()
    }
}

/// Owns an engine for one run and closes it exactly once when dropped.
pub struct EngineSession<E: DecodeEngine> {
    engine: E,
}

impl<E: DecodeEngine> EngineSession<E> {
    pub fn new(engine: E) -> Self {
        Self { engine }
    }
}

impl<E: DecodeEngine> Deref for EngineSession<E> {
    type Target = E;

    fn deref(&self) -> &E {
        &self.engine
    }
}

impl<E: DecodeEngine> DerefMut for EngineSession<E> {
    fn deref_mut(&mut self) -> &mut E {
        &mut self.engine
    }
}

impl<E: DecodeEngine> Drop for EngineSession<E> {
    fn drop(&mut self) {
        log::debug!("Closing decode engine");
        self.engine.close();
    }
}


#[cfg(test)]
mod tests {
    use super::testing::*;
    use super::*;

    #[test]
    fn session_closes_once_on_drop() {
        let engine = ScriptedEngine::stereo_44k();
        let log = engine.log.clone();

        {
            let mut session = EngineSession::new(engine);
            assert!(session.init(&[]).is_ok());
        }

        assert_eq!(log.borrow().init_calls, 1);
        assert_eq!(log.borrow().close_calls, 1);
    }

    #[test]
    fn sample_bytes_are_little_endian() {
        let buffer = PcmBuffer::Int16(vec![0x0102, -2, 7]);
        assert_eq!(buffer.le_bytes(2), vec![0x02, 0x01, 0xFE, 0xFF]);

        let buffer = PcmBuffer::Double(vec![1.0]);
        assert_eq!(buffer.le_bytes(1), 1.0f64.to_le_bytes().to_vec());
        assert_eq!(buffer.le_bytes(5).len(), 8);
    }

    #[test]
    fn widths_agree_between_format_and_buffer() {
        assert_eq!(SampleFormat::Int16.byte_width(), PcmBuffer::Int16(vec![]).byte_width());
        assert_eq!(SampleFormat::Int24.byte_width(), PcmBuffer::Int32(vec![]).byte_width());
        assert_eq!(SampleFormat::Float.byte_width(), PcmBuffer::Float(vec![]).byte_width());
        assert_eq!(SampleFormat::Double.byte_width(), PcmBuffer::Double(vec![]).byte_width());
        assert_eq!(SampleFormat::Int16.label(), "int16");
    }

    #[test]
    fn per_channel_count_guards_zero_channels() {
        let frame = stereo_frame(1024);
        assert_eq!(frame.sample_count(), 2048);
        assert_eq!(frame.samples_per_channel(), 1024);

        let frame = DecodedFrame {
            channels: 0,
            ..frame
        };
        assert_eq!(frame.samples_per_channel(), 0);
    }
}
