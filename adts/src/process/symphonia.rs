//! Decode engine backed by Symphonia's AAC-LC decoder.

use symphonia_codec_aac::AacDecoder;
use symphonia_core::audio::{AudioBufferRef, SampleBuffer};
use symphonia_core::codecs::{CODEC_TYPE_AAC, CodecParameters, Decoder, DecoderOptions};
use symphonia_core::conv::ConvertibleSample;
use symphonia_core::errors::Error as SymError;
use symphonia_core::formats::Packet;
use symphonia_core::sample::Sample;

use crate::process::engine::{
    DecodeEngine, DecodeFailure, DecodedFrame, EngineError, PcmBuffer, SampleFormat, StreamConfig,
};
use crate::structs::header::{AdtsHeader, parse_header};
use crate::utils::bitstream_io::BitstreamIoWriter;

/// Samples per channel in one AAC-LC raw data block.
const AAC_FRAME_SAMPLES: u64 = 1024;

pub const CODE_NOT_INITIALISED: u32 = 1;
pub const CODE_MALFORMED_FRAME: u32 = 2;
pub const CODE_IO: u32 = 3;
pub const CODE_DECODE: u32 = 4;
pub const CODE_UNSUPPORTED: u32 = 5;
pub const CODE_LIMIT: u32 = 6;
pub const CODE_RESET_REQUIRED: u32 = 7;
pub const CODE_OTHER: u32 = 8;

pub struct SymphoniaEngine {
    format: SampleFormat,
    decoder: Option<AacDecoder>,
    next_ts: u64,
}

impl SymphoniaEngine {
    pub fn new(format: SampleFormat) -> Self {
        Self {
            format,
            decoder: None,
            next_ts: 0,
        }
    }
}

impl Default for SymphoniaEngine {
    fn default() -> Self {
        Self::new(SampleFormat::Int16)
    }
}

/// Two-byte AudioSpecificConfig equivalent to the ADTS fixed header.
fn audio_specific_config(header: &AdtsHeader) -> std::io::Result<Vec<u8>> {
    let mut writer = BitstreamIoWriter::default();
    writer.put_n(5, header.profile + 1)?;
    writer.put_n(4, header.sampling_frequency_index)?;
    writer.put_n(4, header.channel_configuration)?;
    // frameLengthFlag, dependsOnCoreCoder, extensionFlag
    writer.put_n(3, 0u8)?;
    writer.into_bytes()
}

fn channel_count(channel_configuration: u8) -> Option<u8> {
    match channel_configuration {
        0 => None,
        7 => Some(8),
        n => Some(n),
    }
}

fn failure_from(err: SymError) -> DecodeFailure {
    let code = match &err {
        SymError::IoError(_) => CODE_IO,
        SymError::DecodeError(_) => CODE_DECODE,
        SymError::Unsupported(_) => CODE_UNSUPPORTED,
        SymError::LimitError(_) => CODE_LIMIT,
        SymError::ResetRequired => CODE_RESET_REQUIRED,
        _ => CODE_OTHER,
    };
    DecodeFailure::new(code, err.to_string())
}

fn interleave<S: Sample + ConvertibleSample>(decoded: AudioBufferRef<'_>) -> Vec<S> {
    let mut buf = SampleBuffer::<S>::new(decoded.capacity() as u64, *decoded.spec());
    buf.copy_interleaved_ref(decoded);
    buf.samples().to_vec()
}

impl DecodeEngine for SymphoniaEngine {
    fn sample_format(&self) -> SampleFormat {
        self.format
    }

    fn init(&mut self, data: &[u8]) -> Result<StreamConfig, EngineError> {
        let header = parse_header(data, 0).map_err(|e| EngineError(e.to_string()))?;

        let sample_rate = header.sample_rate().ok_or_else(|| {
            EngineError(format!(
                "reserved sampling_frequency_index {}",
                header.sampling_frequency_index
            ))
        })?;
        let channels = channel_count(header.channel_configuration)
            .ok_or_else(|| EngineError("channel_configuration 0 is not supported".into()))?;

        let asc = audio_specific_config(&header).map_err(|e| EngineError(e.to_string()))?;

        let mut params = CodecParameters::new();
        params
            .for_codec(CODEC_TYPE_AAC)
            .with_sample_rate(sample_rate)
            .with_extra_data(asc.into_boxed_slice());

        let decoder = AacDecoder::try_new(&params, &DecoderOptions::default())
            .map_err(|e| EngineError(format!("symphonia aac init failed: {e}")))?;

        self.decoder = Some(decoder);
        self.next_ts = 0;

        Ok(StreamConfig {
            sample_rate,
            channels,
        })
    }

    fn decode(&mut self, frame: &[u8]) -> Result<DecodedFrame, DecodeFailure> {
        let decoder = self
            .decoder
            .as_mut()
            .ok_or_else(|| DecodeFailure::new(CODE_NOT_INITIALISED, "decoder not initialised"))?;

        let header = parse_header(frame, 0)
            .map_err(|e| DecodeFailure::new(CODE_MALFORMED_FRAME, e.to_string()))?;
        let payload = frame.get(header.header_size()..).ok_or_else(|| {
            DecodeFailure::new(CODE_MALFORMED_FRAME, "frame shorter than its header")
        })?;

        let packet = Packet::new_from_slice(0, self.next_ts, AAC_FRAME_SAMPLES, payload);
        self.next_ts += AAC_FRAME_SAMPLES;

        let decoded = decoder.decode(&packet).map_err(failure_from)?;
        let channels = decoded.spec().channels.count() as u8;

        let samples = match self.format {
            SampleFormat::Int16 => PcmBuffer::Int16(interleave::<i16>(decoded)),
            SampleFormat::Int24 => PcmBuffer::Int32(
                interleave::<i32>(decoded)
                    .into_iter()
                    .map(|s| s >> 8)
                    .collect(),
            ),
            SampleFormat::Int32 => PcmBuffer::Int32(interleave::<i32>(decoded)),
            SampleFormat::Float => PcmBuffer::Float(interleave::<f32>(decoded)),
            SampleFormat::Double => PcmBuffer::Double(interleave::<f64>(decoded)),
        };

        Ok(DecodedFrame { samples, channels })
    }

    fn close(&mut self) {
        self.decoder = None;
    }
}
