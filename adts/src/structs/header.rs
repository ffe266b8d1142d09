//! ADTS fixed and variable header.
//!
//! The header is 56 bits when `protection_absent` is set (a 16-bit CRC
//! follows otherwise, which this tool never inspects):
//!
//! | bits | field |
//! |-----:|-------|
//! | 12 | syncword (`0xFFF`) |
//! | 1 | id: 0 = MPEG-4, 1 = MPEG-2 |
//! | 2 | layer |
//! | 1 | protection_absent |
//! | 2 | profile (audio object type - 1) |
//! | 4 | sampling_frequency_index |
//! | 1 | private_bit |
//! | 3 | channel_configuration |
//! | 1 | original_copy |
//! | 1 | home |
//! | 1 | copyright_identification_bit |
//! | 1 | copyright_identification_start |
//! | 13 | frame_length (header included) |
//! | 11 | adts_buffer_fullness |
//! | 2 | number_of_raw_data_blocks_in_frame - 1 |

use std::fmt::{Display, Formatter};
use std::io;

use log::trace;

use crate::utils::bitstream_io::{BsIoSliceReader, BitstreamIoWriter};
use crate::utils::errors::{FrameError, HeaderError};

/// The 12-bit frame sync pattern.
pub const ADTS_SYNCWORD: u16 = 0x0FFF;

/// Header size without CRC. The dump protocol always assumes this size when
/// validating frame lengths.
pub const ADTS_HEADER_SIZE: usize = 7;

/// Header size when a CRC word follows the fixed fields.
pub const ADTS_HEADER_SIZE_WITH_CRC: usize = 9;

/// Sample rates indexed by `sampling_frequency_index`; 13..=15 are reserved.
pub const SAMPLE_RATES: [u32; 16] = [
    96000, 88200, 64000, 48000, 44100, 32000, 24000, 22050, 16000, 12000, 11025, 8000, 7350, 0, 0,
    0,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MpegVersion {
    #[default]
    Mpeg4,
    Mpeg2,
}

impl MpegVersion {
    pub fn from_bit(bit: bool) -> Self {
        if bit { Self::Mpeg2 } else { Self::Mpeg4 }
    }

    pub fn bit(self) -> u8 {
        match self {
            Self::Mpeg4 => 0,
            Self::Mpeg2 => 1,
        }
    }
}

impl Display for MpegVersion {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Mpeg4 => f.write_str("MPEG-4"),
            Self::Mpeg2 => f.write_str("MPEG-2"),
        }
    }
}

/// One parsed ADTS header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AdtsHeader {
    pub mpeg_version: MpegVersion,
    pub layer: u8,
    pub protection_absent: bool,
    pub profile: u8,
    pub sampling_frequency_index: u8,
    pub private_bit: bool,
    pub channel_configuration: u8,
    pub original_copy: bool,
    pub home: bool,
    pub copyright_id_bit: bool,
    pub copyright_id_start: bool,
    pub frame_length: u16,
    pub buffer_fullness: u16,
    pub num_raw_data_blocks_minus_one: u8,
}

impl AdtsHeader {
    pub fn read(reader: &mut BsIoSliceReader) -> io::Result<Result<Self, HeaderError>> {
        let syncword: u16 = reader.get_n(12)?;
        if syncword != ADTS_SYNCWORD {
            return Ok(Err(HeaderError::BadSyncWord(syncword)));
        }

        let header = Self {
            mpeg_version: MpegVersion::from_bit(reader.get()?),
            layer: reader.get_n(2)?,
            protection_absent: reader.get()?,
            profile: reader.get_n(2)?,
            sampling_frequency_index: reader.get_n(4)?,
            private_bit: reader.get()?,
            channel_configuration: reader.get_n(3)?,
            original_copy: reader.get()?,
            home: reader.get()?,
            copyright_id_bit: reader.get()?,
            copyright_id_start: reader.get()?,
            frame_length: reader.get_n(13)?,
            buffer_fullness: reader.get_n(11)?,
            num_raw_data_blocks_minus_one: reader.get_n(2)?,
        };

        trace!("{header}");

        Ok(Ok(header))
    }

    /// Encodes the 56 header bits. Inverse of [`parse_header`].
    pub fn to_bytes(&self) -> io::Result<[u8; ADTS_HEADER_SIZE]> {
        let mut writer = BitstreamIoWriter::default();

        writer.put_n(12, ADTS_SYNCWORD)?;
        writer.put(self.mpeg_version == MpegVersion::Mpeg2)?;
        writer.put_n(2, self.layer & 0x3)?;
        writer.put(self.protection_absent)?;
        writer.put_n(2, self.profile & 0x3)?;
        writer.put_n(4, self.sampling_frequency_index & 0xF)?;
        writer.put(self.private_bit)?;
        writer.put_n(3, self.channel_configuration & 0x7)?;
        writer.put(self.original_copy)?;
        writer.put(self.home)?;
        writer.put(self.copyright_id_bit)?;
        writer.put(self.copyright_id_start)?;
        writer.put_n(13, self.frame_length & 0x1FFF)?;
        writer.put_n(11, self.buffer_fullness & 0x7FF)?;
        writer.put_n(2, self.num_raw_data_blocks_minus_one & 0x3)?;

        let bytes = writer.into_bytes()?;
        let mut out = [0u8; ADTS_HEADER_SIZE];
        out.copy_from_slice(&bytes);
        Ok(out)
    }

    pub fn header_size(&self) -> usize {
        if self.protection_absent {
            ADTS_HEADER_SIZE
        } else {
            ADTS_HEADER_SIZE_WITH_CRC
        }
    }

    pub fn payload_size(&self) -> usize {
        (self.frame_length as usize).saturating_sub(self.header_size())
    }

    /// `None` for the reserved indices 13..=15.
    pub fn sample_rate(&self) -> Option<u32> {
        match SAMPLE_RATES[(self.sampling_frequency_index & 0xF) as usize] {
            0 => None,
            rate => Some(rate),
        }
    }
}

impl Display for AdtsHeader {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "ADTS {} profile={} sf_index={} channels={} frame_length={} fullness={:#05X} blocks={}",
            self.mpeg_version,
            self.profile,
            self.sampling_frequency_index,
            self.channel_configuration,
            self.frame_length,
            self.buffer_fullness,
            self.num_raw_data_blocks_minus_one + 1,
        )
    }
}

/// Parses the header starting at `offset`.
///
/// Only the length and the sync pattern are checked. A reserved sample-rate
/// index is accepted, and `frame_length` is left for [`validate_frame`].
pub fn parse_header(data: &[u8], offset: usize) -> Result<AdtsHeader, HeaderError> {
    let available = data.len().saturating_sub(offset);
    if available < ADTS_HEADER_SIZE {
        return Err(HeaderError::Truncated {
            needed: ADTS_HEADER_SIZE,
            available,
        });
    }

    let mut reader = BsIoSliceReader::from_slice(&data[offset..offset + ADTS_HEADER_SIZE]);
    AdtsHeader::read(&mut reader).unwrap_or(Err(HeaderError::Truncated {
        needed: ADTS_HEADER_SIZE,
        available,
    }))
}

/// Checks the declared frame against the stream bounds.
pub fn validate_frame(
    header: &AdtsHeader,
    offset: usize,
    stream_len: usize,
) -> Result<(), FrameError> {
    let frame_length = header.frame_length as usize;

    if frame_length < ADTS_HEADER_SIZE {
        return Err(FrameError::TooShort(header.frame_length));
    }

    if offset + frame_length > stream_len {
        return Err(FrameError::Overrun {
            offset,
            frame_length: header.frame_length,
            stream_len,
        });
    }

    Ok(())
}
