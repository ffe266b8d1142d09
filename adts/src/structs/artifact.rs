//! Fixed 16-byte header artifact (`frame_NNNN_adts.bin`).
//!
//! The record is written big-endian in struct field order. The copyright
//! bits are not part of the record.

use adtsdump_macros::ToBytes;

use crate::structs::header::{ADTS_SYNCWORD, AdtsHeader};
use crate::utils::byteorder::WriteBytesBe;
use crate::utils::errors::ArtifactError;

pub const HEADER_ARTIFACT_VERSION: u32 = 1;
pub const HEADER_ARTIFACT_SIZE: usize = 16;

/// One field of the header artifact: name, byte offset, byte width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldLayout {
    pub name: &'static str,
    pub offset: usize,
    pub width: usize,
}

const fn field(name: &'static str, offset: usize, width: usize) -> FieldLayout {
    FieldLayout {
        name,
        offset,
        width,
    }
}

/// Byte layout of [`HeaderArtifact`], all multi-byte fields big-endian.
pub const HEADER_ARTIFACT_LAYOUT: [FieldLayout; 13] = [
    field("syncword", 0, 2),
    field("id", 2, 1),
    field("layer", 3, 1),
    field("protection_absent", 4, 1),
    field("profile", 5, 1),
    field("sf_index", 6, 1),
    field("private_bit", 7, 1),
    field("channel_config", 8, 1),
    field("original", 9, 1),
    field("home", 10, 1),
    field("frame_length", 11, 2),
    field("buffer_fullness", 13, 2),
    field("num_raw_blocks", 15, 1),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, ToBytes)]
pub struct HeaderArtifact {
    pub syncword: u16,
    pub id: u8,
    pub layer: u8,
    pub protection_absent: u8,
    pub profile: u8,
    pub sf_index: u8,
    pub private_bit: u8,
    pub channel_config: u8,
    pub original: u8,
    pub home: u8,
    pub frame_length: u16,
    pub buffer_fullness: u16,
    pub num_raw_blocks: u8,
}

impl From<&AdtsHeader> for HeaderArtifact {
    fn from(header: &AdtsHeader) -> Self {
        Self {
            syncword: ADTS_SYNCWORD,
            id: header.mpeg_version.bit(),
            layer: header.layer,
            protection_absent: header.protection_absent as u8,
            profile: header.profile,
            sf_index: header.sampling_frequency_index,
            private_bit: header.private_bit as u8,
            channel_config: header.channel_configuration,
            original: header.original_copy as u8,
            home: header.home as u8,
            frame_length: header.frame_length,
            buffer_fullness: header.buffer_fullness,
            num_raw_blocks: header.num_raw_data_blocks_minus_one,
        }
    }
}

impl HeaderArtifact {
    pub fn to_bytes(&self) -> [u8; HEADER_ARTIFACT_SIZE] {
        let mut vec = Vec::with_capacity(HEADER_ARTIFACT_SIZE);
        self.write_be(&mut vec);

        let mut out = [0u8; HEADER_ARTIFACT_SIZE];
        out.copy_from_slice(&vec);
        out
    }

    /// Decodes an artifact through [`HEADER_ARTIFACT_LAYOUT`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ArtifactError> {
        if bytes.len() != HEADER_ARTIFACT_SIZE {
            return Err(ArtifactError::WrongSize {
                expected: HEADER_ARTIFACT_SIZE,
                actual: bytes.len(),
            });
        }

        let mut values = [0u16; HEADER_ARTIFACT_LAYOUT.len()];
        for (value, layout) in values.iter_mut().zip(HEADER_ARTIFACT_LAYOUT.iter()) {
            *value = bytes[layout.offset..layout.offset + layout.width]
                .iter()
                .fold(0u16, |acc, &b| (acc << 8) | b as u16);
        }

        let [
            syncword,
            id,
            layer,
            protection_absent,
            profile,
            sf_index,
            private_bit,
            channel_config,
            original,
            home,
            frame_length,
            buffer_fullness,
            num_raw_blocks,
        ] = values;

        if syncword != ADTS_SYNCWORD {
            return Err(ArtifactError::BadSyncWord(syncword));
        }

        Ok(Self {
            syncword,
            id: id as u8,
            layer: layer as u8,
            protection_absent: protection_absent as u8,
            profile: profile as u8,
            sf_index: sf_index as u8,
            private_bit: private_bit as u8,
            channel_config: channel_config as u8,
            original: original as u8,
            home: home as u8,
            frame_length,
            buffer_fullness,
            num_raw_blocks: num_raw_blocks as u8,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structs::header::{MpegVersion, parse_header};

    #[test]
    fn layout_covers_sixteen_bytes_without_gaps() {
        let mut next = 0;
        for layout in HEADER_ARTIFACT_LAYOUT {
            assert_eq!(layout.offset, next, "{}", layout.name);
            next += layout.width;
        }
        assert_eq!(next, HEADER_ARTIFACT_SIZE);
    }

    #[test]
    fn header_fields_survive_artifact_round_trip() -> std::io::Result<()> {
        let header = AdtsHeader {
            mpeg_version: MpegVersion::Mpeg2,
            layer: 1,
            protection_absent: true,
            profile: 2,
            sampling_frequency_index: 11,
            private_bit: true,
            channel_configuration: 6,
            original_copy: true,
            home: false,
            copyright_id_bit: true,
            copyright_id_start: true,
            frame_length: 0x1FFF,
            buffer_fullness: 0x555,
            num_raw_data_blocks_minus_one: 2,
        };

        let parsed = parse_header(&header.to_bytes()?, 0).unwrap();
        let artifact = HeaderArtifact::from(&parsed);
        let bytes = artifact.to_bytes();

        assert_eq!(
            bytes,
            [
                0x0F, 0xFF, 1, 1, 1, 2, 11, 1, 6, 1, 0, 0x1F, 0xFF, 0x05, 0x55, 2
            ]
        );

        let decoded = HeaderArtifact::from_bytes(&bytes).unwrap();
        assert_eq!(decoded, artifact);
        assert_eq!(decoded.id, parsed.mpeg_version.bit());
        assert_eq!(decoded.frame_length, parsed.frame_length);
        assert_eq!(decoded.buffer_fullness, parsed.buffer_fullness);
        assert_eq!(decoded.channel_config, parsed.channel_configuration);
        Ok(())
    }

    #[test]
    fn malformed_artifacts_are_rejected() {
        assert_eq!(
            HeaderArtifact::from_bytes(&[0; 15]),
            Err(ArtifactError::WrongSize {
                expected: 16,
                actual: 15
            })
        );
        assert_eq!(
            HeaderArtifact::from_bytes(&[0; 16]),
            Err(ArtifactError::BadSyncWord(0))
        );
    }
}
