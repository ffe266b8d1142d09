/// Whole-stream input, from a file or stdin.
pub mod source;

/// Sync word scanning.
///
/// Provides [`find_sync`](extract::find_sync), the byte-pair search that
/// locates candidate ADTS headers.
pub mod extract;

/// The decode engine seam.
///
/// Defines the [`DecodeEngine`](engine::DecodeEngine) trait the driver
/// talks to and the [`EngineSession`](engine::EngineSession) guard that
/// closes it.
pub mod engine;

/// AAC-LC engine backed by Symphonia.
#[cfg(feature = "symphonia-backend")]
pub mod symphonia;

/// Per-frame artifact files and the run summary file.
pub mod output;

pub mod summary;

/// The frame loop.
///
/// Provides the [`Driver`](decode::Driver) that ties scanning, parsing,
/// decoding and dumping together.
pub mod decode;

/// Two 16-byte AAC-LC frames, 44.1 kHz stereo, protection absent.
pub const EXAMPLE_DATA: &[u8] = &[
    0xFF, 0xF1, 0x50, 0x80, 0x02, 0x1F, 0xFC, 0x21, 0x10, 0x04, 0x60, 0x8C, 0x1C, 0x00, 0x00, 0x00,
    0xFF, 0xF1, 0x50, 0x80, 0x02, 0x1F, 0xFC, 0x21, 0x10, 0x04, 0x60, 0x8C, 0x1C, 0x00, 0x00, 0x00,
];
