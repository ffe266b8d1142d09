#![doc = include_str!("../README.md")]
//!
//! ## Technical Overview
//!
//! An ADTS stream is a plain concatenation of frames. Each frame starts with
//! a 12-bit syncword (`0xFFF`) and a 7-byte fixed header (9 bytes when a CRC
//! follows) that carries the profile, sampling frequency index, channel
//! configuration and the total frame length.
//!
//! There is no container index, so frames are found by scanning for the
//! syncword. Payload bytes can mimic it; a candidate whose header does not
//! hold up is skipped one byte at a time until the stream lines up again.
//!
//! ### Artifacts
//!
//! For frame `N` (zero-based, counting accepted headers):
//!
//! - `frame_NNNN_adts.bin`: 16-byte big-endian header record
//! - `frame_NNNN_pcm.bin`: interleaved little-endian samples, when the
//!   engine produced any
//!
//! and once per run `info.json` with the stream configuration and totals.
//!
//! ## Quick Start
//!
//! 1. Load the stream with [`process::source::ByteSource`]
//! 2. Build a [`process::decode::Driver`] around a decode engine
//! 3. Run it to completion and collect the [`process::summary::RunSummary`]
//!
//! ```rust,no_run
//! # #[cfg(feature = "symphonia-backend")]
//! # fn main() -> anyhow::Result<()> {
//! use adts::process::decode::{Driver, DriverOptions};
//! use adts::process::engine::SampleFormat;
//! use adts::process::source::ByteSource;
//! use adts::process::symphonia::SymphoniaEngine;
//! use adts::process::EXAMPLE_DATA;
//!
//! let source = ByteSource::from_bytes(EXAMPLE_DATA);
//! let engine = SymphoniaEngine::new(SampleFormat::Int16);
//!
//! let summary = Driver::new(source, engine, "dump", DriverOptions::default())?.run()?;
//! println!("{} frames, {} samples", summary.total_frames, summary.total_samples);
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "symphonia-backend"))]
//! # fn main() {}
//! ```

/// Processing pipeline for ADTS streams.
///
/// 1. **Input** ([`process::source`]): Whole-stream byte access.
///
/// 2. **Sync Scanning** ([`process::extract`]): Candidate frame search.
///
/// 3. **Decoding** ([`process::engine`], [`process::decode`]): Engine seam
///    and the frame loop.
///
/// 4. **Output** ([`process::output`], [`process::summary`]): Dump artifacts.
pub mod process;

/// Data structures for ADTS headers and header artifacts.
///
/// - **Headers** ([`structs::header`]): Fixed and variable header fields
/// - **Artifacts** ([`structs::artifact`]): 16-byte header records
pub mod structs;

/// Utility functions and supporting infrastructure.
///
/// - **Bitstream I/O** ([`utils::bitstream_io`]): Bit-level reading/writing
/// - **Byte Order** ([`utils::byteorder`]): Explicit-endian serialisation
/// - **Error Handling** ([`utils::errors`]): Error types
pub mod utils;
