//! Utility functions and supporting infrastructure.
//!
//! Provides bit-level I/O for header fields, explicit-endianness byte
//! serialisation for artifacts, and the error types shared by the pipeline.

pub mod bitstream_io;
pub mod byteorder;
pub mod errors;
