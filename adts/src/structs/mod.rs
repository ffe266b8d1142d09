//! Data structures for the ADTS transport layer and its dump records.

pub mod artifact;
pub mod header;
