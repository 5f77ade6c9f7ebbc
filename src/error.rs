//! Error type shared by every compressor in this crate.
//!
//! Mirrors the manual `enum` + hand-written `Display`/`Error` impl pattern
//! used for `Lz4FError` (frame/types.rs) rather than pulling in `thiserror`:
//! the set of failure modes is small and fixed, so a derive macro buys
//! nothing here.

use std::fmt;

/// Failure modes shared by every format's `compress` / `compress_moduled`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressError {
    /// A `Vec::try_reserve_exact` call failed; the host is out of memory.
    AllocationFailed,
    /// `compress_moduled` was asked to wrap more bytes than the 16-bit
    /// total-size header field can represent.
    ModuledInputTooLarge,
    /// A format with a 16-bit whole-stream size field (Rocket) was given
    /// more input than that field can represent.
    InputTooLarge,
    /// A 16-bit-symbol format (Comper) was given an odd-length input.
    OddLengthInput,
}

impl CompressError {
    fn message(self) -> &'static str {
        match self {
            CompressError::AllocationFailed => "allocation failed",
            CompressError::ModuledInputTooLarge => {
                "moduled input exceeds the 16-bit total-size header's range"
            }
            CompressError::InputTooLarge => {
                "input exceeds the 16-bit whole-stream size header's range"
            }
            CompressError::OddLengthInput => "input length must be a multiple of 2 words",
        }
    }
}

impl fmt::Display for CompressError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for CompressError {}

/// Result alias used throughout the crate's public API.
pub type CompressResult<T> = Result<T, CompressError>;
