//! Optimal-parsing LZSS compressors for a family of legacy console formats.

pub mod bitstream;
pub mod engine;
pub mod error;
pub mod formats;
pub mod node;
pub mod wrapper;

// ─────────────────────────────────────────────────────────────────────────────
// Top-level convenience re-exports, one pair per supported format.
// ─────────────────────────────────────────────────────────────────────────────

/// Shared error type for every `compress` / `compress_moduled` call.
pub use error::CompressError;

/// Chameleon compression. Split-file layout, MSB-first descriptor bits.
pub use formats::chameleon::{
    compress as chameleon_compress, compress_moduled as chameleon_compress_moduled,
};

/// Comper compression. 16-bit words, interleaved layout.
pub use formats::comper::{compress as comper_compress, compress_moduled as comper_compress_moduled};

/// Kosinski compression.
pub use formats::kosinski::{
    compress as kosinski_compress, compress_moduled as kosinski_compress_moduled,
};

/// Kosinski+ compression, with an extended long-run match form.
pub use formats::kosinski_plus::{
    compress as kosinski_plus_compress, compress_moduled as kosinski_plus_compress_moduled,
};

/// Rage compression.
pub use formats::rage::{compress as rage_compress, compress_moduled as rage_compress_moduled};

/// Rocket compression. Header fix-up layout, LSB-first descriptor bits.
pub use formats::rocket::{
    compress as rocket_compress, compress_moduled as rocket_compress_moduled,
};

/// Saxman compression, with and without its uncompressed-size header.
pub use formats::saxman::{
    compress as saxman_compress, compress_moduled as saxman_compress_moduled,
    compress_no_header as saxman_compress_no_header,
};

/// Faxman compression.
pub use formats::faxman::{
    compress as faxman_compress, compress_moduled as faxman_compress_moduled,
};
