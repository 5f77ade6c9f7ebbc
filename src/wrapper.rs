//! The two calling conventions every format is compressed through.
//!
//! Declared but not defined in the retrieved `clownlzss.h` header
//! (`RegularWrapper`, `ModuledCompressionWrapper`); this module supplies
//! concrete Rust implementations shared by all eight formats.

use crate::error::{CompressError, CompressResult};

/// Compress the whole input in one call. This is the contract every
/// format's plain `compress` function follows — no chunking, no header.
pub fn regular_wrapper<F>(data: &[u8], compress_one: F) -> CompressResult<Vec<u8>>
where
    F: FnOnce(&[u8]) -> CompressResult<Vec<u8>>,
{
    compress_one(data)
}

/// The largest total input `moduled_wrapper` accepts: the header field is a
/// 16-bit word, so totals that would overflow it are rejected explicitly
/// rather than emit a header a decoder would misread as a smaller size.
const MAX_MODULED_INPUT: usize = u16::MAX as usize;

/// Split `data` into `module_size`-byte chunks (the last one short if
/// `data.len()` does not divide evenly), compress each chunk independently,
/// and concatenate the results behind a 2-byte big-endian header carrying
/// the *uncompressed* total size. Each chunk's compressed bytes are padded
/// with zeroes up to the next even alignment boundary, matching the
/// module-size alignment `ModuledCompressionWrapper` applies per chunk.
pub fn moduled_wrapper<F>(
    data: &[u8],
    module_size: usize,
    alignment: usize,
    mut compress_chunk: F,
) -> CompressResult<Vec<u8>>
where
    F: FnMut(&[u8]) -> CompressResult<Vec<u8>>,
{
    if data.len() > MAX_MODULED_INPUT {
        return Err(CompressError::ModuledInputTooLarge);
    }

    let mut output = Vec::new();
    output
        .try_reserve_exact(2)
        .map_err(|_| CompressError::AllocationFailed)?;
    let total_size = data.len() as u16;
    output.push((total_size >> 8) as u8);
    output.push((total_size & 0xFF) as u8);

    for chunk in data.chunks(module_size.max(1)) {
        let mut compressed = compress_chunk(chunk)?;
        if alignment > 1 {
            let remainder = compressed.len() % alignment;
            if remainder != 0 {
                compressed
                    .try_reserve_exact(alignment - remainder)
                    .map_err(|_| CompressError::AllocationFailed)?;
                compressed.resize(compressed.len() + (alignment - remainder), 0);
            }
        }
        output
            .try_reserve_exact(compressed.len())
            .map_err(|_| CompressError::AllocationFailed)?;
        output.extend_from_slice(&compressed);
    }

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn regular_wrapper_passes_through() {
        let result = regular_wrapper(b"abc", |d| Ok(d.to_vec())).unwrap();
        assert_eq!(result, b"abc");
    }

    #[test]
    fn moduled_wrapper_writes_total_size_header() {
        let data = vec![0u8; 10];
        let out = moduled_wrapper(&data, 4, 1, |chunk| Ok(chunk.to_vec())).unwrap();
        assert_eq!(&out[0..2], &[0x00, 0x0A]);
        assert_eq!(&out[2..], &data[..]);
    }

    #[test]
    fn moduled_wrapper_rejects_oversized_input() {
        let big = vec![0u8; MAX_MODULED_INPUT + 1];
        let result = moduled_wrapper(&big, 4096, 1, |chunk| Ok(chunk.to_vec()));
        assert_eq!(result, Err(CompressError::ModuledInputTooLarge));
    }

    #[test]
    fn moduled_wrapper_pads_chunks_to_alignment() {
        let data = vec![1u8; 6];
        let out = moduled_wrapper(&data, 3, 4, |chunk| Ok(chunk.to_vec())).unwrap();
        // Two 3-byte chunks, each padded up to 4 bytes, plus the 2-byte header.
        assert_eq!(out.len(), 2 + 4 + 4);
    }
}
