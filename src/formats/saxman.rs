//! Saxman: interleaved layout, LSB-first 8-bit descriptor words, with an
//! optional 2-byte little-endian uncompressed-size header.
//!
//! `original_source/main.c` dispatches both `FORMAT_SAXMAN` and
//! `FORMAT_SAXMAN_NO_HEADER` to the same `ClownLZSS_SaxmanCompress`,
//! differing only in a `with_header: bool` argument — a feature the
//! distilled specification dropped that this crate restores. No Saxman
//! source itself is in `original_source/`; the match encoding (12-bit
//! distance, 4-bit length-3 packed into two bytes) is this crate's own
//! internally consistent design, not a verified reproduction of a real
//! Saxman decoder (see DESIGN.md). A fixed terminator match is appended
//! before every final flush, per `spec.md` §4.2's universal terminator
//! contract, in addition to (not instead of) the optional size header.

use crate::bitstream::{BitOrder, Interleaver, Layout};
use crate::engine::{self, Backend, Edge};
use crate::error::CompressResult;
use crate::wrapper::{moduled_wrapper, regular_wrapper};

const MAX_MATCH_LENGTH: usize = 0x12;
const MAX_MATCH_DISTANCE: usize = 0x1000;

struct SaxmanBackend;

impl Backend for SaxmanBackend {
    type Symbol = u8;

    const MAX_MATCH_LENGTH: usize = MAX_MATCH_LENGTH;
    const MAX_MATCH_DISTANCE: usize = MAX_MATCH_DISTANCE;

    fn literal_cost(&self) -> u32 {
        1 + 8
    }

    fn match_cost(&self, length: usize, _distance: usize) -> u32 {
        if (3..=MAX_MATCH_LENGTH).contains(&length) {
            1 + 16
        } else {
            0
        }
    }
}

fn compress_one(data: &[u8], with_header: bool) -> CompressResult<Vec<u8>> {
    log::trace!(
        "saxman: compressing {} bytes (with_header={with_header})",
        data.len()
    );
    let nodes = engine::build_graph(&SaxmanBackend, data);
    let edges = engine::walk_edges(&nodes);

    let mut bits = Interleaver::new(8, BitOrder::Lsb, Layout::Interleaved);
    if with_header {
        let size = data.len() as u16;
        let out = bits.output_mut();
        out.push((size & 0xFF) as u8);
        out.push((size >> 8) as u8);
    }

    let mut pos = 0usize;
    for edge in edges {
        match edge {
            Edge::Literal => {
                bits.put_descriptor_bit(false);
                bits.put_byte(data[pos]);
                pos += 1;
            }
            Edge::Match { distance, length, .. } => {
                bits.put_descriptor_bit(true);
                let raw_distance = (0x1000 - distance) & 0xFFF;
                bits.put_byte((raw_distance & 0xFF) as u8);
                bits.put_byte((((raw_distance >> 8) as u8) << 4) | ((length - 3) as u8));
                pos += length;
            }
        }
    }
    debug_assert_eq!(pos, data.len());

    // Terminator match, own design (see the module doc comment and
    // DESIGN.md): a fixed sentinel in the standard match form, written
    // directly rather than through the distance/length encoding above since
    // a real zero distance cannot be expressed there (the raw field is
    // `0x1000 - distance`, which is never 0 for a real match).
    bits.put_descriptor_bit(true);
    bits.put_byte(0xFF);
    bits.put_byte(0xFF);

    Ok(bits.finish())
}

/// Compress `data` as a single Saxman stream, with the 2-byte little-endian
/// uncompressed-size header `ClownLZSS_SaxmanCompress` writes by default.
pub fn compress(data: &[u8]) -> CompressResult<Vec<u8>> {
    regular_wrapper(data, |d| compress_one(d, true))
}

/// Compress `data` as a single Saxman stream without the size header,
/// matching `FORMAT_SAXMAN_NO_HEADER`.
pub fn compress_no_header(data: &[u8]) -> CompressResult<Vec<u8>> {
    regular_wrapper(data, |d| compress_one(d, false))
}

/// Compress `data` as a sequence of independently-compressed
/// `module_size`-byte chunks behind a total-size header. Each chunk is
/// compressed without its own inner header, since the outer moduled header
/// already records the uncompressed size.
pub fn compress_moduled(data: &[u8], module_size: usize) -> CompressResult<Vec<u8>> {
    moduled_wrapper(data, module_size, 1, |chunk| compress_one(chunk, false))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_header_prefixes_little_endian_size() {
        let data = vec![0u8; 10];
        let compressed = compress(&data).unwrap();
        assert_eq!(&compressed[0..2], &[0x0A, 0x00]);
    }

    #[test]
    fn empty_input_produces_terminator_only() {
        assert_eq!(
            compress(&[]).unwrap(),
            vec![0x00, 0x00, 0x01, 0xFF, 0xFF]
        );
        assert_eq!(compress_no_header(&[]).unwrap(), vec![0x01, 0xFF, 0xFF]);
    }

    #[test]
    fn no_header_omits_size_prefix() {
        let data = vec![0xAAu8; 64];
        let with = compress(&data).unwrap();
        let without = compress_no_header(&data).unwrap();
        assert_eq!(with.len(), without.len() + 2);
        assert_eq!(&with[2..], &without[..]);
    }

    #[test]
    fn moduled_header_reports_uncompressed_size() {
        let data = vec![0u8; 30];
        let compressed = compress_moduled(&data, 16).unwrap();
        assert_eq!(&compressed[0..2], &[0x00, 0x1E]);
    }
}
