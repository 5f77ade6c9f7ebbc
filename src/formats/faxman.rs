//! Faxman: interleaved layout, MSB-first 8-bit descriptor words, two match
//! cost tiers split on distance rather than length.
//!
//! No Faxman source is present in `original_source/`; this crate's
//! parameters are an internally consistent design, not a verified
//! reproduction of a real Faxman decoder (see DESIGN.md). A fixed
//! terminator match is appended before every final flush, per `spec.md`
//! §4.2's universal terminator contract.

use crate::bitstream::{BitOrder, Interleaver, Layout};
use crate::engine::{self, Backend, Edge};
use crate::error::CompressResult;
use crate::wrapper::{moduled_wrapper, regular_wrapper};

const MAX_MATCH_LENGTH: usize = 0x40;
const MAX_MATCH_DISTANCE: usize = 0x2000;
const SHORT_MAX_DISTANCE: usize = 0x80;

struct FaxmanBackend;

impl Backend for FaxmanBackend {
    type Symbol = u8;

    const MAX_MATCH_LENGTH: usize = MAX_MATCH_LENGTH;
    const MAX_MATCH_DISTANCE: usize = MAX_MATCH_DISTANCE;

    fn literal_cost(&self) -> u32 {
        1 + 8
    }

    fn match_cost(&self, length: usize, distance: usize) -> u32 {
        if !(3..=MAX_MATCH_LENGTH).contains(&length) {
            0
        } else if distance <= SHORT_MAX_DISTANCE {
            1 + 1 + 13
        } else {
            1 + 1 + 22
        }
    }
}

fn compress_one(data: &[u8]) -> CompressResult<Vec<u8>> {
    log::trace!("faxman: compressing {} bytes", data.len());
    let nodes = engine::build_graph(&FaxmanBackend, data);
    let edges = engine::walk_edges(&nodes);

    let mut bits = Interleaver::new(8, BitOrder::Msb, Layout::Interleaved);
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
                if distance <= SHORT_MAX_DISTANCE {
                    bits.put_descriptor_bit(false);
                    bits.put_byte(
                        (((distance - 1) as u8) << 1) | (((length - 3) as u8 >> 5) & 1),
                    );
                    bits.put_byte((length - 3) as u8);
                } else {
                    bits.put_descriptor_bit(true);
                    let d = distance - 1;
                    bits.put_byte((d & 0xFF) as u8);
                    bits.put_byte((d >> 8) as u8);
                    bits.put_byte((length - 3) as u8);
                }
                pos += length;
            }
        }
    }
    debug_assert_eq!(pos, data.len());

    // Terminator match, own design (see the module doc comment and
    // DESIGN.md): a fixed sentinel in the long (distance > SHORT_MAX_DISTANCE)
    // match form, written directly rather than through the distance/length
    // encoding above since a real zero distance cannot be expressed there
    // (`distance - 1` would underflow).
    bits.put_descriptor_bit(true);
    bits.put_descriptor_bit(true);
    bits.put_byte(0xFF);
    bits.put_byte(0xFF);
    bits.put_byte(0x00);

    Ok(bits.finish())
}

/// Compress `data` as a single Faxman stream.
pub fn compress(data: &[u8]) -> CompressResult<Vec<u8>> {
    regular_wrapper(data, compress_one)
}

/// Compress `data` as a sequence of independently-compressed
/// `module_size`-byte chunks behind a total-size header.
pub fn compress_moduled(data: &[u8], module_size: usize) -> CompressResult<Vec<u8>> {
    moduled_wrapper(data, module_size, 1, compress_one)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repetitive_input_compresses_smaller_than_input() {
        let data = vec![0x24u8; 600];
        let compressed = compress(&data).unwrap();
        assert!(compressed.len() < data.len());
    }

    #[test]
    fn empty_input_produces_terminator_only() {
        assert_eq!(compress(&[]).unwrap(), vec![0xC0, 0xFF, 0xFF, 0x00]);
    }

    #[test]
    fn moduled_header_reports_uncompressed_size() {
        let data = vec![0u8; 100];
        let compressed = compress_moduled(&data, 32).unwrap();
        assert_eq!(&compressed[0..2], &[0x00, 0x64]);
    }
}
