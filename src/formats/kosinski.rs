//! Kosinski: interleaved layout, LSB-first 16-bit descriptor words.
//!
//! Unlike Chameleon, Comper, and Rocket, no Kosinski source is present in
//! `original_source/` — `spec.md` notes this family's wire format is
//! "dictated by the target decompressor" outside this pack's reach. The
//! parameters below (a short two-byte inline match form for small
//! length/distance pairs, a wider three-byte form for everything else) are
//! this crate's own internally-consistent design in the same family of
//! techniques as the grounded formats, not a verified reproduction of a
//! real Kosinski decoder. See DESIGN.md. A fixed terminator match is
//! appended before every final flush, per `spec.md` §4.2's universal
//! terminator contract.

use crate::bitstream::{BitOrder, Interleaver, Layout};
use crate::engine::{self, Backend, Edge};
use crate::error::CompressResult;
use crate::wrapper::{moduled_wrapper, regular_wrapper};

const MAX_MATCH_LENGTH: usize = 0x100;
const MAX_MATCH_DISTANCE: usize = 0x2000;
const INLINE_MAX_DISTANCE: usize = 0x100;
const INLINE_MAX_LENGTH: usize = 5;

struct KosinskiBackend;

impl Backend for KosinskiBackend {
    type Symbol = u8;

    const MAX_MATCH_LENGTH: usize = MAX_MATCH_LENGTH;
    const MAX_MATCH_DISTANCE: usize = MAX_MATCH_DISTANCE;

    fn literal_cost(&self) -> u32 {
        1 + 8
    }

    fn match_cost(&self, length: usize, distance: usize) -> u32 {
        if (3..=INLINE_MAX_LENGTH).contains(&length) && distance <= INLINE_MAX_DISTANCE {
            1 + 1 + 8
        } else if (3..=MAX_MATCH_LENGTH).contains(&length) {
            1 + 1 + 24
        } else {
            0
        }
    }
}

fn compress_one(data: &[u8]) -> CompressResult<Vec<u8>> {
    log::trace!("kosinski: compressing {} bytes", data.len());
    let nodes = engine::build_graph(&KosinskiBackend, data);
    let edges = engine::walk_edges(&nodes);

    let mut bits = Interleaver::new(16, BitOrder::Lsb, Layout::Interleaved);
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
                if length <= INLINE_MAX_LENGTH && distance <= INLINE_MAX_DISTANCE {
                    bits.put_descriptor_bit(false);
                    bits.put_byte(((distance - 1) as u8) ^ 0xFF);
                    bits.put_byte(((length - 2) as u8) | 0xF0);
                } else {
                    bits.put_descriptor_bit(true);
                    let d = distance - 1;
                    bits.put_byte(((d & 0xFF) as u8) ^ 0xFF);
                    bits.put_byte((((d >> 8) as u8) & 0x1F) | 0xE0);
                    bits.put_byte((length - 1) as u8);
                }
                pos += length;
            }
        }
    }
    debug_assert_eq!(pos, data.len());

    // Terminator match, own design (no original source for this format —
    // see the module doc comment and DESIGN.md): a fixed sentinel in the
    // wide match form, written directly rather than through the normal
    // distance/length encoding above since a real zero distance cannot be
    // expressed there (`distance - 1` would underflow).
    bits.put_descriptor_bit(true);
    bits.put_descriptor_bit(true);
    bits.put_byte(0xFF);
    bits.put_byte(0xE0);
    bits.put_byte(0x00);

    Ok(bits.finish())
}

/// Compress `data` as a single Kosinski stream.
pub fn compress(data: &[u8]) -> CompressResult<Vec<u8>> {
    regular_wrapper(data, compress_one)
}

/// Compress `data` as a sequence of independently-compressed
/// `module_size`-byte chunks behind a total-size header.
pub fn compress_moduled(data: &[u8], module_size: usize) -> CompressResult<Vec<u8>> {
    moduled_wrapper(data, module_size, 2, compress_one)
}
