//! Comper: interleaved layout, MSB-first 16-bit descriptor words, 16-bit
//! little-endian symbols.
//!
//! Grounded on `original_source/comper.c`: `FindMatches` is instantiated
//! with `(unsigned short, 0x100, 0x100, FindExtraMatches, 1+16, DoLiteral,
//! GetMatchCost, DoMatch)` — every literal and every match costs the same
//! 17 bits, so the optimal parser here is really choosing run lengths
//! rather than juggling cost tiers. `DoLiteral` writes the 16-bit word
//! low-byte-first; `ComperCompress` reads the input as an array of 16-bit
//! words, which only makes sense for an even-length byte buffer, so this
//! crate rejects odd-length input explicitly instead of truncating or
//! padding it (`spec.md`'s Comper open question, resolved in DESIGN.md).
//! `compress_one` always appends `ComperCompress`'s fixed terminator match
//! before the final flush, so empty input still produces a well-formed
//! stream (`spec.md` §4.2, §7).

use crate::bitstream::{BitOrder, Interleaver, Layout};
use crate::engine::{self, Backend, Edge};
use crate::error::{CompressError, CompressResult};
use crate::wrapper::{moduled_wrapper, regular_wrapper};

const MAX_MATCH_LENGTH: usize = 0x100;
const MAX_MATCH_DISTANCE: usize = 0x100;

struct ComperBackend;

impl Backend for ComperBackend {
    type Symbol = u16;

    const MAX_MATCH_LENGTH: usize = MAX_MATCH_LENGTH;
    const MAX_MATCH_DISTANCE: usize = MAX_MATCH_DISTANCE;

    fn literal_cost(&self) -> u32 {
        1 + 16
    }

    fn match_cost(&self, _length: usize, _distance: usize) -> u32 {
        1 + 16
    }
}

fn words_from_bytes(data: &[u8]) -> CompressResult<Vec<u16>> {
    if data.len() % 2 != 0 {
        return Err(CompressError::OddLengthInput);
    }
    let mut words = Vec::new();
    words
        .try_reserve_exact(data.len() / 2)
        .map_err(|_| CompressError::AllocationFailed)?;
    for pair in data.chunks_exact(2) {
        words.push(u16::from_le_bytes([pair[0], pair[1]]));
    }
    Ok(words)
}

fn compress_one(data: &[u8]) -> CompressResult<Vec<u8>> {
    let words = words_from_bytes(data)?;
    log::trace!("comper: compressing {} words", words.len());
    let nodes = engine::build_graph(&ComperBackend, &words);
    let edges = engine::walk_edges(&nodes);

    let mut bits = Interleaver::new(16, BitOrder::Msb, Layout::Interleaved);
    let mut pos = 0usize;
    for edge in edges {
        match edge {
            Edge::Literal => {
                bits.put_descriptor_bit(false);
                let word = words[pos];
                bits.put_byte((word & 0xFF) as u8);
                bits.put_byte((word >> 8) as u8);
                pos += 1;
            }
            Edge::Match { distance, length, .. } => {
                bits.put_descriptor_bit(true);
                bits.put_byte((-(distance as i32) & 0xFF) as u8);
                bits.put_byte((length - 1) as u8);
                pos += length;
            }
        }
    }
    debug_assert_eq!(pos, words.len());

    // Terminator match: `comper.c` appends a fixed distance-0, length-1
    // match right before the final flush, regardless of whether any real
    // edges were emitted; a real match's encoded distance is never 0
    // (distance 0 would mean copying from the symbol about to be written),
    // so the decoder reads it as end-of-stream.
    bits.put_descriptor_bit(true);
    bits.put_byte(0);
    bits.put_byte(0);

    Ok(bits.finish())
}

/// Compress `data` (treated as little-endian 16-bit words) as a single
/// Comper stream. Returns [`CompressError::OddLengthInput`] if `data.len()`
/// is not a multiple of 2.
pub fn compress(data: &[u8]) -> CompressResult<Vec<u8>> {
    regular_wrapper(data, compress_one)
}

/// Compress `data` as a sequence of independently-compressed
/// `module_size`-byte chunks behind a total-size header.
pub fn compress_moduled(data: &[u8], module_size: usize) -> CompressResult<Vec<u8>> {
    moduled_wrapper(data, module_size, 2, compress_one)
}
