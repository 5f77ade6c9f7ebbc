//! Rocket: interleaved layout, LSB-first 8-bit descriptor words, and a
//! header fix-up pattern instead of an upfront length field.
//!
//! Grounded on `original_source/rocket.c`: `CompressData` is instantiated
//! with `(unsigned char, 0x40, 0x400, FindExtraMatches, 1+8, DoLiteral,
//! GetMatchCost, DoMatch)`. `DoMatch`'s signature is
//! `(distance, length, offset, user)`, and it explicitly discards
//! `distance` (`(void)distance;`), packing `(offset + 0x3C0) & 0x3FF` — the
//! match's *absolute source position* rotated by `0x3C0`, not the
//! relative distance back from the current position — into a 10-bit field
//! alongside a 6-bit length-1 field, split across two bytes. This only
//! makes sense for a decoder that writes every decoded byte (literal or
//! match) into a fixed-size ring buffer at its own rotated absolute
//! position: encoding the source's own rotated position then directly
//! gives the decoder a ring index to copy from, with no distance
//! arithmetic needed on the decode side. `engine::Edge::Match` carries
//! this absolute `offset` precisely so this backend can use it instead of
//! `distance` here. `RocketCompressStream` writes a 2-byte big-endian uncompressed
//! size followed by 2 placeholder bytes before compressing, then backpatches
//! the placeholder with the actual compressed size once compression
//! finishes — this crate reproduces that by writing directly into the
//! `Interleaver`'s output buffer before any descriptor bits are produced.
//! The `0x3C0` rotation constant is carried forward unverified against a
//! real decoder, same as upstream (see DESIGN.md). Unlike Chameleon and
//! Comper, `RocketCompressStream` appends no terminator match: the header's
//! uncompressed-size field already tells the decoder exactly how many bytes
//! to produce, so there is nothing for a sentinel match to signal.
//!
//! `RocketCompressStream` itself writes the uncompressed size into its
//! 16-bit header field without any bounds check, silently wrapping on
//! larger input — faithful to the original, but not a contract this crate
//! chooses to inherit. `compress` rejects input above `u16::MAX` bytes
//! explicitly instead.

use crate::bitstream::{BitOrder, Interleaver, Layout};
use crate::engine::{self, Backend, Edge};
use crate::error::{CompressError, CompressResult};
use crate::wrapper::{moduled_wrapper, regular_wrapper};

const MAX_MATCH_LENGTH: usize = 0x40;
const MAX_MATCH_DISTANCE: usize = 0x400;
const OFFSET_ROTATION: usize = 0x3C0;
const OFFSET_MASK: usize = 0x3FF;

struct RocketBackend;

impl Backend for RocketBackend {
    type Symbol = u8;

    const MAX_MATCH_LENGTH: usize = MAX_MATCH_LENGTH;
    const MAX_MATCH_DISTANCE: usize = MAX_MATCH_DISTANCE;

    fn literal_cost(&self) -> u32 {
        1 + 8
    }

    fn match_cost(&self, length: usize, _distance: usize) -> u32 {
        if (1..=MAX_MATCH_LENGTH).contains(&length) {
            1 + 16
        } else {
            0
        }
    }
}

fn compress_one(data: &[u8]) -> CompressResult<Vec<u8>> {
    if data.len() > u16::MAX as usize {
        return Err(CompressError::InputTooLarge);
    }
    log::trace!("rocket: compressing {} bytes", data.len());
    let nodes = engine::build_graph(&RocketBackend, data);
    let edges = engine::walk_edges(&nodes);

    let mut bits = Interleaver::new(8, BitOrder::Lsb, Layout::Interleaved);

    let uncompressed_size = data.len() as u16;
    {
        let out = bits.output_mut();
        out.push((uncompressed_size >> 8) as u8);
        out.push((uncompressed_size & 0xFF) as u8);
        out.push(0);
        out.push(0);
    }
    let header_end = bits.output_mut().len();

    let mut pos = 0usize;
    for edge in edges {
        match edge {
            Edge::Literal => {
                bits.put_descriptor_bit(false);
                bits.put_byte(data[pos]);
                pos += 1;
            }
            Edge::Match { length, offset, .. } => {
                bits.put_descriptor_bit(true);
                // `DoMatch` in rocket.c ignores the distance argument
                // entirely and rotates the absolute source position
                // instead — the result addresses a ring buffer a real
                // decoder writes every decoded byte into at that same
                // rotated position, so it must be computed from `offset`
                // here, not `distance`.
                let offset_adjusted = (offset + OFFSET_ROTATION) & OFFSET_MASK;
                bits.put_byte((((offset_adjusted >> 8) & 3) | (((length - 1) as usize) << 2)) as u8);
                bits.put_byte((offset_adjusted & 0xFF) as u8);
                pos += length;
            }
        }
    }
    debug_assert_eq!(pos, data.len());

    let mut output = bits.finish();
    let compressed_size = (output.len() - header_end) as u16;
    output[2] = (compressed_size >> 8) as u8;
    output[3] = (compressed_size & 0xFF) as u8;
    Ok(output)
}

/// Compress `data` as a single Rocket stream, including its 4-byte header.
pub fn compress(data: &[u8]) -> CompressResult<Vec<u8>> {
    regular_wrapper(data, compress_one)
}

/// Compress `data` as a sequence of independently-compressed
/// `module_size`-byte chunks behind a total-size header. Rocket's module
/// alignment is 1 byte, matching `ClownLZSS_ModuledRocketCompress`.
pub fn compress_moduled(data: &[u8], module_size: usize) -> CompressResult<Vec<u8>> {
    moduled_wrapper(data, module_size, 1, compress_one)
}

#[cfg(test)]
mod tests {
    use super::*;

    // Test-only decoder modeled on the field semantics `DoMatch` implies
    // rather than on this module's own encoder: every decoded byte (literal
    // or part of a match) is written into a `0x400`-entry ring buffer at
    // `(absolute_position + OFFSET_ROTATION) & OFFSET_MASK`, the same slot
    // the encoder's rotation formula computes for that position when it is
    // later used as a match source. A match's two-byte field is then simply
    // that ring index, used directly with no distance arithmetic — matching
    // `DoMatch` discarding `distance` entirely and packing only the rotated
    // `offset`.
    fn decode(encoded: &[u8]) -> Vec<u8> {
        let uncompressed_size = ((encoded[0] as usize) << 8) | encoded[1] as usize;
        let mut pos = 4usize;
        let mut out = Vec::with_capacity(uncompressed_size);
        let mut ring = [0u8; OFFSET_MASK + 1];

        let mut descriptor = 0u32;
        let mut bits_left = 0u32;
        let mut read_bit = |encoded: &[u8], pos: &mut usize| {
            if bits_left == 0 {
                descriptor = encoded[*pos] as u32;
                *pos += 1;
                bits_left = 8;
            }
            let bit = descriptor & 1 != 0;
            descriptor >>= 1;
            bits_left -= 1;
            bit
        };
        let ring_slot = |absolute_pos: usize| (absolute_pos + OFFSET_ROTATION) & OFFSET_MASK;

        while out.len() < uncompressed_size {
            if !read_bit(encoded, &mut pos) {
                let byte = encoded[pos];
                pos += 1;
                ring[ring_slot(out.len())] = byte;
                out.push(byte);
            } else {
                let b0 = encoded[pos] as usize;
                let b1 = encoded[pos + 1] as usize;
                pos += 2;
                let length = (b0 >> 2) + 1;
                let offset_adjusted = ((b0 & 3) << 8) | b1;
                for step in 0..length {
                    let byte = ring[(offset_adjusted + step) & OFFSET_MASK];
                    ring[ring_slot(out.len())] = byte;
                    out.push(byte);
                }
            }
        }
        out
    }

    #[test]
    fn header_records_uncompressed_and_compressed_size() {
        let data = vec![0x7Fu8; 40];
        let compressed = compress(&data).unwrap();
        let uncompressed_size = ((compressed[0] as usize) << 8) | compressed[1] as usize;
        let compressed_size = ((compressed[2] as usize) << 8) | compressed[3] as usize;
        assert_eq!(uncompressed_size, 40);
        assert_eq!(compressed_size, compressed.len() - 4);
    }

    #[test]
    fn round_trips_repetitive_input() {
        let data = vec![0x42u8; 80];
        let compressed = compress(&data).unwrap();
        assert_eq!(decode(&compressed), data);
    }

    #[test]
    fn round_trips_mixed_input() {
        let mut data = Vec::new();
        for i in 0..150u32 {
            data.push((i % 5) as u8);
        }
        let compressed = compress(&data).unwrap();
        assert_eq!(decode(&compressed), data);
    }

    #[test]
    fn rejects_input_above_16_bit_size_field() {
        let data = vec![0u8; u16::MAX as usize + 1];
        assert_eq!(compress(&data), Err(CompressError::InputTooLarge));
    }
}
