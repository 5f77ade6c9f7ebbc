//! Chameleon: split-file layout, MSB-first 8-bit descriptor words.
//!
//! Grounded on `original_source/chameleon.c`: `FindMatches` is instantiated
//! with `(unsigned char, 0xFF, 0x7FF, FindExtraMatches, 8+1, DoLiteral,
//! GetMatchCost, DoMatch)`, and `ChameleonCompress` writes a 2-byte
//! big-endian descriptor-stream length, the descriptor bits, then the
//! match/literal payload bytes. Match edges fall into one of three cost
//! tiers depending on length and distance, the same shape (and the same
//! length/distance boundaries, including the short tier's `length == 2`
//! case) as `GetMatchCost` in the original; within each tier this crate
//! picks its own concrete bit layout (a short prefix code selecting the
//! tier, since the grounding source for this format only preserves the
//! coarse cost shape and not every payload bit), recorded as an open
//! question resolution in DESIGN.md rather than presented as a verified
//! decoder-compatible layout. The engine itself enforces no minimum match
//! length at all (per `clownlzss.h`, a length-1 match is considered and
//! costed like everything else); each backend's own `match_cost` is what
//! decides which lengths are accepted, matching the original's own
//! `GetMatchCost` gating exactly here.
//!
//! `compress_one` always appends a fixed terminator match before the final
//! flush, exactly as `ChameleonCompress` does, so even empty input produces
//! a well-formed non-empty stream (`spec.md` §4.2, §7).

use crate::bitstream::{BitOrder, Interleaver, Layout};
use crate::engine::{self, Backend, Edge};
use crate::error::CompressResult;
use crate::wrapper::{moduled_wrapper, regular_wrapper};

const MAX_MATCH_LENGTH: usize = 0xFF;
const MAX_MATCH_DISTANCE: usize = 0x7FF;

struct ChameleonBackend;

impl Backend for ChameleonBackend {
    type Symbol = u8;

    const MAX_MATCH_LENGTH: usize = MAX_MATCH_LENGTH;
    const MAX_MATCH_DISTANCE: usize = MAX_MATCH_DISTANCE;

    fn literal_cost(&self) -> u32 {
        1 + 8
    }

    fn match_cost(&self, length: usize, distance: usize) -> u32 {
        if (2..=3).contains(&length) && distance < 0x100 {
            11
        } else if (3..=5).contains(&length) {
            19
        } else if (6..=MAX_MATCH_LENGTH).contains(&length) {
            27
        } else {
            0
        }
    }
}

fn compress_one(data: &[u8]) -> CompressResult<Vec<u8>> {
    log::trace!("chameleon: compressing {} bytes", data.len());
    let nodes = engine::build_graph(&ChameleonBackend, data);
    let edges = engine::walk_edges(&nodes);

    let mut bits = Interleaver::new(8, BitOrder::Msb, Layout::SplitFile);
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
                if (2..=3).contains(&length) && distance < 0x100 {
                    bits.put_descriptor_bit(false);
                    bits.put_byte(distance as u8);
                    bits.put_descriptor_bit(length == 3);
                } else if (3..=5).contains(&length) {
                    bits.put_descriptor_bit(true);
                    bits.put_descriptor_bit(false);
                    bits.put_byte((distance & 0xFF) as u8);
                    bits.put_byte((((distance >> 8) & 0x07) as u8) | (((length - 3) as u8) << 3));
                } else {
                    bits.put_descriptor_bit(true);
                    bits.put_descriptor_bit(true);
                    bits.put_byte((distance & 0xFF) as u8);
                    bits.put_byte(((distance >> 8) & 0x07) as u8);
                    bits.put_byte((length - 6) as u8);
                }
                pos += length;
            }
        }
    }
    debug_assert_eq!(pos, data.len());

    // Terminator match: `chameleon.c` appends a fixed match in its long
    // (length >= 6) form with a zero distance right before the final flush,
    // regardless of whether any real edges were emitted — the decoder reads
    // this as a sentinel since a real match never has distance 0. Written
    // here in this module's own bit-order convention (match = descriptor
    // bit `true`, long form = two further `true` subtype bits), not the
    // original's literal=`true` polarity — see the module doc comment.
    bits.put_descriptor_bit(true);
    bits.put_descriptor_bit(true);
    bits.put_descriptor_bit(true);
    bits.put_byte(0);
    bits.put_byte(0);
    bits.put_byte(0);

    Ok(bits.finish())
}

/// Compress `data` as a single Chameleon stream.
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

    struct BitReader<'a> {
        bytes: &'a [u8],
        byte_index: usize,
        bit_index: u32,
    }

    impl<'a> BitReader<'a> {
        fn new(bytes: &'a [u8]) -> Self {
            BitReader {
                bytes,
                byte_index: 0,
                bit_index: 0,
            }
        }

        fn read_bit(&mut self) -> bool {
            let byte = self.bytes[self.byte_index];
            let bit = (byte >> (7 - self.bit_index)) & 1 != 0;
            self.bit_index += 1;
            if self.bit_index == 8 {
                self.bit_index = 0;
                self.byte_index += 1;
            }
            bit
        }
    }

    // Test-only decoder for the exact layout `compress_one` produces above.
    // Decompression is not part of this crate's public surface; this exists
    // solely to exercise the round-trip property of the split-file layout.
    fn decode(encoded: &[u8], expected_len: usize) -> Vec<u8> {
        let descriptor_len = ((encoded[0] as usize) << 8) | encoded[1] as usize;
        let descriptor = &encoded[2..2 + descriptor_len];
        let mut payload = &encoded[2 + descriptor_len..];
        let mut reader = BitReader::new(descriptor);

        let mut out = Vec::with_capacity(expected_len);
        while out.len() < expected_len {
            if !reader.read_bit() {
                out.push(payload[0]);
                payload = &payload[1..];
                continue;
            }
            if !reader.read_bit() {
                let distance = payload[0] as usize;
                payload = &payload[1..];
                let length = if reader.read_bit() { 3 } else { 2 };
                copy_match(&mut out, distance, length);
            } else if !reader.read_bit() {
                let b0 = payload[0] as usize;
                let b1 = payload[1] as usize;
                payload = &payload[2..];
                let distance = b0 | ((b1 & 0x07) << 8);
                let length = (b1 >> 3) + 3;
                copy_match(&mut out, distance, length);
            } else {
                let b0 = payload[0] as usize;
                let b1 = payload[1] as usize;
                let b2 = payload[2] as usize;
                payload = &payload[3..];
                let distance = b0 | ((b1 & 0x07) << 8);
                let length = b2 + 6;
                copy_match(&mut out, distance, length);
            }
        }
        out
    }

    fn copy_match(out: &mut Vec<u8>, distance: usize, length: usize) {
        let start = out.len() - distance;
        for i in 0..length {
            let byte = out[start + i];
            out.push(byte);
        }
    }

    #[test]
    fn round_trips_repetitive_input() {
        let data = vec![0xABu8; 64];
        let compressed = compress(&data).unwrap();
        assert!(compressed.len() < data.len());
        assert_eq!(decode(&compressed, data.len()), data);
    }

    #[test]
    fn round_trips_mixed_input() {
        let mut data = Vec::new();
        for i in 0..200u32 {
            data.push((i % 7) as u8);
        }
        data.extend_from_slice(b"the quick brown fox the quick brown fox");
        let compressed = compress(&data).unwrap();
        assert_eq!(decode(&compressed, data.len()), data);
    }

    #[test]
    fn short_distance_length_two_match_round_trips() {
        // Too short to extend to the next tier (the input ends right after
        // the repeat), so this only round-trips correctly if the short tier
        // actually accepts length 2, not just length 3.
        let data = vec![10u8, 20, 10, 20];
        let compressed = compress(&data).unwrap();
        assert_eq!(decode(&compressed, data.len()), data);
    }

    #[test]
    fn empty_input_produces_terminator_only() {
        // No real edges, just the fixed terminator match (3 descriptor bits
        // packed MSB-first into one byte, padded with zeroes, plus its
        // 3-byte zero payload) behind the 2-byte descriptor-length header.
        let compressed = compress(&[]).unwrap();
        assert_eq!(compressed, vec![0x00, 0x01, 0xE0, 0x00, 0x00, 0x00]);
    }

    #[test]
    fn moduled_header_reports_uncompressed_size() {
        let data = vec![1u8, 2, 3, 4, 5, 6, 7, 8];
        let compressed = compress_moduled(&data, 4).unwrap();
        assert_eq!(&compressed[0..2], &[0x00, 0x08]);
    }
}
