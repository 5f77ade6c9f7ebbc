//! Descriptor-bit / payload-byte interleaver.
//!
//! Every format in this crate prefixes each literal or match with one
//! descriptor bit (`0` = literal, `1` = match, or vice versa) packed
//! `TOTAL_DESCRIPTOR_BITS` at a time into a descriptor word, with the
//! payload bytes for literals and matches going into their own stream.
//! Three layouts are grounded directly in `original_source/`:
//!
//! * **Interleaved** (`comper.c`): each descriptor word is flushed lazily —
//!   once it fills, the flush itself is deferred until the first descriptor
//!   bit of the *next* word, so every payload byte belonging to the word
//!   just completed (including the edge whose bit filled it) has already
//!   been buffered. The flushed word is followed by those payload bytes.
//! * **SplitFile** (`chameleon.c`): descriptor bits accumulate in their own
//!   buffer for the entire compression; only at the very end are the two
//!   buffers concatenated, descriptor buffer first, prefixed with a 2-byte
//!   big-endian length of the descriptor stream.
//! * Header fix-up (`rocket.c`) is not a distinct layout — it is the
//!   `Interleaved` layout plus a caller-managed placeholder write before
//!   compression and a backpatch after, so it is left to the format module
//!   rather than modeled here.
//!
//! Bit order and descriptor width are runtime parameters rather than two
//! more enum-free functions, matching `clownlzss.h`'s macro parameterizing
//! over `TOTAL_DESCRIPTOR_BITS`.

/// Whether a descriptor word's bits fill from the high end (`chameleon.c`,
/// `comper.c`) or the low end (`rocket.c`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BitOrder {
    Msb,
    Lsb,
}

/// How descriptor words relate to the payload byte stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// Flush each full descriptor word directly into the shared output,
    /// immediately followed by payload bytes accumulated since the last
    /// flush.
    Interleaved,
    /// Accumulate descriptor bits in a side buffer for the whole call;
    /// concatenate with the payload buffer only at `finish()`.
    SplitFile,
}

/// Stateful descriptor-bit / payload-byte combiner. One instance per
/// compression call — no process-global state, per the crate's
/// per-call-only concurrency model.
pub struct Interleaver {
    descriptor_bits: u32,
    bit_order: BitOrder,
    layout: Layout,
    descriptor: u32,
    bits_remaining: u32,
    output: Vec<u8>,
    descriptor_buffer: Vec<u8>,
    payload_buffer: Vec<u8>,
}

impl Interleaver {
    /// `descriptor_bits` is the descriptor word width (8 or 16).
    pub fn new(descriptor_bits: u32, bit_order: BitOrder, layout: Layout) -> Self {
        Interleaver {
            descriptor_bits,
            bit_order,
            layout,
            descriptor: 0,
            bits_remaining: descriptor_bits,
            output: Vec::new(),
            descriptor_buffer: Vec::new(),
            payload_buffer: Vec::new(),
        }
    }

    /// Append one descriptor bit. Lazy flush: a full descriptor word is
    /// only flushed once the *next* bit comes in, by which point every
    /// payload byte for the edges in that word has already reached
    /// `payload_buffer` via `put_byte`. Flushing on the bit that fills the
    /// word instead (eager flush) would cut the word's own last edge off
    /// from its payload, since callers always emit the descriptor bit for
    /// an edge before its payload bytes.
    pub fn put_descriptor_bit(&mut self, bit: bool) {
        if self.bits_remaining == 0 {
            self.flush_descriptor(0);
        }
        match self.bit_order {
            BitOrder::Msb => {
                self.descriptor <<= 1;
                if bit {
                    self.descriptor |= 1;
                }
            }
            BitOrder::Lsb => {
                self.descriptor >>= 1;
                if bit {
                    self.descriptor |= 1 << (self.descriptor_bits - 1);
                }
            }
        }
        self.bits_remaining -= 1;
    }

    /// Append a raw payload byte. In the `Interleaved` layout this sits in
    /// a side buffer pending the next descriptor flush; in `SplitFile` it
    /// accumulates for the whole call, since the payload stream there is
    /// never interrupted by descriptor words.
    pub fn put_byte(&mut self, byte: u8) {
        self.payload_buffer.push(byte);
    }

    /// Flush whatever is in the descriptor register, shifting it into its
    /// final position first. `pad` is the number of bits never written
    /// this word (0 for a mid-stream full-register flush, `bits_remaining`
    /// for the final partial flush at `finish()`); for MSB order the
    /// register is left-shifted by `pad` to push real bits to the top, for
    /// LSB order it is right-shifted by `pad` to push them to the bottom.
    fn flush_descriptor(&mut self, pad: u32) {
        let word = match self.bit_order {
            BitOrder::Msb => self.descriptor << pad,
            BitOrder::Lsb => self.descriptor >> pad,
        };

        let (first, second) = if self.descriptor_bits == 16 {
            match self.bit_order {
                BitOrder::Msb => ((word >> 8) as u8, (word & 0xFF) as u8),
                BitOrder::Lsb => ((word & 0xFF) as u8, (word >> 8) as u8),
            }
        } else {
            (word as u8, 0)
        };
        self.push_word(first, second);

        self.descriptor = 0;
        self.bits_remaining = self.descriptor_bits;
    }

    fn push_word(&mut self, first: u8, second_if_16bit: u8) {
        match self.layout {
            Layout::Interleaved => {
                self.output.push(first);
                if self.descriptor_bits == 16 {
                    self.output.push(second_if_16bit);
                }
                self.output.append(&mut self.payload_buffer);
            }
            Layout::SplitFile => {
                self.descriptor_buffer.push(first);
                if self.descriptor_bits == 16 {
                    self.descriptor_buffer.push(second_if_16bit);
                }
            }
        }
    }

    /// Finalize the stream: flush whatever descriptor word is pending
    /// (partially filled, or exactly full and waiting for the lazy flush
    /// that would otherwise happen on the next bit) and return the
    /// complete byte sequence (for `SplitFile`, this is where the 2-byte
    /// big-endian descriptor-length header and the descriptor buffer are
    /// prefixed onto the payload buffer).
    pub fn finish(mut self) -> Vec<u8> {
        if self.bits_remaining != self.descriptor_bits {
            let pad = self.bits_remaining;
            self.flush_descriptor(pad);
        }

        match self.layout {
            Layout::Interleaved => self.output,
            Layout::SplitFile => {
                let mut result = Vec::with_capacity(
                    2 + self.descriptor_buffer.len() + self.payload_buffer.len(),
                );
                let descriptor_len = self.descriptor_buffer.len() as u16;
                result.push((descriptor_len >> 8) as u8);
                result.push((descriptor_len & 0xFF) as u8);
                result.extend_from_slice(&self.descriptor_buffer);
                result.extend_from_slice(&self.payload_buffer);
                result
            }
        }
    }

    /// Access to the in-progress output buffer, needed by formats (Rocket)
    /// that must write placeholder header bytes before any descriptor bits
    /// are produced and backpatch them once the final size is known. Only
    /// meaningful for the `Interleaved` layout, the only one Rocket uses.
    pub fn output_mut(&mut self) -> &mut Vec<u8> {
        debug_assert_eq!(self.layout, Layout::Interleaved);
        &mut self.output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Ten edges through an 8-bit descriptor, each bit set and one payload
    /// byte per edge: the eighth edge's bit exactly fills the first word,
    /// and its payload must land in that word's group, not the next one.
    #[test]
    fn interleaved_does_not_drop_payload_at_a_word_boundary() {
        let mut bits = Interleaver::new(8, BitOrder::Msb, Layout::Interleaved);
        for edge in 0u8..10 {
            bits.put_descriptor_bit(true);
            bits.put_byte(edge);
        }
        let out = bits.finish();
        assert_eq!(
            out,
            vec![0xFF, 0, 1, 2, 3, 4, 5, 6, 7, 0b1100_0000, 8, 9]
        );
    }

    /// Same check for a 16-bit descriptor and Lsb order, past two full
    /// words, to cover both the wide-descriptor and Lsb packing paths.
    #[test]
    fn interleaved_does_not_drop_payload_across_multiple_words() {
        let mut bits = Interleaver::new(16, BitOrder::Lsb, Layout::Interleaved);
        for edge in 0u8..20 {
            bits.put_descriptor_bit(true);
            bits.put_byte(edge);
        }
        let out = bits.finish();
        // One full 16-bit word (2 descriptor bytes) + 16 payload bytes,
        // then a partial word (2 descriptor bytes) + 4 payload bytes.
        assert_eq!(out.len(), 2 + 16 + 2 + 4);
        assert_eq!(&out[2..18], &[0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15]);
        assert_eq!(&out[20..24], &[16, 17, 18, 19]);
    }

    #[test]
    fn finish_flushes_a_word_that_exactly_fills_on_the_last_bit() {
        let mut bits = Interleaver::new(8, BitOrder::Msb, Layout::Interleaved);
        for edge in 0u8..8 {
            bits.put_descriptor_bit(true);
            bits.put_byte(edge);
        }
        let out = bits.finish();
        assert_eq!(out, vec![0xFF, 0, 1, 2, 3, 4, 5, 6, 7]);
    }
}
