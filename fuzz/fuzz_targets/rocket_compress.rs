#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Inputs above u16::MAX bytes are rejected explicitly; the header's
    // 16-bit uncompressed-size field can't represent them.
    let Ok(compressed) = retrolzss::rocket_compress(data) else {
        return;
    };
    // The header's declared sizes must always be internally consistent.
    let uncompressed_size = ((compressed[0] as usize) << 8) | compressed[1] as usize;
    let compressed_size = ((compressed[2] as usize) << 8) | compressed[3] as usize;
    assert_eq!(uncompressed_size, data.len());
    assert_eq!(compressed_size, compressed.len() - 4);
});
