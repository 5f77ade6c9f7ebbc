#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Odd-length input must return an error, never panic.
    let _ = retrolzss::comper_compress(data);
});
