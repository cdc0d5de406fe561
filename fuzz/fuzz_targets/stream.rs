#![no_main]

use libfuzzer_sys::fuzz_target;
use dumpscope::{DecoderConfig, DumpReader, StreamSource};

fuzz_target!(|data: &[u8]| {
    let reader = DumpReader::with_config(StreamSource::new(data), DecoderConfig::hardened());
    let _ = reader.count();
});
