#![no_main]

use libfuzzer_sys::fuzz_target;
use dumpscope::{DecoderConfig, HeapDump};

fuzz_target!(|data: &[u8]| {
    if let Ok(dump) = HeapDump::from_mem_with_config(data.to_vec(), DecoderConfig::hardened()) {
        for record in dump.records() {
            if record.is_err() {
                break;
            }
        }
    }
});
