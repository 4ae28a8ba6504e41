#![no_main]
use libfuzzer_sys::fuzz_target;

use nbtview::{html::to_html, render, Tag};

fuzz_target!(|data: &[u8]| {
    if let Ok(tag) = serde_json::from_slice::<Tag>(data) {
        let _html = to_html(&render(&tag));
        let _back = serde_json::to_vec(&tag).unwrap();
    }
});
