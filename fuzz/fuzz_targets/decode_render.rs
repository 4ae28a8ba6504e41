#![no_main]
use libfuzzer_sys::fuzz_target;

use nbtview::{html::to_html, text::to_text, Decode, NbtDecoder, RenderOptions, Renderer};

fuzz_target!(|data: &[u8]| {
    let renderer = Renderer::new(RenderOptions { truncate: Some(100) });

    for big_endian in [true, false] {
        if let Ok(tag) = NbtDecoder.decode(data, big_endian) {
            let tree = renderer.render(&tag);
            let _html = to_html(&tree);
            let _text = to_text(&tree);
        }
    }
});
