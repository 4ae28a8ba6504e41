use std::rc::Rc;

use gloo_utils::format::JsValueSerdeExt;
use js_sys::{Function, Promise, Uint8Array};
use log::{error, LevelFilter};
use nbtview::{
    decode::NbtDecoder,
    html::to_html,
    pipeline::{Document, Initialized, Notifier, Pipeline, PipelineOptions, ReadError, Request},
    Decode, RenderOptions, Renderer, Tag, VisualNode,
};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::{future_to_promise, JsFuture};

mod console;

#[wasm_bindgen]
extern "C" {
    fn alert(s: &str);
}

struct Alert;

impl Notifier for Alert {
    fn notify(&self, message: &str) {
        alert(message);
    }
}

/// The part of the page after the form. The page owns the DOM, so both
/// operations are callbacks into it.
struct PageDocument {
    insert: Function,
    clear: Function,
}

impl Document for PageDocument {
    fn append(&mut self, node: VisualNode) {
        let html = JsValue::from_str(&to_html(&node));
        if let Err(e) = self.insert.call1(&JsValue::NULL, &html) {
            error!("inserting result failed: {:?}", e);
        }
    }

    fn clear(&mut self) {
        if let Err(e) = self.clear.call0(&JsValue::NULL) {
            error!("clearing results failed: {:?}", e);
        }
    }
}

/// Drives the page: one instance per form.
#[wasm_bindgen]
pub struct Explorer {
    pipeline: Rc<Pipeline<NbtDecoder, PageDocument, Alert>>,
}

#[wasm_bindgen]
impl Explorer {
    /// `insert(html)` places one rendered tree on the page, `clear()` removes
    /// every tree inserted so far.
    #[wasm_bindgen(constructor)]
    pub fn new(insert: Function, clear: Function) -> Self {
        let pipeline = Pipeline::new(
            Initialized::ready(NbtDecoder),
            PageDocument { insert, clear },
            Alert,
            PipelineOptions::default(),
        );
        Self {
            pipeline: Rc::new(pipeline),
        }
    }

    /// Show at most `n` elements of each list or array, 0 for all of them.
    pub fn set_truncate(&self, n: usize) {
        let options = self.pipeline.options();
        self.pipeline.set_options(PipelineOptions {
            render: RenderOptions {
                truncate: if n == 0 { None } else { Some(n) },
            },
            ..options
        });
    }

    pub fn set_clear_previous(&self, clear_previous: bool) {
        let options = self.pipeline.options();
        self.pipeline.set_options(PipelineOptions {
            clear_previous,
            ..options
        });
    }

    /// Process a file. `buffer` is the promise returned by
    /// `file.arrayBuffer()`. The returned promise rejects with the error
    /// message if the file could not be shown.
    pub fn submit(&self, buffer: Promise, big_endian: bool) -> Promise {
        let pipeline = Rc::clone(&self.pipeline);

        future_to_promise(async move {
            let source = async move {
                let buffer = JsFuture::from(buffer)
                    .await
                    .map_err(|e| ReadError::new(describe(&e)))?;
                Ok::<_, ReadError>(Uint8Array::new(&buffer).to_vec())
            };

            pipeline
                .submit(Request::new(source, big_endian))
                .await
                .map(|()| JsValue::UNDEFINED)
                .map_err(|e| JsValue::from_str(&e.to_string()))
        })
    }

    /// Render a tag tree given as JSON, in the shape [`explore`] returns,
    /// to the same markup `submit` inserts.
    pub fn render_json(&self, json: &str) -> Result<String, JsValue> {
        let tag: Tag =
            serde_json::from_str(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        let renderer = Renderer::new(self.pipeline.options().render);
        Ok(to_html(&renderer.render(&tag)))
    }
}

/// Decode uncompressed `data` and hand back the tag tree as a plain JS
/// object of `{type, name, payload}` nodes.
#[wasm_bindgen]
pub fn explore(data: Uint8Array, big_endian: bool) -> Result<JsValue, String> {
    let tag = NbtDecoder
        .decode(&data.to_vec(), big_endian)
        .map_err(|e| e.to_string())?;
    JsValue::from_serde(&tag).map_err(|e| e.to_string())
}

fn describe(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}

pub fn set_panic_hook() {
    // With the `console_error_panic_hook` feature, panics are written to the
    // console rather than showing up as "unreachable executed".
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

#[wasm_bindgen(start)]
pub fn force_init() {
    set_panic_hook();
    console::init(LevelFilter::Info);
}
