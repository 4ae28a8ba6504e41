//! nbtview turns NBT data, the format *Minecraft* uses to store worlds,
//! players and level data, into a nested tree of visual nodes that a host
//! can display: a web page, a terminal, or anything else that can show a
//! hierarchy.
//!
//! * For the decoded data model see [`Tag`], [`Payload`] and [`TagType`].
//! * For turning a tag into a visual tree see [`render`] and [`Renderer`].
//! * For displaying a visual tree see [`html`] and [`text`].
//! * For reading a file, decoding it and handing the result to a host see
//!   [`pipeline`].
//!
//! ```toml
//! [dependencies]
//! nbtview = "0.1"
//! ```
//!
//! # Quick example
//!
//! ```
//! use nbtview::{render, Payload, Tag};
//!
//! let tag = Tag::anonymous(Payload::Compound(vec![Tag::named("x", Payload::Byte(5))]));
//! let tree = render(&tag);
//!
//! assert_eq!(tree.kind, "compound");
//! assert_eq!(tree.label, None);
//! assert_eq!(tree.children[0].label.as_deref(), Some("x"));
//! assert_eq!(tree.children[0].value.as_ref().unwrap().text, "5");
//! ```
//!
//! # Decoding
//!
//! Decoding binary NBT is done by anything implementing [`Decode`]. This
//! crate ships [`NbtDecoder`], which handles both the big endian byte order
//! of *Java Edition* and the little endian byte order of *Bedrock Edition*.
//! The pipeline inflates gzip and zlib compressed input before decoding.

pub mod decode;
pub mod html;
pub mod pipeline;
pub mod render;
pub mod tag;
pub mod text;

mod compression;
mod json;

pub use decode::{Decode, NbtDecoder};
pub use render::{render, LeafValue, RenderOptions, Renderer, ValueClass, VisualNode};
pub use tag::{element_tag_of, Payload, Tag, TagType};

#[cfg(test)]
mod test;
