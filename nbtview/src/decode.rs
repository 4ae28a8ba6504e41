//! Decoding of binary NBT into a [`Tag`] tree.
//!
//! The rest of the crate only relies on the [`Decode`] trait, so a host can
//! swap in a different decoder. [`NbtDecoder`] is the one used by the tools
//! and the browser page.
use std::{borrow::Cow, convert::TryFrom, marker::PhantomData};

use byteorder::{BigEndian, ByteOrder, LittleEndian};
use log::debug;

use crate::{Payload, Tag, TagType};

/// Deepest nesting of lists and compounds accepted. Minecraft itself refuses
/// anything deeper.
pub const MAX_DEPTH: usize = 512;

/// Something that can turn a complete NBT payload into a tag tree.
pub trait Decode {
    /// Decode `bytes`, reading numbers and lengths as big endian if
    /// `big_endian` is set and little endian otherwise.
    fn decode(&self, bytes: &[u8], big_endian: bool) -> Result<Tag>;
}

/// Decoder for uncompressed binary NBT. *Java Edition* writes big endian
/// data, *Bedrock Edition* little endian.
#[derive(Debug, Default, Clone, Copy)]
pub struct NbtDecoder;

impl Decode for NbtDecoder {
    fn decode(&self, bytes: &[u8], big_endian: bool) -> Result<Tag> {
        debug!(
            "decoding {} bytes as {} endian",
            bytes.len(),
            if big_endian { "big" } else { "little" }
        );

        if big_endian {
            from_bytes::<BigEndian>(bytes)
        } else {
            from_bytes::<LittleEndian>(bytes)
        }
    }
}

/// Decode a single named root tag from `data` using the byte order `O`. All
/// of the input must be consumed.
pub fn from_bytes<O: ByteOrder>(data: &[u8]) -> Result<Tag> {
    let mut input = Slice::<O>::new(data);

    let tag = input.consume_tag()?.ok_or_else(Error::no_root)?;
    let name = input.consume_str()?;
    let payload = input.consume_payload(tag, 0)?;

    if !input.data.is_empty() {
        return Err(Error::bespoke(format!(
            "invalid nbt: {} trailing bytes after root tag",
            input.data.len()
        )));
    }

    Ok(Tag::named(name, payload))
}

/// The category of a decoding [`Error`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// Any other errors. Users should not match on this variant and should
    /// instead use a wildcard `_`.
    Other,

    /// Input ended part way through a tag.
    UnexpectedEof,

    InvalidTag,

    /// Expected unicode data but was not valid. Contained bytes are the
    /// invalid data.
    Nonunicode(Vec<u8>),

    /// Lists and compounds nested deeper than [`MAX_DEPTH`].
    TooDeep,
}

/// Various errors that can occur during decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    msg: String,
    kind: ErrorKind,
}

/// Convenience type for Result.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// An error with a custom message, for use by other [`Decode`]
    /// implementations.
    pub fn new(msg: impl Into<String>) -> Self {
        Self::bespoke(msg)
    }

    /// Get the kind of error.
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    fn bespoke(msg: impl Into<String>) -> Self {
        Self {
            msg: msg.into(),
            kind: ErrorKind::Other,
        }
    }

    fn invalid_tag(tag: u8) -> Self {
        Self {
            msg: format!("invalid nbt tag value: {}", tag),
            kind: ErrorKind::InvalidTag,
        }
    }

    fn no_root() -> Self {
        Self {
            msg: "invalid nbt: root tag is an end tag".to_owned(),
            kind: ErrorKind::InvalidTag,
        }
    }

    fn nonunicode(data: &[u8]) -> Self {
        Self {
            msg: format!(
                "invalid nbt string: nonunicode: {}",
                String::from_utf8_lossy(data)
            ),
            kind: ErrorKind::Nonunicode(data.to_vec()),
        }
    }

    fn unexpected_eof() -> Self {
        Self {
            msg: "eof: unexpectedly ran out of input".to_owned(),
            kind: ErrorKind::UnexpectedEof,
        }
    }

    fn too_deep() -> Self {
        Self {
            msg: format!("invalid nbt: nested deeper than {} levels", MAX_DEPTH),
            kind: ErrorKind::TooDeep,
        }
    }
}

impl std::error::Error for Error {}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.msg)
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        match e.kind() {
            std::io::ErrorKind::UnexpectedEof => Self::unexpected_eof(),
            _ => Self::bespoke(format!("io error: {}", e)),
        }
    }
}

fn try_size(size: i32, multiplier: usize) -> Result<usize> {
    let size: usize = size
        .try_into()
        .map_err(|_| Error::bespoke("size was negative"))?;

    size.checked_mul(multiplier)
        .ok_or_else(|| Error::bespoke("size too large"))
}

struct Slice<'de, O> {
    data: &'de [u8],
    order: PhantomData<O>,
}

impl<'de, O: ByteOrder> Slice<'de, O> {
    fn new(data: &'de [u8]) -> Self {
        Self {
            data,
            order: PhantomData,
        }
    }

    fn consume(&mut self, n: usize) -> Result<&'de [u8]> {
        if n <= self.data.len() {
            let (head, rest) = self.data.split_at(n);
            self.data = rest;
            Ok(head)
        } else {
            Err(Error::unexpected_eof())
        }
    }

    fn consume_byte(&mut self) -> Result<u8> {
        Ok(self.consume(1)?[0])
    }

    /// `None` is the end tag.
    fn consume_tag(&mut self) -> Result<Option<TagType>> {
        match self.consume_byte()? {
            0 => Ok(None),
            tag => TagType::try_from(tag)
                .map(Some)
                .map_err(|_| Error::invalid_tag(tag)),
        }
    }

    fn consume_str(&mut self) -> Result<String> {
        let len = O::read_u16(self.consume(2)?) as usize;
        let bytes = self.consume(len)?;
        cesu8::from_java_cesu8(bytes)
            .map(Cow::into_owned)
            .map_err(|_| Error::nonunicode(bytes))
    }

    fn consume_i16(&mut self) -> Result<i16> {
        Ok(O::read_i16(self.consume(std::mem::size_of::<i16>())?))
    }

    fn consume_i32(&mut self) -> Result<i32> {
        Ok(O::read_i32(self.consume(std::mem::size_of::<i32>())?))
    }

    fn consume_i64(&mut self) -> Result<i64> {
        Ok(O::read_i64(self.consume(std::mem::size_of::<i64>())?))
    }

    fn consume_f32(&mut self) -> Result<f32> {
        Ok(O::read_f32(self.consume(std::mem::size_of::<f32>())?))
    }

    fn consume_f64(&mut self) -> Result<f64> {
        Ok(O::read_f64(self.consume(std::mem::size_of::<f64>())?))
    }

    /// Consume an array length prefix and the bytes of that many elements.
    fn consume_array(&mut self, element_size: usize) -> Result<&'de [u8]> {
        let len = self.consume_i32()?;
        let size = try_size(len, element_size)?;
        self.consume(size)
    }

    fn consume_payload(&mut self, tag: TagType, depth: usize) -> Result<Payload> {
        Ok(match tag {
            TagType::Byte => Payload::Byte(self.consume_byte()? as i8),
            TagType::Short => Payload::Short(self.consume_i16()?),
            TagType::Int => Payload::Int(self.consume_i32()?),
            TagType::Long => Payload::Long(self.consume_i64()?),
            TagType::Float => Payload::Float(self.consume_f32()?),
            TagType::Double => Payload::Double(self.consume_f64()?),
            TagType::String => Payload::String(self.consume_str()?),
            TagType::ByteArray => {
                let bs = self.consume_array(1)?;
                Payload::ByteArray(bs.iter().map(|b| *b as i8).collect())
            }
            TagType::IntArray => {
                let bs = self.consume_array(std::mem::size_of::<i32>())?;
                let mut values = vec![0; bs.len() / std::mem::size_of::<i32>()];
                O::read_i32_into(bs, &mut values);
                Payload::IntArray(values)
            }
            TagType::LongArray => {
                let bs = self.consume_array(std::mem::size_of::<i64>())?;
                let mut values = vec![0; bs.len() / std::mem::size_of::<i64>()];
                O::read_i64_into(bs, &mut values);
                Payload::LongArray(values)
            }
            TagType::List => {
                let depth = enter(depth)?;
                let element_tag = self.consume_tag()?;
                let size = self.consume_i32()?;
                let size: usize = size
                    .try_into()
                    .map_err(|_| Error::bespoke("invalid nbt: negative list length"))?;

                match element_tag {
                    // Empty lists are often written with an end tag as the
                    // element type.
                    None if size == 0 => Payload::List(vec![]),
                    None => {
                        return Err(Error::bespoke(
                            "invalid nbt: non-empty list of end tags",
                        ))
                    }
                    Some(element_tag) => {
                        // Every element takes at least a byte, so a length
                        // beyond the remaining input is bogus anyway.
                        let mut elements = Vec::with_capacity(size.min(self.data.len()));
                        for _ in 0..size {
                            let payload = self.consume_payload(element_tag, depth)?;
                            elements.push(Tag::anonymous(payload));
                        }
                        Payload::List(elements)
                    }
                }
            }
            TagType::Compound => {
                let depth = enter(depth)?;
                let mut children = vec![];
                while let Some(tag) = self.consume_tag()? {
                    let name = self.consume_str()?;
                    let payload = self.consume_payload(tag, depth)?;
                    children.push(Tag::named(name, payload));
                }
                Payload::Compound(children)
            }
        })
    }
}

fn enter(depth: usize) -> Result<usize> {
    if depth >= MAX_DEPTH {
        Err(Error::too_deep())
    } else {
        Ok(depth + 1)
    }
}
