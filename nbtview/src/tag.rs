//! The decoded NBT data model.
use std::{convert::TryFrom, fmt, str::FromStr};

/// The type of an NBT tag. This does not carry the value or the name of the
/// data. The `End` marker of the binary format is not a type a tag can have,
/// so it is not represented here.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
#[repr(u8)]
pub enum TagType {
    /// Equivalent to i8.
    Byte = 1,
    /// Equivalent to i16.
    Short = 2,
    /// Equivalent to i32.
    Int = 3,
    /// Equivalent to i64
    Long = 4,
    /// Equivalent to f32.
    Float = 5,
    /// Equivalent to f64.
    Double = 6,
    /// Represents as array of Byte (i8).
    ByteArray = 7,
    /// Represents a Unicode string.
    String = 8,
    /// Represents a list of anonymous tags.
    List = 9,
    /// Represents a struct-like structure of named tags.
    Compound = 10,
    /// Represents as array of Int (i32).
    IntArray = 11,
    /// Represents as array of Long (i64).
    LongArray = 12,
}

impl TryFrom<u8> for TagType {
    type Error = ();

    fn try_from(value: u8) -> Result<Self, ()> {
        use TagType::*;
        Ok(match value {
            1 => Byte,
            2 => Short,
            3 => Int,
            4 => Long,
            5 => Float,
            6 => Double,
            7 => ByteArray,
            8 => String,
            9 => List,
            10 => Compound,
            11 => IntArray,
            12 => LongArray,
            0 | 13..=u8::MAX => return Err(()),
        })
    }
}

impl From<TagType> for u8 {
    fn from(tag: TagType) -> Self {
        tag as u8
    }
}

impl TagType {
    /// The discriminant text of this type, eg `byte_array`. This is the key
    /// used for icons and in the JSON form of a [`Tag`].
    pub fn as_str(self) -> &'static str {
        match self {
            TagType::Byte => "byte",
            TagType::Short => "short",
            TagType::Int => "int",
            TagType::Long => "long",
            TagType::Float => "float",
            TagType::Double => "double",
            TagType::ByteArray => "byte_array",
            TagType::String => "string",
            TagType::List => "list",
            TagType::Compound => "compound",
            TagType::IntArray => "int_array",
            TagType::LongArray => "long_array",
        }
    }

    pub fn is_array(self) -> bool {
        matches!(
            self,
            TagType::ByteArray | TagType::IntArray | TagType::LongArray
        )
    }

    /// The type of the elements of an array type, found by stripping the
    /// `_array` suffix from the discriminant. `None` for every other type.
    pub fn element_type(self) -> Option<TagType> {
        self.as_str().strip_suffix("_array")?.parse().ok()
    }
}

impl FromStr for TagType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, ()> {
        Ok(match s {
            "byte" => TagType::Byte,
            "short" => TagType::Short,
            "int" => TagType::Int,
            "long" => TagType::Long,
            "float" => TagType::Float,
            "double" => TagType::Double,
            "byte_array" => TagType::ByteArray,
            "string" => TagType::String,
            "list" => TagType::List,
            "compound" => TagType::Compound,
            "int_array" => TagType::IntArray,
            "long_array" => TagType::LongArray,
            _ => return Err(()),
        })
    }
}

impl fmt::Display for TagType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The data of a tag. There is one variant per [`TagType`], plus `Unknown`
/// for data that claimed a type this crate does not recognise. Unknown
/// payloads only arise from loosely typed sources such as JSON; the binary
/// decoder rejects unknown type ids instead.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    ByteArray(Vec<i8>),
    String(String),
    /// Elements in order. Lists are homogeneous in NBT but this is not
    /// enforced here.
    List(Vec<Tag>),
    /// Named children in the order they appeared.
    Compound(Vec<Tag>),
    IntArray(Vec<i32>),
    LongArray(Vec<i64>),
    /// The unrecognised type discriminant, verbatim.
    Unknown(String),
}

impl Payload {
    /// The type of this payload, or the unrecognised discriminant.
    pub fn kind(&self) -> Result<TagType, &str> {
        Ok(match self {
            Payload::Byte(_) => TagType::Byte,
            Payload::Short(_) => TagType::Short,
            Payload::Int(_) => TagType::Int,
            Payload::Long(_) => TagType::Long,
            Payload::Float(_) => TagType::Float,
            Payload::Double(_) => TagType::Double,
            Payload::ByteArray(_) => TagType::ByteArray,
            Payload::String(_) => TagType::String,
            Payload::List(_) => TagType::List,
            Payload::Compound(_) => TagType::Compound,
            Payload::IntArray(_) => TagType::IntArray,
            Payload::LongArray(_) => TagType::LongArray,
            Payload::Unknown(kind) => return Err(kind.as_str()),
        })
    }
}

/// A single node of a decoded NBT tree.
///
/// The name is `None` for anonymous tags, such as list elements or a root
/// written without a name. `Some("")` is a present but empty name, which is
/// what Minecraft usually writes for the root compound.
#[derive(Debug, Clone, PartialEq)]
pub struct Tag {
    pub name: Option<String>,
    pub payload: Payload,
}

impl Tag {
    pub fn named(name: impl Into<String>, payload: Payload) -> Self {
        Self {
            name: Some(name.into()),
            payload,
        }
    }

    pub fn anonymous(payload: Payload) -> Self {
        Self {
            name: None,
            payload,
        }
    }

    pub fn kind(&self) -> Result<TagType, &str> {
        self.payload.kind()
    }

    /// The type discriminant as text, including unrecognised ones.
    pub fn discriminant(&self) -> &str {
        match self.kind() {
            Ok(kind) => kind.as_str(),
            Err(unknown) => unknown,
        }
    }
}

/// Builds the anonymous tag for one element of an array. The element type is
/// the container type without its `_array` suffix, so an element of an
/// `int_array` is an `int`.
///
/// Returns `None` if `container` is not an array type, or if `value` does not
/// fit in the element type.
///
/// ```
/// use nbtview::{element_tag_of, Payload, Tag, TagType};
///
/// assert_eq!(
///     element_tag_of(TagType::IntArray, 3),
///     Some(Tag::anonymous(Payload::Int(3)))
/// );
/// assert_eq!(element_tag_of(TagType::List, 3), None);
/// ```
pub fn element_tag_of(container: TagType, value: i64) -> Option<Tag> {
    let payload = match container.element_type()? {
        TagType::Byte => Payload::Byte(i8::try_from(value).ok()?),
        TagType::Int => Payload::Int(i32::try_from(value).ok()?),
        TagType::Long => Payload::Long(value),
        _ => return None,
    };
    Some(Tag::anonymous(payload))
}
