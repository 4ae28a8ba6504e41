use std::convert::TryInto;

use crate::TagType;

const END: u8 = 0;

/// Builder for NBT data. This is to create test data. It specifically does
/// *not* guarantee the resulting data is valid NBT. Creating invalid NBT is
/// useful for testing.
pub struct Builder {
    payload: Vec<u8>,
    big_endian: bool,
}

impl Builder {
    /// Big endian, as written by Java Edition.
    pub fn new() -> Self {
        Builder {
            payload: Vec::new(),
            big_endian: true,
        }
    }

    /// Little endian, as written by Bedrock Edition.
    pub fn little_endian() -> Self {
        Builder {
            payload: Vec::new(),
            big_endian: false,
        }
    }

    fn number(mut self, be: &[u8], le: &[u8]) -> Self {
        self.payload
            .extend_from_slice(if self.big_endian { be } else { le });
        self
    }

    pub fn tag(mut self, t: TagType) -> Self {
        self.payload.push(t.into());
        self
    }

    pub fn name(self, name: &str) -> Self {
        let name = cesu8::to_java_cesu8(name);
        let len = name.len() as u16;
        self.number(&len.to_be_bytes(), &len.to_le_bytes())
            .raw_bytes(&name)
    }

    pub fn start_compound(self, name: &str) -> Self {
        self.tag(TagType::Compound).name(name)
    }

    pub fn end_compound(self) -> Self {
        self.raw_bytes(&[END])
    }

    pub fn start_list(self, name: &str, element_tag: TagType, size: i32) -> Self {
        self.tag(TagType::List)
            .name(name)
            .tag(element_tag)
            .int_payload(size)
    }

    /// An empty list with `End` as its element type, as Minecraft writes them.
    pub fn empty_list(self, name: &str) -> Self {
        self.tag(TagType::List)
            .name(name)
            .raw_bytes(&[END])
            .int_payload(0)
    }

    pub fn byte(self, name: &str, b: i8) -> Self {
        self.tag(TagType::Byte).name(name).byte_payload(b)
    }

    pub fn short(self, name: &str, b: i16) -> Self {
        self.tag(TagType::Short).name(name).short_payload(b)
    }

    pub fn int(self, name: &str, b: i32) -> Self {
        self.tag(TagType::Int).name(name).int_payload(b)
    }

    pub fn long(self, name: &str, b: i64) -> Self {
        self.tag(TagType::Long).name(name).long_payload(b)
    }

    pub fn string(self, name: &str, s: &str) -> Self {
        self.tag(TagType::String).name(name).string_payload(s)
    }

    pub fn float(self, name: &str, n: f32) -> Self {
        self.tag(TagType::Float).name(name).float_payload(n)
    }

    pub fn double(self, name: &str, n: f64) -> Self {
        self.tag(TagType::Double).name(name).double_payload(n)
    }

    pub fn byte_array(self, name: &str, bs: &[i8]) -> Self {
        self.tag(TagType::ByteArray)
            .name(name)
            .int_payload(bs.len().try_into().unwrap())
            .byte_array_payload(bs)
    }

    pub fn int_array(self, name: &str, arr: &[i32]) -> Self {
        self.tag(TagType::IntArray)
            .name(name)
            .int_payload(arr.len().try_into().unwrap())
            .int_array_payload(arr)
    }

    pub fn long_array(self, name: &str, arr: &[i64]) -> Self {
        self.tag(TagType::LongArray)
            .name(name)
            .int_payload(arr.len().try_into().unwrap())
            .long_array_payload(arr)
    }

    pub fn string_payload(self, s: &str) -> Self {
        self.name(s)
    }

    pub fn byte_payload(mut self, b: i8) -> Self {
        self.payload.push(b as u8);
        self
    }

    pub fn byte_array_payload(mut self, bs: &[i8]) -> Self {
        for b in bs {
            self.payload.push(*b as u8);
        }
        self
    }

    pub fn short_payload(self, i: i16) -> Self {
        self.number(&i.to_be_bytes(), &i.to_le_bytes())
    }

    pub fn int_payload(self, i: i32) -> Self {
        self.number(&i.to_be_bytes(), &i.to_le_bytes())
    }

    pub fn int_array_payload(mut self, is: &[i32]) -> Self {
        for i in is {
            self = self.int_payload(*i);
        }
        self
    }

    pub fn long_payload(self, i: i64) -> Self {
        self.number(&i.to_be_bytes(), &i.to_le_bytes())
    }

    pub fn long_array_payload(mut self, is: &[i64]) -> Self {
        for i in is {
            self = self.long_payload(*i);
        }
        self
    }

    pub fn float_payload(self, f: f32) -> Self {
        self.number(&f.to_be_bytes(), &f.to_le_bytes())
    }

    pub fn double_payload(self, f: f64) -> Self {
        self.number(&f.to_be_bytes(), &f.to_le_bytes())
    }

    /// Straight up add some bytes to the payload. For very corner-case tests
    /// that are not worth a specific builder method.
    pub fn raw_bytes(mut self, bs: &[u8]) -> Self {
        self.payload.extend_from_slice(bs);
        self
    }

    /// This is a no-op, but can make code clearer by showing the points where a
    /// compound in a list has logically started.
    pub fn start_anon_compound(self) -> Self {
        self
    }

    pub fn build(self) -> Vec<u8> {
        self.payload
    }
}
