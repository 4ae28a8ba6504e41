//! Turning a [`Tag`] tree into a tree of [`VisualNode`]s.
//!
//! The visual tree mirrors the tag tree one to one: every tag becomes one
//! container node, children keep the order of the payload, and the depth of
//! the visual tree is the nesting depth of the tags. Array elements, which
//! are stored as raw numbers, are given their own anonymous nodes typed by
//! the array's element type.
//!
//! Rendering never fails. A tag of an unrecognised type is reported through
//! the `log` crate and rendered as an empty container.
use std::fmt::Display;

use log::warn;
use serde::Serialize;

use crate::{element_tag_of, Payload, Tag, TagType};

/// How a leaf value should be displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueClass {
    Numeric,
    String,
}

/// The displayed value of a scalar tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeafValue {
    pub class: ValueClass,
    pub text: String,
}

impl LeafValue {
    fn numeric(value: impl Display) -> Self {
        Self {
            class: ValueClass::Numeric,
            text: value.to_string(),
        }
    }

    fn string(value: &str) -> Self {
        Self {
            class: ValueClass::String,
            text: value.to_owned(),
        }
    }
}

/// One node of a rendered tree.
///
/// A host displays, in order: an icon for `kind`, the `label` if there is
/// one, then either the `value` or the `children`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VisualNode {
    /// The tag's type discriminant, eg `int_array`. Unrecognised types are
    /// kept verbatim.
    pub kind: String,
    /// The tag's name. Absent for anonymous tags, which is different from an
    /// empty name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<LeafValue>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<VisualNode>,
    /// Number of list or array elements left out by
    /// [`RenderOptions::truncate`].
    #[serde(skip_serializing_if = "is_zero")]
    pub elided: usize,
}

fn is_zero(n: &usize) -> bool {
    *n == 0
}

impl VisualNode {
    fn container(kind: &str, label: Option<&str>) -> Self {
        Self {
            kind: kind.to_owned(),
            label: label.map(str::to_owned),
            value: None,
            children: vec![],
            elided: 0,
        }
    }

    /// Number of levels in this tree, counting this node.
    pub fn depth(&self) -> usize {
        1 + self.children.iter().map(VisualNode::depth).max().unwrap_or(0)
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Render at most this many elements of each list and array. `None`
    /// renders everything. Compounds are never truncated.
    pub truncate: Option<usize>,
}

/// Renders tags with a fixed set of [`RenderOptions`].
#[derive(Debug, Default, Clone, Copy)]
pub struct Renderer {
    options: RenderOptions,
}

impl Renderer {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    pub fn render(&self, tag: &Tag) -> VisualNode {
        let mut node = VisualNode::container(tag.discriminant(), tag.name.as_deref());

        match &tag.payload {
            Payload::Byte(v) => node.value = Some(LeafValue::numeric(v)),
            Payload::Short(v) => node.value = Some(LeafValue::numeric(v)),
            Payload::Int(v) => node.value = Some(LeafValue::numeric(v)),
            Payload::Long(v) => node.value = Some(LeafValue::numeric(v)),
            Payload::Float(v) => node.value = Some(LeafValue::numeric(v)),
            Payload::Double(v) => node.value = Some(LeafValue::numeric(v)),
            Payload::String(s) => node.value = Some(LeafValue::string(s)),
            Payload::Compound(children) => {
                node.children = children.iter().map(|child| self.render(child)).collect();
            }
            Payload::List(elements) => {
                let shown = self.shown(elements.len());
                node.elided = elements.len() - shown;
                node.children = elements[..shown]
                    .iter()
                    .map(|element| self.render(element))
                    .collect();
            }
            Payload::ByteArray(values) => {
                let values = values.iter().map(|&v| i64::from(v));
                self.render_array(&mut node, TagType::ByteArray, values)
            }
            Payload::IntArray(values) => {
                let values = values.iter().map(|&v| i64::from(v));
                self.render_array(&mut node, TagType::IntArray, values)
            }
            Payload::LongArray(values) => {
                self.render_array(&mut node, TagType::LongArray, values.iter().copied())
            }
            Payload::Unknown(kind) => {
                warn!("unknown tag type {:?}, rendering an empty node", kind);
            }
        }

        node
    }

    fn shown(&self, len: usize) -> usize {
        match self.options.truncate {
            Some(max) => len.min(max),
            None => len,
        }
    }

    fn render_array<I>(&self, node: &mut VisualNode, container: TagType, values: I)
    where
        I: ExactSizeIterator<Item = i64>,
    {
        let len = values.len();
        let shown = self.shown(len);
        node.elided = len - shown;

        for value in values.take(shown) {
            match element_tag_of(container, value) {
                Some(element) => node.children.push(self.render(&element)),
                None => warn!("{} does not fit in an element of {}", value, container),
            }
        }
    }
}

/// Render `tag` with the default options: nothing is truncated.
pub fn render(tag: &Tag) -> VisualNode {
    Renderer::default().render(tag)
}
