//! Plain text rendering of a [`VisualNode`] tree, one node per line with four
//! spaces of indentation per level. Names that are empty or contain
//! whitespace, control characters, `:` or `"` are quoted.
//!
//! ```text
//! compound ""
//!     byte x: 5
//!     string greeting: "hello"
//!     int_array scores
//!         int: 1
//!         int: 2
//!         ... 8 more
//! ```
use crate::{ValueClass, VisualNode};

const INDENT: usize = 4;

pub fn to_text(node: &VisualNode) -> String {
    let mut out = String::new();
    write_node(&mut out, node, 0);
    out
}

fn write_node(out: &mut String, node: &VisualNode, indent: usize) {
    out.push_str(&format!("{:indent$}{}", "", node.kind, indent = indent));

    if let Some(label) = node.label.as_deref() {
        if needs_quotes(label) {
            out.push_str(&format!(" {:?}", label));
        } else {
            out.push(' ');
            out.push_str(label);
        }
    }

    if let Some(value) = &node.value {
        match value.class {
            ValueClass::Numeric => out.push_str(&format!(": {}", value.text)),
            ValueClass::String => out.push_str(&format!(": {:?}", value.text)),
        }
    }
    out.push('\n');

    for child in &node.children {
        write_node(out, child, indent + INDENT);
    }

    if node.elided > 0 {
        out.push_str(&format!(
            "{:indent$}... {} more\n",
            "",
            node.elided,
            indent = indent + INDENT
        ));
    }
}

/// Names that could be misread as a missing name, a value or another line
/// are quoted and escaped like string values.
fn needs_quotes(label: &str) -> bool {
    label.is_empty()
        || label
            .chars()
            .any(|c| c.is_control() || c.is_whitespace() || c == ':' || c == '"')
}
