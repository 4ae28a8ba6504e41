//! HTML markup for a [`VisualNode`] tree.
//!
//! Every node becomes a `<blockquote>` holding an icon, an optional name and
//! either a value or the nested blockquotes of its children. Styling hooks are
//! the classes `nbt-icon`, `nbt-name`, `nbt-value`, `nbt-type-number`,
//! `nbt-type-string` and `nbt-elided`.
use crate::{ValueClass, VisualNode};

/// Where icon images live, one `{kind}.png` per tag type.
pub const ICON_PATH: &str = "/assets/icons";

pub fn to_html(node: &VisualNode) -> String {
    let mut out = String::new();
    write_node(&mut out, node);
    out
}

fn write_node(out: &mut String, node: &VisualNode) {
    let kind = escape(&node.kind);

    out.push_str("<blockquote>");
    out.push_str(&format!(
        r#"<img class="nbt-icon" src="{}/{}.png" alt="{}">"#,
        ICON_PATH, kind, kind
    ));

    if let Some(label) = &node.label {
        out.push_str(&format!(r#"<span class="nbt-name">{}</span>"#, escape(label)));
    }

    if let Some(value) = &node.value {
        let class = match value.class {
            ValueClass::Numeric => "nbt-type-number",
            ValueClass::String => "nbt-type-string",
        };
        out.push_str(&format!(
            r#"<span class="nbt-value {}">{}</span>"#,
            class,
            escape(&value.text)
        ));
    }

    for child in &node.children {
        write_node(out, child);
    }

    if node.elided > 0 {
        out.push_str(&format!(
            r#"<span class="nbt-elided">{} more</span>"#,
            node.elided
        ));
    }

    out.push_str("</blockquote>");
}

fn escape(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            c => escaped.push(c),
        }
    }
    escaped
}
