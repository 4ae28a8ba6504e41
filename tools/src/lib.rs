use std::{fmt::Display, path::Path, str::FromStr};

use nbtview::{
    decode,
    html::to_html,
    pipeline::ReadError,
    text::to_text,
    Decode, Tag, VisualNode,
};

/// How a finished document is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Text,
    Html,
    Json,
}

impl Format {
    pub const NAMES: [&'static str; 3] = ["text", "html", "json"];

    pub fn write(&self, document: &[VisualNode]) -> serde_json::Result<String> {
        Ok(match self {
            // Each tree already ends in a newline, so trees are separated
            // by one blank line.
            Format::Text => document
                .iter()
                .map(to_text)
                .collect::<Vec<_>>()
                .join("\n"),
            Format::Html => document
                .iter()
                .map(|node| to_html(node) + "\n")
                .collect(),
            Format::Json => serde_json::to_string_pretty(document)? + "\n",
        })
    }
}

impl FromStr for Format {
    type Err = UnknownFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(Format::Text),
            "html" => Ok(Format::Html),
            "json" => Ok(Format::Json),
            other => Err(UnknownFormat(other.to_owned())),
        }
    }
}

#[derive(Debug)]
pub struct UnknownFormat(String);

impl std::error::Error for UnknownFormat {}

impl Display for UnknownFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown format {:?}, expected one of {:?}", self.0, Format::NAMES)
    }
}

/// Reads a tag tree stored as JSON, the same shape `Tag` serializes to.
/// Byte order has no meaning here and is ignored.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonDecoder;

impl Decode for JsonDecoder {
    fn decode(&self, bytes: &[u8], _big_endian: bool) -> decode::Result<Tag> {
        serde_json::from_slice(bytes)
            .map_err(|e| decode::Error::new(format!("invalid JSON tag tree: {}", e)))
    }
}

pub async fn read_file(path: impl AsRef<Path>) -> Result<Vec<u8>, ReadError> {
    let path = path.as_ref();
    tokio::fs::read(path)
        .await
        .map_err(|e| ReadError::new(format!("{}: {}", path.display(), e)))
}

/// Notifier for a terminal: there is nothing modal, so failures go to stderr
/// where they are hard to miss.
pub fn notify_stderr(message: &str) {
    eprintln!("error: {}", message);
}

#[cfg(test)]
mod tests {
    use nbtview::{decode::ErrorKind, render, Payload};

    use super::*;

    fn trees() -> Vec<VisualNode> {
        vec![
            render(&Tag::named("a", Payload::Byte(1))),
            render(&Tag::named("b", Payload::String("x".to_owned()))),
        ]
    }

    #[test]
    fn text_trees_are_separated_by_blank_line() {
        let out = Format::Text.write(&trees()).unwrap();
        assert_eq!(out, "byte a: 1\n\nstring b: \"x\"\n");
    }

    #[test]
    fn html_one_tree_per_line() {
        let out = Format::Html.write(&trees()).unwrap();
        assert_eq!(out.lines().count(), 2);
        assert!(out.lines().all(|l| l.starts_with("<blockquote>")));
    }

    #[test]
    fn json_is_an_array() {
        let out = Format::Json.write(&trees()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value[0]["kind"], "byte");
        assert_eq!(value[1]["label"], "b");
    }

    #[test]
    fn format_names_parse() {
        for name in Format::NAMES {
            assert!(name.parse::<Format>().is_ok());
        }
        assert!("yaml".parse::<Format>().is_err());
    }

    #[test]
    fn json_decoder_keeps_unknown_types() {
        let tag = JsonDecoder
            .decode(br#"{"type": "quux", "name": "q", "payload": 1}"#, true)
            .unwrap();
        assert_eq!(tag, Tag::named("q", Payload::Unknown("quux".to_owned())));
    }

    #[test]
    fn json_decoder_error_is_a_decode_error() {
        let err = JsonDecoder.decode(b"{", false).unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::Other);
        assert!(err.to_string().contains("invalid JSON tag tree"));
    }

    #[tokio::test]
    async fn missing_file_names_the_path() {
        let err = read_file("does/not/exist.nbt").await.unwrap_err();
        assert!(err.to_string().starts_with("does/not/exist.nbt: "));
    }
}
