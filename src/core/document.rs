use crate::core::value::Value;
use crate::core::value_path::ValuePath;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("failed to read `{}`", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON: {0}")]
    Parse(#[source] serde_json::Error),

    #[error("failed to encode document: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("failed to write `{}`", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A single write requested by the form.
#[derive(Debug, Clone, PartialEq)]
pub struct Mutation {
    pub path: ValuePath,
    pub value: Value,
}

impl Mutation {
    pub fn new(path: ValuePath, value: impl Into<Value>) -> Self {
        Self {
            path,
            value: value.into(),
        }
    }
}

/// The canonical document: parsed once from text and replaced wholesale by
/// every accepted mutation.
#[derive(Debug, Clone)]
pub struct Document {
    source: String,
    value: Value,
    indent: usize,
}

impl Document {
    pub fn parse(source: impl Into<String>) -> Result<Self, DocumentError> {
        let source = source.into();
        let value = serde_json::from_str::<Value>(&source).map_err(DocumentError::Parse)?;
        debug!(bytes = source.len(), "document parsed");
        Ok(Self {
            source,
            value,
            indent: 2,
        })
    }

    pub fn load(path: &Path) -> Result<Self, DocumentError> {
        let source = std::fs::read_to_string(path).map_err(|source| DocumentError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(source)
    }

    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Apply `mutation` to a copy of the current value and swap it in.
    pub fn apply(&mut self, mutation: &Mutation) {
        let mut next = self.value.clone();
        next.set_path(&mutation.path, mutation.value.clone());
        debug!(path = %mutation.path, "mutation applied");
        self.value = next;
    }

    /// Discard every mutation and go back to the loaded text.
    pub fn reset(&mut self) -> Result<(), DocumentError> {
        self.value = serde_json::from_str::<Value>(&self.source).map_err(DocumentError::Parse)?;
        Ok(())
    }

    pub fn to_pretty_json(&self) -> Result<String, DocumentError> {
        let indent = " ".repeat(self.indent);
        let mut out = Vec::new();
        let formatter = PrettyFormatter::with_indent(indent.as_bytes());
        let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
        self.value
            .serialize(&mut serializer)
            .map_err(DocumentError::Encode)?;
        // serde_json only ever writes valid UTF-8
        Ok(String::from_utf8_lossy(&out).into_owned())
    }

    pub fn export(&self, path: &Path) -> Result<(), DocumentError> {
        let mut text = self.to_pretty_json()?;
        text.push('\n');
        std::fs::write(path, text).map_err(|source| DocumentError::Write {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{Document, DocumentError, Mutation};
    use crate::core::value::Value;
    use crate::core::value_path::ValuePath;

    const THEME: &str = r##"{"theme":{"primary":"#05B3F0","dark":false},"tags":["a","b"]}"##;

    fn compact(doc: &Document) -> String {
        serde_json::to_string(doc.value()).expect("serialize")
    }

    #[test]
    fn invalid_json_is_an_ingestion_error() {
        let err = Document::parse("{\"a\":").expect_err("must fail");
        assert!(matches!(err, DocumentError::Parse(_)));
    }

    #[test]
    fn apply_replaces_snapshot_without_touching_siblings() {
        let mut doc = Document::parse(THEME).expect("parse");
        let before = doc.value().clone();
        doc.apply(&Mutation::new(ValuePath::parse("theme.dark"), true));

        assert_eq!(
            compact(&doc),
            r##"{"theme":{"primary":"#05B3F0","dark":true},"tags":["a","b"]}"##
        );
        assert_eq!(
            before.get_path(&ValuePath::parse("theme.dark")),
            Some(&Value::Bool(false))
        );
        assert_eq!(
            doc.value().get_path(&ValuePath::parse("tags")),
            before.get_path(&ValuePath::parse("tags"))
        );
    }

    #[test]
    fn pretty_json_uses_configured_indent() {
        let doc = Document::parse(r#"{"a":[1]}"#).expect("parse");
        assert_eq!(doc.to_pretty_json().expect("encode"), "{\n  \"a\": [\n    1\n  ]\n}");

        let doc = doc.with_indent(4);
        assert_eq!(
            doc.to_pretty_json().expect("encode"),
            "{\n    \"a\": [\n        1\n    ]\n}"
        );
    }

    #[test]
    fn reset_restores_loaded_value() {
        let mut doc = Document::parse(THEME).expect("parse");
        doc.apply(&Mutation::new(ValuePath::parse("tags[0]"), "z"));
        doc.reset().expect("reset");
        assert_eq!(compact(&doc), THEME);
    }
}
