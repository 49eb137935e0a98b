//! Text in, text out: parsing imports and rendering exports.

use qz_schemas::QuizDocument;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::Value;

const BOM: char = '\u{feff}';

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportError {
    /// Nothing but whitespace to import.
    Empty,
    /// Not JSON at all.
    Syntax { line: usize, column: usize, message: String },
    /// Valid JSON that is not a quiz document.
    Shape { line: usize, column: usize, message: String },
}

impl ImportError {
    fn from_serde(e: serde_json::Error) -> Self {
        let (line, column, message) = (e.line(), e.column(), e.to_string());
        if e.is_data() {
            ImportError::Shape { line, column, message }
        } else {
            ImportError::Syntax { line, column, message }
        }
    }
}

impl std::fmt::Display for ImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImportError::Empty => write!(f, "nothing to import"),
            ImportError::Syntax { message, .. } => write!(f, "invalid JSON: {message}"),
            ImportError::Shape { message, .. } => write!(f, "not a quiz document: {message}"),
        }
    }
}

impl std::error::Error for ImportError {}

fn strip_bom(text: &str) -> &str {
    text.strip_prefix(BOM).unwrap_or(text)
}

/// Parse import text into a document.
pub fn parse_document(text: &str) -> Result<QuizDocument, ImportError> {
    let text = strip_bom(text);
    if text.trim().is_empty() {
        return Err(ImportError::Empty);
    }
    serde_json::from_str(text).map_err(ImportError::from_serde)
}

/// Upload path: any JSON value, re-rendered with 2-space indent for the import
/// buffer. Object keys keep the author's order. The shape is checked later,
/// on confirm.
pub fn normalize_upload(contents: &str) -> Result<String, ImportError> {
    let contents = strip_bom(contents);
    if contents.trim().is_empty() {
        return Err(ImportError::Empty);
    }
    let v: Value = serde_json::from_str(contents).map_err(ImportError::from_serde)?;
    to_pretty(&v, 2).map_err(ImportError::from_serde)
}

/// Pretty JSON with `indent` spaces per level.
pub fn export_document(doc: &QuizDocument, indent: usize) -> Result<String, serde_json::Error> {
    to_pretty(doc, indent)
}

fn to_pretty<T: Serialize + ?Sized>(value: &T, indent: usize) -> Result<String, serde_json::Error> {
    let pad = " ".repeat(indent);
    let mut out = Vec::with_capacity(256);
    let mut ser = serde_json::Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(pad.as_bytes()));
    value.serialize(&mut ser)?;
    // serde_json only ever writes UTF-8.
    Ok(String::from_utf8_lossy(&out).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_text_is_empty_import() {
        assert_eq!(parse_document("  \n"), Err(ImportError::Empty));
        assert_eq!(normalize_upload("\u{feff}"), Err(ImportError::Empty));
    }

    #[test]
    fn syntax_and_shape_errors_are_distinguished() {
        assert!(matches!(parse_document("{not json"), Err(ImportError::Syntax { .. })));
        assert!(matches!(
            parse_document(r#"{"questions": 5}"#),
            Err(ImportError::Shape { .. })
        ));
    }

    #[test]
    fn upload_is_pretty_printed_with_two_spaces() {
        let out = normalize_upload("\u{feff}{\"id\":\"x\",\"exam\":[]}").unwrap();
        assert_eq!(out, "{\n  \"id\": \"x\",\n  \"exam\": []\n}");
    }

    #[test]
    fn upload_keeps_author_key_order() {
        let out = normalize_upload(r#"{"summary":"s","id":"x","questions":[],"exam":[]}"#).unwrap();
        let keys: Vec<&str> = out
            .lines()
            .filter_map(|l| l.trim().strip_prefix('"'))
            .filter_map(|l| l.split('"').next())
            .collect();
        assert_eq!(keys, vec!["summary", "id", "questions", "exam"]);
    }

    #[test]
    fn export_honours_indent() {
        let doc = QuizDocument::new("lesson", "");
        let two = export_document(&doc, 2).unwrap();
        let four = export_document(&doc, 4).unwrap();
        assert!(two.starts_with("{\n  \"id\": \"lesson\""));
        assert!(four.starts_with("{\n    \"id\": \"lesson\""));
        assert_eq!(parse_document(&four).unwrap(), doc);
    }
}
