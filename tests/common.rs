//! Shared test helpers: an in-memory record store and minimal `.docx`
//! builders.
#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::io::{Cursor, Read, Write};

use async_trait::async_trait;
use serde_json::Value;

use hr_letters_server::odoo::{RawRecord, RecordStore, StoreError};

/// In-memory `RecordStore` with per-model record lists and a deny list to
/// simulate permission gaps.
#[derive(Default)]
pub struct StubStore {
    records: HashMap<String, Vec<RawRecord>>,
    deny: HashSet<String>,
}

impl StubStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(mut self, model: &str, records: Vec<Value>) -> Self {
        let records = records
            .into_iter()
            .filter_map(|value| match value {
                Value::Object(map) => Some(map),
                _ => None,
            })
            .collect();
        self.records.insert(model.to_string(), records);
        self
    }

    /// Make every call against `model` fail, like a missing access right.
    pub fn deny_model(mut self, model: &str) -> Self {
        self.deny.insert(model.to_string());
        self
    }

    fn model_records(&self, model: &str) -> Vec<RawRecord> {
        self.records.get(model).cloned().unwrap_or_default()
    }

    fn check_denied(&self, model: &str) -> Result<(), StoreError> {
        if self.deny.contains(model) {
            Err(StoreError::Fault(format!("Access Denied: {model}")))
        } else {
            Ok(())
        }
    }
}

fn field_matches(record: &RawRecord, field: &str, op: &str, expected: &Value) -> bool {
    let actual = record.get(field);
    match op {
        "=" => match actual {
            Some(Value::Array(items)) => items.first() == Some(expected),
            other => other == Some(expected),
        },
        "ilike" => {
            let haystack = actual.and_then(Value::as_str).unwrap_or("").to_lowercase();
            let needle = expected.as_str().unwrap_or("").to_lowercase();
            !needle.is_empty() && haystack.contains(&needle)
        }
        _ => false,
    }
}

fn domain_matches(record: &RawRecord, domain: &Value) -> bool {
    let Some(clauses) = domain.as_array() else {
        return true;
    };
    clauses.iter().all(|clause| {
        let Some(parts) = clause.as_array() else {
            return true;
        };
        match (
            parts.first().and_then(Value::as_str),
            parts.get(1).and_then(Value::as_str),
            parts.get(2),
        ) {
            (Some(field), Some(op), Some(expected)) => field_matches(record, field, op, expected),
            _ => true,
        }
    })
}

#[async_trait]
impl RecordStore for StubStore {
    async fn search(&self, model: &str, domain: Value) -> Result<Vec<i64>, StoreError> {
        self.check_denied(model)?;
        Ok(self
            .model_records(model)
            .iter()
            .filter(|record| domain_matches(record, &domain))
            .filter_map(|record| record.get("id").and_then(Value::as_i64))
            .collect())
    }

    async fn read(
        &self,
        model: &str,
        ids: &[i64],
        _fields: &[&str],
    ) -> Result<Vec<RawRecord>, StoreError> {
        self.check_denied(model)?;
        Ok(self
            .model_records(model)
            .into_iter()
            .filter(|record| {
                record
                    .get("id")
                    .and_then(Value::as_i64)
                    .map(|id| ids.contains(&id))
                    .unwrap_or(false)
            })
            .collect())
    }

    async fn search_read(
        &self,
        model: &str,
        domain: Value,
        _fields: &[&str],
        limit: Option<u32>,
    ) -> Result<Vec<RawRecord>, StoreError> {
        self.check_denied(model)?;
        let mut matched: Vec<RawRecord> = self
            .model_records(model)
            .into_iter()
            .filter(|record| domain_matches(record, &domain))
            .collect();
        if let Some(limit) = limit {
            matched.truncate(limit as usize);
        }
        Ok(matched)
    }
}

// ---------------------------------------------------------------------------
// Minimal .docx builders
// ---------------------------------------------------------------------------

const WML_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

/// A paragraph of plain runs, one `<w:r><w:t>` per slice entry.
pub fn paragraph(runs: &[&str]) -> String {
    let runs_xml: String = runs
        .iter()
        .map(|text| format!("<w:r><w:t>{text}</w:t></w:r>"))
        .collect();
    format!("<w:p>{runs_xml}</w:p>")
}

/// A one-cell table wrapping the given block content.
pub fn table(cell_content: &str) -> String {
    format!("<w:tbl><w:tr><w:tc>{cell_content}</w:tc></w:tr></w:tbl>")
}

pub fn document_xml(body: &str) -> String {
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
         <w:document xmlns:w=\"{WML_NS}\"><w:body>{body}</w:body></w:document>"
    )
}

pub fn header_xml(content: &str) -> String {
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
         <w:hdr xmlns:w=\"{WML_NS}\">{content}</w:hdr>"
    )
}

pub fn footer_xml(content: &str) -> String {
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
         <w:ftr xmlns:w=\"{WML_NS}\">{content}</w:ftr>"
    )
}

/// Assemble a `.docx` archive from part XML strings.
pub fn build_docx(document: &str, header: Option<&str>, footer: Option<&str>) -> Vec<u8> {
    let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options = zip::write::SimpleFileOptions::default()
        .compression_method(zip::CompressionMethod::Deflated);

    let content_types = "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
         <Types xmlns=\"http://schemas.openxmlformats.org/package/2006/content-types\"/>";
    zip.start_file("[Content_Types].xml", options).unwrap();
    zip.write_all(content_types.as_bytes()).unwrap();

    zip.start_file("word/document.xml", options).unwrap();
    zip.write_all(document.as_bytes()).unwrap();

    if let Some(header) = header {
        zip.start_file("word/header1.xml", options).unwrap();
        zip.write_all(header.as_bytes()).unwrap();
    }
    if let Some(footer) = footer {
        zip.start_file("word/footer1.xml", options).unwrap();
        zip.write_all(footer.as_bytes()).unwrap();
    }

    zip.finish().unwrap().into_inner()
}

/// Extract one part's XML from generated `.docx` bytes.
pub fn read_part(docx: &[u8], part: &str) -> String {
    let mut archive = zip::ZipArchive::new(Cursor::new(docx)).unwrap();
    let mut entry = archive.by_name(part).unwrap();
    let mut xml = String::new();
    entry.read_to_string(&mut xml).unwrap();
    xml
}

/// Concatenated `<w:t>` contents of a part, in document order.
pub fn visible_text(xml: &str) -> String {
    let mut text = String::new();
    let mut rest = xml;
    while let Some(open) = rest.find("<w:t") {
        rest = &rest[open + 4..];
        // Other tags share the prefix (w:tbl, w:tc, w:tr); a real w:t is
        // followed by `>`, an attribute, or a self-close.
        if !matches!(rest.chars().next(), Some('>') | Some(' ') | Some('/')) {
            continue;
        }
        let Some(tag_end) = rest.find('>') else { break };
        if rest[..tag_end].ends_with('/') {
            rest = &rest[tag_end + 1..];
            continue;
        }
        rest = &rest[tag_end + 1..];
        let Some(close) = rest.find("</w:t>") else { break };
        text.push_str(&rest[..close]);
        rest = &rest[close + 6..];
    }
    text
}
