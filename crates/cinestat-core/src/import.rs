//! Film dataset parsing
//!
//! Accepts either a JSON array of documents or JSON lines (one document per
//! line, as produced by `mongoexport`).

use serde_json::Value;
use std::path::Path;

use crate::error::{Error, Result};

/// Parse a dataset into film documents.
///
/// Every element must be a JSON object. A Mongo `_id` key is dropped since
/// the store assigns its own identity.
pub fn parse_documents(text: &str) -> Result<Vec<Value>> {
    let trimmed = text.trim_start();

    let documents: Vec<Value> = if trimmed.starts_with('[') {
        serde_json::from_str(trimmed)?
    } else {
        let mut docs = Vec::new();
        for (idx, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let value: Value = serde_json::from_str(line)
                .map_err(|e| Error::validation(format!("line {}: {}", idx + 1, e)))?;
            docs.push(value);
        }
        docs
    };

    documents
        .into_iter()
        .enumerate()
        .map(|(idx, doc)| match doc {
            Value::Object(mut map) => {
                map.remove("_id");
                Ok(Value::Object(map))
            }
            other => Err(Error::validation(format!(
                "document {} is not a JSON object: {}",
                idx + 1,
                other
            ))),
        })
        .collect()
}

/// Read and parse a dataset file.
pub fn read_documents(path: &Path) -> Result<Vec<Value>> {
    let text = std::fs::read_to_string(path)?;
    let docs = parse_documents(&text)?;
    log::info!("Parsed {} film documents from {}", docs.len(), path.display());
    Ok(docs)
}
