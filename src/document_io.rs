//! JSON round-trip of a planner document. The serialized shape is the
//! tagged-union element model; external persistence collaborators
//! consume the same contract.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::EditorError;
use crate::page::Page;

/// On-disk document: the page list plus a format version for future
/// migrations.
#[derive(Debug, Serialize, Deserialize)]
pub struct PlannerDocument {
    pub version: u32,
    pub pages: Vec<Page>,
}

pub const DOCUMENT_VERSION: u32 = 1;

impl PlannerDocument {
    pub fn new(pages: Vec<Page>) -> Self {
        Self {
            version: DOCUMENT_VERSION,
            pages,
        }
    }
}

/// Serialize the document to pretty JSON.
pub fn to_json(document: &PlannerDocument) -> Result<String, EditorError> {
    Ok(serde_json::to_string_pretty(document)?)
}

pub fn from_json(json: &str) -> Result<PlannerDocument, EditorError> {
    Ok(serde_json::from_str(json)?)
}

/// Write the document, going through a temp file so a crash mid-write
/// never corrupts the previous save.
pub fn save_to_file(document: &PlannerDocument, path: &Path) -> Result<(), EditorError> {
    let json = to_json(document)?;
    let tmp = path.with_extension("tmp");
    fs::write(&tmp, json)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

pub fn load_from_file(path: &Path) -> Result<PlannerDocument, EditorError> {
    let json = fs::read_to_string(path)?;
    from_json(&json)
}
