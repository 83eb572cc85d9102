//! Term-sheet field extraction.
//!
//! Parses raw XML into a namespaced tree and resolves the four required
//! fields with independent path queries. Validation is all-or-nothing: a
//! record either has every field non-empty or extraction fails and nothing
//! crosses the boundary.
//!
//! Every failed extraction is logged exactly once here: a warning when the
//! document was well-formed but incomplete, an error for everything else.

use std::io;
use std::path::{Path, PathBuf};

use roxmltree::{Document, Node};
use thiserror::Error;
use tracing::{debug, error, warn};

use crate::domain::TermSheetRecord;

/// Namespace every term-sheet element must live in.
pub const TERM_SHEET_NS: &str = "http://schemas.vontobel.com/dataservice/v1.0";

/// Identifier scheme code that denotes the ISIN.
const ISIN_SCHEME: &str = "I-";

/// Why an extraction produced no record.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("no document content supplied")]
    EmptyInput,

    #[error("input file path is empty")]
    EmptyPath,

    #[error("input file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("access denied reading {path}")]
    AccessDenied {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("I/O error reading {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed term-sheet document")]
    Malformed(#[source] roxmltree::Error),

    #[error("required fields missing or empty: {}", missing.join(", "))]
    IncompleteFields { missing: Vec<&'static str> },
}

/// Extract and validate the four required fields from raw XML.
pub fn extract_from_str(raw: &str) -> Result<TermSheetRecord, ExtractError> {
    if raw.is_empty() {
        error!("term-sheet content is empty, no parse attempted");
        return Err(ExtractError::EmptyInput);
    }

    let doc = match Document::parse(raw) {
        Ok(doc) => doc,
        Err(e) => {
            error!(error = %e, "term-sheet content is not well-formed XML");
            return Err(ExtractError::Malformed(e));
        }
    };
    let root = doc.root_element();

    // The four queries are independent: one failing to resolve never stops
    // the others, so the incomplete-fields log can name everything at once.
    let event_type = query_event_type(root);
    let product_name_full = query_product_name_full(root);
    let ibt_type_code = query_ibt_type_code(root);
    let isin = query_isin(root);

    let mut missing = Vec::new();
    if event_type.is_none() {
        missing.push("EventType");
    }
    if product_name_full.is_none() {
        missing.push("ProductNameFull");
    }
    if ibt_type_code.is_none() {
        missing.push("IBTTypeCode");
    }
    if isin.is_none() {
        missing.push("ISIN");
    }
    match (event_type, product_name_full, ibt_type_code, isin) {
        (Some(event_type), Some(product_name_full), Some(ibt_type_code), Some(isin)) => {
            Ok(TermSheetRecord {
                event_type,
                product_name_full,
                ibt_type_code,
                isin,
            })
        }
        _ => {
            warn!(
                missing = %missing.join(", "),
                "term sheet is well-formed but required fields could not be extracted"
            );
            Err(ExtractError::IncompleteFields { missing })
        }
    }
}

/// Read a term-sheet file whole and delegate to [`extract_from_str`].
///
/// No partial reads, no streaming; the document is bounded by its file size.
pub fn extract_from_file(path: &Path) -> Result<TermSheetRecord, ExtractError> {
    if path.as_os_str().is_empty() {
        error!("term-sheet file path is empty");
        return Err(ExtractError::EmptyPath);
    }

    let raw = std::fs::read_to_string(path).map_err(|e| {
        let path = path.to_path_buf();
        match e.kind() {
            io::ErrorKind::NotFound => {
                error!(path = %path.display(), "term-sheet file not found");
                ExtractError::FileNotFound(path)
            }
            io::ErrorKind::PermissionDenied => {
                error!(path = %path.display(), "access denied reading term-sheet file");
                ExtractError::AccessDenied { path, source: e }
            }
            _ => {
                error!(path = %path.display(), error = %e, "I/O error reading term-sheet file");
                ExtractError::Io { path, source: e }
            }
        }
    })?;

    debug!(path = %path.display(), bytes = raw.len(), "read term-sheet file");
    extract_from_str(&raw)
}

/// Events → first Event → EventType
fn query_event_type(root: Node) -> Option<String> {
    let value = child(root, "Events")
        .and_then(|events| child(events, "Event"))
        .and_then(|event| child(event, "EventType"))
        .and_then(text_of);
    if value.is_none() {
        debug!("EventType did not resolve");
    }
    value
}

/// Instrument → ProductNameFull
fn query_product_name_full(root: Node) -> Option<String> {
    let value = child(root, "Instrument")
        .and_then(|instrument| child(instrument, "ProductNameFull"))
        .and_then(text_of);
    if value.is_none() {
        debug!("ProductNameFull did not resolve");
    }
    value
}

/// Instrument → IBTTypeCode
fn query_ibt_type_code(root: Node) -> Option<String> {
    let value = child(root, "Instrument")
        .and_then(|instrument| child(instrument, "IBTTypeCode"))
        .and_then(text_of);
    if value.is_none() {
        debug!("IBTTypeCode did not resolve");
    }
    value
}

/// IdValue of the one InstrumentId descendant whose IdSchemeCode is "I-".
/// InstrumentIds under any other scheme are ignored even when present.
fn query_isin(root: Node) -> Option<String> {
    let value = root
        .descendants()
        .filter(|n| is_named(*n, "InstrumentId"))
        .find(|id| {
            child(*id, "IdSchemeCode")
                .and_then(text_of)
                .is_some_and(|scheme| scheme == ISIN_SCHEME)
        })
        .and_then(|id| child(id, "IdValue"))
        .and_then(text_of);
    if value.is_none() {
        debug!("ISIN did not resolve under the {} scheme", ISIN_SCHEME);
    }
    value
}

fn is_named(node: Node, name: &str) -> bool {
    node.is_element()
        && node.tag_name().name() == name
        && node.tag_name().namespace() == Some(TERM_SHEET_NS)
}

fn child<'a, 'input>(node: Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    node.children().find(|n| is_named(*n, name))
}

fn text_of(node: Node) -> Option<String> {
    node.text()
        .map(str::to_string)
        .filter(|text| !text.is_empty())
}
