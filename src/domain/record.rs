//! The validated term-sheet record produced by the field extractor.

use serde::{Deserialize, Serialize};

/// The four required fields of an instrument term sheet.
///
/// A record only exists in fully-populated form: the extractor refuses to
/// construct one unless every field resolved to a non-empty value. Nothing
/// downstream ever has to re-check for missing fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermSheetRecord {
    /// Event type code, e.g. "9097" for instrument notifications
    pub event_type: String,

    /// Full product name of the instrument
    pub product_name_full: String,

    /// IBT type code of the instrument
    pub ibt_type_code: String,

    /// ISIN taken from the "I-" identifier scheme
    pub isin: String,
}
