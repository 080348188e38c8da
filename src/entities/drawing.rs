//! Drawing file record - one physical PDF

use chrono::{DateTime, Local};
use std::time::SystemTime;

use crate::core::config::DEFAULT_DESCRIPTION_PREFIX;
use crate::core::extractor::ContentFields;
use crate::core::filename::FileIdentity;
use crate::core::loader::PdfEntry;

/// Date format used for `dateUpdated` fallbacks
pub const DATE_FORMAT: &str = "%m/%d/%Y";

/// One drawing PDF with its derived identity and metadata
///
/// Lives only for the duration of a run; `modified` orders revisions and is
/// never written to the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawingFile {
    pub filename: String,
    pub part_number: String,
    pub revision: String,
    pub description: String,
    pub date_updated: String,
    pub modified: SystemTime,
}

/// Values substituted when a drawing's content yields nothing
#[derive(Debug, Clone)]
pub struct Defaults<'a> {
    pub description_prefix: &'a str,
}

impl Default for Defaults<'_> {
    fn default() -> Self {
        Self {
            description_prefix: DEFAULT_DESCRIPTION_PREFIX,
        }
    }
}

impl DrawingFile {
    /// Build a record, filling any missing content fields with defaults
    ///
    /// Description falls back to `"<prefix> <partNumber>"`; date falls back
    /// to the file's modification date in local time.
    pub fn fill_defaults(
        entry: &PdfEntry,
        identity: FileIdentity,
        content: ContentFields,
        defaults: &Defaults<'_>,
    ) -> Self {
        let description = content.description.unwrap_or_else(|| {
            format!("{} {}", defaults.description_prefix, identity.part_number)
        });
        let date_updated = content
            .date_updated
            .unwrap_or_else(|| format_mod_date(entry.modified));

        Self {
            filename: entry.filename.clone(),
            part_number: identity.part_number,
            revision: identity.revision,
            description,
            date_updated,
            modified: entry.modified,
        }
    }
}

/// Format a modification time as `MM/DD/YYYY` in local time
pub fn format_mod_date(time: SystemTime) -> String {
    DateTime::<Local>::from(time).format(DATE_FORMAT).to_string()
}
