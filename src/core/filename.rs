//! Part number and revision derivation from drawing filenames
//!
//! Drawings follow the `<part-number>[._]<revision>.pdf` convention, e.g.
//! `04-210-3138.A2.pdf` or `04-210-3138_A2.pdf`. Anything that doesn't fit
//! still produces a usable identity: the whole stem becomes the part number.

/// Revision assigned when a filename carries none
pub const DEFAULT_REVISION: &str = "A";

/// Identity derived from a drawing filename
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileIdentity {
    pub part_number: String,
    pub revision: String,
}

/// Returns true if the filename has a PDF extension (case-insensitive)
pub fn is_pdf_name(filename: &str) -> bool {
    pdf_stem(filename).is_some()
}

/// Strip a trailing `.pdf` extension, if present
fn pdf_stem(filename: &str) -> Option<&str> {
    let split = filename.len().checked_sub(4)?;
    if !filename.is_char_boundary(split) {
        return None;
    }
    let (stem, ext) = filename.split_at(split);
    ext.eq_ignore_ascii_case(".pdf").then_some(stem)
}

/// Derive part number and revision from a filename
///
/// Never fails: a name without a `.` or `_` delimiter yields the full stem as
/// the part number and `default_revision` as the revision.
pub fn parse_filename(filename: &str, default_revision: &str) -> FileIdentity {
    let stem = pdf_stem(filename).unwrap_or(filename);
    let mut segments = stem.split(['.', '_']);

    match (segments.next(), segments.next()) {
        (Some(part_number), Some(revision)) => FileIdentity {
            part_number: part_number.to_string(),
            revision: revision.to_string(),
        },
        _ => FileIdentity {
            part_number: stem.to_string(),
            revision: default_revision.to_string(),
        },
    }
}
