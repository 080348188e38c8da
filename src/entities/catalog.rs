//! Part catalog - one entry per part number with revision history

use serde::{Deserialize, Serialize};
use serde_json::ser::{Formatter, PrettyFormatter};
use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::config::{DEFAULT_PAGES, DEFAULT_STATUS};
use crate::entities::drawing::DrawingFile;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to serialize catalog: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to write catalog to {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// A superseded revision of a part
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviousRevision {
    pub revision: String,
    pub date_updated: String,
    pub filename: String,
}

/// Catalog record for one part number
///
/// Field order is the key order of the written JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartCatalogEntry {
    pub part_number: String,
    pub description: String,
    pub revision: String,
    pub date_updated: String,
    pub pages: u32,
    pub status: String,
    pub filename: String,

    /// Older revisions, newest first
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub previous_revisions: Vec<PreviousRevision>,
}

/// Constant fields stamped on every entry
#[derive(Debug, Clone, Copy)]
pub struct ReleaseFields<'a> {
    pub pages: u32,
    pub status: &'a str,
}

impl Default for ReleaseFields<'_> {
    fn default() -> Self {
        Self {
            pages: DEFAULT_PAGES,
            status: DEFAULT_STATUS,
        }
    }
}

/// Counts reported after a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CatalogSummary {
    /// Entries in the catalog (unique part numbers)
    pub drawings: usize,
    /// PDF files that went into the catalog
    pub pdfs: usize,
    /// Superseded revisions across all entries
    pub previous_revisions: usize,
}

/// Catalog of all parts, ordered by part number
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    entries: Vec<PartCatalogEntry>,
}

impl Catalog {
    /// Group drawings by part number and reduce each group to one entry
    ///
    /// The most recently modified file of a group is canonical; the rest
    /// become its history in descending modification order. Ties keep input
    /// order.
    pub fn aggregate(drawings: Vec<DrawingFile>, release: ReleaseFields<'_>) -> Self {
        let mut by_part: BTreeMap<String, Vec<DrawingFile>> = BTreeMap::new();
        for drawing in drawings {
            by_part
                .entry(drawing.part_number.clone())
                .or_default()
                .push(drawing);
        }

        let entries = by_part
            .into_values()
            .filter_map(|group| reduce_group(group, release))
            .collect();

        Self { entries }
    }

    pub fn entries(&self) -> &[PartCatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn summary(&self) -> CatalogSummary {
        let previous_revisions = self
            .entries
            .iter()
            .map(|e| e.previous_revisions.len())
            .sum();

        CatalogSummary {
            drawings: self.entries.len(),
            pdfs: self.entries.len() + previous_revisions,
            previous_revisions,
        }
    }

    /// Pretty-printed JSON with 2-space indentation
    ///
    /// Output is pure ASCII: anything outside it is written as `\uXXXX`
    /// escapes, with surrogate pairs above the Basic Multilingual Plane.
    pub fn to_json(&self) -> Result<String, CatalogError> {
        let mut buf = Vec::new();
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, AsciiFormatter::default());
        self.serialize(&mut ser)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    /// Serialize and overwrite `path` in a single write
    pub fn write(&self, path: &Path) -> Result<(), CatalogError> {
        let json = self.to_json()?;
        std::fs::write(path, json).map_err(|source| CatalogError::Write {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Pretty formatter that escapes every non-ASCII character
#[derive(Default)]
struct AsciiFormatter<'a> {
    pretty: PrettyFormatter<'a>,
}

impl Formatter for AsciiFormatter<'_> {
    fn write_string_fragment<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        fragment: &str,
    ) -> io::Result<()> {
        for (start, ascii) in ascii_runs(fragment) {
            if ascii {
                writer.write_all(start.as_bytes())?;
            } else {
                let mut units = [0u16; 2];
                for ch in start.chars() {
                    for unit in ch.encode_utf16(&mut units) {
                        write!(writer, "\\u{:04x}", unit)?;
                    }
                }
            }
        }
        Ok(())
    }

    fn begin_array<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.pretty.begin_array(writer)
    }

    fn end_array<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.pretty.end_array(writer)
    }

    fn begin_array_value<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        self.pretty.begin_array_value(writer, first)
    }

    fn end_array_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.pretty.end_array_value(writer)
    }

    fn begin_object<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.pretty.begin_object(writer)
    }

    fn end_object<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.pretty.end_object(writer)
    }

    fn begin_object_key<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        self.pretty.begin_object_key(writer, first)
    }

    fn begin_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.pretty.begin_object_value(writer)
    }

    fn end_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.pretty.end_object_value(writer)
    }
}

/// Split `s` into maximal runs that are all ASCII or all non-ASCII
fn ascii_runs(s: &str) -> impl Iterator<Item = (&str, bool)> {
    let mut rest = s;
    std::iter::from_fn(move || {
        let first = rest.chars().next()?;
        let ascii = first.is_ascii();
        let end = rest
            .char_indices()
            .find(|(_, c)| c.is_ascii() != ascii)
            .map_or(rest.len(), |(i, _)| i);
        let (run, tail) = rest.split_at(end);
        rest = tail;
        Some((run, ascii))
    })
}

fn reduce_group(mut group: Vec<DrawingFile>, release: ReleaseFields<'_>) -> Option<PartCatalogEntry> {
    group.sort_by(|a, b| b.modified.cmp(&a.modified));

    let mut revisions = group.into_iter();
    let latest = revisions.next()?;

    let previous_revisions = revisions
        .map(|d| PreviousRevision {
            revision: d.revision,
            date_updated: d.date_updated,
            filename: d.filename,
        })
        .collect();

    Some(PartCatalogEntry {
        part_number: latest.part_number,
        description: latest.description,
        revision: latest.revision,
        date_updated: latest.date_updated,
        pages: release.pages,
        status: release.status.to_string(),
        filename: latest.filename,
        previous_revisions,
    })
}
