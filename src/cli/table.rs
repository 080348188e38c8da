//! Catalog table for `--dry-run`

use tabled::{builder::Builder, settings::Style};

use crate::cli::helpers::truncate_str;
use crate::entities::catalog::Catalog;

/// Widest description shown before truncation
const DESCRIPTION_WIDTH: usize = 40;

/// Render the catalog as a markdown table, one row per part number
pub fn render_catalog(catalog: &Catalog) -> String {
    let mut builder = Builder::default();
    builder.push_record(["Part Number", "Rev", "Date Updated", "Description", "File", "History"]);

    for entry in catalog.entries() {
        let history = entry
            .previous_revisions
            .iter()
            .map(|p| p.revision.as_str())
            .collect::<Vec<_>>()
            .join(", ");

        builder.push_record([
            entry.part_number.clone(),
            entry.revision.clone(),
            entry.date_updated.clone(),
            truncate_str(&entry.description, DESCRIPTION_WIDTH),
            entry.filename.clone(),
            history,
        ]);
    }

    builder.build().with(Style::markdown()).to_string()
}
