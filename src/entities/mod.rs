//! Catalog data types
//!
//! - [`DrawingFile`] - one PDF with its derived part number and revision
//! - [`Catalog`] - one [`PartCatalogEntry`] per part number, latest revision
//!   first, older revisions as [`PreviousRevision`] history

pub mod catalog;
pub mod drawing;

pub use catalog::{Catalog, CatalogError, CatalogSummary, PartCatalogEntry, PreviousRevision};
pub use drawing::DrawingFile;
