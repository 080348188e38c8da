//! Drawing Catalog
//!
//! Builds a JSON catalog from a directory of engineering drawing PDFs:
//! part number and revision come from each filename, description and date
//! from the drawing's title block when readable, and all revisions of a part
//! collapse into one entry with an ordered revision history.

pub mod cli;
pub mod core;
pub mod entities;
pub mod yaml;
