//! Core module - scanning, parsing and configuration

pub mod config;
pub mod extractor;
pub mod filename;
pub mod loader;

pub use config::{Config, ConfigError};
pub use extractor::{ContentFields, ExtractError, NoTextExtractor, TextExtractor};
pub use filename::{parse_filename, FileIdentity};
