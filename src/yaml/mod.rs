//! YAML helpers

pub mod diagnostics;
