//! CLI argument definitions using clap derive

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "dwgcat")]
#[command(author, version, about = "Drawing Catalog Generator")]
#[command(long_about = "Scans a directory of engineering drawing PDFs and writes a JSON catalog with the latest revision of each part number and its revision history.")]
pub struct Cli {
    /// Directory containing drawing PDFs [default: drawings]
    #[arg(long, short = 'd', env = "DWGCAT_DRAWINGS_DIR")]
    pub drawings_dir: Option<PathBuf>,

    /// Catalog file to write [default: drawings.json]
    #[arg(long, short = 'o', env = "DWGCAT_OUTPUT")]
    pub output: Option<PathBuf>,

    /// Don't read PDF text; use filenames and modification dates only
    #[arg(long)]
    pub no_pdf_text: bool,

    /// Print the catalog as a table instead of writing it
    #[arg(long)]
    pub dry_run: bool,

    /// Config file to load on top of the global and project config
    #[arg(long, env = "DWGCAT_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub global: GlobalOpts,
}

#[derive(clap::Args, Clone, Debug)]
pub struct GlobalOpts {
    /// Suppress per-file progress output
    #[arg(long, short = 'q')]
    pub quiet: bool,

    /// Enable verbose (debug) logging
    #[arg(long, short = 'v', conflicts_with = "quiet")]
    pub verbose: bool,
}
