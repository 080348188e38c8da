//! Catalog generation - scan, extract, aggregate, write

use console::style;
use miette::{IntoDiagnostic, Result};
use std::path::PathBuf;

use crate::cli::helpers::plural;
use crate::cli::table::render_catalog;
use crate::cli::Cli;
use crate::core::config::Config;
use crate::core::extractor::{extract_fields, select_extractor, TextExtractor};
use crate::core::filename::parse_filename;
use crate::core::loader::{list_pdfs, PdfEntry};
use crate::entities::catalog::{Catalog, CatalogSummary, ReleaseFields};
use crate::entities::drawing::{Defaults, DrawingFile};

/// Effective settings for one run, after config and flags are merged
#[derive(Debug, Clone)]
pub struct Settings {
    pub drawings_dir: PathBuf,
    pub output: PathBuf,
    pub pdf_text: bool,
    pub dry_run: bool,
    pub quiet: bool,
    pub pages: u32,
    pub status: String,
    pub default_revision: String,
    pub description_prefix: String,
}

impl Settings {
    /// Flags win over config, config wins over built-in defaults
    pub fn resolve(cli: &Cli, config: &Config) -> Self {
        Self {
            drawings_dir: cli
                .drawings_dir
                .clone()
                .unwrap_or_else(|| config.drawings_dir()),
            output: cli.output.clone().unwrap_or_else(|| config.output()),
            pdf_text: !cli.no_pdf_text && config.pdf_text(),
            dry_run: cli.dry_run,
            quiet: cli.global.quiet,
            pages: config.pages(),
            status: config.status().to_string(),
            default_revision: config.default_revision().to_string(),
            description_prefix: config.description_prefix().to_string(),
        }
    }

    fn release(&self) -> ReleaseFields<'_> {
        ReleaseFields {
            pages: self.pages,
            status: &self.status,
        }
    }

    fn defaults(&self) -> Defaults<'_> {
        Defaults {
            description_prefix: &self.description_prefix,
        }
    }
}

/// How a run ended
#[derive(Debug)]
pub enum GenerateOutcome {
    /// The drawings directory does not exist; nothing written
    MissingDirectory(PathBuf),
    /// The drawings directory holds no PDFs; nothing written
    NoDrawings(PathBuf),
    /// Catalog written to the output path
    Written {
        path: PathBuf,
        summary: CatalogSummary,
    },
    /// Catalog built but not written
    DryRun(Catalog),
}

/// Entry point for the binary
pub fn run(cli: Cli) -> Result<()> {
    let config = Config::load(cli.config.as_deref())?;
    let settings = Settings::resolve(&cli, &config);

    let extractor = select_extractor(settings.pdf_text);
    if settings.pdf_text && !extractor.is_available() {
        println!(
            "{} PDF text extraction unavailable. Will use filename only.",
            style("Warning:").yellow()
        );
    } else if !settings.pdf_text {
        tracing::info!("PDF text extraction disabled");
    }

    let outcome = generate(&settings, extractor.as_ref())?;
    report(&outcome, &settings);
    Ok(())
}

/// Build the catalog and, unless this is a dry run, write it
pub fn generate(settings: &Settings, extractor: &dyn TextExtractor) -> Result<GenerateOutcome> {
    let dir = &settings.drawings_dir;
    if !dir.is_dir() {
        return Ok(GenerateOutcome::MissingDirectory(dir.clone()));
    }

    let pdfs = list_pdfs(dir)?;
    if pdfs.is_empty() {
        return Ok(GenerateOutcome::NoDrawings(dir.clone()));
    }
    tracing::debug!(count = pdfs.len(), dir = %dir.display(), "found drawings");

    let drawings = collect_drawings(&pdfs, extractor, settings);
    let catalog = Catalog::aggregate(drawings, settings.release());

    if !settings.quiet {
        for entry in catalog.entries() {
            if entry.previous_revisions.is_empty() {
                continue;
            }
            println!(
                "  {} {}: Latest=Rev {}, History={}",
                style("→").cyan(),
                entry.part_number,
                entry.revision,
                plural(entry.previous_revisions.len(), "revision")
            );
        }
    }

    if settings.dry_run {
        return Ok(GenerateOutcome::DryRun(catalog));
    }

    catalog.write(&settings.output).into_diagnostic()?;
    Ok(GenerateOutcome::Written {
        path: settings.output.clone(),
        summary: catalog.summary(),
    })
}

/// Turn every PDF into a drawing record, one file at a time
fn collect_drawings(
    pdfs: &[PdfEntry],
    extractor: &dyn TextExtractor,
    settings: &Settings,
) -> Vec<DrawingFile> {
    let defaults = settings.defaults();
    let mut drawings = Vec::with_capacity(pdfs.len());

    for entry in pdfs {
        if !settings.quiet {
            println!("Processing: {}", entry.filename);
        }

        let identity = parse_filename(&entry.filename, &settings.default_revision);
        let (content, error) = extract_fields(extractor, &entry.path);
        if let Some(e) = error {
            tracing::warn!(path = %entry.path.display(), error = %e, "falling back to defaults");
            println!(
                "{} reading PDF {}: {}",
                style("Error").red(),
                entry.path.display(),
                e
            );
        }

        let drawing = DrawingFile::fill_defaults(entry, identity, content, &defaults);
        if !settings.quiet {
            println!(
                "  {} {} Rev {}",
                style("✓").green(),
                drawing.part_number,
                drawing.revision
            );
        }
        drawings.push(drawing);
    }

    drawings
}

fn report(outcome: &GenerateOutcome, settings: &Settings) {
    match outcome {
        GenerateOutcome::MissingDirectory(dir) => {
            println!(
                "{} {} folder not found!",
                style("Error:").red(),
                style(dir.display()).cyan()
            );
        }
        GenerateOutcome::NoDrawings(dir) => {
            println!(
                "No PDF files found in {} folder",
                style(dir.display()).cyan()
            );
        }
        GenerateOutcome::Written { path, summary } => {
            println!();
            println!(
                "{} Generated {} with {}!",
                style("✓").green(),
                style(path.display()).cyan(),
                plural(summary.drawings, "drawing")
            );
            print_summary(summary);
        }
        GenerateOutcome::DryRun(catalog) => {
            println!();
            println!("{}", render_catalog(catalog));
            println!();
            println!(
                "{} Dry run: {} not written",
                style("!").yellow(),
                style(settings.output.display()).cyan()
            );
            print_summary(&catalog.summary());
        }
    }
}

fn print_summary(summary: &CatalogSummary) {
    println!("   Total PDFs processed: {}", summary.pdfs);
    println!("   Unique part numbers: {}", summary.drawings);
    println!("   Previous revisions tracked: {}", summary.previous_revisions);
}
