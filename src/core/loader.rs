//! Drawing directory scanning
//!
//! Lists the PDF files directly inside a drawings directory. Subdirectories
//! and non-PDF files are ignored.

use miette::Result;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use walkdir::WalkDir;

use crate::core::filename::is_pdf_name;

/// A PDF found on disk, before any parsing
#[derive(Debug, Clone)]
pub struct PdfEntry {
    pub path: PathBuf,
    pub filename: String,
    pub modified: SystemTime,
}

/// List PDF files in `dir`, sorted by filename
///
/// Returns an empty list if the directory does not exist; callers that need
/// to distinguish that case check `dir.is_dir()` first. Hidden files and
/// entries that cannot be read are left out.
pub fn list_pdfs(dir: &Path) -> Result<Vec<PdfEntry>> {
    let mut entries = Vec::new();

    if !dir.is_dir() {
        return Ok(entries);
    }

    let walker = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true);

    for entry in walker {
        // Dangling links and unreadable entries are skipped, not fatal
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!(error = %e, "skipping unreadable directory entry");
                continue;
            }
        };

        let Some(filename) = entry.file_name().to_str() else {
            tracing::warn!(path = %entry.path().display(), "skipping non UTF-8 filename");
            continue;
        };
        // Hidden files include editor lock files such as `.~lock.X.A.pdf#`
        if filename.starts_with('.') || !is_pdf_name(filename) {
            continue;
        }
        if !entry.file_type().is_file() {
            continue;
        }

        let modified = match entry
            .metadata()
            .map_err(std::io::Error::from)
            .and_then(|m| m.modified())
        {
            Ok(modified) => modified,
            Err(e) => {
                tracing::warn!(
                    path = %entry.path().display(),
                    error = %e,
                    "skipping file without modification time"
                );
                continue;
            }
        };

        entries.push(PdfEntry {
            path: entry.path().to_path_buf(),
            filename: filename.to_string(),
            modified,
        });
    }

    entries.sort_by(|a, b| a.filename.cmp(&b.filename));
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_list_pdfs_nonexistent_dir() {
        let result = list_pdfs(Path::new("/nonexistent/drawings"));
        assert!(result.unwrap().is_empty());
    }

    #[test]
    fn test_list_pdfs_filters_and_sorts() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("B-200.A.pdf"), b"%PDF").unwrap();
        fs::write(dir.path().join("A-100.A.PDF"), b"%PDF").unwrap();
        fs::write(dir.path().join("notes.txt"), b"hello").unwrap();
        fs::create_dir(dir.path().join("archive.pdf")).unwrap();
        fs::create_dir(dir.path().join("old")).unwrap();
        fs::write(dir.path().join("old").join("C-300.A.pdf"), b"%PDF").unwrap();

        let names: Vec<String> = list_pdfs(dir.path())
            .unwrap()
            .into_iter()
            .map(|e| e.filename)
            .collect();

        assert_eq!(names, vec!["A-100.A.PDF", "B-200.A.pdf"]);
    }

    #[test]
    fn test_list_pdfs_skips_hidden_files() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("P-100.A.pdf"), b"%PDF").unwrap();
        fs::write(dir.path().join(".~lock.P-100.A.pdf"), b"lock").unwrap();
        fs::write(dir.path().join(".hidden.B.pdf"), b"%PDF").unwrap();

        let names: Vec<String> = list_pdfs(dir.path())
            .unwrap()
            .into_iter()
            .map(|e| e.filename)
            .collect();

        assert_eq!(names, vec!["P-100.A.pdf"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_list_pdfs_tolerates_dangling_links() {
        use std::os::unix::fs::symlink;

        let dir = tempdir().unwrap();
        fs::write(dir.path().join("P.A.pdf"), b"%PDF").unwrap();
        symlink(dir.path().join("gone"), dir.path().join("notes.txt")).unwrap();
        symlink(dir.path().join("missing.pdf"), dir.path().join("Q.A.pdf")).unwrap();

        let names: Vec<String> = list_pdfs(dir.path())
            .unwrap()
            .into_iter()
            .map(|e| e.filename)
            .collect();

        assert_eq!(names, vec!["P.A.pdf"]);
    }
}
