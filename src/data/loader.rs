use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rayon::prelude::*;

use super::model::FileResult;
use super::parser::parse;

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load and parse every file of an upload batch.
///
/// Files are parsed in parallel and the results keep the order of `paths`.
/// A file that cannot be read or parsed only produces its own
/// [`FileResult::Error`]; the rest of the batch is unaffected.
pub fn load_files(paths: &[PathBuf]) -> Vec<FileResult> {
    paths.par_iter().map(|path| load_file(path)).collect()
}

/// Load and parse a single file.
pub fn load_file(path: &Path) -> FileResult {
    let name = display_name(path);
    match read_text(path) {
        Ok(text) => parse_named(name, &text),
        Err(e) => {
            log::warn!("Failed to read {}: {e:#}", path.display());
            FileResult::failed(name, format!("{e:#}"))
        }
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn parse_named(name: String, text: &str) -> FileResult {
    let outcome = parse(text);
    match &outcome {
        Ok(table) => log::info!(
            "Parsed {name}: {} rows, columns {:?}",
            table.len(),
            table.columns
        ),
        Err(e) => log::warn!("Failed to parse {name}: {e}"),
    }
    FileResult::from_outcome(name, outcome)
}

fn read_text(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path).context("reading residual file")?;
    String::from_utf8(bytes).context("residual file is not valid UTF-8")
}

/// File name shown to the user: the last path component, or the whole path.
fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_file(dir: &TempDir, name: &str, contents: &[u8]) -> PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents).unwrap();
        path
    }

    #[test]
    fn test_load_files_keeps_order_and_isolates_failures() {
        let dir = TempDir::new().unwrap();
        let good = write_file(&dir, "good.dat", b"# Residuals\n# Time p\n1 0.5\n2 0.05\n");
        let bad = write_file(&dir, "bad.dat", b"# Residuals\n# Iter p\n1 0.5\n");
        let also_good = write_file(&dir, "also_good.dat", b"x\nTime Ux\n1 1\n");

        let results = load_files(&[good, bad, also_good]);

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].name(), "good.dat");
        assert!(results[0].is_ok());
        assert_eq!(results[1].name(), "bad.dat");
        assert_eq!(
            results[1],
            FileResult::failed("bad.dat", "Expected a \"Time\" column in the file.")
        );
        assert_eq!(results[2].name(), "also_good.dat");
        assert_eq!(results[2].table().unwrap().columns, vec!["Ux"]);
    }

    #[test]
    fn test_missing_file_is_a_per_file_error() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing.dat");
        let good = write_file(&dir, "good.dat", b"x\nTime p\n1 0.5\n");

        let results = load_files(&[missing, good]);

        match &results[0] {
            FileResult::Error { name, message } => {
                assert_eq!(name, "missing.dat");
                assert!(message.starts_with("reading residual file"));
            }
            other => panic!("expected an error, got {other:?}"),
        }
        assert!(results[1].is_ok());
    }

    #[test]
    fn test_non_utf8_file_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "binary.dat", &[0xff, 0xfe, 0x00, 0x41]);

        let result = load_file(&path);
        assert!(!result.is_ok());
    }

    #[test]
    fn test_empty_batch() {
        assert!(load_files(&[]).is_empty());
    }

    #[test]
    fn test_header_only_file() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "header_only.dat", b"# Residuals\n# Time p\n");

        assert_eq!(
            load_file(&path),
            FileResult::failed("header_only.dat", "Expected at least one header row and one data row.")
        );
    }
}
