//! Collecting input documents from files, directories, globs and ZIP archives.

use std::fs::{self, File};
use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::Context;
use glob::glob;
use tracing::{debug, warn};
use zip::ZipArchive;

use notas_core::SourceDocument;

fn has_extension(path: &Path, wanted: &str) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(wanted))
}

fn is_input(path: &Path) -> bool {
    path.is_file() && (has_extension(path, "xml") || has_extension(path, "zip"))
}

/// Expand command-line inputs into concrete file paths.
///
/// Directories contribute every `.xml` and `.zip` below them; anything that
/// is not an existing path is treated as a glob pattern.
pub fn expand_inputs(inputs: &[String]) -> anyhow::Result<Vec<PathBuf>> {
    let mut paths = Vec::new();

    for input in inputs {
        let path = Path::new(input);
        if path.is_dir() {
            let pattern = path.join("**").join("*");
            let pattern = pattern.to_string_lossy();
            let mut found: Vec<PathBuf> =
                glob(&pattern)?.filter_map(|r| r.ok()).filter(|p| is_input(p)).collect();
            found.sort();
            debug!("{} input file(s) under {}", found.len(), path.display());
            paths.extend(found);
        } else if path.is_file() {
            paths.push(path.to_path_buf());
        } else {
            let before = paths.len();
            paths.extend(glob(input)?.filter_map(|r| r.ok()).filter(|p| is_input(p)));
            if paths.len() == before {
                warn!("No input matches {}", input);
            }
        }
    }

    Ok(paths)
}

/// Read every input file into memory, unpacking ZIP archives.
pub fn load_sources(paths: &[PathBuf]) -> anyhow::Result<Vec<SourceDocument>> {
    let mut sources = Vec::new();

    for path in paths {
        if has_extension(path, "zip") {
            sources.extend(read_archive(path)?);
        } else {
            let bytes =
                fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
            sources.push(SourceDocument::new(path.display().to_string(), bytes));
        }
    }

    Ok(sources)
}

/// XML entries of a ZIP archive, named `archive.zip:entry`.
pub fn read_archive(path: &Path) -> anyhow::Result<Vec<SourceDocument>> {
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let mut archive = ZipArchive::new(file)
        .with_context(|| format!("Invalid ZIP archive: {}", path.display()))?;

    let archive_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    let mut sources = Vec::new();
    for i in 0..archive.len() {
        let mut entry = archive
            .by_index(i)
            .with_context(|| format!("Failed to read entry {} of {}", i, archive_name))?;

        let name = entry.name().to_string();
        if entry.is_dir() || name.starts_with("__MACOSX/") || !has_extension(Path::new(&name), "xml") {
            continue;
        }

        let mut bytes = Vec::new();
        entry
            .read_to_end(&mut bytes)
            .with_context(|| format!("Failed to extract {}:{}", archive_name, name))?;
        sources.push(SourceDocument::new(format!("{}:{}", archive_name, name), bytes));
    }

    debug!("{} XML document(s) in {}", sources.len(), archive_name);
    Ok(sources)
}
