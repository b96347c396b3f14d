//! Loading documents from files and directories.
//!
//! A document's name is its file name without the last extension; its markup
//! is the decoded file text.

use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::document::Document;
use crate::error::Result;

/// Read every file named in `paths`, walking directories recursively.
///
/// Files come back in argument order; a directory contributes its files in
/// sorted path order.
pub fn read_documents<I, P>(paths: I) -> Result<Vec<Document>>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    let mut files = Vec::new();
    for path in paths {
        collect_files(path.as_ref(), &mut files)?;
    }
    files.iter().map(|file| read_document(file)).collect()
}

/// Read one file into a document.
pub fn read_document(path: &Path) -> Result<Document> {
    let bytes = fs::read(path)?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy())
        .unwrap_or_default();
    debug!(path = %path.display(), bytes = bytes.len(), "read document");
    Ok(Document::new(
        document_name(&file_name),
        decode_text(&bytes).into_owned(),
    ))
}

/// Strip the last extension from a file name.
///
/// Only a trailing `.ext` with at least one character is removed, so
/// `notes.` keeps its dot and `.hidden` becomes empty.
pub fn document_name(file_name: &str) -> String {
    match file_name.rfind('.') {
        Some(dot) if dot + 1 < file_name.len() && !file_name[dot + 1..].contains('/') => {
            file_name[..dot].to_string()
        }
        _ => file_name.to_string(),
    }
}

/// Decode file bytes: UTF-8 (BOM aware) first, Windows-1252 for legacy scans.
pub fn decode_text(bytes: &[u8]) -> Cow<'_, str> {
    let (result, _encoding, malformed) = encoding_rs::UTF_8.decode(bytes);
    if !malformed {
        return result;
    }
    let (result, _, _) = encoding_rs::WINDOWS_1252.decode(bytes);
    result
}

fn collect_files(path: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    if !path.is_dir() {
        files.push(path.to_path_buf());
        return Ok(());
    }
    let mut entries = fs::read_dir(path)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<Vec<_>>>()?;
    entries.sort();
    for entry in entries {
        collect_files(&entry, files)?;
    }
    Ok(())
}
