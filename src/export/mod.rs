//! Packaging a batch into a downloadable ZIP archive.
//!
//! Every document becomes one `{name}.txt` entry holding its markup. The
//! archive file is named after the export date.
//!
//! # Example
//!
//! ```no_run
//! use ketav::Document;
//! use ketav::export::ArchiveExporter;
//!
//! let docs = vec![Document::new("chapter", "<h1>One</h1>")];
//! let path = ArchiveExporter::new().export_to_dir(&docs, std::path::Path::new("out"))?;
//! println!("wrote {}", path.display());
//! # Ok::<(), ketav::Error>(())
//! ```

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufWriter, Seek, Write};
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};
use tracing::info;
use zip::CompressionMethod;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use crate::document::Document;
use crate::error::Result;

/// Default archive name prefix.
pub const DEFAULT_PREFIX: &str = "Otzaria_Output";

/// Configuration for archive export.
#[derive(Debug, Clone)]
pub struct ArchiveConfig {
    /// Deflate level (0-9). Defaults to 6.
    pub compression_level: Option<u32>,
    /// Archive file name prefix, followed by `_{YYYY-MM-DD}.zip`.
    pub prefix: String,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            compression_level: None,
            prefix: DEFAULT_PREFIX.to_string(),
        }
    }
}

/// Writes a document batch as a ZIP of text entries.
#[derive(Debug, Clone, Default)]
pub struct ArchiveExporter {
    config: ArchiveConfig,
}

impl ArchiveExporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ArchiveConfig) -> Self {
        Self { config }
    }

    /// Archive file name for `date`, e.g. `Otzaria_Output_2026-10-18.zip`.
    pub fn archive_name(&self, date: NaiveDate) -> String {
        format!("{}_{}.zip", self.config.prefix, date.format("%Y-%m-%d"))
    }

    /// Write the archive to any `Write + Seek` destination and hand it back.
    ///
    /// Documents sharing a name collapse into one entry at the position of
    /// the first, holding the content of the last.
    pub fn export<W: Write + Seek>(&self, documents: &[Document], writer: W) -> Result<W> {
        let mut zip = ZipWriter::new(writer);
        let level = self.config.compression_level.unwrap_or(6);
        let deflated = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .compression_level(Some(level as i64));

        for (name, markup) in entries(documents) {
            zip.start_file(name, deflated)?;
            zip.write_all(markup.as_bytes())?;
        }

        Ok(zip.finish()?)
    }

    /// Write the archive into `dir` under today's dated name.
    pub fn export_to_dir(&self, documents: &[Document], dir: &Path) -> Result<PathBuf> {
        let path = dir.join(self.archive_name(Local::now().date_naive()));
        self.export_to_path(documents, &path)?;
        Ok(path)
    }

    /// Write the archive to exactly `path`.
    pub fn export_to_path(&self, documents: &[Document], path: &Path) -> Result<()> {
        let file = BufWriter::new(File::create(path)?);
        self.export(documents, file)?.flush()?;
        info!(path = %path.display(), documents = documents.len(), "wrote archive");
        Ok(())
    }
}

/// Entry names and contents, de-duplicated by name.
fn entries(documents: &[Document]) -> Vec<(String, &str)> {
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut entries: Vec<(String, &str)> = Vec::with_capacity(documents.len());
    for doc in documents {
        let name = format!("{}.txt", doc.name);
        match positions.get(&name) {
            Some(&at) => entries[at].1 = doc.raw_markup.as_str(),
            None => {
                positions.insert(name.clone(), entries.len());
                entries.push((name, doc.raw_markup.as_str()));
            }
        }
    }
    entries
}
