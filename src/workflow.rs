use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use tracing::{info, warn};

use crate::catalog::{keyword_record, toc_record, write_update_file};
use crate::collab::{CatalogLookup, KeywordSource};
use crate::config::{Config, FileConfig, StateConfig};
use crate::keywords::KeywordSelector;
use crate::model::TocSourceFile;
use crate::toc::TocReconstructor;
use crate::util::{read_lines, sha256_file};

#[derive(Debug)]
pub struct DocumentReport {
    pub sysno: String,
    pub keyword_language: Option<String>,
    pub keyword_count: usize,
    pub toc_entry_count: usize,
    pub update_file: Option<PathBuf>,
    pub toc_sources: Vec<TocSourceFile>,
}

pub struct DocumentPipeline<'a> {
    config: &'a Config,
    reconstructor: TocReconstructor,
    selector: KeywordSelector,
    catalog: &'a dyn CatalogLookup,
    keyword_source: &'a dyn KeywordSource,
}

impl<'a> DocumentPipeline<'a> {
    pub fn new(
        config: &'a Config,
        catalog: &'a dyn CatalogLookup,
        keyword_source: &'a dyn KeywordSource,
    ) -> Result<Self> {
        Ok(Self {
            config,
            reconstructor: TocReconstructor::new(&config.reconstructor)?,
            selector: KeywordSelector::new(&config.keywords),
            catalog,
            keyword_source,
        })
    }

    /// Builds and, unless `dry_run`, writes the catalog update file for one
    /// document directory.
    pub fn process_document(&self, doc_dir: &Path, dry_run: bool) -> Result<DocumentReport> {
        let name = dir_name(doc_dir)?;
        let isbn = isbn_from_dir_name(name)
            .with_context(|| format!("directory name has no isbn part: {name}"))?;
        let sysno = self.catalog.document_sysno(isbn)?;
        info!(doc = %name, isbn = %isbn, sysno = %sysno, "resolved catalog record");

        let files = &self.config.files;
        let xml_files = toc_files(doc_dir, &files.toc_xml_suffix, files)?;
        if xml_files.is_empty() {
            bail!("document {name} has no XML TOC files");
        }

        let responses = self.keyword_source.responses(doc_dir)?;
        let mapped = self.selector.map_keywords_to_scores(&responses)?;
        let selection = self.selector.select_best_keywords(&mapped, name);

        let txt_files = toc_files(doc_dir, &files.toc_txt_suffix, files)?;
        if txt_files.is_empty() {
            bail!("there are 0 TXT TOC files for document {name}");
        }

        let mut toc_sources = Vec::with_capacity(txt_files.len());
        let mut file_lines = Vec::with_capacity(txt_files.len());
        for path in &txt_files {
            toc_sources.push(TocSourceFile {
                filename: dir_name(path)?.to_string(),
                sha256: sha256_file(path)?,
            });
            file_lines.push(read_lines(path)?);
        }

        let entries = self
            .reconstructor
            .raw_toc_contents(&file_lines)?
            .into_iter()
            .flatten()
            .collect::<Vec<String>>();

        let catalog = &self.config.catalog;
        let mut records = Vec::with_capacity(2);
        if selection.keywords.is_empty() {
            warn!(doc = %name, "no keywords selected, skipping keyword record");
        } else {
            records.push(keyword_record(&sysno, &selection.keywords, catalog));
        }
        if entries.is_empty() {
            warn!(doc = %name, "no TOC entries reconstructed, skipping TOC record");
        } else {
            records.push(toc_record(&sysno, &entries, catalog)?);
        }

        let update_file = if dry_run {
            info!(doc = %name, records = records.len(), "dry-run, update file not written");
            None
        } else {
            let path = write_update_file(doc_dir, &sysno, &records)?;
            mark_document(doc_dir, &self.config.states.finished_state, &self.config.states)?;
            info!(doc = %name, path = %path.display(), "wrote catalog update file");
            Some(path)
        };

        Ok(DocumentReport {
            sysno,
            keyword_language: selection.language,
            keyword_count: selection.keywords.len(),
            toc_entry_count: entries.len(),
            update_file,
            toc_sources,
        })
    }
}

/// Document directories under `root` that still wait for processing.
pub fn discover_documents(root: &Path, config: &Config) -> Result<Vec<PathBuf>> {
    let entries =
        fs::read_dir(root).with_context(|| format!("failed to read {}", root.display()))?;

    let mut documents = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("failed to read entry in {}", root.display()))?;
        let path = entry.path();

        if !entry
            .file_type()
            .with_context(|| format!("failed to inspect file type: {}", path.display()))?
            .is_dir()
        {
            continue;
        }

        let is_document = path
            .file_name()
            .and_then(|name| name.to_str())
            .map(|name| name.starts_with(&config.files.document_dir_prefix))
            .unwrap_or(false);
        if is_document && !path.join(&config.states.finished_state).is_file() {
            documents.push(path);
        }
    }

    documents.sort();
    Ok(documents)
}

/// Third `_`-separated part of `DONE_<date>_<isbn>`.
pub fn isbn_from_dir_name(name: &str) -> Option<&str> {
    name.split('_').nth(2).filter(|isbn| !isbn.is_empty())
}

/// TOC files of one kind, e.g. `toc_001.txt`, sorted by name.
pub fn toc_files(doc_dir: &Path, suffix: &str, files: &FileConfig) -> Result<Vec<PathBuf>> {
    let entries =
        fs::read_dir(doc_dir).with_context(|| format!("failed to read {}", doc_dir.display()))?;

    let mut toc_files = Vec::new();
    for entry in entries {
        let entry =
            entry.with_context(|| format!("failed to read entry in {}", doc_dir.display()))?;
        let path = entry.path();
        let matches = path
            .file_name()
            .and_then(|name| name.to_str())
            .map(|name| name.starts_with(&files.toc_prefix) && name.ends_with(suffix))
            .unwrap_or(false);

        if matches && path.is_file() {
            toc_files.push(path);
        }
    }

    toc_files.sort();
    Ok(toc_files)
}

/// Drops a state marker file into the document directory. A document that
/// already failed cannot be marked finished.
pub fn mark_document(doc_dir: &Path, state: &str, states: &StateConfig) -> Result<()> {
    if state == states.finished_state && doc_dir.join(&states.error_state).is_file() {
        bail!(
            "document {} carries an error marker, refusing to mark it finished",
            doc_dir.display()
        );
    }
    if doc_dir.join(&states.finished_state).is_file() {
        warn!(doc = %doc_dir.display(), "document processing is already finished");
    }

    let path = doc_dir.join(state);
    fs::write(&path, format!("{}\t{state}", doc_dir.display()))
        .with_context(|| format!("failed to write state file {}", path.display()))
}

fn dir_name(path: &Path) -> Result<&str> {
    path.file_name()
        .and_then(|name| name.to_str())
        .with_context(|| format!("invalid UTF-8 file name: {}", path.display()))
}
