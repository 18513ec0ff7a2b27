use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TocSourceFile {
    pub filename: String,
    pub sha256: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentOutcome {
    pub document: String,
    pub status: String,
    pub sysno: Option<String>,
    pub keyword_language: Option<String>,
    pub keyword_count: usize,
    pub toc_entry_count: usize,
    pub update_file: Option<String>,
    pub toc_sources: Vec<TocSourceFile>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunCounts {
    pub discovered: usize,
    pub completed: usize,
    pub failed: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunManifest {
    pub manifest_version: u32,
    pub run_id: String,
    pub started_at: String,
    pub updated_at: String,
    pub root: String,
    pub dry_run: bool,
    pub counts: RunCounts,
    pub documents: Vec<DocumentOutcome>,
}
