use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;
use tracing::warn;

use crate::config::KeywordConfig;

pub trait CatalogLookup {
    /// System number of the catalog record for an ISBN.
    fn document_sysno(&self, isbn: &str) -> Result<String>;
}

pub trait KeywordSource {
    /// One raw extraction response per language, in request order.
    fn responses(&self, doc_dir: &Path) -> Result<Vec<(String, Value)>>;
}

/// ISBN to sysno table exported from the catalog.
#[derive(Debug, Default)]
pub struct SysnoTable {
    entries: HashMap<String, String>,
}

impl SysnoTable {
    pub fn load(path: &Path) -> Result<Self> {
        let raw =
            fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
        let entries = serde_json::from_slice::<HashMap<String, String>>(&raw)
            .with_context(|| format!("failed to parse sysno table {}", path.display()))?;
        Ok(Self { entries })
    }
}

impl FromIterator<(String, String)> for SysnoTable {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl CatalogLookup for SysnoTable {
    fn document_sysno(&self, isbn: &str) -> Result<String> {
        self.entries
            .get(isbn)
            .cloned()
            .with_context(|| format!("no catalog record found for isbn {isbn}"))
    }
}

/// Extraction responses saved next to the document as `<prefix><lang>.json`.
#[derive(Debug, Clone)]
pub struct ResponseFiles {
    languages: Vec<String>,
    prefix: String,
}

impl ResponseFiles {
    pub fn new(config: &KeywordConfig) -> Self {
        Self {
            languages: config.languages.clone(),
            prefix: config.response_file_prefix.clone(),
        }
    }
}

impl KeywordSource for ResponseFiles {
    fn responses(&self, doc_dir: &Path) -> Result<Vec<(String, Value)>> {
        let mut responses = Vec::with_capacity(self.languages.len());

        for language in &self.languages {
            let path = doc_dir.join(format!("{}{language}.json", self.prefix));
            if !path.is_file() {
                warn!(path = %path.display(), "keyword response file missing");
                continue;
            }

            let raw =
                fs::read(&path).with_context(|| format!("failed to read {}", path.display()))?;
            match serde_json::from_slice::<Value>(&raw) {
                Ok(value) => responses.push((language.clone(), value)),
                Err(err) => {
                    warn!(path = %path.display(), error = %err, "skipping unparsable keyword response");
                }
            }
        }

        Ok(responses)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sysno_table_reports_unknown_isbn() {
        let table: SysnoTable = [("9788071234567".to_string(), "001234567".to_string())]
            .into_iter()
            .collect();

        assert_eq!(table.document_sysno("9788071234567").unwrap(), "001234567");
        assert!(table.document_sysno("0000000000").is_err());
    }

    #[test]
    fn response_files_follow_language_order_and_skip_broken_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("ker_en.json"),
            r#"{"keywords": ["fluid"], "keyword_scores": [0.5]}"#,
        )
        .unwrap();
        fs::write(dir.path().join("ker_cs.json"), "not json").unwrap();

        let config = KeywordConfig {
            languages: vec!["cs".to_string(), "de".to_string(), "en".to_string()],
            ..KeywordConfig::default()
        };
        let responses = ResponseFiles::new(&config).responses(dir.path()).unwrap();

        assert_eq!(responses.len(), 1);
        assert_eq!(responses[0].0, "en");
        assert_eq!(responses[0].1["keywords"][0], "fluid");
    }
}
