use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

/// Immutable run configuration. Every field falls back to the catalog
/// defaults, so a config file only needs to list what it overrides.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub catalog: CatalogConfig,
    pub files: FileConfig,
    pub states: StateConfig,
    pub reconstructor: ReconstructorConfig,
    pub keywords: KeywordConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct CatalogConfig {
    pub field_l_code: String,
    pub subfield_prefix: String,
    pub keywords_field: FieldConfig,
    pub toc_field: FieldConfig,
    pub toc_separator: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FieldConfig {
    pub number: String,
    pub indicators: String,
    pub subfield: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            field_l_code: "L".to_string(),
            subfield_prefix: "$$".to_string(),
            keywords_field: FieldConfig {
                number: "653".to_string(),
                indicators: "  ".to_string(),
                subfield: "a".to_string(),
            },
            toc_field: FieldConfig {
                number: "505".to_string(),
                indicators: "0 ".to_string(),
                subfield: "a".to_string(),
            },
            toc_separator: "--".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub document_dir_prefix: String,
    pub toc_prefix: String,
    pub toc_txt_suffix: String,
    pub toc_xml_suffix: String,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            document_dir_prefix: "DONE_".to_string(),
            toc_prefix: "toc".to_string(),
            toc_txt_suffix: "txt".to_string(),
            toc_xml_suffix: "xml".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct StateConfig {
    pub finished_state: String,
    pub error_state: String,
}

impl Default for StateConfig {
    fn default() -> Self {
        Self {
            finished_state: ".ker_done".to_string(),
            error_state: ".ker_error".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ReconstructorConfig {
    /// Exclusive upper bound of the lookback walk; the walk starts at 2.
    pub max_lookback: usize,
}

impl Default for ReconstructorConfig {
    fn default() -> Self {
        Self { max_lookback: 4 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct KeywordConfig {
    /// Requested extraction languages, in the order they are compared.
    pub languages: Vec<String>,
    pub threshold: f64,
    pub max_words: u32,
    pub response_file_prefix: String,
}

impl Default for KeywordConfig {
    fn default() -> Self {
        Self {
            languages: vec!["cs".to_string(), "en".to_string()],
            threshold: 0.2,
            max_words: 15,
            response_file_prefix: "ker_".to_string(),
        }
    }
}

impl KeywordConfig {
    /// Query parameters the extraction service receives for one language.
    pub fn request_params(&self, language: &str) -> String {
        format!(
            "language={language}&threshold={}&maximum-words={}",
            self.threshold, self.max_words
        )
    }
}

impl Config {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => {
                let raw = fs::read(path)
                    .with_context(|| format!("failed to read config {}", path.display()))?;
                serde_json::from_slice::<Config>(&raw)
                    .with_context(|| format!("failed to parse config {}", path.display()))?
            }
            None => Config::default(),
        };

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.reconstructor.max_lookback < 2 {
            bail!(
                "reconstructor.max_lookback must be at least 2, got {}",
                self.reconstructor.max_lookback
            );
        }
        if self.keywords.languages.is_empty() {
            bail!("keywords.languages must name at least one language");
        }
        if self.catalog.toc_separator.trim().is_empty() {
            bail!("catalog.toc_separator must not be blank");
        }
        Ok(())
    }
}
