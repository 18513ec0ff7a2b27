use anyhow::{Context, Result};
use regex::Regex;

use crate::config::ReconstructorConfig;

mod assemble;
mod join;
mod normalize;
#[cfg(test)]
mod tests;

pub use join::LineBuffer;

/// Rebuilds TOC entries from OCR lines. Lines without a page number are
/// held in a [`LineBuffer`] and glued onto the next numbered line.
#[derive(Debug)]
pub struct TocReconstructor {
    patterns: LinePatterns,
    max_lookback: usize,
}

#[derive(Debug)]
struct LinePatterns {
    leading_numbered: Regex,
    leading_spaced_number: Regex,
    leading_non_word: Regex,
    tab: Regex,
    disallowed_chars: Regex,
    dot_run: Regex,
    whitespace_run: Regex,
    page_number_ending: Regex,
    page_number_suffix: Regex,
    leading_digits: Regex,
}

impl TocReconstructor {
    pub fn new(config: &ReconstructorConfig) -> Result<Self> {
        Ok(Self {
            patterns: LinePatterns::new()?,
            max_lookback: config.max_lookback,
        })
    }

    pub fn max_lookback(&self) -> usize {
        self.max_lookback
    }
}

impl LinePatterns {
    fn new() -> Result<Self> {
        Ok(Self {
            leading_numbered: Regex::new(r"^\d.*?\s+")
                .context("failed to compile leading numbering regex")?,
            leading_spaced_number: Regex::new(r"^\d\s\d+.\s+")
                .context("failed to compile spaced numbering regex")?,
            leading_non_word: Regex::new(r"^\W+")
                .context("failed to compile leading non-word regex")?,
            tab: Regex::new(r"\t").context("failed to compile tab regex")?,
            disallowed_chars: Regex::new(r"[^\s\w\-.]+")
                .context("failed to compile disallowed character regex")?,
            dot_run: Regex::new(r"\.{2,}").context("failed to compile dot run regex")?,
            whitespace_run: Regex::new(r"\s{2,}")
                .context("failed to compile whitespace run regex")?,
            page_number_ending: Regex::new(r"\d+$")
                .context("failed to compile page number ending regex")?,
            page_number_suffix: Regex::new(r"^(.*?)\s+\d+$")
                .context("failed to compile page number suffix regex")?,
            leading_digits: Regex::new(r"^\d+")
                .context("failed to compile leading digits regex")?,
        })
    }
}
