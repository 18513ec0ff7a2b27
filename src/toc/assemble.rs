use tracing::{debug, info};

use super::{LineBuffer, TocReconstructor};
use crate::error::CoreError;

impl TocReconstructor {
    /// Turns the raw lines of one TOC file into cleaned entries.
    pub fn toc_entries<S: AsRef<str>>(&self, lines: &[S]) -> Vec<String> {
        let mut buffer = LineBuffer::new();
        let mut entries = Vec::new();

        for line in lines {
            let line = line.as_ref();
            if line.trim().is_empty() {
                continue;
            }

            let normalized = self.normalize(line);
            buffer.push(normalized.clone());

            let Some(candidate) = self.connect_missing(&normalized, &buffer, self.max_lookback)
            else {
                continue;
            };

            // A candidate that opens with digits is a stray page number or
            // numbering fragment, not a title.
            if self.starts_with_digits(&candidate) {
                debug!(line = %candidate, "dropping entry that starts with digits");
                continue;
            }

            let without_page = self.strip_page_number(&candidate);
            let entry = self.collapse_whitespace(&without_page);
            let entry = entry.trim();
            if entry.is_empty() {
                debug!(line = %candidate, "dropping entry with no title left");
                continue;
            }
            entries.push(entry.to_string());
        }

        entries
    }

    /// Reconstructs every TOC file of a document, one entry list per file.
    pub fn raw_toc_contents<L: AsRef<[String]>>(
        &self,
        files: &[L],
    ) -> Result<Vec<Vec<String>>, CoreError> {
        let contents = files
            .iter()
            .map(|lines| self.toc_entries(lines.as_ref()))
            .collect::<Vec<_>>();

        if contents.is_empty() {
            return Err(CoreError::EmptyInput);
        }

        info!(
            files = contents.len(),
            entries = contents.iter().map(Vec::len).sum::<usize>(),
            "reconstructed TOC contents"
        );
        Ok(contents)
    }
}
