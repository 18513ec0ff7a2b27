use tracing::trace;

use super::TocReconstructor;

/// Normalized lines of one TOC file, in reading order.
///
/// Only ever appended to; earlier lines are read by the lookback walk but
/// never rewritten.
#[derive(Debug, Default, Clone)]
pub struct LineBuffer {
    lines: Vec<String>,
}

impl LineBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, line: String) {
        self.lines.push(line);
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn get(&self, pos: usize) -> Option<&str> {
        self.lines.get(pos).map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for LineBuffer {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            lines: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl TocReconstructor {
    /// Joins a numbered line with the unnumbered lines that precede it.
    ///
    /// `buffer` already holds `current` as its last line. The walk inspects
    /// `buffer[len - r]` for `r` in `2..max_lookback` and stops at the first
    /// numbered predecessor or when history runs out. Lines without a page
    /// number yield `None`.
    pub fn connect_missing(
        &self,
        current: &str,
        buffer: &LineBuffer,
        max_lookback: usize,
    ) -> Option<String> {
        if !self.has_page_number_ending(current) {
            return None;
        }

        let mut joined = current.to_string();
        for r in 2..max_lookback {
            let Some(previous) = buffer.len().checked_sub(r).and_then(|pos| buffer.get(pos))
            else {
                trace!(line = %joined, "lookback exhausted buffer history");
                return Some(joined);
            };

            if self.has_page_number_ending(previous) {
                trace!(line = %joined, "predecessor carries its own page number");
                return Some(joined);
            }

            trace!(previous = %previous, "joining line with predecessor");
            joined = format!("{previous} {joined}");
        }

        Some(joined)
    }
}
