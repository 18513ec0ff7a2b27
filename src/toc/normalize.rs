use std::borrow::Cow;

use tracing::debug;

use super::TocReconstructor;

impl TocReconstructor {
    /// Runs the fixed cleanup pipeline over one raw OCR line.
    pub fn normalize(&self, line: &str) -> String {
        let chomped = line.strip_suffix('\n').unwrap_or(line);
        let stripped = self.strip_leading_chars(chomped);

        let patterns = &self.patterns;
        let no_tabs = patterns.tab.replace_all(stripped, " ");
        let cleaned = patterns.disallowed_chars.replace_all(&no_tabs, " ");
        let no_dots = patterns.dot_run.replace_all(&cleaned, "");
        patterns.whitespace_run.replace_all(&no_dots, " ").into_owned()
    }

    /// Removes chapter numbering and markup in front of the title.
    ///
    /// All three rules are matched against the same input and every match
    /// fires in order, so a later match replaces the result of an earlier one.
    fn strip_leading_chars<'a>(&self, line: &'a str) -> &'a str {
        let rules = [
            &self.patterns.leading_numbered,
            &self.patterns.leading_spaced_number,
            &self.patterns.leading_non_word,
        ];

        let mut processed = line;
        for rule in rules {
            if let Some(found) = rule.find(line) {
                processed = &line[found.end()..];
            }
        }
        processed
    }

    pub fn has_page_number_ending(&self, line: &str) -> bool {
        self.patterns.page_number_ending.is_match(line)
    }

    /// Drops a trailing `<whitespace><digits>` page number.
    pub fn strip_page_number<'a>(&self, entry: &'a str) -> Cow<'a, str> {
        match self.patterns.page_number_suffix.captures(entry) {
            Some(captures) => match captures.get(1) {
                Some(title) => Cow::Borrowed(title.as_str()),
                None => Cow::Borrowed(entry),
            },
            None => {
                debug!(line = %entry, "no page number to strip");
                Cow::Borrowed(entry)
            }
        }
    }

    pub(super) fn starts_with_digits(&self, line: &str) -> bool {
        self.patterns.leading_digits.is_match(line)
    }

    pub(super) fn collapse_whitespace<'a>(&self, line: &'a str) -> Cow<'a, str> {
        self.patterns.whitespace_run.replace_all(line, " ")
    }
}
