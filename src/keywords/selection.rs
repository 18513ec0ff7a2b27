use tracing::{debug, info};

use super::{AverageTable, KeywordMap, KeywordSelection, KeywordSelector, LanguageKeywordSet};

/// Arithmetic mean of the scores; an empty set averages to zero.
pub fn average_score(set: &LanguageKeywordSet) -> f64 {
    if set.is_empty() {
        return 0.0;
    }

    let total = set.iter().map(|keyword| keyword.score).sum::<f64>();
    total / set.len() as f64
}

impl KeywordSelector {
    pub fn score_averages(&self, mapped: &KeywordMap) -> AverageTable {
        mapped
            .iter()
            .map(|(language, set)| (language, average_score(set)))
            .collect()
    }

    /// Language with the highest average, first one wins on ties. Averages
    /// must beat zero to count, so all-zero tables have no winner.
    pub fn select_best_language<'a>(&self, averages: &'a AverageTable) -> Option<&'a str> {
        let mut best: Option<&str> = None;
        let mut highest = 0.0;

        for entry in averages.iter() {
            if entry.average > highest {
                highest = entry.average;
                best = Some(entry.language.as_str());
            }
            debug!(
                language = %entry.language,
                average = entry.average,
                best = best.unwrap_or_default(),
                highest,
                "compared language average"
            );
        }

        best
    }

    pub fn select_best_keywords(&self, mapped: &KeywordMap, doc_id: &str) -> KeywordSelection {
        let averages = self.score_averages(mapped);
        let language = self.select_best_language(&averages).map(str::to_string);

        let keywords = language
            .as_deref()
            .and_then(|language| mapped.get(language))
            .map(LanguageKeywordSet::texts)
            .unwrap_or_default();

        match &language {
            Some(language) => info!(
                doc = %doc_id,
                language = %language,
                average = averages.get(language).unwrap_or_default(),
                keywords = keywords.len(),
                "selected best keywords"
            ),
            None => info!(
                doc = %doc_id,
                languages = averages.len(),
                "no language scored above zero"
            ),
        }

        KeywordSelection {
            language,
            keywords,
            averages,
        }
    }
}
