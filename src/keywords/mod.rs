use serde::Serialize;

use crate::config::KeywordConfig;

mod mapping;
mod selection;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Keyword {
    pub text: String,
    pub score: f64,
}

/// Keyword text to score for one language, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LanguageKeywordSet {
    entries: Vec<Keyword>,
}

impl LanguageKeywordSet {
    /// Inserts or overwrites a score. An existing keyword keeps its
    /// position and takes the newer score.
    pub fn insert(&mut self, text: String, score: f64) {
        match self.entries.iter_mut().find(|entry| entry.text == text) {
            Some(entry) => entry.score = score,
            None => self.entries.push(Keyword { text, score }),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Keyword> {
        self.entries.iter()
    }

    pub fn texts(&self) -> Vec<String> {
        self.entries.iter().map(|entry| entry.text.clone()).collect()
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for LanguageKeywordSet {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        let mut set = Self::default();
        for (text, score) in iter {
            set.insert(text.into(), score);
        }
        set
    }
}

/// Keyword sets for every answered language, in response order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KeywordMap {
    languages: Vec<(String, LanguageKeywordSet)>,
}

impl KeywordMap {
    pub fn insert(&mut self, language: String, set: LanguageKeywordSet) {
        match self.languages.iter_mut().find(|(existing, _)| *existing == language) {
            Some((_, existing)) => *existing = set,
            None => self.languages.push((language, set)),
        }
    }

    pub fn get(&self, language: &str) -> Option<&LanguageKeywordSet> {
        self.languages
            .iter()
            .find(|(existing, _)| existing == language)
            .map(|(_, set)| set)
    }

    pub fn len(&self) -> usize {
        self.languages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.languages.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &LanguageKeywordSet)> {
        self.languages
            .iter()
            .map(|(language, set)| (language.as_str(), set))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LanguageAverage {
    pub language: String,
    pub average: f64,
}

/// Mean keyword score per language. One row per input language, including
/// languages that returned no keywords.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct AverageTable {
    entries: Vec<LanguageAverage>,
}

impl AverageTable {
    pub fn get(&self, language: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|entry| entry.language == language)
            .map(|entry| entry.average)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LanguageAverage> {
        self.entries.iter()
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for AverageTable {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(language, average)| LanguageAverage {
                    language: language.into(),
                    average,
                })
                .collect(),
        }
    }
}

/// Outcome of keyword selection for one document. `language` is `None`
/// when no language scored above zero; `keywords` is then empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeywordSelection {
    pub language: Option<String>,
    pub keywords: Vec<String>,
    pub averages: AverageTable,
}

#[derive(Debug, Clone)]
pub struct KeywordSelector {
    config: KeywordConfig,
}

impl KeywordSelector {
    pub fn new(config: &KeywordConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }

    pub fn languages(&self) -> &[String] {
        &self.config.languages
    }
}
