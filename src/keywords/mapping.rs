use serde_json::Value;
use tracing::{debug, warn};

use super::{KeywordMap, KeywordSelector, LanguageKeywordSet};
use crate::error::CoreError;

impl KeywordSelector {
    /// Zips each language's `keywords` and `keyword_scores` into a keyword
    /// set. A repeated keyword keeps the last score it was given.
    pub fn map_keywords_to_scores(
        &self,
        responses: &[(String, Value)],
    ) -> Result<KeywordMap, CoreError> {
        let mut mapped = KeywordMap::default();

        for (language, response) in responses {
            let set = keyword_set_from_response(language, response)?;
            debug!(language = %language, keywords = set.len(), "mapped keyword scores");
            mapped.insert(language.clone(), set);
        }

        if mapped.is_empty() {
            warn!("no keyword responses to map");
        } else {
            debug!(languages = mapped.len(), "mapped keyword responses");
        }
        for requested in self.languages() {
            if mapped.get(requested).is_none() {
                warn!(language = %requested, "no keyword response for requested language");
            }
        }

        Ok(mapped)
    }
}

fn keyword_set_from_response(
    language: &str,
    response: &Value,
) -> Result<LanguageKeywordSet, CoreError> {
    let mismatch = |detail: &str| CoreError::TypeMismatch {
        language: language.to_string(),
        detail: detail.to_string(),
    };

    let object = response
        .as_object()
        .ok_or_else(|| mismatch("response is not a mapping"))?;
    let keywords = object
        .get("keywords")
        .and_then(Value::as_array)
        .ok_or_else(|| mismatch("'keywords' is missing or not a sequence"))?;
    let scores = object
        .get("keyword_scores")
        .and_then(Value::as_array)
        .ok_or_else(|| mismatch("'keyword_scores' is missing or not a sequence"))?;

    if keywords.len() != scores.len() {
        return Err(CoreError::LengthMismatch {
            language: language.to_string(),
            keywords: keywords.len(),
            scores: scores.len(),
        });
    }

    let mut set = LanguageKeywordSet::default();
    for (keyword, score) in keywords.iter().zip(scores) {
        let text = keyword
            .as_str()
            .ok_or_else(|| mismatch("keyword is not a string"))?;
        let score = score
            .as_f64()
            .ok_or_else(|| mismatch("keyword score is not a number"))?;
        set.insert(text.to_string(), score);
    }

    Ok(set)
}
