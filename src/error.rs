use thiserror::Error;

/// Failures raised by the TOC reconstructor, the keyword selector and the
/// catalog record builder.
///
/// A language without a winner is not represented here; selection returns
/// `None` for that case.
#[derive(Debug, Error, PartialEq)]
pub enum CoreError {
    #[error("no TOC files were provided")]
    EmptyInput,

    #[error("keyword response for language '{language}' is malformed: {detail}")]
    TypeMismatch { language: String, detail: String },

    #[error(
        "keyword response for language '{language}' has {keywords} keywords but {scores} scores"
    )]
    LengthMismatch {
        language: String,
        keywords: usize,
        scores: usize,
    },

    #[error("TOC entry '{entry}' contains the record separator '{separator}'")]
    SeparatorInEntry { entry: String, separator: String },
}
