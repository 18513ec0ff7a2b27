use std::io::{self, Write};

use anyhow::{Context, Result};
use tracing::info;

use crate::cli::KeywordsArgs;
use crate::collab::{KeywordSource, ResponseFiles};
use crate::config::Config;
use crate::keywords::KeywordSelector;

pub fn run(args: KeywordsArgs, config: &Config) -> Result<()> {
    let source = ResponseFiles::new(&config.keywords);
    let selector = KeywordSelector::new(&config.keywords);

    for language in selector.languages() {
        info!(
            language = %language,
            params = %config.keywords.request_params(language),
            "expected extraction request"
        );
    }

    let responses = source.responses(&args.doc_dir)?;
    let mapped = selector.map_keywords_to_scores(&responses)?;
    let doc_id = args.doc_dir.display().to_string();
    let selection = selector.select_best_keywords(&mapped, &doc_id);

    let mut output = io::BufWriter::new(io::stdout().lock());
    if args.json {
        serde_json::to_writer_pretty(&mut output, &selection)
            .context("failed to serialize keyword json output")?;
        writeln!(output)?;
    } else {
        if selection.averages.is_empty() {
            writeln!(output, "No keyword responses found")?;
        }
        for average in selection.averages.iter() {
            writeln!(output, "{}\t{:.6}", average.language, average.average)?;
        }
        match &selection.language {
            Some(language) => writeln!(output, "Selected: {language}")?,
            None => writeln!(output, "Selected: (none)")?,
        }
        for keyword in &selection.keywords {
            writeln!(output, "\t{keyword}")?;
        }
    }
    output.flush()?;

    Ok(())
}
