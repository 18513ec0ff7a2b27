use std::io::{self, Write};

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use crate::cli::TocArgs;
use crate::config::Config;
use crate::toc::TocReconstructor;
use crate::util::read_lines;

#[derive(Debug, Serialize)]
struct TocFileResult {
    path: String,
    entries: Vec<String>,
}

pub fn run(args: TocArgs, config: &Config) -> Result<()> {
    let reconstructor = TocReconstructor::new(&config.reconstructor)?;

    let mut file_lines = Vec::with_capacity(args.files.len());
    for path in &args.files {
        file_lines.push(read_lines(path)?);
    }

    let contents = reconstructor.raw_toc_contents(&file_lines)?;
    info!(
        files = contents.len(),
        max_lookback = reconstructor.max_lookback(),
        "toc reconstruction complete"
    );

    let results = args
        .files
        .iter()
        .zip(contents)
        .map(|(path, entries)| TocFileResult {
            path: path.display().to_string(),
            entries,
        })
        .collect::<Vec<_>>();

    let mut output = io::BufWriter::new(io::stdout().lock());
    if args.json {
        serde_json::to_writer_pretty(&mut output, &results)
            .context("failed to serialize toc json output")?;
        writeln!(output)?;
    } else {
        for result in &results {
            writeln!(output, "# {} ({} entries)", result.path, result.entries.len())?;
            for entry in &result.entries {
                writeln!(output, "{entry}")?;
            }
        }
    }
    output.flush()?;

    Ok(())
}
