use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "kerator",
    version,
    about = "TOC entry and keyword curation for digitized documents"
)]
pub struct Cli {
    /// JSON file overriding the default catalog and processing settings.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Rebuild TOC entries from OCR text files.
    Toc(TocArgs),
    /// Pick the best keyword set from saved extraction responses.
    Keywords(KeywordsArgs),
    /// Build catalog update files for every pending document.
    Process(ProcessArgs),
    Status(StatusArgs),
}

#[derive(Args, Debug, Clone)]
pub struct TocArgs {
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    #[arg(long, default_value_t = false)]
    pub json: bool,
}

#[derive(Args, Debug, Clone)]
pub struct KeywordsArgs {
    pub doc_dir: PathBuf,

    #[arg(long, default_value_t = false)]
    pub json: bool,
}

#[derive(Args, Debug, Clone)]
pub struct ProcessArgs {
    #[arg(long)]
    pub root: PathBuf,

    #[arg(long)]
    pub sysno_table: PathBuf,

    #[arg(long)]
    pub manifest_path: Option<PathBuf>,

    #[arg(long, default_value_t = false)]
    pub dry_run: bool,
}

#[derive(Args, Debug, Clone)]
pub struct StatusArgs {
    #[arg(long)]
    pub root: PathBuf,
}
