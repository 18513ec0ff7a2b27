use std::path::Path;

use anyhow::Result;
use chrono::Utc;
use tracing::{error, info, warn};

use crate::cli::ProcessArgs;
use crate::collab::{ResponseFiles, SysnoTable};
use crate::config::Config;
use crate::model::{DocumentOutcome, RunCounts, RunManifest};
use crate::util::{now_utc_string, utc_compact_string, write_json_pretty};
use crate::workflow::{DocumentPipeline, discover_documents, mark_document};

pub fn run(args: ProcessArgs, config: &Config) -> Result<()> {
    let started_ts = Utc::now();
    let started_at = now_utc_string();
    let run_id = format!("run-{}", utc_compact_string(started_ts));

    let manifest_path = args.manifest_path.clone().unwrap_or_else(|| {
        args.root.join("manifests").join(format!(
            "kerator_run_{}.json",
            utc_compact_string(started_ts)
        ))
    });

    info!(root = %args.root.display(), run_id = %run_id, dry_run = args.dry_run, "starting run");

    let catalog = SysnoTable::load(&args.sysno_table)?;
    let responses = ResponseFiles::new(&config.keywords);
    let pipeline = DocumentPipeline::new(config, &catalog, &responses)?;

    let documents = discover_documents(&args.root, config)?;
    if documents.is_empty() {
        warn!(root = %args.root.display(), "no pending documents found");
    }

    let mut outcomes = Vec::with_capacity(documents.len());
    for doc_dir in &documents {
        outcomes.push(process_one(&pipeline, doc_dir, config, args.dry_run));
    }

    let failed = outcomes
        .iter()
        .filter(|outcome| outcome.error.is_some())
        .count();
    let manifest = RunManifest {
        manifest_version: 1,
        run_id,
        started_at,
        updated_at: now_utc_string(),
        root: args.root.display().to_string(),
        dry_run: args.dry_run,
        counts: RunCounts {
            discovered: documents.len(),
            completed: outcomes.len() - failed,
            failed,
        },
        documents: outcomes,
    };

    write_json_pretty(&manifest_path, &manifest)?;
    info!(path = %manifest_path.display(), "wrote run manifest");

    if failed > 0 {
        warn!(
            failed,
            completed = manifest.counts.completed,
            "run finished with errors"
        );
    } else {
        info!(completed = manifest.counts.completed, "run completed");
    }

    Ok(())
}

fn process_one(
    pipeline: &DocumentPipeline<'_>,
    doc_dir: &Path,
    config: &Config,
    dry_run: bool,
) -> DocumentOutcome {
    let document = doc_dir
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| doc_dir.display().to_string());
    info!(doc = %document, "processing document");

    match pipeline.process_document(doc_dir, dry_run) {
        Ok(report) => DocumentOutcome {
            document,
            status: (if dry_run { "dry_run" } else { "completed" }).to_string(),
            sysno: Some(report.sysno),
            keyword_language: report.keyword_language,
            keyword_count: report.keyword_count,
            toc_entry_count: report.toc_entry_count,
            update_file: report
                .update_file
                .map(|path| path.display().to_string()),
            toc_sources: report.toc_sources,
            error: None,
        },
        Err(err) => {
            let message = format!("{err:#}");
            error!(doc = %document, error = %message, "document processing failed");

            if !dry_run {
                if let Err(mark_err) =
                    mark_document(doc_dir, &config.states.error_state, &config.states)
                {
                    warn!(doc = %document, error = %mark_err, "failed to write error marker");
                }
            }

            DocumentOutcome {
                document,
                status: "failed".to_string(),
                sysno: None,
                keyword_language: None,
                keyword_count: 0,
                toc_entry_count: 0,
                update_file: None,
                toc_sources: Vec::new(),
                error: Some(message),
            }
        }
    }
}
