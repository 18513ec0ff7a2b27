use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::cli::StatusArgs;
use crate::config::Config;
use crate::model::RunManifest;

#[derive(Debug, Default, PartialEq)]
struct DocumentCounts {
    finished: usize,
    errored: usize,
    pending: usize,
}

pub fn run(args: StatusArgs, config: &Config) -> Result<()> {
    info!(root = %args.root.display(), "status requested");

    let counts = count_documents(&args.root, config)?;
    info!(
        finished = counts.finished,
        errored = counts.errored,
        pending = counts.pending,
        "document states"
    );

    match latest_manifest(&args.root.join("manifests"))? {
        Some(path) => {
            let raw =
                fs::read(&path).with_context(|| format!("failed to read {}", path.display()))?;
            let manifest: RunManifest = serde_json::from_slice(&raw)
                .with_context(|| format!("failed to parse {}", path.display()))?;

            info!(
                run_id = %manifest.run_id,
                started_at = %manifest.started_at,
                updated_at = %manifest.updated_at,
                dry_run = manifest.dry_run,
                discovered = manifest.counts.discovered,
                completed = manifest.counts.completed,
                failed = manifest.counts.failed,
                "loaded latest run manifest"
            );
            for outcome in manifest.documents.iter().filter(|doc| doc.error.is_some()) {
                warn!(
                    doc = %outcome.document,
                    error = %outcome.error.as_deref().unwrap_or_default(),
                    "document failed in latest run"
                );
            }
        }
        None => warn!(root = %args.root.display(), "no run manifest found"),
    }

    Ok(())
}

fn count_documents(root: &Path, config: &Config) -> Result<DocumentCounts> {
    let entries = fs::read_dir(root).with_context(|| format!("failed to read {}", root.display()))?;

    let mut counts = DocumentCounts::default();
    for entry in entries {
        let entry = entry.with_context(|| format!("failed to read entry in {}", root.display()))?;
        let path = entry.path();
        let is_document = path.is_dir()
            && path
                .file_name()
                .and_then(|name| name.to_str())
                .map(|name| name.starts_with(&config.files.document_dir_prefix))
                .unwrap_or(false);
        if !is_document {
            continue;
        }

        if path.join(&config.states.finished_state).is_file() {
            counts.finished += 1;
        } else if path.join(&config.states.error_state).is_file() {
            counts.errored += 1;
        } else {
            counts.pending += 1;
        }
    }

    Ok(counts)
}

fn latest_manifest(manifest_dir: &Path) -> Result<Option<PathBuf>> {
    if !manifest_dir.is_dir() {
        return Ok(None);
    }

    let mut manifests = fs::read_dir(manifest_dir)
        .with_context(|| format!("failed to read {}", manifest_dir.display()))?
        .filter_map(|entry| entry.ok().map(|entry| entry.path()))
        .filter(|path| {
            path.file_name()
                .and_then(|name| name.to_str())
                .map(|name| name.starts_with("kerator_run_") && name.ends_with(".json"))
                .unwrap_or(false)
        })
        .collect::<Vec<_>>();
    manifests.sort();

    Ok(manifests.pop())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_documents_separates_states() {
        let root = tempfile::tempdir().unwrap();
        let config = Config::default();
        for name in ["DONE_1_111", "DONE_2_222", "DONE_3_333", "other"] {
            fs::create_dir_all(root.path().join(name)).unwrap();
        }
        fs::write(root.path().join("DONE_1_111/.ker_done"), "").unwrap();
        fs::write(root.path().join("DONE_2_222/.ker_error"), "").unwrap();

        let counts = count_documents(root.path(), &config).unwrap();
        assert_eq!(
            counts,
            DocumentCounts {
                finished: 1,
                errored: 1,
                pending: 1,
            }
        );
    }

    #[test]
    fn latest_manifest_picks_newest_timestamp() {
        let root = tempfile::tempdir().unwrap();
        for name in [
            "kerator_run_20240101T000000Z.json",
            "kerator_run_20240301T000000Z.json",
            "notes.json",
        ] {
            fs::write(root.path().join(name), "{}").unwrap();
        }

        let latest = latest_manifest(root.path()).unwrap().unwrap();
        assert!(latest.ends_with("kerator_run_20240301T000000Z.json"));
    }
}
