use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};

use crate::config::{CatalogConfig, FieldConfig};
use crate::error::CoreError;

pub fn keyword_record(sysno: &str, keywords: &[String], config: &CatalogConfig) -> String {
    let subfield = subfield_marker(config, &config.keywords_field);
    let mut record = record_prefix(sysno, config, &config.keywords_field);
    for keyword in keywords {
        record.push_str(&subfield);
        record.push_str(keyword);
    }
    record
}

/// Joins the entries into one TOC record. An entry that already holds the
/// separator token would split apart when the record is read back, so it is
/// rejected.
pub fn toc_record(
    sysno: &str,
    entries: &[String],
    config: &CatalogConfig,
) -> Result<String, CoreError> {
    let token = config.toc_separator.as_str();
    if let Some(entry) = entries.iter().find(|entry| entry.contains(token)) {
        return Err(CoreError::SeparatorInEntry {
            entry: entry.clone(),
            separator: token.to_string(),
        });
    }

    let mut record = record_prefix(sysno, config, &config.toc_field);
    record.push_str(&subfield_marker(config, &config.toc_field));
    record.push_str(&entries.join(toc_separator(config).as_str()));
    Ok(record)
}

/// Writes `<sysno>_update` into `dir`, one record per line.
pub fn write_update_file(dir: &Path, sysno: &str, records: &[String]) -> Result<PathBuf> {
    if records.is_empty() {
        bail!("no catalog records to write for sysno {sysno}");
    }
    if !dir.is_dir() {
        bail!("update file directory does not exist: {}", dir.display());
    }

    let path = dir.join(format!("{sysno}_update"));
    let file = File::create(&path)
        .with_context(|| format!("failed to create update file: {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    for record in records {
        writeln!(writer, "{record}")
            .with_context(|| format!("failed to write update file: {}", path.display()))?;
    }
    writer
        .flush()
        .with_context(|| format!("failed to flush update file: {}", path.display()))?;

    Ok(path)
}

fn record_prefix(sysno: &str, config: &CatalogConfig, field: &FieldConfig) -> String {
    format!(
        "{sysno} {}{} {} ",
        field.number, field.indicators, config.field_l_code
    )
}

fn subfield_marker(config: &CatalogConfig, field: &FieldConfig) -> String {
    format!("{}{}", config.subfield_prefix, field.subfield)
}

fn toc_separator(config: &CatalogConfig) -> String {
    format!(" {} ", config.toc_separator)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::config::ReconstructorConfig;
    use crate::toc::TocReconstructor;

    fn strings(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn keyword_record_prefixes_every_keyword_with_subfield() {
        let record = keyword_record(
            "001234567",
            &strings(&["fluid", "flow"]),
            &CatalogConfig::default(),
        );
        assert_eq!(record, "001234567 653   L $$afluid$$aflow");
    }

    fn toc_record_entries(record: &str, config: &CatalogConfig) -> Vec<String> {
        let marker = subfield_marker(config, &config.toc_field);
        let Some((_, body)) = record.split_once(&marker) else {
            return Vec::new();
        };
        if body.is_empty() {
            return Vec::new();
        }
        body.split(&toc_separator(config))
            .map(ToOwned::to_owned)
            .collect()
    }

    #[test]
    fn toc_record_joins_entries_with_separator() {
        let record = toc_record(
            "001234567",
            &strings(&["Introduction to Fluids", "Appendix"]),
            &CatalogConfig::default(),
        )
        .unwrap();
        assert_eq!(
            record,
            "001234567 5050  L $$aIntroduction to Fluids -- Appendix"
        );
    }

    #[test]
    fn toc_entries_survive_join_and_split() {
        let config = CatalogConfig::default();
        let entries = strings(&[
            "Preface",
            "Introduction to Fluids",
            "Chapter 2 Fluids",
            "Non-Newtonian flow",
            "Pre- and post-processing",
        ]);

        let record = toc_record("001234567", &entries, &config).unwrap();
        assert_eq!(toc_record_entries(&record, &config), entries);
    }

    #[test]
    fn toc_record_rejects_reconstructed_entry_holding_separator() {
        let config = CatalogConfig::default();
        let reconstructor = TocReconstructor::new(&ReconstructorConfig::default()).unwrap();
        let entries = reconstructor.toc_entries(&["Fluids -- an overview 12", "Appendix 40"]);
        assert_eq!(entries, vec!["Fluids -- an overview", "Appendix"]);

        let error = toc_record("001234567", &entries, &config).unwrap_err();
        assert_eq!(
            error,
            CoreError::SeparatorInEntry {
                entry: "Fluids -- an overview".to_string(),
                separator: "--".to_string(),
            }
        );
    }

    #[test]
    fn toc_record_rejects_separator_at_entry_edges() {
        let config = CatalogConfig::default();
        for entries in [
            strings(&["Fluids --", "Appendix"]),
            strings(&["Fluids", "-- Appendix"]),
        ] {
            assert!(matches!(
                toc_record("001234567", &entries, &config),
                Err(CoreError::SeparatorInEntry { .. })
            ));
        }
    }

    #[test]
    fn write_update_file_writes_one_record_per_line() {
        let dir = tempfile::tempdir().unwrap();
        let records = strings(&["first record", "second record"]);

        let path = write_update_file(dir.path(), "001234567", &records).unwrap();

        assert_eq!(path.file_name().unwrap(), "001234567_update");
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "first record\nsecond record\n"
        );
    }

    #[test]
    fn write_update_file_rejects_empty_record_list() {
        let dir = tempfile::tempdir().unwrap();
        assert!(write_update_file(dir.path(), "001234567", &[]).is_err());
    }
}
