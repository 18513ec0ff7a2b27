use super::*;
use crate::error::CoreError;

fn reconstructor() -> TocReconstructor {
    TocReconstructor::new(&ReconstructorConfig::default()).unwrap()
}

fn lines(raw: &[&str]) -> Vec<String> {
    raw.iter().map(|line| line.to_string()).collect()
}

#[test]
fn normalize_strips_numbering_leaders_and_markup() {
    let toc = reconstructor();

    assert_eq!(toc.normalize("1 Introduction .......... 5\n"), "Introduction 5");
    assert_eq!(toc.normalize("§ Preface\t\tvii"), "Preface vii");
    assert_eq!(toc.normalize("Chapter 2: Fluids ... 12"), "Chapter 2 Fluids 12");
    assert_eq!(toc.normalize("1.1\tScope"), "Scope");
}

#[test]
fn normalize_lets_spaced_numbering_rule_override_plain_numbering() {
    let toc = reconstructor();
    assert_eq!(
        toc.normalize("1 2. Methods of Analysis 17"),
        "Methods of Analysis 17"
    );
}

#[test]
fn normalize_is_idempotent() {
    let toc = reconstructor();
    let samples = [
        "1 Introduction .......... 5\n",
        "§ Preface\t\tvii",
        "Chapter 2: Fluids ... 12",
        "1 2. Methods of Analysis 17",
        "  *** Contents ***",
        "1.1\tScope",
        "Appendix — Tables ..... 301",
    ];

    for sample in samples {
        let once = toc.normalize(sample);
        assert_eq!(toc.normalize(&once), once, "sample: {sample:?}");
    }
}

#[test]
fn page_number_ending_requires_trailing_digits() {
    let toc = reconstructor();
    assert!(toc.has_page_number_ending("Foo 123"));
    assert!(toc.has_page_number_ending("Part2"));
    assert!(!toc.has_page_number_ending("Foo"));
    assert!(!toc.has_page_number_ending("Foo 12a"));
    assert!(!toc.has_page_number_ending(""));
}

#[test]
fn connect_missing_joins_unnumbered_predecessor() {
    let toc = reconstructor();
    let buffer: LineBuffer = ["Introduction", "to Fluids 12"].into_iter().collect();

    let joined = toc.connect_missing("to Fluids 12", &buffer, 4);
    assert_eq!(joined.as_deref(), Some("Introduction to Fluids 12"));
    assert_eq!(
        toc.strip_page_number("Introduction to Fluids 12"),
        "Introduction to Fluids"
    );
}

#[test]
fn connect_missing_returns_none_without_page_number() {
    let toc = reconstructor();
    let buffer: LineBuffer = ["Introduction"].into_iter().collect();
    assert_eq!(toc.connect_missing("Introduction", &buffer, 4), None);
}

#[test]
fn connect_missing_stops_at_numbered_predecessor() {
    let toc = reconstructor();
    let buffer: LineBuffer = ["Chapter One 5", "Chapter Two 10"].into_iter().collect();
    assert_eq!(
        toc.connect_missing("Chapter Two 10", &buffer, 4).as_deref(),
        Some("Chapter Two 10")
    );
}

#[test]
fn connect_missing_walk_is_bounded_by_max_lookback() {
    let toc = reconstructor();
    let buffer: LineBuffer = ["A", "B", "C", "D 9"].into_iter().collect();

    assert_eq!(
        toc.connect_missing("D 9", &buffer, 4).as_deref(),
        Some("B C D 9")
    );
    assert_eq!(toc.connect_missing("D 9", &buffer, 2).as_deref(), Some("D 9"));
}

#[test]
fn strip_page_number_leaves_unnumbered_entries_alone() {
    let toc = reconstructor();
    assert_eq!(
        toc.strip_page_number(
            "Voltammetry at the interface of two immiscible electrolyte solutions 202"
        ),
        "Voltammetry at the interface of two immiscible electrolyte solutions"
    );
    assert_eq!(toc.strip_page_number("Preface"), "Preface");
    assert_eq!(toc.strip_page_number("Chapter 12 5"), "Chapter 12");
}

#[test]
fn toc_entries_emits_one_entry_per_numbered_line() {
    let toc = reconstructor();
    assert_eq!(
        toc.toc_entries(&["Chapter One 5", "Chapter Two 10"]),
        vec!["Chapter One", "Chapter Two"]
    );
}

#[test]
fn toc_entries_rebuilds_broken_titles_and_skips_blank_lines() {
    let toc = reconstructor();
    let raw = lines(&["Introduction\n", "\n", "to Fluids 12\n", "Appendix 40\n"]);

    assert_eq!(
        toc.toc_entries(&raw),
        vec!["Introduction to Fluids", "Appendix"]
    );
}

#[test]
fn toc_entries_drops_candidates_starting_with_digits() {
    let toc = reconstructor();
    assert_eq!(toc.toc_entries(&["Chapter One 5", "17"]), vec!["Chapter One"]);
}

#[test]
fn toc_entries_never_emit_whitespace_runs() {
    let toc = reconstructor();
    assert_eq!(
        toc.toc_entries(&["Fluids:", "Dynamics 8"]),
        vec!["Fluids Dynamics"]
    );
}

#[test]
fn toc_entries_drop_lines_left_empty_by_normalization() {
    let toc = reconstructor();
    assert!(toc.toc_entries(&["***", "12"]).is_empty());
    assert_eq!(toc.toc_entries(&["***", "Fluids 12"]), vec!["Fluids"]);
}

#[test]
fn raw_toc_contents_rejects_empty_file_list() {
    let toc = reconstructor();
    let files: Vec<Vec<String>> = Vec::new();
    assert_eq!(toc.raw_toc_contents(&files), Err(CoreError::EmptyInput));
}

#[test]
fn raw_toc_contents_keeps_per_file_results_in_order() {
    let toc = reconstructor();
    let files = vec![
        lines(&["Preface 1", "Chapter One 5"]),
        Vec::new(),
        lines(&["Index 99"]),
    ];

    let contents = toc.raw_toc_contents(&files).unwrap();
    assert_eq!(
        contents,
        vec![
            vec!["Preface".to_string(), "Chapter One".to_string()],
            Vec::new(),
            vec!["Index".to_string()],
        ]
    );
}
