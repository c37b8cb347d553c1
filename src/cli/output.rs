//! Output formatting for CLI commands.
//!
//! Results go to stdout; logs go to stderr through the logger.

use crate::document::corpus::Corpus;
use crate::document::document::Document;
use crate::pipeline::VariantOutcome;
use crate::preprocess::PreprocessReport;
use crate::report::truncate_title;

/// Width of text cells in tables.
const CELL_CHARS: usize = 48;

/// Print the first documents of the preprocessed collection.
pub fn print_overview(documents: &[Document]) {
    println!("Below is the overview of the preprocessed data");
    println!(
        "{:>4}  {:<w$}  {:<w$}  {:<w$}",
        "",
        "title",
        "content",
        "processed_text",
        w = CELL_CHARS
    );
    for document in documents {
        println!(
            "{:>4}  {:<w$}  {:<w$}  {:<w$}",
            document.doc_id(),
            cell(document.title()),
            cell(document.content()),
            cell(document.processed_text().unwrap_or("")),
            w = CELL_CHARS
        );
    }
    println!();
}

/// Print a top-k list as a content and score table.
pub fn print_top_results(corpus: &Corpus, outcome: &VariantOutcome) {
    println!("Top results with {} query:", outcome.variant);
    println!("{:>4}  {:<w$}  {:>10}", "", "content", "score", w = CELL_CHARS);
    for ranked in &outcome.top {
        let content = corpus.get(ranked.doc_id).map_or("", |doc| doc.content());
        println!(
            "{:>4}  {:<w$}  {:>10.6}",
            ranked.doc_id,
            cell(content),
            ranked.score,
            w = CELL_CHARS
        );
    }
}

/// Print the metrics line and chart location of a variant.
pub fn print_evaluation(outcome: &VariantOutcome) {
    println!("{}", outcome.metrics);
    println!("Plot saved to {}", outcome.plot_path.display());
}

/// Print the result of a preprocessing run.
pub fn print_preprocess_summary(report: &PreprocessReport) {
    if report.empty_documents > 0 {
        println!(
            "{} of {} documents have no terms left after preprocessing",
            report.empty_documents, report.documents
        );
    }
    println!(
        "Data preprocessed and saved to {}",
        report.output_path.display()
    );
}

fn cell(text: &str) -> String {
    let single_line = text.split_whitespace().collect::<Vec<_>>().join(" ");
    truncate_title(&single_line, CELL_CHARS - 3)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_fits_column() {
        let long = "word ".repeat(40);
        let formatted = cell(&long);

        assert_eq!(formatted.chars().count(), CELL_CHARS);
        assert!(formatted.ends_with("..."));
    }

    #[test]
    fn test_cell_flattens_whitespace() {
        assert_eq!(cell("line one\nline\ttwo"), "line one line two");
    }
}
