//! Section classification for clinical logs.
//!
//! Routes every data line to the category named by the most recent marker
//! line. Marker lines themselves are consumed and never stored.

use crate::models::{Category, RawSections};
use tracing::debug;

/// Partition log lines into sodium, urine and desmopressin sections.
///
/// Lines are trimmed before matching and stored trimmed. Blank lines and
/// lines seen before the first marker are dropped. A repeated marker
/// re-selects its category, so data keeps accumulating into the same list.
pub fn classify_lines<I, S>(lines: I) -> RawSections
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut sections = RawSections::default();
    let mut current: Option<Category> = None;
    let mut dropped_before_marker = 0usize;

    for line in lines {
        let line = line.as_ref().trim();

        if let Some(category) = Category::from_marker_line(line) {
            debug!("Section marker '{}' selects {:?}", line, category);
            current = Some(category);
            continue;
        }

        if line.is_empty() {
            continue;
        }

        match current {
            Some(category) => sections.push(category, line.to_string()),
            None => dropped_before_marker += 1,
        }
    }

    if dropped_before_marker > 0 {
        debug!(
            "Dropped {} lines preceding the first section marker",
            dropped_before_marker
        );
    }

    sections
}

/// Classify the lines of an in-memory log.
///
/// `\n`, `\r\n` and a bare `\r` all end a line; the empty piece between
/// `\r` and `\n` is dropped like any blank line.
pub fn classify_text(content: &str) -> RawSections {
    classify_lines(content.split(['\n', '\r']))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lines_follow_most_recent_marker() {
        let sections = classify_text(
            "SODIUM LEVEL\n\
             03/01/2024 08:00 138.5\n\
             Urine Output\n\
             03/01/2024 08:15 120\n\
             desmopressin\n\
             03/01/2024 08:30 2.0\n",
        );

        assert_eq!(sections.sodium, vec!["03/01/2024 08:00 138.5"]);
        assert_eq!(sections.urine, vec!["03/01/2024 08:15 120"]);
        assert_eq!(sections.desmopressin, vec!["03/01/2024 08:30 2.0"]);
    }

    #[test]
    fn test_lines_before_first_marker_are_dropped() {
        let sections = classify_text(
            "Patient: J. Doe\n\
             03/01/2024 07:00 999\n\
             SODIUM LEVEL\n\
             03/01/2024 08:00 138.5\n",
        );

        assert_eq!(sections.sodium, vec!["03/01/2024 08:00 138.5"]);
        assert_eq!(sections.total_lines(), 1);
    }

    #[test]
    fn test_no_markers_yields_empty_sections() {
        let sections = classify_text("03/01/2024 08:00 138.5\nfree text\n");
        assert_eq!(sections, RawSections::default());
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(classify_text(""), RawSections::default());
    }

    #[test]
    fn test_marker_lines_are_never_data() {
        // Looks like a valid record but carries a marker substring
        let sections = classify_text(
            "SODIUM LEVEL\n\
             03/01/2024 08:00 140 Urine Output\n\
             03/01/2024 09:00 141\n",
        );

        assert!(sections.sodium.is_empty());
        assert_eq!(sections.urine, vec!["03/01/2024 09:00 141"]);
    }

    #[test]
    fn test_blank_lines_do_not_end_a_section() {
        let sections = classify_text(
            "Urine Voided Volume\n\
             03/01/2024 08:00 100\n\
             \n\
             \t  \n\
             03/01/2024 10:00 250\n",
        );

        assert_eq!(
            sections.urine,
            vec!["03/01/2024 08:00 100", "03/01/2024 10:00 250"]
        );
    }

    #[test]
    fn test_repeated_marker_accumulates_into_same_section() {
        let sections = classify_text(
            "SODIUM LEVEL\n\
             03/01/2024 08:00 138\n\
             desmopressin\n\
             03/01/2024 08:30 1.0\n\
             SODIUM LEVEL\n\
             03/02/2024 08:00 141\n",
        );

        assert_eq!(
            sections.sodium,
            vec!["03/01/2024 08:00 138", "03/02/2024 08:00 141"]
        );
        assert_eq!(sections.desmopressin.len(), 1);
    }

    #[test]
    fn test_carriage_return_line_endings() {
        let sections = classify_text("SODIUM LEVEL\r03/01/2024 08:00 138.5\r03/01/2024 09:00 139\r");
        assert_eq!(
            sections.sodium,
            vec!["03/01/2024 08:00 138.5", "03/01/2024 09:00 139"]
        );
    }

    #[test]
    fn test_crlf_line_endings() {
        let sections = classify_text("Urine Output\r\n03/01/2024 08:15 120\r\n\r\n03/01/2024 09:15 80\r\n");
        assert_eq!(
            sections.urine,
            vec!["03/01/2024 08:15 120", "03/01/2024 09:15 80"]
        );
    }

    #[test]
    fn test_lines_are_stored_trimmed() {
        let sections = classify_text("   desmopressin 0.1mg  \n   03/01/2024 08:30 2.0   \n");
        assert_eq!(sections.desmopressin, vec!["03/01/2024 08:30 2.0"]);
    }
}
