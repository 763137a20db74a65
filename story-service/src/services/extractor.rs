//! Turns raw model continuations into short teaser summaries.

use super::error::StoryError;

/// Fragment delimiter used to approximate sentence boundaries.
const SENTENCE_DELIMITER: &str = ". ";

/// Sentences kept per summary.
const MAX_SENTENCES: usize = 4;

/// Keep the first four non-blank fragments of `text` and mark it as truncated.
pub fn extract_summary(text: &str) -> String {
    let sentences: Vec<&str> = text
        .split(SENTENCE_DELIMITER)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .take(MAX_SENTENCES)
        .collect();

    format!("{}...", sentences.join(SENTENCE_DELIMITER))
}

/// Summarize the first two candidates.
///
/// A single candidate is summarized once and repeated.
pub fn summarize_candidates(candidates: &[String]) -> Result<Vec<String>, StoryError> {
    let first = candidates.first().ok_or(StoryError::EmptyGeneration)?;
    let first_summary = extract_summary(first);

    let second_summary = match candidates.get(1) {
        Some(second) => extract_summary(second),
        None => {
            tracing::warn!("Only one generated text is available. Reusing the first summary.");
            first_summary.clone()
        }
    };

    Ok(vec![first_summary, second_summary])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_at_most_four_sentences() {
        let text = "One. Two. Three. Four. Five. Six.";
        assert_eq!(extract_summary(text), "One. Two. Three. Four...");
    }

    #[test]
    fn shorter_text_yields_shorter_summary() {
        assert_eq!(extract_summary("Only one sentence."), "Only one sentence....");
        assert_eq!(extract_summary("First. Second"), "First. Second...");
    }

    #[test]
    fn blank_fragments_are_skipped_and_trimmed() {
        let text = "  Start here.    .  Then this.  \n. Last bit";
        assert_eq!(extract_summary(text), "Start here. Then this. Last bit...");
    }

    #[test]
    fn empty_text_is_just_ellipsis() {
        assert_eq!(extract_summary(""), "...");
        assert_eq!(extract_summary("   "), "...");
    }

    #[test]
    fn periods_without_space_do_not_split() {
        assert_eq!(
            extract_summary("Version 2.0 shipped. Everyone cheered"),
            "Version 2.0 shipped. Everyone cheered..."
        );
    }

    #[test]
    fn summary_never_exceeds_four_fragments() {
        let text = "a. b. c. d. e. f. g. h";
        let summary = extract_summary(text);
        let body = summary.strip_suffix("...").unwrap();
        assert!(body.split(". ").count() <= 4);
    }

    #[test]
    fn two_candidates_give_two_summaries() {
        let candidates = vec![
            "A. B. C. D. E.".to_string(),
            "X. Y.".to_string(),
            "ignored third".to_string(),
        ];
        let summaries = summarize_candidates(&candidates).unwrap();
        assert_eq!(summaries, vec!["A. B. C. D...", "X. Y...."]);
    }

    #[test]
    fn single_candidate_is_reused() {
        let candidates = vec!["Alone. Again.".to_string()];
        let summaries = summarize_candidates(&candidates).unwrap();
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0], summaries[1]);
    }

    #[test]
    fn no_candidates_is_an_error() {
        let err = summarize_candidates(&[]).unwrap_err();
        assert!(matches!(err, StoryError::EmptyGeneration));
    }
}
