use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};

use crate::plugins::InclusiveLanguage;

/// One discouraged term spotted in a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub term: String,
    pub suggestion: String,
    pub line: usize,
}

impl std::fmt::Display for Finding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}: \"{}\" ({})", self.line, self.term, self.suggestion)
    }
}

/// Scan prose for discouraged terms. Code blocks and inline code are
/// skipped; matches are case-insensitive and on word boundaries only.
/// Reporting is the caller's business; a finding never fails the render.
pub fn scan(source: &str, config: &InclusiveLanguage) -> Vec<Finding> {
    let mut findings = Vec::new();
    let mut in_code_block = false;

    for (event, range) in Parser::new_ext(source, Options::all()).into_offset_iter() {
        match event {
            Event::Start(Tag::CodeBlock(_)) => in_code_block = true,
            Event::End(TagEnd::CodeBlock) => in_code_block = false,
            Event::Text(text) if !in_code_block => {
                let line = source[..range.start].matches('\n').count() + 1;
                let text = text.to_lowercase();

                for (term, suggestion) in &config.terms {
                    if contains_word(&text, term) {
                        findings.push(Finding {
                            term: term.clone(),
                            suggestion: suggestion.clone(),
                            line,
                        });
                    }
                }
            }
            _ => {}
        }
    }

    findings
}

fn contains_word(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return false;
    }

    let mut start = 0;
    while let Some(pos) = haystack[start..].find(needle) {
        let begin = start + pos;
        let end = begin + needle.len();

        let boundary_before = haystack[..begin]
            .chars()
            .next_back()
            .is_none_or(|c| !c.is_alphanumeric());
        let boundary_after = haystack[end..]
            .chars()
            .next()
            .is_none_or(|c| !c.is_alphanumeric());

        if boundary_before && boundary_after {
            return true;
        }
        start = end;
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_discouraged_terms_with_line_numbers() {
        let source = "# Intro\n\nSimply run the installer.\n";
        let findings = scan(source, &InclusiveLanguage::default());

        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].term, "simply");
        assert_eq!(findings[0].line, 3);
        assert!(!findings[0].suggestion.is_empty());
    }

    #[test]
    fn matching_is_case_insensitive() {
        let findings = scan("JUST do it.", &InclusiveLanguage::default());
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].term, "just");
    }

    #[test]
    fn word_boundaries_are_respected() {
        // "justice" contains "just" but is not the word "just"
        let findings = scan("The justice system.", &InclusiveLanguage::default());
        assert!(findings.is_empty());
    }

    #[test]
    fn multi_word_terms_match() {
        let findings = scan("Of course you need a key.", &InclusiveLanguage::default());
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].term, "of course");
    }

    #[test]
    fn code_blocks_are_skipped() {
        let source = "```\njust a shell comment\n```\n\n    simply indented code\n";
        let findings = scan(source, &InclusiveLanguage::default());
        assert!(findings.is_empty());
    }

    #[test]
    fn a_clean_document_yields_no_findings() {
        let source = "# Backups\n\nRun the installer, then configure a schedule.\n";
        assert!(scan(source, &InclusiveLanguage::default()).is_empty());
    }
}
