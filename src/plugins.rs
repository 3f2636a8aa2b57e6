use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// The optional render plugins a site can enable. Each one is an
/// independent descriptor value; a missing section means the plugin is off.
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
#[serde(default)]
pub struct Plugins {
    pub syntax_highlight: Option<SyntaxHighlight>,
    pub anchors: Option<HeadingAnchors>,
    pub navigation: Option<Navigation>,
    pub clipboard: Option<CodeClipboard>,
    pub inclusive_language: Option<InclusiveLanguage>,
}

/// Syntax highlighting for fenced code blocks.
#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(default)]
pub struct SyntaxHighlight {
    pub theme: String,
}

impl Default for SyntaxHighlight {
    fn default() -> Self {
        Self {
            theme: "base16-ocean.dark".to_string(),
        }
    }
}

/// Self-referential header links: every heading gets a slug id and its
/// text is wrapped in an anchor pointing at that id.
#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(default)]
pub struct HeadingAnchors {
    pub class: String,
}

impl Default for HeadingAnchors {
    fn default() -> Self {
        Self {
            class: "header-anchor".to_string(),
        }
    }
}

impl HeadingAnchors {
    pub(crate) fn open_tag(&self, slug: &str) -> String {
        format!(
            "<a class=\"{}\" href=\"#{}\">",
            html_escape::encode_quoted_attribute(&self.class),
            html_escape::encode_quoted_attribute(slug)
        )
    }
}

/// A per-page navigation outline built from section headings. Level-1
/// headings are skipped; by convention the only H1 is the page title.
#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(default)]
pub struct Navigation {
    /// Deepest heading level included in the outline.
    pub max_level: u32,
}

impl Default for Navigation {
    fn default() -> Self {
        Self { max_level: 3 }
    }
}

/// Copy-to-clipboard buttons on code blocks.
#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(default)]
pub struct CodeClipboard {
    pub button_class: String,
}

impl Default for CodeClipboard {
    fn default() -> Self {
        Self {
            button_class: "copy-button".to_string(),
        }
    }
}

impl CodeClipboard {
    pub(crate) fn wrap(&self, block_html: &str) -> String {
        format!(
            "<div class=\"code-block\">{}<button type=\"button\" class=\"{}\" title=\"Copy to clipboard\">Copy</button></div>",
            block_html,
            html_escape::encode_quoted_attribute(&self.button_class)
        )
    }
}

/// Word list for the inclusive language check: discouraged term mapped to
/// a suggestion. Terms are matched case-insensitively on word boundaries,
/// so keys should be lowercase.
#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(default)]
pub struct InclusiveLanguage {
    pub terms: BTreeMap<String, String>,
}

impl Default for InclusiveLanguage {
    fn default() -> Self {
        let mut terms = BTreeMap::new();
        for (term, suggestion) in [
            ("simply", "what is simple for you may not be for the reader"),
            ("just", "drop it; the sentence usually reads fine without it"),
            ("obviously", "if it were obvious it would not need documenting"),
            ("basically", "either explain it or leave the word out"),
            ("clearly", "show the reader instead of asserting it"),
            ("of course", "assumes knowledge the reader may not have"),
            ("everyone knows", "assumes knowledge the reader may not have"),
            ("easy", "easy for whom? describe the steps instead"),
        ] {
            terms.insert(term.to_string(), suggestion.to_string());
        }

        Self { terms }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_word_list_is_lowercase() {
        let plugin = InclusiveLanguage::default();
        assert!(!plugin.terms.is_empty());
        for term in plugin.terms.keys() {
            assert_eq!(term, &term.to_lowercase());
        }
    }

    #[test]
    fn anchor_open_tag_escapes_attributes() {
        let plugin = HeadingAnchors {
            class: "a\"b".to_string(),
        };
        let tag = plugin.open_tag("intro");
        assert!(tag.contains("href=\"#intro\""));
        assert!(!tag.contains("a\"b"));
    }
}
