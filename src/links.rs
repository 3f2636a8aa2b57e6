/// Whether links are rewritten for a local development server or left
/// pointing at the public site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderMode {
    Production,
    Development { host: String, port: u16 },
}

impl RenderMode {
    pub fn development<S: Into<String>>(host: S, port: u16) -> Self {
        RenderMode::Development {
            host: host.into(),
            port,
        }
    }
}

/// Rewrites hyperlink targets while a page renders.
///
/// Two rules, applied in order:
/// 1. A trailing `.md` becomes a trailing `/`, so source-level
///    cross-references resolve to directory-style URLs on the built site.
/// 2. In development mode, the canonical base URL prefix is swapped for
///    the local server address, keeping the rest of the path.
///
/// Everything else passes through unchanged. The rewrite never fails and
/// is idempotent: once a link has been rewritten, neither rule matches it
/// again.
#[derive(Debug, Clone)]
pub struct LinkRewriter {
    canonical_base: String,
    mode: RenderMode,
}

impl LinkRewriter {
    pub fn new<S: Into<String>>(canonical_base: S, mode: RenderMode) -> Self {
        let mut canonical_base = canonical_base.into();
        if !canonical_base.is_empty() && !canonical_base.ends_with('/') {
            canonical_base.push('/');
        }

        Self {
            canonical_base,
            mode,
        }
    }

    /// Rewrite a single link target.
    ///
    /// The suffix rule matches an exact trailing `.md` only. A link like
    /// `page.md#section` or `page.md?v=2` is left alone; that is a known
    /// limitation, not a bug to special-case.
    pub fn rewrite(&self, link: &str) -> String {
        let link = match link.strip_suffix(".md") {
            Some(stem) => format!("{stem}/"),
            None => link.to_string(),
        };

        match &self.mode {
            RenderMode::Production => link,
            RenderMode::Development { host, port } => {
                if self.canonical_base.is_empty() {
                    return link;
                }

                match link.strip_prefix(&self.canonical_base) {
                    Some(rest) => format!("http://{host}:{port}/{rest}"),
                    None => link,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn production() -> LinkRewriter {
        LinkRewriter::new("https://example.org/base/", RenderMode::Production)
    }

    fn development() -> LinkRewriter {
        LinkRewriter::new(
            "https://example.org/base/",
            RenderMode::development("localhost", 8080),
        )
    }

    #[test]
    fn unmatched_links_pass_through() {
        let rewriter = production();
        for link in [
            "getting-started/",
            "/reference/configuration/",
            "https://other-site.example/page.html",
            "#section",
            "mailto:docs@example.org",
        ] {
            assert_eq!(rewriter.rewrite(link), link);
        }
    }

    #[test]
    fn md_suffix_becomes_directory() {
        let rewriter = production();
        assert_eq!(rewriter.rewrite("how-to/backup.md"), "how-to/backup/");
        // `.md` (3 bytes) is exchanged for `/` (1 byte)
        assert_eq!("how-to/backup.md".len() - 2, "how-to/backup/".len());
    }

    #[test]
    fn production_keeps_the_canonical_host() {
        let rewriter = production();
        assert_eq!(
            rewriter.rewrite("https://example.org/base/page.md"),
            "https://example.org/base/page/"
        );
    }

    #[test]
    fn development_swaps_the_canonical_base() {
        let rewriter = development();
        assert_eq!(
            rewriter.rewrite("https://example.org/base/page.md"),
            "http://localhost:8080/page/"
        );
    }

    #[test]
    fn development_leaves_third_party_hosts_alone() {
        let rewriter = development();
        assert_eq!(
            rewriter.rewrite("https://other-site.example/base/page.html"),
            "https://other-site.example/base/page.html"
        );
    }

    #[test]
    fn query_and_fragment_defeat_the_suffix_rule() {
        let rewriter = production();
        assert_eq!(rewriter.rewrite("page.md#anchor"), "page.md#anchor");
        assert_eq!(rewriter.rewrite("page.md?v=2"), "page.md?v=2");
    }

    #[test]
    fn rewrite_is_idempotent() {
        for rewriter in [production(), development()] {
            for link in [
                "https://example.org/base/page.md",
                "https://example.org/base/page/",
                "relative/page.md",
                "a.md.md",
                "",
            ] {
                let once = rewriter.rewrite(link);
                assert_eq!(rewriter.rewrite(&once), once);
            }
        }
    }

    #[test]
    fn empty_input_stays_empty() {
        assert_eq!(production().rewrite(""), "");
        assert_eq!(development().rewrite(""), "");
    }

    #[test]
    fn base_url_is_normalized_to_a_trailing_slash() {
        let rewriter = LinkRewriter::new(
            "https://example.org/base",
            RenderMode::development("localhost", 8080),
        );
        assert_eq!(
            rewriter.rewrite("https://example.org/base/page.md"),
            "http://localhost:8080/page/"
        );
    }

    #[test]
    fn development_without_a_base_url_only_normalizes_suffixes() {
        let rewriter = LinkRewriter::new("", RenderMode::development("localhost", 8080));
        assert_eq!(
            rewriter.rewrite("https://example.org/base/page.md"),
            "https://example.org/base/page/"
        );
    }
}
