use serde::Serialize;

use crate::config::Config;
use crate::links::{LinkRewriter, RenderMode};
use crate::lint::{self, Finding};
use crate::markdown;
use crate::plugins::{
    CodeClipboard, HeadingAnchors, InclusiveLanguage, Navigation, SyntaxHighlight,
};

/// One entry of a page's navigation outline.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct NavItem {
    pub text: String,
    pub link: String,
}

/// The output of one render pass.
#[derive(Debug)]
pub struct RenderedPage {
    pub html: String,
    pub nav: Vec<NavItem>,
    pub findings: Vec<Finding>,
}

/// A fully wired render pipeline: the link rewriter plus whichever
/// plugins were enabled. Immutable once built; rendering has no side
/// effects, so one renderer can be shared across pages.
pub struct Renderer {
    rewriter: LinkRewriter,
    highlight: Option<SyntaxHighlight>,
    anchors: Option<HeadingAnchors>,
    navigation: Option<Navigation>,
    clipboard: Option<CodeClipboard>,
    inclusive_language: Option<InclusiveLanguage>,
}

impl Renderer {
    pub fn builder() -> RendererBuilder {
        RendererBuilder::new()
    }

    /// Wire a renderer from a site configuration. Plugin sections present
    /// in the file are enabled; the rendering mode is always supplied by
    /// the caller, never read from ambient process state.
    pub fn from_config(config: &Config, mode: RenderMode) -> Self {
        let mut builder = RendererBuilder::new().mode(mode);

        if let Some(site) = &config.site {
            if let Some(base_url) = &site.base_url {
                builder = builder.base_url(base_url);
            }
        }

        if let Some(plugins) = &config.plugins {
            if let Some(plugin) = &plugins.syntax_highlight {
                builder = builder.syntax_highlight(plugin.clone());
            }
            if let Some(plugin) = &plugins.anchors {
                builder = builder.anchors(plugin.clone());
            }
            if let Some(plugin) = &plugins.navigation {
                builder = builder.navigation(plugin.clone());
            }
            if let Some(plugin) = &plugins.clipboard {
                builder = builder.clipboard(plugin.clone());
            }
            if let Some(plugin) = &plugins.inclusive_language {
                builder = builder.inclusive_language(plugin.clone());
            }
        }

        builder.build()
    }

    pub fn render(&self, source: &str) -> RenderedPage {
        let html = markdown::render_document(
            source,
            &self.rewriter,
            self.highlight.as_ref(),
            self.anchors.as_ref(),
            self.clipboard.as_ref(),
        );

        let nav = match &self.navigation {
            Some(plugin) => page_nav(source, plugin),
            None => Vec::new(),
        };

        let findings = match &self.inclusive_language {
            Some(plugin) => lint::scan(source, plugin),
            None => Vec::new(),
        };

        RenderedPage {
            html,
            nav,
            findings,
        }
    }
}

fn page_nav(source: &str, plugin: &Navigation) -> Vec<NavItem> {
    markdown::page_headings(source)
        .into_iter()
        // The only H1 should be the page title
        .filter(|h| h.level > 1 && h.level <= plugin.max_level)
        .map(|h| NavItem {
            text: h.text,
            link: format!("#{}", h.slug),
        })
        .collect()
}

pub struct RendererBuilder {
    base_url: String,
    mode: RenderMode,
    highlight: Option<SyntaxHighlight>,
    anchors: Option<HeadingAnchors>,
    navigation: Option<Navigation>,
    clipboard: Option<CodeClipboard>,
    inclusive_language: Option<InclusiveLanguage>,
}

impl Default for RendererBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RendererBuilder {
    pub fn new() -> Self {
        Self {
            base_url: String::new(),
            mode: RenderMode::Production,
            highlight: None,
            anchors: None,
            navigation: None,
            clipboard: None,
            inclusive_language: None,
        }
    }

    pub fn base_url<S: Into<String>>(mut self, base_url: S) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn mode(mut self, mode: RenderMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn syntax_highlight(mut self, plugin: SyntaxHighlight) -> Self {
        self.highlight = Some(plugin);
        self
    }

    pub fn anchors(mut self, plugin: HeadingAnchors) -> Self {
        self.anchors = Some(plugin);
        self
    }

    pub fn navigation(mut self, plugin: Navigation) -> Self {
        self.navigation = Some(plugin);
        self
    }

    pub fn clipboard(mut self, plugin: CodeClipboard) -> Self {
        self.clipboard = Some(plugin);
        self
    }

    pub fn inclusive_language(mut self, plugin: InclusiveLanguage) -> Self {
        self.inclusive_language = Some(plugin);
        self
    }

    pub fn build(self) -> Renderer {
        Renderer {
            rewriter: LinkRewriter::new(self.base_url, self.mode),
            highlight: self.highlight,
            anchors: self.anchors,
            navigation: self.navigation,
            clipboard: self.clipboard,
            inclusive_language: self.inclusive_language,
        }
    }
}
