pub mod config;
pub mod links;
pub mod lint;
pub mod markdown;
pub mod pipeline;
pub mod plugins;

// Re-export main types
pub use config::{Config, ConfigError, SiteConfig};
pub use links::{LinkRewriter, RenderMode};
pub use lint::Finding;
pub use markdown::{page_headings, page_title, slugify};
pub use pipeline::{NavItem, RenderedPage, Renderer, RendererBuilder};
pub use plugins::{
    CodeClipboard, HeadingAnchors, InclusiveLanguage, Navigation, Plugins, SyntaxHighlight,
};
