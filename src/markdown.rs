use std::collections::HashMap;
use std::sync::LazyLock;

use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, Tag, TagEnd, html};
use syntect::highlighting::ThemeSet;
use syntect::html::highlighted_html_for_string;
use syntect::parsing::SyntaxSet;

use crate::links::LinkRewriter;
use crate::plugins::{CodeClipboard, HeadingAnchors, SyntaxHighlight};

// Initialize syntax highlighting resources once
static SYNTAX_SET: LazyLock<SyntaxSet> = LazyLock::new(SyntaxSet::load_defaults_newlines);
static THEME_SET: LazyLock<ThemeSet> = LazyLock::new(ThemeSet::load_defaults);

/// Render one Markdown document to HTML, running each enabled hook over
/// the event stream. Link and image destinations go through the rewriter
/// exactly once per token; anchor text and the rest of the Markdown
/// semantics are untouched.
pub fn render_document(
    source: &str,
    rewriter: &LinkRewriter,
    highlight: Option<&SyntaxHighlight>,
    anchors: Option<&HeadingAnchors>,
    clipboard: Option<&CodeClipboard>,
) -> String {
    let parser = Parser::new_ext(source, Options::all());
    let events: Vec<Event> = parser.map(|ev| rewrite_targets(ev, rewriter)).collect();

    let mut processed = Vec::new();
    let mut seen_slugs = HashMap::new();
    let mut i = 0;

    while i < events.len() {
        match &events[i] {
            Event::Start(Tag::CodeBlock(CodeBlockKind::Fenced(lang))) => {
                // Collect all text events until the end of the code block
                let mut code = String::new();
                i += 1;

                while i < events.len() {
                    match &events[i] {
                        Event::End(TagEnd::CodeBlock) => break,
                        Event::Text(text) => code.push_str(text),
                        _ => {}
                    }
                    i += 1;
                }

                let mut block = highlight_block(lang.as_ref(), &code, highlight);
                if let Some(clipboard) = clipboard {
                    block = clipboard.wrap(&block);
                }

                processed.push(Event::Html(block.into()));
            }
            Event::Start(Tag::Heading {
                level,
                id,
                classes,
                attrs,
            }) => {
                let slug = heading_slug(
                    id.as_deref(),
                    &heading_text(&events[i..]),
                    &mut seen_slugs,
                );

                processed.push(Event::Start(Tag::Heading {
                    level: *level,
                    id: Some(slug.clone().into()),
                    classes: classes.clone(),
                    attrs: attrs.clone(),
                }));

                if let Some(anchors) = anchors {
                    // Wrap the heading's inline content in a header link
                    processed.push(Event::InlineHtml(anchors.open_tag(&slug).into()));
                    i += 1;

                    while i < events.len() {
                        if let Event::End(TagEnd::Heading(_)) = &events[i] {
                            processed.push(Event::InlineHtml("</a>".into()));
                            processed.push(events[i].clone());
                            break;
                        }
                        processed.push(events[i].clone());
                        i += 1;
                    }
                }
            }
            ev => {
                processed.push(ev.clone());
            }
        }
        i += 1;
    }

    let mut out = String::new();
    html::push_html(&mut out, processed.into_iter());

    out
}

fn rewrite_targets<'a>(event: Event<'a>, rewriter: &LinkRewriter) -> Event<'a> {
    match event {
        Event::Start(Tag::Link {
            link_type,
            dest_url,
            title,
            id,
        }) => Event::Start(Tag::Link {
            link_type,
            dest_url: rewriter.rewrite(&dest_url).into(),
            title,
            id,
        }),
        Event::Start(Tag::Image {
            link_type,
            dest_url,
            title,
            id,
        }) => Event::Start(Tag::Image {
            link_type,
            dest_url: rewriter.rewrite(&dest_url).into(),
            title,
            id,
        }),
        other => other,
    }
}

fn highlight_block(lang: &str, code: &str, highlight: Option<&SyntaxHighlight>) -> String {
    let escaped = || {
        format!(
            "<pre><code>{}</code></pre>",
            html_escape::encode_text(code)
        )
    };

    let Some(config) = highlight else {
        return escaped();
    };

    let syntax = SYNTAX_SET.find_syntax_by_token(lang).or_else(|| {
        // Fallback mappings for languages the default set doesn't know
        match lang {
            "nix" => SYNTAX_SET.find_syntax_by_name("JavaScript"),
            "toml" => SYNTAX_SET.find_syntax_by_name("YAML"),
            _ => None,
        }
    });

    match (syntax, THEME_SET.themes.get(&config.theme)) {
        (Some(syntax), Some(theme)) => {
            highlighted_html_for_string(code, &SYNTAX_SET, syntax, theme)
                .unwrap_or_else(|_| escaped())
        }
        _ => escaped(),
    }
}

// Explicit `{#id}` attributes pass through untouched; generated slugs get
// a numeric suffix when a document repeats a heading. Shared by the
// renderer and by `page_headings` so outlines always point at real ids.
fn heading_slug(explicit: Option<&str>, text: &str, seen: &mut HashMap<String, usize>) -> String {
    if let Some(id) = explicit {
        seen.entry(id.to_string()).or_insert(0);
        return id.to_string();
    }

    let base = slugify(text);
    match seen.get(&base).copied() {
        None => {
            seen.insert(base.clone(), 0);
            base
        }
        Some(n) => {
            let next = n + 1;
            seen.insert(base.clone(), next);
            let slug = format!("{base}-{next}");
            seen.entry(slug.clone()).or_insert(0);
            slug
        }
    }
}

fn heading_text(events: &[Event]) -> String {
    let mut text = String::new();

    for event in events {
        match event {
            Event::End(TagEnd::Heading(_)) => break,
            Event::Text(t) => text.push_str(t),
            Event::Code(code) => text.push_str(code),
            _ => {}
        }
    }

    text
}

/// Turn heading text into a URL-safe fragment id.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_dash = false;

    for c in text.chars() {
        if c.is_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            slug.extend(c.to_lowercase());
            pending_dash = false;
        } else {
            pending_dash = true;
        }
    }

    slug
}

#[derive(Debug, Clone)]
pub struct Heading {
    pub level: u32,
    pub text: String,
    pub slug: String,
}

/// All headings of a document, in order, with the same slugs the
/// rendered page carries.
pub fn page_headings(source: &str) -> Vec<Heading> {
    let parser = Parser::new_ext(source, Options::all());

    let mut headings = Vec::new();
    let mut seen_slugs = HashMap::new();
    let mut in_heading = false;
    let mut level: u32 = 0;
    let mut explicit_id: Option<String> = None;
    let mut text = String::new();

    for event in parser {
        match event {
            Event::Start(Tag::Heading { level: l, id, .. }) => {
                in_heading = true;
                level = l as u32;
                explicit_id = id.map(|id| id.to_string());
            }
            Event::End(TagEnd::Heading(_)) => {
                if in_heading {
                    let slug = heading_slug(explicit_id.take().as_deref(), &text, &mut seen_slugs);
                    headings.push(Heading {
                        level,
                        text: std::mem::take(&mut text),
                        slug,
                    });
                    in_heading = false;
                }
            }
            Event::Text(t) if in_heading => text.push_str(&t),
            Event::Code(code) if in_heading => text.push_str(&code),
            _ => {}
        }
    }

    headings
}

/// The first heading of a document, which by convention is its title.
pub fn page_title(source: &str) -> Option<String> {
    page_headings(source).into_iter().next().map(|h| h.text)
}
