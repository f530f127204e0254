//! Markdown rendering for the viewer/editor widgets.
//!
//! pulldown-cmark does the parsing, syntect highlights fenced code blocks,
//! and `$...$` / `$$...$$` spans are passed through as raw HTML so the
//! KaTeX auto-renderer loaded in `index.html` can typeset them. Math
//! typesetting itself stays external to this crate.

use pulldown_cmark::{html::push_html, CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd};
use std::sync::OnceLock;
use syntect::highlighting::{Theme, ThemeSet};
use syntect::html::highlighted_html_for_string;
use syntect::parsing::SyntaxSet;

static SYNTAX_SET: OnceLock<SyntaxSet> = OnceLock::new();
static THEME_SET: OnceLock<ThemeSet> = OnceLock::new();

fn syntax_set() -> &'static SyntaxSet {
    SYNTAX_SET.get_or_init(SyntaxSet::load_defaults_newlines)
}

fn theme() -> Option<&'static Theme> {
    THEME_SET
        .get_or_init(ThemeSet::load_defaults)
        .themes
        .get("InspiredGitHub")
}

/// Render markdown to HTML with code highlighting and math passthrough.
pub fn render_markdown(text: &str) -> String {
    let parser = Parser::new_ext(text, options());
    let events = transform_events(parser);
    let mut html = String::new();
    push_html(&mut html, events.into_iter());
    html
}

fn options() -> Options {
    Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TABLES | Options::ENABLE_TASKLISTS
}

/// Rewrite the event stream: buffer fenced code blocks for highlighting and
/// split text runs containing `$` into raw math segments.
fn transform_events(parser: Parser<'_>) -> Vec<Event<'static>> {
    let mut events = Vec::new();
    let mut code: Option<(Option<String>, String)> = None;

    for event in parser {
        match code {
            None => match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    let lang = match kind {
                        CodeBlockKind::Fenced(lang) if !lang.is_empty() => Some(lang.to_string()),
                        _ => None,
                    };
                    code = Some((lang, String::new()));
                }
                Event::Text(text) => {
                    if text.contains('$') {
                        events.extend(split_math(&text));
                    } else {
                        events.push(Event::Text(CowStr::from(text.to_string())));
                    }
                }
                other => events.push(owned_event(other)),
            },
            Some((ref lang, ref mut content)) => match event {
                Event::Text(text) => content.push_str(&text),
                Event::End(TagEnd::CodeBlock) => {
                    let html = highlight_code(content, lang.as_deref());
                    events.push(Event::Html(CowStr::from(html)));
                    code = None;
                }
                _ => {}
            },
        }
    }

    events
}

// pulldown events borrow from the input; the buffered code-block path needs
// owned events, so everything is detached up front.
fn owned_event(event: Event<'_>) -> Event<'static> {
    match event {
        Event::Html(s) => Event::Html(CowStr::from(s.to_string())),
        Event::InlineHtml(s) => Event::InlineHtml(CowStr::from(s.to_string())),
        Event::Text(s) => Event::Text(CowStr::from(s.to_string())),
        Event::Code(s) => Event::Code(CowStr::from(s.to_string())),
        Event::FootnoteReference(s) => Event::FootnoteReference(CowStr::from(s.to_string())),
        Event::Start(tag) => Event::Start(owned_tag(tag)),
        Event::End(tag) => Event::End(tag),
        Event::SoftBreak => Event::SoftBreak,
        Event::HardBreak => Event::HardBreak,
        Event::Rule => Event::Rule,
        Event::TaskListMarker(checked) => Event::TaskListMarker(checked),
    }
}

fn owned_tag(tag: Tag<'_>) -> Tag<'static> {
    match tag {
        Tag::Paragraph => Tag::Paragraph,
        Tag::Heading {
            level,
            id,
            classes,
            attrs,
        } => Tag::Heading {
            level,
            id: id.map(|s| CowStr::from(s.to_string())),
            classes: classes
                .into_iter()
                .map(|s| CowStr::from(s.to_string()))
                .collect(),
            attrs: attrs
                .into_iter()
                .map(|(k, v)| {
                    (
                        CowStr::from(k.to_string()),
                        v.map(|s| CowStr::from(s.to_string())),
                    )
                })
                .collect(),
        },
        Tag::BlockQuote => Tag::BlockQuote,
        Tag::CodeBlock(kind) => Tag::CodeBlock(match kind {
            CodeBlockKind::Fenced(lang) => CodeBlockKind::Fenced(CowStr::from(lang.to_string())),
            CodeBlockKind::Indented => CodeBlockKind::Indented,
        }),
        Tag::HtmlBlock => Tag::HtmlBlock,
        Tag::List(start) => Tag::List(start),
        Tag::Item => Tag::Item,
        Tag::FootnoteDefinition(s) => Tag::FootnoteDefinition(CowStr::from(s.to_string())),
        Tag::Table(alignments) => Tag::Table(alignments),
        Tag::TableHead => Tag::TableHead,
        Tag::TableRow => Tag::TableRow,
        Tag::TableCell => Tag::TableCell,
        Tag::Emphasis => Tag::Emphasis,
        Tag::Strong => Tag::Strong,
        Tag::Strikethrough => Tag::Strikethrough,
        Tag::Link {
            link_type,
            dest_url,
            title,
            id,
        } => Tag::Link {
            link_type,
            dest_url: CowStr::from(dest_url.to_string()),
            title: CowStr::from(title.to_string()),
            id: CowStr::from(id.to_string()),
        },
        Tag::Image {
            link_type,
            dest_url,
            title,
            id,
        } => Tag::Image {
            link_type,
            dest_url: CowStr::from(dest_url.to_string()),
            title: CowStr::from(title.to_string()),
            id: CowStr::from(id.to_string()),
        },
        Tag::MetadataBlock(kind) => Tag::MetadataBlock(kind),
    }
}

/// Split a text run around `$...$` and `$$...$$` spans. Matched spans are
/// emitted as raw HTML (delimiters included) so push_html does not escape
/// them and KaTeX can find them later; unmatched delimiters stay literal.
fn split_math(text: &str) -> Vec<Event<'static>> {
    let mut events = Vec::new();
    let mut rest = text;

    while let Some(pos) = rest.find('$') {
        if pos > 0 {
            events.push(Event::Text(CowStr::from(rest[..pos].to_string())));
        }
        rest = &rest[pos..];

        let display = rest.starts_with("$$");
        let delim = if display { "$$" } else { "$" };
        let body = &rest[delim.len()..];

        match body.find(delim) {
            Some(end) => {
                let span = format!("{delim}{}{delim}", &body[..end]);
                events.push(Event::Html(CowStr::from(span)));
                rest = &body[end + delim.len()..];
            }
            None => {
                // No closer: keep the delimiter as plain text.
                events.push(Event::Text(CowStr::from(delim.to_string())));
                rest = body;
            }
        }
    }

    if !rest.is_empty() {
        events.push(Event::Text(CowStr::from(rest.to_string())));
    }
    events
}

fn highlight_code(code: &str, lang: Option<&str>) -> String {
    let ss = syntax_set();
    let syntax = lang
        .and_then(|l| ss.find_syntax_by_token(l))
        .unwrap_or_else(|| ss.find_syntax_plain_text());

    theme()
        .and_then(|theme| highlighted_html_for_string(code, ss, syntax, theme).ok())
        .unwrap_or_else(|| format!("<pre><code>{}</code></pre>", escape_html(code)))
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Ask the KaTeX auto-renderer to typeset the element behind `selector`.
/// The renderer is loaded from a CDN, so this polls until it shows up.
pub fn trigger_math_render(selector: &str) {
    use gloo_timers::future::TimeoutFuture;
    use leptos::task::spawn_local;

    let selector = selector.to_string();
    spawn_local(async move {
        for _ in 0..50 {
            let ready = js_sys::eval("typeof window.renderMathInElement === 'function'")
                .ok()
                .and_then(|v| v.as_bool())
                .unwrap_or(false);
            if ready {
                let js = format!(
                    r#"(function() {{
                        var el = document.querySelector('{selector}');
                        if (!el) return;
                        try {{
                            window.renderMathInElement(el, {{
                                delimiters: [
                                    {{left: '$$', right: '$$', display: true}},
                                    {{left: '$', right: '$', display: false}},
                                    {{left: '\\(', right: '\\)', display: false}},
                                    {{left: '\\[', right: '\\]', display: true}}
                                ],
                                throwOnError: false
                            }});
                        }} catch (e) {{
                            console.error('KaTeX render error:', e);
                        }}
                    }})();"#
                );
                let _ = js_sys::eval(&js);
                return;
            }
            TimeoutFuture::new(200).await;
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_markdown() {
        let html = render_markdown("**bold** and *italic*");
        assert!(html.contains("<strong>bold</strong>"));
        assert!(html.contains("<em>italic</em>"));
    }

    #[test]
    fn test_gfm_extensions_enabled() {
        let html = render_markdown("~~gone~~\n\n- [x] done");
        assert!(html.contains("<del>gone</del>"));
        assert!(html.contains("checkbox"));
    }

    #[test]
    fn test_inline_math_passes_through_unescaped() {
        let html = render_markdown("mass energy: $E=mc^2$");
        assert!(html.contains("$E=mc^2$"));
    }

    #[test]
    fn test_display_math_passes_through() {
        let html = render_markdown("$$x^2 + y^2 = z^2$$");
        assert!(html.contains("$$x^2 + y^2 = z^2$$"));
    }

    #[test]
    fn test_unmatched_dollar_stays_literal() {
        let html = render_markdown("price is $5 today");
        assert!(html.contains("$"));
        assert!(html.contains("5 today"));
    }

    #[test]
    fn test_fenced_code_is_highlighted() {
        let html = render_markdown("```rust\nfn main() {}\n```");
        assert!(html.contains("<pre"));
        assert!(html.contains("main"));
    }

    #[test]
    fn test_plain_fence_falls_back_to_plain_text() {
        let html = render_markdown("```\njust text\n```");
        assert!(html.contains("<pre"));
        assert!(html.contains("just text"));
    }

    #[test]
    fn test_split_math_mixed_run() {
        let events = split_math("a $x$ b");
        assert_eq!(events.len(), 3);
        assert_eq!(events[1], Event::Html(CowStr::from("$x$")));
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("<a & \"b\">"), "&lt;a &amp; &quot;b&quot;&gt;");
    }
}
