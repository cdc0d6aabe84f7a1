use log::debug;
use pulldown_cmark::{Event, Tag};

use super::blocks::{Spanned, children, container_end, inner_text, slice};
use crate::tokens::Token;

/// Lex the events of a paragraph into inline tokens.
pub(super) fn lex_inline(source: &str, events: &[Spanned]) -> Vec<Token> {
    let mut builder = InlineBuilder::default();
    let mut index = 0;
    while index < events.len() {
        let end = container_end(events, index);
        let (event, range) = &events[index];
        let raw = slice(source, range);
        let inner = children(events, index, end);

        match event {
            Event::Text(text) if is_escape(raw, text) => builder.push(Token::Escape {
                raw: raw.to_string(),
                text: text.to_string(),
            }),
            Event::Text(text) => builder.push_text(raw, text),
            Event::SoftBreak => builder.push_text(raw, "\n"),
            Event::HardBreak => builder.push(Token::Br {
                raw: raw.to_string(),
            }),
            Event::Code(code) => builder.push(Token::Codespan {
                raw: raw.to_string(),
                text: code.to_string(),
            }),
            Event::InlineHtml(html) | Event::Html(html) => builder.push(Token::Html {
                raw: raw.to_string(),
                text: html.to_string(),
            }),
            Event::InlineMath(_) | Event::DisplayMath(_) => builder.push(unknown("math", raw)),
            Event::FootnoteReference(_) => builder.push(unknown("footnote_ref", raw)),
            // Task markers belong to the enclosing list item, not the text.
            Event::TaskListMarker(_) => {}
            Event::Start(Tag::Strong) => builder.push(Token::Strong {
                raw: raw.to_string(),
                text: inner_text(source, inner),
            }),
            Event::Start(Tag::Emphasis) => builder.push(Token::Em {
                raw: raw.to_string(),
                text: inner_text(source, inner),
            }),
            Event::Start(Tag::Strikethrough) => builder.push(Token::Del {
                raw: raw.to_string(),
                text: inner_text(source, inner),
            }),
            Event::Start(Tag::Link {
                dest_url, title, ..
            }) => builder.push(Token::Link {
                raw: raw.to_string(),
                href: dest_url.to_string(),
                title: non_empty(title),
                text: inner_text(source, inner),
            }),
            Event::Start(Tag::Image {
                dest_url, title, ..
            }) => builder.push(Token::Image {
                raw: raw.to_string(),
                href: dest_url.to_string(),
                title: non_empty(title),
                text: inner_text(source, inner),
            }),
            Event::Start(tag) => {
                debug!("no token kind for inline tag {tag:?}");
                builder.push(unknown("inline", raw));
            }
            _ => {}
        }

        index = end + 1;
    }
    builder.tokens
}

#[derive(Default)]
struct InlineBuilder {
    tokens: Vec<Token>,
    /// Whether the last token is text that following text may extend.
    text_open: bool,
}

impl InlineBuilder {
    fn push(&mut self, token: Token) {
        self.text_open = false;
        self.tokens.push(token);
    }

    /// pulldown-cmark splits text runs at entity and delimiter boundaries;
    /// contiguous runs are folded back into one token.
    fn push_text(&mut self, raw: &str, text: &str) {
        if self.text_open
            && let Some(Token::Text {
                raw: last_raw,
                text: last_text,
            }) = self.tokens.last_mut()
        {
            last_raw.push_str(raw);
            last_text.push_str(text);
        } else {
            self.tokens.push(Token::Text {
                raw: raw.to_string(),
                text: text.to_string(),
            });
        }
        self.text_open = true;
    }
}

fn is_escape(raw: &str, text: &str) -> bool {
    raw.len() > 1 && raw.strip_prefix('\\') == Some(text)
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

fn unknown(kind: &str, raw: &str) -> Token {
    Token::Unknown {
        kind: kind.to_string(),
        raw: raw.to_string(),
    }
}
