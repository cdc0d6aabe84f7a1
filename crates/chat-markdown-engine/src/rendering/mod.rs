//! Token rendering.
//!
//! [`Renderer`] maps tokens to [`Node`] trees. Rendering is a pure function
//! of its input: list items re-enter the lexer with their markdown text and
//! are rendered nested, so container depth is limited only by the lexer and
//! the configured nesting guard.

mod html;
mod node;

pub use html::to_html;
pub use node::{
    CodeBlockNode, ListItemNode, ListNode, Node, TableCellNode, TableNode, TableRow,
};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::lexing::{CmarkLexer, Lexer};
use crate::tokens::{Align, ListItem, TableCell, Token};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// How many levels of nested list markdown are rendered before the
    /// remaining source is shown as a fallback.
    pub max_nesting_depth: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            max_nesting_depth: 32,
        }
    }
}

/// Renderer input: a lexed token or markdown still to be lexed.
#[derive(Debug, Clone, Copy)]
pub enum Source<'a> {
    Token(&'a Token),
    Markdown(&'a str),
}

impl<'a> From<&'a Token> for Source<'a> {
    fn from(token: &'a Token) -> Self {
        Source::Token(token)
    }
}

impl<'a> From<&'a str> for Source<'a> {
    fn from(markdown: &'a str) -> Self {
        Source::Markdown(markdown)
    }
}

impl<'a> From<&'a String> for Source<'a> {
    fn from(markdown: &'a String) -> Self {
        Source::Markdown(markdown)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Renderer<L = CmarkLexer> {
    lexer: L,
    options: RenderOptions,
}

impl<L: Lexer> Renderer<L> {
    pub fn new(lexer: L, options: RenderOptions) -> Self {
        Self { lexer, options }
    }

    pub fn lexer(&self) -> &L {
        &self.lexer
    }

    /// Render a token, or lex and render a markdown string.
    ///
    /// `nested` suppresses the paragraph wrapper so content embedded in a
    /// list item does not introduce extra block boundaries.
    pub fn render<'a>(&self, source: impl Into<Source<'a>>, nested: bool) -> Node {
        match source.into() {
            Source::Token(token) => self.render_token(token, nested, 0),
            Source::Markdown(markdown) => self.render_markdown(markdown, nested, 0),
        }
    }

    /// Render an already-lexed token sequence as siblings.
    pub fn render_tokens(&self, tokens: &[Token], nested: bool) -> Node {
        Node::Fragment(
            tokens
                .iter()
                .map(|token| self.render_token(token, nested, 0))
                .collect(),
        )
    }

    fn render_markdown(&self, markdown: &str, nested: bool, depth: usize) -> Node {
        if depth > self.options.max_nesting_depth {
            debug!("nesting depth {depth} exceeded, showing source as fallback");
            return Node::Unknown {
                kind: "nesting".to_string(),
                raw: markdown.to_string(),
            };
        }
        let tokens = self.lexer.lex(markdown);
        Node::Fragment(
            tokens
                .iter()
                .map(|token| self.render_token(token, nested, depth))
                .collect(),
        )
    }

    fn render_token(&self, token: &Token, nested: bool, depth: usize) -> Node {
        match token {
            Token::Space { raw } => Node::Whitespace(raw.clone()),
            // The language hint is left to the host to detect.
            Token::Code { text, .. } => Node::CodeBlock(CodeBlockNode::new(text.as_str())),
            Token::Heading {
                depth: level, text, ..
            } => Node::Heading {
                depth: (*level).clamp(1, 6),
                text: text.clone(),
            },
            Token::Table {
                header,
                align,
                rows,
                ..
            } => Node::Table(TableNode {
                header: table_row(header, align),
                rows: rows.iter().map(|row| table_row(row, align)).collect(),
            }),
            Token::Hr { .. } => Node::Rule,
            Token::Blockquote { text, .. } => Node::Blockquote(text.clone()),
            Token::List {
                ordered,
                start,
                items,
                ..
            } => Node::List(ListNode {
                ordered: *ordered,
                start: start.filter(|start| *start != 0),
                items: items
                    .iter()
                    .map(|item| self.render_list_item(item, depth))
                    .collect(),
            }),
            Token::Paragraph { tokens, .. } => {
                let children = tokens
                    .iter()
                    .map(|child| self.render_token(child, false, depth))
                    .collect();
                if nested {
                    Node::Fragment(children)
                } else {
                    Node::Paragraph(children)
                }
            }
            Token::Html { raw, .. } => Node::RawHtml(raw.clone()),
            Token::Text { raw, .. } | Token::Escape { raw, .. } => Node::Text(raw.clone()),
            Token::Def { .. } => Node::Empty,
            Token::Link {
                href, title, text, ..
            } => Node::Link {
                href: href.clone(),
                title: title.clone(),
                text: text.clone(),
            },
            Token::Image {
                href, title, text, ..
            } => Node::Image {
                src: href.clone(),
                alt: text.clone(),
                title: title.clone(),
            },
            Token::Strong { text, .. } => Node::Strong(text.clone()),
            Token::Em { text, .. } => Node::Emphasis(text.clone()),
            Token::Codespan { text, .. } => Node::InlineCode(text.clone()),
            Token::Br { .. } => Node::LineBreak,
            Token::Del { text, .. } => Node::Strikethrough(text.clone()),
            Token::Unknown { kind, raw } => {
                debug!("rendering fallback for unknown token kind {kind:?}");
                Node::Unknown {
                    kind: kind.clone(),
                    raw: raw.clone(),
                }
            }
        }
    }

    fn render_list_item(&self, item: &ListItem, depth: usize) -> ListItemNode {
        let mut content = Vec::new();
        flatten_into(self.render_markdown(&item.text, true, depth + 1), &mut content);
        ListItemNode {
            checkbox: item.task.then_some(item.checked.unwrap_or(false)),
            content,
        }
    }
}

/// Splice fragments into their parent so item content is a flat sibling list.
fn flatten_into(node: Node, out: &mut Vec<Node>) {
    match node {
        Node::Fragment(children) => {
            for child in children {
                flatten_into(child, out);
            }
        }
        Node::Empty => {}
        other => out.push(other),
    }
}

/// Cells take their column's alignment; columns without one are left aligned.
fn table_row(cells: &[TableCell], align: &[Option<Align>]) -> TableRow {
    TableRow {
        cells: cells
            .iter()
            .enumerate()
            .map(|(column, cell)| TableCellNode {
                text: cell.text.clone(),
                align: align.get(column).copied().flatten().unwrap_or_default(),
            })
            .collect(),
    }
}

/// Lex and render markdown with the default lexer and options.
pub fn render_markdown(markdown: &str) -> Node {
    Renderer::<CmarkLexer>::default().render(markdown, false)
}
