//! Markdown lexing.
//!
//! The renderer only depends on the [`Lexer`] trait. [`CmarkLexer`] is the
//! stock implementation: it drives pulldown-cmark with offsets and folds the
//! event stream into the [`Token`] tree.

mod blocks;
mod inline;
mod items;

use pulldown_cmark::Options;
use serde::{Deserialize, Serialize};

use crate::tokens::Token;

/// Turns markdown source into a token sequence.
///
/// Implementations must be total: malformed input yields some (possibly
/// empty) token sequence, never an error.
pub trait Lexer {
    fn lex(&self, markdown: &str) -> Vec<Token>;
}

impl<F> Lexer for F
where
    F: Fn(&str) -> Vec<Token>,
{
    fn lex(&self, markdown: &str) -> Vec<Token> {
        self(markdown)
    }
}

/// Markdown extensions recognised on top of CommonMark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LexerOptions {
    pub tables: bool,
    pub strikethrough: bool,
    pub tasklists: bool,
    pub footnotes: bool,
    pub math: bool,
}

impl Default for LexerOptions {
    fn default() -> Self {
        Self {
            tables: true,
            strikethrough: true,
            tasklists: true,
            footnotes: true,
            math: true,
        }
    }
}

impl LexerOptions {
    fn parser_options(&self) -> Options {
        let mut options = Options::empty();
        options.set(Options::ENABLE_TABLES, self.tables);
        options.set(Options::ENABLE_STRIKETHROUGH, self.strikethrough);
        options.set(Options::ENABLE_TASKLISTS, self.tasklists);
        options.set(Options::ENABLE_FOOTNOTES, self.footnotes);
        options.set(Options::ENABLE_MATH, self.math);
        options
    }
}

/// Lexer backed by pulldown-cmark.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CmarkLexer {
    options: LexerOptions,
}

impl CmarkLexer {
    pub fn new(options: LexerOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> LexerOptions {
        self.options
    }
}

impl Lexer for CmarkLexer {
    fn lex(&self, markdown: &str) -> Vec<Token> {
        blocks::lex_blocks(markdown, self.options.parser_options())
    }
}

/// Lex with the default extension set.
pub fn lex(markdown: &str) -> Vec<Token> {
    CmarkLexer::default().lex(markdown)
}
