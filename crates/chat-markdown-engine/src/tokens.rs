//! Lexed markdown tokens.
//!
//! Block tokens sit at the top level and inline tokens inside paragraphs.
//! List items keep their content as unparsed markdown so the renderer can
//! re-enter the lexer for nested content.

/// Column alignment declared in a table's delimiter row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

impl Align {
    pub fn as_css(&self) -> &'static str {
        match self {
            Align::Left => "left",
            Align::Center => "center",
            Align::Right => "right",
        }
    }
}

/// One cell of a table row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableCell {
    /// Source of the cell between its pipes, trimmed.
    pub raw: String,
    /// Displayed content: inline markup dropped, escapes resolved.
    pub text: String,
}

impl TableCell {
    /// A cell whose source has no markup, so `raw` and `text` agree.
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            raw: text.clone(),
            text,
        }
    }
}

/// One entry of a list token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListItem {
    pub raw: String,
    /// Whether the item starts with a task marker (`[ ]` / `[x]`).
    pub task: bool,
    pub checked: Option<bool>,
    /// Item content as markdown, with the list marker and continuation
    /// indentation removed.
    pub text: String,
}

impl ListItem {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            raw: text.clone(),
            task: false,
            checked: None,
            text,
        }
    }

    pub fn task(text: impl Into<String>, checked: bool) -> Self {
        Self {
            task: true,
            checked: Some(checked),
            ..Self::new(text)
        }
    }
}

/// A single lexed markdown token.
///
/// The set of variants is closed; anything the lexer produces that has no
/// variant of its own arrives as [`Token::Unknown`] so it can be shown
/// instead of dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Space {
        raw: String,
    },
    Code {
        raw: String,
        lang: Option<String>,
        text: String,
    },
    Heading {
        raw: String,
        depth: u8,
        text: String,
    },
    Table {
        raw: String,
        header: Vec<TableCell>,
        /// Per-column alignment. May be shorter than the header; `None`
        /// entries and missing entries both mean "not declared".
        align: Vec<Option<Align>>,
        rows: Vec<Vec<TableCell>>,
    },
    Hr {
        raw: String,
    },
    Blockquote {
        raw: String,
        text: String,
    },
    List {
        raw: String,
        ordered: bool,
        start: Option<u64>,
        items: Vec<ListItem>,
    },
    Paragraph {
        raw: String,
        text: String,
        tokens: Vec<Token>,
    },
    Html {
        raw: String,
        text: String,
    },
    Text {
        raw: String,
        text: String,
    },
    Escape {
        raw: String,
        text: String,
    },
    Def {
        raw: String,
        tag: String,
        href: String,
        title: Option<String>,
    },
    Link {
        raw: String,
        href: String,
        title: Option<String>,
        text: String,
    },
    Image {
        raw: String,
        href: String,
        title: Option<String>,
        text: String,
    },
    Strong {
        raw: String,
        text: String,
    },
    Em {
        raw: String,
        text: String,
    },
    Codespan {
        raw: String,
        text: String,
    },
    Br {
        raw: String,
    },
    Del {
        raw: String,
        text: String,
    },
    /// A construct the lexer recognised but this token set has no variant for.
    Unknown {
        kind: String,
        raw: String,
    },
}

impl Token {
    /// The discriminant name, as used in lexer output and fallback labels.
    pub fn kind(&self) -> &str {
        match self {
            Token::Space { .. } => "space",
            Token::Code { .. } => "code",
            Token::Heading { .. } => "heading",
            Token::Table { .. } => "table",
            Token::Hr { .. } => "hr",
            Token::Blockquote { .. } => "blockquote",
            Token::List { .. } => "list",
            Token::Paragraph { .. } => "paragraph",
            Token::Html { .. } => "html",
            Token::Text { .. } => "text",
            Token::Escape { .. } => "escape",
            Token::Def { .. } => "def",
            Token::Link { .. } => "link",
            Token::Image { .. } => "image",
            Token::Strong { .. } => "strong",
            Token::Em { .. } => "em",
            Token::Codespan { .. } => "codespan",
            Token::Br { .. } => "br",
            Token::Del { .. } => "del",
            Token::Unknown { kind, .. } => kind,
        }
    }

    /// The exact source text this token was lexed from.
    pub fn raw(&self) -> &str {
        match self {
            Token::Space { raw }
            | Token::Code { raw, .. }
            | Token::Heading { raw, .. }
            | Token::Table { raw, .. }
            | Token::Hr { raw }
            | Token::Blockquote { raw, .. }
            | Token::List { raw, .. }
            | Token::Paragraph { raw, .. }
            | Token::Html { raw, .. }
            | Token::Text { raw, .. }
            | Token::Escape { raw, .. }
            | Token::Def { raw, .. }
            | Token::Link { raw, .. }
            | Token::Image { raw, .. }
            | Token::Strong { raw, .. }
            | Token::Em { raw, .. }
            | Token::Codespan { raw, .. }
            | Token::Br { raw }
            | Token::Del { raw, .. }
            | Token::Unknown { raw, .. } => raw,
        }
    }

    /// Shorthand for a plain text token whose raw and text agree.
    pub fn text(text: impl Into<String>) -> Self {
        let text = text.into();
        Token::Text {
            raw: text.clone(),
            text,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_token_reports_lexer_kind() {
        let token = Token::Unknown {
            kind: "footnote".to_string(),
            raw: "[^1]: note".to_string(),
        };
        assert_eq!(token.kind(), "footnote");
        assert_eq!(token.raw(), "[^1]: note");
    }

    #[test]
    fn task_item_constructor_sets_flags() {
        let item = ListItem::task("ship it", true);
        assert!(item.task);
        assert_eq!(item.checked, Some(true));
        assert_eq!(item.text, "ship it");
    }
}
