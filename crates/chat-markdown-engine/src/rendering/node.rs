use crate::tokens::Align;

/// A code block as displayed: the code text that copy and apply act on.
///
/// Hosts attach one [`CodeBlockController`](crate::actions::CodeBlockController)
/// to each displayed instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeBlockNode {
    pub code: String,
}

impl CodeBlockNode {
    pub fn new(code: impl Into<String>) -> Self {
        Self { code: code.into() }
    }

    /// Single-line blocks get compact action buttons.
    pub fn is_single_line(&self) -> bool {
        !self.code.contains('\n')
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableCellNode {
    pub text: String,
    pub align: Align,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub cells: Vec<TableCellNode>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableNode {
    pub header: TableRow,
    pub rows: Vec<TableRow>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListItemNode {
    /// Read-only task checkbox state; `None` for plain items.
    pub checkbox: Option<bool>,
    pub content: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListNode {
    pub ordered: bool,
    /// First ordinal, only set when it should override default numbering.
    pub start: Option<u64>,
    pub items: Vec<ListItemNode>,
}

/// A renderable element produced from one token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Siblings with no wrapper, in source order.
    Fragment(Vec<Node>),
    /// Renders nothing.
    Empty,
    Whitespace(String),
    Text(String),
    CodeBlock(CodeBlockNode),
    Heading {
        depth: u8,
        text: String,
    },
    Table(TableNode),
    Rule,
    Blockquote(String),
    List(ListNode),
    Paragraph(Vec<Node>),
    /// Raw HTML shown as literal text, never as markup.
    RawHtml(String),
    Link {
        href: String,
        title: Option<String>,
        text: String,
    },
    Image {
        src: String,
        alt: String,
        title: Option<String>,
    },
    Strong(String),
    Emphasis(String),
    InlineCode(String),
    LineBreak,
    Strikethrough(String),
    /// Visible stand-in for a token kind with no dedicated rendering.
    Unknown {
        kind: String,
        raw: String,
    },
}

impl Node {
    /// Variant name in snake case.
    pub fn kind(&self) -> &'static str {
        match self {
            Node::Fragment(_) => "fragment",
            Node::Empty => "empty",
            Node::Whitespace(_) => "whitespace",
            Node::Text(_) => "text",
            Node::CodeBlock(_) => "code_block",
            Node::Heading { .. } => "heading",
            Node::Table(_) => "table",
            Node::Rule => "rule",
            Node::Blockquote(_) => "blockquote",
            Node::List(_) => "list",
            Node::Paragraph(_) => "paragraph",
            Node::RawHtml(_) => "raw_html",
            Node::Link { .. } => "link",
            Node::Image { .. } => "image",
            Node::Strong(_) => "strong",
            Node::Emphasis(_) => "emphasis",
            Node::InlineCode(_) => "inline_code",
            Node::LineBreak => "line_break",
            Node::Strikethrough(_) => "strikethrough",
            Node::Unknown { .. } => "unknown",
        }
    }

    /// Visit this node and all its descendants depth-first.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a Node)) {
        visit(self);
        match self {
            Node::Fragment(children) | Node::Paragraph(children) => {
                for child in children {
                    child.walk(visit);
                }
            }
            Node::List(list) => {
                for item in &list.items {
                    for child in &item.content {
                        child.walk(visit);
                    }
                }
            }
            _ => {}
        }
    }

    /// Every code block in the tree, in document order.
    pub fn code_blocks(&self) -> Vec<&CodeBlockNode> {
        let mut blocks = Vec::new();
        self.walk(&mut |node| {
            if let Node::CodeBlock(block) = node {
                blocks.push(block);
            }
        });
        blocks
    }
}
