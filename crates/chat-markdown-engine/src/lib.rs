pub mod actions;
pub mod lexing;
pub mod navigation;
pub mod rendering;
pub mod tokens;

// Re-export key types for easier usage
pub use actions::*;
pub use lexing::{CmarkLexer, Lexer, LexerOptions, lex};
pub use navigation::{NavigationError, Navigator, SystemBrowser};
pub use rendering::{
    CodeBlockNode, ListItemNode, ListNode, Node, RenderOptions, Renderer, Source, TableCellNode,
    TableNode, TableRow, render_markdown, to_html,
};
pub use tokens::*;
