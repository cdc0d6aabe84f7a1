use std::ops::Range;

use log::debug;
use pulldown_cmark::{Alignment, CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag};

use super::inline::lex_inline;
use super::items::{item_text, strip_quote_markers};
use crate::tokens::{Align, ListItem, TableCell, Token};

/// An event together with the byte range of source it covers.
pub(super) type Spanned<'a> = (Event<'a>, Range<usize>);

/// Lex `source` into top-level block tokens.
pub(super) fn lex_blocks(source: &str, options: Options) -> Vec<Token> {
    let mut iter = Parser::new_ext(source, options).into_offset_iter();
    let events: Vec<Spanned> = iter.by_ref().collect();
    let definitions: Vec<(Range<usize>, Token)> = iter
        .reference_definitions()
        .iter()
        .map(|(label, def)| {
            let token = Token::Def {
                raw: slice(source, &def.span).trim_end().to_string(),
                tag: label.to_string(),
                href: def.dest.to_string(),
                title: def.title.as_ref().map(|title| title.to_string()),
            };
            (def.span.clone(), token)
        })
        .collect();

    let mut blocks = Vec::new();
    let mut index = 0;
    while index < events.len() {
        let end = container_end(&events, index);
        let (event, range) = &events[index];
        let inner = children(&events, index, end);
        if let Some(token) = block_token(source, event, range, inner) {
            blocks.push((range.clone(), token));
        }
        index = end + 1;
    }

    // Definitions inside container blocks are part of that block's raw text.
    for (span, token) in definitions {
        let nested = blocks
            .iter()
            .any(|(range, _)| range.start <= span.start && span.start < range.end);
        if !nested {
            blocks.push((span, token));
        }
    }
    blocks.sort_by_key(|(range, _)| range.start);

    with_spaces(source, blocks)
}

/// Index of the event closing the container opened at `start`.
///
/// Leaf events close themselves. An unbalanced stream (which pulldown-cmark
/// never produces) is treated as running to the end.
pub(super) fn container_end(events: &[Spanned], start: usize) -> usize {
    if !matches!(events[start].0, Event::Start(_)) {
        return start;
    }
    let mut depth = 0usize;
    for (offset, (event, _)) in events[start..].iter().enumerate() {
        match event {
            Event::Start(_) => depth += 1,
            Event::End(_) => {
                depth -= 1;
                if depth == 0 {
                    return start + offset;
                }
            }
            _ => {}
        }
    }
    events.len() - 1
}

/// Events strictly between a container's start (`start`) and end (`end`).
pub(super) fn children<'e, 'a>(
    events: &'e [Spanned<'a>],
    start: usize,
    end: usize,
) -> &'e [Spanned<'a>] {
    if end > start {
        &events[start + 1..end]
    } else {
        &[]
    }
}

pub(super) fn slice<'s>(source: &'s str, range: &Range<usize>) -> &'s str {
    source.get(range.clone()).unwrap_or_default()
}

/// Source text spanned by a container's children, without its delimiters.
pub(super) fn inner_text(source: &str, inner: &[Spanned]) -> String {
    let start = inner.iter().map(|(_, range)| range.start).min();
    let end = inner.iter().map(|(_, range)| range.end).max();
    match (start, end) {
        (Some(start), Some(end)) => slice(source, &(start..end)).to_string(),
        _ => String::new(),
    }
}

fn block_token(
    source: &str,
    event: &Event,
    range: &Range<usize>,
    inner: &[Spanned],
) -> Option<Token> {
    let raw = slice(source, range).to_string();
    let token = match event {
        Event::Start(Tag::Paragraph) => Token::Paragraph {
            text: raw.trim_end_matches('\n').to_string(),
            tokens: lex_inline(source, inner),
            raw,
        },
        Event::Start(Tag::Heading { level, .. }) => Token::Heading {
            depth: heading_depth(*level),
            text: inner_text(source, inner).trim().to_string(),
            raw,
        },
        Event::Start(Tag::CodeBlock(kind)) => Token::Code {
            lang: code_language(kind),
            text: code_text(inner),
            raw,
        },
        Event::Start(Tag::Table(alignments)) => table_token(source, raw, alignments, inner),
        Event::Rule => Token::Hr { raw },
        Event::Start(Tag::BlockQuote(_)) => Token::Blockquote {
            text: strip_quote_markers(&raw),
            raw,
        },
        Event::Start(Tag::List(start)) => Token::List {
            ordered: start.is_some(),
            start: *start,
            items: list_items(source, inner),
            raw,
        },
        Event::Start(Tag::HtmlBlock) | Event::Html(_) => Token::Html {
            text: raw.clone(),
            raw,
        },
        Event::Start(Tag::FootnoteDefinition(_)) => Token::Unknown {
            kind: "footnote".to_string(),
            raw,
        },
        Event::Start(tag) => {
            debug!("no token kind for block tag {tag:?}");
            Token::Unknown {
                kind: "block".to_string(),
                raw,
            }
        }
        Event::End(_) => return None,
        // Inline-level events are not expected at the top level; keep them
        // visible rather than losing text.
        Event::Text(text) => Token::Text {
            text: text.to_string(),
            raw,
        },
        other => {
            debug!("no token kind for top-level event {other:?}");
            Token::Unknown {
                kind: "block".to_string(),
                raw,
            }
        }
    };
    Some(token)
}

fn heading_depth(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

fn code_language(kind: &CodeBlockKind) -> Option<String> {
    match kind {
        CodeBlockKind::Fenced(info) => info.split_whitespace().next().map(str::to_string),
        CodeBlockKind::Indented => None,
    }
}

fn code_text(inner: &[Spanned]) -> String {
    let mut text = String::new();
    for (event, _) in inner {
        if let Event::Text(chunk) = event {
            text.push_str(chunk);
        }
    }
    if text.ends_with('\n') {
        text.pop();
    }
    text
}

fn table_token(
    source: &str,
    raw: String,
    alignments: &[Alignment],
    inner: &[Spanned],
) -> Token {
    let mut header = Vec::new();
    let mut rows = Vec::new();

    let mut index = 0;
    while index < inner.len() {
        let end = container_end(inner, index);
        let cells = children(inner, index, end);
        match &inner[index].0 {
            Event::Start(Tag::TableHead) => header = table_cells(source, cells),
            Event::Start(Tag::TableRow) => rows.push(table_cells(source, cells)),
            _ => {}
        }
        index = end + 1;
    }

    Token::Table {
        raw,
        header,
        align: alignments.iter().map(alignment).collect(),
        rows,
    }
}

fn table_cells(source: &str, row: &[Spanned]) -> Vec<TableCell> {
    let mut cells = Vec::new();
    let mut index = 0;
    while index < row.len() {
        let end = container_end(row, index);
        if let Event::Start(Tag::TableCell) = row[index].0 {
            let inner = children(row, index, end);
            cells.push(TableCell {
                raw: inner_text(source, inner).trim().to_string(),
                text: cell_text(inner),
            });
        }
        index = end + 1;
    }
    cells
}

/// Cell content with inline markup dropped and escapes resolved.
fn cell_text(inner: &[Spanned]) -> String {
    let text: String = inner
        .iter()
        .filter_map(|(event, _)| match event {
            Event::Text(text)
            | Event::Code(text)
            | Event::InlineHtml(text)
            | Event::InlineMath(text)
            | Event::DisplayMath(text) => Some(text.as_ref()),
            _ => None,
        })
        .collect();
    text.trim().to_string()
}

fn alignment(alignment: &Alignment) -> Option<Align> {
    match alignment {
        Alignment::None => None,
        Alignment::Left => Some(Align::Left),
        Alignment::Center => Some(Align::Center),
        Alignment::Right => Some(Align::Right),
    }
}

fn list_items(source: &str, inner: &[Spanned]) -> Vec<ListItem> {
    let mut items = Vec::new();
    let mut index = 0;
    while index < inner.len() {
        let end = container_end(inner, index);
        if let (Event::Start(Tag::Item), range) = &inner[index] {
            let checked = task_marker(children(inner, index, end));
            let raw = slice(source, range);
            items.push(ListItem {
                raw: raw.to_string(),
                task: checked.is_some(),
                checked,
                text: item_text(source, range, checked.is_some()),
            });
        }
        index = end + 1;
    }
    items
}

/// The item's own task marker; markers of nested lists are ignored.
fn task_marker(item: &[Spanned]) -> Option<bool> {
    for (event, _) in item {
        match event {
            Event::TaskListMarker(checked) => return Some(*checked),
            Event::Start(Tag::List(_)) => return None,
            _ => {}
        }
    }
    None
}

/// Interleave `space` tokens wherever blocks are separated by a blank line.
fn with_spaces(source: &str, blocks: Vec<(Range<usize>, Token)>) -> Vec<Token> {
    let mut tokens = Vec::with_capacity(blocks.len());
    let mut cursor = 0;
    for (range, token) in blocks {
        if range.start > cursor {
            let gap = slice(source, &(cursor..range.start));
            if is_blank_gap(source, cursor, gap) {
                tokens.push(Token::Space {
                    raw: gap.to_string(),
                });
            }
        }
        cursor = cursor.max(range.end);
        tokens.push(token);
    }
    tokens
}

fn is_blank_gap(source: &str, gap_start: usize, gap: &str) -> bool {
    if !gap.trim().is_empty() {
        return false;
    }
    // The previous block may stop short of its line terminator.
    let at_line_start = gap_start == 0 || slice(source, &(0..gap_start)).ends_with('\n');
    let rest = if at_line_start {
        gap
    } else {
        gap.split_once('\n').map_or("", |(_, rest)| rest)
    };
    rest.contains('\n')
}
