//! Recovering the markdown source of container content.
//!
//! List items and blockquotes are handed to the renderer as markdown text,
//! so their markers and indentation are stripped here from the raw source.

use std::borrow::Cow;
use std::ops::Range;

use super::blocks::slice;

/// Markdown of a list item with its marker, task box and continuation
/// indentation removed.
///
/// Indentation is measured in columns with tabs advancing to the next
/// multiple of four, so tab-indented items dedent like space-indented ones.
pub(super) fn item_text(source: &str, range: &Range<usize>, task: bool) -> String {
    let raw = slice(source, range);
    let line_start = source
        .get(..range.start)
        .and_then(|before| before.rfind('\n'))
        .map_or(0, |newline| newline + 1);
    let column = advance(slice(source, &(line_start..range.start)), 0);

    let mut lines = raw.split('\n');
    let first = lines.next().unwrap_or_default();
    let leading = leading_whitespace(first);
    let marker_column = advance(&first[..leading], column);
    let after_indent = &first[leading..];
    let marker = marker_len(after_indent);
    let content_column = marker_column + marker;
    let after_marker = &after_indent[marker..];
    let padding_width =
        advance(&after_marker[..leading_whitespace(after_marker)], content_column) - content_column;

    // One column belongs to the marker when the item is blank or starts with
    // indented code; otherwise all padding up to four columns does.
    let padding = if after_marker.trim().is_empty() || padding_width > 4 {
        padding_width.min(1)
    } else {
        padding_width
    };
    let indent = content_column + padding;

    let mut content = strip_columns(after_marker, content_column, padding).into_owned();
    if task {
        content = strip_task_box(&content).to_string();
    }
    for line in lines {
        content.push('\n');
        content.push_str(&strip_columns(line, 0, indent));
    }
    content.trim_end().to_string()
}

/// Blockquote content with one level of `>` markers removed from each line.
pub(super) fn strip_quote_markers(raw: &str) -> String {
    raw.lines()
        .map(|line| {
            let trimmed = strip_columns(line, 0, 3);
            match trimmed.strip_prefix('>') {
                Some(rest) => rest.strip_prefix(' ').unwrap_or(rest).to_string(),
                None => trimmed.to_string(),
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
        .trim_end()
        .to_string()
}

/// Byte length of a bullet (`-`, `*`, `+`) or ordinal (`1.`, `1)`) marker.
fn marker_len(line: &str) -> usize {
    if line.starts_with(['-', '*', '+']) {
        return 1;
    }
    let digits = line.len() - line.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    if digits > 0 && line[digits..].starts_with(['.', ')']) {
        digits + 1
    } else {
        0
    }
}

fn strip_task_box(content: &str) -> &str {
    for checkbox in ["[ ]", "[x]", "[X]"] {
        if let Some(rest) = content.strip_prefix(checkbox) {
            return rest.strip_prefix([' ', '\t']).unwrap_or(rest);
        }
    }
    content
}

fn leading_whitespace(text: &str) -> usize {
    text.len() - text.trim_start_matches([' ', '\t']).len()
}

fn tab_stop(column: usize) -> usize {
    (column / 4 + 1) * 4
}

/// Column reached after `text` when it starts at `column`.
fn advance(text: &str, column: usize) -> usize {
    text.chars().fold(column, |column, ch| match ch {
        '\t' => tab_stop(column),
        _ => column + 1,
    })
}

/// Remove at most `width` columns of leading whitespace from `line`, which
/// starts at `column`.
///
/// Indentation left over past the cut is rewritten as spaces, so a tab that
/// straddles the cut keeps only its remaining columns.
fn strip_columns(line: &str, column: usize, width: usize) -> Cow<'_, str> {
    let cut = column + width;
    let leading = leading_whitespace(line);
    let reached = advance(&line[..leading], column);
    let rest = &line[leading..];
    if reached <= cut {
        Cow::Borrowed(rest)
    } else if !line[..leading].contains('\t') {
        Cow::Borrowed(&line[leading - (reached - cut)..])
    } else {
        Cow::Owned(format!("{}{rest}", " ".repeat(reached - cut)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn whole(source: &str) -> Range<usize> {
        0..source.len()
    }

    #[rstest]
    #[case("- plain", "plain")]
    #[case("* star", "star")]
    #[case("1. first", "first")]
    #[case("10) tenth", "tenth")]
    #[case("-   wide gap", "wide gap")]
    fn strips_markers(#[case] source: &str, #[case] expected: &str) {
        assert_eq!(item_text(source, &whole(source), false), expected);
    }

    #[test]
    fn dedents_nested_content() {
        let source = "- parent\n  - child\n    - grandchild\n";
        assert_eq!(
            item_text(source, &whole(source), false),
            "parent\n- child\n  - grandchild"
        );
    }

    #[test]
    fn accounts_for_item_column() {
        let source = "- outer\n  - inner\n    more inner\n";
        let start = source.find("- inner").unwrap();
        let range = start..source.len();
        assert_eq!(item_text(source, &range, false), "inner\nmore inner");
    }

    #[rstest]
    #[case::tab_after_bullet("-\tfoo", "foo")]
    #[case::tab_after_ordinal("1.\tfoo", "foo")]
    #[case::spaces_then_tab_after_marker("-  \tfoo", "foo")]
    #[case::tab_indented_child("- a\n\t- b", "a\n  - b")]
    #[case::mixed_indent_child("- a\n  \t- b", "a\n  - b")]
    fn measures_tabs_in_columns(#[case] source: &str, #[case] expected: &str) {
        assert_eq!(item_text(source, &whole(source), false), expected);
    }

    #[test]
    fn wide_tab_padding_keeps_leftover_columns() {
        // Seven columns of padding: one goes to the marker, the rest is code.
        let source = "-\t\tcode";
        assert_eq!(item_text(source, &whole(source), false), "      code");
    }

    #[rstest]
    #[case("\tx", 0, 2, "  x")]
    #[case("\tx", 0, 4, "x")]
    #[case("  \tx", 0, 3, " x")]
    #[case("    x", 0, 2, "  x")]
    #[case(" x", 0, 4, "x")]
    #[case("\tx", 1, 3, "x")]
    fn strip_columns_expands_tab_stops(
        #[case] line: &str,
        #[case] column: usize,
        #[case] width: usize,
        #[case] expected: &str,
    ) {
        assert_eq!(strip_columns(line, column, width), expected);
    }

    #[test]
    fn strips_task_box() {
        let source = "- [x] done";
        assert_eq!(item_text(source, &whole(source), true), "done");
    }

    #[test]
    fn strips_one_quote_level() {
        assert_eq!(
            strip_quote_markers("> first\n> > nested\n>\n> last\n"),
            "first\n> nested\n\nlast"
        );
    }
}
