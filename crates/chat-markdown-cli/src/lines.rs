//! Converts rendered node trees into styled terminal lines.

use chat_markdown_engine::{Align, CodeBlockNode, ListNode, Node, TableNode, TableRow};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

const RULE_WIDTH: usize = 40;

pub fn to_lines(node: &Node) -> Vec<Line<'static>> {
    let mut writer = LineWriter::default();
    writer.block(node);
    writer.finish()
}

#[derive(Default)]
struct LineWriter {
    lines: Vec<Line<'static>>,
    spans: Vec<Span<'static>>,
}

impl LineWriter {
    fn finish(mut self) -> Vec<Line<'static>> {
        self.flush();
        self.lines
    }

    fn flush(&mut self) {
        if !self.spans.is_empty() {
            self.lines.push(Line::from(std::mem::take(&mut self.spans)));
        }
    }

    fn line(&mut self, line: Line<'static>) {
        self.flush();
        self.lines.push(line);
    }

    fn block(&mut self, node: &Node) {
        match node {
            Node::Fragment(children) => {
                for child in children {
                    self.block(child);
                }
            }
            Node::Empty => {}
            Node::Whitespace(_) => self.line(Line::default()),
            Node::Paragraph(children) => {
                self.flush();
                for child in children {
                    self.inline(child);
                }
                self.flush();
            }
            Node::Heading { depth, text } => self.line(Line::styled(
                format!("{} {text}", "#".repeat(usize::from(*depth))),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )),
            Node::CodeBlock(block) => self.code_block(block),
            Node::Table(table) => self.table(table),
            Node::Rule => self.line(Line::styled(
                "─".repeat(RULE_WIDTH),
                Style::default().fg(Color::DarkGray),
            )),
            Node::Blockquote(text) => {
                for quoted in text.lines() {
                    self.line(Line::styled(
                        format!("> {quoted}"),
                        Style::default().add_modifier(Modifier::ITALIC),
                    ));
                }
            }
            Node::List(list) => self.list(list),
            Node::RawHtml(raw) => {
                for raw_line in raw.lines() {
                    self.line(Line::styled(
                        raw_line.to_string(),
                        Style::default().fg(Color::DarkGray),
                    ));
                }
            }
            Node::Unknown { kind, raw } => {
                self.line(Line::styled(
                    format!("Unknown type: {kind}"),
                    Style::default().fg(Color::Red),
                ));
                for raw_line in raw.lines() {
                    self.line(Line::from(raw_line.to_string()));
                }
            }
            // Nested list content arrives as bare inline nodes
            inline => self.inline(inline),
        }
    }

    fn inline(&mut self, node: &Node) {
        match node {
            Node::Text(text) | Node::Whitespace(text) => self.text(text, Style::default()),
            Node::Strong(text) => self.text(text, Style::default().add_modifier(Modifier::BOLD)),
            Node::Emphasis(text) => {
                self.text(text, Style::default().add_modifier(Modifier::ITALIC))
            }
            Node::InlineCode(text) => self.text(text, Style::default().fg(Color::Cyan)),
            Node::Strikethrough(text) => self.text(
                text,
                Style::default().add_modifier(Modifier::CROSSED_OUT),
            ),
            Node::Link { href, text, .. } => {
                self.text(
                    text,
                    Style::default()
                        .fg(Color::Blue)
                        .add_modifier(Modifier::UNDERLINED),
                );
                self.spans.push(Span::styled(
                    format!(" <{href}>"),
                    Style::default().fg(Color::DarkGray),
                ));
            }
            Node::Image { src, alt, .. } => self.spans.push(Span::styled(
                format!("[image: {alt}] <{src}>"),
                Style::default().fg(Color::Magenta),
            )),
            Node::LineBreak => self.flush(),
            Node::RawHtml(raw) => self.text(raw, Style::default().fg(Color::DarkGray)),
            Node::Unknown { kind, raw } => self.text(
                &format!("[Unknown type: {kind}] {raw}"),
                Style::default().fg(Color::Red),
            ),
            block => self.block(block),
        }
    }

    /// Soft line breaks inside text start a new terminal line.
    fn text(&mut self, text: &str, style: Style) {
        for (index, part) in text.split('\n').enumerate() {
            if index > 0 {
                self.flush();
            }
            if !part.is_empty() {
                self.spans.push(Span::styled(part.to_string(), style));
            }
        }
    }

    fn code_block(&mut self, block: &CodeBlockNode) {
        let border = Style::default().fg(Color::DarkGray);
        self.line(Line::styled("┌──", border));
        for code_line in block.code.lines() {
            self.lines.push(Line::from(vec![
                Span::styled("│ ", border),
                Span::styled(code_line.to_string(), Style::default().fg(Color::Green)),
            ]));
        }
        self.lines.push(Line::styled("└──", border));
    }

    fn table(&mut self, table: &TableNode) {
        self.flush();
        let rows = std::iter::once(&table.header).chain(&table.rows);
        let mut widths: Vec<usize> = Vec::new();
        for row in rows {
            for (column, cell) in row.cells.iter().enumerate() {
                let width = cell.text.chars().count();
                match widths.get_mut(column) {
                    Some(existing) => *existing = (*existing).max(width),
                    None => widths.push(width),
                }
            }
        }

        self.lines.push(table_line(
            &table.header,
            &widths,
            Style::default().add_modifier(Modifier::BOLD),
        ));
        let separator: Vec<String> = widths.iter().map(|width| "─".repeat(*width)).collect();
        self.lines.push(Line::styled(
            separator.join("─┼─"),
            Style::default().fg(Color::DarkGray),
        ));
        for row in &table.rows {
            self.lines.push(table_line(row, &widths, Style::default()));
        }
    }

    fn list(&mut self, list: &ListNode) {
        self.flush();
        let first = list.start.unwrap_or(1);
        for (index, item) in list.items.iter().enumerate() {
            let mut marker = if list.ordered {
                format!("{}. ", first + index as u64)
            } else {
                "• ".to_string()
            };
            match item.checkbox {
                Some(true) => marker.push_str("[x] "),
                Some(false) => marker.push_str("[ ] "),
                None => {}
            }

            let mut inner = LineWriter::default();
            for child in &item.content {
                inner.block(child);
            }
            let content = inner.finish();
            if content.is_empty() {
                self.lines.push(Line::from(marker));
                continue;
            }

            let padding = " ".repeat(marker.chars().count());
            for (line_index, line) in content.into_iter().enumerate() {
                let lead = if line_index == 0 {
                    marker.clone()
                } else {
                    padding.clone()
                };
                let mut spans = vec![Span::raw(lead)];
                spans.extend(line.spans);
                let mut indented = Line::from(spans);
                indented.style = line.style;
                self.lines.push(indented);
            }
        }
    }
}

fn table_line(row: &TableRow, widths: &[usize], style: Style) -> Line<'static> {
    let cells: Vec<String> = row
        .cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| {
            let width = *width;
            match cell.align {
                Align::Left => format!("{:<width$}", cell.text),
                Align::Center => format!("{:^width$}", cell.text),
                Align::Right => format!("{:>width$}", cell.text),
            }
        })
        .collect();
    Line::styled(cells.join(" │ "), style)
}
