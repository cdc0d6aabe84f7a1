use html_escape::{encode_double_quoted_attribute, encode_text};

use super::node::{ListNode, Node, TableNode, TableRow};

/// Serialize a node tree to HTML.
///
/// All text is escaped; raw HTML from the source is shown as text.
pub fn to_html(node: &Node) -> String {
    let mut out = String::new();
    write_node(node, &mut out);
    out
}

fn write_node(node: &Node, out: &mut String) {
    match node {
        Node::Fragment(children) => write_children(children, out),
        Node::Empty => {}
        Node::Whitespace(text) | Node::Text(text) => out.push_str(&encode_text(text)),
        Node::CodeBlock(block) => {
            out.push_str("<div class=\"code-block\"><pre><code>");
            out.push_str(&encode_text(&block.code));
            out.push_str("</code></pre></div>");
        }
        Node::Heading { depth, text } => {
            out.push_str(&format!("<h{depth}>"));
            out.push_str(&encode_text(text));
            out.push_str(&format!("</h{depth}>"));
        }
        Node::Table(table) => write_table(table, out),
        Node::Rule => out.push_str("<hr>"),
        Node::Blockquote(text) => wrap("blockquote", text, out),
        Node::List(list) => write_list(list, out),
        Node::Paragraph(children) => {
            out.push_str("<p>");
            write_children(children, out);
            out.push_str("</p>");
        }
        Node::RawHtml(raw) => {
            out.push_str("<pre class=\"raw-html\">&lt;html&gt;");
            out.push_str(&encode_text(raw));
            out.push_str("&lt;/html&gt;</pre>");
        }
        Node::Link { href, title, text } => {
            out.push_str("<a href=\"");
            out.push_str(&encode_double_quoted_attribute(href));
            out.push('"');
            write_title(title.as_deref(), out);
            out.push_str(" target=\"_blank\" rel=\"noopener noreferrer\">");
            out.push_str(&encode_text(text));
            out.push_str("</a>");
        }
        Node::Image { src, alt, title } => {
            out.push_str("<img src=\"");
            out.push_str(&encode_double_quoted_attribute(src));
            out.push_str("\" alt=\"");
            out.push_str(&encode_double_quoted_attribute(alt));
            out.push('"');
            write_title(title.as_deref(), out);
            out.push('>');
        }
        Node::Strong(text) => wrap("strong", text, out),
        Node::Emphasis(text) => wrap("em", text, out),
        Node::InlineCode(text) => wrap("code", text, out),
        Node::LineBreak => out.push_str("<br>"),
        Node::Strikethrough(text) => wrap("del", text, out),
        Node::Unknown { kind, raw } => {
            out.push_str("<div class=\"unknown-token\"><span class=\"unknown-token-label\">");
            out.push_str("Unknown type: ");
            out.push_str(&encode_text(kind));
            out.push_str("</span>");
            out.push_str(&encode_text(raw));
            out.push_str("</div>");
        }
    }
}

fn write_children(children: &[Node], out: &mut String) {
    for child in children {
        write_node(child, out);
    }
}

fn wrap(tag: &str, text: &str, out: &mut String) {
    out.push_str(&format!("<{tag}>"));
    out.push_str(&encode_text(text));
    out.push_str(&format!("</{tag}>"));
}

fn write_title(title: Option<&str>, out: &mut String) {
    if let Some(title) = title {
        out.push_str(" title=\"");
        out.push_str(&encode_double_quoted_attribute(title));
        out.push('"');
    }
}

fn write_table(table: &TableNode, out: &mut String) {
    out.push_str("<table><thead>");
    write_row(&table.header, "th", out);
    out.push_str("</thead><tbody>");
    for row in &table.rows {
        write_row(row, "td", out);
    }
    out.push_str("</tbody></table>");
}

fn write_row(row: &TableRow, cell_tag: &str, out: &mut String) {
    out.push_str("<tr>");
    for cell in &row.cells {
        out.push_str(&format!(
            "<{cell_tag} style=\"text-align: {}\">",
            cell.align.as_css()
        ));
        out.push_str(&encode_text(&cell.text));
        out.push_str(&format!("</{cell_tag}>"));
    }
    out.push_str("</tr>");
}

fn write_list(list: &ListNode, out: &mut String) {
    let tag = if list.ordered { "ol" } else { "ul" };
    match list.start {
        Some(start) if list.ordered => out.push_str(&format!("<{tag} start=\"{start}\">")),
        _ => out.push_str(&format!("<{tag}>")),
    }
    for item in &list.items {
        out.push_str("<li>");
        match item.checkbox {
            Some(true) => out.push_str("<input type=\"checkbox\" checked disabled>"),
            Some(false) => out.push_str("<input type=\"checkbox\" disabled>"),
            None => {}
        }
        write_children(&item.content, out);
        out.push_str("</li>");
    }
    out.push_str(&format!("</{tag}>"));
}
