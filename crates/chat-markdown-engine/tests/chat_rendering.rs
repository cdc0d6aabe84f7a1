use chat_markdown_engine::{
    ActionSettings, Align, ApplyRequest, CodeBlockController, Node, render_markdown, to_html,
};
use pretty_assertions::assert_eq;
use std::cell::RefCell;

fn fixture(name: &str) -> String {
    std::fs::read_to_string(format!(
        "{}/tests/fixtures/{name}.md",
        env!("CARGO_MANIFEST_DIR")
    ))
    .unwrap()
}

fn blocks(node: Node) -> Vec<Node> {
    match node {
        Node::Fragment(children) => children
            .into_iter()
            .filter(|child| !matches!(child, Node::Whitespace(_)))
            .collect(),
        other => vec![other],
    }
}

#[test]
fn assistant_reply_renders_each_block_in_order() {
    let kinds: Vec<&str> = blocks(render_markdown(&fixture("assistant_reply")))
        .iter()
        .map(|node| match node {
            Node::Heading { .. } => "heading",
            Node::Paragraph(_) => "paragraph",
            Node::CodeBlock(_) => "code",
            Node::List(_) => "list",
            Node::Table(_) => "table",
            _ => "other",
        })
        .collect();
    assert_eq!(
        kinds,
        vec![
            "heading",
            "paragraph",
            "code",
            "paragraph",
            "list",
            "table",
            "code"
        ]
    );
}

#[test]
fn assistant_reply_code_blocks_keep_exact_text() {
    let node = render_markdown(&fixture("assistant_reply"));
    let codes: Vec<&str> = node
        .code_blocks()
        .iter()
        .map(|block| block.code.as_str())
        .collect();
    assert_eq!(
        codes,
        vec![
            "cargo fmt --all",
            "fn main() {\n    println!(\"done\");\n}"
        ]
    );
    assert!(node.code_blocks()[0].is_single_line());
    assert!(!node.code_blocks()[1].is_single_line());
}

#[test]
fn assistant_reply_task_list_and_table() {
    let blocks = blocks(render_markdown(&fixture("assistant_reply")));

    let list = blocks
        .iter()
        .find_map(|node| match node {
            Node::List(list) => Some(list),
            _ => None,
        })
        .unwrap();
    let boxes: Vec<Option<bool>> = list.items.iter().map(|item| item.checkbox).collect();
    assert_eq!(boxes, vec![Some(true), Some(false)]);
    assert_eq!(
        list.items[1].content,
        vec![
            Node::Text("rerun ".to_string()),
            Node::Strong("clippy".to_string())
        ]
    );

    let table = blocks
        .iter()
        .find_map(|node| match node {
            Node::Table(table) => Some(table),
            _ => None,
        })
        .unwrap();
    let header: Vec<(&str, Align)> = table
        .header
        .cells
        .iter()
        .map(|cell| (cell.text.as_str(), cell.align))
        .collect();
    assert_eq!(header, vec![("Step", Align::Left), ("Time", Align::Right)]);
    assert_eq!(table.rows.len(), 1);
}

#[test]
fn apply_forwards_rendered_code_unchanged() {
    let node = render_markdown(&fixture("assistant_reply"));
    let received = RefCell::new(Vec::new());
    let applier = |request: ApplyRequest| received.borrow_mut().push(request);

    for block in node.code_blocks() {
        CodeBlockController::for_block(block, ActionSettings::default()).apply(&applier);
    }

    let texts: Vec<String> = received.borrow().iter().map(|r| r.text.clone()).collect();
    assert_eq!(
        texts,
        vec![
            "cargo fmt --all".to_string(),
            "fn main() {\n    println!(\"done\");\n}".to_string()
        ]
    );
    assert!(received.borrow().iter().all(|r| r.source_label == "Ctrl+L"));
}

#[test]
fn inline_markup_to_html() {
    insta::assert_snapshot!(
        to_html(&render_markdown("Use `cargo` **now**")),
        @"<p>Use <code>cargo</code> <strong>now</strong></p>"
    );
}

#[test]
fn raw_html_is_escaped_in_html_output() {
    let html = to_html(&render_markdown("<div onclick=\"x()\">hi</div>\n"));
    assert!(html.starts_with("<pre class=\"raw-html\">&lt;html&gt;&lt;div"));
    assert!(!html.contains("<div onclick"));
}

#[test]
fn unsupported_constructs_are_shown_not_dropped() {
    let html = to_html(&render_markdown("Energy is $E = mc^2$."));
    assert!(html.contains("Unknown type: math"));
    assert!(html.contains("E = mc^2"));
}
