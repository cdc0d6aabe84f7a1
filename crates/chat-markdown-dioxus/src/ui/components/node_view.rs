use std::collections::HashMap;

use chat_markdown_engine::{Navigator, Node, SystemBrowser};
use dioxus::prelude::*;

use super::{CodeBlock, ListView, TableView, UnknownToken};

/// Maps a rendered node, and its children, to elements.
#[component]
pub fn NodeView(node: Node) -> Element {
    match node {
        Node::Fragment(children) => rsx! {
            for (key, child) in keyed(children) {
                NodeView { key: "{key}", node: child }
            }
        },
        Node::Empty => rsx! {},
        Node::Whitespace(text) | Node::Text(text) => rsx! { "{text}" },
        Node::CodeBlock(block) => rsx! {
            CodeBlock { block }
        },
        Node::Heading { depth, text } => heading(depth, text),
        Node::Table(table) => rsx! {
            TableView { table }
        },
        Node::Rule => rsx! { hr {} },
        Node::Blockquote(text) => rsx! {
            blockquote { "{text}" }
        },
        Node::List(list) => rsx! {
            ListView { list }
        },
        Node::Paragraph(children) => rsx! {
            p {
                for (key, child) in keyed(children) {
                    NodeView { key: "{key}", node: child }
                }
            }
        },
        // Shown as source text; never injected as markup.
        Node::RawHtml(raw) => {
            let text = format!("<html>{raw}</html>");
            rsx! {
                pre { class: "raw-html", "{text}" }
            }
        }
        Node::Link { href, title, text } => {
            let target = href.clone();
            rsx! {
                a {
                    class: "external-link",
                    href: "{href}",
                    title,
                    target: "_blank",
                    rel: "noopener noreferrer",
                    onclick: move |evt: MouseEvent| {
                        evt.prevent_default();
                        evt.stop_propagation();
                        if let Err(e) = SystemBrowser.open(&target) {
                            log::warn!("Failed to open link: {e}");
                        }
                    },
                    "{text}"
                }
            }
        }
        Node::Image { src, alt, title } => rsx! {
            img { src: "{src}", alt: "{alt}", title }
        },
        Node::Strong(text) => rsx! {
            strong { "{text}" }
        },
        Node::Emphasis(text) => rsx! {
            em { "{text}" }
        },
        Node::InlineCode(text) => rsx! {
            code { "{text}" }
        },
        Node::LineBreak => rsx! { br {} },
        Node::Strikethrough(text) => rsx! {
            del { "{text}" }
        },
        Node::Unknown { kind, raw } => rsx! {
            UnknownToken { kind, raw }
        },
    }
}

/// Pairs siblings with keys made of their kind and their position among
/// siblings of that kind. Inserting a node leaves keys of other kinds as they were.
pub(super) fn keyed(children: Vec<Node>) -> Vec<(String, Node)> {
    let mut seen: HashMap<&'static str, usize> = HashMap::new();
    children
        .into_iter()
        .map(|child| {
            let kind = child.kind();
            let ordinal = seen.entry(kind).or_default();
            let key = format!("{kind}-{ordinal}");
            *ordinal += 1;
            (key, child)
        })
        .collect()
}

fn heading(depth: u8, text: String) -> Element {
    match depth {
        1 => rsx! { h1 { "{text}" } },
        2 => rsx! { h2 { "{text}" } },
        3 => rsx! { h3 { "{text}" } },
        4 => rsx! { h4 { "{text}" } },
        5 => rsx! { h5 { "{text}" } },
        _ => rsx! { h6 { "{text}" } },
    }
}
