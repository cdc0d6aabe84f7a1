use chat_markdown_engine::{ListItemNode, ListNode};
use dioxus::prelude::*;

use super::NodeView;
use super::node_view::keyed;

/// Ordered or unordered list; item content is already rendered nested.
#[component]
pub fn ListView(list: ListNode) -> Element {
    if list.ordered {
        let start = list.start.map(|start| start.to_string());
        rsx! {
            ol {
                start,
                for (index, item) in list.items.into_iter().enumerate() {
                    ListItemView { key: "{index}", item }
                }
            }
        }
    } else {
        rsx! {
            ul {
                for (index, item) in list.items.into_iter().enumerate() {
                    ListItemView { key: "{index}", item }
                }
            }
        }
    }
}

#[component]
fn ListItemView(item: ListItemNode) -> Element {
    rsx! {
        li {
            if let Some(checked) = item.checkbox {
                input {
                    r#type: "checkbox",
                    checked,
                    disabled: true,
                }
            }
            for (key, child) in keyed(item.content) {
                NodeView { key: "{key}", node: child }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::render;

    #[test]
    fn test_ordered_list_start() {
        let html = render("3. three\n4. four\n");

        assert!(html.contains("<ol"));
        assert!(html.contains("start=\"3\""));
        assert_eq!(html.matches("<li").count(), 2);
    }

    #[test]
    fn test_list_starting_at_one_keeps_start() {
        let html = render("1. one\n");

        assert!(html.contains("start=\"1\""));
    }

    #[test]
    fn test_task_items_render_disabled_checkboxes() {
        let html = render("- [x] done\n- [ ] todo\n- plain\n");

        assert!(html.contains("<ul"));
        assert_eq!(html.matches("type=\"checkbox\"").count(), 2);
        assert_eq!(html.matches("disabled").count(), 2);
        assert!(html.contains("done"));
        assert!(html.contains("plain"));
    }

    #[test]
    fn test_nested_list_content_is_not_wrapped_in_paragraphs() {
        let html = render("- outer **bold**\n  - inner\n");

        assert_eq!(html.matches("<ul").count(), 2);
        assert!(!html.contains("<p>"));
        assert!(html.contains("<strong>bold</strong>"));
    }
}
