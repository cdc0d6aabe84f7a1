mod applied_panel;
mod chat_markdown;
mod code_block;
mod list;
mod load_error;
mod node_view;
mod table;
mod unknown_token;

pub use applied_panel::AppliedPanel;
pub use chat_markdown::ChatMarkdown;
pub use code_block::CodeBlock;
pub use list::ListView;
pub use load_error::LoadError;
pub use node_view::NodeView;
pub use table::TableView;
pub use unknown_token::UnknownToken;

#[cfg(test)]
pub(crate) mod test_support {
    use super::ChatMarkdown;
    use crate::ui::services::Services;
    use chat_markdown_config::Config;
    use dioxus::dioxus_core::VirtualDom;
    use dioxus::prelude::*;

    /// Renders markdown the way the app does, with services in context.
    #[component]
    pub fn Harness(source: String, config: Config) -> Element {
        let applied = use_signal(Vec::new);
        use_context_provider(|| Services { config, applied });
        rsx! {
            ChatMarkdown { source }
        }
    }

    pub fn render_with(source: &str, config: Config) -> String {
        let mut dom = VirtualDom::new_with_props(
            Harness,
            HarnessProps {
                source: source.to_string(),
                config,
            },
        );
        dom.rebuild_in_place();
        dioxus_ssr::render(&dom)
    }

    pub fn render(source: &str) -> String {
        render_with(source, Config::default())
    }
}
