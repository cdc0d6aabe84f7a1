use dioxus::prelude::*;

/// Shown in place of the editor when the startup document could not be read.
#[component]
pub fn LoadError(path: String, message: String) -> Element {
    rsx! {
        div {
            class: "load-error",
            h2 { "Could not open {path}" }
            pre { "{message}" }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dioxus::dioxus_core::VirtualDom;
    use dioxus_ssr::render;

    #[test]
    fn test_load_error_names_path_and_reason() {
        let mut dom = VirtualDom::new_with_props(
            LoadError,
            LoadErrorProps {
                path: "reply.md".to_string(),
                message: "No such file or directory".to_string(),
            },
        );
        dom.rebuild_in_place();
        let html = render(&dom);

        assert!(html.contains("Could not open reply.md"));
        assert!(html.contains("No such file or directory"));
    }
}
