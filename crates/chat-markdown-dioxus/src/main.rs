use chat_markdown_config::Config;
use dioxus::prelude::*;
use std::env;
use std::path::PathBuf;
use std::process;
use std::sync::OnceLock;

mod ui;

use ui::App;
use ui::app::Document;

const SAMPLE: &str = include_str!("sample.md");

/// Startup state resolved once in `main` and read by the root component.
struct Startup {
    config: Config,
    document: Document,
}

static STARTUP: OnceLock<Startup> = OnceLock::new();

fn main() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    log::info!("chat-markdown starting up!");

    let args: Vec<String> = env::args().collect();
    if args.len() > 2 {
        let program_name = args
            .first()
            .cloned()
            .unwrap_or_else(|| "chat-markdown-dioxus".to_string());
        eprintln!("Usage: {program_name} [markdown-file]");
        process::exit(1);
    }

    let config = match Config::load_or_default() {
        Ok(config) => config,
        Err(e) => {
            log::error!("Config::load() failed with error: {e}");
            eprintln!("Error: Failed to load config file: {e}");
            process::exit(1);
        }
    };

    let path = args
        .get(1)
        .map(PathBuf::from)
        .or_else(|| config.viewer.document.clone());
    let document = load_document(path);

    // main runs once, so the cell is always empty here
    let _ = STARTUP.set(Startup { config, document });

    dioxus::LaunchBuilder::desktop()
        .with_cfg(make_window_config())
        .launch(app_root);
}

fn load_document(path: Option<PathBuf>) -> Document {
    let Some(path) = path else {
        log::info!("No document given, showing the built-in sample");
        return Document::Loaded(SAMPLE.to_string());
    };
    match std::fs::read_to_string(&path) {
        Ok(text) => {
            log::info!("Loaded {}", path.display());
            Document::Loaded(text)
        }
        Err(e) => {
            log::error!("Failed to read {}: {e}", path.display());
            Document::Failed {
                path: path.display().to_string(),
                message: e.to_string(),
            }
        }
    }
}

fn app_root() -> Element {
    let (config, document) = match STARTUP.get() {
        Some(startup) => (startup.config.clone(), startup.document.clone()),
        None => (Config::default(), Document::Loaded(SAMPLE.to_string())),
    };

    rsx! {
        App { config, document }
    }
}

fn make_window_config() -> dioxus::desktop::Config {
    use dioxus::desktop::{Config, WindowBuilder};

    let window = WindowBuilder::new()
        .with_title("chat-markdown")
        .with_always_on_top(false);

    Config::default().with_window(window)
}
