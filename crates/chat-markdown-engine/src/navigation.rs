//! Opening links outside the renderer.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum NavigationError {
    #[error("refusing to open {0:?}: only http, https and mailto links are opened")]
    UnsupportedScheme(String),
    #[error("failed to launch browser for {url}: {source}")]
    Launch {
        url: String,
        #[source]
        source: std::io::Error,
    },
}

/// Opens a link target in a separate browsing context.
pub trait Navigator {
    fn open(&self, url: &str) -> Result<(), NavigationError>;
}

impl<F> Navigator for F
where
    F: Fn(&str) -> Result<(), NavigationError>,
{
    fn open(&self, url: &str) -> Result<(), NavigationError> {
        self(url)
    }
}

/// Whether a link target may be handed to the system browser.
pub fn is_openable(url: &str) -> bool {
    let Some((scheme, rest)) = url.split_once(':') else {
        return false;
    };
    match scheme.to_ascii_lowercase().as_str() {
        "http" | "https" => rest.starts_with("//") && rest.len() > 2,
        "mailto" => !rest.is_empty(),
        _ => false,
    }
}

/// [`Navigator`] that hands links to the platform's default browser.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemBrowser;

impl Navigator for SystemBrowser {
    fn open(&self, url: &str) -> Result<(), NavigationError> {
        if !is_openable(url) {
            return Err(NavigationError::UnsupportedScheme(url.to_string()));
        }
        log::info!("Opening link in system browser: {url}");
        launch(url).map_err(|source| NavigationError::Launch {
            url: url.to_string(),
            source,
        })
    }
}

fn launch(url: &str) -> std::io::Result<()> {
    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .args(["/C", "start", "", url])
            .spawn()?;
    }

    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open").arg(url).spawn()?;
    }

    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open").arg(url).spawn()?;
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos", target_os = "linux")))]
    {
        log::warn!("No system browser launcher for this platform, ignoring {url}");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::cell::RefCell;

    #[rstest]
    #[case("https://example.com", true)]
    #[case("HTTP://example.com/a?b=c", true)]
    #[case("mailto:dev@example.com", true)]
    #[case("https://", false)]
    #[case("javascript:alert(1)", false)]
    #[case("file:///etc/passwd", false)]
    #[case("/relative/path", false)]
    #[case("#anchor", false)]
    fn only_web_and_mail_links_are_openable(#[case] url: &str, #[case] expected: bool) {
        assert_eq!(is_openable(url), expected);
    }

    #[test]
    fn system_browser_rejects_unsupported_scheme_without_launching() {
        let err = SystemBrowser.open("javascript:alert(1)").unwrap_err();
        assert!(matches!(err, NavigationError::UnsupportedScheme(url) if url == "javascript:alert(1)"));
    }

    #[test]
    fn closures_act_as_navigators() {
        let opened = RefCell::new(Vec::new());
        let navigator = |url: &str| {
            opened.borrow_mut().push(url.to_string());
            Ok::<(), NavigationError>(())
        };
        navigator.open("https://example.com").unwrap();
        assert_eq!(*opened.borrow(), vec!["https://example.com".to_string()]);
    }
}
