use anyhow::{Context, Result};
use chat_markdown_config::Config;
use chat_markdown_engine::to_html;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use std::{
    env,
    io::{Stdout, stdout},
    path::PathBuf,
    process,
};

mod lines;

/// Output selected on the command line.
#[derive(Debug, PartialEq)]
enum Mode {
    View(Option<PathBuf>),
    Html(Option<PathBuf>),
}

fn parse_args(args: &[String]) -> Option<Mode> {
    match args {
        [] => Some(Mode::View(None)),
        [flag] if flag == "--html" => Some(Mode::Html(None)),
        [flag, path] if flag == "--html" => Some(Mode::Html(Some(PathBuf::from(path)))),
        [path] if !path.starts_with("--") => Some(Mode::View(Some(PathBuf::from(path)))),
        _ => None,
    }
}

struct App {
    title: String,
    lines: Vec<Line<'static>>,
    scroll: usize,
}

impl App {
    fn new(title: String, lines: Vec<Line<'static>>) -> Self {
        Self {
            title,
            lines,
            scroll: 0,
        }
    }

    fn scroll_by(&mut self, delta: isize) {
        let max = self.lines.len().saturating_sub(1);
        self.scroll = self.scroll.saturating_add_signed(delta).min(max);
    }

    fn scroll_to_end(&mut self) {
        self.scroll = self.lines.len().saturating_sub(1);
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env().init();

    let args: Vec<String> = env::args().collect();
    let program_name = args
        .first()
        .cloned()
        .unwrap_or_else(|| "chat-markdown-cli".to_string());
    let Some(mode) = parse_args(args.get(1..).unwrap_or_default()) else {
        eprintln!("Usage: {program_name} [--html] [markdown-file]");
        process::exit(1);
    };

    let config = match Config::load_or_default() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: Failed to load config file: {e}");
            process::exit(1);
        }
    };

    let (path, html) = match mode {
        Mode::View(path) => (path, false),
        Mode::Html(path) => (path, true),
    };
    let Some(path) = path.or_else(|| config.viewer.document.clone()) else {
        eprintln!("Error: No markdown file given and no [viewer] document configured");
        eprintln!("Usage: {program_name} [--html] [markdown-file]");
        eprintln!("Or set one in {}", Config::config_path().display());
        process::exit(1);
    };

    let markdown = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let node = config.renderer().render(&markdown, false);

    if html {
        println!("{}", to_html(&node));
        return Ok(());
    }

    log::info!("Viewing {}", path.display());
    let mut app = App::new(path.display().to_string(), lines::to_lines(&node));

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{err:?}");
    }

    Ok(())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    loop {
        let page = terminal.size()?.height.saturating_sub(4).max(1) as isize;
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                KeyCode::Down | KeyCode::Char('j') => app.scroll_by(1),
                KeyCode::Up | KeyCode::Char('k') => app.scroll_by(-1),
                KeyCode::PageDown | KeyCode::Char(' ') => app.scroll_by(page),
                KeyCode::PageUp => app.scroll_by(-page),
                KeyCode::Home | KeyCode::Char('g') => app.scroll = 0,
                KeyCode::End | KeyCode::Char('G') => app.scroll_to_end(),
                _ => {}
            }
        }
    }
}

fn ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)].as_ref())
        .split(f.area());

    let scroll = u16::try_from(app.scroll).unwrap_or(u16::MAX);
    let content = Paragraph::new(app.lines.clone())
        .block(Block::default().borders(Borders::ALL).title(app.title.as_str()))
        .scroll((scroll, 0));
    f.render_widget(content, chunks[0]);

    let help_text = Line::from(vec![
        Span::raw("q: Quit | "),
        Span::raw("↑/k: Up | "),
        Span::raw("↓/j: Down | "),
        Span::raw("PgUp/PgDn: Page | g/G: Top/Bottom"),
    ]);
    f.render_widget(Paragraph::new(help_text), chunks[1]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn test_parse_args() {
        assert_eq!(parse_args(&args(&[])), Some(Mode::View(None)));
        assert_eq!(
            parse_args(&args(&["reply.md"])),
            Some(Mode::View(Some(PathBuf::from("reply.md"))))
        );
        assert_eq!(
            parse_args(&args(&["--html", "reply.md"])),
            Some(Mode::Html(Some(PathBuf::from("reply.md"))))
        );
        assert_eq!(parse_args(&args(&["--html"])), Some(Mode::Html(None)));
        assert_eq!(parse_args(&args(&["--bogus"])), None);
        assert_eq!(parse_args(&args(&["a.md", "b.md"])), None);
    }

    #[test]
    fn test_scroll_is_clamped() {
        let mut app = App::new(
            "t".to_string(),
            vec![Line::from("a"), Line::from("b"), Line::from("c")],
        );

        app.scroll_by(-5);
        assert_eq!(app.scroll, 0);
        app.scroll_by(10);
        assert_eq!(app.scroll, 2);
        app.scroll_by(-1);
        assert_eq!(app.scroll, 1);
        app.scroll_to_end();
        assert_eq!(app.scroll, 2);
    }
}
