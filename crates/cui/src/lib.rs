mod actions;
mod app;
mod audio;
mod input;
mod settings;
mod view;

use anyhow::{Context, Result};
use app::App;
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event as CEvent, KeyEventKind,
};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::{execute, ExecutableCommand};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use ratatui::Terminal;
use std::io::{self, stdout, IsTerminal};
use std::path::PathBuf;
use std::time::Duration;

pub use app::{normalize_locale, AppOptions, UiLocale};
pub use settings::{default_settings_path, load_settings_file, Settings};

#[derive(Debug, Clone, Default)]
pub struct LaunchOptions {
    pub locale: Option<String>,
    pub seed: Option<u64>,
    pub settings: Option<PathBuf>,
    pub mute: bool,
    pub bell: bool,
}

/// Merges flags over the settings file (explicit path, else the default one).
pub fn resolve_app_options(options: &LaunchOptions) -> Result<AppOptions> {
    let settings = match options.settings.as_ref() {
        Some(path) => load_settings_file(path)
            .map_err(|err| anyhow::anyhow!(err))
            .with_context(|| format!("load settings from {}", path.display()))?,
        None => settings::load_default_settings()
            .map_err(|err| anyhow::anyhow!(err))
            .context("load default settings")?,
    };
    let locale_value = options.locale.clone().or_else(|| settings.locale.clone());
    Ok(AppOptions {
        locale: UiLocale::from_opt(locale_value.as_deref()),
        seed: options.seed.or(settings.seed),
        config: settings.controller_config(),
        mute: options.mute || settings.mute.unwrap_or(false),
        bell: options.bell || settings.bell.unwrap_or(false),
    })
}

pub fn run(options: LaunchOptions) -> Result<()> {
    let app_options = resolve_app_options(&options)?;
    let mut app = App::bootstrap(app_options)?;

    ensure_interactive_terminal()?;

    enable_raw_mode().map_err(|err| {
        anyhow::anyhow!(
            "failed to enable raw mode; ensure the process owns an interactive terminal: {err}"
        )
    })?;
    let mut stdout = stdout();
    stdout
        .execute(EnterAlternateScreen)
        .context("enter alternate screen")?;
    stdout
        .execute(EnableMouseCapture)
        .context("enable mouse capture")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;

    let run_result = run_loop(&mut terminal, &mut app);
    restore_terminal(&mut terminal)?;
    run_result
}

pub fn run_with_args(args: &[String]) -> Result<()> {
    let options = parse_options(args);
    run(options)
}

pub fn parse_options(args: &[String]) -> LaunchOptions {
    let mut locale = std::env::var("SUGOROKU_LANG").ok();
    let mut seed = None;
    let mut settings = None;
    let mut mute = false;
    let mut bell = false;
    let mut idx = 0usize;
    while idx < args.len() {
        match args[idx].as_str() {
            "--lang" | "-l" => {
                if let Some(value) = args.get(idx + 1) {
                    locale = Some(value.clone());
                    idx += 1;
                }
            }
            "--seed" => {
                if let Some(value) = args.get(idx + 1) {
                    seed = value.parse::<u64>().ok();
                    idx += 1;
                }
            }
            "--settings" => {
                if let Some(value) = args.get(idx + 1) {
                    settings = Some(PathBuf::from(value));
                    idx += 1;
                }
            }
            "--mute" => mute = true,
            "--bell" => bell = true,
            _ => {}
        }
        idx += 1;
    }
    LaunchOptions {
        locale,
        seed,
        settings,
        mute,
        bell,
    }
}

fn run_loop(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    let tick_rate = Duration::from_millis(40);
    while !app.should_quit {
        terminal.draw(|frame| view::draw(frame, app))?;
        if event::poll(tick_rate)? {
            match event::read()? {
                CEvent::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    actions::dispatch(app, input::map_key(key));
                }
                CEvent::Mouse(mouse) => {
                    let size = terminal.size()?;
                    let areas = view::card_areas(Rect::new(0, 0, size.width, size.height));
                    actions::dispatch(app, input::map_mouse(mouse, &areas));
                }
                _ => {}
            }
        }
        app.on_tick();
    }
    Ok(())
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode().context("disable raw mode")?;
    execute!(
        terminal.backend_mut(),
        DisableMouseCapture,
        LeaveAlternateScreen
    )
    .context("leave alternate screen")?;
    terminal.show_cursor().context("show cursor")?;
    Ok(())
}

fn ensure_interactive_terminal() -> Result<()> {
    if io::stdin().is_terminal() && io::stdout().is_terminal() {
        return Ok(());
    }
    anyhow::bail!(
        "sugoroku requires an interactive TTY (run directly in a terminal, or use --auto for headless rounds)"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn parses_flags_and_values() {
        let options = parse_options(&args(&[
            "--seed", "42", "--lang", "ja", "--mute", "--settings", "s.json",
        ]));
        assert_eq!(options.seed, Some(42));
        assert_eq!(options.locale.as_deref(), Some("ja"));
        assert!(options.mute);
        assert!(!options.bell);
        assert_eq!(options.settings, Some(PathBuf::from("s.json")));
    }

    #[test]
    fn ignores_unparsable_seed() {
        let options = parse_options(&args(&["--seed", "abc", "--bell"]));
        assert_eq!(options.seed, None);
        assert!(options.bell);
    }
}
