mod api;
mod app;
mod binder;
mod config;
mod error;
mod flow;
mod i18n;
mod presenter;
mod render;
mod save;
#[cfg(test)]
mod testing;
mod text;
mod types;
mod ui;
mod utils;
mod web;

use anyhow::Result;
use app::App;
use clap::Parser;
use config::{Cli, Config};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use i18n::init_locale;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use std::time::Duration;
use utils::{init_log, log_msg};

rust_i18n::i18n!("locales");

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::from_cli(cli)?;

    init_log(config.log_file.clone());
    let locale = init_locale(config.lang.as_deref());
    log_msg("info", &format!("Locale {locale}"));

    let mut app = App::new(&config)?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        log_msg("error", &format!("{e:#}"));
    }
    log_msg("info", "Exit");
    result
}

fn run(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    loop {
        app.handle_events();

        terminal.draw(|f| ui::draw(f, app))?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && app.on_key(key.code, key.modifiers) {
                    return Ok(());
                }
            }
        }
    }
}
