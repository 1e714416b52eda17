/*
 * This file is part of Markpad.
 *
 * Copyright (C) 2025 Markpad contributors
 *
 * Markpad is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * Markpad is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with Markpad. If not, see <https://www.gnu.org/licenses/>.
 */

mod app;
mod config;
mod draft;
mod events;
mod handlers;
mod logger;
mod ui;

#[cfg(test)]
mod test_utils;

use std::io::stdout;
use std::path::Path;
use std::time::Duration;

use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture, Event};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::layout::Rect;
use ratatui::Terminal;

use app::App;
use config::{load_saved_config, try_load_config};
use draft::LogSink;
use events::{handle_key_event, handle_mouse_event};
use ui::ui;

fn arg_value(args: &[String], name: &str) -> Option<String> {
    args.iter()
        .position(|a| a == name)
        .and_then(|i| args.get(i + 1).cloned())
}

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();

    // Optional logging to ~/.local/state/markpad/logs.json
    let logging_enabled = args.iter().any(|a| a == "--logging");
    if logging_enabled {
        logger::init_logging();
        logger::log_event("startup", serde_json::json!({ "args": args }));
    }

    // The student whose mark is being entered is always an input, never a
    // constant baked into the dialog.
    let student = match arg_value(&args, "--student") {
        Some(s) if !s.trim().is_empty() => s.trim().to_string(),
        _ => {
            eprintln!("Error: markpad needs the student whose mark is being entered.");
            eprintln!("Usage: markpad --student \"<ФИО ученика>\" [--config <path>] [--logging]");
            std::process::exit(1);
        }
    };

    // An explicitly given config must be valid; the default location is
    // best-effort with built-in catalogs as fallback.
    let cfg = match arg_value(&args, "--config") {
        Some(path) => match try_load_config(Path::new(&path)) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("config error in {}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => load_saved_config().unwrap_or_default(),
    };

    // Terminal init
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    if logging_enabled {
        logger::log_event("tui_start", serde_json::json!({}));
    }
    let res = run_app(&mut terminal, App::new(student, cfg, Box::new(LogSink)));

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("error: {err}");
        if logging_enabled {
            logger::log_event("fatal_error", serde_json::json!({ "error": err.to_string() }));
        }
        std::process::exit(1);
    }

    Ok(())
}

fn run_app(
    terminal: &mut Terminal<ratatui::backend::CrosstermBackend<std::io::Stdout>>,
    mut app: App,
) -> anyhow::Result<()> {
    loop {
        let size = terminal.size()?;
        app.viewport = Rect::new(0, 0, size.width, size.height);

        terminal.draw(|f| ui(f, &app))?;

        if event::poll(Duration::from_millis(250)).unwrap_or(false) {
            match event::read()? {
                Event::Key(key_event) => {
                    if handle_key_event(&mut app, key_event)? {
                        return Ok(());
                    }
                }
                Event::Mouse(mouse_event) => handle_mouse_event(&mut app, mouse_event),
                _ => {}
            }
        }
    }
}
