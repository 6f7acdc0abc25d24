use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use std::io;
use std::process::Command;
use std::sync::Arc;
use tracing::{error, info, warn};

use inboxtui::api::HttpApi;
use inboxtui::app::{App, Mode, Pane};
use inboxtui::config::Config;
use inboxtui::inbox::{ComposeField, EmailDisplay};
use inboxtui::{logging, ui};

fn main() -> Result<()> {
    // Logging goes to a file; keep running without it
    let log_path = logging::init().ok();

    let config = Arc::new(Config::load());
    let api = HttpApi::new(config.backend.clone())?;
    info!("Using backend {}", config.backend.base_url);

    let mut app = App::new(config, Box::new(api));
    app.load();
    if let Some(path) = log_path {
        info!("Logging to {}", path.display());
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        error!("Exited with error: {:#}", e);
    }
    result
}

fn run(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| ui::render(f, app))?;

        // Slow requests run after their placeholder has been drawn
        app.process_pending();

        // Poll with timeout so we redraw on resize even without focus
        if !event::poll(std::time::Duration::from_millis(100))? {
            continue;
        }

        match event::read()? {
            Event::Key(key) => match app.mode() {
                Mode::Alert => app.dismiss_alert(),
                Mode::Compose => handle_compose_key(terminal, app, key)?,
                Mode::Summary => match key.code {
                    KeyCode::Esc | KeyCode::Char('q') => app.close_summary(),
                    KeyCode::Char('j') | KeyCode::Down => {
                        if let Some(s) = app.summary.as_mut() {
                            s.scroll_down();
                        }
                    }
                    KeyCode::Char('k') | KeyCode::Up => {
                        if let Some(s) = app.summary.as_mut() {
                            s.scroll_up();
                        }
                    }
                    _ => {}
                },
                Mode::AutoSendMenu => match key.code {
                    KeyCode::Esc | KeyCode::Char('a') => app.thread_view.auto_send.close(),
                    KeyCode::Char(' ') => app.toggle_auto_send(),
                    KeyCode::Char(c) if c.is_ascii_digit() => app.threshold_digit(c),
                    KeyCode::Backspace => app.threshold_backspace(),
                    KeyCode::Enter => app.save_auto_send(),
                    _ => {}
                },
                Mode::SummarizeMenu => match key.code {
                    KeyCode::Esc | KeyCode::Char('Z') => app.thread_view.summarize.close(),
                    KeyCode::Char('j') | KeyCode::Down => app.thread_view.summarize.next(),
                    KeyCode::Char('k') | KeyCode::Up => app.thread_view.summarize.previous(),
                    KeyCode::Enter => app.choose_summary_style(),
                    _ => {}
                },
                Mode::Normal => handle_normal_key(terminal, app, key)?,
            },
            Event::Resize(_, _) => {
                // Terminal resized - just redraw on next loop iteration
            }
            _ => {}
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn handle_normal_key(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    key: KeyEvent,
) -> Result<()> {
    app.clear_status();
    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Esc | KeyCode::Char('h') | KeyCode::Left => {
            app.focused_pane = Pane::Threads;
        }
        KeyCode::Char('l') | KeyCode::Right => {
            app.focused_pane = Pane::Thread;
        }
        KeyCode::Char('j') | KeyCode::Down => match app.focused_pane {
            Pane::Threads => app.next_thread(),
            Pane::Thread => app.next_email(),
        },
        KeyCode::Char('k') | KeyCode::Up => match app.focused_pane {
            Pane::Threads => app.previous_thread(),
            Pane::Thread => app.previous_email(),
        },
        KeyCode::Enter | KeyCode::Char(' ') => match app.focused_pane {
            Pane::Threads => app.focused_pane = Pane::Thread,
            Pane::Thread => app.toggle_selected_email(),
        },
        KeyCode::Char('e') => {
            let editable = app
                .selected_email()
                .is_some_and(|e| matches!(app.email_display(e), EmailDisplay::Editable { .. }));
            if !editable {
                app.set_status("Email is not editable");
            } else if let Some(draft) = app.selected_draft() {
                match edit_text(&draft) {
                    Ok(Some(text)) => app.set_selected_draft(text),
                    Ok(None) => app.set_status("Edit cancelled"),
                    Err(e) => {
                        warn!("Editor failed: {}", e);
                        app.set_status("Editor failed");
                    }
                }
                terminal.clear()?;
            }
        }
        KeyCode::Char('s') => app.send_selected(),
        KeyCode::Char('r') => app.reply_to_selected(),
        KeyCode::Char('d') => app.download_selected(),
        KeyCode::Char('?') => app.toggle_selected_description(),
        KeyCode::Char('S') => app.summarize(),
        KeyCode::Char('Z') => app.thread_view.summarize.toggle_open(),
        KeyCode::Char('g') => app.smart_reply(),
        KeyCode::Char('a') => app.toggle_auto_send_menu(),
        KeyCode::Char('c') => app.open_compose(),
        KeyCode::Char('R') => {
            app.load_threads();
            app.set_status("Refreshed");
        }
        _ => {}
    }
    Ok(())
}

fn handle_compose_key(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    key: KeyEvent,
) -> Result<()> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Esc => app.close_compose(),
        KeyCode::Char('s') if ctrl => app.submit_compose(),
        KeyCode::Char('a') if ctrl => app.attach_compose_image(),
        KeyCode::Char('e') if ctrl => {
            let body = app.compose.as_ref().map(|m| m.body.clone());
            if let Some(body) = body {
                match edit_text(&body) {
                    Ok(Some(text)) => {
                        if let Some(modal) = app.compose.as_mut() {
                            modal.body = text;
                        }
                    }
                    Ok(None) => {}
                    Err(e) => warn!("Editor failed: {}", e),
                }
                terminal.clear()?;
            }
        }
        KeyCode::Char('t') if ctrl => {
            if let Some(modal) = app.compose.as_mut() {
                modal.toggle_maximize();
            }
        }
        KeyCode::Tab => {
            if let Some(modal) = app.compose.as_mut() {
                modal.next_field();
            }
        }
        KeyCode::BackTab => {
            if let Some(modal) = app.compose.as_mut() {
                modal.prev_field();
            }
        }
        KeyCode::Enter => {
            let focus = app.compose.as_ref().map(|m| m.focus);
            match focus {
                Some(ComposeField::Body) => {
                    if let Some(modal) = app.compose.as_mut() {
                        modal.insert_char('\n');
                    }
                }
                Some(ComposeField::Attachment) => app.attach_compose_image(),
                _ => {
                    if let Some(modal) = app.compose.as_mut() {
                        modal.next_field();
                    }
                }
            }
        }
        KeyCode::Backspace => {
            if let Some(modal) = app.compose.as_mut() {
                modal.backspace();
            }
        }
        KeyCode::Char(c) if !ctrl => {
            if let Some(modal) = app.compose.as_mut() {
                modal.insert_char(c);
            }
        }
        _ => {}
    }
    Ok(())
}

/// Open `$EDITOR` on `initial`. Returns `None` if the editor exits with an error.
fn edit_text(initial: &str) -> Result<Option<String>> {
    use std::io::Write;

    let mut temp_file = tempfile::Builder::new().suffix(".txt").tempfile()?;
    write!(temp_file, "{}", initial)?;
    temp_file.flush()?;

    let path = temp_file.path().to_owned();

    // Open editor
    disable_raw_mode()?;
    execute!(std::io::stdout(), LeaveAlternateScreen, DisableMouseCapture)?;

    let editor = std::env::var("EDITOR").unwrap_or_else(|_| "nvim".to_string());
    let status = Command::new(&editor).arg(&path).status();

    enable_raw_mode()?;
    execute!(std::io::stdout(), EnterAlternateScreen, EnableMouseCapture)?;

    if !status?.success() {
        return Ok(None);
    }

    let content = std::fs::read_to_string(&path)?;
    // Editors append a trailing newline
    Ok(Some(content.strip_suffix('\n').unwrap_or(&content).to_string()))
}
