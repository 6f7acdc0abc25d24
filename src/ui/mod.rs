mod compose;
mod dropdowns;
mod help;
mod pane;
mod summary;
mod thread;
mod threads;

pub use compose::*;
pub use dropdowns::*;
pub use help::*;
pub use pane::*;
pub use summary::*;
pub use thread::*;
pub use threads::*;

use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

use crate::app::{App, Mode, Pane as Focus};

/// Draw the whole screen: thread list, open thread, overlays, help bar
pub fn render(f: &mut Frame, app: &mut App) {
    let area = f.area();
    let config = app.config.clone();
    let theme = &config.theme;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(area);

    let list_pct = config.layout.threads_width.min(80);
    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(list_pct),
            Constraint::Percentage(100 - list_pct),
        ])
        .split(chunks[0]);

    render_threads(
        f,
        panes[0],
        &app.threads,
        &mut app.list_state,
        app.focused_pane == Focus::Threads,
        theme,
        config.layout.date_width,
    );
    let scroll = render_thread(f, panes[1], app, app.focused_pane == Focus::Thread, theme);
    app.thread_view.scroll = scroll;

    let mode = app.mode();
    if app.thread_view.auto_send.open {
        render_auto_send(
            f,
            panes[1],
            &app.thread_view.auto_send,
            app.settings.get(),
            theme,
        );
    }
    if app.thread_view.summarize.open {
        render_summarize_menu(f, panes[1], &app.thread_view.summarize, theme);
    }
    if let Some(summary) = &app.summary {
        render_summary(f, chunks[0], summary, theme);
    }
    if let Some(compose) = &app.compose {
        render_compose(f, chunks[0], compose, theme);
    }
    if let Some(msg) = &app.alert {
        render_alert(f, chunks[0], msg, theme);
    }

    if mode == Mode::Compose {
        render_compose_help(f, chunks[1], theme);
    } else {
        render_help(
            f,
            chunks[1],
            mode,
            app.focused_pane,
            app.status_message.as_deref(),
            theme,
        );
    }
}
