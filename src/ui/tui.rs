// src/ui/tui.rs
//! Terminal setup, the draw loop and input routing.

use std::{
    io,
    time::{Duration, Instant},
};

use anyhow::Result;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event as CEvent, MouseButton, MouseEvent,
        MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Frame, Terminal, backend::CrosstermBackend};
use ratatui_image::picker::Picker;
use tracing::{debug, info, warn};

use super::{
    keybindings::{DEFAULT_GRID_COLUMNS, key_to_action},
    layout::compute_layout,
    rows::Gesture,
    widgets::{
        FileListState, HitMap, ImageCache, render_breadcrumbs, render_editor, render_file_list,
        render_info, render_preview, render_prompt, render_status,
    },
};
use crate::{
    app::{App, prompt::Mode, state::Action},
    fs::EntryId,
};

/// Fallback cell size when the terminal does not report one.
const FALLBACK_FONT_SIZE: (u16, u16) = (8, 12);

/// Per-frame UI state that is not part of the application model.
struct Tui {
    files: FileListState,
    hits: HitMap,
    images: ImageCache,
    last_click: Option<(EntryId, Instant)>,
    double_click: Duration,
}

impl Tui {
    fn new(picker: Picker, double_click: Duration) -> Self {
        Self {
            files: FileListState {
                grid_columns: DEFAULT_GRID_COLUMNS,
                ..FileListState::default()
            },
            hits: HitMap::default(),
            images: ImageCache::new(picker),
            last_click: None,
            double_click,
        }
    }

    fn draw(&mut self, f: &mut Frame<'_>, app: &App) {
        let layout = compute_layout(f.area());
        self.hits.clear();

        render_breadcrumbs(f, layout.header, &app.navigation().breadcrumbs(), &mut self.hits);
        render_file_list(
            f,
            layout.files,
            app.rows(),
            app.cursor(),
            &app.view_state,
            app.entry_count(),
            &mut self.files,
            &mut self.hits,
        );
        self.hits.preview = layout.preview;
        match &app.mode {
            Mode::Edit(buffer) => render_editor(f, layout.preview, buffer),
            _ => render_preview(
                f,
                layout.preview,
                app.preview(),
                app.preview_generation(),
                app.preview_scroll(),
                app.is_playing(),
                &mut self.images,
            ),
        }
        render_info(f, layout.info, app.preview());
        render_status(f, layout.status, &app.mode, app.status_notice(), app.selection.len());

        if let Mode::Prompt(prompt) = &app.mode {
            render_prompt(f, f.area(), prompt);
        }
    }

    /// Turn a mouse event into an action using the regions of the last frame.
    fn on_mouse(&mut self, mouse: MouseEvent, mode: &Mode) -> Option<Action> {
        if *mode != Mode::Normal {
            return None;
        }
        let (column, row) = (mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some(index) = self.hits.crumb_at(column, row) {
                    return Some(Action::JumpTo(index));
                }
                let id = self.hits.row_at(column, row)?.clone();
                let now = Instant::now();
                let repeated = self
                    .last_click
                    .as_ref()
                    .is_some_and(|(last, at)| *last == id && now.duration_since(*at) <= self.double_click);
                let gesture = if repeated {
                    self.last_click = None;
                    Gesture::DoubleClick
                } else {
                    self.last_click = Some((id.clone(), now));
                    Gesture::Click
                };
                Some(Action::Row { id, gesture })
            }
            MouseEventKind::Down(MouseButton::Right) => {
                let id = self.hits.row_at(column, row)?.clone();
                Some(Action::Row {
                    id,
                    gesture: Gesture::Context,
                })
            }
            MouseEventKind::ScrollDown if self.hits.over_preview(column, row) => {
                Some(Action::ScrollPreview(3))
            }
            MouseEventKind::ScrollUp if self.hits.over_preview(column, row) => {
                Some(Action::ScrollPreview(-3))
            }
            MouseEventKind::ScrollDown => Some(Action::CursorBy(3)),
            MouseEventKind::ScrollUp => Some(Action::CursorBy(-3)),
            _ => None,
        }
    }

    fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
        app: &mut App,
    ) -> Result<()> {
        let tick_rate = Duration::from_millis(250);
        while !app.should_quit() {
            terminal.draw(|f| self.draw(f, app))?;

            if !event::poll(tick_rate)? {
                continue;
            }
            let action = match event::read()? {
                CEvent::Key(key) => key_to_action(
                    &key,
                    &app.mode,
                    app.view_state.display_mode,
                    self.files.grid_columns,
                ),
                CEvent::Mouse(mouse) => self.on_mouse(mouse, &app.mode),
                _ => None,
            };
            if let Some(action) = action {
                debug!(?action, "dispatch");
                app.dispatch(action);
            }
        }
        Ok(())
    }
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Run the interface until the user quits.
pub fn run(mut app: App) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Ask the terminal for its graphics protocol and cell size
    let picker = Picker::from_query_stdio().unwrap_or_else(|err| {
        warn!(?err, "terminal graphics query failed, using half-block images");
        Picker::from_fontsize(FALLBACK_FONT_SIZE)
    });
    info!(protocol = ?picker.protocol_type(), "image protocol selected");

    let mut ui = Tui::new(picker, Duration::from_millis(app.config.double_click_ms));
    let result = ui.event_loop(&mut terminal, &mut app);
    restore_terminal(&mut terminal)?;
    result
}
