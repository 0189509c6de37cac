// src/app/state.rs
//! Application state management.
//!
//! All user actions enter through [`App::dispatch`]. Each one runs to
//! completion and leaves a freshly computed view behind before the next.
//! Notices raised by an action stay on the status line until the next one.

use std::path::PathBuf;

use tracing::{error, info, warn};

use super::{
    editor::{CursorMove, EditBuffer},
    prompt::{Mode, Prompt, PromptKind, split_paths},
};
use crate::{
    config::Config,
    error::FsError,
    fs::{
        DirectoryHandle, Entry, EntryId, NavigationError, NavigationStack, StorageHost,
        list_entries, ops,
    },
    preview::{AudioPlayer, Preview, PreviewSurface, load_preview},
    ui::rows::{DisplayRow, Gesture, RowAction, project_rows},
    view::{DateRange, SelectionSet, SizeRange, ViewState, compute_view},
};

/// Keep this many notices around for the status line.
const NOTICE_HISTORY: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warn,
    Error,
}

/// A user-facing message raised by an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

/// Every user action the application understands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Move the cursor by this many rows (negative is up).
    CursorBy(isize),
    CursorTo(usize),
    /// Click handler of the row under the cursor.
    Activate,
    /// Double-click handler of the row under the cursor.
    OpenExternal,
    /// Context handler of the row under the cursor.
    Context,
    Row { id: EntryId, gesture: Gesture },
    Ascend,
    JumpTo(usize),
    OpenFolder(String),
    ToggleSortKey,
    ToggleSortOrder,
    ToggleDisplayMode,
    CycleTypeFilter,
    SetSearch(String),
    SetSizeRange(String),
    SetDateRange(String),
    ClearFilters,
    ToggleSelect,
    SelectAll,
    SelectNone,
    RequestDelete,
    ConfirmDelete(bool),
    CreateFolder(String),
    Upload(Vec<PathBuf>),
    Rename { id: EntryId, new_name: String },
    TogglePlayback,
    /// Scroll the text preview by this many lines.
    ScrollPreview(isize),
    /// Open the previewed text file in the editor.
    BeginEdit,
    EditInput(char),
    EditNewline,
    EditBackspace,
    EditMove(CursorMove),
    /// Write the editor buffer back to its file.
    SaveEdit,
    CancelEdit,
    BeginPrompt(PromptKind),
    PromptInput(char),
    PromptBackspace,
    PromptSubmit,
    PromptCancel,
    Quit,
}

/// Main application state.
pub struct App {
    host: Box<dyn StorageHost>,
    pub config: Config,
    nav: NavigationStack,
    /// Unordered children of the current directory
    entries: Vec<Entry>,
    pub view_state: ViewState,
    pub selection: SelectionSet,
    /// Current projection of the view
    rows: Vec<DisplayRow>,
    cursor: usize,
    preview: Option<Preview>,
    /// Bumped whenever the preview is cleared, so renderers drop cached surfaces
    preview_generation: u64,
    /// First text preview line shown
    preview_scroll: usize,
    player: AudioPlayer,
    notices: Vec<Notice>,
    /// Set when the action being dispatched raised a notice
    fresh_notice: bool,
    pub mode: Mode,
    quit: bool,
}

impl App {
    /// Create an application with no folder open.
    pub fn new(host: Box<dyn StorageHost>, config: Config) -> Self {
        let view_state = config.view_state();
        Self {
            host,
            config,
            nav: NavigationStack::default(),
            entries: Vec::new(),
            view_state,
            selection: SelectionSet::default(),
            rows: Vec::new(),
            cursor: 0,
            preview: None,
            preview_generation: 0,
            preview_scroll: 0,
            player: AudioPlayer::new(),
            notices: Vec::new(),
            fresh_notice: false,
            mode: Mode::Normal,
            quit: false,
        }
    }

    pub fn rows(&self) -> &[DisplayRow] {
        &self.rows
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn cursor_row(&self) -> Option<&DisplayRow> {
        self.rows.get(self.cursor)
    }

    pub fn navigation(&self) -> &NavigationStack {
        &self.nav
    }

    pub fn current_dir(&self) -> Option<&DirectoryHandle> {
        self.nav.current()
    }

    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    pub fn preview(&self) -> Option<&Preview> {
        self.preview.as_ref()
    }

    pub fn preview_generation(&self) -> u64 {
        self.preview_generation
    }

    pub fn preview_scroll(&self) -> usize {
        self.preview_scroll
    }

    pub fn is_playing(&self) -> bool {
        self.player.is_playing()
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    pub fn last_notice(&self) -> Option<&Notice> {
        self.notices.last()
    }

    /// The notice raised by the most recent action, if any.
    pub fn status_notice(&self) -> Option<&Notice> {
        self.notices.last().filter(|_| self.fresh_notice)
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Apply one user action.
    pub fn dispatch(&mut self, action: Action) {
        self.fresh_notice = false;
        self.apply(action);
    }

    fn apply(&mut self, action: Action) {
        match action {
            Action::CursorBy(delta) => {
                let last = self.rows.len().saturating_sub(1);
                self.cursor = self.cursor.saturating_add_signed(delta).min(last);
            }
            Action::CursorTo(index) => {
                self.cursor = index.min(self.rows.len().saturating_sub(1));
            }
            Action::Activate => self.gesture_on_cursor(Gesture::Click),
            Action::OpenExternal => self.gesture_on_cursor(Gesture::DoubleClick),
            Action::Context => self.gesture_on_cursor(Gesture::Context),
            Action::Row { id, gesture } => {
                if let Some(pos) = self.rows.iter().position(|r| r.id == id) {
                    self.cursor = pos;
                    self.gesture_on_cursor(gesture);
                }
            }
            Action::Ascend => self.navigate(NavigationStack::ascend),
            Action::JumpTo(index) => self.navigate(|nav| nav.jump_to(index)),
            Action::OpenFolder(location) => self.open_folder(&location),
            Action::ToggleSortKey => {
                self.view_state.sort_key = self.view_state.sort_key.toggled();
                self.recompute();
            }
            Action::ToggleSortOrder => {
                self.view_state.sort_ascending = !self.view_state.sort_ascending;
                self.recompute();
            }
            Action::ToggleDisplayMode => {
                self.view_state.display_mode = self.view_state.display_mode.toggled();
            }
            Action::CycleTypeFilter => {
                self.view_state.type_filter = self.view_state.next_type_filter();
                self.recompute();
            }
            Action::SetSearch(text) => {
                self.view_state.search_text = text;
                self.recompute();
            }
            Action::SetSizeRange(input) => {
                let parsed = if input.trim().is_empty() {
                    Ok(SizeRange::default())
                } else {
                    SizeRange::parse(&input)
                };
                match parsed {
                    Ok(range) => {
                        self.view_state.size_range = range;
                        self.recompute();
                    }
                    Err(err) => self.notify(NoticeLevel::Warn, err.to_string()),
                }
            }
            Action::SetDateRange(input) => {
                let parsed = if input.trim().is_empty() {
                    Ok(DateRange::default())
                } else {
                    DateRange::parse(&input)
                };
                match parsed {
                    Ok(range) => {
                        self.view_state.date_range = range;
                        self.recompute();
                    }
                    Err(err) => self.notify(NoticeLevel::Warn, err.to_string()),
                }
            }
            Action::ClearFilters => {
                self.view_state.clear_filters();
                self.recompute();
            }
            Action::ToggleSelect => {
                let id = self.cursor_row().map(|r| r.id.clone());
                if let Some(entry) = id.and_then(|id| self.entry(&id)).cloned() {
                    if self.selection.toggle(&entry) {
                        self.recompute();
                    }
                }
            }
            Action::SelectAll => {
                let visible: Vec<&Entry> = compute_view(&self.entries, &self.view_state);
                self.selection.select_all(visible);
                self.recompute();
            }
            Action::SelectNone => {
                self.selection.clear();
                self.recompute();
            }
            Action::RequestDelete => self.request_delete(),
            Action::ConfirmDelete(confirmed) => {
                self.mode = Mode::Normal;
                if confirmed {
                    self.delete_selected();
                }
            }
            Action::CreateFolder(name) => self.create_folder(&name),
            Action::Upload(paths) => self.upload(&paths),
            Action::Rename { id, new_name } => self.rename(&id, &new_name),
            Action::TogglePlayback => self.toggle_playback(),
            Action::ScrollPreview(delta) => {
                let max = match self.preview.as_ref().map(|p| &p.surface) {
                    Some(PreviewSurface::Text { lines, .. }) => lines.len().saturating_sub(1),
                    _ => 0,
                };
                self.preview_scroll = self.preview_scroll.saturating_add_signed(delta).min(max);
            }
            Action::BeginEdit => self.begin_edit(),
            Action::EditInput(c) => self.edit_buffer(|buf| buf.insert(c)),
            Action::EditNewline => self.edit_buffer(EditBuffer::newline),
            Action::EditBackspace => self.edit_buffer(EditBuffer::backspace),
            Action::EditMove(direction) => self.edit_buffer(|buf| buf.move_cursor(direction)),
            Action::SaveEdit => self.save_edit(),
            Action::CancelEdit => self.cancel_edit(),
            Action::BeginPrompt(kind) => {
                let initial = match &kind {
                    PromptKind::Search => self.view_state.search_text.clone(),
                    PromptKind::Rename(id) => self
                        .entry(id)
                        .map(|e| e.name().to_string())
                        .unwrap_or_default(),
                    _ => String::new(),
                };
                self.mode = Mode::Prompt(Prompt::new(kind, initial));
            }
            Action::PromptInput(c) => self.edit_prompt(|input| input.push(c)),
            Action::PromptBackspace => self.edit_prompt(|input| {
                input.pop();
            }),
            Action::PromptSubmit => self.submit_prompt(),
            Action::PromptCancel => self.cancel_prompt(),
            Action::Quit => {
                self.player.stop();
                self.quit = true;
            }
        }
    }

    fn entry(&self, id: &EntryId) -> Option<&Entry> {
        self.entries.iter().find(|e| &e.id() == id)
    }

    /// Raise a notice on the status line and mirror it to the log.
    pub fn notify(&mut self, level: NoticeLevel, message: impl Into<String>) {
        let message = message.into();
        match level {
            NoticeLevel::Info => info!(notice = %message),
            NoticeLevel::Warn => warn!(notice = %message),
            NoticeLevel::Error => error!(notice = %message),
        }
        self.notices.push(Notice { level, message });
        self.fresh_notice = true;
        if self.notices.len() > NOTICE_HISTORY {
            self.notices.remove(0);
        }
    }

    /// Surface an `FsError`. A cancelled picker stays silent.
    fn report(&mut self, context: &str, err: FsError) {
        if err.is_cancelled() {
            return;
        }
        self.notify(NoticeLevel::Error, format!("{context}: {err}"));
    }

    fn require_dir(&mut self) -> Option<DirectoryHandle> {
        let dir = self.nav.current().cloned();
        if dir.is_none() {
            self.notify(NoticeLevel::Warn, "open a folder first");
        }
        dir
    }

    /// Re-project rows from the stored entries, keeping the cursor on the same entry.
    fn recompute(&mut self) {
        let focused = self.cursor_row().map(|r| r.id.clone());
        let view = compute_view(&self.entries, &self.view_state);
        self.rows = project_rows(&view, &self.selection);
        self.cursor = focused
            .and_then(|id| self.rows.iter().position(|r| r.id == id))
            .unwrap_or(self.cursor)
            .min(self.rows.len().saturating_sub(1));
    }

    /// Re-enumerate the current directory. On failure the previous entries stay.
    fn reload(&mut self) {
        let Some(dir) = self.nav.current().cloned() else {
            return;
        };
        match list_entries(self.host.as_ref(), &dir) {
            Ok(entries) => self.entries = entries,
            Err(err) => self.report("reload failed", err),
        }
        self.recompute();
    }

    /// Apply a transition on a copy, list the target, and commit only if both succeed.
    fn navigate(&mut self, transition: impl FnOnce(&mut NavigationStack) -> Result<(), NavigationError>) {
        let mut next = self.nav.clone();
        if let Err(err) = transition(&mut next) {
            self.notify(NoticeLevel::Warn, err.to_string());
            return;
        }
        let Some(target) = next.current().cloned() else {
            return;
        };
        match list_entries(self.host.as_ref(), &target) {
            Ok(entries) => {
                info!(dir = %target.path().display(), "changed directory");
                self.nav = next;
                self.enter(entries);
            }
            Err(err) => self.report(&format!("cannot open {}", target.name()), err),
        }
    }

    fn enter(&mut self, entries: Vec<Entry>) {
        if matches!(self.mode, Mode::Edit(_)) {
            self.mode = Mode::Normal;
        }
        self.entries = entries;
        self.selection.clear();
        self.clear_preview();
        self.rows.clear();
        self.cursor = 0;
        self.recompute();
    }

    fn open_folder(&mut self, location: &str) {
        let dir = match self.host.pick_directory(location) {
            Ok(dir) => dir,
            Err(err) => return self.report("cannot open folder", err),
        };
        match list_entries(self.host.as_ref(), &dir) {
            Ok(entries) => {
                info!(dir = %dir.path().display(), "opened folder");
                self.nav.open_root(dir);
                self.enter(entries);
            }
            Err(err) => self.report(&format!("cannot open {}", dir.name()), err),
        }
    }

    fn gesture_on_cursor(&mut self, gesture: Gesture) {
        let action = self
            .cursor_row()
            .and_then(|row| row.handlers.action_for(gesture))
            .cloned();
        if let Some(action) = action {
            self.run_row_action(action);
        }
    }

    fn run_row_action(&mut self, action: RowAction) {
        match action {
            RowAction::Descend(id) => {
                if let Some(target) = self.entry(&id).and_then(|e| e.handle.as_directory()) {
                    self.navigate(|nav| nav.descend(target));
                }
            }
            RowAction::Preview(id) => self.show_preview(&id),
            RowAction::OpenExternal(id) => {
                if let Err(err) = open::that(id.path()) {
                    self.notify(NoticeLevel::Error, format!("cannot open {id}: {err}"));
                }
            }
            RowAction::Rename(id) => self.apply(Action::BeginPrompt(PromptKind::Rename(id))),
        }
    }

    /// Drop every preview surface: audio, image, text.
    fn clear_preview(&mut self) {
        self.player.stop();
        self.preview_scroll = 0;
        if self.preview.take().is_some() {
            self.preview_generation += 1;
        }
    }

    fn show_preview(&mut self, id: &EntryId) {
        self.clear_preview();
        let Some(entry) = self.entry(id).cloned() else {
            return;
        };
        match load_preview(self.host.as_ref(), &entry, self.config.preview_limits()) {
            Ok(preview) => {
                self.preview_generation += 1;
                self.preview = Some(preview);
            }
            Err(err) => self.report(&format!("cannot preview {}", entry.name()), err),
        }
    }

    fn toggle_playback(&mut self) {
        let Some(preview) = &self.preview else {
            return;
        };
        if !matches!(preview.surface, PreviewSurface::Audio(_)) {
            return;
        }
        if self.player.is_playing() {
            self.player.stop();
            return;
        }
        let path = preview.id.path().to_path_buf();
        if let Err(err) = self.player.play(&path) {
            self.notify(NoticeLevel::Error, format!("playback failed: {err}"));
        }
    }

    fn request_delete(&mut self) {
        if self.selection.is_empty() {
            self.notify(NoticeLevel::Warn, "nothing selected to delete");
            return;
        }
        if self.config.confirm_delete {
            self.mode = Mode::ConfirmDelete {
                count: self.selection.len(),
            };
        } else {
            self.delete_selected();
        }
    }

    fn delete_selected(&mut self) {
        let Some(dir) = self.require_dir() else {
            return;
        };
        let targets = self.selection.resolve(&self.entries);
        if self
            .preview
            .as_ref()
            .is_some_and(|p| targets.iter().any(|t| t.id() == p.id))
        {
            self.clear_preview();
        }
        let report = ops::delete_entries(self.host.as_ref(), &dir, &targets);
        for (name, err) in report.failed {
            self.notify(NoticeLevel::Error, format!("cannot delete {name}: {err}"));
        }
        if !report.succeeded.is_empty() {
            self.notify(
                NoticeLevel::Info,
                format!("deleted {} item(s)", report.succeeded.len()),
            );
        }
        self.selection.clear();
        self.reload();
    }

    fn create_folder(&mut self, name: &str) {
        let Some(dir) = self.require_dir() else {
            return;
        };
        match ops::create_folder(self.host.as_ref(), &dir, name.trim()) {
            Ok(created) => {
                self.notify(NoticeLevel::Info, format!("created folder {}", created.name()));
                self.reload();
            }
            Err(err) => self.report("cannot create folder", err),
        }
    }

    fn upload(&mut self, paths: &[PathBuf]) {
        let Some(dir) = self.require_dir() else {
            return;
        };
        if paths.is_empty() {
            return;
        }
        let report = ops::upload(self.host.as_ref(), &dir, paths);
        for (source, err) in report.failed {
            self.notify(NoticeLevel::Error, format!("cannot upload {source}: {err}"));
        }
        if !report.succeeded.is_empty() {
            self.notify(
                NoticeLevel::Info,
                format!("uploaded {} file(s)", report.succeeded.len()),
            );
        }
        self.reload();
    }

    fn rename(&mut self, id: &EntryId, new_name: &str) {
        let new_name = new_name.trim();
        let unchanged = self.entry(id).is_some_and(|e| e.name() == new_name);
        if new_name.is_empty() || unchanged {
            return;
        }
        if let Err(err) = ops::rename(id, new_name) {
            self.notify(NoticeLevel::Warn, format!("cannot rename: {err}"));
        }
    }

    /// Load the previewed file into the editor. Only fully previewed text qualifies.
    fn begin_edit(&mut self) {
        let Some(preview) = &self.preview else {
            self.notify(NoticeLevel::Warn, "open a text file first");
            return;
        };
        if !matches!(preview.surface, PreviewSurface::Text { truncated: false, .. }) {
            let message = format!("{} cannot be edited here", preview.snapshot.name);
            self.notify(NoticeLevel::Warn, message);
            return;
        }
        let id = preview.id.clone();
        let Some(entry) = self.entry(&id).cloned() else {
            return;
        };
        let text = self
            .host
            .read_head(&entry.handle, self.config.preview_max_bytes)
            .map(String::from_utf8);
        match text {
            Ok(Ok(text)) => {
                info!(file = entry.name(), "editing");
                self.mode = Mode::Edit(EditBuffer::new(id, entry.name(), &text));
            }
            Ok(Err(_)) => {
                self.notify(NoticeLevel::Warn, format!("{} is not UTF-8 text", entry.name()));
            }
            Err(err) => self.report(&format!("cannot edit {}", entry.name()), err),
        }
    }

    fn edit_buffer(&mut self, edit: impl FnOnce(&mut EditBuffer)) {
        if let Mode::Edit(buffer) = &mut self.mode {
            edit(buffer);
        }
    }

    /// Write the buffer into the current folder, then refresh the listing and preview.
    fn save_edit(&mut self) {
        let Mode::Edit(buffer) = &self.mode else {
            return;
        };
        let (id, name, text) = (buffer.id.clone(), buffer.name.clone(), buffer.text());
        let Some(dir) = self.require_dir() else {
            return;
        };
        if let Err(err) = self.host.write_file(&dir, &name, text.as_bytes()) {
            return self.report(&format!("cannot save {name}"), err);
        }
        self.edit_buffer(EditBuffer::mark_saved);
        self.notify(NoticeLevel::Info, format!("saved {name}"));
        self.reload();
        self.show_preview(&id);
    }

    fn cancel_edit(&mut self) {
        let Mode::Edit(buffer) = std::mem::take(&mut self.mode) else {
            return;
        };
        if buffer.is_dirty() {
            self.notify(NoticeLevel::Info, format!("discarded changes to {}", buffer.name));
        }
    }

    fn edit_prompt(&mut self, edit: impl FnOnce(&mut String)) {
        let Mode::Prompt(prompt) = &mut self.mode else {
            return;
        };
        edit(&mut prompt.input);
        // Search filters live as the user types.
        if prompt.kind == PromptKind::Search {
            let text = prompt.input.clone();
            self.apply(Action::SetSearch(text));
        }
    }

    fn submit_prompt(&mut self) {
        let Mode::Prompt(prompt) = std::mem::take(&mut self.mode) else {
            return;
        };
        let input = prompt.input;
        let action = match prompt.kind {
            PromptKind::OpenFolder => Action::OpenFolder(input),
            PromptKind::JumpTo => match input.trim().parse() {
                Ok(index) => Action::JumpTo(index),
                Err(_) => {
                    self.notify(NoticeLevel::Warn, format!("'{input}' is not a breadcrumb number"));
                    return;
                }
            },
            PromptKind::Search => Action::SetSearch(input),
            PromptKind::SizeRange => Action::SetSizeRange(input),
            PromptKind::DateRange => Action::SetDateRange(input),
            PromptKind::CreateFolder => Action::CreateFolder(input),
            PromptKind::Upload => Action::Upload(split_paths(&input)),
            PromptKind::Rename(id) => Action::Rename { id, new_name: input },
        };
        self.apply(action);
    }

    fn cancel_prompt(&mut self) {
        let Mode::Prompt(prompt) = std::mem::take(&mut self.mode) else {
            return;
        };
        if prompt.kind == PromptKind::Search {
            self.apply(Action::SetSearch(prompt.original));
        }
    }
}
