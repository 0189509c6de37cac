// src/ui/keybindings.rs
//! Keyboard input handling and key mappings.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::{
    app::{
        editor::CursorMove,
        prompt::{Mode, PromptKind},
        state::Action,
    },
    view::DisplayMode,
};

/// Columns the grid view lays cells out in; the renderer reports the real count.
pub const DEFAULT_GRID_COLUMNS: usize = 4;

/// Convert a key event to an action for the current mode.
///
/// `grid_columns` is only consulted in grid mode, where vertical movement
/// jumps a whole row of cells.
pub fn key_to_action(
    key: &KeyEvent,
    mode: &Mode,
    display: DisplayMode,
    grid_columns: usize,
) -> Option<Action> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }
    match mode {
        Mode::Prompt(_) => prompt_key(key),
        Mode::ConfirmDelete { .. } => match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                Some(Action::ConfirmDelete(true))
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                Some(Action::ConfirmDelete(false))
            }
            _ => None,
        },
        Mode::Edit(_) => edit_key(key),
        Mode::Normal => normal_key(key, display, grid_columns.max(1)),
    }
}

fn edit_key(key: &KeyEvent) -> Option<Action> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return (key.code == KeyCode::Char('s')).then_some(Action::SaveEdit);
    }
    let action = match key.code {
        KeyCode::Esc => Action::CancelEdit,
        KeyCode::Enter => Action::EditNewline,
        KeyCode::Backspace => Action::EditBackspace,
        KeyCode::Tab => Action::EditInput('\t'),
        KeyCode::Left => Action::EditMove(CursorMove::Left),
        KeyCode::Right => Action::EditMove(CursorMove::Right),
        KeyCode::Up => Action::EditMove(CursorMove::Up),
        KeyCode::Down => Action::EditMove(CursorMove::Down),
        KeyCode::Home => Action::EditMove(CursorMove::LineStart),
        KeyCode::End => Action::EditMove(CursorMove::LineEnd),
        KeyCode::Char(c) => Action::EditInput(c),
        _ => return None,
    };
    Some(action)
}

fn prompt_key(key: &KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Enter => Some(Action::PromptSubmit),
        KeyCode::Esc => Some(Action::PromptCancel),
        KeyCode::Backspace => Some(Action::PromptBackspace),
        KeyCode::Char(c) => Some(Action::PromptInput(c)),
        _ => None,
    }
}

fn normal_key(key: &KeyEvent, display: DisplayMode, columns: usize) -> Option<Action> {
    let row_step = match display {
        DisplayMode::List => 1,
        DisplayMode::Grid => columns as isize,
    };
    let grid = display == DisplayMode::Grid;
    let action = match key.code {
        KeyCode::Down | KeyCode::Char('j') => Action::CursorBy(row_step),
        KeyCode::Up | KeyCode::Char('k') => Action::CursorBy(-row_step),
        KeyCode::Right if grid => Action::CursorBy(1),
        KeyCode::Left if grid => Action::CursorBy(-1),
        KeyCode::PageDown => Action::CursorBy(10 * row_step),
        KeyCode::PageUp => Action::CursorBy(-10 * row_step),
        KeyCode::Home => Action::CursorTo(0),
        KeyCode::End => Action::CursorTo(usize::MAX),
        KeyCode::Enter | KeyCode::Right | KeyCode::Char('l') => Action::Activate,
        KeyCode::Left | KeyCode::Backspace | KeyCode::Char('h') => Action::Ascend,
        KeyCode::Char('o') => Action::OpenExternal,
        KeyCode::Char('r') => Action::Context,
        KeyCode::Char('O') => Action::BeginPrompt(PromptKind::OpenFolder),
        KeyCode::Char('g') => Action::BeginPrompt(PromptKind::JumpTo),
        KeyCode::Char('/') => Action::BeginPrompt(PromptKind::Search),
        KeyCode::Char('z') => Action::BeginPrompt(PromptKind::SizeRange),
        KeyCode::Char('d') => Action::BeginPrompt(PromptKind::DateRange),
        KeyCode::Char('n') => Action::BeginPrompt(PromptKind::CreateFolder),
        KeyCode::Char('u') => Action::BeginPrompt(PromptKind::Upload),
        KeyCode::Char('s') => Action::ToggleSortKey,
        KeyCode::Char('S') => Action::ToggleSortOrder,
        KeyCode::Char('v') => Action::ToggleDisplayMode,
        KeyCode::Char('t') => Action::CycleTypeFilter,
        KeyCode::Char('c') => Action::ClearFilters,
        KeyCode::Char(' ') => Action::ToggleSelect,
        KeyCode::Char('a') => Action::SelectAll,
        KeyCode::Char('A') => Action::SelectNone,
        KeyCode::Char('D') | KeyCode::Delete => Action::RequestDelete,
        KeyCode::Char('p') => Action::TogglePlayback,
        KeyCode::Char('e') => Action::BeginEdit,
        KeyCode::Char('J') => Action::ScrollPreview(1),
        KeyCode::Char('K') => Action::ScrollPreview(-1),
        KeyCode::Char('q') => Action::Quit,
        _ => return None,
    };
    Some(action)
}

/// One-line key reference for the status bar.
pub fn help_line(mode: &Mode) -> &'static str {
    match mode {
        Mode::Normal => {
            "O open  g jump  / search  t type  z size  d date  c clear  s/S sort  v view  \
             space select  D delete  n mkdir  u upload  r rename  e edit  J/K scroll  \
             o open ext  p play  q quit"
        }
        Mode::Prompt(_) => "Enter confirm  Esc cancel",
        Mode::ConfirmDelete { .. } => "y delete  n keep",
        Mode::Edit(_) => "Ctrl-S save  Esc close",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        app::{editor::EditBuffer, prompt::Prompt},
        fs::{DirectoryHandle, EntryKind},
    };

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn arrows_move_by_row_in_each_mode() {
        let down = key(KeyCode::Down);
        assert_eq!(
            key_to_action(&down, &Mode::Normal, DisplayMode::List, 4),
            Some(Action::CursorBy(1))
        );
        assert_eq!(
            key_to_action(&down, &Mode::Normal, DisplayMode::Grid, 4),
            Some(Action::CursorBy(4))
        );
        assert_eq!(
            key_to_action(&key(KeyCode::Left), &Mode::Normal, DisplayMode::List, 4),
            Some(Action::Ascend)
        );
        assert_eq!(
            key_to_action(&key(KeyCode::Left), &Mode::Normal, DisplayMode::Grid, 4),
            Some(Action::CursorBy(-1))
        );
    }

    #[test]
    fn prompt_mode_captures_letters() {
        let mode = Mode::Prompt(Prompt::new(PromptKind::Search, ""));
        assert_eq!(
            key_to_action(&key(KeyCode::Char('q')), &mode, DisplayMode::List, 4),
            Some(Action::PromptInput('q'))
        );
        assert_eq!(
            key_to_action(&key(KeyCode::Esc), &mode, DisplayMode::List, 4),
            Some(Action::PromptCancel)
        );
    }

    #[test]
    fn confirm_mode_only_takes_yes_or_no() {
        let mode = Mode::ConfirmDelete { count: 2 };
        assert_eq!(
            key_to_action(&key(KeyCode::Char('y')), &mode, DisplayMode::List, 4),
            Some(Action::ConfirmDelete(true))
        );
        assert_eq!(
            key_to_action(&key(KeyCode::Char('x')), &mode, DisplayMode::List, 4),
            None
        );
    }

    #[test]
    fn edit_mode_types_text_and_saves_on_ctrl_s() {
        let id = DirectoryHandle::new("/k").child("a.txt", EntryKind::File).id();
        let mode = Mode::Edit(EditBuffer::new(id, "a.txt", "x"));
        assert_eq!(
            key_to_action(&key(KeyCode::Char('q')), &mode, DisplayMode::List, 4),
            Some(Action::EditInput('q'))
        );
        assert_eq!(
            key_to_action(&key(KeyCode::Up), &mode, DisplayMode::Grid, 4),
            Some(Action::EditMove(CursorMove::Up))
        );
        let save = KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL);
        assert_eq!(
            key_to_action(&save, &mode, DisplayMode::List, 4),
            Some(Action::SaveEdit)
        );
        assert_eq!(
            key_to_action(&key(KeyCode::Esc), &mode, DisplayMode::List, 4),
            Some(Action::CancelEdit)
        );
        assert_eq!(
            key_to_action(&key(KeyCode::Char('e')), &Mode::Normal, DisplayMode::List, 4),
            Some(Action::BeginEdit)
        );
        assert_eq!(
            key_to_action(&key(KeyCode::Char('J')), &Mode::Normal, DisplayMode::List, 4),
            Some(Action::ScrollPreview(1))
        );
    }

    #[test]
    fn ctrl_c_always_quits() {
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        let mode = Mode::Prompt(Prompt::new(PromptKind::Upload, ""));
        assert_eq!(
            key_to_action(&ctrl_c, &mode, DisplayMode::List, 4),
            Some(Action::Quit)
        );
    }
}
