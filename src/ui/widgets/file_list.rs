// src/ui/widgets/file_list.rs
//! File browser widget, drawn as a list or a grid of the same rows.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

use super::HitMap;
use crate::{
    ui::rows::DisplayRow,
    view::{DisplayMode, ViewState},
};

/// Width of one grid cell in columns.
const GRID_CELL_WIDTH: u16 = 24;

/// Scroll state that survives between frames.
#[derive(Debug, Default)]
pub struct FileListState {
    pub list: ListState,
    /// First visible grid row
    pub(crate) grid_offset: usize,
    /// Cells per grid row in the last frame
    pub grid_columns: usize,
}

/// Number of cells that fit across `width`.
pub fn grid_columns(width: u16) -> usize {
    usize::from((width / GRID_CELL_WIDTH).max(1))
}

/// Keep the line holding `cursor_line` inside a window of `visible` lines.
fn scroll_to(offset: usize, cursor_line: usize, visible: usize) -> usize {
    let visible = visible.max(1);
    if cursor_line < offset {
        cursor_line
    } else if cursor_line >= offset + visible {
        cursor_line + 1 - visible
    } else {
        offset
    }
}

fn title(view: &ViewState, shown: usize, total: usize) -> String {
    let order = if view.sort_ascending { "↑" } else { "↓" };
    let mut title = format!(" {shown}/{total}  sort: {} {order} ", view.sort_key.label());
    if let Some(category) = view.type_filter {
        title.push_str(&format!(" type: {category} "));
    }
    if view.has_filters() {
        title.push_str(" [filtered] ");
    }
    title
}

/// Render the file browser and record where each row landed.
#[allow(clippy::too_many_arguments)]
pub fn render_file_list(
    f: &mut Frame<'_>,
    area: Rect,
    rows: &[DisplayRow],
    cursor: usize,
    view: &ViewState,
    total: usize,
    state: &mut FileListState,
    hits: &mut HitMap,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title(view, rows.len(), total));
    let inner = block.inner(area);

    if rows.is_empty() {
        let message = if total == 0 { "(empty)" } else { "(nothing matches the filters)" };
        f.render_widget(
            Paragraph::new(message)
                .style(Style::default().fg(Color::DarkGray))
                .block(block),
            area,
        );
        return;
    }

    match view.display_mode {
        DisplayMode::List => render_list(f, area, inner, block, rows, cursor, state, hits),
        DisplayMode::Grid => {
            f.render_widget(block, area);
            render_grid(f, inner, rows, cursor, state, hits);
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn render_list(
    f: &mut Frame<'_>,
    area: Rect,
    inner: Rect,
    block: Block<'_>,
    rows: &[DisplayRow],
    cursor: usize,
    state: &mut FileListState,
    hits: &mut HitMap,
) {
    // mark + icon + size + date take roughly 36 columns
    let name_width = usize::from(inner.width.saturating_sub(36)).max(8);
    let items: Vec<ListItem> = rows
        .iter()
        .map(|row| ListItem::new(row.list_line(name_width)))
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol(">> ");

    state.list.select(Some(cursor));
    f.render_stateful_widget(list, area, &mut state.list);

    let offset = state.list.offset();
    for (line, row) in rows.iter().skip(offset).take(usize::from(inner.height)).enumerate() {
        let rect = Rect::new(inner.x, inner.y + line as u16, inner.width, 1);
        hits.rows.push((rect, row.id.clone()));
    }
}

fn render_grid(
    f: &mut Frame<'_>,
    inner: Rect,
    rows: &[DisplayRow],
    cursor: usize,
    state: &mut FileListState,
    hits: &mut HitMap,
) {
    let columns = grid_columns(inner.width);
    let cell_width = inner.width / columns as u16;
    let visible = usize::from(inner.height);
    state.grid_columns = columns;
    state.grid_offset = scroll_to(state.grid_offset, cursor / columns, visible);

    let first = state.grid_offset * columns;
    for (i, row) in rows.iter().enumerate().skip(first).take(visible * columns) {
        let slot = i - first;
        let rect = Rect::new(
            inner.x + (slot % columns) as u16 * cell_width,
            inner.y + (slot / columns) as u16,
            cell_width,
            1,
        );
        let style = if i == cursor {
            Style::default().add_modifier(Modifier::REVERSED)
        } else {
            Style::default()
        };
        f.render_widget(
            Paragraph::new(row.grid_cell(usize::from(cell_width))).style(style),
            rect,
        );
        hits.rows.push((rect, row.id.clone()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_fits_at_least_one_column() {
        assert_eq!(grid_columns(10), 1);
        assert_eq!(grid_columns(GRID_CELL_WIDTH * 3 + 5), 3);
    }

    #[test]
    fn scrolling_keeps_cursor_visible() {
        assert_eq!(scroll_to(0, 3, 5), 0);
        assert_eq!(scroll_to(0, 7, 5), 3);
        assert_eq!(scroll_to(6, 2, 5), 2);
        assert_eq!(scroll_to(0, 0, 0), 0);
    }
}
