// src/ui/widgets/preview_pane.rs
//! Preview panel and the file info box under it.

use image::DynamicImage;
use ratatui::{
    Frame,
    layout::{Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use ratatui_image::{Image, Resize, picker::Picker, protocol::Protocol};
use tracing::warn;

use crate::{
    app::editor::EditBuffer,
    fs::format_bytes,
    preview::{Preview, PreviewKind, PreviewSurface},
    ui::rows::format_modified,
};

/// Terminal image protocol for the current preview, rebuilt when the preview
/// or the panel size changes.
pub struct ImageCache {
    picker: Picker,
    cached: Option<(u64, Rect, Protocol)>,
}

impl ImageCache {
    pub fn new(picker: Picker) -> Self {
        Self {
            picker,
            cached: None,
        }
    }

    /// Drop the cached protocol once its preview is gone.
    pub fn sync(&mut self, generation: u64) {
        if self.cached.as_ref().is_some_and(|(g, _, _)| *g != generation) {
            self.cached = None;
        }
    }

    fn protocol(&mut self, generation: u64, area: Rect, img: &DynamicImage) -> Option<&Protocol> {
        let fresh = matches!(&self.cached, Some((g, a, _)) if *g == generation && *a == area);
        if !fresh {
            let size = Rect::new(0, 0, area.width, area.height);
            self.cached = match self.picker.new_protocol(img.clone(), size, Resize::Fit(None)) {
                Ok(protocol) => Some((generation, area, protocol)),
                Err(err) => {
                    warn!(?err, "cannot encode image for terminal");
                    None
                }
            };
        }
        self.cached.as_ref().map(|(_, _, protocol)| protocol)
    }
}

fn dim(text: impl Into<String>) -> Line<'static> {
    Line::styled(text.into(), Style::default().fg(Color::DarkGray))
}

/// The slice of a text preview that fits `height` rows from `scroll` on.
fn text_window(
    lines: &[Line<'static>],
    truncated: bool,
    scroll: usize,
    height: usize,
) -> Vec<Line<'static>> {
    let start = scroll.min(lines.len().saturating_sub(1));
    let mut window: Vec<Line> = lines.iter().skip(start).take(height).cloned().collect();
    if truncated && start + window.len() >= lines.len() {
        window.push(Line::default());
        window.push(dim("… preview truncated"));
    }
    window
}

/// Render the preview of the last clicked file.
pub fn render_preview(
    f: &mut Frame<'_>,
    area: Rect,
    preview: Option<&Preview>,
    generation: u64,
    scroll: usize,
    playing: bool,
    images: &mut ImageCache,
) {
    images.sync(generation);
    let Some(preview) = preview else {
        f.render_widget(
            Paragraph::new(dim("Select a file to preview it."))
                .block(Block::default().borders(Borders::ALL).title(" Preview ")),
            area,
        );
        return;
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", preview.snapshot.name));
    let inner = block.inner(area);

    match &preview.surface {
        PreviewSurface::Text { lines, truncated } => {
            let window = text_window(lines, *truncated, scroll, inner.height as usize);
            f.render_widget(
                Paragraph::new(window).wrap(Wrap { trim: false }).block(block),
                area,
            );
        }
        PreviewSurface::Image(img) => {
            f.render_widget(block, area);
            if let Some(protocol) = images.protocol(generation, inner, img) {
                f.render_widget(Image::new(protocol), inner);
            }
        }
        PreviewSurface::Audio(details) => {
            let mut lines: Vec<Line> = match details {
                Some(details) => details.lines().into_iter().map(Line::from).collect(),
                None => vec![dim("No readable tags.")],
            };
            lines.push(Line::default());
            lines.push(if playing {
                Line::from(vec![
                    Span::styled(" ⏸ playing ", Style::default().fg(Color::Green)),
                    Span::raw(" p to stop"),
                ])
            } else {
                Line::from(vec![
                    Span::styled(" ⏵ stopped ", Style::default().fg(Color::Gray)),
                    Span::raw(" p to play"),
                ])
            });
            f.render_widget(
                Paragraph::new(lines).wrap(Wrap { trim: true }).block(block),
                area,
            );
        }
        PreviewSurface::External(kind) => {
            let what = match kind {
                PreviewKind::Video => "Video",
                _ => "Document",
            };
            let lines = vec![
                Line::from(format!("{what} preview is not available in the terminal.")),
                dim("Press o to open it with the system viewer."),
            ];
            f.render_widget(
                Paragraph::new(lines).wrap(Wrap { trim: true }).block(block),
                area,
            );
        }
        PreviewSurface::Binary { len } => {
            let lines = vec![
                Line::from(format!("Binary file, {}.", format_bytes(*len))),
                dim("Press o to open it with the system viewer."),
            ];
            f.render_widget(Paragraph::new(lines).block(block), area);
        }
        PreviewSurface::Failed(reason) => {
            f.render_widget(
                Paragraph::new(Line::styled(reason.clone(), Style::default().fg(Color::Red)))
                    .wrap(Wrap { trim: true })
                    .block(block),
                area,
            );
        }
    }
}

/// Render the editor in place of the preview, keeping the cursor in view.
pub fn render_editor(f: &mut Frame<'_>, area: Rect, buffer: &EditBuffer) {
    let marker = if buffer.is_dirty() { " [+]" } else { "" };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" Editing {}{marker} ", buffer.name))
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    let (row, col) = buffer.cursor();
    let top = row.saturating_sub(inner.height.saturating_sub(1) as usize);
    let left = col.saturating_sub(inner.width.saturating_sub(1) as usize);

    let lines: Vec<Line> = buffer
        .lines()
        .iter()
        .skip(top)
        .take(inner.height as usize)
        .map(|l| Line::raw(l.chars().skip(left).collect::<String>()))
        .collect();
    f.render_widget(Paragraph::new(lines).block(block), area);
    f.set_cursor_position(Position::new(
        inner.x + (col - left) as u16,
        inner.y + (row - top) as u16,
    ));
}

fn info_lines(preview: &Preview) -> Vec<Line<'static>> {
    let label = |name: &'static str| {
        Span::styled(format!("{name:<9}"), Style::default().add_modifier(Modifier::BOLD))
    };
    let snapshot = &preview.snapshot;
    vec![
        Line::from(vec![label("Name"), Span::raw(snapshot.name.clone())]),
        Line::from(vec![label("Type"), Span::raw(preview.category.label())]),
        Line::from(vec![label("Size"), Span::raw(format_bytes(snapshot.byte_size))]),
        Line::from(vec![label("Modified"), Span::raw(format_modified(snapshot.last_modified))]),
        Line::from(vec![
            label("MIME"),
            Span::raw(snapshot.mime_hint.clone().unwrap_or_else(|| "N/A".to_string())),
        ]),
    ]
}

/// Render the info box for the previewed file.
pub fn render_info(f: &mut Frame<'_>, area: Rect, preview: Option<&Preview>) {
    let block = Block::default().borders(Borders::ALL).title(" Info ");
    let lines = preview.map(info_lines).unwrap_or_default();
    f.render_widget(Paragraph::new(lines).block(block), area);
}

#[cfg(test)]
mod tests {
    use std::time::UNIX_EPOCH;

    use super::*;
    use crate::fs::{DirectoryHandle, EntryKind, FileCategory, FileSnapshot};

    #[test]
    fn text_window_follows_scroll() {
        let lines: Vec<Line<'static>> = (0..10).map(|i| Line::from(format!("l{i}"))).collect();
        let text = |w: Vec<Line>| w.iter().map(|l| l.to_string()).collect::<Vec<_>>();

        assert_eq!(text(text_window(&lines, false, 0, 3)), ["l0", "l1", "l2"]);
        assert_eq!(text(text_window(&lines, true, 4, 3)), ["l4", "l5", "l6"]);
        assert_eq!(
            text(text_window(&lines, true, 8, 5)),
            ["l8", "l9", "", "… preview truncated"]
        );
        assert_eq!(text(text_window(&lines, false, 50, 2)), ["l9"]);
    }

    #[test]
    fn info_box_lists_snapshot_fields() {
        let preview = Preview {
            id: DirectoryHandle::new("/r").child("a.png", EntryKind::File).id(),
            snapshot: FileSnapshot {
                name: "a.png".into(),
                byte_size: 2048,
                mime_hint: None,
                last_modified: UNIX_EPOCH,
            },
            category: FileCategory::Image,
            surface: PreviewSurface::Binary { len: 2048 },
        };
        let text: Vec<String> = info_lines(&preview).iter().map(|l| l.to_string()).collect();
        assert_eq!(text.len(), 5);
        assert!(text[0].ends_with("a.png"));
        assert!(text[2].ends_with("2.0 KB"));
        assert!(text[4].ends_with("N/A"));
    }
}
