// src/ui/widgets/breadcrumbs.rs
//! Clickable path bar.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::HitMap;

const SEPARATOR: &str = " / ";

/// Spans for the crumbs, paired with the crumb index each one jumps to.
fn crumb_spans<'a>(crumbs: &[&'a str]) -> Vec<(Span<'a>, Option<usize>)> {
    let last = crumbs.len().saturating_sub(1);
    let mut spans = Vec::new();
    for (index, name) in crumbs.iter().enumerate() {
        if index > 0 {
            spans.push((Span::styled(SEPARATOR, Style::default().fg(Color::DarkGray)), None));
        }
        let style = if index == last {
            Style::default().add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Cyan)
        };
        spans.push((Span::styled(format!("{index}:{name}"), style), Some(index)));
    }
    spans
}

pub fn render_breadcrumbs(f: &mut Frame<'_>, area: Rect, crumbs: &[&str], hits: &mut HitMap) {
    let block = Block::default().borders(Borders::ALL).title(" folio ");
    let inner = block.inner(area);

    if crumbs.is_empty() {
        f.render_widget(
            Paragraph::new("No folder open. Press O to open one.").block(block),
            area,
        );
        return;
    }

    let spans = crumb_spans(crumbs);
    let mut x = inner.x;
    for (span, index) in &spans {
        let width = span.width() as u16;
        if let Some(index) = index {
            let visible = width.min((inner.x + inner.width).saturating_sub(x));
            if visible > 0 {
                hits.crumbs.push((Rect::new(x, inner.y, visible, 1), *index));
            }
        }
        x = x.saturating_add(width);
    }

    let line = Line::from(spans.into_iter().map(|(span, _)| span).collect::<Vec<_>>());
    f.render_widget(Paragraph::new(line).block(block), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crumbs_are_numbered_and_separated() {
        let spans = crumb_spans(&["home", "docs"]);
        let text: Vec<String> = spans.iter().map(|(s, _)| s.content.to_string()).collect();
        assert_eq!(text, ["0:home", SEPARATOR, "1:docs"]);
        let targets: Vec<Option<usize>> = spans.iter().map(|(_, i)| *i).collect();
        assert_eq!(targets, [Some(0), None, Some(1)]);
    }
}
