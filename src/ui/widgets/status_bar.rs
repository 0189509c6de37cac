// src/ui/widgets/status_bar.rs
//! Status line and the prompt overlay.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::{
    app::{
        prompt::{Mode, Prompt},
        state::{Notice, NoticeLevel},
    },
    ui::{keybindings::help_line, layout::centered},
};

fn notice_style(level: NoticeLevel) -> Style {
    match level {
        NoticeLevel::Info => Style::default().fg(Color::Green),
        NoticeLevel::Warn => Style::default().fg(Color::Yellow),
        NoticeLevel::Error => Style::default().fg(Color::Red),
    }
}

/// Text for the status line: a pending confirmation, else the latest notice, else key help.
fn status_line(mode: &Mode, notice: Option<&Notice>, selected: usize) -> Line<'static> {
    if let Mode::ConfirmDelete { count } = mode {
        return Line::from(vec![
            Span::styled(
                format!("Delete {count} selected item(s)? "),
                Style::default().fg(Color::Yellow),
            ),
            Span::raw(help_line(mode)),
        ]);
    }
    let mut spans = Vec::new();
    if selected > 0 {
        spans.push(Span::styled(
            format!("[{selected} selected] "),
            Style::default().fg(Color::Cyan),
        ));
    }
    match notice {
        Some(notice) => spans.push(Span::styled(notice.message.clone(), notice_style(notice.level))),
        None => spans.push(Span::styled(help_line(mode), Style::default().fg(Color::DarkGray))),
    }
    Line::from(spans)
}

pub fn render_status(
    f: &mut Frame<'_>,
    area: Rect,
    mode: &Mode,
    notice: Option<&Notice>,
    selected: usize,
) {
    f.render_widget(
        Paragraph::new(status_line(mode, notice, selected))
            .block(Block::default().borders(Borders::ALL)),
        area,
    );
}

/// Draw the active prompt as a centred one-line input box.
pub fn render_prompt(f: &mut Frame<'_>, area: Rect, prompt: &Prompt) {
    let popup = centered(area, area.width.saturating_sub(10).min(70), 3);
    f.render_widget(Clear, popup);
    let input = Line::from(vec![
        Span::raw(prompt.input.clone()),
        Span::styled("█", Style::default().fg(Color::Gray)),
    ]);
    f.render_widget(
        Paragraph::new(input).block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ", prompt.kind.title()))
                .border_style(Style::default().fg(Color::Cyan)),
        ),
        popup,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confirmation_takes_priority_over_notices() {
        let notice = Notice {
            level: NoticeLevel::Error,
            message: "boom".into(),
        };
        let line = status_line(&Mode::ConfirmDelete { count: 3 }, Some(&notice), 3);
        assert!(line.to_string().starts_with("Delete 3 selected"));

        let line = status_line(&Mode::Normal, Some(&notice), 2);
        assert_eq!(line.to_string(), "[2 selected] boom");
    }
}
