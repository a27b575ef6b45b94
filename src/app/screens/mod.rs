//! TUI screen components
//!
//! One screen per family of games, plus the menu. Screens keep the cursor
//! and the areas they last drew so clicks can be mapped back to targets.

pub mod arcade;
pub mod menu;
pub mod needle;
pub mod quiz;

pub use arcade::ArcadeScreen;
pub use menu::MenuScreen;
pub use needle::NeedleScreen;
pub use quiz::QuizScreen;

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Whether a terminal cell lies inside `area`
pub fn contains(area: Rect, column: u16, row: u16) -> bool {
    column >= area.x
        && column < area.x.saturating_add(area.width)
        && row >= area.y
        && row < area.y.saturating_add(area.height)
}

/// Move a wrapping cursor by one step over `len` entries
pub fn step_cursor(cursor: usize, len: usize, forward: bool) -> usize {
    if len == 0 {
        return 0;
    }
    let cursor = cursor.min(len - 1);
    if forward {
        (cursor + 1) % len
    } else if cursor == 0 {
        len - 1
    } else {
        cursor - 1
    }
}

/// Bordered, centered title banner
pub fn title_banner<'a>(title: &'a str, color: Color) -> Paragraph<'a> {
    Paragraph::new(title)
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color)),
        )
}

/// Key hint bar: pairs of (key, action)
pub fn help_bar<'a>(hints: &[(&'a str, &'a str)]) -> Paragraph<'a> {
    let mut spans = Vec::with_capacity(hints.len() * 2);
    for (key, action) in hints {
        spans.push(Span::styled(
            *key,
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::raw(format!(" {}  ", action)));
    }

    Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow)),
        )
}

/// Centered message box over `field`; returns the area it covers
pub fn overlay(f: &mut Frame, field: Rect, message: &str, prompt: &str) -> Rect {
    let width = field.width.min(50);
    let height = field.height.min(5);
    let area = Rect::new(
        field.x + (field.width - width) / 2,
        field.y + (field.height - height) / 2,
        width,
        height,
    );
    let text = vec![
        Line::from(message.to_string()),
        Line::from(""),
        Line::styled(
            prompt.to_string(),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
    ];
    f.render_widget(Clear, area);
    f.render_widget(
        Paragraph::new(text)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL)),
        area,
    );
    area
}
