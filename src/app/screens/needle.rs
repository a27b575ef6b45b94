//! Needle time screen
//!
//! Countdown gauge and a big shot button.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};
use crate::app::state::NavigationAction;
use crate::games::{MiniGame, NeedleGame, NeedlePhase};
use super::{contains, help_bar, overlay, title_banner};

/// Gauge color for the remaining share of the budget
pub fn urgency_color(progress: f64) -> Color {
    if progress > 0.5 {
        Color::Green
    } else if progress > 0.25 {
        Color::Yellow
    } else {
        Color::Red
    }
}

/// The child looks worried once less than half the time is left
pub fn face(progress: f64) -> &'static str {
    if progress > 0.5 {
        "👧"
    } else {
        "😟"
    }
}

/// Needle time screen component
#[derive(Debug, Default)]
pub struct NeedleScreen {
    button: Rect,
    prompt: Rect,
}

impl NeedleScreen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle(&mut self, game: &mut NeedleGame, action: NavigationAction) {
        if action != NavigationAction::Select {
            return;
        }
        match game.phase() {
            NeedlePhase::Playing => {
                game.give_shot();
            }
            NeedlePhase::Idle | NeedlePhase::Lost => {
                game.start();
            }
            NeedlePhase::LevelUp => {}
        }
    }

    pub fn click(&mut self, game: &mut NeedleGame, column: u16, row: u16) {
        match game.phase() {
            NeedlePhase::Playing if contains(self.button, column, row) => {
                game.give_shot();
            }
            NeedlePhase::Idle | NeedlePhase::Lost if contains(self.prompt, column, row) => {
                game.start();
            }
            _ => {}
        }
    }

    pub fn render(&mut self, f: &mut Frame, game: &NeedleGame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Length(1), // Level line
                Constraint::Length(3), // Countdown gauge
                Constraint::Min(7),    // Button area
                Constraint::Length(3), // Help text
            ])
            .split(f.size());

        f.render_widget(title_banner("💉 Needle Time", Color::LightBlue), chunks[0]);

        let level = Paragraph::new(format!("{} Level {}", face(game.progress()), game.level()))
            .style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center);
        f.render_widget(level, chunks[1]);

        let progress = game.progress();
        let gauge = Gauge::default()
            .block(
                Block::default()
                    .title("Time left")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Cyan)),
            )
            .gauge_style(Style::default().fg(urgency_color(progress)))
            .ratio(progress)
            .label(format!("{:.1}s", game.time_left().as_secs_f64()));
        f.render_widget(gauge, chunks[2]);

        let area = chunks[3];
        self.button = Rect::default();
        self.prompt = match game.phase() {
            NeedlePhase::Playing => {
                self.button = centered(area, 30, 5);
                let button = Paragraph::new(vec![
                    Line::from(""),
                    Line::from(Span::styled(
                        "💉 Give the shot!",
                        Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
                    )),
                ])
                .alignment(Alignment::Center)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(Color::LightBlue)),
                );
                f.render_widget(button, self.button);
                Rect::default()
            }
            NeedlePhase::LevelUp => {
                let message = Paragraph::new(Span::styled(
                    format!("Great timing! Get ready for level {}", game.level() + 1),
                    Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
                ))
                .alignment(Alignment::Center);
                f.render_widget(message, centered(area, area.width, 1));
                Rect::default()
            }
            NeedlePhase::Idle => overlay(
                f,
                area,
                "Give the insulin shot before the time runs out",
                "Press Enter to start",
            ),
            NeedlePhase::Lost => overlay(
                f,
                area,
                &format!("Too late! You reached level {}", game.lost_at().unwrap_or(game.level())),
                "Press Enter to try again",
            ),
        };

        f.render_widget(
            help_bar(&[("Enter", "Shot"), ("Click", "Shot"), ("R", "Restart"), ("Esc", "Back")]),
            chunks[4],
        );
    }
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}
