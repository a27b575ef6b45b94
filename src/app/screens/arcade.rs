//! Arcade screen implementation
//!
//! Draws the two games with moving targets (catcher and star collector)
//! on a 0-100 play field and maps clicks and the keyboard cursor back to
//! item ids.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use crate::app::state::NavigationAction;
use crate::games::{CatcherGame, CatcherPhase, MiniGame, StarCollectorGame, StarPhase};
use super::{contains, help_bar, overlay, step_cursor, title_banner};

/// Terminal cell for a position on the 0-100 field; `None` when off-field
pub fn cell_for(area: Rect, x: f64, y: f64) -> Option<(u16, u16)> {
    if area.width < 2 || area.height == 0 {
        return None;
    }
    if !(0.0..100.0).contains(&x) || !(0.0..100.0).contains(&y) {
        return None;
    }
    let column = (x / 100.0 * f64::from(area.width)) as u16;
    let row = (y / 100.0 * f64::from(area.height)) as u16;
    // Glyphs are two cells wide
    let column = column.min(area.width - 2);
    Some((area.x + column, area.y + row.min(area.height - 1)))
}

/// Id of the target drawn under a cell; later targets are drawn on top
pub fn hit_test<I>(area: Rect, targets: I, column: u16, row: u16) -> Option<u64>
where
    I: IntoIterator<Item = (u64, f64, f64)>,
{
    targets
        .into_iter()
        .filter(|&(_, x, y)| {
            cell_for(area, x, y).map_or(false, |(c, r)| r == row && (c..c + 2).contains(&column))
        })
        .map(|(id, _, _)| id)
        .last()
}

/// Arcade screen component
#[derive(Debug, Default)]
pub struct ArcadeScreen {
    /// Index into the visible targets, in draw order
    cursor: usize,
    /// Inner play field of the last frame
    field: Rect,
    /// Start prompt of the last frame, empty while playing
    prompt: Rect,
}

impl ArcadeScreen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.cursor = 0;
    }

    /// Move the cursor or pick the target under it
    fn pick(&mut self, ids: &[u64], action: &NavigationAction) -> Option<u64> {
        match action {
            NavigationAction::Left | NavigationAction::Up | NavigationAction::Previous => {
                self.cursor = step_cursor(self.cursor, ids.len(), false);
                None
            }
            NavigationAction::Right | NavigationAction::Down | NavigationAction::Next => {
                self.cursor = step_cursor(self.cursor, ids.len(), true);
                None
            }
            NavigationAction::Select => ids.get(self.cursor.min(ids.len().saturating_sub(1))).copied(),
            _ => None,
        }
    }

    fn catcher_targets(&self, game: &CatcherGame) -> Vec<(u64, f64, f64)> {
        game.items()
            .iter()
            .filter(|item| cell_for(self.field, item.x, item.y).is_some())
            .map(|item| (item.id, item.x, item.y))
            .collect()
    }

    fn star_targets(game: &StarCollectorGame) -> Vec<(u64, f64, f64)> {
        game.items().map(|item| (item.id, item.x, item.y)).collect()
    }

    pub fn handle_catcher(&mut self, game: &mut CatcherGame, action: NavigationAction) {
        if !game.is_running() {
            if action == NavigationAction::Select {
                self.reset();
                game.start();
            }
            return;
        }
        let ids: Vec<u64> = self.catcher_targets(game).iter().map(|t| t.0).collect();
        if let Some(id) = self.pick(&ids, &action) {
            game.tap(id);
        }
    }

    pub fn click_catcher(&mut self, game: &mut CatcherGame, column: u16, row: u16) {
        if !game.is_running() {
            if contains(self.prompt, column, row) {
                self.reset();
                game.start();
            }
            return;
        }
        if let Some(id) = hit_test(self.field, self.catcher_targets(game), column, row) {
            game.tap(id);
        }
    }

    pub fn handle_stars(&mut self, game: &mut StarCollectorGame, action: NavigationAction) {
        if !game.is_running() {
            if action == NavigationAction::Select {
                self.reset();
                game.start();
            }
            return;
        }
        let ids: Vec<u64> = Self::star_targets(game).iter().map(|t| t.0).collect();
        if let Some(id) = self.pick(&ids, &action) {
            game.tap(id);
        }
    }

    pub fn click_stars(&mut self, game: &mut StarCollectorGame, column: u16, row: u16) {
        if !game.is_running() {
            if contains(self.prompt, column, row) {
                self.reset();
                game.start();
            }
            return;
        }
        if let Some(id) = hit_test(self.field, Self::star_targets(game), column, row) {
            game.tap(id);
        }
    }

    pub fn render_catcher(&mut self, f: &mut Frame, game: &CatcherGame) {
        let chunks = layout(f.size());
        f.render_widget(title_banner("🍎 Healthy Catcher", Color::Green), chunks[0]);

        let status = format!(
            "Score: {}   Missed: {}/{}",
            game.score(),
            game.missed(),
            game.max_missed()
        );
        f.render_widget(status_line(status), chunks[1]);

        self.field = draw_field(f, chunks[2], Color::Green);
        let targets = self.catcher_targets(game);
        self.cursor = self.cursor.min(targets.len().saturating_sub(1));
        let selected = targets.get(self.cursor).map(|t| t.0);
        for item in game.items() {
            if let Some((column, row)) = cell_for(self.field, item.x, item.y) {
                let style = cursor_style(selected == Some(item.id));
                f.buffer_mut().set_string(column, row, item.glyph, style);
            }
        }

        self.prompt = match game.phase() {
            CatcherPhase::Idle => overlay(
                f,
                self.field,
                "Catch the healthy food and let the sweets fall!",
                "Press Enter to start",
            ),
            CatcherPhase::GameOver => overlay(
                f,
                self.field,
                &format!("Game over! Final score: {}", game.score()),
                "Press Enter to play again",
            ),
            CatcherPhase::Playing => Rect::default(),
        };

        f.render_widget(
            help_bar(&[("Click", "Catch"), ("←→", "Aim"), ("Enter", "Catch"), ("R", "Restart"), ("Esc", "Back")]),
            chunks[3],
        );
    }

    pub fn render_stars(&mut self, f: &mut Frame, game: &StarCollectorGame) {
        let chunks = layout(f.size());
        f.render_widget(title_banner("⭐ Star Collector", Color::Yellow), chunks[0]);

        let status = format!("Score: {}   Time left: {}s", game.score(), game.seconds_left());
        f.render_widget(status_line(status), chunks[1]);

        self.field = draw_field(f, chunks[2], Color::Yellow);
        let count = game.item_count();
        self.cursor = self.cursor.min(count.saturating_sub(1));
        for (index, item) in game.items().enumerate() {
            if let Some((column, row)) = cell_for(self.field, item.x, item.y) {
                let style = cursor_style(index == self.cursor);
                f.buffer_mut().set_string(column, row, item.kind.glyph(), style);
            }
        }

        self.prompt = match game.phase() {
            StarPhase::Idle => overlay(
                f,
                self.field,
                "Grab the stars, stay away from the bombs!",
                "Press Enter to start",
            ),
            StarPhase::Finished => overlay(
                f,
                self.field,
                &format!("Time's up! You collected {} stars", game.score()),
                "Press Enter to play again",
            ),
            StarPhase::Playing => Rect::default(),
        };

        f.render_widget(
            help_bar(&[("Click", "Grab"), ("←→", "Aim"), ("Enter", "Grab"), ("R", "Restart"), ("Esc", "Back")]),
            chunks[3],
        );
    }
}

fn layout(size: Rect) -> std::rc::Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Length(1), // Score line
            Constraint::Min(10),   // Play field
            Constraint::Length(3), // Help text
        ])
        .split(size)
}

fn status_line(text: String) -> Paragraph<'static> {
    Paragraph::new(text)
        .style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
}

/// Draw the field border and return the area inside it
fn draw_field(f: &mut Frame, area: Rect, color: Color) -> Rect {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color));
    let inner = block.inner(area);
    f.render_widget(block, area);
    inner
}

fn cursor_style(selected: bool) -> Style {
    if selected {
        Style::default().bg(Color::Cyan)
    } else {
        Style::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CatcherTuning, StarTuning};
    use crate::games::StarTally;
    use crate::util::random::tests::ScriptedSource;
    use std::time::Duration;

    fn field() -> Rect {
        Rect::new(1, 5, 100, 20)
    }

    #[test]
    fn test_cell_for_scales_and_clips() {
        let area = field();
        assert_eq!(cell_for(area, 0.0, 0.0), Some((1, 5)));
        assert_eq!(cell_for(area, 50.0, 50.0), Some((51, 15)));
        assert_eq!(cell_for(area, 99.9, 99.9), Some((99, 24)));
        assert_eq!(cell_for(area, 10.0, -5.0), None);
        assert_eq!(cell_for(area, 10.0, 100.0), None);
        assert_eq!(cell_for(Rect::new(0, 0, 1, 1), 0.0, 0.0), None);
    }

    #[test]
    fn test_hit_test_covers_glyph_width() {
        let area = field();
        let targets = vec![(1, 10.0, 50.0), (2, 60.0, 20.0)];
        assert_eq!(hit_test(area, targets.clone(), 11, 15), Some(1));
        assert_eq!(hit_test(area, targets.clone(), 12, 15), Some(1));
        assert_eq!(hit_test(area, targets.clone(), 13, 15), None);
        assert_eq!(hit_test(area, targets.clone(), 61, 9), Some(2));
        assert_eq!(hit_test(area, targets, 61, 10), None);
    }

    #[test]
    fn test_hit_test_prefers_topmost() {
        let area = field();
        let targets = vec![(1, 10.0, 50.0), (2, 10.4, 50.0)];
        assert_eq!(hit_test(area, targets, 11, 15), Some(2));
    }

    #[test]
    fn test_keyboard_grabs_star_under_cursor() {
        let mut screen = ArcadeScreen::new();
        screen.field = field();
        let mut game = StarCollectorGame::new(
            StarTuning::default(),
            Box::new(ScriptedSource::new(vec![0.1, 0.5, 0.5])),
        );
        let mut tally = StarTally::new();

        // Enter starts the run
        screen.handle_stars(&mut game, NavigationAction::Select);
        assert!(game.is_running());

        game.advance(Duration::from_millis(1400), &mut tally);
        assert_eq!(game.item_count(), 2);

        screen.handle_stars(&mut game, NavigationAction::Right);
        screen.handle_stars(&mut game, NavigationAction::Select);
        assert_eq!(game.score(), 1);
        assert_eq!(game.items().map(|i| i.id).collect::<Vec<_>>(), vec![1]);
    }

    #[test]
    fn test_click_catches_visible_item() {
        let mut screen = ArcadeScreen::new();
        screen.field = field();
        // Always healthy, first glyph, x = 45, speed 0.5 + 0.5 * 0.5
        let mut game = CatcherGame::new(
            CatcherTuning::default(),
            Box::new(ScriptedSource::new(vec![0.0, 0.0, 0.5, 0.5])),
        );
        let mut tally = StarTally::new();
        game.start();
        game.advance(Duration::from_millis(1200), &mut tally);
        assert_eq!(game.items().len(), 1);
        // Spawned above the field; let it fall into view
        assert!(game.items()[0].y < 0.0);
        game.advance(Duration::from_millis(500), &mut tally);

        let item = game.items()[0].clone();
        let (column, row) = match cell_for(screen.field, item.x, item.y) {
            Some(cell) => cell,
            None => panic!("item should be on the field at y={}", item.y),
        };
        screen.click_catcher(&mut game, column, row);
        assert_eq!(game.score(), 10);
        assert!(game.items().is_empty());
    }
}
