//! Menu screen implementation
//!
//! Category picker and per-category game list with navigation
//! highlighting and the running star total.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};
use crate::app::state::Section;
use crate::games::{Category, GameKind};
use super::{contains, help_bar, step_cursor, title_banner};

/// What a menu entry leads to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuEntry {
    Category(Category),
    Game(GameKind),
}

impl MenuEntry {
    fn icon(&self) -> &'static str {
        match self {
            MenuEntry::Category(Category::Kids) => "🧒",
            MenuEntry::Category(Category::Adults) => "🧑",
            MenuEntry::Game(kind) => kind.icon(),
        }
    }

    fn title(&self) -> &'static str {
        match self {
            MenuEntry::Category(category) => category.title(),
            MenuEntry::Game(kind) => kind.title(),
        }
    }

    fn description(&self) -> &'static str {
        match self {
            MenuEntry::Category(category) => category.description(),
            MenuEntry::Game(kind) => kind.description(),
        }
    }
}

/// Entries shown for a menu section; empty while a game is mounted
pub fn entries(section: Section) -> Vec<MenuEntry> {
    match section {
        Section::Main => Category::ALL.iter().copied().map(MenuEntry::Category).collect(),
        Section::Category(category) => {
            category.games().iter().copied().map(MenuEntry::Game).collect()
        }
        Section::Game(_) => Vec::new(),
    }
}

/// Menu screen component
#[derive(Debug)]
pub struct MenuScreen {
    section: Section,
    selected_index: usize,
    list_state: ListState,
    /// Inner list area of the last frame, for clicks
    list_area: Rect,
}

impl MenuScreen {
    /// Create a new menu screen on the main menu
    pub fn new() -> Self {
        let mut list_state = ListState::default();
        list_state.select(Some(0));

        Self {
            section: Section::Main,
            selected_index: 0,
            list_state,
            list_area: Rect::default(),
        }
    }

    /// Follow the router; the cursor resets when the section changes
    pub fn sync(&mut self, section: Section) {
        if self.section != section {
            self.section = section;
            self.selected_index = 0;
            self.list_state.select(Some(0));
        }
    }

    pub fn selected_index(&self) -> usize {
        self.selected_index
    }

    /// Entry under the cursor
    pub fn selected(&self) -> Option<MenuEntry> {
        entries(self.section).get(self.selected_index).copied()
    }

    /// Move selection up
    pub fn select_previous(&mut self) {
        let len = entries(self.section).len();
        self.selected_index = step_cursor(self.selected_index, len, false);
        self.list_state.select(Some(self.selected_index));
    }

    /// Move selection down
    pub fn select_next(&mut self) {
        let len = entries(self.section).len();
        self.selected_index = step_cursor(self.selected_index, len, true);
        self.list_state.select(Some(self.selected_index));
    }

    /// Entry drawn at a terminal cell; each entry takes two rows
    pub fn entry_at(&self, column: u16, row: u16) -> Option<MenuEntry> {
        if !contains(self.list_area, column, row) {
            return None;
        }
        let offset = self.list_state.offset();
        let index = offset + usize::from((row - self.list_area.y) / 2);
        entries(self.section).get(index).copied()
    }

    /// Render the menu
    pub fn render(&mut self, f: &mut Frame, stars_total: u64) {
        let size = f.size();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(5), // Title and subtitle
                Constraint::Min(8),    // Entry list
                Constraint::Length(3), // Help text
            ])
            .split(size);

        self.render_title(f, chunks[0], stars_total);
        self.render_list(f, chunks[1]);
        self.render_help(f, chunks[2]);
    }

    fn render_title(&self, f: &mut Frame, area: Rect, stars_total: u64) {
        let title_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Main title
                Constraint::Length(2), // Subtitle
            ])
            .split(area);

        let title = match self.section {
            Section::Category(category) => category.title(),
            _ => "GLUCOPLAY",
        };
        f.render_widget(title_banner(title, Color::Cyan), title_chunks[0]);

        let subtitle = Paragraph::new(Line::from(vec![
            Span::styled("Learn and play  ", Style::default().fg(Color::White)),
            Span::styled(
                format!("⭐ {}", stars_total),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
        ]))
        .alignment(Alignment::Center);
        f.render_widget(subtitle, title_chunks[1]);
    }

    fn render_list(&mut self, f: &mut Frame, area: Rect) {
        let items: Vec<ListItem> = entries(self.section)
            .iter()
            .map(|entry| {
                ListItem::new(vec![
                    Line::from(Span::styled(
                        format!("{} {}", entry.icon(), entry.title()),
                        Style::default().add_modifier(Modifier::BOLD),
                    )),
                    Line::from(Span::styled(
                        format!("   {}", entry.description()),
                        Style::default().fg(Color::Gray),
                    )),
                ])
            })
            .collect();

        let heading = match self.section {
            Section::Main => "Choose a corner",
            _ => "Choose a game",
        };
        let block = Block::default().borders(Borders::ALL).title(heading);
        self.list_area = block.inner(area);

        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().bg(Color::Cyan).fg(Color::Black))
            .highlight_symbol(">> ");

        f.render_stateful_widget(list, area, &mut self.list_state);
    }

    fn render_help(&self, f: &mut Frame, area: Rect) {
        let back = match self.section {
            Section::Main => "Quit",
            _ => "Back",
        };
        let help = help_bar(&[("↑↓", "Navigate"), ("Enter", "Select"), ("Esc", back), ("Q", "Quit")]);
        f.render_widget(help, area);
    }
}

impl Default for MenuScreen {
    fn default() -> Self {
        Self::new()
    }
}
