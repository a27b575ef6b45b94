//! Quiz screen implementation
//!
//! Shared by the three step-through games: healthy chooser, carb counter
//! and tricky situations. Options are laid out as clickable boxes with a
//! keyboard cursor.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use crate::app::state::NavigationAction;
use crate::games::{
    CarbCounterGame, ChooserGame, Feedback, MiniGame, QuizPhase, ScenarioGame,
};
use super::{contains, help_bar, overlay, step_cursor, title_banner};

/// Quiz screen component
#[derive(Debug, Default)]
pub struct QuizScreen {
    cursor: usize,
    /// Option boxes of the last frame, in option order
    option_areas: Vec<Rect>,
    /// Start prompt of the last frame, empty while playing
    prompt: Rect,
    /// Feedback box of the last frame; clicking it moves on where allowed
    feedback_area: Rect,
}

/// What a key or click asks of a quiz
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum QuizInput {
    Start,
    Pick(usize),
    Continue,
}

impl QuizScreen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.cursor = 0;
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    fn key_input(&mut self, phase: QuizPhase, options: usize, action: NavigationAction) -> Option<QuizInput> {
        match (phase, action) {
            (QuizPhase::Idle | QuizPhase::Finished, NavigationAction::Select) => Some(QuizInput::Start),
            (QuizPhase::Playing, NavigationAction::Select) => Some(QuizInput::Pick(self.cursor)),
            (QuizPhase::Playing, NavigationAction::Left | NavigationAction::Up | NavigationAction::Previous) => {
                self.cursor = step_cursor(self.cursor, options, false);
                None
            }
            (QuizPhase::Playing, NavigationAction::Right | NavigationAction::Down | NavigationAction::Next) => {
                self.cursor = step_cursor(self.cursor, options, true);
                None
            }
            (QuizPhase::Feedback, NavigationAction::Select) => Some(QuizInput::Continue),
            _ => None,
        }
    }

    fn click_input(&self, phase: QuizPhase, column: u16, row: u16) -> Option<QuizInput> {
        match phase {
            QuizPhase::Idle | QuizPhase::Finished if contains(self.prompt, column, row) => {
                Some(QuizInput::Start)
            }
            QuizPhase::Playing => self
                .option_areas
                .iter()
                .position(|&area| contains(area, column, row))
                .map(QuizInput::Pick),
            QuizPhase::Feedback if contains(self.feedback_area, column, row) => {
                Some(QuizInput::Continue)
            }
            _ => None,
        }
    }

    fn apply_chooser(&mut self, game: &mut ChooserGame, input: Option<QuizInput>) {
        match input {
            Some(QuizInput::Start) => {
                self.reset();
                game.start();
            }
            Some(QuizInput::Pick(side)) => {
                if game.choose(side).is_some() {
                    self.reset();
                }
            }
            // Chooser feedback moves on by itself
            Some(QuizInput::Continue) | None => {}
        }
    }

    fn apply_carbs(&mut self, game: &mut CarbCounterGame, input: Option<QuizInput>) {
        match input {
            Some(QuizInput::Start) => {
                self.reset();
                game.start();
            }
            Some(QuizInput::Pick(index)) => {
                if game.answer(index).is_some() {
                    self.reset();
                }
            }
            Some(QuizInput::Continue) | None => {}
        }
    }

    fn apply_scenario(&mut self, game: &mut ScenarioGame, input: Option<QuizInput>) {
        match input {
            Some(QuizInput::Start) => {
                self.reset();
                game.start();
            }
            Some(QuizInput::Pick(index)) => {
                if game.choose(index).is_some() {
                    self.reset();
                }
            }
            Some(QuizInput::Continue) => {
                game.next();
            }
            None => {}
        }
    }

    pub fn handle_chooser(&mut self, game: &mut ChooserGame, action: NavigationAction) {
        let input = self.key_input(game.phase(), 2, action);
        self.apply_chooser(game, input);
    }

    pub fn click_chooser(&mut self, game: &mut ChooserGame, column: u16, row: u16) {
        let input = self.click_input(game.phase(), column, row);
        self.apply_chooser(game, input);
    }

    pub fn handle_carbs(&mut self, game: &mut CarbCounterGame, action: NavigationAction) {
        let input = self.key_input(game.phase(), 3, action);
        self.apply_carbs(game, input);
    }

    pub fn click_carbs(&mut self, game: &mut CarbCounterGame, column: u16, row: u16) {
        let input = self.click_input(game.phase(), column, row);
        self.apply_carbs(game, input);
    }

    pub fn handle_scenario(&mut self, game: &mut ScenarioGame, action: NavigationAction) {
        let input = self.key_input(game.phase(), 3, action);
        self.apply_scenario(game, input);
    }

    pub fn click_scenario(&mut self, game: &mut ScenarioGame, column: u16, row: u16) {
        let input = self.click_input(game.phase(), column, row);
        self.apply_scenario(game, input);
    }

    pub fn render_chooser(&mut self, f: &mut Frame, game: &ChooserGame) {
        let chunks = layout(f.size());
        f.render_widget(title_banner("🤔 Smart Chooser", Color::Cyan), chunks[0]);

        let round = game.round().map_or(0, |r| r.index + 1);
        let status = format!("Round {}/{}   Score: {}", round, game.rounds(), game.score());
        f.render_widget(status_line(status), chunks[1]);

        let body = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2), // Question
                Constraint::Min(5),    // Options
                Constraint::Length(4), // Feedback
            ])
            .split(chunks[2]);

        self.option_areas.clear();
        self.feedback_area = Rect::default();
        if let Some(round) = game.round() {
            if game.is_running() {
                f.render_widget(
                    Paragraph::new("Which one is the healthier choice?").alignment(Alignment::Center),
                    body[0],
                );
                let boxes = columns(body[1], 2);
                for (index, option) in round.options.iter().enumerate() {
                    let style = option_style(index == self.cursor && game.phase() == QuizPhase::Playing, None);
                    let text = vec![
                        Line::from(""),
                        Line::from(option.emoji),
                        Line::from(Span::styled(option.name, Style::default().add_modifier(Modifier::BOLD))),
                    ];
                    f.render_widget(option_box(text, style), boxes[index]);
                }
                self.option_areas = boxes.to_vec();
            }
        }
        if let Some(feedback) = game.feedback() {
            self.feedback_area = render_feedback(f, body[2], feedback, None);
        }

        self.prompt = match game.phase() {
            QuizPhase::Idle => overlay(f, chunks[2], "Pick the healthy food in each round", "Press Enter to start"),
            QuizPhase::Finished => overlay(
                f,
                chunks[2],
                &format!("Well done! Final score: {}", game.score()),
                "Press Enter to play again",
            ),
            _ => Rect::default(),
        };

        f.render_widget(
            help_bar(&[("←→", "Choose"), ("Enter", "Pick"), ("R", "Restart"), ("Esc", "Back")]),
            chunks[3],
        );
    }

    pub fn render_carbs(&mut self, f: &mut Frame, game: &CarbCounterGame) {
        let chunks = layout(f.size());
        f.render_widget(title_banner("🍞 Carb Counter", Color::Blue), chunks[0]);

        let status = format!(
            "Question {}/{}   Score: {}",
            (game.question_index() + 1).min(game.question_count()),
            game.question_count(),
            game.score()
        );
        f.render_widget(status_line(status), chunks[1]);

        let body = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2), // Question
                Constraint::Min(5),    // Options
                Constraint::Length(4), // Explanation
            ])
            .split(chunks[2]);

        self.option_areas.clear();
        self.feedback_area = Rect::default();
        if let (Some(question), true) = (game.question(), game.is_running()) {
            let prompt = format!("How many grams of carbs are in {} {}?", question.icon, question.name);
            f.render_widget(Paragraph::new(prompt).alignment(Alignment::Center), body[0]);

            let boxes = columns(body[1], 3);
            for (index, &grams) in question.options.iter().enumerate() {
                // Mark right and wrong once an answer is locked in
                let verdict = game.selected().and_then(|selected| {
                    if grams == question.correct_answer {
                        Some(true)
                    } else if grams == selected {
                        Some(false)
                    } else {
                        None
                    }
                });
                let style = option_style(index == self.cursor && game.phase() == QuizPhase::Playing, verdict);
                let text = vec![
                    Line::from(""),
                    Line::from(Span::styled(format!("{} g", grams), Style::default().add_modifier(Modifier::BOLD))),
                ];
                f.render_widget(option_box(text, style), boxes[index]);
            }
            self.option_areas = boxes.to_vec();

            if let Some(selected) = game.selected() {
                let feedback = Feedback {
                    correct: selected == question.correct_answer,
                    message: question.explanation.to_string(),
                };
                self.feedback_area = render_feedback(f, body[2], &feedback, None);
            }
        }

        self.prompt = match game.phase() {
            QuizPhase::Idle => overlay(f, chunks[2], "Guess the carbs in everyday foods", "Press Enter to start"),
            QuizPhase::Finished => overlay(
                f,
                chunks[2],
                &format!("You got {} of {} right", game.score(), game.question_count()),
                "Press Enter to play again",
            ),
            _ => Rect::default(),
        };

        f.render_widget(
            help_bar(&[("←→", "Choose"), ("Enter", "Answer"), ("R", "Restart"), ("Esc", "Back")]),
            chunks[3],
        );
    }

    pub fn render_scenario(&mut self, f: &mut Frame, game: &ScenarioGame) {
        let chunks = layout(f.size());
        f.render_widget(title_banner("😳 Tricky Situations", Color::Magenta), chunks[0]);

        let status = format!(
            "Situation {}/{}   Score: {}",
            game.scenario_index() + 1,
            game.scenario_count(),
            game.score()
        );
        f.render_widget(status_line(status), chunks[1]);

        let body = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(5), // Story
                Constraint::Min(9),    // Choices
                Constraint::Length(5), // Feedback
            ])
            .split(chunks[2]);

        self.option_areas.clear();
        self.feedback_area = Rect::default();
        if let (Some(scenario), true) = (game.scenario(), game.is_running()) {
            let story = Paragraph::new(vec![
                Line::from(Span::styled(
                    format!("{} {}", scenario.icon, scenario.title),
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::from(scenario.text),
            ])
            .wrap(Wrap { trim: true })
            .alignment(Alignment::Center);
            f.render_widget(story, body[0]);

            if game.phase() == QuizPhase::Playing {
                let rows = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([Constraint::Length(3); 3])
                    .split(body[1]);
                for (index, choice) in scenario.choices.iter().enumerate() {
                    let style = option_style(index == self.cursor, None);
                    f.render_widget(option_box(vec![Line::from(choice.text)], style), rows[index]);
                }
                self.option_areas = rows.to_vec();
            }

            if let Some(feedback) = game.feedback() {
                let next = if game.is_last() { "Enter: see results" } else { "Enter: next situation" };
                self.feedback_area = render_feedback(f, body[2], feedback, Some(next));
            }
        }

        self.prompt = match game.phase() {
            QuizPhase::Idle => overlay(f, chunks[2], "How would you react?", "Press Enter to start"),
            QuizPhase::Finished => overlay(
                f,
                chunks[2],
                &format!("You handled {} of {} situations well", game.score(), game.scenario_count()),
                "Press Enter to play again",
            ),
            _ => Rect::default(),
        };

        f.render_widget(
            help_bar(&[("↑↓", "Choose"), ("Enter", "Pick / Next"), ("R", "Restart"), ("Esc", "Back")]),
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
            Constraint::Min(12),   // Question, options, feedback
            Constraint::Length(3), // Help text
        ])
        .split(size)
}

/// Split an area into `count` equal columns
fn columns(area: Rect, count: u32) -> std::rc::Rc<[Rect]> {
    let constraints: Vec<Constraint> = (0..count).map(|_| Constraint::Ratio(1, count)).collect();
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area)
}

fn status_line(text: String) -> Paragraph<'static> {
    Paragraph::new(text)
        .style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
}

/// Border style for an option: cursor highlight, or right/wrong once answered
fn option_style(selected: bool, verdict: Option<bool>) -> Style {
    match verdict {
        Some(true) => Style::default().fg(Color::Green),
        Some(false) => Style::default().fg(Color::Red),
        None if selected => Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        None => Style::default().fg(Color::Gray),
    }
}

fn option_box(text: Vec<Line<'_>>, style: Style) -> Paragraph<'_> {
    Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).border_style(style))
}

fn render_feedback(f: &mut Frame, area: Rect, feedback: &Feedback, next: Option<&str>) -> Rect {
    let (color, mark) = if feedback.correct {
        (Color::Green, "✅")
    } else {
        (Color::Red, "❌")
    };
    let mut lines = vec![Line::from(Span::styled(
        format!("{} {}", mark, feedback.message),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    ))];
    if let Some(next) = next {
        lines.push(Line::styled(next.to_string(), Style::default().fg(Color::Yellow)));
    }
    f.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(color))),
        area,
    );
    area
}
