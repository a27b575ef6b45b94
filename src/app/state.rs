//! Section routing
//!
//! Two-tier menu: main menu, then a category, then one game. The router owns
//! the single mounted controller and tears it down when the player leaves.

use std::time::Duration;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use crate::config::GameTuning;
use crate::games::{
    CarbCounterGame, Category, CatcherGame, ChooserGame, GameKind, MiniGame, NeedleGame,
    ScenarioGame, StarCollectorGame, StarSink,
};
use crate::util::GameRng;

/// Where the player currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    /// Category picker
    Main,
    /// Game list of one category
    Category(Category),
    /// A mounted game
    Game(GameKind),
}

impl Default for Section {
    fn default() -> Self {
        Self::Main
    }
}

/// Navigation actions that can be triggered by keyboard input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationAction {
    /// Move selection up (arrow up, k)
    Up,
    /// Move selection down (arrow down, j)
    Down,
    /// Move selection left (arrow left, h)
    Left,
    /// Move selection right (arrow right, l)
    Right,
    /// Confirm selection (Enter, Space)
    Select,
    /// Go back/cancel (Esc, Backspace)
    Back,
    /// Next item (Tab)
    Next,
    /// Previous item (Shift+Tab)
    Previous,
    /// Restart the mounted game (r, R)
    Restart,
    /// Quit application (q, Q, Ctrl+C)
    Quit,
    /// No action
    None,
}

/// The mounted controller
pub enum ActiveGame {
    Catcher(CatcherGame),
    Chooser(ChooserGame),
    Needle(NeedleGame),
    Stars(StarCollectorGame),
    Carbs(CarbCounterGame),
    Scenario(ScenarioGame),
}

impl ActiveGame {
    /// Build an idle controller for `kind`, each with its own random stream
    pub fn mount(kind: GameKind, tuning: &GameTuning, rng: &mut GameRng) -> Self {
        match kind {
            GameKind::Catcher => {
                ActiveGame::Catcher(CatcherGame::new(tuning.catcher.clone(), Box::new(rng.fork())))
            }
            GameKind::Chooser => {
                ActiveGame::Chooser(ChooserGame::new(tuning.chooser.clone(), Box::new(rng.fork())))
            }
            GameKind::NeedleTime => ActiveGame::Needle(NeedleGame::new(tuning.needle.clone())),
            GameKind::StarCollector => {
                ActiveGame::Stars(StarCollectorGame::new(tuning.stars.clone(), Box::new(rng.fork())))
            }
            GameKind::CarbCounter => {
                ActiveGame::Carbs(CarbCounterGame::new(tuning.carbs.clone(), Box::new(rng.fork())))
            }
            GameKind::Scenario => ActiveGame::Scenario(ScenarioGame::new()),
        }
    }

    pub fn game(&self) -> &dyn MiniGame {
        match self {
            ActiveGame::Catcher(game) => game,
            ActiveGame::Chooser(game) => game,
            ActiveGame::Needle(game) => game,
            ActiveGame::Stars(game) => game,
            ActiveGame::Carbs(game) => game,
            ActiveGame::Scenario(game) => game,
        }
    }

    pub fn game_mut(&mut self) -> &mut dyn MiniGame {
        match self {
            ActiveGame::Catcher(game) => game,
            ActiveGame::Chooser(game) => game,
            ActiveGame::Needle(game) => game,
            ActiveGame::Stars(game) => game,
            ActiveGame::Carbs(game) => game,
            ActiveGame::Scenario(game) => game,
        }
    }

    pub fn kind(&self) -> GameKind {
        self.game().kind()
    }
}

/// Menu and game routing
pub struct Router {
    section: Section,
    active: Option<ActiveGame>,
    tuning: GameTuning,
    rng: GameRng,
    should_quit: bool,
}

impl Router {
    /// Create a router starting at the main menu
    pub fn new(tuning: GameTuning, rng: GameRng) -> Self {
        Self {
            section: Section::Main,
            active: None,
            tuning,
            rng,
            should_quit: false,
        }
    }

    pub fn section(&self) -> Section {
        self.section
    }

    pub fn active(&self) -> Option<&ActiveGame> {
        self.active.as_ref()
    }

    pub fn active_mut(&mut self) -> Option<&mut ActiveGame> {
        self.active.as_mut()
    }

    /// Check if the application should quit
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Tear down any game and set the quit flag
    pub fn quit(&mut self) {
        self.unmount();
        self.should_quit = true;
    }

    /// Enter a category; only from the main menu
    pub fn open_category(&mut self, category: Category) -> bool {
        if self.section != Section::Main {
            return false;
        }
        self.section = Section::Category(category);
        true
    }

    /// Mount a game of the open category in its idle phase
    pub fn open_game(&mut self, kind: GameKind) -> bool {
        match self.section {
            Section::Category(category) if category.games().contains(&kind) => {
                self.active = Some(ActiveGame::mount(kind, &self.tuning, &mut self.rng));
                self.section = Section::Game(kind);
                tracing::debug!(game = kind.title(), "game mounted");
                true
            }
            _ => false,
        }
    }

    /// Leave the current section; leaving the main menu quits
    pub fn back(&mut self) {
        match self.section {
            Section::Game(kind) => {
                self.unmount();
                self.section = Section::Category(kind.category());
            }
            Section::Category(_) => self.section = Section::Main,
            Section::Main => self.should_quit = true,
        }
    }

    /// Restart the mounted game from any phase
    pub fn restart_active(&mut self) -> bool {
        match self.active.as_mut() {
            Some(active) => {
                active.game_mut().restart();
                true
            }
            None => false,
        }
    }

    /// Drive the mounted game's timers
    pub fn advance(&mut self, elapsed: Duration, stars: &mut dyn StarSink) {
        if let Some(active) = self.active.as_mut() {
            active.game_mut().advance(elapsed, stars);
        }
    }

    fn unmount(&mut self) {
        if let Some(mut active) = self.active.take() {
            active.game_mut().exit();
            tracing::debug!(game = active.kind().title(), "game unmounted");
        }
    }

    /// Handle the actions every section shares
    pub fn handle_navigation(&mut self, action: NavigationAction) {
        match action {
            NavigationAction::Quit => self.quit(),
            NavigationAction::Back => self.back(),
            NavigationAction::Restart => {
                self.restart_active();
            }
            _ => {
                // Movement and selection belong to the screen components
            }
        }
    }

    /// Convert keyboard event to navigation action
    pub fn key_to_navigation(key: KeyEvent) -> NavigationAction {
        match key.code {
            // Quit keys
            KeyCode::Char('q') | KeyCode::Char('Q') => NavigationAction::Quit,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                NavigationAction::Quit
            }

            // Navigation keys
            KeyCode::Up | KeyCode::Char('k') => NavigationAction::Up,
            KeyCode::Down | KeyCode::Char('j') => NavigationAction::Down,
            KeyCode::Left | KeyCode::Char('h') => NavigationAction::Left,
            KeyCode::Right | KeyCode::Char('l') => NavigationAction::Right,

            // Selection and confirmation
            KeyCode::Enter | KeyCode::Char(' ') => NavigationAction::Select,

            // Back/cancel
            KeyCode::Esc | KeyCode::Backspace => NavigationAction::Back,

            KeyCode::Char('r') | KeyCode::Char('R') => NavigationAction::Restart,

            // Tab navigation
            KeyCode::Tab => {
                if key.modifiers.contains(KeyModifiers::SHIFT) {
                    NavigationAction::Previous
                } else {
                    NavigationAction::Next
                }
            }
            KeyCode::BackTab => NavigationAction::Previous,

            _ => NavigationAction::None,
        }
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new(GameTuning::default(), GameRng::from_entropy())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::StarTally;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn router() -> Router {
        Router::new(GameTuning::default(), GameRng::seeded(7))
    }

    #[test]
    fn test_router_creation() {
        let router = router();
        assert_eq!(router.section(), Section::Main);
        assert!(router.active().is_none());
        assert!(!router.should_quit());
    }

    #[test]
    fn test_full_round_trip() {
        let mut router = router();

        assert!(router.open_category(Category::Kids));
        assert_eq!(router.section(), Section::Category(Category::Kids));

        assert!(router.open_game(GameKind::Catcher));
        assert_eq!(router.section(), Section::Game(GameKind::Catcher));
        assert_eq!(router.active().map(|a| a.kind()), Some(GameKind::Catcher));

        router.back();
        assert_eq!(router.section(), Section::Category(Category::Kids));
        assert!(router.active().is_none());

        router.back();
        assert_eq!(router.section(), Section::Main);
        assert!(!router.should_quit());

        router.back();
        assert!(router.should_quit());
    }

    #[test]
    fn test_games_only_open_from_their_category() {
        let mut router = router();
        assert!(!router.open_game(GameKind::Catcher));

        router.open_category(Category::Adults);
        assert!(!router.open_game(GameKind::Catcher));
        assert!(router.open_game(GameKind::CarbCounter));

        // No nested mounting
        assert!(!router.open_game(GameKind::Scenario));
        assert!(!router.open_category(Category::Kids));
    }

    #[test]
    fn test_every_game_mounts_idle() {
        let mut router = router();
        for category in Category::ALL {
            router.open_category(category);
            for &kind in category.games() {
                assert!(router.open_game(kind));
                let active = router.active().unwrap();
                assert_eq!(active.kind(), kind);
                assert!(!active.game().is_running());
                assert_eq!(active.game().active_timers(), 0);
                router.back();
            }
            router.back();
        }
    }

    #[test]
    fn test_leaving_running_game_stops_it() {
        let mut router = router();
        let mut tally = StarTally::new();
        router.open_category(Category::Kids);
        router.open_game(GameKind::StarCollector);
        router.active_mut().unwrap().game_mut().start();
        router.advance(Duration::from_secs(5), &mut tally);
        assert_eq!(router.active().unwrap().game().active_timers(), 2);

        router.back();
        router.advance(Duration::from_secs(60), &mut tally);
        assert!(tally.calls().is_empty());
    }

    #[test]
    fn test_restart_action() {
        let mut router = router();
        assert!(!router.restart_active());

        router.open_category(Category::Kids);
        router.open_game(GameKind::NeedleTime);
        router.handle_navigation(NavigationAction::Restart);
        assert!(router.active().unwrap().game().is_running());
    }

    #[test]
    fn test_quit_from_game_unmounts() {
        let mut router = router();
        router.open_category(Category::Kids);
        router.open_game(GameKind::Catcher);
        router.handle_navigation(NavigationAction::Quit);
        assert!(router.should_quit());
        assert!(router.active().is_none());
    }

    #[test]
    fn test_key_to_navigation() {
        // Test quit keys
        assert_eq!(
            Router::key_to_navigation(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE)),
            NavigationAction::Quit
        );
        assert_eq!(
            Router::key_to_navigation(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            NavigationAction::Quit
        );

        // Test navigation keys
        assert_eq!(
            Router::key_to_navigation(KeyEvent::new(KeyCode::Char('k'), KeyModifiers::NONE)),
            NavigationAction::Up
        );
        assert_eq!(
            Router::key_to_navigation(KeyEvent::new(KeyCode::Down, KeyModifiers::NONE)),
            NavigationAction::Down
        );
        assert_eq!(
            Router::key_to_navigation(KeyEvent::new(KeyCode::Char('h'), KeyModifiers::NONE)),
            NavigationAction::Left
        );

        // Test selection and restart
        assert_eq!(
            Router::key_to_navigation(KeyEvent::new(KeyCode::Char(' '), KeyModifiers::NONE)),
            NavigationAction::Select
        );
        assert_eq!(
            Router::key_to_navigation(KeyEvent::new(KeyCode::Char('r'), KeyModifiers::NONE)),
            NavigationAction::Restart
        );

        // Test back keys
        assert_eq!(
            Router::key_to_navigation(KeyEvent::new(KeyCode::Backspace, KeyModifiers::NONE)),
            NavigationAction::Back
        );

        // Test tab navigation
        assert_eq!(
            Router::key_to_navigation(KeyEvent::new(KeyCode::Tab, KeyModifiers::SHIFT)),
            NavigationAction::Previous
        );
        assert_eq!(
            Router::key_to_navigation(KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE)),
            NavigationAction::None
        );
    }
}
