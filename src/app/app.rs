//! Main application controller
//!
//! Manages the TUI, the section router, the star ledger and the frame loop
//! that feeds elapsed time to the mounted game.

use crate::{
    app::{
        screens::{menu::MenuEntry, ArcadeScreen, MenuScreen, NeedleScreen, QuizScreen},
        state::{ActiveGame, NavigationAction, Router, Section},
        tui::{InputEvent, Tui},
    },
    config::{persistence::StarLedger, GameConfig},
    games::{StarSink, StarTally},
    util::GameRng,
    GameError, Result,
};
use crossterm::event::KeyEvent;
use std::io;
use std::time::{Duration, Instant};

/// Longest stretch of time fed to a game in one frame
///
/// A stalled terminal or a suspended process would otherwise replay
/// seconds of timers at once.
pub const MAX_FRAME_STEP: Duration = Duration::from_millis(250);

/// Star sink used by the app: the file ledger, or memory when it cannot be opened
pub enum StarStore {
    Ledger(StarLedger),
    Memory(StarTally),
}

impl StarStore {
    /// Open the ledger, falling back to an in-memory tally
    pub fn open() -> Self {
        match StarLedger::open() {
            Ok(ledger) => StarStore::Ledger(ledger),
            Err(e) => {
                tracing::warn!(error = %e, "star ledger unavailable, stars will not be saved");
                StarStore::Memory(StarTally::new())
            }
        }
    }

    pub fn total(&self) -> u64 {
        match self {
            StarStore::Ledger(ledger) => ledger.total(),
            StarStore::Memory(tally) => tally.total(),
        }
    }
}

impl StarSink for StarStore {
    fn add_stars(&mut self, count: u32) {
        match self {
            StarStore::Ledger(ledger) => ledger.add_stars(count),
            StarStore::Memory(tally) => tally.add_stars(count),
        }
    }
}

/// Terminal setup failures surface as `TuiError`
fn terminal_error(err: io::Error) -> GameError {
    GameError::TuiError(err.to_string())
}

/// Clamp a frame's elapsed time
pub fn frame_step(elapsed: Duration) -> Duration {
    elapsed.min(MAX_FRAME_STEP)
}

/// TUI application controller
pub struct App {
    /// Terminal UI handler
    tui: Tui,
    /// Menu and game routing
    router: Router,
    /// Star sink lent to the mounted game
    stars: StarStore,
    /// Screen components
    menu_screen: MenuScreen,
    arcade_screen: ArcadeScreen,
    quiz_screen: QuizScreen,
    needle_screen: NeedleScreen,
    last_frame: Instant,
}

impl App {
    /// Create a new application instance
    pub fn new(config: GameConfig) -> Result<Self> {
        let rng = GameRng::from_seed_option(config.seed);
        Ok(Self {
            tui: Tui::new(config.frame_interval).map_err(terminal_error)?,
            router: Router::new(config.tuning.clone(), rng),
            stars: StarStore::open(),
            menu_screen: MenuScreen::new(),
            arcade_screen: ArcadeScreen::new(),
            quiz_screen: QuizScreen::new(),
            needle_screen: NeedleScreen::new(),
            last_frame: Instant::now(),
        })
    }

    /// Initialize the application and TUI
    pub fn init(&mut self) -> Result<()> {
        self.tui.init().map_err(terminal_error)?;
        self.last_frame = Instant::now();
        Ok(())
    }

    /// Run the main application loop
    pub async fn run(&mut self) -> Result<()> {
        while !self.router.should_quit() {
            self.tick();
            self.draw()?;
            self.handle_events()?;
            tokio::task::yield_now().await;
        }
        self.tui.restore()?;
        tracing::info!(stars = self.stars.total(), "session ended");
        Ok(())
    }

    /// Feed wall time since the last frame to the mounted game
    fn tick(&mut self) {
        let now = Instant::now();
        let elapsed = frame_step(now.duration_since(self.last_frame));
        self.last_frame = now;
        self.router.advance(elapsed, &mut self.stars);
    }

    /// Draw the current screen
    fn draw(&mut self) -> io::Result<()> {
        let Self {
            tui,
            router,
            stars,
            menu_screen,
            arcade_screen,
            quiz_screen,
            needle_screen,
            ..
        } = self;
        let stars_total = stars.total();

        tui.draw(|f| match router.active() {
            None => menu_screen.render(f, stars_total),
            Some(ActiveGame::Catcher(game)) => arcade_screen.render_catcher(f, game),
            Some(ActiveGame::Stars(game)) => arcade_screen.render_stars(f, game),
            Some(ActiveGame::Chooser(game)) => quiz_screen.render_chooser(f, game),
            Some(ActiveGame::Carbs(game)) => quiz_screen.render_carbs(f, game),
            Some(ActiveGame::Scenario(game)) => quiz_screen.render_scenario(f, game),
            Some(ActiveGame::Needle(game)) => needle_screen.render(f, game),
        })
    }

    /// Handle keyboard and mouse input
    fn handle_events(&mut self) -> Result<()> {
        match self.tui.handle_events()? {
            Some(InputEvent::Key(key)) => self.handle_key(key),
            Some(InputEvent::Click { column, row }) => self.handle_click(column, row),
            None => {}
        }
        Ok(())
    }

    fn handle_key(&mut self, key: KeyEvent) {
        let action = Router::key_to_navigation(key);

        // Global key handling
        match action {
            NavigationAction::Quit | NavigationAction::Back | NavigationAction::Restart => {
                self.router.handle_navigation(action);
                self.after_navigation();
                return;
            }
            _ => {}
        }

        match self.router.active_mut() {
            None => self.handle_menu(action),
            Some(ActiveGame::Catcher(game)) => self.arcade_screen.handle_catcher(game, action),
            Some(ActiveGame::Stars(game)) => self.arcade_screen.handle_stars(game, action),
            Some(ActiveGame::Chooser(game)) => self.quiz_screen.handle_chooser(game, action),
            Some(ActiveGame::Carbs(game)) => self.quiz_screen.handle_carbs(game, action),
            Some(ActiveGame::Scenario(game)) => self.quiz_screen.handle_scenario(game, action),
            Some(ActiveGame::Needle(game)) => self.needle_screen.handle(game, action),
        }
    }

    fn handle_click(&mut self, column: u16, row: u16) {
        match self.router.active_mut() {
            None => {
                if let Some(entry) = self.menu_screen.entry_at(column, row) {
                    self.open(entry);
                }
            }
            Some(ActiveGame::Catcher(game)) => self.arcade_screen.click_catcher(game, column, row),
            Some(ActiveGame::Stars(game)) => self.arcade_screen.click_stars(game, column, row),
            Some(ActiveGame::Chooser(game)) => self.quiz_screen.click_chooser(game, column, row),
            Some(ActiveGame::Carbs(game)) => self.quiz_screen.click_carbs(game, column, row),
            Some(ActiveGame::Scenario(game)) => self.quiz_screen.click_scenario(game, column, row),
            Some(ActiveGame::Needle(game)) => self.needle_screen.click(game, column, row),
        }
    }

    fn handle_menu(&mut self, action: NavigationAction) {
        match action {
            NavigationAction::Up | NavigationAction::Previous => self.menu_screen.select_previous(),
            NavigationAction::Down | NavigationAction::Next => self.menu_screen.select_next(),
            NavigationAction::Select => {
                if let Some(entry) = self.menu_screen.selected() {
                    self.open(entry);
                }
            }
            _ => {}
        }
    }

    fn open(&mut self, entry: MenuEntry) {
        match entry {
            MenuEntry::Category(category) => {
                self.router.open_category(category);
            }
            MenuEntry::Game(kind) => {
                self.router.open_game(kind);
            }
        }
        self.after_navigation();
    }

    /// Bring the screens in line with the router after a section change
    fn after_navigation(&mut self) {
        let section = self.router.section();
        self.menu_screen.sync(section);
        if matches!(section, Section::Game(_)) {
            self.arcade_screen.reset();
            self.quiz_screen.reset();
        }
    }
}
