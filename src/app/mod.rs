//! TUI application module
//!
//! Contains the terminal user interface components, screen management,
//! and section routing.

pub mod app;
pub mod screens;
pub mod state;
pub mod tui;

pub use app::{App, StarStore};
pub use screens::{ArcadeScreen, MenuScreen, NeedleScreen, QuizScreen};
pub use state::{ActiveGame, NavigationAction, Router, Section};
pub use tui::{InputEvent, Tui};
