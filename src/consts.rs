//! Assorted constants & hard-coded configuration
use ratatui::{
    layout::Size,
    style::{Color, Modifier, Style},
};
use std::time::Duration;

/// Draw everything inside a rectangle of this size in the center of the
/// terminal window.
///
/// Cf. [`crate::util::get_display_area()`]
pub(crate) const DISPLAY_SIZE: Size = Size {
    width: 80,
    height: 24,
};

/// Time to wait for input before running another frame
pub(crate) const FRAME_PERIOD: Duration = Duration::from_millis(16);

/// Default width of the board, in cells
pub(crate) const GRID_WIDTH: u16 = 12;

/// Default height of the board, in cells
pub(crate) const GRID_HEIGHT: u16 = 21;

/// Number of terminal columns used to draw a single board cell
pub(crate) const CELL_COLUMNS: u16 = 2;

/// Move interval at the start of a game
pub(crate) const BASE_INTERVAL: Duration = Duration::from_millis(150);

/// The move interval never shrinks below this
pub(crate) const MIN_INTERVAL: Duration = Duration::from_millis(60);

/// How much the move interval shrinks each time the snake eats
pub(crate) const SPEED_STEP: Duration = Duration::from_millis(5);

/// Lives at the start of a game
pub(crate) const INITIAL_LIVES: u32 = 1;

/// Length of the cosmetic fade-in of the game-over overlay
pub(crate) const GAME_OVER_FADE: Duration = Duration::from_millis(1000);

/// A respawned snake is placed at least this many cells (Chebyshev distance,
/// measured around the wrapped board) away from where it crashed.
pub(crate) const RESPAWN_CLEARANCE: u16 = 4;

/// Maximum number of entries in the direction queue, including the
/// committed direction
pub(crate) const DIRECTION_QUEUE_CAPACITY: usize = 3;

/// Probability that eating a fruit makes a power-up appear (when none is
/// already on the board)
pub(crate) const POWER_UP_CHANCE: f64 = 0.25;

/// How long an uncollected power-up stays on the board
pub(crate) const POWER_UP_LIFESPAN: Duration = Duration::from_secs(10);

/// How long ghost mode (collision immunity) lasts
pub(crate) const GHOST_DURATION: Duration = Duration::from_secs(7);

/// How long the time-slow power-up lasts
pub(crate) const SLOW_DURATION: Duration = Duration::from_secs(5);

/// The move interval is multiplied by this while time is slowed
pub(crate) const SLOW_FACTOR: f64 = 1.5;

/// Largest accepted `slow-factor`
pub(crate) const MAX_SLOW_FACTOR: f64 = 10.0;

/// Glyphs for the snake's head, indexed by direction of travel
pub(crate) const SNAKE_HEAD_UP_SYMBOL: &str = "▲▲";
pub(crate) const SNAKE_HEAD_DOWN_SYMBOL: &str = "▼▼";
pub(crate) const SNAKE_HEAD_LEFT_SYMBOL: &str = "◀■";
pub(crate) const SNAKE_HEAD_RIGHT_SYMBOL: &str = "■▶";

/// Glyph for the parts of the snake's body
pub(crate) const SNAKE_BODY_SYMBOL: &str = "██";

/// Glyphs for the food kinds
pub(crate) const STAR_SYMBOL: &str = "✶ ";
pub(crate) const RAINBOW_SYMBOL: &str = "◉ ";
pub(crate) const CRYSTAL_SYMBOL: &str = "◆ ";
pub(crate) const PULSAR_SYMBOL: &str = "✺ ";

/// Glyphs for the power-up kinds
pub(crate) const EXTRA_LIFE_SYMBOL: &str = "♥ ";
pub(crate) const TIME_SLOW_SYMBOL: &str = "⧗ ";
pub(crate) const GHOST_SYMBOL: &str = "☁ ";

/// Style for the snake before it has eaten anything
pub(crate) const SNAKE_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);

/// Style for the snake while ghost mode is active
pub(crate) const GHOST_SNAKE_STYLE: Style = Style::new()
    .fg(Color::Magenta)
    .add_modifier(Modifier::DIM);

pub(crate) const STAR_STYLE: Style = Style::new().fg(Color::LightRed);
pub(crate) const RAINBOW_STYLE: Style = Style::new().fg(Color::LightYellow);
pub(crate) const CRYSTAL_STYLE: Style = Style::new().fg(Color::LightBlue);
pub(crate) const PULSAR_STYLE: Style = Style::new().fg(Color::LightMagenta);

pub(crate) const EXTRA_LIFE_STYLE: Style = Style::new().fg(Color::Red).add_modifier(Modifier::BOLD);
pub(crate) const TIME_SLOW_STYLE: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);
pub(crate) const GHOST_STYLE: Style = Style::new()
    .fg(Color::Magenta)
    .add_modifier(Modifier::BOLD);

/// Style for key codes shown in the interface
pub(crate) const KEY_STYLE: Style = Style::new().fg(Color::Yellow);

/// Style for the score bar at the top of the game screen
pub(crate) const SCORE_BAR_STYLE: Style = Style::new().add_modifier(Modifier::REVERSED);

/// Style for the game-over overlay while it is still fading in
pub(crate) const FADING_STYLE: Style = Style::new().add_modifier(Modifier::DIM);
