mod direction;
mod grid;
mod pickups;
mod policy;
mod queue;
mod segment;
mod session;
mod snake;
pub(crate) use self::grid::Grid;
use self::direction::Direction;
use self::pickups::{FoodKind, PickupProvider, Pickups, PowerUpEffect, PowerUpKind};
use self::segment::RenderPosition;
use self::session::{GameSession, TickEvent};
use crate::app::AppState;
use crate::command::Command;
use crate::consts;
use crate::options::Options;
use crate::util::{center_rect, get_display_area};
use crossterm::event::Event;
use rand::{rngs::StdRng, Rng, SeedableRng};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Margin, Position, Rect, Size},
    style::Style,
    text::{Line, Span, Text},
    widgets::{Block, Clear, Widget},
    Frame,
};
use std::time::Duration;

#[derive(Clone, Debug)]
pub(crate) struct Game<R = StdRng> {
    session: GameSession<R>,
    pickups: Pickups<R>,
}

impl Game<StdRng> {
    pub(crate) fn new(options: Options) -> Self {
        Game::new_with_rng(options, StdRng::from_rng(&mut rand::rng()))
    }
}

impl<R: Rng + SeedableRng> Game<R> {
    pub(crate) fn new_with_rng(options: Options, mut rng: R) -> Game<R> {
        let pickup_rng = R::from_rng(&mut rng);
        let session = GameSession::new(options, rng);
        let pickups = Pickups::new(&options, session.snake(), pickup_rng);
        log::info!(
            "New {}×{} game started at {:?}",
            options.grid.width,
            options.grid.height,
            session.snake().head()
        );
        Game { session, pickups }
    }

    /// Advance the game by `elapsed`, the time since the previous frame
    pub(crate) fn update(&mut self, elapsed: Duration) {
        for event in self.session.update(elapsed, &mut self.pickups) {
            match event {
                TickEvent::FoodEaten { at, points, kind } => log::debug!(
                    "Ate {kind:?} fruit at {at:?} for {points}; score = {}, length = {}",
                    self.session.score(),
                    self.session.snake().len()
                ),
                TickEvent::PowerUpConsumed { at, kind } => {
                    log::debug!("Collected {} power-up at {at:?}", kind.name());
                }
                TickEvent::LifeLost { at, lives } => {
                    log::info!("Snake crashed at {at:?}; {lives} lives left");
                }
                TickEvent::GameOver { score } => log::info!("Game over with score {score}"),
            }
        }
        self.pickups.expire(self.session.clock());
    }

    pub(crate) fn handle_event(&mut self, event: Event) -> Option<AppState> {
        match Command::from_key_event(event.as_key_press_event()?)? {
            Command::Quit | Command::Q => return Some(AppState::Quit),
            Command::Up => self.session.enqueue(Direction::Up),
            Command::Down => self.session.enqueue(Direction::Down),
            Command::Left => self.session.enqueue(Direction::Left),
            Command::Right => self.session.enqueue(Direction::Right),
            Command::Enter | Command::Space => {
                if self.session.is_game_over() {
                    self.restart();
                }
            }
        }
        None
    }

    fn restart(&mut self) {
        self.session.restart();
        self.pickups.reset(self.session.snake());
    }
}

impl<R: Rng> Game<R> {
    pub(crate) fn draw(&self, frame: &mut Frame<'_>) {
        frame.render_widget(self, frame.area());
    }

    fn status_line(&self) -> String {
        let mut status = format!(
            " Score: {}  Lives: {}",
            self.session.score(),
            self.session.lives()
        );
        if self.session.ghost_active() {
            status.push_str("  Ghost");
        }
        if self.session.slowed() {
            status.push_str("  Slow");
        }
        status
    }

    fn snake_style(&self) -> Style {
        if self.session.ghost_active() {
            consts::GHOST_SNAKE_STYLE
        } else {
            self.pickups
                .last_eaten()
                .map_or(consts::SNAKE_STYLE, |kind| food_glyph(kind).1)
        }
    }

    fn render_game_over(&self, display: Rect, buf: &mut Buffer) {
        let area = center_rect(display, Size::new(GAME_OVER_WIDTH, GAME_OVER_HEIGHT));
        Clear.render(area, buf);
        let style = if self.session.fade_progress() < 1.0 {
            consts::FADING_STYLE
        } else {
            Style::new()
        };
        let block = Block::bordered().border_style(style);
        let inner = block.inner(area);
        block.render(area, buf);
        Text::from_iter([
            Line::from("GAME OVER"),
            Line::from(format!("Score: {}", self.session.score())),
            Line::from_iter([
                Span::raw("Restart ("),
                Span::styled("space", consts::KEY_STYLE),
                Span::raw(")  Quit ("),
                Span::styled("q", consts::KEY_STYLE),
                Span::raw(")"),
            ]),
        ])
        .style(style)
        .centered()
        .render(inner, buf);
    }
}

const GAME_OVER_WIDTH: u16 = 28;
const GAME_OVER_HEIGHT: u16 = 5;

impl<R: Rng> Widget for &Game<R> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let display = get_display_area(area);
        let [status_area, board_area] =
            Layout::vertical([Constraint::Length(1), Constraint::Fill(1)]).areas(display);
        Line::styled(self.status_line(), consts::SCORE_BAR_STYLE).render(status_area, buf);

        let grid = self.session.grid();
        let block_size = Size {
            width: grid
                .width
                .saturating_mul(consts::CELL_COLUMNS)
                .saturating_add(2),
            height: grid.height.saturating_add(2),
        };
        let block_area = center_rect(board_area, block_size);
        Block::bordered().render(block_area, buf);

        let mut board = Canvas {
            area: block_area.inner(Margin::new(1, 1)),
            grid,
            buf,
        };
        let food = self.pickups.food();
        let (symbol, style) = food_glyph(food.kind);
        board.draw_cell(food.position, symbol, style);
        if let Some(power_up) = self.pickups.power_up() {
            let (symbol, style) = power_up_glyph(power_up.kind);
            board.draw_cell(power_up.position, symbol, style);
        }
        // Draw from the tail forwards so that the head ends up on top
        let snake_style = self.snake_style();
        for (pos, is_head) in self.session.snake().render_positions().rev() {
            let symbol = if is_head {
                head_symbol(self.session.direction())
            } else {
                consts::SNAKE_BODY_SYMBOL
            };
            board.draw_at(pos, symbol, snake_style);
        }

        if self.session.is_game_over() {
            self.render_game_over(display, buf);
        }
    }
}

fn head_symbol(direction: Direction) -> &'static str {
    match direction {
        Direction::Up => consts::SNAKE_HEAD_UP_SYMBOL,
        Direction::Down => consts::SNAKE_HEAD_DOWN_SYMBOL,
        Direction::Left => consts::SNAKE_HEAD_LEFT_SYMBOL,
        Direction::Right => consts::SNAKE_HEAD_RIGHT_SYMBOL,
    }
}

fn food_glyph(kind: FoodKind) -> (&'static str, Style) {
    match kind {
        FoodKind::Star => (consts::STAR_SYMBOL, consts::STAR_STYLE),
        FoodKind::Rainbow => (consts::RAINBOW_SYMBOL, consts::RAINBOW_STYLE),
        FoodKind::Crystal => (consts::CRYSTAL_SYMBOL, consts::CRYSTAL_STYLE),
        FoodKind::Pulsar => (consts::PULSAR_SYMBOL, consts::PULSAR_STYLE),
    }
}

fn power_up_glyph(kind: PowerUpKind) -> (&'static str, Style) {
    match kind {
        PowerUpKind::ExtraLife(_) => (consts::EXTRA_LIFE_SYMBOL, consts::EXTRA_LIFE_STYLE),
        PowerUpKind::TimeSlow(_) => (consts::TIME_SLOW_SYMBOL, consts::TIME_SLOW_STYLE),
        PowerUpKind::Ghost(_) => (consts::GHOST_SYMBOL, consts::GHOST_STYLE),
    }
}

/// The inside of the board.  Each grid cell is drawn as
/// [`CELL_COLUMNS`][consts::CELL_COLUMNS] terminal columns so that
/// horizontal motion can be shown at half-cell steps.
#[derive(Debug, Eq, PartialEq)]
struct Canvas<'a> {
    area: Rect,
    grid: Grid,
    buf: &'a mut Buffer,
}

impl Canvas<'_> {
    fn draw_cell(&mut self, pos: Position, symbol: &str, style: Style) {
        self.draw_at(RenderPosition::from(pos), symbol, style);
    }

    /// Draw `symbol` at a fractional board position, snapped to the nearest
    /// terminal column & row.  Glyphs that run off the right edge continue
    /// on the left.
    fn draw_at(&mut self, pos: RenderPosition, symbol: &str, style: Style) {
        let columns = self.grid.width.saturating_mul(consts::CELL_COLUMNS);
        let col = snap(pos.x * f64::from(consts::CELL_COLUMNS), columns);
        let row = snap(pos.y, self.grid.height);
        let Some(y) = self.area.y.checked_add(row) else {
            return;
        };
        for (dx, ch) in (0..).zip(symbol.chars()) {
            let Some(x) = self.area.x.checked_add((col + dx) % columns) else {
                return;
            };
            if let Some(cell) = self.buf.cell_mut((x, y)) {
                cell.set_char(ch);
                cell.set_style(Style::reset().patch(style));
            }
        }
    }
}

/// Round `coord` to the nearest integer in `0..span`, wrapping around
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn snap(coord: f64, span: u16) -> u16 {
    let r = coord.round().rem_euclid(f64::from(span));
    (r as u16) % span
}
