use super::direction::Direction;
use super::grid::Grid;
use super::pickups::{
    CollisionImmune, FoodKind, LifeAdjustable, PickupProvider, PowerUpEffect, PowerUpKind,
    SpeedAdjustable,
};
use super::policy::{Verdict, Vitals};
use super::queue::DirectionQueue;
use super::snake::{Snake, StepOutcome};
use crate::options::Options;
use rand::Rng;
use ratatui::layout::Position;
use std::time::Duration;

/// Notable things that happened during a call to [`GameSession::update()`]
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum TickEvent {
    FoodEaten {
        at: Position,
        points: u32,
        kind: FoodKind,
    },
    PowerUpConsumed {
        at: Position,
        kind: PowerUpKind,
    },
    /// The snake ran into itself at `at` and was respawned elsewhere
    LifeLost { at: Position, lives: u32 },
    GameOver { score: u32 },
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Slowdown {
    factor: f64,
    until: Duration,
}

/// The state of one game: the snake, the pending turns, score, lives &
/// speed, and any power-up effects in force.
///
/// The session is driven by calling [`GameSession::update()`] once per frame
/// with the time elapsed since the previous frame.  Movement happens in
/// discrete steps, one per move interval, while the drawing positions of the
/// snake's segments are interpolated continuously.
#[derive(Clone, Debug)]
pub(crate) struct GameSession<R> {
    rng: R,
    options: Options,
    snake: Snake,
    queue: DirectionQueue,
    score: u32,
    vitals: Vitals,

    /// Time accumulated towards the next step
    move_timer: Duration,

    /// Total time elapsed in this session; power-up expiry times are
    /// measured on this clock
    clock: Duration,

    ghost_until: Option<Duration>,
    slowdown: Option<Slowdown>,
}

impl<R: Rng> GameSession<R> {
    pub(crate) fn new(options: Options, mut rng: R) -> GameSession<R> {
        let head = options.grid.random_cell(&mut rng);
        GameSession {
            rng,
            snake: Snake::new(head, options.grid),
            queue: DirectionQueue::new(Direction::Left),
            score: 0,
            vitals: Vitals::new(&options),
            move_timer: Duration::ZERO,
            clock: Duration::ZERO,
            ghost_until: None,
            slowdown: None,
            options,
        }
    }

    /// Start a new game with the snake at a random position
    pub(crate) fn restart(&mut self) {
        let head = self.options.grid.random_cell(&mut self.rng);
        self.snake = Snake::new(head, self.options.grid);
        self.queue.reset(Direction::Left);
        self.score = 0;
        self.vitals.reset();
        self.move_timer = Duration::ZERO;
        self.clock = Duration::ZERO;
        self.ghost_until = None;
        self.slowdown = None;
        log::info!("New game started at {head:?}");
    }

    /// Queue a turn.  Turns that reverse the most recently queued direction
    /// are silently dropped, as is everything while the game is over.
    pub(crate) fn enqueue(&mut self, direction: Direction) {
        if self.vitals.is_game_over() {
            return;
        }
        if !self.queue.enqueue(direction) {
            log::debug!("Ignoring turn {direction:?}");
        }
    }

    /// Advance the game by `elapsed`
    pub(crate) fn update<P: PickupProvider + ?Sized>(
        &mut self,
        elapsed: Duration,
        provider: &mut P,
    ) -> Vec<TickEvent> {
        let mut events = Vec::new();
        self.clock = self.clock.saturating_add(elapsed);
        if self.vitals.is_game_over() {
            self.vitals.tick_fade(elapsed);
            return events;
        }
        let grid = self.options.grid;
        self.snake.advance(elapsed, self.interval(), grid);
        self.move_timer = self.move_timer.saturating_add(elapsed);
        // Step as many times as whole intervals have elapsed so that a long
        // frame doesn't lose movement.
        let mut stepped = false;
        loop {
            let interval = self.interval();
            if self.move_timer < interval {
                break;
            }
            self.move_timer -= interval;
            // Effects are judged as of when this step fell due, not as of
            // the end of the frame.
            self.expire_effects(self.clock.saturating_sub(self.move_timer));
            stepped = true;
            if !self.step(provider, &mut events) {
                self.move_timer = Duration::ZERO;
                break;
            }
        }
        self.expire_effects(self.clock);
        if stepped {
            // The time left over after the last step belongs to the step now
            // underway.
            self.snake.advance(self.move_timer, self.interval(), grid);
        }
        events
    }

    /// Perform one discrete step.  Returns `false` if stepping should stop
    /// for the rest of this update.
    fn step<P: PickupProvider + ?Sized>(
        &mut self,
        provider: &mut P,
        events: &mut Vec<TickEvent>,
    ) -> bool {
        let grid = self.options.grid;
        let direction = self.queue.dequeue_committed();
        let outcome = if self.ghost_active() {
            self.snake.glide(direction, grid);
            StepOutcome::Moved
        } else {
            self.snake.step(direction, grid)
        };
        if outcome == StepOutcome::SelfCollision {
            let crash = self.snake.next_head(direction, grid);
            events.push(self.crash(crash, provider));
            return false;
        }
        let head = self.snake.head();
        let food = provider.food();
        debug_assert!(
            grid.contains(food.position),
            "food placed outside the board at {:?}",
            food.position
        );
        if head == food.position {
            self.snake.grow_behind();
            self.vitals.speed_up();
            self.score = self.score.saturating_add(food.points);
            provider.on_food_consumed(&self.snake, self.clock);
            events.push(TickEvent::FoodEaten {
                at: head,
                points: food.points,
                kind: food.kind,
            });
        }
        if let Some(power_up) = provider.power_up() {
            debug_assert!(
                grid.contains(power_up.position),
                "power-up placed outside the board at {:?}",
                power_up.position
            );
            if head == power_up.position {
                power_up.kind.apply(self);
                provider.on_power_up_consumed(power_up);
                events.push(TickEvent::PowerUpConsumed {
                    at: head,
                    kind: power_up.kind,
                });
            }
        }
        true
    }

    fn crash<P: PickupProvider + ?Sized>(
        &mut self,
        at: Position,
        provider: &mut P,
    ) -> TickEvent {
        match self.vitals.on_self_collision() {
            Verdict::Respawn => {
                let head = self.respawn_cell(at);
                self.snake.respawn_at(head, self.options.grid);
                self.queue.reset(Direction::Left);
                log::debug!("Respawning snake at {head:?}");
                provider.on_respawn(&self.snake);
                TickEvent::LifeLost {
                    at,
                    lives: self.vitals.lives(),
                }
            }
            Verdict::GameOver => TickEvent::GameOver { score: self.score },
        }
    }

    /// Choose where to respawn the snake after crashing at `crash`,
    /// preferring cells well away from the crash site
    fn respawn_cell(&mut self, crash: Position) -> Position {
        let grid = self.options.grid;
        let clearance = self.options.respawn_clearance;
        grid.random_cell_where(&mut self.rng, |&p| grid.distance(p, crash) >= clearance)
            .unwrap_or_else(|| grid.random_cell(&mut self.rng))
    }
}

impl<R> GameSession<R> {
    /// The time between steps currently in effect, taking any slowdown into
    /// account
    pub(crate) fn interval(&self) -> Duration {
        let base = self.vitals.move_interval();
        match self.slowdown {
            Some(s) => Duration::try_from_secs_f64(base.as_secs_f64() * s.factor)
                .unwrap_or(Duration::MAX),
            None => base,
        }
    }

    /// Clear any effects that have run out by session time `now`
    fn expire_effects(&mut self, now: Duration) {
        if self.ghost_until.is_some_and(|t| t <= now) {
            log::debug!("Ghost mode wore off");
            self.ghost_until = None;
        }
        if self.slowdown.is_some_and(|s| s.until <= now) {
            log::debug!("Slowdown wore off");
            self.slowdown = None;
        }
    }

    /// Replace the snake and point it in `direction`, discarding any queued
    /// turns
    #[cfg(test)]
    pub(crate) fn set_snake(&mut self, snake: Snake, direction: Direction) {
        self.snake = snake;
        self.queue = DirectionQueue::new(direction);
    }

    pub(crate) fn grid(&self) -> Grid {
        self.options.grid
    }

    pub(crate) fn snake(&self) -> &Snake {
        &self.snake
    }

    /// The direction the snake will move in on its next step, barring any
    /// queued turns
    pub(crate) fn direction(&self) -> Direction {
        self.queue.committed()
    }

    pub(crate) fn score(&self) -> u32 {
        self.score
    }

    pub(crate) fn lives(&self) -> u32 {
        self.vitals.lives()
    }

    pub(crate) fn is_game_over(&self) -> bool {
        self.vitals.is_game_over()
    }

    /// Progress of the cosmetic game-over fade, from 0 to 1
    pub(crate) fn fade_progress(&self) -> f64 {
        self.vitals.fade_progress()
    }

    pub(crate) fn clock(&self) -> Duration {
        self.clock
    }

    pub(crate) fn ghost_active(&self) -> bool {
        self.ghost_until.is_some()
    }

    pub(crate) fn slowed(&self) -> bool {
        self.slowdown.is_some()
    }
}

impl<R> LifeAdjustable for GameSession<R> {
    fn add_life(&mut self) {
        self.vitals.add_life();
    }
}

impl<R> SpeedAdjustable for GameSession<R> {
    fn slow_down(&mut self, factor: f64, duration: Duration) {
        self.slowdown = Some(Slowdown {
            factor,
            until: self.clock.saturating_add(duration),
        });
    }
}

impl<R> CollisionImmune for GameSession<R> {
    fn grant_immunity(&mut self, duration: Duration) {
        let until = self.clock.saturating_add(duration);
        self.ghost_until = Some(self.ghost_until.map_or(until, |t| t.max(until)));
    }
}
