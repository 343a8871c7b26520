use super::grid::Grid;
use super::snake::Snake;
use crate::options::Options;
use crate::util::EnumExt;
use enum_dispatch::enum_dispatch;
use enum_map::Enum;
use rand::{seq::IndexedRandom, Rng};
use ratatui::layout::Position;
use std::time::Duration;

/// The flavors of fruit.  They differ only in how they are drawn.
#[derive(Clone, Copy, Debug, Enum, Eq, PartialEq)]
pub(crate) enum FoodKind {
    Star,
    Rainbow,
    Crystal,
    Pulsar,
}

impl FoodKind {
    pub(crate) fn points(self) -> u32 {
        match self {
            FoodKind::Star | FoodKind::Rainbow | FoodKind::Crystal | FoodKind::Pulsar => 1,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Food {
    pub(crate) position: Position,
    pub(crate) points: u32,
    pub(crate) kind: FoodKind,
}

impl Food {
    pub(crate) fn new(position: Position, kind: FoodKind) -> Food {
        Food {
            position,
            points: kind.points(),
            kind,
        }
    }
}

/// Something whose lives can be adjusted
pub(crate) trait LifeAdjustable {
    fn add_life(&mut self);
}

/// Something whose speed can be adjusted
pub(crate) trait SpeedAdjustable {
    /// Multiply the move interval by `factor` for the next `duration`
    fn slow_down(&mut self, factor: f64, duration: Duration);
}

/// Something that can be made to pass through itself
pub(crate) trait CollisionImmune {
    fn grant_immunity(&mut self, duration: Duration);
}

/// Everything a power-up may act upon
pub(crate) trait EffectTarget: LifeAdjustable + SpeedAdjustable + CollisionImmune {}

impl<T: LifeAdjustable + SpeedAdjustable + CollisionImmune> EffectTarget for T {}

#[enum_dispatch]
pub(crate) trait PowerUpEffect {
    fn apply(&self, target: &mut dyn EffectTarget);

    /// Short description for the status bar & logs
    fn name(&self) -> &'static str;
}

#[enum_dispatch(PowerUpEffect)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum PowerUpKind {
    ExtraLife,
    TimeSlow,
    Ghost,
}

/// Grants an additional life
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct ExtraLife;

impl ExtraLife {
    fn grant<T: LifeAdjustable + ?Sized>(self, target: &mut T) {
        target.add_life();
    }
}

impl PowerUpEffect for ExtraLife {
    fn apply(&self, target: &mut dyn EffectTarget) {
        self.grant(target);
    }

    fn name(&self) -> &'static str {
        "extra life"
    }
}

/// Slows the snake down for a while
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct TimeSlow {
    pub(crate) factor: f64,
    pub(crate) duration: Duration,
}

impl TimeSlow {
    fn grant<T: SpeedAdjustable + ?Sized>(self, target: &mut T) {
        target.slow_down(self.factor, self.duration);
    }
}

impl PowerUpEffect for TimeSlow {
    fn apply(&self, target: &mut dyn EffectTarget) {
        self.grant(target);
    }

    fn name(&self) -> &'static str {
        "time slow"
    }
}

/// Lets the snake pass through itself for a while
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Ghost {
    pub(crate) duration: Duration,
}

impl Ghost {
    fn grant<T: CollisionImmune + ?Sized>(self, target: &mut T) {
        target.grant_immunity(self.duration);
    }
}

impl PowerUpEffect for Ghost {
    fn apply(&self, target: &mut dyn EffectTarget) {
        self.grant(target);
    }

    fn name(&self) -> &'static str {
        "ghost"
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct PowerUp {
    pub(crate) position: Position,
    pub(crate) kind: PowerUpKind,

    /// Session time at which the power-up disappears if not collected
    pub(crate) expires_at: Duration,
}

/// The source of the fruit & power-ups that the snake runs into.
///
/// The game session only looks at positions & point values; spawning
/// replacements is up to the provider.
pub(crate) trait PickupProvider {
    fn food(&self) -> Food;

    fn power_up(&self) -> Option<PowerUp>;

    /// Called after the snake has eaten the current fruit (and grown)
    fn on_food_consumed(&mut self, snake: &Snake, now: Duration);

    /// Called after the snake has collected `power_up` and its effect has
    /// been applied
    fn on_power_up_consumed(&mut self, power_up: PowerUp);

    /// Called after the snake has lost a life and been rebuilt elsewhere
    fn on_respawn(&mut self, snake: &Snake);
}

/// A single fruit plus at most one power-up, placed at random
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Pickups<R> {
    rng: R,
    grid: Grid,
    food: Food,
    power_up: Option<PowerUp>,
    last_eaten: Option<FoodKind>,
    power_up_chance: f64,
    power_up_lifespan: Duration,
    ghost_duration: Duration,
    slow_duration: Duration,
    slow_factor: f64,
}

impl<R: Rng> Pickups<R> {
    /// Create a provider with one fruit of a random kind placed somewhere not
    /// occupied by `snake`
    pub(crate) fn new(options: &Options, snake: &Snake, mut rng: R) -> Pickups<R> {
        let grid = options.grid;
        let kind = FoodKind::nth_cyclic(rng.random_range(0..FoodKind::LENGTH));
        let position = grid
            .random_cell_where(&mut rng, |&p| !snake.occupies(p))
            .unwrap_or(Position::ORIGIN);
        Pickups {
            rng,
            grid,
            food: Food::new(position, kind),
            power_up: None,
            last_eaten: None,
            power_up_chance: options.power_up_chance,
            power_up_lifespan: options.power_up_lifespan,
            ghost_duration: options.ghost_duration,
            slow_duration: options.slow_duration,
            slow_factor: options.slow_factor,
        }
    }

    /// Remove the power-up if it has been on the board too long
    pub(crate) fn expire(&mut self, now: Duration) {
        if self.power_up.is_some_and(|pu| pu.expires_at <= now) {
            log::debug!("Uncollected power-up expired");
            self.power_up = None;
        }
    }

    /// The kind of the fruit eaten most recently, if any
    pub(crate) fn last_eaten(&self) -> Option<FoodKind> {
        self.last_eaten
    }

    #[cfg(test)]
    pub(crate) fn set_food(&mut self, food: Food) {
        self.food = food;
    }

    #[cfg(test)]
    pub(crate) fn set_power_up(&mut self, power_up: Option<PowerUp>) {
        self.power_up = power_up;
    }

    /// Start over for a new game with the snake at its new position
    pub(crate) fn reset(&mut self, snake: &Snake) {
        self.power_up = None;
        self.last_eaten = None;
        self.place_food(snake, self.food.kind.next_cyclic());
    }

    fn place_food(&mut self, snake: &Snake, kind: FoodKind) {
        let power_up_pos = self.power_up.map(|pu| pu.position);
        let position = self
            .grid
            .random_cell_where(&mut self.rng, |&p| {
                !snake.occupies(p) && Some(p) != power_up_pos
            })
            // The board is full; leave the fruit where it is.
            .unwrap_or(self.food.position);
        self.food = Food::new(position, kind);
    }

    fn maybe_place_power_up(&mut self, snake: &Snake, now: Duration) {
        if self.power_up.is_some() || !self.rng.random_bool(self.power_up_chance) {
            return;
        }
        let food_pos = self.food.position;
        let Some(position) = self
            .grid
            .random_cell_where(&mut self.rng, |&p| !snake.occupies(p) && p != food_pos)
        else {
            return;
        };
        let kinds = [
            PowerUpKind::from(ExtraLife),
            PowerUpKind::from(TimeSlow {
                factor: self.slow_factor,
                duration: self.slow_duration,
            }),
            PowerUpKind::from(Ghost {
                duration: self.ghost_duration,
            }),
        ];
        if let Some(&kind) = kinds.choose(&mut self.rng) {
            log::debug!("Placing {} power-up at {position:?}", kind.name());
            self.power_up = Some(PowerUp {
                position,
                kind,
                expires_at: now + self.power_up_lifespan,
            });
        }
    }
}

impl<R: Rng> PickupProvider for Pickups<R> {
    fn food(&self) -> Food {
        self.food
    }

    fn power_up(&self) -> Option<PowerUp> {
        self.power_up
    }

    fn on_food_consumed(&mut self, snake: &Snake, now: Duration) {
        self.last_eaten = Some(self.food.kind);
        self.place_food(snake, self.food.kind.next_cyclic());
        self.maybe_place_power_up(snake, now);
    }

    fn on_power_up_consumed(&mut self, power_up: PowerUp) {
        if self.power_up == Some(power_up) {
            self.power_up = None;
        }
    }

    fn on_respawn(&mut self, snake: &Snake) {
        if snake.occupies(self.food.position) {
            log::debug!("Respawned snake covers the fruit; moving it");
            self.place_food(snake, self.food.kind);
        }
        if self.power_up.is_some_and(|pu| snake.occupies(pu.position)) {
            log::debug!("Respawned snake covers the power-up; removing it");
            self.power_up = None;
        }
    }
}
