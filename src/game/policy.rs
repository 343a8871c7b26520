use crate::options::Options;
use std::time::Duration;

/// Lives, speed, and whether the game is over
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Vitals {
    lives: u32,
    move_interval: Duration,
    phase: Phase,
    initial_lives: u32,
    base_interval: Duration,
    min_interval: Duration,
    speed_step: Duration,
    game_over_fade: Duration,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Phase {
    Alive,
    /// The game has ended.  `fade_remaining` counts down the (purely
    /// cosmetic) fade-in of the game-over overlay.
    GameOver { fade_remaining: Duration },
}

/// What happens to the snake after it runs into itself
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Verdict {
    /// A life was spent; the snake should be respawned elsewhere.
    Respawn,
    GameOver,
}

impl Vitals {
    pub(crate) fn new(options: &Options) -> Vitals {
        Vitals {
            lives: options.initial_lives,
            move_interval: options.base_interval,
            phase: Phase::Alive,
            initial_lives: options.initial_lives,
            base_interval: options.base_interval,
            min_interval: options.min_interval,
            speed_step: options.speed_step,
            game_over_fade: options.game_over_fade,
        }
    }

    pub(crate) fn lives(&self) -> u32 {
        self.lives
    }

    pub(crate) fn move_interval(&self) -> Duration {
        self.move_interval
    }

    #[cfg(test)]
    pub(crate) fn phase(&self) -> Phase {
        self.phase
    }

    pub(crate) fn is_game_over(&self) -> bool {
        matches!(self.phase, Phase::GameOver { .. })
    }

    /// Spend a life if there is one to spare, otherwise end the game
    pub(crate) fn on_self_collision(&mut self) -> Verdict {
        if self.lives > 1 {
            self.lives -= 1;
            Verdict::Respawn
        } else {
            self.phase = Phase::GameOver {
                fade_remaining: self.game_over_fade,
            };
            Verdict::GameOver
        }
    }

    /// Shorten the move interval by one step, without going below the
    /// minimum
    pub(crate) fn speed_up(&mut self) {
        self.move_interval = self
            .move_interval
            .saturating_sub(self.speed_step)
            .max(self.min_interval);
    }

    pub(crate) fn add_life(&mut self) {
        self.lives = self.lives.saturating_add(1);
    }

    /// Count down the game-over fade.  Does nothing while alive.
    pub(crate) fn tick_fade(&mut self, elapsed: Duration) {
        if let Phase::GameOver {
            ref mut fade_remaining,
        } = self.phase
        {
            *fade_remaining = fade_remaining.saturating_sub(elapsed);
        }
    }

    /// How far the game-over fade has progressed, from 0 to 1.  Returns 0
    /// while alive.
    pub(crate) fn fade_progress(&self) -> f64 {
        match self.phase {
            Phase::Alive => 0.0,
            Phase::GameOver { .. } if self.game_over_fade.is_zero() => 1.0,
            Phase::GameOver { fade_remaining } => {
                1.0 - fade_remaining.as_secs_f64() / self.game_over_fade.as_secs_f64()
            }
        }
    }

    /// Restore the starting lives & speed and come back to life
    pub(crate) fn reset(&mut self) {
        self.lives = self.initial_lives;
        self.move_interval = self.base_interval;
        self.phase = Phase::Alive;
    }
}
