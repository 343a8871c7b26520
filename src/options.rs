use crate::consts;
use crate::game::Grid;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

/// Gameplay tuning, read from the `[game]` table of the configuration file
#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
#[serde(try_from = "RawOptions")]
pub(crate) struct Options {
    pub(crate) grid: Grid,

    /// Move interval at the start of a game
    pub(crate) base_interval: Duration,

    /// Lower bound on the move interval
    pub(crate) min_interval: Duration,

    /// Amount the move interval decreases per fruit eaten
    pub(crate) speed_step: Duration,

    pub(crate) initial_lives: u32,

    /// Minimum distance between a crash site and the respawned snake's head
    pub(crate) respawn_clearance: u16,

    /// Probability of a power-up appearing after a fruit is eaten
    pub(crate) power_up_chance: f64,

    pub(crate) power_up_lifespan: Duration,
    pub(crate) ghost_duration: Duration,
    pub(crate) slow_duration: Duration,
    pub(crate) slow_factor: f64,
    pub(crate) game_over_fade: Duration,
}

impl Default for Options {
    fn default() -> Options {
        Options {
            grid: Grid::default(),
            base_interval: consts::BASE_INTERVAL,
            min_interval: consts::MIN_INTERVAL,
            speed_step: consts::SPEED_STEP,
            initial_lives: consts::INITIAL_LIVES,
            respawn_clearance: consts::RESPAWN_CLEARANCE,
            power_up_chance: consts::POWER_UP_CHANCE,
            power_up_lifespan: consts::POWER_UP_LIFESPAN,
            ghost_duration: consts::GHOST_DURATION,
            slow_duration: consts::SLOW_DURATION,
            slow_factor: consts::SLOW_FACTOR,
            game_over_fade: consts::GAME_OVER_FADE,
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
struct RawOptions {
    width: u16,
    height: u16,
    base_interval_ms: u64,
    min_interval_ms: u64,
    speed_step_ms: u64,
    initial_lives: u32,
    respawn_clearance: u16,
    power_up_chance: f64,
    power_up_lifespan_ms: u64,
    ghost_duration_ms: u64,
    slow_duration_ms: u64,
    slow_factor: f64,
    game_over_fade_ms: u64,
}

impl Default for RawOptions {
    fn default() -> RawOptions {
        let opts = Options::default();
        RawOptions {
            width: opts.grid.width,
            height: opts.grid.height,
            base_interval_ms: millis(opts.base_interval),
            min_interval_ms: millis(opts.min_interval),
            speed_step_ms: millis(opts.speed_step),
            initial_lives: opts.initial_lives,
            respawn_clearance: opts.respawn_clearance,
            power_up_chance: opts.power_up_chance,
            power_up_lifespan_ms: millis(opts.power_up_lifespan),
            ghost_duration_ms: millis(opts.ghost_duration),
            slow_duration_ms: millis(opts.slow_duration),
            slow_factor: opts.slow_factor,
            game_over_fade_ms: millis(opts.game_over_fade),
        }
    }
}

fn millis(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}

impl TryFrom<RawOptions> for Options {
    type Error = OptionsError;

    fn try_from(raw: RawOptions) -> Result<Options, OptionsError> {
        if raw.width < 2 || raw.height < 2 {
            return Err(OptionsError::GridTooSmall {
                width: raw.width,
                height: raw.height,
            });
        }
        if raw.min_interval_ms == 0 {
            return Err(OptionsError::ZeroInterval);
        }
        if raw.min_interval_ms > raw.base_interval_ms {
            return Err(OptionsError::IntervalOrder {
                min: raw.min_interval_ms,
                base: raw.base_interval_ms,
            });
        }
        if raw.initial_lives == 0 {
            return Err(OptionsError::NoLives);
        }
        if !(0.0..=1.0).contains(&raw.power_up_chance) {
            return Err(OptionsError::Chance(raw.power_up_chance));
        }
        if !(1.0..=consts::MAX_SLOW_FACTOR).contains(&raw.slow_factor) {
            return Err(OptionsError::SlowFactor(raw.slow_factor));
        }
        Ok(Options {
            grid: Grid::new(raw.width, raw.height),
            base_interval: Duration::from_millis(raw.base_interval_ms),
            min_interval: Duration::from_millis(raw.min_interval_ms),
            speed_step: Duration::from_millis(raw.speed_step_ms),
            initial_lives: raw.initial_lives,
            respawn_clearance: raw.respawn_clearance,
            power_up_chance: raw.power_up_chance,
            power_up_lifespan: Duration::from_millis(raw.power_up_lifespan_ms),
            ghost_duration: Duration::from_millis(raw.ghost_duration_ms),
            slow_duration: Duration::from_millis(raw.slow_duration_ms),
            slow_factor: raw.slow_factor,
            game_over_fade: Duration::from_millis(raw.game_over_fade_ms),
        })
    }
}

#[derive(Clone, Debug, Error, PartialEq)]
pub(crate) enum OptionsError {
    #[error("grid must be at least 2×2, got {width}×{height}")]
    GridTooSmall { width: u16, height: u16 },
    #[error("min-interval-ms must be greater than zero")]
    ZeroInterval,
    #[error("min-interval-ms ({min}) must not exceed base-interval-ms ({base})")]
    IntervalOrder { min: u64, base: u64 },
    #[error("initial-lives must be at least 1")]
    NoLives,
    #[error("power-up-chance must be between 0 and 1, got {0}")]
    Chance(f64),
    #[error("slow-factor must be between 1 and {max}, got {0}", max = consts::MAX_SLOW_FACTOR)]
    SlowFactor(f64),
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn empty_table_is_default() {
        let opts = toml::from_str::<Options>("").unwrap();
        assert_eq!(opts, Options::default());
    }

    #[test]
    fn raw_default_round_trips() {
        assert_eq!(
            Options::try_from(RawOptions::default()),
            Ok(Options::default())
        );
    }

    #[test]
    fn parse_kebab_case() {
        let opts = toml::from_str::<Options>(concat!(
            "width = 20\n",
            "height = 15\n",
            "base-interval-ms = 200\n",
            "min-interval-ms = 80\n",
            "initial-lives = 3\n",
            "slow-factor = 2.0\n",
        ))
        .unwrap();
        assert_eq!(opts.grid, Grid::new(20, 15));
        assert_eq!(opts.base_interval, Duration::from_millis(200));
        assert_eq!(opts.min_interval, Duration::from_millis(80));
        assert_eq!(opts.speed_step, consts::SPEED_STEP);
        assert_eq!(opts.initial_lives, 3);
        assert!((opts.slow_factor - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn unknown_key() {
        assert!(toml::from_str::<Options>("speed = 3\n").is_err());
    }

    #[rstest]
    #[case(
        RawOptions { width: 1, ..RawOptions::default() },
        OptionsError::GridTooSmall { width: 1, height: consts::GRID_HEIGHT }
    )]
    #[case(
        RawOptions { min_interval_ms: 0, ..RawOptions::default() },
        OptionsError::ZeroInterval
    )]
    #[case(
        RawOptions { min_interval_ms: 300, ..RawOptions::default() },
        OptionsError::IntervalOrder { min: 300, base: 150 }
    )]
    #[case(
        RawOptions { initial_lives: 0, ..RawOptions::default() },
        OptionsError::NoLives
    )]
    #[case(
        RawOptions { power_up_chance: 1.5, ..RawOptions::default() },
        OptionsError::Chance(1.5)
    )]
    #[case(
        RawOptions { slow_factor: 0.5, ..RawOptions::default() },
        OptionsError::SlowFactor(0.5)
    )]
    #[case(
        RawOptions { slow_factor: 1e300, ..RawOptions::default() },
        OptionsError::SlowFactor(1e300)
    )]
    #[case(
        RawOptions { slow_factor: f64::INFINITY, ..RawOptions::default() },
        OptionsError::SlowFactor(f64::INFINITY)
    )]
    fn invalid(#[case] raw: RawOptions, #[case] err: OptionsError) {
        assert_eq!(Options::try_from(raw), Err(err));
    }
}
