use super::grid::{shortest_delta, wrap_f64, Grid};
use ratatui::layout::Position;
use std::time::Duration;

/// A fractional board position used for drawing, in units of cells
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct RenderPosition {
    pub(crate) x: f64,
    pub(crate) y: f64,
}

impl From<Position> for RenderPosition {
    fn from(pos: Position) -> RenderPosition {
        RenderPosition {
            x: f64::from(pos.x),
            y: f64::from(pos.y),
        }
    }
}

/// One cell of the snake.
///
/// A segment lives on the grid at `target`, but is drawn somewhere on the way
/// there from `origin`, according to how far the current step has
/// progressed.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Segment {
    /// The cell the segment occupied at the start of the current step
    origin: Position,

    /// The cell the segment is moving to; this is the segment's logical
    /// position
    target: Position,

    /// How far along the current step the segment has moved, from 0 to 1
    progress: f64,

    render: RenderPosition,
}

impl Segment {
    /// Create a segment at rest on `pos`
    pub(crate) fn new(pos: Position) -> Segment {
        Segment {
            origin: pos,
            target: pos,
            progress: 1.0,
            render: pos.into(),
        }
    }

    pub(crate) fn origin(&self) -> Position {
        self.origin
    }

    pub(crate) fn target(&self) -> Position {
        self.target
    }

    #[cfg(test)]
    pub(crate) fn progress(&self) -> f64 {
        self.progress
    }

    pub(crate) fn render_position(&self) -> RenderPosition {
        self.render
    }

    /// Start moving towards `pos` from the current target
    pub(crate) fn set_target(&mut self, pos: Position) {
        self.origin = self.target;
        self.target = pos;
        self.progress = 0.0;
    }

    /// Move the segment `elapsed` further along its current step, where a
    /// whole step takes `interval`
    pub(crate) fn advance(&mut self, elapsed: Duration, interval: Duration, grid: Grid) {
        debug_assert!(!interval.is_zero(), "move interval must be nonzero");
        let frac = elapsed.as_secs_f64() / interval.as_secs_f64();
        self.progress = (self.progress + frac).min(1.0);
        let dx = shortest_delta(self.origin.x, self.target.x, grid.width);
        let dy = shortest_delta(self.origin.y, self.target.y, grid.height);
        self.render = RenderPosition {
            x: wrap_f64(dx.mul_add(self.progress, f64::from(self.origin.x)), grid.width),
            y: wrap_f64(dy.mul_add(self.progress, f64::from(self.origin.y)), grid.height),
        };
    }
}
