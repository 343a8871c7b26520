use rand::{seq::IteratorRandom, Rng};
use ratatui::layout::{Position, Positions, Rect, Size};

/// The dimensions of a toroidal board.  Coordinates wrap around every edge,
/// so there are no walls.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Grid {
    pub(crate) width: u16,
    pub(crate) height: u16,
}

impl Grid {
    pub(crate) fn new(width: u16, height: u16) -> Grid {
        debug_assert!(
            width >= 2 && height >= 2,
            "grid must be at least 2×2, got {width}×{height}"
        );
        Grid { width, height }
    }

    pub(crate) fn size(self) -> Size {
        Size {
            width: self.width,
            height: self.height,
        }
    }

    pub(crate) fn positions(self) -> Positions {
        Rect::from((Position::ORIGIN, self.size())).positions()
    }

    pub(crate) fn contains(self, pos: Position) -> bool {
        pos.x < self.width && pos.y < self.height
    }

    /// Return the cell `dx` columns to the right of `pos`, wrapping around
    pub(crate) fn offset_x(self, pos: Position, dx: i32) -> Position {
        Position {
            x: wrap_coord(pos.x, dx, self.width),
            y: pos.y,
        }
    }

    /// Return the cell `dy` rows below `pos`, wrapping around
    pub(crate) fn offset_y(self, pos: Position, dy: i32) -> Position {
        Position {
            x: pos.x,
            y: wrap_coord(pos.y, dy, self.height),
        }
    }

    /// Chebyshev distance between two cells, taking the short way around
    /// each axis
    pub(crate) fn distance(self, a: Position, b: Position) -> u16 {
        let dx = axis_distance(a.x, b.x, self.width);
        let dy = axis_distance(a.y, b.y, self.height);
        dx.max(dy)
    }

    /// Choose a random cell of the board that satisfies `pred`.  Returns
    /// `None` if no cell does.
    pub(crate) fn random_cell_where<R, F>(self, rng: &mut R, pred: F) -> Option<Position>
    where
        R: Rng + ?Sized,
        F: FnMut(&Position) -> bool,
    {
        self.positions().filter(pred).choose(rng)
    }

    pub(crate) fn random_cell<R: Rng + ?Sized>(self, rng: &mut R) -> Position {
        Position {
            x: rng.random_range(0..self.width),
            y: rng.random_range(0..self.height),
        }
    }
}

impl Default for Grid {
    fn default() -> Grid {
        Grid::new(crate::consts::GRID_WIDTH, crate::consts::GRID_HEIGHT)
    }
}

fn wrap_coord(c: u16, delta: i32, span: u16) -> u16 {
    let wrapped = (i32::from(c) + delta).rem_euclid(i32::from(span));
    u16::try_from(wrapped).unwrap_or_default()
}

fn axis_distance(a: u16, b: u16, span: u16) -> u16 {
    let d = a.abs_diff(b);
    d.min(span - d)
}

/// Signed difference `to - from` along an axis of length `span`, taking the
/// shorter way around when going straight across is more than half the span
pub(crate) fn shortest_delta(from: u16, to: u16, span: u16) -> f64 {
    let mut d = i32::from(to) - i32::from(from);
    let span = i32::from(span);
    if 2 * d.abs() > span {
        d -= span * d.signum();
    }
    f64::from(d)
}

/// Wrap a fractional coordinate into `[0, span)`
pub(crate) fn wrap_f64(value: f64, span: u16) -> f64 {
    let span = f64::from(span);
    let r = value.rem_euclid(span);
    // rem_euclid() can round up to exactly `span` for tiny negative inputs
    if r >= span {
        0.0
    } else {
        r
    }
}
