use super::grid::Grid;
use ratatui::layout::Position;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Return the cell one step from `pos` in this direction, wrapping around
    /// the edges of `grid`
    pub(crate) fn advance(self, pos: Position, grid: Grid) -> Position {
        match self {
            Direction::Up => grid.offset_y(pos, -1),
            Direction::Down => grid.offset_y(pos, 1),
            Direction::Left => grid.offset_x(pos, -1),
            Direction::Right => grid.offset_x(pos, 1),
        }
    }

    pub(crate) fn reverse(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    pub(crate) fn is_reverse_of(self, other: Direction) -> bool {
        self.reverse() == other
    }
}
