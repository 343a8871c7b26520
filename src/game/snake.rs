use super::direction::Direction;
use super::grid::Grid;
use super::segment::{RenderPosition, Segment};
use ratatui::layout::Position;
use std::time::Duration;

/// The snake's body, as a chain of interpolated segments.
///
/// The head is at index 0 of `segments` and the tail at the end.  There are
/// always at least two segments.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Snake {
    segments: Vec<Segment>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum StepOutcome {
    Moved,
    SelfCollision,
}

impl Snake {
    /// Create a two-segment snake with its head at `head` and its tail one
    /// cell to the right, i.e., ready to move left.
    pub(crate) fn new(head: Position, grid: Grid) -> Snake {
        Snake {
            segments: vec![Segment::new(head), Segment::new(grid.offset_x(head, 1))],
        }
    }

    /// Create a snake at rest on the given cells, head first
    #[cfg(test)]
    pub(crate) fn from_cells<I: IntoIterator<Item = Position>>(cells: I) -> Snake {
        let segments = cells.into_iter().map(Segment::new).collect::<Vec<_>>();
        assert!(segments.len() >= 2, "a snake needs at least two segments");
        Snake { segments }
    }

    /// Return the logical position of the snake's head
    pub(crate) fn head(&self) -> Position {
        self.segments[0].target()
    }

    /// Return the logical position of the snake's tail
    pub(crate) fn tail(&self) -> Position {
        self.segments[self.segments.len() - 1].target()
    }

    pub(crate) fn len(&self) -> usize {
        self.segments.len()
    }

    #[cfg(test)]
    pub(crate) fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Return the drawing positions of the segments, head first, each paired
    /// with whether it is the head
    pub(crate) fn render_positions(
        &self,
    ) -> impl DoubleEndedIterator<Item = (RenderPosition, bool)> + '_ {
        self.segments
            .iter()
            .enumerate()
            .map(|(i, seg)| (seg.render_position(), i == 0))
    }

    /// Does any segment of the snake occupy `pos`?
    pub(crate) fn occupies(&self, pos: Position) -> bool {
        self.segments.iter().any(|seg| seg.target() == pos)
    }

    /// Return the cell the head would move into when going in `direction`
    pub(crate) fn next_head(&self, direction: Direction, grid: Grid) -> Position {
        direction.advance(self.head(), grid)
    }

    /// Would moving the head to `pos` run into the snake's body?
    ///
    /// A two-segment snake's tail is always adjacent to its head, so such a
    /// snake never collides with itself.
    pub(crate) fn would_collide(&self, pos: Position) -> bool {
        self.segments.len() > 2 && self.segments[1..].iter().any(|seg| seg.target() == pos)
    }

    /// Move the snake forwards one cell in `direction`, unless doing so would
    /// run into its own body, in which case the snake is left as-is.
    pub(crate) fn step(&mut self, direction: Direction, grid: Grid) -> StepOutcome {
        let next = self.next_head(direction, grid);
        if self.would_collide(next) {
            return StepOutcome::SelfCollision;
        }
        self.shift(next);
        StepOutcome::Moved
    }

    /// Move the snake forwards one cell in `direction` without checking for
    /// collisions
    pub(crate) fn glide(&mut self, direction: Direction, grid: Grid) {
        let next = self.next_head(direction, grid);
        self.shift(next);
    }

    fn shift(&mut self, head: Position) {
        let mut next = head;
        for seg in &mut self.segments {
            let prev = seg.target();
            seg.set_target(next);
            next = prev;
        }
    }

    /// Add a segment at `pos` at the end of the snake.  The new segment
    /// appears directly on `pos` instead of sliding in from elsewhere.
    pub(crate) fn grow(&mut self, pos: Position) {
        let mut seg = Segment::new(pos);
        seg.set_target(pos);
        self.segments.push(seg);
    }

    /// Add a segment on the cell the tail left on the last step, so that no
    /// two segments share a cell.  If that cell is now part of the snake (as
    /// on a board only two cells across), the segment is added on the tail
    /// instead.
    pub(crate) fn grow_behind(&mut self) {
        let vacated = self.segments[self.segments.len() - 1].origin();
        if self.occupies(vacated) {
            self.grow(self.tail());
        } else {
            self.grow(vacated);
        }
    }

    /// Replace the snake with a two-segment snake at `head` (as with
    /// [`Snake::new()`]) and then regrow it to its current length
    pub(crate) fn respawn_at(&mut self, head: Position, grid: Grid) {
        let len = self.len();
        *self = Snake::new(head, grid);
        while self.len() < len {
            self.grow(self.tail());
        }
    }

    /// Advance every segment's interpolation by `elapsed`
    pub(crate) fn advance(&mut self, elapsed: Duration, interval: Duration, grid: Grid) {
        for seg in &mut self.segments {
            seg.advance(elapsed, interval, grid);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn grid() -> Grid {
        Grid::new(12, 21)
    }

    fn targets(snake: &Snake) -> Vec<Position> {
        snake.segments().iter().map(Segment::target).collect()
    }

    #[test]
    fn new_snake() {
        let snake = Snake::new(Position::new(6, 10), grid());
        assert_eq!(targets(&snake), [Position::new(6, 10), Position::new(7, 10)]);
        let snake = Snake::new(Position::new(11, 3), grid());
        assert_eq!(targets(&snake), [Position::new(11, 3), Position::new(0, 3)]);
    }

    #[test]
    fn step_shifts_body() {
        let mut snake = Snake::from_cells([
            Position::new(5, 5),
            Position::new(6, 5),
            Position::new(7, 5),
        ]);
        assert_eq!(snake.step(Direction::Up, grid()), StepOutcome::Moved);
        assert_eq!(
            targets(&snake),
            [Position::new(5, 4), Position::new(5, 5), Position::new(6, 5)]
        );
        let origins = snake.segments().iter().map(Segment::origin).collect::<Vec<_>>();
        assert_eq!(
            origins,
            [Position::new(5, 5), Position::new(6, 5), Position::new(7, 5)]
        );
        assert!(snake.segments().iter().all(|seg| seg.progress().abs() < f64::EPSILON));
    }

    #[test]
    fn step_wraps() {
        let mut snake = Snake::new(Position::new(0, 7), grid());
        assert_eq!(snake.step(Direction::Left, grid()), StepOutcome::Moved);
        assert_eq!(targets(&snake), [Position::new(11, 7), Position::new(0, 7)]);
    }

    #[rstest]
    #[case(Direction::Up)]
    #[case(Direction::Down)]
    #[case(Direction::Left)]
    #[case(Direction::Right)]
    fn two_segments_never_collide(#[case] d: Direction) {
        let mut snake = Snake::new(Position::new(6, 10), grid());
        // Moving right runs straight into the tail's cell
        assert_eq!(snake.step(d, grid()), StepOutcome::Moved);
        assert_eq!(snake.len(), 2);
    }

    #[test]
    fn collide_with_tail() {
        // Head at (5,5) heading right into the tail at (6,5):
        //   (5,4) (6,4)
        //   (5,5) (6,5)
        let mut snake = Snake::from_cells([
            Position::new(5, 5),
            Position::new(5, 4),
            Position::new(6, 4),
            Position::new(7, 4),
            Position::new(6, 5),
        ]);
        let before = snake.clone();
        assert_eq!(snake.step(Direction::Right, grid()), StepOutcome::SelfCollision);
        assert_eq!(snake, before);
    }

    #[test]
    fn collide_with_body() {
        let mut snake = Snake::from_cells([
            Position::new(5, 5),
            Position::new(6, 5),
            Position::new(6, 6),
            Position::new(5, 6),
            Position::new(4, 6),
        ]);
        assert_eq!(snake.step(Direction::Down, grid()), StepOutcome::SelfCollision);
        assert_eq!(snake.step(Direction::Left, grid()), StepOutcome::Moved);
    }

    #[test]
    fn collide_across_wrap() {
        let mut snake = Snake::from_cells([
            Position::new(0, 3),
            Position::new(1, 3),
            Position::new(1, 4),
            Position::new(0, 4),
            Position::new(11, 4),
            Position::new(11, 3),
        ]);
        assert_eq!(snake.step(Direction::Left, grid()), StepOutcome::SelfCollision);
    }

    #[test]
    fn glide_ignores_body() {
        let mut snake = Snake::from_cells([
            Position::new(5, 5),
            Position::new(6, 5),
            Position::new(6, 6),
            Position::new(5, 6),
            Position::new(4, 6),
        ]);
        snake.glide(Direction::Down, grid());
        assert_eq!(snake.head(), Position::new(5, 6));
        assert_eq!(snake.len(), 5);
    }

    #[test]
    fn grow_appears_in_place() {
        let mut snake = Snake::new(Position::new(6, 10), grid());
        snake.grow(Position::new(7, 10));
        assert_eq!(snake.len(), 3);
        let tail = &snake.segments()[2];
        assert_eq!(tail.origin(), Position::new(7, 10));
        assert_eq!(tail.target(), Position::new(7, 10));
        assert_eq!(tail.render_position(), RenderPosition::from(Position::new(7, 10)));
    }

    #[test]
    fn grown_segment_follows() {
        let mut snake = Snake::new(Position::new(6, 10), grid());
        snake.grow(snake.tail());
        assert_eq!(snake.step(Direction::Left, grid()), StepOutcome::Moved);
        assert_eq!(
            targets(&snake),
            [Position::new(5, 10), Position::new(6, 10), Position::new(7, 10)]
        );
    }

    #[test]
    fn grow_behind_fills_vacated_cell() {
        let mut snake = Snake::new(Position::new(6, 10), grid());
        assert_eq!(snake.step(Direction::Left, grid()), StepOutcome::Moved);
        snake.grow_behind();
        assert_eq!(
            targets(&snake),
            [Position::new(5, 10), Position::new(6, 10), Position::new(7, 10)]
        );
        let tail = &snake.segments()[2];
        assert_eq!(tail.origin(), Position::new(7, 10));
        assert_eq!(snake.step(Direction::Up, grid()), StepOutcome::Moved);
        assert_eq!(
            targets(&snake),
            [Position::new(5, 9), Position::new(5, 10), Position::new(6, 10)]
        );
    }

    #[test]
    fn grow_behind_at_rest_uses_tail() {
        let mut snake = Snake::new(Position::new(6, 10), grid());
        snake.grow_behind();
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.tail(), Position::new(7, 10));
    }

    #[test]
    fn grow_behind_on_narrow_board() {
        let narrow = Grid::new(2, 5);
        let mut snake = Snake::new(Position::new(0, 2), narrow);
        assert_eq!(snake.step(Direction::Left, narrow), StepOutcome::Moved);
        assert_eq!(snake.head(), Position::new(1, 2));
        // The cell the tail left is where the head is now
        snake.grow_behind();
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.tail(), Position::new(0, 2));
    }

    #[test]
    fn respawn_preserves_length() {
        let mut snake = Snake::from_cells([
            Position::new(5, 5),
            Position::new(6, 5),
            Position::new(6, 6),
            Position::new(5, 6),
            Position::new(4, 6),
        ]);
        snake.respawn_at(Position::new(1, 15), grid());
        assert_eq!(snake.len(), 5);
        assert_eq!(snake.head(), Position::new(1, 15));
        assert_eq!(
            targets(&snake),
            [
                Position::new(1, 15),
                Position::new(2, 15),
                Position::new(2, 15),
                Position::new(2, 15),
                Position::new(2, 15),
            ]
        );
    }

    #[test]
    fn respawned_snake_unfolds() {
        let mut snake = Snake::new(Position::new(6, 10), grid());
        snake.grow(snake.tail());
        snake.grow(snake.tail());
        snake.respawn_at(Position::new(3, 3), grid());
        for _ in 0..3 {
            assert_eq!(snake.step(Direction::Left, grid()), StepOutcome::Moved);
        }
        assert_eq!(
            targets(&snake),
            [
                Position::new(0, 3),
                Position::new(1, 3),
                Position::new(2, 3),
                Position::new(3, 3),
            ]
        );
    }

    #[test]
    fn occupies() {
        let snake = Snake::new(Position::new(6, 10), grid());
        assert!(snake.occupies(Position::new(6, 10)));
        assert!(snake.occupies(Position::new(7, 10)));
        assert!(!snake.occupies(Position::new(5, 10)));
    }

    #[test]
    fn render_positions_mark_head() {
        let snake = Snake::new(Position::new(6, 10), grid());
        let heads = snake.render_positions().map(|(_, h)| h).collect::<Vec<_>>();
        assert_eq!(heads, [true, false]);
    }
}
