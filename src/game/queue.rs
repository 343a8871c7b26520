use super::direction::Direction;
use crate::consts;
use std::collections::VecDeque;

/// Pending direction changes.  The front entry is the committed direction;
/// any later entries are turns that will be committed on upcoming steps.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct DirectionQueue {
    entries: VecDeque<Direction>,
}

impl DirectionQueue {
    pub(crate) fn new(committed: Direction) -> DirectionQueue {
        DirectionQueue {
            entries: VecDeque::from([committed]),
        }
    }

    /// Queue up a turn.  The turn is dropped if it repeats or reverses the
    /// most recently queued direction, or if the queue is already full.
    /// Returns whether the turn was accepted.
    pub(crate) fn enqueue(&mut self, intent: Direction) -> bool {
        let back = self.back();
        if intent == back
            || intent.is_reverse_of(back)
            || self.entries.len() >= consts::DIRECTION_QUEUE_CAPACITY
        {
            return false;
        }
        self.entries.push_back(intent);
        true
    }

    /// Called once per discrete step.  If a turn is pending, the old
    /// committed direction is discarded and the turn becomes committed.
    /// Returns the committed direction.
    pub(crate) fn dequeue_committed(&mut self) -> Direction {
        if self.entries.len() > 1 {
            let _ = self.entries.pop_front();
        }
        self.committed()
    }

    pub(crate) fn committed(&self) -> Direction {
        self.entries.front().copied().unwrap_or(Direction::Left)
    }

    #[cfg(test)]
    pub(crate) fn pending(&self) -> impl Iterator<Item = Direction> + '_ {
        self.entries.iter().skip(1).copied()
    }

    /// Discard all pending turns and commit `direction`
    pub(crate) fn reset(&mut self, direction: Direction) {
        self.entries.clear();
        self.entries.push_back(direction);
    }

    fn back(&self) -> Direction {
        self.entries.back().copied().unwrap_or(Direction::Left)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn contents(queue: &DirectionQueue) -> Vec<Direction> {
        std::iter::once(queue.committed())
            .chain(queue.pending())
            .collect()
    }

    #[test]
    fn reversal_rejected_turn_accepted() {
        let mut queue = DirectionQueue::new(Direction::Left);
        assert!(!queue.enqueue(Direction::Right));
        assert_eq!(contents(&queue), [Direction::Left]);
        assert!(queue.enqueue(Direction::Up));
        assert_eq!(contents(&queue), [Direction::Left, Direction::Up]);
        assert_eq!(queue.dequeue_committed(), Direction::Up);
        assert_eq!(contents(&queue), [Direction::Up]);
    }

    #[rstest]
    #[case(Direction::Up)]
    #[case(Direction::Down)]
    #[case(Direction::Left)]
    #[case(Direction::Right)]
    fn reversal_leaves_committed_direction(#[case] d: Direction) {
        let mut queue = DirectionQueue::new(d);
        assert!(!queue.enqueue(d.reverse()));
        assert_eq!(queue.dequeue_committed(), d);
    }

    #[test]
    fn repeat_is_noop() {
        let mut queue = DirectionQueue::new(Direction::Down);
        assert!(!queue.enqueue(Direction::Down));
        assert!(queue.enqueue(Direction::Right));
        assert!(!queue.enqueue(Direction::Right));
        assert_eq!(contents(&queue), [Direction::Down, Direction::Right]);
    }

    #[test]
    fn reversal_checked_against_back() {
        let mut queue = DirectionQueue::new(Direction::Left);
        assert!(queue.enqueue(Direction::Up));
        // Reverse of the committed direction, but not of the pending turn
        assert!(queue.enqueue(Direction::Right));
        assert_eq!(
            contents(&queue),
            [Direction::Left, Direction::Up, Direction::Right]
        );
    }

    #[test]
    fn capacity_rejects_newest() {
        let mut queue = DirectionQueue::new(Direction::Left);
        assert!(queue.enqueue(Direction::Up));
        assert!(queue.enqueue(Direction::Right));
        assert!(!queue.enqueue(Direction::Down));
        assert_eq!(
            contents(&queue),
            [Direction::Left, Direction::Up, Direction::Right]
        );
    }

    #[test]
    fn dequeue_single_entry_persists() {
        let mut queue = DirectionQueue::new(Direction::Up);
        assert_eq!(queue.dequeue_committed(), Direction::Up);
        assert_eq!(queue.dequeue_committed(), Direction::Up);
        assert_eq!(contents(&queue), [Direction::Up]);
    }

    #[test]
    fn dequeue_commits_turns_in_order() {
        let mut queue = DirectionQueue::new(Direction::Left);
        assert!(queue.enqueue(Direction::Up));
        assert!(queue.enqueue(Direction::Right));
        assert_eq!(queue.dequeue_committed(), Direction::Up);
        assert_eq!(queue.dequeue_committed(), Direction::Right);
        assert_eq!(queue.dequeue_committed(), Direction::Right);
    }

    #[test]
    fn reset_discards_pending() {
        let mut queue = DirectionQueue::new(Direction::Left);
        assert!(queue.enqueue(Direction::Up));
        queue.reset(Direction::Down);
        assert_eq!(contents(&queue), [Direction::Down]);
    }
}
