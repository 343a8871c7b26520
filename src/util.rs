use crate::consts;
use enum_map::Enum;
use ratatui::layout::{Flex, Layout, Rect, Size};

pub(crate) trait EnumExt: Enum {
    /// Return the variant after `self`, wrapping around to the first variant
    /// after the last one
    fn next_cyclic(self) -> Self {
        Self::from_usize((self.into_usize() + 1) % Self::LENGTH)
    }

    /// Return the variant at position `i % LENGTH`
    fn nth_cyclic(i: usize) -> Self {
        Self::from_usize(i % Self::LENGTH)
    }
}

impl<T: Enum> EnumExt for T {}

pub(crate) fn get_display_area(buffer_area: Rect) -> Rect {
    center_rect(buffer_area, consts::DISPLAY_SIZE)
}

/// Return a `Rect` of the given size centered within `area`, shrunk to fit if
/// necessary
pub(crate) fn center_rect(area: Rect, size: Size) -> Rect {
    let [rect] = Layout::horizontal([size.width])
        .flex(Flex::Center)
        .areas(area);
    let [rect] = Layout::vertical([size.height])
        .flex(Flex::Center)
        .areas(rect);
    rect
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[derive(Clone, Copy, Debug, Enum, Eq, PartialEq)]
    enum Phase {
        New,
        Waxing,
        Full,
        Waning,
    }

    #[rstest]
    #[case(Phase::New, Phase::Waxing)]
    #[case(Phase::Waxing, Phase::Full)]
    #[case(Phase::Full, Phase::Waning)]
    #[case(Phase::Waning, Phase::New)]
    fn test_next_cyclic(#[case] before: Phase, #[case] after: Phase) {
        assert_eq!(before.next_cyclic(), after);
    }

    #[rstest]
    #[case(0, Phase::New)]
    #[case(3, Phase::Waning)]
    #[case(6, Phase::Full)]
    fn test_nth_cyclic(#[case] i: usize, #[case] phase: Phase) {
        assert_eq!(Phase::nth_cyclic(i), phase);
    }

    #[rstest]
    #[case(Rect::new(0, 0, 80, 24), Size::new(26, 22), Rect::new(27, 1, 26, 22))]
    #[case(Rect::new(0, 0, 100, 40), Size::new(80, 24), Rect::new(10, 8, 80, 24))]
    #[case(Rect::new(0, 0, 10, 5), Size::new(20, 10), Rect::new(0, 0, 10, 5))]
    fn test_center_rect(#[case] area: Rect, #[case] size: Size, #[case] rect: Rect) {
        assert_eq!(center_rect(area, size), rect);
    }
}
