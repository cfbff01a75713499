use crate::input::Direction;

/// Move selection cursor one item up, wrapping to the last item.
pub fn select_prev(selected: usize, item_count: usize) -> usize {
    if item_count == 0 {
        return 0;
    }
    (selected % item_count + item_count - 1) % item_count
}

/// Move selection cursor one item down, wrapping to the first item.
pub fn select_next(selected: usize, item_count: usize) -> usize {
    if item_count == 0 {
        return 0;
    }
    (selected + 1) % item_count
}

/// Move selection cursor one item in the encoder's direction.
pub fn step_selection(selected: usize, item_count: usize, direction: Direction) -> usize {
    match direction {
        Direction::Clockwise => select_next(selected, item_count),
        Direction::CounterClockwise => select_prev(selected, item_count),
    }
}
