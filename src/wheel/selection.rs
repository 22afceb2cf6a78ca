#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: usize,
    pub to: usize,
}

impl Transition {
    pub fn changed(&self) -> bool {
        self.from != self.to
    }
}

#[derive(Debug, Clone)]
pub struct Selection {
    active: usize,
    len: usize,
}

impl Selection {
    pub fn new(len: usize, initial: usize) -> Self {
        debug_assert!(len > 0, "selection over an empty list");
        let len = len.max(1);
        Self {
            active: initial % len,
            len,
        }
    }

    pub fn active(&self) -> usize {
        self.active
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn last_index(&self) -> usize {
        self.len - 1
    }

    pub fn is_last(&self) -> bool {
        self.active == self.last_index()
    }

    /// `active = (active - direction + len) mod len`, direction is ±1.
    pub fn advance(&mut self, direction: i32) -> Transition {
        let len = self.len as i64;
        let next = (self.active as i64 - i64::from(direction.signum())).rem_euclid(len);
        self.set(next as usize)
    }

    pub fn select(&mut self, index: usize) -> Transition {
        self.set(index % self.len)
    }

    pub fn sync_external(&mut self, index: usize) -> Transition {
        self.set(index % self.len)
    }

    fn set(&mut self, to: usize) -> Transition {
        let from = self.active;
        self.active = to;
        Transition { from, to }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_round_trip_is_identity() {
        for len in 1..=9 {
            for start in 0..len {
                let mut selection = Selection::new(len, start);
                selection.advance(1);
                selection.advance(-1);
                assert_eq!(selection.active(), start, "len={len} start={start}");
            }
        }
    }

    #[test]
    fn upward_direction_moves_to_next_index() {
        let mut selection = Selection::new(7, 0);
        let transition = selection.advance(-1);
        assert_eq!(transition, Transition { from: 0, to: 1 });

        let mut selection = Selection::new(7, 0);
        selection.advance(1);
        assert_eq!(selection.active(), 6);
    }

    #[test]
    fn select_sets_any_valid_index() {
        let mut selection = Selection::new(7, 3);
        for index in 0..7 {
            selection.select(index);
            assert_eq!(selection.active(), index);
        }
    }

    #[test]
    fn out_of_range_indices_are_normalized() {
        assert_eq!(Selection::new(7, 9).active(), 2);

        let mut selection = Selection::new(7, 0);
        let transition = selection.sync_external(13);
        assert_eq!(transition.to, 6);
        assert!(selection.is_last());
    }

    #[test]
    fn single_item_advance_does_not_change() {
        let mut selection = Selection::new(1, 0);
        assert!(!selection.advance(-1).changed());
        assert!(!selection.advance(1).changed());
    }
}
