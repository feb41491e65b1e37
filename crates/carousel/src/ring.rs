//! Position model: which visible slot each card occupies and which item is centred.
//!
//! The ring only knows quiescent positions. A card that wraps around is reported as a
//! [`Move::Wrap`] so the scheduler can stage its trip through the hidden slots, but the
//! ring itself records it at its landing slot straight away.

use crate::error::CarouselError;
use crate::slot::{Direction, Slot, VISIBLE_SLOTS};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ring {
    /// Visible index per card.
    positions: Vec<usize>,
    current: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Move {
    Step {
        item: usize,
        from: Slot,
        to: Slot,
    },
    /// Leaves through `exit`, reappears at `entry` without animating, slides into `to`.
    Wrap {
        item: usize,
        from: Slot,
        exit: Slot,
        entry: Slot,
        to: Slot,
    },
}

impl Move {
    pub fn item(&self) -> usize {
        match *self {
            Move::Step { item, .. } | Move::Wrap { item, .. } => item,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shift {
    pub direction: Direction,
    pub moves: Vec<Move>,
}

impl Shift {
    pub fn wrapped(&self) -> Option<usize> {
        self.moves.iter().find_map(|m| match m {
            Move::Wrap { item, .. } => Some(*item),
            Move::Step { .. } => None,
        })
    }
}

impl Ring {
    /// Builds the ring from each card's starting slot, in card order.
    ///
    /// Every card must sit in a distinct visible slot, and card `i + 1` must sit one slot to
    /// the right of card `i` (cyclically), so that advancing the centred index by one always
    /// names the card that slides into the centre.
    pub fn from_layout(layout: &[Slot]) -> Result<Self, CarouselError> {
        if layout.is_empty() {
            return Err(CarouselError::NoItems);
        }
        if layout.len() != VISIBLE_SLOTS {
            return Err(CarouselError::ItemCount {
                expected: VISIBLE_SLOTS,
                found: layout.len(),
            });
        }

        let mut positions = Vec::with_capacity(layout.len());
        let mut taken = [false; VISIBLE_SLOTS];
        for (card, &slot) in layout.iter().enumerate() {
            let idx = slot
                .visible_index()
                .ok_or(CarouselError::HiddenAtRest { card, slot })?;
            if std::mem::replace(&mut taken[idx], true) {
                return Err(CarouselError::DuplicateSlot(slot));
            }
            positions.push(idx);
        }

        if let Some(card) = (1..positions.len())
            .find(|&i| positions[i] != (positions[i - 1] + 1) % VISIBLE_SLOTS)
        {
            return Err(CarouselError::OutOfOrder(card));
        }

        let center = Slot::Center.visible_index().unwrap_or(VISIBLE_SLOTS / 2);
        let current = positions
            .iter()
            .position(|&p| p == center)
            .ok_or(CarouselError::NoItems)?;

        Ok(Self { positions, current })
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    /// The card in the centre slot.
    pub fn current_item(&self) -> usize {
        debug_assert_eq!(self.item_at(Slot::Center), Some(self.current));
        self.current
    }

    pub fn slot_of(&self, item: usize) -> Option<Slot> {
        self.positions
            .get(item)
            .and_then(|&p| Slot::from_visible_index(p))
    }

    pub fn item_at(&self, slot: Slot) -> Option<usize> {
        let idx = slot.visible_index()?;
        self.positions.iter().position(|&p| p == idx)
    }

    pub fn slots(&self) -> impl Iterator<Item = Slot> + '_ {
        self.positions
            .iter()
            .filter_map(|&p| Slot::from_visible_index(p))
    }

    pub fn next(&mut self) -> Shift {
        self.shift(Direction::Next)
    }

    pub fn prev(&mut self) -> Shift {
        self.shift(Direction::Prev)
    }

    /// Moves every card one slot against `direction`'s travel and reports how each got there.
    pub fn shift(&mut self, direction: Direction) -> Shift {
        let n = self.positions.len();
        let moves = self
            .positions
            .iter_mut()
            .enumerate()
            .map(|(item, pos)| {
                let from = Slot::VISIBLE[*pos];
                let target = *pos as isize + direction.slot_shift();
                if (0..VISIBLE_SLOTS as isize).contains(&target) {
                    *pos = target as usize;
                    Move::Step {
                        item,
                        from,
                        to: Slot::VISIBLE[*pos],
                    }
                } else {
                    let to = direction.leading_edge();
                    *pos = to.visible_index().unwrap_or(*pos);
                    Move::Wrap {
                        item,
                        from,
                        exit: direction.exit_slot(),
                        entry: direction.entry_slot(),
                        to,
                    }
                }
            })
            .collect();

        self.current = match direction {
            Direction::Next => (self.current + 1) % n,
            Direction::Prev => (self.current + n - 1) % n,
        };

        Shift { direction, moves }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ring() -> Ring {
        Ring::from_layout(&Slot::VISIBLE).unwrap()
    }

    #[test]
    fn test_initial_center() {
        let r = ring();
        assert_eq!(r.current_index(), 2);
        assert_eq!(r.current_item(), 2);
        assert_eq!(r.slot_of(0), Some(Slot::FarLeft));
    }

    #[test]
    fn test_next_wraps_far_left_only() {
        let mut r = ring();
        let shift = r.next();
        assert_eq!(shift.wrapped(), Some(0));
        assert_eq!(
            shift.moves[0],
            Move::Wrap {
                item: 0,
                from: Slot::FarLeft,
                exit: Slot::HiddenLeft,
                entry: Slot::HiddenRight,
                to: Slot::FarRight,
            }
        );
        assert_eq!(
            shift.moves[2],
            Move::Step {
                item: 2,
                from: Slot::Center,
                to: Slot::Left,
            }
        );
        assert_eq!(r.current_index(), 3);
        assert_eq!(r.item_at(Slot::Center), Some(3));
    }

    #[test]
    fn test_prev_wraps_far_right_only() {
        let mut r = ring();
        let shift = r.prev();
        assert_eq!(shift.wrapped(), Some(4));
        assert_eq!(r.slot_of(4), Some(Slot::FarLeft));
        assert_eq!(r.current_index(), 1);
        assert_eq!(r.item_at(Slot::Center), Some(1));
    }

    #[test]
    fn test_full_cycle_returns_home() {
        let start = ring();
        let mut r = start.clone();
        for _ in 0..r.len() {
            r.next();
        }
        assert_eq!(r, start);
        for _ in 0..r.len() {
            r.prev();
        }
        assert_eq!(r, start);
    }

    #[test]
    fn test_prev_undoes_next_from_every_rotation() {
        let mut r = ring();
        for _ in 0..r.len() {
            let before = r.clone();
            r.next();
            r.prev();
            assert_eq!(r, before);
            r.next();
        }
    }

    #[test]
    fn test_rotated_layout_is_accepted() {
        let layout = [
            Slot::Right,
            Slot::FarRight,
            Slot::FarLeft,
            Slot::Left,
            Slot::Center,
        ];
        let r = Ring::from_layout(&layout).unwrap();
        assert_eq!(r.current_index(), 4);
    }

    #[test]
    fn test_layout_validation() {
        assert_eq!(Ring::from_layout(&[]), Err(CarouselError::NoItems));
        assert_eq!(
            Ring::from_layout(&Slot::VISIBLE[..3]),
            Err(CarouselError::ItemCount {
                expected: 5,
                found: 3
            })
        );
        assert_eq!(
            Ring::from_layout(&[
                Slot::FarLeft,
                Slot::Left,
                Slot::Center,
                Slot::Right,
                Slot::HiddenRight
            ]),
            Err(CarouselError::HiddenAtRest {
                card: 4,
                slot: Slot::HiddenRight
            })
        );
        assert_eq!(
            Ring::from_layout(&[
                Slot::FarLeft,
                Slot::Left,
                Slot::Center,
                Slot::Center,
                Slot::FarRight
            ]),
            Err(CarouselError::DuplicateSlot(Slot::Center))
        );
        assert_eq!(
            Ring::from_layout(&[
                Slot::Left,
                Slot::FarLeft,
                Slot::Center,
                Slot::Right,
                Slot::FarRight
            ]),
            Err(CarouselError::OutOfOrder(1))
        );
    }
}
