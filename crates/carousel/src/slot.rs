use serde::Serialize;
use serde_with::DeserializeFromStr;
use strum::{Display as StrumDisplay, EnumIter, EnumString};

/// Number of visible slots, and so the number of physical cards the carousel drives.
pub const VISIBLE_SLOTS: usize = 5;

/// A logical card position. Five are visible; the two hidden slots only appear while a
/// wrapping card is being carried from one edge to the other.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    DeserializeFromStr,
    EnumString,
    EnumIter,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive, serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum Slot {
    FarLeft,
    Left,
    Center,
    Right,
    FarRight,
    HiddenLeft,
    HiddenRight,
}

impl Slot {
    pub const VISIBLE: [Slot; VISIBLE_SLOTS] = [
        Slot::FarLeft,
        Slot::Left,
        Slot::Center,
        Slot::Right,
        Slot::FarRight,
    ];

    /// Position in the visible window, `None` for the hidden slots.
    pub fn visible_index(self) -> Option<usize> {
        Self::VISIBLE.iter().position(|&s| s == self)
    }

    pub fn from_visible_index(idx: usize) -> Option<Self> {
        Self::VISIBLE.get(idx).copied()
    }

    pub fn is_hidden(self) -> bool {
        matches!(self, Slot::HiddenLeft | Slot::HiddenRight)
    }

    /// Which way a click on a card sitting here navigates.
    pub fn click_direction(self) -> Option<Direction> {
        match self {
            Slot::Left | Slot::FarLeft => Some(Direction::Prev),
            Slot::Right | Slot::FarRight => Some(Direction::Next),
            Slot::Center | Slot::HiddenLeft | Slot::HiddenRight => None,
        }
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    DeserializeFromStr,
    EnumString,
    EnumIter,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[strum(to_string = "prev", serialize = "previous", serialize = "left")]
    Prev,
    #[strum(to_string = "next", serialize = "right")]
    Next,
}

impl Direction {
    pub fn opposite(self) -> Self {
        match self {
            Direction::Prev => Direction::Next,
            Direction::Next => Direction::Prev,
        }
    }

    /// The visible slot whose card wraps around on this move.
    pub fn trailing_edge(self) -> Slot {
        match self {
            Direction::Next => Slot::FarLeft,
            Direction::Prev => Slot::FarRight,
        }
    }

    /// The visible slot the wrapping card lands in.
    pub fn leading_edge(self) -> Slot {
        self.opposite().trailing_edge()
    }

    /// Hidden slot the wrapping card slides out into.
    pub fn exit_slot(self) -> Slot {
        match self {
            Direction::Next => Slot::HiddenLeft,
            Direction::Prev => Slot::HiddenRight,
        }
    }

    /// Hidden slot the wrapping card is snapped to before sliding back in.
    pub fn entry_slot(self) -> Slot {
        self.opposite().exit_slot()
    }

    /// Signed shift applied to every non-wrapping card's visible index.
    pub fn slot_shift(self) -> isize {
        match self {
            Direction::Next => -1,
            Direction::Prev => 1,
        }
    }

    /// Direction implied by a horizontal travel of `start - end`: moving content left
    /// (positive difference) advances.
    pub fn from_travel(diff: f64) -> Self {
        if diff > 0.0 {
            Direction::Next
        } else {
            Direction::Prev
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_deserialization() {
        let cases = vec![
            ("\"far-left\"", Slot::FarLeft),
            ("\"FAR-LEFT\"", Slot::FarLeft),
            ("\"center\"", Slot::Center),
            ("\"far-right\"", Slot::FarRight),
            ("\"hidden-right\"", Slot::HiddenRight),
        ];

        for (json, expected) in cases {
            let deserialized: Slot = serde_json::from_str(json).unwrap();
            assert_eq!(deserialized, expected);
        }
        assert!(serde_json::from_str::<Slot>("\"middle\"").is_err());
    }

    #[test]
    fn test_slot_display_matches_markup_names() {
        assert_eq!(Slot::FarLeft.to_string(), "far-left");
        assert_eq!(Slot::HiddenRight.to_string(), "hidden-right");
    }

    #[test]
    fn test_visible_index_excludes_hidden() {
        assert_eq!(Slot::Center.visible_index(), Some(2));
        assert_eq!(Slot::HiddenLeft.visible_index(), None);
        assert_eq!(Slot::from_visible_index(4), Some(Slot::FarRight));
        assert_eq!(Slot::from_visible_index(5), None);
    }

    #[test]
    fn test_wrap_route_is_mirrored() {
        assert_eq!(Direction::Next.trailing_edge(), Slot::FarLeft);
        assert_eq!(Direction::Next.exit_slot(), Slot::HiddenLeft);
        assert_eq!(Direction::Next.entry_slot(), Slot::HiddenRight);
        assert_eq!(Direction::Next.leading_edge(), Slot::FarRight);
        assert_eq!(Direction::Prev.trailing_edge(), Slot::FarRight);
        assert_eq!(Direction::Prev.exit_slot(), Slot::HiddenRight);
        assert_eq!(Direction::Prev.entry_slot(), Slot::HiddenLeft);
        assert_eq!(Direction::Prev.leading_edge(), Slot::FarLeft);
    }

    #[test]
    fn test_click_direction() {
        assert_eq!(Slot::FarLeft.click_direction(), Some(Direction::Prev));
        assert_eq!(Slot::Right.click_direction(), Some(Direction::Next));
        assert_eq!(Slot::Center.click_direction(), None);
    }

    #[test]
    fn test_direction_aliases() {
        assert_eq!("left".parse::<Direction>().unwrap(), Direction::Prev);
        assert_eq!("NEXT".parse::<Direction>().unwrap(), Direction::Next);
    }
}
