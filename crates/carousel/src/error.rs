use crate::slot::Slot;
use thiserror::Error;

/// Reasons a carousel refuses to mount. The host turns any of these into a disabled,
/// static carousel rather than surfacing them.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CarouselError {
    #[error("Carousel anchor not found")]
    MissingAnchor,
    #[error("Carousel '{0}' has no card stack element")]
    MissingStack(String),
    #[error("Carousel has no cards")]
    NoItems,
    #[error("Carousel needs exactly {expected} cards, found {found}")]
    ItemCount { expected: usize, found: usize },
    #[error("Card {card} starts in transient slot '{slot}'")]
    HiddenAtRest { card: usize, slot: Slot },
    #[error("Slot '{0}' is assigned to more than one card")]
    DuplicateSlot(Slot),
    #[error("Card {0} is not one slot to the right of the card before it")]
    OutOfOrder(usize),
    #[error("Invalid timing: {0}")]
    Timing(&'static str),
}
