use crate::i18n::CaptionKey;
use crate::slot::Slot;
use derive_more::{AsRef, Deref, Display, From, Into};
use serde::{Deserialize, Serialize};

#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct AnchorId(String);

crate::impl_string_newtype!(AnchorId);

/// The carousel's markup as authored: container id, whether the card stack is present, and
/// each card's starting position and caption key, in card order.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CarouselMarkup {
    pub id: AnchorId,
    #[serde(default = "default_stack")]
    pub stack: bool,
    #[serde(default)]
    pub cards: Vec<CardMarkup>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CardMarkup {
    pub position: Slot,
    pub caption: CaptionKey,
}

fn default_stack() -> bool {
    true
}

impl CarouselMarkup {
    /// Five cards laid out left to right, captioned by `keys`.
    pub fn standard(id: &str, keys: [&str; 5]) -> Self {
        Self {
            id: AnchorId::new(id),
            stack: true,
            cards: Slot::VISIBLE
                .into_iter()
                .zip(keys)
                .map(|(position, key)| CardMarkup {
                    position,
                    caption: CaptionKey::new(key),
                })
                .collect(),
        }
    }
}
