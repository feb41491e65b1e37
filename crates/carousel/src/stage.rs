//! Mirror of the carousel's DOM: per-card position attribute, transition toggle and reveal
//! class, per-caption state class, and the stack's dragging class. Every change is also
//! journaled so a renderer can replay it.

use crate::i18n::CaptionText;
use crate::slot::Slot;
use strum::{Display as StrumDisplay, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, EnumString, StrumDisplay)]
#[strum(serialize_all = "lowercase")]
pub enum CaptionState {
    #[default]
    Inactive,
    Active,
    Exiting,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView {
    pub slot: Slot,
    pub transition: bool,
    pub revealed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptionView {
    pub text: CaptionText,
    pub state: CaptionState,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    Position { card: usize, slot: Slot },
    Transition { card: usize, enabled: bool },
    Revealed { card: usize },
    Caption { index: usize, state: CaptionState },
    CaptionText { index: usize, text: CaptionText },
    Dragging(bool),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stage {
    cards: Vec<CardView>,
    captions: Vec<CaptionView>,
    dragging: bool,
    journal: Vec<Mutation>,
}

impl Stage {
    pub fn new(cards: impl IntoIterator<Item = (Slot, CaptionText)>) -> Self {
        let (cards, captions) = cards
            .into_iter()
            .map(|(slot, text)| {
                (
                    CardView {
                        slot,
                        transition: true,
                        revealed: false,
                    },
                    CaptionView {
                        text,
                        state: CaptionState::Inactive,
                    },
                )
            })
            .unzip();

        Self {
            cards,
            captions,
            dragging: false,
            journal: Vec::new(),
        }
    }

    pub fn cards(&self) -> &[CardView] {
        &self.cards
    }

    pub fn captions(&self) -> &[CaptionView] {
        &self.captions
    }

    pub fn card(&self, card: usize) -> Option<&CardView> {
        self.cards.get(card)
    }

    pub fn dragging(&self) -> bool {
        self.dragging
    }

    /// Index of the active caption, `None` when zero or several are active.
    pub fn active_caption(&self) -> Option<usize> {
        let mut active = self
            .captions
            .iter()
            .enumerate()
            .filter(|(_, c)| c.state == CaptionState::Active)
            .map(|(i, _)| i);
        match (active.next(), active.next()) {
            (Some(i), None) => Some(i),
            _ => None,
        }
    }

    pub fn set_position(&mut self, card: usize, slot: Slot) {
        if let Some(view) = self.cards.get_mut(card)
            && view.slot != slot
        {
            view.slot = slot;
            self.journal.push(Mutation::Position { card, slot });
        }
    }

    pub fn set_transition(&mut self, card: usize, enabled: bool) {
        if let Some(view) = self.cards.get_mut(card)
            && view.transition != enabled
        {
            view.transition = enabled;
            self.journal.push(Mutation::Transition { card, enabled });
        }
    }

    pub fn reveal(&mut self, card: usize) {
        if let Some(view) = self.cards.get_mut(card)
            && !view.revealed
        {
            view.revealed = true;
            self.journal.push(Mutation::Revealed { card });
        }
    }

    pub fn set_dragging(&mut self, dragging: bool) {
        if self.dragging != dragging {
            self.dragging = dragging;
            self.journal.push(Mutation::Dragging(dragging));
        }
    }

    pub fn set_caption_text(&mut self, index: usize, text: CaptionText) {
        if let Some(view) = self.captions.get_mut(index)
            && view.text != text
        {
            view.text = text.clone();
            self.journal.push(Mutation::CaptionText { index, text });
        }
    }

    fn set_caption_state(&mut self, index: usize, state: CaptionState) {
        if let Some(view) = self.captions.get_mut(index)
            && view.state != state
        {
            view.state = state;
            self.journal.push(Mutation::Caption { index, state });
        }
    }

    /// Starts the active caption's exit.
    pub fn exit_active_caption(&mut self) {
        let active: Vec<usize> = self
            .captions
            .iter()
            .enumerate()
            .filter(|(_, c)| c.state == CaptionState::Active)
            .map(|(i, _)| i)
            .collect();
        for index in active {
            self.set_caption_state(index, CaptionState::Exiting);
        }
    }

    /// Makes `index` the only active caption and clears every other class.
    pub fn activate_caption(&mut self, index: usize) {
        for i in 0..self.captions.len() {
            let state = if i == index {
                CaptionState::Active
            } else {
                CaptionState::Inactive
            };
            self.set_caption_state(i, state);
        }
    }

    pub fn clear_exiting(&mut self) {
        for i in 0..self.captions.len() {
            if self.captions[i].state == CaptionState::Exiting {
                self.set_caption_state(i, CaptionState::Inactive);
            }
        }
    }

    pub fn take_mutations(&mut self) -> Vec<Mutation> {
        std::mem::take(&mut self.journal)
    }
}
