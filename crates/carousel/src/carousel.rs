use crate::error::CarouselError;
use crate::geometry::Viewport;
use crate::i18n::{CaptionKey, CaptionText, Translate};
use crate::input::{Arbiter, InputEvent, Surroundings, Verdict};
use crate::markup::{AnchorId, CarouselMarkup};
use crate::options::Options;
use crate::ring::{Move, Ring};
use crate::scheduler::{Phase, Scheduler, Step, Transition};
use crate::slot::{Direction, Slot};
use crate::stage::{Mutation, Stage};

/// The stacked photo carousel. A carousel that failed to mount, or has been torn down, is
/// inert: every call is a no-op and every query comes back empty.
#[derive(Debug, Clone, Default)]
pub struct Carousel {
    active: Option<Active>,
}

#[derive(Debug, Clone)]
struct Active {
    id: AnchorId,
    keys: Vec<CaptionKey>,
    ring: Ring,
    stage: Stage,
    scheduler: Scheduler,
    arbiter: Arbiter,
}

struct Env<'a, V: Viewport> {
    scheduler: &'a Scheduler,
    stage: &'a Stage,
    viewport: &'a V,
}

impl<V: Viewport> Surroundings for Env<'_, V> {
    fn is_locked(&self) -> bool {
        self.scheduler.is_locked()
    }

    fn card_slot(&self, card: usize) -> Option<Slot> {
        self.stage.card(card).map(|c| c.slot)
    }

    fn in_view(&self) -> bool {
        self.viewport.carousel_in_view()
    }
}

impl Carousel {
    /// Mounts the carousel, or returns an inert one if the markup is missing or unusable.
    pub fn mount(
        markup: Option<&CarouselMarkup>,
        translator: &impl Translate,
        options: Options,
    ) -> Self {
        Self::try_mount(markup, translator, options).unwrap_or_else(|e| {
            log::warn!("Photo carousel disabled: {}", e);
            Self::disabled()
        })
    }

    pub fn try_mount(
        markup: Option<&CarouselMarkup>,
        translator: &impl Translate,
        options: Options,
    ) -> Result<Self, CarouselError> {
        let markup = markup.ok_or(CarouselError::MissingAnchor)?;
        if !markup.stack {
            return Err(CarouselError::MissingStack(markup.id.to_string()));
        }
        options.timing.validate()?;

        let layout: Vec<Slot> = markup.cards.iter().map(|c| c.position).collect();
        let ring = Ring::from_layout(&layout)?;

        let mut stage = Stage::new(
            markup
                .cards
                .iter()
                .map(|c| (c.position, CaptionText::new(translator.translate(&c.caption)))),
        );
        stage.activate_caption(ring.current_index());

        log::debug!(
            "Mounted carousel '{}' with {} cards, centred on {}",
            markup.id,
            ring.len(),
            ring.current_index()
        );

        Ok(Self {
            active: Some(Active {
                id: markup.id.clone(),
                keys: markup.cards.iter().map(|c| c.caption.clone()).collect(),
                ring,
                stage,
                scheduler: Scheduler::new(options.timing),
                arbiter: Arbiter::new(options.thresholds),
            }),
        })
    }

    pub fn disabled() -> Self {
        Self { active: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.active.is_some()
    }

    pub fn id(&self) -> Option<&AnchorId> {
        self.active.as_ref().map(|a| &a.id)
    }

    pub fn ring(&self) -> Option<&Ring> {
        self.active.as_ref().map(|a| &a.ring)
    }

    pub fn stage(&self) -> Option<&Stage> {
        self.active.as_ref().map(|a| &a.stage)
    }

    pub fn arbiter(&self) -> Option<&Arbiter> {
        self.active.as_ref().map(|a| &a.arbiter)
    }

    pub fn current_index(&self) -> Option<usize> {
        self.ring().map(Ring::current_index)
    }

    pub fn phase(&self) -> Phase {
        self.active
            .as_ref()
            .map_or(Phase::Idle, |a| a.scheduler.phase())
    }

    pub fn is_locked(&self) -> bool {
        self.active
            .as_ref()
            .is_some_and(|a| a.scheduler.is_locked())
    }

    /// No transition in flight and nothing deferred.
    pub fn is_quiescent(&self) -> bool {
        self.active
            .as_ref()
            .is_none_or(|a| a.scheduler.is_quiescent())
    }

    /// Routes one raw input event. Deferred steps that are already due run first, so a late
    /// timer never lets an input observe a stale lock.
    pub fn handle(&mut self, event: InputEvent, now_ms: u64, viewport: &impl Viewport) -> Verdict {
        let Some(active) = self.active.as_mut() else {
            return Verdict::default();
        };
        active.advance(now_ms);

        let env = Env {
            scheduler: &active.scheduler,
            stage: &active.stage,
            viewport,
        };
        let verdict = active.arbiter.handle(event, now_ms, &env);
        active.stage.set_dragging(active.arbiter.is_dragging());

        if let Some(direction) = verdict.command {
            active.navigate(direction, now_ms);
        }
        verdict
    }

    /// Starts a transition. Returns `false` if the carousel is locked or inert.
    pub fn navigate(&mut self, direction: Direction, now_ms: u64) -> bool {
        self.active.as_mut().is_some_and(|a| {
            a.advance(now_ms);
            a.navigate(direction, now_ms)
        })
    }

    /// Runs every deferred step due at `now_ms`.
    pub fn advance(&mut self, now_ms: u64) {
        if let Some(active) = self.active.as_mut() {
            active.advance(now_ms);
        }
    }

    pub fn next_deadline(&self) -> Option<u64> {
        self.active
            .as_ref()
            .and_then(|a| a.scheduler.next_deadline())
    }

    /// Reveals the cards one after another.
    pub fn reveal(&mut self, now_ms: u64) {
        if let Some(active) = self.active.as_mut() {
            let cards = active.ring.len();
            active.scheduler.schedule_reveals(now_ms, cards);
        }
    }

    /// Re-reads every caption. Keys without a translation keep their current text.
    pub fn relabel(&mut self, translator: &impl Translate) {
        if let Some(active) = self.active.as_mut() {
            for (index, key) in active.keys.iter().enumerate() {
                if let Some(text) = translator.resolve(key) {
                    active.stage.set_caption_text(index, text);
                }
            }
        }
    }

    pub fn take_mutations(&mut self) -> Vec<Mutation> {
        self.active
            .as_mut()
            .map(|a| a.stage.take_mutations())
            .unwrap_or_default()
    }

    /// Drops pending steps and makes the carousel inert.
    pub fn teardown(&mut self) {
        if let Some(mut active) = self.active.take() {
            active.scheduler.cancel();
            log::debug!("Carousel '{}' torn down", active.id);
        }
    }
}

impl Active {
    fn navigate(&mut self, direction: Direction, now_ms: u64) -> bool {
        if self.scheduler.is_locked() {
            log::trace!("navigate {direction} ignored, transition in flight");
            return false;
        }

        let shift = self.ring.shift(direction);
        self.scheduler.begin(direction, shift.wrapped(), now_ms);
        self.stage.exit_active_caption();

        for m in &shift.moves {
            match *m {
                Move::Step { item, to, .. } => self.stage.set_position(item, to),
                Move::Wrap { item, exit, .. } => self.stage.set_position(item, exit),
            }
        }

        log::debug!(
            "Carousel '{}': {direction} to item {}",
            self.id,
            self.ring.current_index()
        );
        true
    }

    fn advance(&mut self, now_ms: u64) {
        self.arbiter.expire(now_ms);
        while let Some(card) = self.scheduler.pop_reveal(now_ms) {
            self.stage.reveal(card);
        }
        while let Some((step, transition)) = self.scheduler.pop_due(now_ms) {
            self.apply(step, &transition);
        }
    }

    fn apply(&mut self, step: Step, transition: &Transition) {
        match (step, transition.wrapped) {
            (Step::RevealCaption, _) => self.stage.activate_caption(self.ring.current_index()),
            (Step::TeleportSnap, Some(card)) => {
                self.stage.set_transition(card, false);
                self.stage
                    .set_position(card, transition.direction.entry_slot());
            }
            (Step::TeleportSettle, Some(card)) => {
                self.stage.set_transition(card, true);
                if let Some(slot) = self.ring.slot_of(card) {
                    self.stage.set_position(card, slot);
                }
            }
            (Step::TeleportSnap | Step::TeleportSettle, None) => {}
            (Step::Release, _) => self.stage.clear_exiting(),
        }
    }
}
