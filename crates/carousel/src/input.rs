//! Input arbitration: five device channels reduced to at most one navigation per gesture.
//!
//! ```text
//! arrow button / card click / key  -> immediate, no threshold
//! touch-start .. touch-end         -> |travel| > swipe_px
//! pointer down .. move .. up       -> dragged (> drag_start_px) and |travel| > drag_px
//! wheel (while over the stack)     -> running total reaches wheel_units
//! wheel (carousel, off the stack)  -> horizontal-dominant delta above trackpad_units
//! ```
//!
//! Every channel checks the animation lock before emitting; the carousel checks it again.

use crate::options::Thresholds;
use crate::slot::{Direction, Slot};
use strum::{Display as StrumDisplay, EnumString};

pub const PRIMARY_BUTTON: u32 = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    #[strum(disabled)]
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    ArrowButton(Direction),
    /// A click landed on a card.
    CardClick { card: usize },
    Key(Key),
    TouchStart { x: f64 },
    TouchEnd { x: f64 },
    PointerDown { x: f64, button: u32 },
    PointerMove { x: f64 },
    PointerUp { x: f64 },
    /// The pointer left the document window.
    PointerLeaveDocument,
    StackEnter,
    StackLeave,
    Wheel { dx: f64, dy: f64 },
    /// A wheel event over the carousel but outside the card stack.
    CarouselWheel { dx: f64, dy: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, StrumDisplay)]
#[strum(serialize_all = "lowercase")]
pub enum Channel {
    Arrow,
    Click,
    Keyboard,
    Touch,
    Drag,
    Wheel,
    Trackpad,
}

/// What the arbiter made of one event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Verdict {
    pub command: Option<Direction>,
    /// The event must not reach the page (no page scroll, no text selection).
    pub consumed: bool,
}

impl Verdict {
    fn pass() -> Self {
        Self::default()
    }

    fn consumed(command: Option<Direction>) -> Self {
        Self {
            command,
            consumed: true,
        }
    }

    fn command(command: Option<Direction>) -> Self {
        Self {
            command,
            consumed: false,
        }
    }
}

/// What the arbiter needs to know about the rest of the carousel.
pub trait Surroundings {
    fn is_locked(&self) -> bool;
    fn card_slot(&self, card: usize) -> Option<Slot>;
    fn in_view(&self) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum PointerGesture {
    #[default]
    Idle,
    /// Primary button held on the stack.
    Pressed { start_x: f64, dragged: bool },
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WheelAccumulator {
    total: f64,
    last_ms: Option<u64>,
}

impl WheelAccumulator {
    pub fn total(&self) -> f64 {
        self.total
    }

    pub fn reset(&mut self) {
        self.total = 0.0;
        self.last_ms = None;
    }

    /// Drops the running total once the wheel has been quiet for `idle_ms`.
    pub fn expire(&mut self, now_ms: u64, idle_ms: u64) {
        if self
            .last_ms
            .is_some_and(|last| now_ms.saturating_sub(last) >= idle_ms)
        {
            self.reset();
        }
    }

    pub fn push(
        &mut self,
        dx: f64,
        dy: f64,
        now_ms: u64,
        thresholds: &Thresholds,
    ) -> Option<Direction> {
        self.expire(now_ms, thresholds.wheel_idle_ms);

        // horizontal wins unless vertical is strictly larger
        let delta = if dx.abs() < dy.abs() { dy } else { dx };
        self.total += delta;
        self.last_ms = Some(now_ms);

        if self.total.abs() >= thresholds.wheel_units {
            let direction = if self.total > 0.0 {
                Direction::Next
            } else {
                Direction::Prev
            };
            self.total = 0.0;
            Some(direction)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Arbiter {
    thresholds: Thresholds,
    pointer: PointerGesture,
    /// Set by the pointer-up ending a drag. Only the event right after it is checked.
    suppress_click: bool,
    touch_start: Option<f64>,
    hovering_stack: bool,
    wheel: WheelAccumulator,
}

impl Arbiter {
    pub fn new(thresholds: Thresholds) -> Self {
        Self {
            thresholds,
            pointer: PointerGesture::Idle,
            suppress_click: false,
            touch_start: None,
            hovering_stack: false,
            wheel: WheelAccumulator::default(),
        }
    }

    pub fn pointer(&self) -> PointerGesture {
        self.pointer
    }

    /// Whether the stack should carry its dragging class.
    pub fn is_dragging(&self) -> bool {
        matches!(self.pointer, PointerGesture::Pressed { .. })
    }

    pub fn hovering_stack(&self) -> bool {
        self.hovering_stack
    }

    pub fn wheel_total(&self) -> f64 {
        self.wheel.total()
    }

    pub fn expire(&mut self, now_ms: u64) {
        self.wheel.expire(now_ms, self.thresholds.wheel_idle_ms);
    }

    pub fn handle(&mut self, event: InputEvent, now_ms: u64, env: &impl Surroundings) -> Verdict {
        let after_drag = std::mem::take(&mut self.suppress_click);
        match event {
            InputEvent::ArrowButton(direction) => {
                Verdict::command(Self::emit(Channel::Arrow, direction, env))
            }
            InputEvent::CardClick { card } => {
                if after_drag {
                    log::trace!("click on card {card} ended a drag, ignored");
                    return Verdict::consumed(None);
                }
                let command = env
                    .card_slot(card)
                    .and_then(Slot::click_direction)
                    .and_then(|dir| Self::emit(Channel::Click, dir, env));
                Verdict::command(command)
            }
            InputEvent::Key(key) => {
                let direction = match key {
                    Key::ArrowLeft => Direction::Prev,
                    Key::ArrowRight => Direction::Next,
                    Key::Other => return Verdict::pass(),
                };
                if !env.in_view() {
                    return Verdict::pass();
                }
                Verdict::command(Self::emit(Channel::Keyboard, direction, env))
            }
            InputEvent::TouchStart { x } => {
                self.touch_start = Some(x);
                Verdict::pass()
            }
            InputEvent::TouchEnd { x } => {
                let command = self
                    .touch_start
                    .take()
                    .map(|start| start - x)
                    .filter(|diff| diff.abs() > self.thresholds.swipe_px)
                    .and_then(|diff| {
                        Self::emit(Channel::Touch, Direction::from_travel(diff), env)
                    });
                Verdict::command(command)
            }
            InputEvent::PointerDown { x, button } => {
                if button != PRIMARY_BUTTON {
                    return Verdict::pass();
                }
                self.pointer = PointerGesture::Pressed {
                    start_x: x,
                    dragged: false,
                };
                Verdict::consumed(None)
            }
            InputEvent::PointerMove { x } => {
                if let PointerGesture::Pressed { start_x, dragged } = &mut self.pointer
                    && (*start_x - x).abs() > self.thresholds.drag_start_px
                {
                    *dragged = true;
                }
                Verdict::pass()
            }
            InputEvent::PointerUp { x } => {
                let PointerGesture::Pressed { start_x, dragged } =
                    std::mem::take(&mut self.pointer)
                else {
                    return Verdict::pass();
                };
                self.suppress_click = dragged;
                let diff = start_x - x;
                let command = (dragged && diff.abs() > self.thresholds.drag_px)
                    .then(|| Self::emit(Channel::Drag, Direction::from_travel(diff), env))
                    .flatten();
                Verdict::command(command)
            }
            InputEvent::PointerLeaveDocument => {
                if self.is_dragging() {
                    log::trace!("pointer left the document mid-drag");
                }
                self.pointer = PointerGesture::Idle;
                Verdict::pass()
            }
            InputEvent::StackEnter => {
                self.hovering_stack = true;
                Verdict::pass()
            }
            InputEvent::StackLeave => {
                self.hovering_stack = false;
                self.wheel.reset();
                Verdict::pass()
            }
            InputEvent::Wheel { dx, dy } => {
                if !self.hovering_stack {
                    return Verdict::pass();
                }
                let command = self
                    .wheel
                    .push(dx, dy, now_ms, &self.thresholds)
                    .and_then(|dir| Self::emit(Channel::Wheel, dir, env));
                Verdict::consumed(command)
            }
            InputEvent::CarouselWheel { dx, dy } => {
                // the stack channel owns wheel input while hovered
                if self.hovering_stack || dx.abs() <= dy.abs() {
                    return Verdict::pass();
                }
                let command = (dx.abs() > self.thresholds.trackpad_units)
                    .then(|| Self::emit(Channel::Trackpad, Direction::from_travel(dx), env))
                    .flatten();
                Verdict::consumed(command)
            }
        }
    }

    fn emit(channel: Channel, direction: Direction, env: &impl Surroundings) -> Option<Direction> {
        if env.is_locked() {
            log::trace!("{channel}: {direction} dropped while animating");
            None
        } else {
            log::debug!("{channel}: {direction}");
            Some(direction)
        }
    }
}
