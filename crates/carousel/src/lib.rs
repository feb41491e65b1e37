//! Stacked photo carousel: five cards cycling through far-left, left, centre, right and
//! far-right slots, driven by pointer, touch, wheel, keyboard and click input.
//!
//! The crate is headless. Time comes in as `now_ms`, output goes out as [`stage::Mutation`]s
//! against a mirror of the carousel's DOM, so the host decides how to render and when to wake.

pub mod carousel;
pub mod error;
pub mod geometry;
pub mod i18n;
pub mod input;
pub mod macros;
pub mod markup;
pub mod options;
pub mod ring;
pub mod scheduler;
pub mod slot;
pub mod stage;

pub use carousel::Carousel;
pub use error::CarouselError;
pub use geometry::{FixedViewport, Rect, Viewport};
pub use i18n::{CaptionKey, CaptionText, Language, Translate};
pub use input::{InputEvent, Key, Verdict};
pub use markup::{AnchorId, CardMarkup, CarouselMarkup};
pub use options::{Options, Thresholds, Timing};
pub use scheduler::Phase;
pub use slot::{Direction, Slot};
pub use stage::{CaptionState, Mutation};
