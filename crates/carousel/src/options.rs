use crate::error::CarouselError;
use serde::{Deserialize, Serialize};

/// Delays of the transition sequence, in milliseconds from the `navigate` call unless noted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Timing {
    /// Card slide duration; the wrapping card is snapped once it has slid out.
    pub slide_ms: u64,
    /// Gap between the no-transition snap and re-enabling the transition.
    pub snap_settle_ms: u64,
    pub caption_delay_ms: u64,
    /// Whole transition window; the lock is held until this elapses.
    pub lock_ms: u64,
    /// Delay before the first card is revealed, relative to `reveal`.
    pub reveal_delay_ms: u64,
    pub reveal_stagger_ms: u64,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            slide_ms: 350,
            snap_settle_ms: 50,
            caption_delay_ms: 300,
            lock_ms: 700,
            reveal_delay_ms: 600,
            reveal_stagger_ms: 100,
        }
    }
}

impl Timing {
    pub fn snap_at(&self) -> u64 {
        self.slide_ms
    }

    pub fn settle_at(&self) -> u64 {
        self.slide_ms + self.snap_settle_ms
    }

    /// The deferred steps run in a fixed order, so their offsets must grow strictly:
    /// caption, snap, settle, release.
    pub fn validate(&self) -> Result<(), CarouselError> {
        if self.snap_settle_ms == 0 {
            return Err(CarouselError::Timing("snap_settle_ms must be non-zero"));
        }
        if self.caption_delay_ms >= self.snap_at() {
            return Err(CarouselError::Timing(
                "caption_delay_ms must be shorter than slide_ms",
            ));
        }
        if self.lock_ms <= self.settle_at() {
            return Err(CarouselError::Timing(
                "lock_ms must outlast slide_ms + snap_settle_ms",
            ));
        }
        Ok(())
    }
}

/// Per-channel gesture thresholds. Channels differ in noise, so each has its own value.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Thresholds {
    /// Horizontal touch travel, in px, beyond which a swipe navigates.
    pub swipe_px: f64,
    /// Horizontal pointer travel, in px, beyond which a drag navigates.
    pub drag_px: f64,
    /// Pointer travel at which a press becomes a drag.
    pub drag_start_px: f64,
    /// Accumulated wheel delta that fires one navigation.
    pub wheel_units: f64,
    /// Wheel silence after which the accumulator resets.
    pub wheel_idle_ms: u64,
    /// Horizontal delta of a single wheel event over the carousel, outside the stack, that
    /// navigates.
    pub trackpad_units: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            swipe_px: 50.0,
            drag_px: 50.0,
            drag_start_px: 10.0,
            wheel_units: 80.0,
            wheel_idle_ms: 150,
            trackpad_units: 10.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Options {
    pub timing: Timing,
    pub thresholds: Thresholds,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_timing_is_valid() {
        assert_eq!(Timing::default().validate(), Ok(()));
        assert_eq!(Timing::default().settle_at(), 400);
    }

    #[test]
    fn test_caption_after_snap_is_rejected() {
        let timing = Timing {
            caption_delay_ms: 360,
            ..Timing::default()
        };
        assert!(timing.validate().is_err());
    }

    #[test]
    fn test_lock_shorter_than_teleport_is_rejected() {
        let timing = Timing {
            lock_ms: 400,
            ..Timing::default()
        };
        assert!(timing.validate().is_err());
    }

    #[test]
    fn test_partial_options_keep_defaults() {
        let options: Options =
            serde_json::from_str(r#"{ "thresholds": { "wheel_units": 120.0 } }"#).unwrap();
        assert_eq!(options.thresholds.wheel_units, 120.0);
        assert_eq!(options.thresholds.swipe_px, 50.0);
        assert_eq!(options.timing, Timing::default());
    }
}
