//! Time-based interpolation of a panel body height.

use std::time::{Duration, Instant};

use super::easing::{Easing, ease, lerp_eased};

/// Direction of a height change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionKind {
    /// The body grows (or is resized while open).
    Expand,
    /// The body shrinks (or is closed).
    Collapse,
}

/// One sampled frame of a running height animation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationFrame {
    /// Height the body should have at this instant.
    pub height: f32,
    /// Eased progress from 0.0 to 1.0.
    pub progress: f32,
    /// Whether the animation has reached its end.
    pub finished: bool,
}

/// A height animation from one body height to another.
///
/// The animation does not own a timer. The host's frame loop samples it with
/// [`HeightAnimation::sample`]; stopping it simply means no longer sampling,
/// which leaves the body at whatever height the last frame produced.
#[derive(Debug, Clone)]
pub struct HeightAnimation {
    kind: TransitionKind,
    from: f32,
    to: f32,
    duration: Duration,
    easing: Easing,
    start_time: Instant,
}

impl HeightAnimation {
    /// Start a new animation at `start_time`.
    pub fn new(
        kind: TransitionKind,
        from: f32,
        to: f32,
        duration: Duration,
        easing: Easing,
        start_time: Instant,
    ) -> Self {
        Self {
            kind,
            from,
            to,
            duration,
            easing,
            start_time,
        }
    }

    /// The direction of this animation.
    #[inline]
    pub fn kind(&self) -> TransitionKind {
        self.kind
    }

    /// The target height.
    #[inline]
    pub fn to(&self) -> f32 {
        self.to
    }

    /// Sample the animation at `now`.
    pub fn sample(&self, now: Instant) -> AnimationFrame {
        let elapsed = now.saturating_duration_since(self.start_time);
        let raw_progress = if self.duration.is_zero() {
            1.0
        } else {
            (elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
        };

        if raw_progress >= 1.0 {
            return AnimationFrame {
                height: self.to,
                progress: 1.0,
                finished: true,
            };
        }

        AnimationFrame {
            height: lerp_eased(self.easing, self.from, self.to, raw_progress),
            progress: ease(self.easing, raw_progress),
            finished: false,
        }
    }
}
