//! Animation support for accordion panels.
//!
//! This module provides easing functions and the height interpolation that
//! drives animated expand/collapse.
//!
//! # Example
//!
//! ```
//! use std::time::{Duration, Instant};
//! use horizon_accordion::animation::{Easing, HeightAnimation, TransitionKind};
//!
//! let start = Instant::now();
//! let anim = HeightAnimation::new(
//!     TransitionKind::Expand,
//!     0.0,
//!     120.0,
//!     Duration::from_millis(300),
//!     Easing::EaseOutQuart,
//!     start,
//! );
//! assert!(anim.sample(start + Duration::from_millis(300)).finished);
//! ```

mod easing;
mod height;

pub use easing::{Easing, ease, lerp_eased};
pub use height::{AnimationFrame, HeightAnimation, TransitionKind};
