//! # Reel core
//!
//! Building blocks shared by the reel crates. Nothing in here knows about
//! scroll surfaces or slot machines; it is the vocabulary the motion, snap
//! and sequencing code is written in.
//!
//! - `geometry`: `Vec2`, `Size`, `Rect` and a translate/scale `Transform`.
//! - `animation`: clamped `lerp` and the `Interpolate` trait.
//! - `Signal<T>`: observable value used for readiness flags.
//! - `task`: `TaskSlot`/`TaskHandle` for single-owner cancellable work and
//!   the `Countdown` timer.
//! - `ReelError` and `ReelConfig`.
//!
//! ## Tasks
//!
//! Everything is driven by an explicit `tick(dt)`. A long-running operation
//! (a scroll ramp, a delayed snap) is a phase advanced by that tick plus a
//! `TaskHandle` describing whether it is still the live one:
//!
//! ```rust
//! use reel_core::task::{TaskSlot, TaskStatus};
//!
//! let mut slot = TaskSlot::new("scroll");
//! let first = slot.replace();
//! let second = slot.replace(); // cancels `first` before issuing `second`
//!
//! assert_eq!(first.status(), TaskStatus::Canceled);
//! assert!(slot.is_current(&second));
//! ```
//!
//! ## Signals
//!
//! ```rust
//! use reel_core::*;
//!
//! let enabled = signal(true);
//! enabled.subscribe(|v| log::debug!("enabled = {v}"));
//! enabled.set(false);
//! assert!(!enabled.get());
//! ```

pub mod animation;
pub mod config;
pub mod error;
pub mod geometry;
pub mod signal;
pub mod task;

pub use animation::*;
pub use config::*;
pub use error::*;
pub use geometry::*;
pub use signal::*;
pub use task::{Countdown, TaskHandle, TaskSlot, TaskStatus};
