//! # Endless reel
//!
//! A reel scrolls a fixed pool of items along one axis forever. Three
//! controllers share the content offset of a host `ScrollSurface`, and only
//! one of them writes at a time:
//!
//! - `MotionController`: start/stop speed ramps.
//! - `SnapController`: centers the nearest item once things are at rest.
//! - `WrapRelocator`: moves end items across so the strip never runs out.
//!
//! `Reel` ties them together and is advanced with `tick(dt)` once per frame:
//!
//! ```rust
//! use reel_core::{ReelConfig, Size};
//! use reel_ui::*;
//!
//! let surface = HeadlessSurface::strip(
//!     Axis::Vertical,
//!     6,
//!     Size::new(100.0, 100.0),
//!     Size::new(100.0, 300.0),
//! );
//! let mut reel = Reel::new(surface, ReelConfig::slot_machine()).unwrap();
//!
//! reel.start_scrolling(0.5, 1200.0);
//! for _ in 0..60 {
//!     reel.tick(1.0 / 60.0);
//! }
//! let stop = reel.stop_scrolling(0.5).unwrap();
//! while stop.is_running() {
//!     reel.tick(1.0 / 60.0);
//! }
//! assert!(reel.selected_item().is_some());
//! ```

pub mod axis;
pub mod motion;
pub mod reel;
pub mod snap;
pub mod surface;
pub mod wrap;

pub use axis::{Axis, LayoutBehaviors, ScrollAxes};
pub use motion::{MotionController, MotionPhase, MotionStep};
pub use reel::{Reel, ReelFrame};
pub use snap::{SnapController, SnapPhase, SnapStep};
pub use surface::{HeadlessSurface, ItemId, ScrollSurface};
pub use wrap::{Relocation, WrapPass, WrapRelocator};
