//! # Slot machine sequencing
//!
//! A small state machine (`Idle`, `Starting`, `Stopping`) on top of a
//! [`reel_ui::Reel`]. The host publishes button clicks on a [`Mailbox`],
//! ticks the [`SlotMachineController`] once per frame, and binds its buttons
//! to the [`Readiness`] flags.
//!
//! ```rust
//! use reel_core::{ReelConfig, Size};
//! use reel_machine::*;
//! use reel_ui::{Axis, HeadlessSurface};
//!
//! let surface = HeadlessSurface::strip(
//!     Axis::Vertical,
//!     6,
//!     Size::new(100.0, 100.0),
//!     Size::new(100.0, 300.0),
//! );
//! let mailbox = Mailbox::new();
//! let mut machine =
//!     SlotMachineController::new(Some(surface), ReelConfig::slot_machine(), mailbox.clone());
//!
//! mailbox.publish(EventKind::StartButtonClick, "start");
//! while !machine.can_be_stopped() {
//!     machine.tick(1.0 / 60.0);
//! }
//! mailbox.publish(EventKind::StopButtonClick, "stop");
//! machine.tick(1.0 / 60.0);
//! while !machine.readiness().start_interactable.get() {
//!     machine.tick(1.0 / 60.0);
//! }
//! ```

pub mod controller;
pub mod events;
pub mod fsm;
pub mod states;

pub use controller::{Readiness, SlotMachineController};
pub use events::{Event, EventKind, Mailbox};
pub use fsm::{Fsm, StateHooks};
pub use states::{SlotState, slot_machine_fsm};
