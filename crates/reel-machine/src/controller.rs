use reel_core::{Countdown, ReelConfig, ReelError, Signal, TaskHandle, TaskStatus};
use reel_ui::{Reel, ScrollSurface};

use crate::events::{Event, EventKind, Mailbox};
use crate::fsm::Fsm;
use crate::states::{SlotState, slot_machine_fsm};

/// Flags the host binds its buttons to.
#[derive(Clone)]
pub struct Readiness {
    /// The warm-up has elapsed and a stop request will be honored.
    pub can_be_stopped: Signal<bool>,
    pub start_interactable: Signal<bool>,
    pub stop_interactable: Signal<bool>,
}

impl Default for Readiness {
    fn default() -> Self {
        Self {
            can_be_stopped: Signal::new(false),
            start_interactable: Signal::new(true),
            stop_interactable: Signal::new(false),
        }
    }
}

/// Drives one reel from button clicks.
///
/// Clicks arrive on the mailbox as `StartButtonClick`/`StopButtonClick`,
/// move the state machine, whose enter hooks publish `StartSlotMachine`/
/// `StopSlotMachine`, which in turn run the handlers below. Everything is
/// drained within the `tick` that sees the click.
///
/// Without a usable reel the controller still sequences states and flags,
/// but nothing moves.
pub struct SlotMachineController<S: ScrollSurface> {
    reel: Option<Reel<S>>,
    config: ReelConfig,
    fsm: Fsm<SlotState, Mailbox>,
    mailbox: Mailbox,
    readiness: Readiness,
    warmup: Option<Countdown>,
    pending_stop: Option<TaskHandle>,
}

impl<S: ScrollSurface> SlotMachineController<S> {
    pub fn new(surface: Option<S>, config: ReelConfig, mailbox: Mailbox) -> Self {
        let reel = match surface {
            Some(surface) => match Reel::new(surface, config.clone()) {
                Ok(reel) => Some(reel),
                Err(e) => {
                    log::error!("slot machine: reel disabled: {e}");
                    None
                }
            },
            None => {
                log::error!("slot machine: {}", ReelError::MissingSurface);
                None
            }
        };

        let mut this = Self {
            reel,
            config,
            fsm: slot_machine_fsm(),
            mailbox,
            readiness: Readiness::default(),
            warmup: None,
            pending_stop: None,
        };
        if let Err(e) = this.fsm.start(SlotState::Idle, &mut this.mailbox) {
            log::error!("slot machine: {e}");
        }
        this
    }

    pub fn mailbox(&self) -> &Mailbox {
        &self.mailbox
    }

    pub fn state(&self) -> Option<SlotState> {
        self.fsm.current()
    }

    pub fn readiness(&self) -> &Readiness {
        &self.readiness
    }

    pub fn can_be_stopped(&self) -> bool {
        self.readiness.can_be_stopped.get()
    }

    pub fn reel(&self) -> Option<&Reel<S>> {
        self.reel.as_ref()
    }

    pub fn reel_mut(&mut self) -> Option<&mut Reel<S>> {
        self.reel.as_mut()
    }

    pub fn is_inert(&self) -> bool {
        self.reel.is_none()
    }

    pub fn tick(&mut self, dt: f32) {
        self.dispatch_pending();

        if let Some(warmup) = self.warmup.as_mut()
            && warmup.tick(dt)
        {
            self.warmup = None;
            log::debug!("slot machine: ready to stop");
            self.readiness.can_be_stopped.set(true);
            self.readiness.stop_interactable.set(true);
        }

        if let Some(reel) = self.reel.as_mut() {
            reel.tick(dt);
        }

        if let Err(e) = self.poll_stop() {
            if e.is_superseded() {
                log::debug!("slot machine: {e}");
            } else {
                log::error!("slot machine: {e}");
            }
        }
    }

    fn dispatch_pending(&mut self) {
        while let Some(event) = self.mailbox.pop() {
            self.dispatch(event);
        }
    }

    fn dispatch(&mut self, event: Event) {
        log::trace!("slot machine: {} ({})", event.kind, event.tag);
        let res = match event.kind {
            EventKind::StartButtonClick => {
                self.fsm.change(SlotState::Starting, &mut self.mailbox)
            }
            EventKind::StopButtonClick => {
                self.fsm.change(SlotState::Stopping, &mut self.mailbox)
            }
            EventKind::StartSlotMachine => {
                self.on_start_slot_machine();
                Ok(())
            }
            EventKind::StopSlotMachine => {
                self.on_stop_slot_machine();
                Ok(())
            }
        };
        if let Err(e) = res {
            log::error!("slot machine: {e}");
        }
    }

    fn on_start_slot_machine(&mut self) {
        if let Some(reel) = self.reel.as_mut() {
            reel.start_scrolling(self.config.acceleration_time, self.config.target_speed);
        }
        self.readiness.start_interactable.set(false);
        self.readiness.can_be_stopped.set(false);
        self.warmup = Some(Countdown::new(self.config.warmup_delay));
    }

    fn on_stop_slot_machine(&mut self) {
        if !self.can_be_stopped() {
            log::debug!("slot machine: stop ignored during warm-up");
            return;
        }
        let handle = self
            .reel
            .as_mut()
            .and_then(|reel| reel.stop_scrolling(self.config.stop_time));
        self.readiness.can_be_stopped.set(false);
        self.readiness.stop_interactable.set(false);
        match handle {
            Some(handle) => self.pending_stop = Some(handle),
            None => {
                self.readiness.start_interactable.set(true);
            }
        }
    }

    fn poll_stop(&mut self) -> Result<(), ReelError> {
        let Some(status) = self.pending_stop.as_ref().map(TaskHandle::status) else {
            return Ok(());
        };
        match status {
            TaskStatus::Running => Ok(()),
            TaskStatus::Completed => {
                self.pending_stop = None;
                self.readiness.start_interactable.set(true);
                Ok(())
            }
            TaskStatus::Canceled => {
                self.pending_stop = None;
                Err(ReelError::StopSuperseded)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reel_core::Size;
    use reel_ui::{Axis, HeadlessSurface, ScrollAxes};
    use std::cell::RefCell;
    use std::rc::Rc;

    const DT: f32 = 1.0 / 64.0;

    fn surface() -> HeadlessSurface {
        HeadlessSurface::strip(
            Axis::Vertical,
            6,
            Size::new(100.0, 100.0),
            Size::new(100.0, 300.0),
        )
    }

    fn machine() -> SlotMachineController<HeadlessSurface> {
        SlotMachineController::new(Some(surface()), ReelConfig::slot_machine(), Mailbox::new())
    }

    fn run(m: &mut SlotMachineController<HeadlessSurface>, ticks: usize) {
        for _ in 0..ticks {
            m.tick(DT);
        }
    }

    fn click(m: &SlotMachineController<HeadlessSurface>, kind: EventKind) {
        m.mailbox().publish(kind, "test");
    }

    #[test]
    fn starts_idle_with_start_enabled() {
        let m = machine();
        assert_eq!(m.state(), Some(SlotState::Idle));
        assert!(!m.is_inert());
        assert!(m.readiness().start_interactable.get());
        assert!(!m.readiness().stop_interactable.get());
        assert!(!m.can_be_stopped());
    }

    #[test]
    fn full_round_centers_an_item() {
        let mut m = machine();
        click(&m, EventKind::StartButtonClick);
        run(&mut m, 191);
        assert_eq!(m.state(), Some(SlotState::Starting));
        assert!(!m.can_be_stopped());
        assert!(!m.readiness().start_interactable.get());

        run(&mut m, 1);
        assert!(m.can_be_stopped());
        assert!(m.readiness().stop_interactable.get());
        assert_eq!(m.reel().unwrap().speed(), 3000.0);

        click(&m, EventKind::StopButtonClick);
        run(&mut m, 1);
        assert_eq!(m.state(), Some(SlotState::Stopping));
        assert!(!m.can_be_stopped());

        let mut ticks = 0;
        while !m.readiness().start_interactable.get() {
            m.tick(DT);
            ticks += 1;
            assert!(ticks < 2000, "stop never finished");
        }
        // deceleration plus the grace delay before the snap
        assert!(ticks > 128 + 192);

        let reel = m.reel().unwrap();
        let item = reel.selected_item().unwrap();
        let center = reel.surface().item_local_center(item);
        assert!(center.y.abs() < 0.2, "{center:?}");
        assert_eq!(m.state(), Some(SlotState::Stopping));
    }

    #[test]
    fn readiness_flags_follow_the_round() {
        let mut m = machine();
        let trace = Rc::new(RefCell::new(Vec::<String>::new()));
        let r = m.readiness().clone();
        for (name, sig) in [
            ("can_be_stopped", r.can_be_stopped),
            ("start_interactable", r.start_interactable),
            ("stop_interactable", r.stop_interactable),
        ] {
            let trace = trace.clone();
            sig.subscribe(move |v| trace.borrow_mut().push(format!("{name}={v}")));
        }

        click(&m, EventKind::StartButtonClick);
        run(&mut m, 192);
        click(&m, EventKind::StopButtonClick);
        let mut ticks = 0;
        while !m.readiness().start_interactable.get() {
            m.tick(DT);
            ticks += 1;
            assert!(ticks < 2000);
        }

        insta::assert_snapshot!(trace.borrow().join("\n"), @r"
        start_interactable=false
        can_be_stopped=true
        stop_interactable=true
        can_be_stopped=false
        stop_interactable=false
        start_interactable=true
        ");
    }

    #[test]
    fn stop_during_warmup_is_ignored() {
        let mut m = machine();
        click(&m, EventKind::StartButtonClick);
        run(&mut m, 10);
        click(&m, EventKind::StopButtonClick);
        run(&mut m, 1);

        // the state moves, the reel doesn't
        assert_eq!(m.state(), Some(SlotState::Stopping));
        assert!(!m.reel().unwrap().is_stopping());
        assert!(m.reel().unwrap().motion().is_scrolling());
        assert!(!m.readiness().start_interactable.get());

        // the warm-up keeps running and a later stop goes through
        run(&mut m, 182);
        assert!(m.can_be_stopped());
        click(&m, EventKind::StopButtonClick);
        run(&mut m, 1);
        assert!(m.reel().unwrap().is_stopping());
    }

    #[test]
    fn restart_during_stop_supersedes_it() {
        let mut m = machine();
        click(&m, EventKind::StartButtonClick);
        run(&mut m, 192);
        click(&m, EventKind::StopButtonClick);
        run(&mut m, 20);
        assert!(m.reel().unwrap().is_stopping());

        click(&m, EventKind::StartButtonClick);
        run(&mut m, 1);
        assert_eq!(m.state(), Some(SlotState::Starting));
        assert!(m.pending_stop.is_none());
        assert!(!m.reel().unwrap().is_stopping());
        assert!(m.reel().unwrap().motion().is_scrolling());
        assert!(!m.readiness().start_interactable.get());
        assert!(!m.can_be_stopped());

        // the superseded stop never re-enables start
        run(&mut m, 400);
        assert!(!m.readiness().start_interactable.get());
    }

    #[test]
    fn missing_surface_is_inert() {
        let mut m: SlotMachineController<HeadlessSurface> =
            SlotMachineController::new(None, ReelConfig::slot_machine(), Mailbox::new());
        assert!(m.is_inert());

        click(&m, EventKind::StartButtonClick);
        run(&mut m, 192);
        assert!(m.can_be_stopped());

        click(&m, EventKind::StopButtonClick);
        run(&mut m, 1);
        assert!(m.readiness().start_interactable.get());
        assert!(!m.can_be_stopped());
    }

    #[test]
    fn both_axes_surface_is_inert() {
        let surface = surface().with_axes(ScrollAxes::all());
        let m =
            SlotMachineController::new(Some(surface), ReelConfig::slot_machine(), Mailbox::new());
        assert!(m.is_inert());
        assert_eq!(m.state(), Some(SlotState::Idle));
    }
}
