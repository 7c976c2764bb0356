use crate::events::{EventKind, Mailbox};
use crate::fsm::{Fsm, StateHooks};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SlotState {
    Idle,
    Starting,
    Stopping,
}

/// The three slot states, `Idle` first. The start/stop states only publish
/// their slot-machine event; the controller's handlers do the work.
pub fn slot_machine_fsm() -> Fsm<SlotState, Mailbox> {
    let mut fsm: Fsm<SlotState, Mailbox> = Fsm::new();
    fsm.add(StateHooks {
        state: SlotState::Idle,
        on_enter: |_: &mut Mailbox| log::debug!("enter idle state"),
        on_exit: |_: &mut Mailbox| log::debug!("exit idle state"),
    });
    fsm.add(StateHooks {
        state: SlotState::Starting,
        on_enter: |mailbox: &mut Mailbox| {
            mailbox.publish(EventKind::StartSlotMachine, "SlotStartState")
        },
        on_exit: |_: &mut Mailbox| log::debug!("exit starting state"),
    });
    fsm.add(StateHooks {
        state: SlotState::Stopping,
        on_enter: |mailbox: &mut Mailbox| {
            mailbox.publish(EventKind::StopSlotMachine, "SlotStopState")
        },
        on_exit: |_: &mut Mailbox| log::debug!("exit stopping state"),
    });
    fsm
}
