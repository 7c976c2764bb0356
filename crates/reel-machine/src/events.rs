use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    StartButtonClick,
    StopButtonClick,
    StartSlotMachine,
    StopSlotMachine,
}

impl EventKind {
    pub fn name(self) -> &'static str {
        match self {
            EventKind::StartButtonClick => "OnStartButtonClick",
            EventKind::StopButtonClick => "OnStopButtonClick",
            EventKind::StartSlotMachine => "OnStartSlotMachine",
            EventKind::StopSlotMachine => "OnStopSlotMachine",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// `tag` is an opaque payload carried for the host; the reel ignores it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Event {
    pub kind: EventKind,
    pub tag: String,
}

/// FIFO shared between the host and the controller. Clones share the same
/// queue.
#[derive(Clone, Default)]
pub struct Mailbox(Rc<RefCell<VecDeque<Event>>>);

impl Mailbox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn publish(&self, kind: EventKind, tag: impl Into<String>) {
        let tag = tag.into();
        log::trace!("publish {kind} ({tag:?})");
        self.0.borrow_mut().push_back(Event { kind, tag });
    }

    pub fn pop(&self) -> Option<Event> {
        self.0.borrow_mut().pop_front()
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }
}
