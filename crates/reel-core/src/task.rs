//! Single-owner cancellable tasks.
//!
//! A `TaskSlot` owns at most one live `TaskHandle` of a given kind.
//! `replace` cancels whatever was live before issuing the next handle, so
//! holders of an older handle observe `Canceled` at their next check and
//! must not write anything further.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TaskStatus {
    Running,
    Completed,
    Canceled,
}

#[derive(Clone)]
pub struct TaskHandle {
    kind: &'static str,
    generation: u64,
    status: Rc<Cell<TaskStatus>>,
}

impl fmt::Debug for TaskHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskHandle")
            .field("kind", &self.kind)
            .field("generation", &self.generation)
            .field("status", &self.status.get())
            .finish()
    }
}

impl TaskHandle {
    pub fn kind(&self) -> &'static str {
        self.kind
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn status(&self) -> TaskStatus {
        self.status.get()
    }

    pub fn is_running(&self) -> bool {
        self.status.get() == TaskStatus::Running
    }

    pub fn is_canceled(&self) -> bool {
        self.status.get() == TaskStatus::Canceled
    }

    /// Moves a running task to `to`. Finished tasks keep their outcome.
    fn finish(&self, to: TaskStatus) -> bool {
        if self.is_running() {
            self.status.set(to);
            true
        } else {
            false
        }
    }
}

pub struct TaskSlot {
    kind: &'static str,
    next_generation: u64,
    current: Option<TaskHandle>,
}

impl TaskSlot {
    pub fn new(kind: &'static str) -> Self {
        Self {
            kind,
            next_generation: 1,
            current: None,
        }
    }

    /// Cancel the live task, if any, then issue a fresh one.
    pub fn replace(&mut self) -> TaskHandle {
        self.cancel();
        let handle = TaskHandle {
            kind: self.kind,
            generation: self.next_generation,
            status: Rc::new(Cell::new(TaskStatus::Running)),
        };
        self.next_generation += 1;
        log::trace!("{} task #{} started", self.kind, handle.generation);
        self.current = Some(handle.clone());
        handle
    }

    /// Returns `true` if a running task was canceled.
    pub fn cancel(&mut self) -> bool {
        match self.current.take() {
            Some(h) if h.finish(TaskStatus::Canceled) => {
                log::trace!("{} task #{} canceled", self.kind, h.generation);
                true
            }
            _ => false,
        }
    }

    /// Marks the live task completed and releases it.
    pub fn complete(&mut self) -> bool {
        match self.current.take() {
            Some(h) => h.finish(TaskStatus::Completed),
            None => false,
        }
    }

    pub fn current(&self) -> Option<&TaskHandle> {
        self.current.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.current.as_ref().is_some_and(TaskHandle::is_running)
    }

    pub fn is_current(&self, handle: &TaskHandle) -> bool {
        self.current
            .as_ref()
            .is_some_and(|c| c.generation == handle.generation && c.is_running())
    }
}

impl Drop for TaskSlot {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Fixed-duration wait advanced by `tick`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Countdown {
    duration: f32,
    elapsed: f32,
}

impl Countdown {
    pub fn new(duration: f32) -> Self {
        Self {
            duration,
            elapsed: 0.0,
        }
    }

    /// Advance by `dt`; returns `true` once the duration has fully elapsed.
    pub fn tick(&mut self, dt: f32) -> bool {
        if !self.is_elapsed() {
            self.elapsed += dt.max(0.0);
        }
        self.is_elapsed()
    }

    pub fn is_elapsed(&self) -> bool {
        self.elapsed >= self.duration
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }
}
