//! Speed-ramped scrolling along the reel axis.
//!
//! The controller owns one scroll task at a time. Each `tick` moves the
//! content by `-speed * dt` along the axis, with the speed following the
//! current phase:
//!
//! - `Accelerating`: linear ramp from 0 to the target over the
//!   acceleration time, then `Constant` until canceled.
//! - `Decelerating`: linear ramp from the speed captured at stop time down
//!   to 0, after which the surface velocity is zeroed and the tick reports
//!   `Settled`.

use reel_core::{TaskHandle, TaskSlot, Vec2, lerp, progress};

use crate::axis::Axis;
use crate::surface::ScrollSurface;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MotionPhase {
    Idle,
    Accelerating {
        elapsed: f32,
        duration: f32,
        target: f32,
    },
    Constant {
        speed: f32,
    },
    Decelerating {
        elapsed: f32,
        duration: f32,
        initial: f32,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MotionStep {
    Idle,
    Moving,
    /// Deceleration finished on this tick.
    Settled,
}

pub struct MotionController {
    phase: MotionPhase,
    speed: f32,
    task: TaskSlot,
}

impl Default for MotionController {
    fn default() -> Self {
        Self::new()
    }
}

impl MotionController {
    pub fn new() -> Self {
        Self {
            phase: MotionPhase::Idle,
            speed: 0.0,
            task: TaskSlot::new("scroll"),
        }
    }

    pub fn phase(&self) -> MotionPhase {
        self.phase
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Accelerating or running at constant speed.
    pub fn is_scrolling(&self) -> bool {
        matches!(
            self.phase,
            MotionPhase::Accelerating { .. } | MotionPhase::Constant { .. }
        )
    }

    pub fn is_decelerating(&self) -> bool {
        matches!(self.phase, MotionPhase::Decelerating { .. })
    }

    pub fn current_task(&self) -> Option<&TaskHandle> {
        self.task.current()
    }

    /// Restart the ramp from rest. Whatever ran before is canceled,
    /// including a deceleration in progress.
    pub fn start_scrolling(&mut self, acceleration_time: f32, target_speed: f32) -> TaskHandle {
        let handle = self.task.replace();
        self.speed = 0.0;
        self.phase = MotionPhase::Accelerating {
            elapsed: 0.0,
            duration: acceleration_time,
            target: target_speed,
        };
        log::debug!(
            "scroll #{}: accelerate to {target_speed} over {acceleration_time}s",
            handle.generation()
        );
        handle
    }

    /// Ramp the current speed down to rest. `None` when nothing is
    /// scrolling.
    pub fn stop_scrolling(&mut self, deceleration_time: f32) -> Option<TaskHandle> {
        if !self.is_scrolling() {
            return None;
        }
        let handle = self.task.replace();
        self.phase = MotionPhase::Decelerating {
            elapsed: 0.0,
            duration: deceleration_time,
            initial: self.speed,
        };
        log::debug!(
            "scroll #{}: decelerate from {} over {deceleration_time}s",
            handle.generation(),
            self.speed
        );
        Some(handle)
    }

    /// Drop the live task without touching the surface.
    pub fn cancel(&mut self) -> bool {
        self.phase = MotionPhase::Idle;
        self.speed = 0.0;
        self.task.cancel()
    }

    pub fn tick<S: ScrollSurface>(&mut self, dt: f32, surface: &mut S, axis: Axis) -> MotionStep {
        let dt = dt.max(0.0);
        match self.phase {
            MotionPhase::Idle => MotionStep::Idle,
            MotionPhase::Accelerating {
                elapsed,
                duration,
                target,
            } => {
                let elapsed = elapsed + dt;
                self.speed = lerp(&0.0, &target, progress(elapsed, duration));
                advance(surface, axis, self.speed, dt);
                self.phase = if elapsed >= duration {
                    self.speed = target;
                    MotionPhase::Constant { speed: target }
                } else {
                    MotionPhase::Accelerating {
                        elapsed,
                        duration,
                        target,
                    }
                };
                MotionStep::Moving
            }
            MotionPhase::Constant { speed } => {
                self.speed = speed;
                advance(surface, axis, speed, dt);
                MotionStep::Moving
            }
            MotionPhase::Decelerating {
                elapsed,
                duration,
                initial,
            } => {
                let elapsed = elapsed + dt;
                self.speed = lerp(&initial, &0.0, progress(elapsed, duration));
                advance(surface, axis, self.speed, dt);
                if elapsed >= duration {
                    self.speed = 0.0;
                    self.phase = MotionPhase::Idle;
                    surface.set_velocity(Vec2::ZERO);
                    self.task.complete();
                    MotionStep::Settled
                } else {
                    self.phase = MotionPhase::Decelerating {
                        elapsed,
                        duration,
                        initial,
                    };
                    MotionStep::Moving
                }
            }
        }
    }
}

fn advance<S: ScrollSurface>(surface: &mut S, axis: Axis, speed: f32, dt: f32) {
    if speed == 0.0 || dt == 0.0 {
        return;
    }
    let off = surface.content_offset();
    surface.set_content_offset(axis.with_component(off, axis.component(off) - speed * dt));
}
