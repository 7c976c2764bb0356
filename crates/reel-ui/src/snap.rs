//! Centering the nearest item once the reel has come to rest.
//!
//! A snap can be started immediately with `snap_to_closest`, or scheduled
//! with `schedule`, which first waits a grace delay and then waits for the
//! surface velocity to drop under the threshold. Either way the snap owns
//! its own task, separate from the scroll task, and a cancel stops it
//! without the final exact write.

use reel_core::{Countdown, TaskHandle, TaskSlot, Vec2, lerp};

use crate::axis::Axis;
use crate::surface::{ItemId, ScrollSurface};

/// Remaining distance at which the snap writes the exact target.
pub const SNAP_EPSILON: f32 = 0.1;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SnapPhase {
    Idle,
    Grace(Countdown),
    AwaitingRest,
    Interpolating { item: ItemId, target: Vec2 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SnapStep {
    Idle,
    Waiting,
    Moving,
    /// The snap finished on this tick; `None` for an empty pool.
    Completed(Option<ItemId>),
}

pub struct SnapController {
    snap_speed: f32,
    velocity_threshold: f32,
    phase: SnapPhase,
    task: TaskSlot,
    snapping: bool,
    selected: Option<ItemId>,
}

impl SnapController {
    pub fn new(snap_speed: f32, velocity_threshold: f32) -> Self {
        Self {
            snap_speed,
            velocity_threshold,
            phase: SnapPhase::Idle,
            task: TaskSlot::new("snap"),
            snapping: false,
            selected: None,
        }
    }

    pub fn phase(&self) -> SnapPhase {
        self.phase
    }

    /// True while the content is being interpolated onto an item.
    pub fn is_snapping(&self) -> bool {
        self.snapping
    }

    /// A snap is scheduled or running.
    pub fn is_pending(&self) -> bool {
        self.task.is_active()
    }

    /// Item centered by the last completed snap.
    pub fn selected(&self) -> Option<ItemId> {
        self.selected
    }

    /// Wait `grace` seconds, then until the surface is slow enough, then
    /// snap.
    pub fn schedule(&mut self, grace: f32) -> TaskHandle {
        let handle = self.task.replace();
        self.snapping = false;
        self.phase = SnapPhase::Grace(Countdown::new(grace));
        log::debug!("snap #{}: scheduled after {grace}s", handle.generation());
        handle
    }

    /// Start centering the closest item right away. `None` for an empty
    /// pool.
    pub fn snap_to_closest<S: ScrollSurface>(
        &mut self,
        surface: &S,
        axis: Axis,
    ) -> Option<TaskHandle> {
        let Some((item, target)) = snap_target(surface, axis) else {
            self.cancel();
            return None;
        };
        let handle = self.task.replace();
        self.begin(item, target);
        Some(handle)
    }

    pub fn cancel(&mut self) -> bool {
        self.phase = SnapPhase::Idle;
        self.snapping = false;
        self.task.cancel()
    }

    pub fn tick<S: ScrollSurface>(&mut self, dt: f32, surface: &mut S, axis: Axis) -> SnapStep {
        loop {
            match self.phase {
                SnapPhase::Idle => return SnapStep::Idle,
                SnapPhase::Grace(mut countdown) => {
                    let done = countdown.tick(dt);
                    self.phase = SnapPhase::Grace(countdown);
                    if !done {
                        return SnapStep::Waiting;
                    }
                    self.phase = SnapPhase::AwaitingRest;
                }
                SnapPhase::AwaitingRest => {
                    if surface.velocity().length() > self.velocity_threshold {
                        return SnapStep::Waiting;
                    }
                    match snap_target(surface, axis) {
                        Some((item, target)) => self.begin(item, target),
                        None => {
                            self.phase = SnapPhase::Idle;
                            self.task.complete();
                            return SnapStep::Completed(None);
                        }
                    }
                }
                SnapPhase::Interpolating { item, target } => {
                    let current = surface.content_offset();
                    if current.distance(target) > SNAP_EPSILON {
                        surface.set_content_offset(lerp(&current, &target, dt * self.snap_speed));
                        return SnapStep::Moving;
                    }
                    surface.set_content_offset(target);
                    surface.set_velocity(Vec2::ZERO);
                    self.snapping = false;
                    self.selected = Some(item);
                    self.phase = SnapPhase::Idle;
                    self.task.complete();
                    log::debug!("snap: centered {item:?}");
                    return SnapStep::Completed(Some(item));
                }
            }
        }
    }

    fn begin(&mut self, item: ItemId, target: Vec2) {
        self.snapping = true;
        self.phase = SnapPhase::Interpolating { item, target };
    }
}

/// Item whose center is nearest the viewport center. Ties go to the first
/// in visual order.
pub fn find_closest<S: ScrollSurface>(surface: &S) -> Option<ItemId> {
    let center = surface.viewport_rect().center();
    let mut closest = None;
    let mut min_distance = f32::INFINITY;
    for index in 0..surface.item_count() {
        let item = surface.item_at(index);
        let distance = surface.item_local_center(item).distance(center);
        if distance < min_distance {
            min_distance = distance;
            closest = Some(item);
        }
    }
    closest
}

/// Closest item and the content offset that centers it along `axis`.
pub fn snap_target<S: ScrollSurface>(surface: &S, axis: Axis) -> Option<(ItemId, Vec2)> {
    let item = find_closest(surface)?;
    let difference = surface.item_local_center(item) - surface.viewport_rect().center();
    let offset = surface.content_offset();
    let target = axis.with_component(offset, axis.component(offset) - axis.component(difference));
    Some((item, target))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::HeadlessSurface;
    use reel_core::Size;

    const DT: f32 = 1.0 / 60.0;

    fn strip(axis: Axis, count: usize) -> HeadlessSurface {
        HeadlessSurface::strip(
            axis,
            count,
            Size::new(100.0, 100.0),
            Size::new(300.0, 300.0),
        )
    }

    #[test]
    fn tie_goes_to_first_in_visual_order() {
        // centers at -250..250 step 100: items 2 and 3 are both 50 away
        let s = strip(Axis::Horizontal, 6);
        assert_eq!(find_closest(&s), Some(ItemId(2)));
        let (item, target) = snap_target(&s, Axis::Horizontal).unwrap();
        assert_eq!(item, ItemId(2));
        assert_eq!(target, Vec2::new(50.0, 0.0));
    }

    #[test]
    fn target_only_moves_active_axis() {
        let mut s = strip(Axis::Vertical, 5);
        s.set_content_offset(Vec2::new(7.0, 30.0));
        let (item, target) = snap_target(&s, Axis::Vertical).unwrap();
        // centers at 200, 100, 0, -100, -200 shifted up by 30
        assert_eq!(item, ItemId(2));
        assert_eq!(target, Vec2::new(7.0, 0.0));
    }

    #[test]
    fn snap_converges_monotonically() {
        let mut s = strip(Axis::Horizontal, 6);
        s.set_content_offset(Vec2::new(-37.0, 0.0));
        s.set_velocity(Vec2::new(12.0, 0.0));
        let mut snap = SnapController::new(3.0, 60.0);
        let handle = snap.snap_to_closest(&s, Axis::Horizontal).unwrap();
        let target = match snap.phase() {
            SnapPhase::Interpolating { target, .. } => target,
            other => panic!("unexpected phase {other:?}"),
        };
        assert!(snap.is_snapping());

        let mut last = s.content_offset().distance(target);
        let mut steps = 0;
        loop {
            steps += 1;
            assert!(steps < 200, "did not converge");
            match snap.tick(DT, &mut s, Axis::Horizontal) {
                SnapStep::Moving => {
                    let d = s.content_offset().distance(target);
                    assert!(d < last);
                    last = d;
                }
                SnapStep::Completed(item) => {
                    assert_eq!(item, Some(ItemId(3)));
                    break;
                }
                other => panic!("unexpected step {other:?}"),
            }
        }
        assert_eq!(s.content_offset(), target);
        assert_eq!(s.velocity(), Vec2::ZERO);
        assert!(!snap.is_snapping());
        assert_eq!(snap.selected(), Some(ItemId(3)));
        assert_eq!(handle.status(), reel_core::TaskStatus::Completed);
        // item 3 (center 50 at rest) now sits on the viewport center
        assert!(s.item_local_center(ItemId(3)).length() < 1e-3);
    }

    #[test]
    fn scheduled_snap_waits_for_grace_and_rest() {
        let mut s = strip(Axis::Horizontal, 6);
        s.set_content_offset(Vec2::new(-20.0, 0.0));
        s.set_velocity(Vec2::new(500.0, 0.0));
        let mut snap = SnapController::new(3.0, 60.0);
        snap.schedule(0.09);

        // grace elapses on the 6th 60Hz tick
        for _ in 0..6 {
            assert_eq!(snap.tick(DT, &mut s, Axis::Horizontal), SnapStep::Waiting);
        }
        assert_eq!(snap.phase(), SnapPhase::AwaitingRest);
        assert_eq!(snap.tick(DT, &mut s, Axis::Horizontal), SnapStep::Waiting);
        assert_eq!(s.content_offset(), Vec2::new(-20.0, 0.0));

        s.set_velocity(Vec2::new(59.0, 0.0));
        assert_eq!(snap.tick(DT, &mut s, Axis::Horizontal), SnapStep::Moving);
        assert!(snap.is_snapping());
    }

    #[test]
    fn cancel_skips_final_write() {
        let mut s = strip(Axis::Horizontal, 6);
        s.set_content_offset(Vec2::new(-30.0, 0.0));
        let mut snap = SnapController::new(3.0, 60.0);
        let handle = snap.snap_to_closest(&s, Axis::Horizontal).unwrap();
        snap.tick(DT, &mut s, Axis::Horizontal);
        let moved = s.content_offset();

        assert!(snap.cancel());
        assert!(handle.is_canceled());
        assert_eq!(snap.tick(DT, &mut s, Axis::Horizontal), SnapStep::Idle);
        assert_eq!(s.content_offset(), moved);
        assert_eq!(snap.selected(), None);
    }

    #[test]
    fn empty_pool_is_noop() {
        let mut s = strip(Axis::Horizontal, 0);
        let mut snap = SnapController::new(3.0, 60.0);
        assert!(snap.snap_to_closest(&s, Axis::Horizontal).is_none());

        snap.schedule(0.0);
        assert_eq!(
            snap.tick(DT, &mut s, Axis::Horizontal),
            SnapStep::Completed(None)
        );
        assert_eq!(s.content_offset(), Vec2::ZERO);
    }
}
