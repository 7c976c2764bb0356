use reel_core::{ReelConfig, ReelError, TaskHandle, TaskSlot, Vec2};

use crate::axis::Axis;
use crate::motion::{MotionController, MotionStep};
use crate::snap::{SnapController, SnapStep};
use crate::surface::{ItemId, ScrollSurface};
use crate::wrap::{WrapPass, WrapRelocator};

/// What happened during one `Reel::tick`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReelFrame {
    pub motion: MotionStep,
    pub snap: SnapStep,
    pub wrap: WrapPass,
}

/// An endless reel over a host scroll surface.
///
/// Owns the motion, snap and wrap controllers plus the stop sequence: the
/// handle returned by `stop_scrolling` completes once deceleration and the
/// delayed snap after it are done, and is canceled if a restart cuts it
/// short.
pub struct Reel<S: ScrollSurface> {
    surface: S,
    axis: Axis,
    config: ReelConfig,
    motion: MotionController,
    snap: SnapController,
    wrap: WrapRelocator,
    stop_sequence: TaskSlot,
    last_offset: Vec2,
}

impl<S: ScrollSurface> Reel<S> {
    pub fn new(surface: S, config: ReelConfig) -> Result<Self, ReelError> {
        config.validate()?;
        let axis = Axis::from_axes(surface.scroll_axes())?;
        let wrap = WrapRelocator::for_surface(&surface, axis, config.wrap_threshold);
        let snap = SnapController::new(config.snap_speed, config.snap_velocity_threshold);
        let last_offset = surface.content_offset();
        log::debug!(
            "reel: {axis:?}, {} items, wrap threshold {}",
            surface.item_count(),
            wrap.threshold()
        );
        Ok(Self {
            surface,
            axis,
            config,
            motion: MotionController::new(),
            snap,
            wrap,
            stop_sequence: TaskSlot::new("stop"),
            last_offset,
        })
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    pub fn config(&self) -> &ReelConfig {
        &self.config
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn motion(&self) -> &MotionController {
        &self.motion
    }

    pub fn snap(&self) -> &SnapController {
        &self.snap
    }

    pub fn speed(&self) -> f32 {
        self.motion.speed()
    }

    pub fn is_snapping(&self) -> bool {
        self.snap.is_snapping()
    }

    /// Item centered by the last completed snap.
    pub fn selected_item(&self) -> Option<ItemId> {
        self.snap.selected()
    }

    pub fn is_stopping(&self) -> bool {
        self.stop_sequence.is_active()
    }

    /// Starting fresh always wins: any snap and any stop in progress are
    /// canceled first.
    pub fn start_scrolling(&mut self, acceleration_time: f32, target_speed: f32) -> TaskHandle {
        self.snap.cancel();
        if self.stop_sequence.cancel() {
            log::debug!("reel: stop sequence superseded by restart");
        }
        log::info!("reel: start scrolling");
        self.motion.start_scrolling(acceleration_time, target_speed)
    }

    /// Decelerate, then snap after the grace delay. `None` when the reel
    /// isn't scrolling.
    pub fn stop_scrolling(&mut self, stop_time: f32) -> Option<TaskHandle> {
        self.motion.stop_scrolling(stop_time)?;
        self.snap.cancel();
        log::info!("reel: stop scrolling");
        Some(self.stop_sequence.replace())
    }

    /// Center the closest item now. Ignored while the reel is moving under
    /// its own power, deceleration included.
    pub fn snap_to_closest(&mut self) -> Option<TaskHandle> {
        if self.motion.is_scrolling() || self.motion.is_decelerating() {
            log::debug!("reel: snap ignored while scrolling");
            return None;
        }
        self.snap.snap_to_closest(&self.surface, self.axis)
    }

    pub fn tick(&mut self, dt: f32) -> ReelFrame {
        let dt = dt.max(0.0);

        let snap = self.snap.tick(dt, &mut self.surface, self.axis);
        if let SnapStep::Completed(item) = snap
            && self.stop_sequence.complete()
        {
            log::info!("reel: settled on {item:?}");
        }

        let motion = self.motion.tick(dt, &mut self.surface, self.axis);
        if motion == MotionStep::Settled {
            self.snap.schedule(self.config.snap_grace_delay);
        }

        let wrap = if self.surface.content_offset() != self.last_offset {
            self.on_value_changed()
        } else {
            WrapPass::default()
        };

        ReelFrame {
            motion,
            snap,
            wrap,
        }
    }

    /// Wrap pass. Called by `tick` when the offset moved; hosts call it
    /// after writing the offset themselves (drag, inertia).
    pub fn on_value_changed(&mut self) -> WrapPass {
        self.last_offset = self.surface.content_offset();
        self.wrap.relocate(&mut self.surface, self.axis)
    }
}
