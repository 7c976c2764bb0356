//! # Scroll surface
//!
//! The reel never touches a concrete widget. Everything it needs from the
//! host is behind `ScrollSurface`: the content offset it writes, the
//! velocity it reads and zeroes, viewport geometry, and the item pool.
//!
//! Items are addressed by `ItemId` (their index in the pool, stable for the
//! surface's lifetime) and have a separate, mutable *visual order*:
//! `item_at(0)` is the first sibling. An item's anchored position is the
//! minimum corner of its box, relative to the content.
//!
//! `HeadlessSurface` is an in-memory implementation with simple inertia and
//! drag, used by tests and the demo.

use reel_core::{Rect, Size, Transform, Vec2};

use crate::axis::{Axis, LayoutBehaviors, ScrollAxes};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(pub usize);

pub trait ScrollSurface {
    fn scroll_axes(&self) -> ScrollAxes;

    fn layout_behaviors(&self) -> LayoutBehaviors;
    fn disable_layout(&mut self, behaviors: LayoutBehaviors);

    fn content_offset(&self) -> Vec2;
    fn set_content_offset(&mut self, offset: Vec2);

    fn velocity(&self) -> Vec2;
    fn set_velocity(&mut self, velocity: Vec2);

    /// Viewport rect in viewport-local space.
    fn viewport_rect(&self) -> Rect;
    /// Viewport-local to world.
    fn viewport_transform(&self) -> Transform;

    fn item_count(&self) -> usize;
    /// Item at `index` in visual order.
    fn item_at(&self, index: usize) -> ItemId;
    fn item_anchored(&self, item: ItemId) -> Vec2;
    fn set_item_anchored(&mut self, item: ItemId, pos: Vec2);
    fn item_size(&self, item: ItemId) -> Size;
    /// Item-local (origin at the item's minimum corner) to world.
    fn item_world_transform(&self, item: ItemId) -> Transform;

    fn set_first_sibling(&mut self, item: ItemId);
    fn set_last_sibling(&mut self, item: ItemId);

    /// Item's minimum corner in viewport-local space.
    fn item_local_origin(&self, item: ItemId) -> Vec2 {
        let world = self.item_world_transform(item).apply_to_point(Vec2::ZERO);
        self.viewport_transform().inverse_apply_to_point(world)
    }

    /// Item's center in viewport-local space.
    fn item_local_center(&self, item: ItemId) -> Vec2 {
        let half = self.item_size(item).half();
        let world = self.item_world_transform(item).apply_to_point(half);
        self.viewport_transform().inverse_apply_to_point(world)
    }
}

#[derive(Clone, Debug)]
struct HeadlessItem {
    anchored: Vec2,
    size: Size,
}

/// In-memory surface. Content is parented to the viewport center.
pub struct HeadlessSurface {
    axes: ScrollAxes,
    layout: LayoutBehaviors,
    viewport_size: Size,
    viewport_transform: Transform,
    offset: Vec2,
    velocity: Vec2,
    items: Vec<HeadlessItem>,
    order: Vec<ItemId>,
    dragging: bool,
}

impl HeadlessSurface {
    /// `count` equal items laid out along `axis`, centered on the viewport,
    /// with the matching stack layout and a size fitter still active.
    pub fn strip(axis: Axis, count: usize, item_size: Size, viewport_size: Size) -> Self {
        let extent = axis.extent(item_size);
        let total = extent * count as f32;
        let cross = match axis {
            Axis::Horizontal => Vec2::new(0.0, -item_size.height * 0.5),
            Axis::Vertical => Vec2::new(-item_size.width * 0.5, 0.0),
        };
        let items = (0..count)
            .map(|i| HeadlessItem {
                anchored: axis.origin_at_flow_start(
                    cross,
                    item_size,
                    -total * 0.5 + extent * i as f32,
                ),
                size: item_size,
            })
            .collect();
        let axes = match axis {
            Axis::Horizontal => ScrollAxes::HORIZONTAL,
            Axis::Vertical => ScrollAxes::VERTICAL,
        };
        Self {
            axes,
            layout: axis.stack_behavior() | LayoutBehaviors::SIZE_FITTER,
            viewport_size,
            viewport_transform: Transform::identity(),
            offset: Vec2::ZERO,
            velocity: Vec2::ZERO,
            items,
            order: (0..count).map(ItemId).collect(),
            dragging: false,
        }
    }

    pub fn with_axes(mut self, axes: ScrollAxes) -> Self {
        self.axes = axes;
        self
    }

    pub fn with_viewport_transform(mut self, t: Transform) -> Self {
        self.viewport_transform = t;
        self
    }

    pub fn visual_order(&self) -> &[ItemId] {
        &self.order
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Pointer drag by `delta` over `dt` seconds. Velocity follows the
    /// drag so a release can fling.
    pub fn drag_by(&mut self, delta: Vec2, dt: f32) {
        self.dragging = true;
        self.offset += delta;
        let dt = dt.clamp(1.0 / 240.0, 1.0 / 15.0);
        self.velocity = delta * (1.0 / dt);
    }

    pub fn release(&mut self) {
        self.dragging = false;
    }

    /// Advance inertia one tick; returns true if still moving.
    pub fn tick(&mut self, dt: f32) -> bool {
        if self.dragging || dt <= 0.0 {
            return false;
        }
        if self.velocity.length() < 5.0 {
            self.velocity = Vec2::ZERO;
            return false;
        }
        self.offset += self.velocity * dt;

        // decay ~0.9 per 60Hz frame
        let decay = 0.90f32.powf(dt * 60.0);
        self.velocity = self.velocity * decay;
        true
    }
}

impl ScrollSurface for HeadlessSurface {
    fn scroll_axes(&self) -> ScrollAxes {
        self.axes
    }

    fn layout_behaviors(&self) -> LayoutBehaviors {
        self.layout
    }

    fn disable_layout(&mut self, behaviors: LayoutBehaviors) {
        self.layout.remove(behaviors);
    }

    fn content_offset(&self) -> Vec2 {
        self.offset
    }

    fn set_content_offset(&mut self, offset: Vec2) {
        self.offset = offset;
    }

    fn velocity(&self) -> Vec2 {
        self.velocity
    }

    fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = velocity;
    }

    fn viewport_rect(&self) -> Rect {
        Rect::centered(Vec2::ZERO, self.viewport_size)
    }

    fn viewport_transform(&self) -> Transform {
        self.viewport_transform
    }

    fn item_count(&self) -> usize {
        self.items.len()
    }

    fn item_at(&self, index: usize) -> ItemId {
        self.order[index]
    }

    fn item_anchored(&self, item: ItemId) -> Vec2 {
        self.items[item.0].anchored
    }

    fn set_item_anchored(&mut self, item: ItemId, pos: Vec2) {
        self.items[item.0].anchored = pos;
    }

    fn item_size(&self, item: ItemId) -> Size {
        self.items[item.0].size
    }

    fn item_world_transform(&self, item: ItemId) -> Transform {
        let local = self.offset + self.items[item.0].anchored;
        self.viewport_transform
            .then(&Transform::translate(local.x, local.y))
    }

    fn set_first_sibling(&mut self, item: ItemId) {
        self.order.retain(|&i| i != item);
        self.order.insert(0, item);
    }

    fn set_last_sibling(&mut self, item: ItemId) {
        self.order.retain(|&i| i != item);
        self.order.push(item);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_is_centered_horizontally() {
        let s = HeadlessSurface::strip(
            Axis::Horizontal,
            4,
            Size::new(100.0, 50.0),
            Size::new(300.0, 50.0),
        );
        let starts: Vec<f32> = (0..4)
            .map(|i| s.item_local_origin(s.item_at(i)).x)
            .collect();
        assert_eq!(starts, vec![-200.0, -100.0, 0.0, 100.0]);
        assert_eq!(s.item_local_center(ItemId(0)), Vec2::new(-150.0, 0.0));
    }

    #[test]
    fn strip_runs_top_down_vertically() {
        let s = HeadlessSurface::strip(
            Axis::Vertical,
            3,
            Size::new(80.0, 100.0),
            Size::new(80.0, 200.0),
        );
        assert_eq!(s.item_local_center(ItemId(0)), Vec2::new(0.0, 100.0));
        assert_eq!(s.item_local_center(ItemId(2)), Vec2::new(0.0, -100.0));
    }

    #[test]
    fn local_space_ignores_viewport_placement() {
        let s = HeadlessSurface::strip(
            Axis::Horizontal,
            2,
            Size::new(100.0, 50.0),
            Size::new(300.0, 50.0),
        )
        .with_viewport_transform(Transform::translate(640.0, 360.0));
        assert_eq!(s.item_local_origin(ItemId(1)), Vec2::new(0.0, -25.0));
    }

    #[test]
    fn sibling_moves() {
        let mut s = HeadlessSurface::strip(
            Axis::Horizontal,
            3,
            Size::new(10.0, 10.0),
            Size::new(10.0, 10.0),
        );
        s.set_first_sibling(ItemId(2));
        assert_eq!(s.visual_order(), &[ItemId(2), ItemId(0), ItemId(1)]);
        s.set_last_sibling(ItemId(2));
        assert_eq!(s.visual_order(), &[ItemId(0), ItemId(1), ItemId(2)]);
    }

    #[test]
    fn inertia_decays_to_rest() {
        let mut s = HeadlessSurface::strip(
            Axis::Horizontal,
            3,
            Size::new(10.0, 10.0),
            Size::new(10.0, 10.0),
        );
        s.drag_by(Vec2::new(-10.0, 0.0), 1.0 / 60.0);
        assert!(!s.tick(1.0 / 60.0));
        s.release();

        let mut frames = 0;
        while s.tick(1.0 / 60.0) {
            frames += 1;
            assert!(frames < 1000);
        }
        assert_eq!(s.velocity(), Vec2::ZERO);
        assert!(s.content_offset().x < -10.0);
    }
}
