//! Infinite-wrap relocation.
//!
//! A fixed pool of items is made to look endless by moving whichever end
//! item has left the viewport to the opposite end of the strip. Only the
//! current first and last items in visual order are candidates; a pass
//! keeps moving them until both ends are back inside their lines, so a
//! frame that travels several items still leaves the pool in place.

use crate::axis::Axis;
use crate::surface::{ItemId, ScrollSurface};

/// Extra distance the leading item must travel past the near edge before it
/// wraps, so it isn't pulled away while still partly visible.
pub const LEAD_MARGIN: f32 = 100.0;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Relocation {
    #[default]
    None,
    /// The trailing item moved in front of the leading one.
    ToFront(ItemId),
    /// The leading item moved behind the trailing one.
    ToBack(ItemId),
}

/// Outcome of one `relocate` pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WrapPass {
    pub to_front: usize,
    pub to_back: usize,
    /// Most recent move of the pass.
    pub last: Relocation,
}

impl WrapPass {
    pub fn moved(&self) -> usize {
        self.to_front + self.to_back
    }

    pub fn is_empty(&self) -> bool {
        self.moved() == 0
    }
}

pub struct WrapRelocator {
    threshold: f32,
    layout_released: bool,
}

impl WrapRelocator {
    pub fn new(threshold: f32) -> Self {
        Self {
            threshold,
            layout_released: false,
        }
    }

    /// Threshold from config, or half the viewport extent along `axis`.
    ///
    /// The threshold is widened when the pool is longer than the band
    /// between the two wrap lines, otherwise an item moved to one end would
    /// already be past the other line and bounce back on the next pass.
    pub fn for_surface<S: ScrollSurface>(
        surface: &S,
        axis: Axis,
        threshold: Option<f32>,
    ) -> Self {
        let requested =
            threshold.unwrap_or_else(|| axis.extent(surface.viewport_rect().size()) * 0.5);
        let (pool, largest) = (0..surface.item_count())
            .map(|i| axis.extent(surface.item_size(ItemId(i))))
            .fold((0.0f32, 0.0f32), |(sum, max), e| (sum + e, max.max(e)));
        let fit = ((pool - 2.0 * largest - LEAD_MARGIN) * 0.5).max(0.0);
        if fit > requested {
            if threshold.is_some() {
                log::warn!(
                    "wrap: configured threshold {requested} is too small for a {pool} pool, \
                     using {fit}"
                );
            } else {
                log::debug!("wrap: threshold {requested} widened to {fit} to fit the pool");
            }
        }
        Self::new(requested.max(fit))
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    pub fn layout_released(&self) -> bool {
        self.layout_released
    }

    /// One pass over the pool. Call whenever the content offset changed.
    ///
    /// Trailing items are moved to the front until the last one is back
    /// inside its line, then leading items to the back the same way. Each
    /// side moves at most `item_count` items.
    pub fn relocate<S: ScrollSurface>(&mut self, surface: &mut S, axis: Axis) -> WrapPass {
        self.release_layout(surface);

        let mut pass = WrapPass::default();
        let count = surface.item_count();
        if count == 0 {
            return pass;
        }

        for _ in 0..count {
            let Some(item) = self.trailing_to_front(surface, axis, count) else {
                break;
            };
            pass.to_front += 1;
            pass.last = Relocation::ToFront(item);
        }
        for _ in 0..count {
            let Some(item) = self.leading_to_back(surface, axis, count) else {
                break;
            };
            pass.to_back += 1;
            pass.last = Relocation::ToBack(item);
        }
        pass
    }

    fn trailing_to_front<S: ScrollSurface>(
        &self,
        surface: &mut S,
        axis: Axis,
        count: usize,
    ) -> Option<ItemId> {
        let first = surface.item_at(0);
        let last = surface.item_at(count - 1);
        let last_size = surface.item_size(last);
        let last_extent = axis.extent(last_size);
        let last_start = axis.flow_start(surface.item_local_origin(last), last_size);
        if last_start <= last_extent + self.threshold {
            return None;
        }

        let lead = axis.flow_start(surface.item_anchored(first), surface.item_size(first));
        let pos =
            axis.origin_at_flow_start(surface.item_anchored(last), last_size, lead - last_extent);
        surface.set_item_anchored(last, pos);
        surface.set_first_sibling(last);
        log::debug!("wrap: {last:?} to front");
        Some(last)
    }

    fn leading_to_back<S: ScrollSurface>(
        &self,
        surface: &mut S,
        axis: Axis,
        count: usize,
    ) -> Option<ItemId> {
        let first = surface.item_at(0);
        let last = surface.item_at(count - 1);
        let first_size = surface.item_size(first);
        let first_extent = axis.extent(first_size);
        let first_start = axis.flow_start(surface.item_local_origin(first), first_size);
        if first_start >= -(first_extent + self.threshold + LEAD_MARGIN) {
            return None;
        }

        let last_size = surface.item_size(last);
        let trail =
            axis.flow_start(surface.item_anchored(last), last_size) + axis.extent(last_size);
        let pos = axis.origin_at_flow_start(surface.item_anchored(first), first_size, trail);
        surface.set_item_anchored(first, pos);
        surface.set_last_sibling(first);
        log::debug!("wrap: {first:?} to back");
        Some(first)
    }

    /// Auto-layout would fight manual positioning; switch it off once.
    fn release_layout<S: ScrollSurface>(&mut self, surface: &mut S) {
        if self.layout_released {
            return;
        }
        let behaviors = surface.layout_behaviors();
        if !behaviors.is_empty() {
            log::debug!("wrap: disabling layout {behaviors:?}");
            surface.disable_layout(behaviors);
        }
        self.layout_released = true;
    }
}
