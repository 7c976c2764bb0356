use bitflags::bitflags;
use reel_core::{ReelError, Size, Vec2};

bitflags! {
    /// Directions a scroll surface is configured to move in.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct ScrollAxes: u8 {
        const HORIZONTAL = 1 << 0;
        const VERTICAL   = 1 << 1;
    }
}

bitflags! {
    /// Automatic layout acting on the item container. It has to be switched
    /// off before items are positioned by hand.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct LayoutBehaviors: u8 {
        const VERTICAL_STACK   = 1 << 0;
        const HORIZONTAL_STACK = 1 << 1;
        const GRID             = 1 << 2;
        const SIZE_FITTER      = 1 << 3;
    }
}

/// The single axis a reel scrolls along.
///
/// Item order runs along +x for `Horizontal` and along -y for `Vertical`
/// (first item on top, y up). Wrap math is done in that "flow" coordinate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    pub fn from_axes(axes: ScrollAxes) -> Result<Axis, ReelError> {
        if axes.contains(ScrollAxes::HORIZONTAL | ScrollAxes::VERTICAL) {
            Err(ReelError::BothAxes)
        } else if axes.contains(ScrollAxes::HORIZONTAL) {
            Ok(Axis::Horizontal)
        } else if axes.contains(ScrollAxes::VERTICAL) {
            Ok(Axis::Vertical)
        } else {
            Err(ReelError::NoAxis)
        }
    }

    pub fn component(self, v: Vec2) -> f32 {
        match self {
            Axis::Horizontal => v.x,
            Axis::Vertical => v.y,
        }
    }

    /// `v` with its component on this axis replaced.
    pub fn with_component(self, v: Vec2, value: f32) -> Vec2 {
        match self {
            Axis::Horizontal => Vec2::new(value, v.y),
            Axis::Vertical => Vec2::new(v.x, value),
        }
    }

    pub fn extent(self, size: Size) -> f32 {
        match self {
            Axis::Horizontal => size.width,
            Axis::Vertical => size.height,
        }
    }

    /// Flow coordinate of the leading edge of a box whose minimum corner is
    /// `origin`.
    pub fn flow_start(self, origin: Vec2, size: Size) -> f32 {
        match self {
            Axis::Horizontal => origin.x,
            Axis::Vertical => -(origin.y + size.height),
        }
    }

    /// Minimum corner that puts the box's leading edge at `flow`, keeping
    /// the cross-axis coordinate of `origin`.
    pub fn origin_at_flow_start(self, origin: Vec2, size: Size, flow: f32) -> Vec2 {
        match self {
            Axis::Horizontal => Vec2::new(flow, origin.y),
            Axis::Vertical => Vec2::new(origin.x, -flow - size.height),
        }
    }

    /// Layout behavior that would stack items along this axis.
    pub fn stack_behavior(self) -> LayoutBehaviors {
        match self {
            Axis::Horizontal => LayoutBehaviors::HORIZONTAL_STACK,
            Axis::Vertical => LayoutBehaviors::VERTICAL_STACK,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_axis_required() {
        assert_eq!(
            Axis::from_axes(ScrollAxes::VERTICAL).unwrap(),
            Axis::Vertical
        );
        assert!(matches!(
            Axis::from_axes(ScrollAxes::all()),
            Err(ReelError::BothAxes)
        ));
        assert!(matches!(
            Axis::from_axes(ScrollAxes::empty()),
            Err(ReelError::NoAxis)
        ));
    }

    #[test]
    fn flow_start_roundtrip_vertical() {
        let size = Size::new(80.0, 100.0);
        let origin = Vec2::new(-40.0, 200.0);
        let flow = Axis::Vertical.flow_start(origin, size);
        assert_eq!(flow, -300.0);
        assert_eq!(
            Axis::Vertical.origin_at_flow_start(origin, size, flow),
            origin
        );
        // one item further along the flow sits one height lower
        assert_eq!(
            Axis::Vertical.origin_at_flow_start(origin, size, flow + 100.0),
            Vec2::new(-40.0, 100.0)
        );
    }
}
