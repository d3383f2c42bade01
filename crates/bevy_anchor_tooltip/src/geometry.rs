use bevy_ecs::prelude::*;
use bevy_math::{Rect, Vec2};

/// Minimum panel height assumed by placement. Content is never measured.
pub const DEFAULT_MIN_PANEL_HEIGHT: f32 = 140.0;

/// Default pointer arrow size (width, height).
pub const DEFAULT_ARROW_SIZE: Vec2 = Vec2::new(20.0, 10.0);

/// On-screen bounds of a tooltip target in viewport coordinates (y down).
///
/// The host layout pass writes this on target entities once layout is known.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct TargetRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl TargetRect {
    #[must_use]
    pub const fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    #[must_use]
    pub fn center_x(&self) -> f32 {
        self.left + self.width / 2.0
    }

    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    #[must_use]
    pub fn to_rect(&self) -> Rect {
        Rect::new(self.left, self.top, self.left + self.width, self.bottom())
    }
}

/// Size of the surface tooltips are laid out in.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ViewportSize {
    pub width: f32,
    pub height: f32,
}

impl ViewportSize {
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Target and viewport measured in the same frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurement {
    pub target: TargetRect,
    pub viewport: ViewportSize,
}

/// The viewport edge a panel is pinned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerticalEdge {
    Top,
    Bottom,
}

/// Distance from one viewport edge. The opposite edge stays unconstrained.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VerticalAnchor {
    pub edge: VerticalEdge,
    pub offset: f32,
}

/// Normalized alignment: `x` in `[-1, 1]` left to right, `y` is `-1` or `1`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Alignment {
    pub x: f32,
    pub y: f32,
}

impl Alignment {
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Inputs of the placement pass that do not come from measurement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementSettings {
    pub min_panel_height: f32,
    pub arrow_size: Vec2,
}

impl Default for PlacementSettings {
    fn default() -> Self {
        Self {
            min_panel_height: DEFAULT_MIN_PANEL_HEIGHT,
            arrow_size: DEFAULT_ARROW_SIZE,
        }
    }
}

/// Output of one placement pass. Always computed as a whole.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementResult {
    pub vertical_anchor: VerticalAnchor,
    pub panel_alignment: Alignment,
    pub arrow_alignment: Alignment,
    pub transition_origin: Alignment,
    /// Panel sits below the target and the arrow points up.
    pub inverted: bool,
}

/// Map `numerator / denominator` from `[0, 1]` into `[-1, 1]`.
///
/// A zero denominator yields `0.0` (centered) and the result is clamped, so a
/// target spanning the whole viewport never produces a non-finite alignment.
#[must_use]
pub fn normalize_to_unit_range(numerator: f32, denominator: f32) -> f32 {
    if denominator.abs() <= f32::EPSILON {
        return 0.0;
    }

    let normalized = 2.0 * numerator / denominator - 1.0;
    if normalized.is_finite() {
        normalized.clamp(-1.0, 1.0)
    } else {
        0.0
    }
}

/// Decide where the panel goes for `target` inside `viewport`.
///
/// Above is preferred, then below. When neither fits the panel overlaps the
/// target's vertical center and grows upward.
#[must_use]
pub fn compute_placement(
    target: TargetRect,
    viewport: ViewportSize,
    settings: PlacementSettings,
) -> PlacementResult {
    let fits_above = target.top - settings.min_panel_height >= 0.0;
    let fits_below = target.bottom() + settings.min_panel_height <= viewport.height;

    let vertical_anchor = if fits_above {
        VerticalAnchor {
            edge: VerticalEdge::Bottom,
            offset: viewport.height - target.top,
        }
    } else if fits_below {
        VerticalAnchor {
            edge: VerticalEdge::Top,
            offset: target.bottom(),
        }
    } else {
        VerticalAnchor {
            edge: VerticalEdge::Bottom,
            offset: target.top + target.height / 2.0,
        }
    };

    let inverted = vertical_anchor.edge == VerticalEdge::Top;
    let vertical = if inverted { 1.0 } else { -1.0 };

    let panel_alignment = Alignment::new(
        normalize_to_unit_range(target.left, viewport.width - target.width),
        vertical,
    );
    let transition_origin = Alignment::new(
        normalize_to_unit_range(target.center_x(), viewport.width),
        -vertical,
    );
    let arrow_alignment = Alignment::new(
        normalize_to_unit_range(target.center_x(), viewport.width - settings.arrow_size.x),
        vertical,
    );

    PlacementResult {
        vertical_anchor,
        panel_alignment,
        arrow_alignment,
        transition_origin,
        inverted,
    }
}

/// Resolve an alignment value into the left edge of a `child` extent inside `parent`.
#[must_use]
pub fn aligned_start(alignment: f32, parent: f32, child: f32) -> f32 {
    (alignment + 1.0) / 2.0 * (parent - child)
}

impl PlacementResult {
    /// Estimated on-screen region of panel plus arrow.
    ///
    /// `panel_size` is not measured content; callers pass the configured width
    /// and the minimum panel height.
    #[must_use]
    pub fn panel_frame(&self, viewport: ViewportSize, panel_size: Vec2, arrow_size: Vec2) -> Rect {
        let width = panel_size.x.min(viewport.width).max(0.0);
        let height = panel_size.y + arrow_size.y;
        let left = aligned_start(self.panel_alignment.x, viewport.width, width);

        let top = match self.vertical_anchor.edge {
            VerticalEdge::Top => self.vertical_anchor.offset,
            VerticalEdge::Bottom => viewport.height - self.vertical_anchor.offset - height,
        };

        Rect::new(left, top, left + width, top + height)
    }

    /// Horizontal anchor of the arrow. The arrow box aligned by
    /// `arrow_alignment` starts at the target's center, so callers center the
    /// shape on this point by shifting it half its width to the left.
    #[must_use]
    pub fn arrow_anchor_x(&self, viewport: ViewportSize, arrow_size: Vec2) -> f32 {
        aligned_start(self.arrow_alignment.x, viewport.width, arrow_size.x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: ViewportSize = ViewportSize::new(400.0, 800.0);

    fn place(target: TargetRect) -> PlacementResult {
        compute_placement(target, VIEWPORT, PlacementSettings::default())
    }

    #[test]
    fn target_near_top_places_panel_below() {
        let placement = place(TargetRect::new(150.0, 50.0, 40.0, 20.0));

        assert_eq!(placement.vertical_anchor.edge, VerticalEdge::Top);
        assert_eq!(placement.vertical_anchor.offset, 70.0);
        assert!(placement.inverted);
        assert_eq!(placement.panel_alignment.y, 1.0);
        assert_eq!(placement.arrow_alignment.y, 1.0);
        assert_eq!(placement.transition_origin.y, -1.0);
    }

    #[test]
    fn target_near_bottom_places_panel_above() {
        let placement = place(TargetRect::new(150.0, 750.0, 40.0, 20.0));

        assert_eq!(placement.vertical_anchor.edge, VerticalEdge::Bottom);
        assert_eq!(placement.vertical_anchor.offset, 50.0);
        assert!(!placement.inverted);
        assert_eq!(placement.panel_alignment.y, -1.0);
        assert_eq!(placement.transition_origin.y, 1.0);
    }

    #[test]
    fn room_above_always_wins() {
        for top in [140.0, 300.0, 500.0, 779.0] {
            let placement = place(TargetRect::new(10.0, top, 40.0, 20.0));
            assert!(!placement.inverted, "top = {top}");
            assert_eq!(placement.vertical_anchor.edge, VerticalEdge::Bottom);
        }
    }

    #[test]
    fn no_room_either_way_overlaps_target_center() {
        let short = ViewportSize::new(400.0, 200.0);
        let placement = compute_placement(
            TargetRect::new(100.0, 60.0, 40.0, 40.0),
            short,
            PlacementSettings::default(),
        );

        assert_eq!(placement.vertical_anchor.edge, VerticalEdge::Bottom);
        assert_eq!(placement.vertical_anchor.offset, 80.0);
        assert!(!placement.inverted);
    }

    #[test]
    fn inverted_tracks_top_edge() {
        for top in [0.0, 50.0, 139.0, 140.0, 650.0] {
            let placement = place(TargetRect::new(0.0, top, 40.0, 20.0));
            assert_eq!(
                placement.inverted,
                placement.vertical_anchor.edge == VerticalEdge::Top
            );
        }
    }

    #[test]
    fn horizontal_alignments_follow_target_position() {
        let placement = place(TargetRect::new(180.0, 400.0, 40.0, 20.0));

        assert!((placement.panel_alignment.x - 0.0).abs() < 1e-6);
        assert!((placement.transition_origin.x - 0.0).abs() < 1e-6);
        assert!((placement.arrow_alignment.x - (2.0 * 200.0 / 380.0 - 1.0)).abs() < 1e-6);

        let left_edge = place(TargetRect::new(0.0, 400.0, 40.0, 20.0));
        assert_eq!(left_edge.panel_alignment.x, -1.0);
    }

    #[test]
    fn full_width_target_gets_centered_fallback() {
        let placement = place(TargetRect::new(0.0, 400.0, 400.0, 20.0));

        assert_eq!(placement.panel_alignment.x, 0.0);
        assert!(placement.transition_origin.x.is_finite());
        assert!(placement.arrow_alignment.x.is_finite());
    }

    #[test]
    fn arrow_width_equal_to_viewport_gets_fallback() {
        let settings = PlacementSettings {
            arrow_size: Vec2::new(400.0, 10.0),
            ..PlacementSettings::default()
        };
        let placement = compute_placement(TargetRect::new(10.0, 400.0, 40.0, 20.0), VIEWPORT, settings);

        assert_eq!(placement.arrow_alignment.x, 0.0);
    }

    #[test]
    fn normalize_clamps_out_of_range_targets() {
        assert_eq!(normalize_to_unit_range(500.0, 100.0), 1.0);
        assert_eq!(normalize_to_unit_range(-50.0, 100.0), -1.0);
        assert_eq!(normalize_to_unit_range(10.0, 0.0), 0.0);
    }

    #[test]
    fn panel_frame_sits_against_the_target() {
        let below = place(TargetRect::new(150.0, 50.0, 40.0, 20.0));
        let frame = below.panel_frame(VIEWPORT, Vec2::new(280.0, 140.0), DEFAULT_ARROW_SIZE);
        assert_eq!(frame.min.y, 70.0);
        assert_eq!(frame.height(), 150.0);

        let above = place(TargetRect::new(150.0, 750.0, 40.0, 20.0));
        let frame = above.panel_frame(VIEWPORT, Vec2::new(280.0, 140.0), DEFAULT_ARROW_SIZE);
        assert_eq!(frame.max.y, 750.0);
        assert!(frame.min.x >= 0.0 && frame.max.x <= VIEWPORT.width);
    }

    #[test]
    fn arrow_anchor_lands_on_target_center() {
        let placement = place(TargetRect::new(150.0, 50.0, 40.0, 20.0));

        let anchor = placement.arrow_anchor_x(VIEWPORT, DEFAULT_ARROW_SIZE);
        assert!((anchor - 170.0).abs() < 1e-3);
    }
}
