use bevy_color::Color;
use bevy_math::Vec2;

/// Shadow elevation used when no configuration overrides it.
pub const DEFAULT_SHADOW_ELEVATION: f32 = 4.0;

/// Drop shadow painted behind the arrow fill.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArrowShadow {
    pub elevation: f32,
    pub color: Color,
    /// The fill is opaque, so the renderer may skip shadow under it.
    pub transparent_occluder: bool,
}

/// Filled triangle pointing at the tooltip target.
///
/// Vertices are relative to the shape's own origin (top-left of its bounds).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArrowShape {
    pub size: Vec2,
    pub apex: Vec2,
    pub base: [Vec2; 2],
    pub fill: Color,
    pub shadow: ArrowShadow,
    pub inverted: bool,
}

/// Build the pointer triangle.
///
/// Non-inverted arrows hang under a panel placed above the target (apex down),
/// inverted arrows sit on top of a panel placed below it (apex up).
#[must_use]
pub fn render_arrow(size: Vec2, color: Color, inverted: bool) -> ArrowShape {
    render_arrow_with_elevation(size, color, inverted, DEFAULT_SHADOW_ELEVATION)
}

#[must_use]
pub fn render_arrow_with_elevation(
    size: Vec2,
    color: Color,
    inverted: bool,
    elevation: f32,
) -> ArrowShape {
    let (apex, base) = if inverted {
        (
            Vec2::new(size.x / 2.0, 0.0),
            [Vec2::new(0.0, size.y), Vec2::new(size.x, size.y)],
        )
    } else {
        (
            Vec2::new(size.x / 2.0, size.y),
            [Vec2::ZERO, Vec2::new(size.x, 0.0)],
        )
    };

    ArrowShape {
        size,
        apex,
        base,
        fill: color,
        shadow: ArrowShadow {
            elevation,
            color: Color::BLACK,
            transparent_occluder: false,
        },
        inverted,
    }
}

impl ArrowShape {
    #[must_use]
    pub fn vertices(&self) -> [Vec2; 3] {
        [self.base[0], self.apex, self.base[1]]
    }

    /// Translate so the shape is horizontally centered on `anchor.x` with its
    /// top edge at `anchor.y`.
    #[must_use]
    pub fn centered_on(&self, anchor: Vec2) -> [Vec2; 3] {
        let offset = Vec2::new(anchor.x - self.size.x / 2.0, anchor.y);
        self.vertices().map(|vertex| vertex + offset)
    }

    /// Whether `point`, relative to the shape origin, is inside the triangle.
    #[must_use]
    pub fn contains(&self, point: Vec2) -> bool {
        let [a, b, c] = self.vertices();
        let d1 = edge_sign(point, a, b);
        let d2 = edge_sign(point, b, c);
        let d3 = edge_sign(point, c, a);

        let has_negative = d1 < 0.0 || d2 < 0.0 || d3 < 0.0;
        let has_positive = d1 > 0.0 || d2 > 0.0 || d3 > 0.0;
        !(has_negative && has_positive)
    }
}

fn edge_sign(p: Vec2, a: Vec2, b: Vec2) -> f32 {
    (p.x - b.x) * (a.y - b.y) - (a.x - b.x) * (p.y - b.y)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIZE: Vec2 = Vec2::new(20.0, 10.0);

    #[test]
    fn default_arrow_points_down() {
        let arrow = render_arrow(SIZE, Color::WHITE, false);

        assert_eq!(arrow.apex, Vec2::new(10.0, 10.0));
        assert_eq!(arrow.base, [Vec2::new(0.0, 0.0), Vec2::new(20.0, 0.0)]);
        assert_eq!(arrow.shadow.elevation, DEFAULT_SHADOW_ELEVATION);
        assert!(!arrow.shadow.transparent_occluder);
    }

    #[test]
    fn inverted_arrow_points_up() {
        let arrow = render_arrow(SIZE, Color::WHITE, true);

        assert_eq!(arrow.apex, Vec2::new(10.0, 0.0));
        assert_eq!(arrow.base, [Vec2::new(0.0, 10.0), Vec2::new(20.0, 10.0)]);
        assert!(arrow.inverted);
    }

    #[test]
    fn rendering_is_deterministic() {
        assert_eq!(
            render_arrow(SIZE, Color::BLACK, true),
            render_arrow(SIZE, Color::BLACK, true)
        );
    }

    #[test]
    fn centered_on_translates_by_half_width() {
        let arrow = render_arrow(SIZE, Color::WHITE, false);
        let placed = arrow.centered_on(Vec2::new(100.0, 50.0));

        assert_eq!(placed[0], Vec2::new(90.0, 50.0));
        assert_eq!(placed[1], Vec2::new(100.0, 60.0));
        assert_eq!(placed[2], Vec2::new(110.0, 50.0));
    }

    #[test]
    fn contains_tests_the_triangle_not_the_bounds() {
        let arrow = render_arrow(SIZE, Color::WHITE, true);

        assert!(arrow.contains(Vec2::new(10.0, 5.0)));
        assert!(!arrow.contains(Vec2::new(1.0, 1.0)));
    }
}
