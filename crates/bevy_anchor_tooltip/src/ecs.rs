use std::time::Duration;

use bevy_ecs::prelude::*;
use bevy_math::{Rect, Vec2};

use crate::{
    ArrowShape, PlacementResult, TooltipError, TooltipTheme,
    controller::TargetProvider,
    geometry::{Alignment, Measurement, TargetRect, ViewportSize},
};

/// Which element a tooltip measures and points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TooltipTarget {
    /// An element referenced by the tooltip but living elsewhere in the tree.
    Explicit(Entity),
    /// The child the tooltip wraps; it doubles as the trigger.
    Wrapped(Entity),
}

impl TooltipTarget {
    #[must_use]
    pub fn entity(self) -> Entity {
        match self {
            Self::Explicit(entity) | Self::Wrapped(entity) => entity,
        }
    }
}

/// A configured tooltip. The plugin attaches a
/// [`TooltipController`](crate::TooltipController) when this is added.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct Tooltip {
    pub content: String,
    pub target: TooltipTarget,
    /// `None` picks the inverse of the ambient theme.
    pub theme: Option<TooltipTheme>,
    pub open_delay: Option<Duration>,
}

impl Tooltip {
    #[must_use]
    pub fn builder(content: impl Into<String>) -> TooltipBuilder {
        TooltipBuilder {
            content: content.into(),
            child: None,
            target: None,
            theme: None,
            open_delay: None,
        }
    }
}

/// Builder for [`Tooltip`]. Validation happens in [`build`](Self::build).
#[derive(Debug, Clone)]
#[must_use]
pub struct TooltipBuilder {
    content: String,
    child: Option<Entity>,
    target: Option<Entity>,
    theme: Option<TooltipTheme>,
    open_delay: Option<Duration>,
}

impl TooltipBuilder {
    /// Wrap a trigger element. It is the target unless [`target`](Self::target) is set.
    pub fn wrapping(mut self, child: Entity) -> Self {
        self.child = Some(child);
        self
    }

    pub fn target(mut self, target: Entity) -> Self {
        self.target = Some(target);
        self
    }

    pub fn theme(mut self, theme: TooltipTheme) -> Self {
        self.theme = Some(theme);
        self
    }

    pub fn open_delay(mut self, delay: Duration) -> Self {
        self.open_delay = Some(delay);
        self
    }

    pub fn build(self) -> Result<Tooltip, TooltipError> {
        let target = match (self.target, self.child) {
            (Some(target), _) => TooltipTarget::Explicit(target),
            (None, Some(child)) => TooltipTarget::Wrapped(child),
            (None, None) => return Err(TooltipError::MissingTarget),
        };

        Ok(Tooltip {
            content: self.content,
            target,
            theme: self.theme,
            open_delay: self.open_delay,
        })
    }
}

/// Size of the surface tooltips are placed in.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct TooltipViewport(pub ViewportSize);

/// Marker for the overlay layer root that tooltip panels mount under.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UiOverlayRoot;

/// Mounted panel for the tooltip entity in `owner`.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct TooltipPanel {
    pub owner: Entity,
}

/// Points a tooltip at its mounted panel entity.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct TooltipOverlayEntry(pub Entity);

/// Host override for the panel extent used in outside-tap hit-testing.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct TooltipPanelBounds(pub Rect);

/// Everything a renderer needs to paint a mounted panel this frame.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct TooltipPanelVisual {
    pub content: String,
    pub placement: PlacementResult,
    /// Eased scale applied around [`Self::transition_origin`].
    pub scale: f32,
    pub transition_origin: Alignment,
    pub theme: TooltipTheme,
    pub arrow: ArrowShape,
    /// Point the arrow is centered on; pass to [`ArrowShape::centered_on`].
    pub arrow_anchor: Vec2,
    /// Estimated panel plus arrow region in viewport coordinates.
    pub frame: Rect,
}

/// Measures a tooltip target through the ECS world.
pub struct WorldTargetProvider<'w> {
    world: &'w World,
    target: Entity,
}

impl<'w> WorldTargetProvider<'w> {
    #[must_use]
    pub fn new(world: &'w World, target: Entity) -> Self {
        Self { world, target }
    }
}

impl TargetProvider for WorldTargetProvider<'_> {
    fn measure(&self) -> Option<Measurement> {
        let target = *self.world.get::<TargetRect>(self.target)?;
        let viewport = self.world.get_resource::<TooltipViewport>()?.0;

        (viewport.width > 0.0 && viewport.height > 0.0).then_some(Measurement { target, viewport })
    }
}
