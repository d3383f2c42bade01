use bevy_ecs::{
    bundle::Bundle,
    entity::Entity,
    hierarchy::{ChildOf, Children},
    prelude::*,
};
use bevy_math::Vec2;
use tracing::debug;

use crate::{
    AmbientTheme, Tooltip, TooltipConfig, TooltipController, TooltipOverlayEntry, TooltipPanel,
    TooltipPanelVisual, TooltipTheme, TooltipViewport, UiOverlayRoot,
    arrow::render_arrow_with_elevation,
    controller::ControllerEvent,
    events::{TooltipLifecycle, TooltipLifecycleEvent},
};

fn first_overlay_root(world: &mut World) -> Option<Entity> {
    let mut query = world.query_filtered::<Entity, With<UiOverlayRoot>>();
    query.iter(world).next()
}

/// Ensure an overlay root exists and return its entity id.
pub fn ensure_overlay_root_entity(world: &mut World) -> Entity {
    if let Some(existing) = first_overlay_root(world) {
        return existing;
    }

    world.spawn(UiOverlayRoot).id()
}

/// Spawn an entity bundle under the global overlay root.
pub fn spawn_in_overlay_root<B: Bundle>(world: &mut World, bundle: B) -> Entity {
    let overlay_root = ensure_overlay_root_entity(world);
    world.spawn((bundle, ChildOf(overlay_root))).id()
}

pub(crate) fn despawn_entity_tree(world: &mut World, entity: Entity) {
    let children = world
        .get::<Children>(entity)
        .map(|children| children.iter().collect::<Vec<_>>())
        .unwrap_or_default();

    for child in children {
        if world.get_entity(child).is_ok() {
            despawn_entity_tree(world, child);
        }
    }

    let _ = world.despawn(entity);
}

fn publish_lifecycle(world: &mut World, tooltip: Entity, lifecycle: TooltipLifecycle) {
    let _ = world.write_message(TooltipLifecycleEvent { tooltip, lifecycle });
}

fn mount_panel(world: &mut World, owner: Entity) {
    if let Some(existing) = world.get::<TooltipOverlayEntry>(owner).map(|entry| entry.0)
        && world.get_entity(existing).is_ok()
    {
        return;
    }

    let panel = spawn_in_overlay_root(world, TooltipPanel { owner });
    world.entity_mut(owner).insert(TooltipOverlayEntry(panel));
    debug!(?owner, ?panel, "tooltip panel mounted");

    publish_lifecycle(world, owner, TooltipLifecycle::Mounted { panel });
}

fn unmount_panel(world: &mut World, owner: Entity) {
    let panel = world.get::<TooltipOverlayEntry>(owner).map(|entry| entry.0);
    if let Ok(mut owner_entity) = world.get_entity_mut(owner) {
        owner_entity.remove::<TooltipOverlayEntry>();
    }

    if let Some(panel) = panel
        && world.get_entity(panel).is_ok()
    {
        despawn_entity_tree(world, panel);
        debug!(?owner, ?panel, "tooltip panel unmounted");
    }

    publish_lifecycle(world, owner, TooltipLifecycle::Unmounted);
}

/// Carry out controller side effects for the tooltip in `owner`.
pub(crate) fn apply_controller_events(
    world: &mut World,
    owner: Entity,
    events: impl IntoIterator<Item = ControllerEvent>,
) {
    for event in events {
        match event {
            ControllerEvent::MountOverlay => mount_panel(world, owner),
            ControllerEvent::UnmountOverlay => unmount_panel(world, owner),
            ControllerEvent::Shown => {
                debug!(?owner, "tooltip shown");
                publish_lifecycle(world, owner, TooltipLifecycle::Shown);
            }
            ControllerEvent::Hidden => {
                debug!(?owner, "tooltip hidden");
                publish_lifecycle(world, owner, TooltipLifecycle::Hidden);
            }
        }
    }
}

pub(crate) fn resolve_tooltip_theme(world: &World, tooltip: &Tooltip) -> TooltipTheme {
    if let Some(theme) = tooltip.theme {
        return theme;
    }

    let ambient = world
        .get_resource::<AmbientTheme>()
        .copied()
        .unwrap_or_default();
    world
        .get_resource::<TooltipConfig>()
        .map(|config| config.themes.inverse_of(&ambient))
        .unwrap_or_else(|| TooltipConfig::default().themes.inverse_of(&ambient))
}

/// Publish [`TooltipPanelVisual`] on every mounted panel from its controller.
pub fn sync_tooltip_panels(world: &mut World) {
    let config = world
        .get_resource::<TooltipConfig>()
        .cloned()
        .unwrap_or_default();
    let viewport = world
        .get_resource::<TooltipViewport>()
        .map(|viewport| viewport.0)
        .unwrap_or_default();

    let visuals = {
        let mut query = world.query::<(&Tooltip, &TooltipController, &TooltipOverlayEntry)>();
        let world_ref: &World = world;

        query
            .iter(world_ref)
            .filter_map(|(tooltip, controller, entry)| {
                let placement = *controller.placement()?;
                let theme = resolve_tooltip_theme(world_ref, tooltip);
                let arrow = render_arrow_with_elevation(
                    config.arrow_size,
                    theme.surface,
                    placement.inverted,
                    config.shadow_elevation,
                );
                let frame =
                    placement.panel_frame(viewport, config.assumed_panel_size(), config.arrow_size);
                let arrow_top = if placement.inverted {
                    frame.min.y
                } else {
                    frame.max.y - config.arrow_size.y
                };
                let arrow_anchor = Vec2::new(
                    placement.arrow_anchor_x(viewport, config.arrow_size),
                    arrow_top,
                );

                Some((
                    entry.0,
                    TooltipPanelVisual {
                        content: tooltip.content.clone(),
                        placement,
                        scale: controller.scale(),
                        transition_origin: placement.transition_origin,
                        theme,
                        arrow,
                        arrow_anchor,
                        frame,
                    },
                ))
            })
            .collect::<Vec<_>>()
    };

    for (panel, visual) in visuals {
        if let Some(mut current) = world.get_mut::<TooltipPanelVisual>(panel) {
            if *current != visual {
                *current = visual;
            }
        } else if let Ok(mut panel_entity) = world.get_entity_mut(panel) {
            panel_entity.insert(visual);
        }
    }
}

/// Despawn panels whose owning tooltip is gone or no longer points at them.
pub fn cleanup_orphaned_tooltip_panels(world: &mut World) {
    let panels = {
        let mut query = world.query::<(Entity, &TooltipPanel)>();
        query
            .iter(world)
            .map(|(entity, panel)| (entity, panel.owner))
            .collect::<Vec<_>>()
    };

    for (panel, owner) in panels {
        let still_owned = world
            .get::<TooltipOverlayEntry>(owner)
            .is_some_and(|entry| entry.0 == panel);
        if !still_owned && world.get_entity(panel).is_ok() {
            debug!(?owner, ?panel, "despawning orphaned tooltip panel");
            despawn_entity_tree(world, panel);
        }
    }
}
