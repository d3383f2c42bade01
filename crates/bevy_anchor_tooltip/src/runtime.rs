use std::time::Duration;

use bevy_ecs::{entity::Entity, hierarchy::ChildOf, prelude::*};
use bevy_math::Vec2;
use bevy_time::Time;
use tracing::{debug, trace, warn};

use crate::{
    ControllerSettings, Tooltip, TooltipConfig, TooltipController, TooltipError,
    TooltipOverlayEntry, TooltipPanelBounds, TooltipPanelVisual, TooltipTarget, TooltipViewport,
    WorldTargetProvider,
    controller::TargetProvider,
    events::{TooltipAction, UiEventQueue},
    geometry::{Measurement, TargetRect},
    overlay::apply_controller_events,
};

/// Spawn a configured tooltip. A wrapped child is reparented under it.
pub fn spawn_tooltip(world: &mut World, tooltip: Tooltip) -> Entity {
    let wrapped = match tooltip.target {
        TooltipTarget::Wrapped(child) => Some(child),
        TooltipTarget::Explicit(_) => None,
    };

    let open_delay = tooltip.open_delay;
    let entity = world.spawn(tooltip).id();
    if let Some(child) = wrapped
        && let Ok(mut child_entity) = world.get_entity_mut(child)
    {
        child_entity.insert(ChildOf(entity));
    }
    attach_controller(world, entity, open_delay);
    entity
}

fn new_controller(world: &World, open_delay: Option<Duration>) -> TooltipController {
    let config = world
        .get_resource::<TooltipConfig>()
        .cloned()
        .unwrap_or_default();

    let delay = open_delay.or(config.default_open_delay);
    TooltipController::new(ControllerSettings::from(&config), delay)
}

fn attach_controller(world: &mut World, entity: Entity, open_delay: Option<Duration>) {
    let controller = new_controller(world, open_delay);
    world.entity_mut(entity).insert(controller);
    debug!(?entity, ?open_delay, "tooltip controller attached");
}

/// Give every newly added [`Tooltip`] without one its own controller.
pub fn attach_tooltip_controllers(world: &mut World) {
    let added = {
        let mut query =
            world.query_filtered::<(Entity, &Tooltip), (Added<Tooltip>, Without<TooltipController>)>();
        query
            .iter(world)
            .map(|(entity, tooltip)| (entity, tooltip.open_delay))
            .collect::<Vec<_>>()
    };

    for (entity, open_delay) in added {
        attach_controller(world, entity, open_delay);
    }
}

fn measure_tooltip_target(world: &World, tooltip: Entity) -> Option<Measurement> {
    let target = world.get::<Tooltip>(tooltip)?.target.entity();
    WorldTargetProvider::new(world, target).measure()
}

/// Toggle the tooltip in `entity` against the target's current measurement.
///
/// A tooltip inserted without [`spawn_tooltip`] gets its controller here if
/// [`attach_tooltip_controllers`] has not run yet.
pub fn toggle_tooltip(world: &mut World, entity: Entity) -> Result<(), TooltipError> {
    let Some(open_delay) = world.get::<Tooltip>(entity).map(|tooltip| tooltip.open_delay) else {
        return Err(TooltipError::TargetUnavailable);
    };

    let measurement = measure_tooltip_target(world, entity);
    let events = match world.get_mut::<TooltipController>(entity) {
        Some(mut controller) => controller.toggle(&measurement)?,
        None => {
            let mut controller = new_controller(world, open_delay);
            let toggled = controller.toggle(&measurement);
            world.entity_mut(entity).insert(controller);
            debug!(?entity, "tooltip controller attached on first toggle");
            toggled?
        }
    };

    apply_controller_events(world, entity, events);
    Ok(())
}

/// Stop the tooltip in `entity` for good and release its overlay entry.
///
/// The disposed controller stays on the entity so later toggles report
/// [`TooltipError::Disposed`].
pub fn dispose_tooltip(world: &mut World, entity: Entity) {
    let events = match world.get_mut::<TooltipController>(entity) {
        Some(mut controller) => controller.dispose(),
        None => return,
    };

    apply_controller_events(world, entity, events);
}

fn panel_region_contains(world: &World, entity: Entity, position: Vec2) -> bool {
    let Some(panel) = world.get::<TooltipOverlayEntry>(entity).map(|entry| entry.0) else {
        return false;
    };

    if let Some(bounds) = world.get::<TooltipPanelBounds>(panel) {
        return bounds.0.contains(position);
    }
    if let Some(visual) = world.get::<TooltipPanelVisual>(panel) {
        return visual.frame.contains(position);
    }

    let Some(controller) = world.get::<TooltipController>(entity) else {
        return false;
    };
    let Some(placement) = controller.placement() else {
        return false;
    };
    let config = world
        .get_resource::<TooltipConfig>()
        .cloned()
        .unwrap_or_default();
    let viewport = world
        .get_resource::<TooltipViewport>()
        .map(|viewport| viewport.0)
        .unwrap_or_default();

    placement
        .panel_frame(viewport, config.assumed_panel_size(), config.arrow_size)
        .contains(position)
}

fn target_contains(world: &World, entity: Entity, position: Vec2) -> bool {
    world
        .get::<Tooltip>(entity)
        .and_then(|tooltip| world.get::<TargetRect>(tooltip.target.entity()))
        .is_some_and(|rect| rect.to_rect().contains(position))
}

/// Open tooltips a press at `position` lands outside of.
///
/// Presses on the target itself are left to the target's own toggle.
fn tooltips_dismissed_by(world: &mut World, position: Vec2) -> Vec<Entity> {
    let open = {
        let mut query = world.query::<(Entity, &TooltipController)>();
        query
            .iter(world)
            .filter(|(_, controller)| controller.state().is_open())
            .map(|(entity, _)| entity)
            .collect::<Vec<_>>()
    };

    open.into_iter()
        .filter(|entity| {
            !panel_region_contains(world, *entity, position)
                && !target_contains(world, *entity, position)
        })
        .collect()
}

/// Consume queued [`TooltipAction`]s.
pub fn handle_tooltip_actions(world: &mut World) {
    let actions = world
        .resource::<UiEventQueue>()
        .drain_actions::<TooltipAction>();

    for event in actions {
        match event.action {
            TooltipAction::Toggle => {
                if world.get_entity(event.entity).is_err() {
                    continue;
                }
                if let Err(error) = toggle_tooltip(world, event.entity) {
                    warn!(entity = ?event.entity, %error, "tooltip toggle ignored");
                }
            }
            TooltipAction::PointerDown { position } => {
                let dismissed = tooltips_dismissed_by(world, position);
                trace!(?position, dismissed = dismissed.len(), "pointer down probe");

                for entity in dismissed {
                    if let Err(error) = toggle_tooltip(world, entity) {
                        warn!(?entity, %error, "outside tap close ignored");
                    }
                }
            }
        }
    }
}

/// Advance every controller by this frame's [`Time`] delta.
pub fn tick_tooltip_controllers(world: &mut World) {
    let delta = world.resource::<Time>().delta();

    let entities = {
        let mut query = world.query_filtered::<Entity, With<TooltipController>>();
        query.iter(world).collect::<Vec<_>>()
    };

    for entity in entities {
        let measurement = measure_tooltip_target(world, entity);
        let events = match world.get_mut::<TooltipController>(entity) {
            Some(mut controller) => controller.tick(delta, &measurement),
            None => continue,
        };

        if !events.is_empty() {
            apply_controller_events(world, entity, events);
        }
    }
}
