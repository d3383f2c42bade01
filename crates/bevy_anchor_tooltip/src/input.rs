use bevy_ecs::{
    entity::Entity,
    message::MessageReader,
    prelude::{Query, Res, ResMut, With},
};
use bevy_input::{
    ButtonState,
    mouse::{MouseButton, MouseButtonInput},
};
use bevy_window::{PrimaryWindow, Window};

use crate::{TooltipViewport, events::UiEventQueue, geometry::ViewportSize};

/// Keep [`TooltipViewport`] in sync with the primary window's logical size.
///
/// Hosts without a window write the resource themselves.
pub fn sync_viewport_from_primary_window(
    mut viewport: ResMut<TooltipViewport>,
    primary_window_query: Query<&Window, With<PrimaryWindow>>,
) {
    let Some(window) = primary_window_query.iter().next() else {
        return;
    };

    let size = ViewportSize::new(window.width(), window.height());
    if viewport.0 != size {
        viewport.0 = size;
    }
}

/// Forward left-button presses on the primary window as pointer-down probes.
pub fn forward_pointer_presses(
    queue: Res<UiEventQueue>,
    primary_window_query: Query<(Entity, &Window), With<PrimaryWindow>>,
    mut mouse_button_input: MessageReader<MouseButtonInput>,
) {
    let Some((primary_window_entity, primary_window)) = primary_window_query.iter().next() else {
        return;
    };

    for event in mouse_button_input.read() {
        if event.window != primary_window_entity
            || event.button != MouseButton::Left
            || event.state != ButtonState::Pressed
        {
            continue;
        }

        let Some(position) = primary_window.cursor_position() else {
            tracing::debug!(
                "skipping press because primary cursor is outside window {:?}",
                primary_window_entity
            );
            continue;
        };

        queue.pointer_down(position);
    }
}
