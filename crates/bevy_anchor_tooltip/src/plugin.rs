use bevy_app::{App, Plugin, PostUpdate, PreUpdate, Update};
use bevy_ecs::schedule::IntoScheduleConfigs;
use bevy_input::mouse::MouseButtonInput;
use bevy_time::TimePlugin;

use crate::{
    AmbientTheme, TooltipConfig, TooltipViewport,
    events::{TooltipLifecycleEvent, UiEventQueue},
    input::{forward_pointer_presses, sync_viewport_from_primary_window},
    overlay::{cleanup_orphaned_tooltip_panels, sync_tooltip_panels},
    runtime::{attach_tooltip_controllers, handle_tooltip_actions, tick_tooltip_controllers},
};

/// Bevy plugin running tooltip controllers and their overlay panels.
#[derive(Default)]
pub struct TooltipPlugin;

impl Plugin for TooltipPlugin {
    fn build(&self, app: &mut App) {
        if !app.is_plugin_added::<TimePlugin>() {
            app.add_plugins(TimePlugin);
        }

        app.init_resource::<UiEventQueue>()
            .init_resource::<TooltipConfig>()
            .init_resource::<TooltipViewport>()
            .init_resource::<AmbientTheme>()
            .add_message::<MouseButtonInput>()
            .add_message::<TooltipLifecycleEvent>()
            .add_systems(
                PreUpdate,
                (
                    sync_viewport_from_primary_window,
                    forward_pointer_presses,
                    attach_tooltip_controllers,
                    handle_tooltip_actions,
                )
                    .chain(),
            )
            .add_systems(Update, tick_tooltip_controllers)
            .add_systems(
                PostUpdate,
                (sync_tooltip_panels, cleanup_orphaned_tooltip_panels).chain(),
            );
    }
}
