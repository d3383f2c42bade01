use std::time::Duration;

use bevy_anchor_tooltip::{
    AppTooltipExt, TargetRect, Tooltip, TooltipError, TooltipLifecycleEvent, TooltipPanel,
    TooltipPanelVisual, TooltipPlugin, TooltipViewport, UiEventQueue, ViewportSize,
    bevy_app::{App, Last},
    bevy_ecs::{message::MessageReader, prelude::*},
    init_logging,
};
use bevy_math::Vec2;
use bevy_time::TimeUpdateStrategy;

const FRAME: Duration = Duration::from_millis(16);

const CONFIG: &str = r##"(
  min_panel_height: 140.0,
  animation_duration_ms: 240,
  ease: BackOut,
  dark: (surface: Hex("#1E293B"), text: Hex("#F1F5F9")),
)"##;

fn log_panels(world: &mut World, frame: usize) {
    let mut query = world.query::<(&TooltipPanel, &TooltipPanelVisual)>();
    for (panel, visual) in query.iter(world) {
        tracing::info!(
            frame,
            owner = ?panel.owner,
            edge = ?visual.placement.vertical_anchor.edge,
            offset = visual.placement.vertical_anchor.offset,
            inverted = visual.placement.inverted,
            scale = visual.scale,
            "panel"
        );
    }
}

fn log_lifecycle(mut lifecycle: MessageReader<TooltipLifecycleEvent>) {
    for event in lifecycle.read() {
        tracing::info!(tooltip = ?event.tooltip, lifecycle = ?event.lifecycle, "lifecycle");
    }
}

fn run_frames(app: &mut App, frames: usize) {
    for frame in 0..frames {
        app.update();
        log_panels(app.world_mut(), frame);
    }
}

fn build_walkthrough_app() -> Result<App, TooltipError> {
    init_logging();

    let mut app = App::new();
    app.add_plugins(TooltipPlugin)
        .insert_resource(TimeUpdateStrategy::ManualDuration(FRAME))
        .insert_resource(TooltipViewport(ViewportSize::new(400.0, 800.0)))
        .add_systems(Last, log_lifecycle);
    app.load_tooltip_config(CONFIG)?;
    Ok(app)
}

fn main() -> Result<(), TooltipError> {
    let mut app = build_walkthrough_app()?;

    let toolbar_icon = app
        .world_mut()
        .spawn(TargetRect::new(150.0, 50.0, 40.0, 20.0))
        .id();
    let footer_link = app
        .world_mut()
        .spawn(TargetRect::new(150.0, 750.0, 40.0, 20.0))
        .id();

    let below = app.spawn_tooltip(Tooltip::builder("Opens settings").wrapping(toolbar_icon).build()?);
    let above = app.spawn_tooltip(
        Tooltip::builder("Shown after a short delay")
            .target(footer_link)
            .open_delay(Duration::from_millis(200))
            .build()?,
    );

    app.world().resource::<UiEventQueue>().toggle(below);
    run_frames(&mut app, 30);

    // Reverse mid-animation: close then reopen before the run completes.
    app.world().resource::<UiEventQueue>().toggle(below);
    run_frames(&mut app, 4);
    app.world().resource::<UiEventQueue>().toggle(below);
    run_frames(&mut app, 30);

    app.world()
        .resource::<UiEventQueue>()
        .pointer_down(Vec2::new(5.0, 400.0));
    run_frames(&mut app, 30);

    bevy_anchor_tooltip::dispose_tooltip(app.world_mut(), above);
    run_frames(&mut app, 5);

    Ok(())
}
