//! Self-positioning, animated overlay tooltips for Bevy ECS apps.
//!
//! `bevy_anchor_tooltip` lets you:
//! - place a panel above or below a measured target with a pointer arrow,
//! - animate it open and closed with a back-out scale transition,
//! - drive it from taps, outside taps or an open delay through [`UiEventQueue`].
//!
//! Painting is left to the host: each mounted panel carries a
//! [`TooltipPanelVisual`] under the [`UiOverlayRoot`] entity. Lifecycle changes
//! are published as [`TooltipLifecycleEvent`] messages.
//!
//! # Minimal setup
//!
//! ```no_run
//! use bevy_anchor_tooltip::{
//!     AppTooltipExt, TargetRect, Tooltip, TooltipPlugin, TooltipViewport, UiEventQueue,
//!     ViewportSize, bevy_app::App,
//! };
//!
//! let mut app = App::new();
//! app.add_plugins(TooltipPlugin)
//!     .insert_resource(TooltipViewport(ViewportSize::new(400.0, 800.0)));
//!
//! let icon = app.world_mut().spawn(TargetRect::new(150.0, 50.0, 40.0, 20.0)).id();
//! let tooltip = app.spawn_tooltip(
//!     Tooltip::builder("Settings")
//!         .wrapping(icon)
//!         .build()
//!         .expect("child supplied"),
//! );
//!
//! app.world().resource::<UiEventQueue>().toggle(tooltip);
//! app.update();
//! ```
#![forbid(unsafe_code)]

pub mod app_ext;
pub mod arrow;
pub mod config;
pub mod controller;
pub mod ecs;
pub mod error;
pub mod events;
pub mod geometry;
pub mod input;
pub mod logging;
pub mod overlay;
pub mod plugin;
pub mod runtime;
pub mod theme;

pub use anchor_tween;
pub use bevy_app;
pub use bevy_ecs;

pub use app_ext::*;
pub use arrow::*;
pub use config::*;
pub use controller::*;
pub use ecs::*;
pub use error::*;
pub use events::*;
pub use geometry::*;
pub use logging::*;
pub use overlay::{ensure_overlay_root_entity, spawn_in_overlay_root};
pub use plugin::*;
pub use runtime::*;
pub use theme::*;

pub mod prelude {
    //! Convenience exports for apps using tooltips.

    pub use crate::{
        AmbientTheme, AppTooltipExt, ArrowShape, Brightness, ControllerEvent, Measurement,
        PlacementResult, TargetProvider, TargetRect, Tooltip, TooltipAction, TooltipConfig,
        TooltipController, TooltipError, TooltipLifecycle, TooltipLifecycleEvent, TooltipPanel,
        TooltipPanelVisual, TooltipPlugin, TooltipTarget, TooltipTheme, TooltipViewport,
        UiEventQueue, UiOverlayRoot, VerticalEdge, ViewportSize, VisibilityState,
        compute_placement, dispose_tooltip, init_logging, render_arrow, spawn_tooltip,
        toggle_tooltip,
    };

    pub use crate::{bevy_app, bevy_ecs};
}
