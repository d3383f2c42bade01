use std::time::Duration;

use anchor_tween::{AnimationClock, AnimationStatus, EaseFunction};
use bevy_ecs::prelude::*;
use bevy_time::{Timer, TimerMode};
use tracing::debug;

use crate::{
    TooltipConfig, TooltipError,
    geometry::{Measurement, PlacementResult, PlacementSettings, compute_placement},
};

/// Visibility lifecycle of one tooltip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VisibilityState {
    #[default]
    Hidden,
    Showing,
    Visible,
    Hiding,
}

impl VisibilityState {
    /// Open or opening; the state an outside tap closes from.
    #[must_use]
    pub fn is_open(self) -> bool {
        matches!(self, Self::Showing | Self::Visible)
    }
}

/// Side effects the owner of a controller must carry out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerEvent {
    /// Attach the panel to the overlay. Emitted before the forward run starts.
    MountOverlay,
    /// Forward run finished.
    Shown,
    /// Reverse run finished.
    Hidden,
    /// Detach the panel from the overlay.
    UnmountOverlay,
}

pub type ControllerEvents = Vec<ControllerEvent>;

/// Capability that measures the element a tooltip is attached to.
pub trait TargetProvider {
    /// Current target and viewport geometry, or `None` if the target is not
    /// laid out or no longer exists.
    fn measure(&self) -> Option<Measurement>;
}

impl TargetProvider for Measurement {
    fn measure(&self) -> Option<Measurement> {
        Some(*self)
    }
}

impl TargetProvider for Option<Measurement> {
    fn measure(&self) -> Option<Measurement> {
        *self
    }
}

/// Settings a controller copies out of [`TooltipConfig`] at creation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControllerSettings {
    pub placement: PlacementSettings,
    pub animation_duration: Duration,
    pub ease: EaseFunction,
}

impl From<&TooltipConfig> for ControllerSettings {
    fn from(config: &TooltipConfig) -> Self {
        Self {
            placement: config.placement_settings(),
            animation_duration: config.animation_duration,
            ease: config.ease,
        }
    }
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self::from(&TooltipConfig::default())
    }
}

/// One-shot open timer that only starts counting after the first layout pass.
#[derive(Debug, Clone)]
struct PendingDelay {
    timer: Timer,
    layout_ready: bool,
}

/// Visibility, placement and animation state for one tooltip.
///
/// All mutation goes through [`toggle`](Self::toggle), [`tick`](Self::tick)
/// and [`dispose`](Self::dispose).
#[derive(Component, Debug, Clone)]
pub struct TooltipController {
    state: VisibilityState,
    placement: Option<PlacementResult>,
    animation: AnimationClock,
    pending_delay: Option<PendingDelay>,
    settings: ControllerSettings,
    mounted: bool,
    disposed: bool,
}

impl TooltipController {
    #[must_use]
    pub fn new(settings: ControllerSettings, open_delay: Option<Duration>) -> Self {
        let mut controller = Self {
            state: VisibilityState::Hidden,
            placement: None,
            animation: AnimationClock::new(settings.animation_duration, settings.ease),
            pending_delay: None,
            settings,
            mounted: false,
            disposed: false,
        };
        if let Some(delay) = open_delay {
            controller.schedule_open(delay);
        }
        controller
    }

    #[must_use]
    pub fn state(&self) -> VisibilityState {
        self.state
    }

    /// Geometry of the current open. `None` while hidden.
    #[must_use]
    pub fn placement(&self) -> Option<&PlacementResult> {
        if self.state == VisibilityState::Hidden {
            return None;
        }
        self.placement.as_ref()
    }

    /// Raw animation progress in `[0, 1]`.
    #[must_use]
    pub fn progress(&self) -> f32 {
        self.animation.value()
    }

    /// Eased panel scale. Overshoots past `1.0` with the back-out curve.
    #[must_use]
    pub fn scale(&self) -> f32 {
        self.animation.eased()
    }

    #[must_use]
    pub fn settings(&self) -> &ControllerSettings {
        &self.settings
    }

    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    #[must_use]
    pub fn has_pending_delay(&self) -> bool {
        self.pending_delay.is_some()
    }

    /// Arm a one-shot open. Replaces any delay already pending.
    pub fn schedule_open(&mut self, delay: Duration) {
        if self.disposed {
            return;
        }
        self.pending_delay = Some(PendingDelay {
            timer: Timer::new(delay, TimerMode::Once),
            layout_ready: false,
        });
    }

    pub fn cancel_pending_delay(&mut self) {
        if self.pending_delay.take().is_some() {
            debug!("pending tooltip open cancelled");
        }
    }

    /// Flip between opening and closing.
    ///
    /// Opening from hidden measures the target first; if that fails nothing
    /// changes and [`TooltipError::TargetUnavailable`] is returned. A toggle
    /// during a run reverses it from the current progress.
    pub fn toggle(
        &mut self,
        provider: &impl TargetProvider,
    ) -> Result<ControllerEvents, TooltipError> {
        if self.disposed {
            return Err(TooltipError::Disposed);
        }

        let mut events = ControllerEvents::new();
        match self.state {
            VisibilityState::Hidden => {
                let measurement = provider.measure().ok_or(TooltipError::TargetUnavailable)?;
                self.cancel_pending_delay();
                let placement = compute_placement(
                    measurement.target,
                    measurement.viewport,
                    self.settings.placement,
                );
                debug!(?placement, "tooltip placement computed");

                self.placement = Some(placement);
                if !self.mounted {
                    self.mounted = true;
                    events.push(ControllerEvent::MountOverlay);
                }
                self.animation.forward();
                self.state = VisibilityState::Showing;
            }
            VisibilityState::Showing | VisibilityState::Visible => {
                self.cancel_pending_delay();
                self.animation.reverse();
                self.state = VisibilityState::Hiding;
            }
            VisibilityState::Hiding => {
                self.cancel_pending_delay();
                self.animation.forward();
                self.state = VisibilityState::Showing;
            }
        }

        debug!(state = ?self.state, progress = self.progress(), "tooltip toggled");
        Ok(events)
    }

    /// Advance the pending delay and the animation by one frame.
    pub fn tick(&mut self, delta: Duration, provider: &impl TargetProvider) -> ControllerEvents {
        let mut events = ControllerEvents::new();
        if self.disposed {
            return events;
        }

        if self.tick_pending_delay(delta, provider) {
            match self.toggle(provider) {
                Ok(opened) => events.extend(opened),
                Err(error) => debug!(%error, "delayed tooltip open skipped"),
            }
        }

        match self.animation.tick(delta) {
            Some(AnimationStatus::Completed) => {
                self.state = VisibilityState::Visible;
                events.push(ControllerEvent::Shown);
            }
            Some(AnimationStatus::Dismissed) => {
                self.state = VisibilityState::Hidden;
                self.placement = None;
                events.push(ControllerEvent::Hidden);
                if self.mounted {
                    self.mounted = false;
                    events.push(ControllerEvent::UnmountOverlay);
                }
            }
            _ => {}
        }

        events
    }

    /// Returns `true` on the frame the delay expires.
    fn tick_pending_delay(&mut self, delta: Duration, provider: &impl TargetProvider) -> bool {
        let Some(pending) = self.pending_delay.as_mut() else {
            return false;
        };

        if !pending.layout_ready {
            // The first frame the target can be measured is the first layout pass.
            pending.layout_ready = provider.measure().is_some();
            return false;
        }

        if pending.timer.tick(delta).just_finished() {
            self.pending_delay = None;
            return true;
        }
        false
    }

    /// Halt everything. Safe in any state; nothing fires afterward.
    pub fn dispose(&mut self) -> ControllerEvents {
        let mut events = ControllerEvents::new();
        if self.disposed {
            return events;
        }

        self.disposed = true;
        self.pending_delay = None;
        self.animation.stop();
        self.placement = None;
        self.state = VisibilityState::Hidden;
        if self.mounted {
            self.mounted = false;
            events.push(ControllerEvent::UnmountOverlay);
        }
        debug!("tooltip controller disposed");
        events
    }
}
