use std::{any::Any, fmt, sync::Arc};

use bevy_ecs::{entity::Entity, message::Message, prelude::Resource};
use bevy_math::Vec2;
use crossbeam_queue::SegQueue;

/// Inputs the host pushes to drive tooltips.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TooltipAction {
    /// Open or close the tooltip entity the event is addressed to.
    Toggle,
    /// A pointer went down at `position` (viewport coordinates).
    ///
    /// Open tooltips whose panel and target do not contain the point close.
    PointerDown { position: Vec2 },
}

/// Lifecycle stages a tooltip passes through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TooltipLifecycle {
    Mounted { panel: Entity },
    Shown,
    Hidden,
    Unmounted,
}

/// Lifecycle notification for `tooltip`, read with a `MessageReader`.
///
/// Unread messages are dropped after two updates.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct TooltipLifecycleEvent {
    pub tooltip: Entity,
    pub lifecycle: TooltipLifecycle,
}

/// Type-erased event addressed to an entity.
pub struct UiEvent {
    pub entity: Entity,
    pub action: Box<dyn Any + Send + Sync>,
}

impl fmt::Debug for UiEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UiEvent")
            .field("entity", &self.entity)
            .field("action", &"<type-erased>")
            .finish()
    }
}

impl UiEvent {
    #[must_use]
    pub fn typed<T: Any + Send + Sync>(entity: Entity, action: T) -> Self {
        Self {
            entity,
            action: Box::new(action),
        }
    }

    /// Downcast to `T`, handing the event back unchanged on mismatch.
    pub fn into_action<T: Any + Send + Sync>(self) -> Result<TypedUiEvent<T>, Self> {
        match self.action.downcast::<T>() {
            Ok(action) => Ok(TypedUiEvent {
                entity: self.entity,
                action: *action,
            }),
            Err(action) => Err(Self {
                entity: self.entity,
                action,
            }),
        }
    }
}

/// Typed event produced from a type-erased [`UiEvent`] queue entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypedUiEvent<T> {
    pub entity: Entity,
    pub action: T,
}

/// Lock-free queue shared between the host and tooltip systems.
#[derive(Resource, Clone, Debug)]
pub struct UiEventQueue {
    queue: Arc<SegQueue<UiEvent>>,
}

impl Default for UiEventQueue {
    fn default() -> Self {
        Self {
            queue: Arc::new(SegQueue::new()),
        }
    }
}

impl UiEventQueue {
    pub fn push(&self, event: UiEvent) {
        self.queue.push(event);
    }

    pub fn push_typed<T: Any + Send + Sync>(&self, entity: Entity, action: T) {
        self.push(UiEvent::typed(entity, action));
    }

    /// Request an open/close of `tooltip`.
    pub fn toggle(&self, tooltip: Entity) {
        self.push_typed(tooltip, TooltipAction::Toggle);
    }

    /// Report a pointer press that is not addressed to any entity.
    pub fn pointer_down(&self, position: Vec2) {
        self.push_typed(Entity::PLACEHOLDER, TooltipAction::PointerDown { position });
    }

    /// Drain the queue, keeping entries of type `T`. Other entries are dropped.
    #[must_use]
    pub fn drain_actions<T: Any + Send + Sync>(&self) -> Vec<TypedUiEvent<T>> {
        let mut drained = Vec::new();
        while let Some(event) = self.queue.pop() {
            match event.into_action::<T>() {
                Ok(event) => drained.push(event),
                Err(other) => {
                    tracing::trace!(entity = ?other.entity, "dropping unrelated ui event");
                }
            }
        }
        drained
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
