//! Host input events
//!
//! The subset of browser input the motion and reveal components react to.

use smallvec::SmallVec;

/// Event type identifier
pub type EventType = u32;

/// Event types a host can deliver to registered listeners
pub mod event_types {
    use super::EventType;

    /// Mouse movement over the document
    pub const POINTER_MOVE: EventType = 3;
    /// Touch movement over the document
    pub const TOUCH_MOVE: EventType = 8;
    /// Window scroll offset changed
    pub const SCROLL: EventType = 30;
    /// Wheel rotation, delivered even when the page cannot scroll
    pub const WHEEL: EventType = 33;
    /// Viewport resized
    pub const RESIZE: EventType = 40;

    /// Human-readable name, matching the DOM event name
    pub fn name(event_type: EventType) -> &'static str {
        match event_type {
            POINTER_MOVE => "mousemove",
            TOUCH_MOVE => "touchmove",
            SCROLL => "scroll",
            WHEEL => "wheel",
            RESIZE => "resize",
            _ => "unknown",
        }
    }

    /// Events dispatched on the document rather than the window
    pub fn targets_document(event_type: EventType) -> bool {
        matches!(event_type, POINTER_MOVE | TOUCH_MOVE)
    }
}

/// A single active touch point in client coordinates
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TouchPoint {
    pub x: f32,
    pub y: f32,
}

impl TouchPoint {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// An input event with associated data
#[derive(Clone, Debug)]
pub struct Event {
    pub event_type: EventType,
    pub data: EventData,
    /// Host timestamp in milliseconds
    pub timestamp: f64,
}

impl Event {
    pub fn new(event_type: EventType, data: EventData, timestamp: f64) -> Self {
        Self {
            event_type,
            data,
            timestamp,
        }
    }

    pub fn pointer_move(x: f32, y: f32) -> Self {
        Self::new(event_types::POINTER_MOVE, EventData::Pointer { x, y }, 0.0)
    }

    pub fn touch_move(touches: impl IntoIterator<Item = TouchPoint>) -> Self {
        Self::new(
            event_types::TOUCH_MOVE,
            EventData::Touch {
                touches: touches.into_iter().collect(),
            },
            0.0,
        )
    }

    pub fn scroll(scroll_y: f32) -> Self {
        Self::new(event_types::SCROLL, EventData::Scroll { scroll_y }, 0.0)
    }

    pub fn wheel(delta_y: f32) -> Self {
        Self::new(event_types::WHEEL, EventData::Wheel { delta_y }, 0.0)
    }

    pub fn resize(width: f32, height: f32) -> Self {
        Self::new(event_types::RESIZE, EventData::Resize { width, height }, 0.0)
    }

    /// First active touch point, if the event carries any
    pub fn primary_touch(&self) -> Option<TouchPoint> {
        match &self.data {
            EventData::Touch { touches } => touches.first().copied(),
            _ => None,
        }
    }
}

/// Event-specific data
#[derive(Clone, Debug)]
pub enum EventData {
    Pointer {
        x: f32,
        y: f32,
    },
    Touch {
        /// Active touches, in host order
        touches: SmallVec<[TouchPoint; 2]>,
    },
    Scroll {
        scroll_y: f32,
    },
    Wheel {
        delta_y: f32,
    },
    Resize {
        width: f32,
        height: f32,
    },
    None,
}
