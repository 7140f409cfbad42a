//! Host abstraction
//!
//! A host is the page environment the motion and reveal components run in:
//! a browser window in production, an in-memory page in tests. Components
//! talk to it through [`Host`] and receive its notifications as
//! [`HostEvent`]s.
//!
//! Mutating calls are infallible at this level. Backends that can fail (the
//! DOM rejecting a style write) log and carry on, since a missed frame of
//! decoration is not worth surfacing.

use drift_core::{ElementId, Event, EventType, ListenerId, ObserverId, Point, Size};

use crate::margin::RootMargin;

/// Intersection observer configuration
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ObserverOptions {
    pub root_margin: RootMargin,
    /// Fraction of the element's area that must be visible, in `[0, 1]`
    pub threshold: f32,
}

impl ObserverOptions {
    pub fn new(root_margin: RootMargin, threshold: f32) -> Self {
        Self {
            root_margin,
            threshold,
        }
    }

    /// Observer with no root margin
    pub fn threshold(threshold: f32) -> Self {
        Self::new(RootMargin::ZERO, threshold)
    }
}

/// One element's intersection state as reported by an observer
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IntersectionEntry {
    pub target: ElementId,
    pub is_intersecting: bool,
    pub ratio: f32,
}

/// Notifications a host delivers to the application
#[derive(Clone, Debug)]
pub enum HostEvent {
    /// A requested animation frame is due
    Frame { timestamp: f64 },
    /// Input delivered to one registered listener
    Input { listener: ListenerId, event: Event },
    /// Intersection changes for one observer
    Intersection {
        observer: ObserverId,
        entries: Vec<IntersectionEntry>,
    },
}

/// The page environment
pub trait Host {
    /// Current viewport size (`innerWidth` x `innerHeight`)
    fn viewport(&self) -> Size;

    /// Current vertical scroll offset
    fn scroll_y(&self) -> f32;

    /// URL fragment without the leading `#`, `None` when absent or empty
    fn location_fragment(&self) -> Option<String>;

    /// Whether the user asked for reduced motion
    fn prefers_reduced_motion(&self) -> bool;

    /// Elements carrying `marker` as a class, in document order
    fn query_marked(&mut self, marker: &str) -> Vec<ElementId>;

    /// Rendered width of an element
    fn bounding_width(&self, element: ElementId) -> f32;

    /// Write the element's static placement (`left`/`top`)
    fn set_placement(&mut self, element: ElementId, position: Point);

    /// Write the element's visual translation
    fn set_translation(&mut self, element: ElementId, offset: Point);

    fn add_class(&mut self, element: ElementId, class: &str);

    fn remove_class(&mut self, element: ElementId, class: &str);

    /// Delay before the element's CSS transition starts
    fn set_transition_delay(&mut self, element: ElementId, delay_ms: u32);

    /// Ask for one [`HostEvent::Frame`] at the next animation frame
    fn request_frame(&mut self);

    /// Register a passive listener; its events arrive as [`HostEvent::Input`]
    fn add_listener(&mut self, event_type: EventType) -> ListenerId;

    /// Stop delivering events to a listener. Unknown ids are ignored.
    fn remove_listener(&mut self, listener: ListenerId);

    fn create_observer(&mut self, options: &ObserverOptions) -> ObserverId;

    /// Start observing; the host reports the element's current state once
    fn observe(&mut self, observer: ObserverId, element: ElementId);

    fn unobserve(&mut self, observer: ObserverId, element: ElementId);
}
