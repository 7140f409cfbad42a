//! In-memory host
//!
//! A deterministic page model for tests and headless runs. Elements are
//! document-space rects with a class list; the host records every write the
//! components make and queues notifications until [`HeadlessHost::take_events`]
//! drains them.
//!
//! Intersection model: the root is the viewport at the current scroll offset,
//! adjusted by the observer's root margin. An element intersects when it
//! overlaps the root and its visible ratio reaches the threshold. Entries are
//! produced when that state changes, plus one initial entry per `observe`.

use std::collections::VecDeque;

use drift_core::events::event_types;
use drift_core::{ElementId, Event, EventType, ListenerId, ObserverId, Point, Rect, Size, TouchPoint};
use slotmap::SlotMap;

use crate::host::{Host, HostEvent, IntersectionEntry, ObserverOptions};

/// Milliseconds between headless frames (60 Hz)
pub const FRAME_INTERVAL_MS: f64 = 1000.0 / 60.0;

/// A recorded class mutation
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClassChange {
    pub element: ElementId,
    pub class: String,
    pub added: bool,
}

#[derive(Clone, Debug, Default)]
struct HeadlessElement {
    classes: Vec<String>,
    rect: Rect,
    placement: Option<Point>,
    translation: Option<Point>,
    transition_delay_ms: Option<u32>,
}

struct HeadlessObserver {
    options: ObserverOptions,
    /// Observed elements with the last state reported to the app
    targets: Vec<(ElementId, Option<bool>)>,
}

/// In-memory [`Host`] implementation
pub struct HeadlessHost {
    viewport: Size,
    scroll_y: f32,
    reduced_motion: bool,
    fragment: Option<String>,
    elements: SlotMap<ElementId, HeadlessElement>,
    listeners: SlotMap<ListenerId, EventType>,
    observers: SlotMap<ObserverId, HeadlessObserver>,
    queue: VecDeque<HostEvent>,
    frame_requested: bool,
    frames_delivered: u64,
    clock_ms: f64,
    class_history: Vec<ClassChange>,
}

impl HeadlessHost {
    pub fn new(viewport: Size) -> Self {
        Self {
            viewport,
            scroll_y: 0.0,
            reduced_motion: false,
            fragment: None,
            elements: SlotMap::with_key(),
            listeners: SlotMap::with_key(),
            observers: SlotMap::with_key(),
            queue: VecDeque::new(),
            frame_requested: false,
            frames_delivered: 0,
            clock_ms: 0.0,
            class_history: Vec::new(),
        }
    }

    pub fn with_reduced_motion(mut self, reduced_motion: bool) -> Self {
        self.reduced_motion = reduced_motion;
        self
    }

    pub fn with_fragment(mut self, fragment: impl Into<String>) -> Self {
        let fragment = fragment.into();
        self.fragment = (!fragment.is_empty()).then_some(fragment);
        self
    }

    /// Initial scroll offset, set before the page is ready (no event fired)
    pub fn with_scroll_y(mut self, scroll_y: f32) -> Self {
        self.scroll_y = scroll_y;
        self
    }

    /// Add an element with the given classes at a document-space rect
    pub fn add_element<S: AsRef<str>>(&mut self, classes: &[S], rect: Rect) -> ElementId {
        self.elements.insert(HeadlessElement {
            classes: classes.iter().map(|c| c.as_ref().to_string()).collect(),
            rect,
            ..Default::default()
        })
    }

    /// Move or resize an element in the document
    pub fn set_element_rect(&mut self, element: ElementId, rect: Rect) {
        if let Some(el) = self.elements.get_mut(element) {
            el.rect = rect;
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Input simulation
    // ─────────────────────────────────────────────────────────────────────

    pub fn pointer_move(&mut self, x: f32, y: f32) {
        self.dispatch(Event::pointer_move(x, y));
    }

    pub fn touch_move(&mut self, touches: &[TouchPoint]) {
        self.dispatch(Event::touch_move(touches.iter().copied()));
    }

    /// Scroll to an absolute offset and fire `scroll`
    pub fn scroll_to(&mut self, scroll_y: f32) {
        self.scroll_y = scroll_y.max(0.0);
        self.dispatch(Event::scroll(self.scroll_y));
    }

    /// Fire `wheel` without moving the page
    pub fn wheel(&mut self, delta_y: f32) {
        self.dispatch(Event::wheel(delta_y));
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport = Size::new(width, height);
        self.dispatch(Event::resize(width, height));
    }

    /// Advance the clock by one frame, delivering a frame if one was requested.
    ///
    /// Returns whether a frame was delivered.
    pub fn advance_frame(&mut self) -> bool {
        self.clock_ms += FRAME_INTERVAL_MS;
        if !std::mem::take(&mut self.frame_requested) {
            return false;
        }
        self.frames_delivered += 1;
        self.queue.push_back(HostEvent::Frame {
            timestamp: self.clock_ms,
        });
        true
    }

    /// Drain queued notifications, followed by any intersection changes
    pub fn take_events(&mut self) -> Vec<HostEvent> {
        let mut events: Vec<HostEvent> = self.queue.drain(..).collect();
        events.extend(self.collect_intersections());
        events
    }

    fn dispatch(&mut self, event: Event) {
        let event = Event {
            timestamp: self.clock_ms,
            ..event
        };
        for (listener, event_type) in self.listeners.iter() {
            if *event_type == event.event_type {
                self.queue.push_back(HostEvent::Input {
                    listener,
                    event: event.clone(),
                });
            }
        }
    }

    fn root_rect(&self) -> Rect {
        Rect::new(0.0, self.scroll_y, self.viewport.width, self.viewport.height)
    }

    fn collect_intersections(&mut self) -> Vec<HostEvent> {
        let viewport = self.root_rect();
        let mut events = Vec::new();
        for (observer_id, observer) in self.observers.iter_mut() {
            let root = observer.options.root_margin.apply(&viewport);
            let threshold = observer.options.threshold;
            let mut entries = Vec::new();
            for (target, last) in observer.targets.iter_mut() {
                let Some(el) = self.elements.get(*target) else {
                    continue;
                };
                let ratio = el.rect.visible_ratio(&root);
                let is_intersecting = el.rect.intersection(&root).is_some() && ratio >= threshold;
                if *last != Some(is_intersecting) {
                    *last = Some(is_intersecting);
                    entries.push(IntersectionEntry {
                        target: *target,
                        is_intersecting,
                        ratio,
                    });
                }
            }
            if !entries.is_empty() {
                events.push(HostEvent::Intersection {
                    observer: observer_id,
                    entries,
                });
            }
        }
        events
    }

    // ─────────────────────────────────────────────────────────────────────
    // Inspection
    // ─────────────────────────────────────────────────────────────────────

    pub fn has_class(&self, element: ElementId, class: &str) -> bool {
        self.elements
            .get(element)
            .is_some_and(|el| el.classes.iter().any(|c| c == class))
    }

    pub fn placement(&self, element: ElementId) -> Option<Point> {
        self.elements.get(element).and_then(|el| el.placement)
    }

    pub fn translation(&self, element: ElementId) -> Option<Point> {
        self.elements.get(element).and_then(|el| el.translation)
    }

    pub fn transition_delay(&self, element: ElementId) -> Option<u32> {
        self.elements.get(element).and_then(|el| el.transition_delay_ms)
    }

    pub fn element_rect(&self, element: ElementId) -> Option<Rect> {
        self.elements.get(element).map(|el| el.rect)
    }

    /// Every class add/remove the components performed, in order
    pub fn class_history(&self) -> &[ClassChange] {
        &self.class_history
    }

    /// How many times `class` was added to `element`
    pub fn class_add_count(&self, element: ElementId, class: &str) -> usize {
        self.class_history
            .iter()
            .filter(|c| c.element == element && c.class == class && c.added)
            .count()
    }

    pub fn listener_count(&self, event_type: EventType) -> usize {
        self.listeners
            .values()
            .filter(|t| **t == event_type)
            .count()
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// Number of elements currently observed by an observer
    pub fn observed_count(&self, observer: ObserverId) -> usize {
        self.observers
            .get(observer)
            .map_or(0, |o| o.targets.len())
    }

    /// Number of (observer, element) observations across all observers
    pub fn total_observations(&self) -> usize {
        self.observers.values().map(|o| o.targets.len()).sum()
    }

    pub fn frame_requested(&self) -> bool {
        self.frame_requested
    }

    pub fn frames_delivered(&self) -> u64 {
        self.frames_delivered
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.clock_ms
    }

    /// Elements in insertion order, for scenario lookups
    pub fn elements(&self) -> impl Iterator<Item = ElementId> + '_ {
        self.elements.keys()
    }
}

impl Host for HeadlessHost {
    fn viewport(&self) -> Size {
        self.viewport
    }

    fn scroll_y(&self) -> f32 {
        self.scroll_y
    }

    fn location_fragment(&self) -> Option<String> {
        self.fragment.clone()
    }

    fn prefers_reduced_motion(&self) -> bool {
        self.reduced_motion
    }

    fn query_marked(&mut self, marker: &str) -> Vec<ElementId> {
        self.elements
            .iter()
            .filter(|(_, el)| el.classes.iter().any(|c| c == marker))
            .map(|(id, _)| id)
            .collect()
    }

    fn bounding_width(&self, element: ElementId) -> f32 {
        self.elements.get(element).map_or(0.0, |el| el.rect.width())
    }

    fn set_placement(&mut self, element: ElementId, position: Point) {
        if let Some(el) = self.elements.get_mut(element) {
            el.placement = Some(position);
        }
    }

    fn set_translation(&mut self, element: ElementId, offset: Point) {
        if let Some(el) = self.elements.get_mut(element) {
            el.translation = Some(offset);
        }
    }

    fn add_class(&mut self, element: ElementId, class: &str) {
        let Some(el) = self.elements.get_mut(element) else {
            return;
        };
        if !el.classes.iter().any(|c| c == class) {
            el.classes.push(class.to_string());
        }
        self.class_history.push(ClassChange {
            element,
            class: class.to_string(),
            added: true,
        });
    }

    fn remove_class(&mut self, element: ElementId, class: &str) {
        let Some(el) = self.elements.get_mut(element) else {
            return;
        };
        el.classes.retain(|c| c != class);
        self.class_history.push(ClassChange {
            element,
            class: class.to_string(),
            added: false,
        });
    }

    fn set_transition_delay(&mut self, element: ElementId, delay_ms: u32) {
        if let Some(el) = self.elements.get_mut(element) {
            el.transition_delay_ms = Some(delay_ms);
        }
    }

    fn request_frame(&mut self) {
        self.frame_requested = true;
    }

    fn add_listener(&mut self, event_type: EventType) -> ListenerId {
        tracing::trace!(event = event_types::name(event_type), "listener added");
        self.listeners.insert(event_type)
    }

    fn remove_listener(&mut self, listener: ListenerId) {
        if let Some(event_type) = self.listeners.remove(listener) {
            tracing::trace!(event = event_types::name(event_type), "listener removed");
        }
    }

    fn create_observer(&mut self, options: &ObserverOptions) -> ObserverId {
        self.observers.insert(HeadlessObserver {
            options: *options,
            targets: Vec::new(),
        })
    }

    fn observe(&mut self, observer: ObserverId, element: ElementId) {
        let Some(obs) = self.observers.get_mut(observer) else {
            return;
        };
        if !obs.targets.iter().any(|(id, _)| *id == element) {
            obs.targets.push((element, None));
        }
    }

    fn unobserve(&mut self, observer: ObserverId, element: ElementId) {
        if let Some(obs) = self.observers.get_mut(observer) {
            obs.targets.retain(|(id, _)| *id != element);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::margin::{Length, RootMargin};

    fn page() -> (HeadlessHost, ElementId, ElementId) {
        let mut host = HeadlessHost::new(Size::new(800.0, 600.0));
        let above = host.add_element(&["reveal"], Rect::new(0.0, 100.0, 200.0, 100.0));
        let below = host.add_element(&["reveal"], Rect::new(0.0, 1200.0, 200.0, 100.0));
        (host, above, below)
    }

    #[test]
    fn test_query_marked_preserves_order() {
        let (mut host, above, below) = page();
        host.add_element(&["project-card"], Rect::new(0.0, 0.0, 10.0, 10.0));
        assert_eq!(host.query_marked("reveal"), vec![above, below]);
    }

    #[test]
    fn test_listener_delivery() {
        let (mut host, _, _) = page();
        let scroll = host.add_listener(event_types::SCROLL);
        host.wheel(10.0);
        assert!(host.take_events().is_empty());

        host.scroll_to(50.0);
        let events = host.take_events();
        assert_eq!(events.len(), 1);
        assert!(matches!(events[0], HostEvent::Input { listener, .. } if listener == scroll));

        host.remove_listener(scroll);
        host.scroll_to(60.0);
        assert!(host.take_events().is_empty());
    }

    #[test]
    fn test_frames_only_when_requested() {
        let (mut host, _, _) = page();
        assert!(!host.advance_frame());
        host.request_frame();
        assert!(host.advance_frame());
        assert!(!host.advance_frame());
        assert_eq!(host.frames_delivered(), 1);
    }

    #[test]
    fn test_initial_and_changed_intersections() {
        let (mut host, above, below) = page();
        let observer = host.create_observer(&ObserverOptions::threshold(0.1));
        host.observe(observer, above);
        host.observe(observer, below);

        let events = host.take_events();
        let HostEvent::Intersection { entries, .. } = &events[0] else {
            panic!("expected intersection event");
        };
        assert_eq!(entries.len(), 2);
        assert!(entries[0].is_intersecting);
        assert!(!entries[1].is_intersecting);

        // Nothing changed, nothing reported
        assert!(host.take_events().is_empty());

        host.scroll_to(1000.0);
        let events = host.take_events();
        let HostEvent::Intersection { entries, .. } = &events[0] else {
            panic!("expected intersection event");
        };
        assert_eq!(entries.len(), 2);
        assert!(!entries.iter().find(|e| e.target == above).unwrap().is_intersecting);
        assert!(entries.iter().find(|e| e.target == below).unwrap().is_intersecting);
    }

    #[test]
    fn test_root_margin_delays_intersection() {
        let mut host = HeadlessHost::new(Size::new(800.0, 1000.0));
        // Top edge 50px above the viewport bottom: 50% visible without margin
        let el = host.add_element(&["reveal"], Rect::new(0.0, 950.0, 100.0, 100.0));
        let margin = RootMargin::bottom(Length::Percent(-10.0));
        let observer = host.create_observer(&ObserverOptions::new(margin, 0.1));
        host.observe(observer, el);

        let events = host.take_events();
        let HostEvent::Intersection { entries, .. } = &events[0] else {
            panic!("expected intersection event");
        };
        assert!(!entries[0].is_intersecting);
    }

    #[test]
    fn test_unobserve_stops_reports() {
        let (mut host, above, _) = page();
        let observer = host.create_observer(&ObserverOptions::threshold(0.2));
        host.observe(observer, above);
        host.unobserve(observer, above);
        assert!(host.take_events().is_empty());
        assert_eq!(host.observed_count(observer), 0);
    }
}
