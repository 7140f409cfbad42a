//! Scroll-armed reveal
//!
//! Reveal elements get the in-view class while they intersect the viewport and
//! lose it when they leave, so the effect replays on every pass. Observation
//! is deferred until the visitor shows intent to scroll, which keeps content
//! above the fold from animating on load.
//!
//! ```text
//!            ReduceMotion
//!   Unarmed ─────────────▶ Static   (all in view, nothing observed)
//!      │
//!      │ Arm (scroll, wheel, touchmove, initial offset, URL fragment)
//!      ▼
//!    Armed   (observer attached, intent listeners removed)
//! ```

use drift_core::events::event_types;
use drift_core::{ElementId, Event, ListenerId, ObserverId, StateMachine};
use drift_platform::{Host, IntersectionEntry};
use smallvec::SmallVec;

use crate::config::RevealConfig;

/// Controller lifecycle
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RevealPhase {
    /// Waiting for scroll intent
    Unarmed,
    /// Observing intersections
    Armed,
    /// Reduced motion: everything shown, nothing observed
    Static,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum RevealSignal {
    Arm,
    ReduceMotion,
}

/// Toggles the in-view class on reveal elements
pub struct RevealController {
    config: RevealConfig,
    phase: StateMachine<RevealPhase, RevealSignal>,
    elements: Vec<ElementId>,
    listeners: SmallVec<[ListenerId; 3]>,
    observer: Option<ObserverId>,
    last_scroll_y: f32,
}

impl RevealController {
    /// Collect reveal elements and either show them (reduced motion) or start
    /// listening for scroll intent. Arms immediately when the page is already
    /// scrolled or the URL carries a fragment.
    pub fn attach<H: Host + ?Sized>(host: &mut H, config: RevealConfig) -> Self {
        let elements = host.query_marked(&config.marker);
        let mut controller = Self {
            phase: StateMachine::builder(RevealPhase::Unarmed)
                .on(RevealPhase::Unarmed, RevealSignal::Arm, RevealPhase::Armed)
                .on(
                    RevealPhase::Unarmed,
                    RevealSignal::ReduceMotion,
                    RevealPhase::Static,
                )
                .build(),
            elements,
            listeners: SmallVec::new(),
            observer: None,
            last_scroll_y: host.scroll_y(),
            config,
        };

        if host.prefers_reduced_motion() {
            for &element in &controller.elements {
                host.add_class(element, &controller.config.in_view_class);
            }
            controller.phase.send(RevealSignal::ReduceMotion);
            tracing::debug!(
                elements = controller.elements.len(),
                "reduced motion preferred, reveal elements shown statically"
            );
            return controller;
        }

        for event_type in [
            event_types::SCROLL,
            event_types::WHEEL,
            event_types::TOUCH_MOVE,
        ] {
            controller.listeners.push(host.add_listener(event_type));
        }

        if host.location_fragment().is_some() || host.scroll_y() > 0.0 {
            controller.arm(host);
        }
        controller
    }

    /// Attach the observer to every reveal element and drop the intent
    /// listeners. Only the first call from the unarmed phase has any effect.
    pub fn arm<H: Host + ?Sized>(&mut self, host: &mut H) -> bool {
        if !self.phase.can_send(RevealSignal::Arm) {
            return false;
        }
        self.phase.send(RevealSignal::Arm);

        let observer = host.create_observer(&self.config.observer_options());
        for &element in &self.elements {
            host.observe(observer, element);
        }
        self.observer = Some(observer);

        for listener in self.listeners.drain(..) {
            host.remove_listener(listener);
        }
        tracing::debug!(elements = self.elements.len(), "reveal observer armed");
        true
    }

    /// Route a scroll-intent event. Returns `false` for foreign listeners.
    pub fn on_input<H: Host + ?Sized>(&mut self, host: &mut H, listener: ListenerId, event: &Event) -> bool {
        if !self.listeners.contains(&listener) {
            return false;
        }
        if !self.config.arm_on_scroll_progress {
            self.arm(host);
            return true;
        }

        let now = host.scroll_y();
        if now > self.last_scroll_y || now > 0.0 {
            self.arm(host);
        } else {
            tracing::trace!(
                event = event_types::name(event.event_type),
                "scroll intent without progress"
            );
        }
        self.last_scroll_y = now;
        true
    }

    /// Mirror intersection state onto the in-view class. Returns `false` for
    /// foreign observers.
    pub fn on_intersection<H: Host + ?Sized>(
        &mut self,
        host: &mut H,
        observer: ObserverId,
        entries: &[IntersectionEntry],
    ) -> bool {
        if self.observer != Some(observer) {
            return false;
        }
        for entry in entries {
            if entry.is_intersecting {
                host.add_class(entry.target, &self.config.in_view_class);
            } else {
                host.remove_class(entry.target, &self.config.in_view_class);
            }
        }
        true
    }

    pub fn phase(&self) -> RevealPhase {
        self.phase.current_state()
    }

    pub fn is_armed(&self) -> bool {
        self.phase.is_in(RevealPhase::Armed)
    }

    pub fn observer(&self) -> Option<ObserverId> {
        self.observer
    }

    pub fn elements(&self) -> &[ElementId] {
        &self.elements
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use drift_core::{Rect, Size};
    use drift_platform::{HeadlessHost, HostEvent};

    const IN_VIEW: &str = "in-view";

    fn page() -> (HeadlessHost, ElementId, ElementId) {
        let mut host = HeadlessHost::new(Size::new(800.0, 600.0));
        let top = host.add_element(&["reveal"], Rect::new(0.0, 50.0, 400.0, 200.0));
        let bottom = host.add_element(&["reveal"], Rect::new(0.0, 1500.0, 400.0, 200.0));
        (host, top, bottom)
    }

    fn pump(host: &mut HeadlessHost, reveal: &mut RevealController) {
        loop {
            let events = host.take_events();
            if events.is_empty() {
                break;
            }
            for event in events {
                match event {
                    HostEvent::Input { listener, event } => {
                        reveal.on_input(host, listener, &event);
                    }
                    HostEvent::Intersection { observer, entries } => {
                        reveal.on_intersection(host, observer, &entries);
                    }
                    HostEvent::Frame { .. } => {}
                }
            }
        }
    }

    #[test]
    fn test_reduced_motion_shows_everything() {
        let (host, top, bottom) = page();
        let mut host = host.with_reduced_motion(true);
        let mut reveal = RevealController::attach(&mut host, RevealConfig::default());

        assert_eq!(reveal.phase(), RevealPhase::Static);
        assert!(host.has_class(top, IN_VIEW));
        assert!(host.has_class(bottom, IN_VIEW));
        assert_eq!(host.observer_count(), 0);
        assert_eq!(host.listener_count(event_types::SCROLL), 0);

        assert!(!reveal.arm(&mut host));
        assert_eq!(host.observer_count(), 0);
    }

    #[test]
    fn test_no_toggles_before_scroll_intent() {
        let (mut host, top, bottom) = page();
        let mut reveal = RevealController::attach(&mut host, RevealConfig::default());
        pump(&mut host, &mut reveal);

        assert_eq!(reveal.phase(), RevealPhase::Unarmed);
        assert!(host.class_history().is_empty());
        assert!(!host.has_class(top, IN_VIEW));
        assert!(!host.has_class(bottom, IN_VIEW));
        assert_eq!(host.listener_count(event_types::SCROLL), 1);
        assert_eq!(host.listener_count(event_types::WHEEL), 1);
        assert_eq!(host.listener_count(event_types::TOUCH_MOVE), 1);
    }

    #[test]
    fn test_wheel_arms_and_removes_listeners() {
        let (mut host, top, bottom) = page();
        let mut reveal = RevealController::attach(&mut host, RevealConfig::default());
        host.wheel(40.0);
        pump(&mut host, &mut reveal);

        assert!(reveal.is_armed());
        assert_eq!(host.listener_count(event_types::SCROLL), 0);
        assert_eq!(host.listener_count(event_types::WHEEL), 0);
        assert_eq!(host.listener_count(event_types::TOUCH_MOVE), 0);
        assert!(host.has_class(top, IN_VIEW));
        assert!(!host.has_class(bottom, IN_VIEW));
    }

    #[test]
    fn test_toggle_replays_on_every_pass() {
        let (mut host, top, bottom) = page();
        let mut reveal = RevealController::attach(&mut host, RevealConfig::default());
        host.scroll_to(10.0);
        pump(&mut host, &mut reveal);
        assert!(host.has_class(top, IN_VIEW));

        host.scroll_to(1400.0);
        pump(&mut host, &mut reveal);
        assert!(!host.has_class(top, IN_VIEW));
        assert!(host.has_class(bottom, IN_VIEW));

        host.scroll_to(0.0);
        pump(&mut host, &mut reveal);
        assert!(host.has_class(top, IN_VIEW));
        assert!(!host.has_class(bottom, IN_VIEW));
        assert_eq!(host.class_add_count(top, IN_VIEW), 2);
    }

    #[test]
    fn test_arm_twice_observes_once() {
        let (mut host, _, _) = page();
        let mut reveal = RevealController::attach(&mut host, RevealConfig::default());
        assert!(reveal.arm(&mut host));
        assert!(!reveal.arm(&mut host));
        assert_eq!(host.observer_count(), 1);
        assert_eq!(host.total_observations(), 2);
    }

    #[test]
    fn test_initial_offset_arms_immediately() {
        let (host, _, _) = page();
        let mut host = host.with_scroll_y(300.0);
        let reveal = RevealController::attach(&mut host, RevealConfig::default());
        assert!(reveal.is_armed());
        assert_eq!(host.listener_count(event_types::SCROLL), 0);
    }

    #[test]
    fn test_fragment_arms_immediately() {
        let (host, _, _) = page();
        let mut host = host.with_fragment("projects");
        let reveal = RevealController::attach(&mut host, RevealConfig::default());
        assert!(reveal.is_armed());
    }

    #[test]
    fn test_scroll_progress_gating() {
        let (mut host, _, _) = page();
        let config = RevealConfig {
            arm_on_scroll_progress: true,
            ..Default::default()
        };
        let mut reveal = RevealController::attach(&mut host, config);

        host.wheel(-20.0);
        pump(&mut host, &mut reveal);
        assert!(!reveal.is_armed());

        host.scroll_to(5.0);
        pump(&mut host, &mut reveal);
        assert!(reveal.is_armed());
    }

    #[test]
    fn test_foreign_events_are_declined() {
        let (mut host, _, _) = page();
        let mut reveal = RevealController::attach(&mut host, RevealConfig::default());
        let foreign = host.add_listener(event_types::POINTER_MOVE);
        assert!(!reveal.on_input(&mut host, foreign, &Event::pointer_move(1.0, 1.0)));
        let other = host.create_observer(&drift_platform::ObserverOptions::threshold(0.5));
        assert!(!reveal.on_intersection(&mut host, other, &[]));
        assert!(!reveal.is_armed());
    }
}
