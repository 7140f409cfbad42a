//! Animation driver
//!
//! Owns the blob shapes and advances them once per host frame. The first
//! blob-marked element becomes the pointer follower, every other one a
//! floating body. Each frame requests its successor before touching any body,
//! so the loop keeps running for the lifetime of the page.

use drift_core::events::event_types;
use drift_core::{ElementId, Event, ListenerId, Point, StateMachine};
use drift_platform::Host;
use fastrand::Rng;
use smallvec::SmallVec;

use crate::config::MotionConfig;
use crate::floating::FloatingBody;
use crate::follower::PointerFollower;

/// Driver lifecycle
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DriverState {
    Idle,
    Running,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum DriverEvent {
    Start,
}

/// A body bound to the element it moves
#[derive(Clone, Debug)]
pub struct Tracked<T> {
    pub element: ElementId,
    pub body: T,
}

/// The per-frame scheduler for blob motion
pub struct AnimationDriver {
    state: StateMachine<DriverState, DriverEvent>,
    follower: Option<Tracked<PointerFollower>>,
    bodies: Vec<Tracked<FloatingBody>>,
    listeners: SmallVec<[ListenerId; 3]>,
    frames: u64,
}

impl AnimationDriver {
    pub fn new() -> Self {
        Self {
            state: StateMachine::builder(DriverState::Idle)
                .on(DriverState::Idle, DriverEvent::Start, DriverState::Running)
                .build(),
            follower: None,
            bodies: Vec::new(),
            listeners: SmallVec::new(),
            frames: 0,
        }
    }

    /// Collect blob elements, build their bodies and schedule the first frame.
    ///
    /// Without any blob element the driver stays idle. Returns whether this
    /// call started the loop.
    pub fn start<H: Host + ?Sized>(&mut self, host: &mut H, config: &MotionConfig, rng: &mut Rng) -> bool {
        if !self.state.can_send(DriverEvent::Start) {
            return false;
        }

        let blobs = host.query_marked(&config.blob_marker);
        let Some((&lead, rest)) = blobs.split_first() else {
            tracing::debug!(marker = %config.blob_marker, "no blob elements, motion stays idle");
            return false;
        };

        let viewport = host.viewport();

        // Anchor the follower at the origin so its translation is absolute
        host.set_placement(lead, Point::ZERO);
        let follower = PointerFollower::initialize(config, host.bounding_width(lead), viewport);
        self.follower = Some(Tracked {
            element: lead,
            body: follower,
        });
        for event_type in [
            event_types::POINTER_MOVE,
            event_types::TOUCH_MOVE,
            event_types::RESIZE,
        ] {
            self.listeners.push(host.add_listener(event_type));
        }

        self.bodies = rest
            .iter()
            .map(|&element| {
                let body = FloatingBody::initialize(rng, config, host.bounding_width(element), viewport);
                host.set_placement(element, body.initial());
                Tracked { element, body }
            })
            .collect();

        self.state.send(DriverEvent::Start);
        host.request_frame();
        tracing::debug!(floating = self.bodies.len(), "motion driver running");
        true
    }

    /// Advance every body one frame and write the resulting translations
    pub fn on_frame<H: Host + ?Sized>(&mut self, host: &mut H) {
        if !self.is_running() {
            return;
        }
        host.request_frame();
        self.frames += 1;

        let viewport = host.viewport();
        if let Some(follower) = self.follower.as_mut() {
            let position = follower.body.advance();
            host.set_translation(follower.element, position);
        }
        for tracked in self.bodies.iter_mut() {
            let offset = tracked.body.advance(viewport);
            host.set_translation(tracked.element, offset);
        }
        tracing::trace!(frame = self.frames, "motion frame");
    }

    /// Route input delivered to one of the driver's listeners.
    ///
    /// Returns `false` when the listener belongs to someone else.
    pub fn on_input<H: Host + ?Sized>(&mut self, host: &mut H, listener: ListenerId, event: &Event) -> bool {
        if !self.listeners.contains(&listener) {
            return false;
        }
        let Some(follower) = self.follower.as_mut() else {
            return true;
        };
        if event.event_type == event_types::RESIZE {
            follower.body.on_resize(host.bounding_width(follower.element));
        } else {
            follower.body.handle_event(event);
        }
        true
    }

    pub fn state(&self) -> DriverState {
        self.state.current_state()
    }

    pub fn is_running(&self) -> bool {
        self.state.is_in(DriverState::Running)
    }

    pub fn follower(&self) -> Option<&Tracked<PointerFollower>> {
        self.follower.as_ref()
    }

    /// Floating bodies in page order
    pub fn bodies(&self) -> &[Tracked<FloatingBody>] {
        &self.bodies
    }

    /// Frames advanced since start
    pub fn frame_count(&self) -> u64 {
        self.frames
    }
}

impl Default for AnimationDriver {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use drift_core::{Rect, Size};
    use drift_platform::{HeadlessHost, HostEvent};

    fn page(blobs: usize) -> (HeadlessHost, Vec<ElementId>) {
        let mut host = HeadlessHost::new(Size::new(1024.0, 768.0));
        let ids = (0..blobs)
            .map(|i| host.add_element(&["blob"], Rect::new(0.0, 0.0, 60.0 + i as f32 * 10.0, 60.0)))
            .collect();
        (host, ids)
    }

    fn seeded() -> Rng {
        Rng::with_seed(5)
    }

    #[test]
    fn test_no_blobs_stays_idle() {
        let (mut host, _) = page(0);
        let mut driver = AnimationDriver::new();
        assert!(!driver.start(&mut host, &MotionConfig::default(), &mut seeded()));
        assert_eq!(driver.state(), DriverState::Idle);
        assert!(!host.frame_requested());
        assert_eq!(host.listener_count(event_types::POINTER_MOVE), 0);
    }

    #[test]
    fn test_start_splits_follower_and_bodies() {
        let (mut host, ids) = page(4);
        let mut driver = AnimationDriver::new();
        assert!(driver.start(&mut host, &MotionConfig::default(), &mut seeded()));

        assert!(driver.is_running());
        assert!(host.frame_requested());
        let follower = driver.follower().unwrap();
        assert_eq!(follower.element, ids[0]);
        assert_eq!(follower.body.size(), 60.0);
        assert_eq!(host.placement(ids[0]), Some(Point::ZERO));

        let elements: Vec<_> = driver.bodies().iter().map(|t| t.element).collect();
        assert_eq!(elements, ids[1..].to_vec());
        for tracked in driver.bodies() {
            assert_eq!(host.placement(tracked.element), Some(tracked.body.initial()));
        }
    }

    #[test]
    fn test_start_twice_is_noop() {
        let (mut host, _) = page(2);
        let mut driver = AnimationDriver::new();
        let config = MotionConfig::default();
        assert!(driver.start(&mut host, &config, &mut seeded()));
        assert!(!driver.start(&mut host, &config, &mut seeded()));
        assert_eq!(host.listener_count(event_types::POINTER_MOVE), 1);
        assert_eq!(driver.bodies().len(), 1);
    }

    #[test]
    fn test_frame_reschedules_and_translates() {
        let (mut host, ids) = page(3);
        let mut driver = AnimationDriver::new();
        driver.start(&mut host, &MotionConfig::default(), &mut seeded());

        for _ in 0..10 {
            assert!(host.advance_frame());
            for event in host.take_events() {
                if let HostEvent::Frame { .. } = event {
                    driver.on_frame(&mut host);
                }
            }
        }
        assert_eq!(driver.frame_count(), 10);
        assert!(host.frame_requested());
        for id in &ids {
            assert!(host.translation(*id).is_some());
        }
    }

    #[test]
    fn test_pointer_and_resize_reach_follower() {
        let (mut host, ids) = page(1);
        let mut driver = AnimationDriver::new();
        driver.start(&mut host, &MotionConfig::default(), &mut seeded());

        host.pointer_move(100.0, 200.0);
        host.set_element_rect(ids[0], Rect::new(0.0, 0.0, 90.0, 90.0));
        host.resize(640.0, 480.0);
        for event in host.take_events() {
            if let HostEvent::Input { listener, event } = event {
                assert!(driver.on_input(&mut host, listener, &event));
            }
        }
        let follower = &driver.follower().unwrap().body;
        assert_eq!(follower.target(), Point::new(100.0, 200.0));
        assert_eq!(follower.size(), 90.0);
    }

    #[test]
    fn test_foreign_listener_ignored() {
        let (mut host, _) = page(1);
        let mut driver = AnimationDriver::new();
        driver.start(&mut host, &MotionConfig::default(), &mut seeded());
        let foreign = host.add_listener(event_types::SCROLL);
        assert!(!driver.on_input(&mut host, foreign, &Event::scroll(10.0)));
    }
}
