//! Page-level wiring
//!
//! [`DriftApp`] owns one instance of each component and routes host events to
//! whichever of them registered the listener or observer the event names.

use drift_animation::AnimationDriver;
use drift_platform::{HeadlessHost, Host, HostEvent};
use drift_reveal::{RevealController, StaggeredRevealController};
use fastrand::Rng;

use crate::config::DriftConfig;
use crate::error::Result;

/// Decorative motion and reveal effects for one page
pub struct DriftApp {
    config: DriftConfig,
    rng: Rng,
    driver: AnimationDriver,
    reveal: Option<RevealController>,
    cards: Option<StaggeredRevealController>,
}

impl DriftApp {
    /// Create an app with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(DriftConfig::default())
    }

    /// Create an app with custom configuration
    pub fn with_config(config: DriftConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            rng: config.motion.rng(),
            config,
            driver: AnimationDriver::new(),
            reveal: None,
            cards: None,
        })
    }

    /// Start blob motion. Runs once the page has loaded its shapes.
    pub fn page_ready<H: Host + ?Sized>(&mut self, host: &mut H) {
        self.driver.start(host, &self.config.motion, &mut self.rng);
    }

    /// Attach both reveal controllers. Repeated calls are no-ops.
    pub fn document_ready<H: Host + ?Sized>(&mut self, host: &mut H) {
        if self.reveal.is_none() {
            self.reveal = Some(RevealController::attach(host, self.config.reveal.clone()));
        }
        if self.cards.is_none() {
            self.cards = Some(StaggeredRevealController::attach(
                host,
                self.config.stagger.clone(),
            ));
        }
    }

    /// Page and document ready in one step
    pub fn start<H: Host + ?Sized>(&mut self, host: &mut H) {
        self.page_ready(host);
        self.document_ready(host);
        tracing::info!(
            running = self.driver.is_running(),
            "drift started"
        );
    }

    /// Dispatch one host event to its owner
    pub fn handle_event<H: Host + ?Sized>(&mut self, host: &mut H, event: HostEvent) {
        match event {
            HostEvent::Frame { .. } => self.driver.on_frame(host),
            HostEvent::Input { listener, event } => {
                if self.driver.on_input(host, listener, &event) {
                    return;
                }
                let handled = self
                    .reveal
                    .as_mut()
                    .is_some_and(|reveal| reveal.on_input(host, listener, &event));
                if !handled {
                    tracing::trace!(?listener, "input for unknown listener dropped");
                }
            }
            HostEvent::Intersection { observer, entries } => {
                if let Some(reveal) = self.reveal.as_mut() {
                    if reveal.on_intersection(host, observer, &entries) {
                        return;
                    }
                }
                let handled = self
                    .cards
                    .as_mut()
                    .is_some_and(|cards| cards.on_intersection(host, observer, &entries));
                if !handled {
                    tracing::trace!(?observer, "entries for unknown observer dropped");
                }
            }
        }
    }

    /// Drain the headless host until it has nothing left to deliver.
    ///
    /// Handling an event can queue more (arming produces initial intersection
    /// entries), so this loops until the queue stays empty. Returns the number
    /// of events handled.
    pub fn pump(&mut self, host: &mut HeadlessHost) -> usize {
        let mut handled = 0;
        loop {
            let events = host.take_events();
            if events.is_empty() {
                return handled;
            }
            handled += events.len();
            for event in events {
                self.handle_event(host, event);
            }
        }
    }

    pub fn config(&self) -> &DriftConfig {
        &self.config
    }

    pub fn driver(&self) -> &AnimationDriver {
        &self.driver
    }

    pub fn reveal(&self) -> Option<&RevealController> {
        self.reveal.as_ref()
    }

    pub fn cards(&self) -> Option<&StaggeredRevealController> {
        self.cards.as_ref()
    }
}
