//! Staggered card reveal
//!
//! Cards fade in once, the first time they become visible, each delayed by
//! its position on the page so a row entering together cascades. A revealed
//! card is unobserved and never reverts.

use drift_core::{ElementId, ObserverId};
use drift_platform::{Host, IntersectionEntry, ObserverOptions};
use rustc_hash::FxHashMap;

use crate::config::StaggerConfig;

/// Per-card reveal state
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CardState {
    Pending,
    Revealed,
}

/// One-shot, order-delayed fade-in for card elements
pub struct StaggeredRevealController {
    config: StaggerConfig,
    observer: ObserverId,
    cards: Vec<ElementId>,
    states: FxHashMap<ElementId, CardState>,
}

impl StaggeredRevealController {
    /// Observe every card on the page
    pub fn attach<H: Host + ?Sized>(host: &mut H, config: StaggerConfig) -> Self {
        let cards = host.query_marked(&config.marker);
        let observer = host.create_observer(&ObserverOptions::threshold(config.threshold));
        for &card in &cards {
            host.observe(observer, card);
        }
        let states = cards.iter().map(|&card| (card, CardState::Pending)).collect();
        tracing::debug!(cards = cards.len(), "card observer attached");

        Self {
            config,
            observer,
            cards,
            states,
        }
    }

    /// Reveal cards entering the viewport for the first time. Returns `false`
    /// for foreign observers.
    pub fn on_intersection<H: Host + ?Sized>(
        &mut self,
        host: &mut H,
        observer: ObserverId,
        entries: &[IntersectionEntry],
    ) -> bool {
        if observer != self.observer {
            return false;
        }
        for entry in entries.iter().filter(|e| e.is_intersecting) {
            let Some(state) = self.states.get_mut(&entry.target) else {
                continue;
            };
            if *state == CardState::Revealed {
                continue;
            }
            let Some(index) = self.cards.iter().position(|&c| c == entry.target) else {
                continue;
            };

            let delay = self.config.delay_for_index(index);
            host.set_transition_delay(entry.target, delay);
            host.add_class(entry.target, &self.config.visible_class);
            host.unobserve(self.observer, entry.target);
            *state = CardState::Revealed;
            tracing::debug!(index, delay_ms = delay, "card revealed");
        }
        true
    }

    pub fn state(&self, card: ElementId) -> Option<CardState> {
        self.states.get(&card).copied()
    }

    pub fn revealed_count(&self) -> usize {
        self.states
            .values()
            .filter(|s| **s == CardState::Revealed)
            .count()
    }

    pub fn observer(&self) -> ObserverId {
        self.observer
    }

    /// Cards in page order
    pub fn cards(&self) -> &[ElementId] {
        &self.cards
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use drift_core::{Rect, Size};
    use drift_platform::{HeadlessHost, HostEvent};

    const VISIBLE: &str = "visible";

    fn pump(host: &mut HeadlessHost, cards: &mut StaggeredRevealController) {
        loop {
            let events = host.take_events();
            if events.is_empty() {
                break;
            }
            for event in events {
                if let HostEvent::Intersection { observer, entries } = event {
                    cards.on_intersection(host, observer, &entries);
                }
            }
        }
    }

    fn grid(host: &mut HeadlessHost, count: usize, top: f32) -> Vec<ElementId> {
        (0..count)
            .map(|i| host.add_element(&["project-card"], Rect::new(i as f32 * 150.0, top, 140.0, 200.0)))
            .collect()
    }

    #[test]
    fn test_five_cards_cascade() {
        let mut host = HeadlessHost::new(Size::new(800.0, 600.0));
        let ids = grid(&mut host, 5, 1000.0);
        let mut cards = StaggeredRevealController::attach(&mut host, StaggerConfig::default());
        pump(&mut host, &mut cards);
        assert_eq!(cards.revealed_count(), 0);

        host.scroll_to(800.0);
        pump(&mut host, &mut cards);

        let delays: Vec<_> = ids.iter().map(|&id| host.transition_delay(id)).collect();
        assert_eq!(delays, vec![Some(0), Some(100), Some(200), Some(300), Some(400)]);
        for &id in &ids {
            assert!(host.has_class(id, VISIBLE));
            assert_eq!(host.class_add_count(id, VISIBLE), 1);
            assert_eq!(cards.state(id), Some(CardState::Revealed));
        }
        assert_eq!(host.observed_count(cards.observer()), 0);
    }

    #[test]
    fn test_revealed_cards_never_revert() {
        let mut host = HeadlessHost::new(Size::new(800.0, 600.0));
        let ids = grid(&mut host, 2, 100.0);
        let mut cards = StaggeredRevealController::attach(&mut host, StaggerConfig::default());
        pump(&mut host, &mut cards);

        host.scroll_to(2000.0);
        pump(&mut host, &mut cards);
        host.scroll_to(0.0);
        pump(&mut host, &mut cards);

        for &id in &ids {
            assert!(host.has_class(id, VISIBLE));
            assert_eq!(host.class_add_count(id, VISIBLE), 1);
        }
        assert!(host.class_history().iter().all(|c| c.added));
    }

    #[test]
    fn test_delay_follows_page_order_not_arrival() {
        let mut host = HeadlessHost::new(Size::new(800.0, 600.0));
        let far = host.add_element(&["project-card"], Rect::new(0.0, 2000.0, 100.0, 100.0));
        let near = host.add_element(&["project-card"], Rect::new(0.0, 100.0, 100.0, 100.0));
        let mut cards = StaggeredRevealController::attach(&mut host, StaggerConfig::default());
        pump(&mut host, &mut cards);
        assert_eq!(host.transition_delay(near), Some(100));
        assert_eq!(cards.state(far), Some(CardState::Pending));

        host.scroll_to(1800.0);
        pump(&mut host, &mut cards);
        assert_eq!(host.transition_delay(far), Some(0));
    }

    #[test]
    fn test_duplicate_entries_reveal_once() {
        let mut host = HeadlessHost::new(Size::new(800.0, 600.0));
        let ids = grid(&mut host, 1, 0.0);
        let mut cards = StaggeredRevealController::attach(&mut host, StaggerConfig::default());
        let entry = IntersectionEntry {
            target: ids[0],
            is_intersecting: true,
            ratio: 1.0,
        };
        let observer = cards.observer();
        assert!(cards.on_intersection(&mut host, observer, &[entry, entry]));
        assert_eq!(host.class_add_count(ids[0], VISIBLE), 1);
    }
}
