//! Drift Core
//!
//! Foundational types shared by every Drift crate:
//!
//! - **Geometry**: points, sizes, rectangles and intersection ratios
//! - **Keys**: stable identities for host elements, listeners and observers
//! - **Events**: the input stream a host delivers (pointer, touch, scroll, resize)
//! - **State Machines**: flat transition tables with history, used for
//!   one-way lifecycles such as driver start and reveal arming
//!
//! # Example
//!
//! ```rust
//! use drift_core::fsm::{StateMachine, Transition};
//!
//! #[derive(Clone, Copy, Debug, PartialEq, Eq)]
//! enum Lamp { Off, On }
//!
//! #[derive(Clone, Copy, Debug, PartialEq, Eq)]
//! enum Switch { Flip }
//!
//! let mut fsm = StateMachine::new(Lamp::Off, vec![Transition::new(Lamp::Off, Switch::Flip, Lamp::On)]);
//! assert_eq!(fsm.send(Switch::Flip), Lamp::On);
//! // No transition out of `On`: the event is ignored.
//! assert_eq!(fsm.send(Switch::Flip), Lamp::On);
//! ```

pub mod events;
pub mod fsm;
pub mod geometry;
pub mod keys;

pub use events::{Event, EventData, EventType, TouchPoint};
pub use fsm::{StateMachine, Transition};
pub use geometry::{Point, Rect, Size};
pub use keys::{ElementId, ListenerId, ObserverId};
