//! DOM event conversion

use drift_core::events::{event_types, EventType};
use drift_core::{Event, TouchPoint};
use wasm_bindgen::JsCast;
use web_sys::{MouseEvent, TouchEvent, WheelEvent, Window};

/// Convert a DOM event delivered to a listener of `event_type`.
///
/// Returns `None` when the DOM event is not the expected interface.
pub fn convert_event(event_type: EventType, event: &web_sys::Event, window: &Window) -> Option<Event> {
    let converted = match event_type {
        event_types::POINTER_MOVE => {
            let mouse = event.dyn_ref::<MouseEvent>()?;
            Event::pointer_move(mouse.client_x() as f32, mouse.client_y() as f32)
        }
        event_types::TOUCH_MOVE => {
            let touches = event.dyn_ref::<TouchEvent>()?.touches();
            Event::touch_move(
                (0..touches.length())
                    .filter_map(|i| touches.get(i))
                    .map(|t| TouchPoint::new(t.client_x() as f32, t.client_y() as f32)),
            )
        }
        event_types::SCROLL => Event::scroll(window.scroll_y().unwrap_or(0.0) as f32),
        event_types::WHEEL => Event::wheel(event.dyn_ref::<WheelEvent>()?.delta_y() as f32),
        event_types::RESIZE => {
            let (width, height) = inner_size(window);
            Event::resize(width, height)
        }
        _ => return None,
    };
    Some(Event {
        timestamp: event.time_stamp(),
        ..converted
    })
}

/// `innerWidth` x `innerHeight`, zero when unavailable
pub fn inner_size(window: &Window) -> (f32, f32) {
    let read = |value: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>| {
        value.ok().and_then(|v| v.as_f64()).unwrap_or(0.0) as f32
    };
    (read(window.inner_width()), read(window.inner_height()))
}
