//! DOM-backed [`Host`]
//!
//! Browser callbacks never touch the application directly. Every listener,
//! observer and frame callback pushes a [`HostEvent`] onto a shared
//! [`EventQueue`] and rings its wake hook; the runner drains the queue.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use drift_core::events::{event_types, EventType};
use drift_core::{ElementId, ListenerId, ObserverId, Point, Size};
use drift_platform::{Host, HostEvent, IntersectionEntry, ObserverOptions, PlatformError};
use slotmap::{Key, KeyData, SlotMap};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    AddEventListenerOptions, Document, EventTarget, HtmlElement, IntersectionObserver,
    IntersectionObserverEntry, IntersectionObserverInit, Window,
};

use crate::frame::FrameSlot;
use crate::input::{convert_event, inner_size};

/// Attribute tying a DOM element back to its [`ElementId`]
const ID_ATTRIBUTE: &str = "data-drift-id";

const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";

/// Pending host notifications plus the hook that drains them
#[derive(Default)]
pub struct EventQueue {
    events: RefCell<VecDeque<HostEvent>>,
    wake: RefCell<Option<Rc<dyn Fn()>>>,
}

impl EventQueue {
    pub fn push(&self, event: HostEvent) {
        self.events.borrow_mut().push_back(event);
        let wake = self.wake.borrow().clone();
        if let Some(wake) = wake {
            wake();
        }
    }

    pub fn pop(&self) -> Option<HostEvent> {
        self.events.borrow_mut().pop_front()
    }

    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }

    /// Called after every push, outside any queue borrow
    pub fn set_wake(&self, wake: impl Fn() + 'static) {
        *self.wake.borrow_mut() = Some(Rc::new(wake));
    }
}

struct WebListener {
    event_type: EventType,
    target: EventTarget,
    callback: Closure<dyn FnMut(web_sys::Event)>,
}

struct WebObserver {
    observer: Option<IntersectionObserver>,
    _callback: Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>,
}

/// [`Host`] over the browser window and document
pub struct WebHost {
    window: Window,
    document: Document,
    queue: Rc<EventQueue>,
    elements: SlotMap<ElementId, HtmlElement>,
    listeners: SlotMap<ListenerId, WebListener>,
    observers: SlotMap<ObserverId, WebObserver>,
    frame: Rc<FrameSlot>,
    frame_callback: Closure<dyn FnMut(f64)>,
}

impl WebHost {
    pub fn new() -> Result<Self, PlatformError> {
        let window =
            web_sys::window().ok_or_else(|| PlatformError::Unavailable("window".to_string()))?;
        let document = window
            .document()
            .ok_or_else(|| PlatformError::Unavailable("document".to_string()))?;

        let queue = Rc::new(EventQueue::default());
        let frame = Rc::new(FrameSlot::default());
        let frame_callback = {
            let queue = queue.clone();
            let frame = frame.clone();
            Closure::wrap(Box::new(move |timestamp: f64| {
                frame.fired();
                queue.push(HostEvent::Frame { timestamp });
            }) as Box<dyn FnMut(f64)>)
        };

        Ok(Self {
            window,
            document,
            queue,
            elements: SlotMap::with_key(),
            listeners: SlotMap::with_key(),
            observers: SlotMap::with_key(),
            frame,
            frame_callback,
        })
    }

    pub fn queue(&self) -> &Rc<EventQueue> {
        &self.queue
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn element(&self, element: ElementId) -> Option<&HtmlElement> {
        self.elements.get(element)
    }

    /// Reuse the id already stamped on `element`, or register it
    fn register(&mut self, element: HtmlElement) -> ElementId {
        if let Some(id) = element.get_attribute(ID_ATTRIBUTE).and_then(|raw| decode_id(&raw)) {
            if self.elements.contains_key(id) {
                return id;
            }
        }
        let id = self.elements.insert(element);
        if let Some(el) = self.elements.get(id) {
            if let Err(err) = el.set_attribute(ID_ATTRIBUTE, &id.data().as_ffi().to_string()) {
                warn_dom("set_attribute", &err);
            }
        }
        id
    }

    fn set_style(&self, element: ElementId, property: &str, value: &str) {
        let Some(el) = self.elements.get(element) else {
            return;
        };
        if let Err(err) = el.style().set_property(property, value) {
            warn_dom(property, &err);
        }
    }

    fn listener_target(&self, event_type: EventType) -> EventTarget {
        if event_types::targets_document(event_type) {
            self.document.clone().into()
        } else {
            self.window.clone().into()
        }
    }
}

impl Host for WebHost {
    fn viewport(&self) -> Size {
        let (width, height) = inner_size(&self.window);
        Size::new(width, height)
    }

    fn scroll_y(&self) -> f32 {
        self.window.scroll_y().unwrap_or(0.0) as f32
    }

    fn location_fragment(&self) -> Option<String> {
        let hash = self.window.location().hash().ok()?;
        let fragment = hash.trim_start_matches('#');
        (!fragment.is_empty()).then(|| fragment.to_string())
    }

    fn prefers_reduced_motion(&self) -> bool {
        match self.window.match_media(REDUCED_MOTION_QUERY) {
            Ok(Some(query)) => query.matches(),
            Ok(None) => false,
            Err(err) => {
                warn_dom("match_media", &err);
                false
            }
        }
    }

    fn query_marked(&mut self, marker: &str) -> Vec<ElementId> {
        let nodes = match self.document.query_selector_all(&format!(".{marker}")) {
            Ok(nodes) => nodes,
            Err(err) => {
                warn_dom("query_selector_all", &err);
                return Vec::new();
            }
        };
        (0..nodes.length())
            .filter_map(|i| nodes.get(i))
            .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
            .map(|element| self.register(element))
            .collect()
    }

    fn bounding_width(&self, element: ElementId) -> f32 {
        self.elements
            .get(element)
            .map_or(0.0, |el| el.get_bounding_client_rect().width() as f32)
    }

    fn set_placement(&mut self, element: ElementId, position: Point) {
        self.set_style(element, "left", &format!("{}px", position.x));
        self.set_style(element, "top", &format!("{}px", position.y));
    }

    fn set_translation(&mut self, element: ElementId, offset: Point) {
        self.set_style(
            element,
            "transform",
            &format!("translate({}px, {}px)", offset.x, offset.y),
        );
    }

    fn add_class(&mut self, element: ElementId, class: &str) {
        if let Some(el) = self.elements.get(element) {
            if let Err(err) = el.class_list().add_1(class) {
                warn_dom("classList.add", &err);
            }
        }
    }

    fn remove_class(&mut self, element: ElementId, class: &str) {
        if let Some(el) = self.elements.get(element) {
            if let Err(err) = el.class_list().remove_1(class) {
                warn_dom("classList.remove", &err);
            }
        }
    }

    fn set_transition_delay(&mut self, element: ElementId, delay_ms: u32) {
        self.set_style(element, "transition-delay", &format!("{delay_ms}ms"));
    }

    fn request_frame(&mut self) {
        let window = &self.window;
        let callback = &self.frame_callback;
        if let Err(err) = self
            .frame
            .request(|| window.request_animation_frame(callback.as_ref().unchecked_ref()))
        {
            warn_dom("request_animation_frame", &err);
        }
    }

    fn add_listener(&mut self, event_type: EventType) -> ListenerId {
        let target = self.listener_target(event_type);
        let window = self.window.clone();
        let queue = self.queue.clone();

        self.listeners.insert_with_key(|listener| {
            let callback = Closure::wrap(Box::new(move |event: web_sys::Event| {
                if let Some(event) = convert_event(event_type, &event, &window) {
                    queue.push(HostEvent::Input { listener, event });
                }
            }) as Box<dyn FnMut(web_sys::Event)>);

            let options = AddEventListenerOptions::new();
            options.set_passive(true);
            if let Err(err) = target.add_event_listener_with_callback_and_add_event_listener_options(
                event_types::name(event_type),
                callback.as_ref().unchecked_ref(),
                &options,
            ) {
                warn_dom("addEventListener", &err);
            }

            WebListener {
                event_type,
                target,
                callback,
            }
        })
    }

    fn remove_listener(&mut self, listener: ListenerId) {
        let Some(entry) = self.listeners.remove(listener) else {
            return;
        };
        if let Err(err) = entry.target.remove_event_listener_with_callback(
            event_types::name(entry.event_type),
            entry.callback.as_ref().unchecked_ref(),
        ) {
            warn_dom("removeEventListener", &err);
        }
    }

    fn create_observer(&mut self, options: &ObserverOptions) -> ObserverId {
        let queue = self.queue.clone();
        let init = IntersectionObserverInit::new();
        init.set_root_margin(&options.root_margin.to_string());
        init.set_threshold(&JsValue::from_f64(f64::from(options.threshold)));

        self.observers.insert_with_key(|observer_id| {
            let callback = Closure::wrap(Box::new(
                move |entries: js_sys::Array, _observer: IntersectionObserver| {
                    let entries: Vec<_> = entries
                        .iter()
                        .filter_map(|entry| convert_entry(entry.unchecked_into()))
                        .collect();
                    if !entries.is_empty() {
                        queue.push(HostEvent::Intersection {
                            observer: observer_id,
                            entries,
                        });
                    }
                },
            )
                as Box<dyn FnMut(js_sys::Array, IntersectionObserver)>);

            let observer =
                match IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init) {
                    Ok(observer) => Some(observer),
                    Err(err) => {
                        warn_dom("IntersectionObserver", &err);
                        None
                    }
                };
            WebObserver {
                observer,
                _callback: callback,
            }
        })
    }

    fn observe(&mut self, observer: ObserverId, element: ElementId) {
        let Some(el) = self.elements.get(element) else {
            return;
        };
        if let Some(observer) = self.observers.get(observer).and_then(|o| o.observer.as_ref()) {
            observer.observe(el);
        }
    }

    fn unobserve(&mut self, observer: ObserverId, element: ElementId) {
        let Some(el) = self.elements.get(element) else {
            return;
        };
        if let Some(observer) = self.observers.get(observer).and_then(|o| o.observer.as_ref()) {
            observer.unobserve(el);
        }
    }
}

impl Drop for WebHost {
    fn drop(&mut self) {
        // The frame callback is released with the host
        if let Some(handle) = self.frame.take_pending() {
            if let Err(err) = self.window.cancel_animation_frame(handle) {
                warn_dom("cancel_animation_frame", &err);
            }
        }
        let listeners: Vec<_> = self.listeners.keys().collect();
        for listener in listeners {
            self.remove_listener(listener);
        }
        for (_, observer) in self.observers.drain() {
            if let Some(observer) = observer.observer {
                observer.disconnect();
            }
        }
    }
}

fn convert_entry(entry: IntersectionObserverEntry) -> Option<IntersectionEntry> {
    let target = entry.target().get_attribute(ID_ATTRIBUTE)?;
    Some(IntersectionEntry {
        target: decode_id(&target)?,
        is_intersecting: entry.is_intersecting(),
        ratio: entry.intersection_ratio() as f32,
    })
}

fn decode_id(raw: &str) -> Option<ElementId> {
    raw.parse::<u64>().ok().map(|ffi| KeyData::from_ffi(ffi).into())
}

fn warn_dom(operation: &str, err: &JsValue) {
    tracing::warn!(operation, error = ?err, "DOM operation failed");
}
