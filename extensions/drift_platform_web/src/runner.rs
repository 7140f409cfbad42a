//! Page runner
//!
//! Starts a [`DriftApp`] on the live document. Blob motion starts right away;
//! the reveal controllers attach once the document has finished parsing.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use drift_app::{DriftApp, DriftConfig};
use drift_platform::PlatformError;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::AddEventListenerOptions;

use crate::host::WebHost;

struct Runner {
    app: DriftApp,
    host: WebHost,
}

impl Runner {
    /// Handle queued events until none remain. Events queued while handling
    /// (arming reports initial intersections) are picked up by the same loop.
    fn drain(&mut self) {
        loop {
            let next = self.host.queue().pop();
            let Some(event) = next else {
                break;
            };
            self.app.handle_event(&mut self.host, event);
        }
    }

    fn document_ready(&mut self) {
        self.app.document_ready(&mut self.host);
        self.drain();
    }
}

/// Keeps a running page alive. Dropping it stops motion and detaches every
/// listener and observer; [`DriftHandle::forget`] keeps it running for the
/// page's lifetime.
pub struct DriftHandle {
    runner: Rc<RefCell<Runner>>,
}

impl DriftHandle {
    /// Leak the runner so it lives as long as the page
    pub fn forget(self) {
        std::mem::forget(self.runner);
    }

    pub fn frame_count(&self) -> u64 {
        self.runner.borrow().app.driver().frame_count()
    }
}

/// Start Drift on the current document.
pub fn start(config: DriftConfig) -> Result<DriftHandle, PlatformError> {
    let app = DriftApp::with_config(config).map_err(|e| PlatformError::InitFailed(e.to_string()))?;
    let host = WebHost::new()?;
    let queue = host.queue().clone();
    let runner = Rc::new(RefCell::new(Runner { app, host }));

    let weak = Rc::downgrade(&runner);
    queue.set_wake(move || wake(&weak));

    {
        let mut guard = runner.borrow_mut();
        let Runner { app, host } = &mut *guard;
        app.page_ready(host);
        guard.drain();
    }

    let loading = runner.borrow().host.document().ready_state() == "loading";
    if loading {
        let weak = Rc::downgrade(&runner);
        let on_ready = Closure::once_into_js(move || wake_document_ready(&weak));
        let options = AddEventListenerOptions::new();
        options.set_once(true);
        runner
            .borrow()
            .host
            .document()
            .add_event_listener_with_callback_and_add_event_listener_options(
                "DOMContentLoaded",
                on_ready.unchecked_ref(),
                &options,
            )
            .map_err(|err| PlatformError::Dom(format!("{err:?}")))?;
    } else {
        runner.borrow_mut().document_ready();
    }

    tracing::info!(loading, "drift attached to document");
    Ok(DriftHandle { runner })
}

fn wake(runner: &Weak<RefCell<Runner>>) {
    let Some(runner) = runner.upgrade() else {
        return;
    };
    // Already draining further up the stack; that loop sees the new event
    if let Ok(mut runner) = runner.try_borrow_mut() {
        runner.drain();
    }
}

fn wake_document_ready(runner: &Weak<RefCell<Runner>>) {
    if let Some(runner) = runner.upgrade() {
        if let Ok(mut runner) = runner.try_borrow_mut() {
            runner.document_ready();
        } else {
            tracing::warn!("document ready while the runner was busy");
        }
    }
}
