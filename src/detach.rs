//! Detach event listeners from the browser.

use std::cell::RefCell;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use log::{debug, error};

/// Stop reacting to browser events.
pub trait Detach {
    /// Remove any registered event handlers.
    fn detach(&self);
}

/// Event handlers registered on the window.
///
/// The handlers are removed when the listener is detached or dropped. Use [`forget`] to keep them
/// for the lifetime of the page.
///
/// [`forget`]: #method.forget
pub struct Listener {
    window: web_sys::Window,
    listeners: RefCell<Vec<(String, Closure<dyn FnMut(web_sys::Event)>)>>,
}

impl Listener {
    pub(crate) fn new(window: web_sys::Window) -> Self {
        Listener {
            window: window,
            listeners: RefCell::new(vec![]),
        }
    }

    pub(crate) fn push(&self, event: &str, closure: Closure<dyn FnMut(web_sys::Event)>) {
        self.listeners.borrow_mut().push((event.to_owned(), closure));
    }

    /// Leave the handlers registered for the lifetime of the page.
    pub fn forget(self) {
        for (_, closure) in self.listeners.borrow_mut().drain(..) {
            closure.forget();
        }
    }
}

impl Detach for Listener {
    fn detach(&self) {
        for (event, listener) in self.listeners.borrow_mut().drain(..) {
            match self.window
                .remove_event_listener_with_callback(&event, listener.as_ref().unchecked_ref())
            {
                Ok(()) => debug!("removed {} listener", event),
                Err(e) => error!("failed to remove {} listener: {:?}", event, e),
            }
        }
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        self.detach();
    }
}
