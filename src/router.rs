//! A route table bound to browser history.
//!
//! The [`Router`] owns an immutable [`RouteTable`] and a [`RouterConfig`]. It resolves the
//! document URL to a [`Match`], moves through history, and notifies listeners when the URL
//! changes. Rendering the matched view is left to whoever mounts the application.
//!
//! [`Router`]: struct.Router.html
//! [`RouteTable`]: ../table/struct.RouteTable.html
//! [`RouterConfig`]: ../config/struct.RouterConfig.html
//! [`Match`]: ../table/struct.Match.html

use std::fmt;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use log::{debug, warn, error};
use crate::config::RouterConfig;
use crate::detach::Listener;
use crate::error::{Error, Result};
use crate::history::{self, absolute, app_path, browser_href};
use crate::pattern::Params;
use crate::route::Route;
use crate::table::{RouteTable, Match};

/// A route table bound to browser navigation.
pub struct Router<V> {
    table: Rc<RouteTable<V>>,
    config: RouterConfig,
}

impl<V> Clone for Router<V> {
    fn clone(&self) -> Self {
        Router {
            table: Rc::clone(&self.table),
            config: self.config.clone(),
        }
    }
}

impl<V: fmt::Debug> fmt::Debug for Router<V> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Router")
            .field("config", &self.config)
            .field("routes", &self.table.len())
            .finish()
    }
}

impl<V> Router<V>
where
    V: Clone + fmt::Debug + 'static,
{
    /// Bind a route table to browser history using the given configuration.
    pub fn new(config: RouterConfig, table: RouteTable<V>) -> Self {
        Router {
            table: Rc::new(table),
            config: config.normalized(),
        }
    }

    /// The route table.
    pub fn table(&self) -> &RouteTable<V> {
        &self.table
    }

    /// The configuration.
    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    /// Resolve an application path such as `/pokemon/42`.
    pub fn resolve(&self, path: &str) -> Option<Match<V>> {
        let m = self.table.resolve(path);
        match m {
            Some(ref m) => debug!("{} -> {:?} {:?}", path, m.view, m.props),
            None => warn!("no route for {}", path),
        }
        m
    }

    /// Resolve a full browser URL.
    pub fn resolve_url(&self, url: &str) -> Option<Match<V>> {
        self.resolve(&app_path(url, self.config.mode, &self.config.base))
    }

    /// The URL to use in a link to the given view.
    pub fn href(&self, view: &V, params: &Params) -> Result<String>
    where
        V: PartialEq,
    {
        let path = self.table.href(view, params)?;
        Ok(browser_href(&path, self.config.mode, &self.config.base))
    }

    /// Resolve the document's current URL.
    pub fn current(&self) -> Result<Option<Match<V>>> {
        Ok(self.resolve_url(&history::current_url()?))
    }

    /// Navigate to an application path, adding a history entry.
    ///
    /// Listeners are notified as if the user had navigated.
    pub fn push(&self, path: &str) -> Result<Option<Match<V>>> {
        let (path, href) = self.target(path);
        history::push_state(&href)?;
        notify();
        Ok(self.resolve(&path))
    }

    /// Navigate to an application path, replacing the current history entry.
    ///
    /// Listeners are notified as if the user had navigated.
    pub fn replace(&self, path: &str) -> Result<Option<Match<V>>> {
        let (path, href) = self.target(path);
        history::replace_state(&href)?;
        notify();
        Ok(self.resolve(&path))
    }

    /// The absolute application path and browser href for a navigation target.
    fn target(&self, path: &str) -> (String, String) {
        let path = absolute(path).into_owned();
        let href = browser_href(&path, self.config.mode, &self.config.base);
        (path, href)
    }

    /// Go back one history entry.
    pub fn back(&self) -> Result<()> {
        history::go(-1)
    }

    /// Go forward one history entry.
    pub fn forward(&self) -> Result<()> {
        history::go(1)
    }

    /// Call `callback` with the resolved route every time the URL changes.
    ///
    /// The returned [`Listener`] removes the handler when detached or dropped.
    ///
    /// [`Listener`]: ../detach/struct.Listener.html
    pub fn listen<F>(&self, mut callback: F) -> Result<Listener>
    where
        F: FnMut(Option<Match<V>>) + 'static,
    {
        let window = history::window()?;
        let document = history::document()?;
        let router = self.clone();

        let closure = Closure::wrap(
            Box::new(move |_event| {
                match document.url() {
                    Ok(url) => callback(router.resolve_url(&url)),
                    Err(e) => error!("couldn't get document url: {:?}", e),
                }
            }) as Box<dyn FnMut(web_sys::Event)>
        );

        window
            .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref())
            .map_err(Error::js)?;

        let listener = Listener::new(window);
        listener.push("popstate", closure);
        Ok(listener)
    }
}

impl<V> Route<Match<V>> for Router<V>
where
    V: Clone + fmt::Debug + 'static,
{
    fn route(&self, url: &str) -> Option<Match<V>> {
        self.resolve_url(url)
    }
}

/// pushState and replaceState don't fire popstate, so fire one for our listeners.
///
/// The history entry has already changed by now, so a failure here is logged rather than
/// returned.
fn notify() {
    let dispatched = web_sys::PopStateEvent::new("popstate")
        .map_err(Error::js)
        .and_then(|event| {
            history::window()?
                .dispatch_event(&event)
                .map_err(Error::js)
        });

    if let Err(e) = dispatched {
        error!("couldn't notify listeners of navigation: {}", e);
    }
}
