//! The Pokédex application's routes and entry point.
//!
//! `/` shows the list of Pokémon and `/pokemon/:id` shows a single Pokémon, with `id` forwarded to
//! the detail view. Unmatched paths resolve to nothing; the host page decides what to show.

use std::fmt;
use cfg_if::cfg_if;
use wasm_bindgen::prelude::*;
use log::{debug, info, warn, error};
use crate::config::RouterConfig;
use crate::detach::Listener;
use crate::error::{Error, Result};
use crate::history;
use crate::router::Router;
use crate::table::{RouteTable, Match};

cfg_if! {
    if #[cfg(feature = "console_error_panic_hook")] {
        #[inline]
        fn set_panic_hook() {
            console_error_panic_hook::set_once();
            debug!("panic hook set");
        }
    }
    else {
        fn set_panic_hook() {}
    }
}

cfg_if! {
    if #[cfg(feature = "console_log")] {
        #[inline]
        fn init_log() {
            match console_log::init_with_level(log::Level::Debug) {
                Ok(()) => debug!("log initialized"),
                Err(e) => warn!("error initializing log: {}", e),
            }
        }
    }
    else {
        fn init_log() {}
    }
}

/// Selector for the element the application is mounted on.
pub const MOUNT: &str = "#app";

/// The views the application can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// The list of all Pokémon.
    PokemonList,
    /// A single Pokémon, selected by the `id` prop.
    PokemonDetail,
}

impl View {
    /// Stable name of the view, as written to the mount element.
    pub fn name(&self) -> &'static str {
        match self {
            View::PokemonList => "pokemon-list",
            View::PokemonDetail => "pokemon-detail",
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The application's route table.
pub fn routes() -> Result<RouteTable<View>> {
    RouteTable::builder()
        .route("/", View::PokemonList)
        .route_with_props("/pokemon/:id", View::PokemonDetail)
        .build()
}

/// The application's router.
pub fn router(config: RouterConfig) -> Result<Router<View>> {
    Ok(Router::new(config, routes()?))
}

/// The element the application is mounted on.
///
/// The resolved view is recorded in its `data-view` attribute and the forwarded `id` prop in
/// `data-id`, for the page to render from.
#[derive(Debug, Clone)]
pub struct Mount {
    element: web_sys::Element,
}

impl Mount {
    /// Use the given element as the mount point.
    pub fn new(element: web_sys::Element) -> Self {
        Mount {
            element: element,
        }
    }

    /// Find the mount point in the document, if it exists.
    pub fn find(selector: &str) -> Result<Option<Self>> {
        Ok(history::document()?
            .query_selector(selector)
            .map_err(Error::js)?
            .map(Mount::new))
    }

    /// The mount element.
    pub fn element(&self) -> &web_sys::Element {
        &self.element
    }

    /// Record the resolved route on the mount element.
    pub fn show(&self, m: Option<&Match<View>>) -> Result<()> {
        let view = m.map(|m| m.view.name());
        let id = m.and_then(|m| m.props.get("id"));

        self.set("data-view", view)?;
        self.set("data-id", id)
    }

    fn set(&self, name: &str, value: Option<&str>) -> Result<()> {
        match value {
            Some(value) => self.element.set_attribute(name, value),
            None => self.element.remove_attribute(name),
        }
        .map_err(Error::js)
    }
}

/// Mount `router` on `mount` and keep the mount current as the URL changes.
pub fn attach(router: &Router<View>, mount: Mount) -> Result<Listener> {
    mount.show(router.current()?.as_ref())?;

    router.listen(move |m| {
        if let Err(e) = mount.show(m.as_ref()) {
            error!("couldn't update mount: {}", e);
        }
    })
}

/// Entry point: mount the router on the `#app` element, if the page has one.
#[wasm_bindgen(start)]
pub fn start() -> std::result::Result<(), JsValue> {
    init_log();
    set_panic_hook();

    let mount = match Mount::find(MOUNT)? {
        Some(mount) => mount,
        None => {
            warn!("no {} element, not mounting", MOUNT);
            return Ok(());
        }
    };

    let router = router(RouterConfig::default())?;
    attach(&router, mount)?.forget();

    info!("pokedex router initialized");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_route() {
        let m = routes().unwrap().resolve("/").expect("match");
        assert_eq!(m.view, View::PokemonList);
        assert!(m.props.is_empty());
    }

    #[test]
    fn detail_route() {
        let m = routes().unwrap().resolve("/pokemon/42").expect("match");
        assert_eq!(m.view, View::PokemonDetail);
        assert_eq!(m.props.get("id"), Some("42"));
        assert_eq!(m.props.len(), 1);
    }

    #[test]
    fn detail_variants() {
        let routes = routes().unwrap();
        for path in &["/pokemon/42/", "/POKEMON/42", "/pokemon/42?x=1", "/pokemon/42#stats"] {
            let m = routes.resolve(path).expect(path);
            assert_eq!(m.view, View::PokemonDetail, "{}", path);
            assert_eq!(m.props.get("id"), Some("42"), "{}", path);
        }
    }

    #[test]
    fn unmatched() {
        let routes = routes().unwrap();
        for path in &["/pokemon", "/pokemon/", "/pokemon/1/2", "/missing", "/pokemons/1"] {
            assert_eq!(routes.resolve(path), None, "{}", path);
        }
    }

    #[test]
    fn exactly_two_routes_in_order() {
        let routes = routes().unwrap();
        let table: Vec<(&str, View, bool)> = routes.iter()
            .map(|r| (r.pattern().as_str(), *r.view(), r.props()))
            .collect();

        assert_eq!(table, vec![
            ("/", View::PokemonList, false),
            ("/pokemon/:id", View::PokemonDetail, true),
        ]);
    }

    #[test]
    fn registration_is_idempotent() {
        assert_eq!(routes().unwrap(), routes().unwrap());
        assert_eq!(format!("{:?}", routes().unwrap()), format!("{:?}", routes().unwrap()));
    }

    #[test]
    fn detail_link() {
        let params = vec![("id", "42")].into_iter().collect();
        assert_eq!(routes().unwrap().href(&View::PokemonDetail, &params).unwrap(), "/pokemon/42");
    }

    #[test]
    fn router_uses_web_history() {
        let router = router(RouterConfig::default()).unwrap();
        assert_eq!(router.config().mode, crate::history::HistoryMode::Web);
        assert_eq!(
            router.resolve_url("http://localhost:8080/pokemon/25").map(|m| m.view),
            Some(View::PokemonDetail),
        );
    }
}
