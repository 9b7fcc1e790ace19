//! The static mapping from URL paths to views.
//!
//! A [`RouteTable`] is declared once, at startup, with a [`RouteTableBuilder`] and never changes
//! afterwards. Resolution walks the routes in declaration order and returns the first match.
//!
//! ```
//! use pokedex_router::table::RouteTable;
//!
//! #[derive(Debug, Clone, PartialEq)]
//! enum View { Home, Item }
//!
//! let table = RouteTable::builder()
//!     .route("/", View::Home)
//!     .route_with_props("/item/:id", View::Item)
//!     .build()
//!     .unwrap();
//!
//! let m = table.resolve("/item/7").unwrap();
//! assert_eq!(m.view, View::Item);
//! assert_eq!(m.props.get("id"), Some("7"));
//! ```
//!
//! [`RouteTable`]: struct.RouteTable.html
//! [`RouteTableBuilder`]: struct.RouteTableBuilder.html

use std::fmt;
use log::debug;
use crate::error::{Error, Result};
use crate::pattern::{PathPattern, Params};

/// A single route: a path pattern, the view it shows, and whether path parameters are forwarded
/// to that view.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteDef<V> {
    pattern: PathPattern,
    view: V,
    props: bool,
}

impl<V> RouteDef<V> {
    /// The path pattern.
    pub fn pattern(&self) -> &PathPattern {
        &self.pattern
    }

    /// The view shown for this route.
    pub fn view(&self) -> &V {
        &self.view
    }

    /// Whether matched path parameters are forwarded to the view.
    pub fn props(&self) -> bool {
        self.props
    }
}

/// The result of resolving a path.
#[derive(Debug, Clone, PartialEq)]
pub struct Match<V> {
    /// Position of the matched route in its table.
    pub index: usize,
    /// The view to show.
    pub view: V,
    /// All parameters captured from the path.
    pub params: Params,
    /// Parameters forwarded to the view; empty unless the route forwards props.
    pub props: Params,
}

/// Struct used to declare a [`RouteTable`].
///
/// [`RouteTable`]: struct.RouteTable.html
pub struct RouteTableBuilder<V> {
    routes: Vec<(String, V, bool)>,
}

impl<V> Default for RouteTableBuilder<V> {
    fn default() -> Self {
        RouteTableBuilder {
            routes: vec![],
        }
    }
}

impl<V> RouteTableBuilder<V> {
    /// Add a route whose path parameters are not forwarded to the view.
    pub fn route(mut self, path: &str, view: V) -> Self {
        self.routes.push((path.to_owned(), view, false));
        self
    }

    /// Add a route whose path parameters are forwarded to the view as props.
    pub fn route_with_props(mut self, path: &str, view: V) -> Self {
        self.routes.push((path.to_owned(), view, true));
        self
    }

    /// Parse all patterns and produce the table.
    pub fn build(self) -> Result<RouteTable<V>>
    where
        V: fmt::Debug,
    {
        let routes = self.routes.into_iter()
            .map(|(path, view, props)| -> Result<RouteDef<V>> {
                let pattern = PathPattern::parse(&path)?;
                debug!("route {} -> {:?} (props: {})", pattern, view, props);
                Ok(RouteDef {
                    pattern: pattern,
                    view: view,
                    props: props,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(RouteTable {
            routes: routes,
        })
    }
}

/// An immutable, ordered list of routes.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteTable<V> {
    routes: Vec<RouteDef<V>>,
}

impl<V> RouteTable<V> {
    /// Start declaring a table.
    pub fn builder() -> RouteTableBuilder<V> {
        RouteTableBuilder::default()
    }

    /// The number of routes.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Whether the table has no routes.
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// The routes in declaration order.
    pub fn iter(&self) -> std::slice::Iter<RouteDef<V>> {
        self.routes.iter()
    }

    /// The route at the given position.
    pub fn get(&self, index: usize) -> Option<&RouteDef<V>> {
        self.routes.get(index)
    }

    /// Find the route for a path.
    ///
    /// Any query string or fragment is ignored. Returns `None` when no route matches.
    pub fn resolve(&self, path: &str) -> Option<Match<V>>
    where
        V: Clone,
    {
        let path = strip_query(path);

        self.routes.iter()
            .enumerate()
            .find_map(|(i, route)| {
                route.pattern.matches(path).map(|params| {
                    let props = if route.props { params.clone() } else { Params::new() };
                    Match {
                        index: i,
                        view: route.view.clone(),
                        params: params,
                        props: props,
                    }
                })
            })
    }

    /// Build the path for a view, filling in its parameters.
    ///
    /// Uses the first route declared for the view.
    pub fn href(&self, view: &V, params: &Params) -> Result<String>
    where
        V: PartialEq + fmt::Debug,
    {
        self.routes.iter()
            .find(|route| route.view == *view)
            .ok_or_else(|| Error::UnknownView(format!("{:?}", view)))?
            .pattern
            .href(params)
    }
}

impl<'a, V> IntoIterator for &'a RouteTable<V> {
    type Item = &'a RouteDef<V>;
    type IntoIter = std::slice::Iter<'a, RouteDef<V>>;

    fn into_iter(self) -> Self::IntoIter {
        self.routes.iter()
    }
}

/// Cut a path at the start of its query string or fragment.
pub(crate) fn strip_query(path: &str) -> &str {
    match path.find(|c| c == '?' || c == '#') {
        Some(i) => &path[..i],
        None => path,
    }
}
