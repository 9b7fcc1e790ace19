//! Client-side routing for the Pokédex single page app.
//!
//! The application has a fixed route table, declared once at startup:
//!
//! | path           | view            | props   |
//! |----------------|-----------------|---------|
//! | `/`            | `PokemonList`   |         |
//! | `/pokemon/:id` | `PokemonDetail` | `id`    |
//!
//! The table is bound to browser history by a [`Router`], which resolves the current URL,
//! navigates with the History API, and tells listeners when the URL changes. The router is a plain
//! value built at bootstrap and handed to whatever mounts the app; see [`pokedex::start`].
//!
//! ```
//! use pokedex_router::pokedex::{self, View};
//! use pokedex_router::config::RouterConfig;
//!
//! let router = pokedex::router(RouterConfig::default()).unwrap();
//! let m = router.resolve("/pokemon/42").unwrap();
//!
//! assert_eq!(m.view, View::PokemonDetail);
//! assert_eq!(m.props.get("id"), Some("42"));
//! ```
//!
//! [`Router`]: router/struct.Router.html
//! [`pokedex::start`]: pokedex/fn.start.html

#![deny(missing_docs)]

pub mod error;
pub mod pattern;
pub mod table;
pub mod route;
pub mod history;
pub mod config;
pub mod detach;
pub mod router;
pub mod pokedex;

pub use crate::error::{Error, Result};
pub use crate::config::RouterConfig;
pub use crate::router::Router;
pub use crate::table::{RouteTable, RouteDef, Match};
