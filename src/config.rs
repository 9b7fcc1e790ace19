//! Router configuration.

use serde::{Serialize, Deserialize};
use crate::error::Result;
use crate::history::{HistoryMode, normalize_base};

/// How a [`Router`] maps browser URLs to application paths.
///
/// The default uses the History API at the site root. Configuration can also be read from JSON:
///
/// ```
/// use pokedex_router::config::RouterConfig;
/// use pokedex_router::history::HistoryMode;
///
/// let config = RouterConfig::from_json(r#"{ "mode": "hash", "base": "/pokedex/" }"#).unwrap();
/// assert_eq!(config.mode, HistoryMode::Hash);
/// assert_eq!(config.base, "/pokedex");
/// ```
///
/// [`Router`]: ../router/struct.Router.html
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RouterConfig {
    /// Where the application path lives in the URL.
    pub mode: HistoryMode,
    /// Path prefix the application is served under, normalized to `/prefix` or `""`.
    pub base: String,
}

impl RouterConfig {
    /// History API navigation at the site root.
    pub fn web() -> Self {
        RouterConfig::default()
    }

    /// Fragment navigation.
    pub fn hash() -> Self {
        RouterConfig {
            mode: HistoryMode::Hash,
            .. RouterConfig::default()
        }
    }

    /// Serve the application under the given base path.
    pub fn base(mut self, base: &str) -> Self {
        self.base = normalize_base(base);
        self
    }

    /// Read a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: RouterConfig = serde_json::from_str(json)?;
        Ok(config.normalized())
    }

    pub(crate) fn normalized(self) -> Self {
        let base = normalize_base(&self.base);
        RouterConfig {
            base: base,
            .. self
        }
    }
}
