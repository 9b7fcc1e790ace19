//! Translation between browser URLs and application paths, and the browser history calls used to
//! navigate.
//!
//! In [`HistoryMode::Web`] the application path is the real URL path with the configured base
//! removed (`https://host/base/pokemon/1` is `/pokemon/1`). In [`HistoryMode::Hash`] it is
//! everything after the `#` (`https://host/#/pokemon/1` is `/pokemon/1`).
//!
//! [`HistoryMode::Web`]: enum.HistoryMode.html#variant.Web
//! [`HistoryMode::Hash`]: enum.HistoryMode.html#variant.Hash

use std::borrow::Cow;
use serde::{Serialize, Deserialize};
use wasm_bindgen::JsValue;
use crate::error::{Error, Result};

/// How the application path is stored in the browser URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryMode {
    /// Use the real URL path through the History API.
    Web,
    /// Keep the path in the URL fragment.
    Hash,
}

impl Default for HistoryMode {
    fn default() -> Self {
        HistoryMode::Web
    }
}

/// Normalize a base path to have a leading `/` and no trailing `/`.
///
/// The root base normalizes to the empty string.
pub fn normalize_base(base: &str) -> String {
    let base = base.trim().trim_end_matches('/');
    if base.is_empty() {
        String::new()
    }
    else if base.starts_with('/') {
        base.to_owned()
    }
    else {
        format!("/{}", base)
    }
}

/// Extract the application path (with query and fragment) from a full URL.
///
/// `base` must already be normalized. A path outside of the base is returned unchanged.
pub fn app_path(url: &str, mode: HistoryMode, base: &str) -> String {
    match mode {
        HistoryMode::Hash => {
            let fragment = url.find('#').map_or("", |i| &url[i + 1..]);
            if fragment.is_empty() {
                "/".to_owned()
            }
            else if fragment.starts_with('/') {
                fragment.to_owned()
            }
            else {
                format!("/{}", fragment)
            }
        }
        HistoryMode::Web => {
            let path = url_path(url);
            let path = if path.starts_with('/') {
                path.to_owned()
            }
            else {
                format!("/{}", path)
            };

            let under_base = !base.is_empty()
                && path.get(..base.len()).map_or(false, |prefix| prefix.eq_ignore_ascii_case(base));
            if !under_base {
                return path;
            }

            let rest = &path[base.len()..];
            match rest.chars().next() {
                None => "/".to_owned(),
                Some('/') => rest.to_owned(),
                Some('?') | Some('#') => format!("/{}", rest),
                Some(_) => path.clone(),
            }
        }
    }
}

/// Make an application path absolute by adding a missing leading `/`.
pub fn absolute(path: &str) -> Cow<str> {
    if path.starts_with('/') {
        Cow::Borrowed(path)
    }
    else {
        Cow::Owned(format!("/{}", path))
    }
}

/// The URL to hand to the History API for an application path.
///
/// Relative paths are treated as relative to the application root, never to the current URL.
pub fn browser_href(path: &str, mode: HistoryMode, base: &str) -> String {
    let path = absolute(path);
    match mode {
        HistoryMode::Web => format!("{}{}", base, path),
        HistoryMode::Hash => format!("#{}", path),
    }
}

/// Everything after the scheme and authority of a URL.
fn url_path(url: &str) -> &str {
    let rest = match url.find("://") {
        Some(i) => &url[i + 3..],
        None => return url,
    };

    match rest.find(|c| c == '/' || c == '?' || c == '#') {
        Some(i) => &rest[i..],
        None => "",
    }
}

pub(crate) fn window() -> Result<web_sys::Window> {
    web_sys::window()
        .ok_or_else(|| Error::Browser("couldn't get window handle".to_owned()))
}

pub(crate) fn document() -> Result<web_sys::Document> {
    window()?
        .document()
        .ok_or_else(|| Error::Browser("couldn't get document handle".to_owned()))
}

/// The current document URL.
pub fn current_url() -> Result<String> {
    document()?
        .url()
        .map_err(Error::js)
}

fn history() -> Result<web_sys::History> {
    window()?
        .history()
        .map_err(Error::js)
}

/// Add an entry to the session history.
pub fn push_state(href: &str) -> Result<()> {
    history()?
        .push_state_with_url(&JsValue::NULL, "", Some(href))
        .map_err(Error::js)
}

/// Replace the current session history entry.
pub fn replace_state(href: &str) -> Result<()> {
    history()?
        .replace_state_with_url(&JsValue::NULL, "", Some(href))
        .map_err(Error::js)
}

/// Move through the session history by `delta` entries.
pub fn go(delta: i32) -> Result<()> {
    history()?
        .go_with_delta(delta)
        .map_err(Error::js)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bases() {
        assert_eq!(normalize_base(""), "");
        assert_eq!(normalize_base("/"), "");
        assert_eq!(normalize_base("app"), "/app");
        assert_eq!(normalize_base("/app/"), "/app");
        assert_eq!(normalize_base("/a/b"), "/a/b");
    }

    #[test]
    fn web_paths() {
        use HistoryMode::Web;

        assert_eq!(app_path("http://localhost:8080", Web, ""), "/");
        assert_eq!(app_path("http://localhost:8080/", Web, ""), "/");
        assert_eq!(app_path("http://localhost:8080/pokemon/42", Web, ""), "/pokemon/42");
        assert_eq!(app_path("http://localhost:8080/pokemon/42?x=1#y", Web, ""), "/pokemon/42?x=1#y");
        assert_eq!(app_path("http://localhost:8080?x=1", Web, ""), "/?x=1");
        assert_eq!(app_path("/pokemon/42", Web, ""), "/pokemon/42");
    }

    #[test]
    fn web_paths_with_base() {
        use HistoryMode::Web;

        assert_eq!(app_path("https://host/app", Web, "/app"), "/");
        assert_eq!(app_path("https://host/app/", Web, "/app"), "/");
        assert_eq!(app_path("https://host/APP/pokemon/1", Web, "/app"), "/pokemon/1");
        assert_eq!(app_path("https://host/app?q", Web, "/app"), "/?q");
        // not under the base
        assert_eq!(app_path("https://host/apple", Web, "/app"), "/apple");
        assert_eq!(app_path("https://host/other", Web, "/app"), "/other");
    }

    #[test]
    fn hash_paths() {
        use HistoryMode::Hash;

        assert_eq!(app_path("http://localhost:8080/", Hash, ""), "/");
        assert_eq!(app_path("http://localhost:8080/#", Hash, ""), "/");
        assert_eq!(app_path("http://localhost:8080/#/", Hash, ""), "/");
        assert_eq!(app_path("http://localhost:8080/#/pokemon/42", Hash, ""), "/pokemon/42");
        assert_eq!(app_path("http://localhost:8080/index.html#pokemon/42", Hash, "/ignored"), "/pokemon/42");
    }

    #[test]
    fn hrefs() {
        assert_eq!(browser_href("/pokemon/1", HistoryMode::Web, ""), "/pokemon/1");
        assert_eq!(browser_href("/pokemon/1", HistoryMode::Web, "/app"), "/app/pokemon/1");
        assert_eq!(browser_href("/", HistoryMode::Web, "/app"), "/app/");
        assert_eq!(browser_href("/pokemon/1", HistoryMode::Hash, "/app"), "#/pokemon/1");
    }

    #[test]
    fn relative_paths_are_rooted() {
        assert_eq!(absolute("pokemon/1"), "/pokemon/1");
        assert_eq!(absolute("/pokemon/1"), "/pokemon/1");
        assert_eq!(absolute(""), "/");
        assert_eq!(browser_href("pokemon/1", HistoryMode::Web, ""), "/pokemon/1");
        assert_eq!(browser_href("pokemon/1", HistoryMode::Web, "/app"), "/app/pokemon/1");
        assert_eq!(browser_href("pokemon/1", HistoryMode::Hash, ""), "#/pokemon/1");
    }

    #[test]
    fn round_trip_through_base() {
        let href = browser_href("/pokemon/7", HistoryMode::Web, "/app");
        assert_eq!(app_path(&format!("https://host{}", href), HistoryMode::Web, "/app"), "/pokemon/7");
    }
}
