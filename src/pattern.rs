//! Path patterns like `/pokemon/:id`.
//!
//! A pattern is a sequence of `/` separated segments. A segment starting with `:` is a named
//! parameter that matches exactly one non-empty path segment; every other segment must appear
//! verbatim (compared case-insensitively). A single trailing slash on the path being matched is
//! ignored, so `/pokemon/42/` matches `/pokemon/:id`.

use std::fmt;
use std::borrow::Cow;
use log::warn;
use crate::error::{Error, Result};

/// One segment of a [`PathPattern`].
///
/// [`PathPattern`]: struct.PathPattern.html
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// A segment that must match literally.
    Static(String),
    /// A named parameter capturing one segment.
    Param(String),
}

/// A parsed route pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    source: String,
    segments: Vec<Segment>,
}

impl PathPattern {
    /// Parse a pattern.
    ///
    /// Patterns must start with `/`, may not contain empty segments (`//`), and parameter names
    /// must be non-empty, unique, and made of ASCII letters, digits and `_`.
    pub fn parse(pattern: &str) -> Result<Self> {
        if !pattern.starts_with('/') {
            return Err(Error::invalid(pattern, "must start with '/'"));
        }

        let body = &pattern[1..];
        if body.starts_with('/') {
            return Err(Error::invalid(pattern, "empty path segment"));
        }
        let body = body.strip_suffix('/').unwrap_or(body);

        let mut segments = vec![];
        if !body.is_empty() {
            for part in body.split('/') {
                if part.is_empty() {
                    return Err(Error::invalid(pattern, "empty path segment"));
                }

                let segment = match part.strip_prefix(':') {
                    Some("") => return Err(Error::invalid(pattern, "empty parameter name")),
                    Some(name) => {
                        if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
                            return Err(Error::invalid(
                                pattern,
                                "parameter names may only contain letters, digits and '_'",
                            ));
                        }
                        if segments.iter().any(|s| s == &Segment::Param(name.to_owned())) {
                            return Err(Error::invalid(pattern, "duplicate parameter name"));
                        }
                        Segment::Param(name.to_owned())
                    }
                    None => Segment::Static(part.to_owned()),
                };
                segments.push(segment);
            }
        }

        Ok(PathPattern {
            source: pattern.to_owned(),
            segments: segments,
        })
    }

    /// The pattern as it was written.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// The parsed segments.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Names of the parameters in this pattern, in order.
    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Param(name) => Some(name.as_str()),
            Segment::Static(_) => None,
        })
    }

    /// Match a path (without query string or fragment) against this pattern.
    ///
    /// Returns the captured parameters on success. Parameter values are percent-decoded.
    pub fn matches(&self, path: &str) -> Option<Params> {
        let body = path.strip_prefix('/')?;
        let body = body.strip_suffix('/').unwrap_or(body);

        let parts: Vec<&str> = if body.is_empty() {
            vec![]
        }
        else {
            body.split('/').collect()
        };

        if parts.len() != self.segments.len() {
            return None;
        }

        let mut params = Params::new();
        for (segment, part) in self.segments.iter().zip(parts) {
            match segment {
                Segment::Static(s) => {
                    if s.to_lowercase() != part.to_lowercase() {
                        return None;
                    }
                }
                Segment::Param(name) => {
                    if part.is_empty() {
                        return None;
                    }
                    params.insert(name.to_owned(), decode(part).into_owned());
                }
            }
        }

        Some(params)
    }

    /// Build a path from this pattern by filling in the given parameters.
    ///
    /// Parameter values are percent-encoded.
    pub fn href(&self, params: &Params) -> Result<String> {
        if self.segments.is_empty() {
            return Ok("/".to_owned());
        }

        let mut href = String::new();
        for segment in &self.segments {
            href.push('/');
            match segment {
                Segment::Static(s) => href.push_str(s),
                Segment::Param(name) => {
                    let value = params.get(name)
                        .filter(|v| !v.is_empty())
                        .ok_or_else(|| Error::MissingParam {
                            pattern: self.source.clone(),
                            param: name.clone(),
                        })?;
                    href.push_str(&urlencoding::encode(value));
                }
            }
        }

        Ok(href)
    }
}

impl fmt::Display for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.source)
    }
}

fn decode(part: &str) -> Cow<str> {
    match urlencoding::decode(part) {
        Ok(decoded) => decoded,
        Err(e) => {
            // keep the raw segment rather than failing the whole match
            warn!("couldn't decode path segment {:?}: {}", part, e);
            Cow::Borrowed(part)
        }
    }
}

/// Named values captured from a path, in pattern order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params(Vec<(String, String)>);

impl Params {
    /// An empty set of parameters.
    pub fn new() -> Self {
        Params(vec![])
    }

    /// Set a parameter, replacing any previous value with the same name.
    pub fn insert(&mut self, name: String, value: String) {
        match self.0.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None => self.0.push((name, value)),
        }
    }

    /// Look up a parameter by name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Iterate over `(name, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// The number of parameters.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no parameters.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<N: Into<String>, V: Into<String>> std::iter::FromIterator<(N, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        let mut params = Params::new();
        for (n, v) in iter {
            params.insert(n.into(), v.into());
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(pattern: &str) -> PathPattern {
        PathPattern::parse(pattern).expect("valid pattern")
    }

    #[test]
    fn parse_root() {
        assert!(p("/").segments().is_empty());
    }

    #[test]
    fn parse_param() {
        assert_eq!(
            p("/pokemon/:id").segments(),
            &[Segment::Static("pokemon".to_owned()), Segment::Param("id".to_owned())][..],
        );
        assert_eq!(p("/pokemon/:id").param_names().collect::<Vec<_>>(), vec!["id"]);
    }

    #[test]
    fn parse_errors() {
        for pattern in &["", "pokemon", "//", "//pokemon", "/pokemon//", "/pokemon//:id", "/pokemon/:", "/:id/:id", "/:a-b"] {
            match PathPattern::parse(pattern) {
                Err(Error::InvalidPattern { .. }) => {}
                r => panic!("expected invalid pattern for {:?}, got {:?}", pattern, r),
            }
        }
    }

    #[test]
    fn root_matches_only_root() {
        let root = p("/");
        assert_eq!(root.matches("/"), Some(Params::new()));
        assert_eq!(root.matches(""), None);
        assert_eq!(root.matches("/pokemon"), None);
    }

    #[test]
    fn param_matches_one_segment() {
        let detail = p("/pokemon/:id");

        let params = detail.matches("/pokemon/42").expect("match");
        assert_eq!(params.get("id"), Some("42"));
        assert_eq!(params.len(), 1);

        assert_eq!(detail.matches("/pokemon/42/").and_then(|p| p.get("id").map(str::to_owned)), Some("42".to_owned()));
        assert_eq!(detail.matches("/pokemon"), None);
        assert_eq!(detail.matches("/pokemon/"), None);
        assert_eq!(detail.matches("/pokemon//"), None);
        assert_eq!(detail.matches("/pokemon/1/2"), None);
        assert_eq!(detail.matches("/pokedex/1"), None);
    }

    #[test]
    fn static_segments_ignore_case() {
        assert!(p("/pokemon/:id").matches("/PoKeMoN/7").is_some());
    }

    #[test]
    fn params_are_decoded() {
        let params = p("/pokemon/:id").matches("/pokemon/mr%20mime").expect("match");
        assert_eq!(params.get("id"), Some("mr mime"));
    }

    #[test]
    fn href_fills_params() {
        let detail = p("/pokemon/:id");
        let params: Params = vec![("id", "42")].into_iter().collect();
        assert_eq!(detail.href(&params).unwrap(), "/pokemon/42");

        let params: Params = vec![("id", "mr mime")].into_iter().collect();
        assert_eq!(detail.href(&params).unwrap(), "/pokemon/mr%20mime");

        assert_eq!(p("/").href(&Params::new()).unwrap(), "/");
    }

    #[test]
    fn href_missing_param() {
        assert_eq!(
            p("/pokemon/:id").href(&Params::new()),
            Err(Error::MissingParam { pattern: "/pokemon/:id".to_owned(), param: "id".to_owned() }),
        );
    }

    #[test]
    fn insert_replaces() {
        let mut params = Params::new();
        params.insert("id".to_owned(), "1".to_owned());
        params.insert("id".to_owned(), "2".to_owned());
        assert_eq!(params.len(), 1);
        assert_eq!(params.get("id"), Some("2"));
    }
}
