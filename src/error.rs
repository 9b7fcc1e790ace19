//! Errors produced while building a route table or talking to the browser.

use wasm_bindgen::JsValue;

/// Shorthand for results carrying a router [`Error`].
///
/// [`Error`]: enum.Error.html
pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong in this crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// A path pattern could not be parsed.
    #[error("invalid route pattern {pattern:?}: {reason}")]
    InvalidPattern {
        /// The offending pattern.
        pattern: String,
        /// What is wrong with it.
        reason: &'static str,
    },

    /// A parameter needed to build an href was not supplied.
    #[error("missing parameter {param:?} for route {pattern:?}")]
    MissingParam {
        /// The pattern being filled.
        pattern: String,
        /// The parameter that was not given.
        param: String,
    },

    /// No route renders the requested view.
    #[error("no route for view {0}")]
    UnknownView(String),

    /// The router configuration could not be read.
    #[error("config error: {0}")]
    Config(String),

    /// A browser API call failed or is unavailable.
    #[error("browser error: {0}")]
    Browser(String),
}

impl Error {
    pub(crate) fn invalid(pattern: &str, reason: &'static str) -> Self {
        Error::InvalidPattern {
            pattern: pattern.to_owned(),
            reason: reason,
        }
    }

    pub(crate) fn js(err: JsValue) -> Self {
        Error::Browser(
            err.as_string()
                .unwrap_or_else(|| format!("{:?}", err))
        )
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<Error> for JsValue {
    fn from(err: Error) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display() {
        assert_eq!(
            Error::invalid("pokemon", "must start with '/'").to_string(),
            "invalid route pattern \"pokemon\": must start with '/'",
        );
        assert_eq!(
            Error::MissingParam { pattern: "/pokemon/:id".to_owned(), param: "id".to_owned() }.to_string(),
            "missing parameter \"id\" for route \"/pokemon/:id\"",
        );
    }

    #[test]
    fn json_errors_are_config_errors() {
        let err = serde_json::from_str::<u8>("nope").unwrap_err();
        match Error::from(err) {
            Error::Config(_) => {}
            e => panic!("unexpected error: {:?}", e),
        }
    }
}
