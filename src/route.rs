//! Router trait for generating a message when the page url changes.

/// Implement this trait on your router to turn page URLs into messages for the app.
pub trait Route<Message> {
    /// Convert a url to a message for the app, or `None` if the url isn't routed.
    fn route(&self, url: &str) -> Option<Message>;
}
