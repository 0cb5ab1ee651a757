//! Built-in label and template table.
//!
//! Fixed text used in notifications and log headers lives here rather
//! than inline in the loggers, so callers can swap it (for localization
//! or rebranding) by injecting their own [`Resources`] implementation.

use crate::application::ports::Resources;

/// Default label table.
const LABELS: [(&str, &str); 4] = [
    ("thread-prefix", "Thread {0}({1})"),
    ("unhandled-error", "Unhandled error"),
    ("error-caption", "{0} - Error"),
    (
        "error-header",
        "An error has occurred and has been logged to '{0}'.\n\n{1}",
    ),
];

/// The built-in English label table.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticResources;

impl StaticResources {
    /// Create the built-in label table.
    pub fn new() -> Self {
        Self
    }
}

impl Resources for StaticResources {
    fn lookup(&self, key: &str) -> String {
        LABELS
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| (*v).to_string())
            .unwrap_or_else(|| key.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_keys_resolve() {
        let resources = StaticResources::new();
        assert_eq!(resources.lookup("unhandled-error"), "Unhandled error");
        assert_eq!(resources.lookup("thread-prefix"), "Thread {0}({1})");
    }

    #[test]
    fn test_unknown_key_falls_back_to_key() {
        let resources = StaticResources::new();
        assert_eq!(resources.lookup("no-such-label"), "no-such-label");
    }

    #[test]
    fn test_format_fills_placeholders() {
        let resources = StaticResources::new();
        assert_eq!(
            resources.format("thread-prefix", &["main", "1"]),
            "Thread main(1)"
        );
        assert_eq!(
            resources.format("error-caption", &["MyApp"]),
            "MyApp - Error"
        );
    }
}
