//! Widget configuration.

use std::collections::BTreeMap;
use std::time::Duration;

const DEFAULT_INPUT_SELECTOR: &str = ".search-select";
const DEFAULT_CONTAINER_SELECTOR: &str = ".search-options";
const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);
const DEFAULT_CREATE_ITEM_URL: &str = "/catalog/admin/catalog/catalogitem/add/";

/// Widget configuration.
///
/// Hosts usually build it from string settings (data attributes, a settings
/// script) with [`Config::from_map`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Selector of the text field. Default: `.search-select`
    pub input_selector: String,

    /// Selector of the dropdown container. Default: `.search-options`
    pub container_selector: String,

    /// Quiet period before a search is issued. Default: 500ms
    pub debounce: Duration,

    /// Page creating a new item; receives the typed text as `name`.
    pub create_item_url: String,

    /// Filter directive for the tracing subscriber, e.g. `debug` or
    /// `catalog_select=trace`. Default: `"info"` when tracing is initialized.
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_selector: DEFAULT_INPUT_SELECTOR.to_string(),
            container_selector: DEFAULT_CONTAINER_SELECTOR.to_string(),
            debounce: DEFAULT_DEBOUNCE,
            create_item_url: DEFAULT_CREATE_ITEM_URL.to_string(),
            trace_level: None,
        }
    }
}

impl Config {
    /// Parses configuration from string settings.
    ///
    /// Recognized keys: `input`, `container`, `debounce_ms`, `create_item_url`,
    /// `trace_level`. Missing, blank or malformed values fall back to defaults.
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use std::time::Duration;
    /// use catalog_select::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("input".to_string(), "#search".to_string());
    /// map.insert("debounce_ms".to_string(), "250".to_string());
    ///
    /// let config = Config::from_map(&map);
    /// assert_eq!(config.input_selector, "#search");
    /// assert_eq!(config.debounce, Duration::from_millis(250));
    /// ```
    #[must_use]
    pub fn from_map(settings: &BTreeMap<String, String>) -> Self {
        let defaults = Self::default();
        let text = |key: &str| {
            settings
                .get(key)
                .map(|value| value.trim())
                .filter(|value| !value.is_empty())
                .map(String::from)
        };

        let debounce = match text("debounce_ms") {
            Some(raw) => raw.parse::<u64>().map(Duration::from_millis).unwrap_or_else(|_| {
                tracing::warn!(value = %raw, "invalid debounce_ms, using default");
                defaults.debounce
            }),
            None => defaults.debounce,
        };

        Self {
            input_selector: text("input").unwrap_or(defaults.input_selector),
            container_selector: text("container").unwrap_or(defaults.container_selector),
            debounce,
            create_item_url: text("create_item_url").unwrap_or(defaults.create_item_url),
            trace_level: text("trace_level"),
        }
    }

    /// URL of the item creation page prefilled with `name`.
    pub fn create_item_location(&self, name: &str) -> String {
        let query = form_urlencoded::Serializer::new(String::new())
            .append_pair("name", name)
            .finish();
        let separator = if self.create_item_url.contains('?') { '&' } else { '?' };
        format!("{}{}{}", self.create_item_url, separator, query)
    }
}
