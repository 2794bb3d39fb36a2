//! Load configuration.
//!
//! Every knob the tool exposes lives in [`LoadConfig`]: the positional
//! field schema, the set of list-valued fields, the built-in defaults
//! behind the CLI's `default` sentinel, and the runtime flags. The
//! config is built once at startup and passed by reference into the
//! reader, transformer, and loader - it is never ambient state.

use std::env;

/// CLI sentinel meaning "use the built-in default" for a positional.
pub const DEFAULT_SENTINEL: &str = "default";

/// Source file used when the CLI asks for the default.
pub const DEFAULT_SOURCE: &str = "HackPortal.csv";

/// Destination collection endpoint used when the CLI asks for the default.
pub const DEFAULT_URL: &str = "http://104.197.161.63:8080/v1/api/projects";

/// Request timeout applied when nothing else is configured.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Field names positionally aligned with the source columns.
const DEFAULT_FIELDS: [&str; 9] = [
    "Name",
    "Hackathon",
    "ApplicationArea",
    "Year",
    "Tags",
    "Members",
    "Description",
    "WinnerType",
    "Twitter",
];

/// Fields whose cells split into string arrays.
const DEFAULT_ARRAY_FIELDS: [&str; 3] = ["ApplicationArea", "Tags", "Members"];

/// Immutable process-wide configuration for one load run.
#[derive(Debug, Clone)]
pub struct LoadConfig {
    /// Ordered field names; column `i` of every row maps to `fields[i]`.
    pub fields: Vec<String>,

    /// Names of fields coerced to string arrays.
    pub array_fields: Vec<String>,

    /// Source path behind the `default` sentinel.
    pub source_path: String,

    /// Destination URL behind the `default` sentinel.
    pub endpoint_url: String,

    /// Emit row-count and coercion diagnostics.
    pub debug: bool,

    /// HTTP request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self {
            fields: DEFAULT_FIELDS.iter().map(|f| f.to_string()).collect(),
            array_fields: DEFAULT_ARRAY_FIELDS.iter().map(|f| f.to_string()).collect(),
            source_path: DEFAULT_SOURCE.to_string(),
            endpoint_url: DEFAULT_URL.to_string(),
            debug: false,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl LoadConfig {
    /// Build a config from the environment, falling back to the defaults.
    ///
    /// Recognized variables (load a `.env` first with `dotenvy::dotenv()`):
    ///
    /// - `PROJLOAD_SOURCE` - default source path
    /// - `PROJLOAD_URL` - default destination URL
    /// - `PROJLOAD_FIELDS` - comma-separated field schema
    /// - `PROJLOAD_ARRAY_FIELDS` - comma-separated list-field names
    /// - `PROJLOAD_DEBUG` - `1` or `true` enables diagnostics
    /// - `PROJLOAD_TIMEOUT_SECS` - request timeout
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(source) = env::var("PROJLOAD_SOURCE") {
            config.source_path = source;
        }
        if let Ok(url) = env::var("PROJLOAD_URL") {
            config.endpoint_url = url;
        }
        if let Ok(fields) = env::var("PROJLOAD_FIELDS") {
            config.fields = split_csv_list(&fields);
        }
        if let Ok(array_fields) = env::var("PROJLOAD_ARRAY_FIELDS") {
            config.array_fields = split_csv_list(&array_fields);
        }
        if let Ok(debug) = env::var("PROJLOAD_DEBUG") {
            config.debug = matches!(debug.trim(), "1" | "true" | "yes");
        }
        if let Ok(timeout) = env::var("PROJLOAD_TIMEOUT_SECS") {
            if let Ok(secs) = timeout.trim().parse() {
                config.timeout_secs = secs;
            }
        }

        config
    }

    /// Replace the field schema.
    pub fn with_fields(mut self, fields: Vec<String>) -> Self {
        self.fields = fields;
        self
    }

    /// Replace the list-field set.
    pub fn with_array_fields(mut self, array_fields: Vec<String>) -> Self {
        self.array_fields = array_fields;
        self
    }

    /// Enable or disable diagnostics.
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Set the request timeout.
    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Resolve a source-path positional, honoring the `default` sentinel.
    pub fn resolve_source<'a>(&'a self, arg: &'a str) -> &'a str {
        if arg == DEFAULT_SENTINEL {
            &self.source_path
        } else {
            arg
        }
    }

    /// Resolve a destination-URL positional, honoring the `default` sentinel.
    pub fn resolve_url<'a>(&'a self, arg: &'a str) -> &'a str {
        if arg == DEFAULT_SENTINEL {
            &self.endpoint_url
        } else {
            arg
        }
    }

    /// Whether `name` is configured as a list-valued field.
    pub fn is_array_field(&self, name: &str) -> bool {
        self.array_fields.iter().any(|f| f == name)
    }
}

/// Split a comma-separated env value into trimmed, non-empty names.
fn split_csv_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect()
}
