//! Persisted user preferences.
//!
//! Loading never fails: a missing or unreadable file and unknown or
//! wrongly-typed fields all fall back to defaults, field by field. The
//! preference object is constructed fresh at startup from the defaults and
//! overlaid from the store's record; there is no shared mutable singleton.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::render::HighlightMode;
use crate::search::SearchMode;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    /// Wrap matched spans in ANSI color sequences when printing.
    pub highlight: bool,
    /// AND/OR policy for multi-word queries.
    pub search_mode: SearchMode,
    /// Color used for highlighted spans.
    pub highlight_mode: HighlightMode,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            highlight: true,
            search_mode: SearchMode::And,
            highlight_mode: HighlightMode::Default,
        }
    }
}

impl Preferences {
    /// Load preferences from `path`, falling back to defaults on any problem.
    pub fn load(path: &Path) -> Self {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                println!(
                    "No {} found. Using default configuration.",
                    path.display()
                );
                return Self::default();
            }
            Err(err) => {
                println!(
                    "Could not read {}. Using default configuration.",
                    path.display()
                );
                warn!(%err, config = %path.display(), "preferences read failed");
                return Self::default();
            }
        };

        let value: Value = match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(err) => {
                println!("{} is invalid. Using default configuration.", path.display());
                warn!(%err, config = %path.display(), "preferences parse failed");
                return Self::default();
            }
        };

        Self::default().overlaid(&value)
    }

    /// Overlay known fields from a JSON object, keeping the current value
    /// wherever a field is absent, unknown or has the wrong type.
    fn overlaid(mut self, value: &Value) -> Self {
        let Some(object) = value.as_object() else {
            return self;
        };

        if let Some(v) = object.get("highlight").and_then(Value::as_bool) {
            self.highlight = v;
        }
        if let Some(v) = object.get("search_mode") {
            if let Ok(mode) = serde_json::from_value::<SearchMode>(v.clone()) {
                self.search_mode = mode;
            }
        }
        if let Some(v) = object.get("highlight_mode") {
            if let Ok(mode) = serde_json::from_value::<HighlightMode>(v.clone()) {
                self.highlight_mode = mode;
            }
        }
        self
    }

    /// Persist preferences as pretty JSON. Failure is reported, not fatal.
    pub fn save(&self, path: &Path) {
        let json = match serde_json::to_string_pretty(self) {
            Ok(json) => json,
            Err(err) => {
                warn!(%err, "preferences serialize failed");
                return;
            }
        };
        if let Err(err) = fs::write(path, json) {
            println!("Writing {} failed.", path.display());
            warn!(%err, config = %path.display(), "preferences write failed");
        }
    }
}
