//! Dataset-driven configuration for one combo box
use crate::config_field;
use crate::errors::ComboBoxError;
use crate::widget::EnhancementSettings;
use indexmap::IndexMap;
use log::warn;
use once_cell::sync::Lazy;
use phf::phf_set;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::RwLock;

pub const OPTIONS_KEY: &str = "options";
pub const PLUGINS_KEY: &str = "plugins";
pub const GLOBAL_OPTIONS_KEY: &str = "globalOptions";
pub const REMOTE_EVENT_KEY: &str = "remoteOptionsEventName";
pub const REMOTE_TARGET_KEY: &str = "remoteOptionsTarget";

// Compile-time plugin catalog of the enhancement library
static KNOWN_PLUGINS: phf::Set<&'static str> = phf_set! {
    "caret_position",
    "change_listener",
    "checkbox_options",
    "clear_button",
    "drag_drop",
    "dropdown_header",
    "dropdown_input",
    "input_autogrow",
    "no_active_items",
    "no_backspace_delete",
    "optgroup_columns",
    "remove_button",
    "restore_on_backspace",
    "virtual_scroll",
};

/// Process-wide named option objects, referenced by `globalOptions`.
static GLOBAL_OPTIONS: Lazy<RwLock<IndexMap<String, Map<String, Value>>>> =
    Lazy::new(|| RwLock::new(IndexMap::new()));

pub fn register_global_options(name: &str, options: Map<String, Value>) {
    let mut globals = GLOBAL_OPTIONS.write().unwrap_or_else(|p| p.into_inner());
    globals.insert(name.to_string(), options);
}

pub fn unregister_global_options(name: &str) -> Option<Map<String, Value>> {
    let mut globals = GLOBAL_OPTIONS.write().unwrap_or_else(|p| p.into_inner());
    globals.shift_remove(name)
}

fn lookup_global_options(name: &str) -> Option<Map<String, Value>> {
    let globals = GLOBAL_OPTIONS.read().unwrap_or_else(|p| p.into_inner());
    globals.get(name).cloned()
}

/// Which element's value wins before diffing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedMode {
    /// Remote search: the authoritative value is copied onto the live select,
    /// whose option list may not contain the selected option yet.
    RemoteSeeded,
    /// Local options: the live value is copied onto the authoritative select;
    /// the server markup only supplies the catalog.
    LocalSeeded,
}

impl SeedMode {
    pub fn from_remote_flag(remote_options_configured: bool) -> Self {
        if remote_options_configured {
            SeedMode::RemoteSeeded
        } else {
            SeedMode::LocalSeeded
        }
    }
}

/// Where remote queries are sent on the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteRoute {
    pub event_name: String,
    pub target: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ComboBoxConfig {
    pub options: Map<String, Value>,
    pub plugins: Vec<String>,
    pub global_options: Option<String>,
    pub remote_options_event_name: Option<String>,
    pub remote_options_target: Option<String>,
}

impl ComboBoxConfig {
    pub fn from_dataset(dataset: &HashMap<String, String>) -> Result<Self, ComboBoxError> {
        let options = config_field!(dataset, OPTIONS_KEY, json Map<String, Value>);
        let plugins = config_field!(dataset, PLUGINS_KEY, json Vec<String>);

        for plugin in plugins.iter().filter(|p| !KNOWN_PLUGINS.contains(p.as_str())) {
            warn!("combo box: unknown plugin '{}' passed through", plugin);
        }

        Ok(ComboBoxConfig {
            options,
            plugins,
            global_options: config_field!(dataset, GLOBAL_OPTIONS_KEY, optional),
            remote_options_event_name: config_field!(dataset, REMOTE_EVENT_KEY, optional),
            remote_options_target: config_field!(dataset, REMOTE_TARGET_KEY, optional),
        })
    }

    pub fn remote_options_configured(&self) -> bool {
        self.remote_options_event_name.is_some()
    }

    pub fn seed_mode(&self) -> SeedMode {
        SeedMode::from_remote_flag(self.remote_options_configured())
    }

    pub fn remote_route(&self) -> Option<RemoteRoute> {
        self.remote_options_event_name
            .as_ref()
            .map(|event_name| RemoteRoute {
                event_name: event_name.clone(),
                target: self.remote_options_target.clone(),
            })
    }

    /// Options handed to the enhancement library, lowest precedence first:
    /// global object, `plugins`, then the per-element `options`.
    pub fn merged_options(&self) -> Map<String, Value> {
        let mut merged = Map::new();

        if let Some(name) = &self.global_options {
            match lookup_global_options(name) {
                Some(globals) => merged.extend(globals),
                None => warn!("combo box: global options '{}' are not registered", name),
            }
        }

        merged.insert(
            PLUGINS_KEY.to_string(),
            Value::Array(self.plugins.iter().cloned().map(Value::String).collect()),
        );
        merged.extend(self.options.clone());
        merged
    }

    pub fn enhancement_settings(&self) -> EnhancementSettings {
        EnhancementSettings {
            options: self.merged_options(),
            plugins: self.plugins.clone(),
            remote_load: self.remote_options_configured(),
        }
    }
}
