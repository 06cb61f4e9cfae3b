//! Minimal model of the combo box subtree the hook is attached to
//!
//! Only the pieces the reconciler reads or writes are modelled: the dataset,
//! the wrapper's class list and the two select elements. `value` semantics
//! follow HTML, because value seeding relies on them.
use crate::html_generator;
use crate::types::next_element_id;
use indexmap::IndexSet;
use std::collections::HashMap;

/// Class that keeps the wrapper hidden until the enhancement is attached.
pub const HIDDEN_CLASS: &str = "opacity-0";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionElement {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

impl OptionElement {
    pub fn new(value: impl Into<String>, label: impl Into<String>, selected: bool) -> Self {
        OptionElement {
            value: value.into(),
            label: label.into(),
            selected,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectElement {
    pub id: String,
    pub multiple: bool,
    pub options: Vec<OptionElement>,
}

impl SelectElement {
    pub fn new(options: Vec<OptionElement>) -> Self {
        SelectElement {
            id: next_element_id(),
            multiple: false,
            options,
        }
    }

    pub fn multiple(options: Vec<OptionElement>) -> Self {
        SelectElement {
            multiple: true,
            ..SelectElement::new(options)
        }
    }

    /// Value of the first selected option, or `""` when nothing is selected.
    pub fn value(&self) -> &str {
        self.options
            .iter()
            .find(|o| o.selected)
            .map(|o| o.value.as_str())
            .unwrap_or("")
    }

    /// Selects the first option with `value` and deselects all others.
    /// With no match every option ends up deselected. Multi-selects collapse
    /// to a single selection exactly like assigning `select.value`.
    pub fn set_value(&mut self, value: &str) {
        let mut matched = false;
        for option in self.options.iter_mut() {
            let hit = !matched && option.value == value;
            matched |= hit;
            option.selected = hit;
        }
    }

    pub fn selected_values(&self) -> Vec<String> {
        self.options
            .iter()
            .filter(|o| o.selected)
            .map(|o| o.value.clone())
            .collect()
    }

    /// Selects exactly the options whose value is in `values`.
    pub fn set_selected_values(&mut self, values: &[String]) {
        for option in self.options.iter_mut() {
            option.selected = values.contains(&option.value);
        }
    }

    pub fn inner_html(&self) -> String {
        html_generator::options_html(&self.options)
    }

    /// Replaces the option list wholesale, the `innerHTML = ...` path.
    pub fn replace_options(&mut self, options: &[OptionElement]) {
        self.options = options.to_vec();
    }
}

/// The element carrying the hook: dataset, wrapper and both selects.
#[derive(Debug, Clone)]
pub struct ComboBoxRoot {
    pub id: String,
    pub dataset: HashMap<String, String>,
    pub wrapper_classes: IndexSet<String>,
    /// `select.combo-box-latest`, re-rendered by the server.
    pub authoritative: Option<SelectElement>,
    /// `select.combo-box`, owned by the enhancement widget.
    pub live: Option<SelectElement>,
}

impl ComboBoxRoot {
    pub fn new(authoritative: SelectElement, live: SelectElement) -> Self {
        let mut wrapper_classes = IndexSet::new();
        wrapper_classes.insert("combo-box-wrapper".to_string());
        wrapper_classes.insert(HIDDEN_CLASS.to_string());
        ComboBoxRoot {
            id: next_element_id(),
            dataset: HashMap::new(),
            wrapper_classes,
            authoritative: Some(authoritative),
            live: Some(live),
        }
    }

    pub fn with_data(mut self, key: &str, value: impl Into<String>) -> Self {
        self.dataset.insert(key.to_string(), value.into());
        self
    }

    pub fn reveal(&mut self) {
        self.wrapper_classes.shift_remove(HIDDEN_CLASS);
    }

    pub fn is_revealed(&self) -> bool {
        !self.wrapper_classes.contains(HIDDEN_CLASS)
    }

    /// Both selects at once; `None` when either is absent.
    pub fn selects_mut(&mut self) -> Option<(&mut SelectElement, &mut SelectElement)> {
        match (self.authoritative.as_mut(), self.live.as_mut()) {
            (Some(authoritative), Some(live)) => Some((authoritative, live)),
            _ => None,
        }
    }
}
