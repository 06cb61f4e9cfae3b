//! Plain data types shared by the extractor, diff engine and bridge
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use uuid::Uuid;

/// One `<option>` as seen by the reconciler.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OptionRecord {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

impl OptionRecord {
    pub fn new(value: impl Into<String>, label: impl Into<String>, selected: bool) -> Self {
        OptionRecord {
            value: value.into(),
            label: label.into(),
            selected,
        }
    }
}

/// Which of the two select elements a snapshot was taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotSource {
    Authoritative,
    Live,
}

impl fmt::Display for SnapshotSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnapshotSource::Authoritative => write!(f, "authoritative"),
            SnapshotSource::Live => write!(f, "live"),
        }
    }
}

/// Options of one select element in DOM order, values unique.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectSnapshot {
    pub source: SnapshotSource,
    pub records: Vec<OptionRecord>,
}

impl SelectSnapshot {
    pub fn empty(source: SnapshotSource) -> Self {
        SelectSnapshot {
            source,
            records: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records ordered by value, the form used for every comparison.
    pub fn sorted(&self) -> Vec<&OptionRecord> {
        let mut sorted: Vec<&OptionRecord> = self.records.iter().collect();
        sorted.sort_by(|a, b| a.value.cmp(&b.value));
        sorted
    }

    pub fn get(&self, value: &str) -> Option<&OptionRecord> {
        self.records.iter().find(|r| r.value == value)
    }

    pub fn selected_values(&self) -> Vec<&str> {
        self.records
            .iter()
            .filter(|r| r.selected)
            .map(|r| r.value.as_str())
            .collect()
    }
}

/// Outcome of comparing the authoritative snapshot against the live one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconciliationDecision {
    NoOp,
    SelectivePatch,
    FullReinit,
}

impl ToString for ReconciliationDecision {
    fn to_string(&self) -> String {
        match self {
            ReconciliationDecision::NoOp => "NOOP".to_string(),
            ReconciliationDecision::SelectivePatch => "SELECTIVE_PATCH".to_string(),
            ReconciliationDecision::FullReinit => "FULL_REINIT".to_string(),
        }
    }
}

/// Pairs an issued remote query with its eventual reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CorrelationId(Uuid);

impl CorrelationId {
    pub fn new() -> Self {
        CorrelationId(Uuid::new_v4())
    }
}

impl Default for CorrelationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CorrelationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single `{ text, value }` entry as the enhancement library expects it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadedOption {
    pub text: String,
    pub value: String,
}

/// Opaque handle returned by an `Enhancer` for one enhancement instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InstanceHandle(pub u64);

/// Element id generator (lock-free, atomic)
static ELEMENT_COUNTER: Lazy<AtomicUsize> = Lazy::new(|| AtomicUsize::new(0));

pub fn next_element_id() -> String {
    let id = ELEMENT_COUNTER.fetch_add(1, Ordering::SeqCst);
    format!("el_id_{}", id)
}
