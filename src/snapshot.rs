//! Reads both select elements into comparable snapshots
use crate::dom::SelectElement;
use crate::types::{OptionRecord, SelectSnapshot, SnapshotSource};
use log::debug;
use std::collections::HashSet;

pub struct SnapshotExtractor;

impl SnapshotExtractor {
    /// Snapshot of one element in DOM order. A repeated value keeps its
    /// first occurrence so that values stay unique within the snapshot; the
    /// dropped duplicates do not count, so `[a, a]` against `[a]` is `NoOp`
    /// rather than a rebuild.
    pub fn snapshot(element: Option<&SelectElement>, source: SnapshotSource) -> SelectSnapshot {
        let Some(element) = element else {
            return SelectSnapshot::empty(source);
        };

        let mut seen = HashSet::with_capacity(element.options.len());
        let mut records = Vec::with_capacity(element.options.len());
        for option in &element.options {
            if !seen.insert(option.value.as_str()) {
                debug!(
                    "combo box: {} select '{}' repeats option value '{}', keeping the first",
                    source, element.id, option.value
                );
                continue;
            }
            records.push(OptionRecord::new(
                option.value.clone(),
                option.label.clone(),
                option.selected,
            ));
        }

        SelectSnapshot { source, records }
    }

    /// `(authoritative, live)` snapshots. Never mutates either element.
    pub fn extract(
        authoritative: Option<&SelectElement>,
        live: Option<&SelectElement>,
    ) -> (SelectSnapshot, SelectSnapshot) {
        (
            Self::snapshot(authoritative, SnapshotSource::Authoritative),
            Self::snapshot(live, SnapshotSource::Live),
        )
    }
}
