//! Decides how the live select must follow the authoritative one
use crate::config::SeedMode;
use crate::dom::SelectElement;
use crate::types::{ReconciliationDecision, SelectSnapshot};
use log::debug;

/// Copies the winning element's selection onto the other one before
/// snapshots are taken. Single selects take the winner's value; when either
/// side is `multiple` the whole set of selected values is copied.
pub fn seed_values(mode: SeedMode, authoritative: &mut SelectElement, live: &mut SelectElement) {
    let (winner, target) = match mode {
        SeedMode::RemoteSeeded => (&*authoritative, live),
        SeedMode::LocalSeeded => (&*live, authoritative),
    };

    if winner.multiple || target.multiple {
        let values = winner.selected_values();
        target.set_selected_values(&values);
    } else {
        let value = winner.value().to_string();
        target.set_value(&value);
    }
}

pub struct DiffEngine<'a> {
    authoritative: &'a SelectSnapshot,
    live: &'a SelectSnapshot,
}

impl<'a> DiffEngine<'a> {
    pub fn new(authoritative: &'a SelectSnapshot, live: &'a SelectSnapshot) -> Self {
        DiffEngine { authoritative, live }
    }

    pub fn decide(authoritative: &SelectSnapshot, live: &SelectSnapshot) -> ReconciliationDecision {
        DiffEngine::new(authoritative, live).reconcile()
    }

    pub fn reconcile(&self) -> ReconciliationDecision {
        let authoritative = self.authoritative.sorted();
        let live = self.live.sorted();

        if authoritative.len() != live.len() {
            debug!(
                "combo box: option count changed ({} -> {})",
                live.len(),
                authoritative.len()
            );
            return ReconciliationDecision::FullReinit;
        }

        let structural_change = authoritative
            .iter()
            .zip(live.iter())
            .find(|(a, l)| a.value != l.value || a.label != l.label);
        if let Some((a, l)) = structural_change {
            debug!(
                "combo box: option set changed at '{}'/'{}' (live '{}'/'{}')",
                a.value, a.label, l.value, l.label
            );
            return ReconciliationDecision::FullReinit;
        }

        if authoritative
            .iter()
            .zip(live.iter())
            .any(|(a, l)| a.selected != l.selected)
        {
            return ReconciliationDecision::SelectivePatch;
        }

        ReconciliationDecision::NoOp
    }

    /// Values whose selected flag differs, in sorted order. Only meaningful
    /// once the option sets are known to be structurally equal.
    pub fn selection_changes(&self) -> Vec<&'a str> {
        self.authoritative
            .sorted()
            .into_iter()
            .zip(self.live.sorted())
            .filter(|(a, l)| a.value == l.value && a.selected != l.selected)
            .map(|(a, _)| a.value.as_str())
            .collect()
    }
}
